pub(crate) mod panel_content;
pub(crate) mod tab_bar;
pub(crate) mod view_menu;
