use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SettingsError;
use crate::model::ViewKind;

/// Edge of the host the tab bar is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabPosition {
    North,
    South,
    #[default]
    West,
    East,
}

/// View created when a manager is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultView {
    pub name: String,
    pub kind: ViewKind,
}

impl Default for DefaultView {
    fn default() -> Self {
        Self {
            name: String::from("Main View"),
            kind: ViewKind::Render,
        }
    }
}

/// Tunables for a [`crate::ViewManager`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewManagerSettings {
    pub tab_position: TabPosition,
    pub movable_tabs: bool,
    /// Hide the tab bar while a single tab is docked.
    pub auto_hide_tab_bar: bool,
    pub default_view: Option<DefaultView>,
}

impl Default for ViewManagerSettings {
    fn default() -> Self {
        Self {
            tab_position: TabPosition::default(),
            movable_tabs: true,
            auto_hide_tab_bar: true,
            default_view: Some(DefaultView::default()),
        }
    }
}

impl ViewManagerSettings {
    /// Settings without the default page, for hosts that populate views
    /// themselves.
    pub fn without_default_view() -> Self {
        Self {
            default_view: None,
            ..Self::default()
        }
    }
}

/// Load settings from a JSON file. A missing file yields defaults.
pub fn load_settings(path: &Path) -> Result<ViewManagerSettings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(ViewManagerSettings::default());
        },
        Err(err) => return Err(err.into()),
    };
    let settings: ViewManagerSettings = serde_json::from_str(&content)?;
    Ok(settings)
}
