use iced::widget::{Column, Row, container, text};
use iced::{Element, Length, alignment};

use crate::panels::ShellPanel;

/// Props for rendering a hosted panel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelContentProps<'a> {
    pub(crate) name: &'a str,
    pub(crate) panel: Option<&'a ShellPanel>,
}

pub(crate) fn view<'a, Message: 'a>(
    props: PanelContentProps<'a>,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match props.panel {
        None => text("No view").into(),
        Some(ShellPanel::Render { camera_distance }) => {
            text(format!("{}: camera at {camera_distance:.1} m", props.name))
                .size(16)
                .into()
        },
        Some(ShellPanel::Spreadsheet { cells }) => {
            let rows = cells.iter().map(|row| {
                let row_cells = row.iter().map(|cell| {
                    Element::from(
                        container(text(cell.as_str()).size(12))
                            .width(Length::Fixed(72.0)),
                    )
                });
                Element::from(Row::with_children(row_cells).spacing(2))
            });
            Column::with_children(rows).spacing(2).into()
        },
    };

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
