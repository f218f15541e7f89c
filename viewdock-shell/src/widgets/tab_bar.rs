use iced::widget::{Column, Row, button, container, text};
use iced::{Element, Length};
use viewdock::TabPosition;

/// Layout metrics for the tab bar.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TabBarMetrics {
    pub(crate) thickness: f32,
    pub(crate) label_font_size: f32,
    pub(crate) spacing: f32,
}

impl Default for TabBarMetrics {
    fn default() -> Self {
        Self {
            thickness: 140.0,
            label_font_size: 13.0,
            spacing: 2.0,
        }
    }
}

/// Events emitted by the tab bar.
#[derive(Debug, Clone)]
pub(crate) enum TabBarEvent {
    Select(usize),
}

/// Props for rendering the tab bar.
#[derive(Debug, Clone)]
pub(crate) struct TabBarProps<'a> {
    pub(crate) labels: Vec<&'a str>,
    pub(crate) current: Option<usize>,
    pub(crate) position: TabPosition,
}

pub(crate) fn view(props: TabBarProps<'_>) -> Element<'_, TabBarEvent> {
    let metrics = TabBarMetrics::default();
    let buttons = props.labels.iter().enumerate().map(|(index, label)| {
        let style = if props.current == Some(index) {
            button::primary
        } else {
            button::secondary
        };
        Element::from(
            button(text(*label).size(metrics.label_font_size))
                .style(style)
                .on_press(TabBarEvent::Select(index)),
        )
    });

    match props.position {
        TabPosition::North | TabPosition::South => container(
            Row::with_children(buttons).spacing(metrics.spacing),
        )
        .width(Length::Fill)
        .padding(4)
        .into(),
        TabPosition::West | TabPosition::East => container(
            Column::with_children(buttons).spacing(metrics.spacing),
        )
        .width(Length::Fixed(metrics.thickness))
        .height(Length::Fill)
        .padding(4)
        .into(),
    }
}
