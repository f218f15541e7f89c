use iced::widget::{Row, button, container, text};
use iced::{Element, Length};
use viewdock::{ViewId, ViewKind};

/// Actions offered by the view menu.
#[derive(Debug, Clone)]
pub(crate) enum ViewMenuEvent {
    Create(ViewKind),
    PopOutCurrent,
    HideCurrent,
    Show(ViewId),
    MoveCurrent { forward: bool },
    RefreshPositions,
    ZoomCurrent,
}

/// A view that is registered but not docked.
#[derive(Debug, Clone)]
pub(crate) struct UndockedEntry {
    pub(crate) view: ViewId,
    pub(crate) name: String,
    pub(crate) popped_out: bool,
}

/// Props for rendering the view menu.
#[derive(Debug, Clone)]
pub(crate) struct ViewMenuProps {
    pub(crate) has_current: bool,
    pub(crate) movable: bool,
    pub(crate) undocked: Vec<UndockedEntry>,
}

pub(crate) fn view(props: ViewMenuProps) -> Element<'static, ViewMenuEvent> {
    let mut items = Row::new().spacing(4);

    for kind in ViewKind::ALL {
        items = items.push(
            button(text(format!("New {kind}")).size(13))
                .style(button::secondary)
                .on_press(ViewMenuEvent::Create(kind)),
        );
    }

    let current_only = |label: &'static str, event: ViewMenuEvent| {
        button(text(label).size(13))
            .style(button::secondary)
            .on_press_maybe(props.has_current.then_some(event))
    };
    items = items
        .push(current_only("Pop out", ViewMenuEvent::PopOutCurrent))
        .push(current_only("Hide", ViewMenuEvent::HideCurrent))
        .push(current_only("Zoom", ViewMenuEvent::ZoomCurrent));

    if props.movable {
        items = items
            .push(current_only(
                "Move back",
                ViewMenuEvent::MoveCurrent { forward: false },
            ))
            .push(current_only(
                "Move forward",
                ViewMenuEvent::MoveCurrent { forward: true },
            ));
    }

    items = items.push(
        button(text("Refresh positions").size(13))
            .style(button::secondary)
            .on_press(ViewMenuEvent::RefreshPositions),
    );

    for entry in props.undocked {
        let verb = if entry.popped_out { "Dock" } else { "Show" };
        items = items.push(
            button(text(format!("{verb} {}", entry.name)).size(13))
                .style(button::text)
                .on_press(ViewMenuEvent::Show(entry.view)),
        );
    }

    container(items).width(Length::Fill).padding(4).into()
}
