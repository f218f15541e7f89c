use std::collections::BTreeMap;

use iced::widget::{column, container, row};
use iced::{Element, Length, Size, Subscription, Task, Theme, window};
use viewdock::{
    SurfaceClose, SurfaceToken, TabPosition, ViewEffect, ViewId, ViewKind,
    ViewManager, ViewState,
};

use crate::config::load_initial_settings;
use crate::panels::ShellPanel;
use crate::widgets::panel_content::{self, PanelContentProps};
use crate::widgets::tab_bar::{self, TabBarEvent, TabBarProps};
use crate::widgets::view_menu::{
    self, UndockedEntry, ViewMenuEvent, ViewMenuProps,
};

pub(crate) const MIN_WINDOW_WIDTH: f32 = 640.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 480.0;
const POPPED_OUT_WINDOW_SIZE: Size = Size {
    width: 640.0,
    height: 480.0,
};
const ZOOM_STEP: f32 = 0.8;

/// Events routed through the shell update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    TabBar(TabBarEvent),
    Menu(ViewMenuEvent),
    WindowOpened(window::Id),
    CloseRequested(window::Id),
}

/// A popped-out view shown in its own window.
#[derive(Debug, Clone)]
struct Surface {
    token: SurfaceToken,
    view: ViewId,
    title: String,
}

pub(crate) struct App {
    main_window: window::Id,
    manager: ViewManager<ShellPanel>,
    surfaces: BTreeMap<window::Id, Surface>,
    next_view_number: usize,
}

impl App {
    /// Open the main window and dock the configured default view.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let (main_window, open_main) = window::open(window::Settings {
            min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
            exit_on_close_request: false,
            ..window::Settings::default()
        });

        let mut app = Self {
            main_window,
            manager: ViewManager::new(load_initial_settings()),
            surfaces: BTreeMap::new(),
            next_view_number: 1,
        };
        let effects = app.apply_effects();

        (
            app,
            Task::batch(vec![open_main.map(AppEvent::WindowOpened), effects]),
        )
    }

    pub(crate) fn title(&self, window: window::Id) -> String {
        match self.surfaces.get(&window) {
            Some(surface) => surface.title.clone(),
            None => String::from("viewdock"),
        }
    }

    pub(crate) fn theme(&self, _window: window::Id) -> Theme {
        Theme::Dark
    }

    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        window::close_requests().map(AppEvent::CloseRequested)
    }

    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        match event {
            AppEvent::WindowOpened(window) => {
                log::debug!("window {window:?} opened");
                Task::none()
            },
            AppEvent::CloseRequested(window) => self.close_window(window),
            AppEvent::TabBar(TabBarEvent::Select(index)) => {
                self.manager.select_tab(index);
                self.apply_effects()
            },
            AppEvent::Menu(event) => {
                self.reduce_menu(event);
                self.apply_effects()
            },
        }
    }

    pub(crate) fn view(&self, window: window::Id) -> Element<'_, AppEvent> {
        if window == self.main_window {
            return self.main_view();
        }

        let Some(surface) = self.surfaces.get(&window) else {
            return panel_content::view(PanelContentProps {
                name: "",
                panel: None,
            });
        };
        panel_content::view(PanelContentProps {
            name: &surface.title,
            panel: self.manager.panel(surface.view),
        })
    }

    fn close_window(&mut self, window: window::Id) -> Task<AppEvent> {
        if window == self.main_window {
            log::info!("main window closed, exiting");
            return iced::exit();
        }

        let token = self.surfaces.get(&window).map(|surface| surface.token);
        let Some(token) = token else {
            return window::close(window);
        };
        match self.manager.close_requested(token) {
            SurfaceClose::Suppressed { view, index } => {
                log::info!("{view} re-docked at tab {index}");
                self.apply_effects()
            },
            SurfaceClose::Unobserved => {
                self.surfaces.remove(&window);
                Task::batch(vec![self.apply_effects(), window::close(window)])
            },
        }
    }

    fn reduce_menu(&mut self, event: ViewMenuEvent) {
        match event {
            ViewMenuEvent::Create(kind) => self.create_view(kind),
            ViewMenuEvent::PopOutCurrent => {
                if let Some(view) = self.manager.current_view() {
                    self.manager.pop_out(view);
                }
            },
            ViewMenuEvent::HideCurrent => {
                if let Some(view) = self.manager.current_view() {
                    self.manager.hide_view(view, true);
                }
            },
            ViewMenuEvent::Show(view) => {
                if let Err(err) = self.manager.show_view(view) {
                    log::warn!("failed to show {view}: {err}");
                }
            },
            ViewMenuEvent::MoveCurrent { forward } => {
                self.move_current(forward);
            },
            ViewMenuEvent::RefreshPositions => {
                self.manager.refresh_position_cache();
            },
            ViewMenuEvent::ZoomCurrent => self.zoom_current(),
        }
    }

    fn create_view(&mut self, kind: ViewKind) {
        let name = format!("{kind} {}", self.next_view_number);
        self.next_view_number += 1;
        match self.manager.create_view(&name, kind.tag(), None, "") {
            Ok(Some(view)) => {
                if let Some(ViewState::Docked(index)) =
                    self.manager.view_state(view)
                {
                    self.manager.select_tab(index);
                }
            },
            Ok(None) => log::warn!("no panel for view type \"{kind}\""),
            Err(err) => log::warn!("failed to create \"{name}\": {err}"),
        }
    }

    fn move_current(&mut self, forward: bool) {
        let Some(index) = self.manager.tabs().current_index() else {
            return;
        };
        let target = if forward {
            index + 1
        } else {
            match index.checked_sub(1) {
                Some(target) => target,
                None => return,
            }
        };
        self.manager.move_tab(index, target);
    }

    fn zoom_current(&mut self) {
        let Some(view) = self.manager.current_view() else {
            return;
        };
        if let Some(ShellPanel::Render { camera_distance }) =
            self.manager.panel_mut(view)
        {
            *camera_distance *= ZOOM_STEP;
        }
    }

    /// Drain manager effects into window tasks.
    fn apply_effects(&mut self) -> Task<AppEvent> {
        let mut tasks = Vec::new();

        for effect in self.manager.drain_effects() {
            match effect {
                ViewEffect::CurrentChanged { previous, current } => {
                    log::info!(
                        "current view changed: {} -> {}",
                        self.describe(previous),
                        self.describe(current)
                    );
                },
                ViewEffect::TabBarVisibilityChanged { visible } => {
                    log::debug!("tab bar visible: {visible}");
                },
                ViewEffect::SurfaceOpened { view, token, title } => {
                    let (window, open) = window::open(window::Settings {
                        size: POPPED_OUT_WINDOW_SIZE,
                        exit_on_close_request: false,
                        ..window::Settings::default()
                    });
                    log::info!("\"{title}\" popped out to {window:?}");
                    self.surfaces
                        .insert(window, Surface { token, view, title });
                    tasks.push(open.map(AppEvent::WindowOpened));
                },
                ViewEffect::SurfaceReleased { token, .. } => {
                    let window = self
                        .surfaces
                        .iter()
                        .find(|(_, surface)| surface.token == token)
                        .map(|(window, _)| *window);
                    if let Some(window) = window {
                        self.surfaces.remove(&window);
                        tasks.push(window::close(window));
                    }
                },
            }
        }

        Task::batch(tasks)
    }

    fn describe(&self, view: Option<ViewId>) -> String {
        view.and_then(|view| self.manager.view_name(view))
            .map(|key| key.name)
            .unwrap_or_else(|| String::from("none"))
    }

    fn main_view(&self) -> Element<'_, AppEvent> {
        let tabs = self.manager.tabs();
        let settings = self.manager.settings();

        let undocked = self
            .manager
            .panels()
            .filter_map(|(view, _)| {
                let popped_out = match self.manager.view_state(view)? {
                    ViewState::Docked(_) => return None,
                    ViewState::PoppedOut(_) => true,
                    ViewState::Hidden => false,
                };
                let key = self.manager.view_name(view)?;
                Some(UndockedEntry {
                    view,
                    name: key.name,
                    popped_out,
                })
            })
            .collect();
        let menu = view_menu::view(ViewMenuProps {
            has_current: tabs.current_view().is_some(),
            movable: settings.movable_tabs,
            undocked,
        })
        .map(AppEvent::Menu);

        let current_name = tabs
            .current_index()
            .and_then(|index| tabs.label_at(index))
            .unwrap_or_default();
        let content = panel_content::view(PanelContentProps {
            name: current_name,
            panel: tabs
                .current_view()
                .and_then(|view| self.manager.panel(view)),
        });

        let body: Element<'_, AppEvent> = if self.manager.tab_bar_visible() {
            let bar = tab_bar::view(TabBarProps {
                labels: tabs.tabs().iter().map(|tab| tab.label()).collect(),
                current: tabs.current_index(),
                position: settings.tab_position,
            })
            .map(AppEvent::TabBar);
            match settings.tab_position {
                TabPosition::North => column![bar, content].into(),
                TabPosition::South => column![content, bar].into(),
                TabPosition::West => row![bar, content].into(),
                TabPosition::East => row![content, bar].into(),
            }
        } else {
            content
        };

        container(column![menu, body].spacing(4))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
