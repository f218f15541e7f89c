use std::collections::BTreeMap;

use crate::errors::ViewError;
use crate::event::{SurfaceClose, ViewEffect};
use crate::model::{
    DEFAULT_GROUP, Panel, SurfaceToken, ViewId, ViewKey, ViewKind, ViewState,
};
use crate::position_cache::PositionCache;
use crate::registry::ViewRegistry;
use crate::settings::{DefaultView, ViewManagerSettings};
use crate::tab_host::{SelectionChange, TabHost};

/// Owner of the registry, tab host and position cache.
///
/// Every transition between docked, popped-out and hidden goes through the
/// operations below; callers observe the outcome through
/// [`ViewManager::drain_effects`].
pub struct ViewManager<P> {
    settings: ViewManagerSettings,
    panels: BTreeMap<ViewId, P>,
    registry: ViewRegistry,
    tabs: TabHost,
    positions: PositionCache,
    observers: BTreeMap<SurfaceToken, ViewId>,
    effects: Vec<ViewEffect>,
    next_view_id: u64,
    next_surface_token: u64,
}

impl<P: Panel> ViewManager<P> {
    /// Create a manager and dock the configured default view.
    pub fn new(settings: ViewManagerSettings) -> Self {
        let default_view = settings.default_view.clone();
        let mut manager = Self::empty(settings);
        if let Some(default_view) = default_view {
            manager.add_default_view(default_view);
        }
        manager
    }

    /// Construct a panel from a type tag and dock it.
    ///
    /// Unknown tags construct nothing and yield `Ok(None)`.
    pub fn create_view(
        &mut self,
        name: &str,
        type_tag: &str,
        position: Option<usize>,
        group: &str,
    ) -> Result<Option<ViewId>, ViewError> {
        let Some(kind) = ViewKind::from_tag(type_tag) else {
            log::debug!("unknown view type tag \"{type_tag}\"");
            return Ok(None);
        };
        self.create_view_of_kind(name, kind, position, group).map(Some)
    }

    /// Construct a panel of `kind` and dock it under `(group, name)`.
    pub fn create_view_of_kind(
        &mut self,
        name: &str,
        kind: ViewKind,
        position: Option<usize>,
        group: &str,
    ) -> Result<ViewId, ViewError> {
        if self.registry.find(name, group).is_some() {
            return Err(ViewError::DuplicateName {
                group: group.to_owned(),
                name: name.to_owned(),
            });
        }

        let view = self.insert_panel(P::create(kind));
        self.add_view(view, name, position, group)?;
        Ok(view)
    }

    fn add_default_view(&mut self, default_view: DefaultView) {
        if let Err(err) = self.create_view_of_kind(
            &default_view.name,
            default_view.kind,
            None,
            DEFAULT_GROUP,
        ) {
            log::warn!("default view was not created: {err}");
        }
    }
}

impl<P> ViewManager<P> {
    /// Create a manager with no views, ignoring `settings.default_view`.
    pub fn empty(settings: ViewManagerSettings) -> Self {
        let tabs = TabHost::new(settings.auto_hide_tab_bar);
        Self {
            settings,
            panels: BTreeMap::new(),
            registry: ViewRegistry::default(),
            tabs,
            positions: PositionCache::default(),
            observers: BTreeMap::new(),
            effects: Vec::new(),
            next_view_id: 0,
            next_surface_token: 0,
        }
    }

    /// Settings this manager was built with.
    pub fn settings(&self) -> &ViewManagerSettings {
        &self.settings
    }

    /// Take ownership of `panel` and return its handle. The panel is not
    /// docked until [`ViewManager::add_view`] is called.
    pub fn insert_panel(&mut self, panel: P) -> ViewId {
        let view = ViewId::new(self.next_view_id);
        self.next_view_id += 1;
        self.panels.insert(view, panel);
        view
    }

    /// Borrow the panel behind `view`.
    pub fn panel(&self, view: ViewId) -> Option<&P> {
        self.panels.get(&view)
    }

    /// Mutably borrow the panel behind `view`.
    pub fn panel_mut(&mut self, view: ViewId) -> Option<&mut P> {
        self.panels.get_mut(&view)
    }

    /// Iterate over all panels owned by this manager.
    pub fn panels(&self) -> impl Iterator<Item = (ViewId, &P)> {
        self.panels.iter().map(|(view, panel)| (*view, panel))
    }

    /// Register `view` under `(group, name)` and dock it at `position`, or
    /// at the end when `position` is `None`.
    ///
    /// Re-adding a view under its own key leaves a docked view where it
    /// is. Returns the tab index the view occupies.
    pub fn add_view(
        &mut self,
        view: ViewId,
        name: &str,
        position: Option<usize>,
        group: &str,
    ) -> Result<usize, ViewError> {
        if !self.panels.contains_key(&view) {
            return Err(ViewError::UnknownView(view));
        }

        self.registry.add(view, name, group)?;
        if let Some(index) = self.tabs.index_of(view) {
            return Ok(index);
        }

        self.release_observer(view);
        let (index, change) = self.tabs.insert(position, name.to_owned(), view);
        log::debug!("{view} docked as \"{name}\" (group \"{group}\") at {index}");
        self.push_selection(change);
        self.update_tab_bar();
        Ok(index)
    }

    /// Remove `view`'s tab if it is docked. With `store_location`, its index
    /// is recorded for a later re-dock.
    pub fn remove_view(&mut self, view: ViewId, store_location: bool) -> bool {
        let Some(index) = self.tabs.index_of(view) else {
            return false;
        };

        if store_location {
            self.positions.store(view, index);
        }
        if let Some((_, change)) = self.tabs.remove(index) {
            self.push_selection(change);
        }
        self.update_tab_bar();
        true
    }

    /// Record the current index of every docked view.
    ///
    /// Call before hiding several views with `store_location = false` so
    /// each keeps its pre-batch position.
    pub fn refresh_position_cache(&mut self) {
        self.positions.refresh(self.registry.iter().filter_map(
            |(_, view)| self.tabs.index_of(view).map(|index| (view, index)),
        ));
    }

    /// Make a docked view fully invisible.
    pub fn hide_view(&mut self, view: ViewId, store_location: bool) -> bool {
        let removed = self.remove_view(view, store_location);
        if removed {
            log::debug!("{view} hidden");
        }
        removed
    }

    /// Re-dock a hidden or popped-out view at its cached position.
    ///
    /// Docked and unregistered views are left alone and yield `Ok(None)`.
    pub fn show_view(
        &mut self,
        view: ViewId,
    ) -> Result<Option<usize>, ViewError> {
        if self.tabs.index_of(view).is_some() {
            return Ok(None);
        }
        let Some(key) = self.registry.name_of(view) else {
            return Ok(None);
        };

        let position = self.positions.restore_index(view);
        self.add_view(view, &key.name, Some(position), &key.group)
            .map(Some)
    }

    /// Detach a docked view into its own top-level surface.
    ///
    /// The host receives [`ViewEffect::SurfaceOpened`] and must route close
    /// requests on that surface to [`ViewManager::close_requested`].
    pub fn pop_out(&mut self, view: ViewId) -> Option<SurfaceToken> {
        let index = self.tabs.index_of(view)?;
        let title = self.tabs.label_at(index).unwrap_or_default().to_owned();

        self.remove_view(view, true);

        let token = SurfaceToken::new(self.next_surface_token);
        self.next_surface_token += 1;
        self.observers.insert(token, view);
        log::debug!("{view} popped out from {index}");
        self.effects
            .push(ViewEffect::SurfaceOpened { view, token, title });
        Some(token)
    }

    /// Handle a close request on a popped-out surface.
    ///
    /// The close is suppressed: the observer detaches, the view re-docks at
    /// its cached position and becomes the selected tab.
    pub fn close_requested(&mut self, token: SurfaceToken) -> SurfaceClose {
        let Some(view) = self.observers.remove(&token) else {
            return SurfaceClose::Unobserved;
        };
        self.effects
            .push(ViewEffect::SurfaceReleased { view, token });

        let Some(key) = self.registry.name_of(view) else {
            log::warn!("popped-out {view} has no registry entry");
            return SurfaceClose::Unobserved;
        };

        let position = self.positions.restore_index(view);
        match self.add_view(view, &key.name, Some(position), &key.group) {
            Ok(index) => {
                self.select_tab(index);
                SurfaceClose::Suppressed { view, index }
            },
            Err(err) => {
                log::warn!("failed to re-dock {view}: {err}");
                SurfaceClose::Unobserved
            },
        }
    }

    /// Select the tab at `index`, as a click on the tab bar would.
    pub fn select_tab(&mut self, index: usize) -> bool {
        let change = self.tabs.select(index);
        let changed = change.is_some();
        self.push_selection(change);
        changed
    }

    /// Select the first tab labelled `name`; no-op when there is none.
    pub fn switch_to_view(&mut self, name: &str) {
        if let Some(index) = self.tabs.index_of_label(name) {
            self.select_tab(index);
        }
    }

    /// Move a tab when the settings allow it.
    pub fn move_tab(&mut self, from: usize, to: usize) -> bool {
        self.settings.movable_tabs && self.tabs.move_tab(from, to)
    }

    /// Look up the view registered under `(group, name)`.
    pub fn find_view(&self, name: &str, group: &str) -> Option<ViewId> {
        self.registry.find(name, group)
    }

    /// Return the key `view` is registered under.
    pub fn view_name(&self, view: ViewId) -> Option<ViewKey> {
        self.registry.name_of(view)
    }

    /// Return the view in the selected tab.
    pub fn current_view(&self) -> Option<ViewId> {
        self.tabs.current_view()
    }

    /// Return where `view` lives, or `None` for foreign handles.
    pub fn view_state(&self, view: ViewId) -> Option<ViewState> {
        if !self.panels.contains_key(&view) {
            return None;
        }
        if let Some(index) = self.tabs.index_of(view) {
            return Some(ViewState::Docked(index));
        }
        let state = self
            .observers
            .iter()
            .find(|(_, observed)| **observed == view)
            .map(|(token, _)| ViewState::PoppedOut(*token))
            .unwrap_or(ViewState::Hidden);
        Some(state)
    }

    /// Docked tabs and the current selection.
    pub fn tabs(&self) -> &TabHost {
        &self.tabs
    }

    /// Whether the tab bar is currently shown.
    pub fn tab_bar_visible(&self) -> bool {
        self.tabs.is_bar_visible()
    }

    /// Registered `(group, name)` keys.
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    /// Cached tab indices of undocked views.
    pub fn positions(&self) -> &PositionCache {
        &self.positions
    }

    /// Take all effects produced since the last drain.
    pub fn drain_effects(&mut self) -> Vec<ViewEffect> {
        std::mem::take(&mut self.effects)
    }

    fn release_observer(&mut self, view: ViewId) {
        let token = self
            .observers
            .iter()
            .find(|(_, observed)| **observed == view)
            .map(|(token, _)| *token);
        if let Some(token) = token {
            self.observers.remove(&token);
            self.effects
                .push(ViewEffect::SurfaceReleased { view, token });
        }
    }

    fn push_selection(&mut self, change: Option<SelectionChange>) {
        if let Some(SelectionChange { previous, current }) = change {
            log::debug!("current view changed: {previous:?} -> {current:?}");
            self.effects
                .push(ViewEffect::CurrentChanged { previous, current });
        }
    }

    fn update_tab_bar(&mut self) {
        if let Some(visible) = self.tabs.update_tab_bar() {
            self.effects
                .push(ViewEffect::TabBarVisibilityChanged { visible });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ViewManagerSettings;

    #[derive(Debug, PartialEq, Eq)]
    struct TestPanel(ViewKind);

    impl Panel for TestPanel {
        fn create(kind: ViewKind) -> Self {
            TestPanel(kind)
        }

        fn kind(&self) -> ViewKind {
            self.0
        }
    }

    fn manager() -> ViewManager<TestPanel> {
        ViewManager::new(ViewManagerSettings::without_default_view())
    }

    fn add(
        manager: &mut ViewManager<TestPanel>,
        name: &str,
        group: &str,
    ) -> ViewId {
        manager
            .create_view_of_kind(name, ViewKind::Render, None, group)
            .expect("view should be added")
    }

    fn labels(manager: &ViewManager<TestPanel>) -> Vec<String> {
        manager
            .tabs()
            .tabs()
            .iter()
            .map(|tab| tab.label().to_owned())
            .collect()
    }

    #[test]
    fn default_settings_dock_main_view() {
        let manager: ViewManager<TestPanel> =
            ViewManager::new(ViewManagerSettings::default());

        let view = manager.find_view("Main View", "").expect("default view");
        assert_eq!(manager.current_view(), Some(view));
        assert_eq!(manager.panel(view), Some(&TestPanel(ViewKind::Render)));
        assert!(!manager.tab_bar_visible());
    }

    #[test]
    fn added_view_round_trips_through_registry() {
        let mut manager = manager();
        let view = add(&mut manager, "Camera", "robot");

        assert_eq!(manager.find_view("Camera", "robot"), Some(view));
        assert_eq!(manager.view_name(view), Some(ViewKey::new("robot", "Camera")));
        assert_eq!(manager.view_state(view), Some(ViewState::Docked(0)));
    }

    #[test]
    fn different_view_under_used_key_fails() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        let intruder = manager.insert_panel(TestPanel(ViewKind::Spreadsheet));

        let result = manager.add_view(intruder, "A", None, "");

        assert_eq!(
            result,
            Err(ViewError::DuplicateName {
                group: String::new(),
                name: String::from("A"),
            })
        );
        assert_eq!(manager.tabs().len(), 1);
    }

    #[test]
    fn create_with_used_key_constructs_nothing() {
        let mut manager = manager();
        add(&mut manager, "A", "");

        let result = manager.create_view("A", "Render View", None, "");

        assert!(matches!(result, Err(ViewError::DuplicateName { .. })));
        assert_eq!(manager.panels().count(), 1);
    }

    #[test]
    fn readding_same_view_keeps_tab_order() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        add(&mut manager, "B", "");

        let index = manager.add_view(a, "A", Some(1), "").unwrap();

        assert_eq!(index, 0);
        assert_eq!(labels(&manager), vec!["A", "B"]);
    }

    #[test]
    fn unknown_handle_is_rejected() {
        let mut manager = manager();
        let foreign = ViewId::new(42);

        assert_eq!(
            manager.add_view(foreign, "A", None, ""),
            Err(ViewError::UnknownView(foreign))
        );
        assert_eq!(manager.view_state(foreign), None);
    }

    #[test]
    fn unknown_type_tag_creates_nothing() {
        let mut manager = manager();

        let result = manager.create_view("Plot", "Plot View", None, "");

        assert_eq!(result, Ok(None));
        assert!(manager.tabs().is_empty());
        assert_eq!(manager.panels().count(), 0);
    }

    #[test]
    fn create_view_by_tag_uses_kind() {
        let mut manager = manager();

        let view = manager
            .create_view("Sheet", "Spreadsheet View", None, "")
            .unwrap()
            .expect("known tag");

        assert_eq!(
            manager.panel(view).map(Panel::kind),
            Some(ViewKind::Spreadsheet)
        );
    }

    #[test]
    fn hide_then_show_restores_index() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");
        add(&mut manager, "C", "");

        assert!(manager.hide_view(b, true));
        assert_eq!(manager.view_state(b), Some(ViewState::Hidden));
        assert_eq!(labels(&manager), vec!["A", "C"]);

        assert_eq!(manager.show_view(b), Ok(Some(1)));
        assert_eq!(labels(&manager), vec!["A", "B", "C"]);
    }

    #[test]
    fn hiding_hidden_view_is_noop() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        manager.hide_view(a, true);
        manager.drain_effects();

        assert!(!manager.hide_view(a, true));
        assert!(manager.drain_effects().is_empty());
    }

    #[test]
    fn show_view_on_view_docked_at_first_tab_is_noop() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        add(&mut manager, "B", "");

        assert_eq!(manager.show_view(a), Ok(None));
        assert_eq!(labels(&manager), vec!["A", "B"]);
    }

    #[test]
    fn show_view_on_unregistered_panel_is_noop() {
        let mut manager = manager();
        let loose = manager.insert_panel(TestPanel(ViewKind::Render));

        assert_eq!(manager.show_view(loose), Ok(None));
        assert_eq!(manager.view_state(loose), Some(ViewState::Hidden));
    }

    #[test]
    fn batch_hide_uses_refreshed_positions() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");
        let c = add(&mut manager, "C", "");
        add(&mut manager, "D", "");

        manager.refresh_position_cache();
        manager.hide_view(b, false);
        manager.hide_view(c, false);

        assert_eq!(manager.positions().get(b), Some(1));
        assert_eq!(manager.positions().get(c), Some(2));

        manager.show_view(b).unwrap();
        manager.show_view(c).unwrap();
        assert_eq!(labels(&manager), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn unbatched_hide_without_store_restores_to_front() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");

        manager.hide_view(b, false);

        assert_eq!(manager.positions().get(b), None);
        assert_eq!(manager.show_view(b), Ok(Some(0)));
        assert_eq!(labels(&manager), vec!["B", "A"]);
    }

    #[test]
    fn pop_out_detaches_and_opens_surface() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        add(&mut manager, "B", "");
        manager.drain_effects();

        let token = manager.pop_out(a).expect("docked view pops out");

        assert_eq!(manager.view_state(a), Some(ViewState::PoppedOut(token)));
        assert_eq!(manager.positions().get(a), Some(0));
        let effects = manager.drain_effects();
        assert!(effects.contains(&ViewEffect::SurfaceOpened {
            view: a,
            token,
            title: String::from("A"),
        }));
        assert!(
            effects.contains(&ViewEffect::TabBarVisibilityChanged {
                visible: false
            })
        );
    }

    #[test]
    fn pop_out_of_undocked_view_is_noop() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        manager.hide_view(a, true);

        assert_eq!(manager.pop_out(a), None);
        assert_eq!(manager.view_state(a), Some(ViewState::Hidden));
    }

    #[test]
    fn close_request_redocks_and_selects() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");
        add(&mut manager, "C", "");
        let token = manager.pop_out(b).unwrap();
        manager.drain_effects();

        let outcome = manager.close_requested(token);

        assert_eq!(outcome, SurfaceClose::Suppressed { view: b, index: 1 });
        assert_eq!(labels(&manager), vec!["A", "B", "C"]);
        assert_eq!(manager.current_view(), Some(b));
        let effects = manager.drain_effects();
        assert_eq!(
            effects.first(),
            Some(&ViewEffect::SurfaceReleased { view: b, token })
        );
    }

    #[test]
    fn second_close_request_is_unobserved() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        let token = manager.pop_out(a).unwrap();

        manager.close_requested(token);

        assert_eq!(manager.close_requested(token), SurfaceClose::Unobserved);
        assert_eq!(manager.tabs().len(), 1);
    }

    #[test]
    fn showing_popped_out_view_releases_surface() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        let token = manager.pop_out(a).unwrap();
        manager.drain_effects();

        assert_eq!(manager.show_view(a), Ok(Some(0)));

        assert!(
            manager
                .drain_effects()
                .contains(&ViewEffect::SurfaceReleased { view: a, token })
        );
        assert_eq!(manager.close_requested(token), SurfaceClose::Unobserved);
    }

    #[test]
    fn popping_out_again_issues_fresh_token() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");

        let first = manager.pop_out(a).unwrap();
        manager.close_requested(first);
        let second = manager.pop_out(a).unwrap();

        assert_ne!(first, second);
        assert_eq!(manager.view_state(a), Some(ViewState::PoppedOut(second)));
    }

    #[test]
    fn user_tab_switch_fires_one_event() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");
        manager.drain_effects();

        assert!(manager.select_tab(1));

        assert_eq!(
            manager.drain_effects(),
            vec![ViewEffect::CurrentChanged {
                previous: Some(a),
                current: Some(b),
            }]
        );
        assert!(!manager.select_tab(1));
        assert!(manager.drain_effects().is_empty());
    }

    #[test]
    fn switch_to_missing_name_is_noop() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        manager.drain_effects();

        manager.switch_to_view("Missing");

        assert_eq!(manager.current_view(), Some(a));
        assert!(manager.drain_effects().is_empty());
    }

    #[test]
    fn hiding_selected_view_reports_new_selection() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        let b = add(&mut manager, "B", "");
        manager.drain_effects();

        manager.hide_view(a, true);

        let effects = manager.drain_effects();
        assert_eq!(
            effects[0],
            ViewEffect::CurrentChanged {
                previous: Some(a),
                current: Some(b),
            }
        );
    }

    #[test]
    fn hiding_and_showing_tab_left_of_selection_reports_each_shift() {
        let mut manager = manager();
        let a = add(&mut manager, "A", "");
        add(&mut manager, "B", "");
        let c = add(&mut manager, "C", "");
        manager.select_tab(2);
        manager.drain_effects();

        assert!(manager.hide_view(a, true));

        assert_eq!(manager.tabs().current_index(), Some(1));
        assert_eq!(
            manager.drain_effects(),
            vec![ViewEffect::CurrentChanged {
                previous: Some(c),
                current: Some(c),
            }]
        );

        assert_eq!(manager.show_view(a), Ok(Some(0)));

        assert_eq!(manager.tabs().current_index(), Some(2));
        assert_eq!(
            manager.drain_effects(),
            vec![ViewEffect::CurrentChanged {
                previous: Some(c),
                current: Some(c),
            }]
        );
    }

    #[test]
    fn move_tab_respects_settings() {
        let mut manager = manager();
        add(&mut manager, "A", "");
        add(&mut manager, "B", "");
        assert!(manager.move_tab(0, 1));
        assert_eq!(labels(&manager), vec!["B", "A"]);

        let mut fixed: ViewManager<TestPanel> =
            ViewManager::empty(ViewManagerSettings {
                movable_tabs: false,
                ..ViewManagerSettings::without_default_view()
            });
        add(&mut fixed, "A", "");
        add(&mut fixed, "B", "");
        assert!(!fixed.move_tab(0, 1));
        assert_eq!(labels(&fixed), vec!["A", "B"]);
    }
}
