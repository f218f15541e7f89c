//! View registry and tab host with pop-out support.
//!
//! A [`ViewManager`] keeps three pieces of state consistent:
//! - the [`ViewRegistry`], mapping `(group, name)` to view handles;
//! - the [`TabHost`], the ordered set of docked views and the selection;
//! - the [`PositionCache`], the last tab index of views that left the host.
//!
//! Views move between docked, popped-out and hidden only through manager
//! operations. Hosts render from the read-only accessors and react to the
//! [`ViewEffect`]s returned by [`ViewManager::drain_effects`].
//!
//! # Quick Example
//!
//! ```
//! use viewdock::{
//!     Panel, SurfaceClose, ViewKind, ViewManager, ViewManagerSettings,
//! };
//!
//! struct Placeholder(ViewKind);
//!
//! impl Panel for Placeholder {
//!     fn create(kind: ViewKind) -> Self {
//!         Placeholder(kind)
//!     }
//!
//!     fn kind(&self) -> ViewKind {
//!         self.0
//!     }
//! }
//!
//! let mut manager: ViewManager<Placeholder> =
//!     ViewManager::new(ViewManagerSettings::without_default_view());
//! let a = manager
//!     .create_view("A", "Render View", None, "")
//!     .unwrap()
//!     .unwrap();
//! manager.create_view("B", "Spreadsheet View", None, "").unwrap();
//!
//! let token = manager.pop_out(a).unwrap();
//! assert_eq!(
//!     manager.close_requested(token),
//!     SurfaceClose::Suppressed { view: a, index: 0 }
//! );
//! assert_eq!(manager.current_view(), Some(a));
//! ```

mod errors;
mod event;
mod manager;
mod model;
mod position_cache;
mod registry;
mod settings;
mod tab_host;

pub use crate::errors::{SettingsError, ViewError};
pub use crate::event::{SurfaceClose, ViewEffect};
pub use crate::manager::ViewManager;
pub use crate::model::{
    DEFAULT_GROUP, Panel, SurfaceToken, ViewId, ViewKey, ViewKind, ViewState,
};
pub use crate::position_cache::PositionCache;
pub use crate::registry::ViewRegistry;
pub use crate::settings::{
    DefaultView, TabPosition, ViewManagerSettings, load_settings,
};
pub use crate::tab_host::{TabEntry, TabHost};
