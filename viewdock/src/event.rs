use crate::model::{SurfaceToken, ViewId};

/// Effects produced by view manager operations, drained by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    /// The selected view changed.
    CurrentChanged {
        previous: Option<ViewId>,
        current: Option<ViewId>,
    },
    /// The single-tab display rule flipped the tab bar.
    TabBarVisibilityChanged { visible: bool },
    /// Show `view` as a top-level surface and route its close requests
    /// back through `close_requested(token)`.
    SurfaceOpened {
        view: ViewId,
        token: SurfaceToken,
        title: String,
    },
    /// The observer was detached because the view re-docked; tear down the
    /// surface without dropping the panel.
    SurfaceReleased { view: ViewId, token: SurfaceToken },
}

/// Outcome of a close request on a top-level surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceClose {
    /// The close was intercepted and the view re-docked at `index`.
    Suppressed { view: ViewId, index: usize },
    /// No observer holds this token; the host may close the surface.
    Unobserved,
}
