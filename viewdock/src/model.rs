use std::fmt;

use serde::{Deserialize, Serialize};

/// Default registry group.
pub const DEFAULT_GROUP: &str = "";

/// Opaque handle to a panel owned by a [`crate::ViewManager`].
///
/// Two handles refer to the same view iff they compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw numeric identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Token identifying the close observer attached to a popped-out view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceToken(u64);

impl SurfaceToken {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw numeric token.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Registry key: view names are unique within a group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewKey {
    pub group: String,
    pub name: String,
}

impl ViewKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

const LEGACY_RENDER_TAG: &str = "VTK View";

/// Constructible view types.
///
/// The render kind's tag is `"Render View"`; the legacy `"VTK View"` tag is
/// still accepted when resolving tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    #[serde(rename = "Render View", alias = "VTK View")]
    Render,
    #[serde(rename = "Spreadsheet View")]
    Spreadsheet,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Render, ViewKind::Spreadsheet];

    /// Resolve a type tag; unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag == LEGACY_RENDER_TAG {
            return Some(ViewKind::Render);
        }
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Tag used to request this kind from `create_view`.
    pub fn tag(self) -> &'static str {
        match self {
            ViewKind::Render => "Render View",
            ViewKind::Spreadsheet => "Spreadsheet View",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Where a registered view currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Occupies the tab at this index.
    Docked(usize),
    /// Shown as its own top-level surface, observed through the token.
    PoppedOut(SurfaceToken),
    /// Not visible anywhere.
    Hidden,
}

/// Capabilities the manager needs from concrete view types.
pub trait Panel {
    /// Build a fresh panel of the given kind.
    fn create(kind: ViewKind) -> Self
    where
        Self: Sized;

    /// Kind this panel was built as.
    fn kind(&self) -> ViewKind;
}
