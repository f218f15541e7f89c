use thiserror::Error;

use crate::model::ViewId;

/// Errors emitted by view registration.
///
/// These signal a caller bug rather than a runtime condition; lookups that
/// find nothing are reported through `Option` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    /// A different view already occupies `(group, name)`.
    #[error(
        "a different view is already registered as \"{name}\" in group \"{group}\""
    )]
    DuplicateName { group: String, name: String },
    /// The view is already registered under another key.
    #[error("{view} is already registered as \"{name}\" in group \"{group}\"")]
    AlreadyRegistered {
        view: ViewId,
        group: String,
        name: String,
    },
    /// The handle does not belong to this manager.
    #[error("{0} is not owned by this view manager")]
    UnknownView(ViewId),
}

/// Errors emitted while reading view manager settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings IO failed")]
    Io(#[from] std::io::Error),
    #[error("settings JSON failed")]
    Json(#[from] serde_json::Error),
}
