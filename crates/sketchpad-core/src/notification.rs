//! User-facing notifications for canvas operations.

use crate::error::CanvasError;
use std::fmt;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERR"),
        }
    }
}

/// A titled message box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn save_succeeded() -> Self {
        Self::new(NotificationLevel::Info, "Save Successful", "Drawing saved to XML successfully.")
    }

    pub fn save_failed(err: &CanvasError) -> Self {
        Self::new(NotificationLevel::Error, "Save Error", format!("An error occurred: {err}"))
    }

    pub fn load_succeeded() -> Self {
        Self::new(NotificationLevel::Info, "Load Successful", "Drawing loaded from XML successfully.")
    }

    pub fn load_failed(err: &CanvasError) -> Self {
        Self::new(NotificationLevel::Error, "Load Error", format!("An error occurred: {err}"))
    }

    /// Warning shown when grouping is attempted with too few shapes.
    pub fn group_warning() -> Self {
        Self::new(NotificationLevel::Warning, "Warning", "Select at least two objects to group.")
    }

    /// Map a grouping failure to what the user sees.
    pub fn for_group_error(err: &CanvasError) -> Self {
        match err {
            CanvasError::InsufficientSelection(_) => Self::group_warning(),
            other => Self::new(NotificationLevel::Error, "Group Error", other.to_string()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.title, self.message)
    }
}
