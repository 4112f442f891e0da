use std::fmt;

/// One deletable image as rendered in an album view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub event_id: Option<String>,
    pub source: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event_id: None,
            source: None,
        }
    }

    /// File name of the image source, falling back to the id.
    pub fn label(&self) -> &str {
        self.source
            .as_deref()
            .and_then(|src| src.rsplit('/').next())
            .filter(|name| !name.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

/// Decides which batch-delete endpoint serves a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    /// The per-event pseudo-album holding every photo.
    AllItems,
    NamedCollection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionContext {
    pub album_id: String,
    pub event_id: String,
    pub kind: CollectionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message shown to the user once an action settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// What the hosting view has to do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Followup {
    None,
    /// Re-read the collection from the server and start a fresh view.
    ReloadView,
    /// Leave the current view for the given server path.
    Navigate(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub notice: Option<Notice>,
    pub followup: Followup,
}

impl ActionReport {
    /// Nothing happened and nothing is shown.
    pub fn silent() -> Self {
        Self {
            notice: None,
            followup: Followup::None,
        }
    }

    pub fn notify(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            followup: Followup::None,
        }
    }

    pub fn with_followup(mut self, followup: Followup) -> Self {
        self.followup = followup;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Self::Confirmed
        } else {
            Self::Declined
        }
    }
}

pub struct PopupNotice {
    pub visible: bool,
    pub notice: Option<Notice>,
    pub timestamp: String,
}

/// A yes/no question waiting for the user.
pub struct PendingConfirm {
    pub prompt: String,
}
