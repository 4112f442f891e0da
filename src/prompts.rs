// User-facing wording for confirmations and action results.

pub const CONFIRM_DELETE_ALBUM: &str =
    "Are you sure you want to delete this album? This action cannot be undone.";
pub const CONFIRM_DELETE_EVENT: &str = "Are you sure you want to delete this event?";

pub const NOTHING_SELECTED: &str = "No images selected for deletion.";
pub const IMAGES_DELETED: &str = "Selected images deleted successfully!";
pub const IMAGES_NOT_DELETED: &str = "Failed to delete selected images.";

pub const ALBUM_DELETED: &str = "Album deleted successfully!";
pub const ALBUM_NOT_DELETED: &str = "Failed to delete the album. Please try again.";

pub const EVENT_DELETED: &str = "Event deleted successfully!";
pub const EVENT_NOT_DELETED: &str = "Failed to delete the event. Please try again.";

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";
pub const TRANSIENT_ERROR: &str = "An error occurred. Please try again later.";

pub const EDIT_MODE_OFF_LABEL: &str = "Select Images For Deletion";
pub const EDIT_MODE_ON_LABEL: &str = "Deselect Images";

pub fn event_not_deleted(detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("Failed to delete the event: {detail}"),
        None => EVENT_NOT_DELETED.to_string(),
    }
}

pub fn event_path(event_id: &str) -> String {
    format!("/events/{event_id}")
}
