use std::collections::HashSet;

use crate::models::{
    ActionReport, CollectionContext, Confirmation, Followup, Item, Notice,
};
use crate::network::{AlbumApi, ApiError, DeleteImagesRequest};
use crate::prompts;

/// Edit-mode flag plus the ids picked for deletion.
///
/// The selection is only ever non-empty while edit mode is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    edit_mode: bool,
    selected: HashSet<String>,
}

impl SelectionState {
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn can_delete_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        if !self.edit_mode {
            self.selected.clear();
        }
        self.edit_mode
    }

    fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_owned());
            true
        }
    }
}

/// Selection state of one loaded album view.
///
/// A new controller is built whenever the view is (re)loaded, so nothing
/// survives a reload.
#[derive(Debug, Clone)]
pub struct SelectionController {
    context: CollectionContext,
    items: Vec<Item>,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(context: CollectionContext, items: Vec<Item>) -> Self {
        Self {
            context,
            items,
            state: SelectionState::default(),
        }
    }

    pub fn context(&self) -> &CollectionContext {
        &self.context
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Flips edit mode and returns the new value. Leaving edit mode drops
    /// the whole selection.
    pub fn toggle_edit_mode(&mut self) -> bool {
        let edit_mode = self.state.toggle_edit_mode();
        log::debug!("Edit mode {}", if edit_mode { "on" } else { "off" });
        edit_mode
    }

    /// Returns whether the item is selected afterwards, or `None` if the
    /// call was ignored: outside edit mode or for an id not in the view.
    pub fn toggle_item_selection(&mut self, item_id: &str) -> Option<bool> {
        if !self.state.is_edit_mode() {
            return None;
        }
        if !self.items.iter().any(|item| item.id == item_id) {
            log::warn!("Ignoring selection of unknown image {item_id}");
            return None;
        }
        Some(self.state.toggle(item_id))
    }

    /// The batch-delete body for the current selection, ids in view order.
    pub fn deletion_request(&self) -> Option<DeleteImagesRequest> {
        if !self.state.can_delete_selected() {
            return None;
        }
        let image_ids = self
            .items
            .iter()
            .filter(|item| self.state.is_selected(&item.id))
            .map(|item| item.id.clone())
            .collect();
        Some(DeleteImagesRequest {
            image_ids,
            event_id: self.context.event_id.clone(),
            album_id: self.context.album_id.clone(),
        })
    }

    /// Sends one batch-delete request for the selection. Local state is
    /// never touched: on success the view is expected to reload, on failure
    /// the selection stays for another attempt.
    pub async fn submit_deletion<A: AlbumApi>(&self, api: &A) -> ActionReport {
        let Some(request) = self.deletion_request() else {
            return ActionReport::notify(Notice::warning(prompts::NOTHING_SELECTED));
        };
        match api.delete_images(self.context.kind, &request).await {
            Ok(()) => {
                log::info!(
                    "Deleted {} image(s) from album {}",
                    request.image_ids.len(),
                    self.context.album_id
                );
                ActionReport::notify(Notice::info(prompts::IMAGES_DELETED))
                    .with_followup(Followup::ReloadView)
            }
            Err(err @ ApiError::Rejected { .. }) => {
                log::warn!("Deleting images from album {}: {err}", self.context.album_id);
                ActionReport::notify(Notice::error(prompts::IMAGES_NOT_DELETED))
            }
            Err(err) => {
                transport_failure("Deleting selected images", &err, prompts::UNEXPECTED_ERROR)
            }
        }
    }

    pub async fn delete_collection<A: AlbumApi>(
        &self,
        api: &A,
        confirmation: Confirmation,
    ) -> ActionReport {
        delete_collection(api, &self.context.album_id, &self.context.event_id, confirmation).await
    }
}

fn transport_failure(action: &str, err: &ApiError, text: &str) -> ActionReport {
    log::error!("{action} failed: {err}");
    ActionReport::notify(Notice::error(text))
}

/// Deletes a whole album and sends the user to the owning event.
pub async fn delete_collection<A: AlbumApi>(
    api: &A,
    album_id: &str,
    event_id: &str,
    confirmation: Confirmation,
) -> ActionReport {
    if confirmation == Confirmation::Declined {
        return ActionReport::silent();
    }
    match api.delete_album(album_id).await {
        Ok(()) => {
            log::info!("Deleted album {album_id}");
            ActionReport::notify(Notice::info(prompts::ALBUM_DELETED))
                .with_followup(Followup::Navigate(prompts::event_path(event_id)))
        }
        Err(err @ ApiError::Rejected { .. }) => {
            log::warn!("Deleting album {album_id}: {err}");
            let text = err.server_message().unwrap_or(prompts::ALBUM_NOT_DELETED);
            ActionReport::notify(Notice::error(text))
        }
        Err(err) => transport_failure("Deleting the album", &err, prompts::UNEXPECTED_ERROR),
    }
}

pub async fn delete_event<A: AlbumApi>(
    api: &A,
    event_id: &str,
    confirmation: Confirmation,
) -> ActionReport {
    if confirmation == Confirmation::Declined {
        return ActionReport::silent();
    }
    match api.delete_event(event_id).await {
        Ok(()) => {
            log::info!("Deleted event {event_id}");
            ActionReport::notify(Notice::info(prompts::EVENT_DELETED))
        }
        Err(err @ ApiError::Rejected { .. }) => {
            log::warn!("Deleting event {event_id}: {err}");
            ActionReport::notify(Notice::error(prompts::event_not_deleted(err.server_message())))
        }
        Err(err) => transport_failure("Deleting the event", &err, prompts::TRANSIENT_ERROR),
    }
}
