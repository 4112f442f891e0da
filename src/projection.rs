use crate::prompts;
use crate::selection::SelectionController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub label: String,
    pub event_id: Option<String>,
    /// Clicking selects the item.
    pub editable: bool,
    /// Plain browsing highlight, suppressed in edit mode.
    pub hover: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteSelectedButton {
    pub enabled: bool,
    pub count: usize,
}

/// Everything the album view shows, derived from the controller alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProjection {
    pub edit_button_label: &'static str,
    pub items: Vec<ItemView>,
    pub delete_collection_visible: bool,
    /// `None` while the control is hidden.
    pub delete_selected: Option<DeleteSelectedButton>,
}

impl ViewProjection {
    pub fn project(controller: &SelectionController) -> Self {
        let state = controller.state();
        let edit_mode = state.is_edit_mode();
        let items = controller
            .items()
            .iter()
            .map(|item| ItemView {
                id: item.id.clone(),
                label: item.label().to_string(),
                event_id: item.event_id.clone(),
                editable: edit_mode,
                hover: !edit_mode,
                selected: edit_mode && state.is_selected(&item.id),
            })
            .collect();
        let delete_selected = edit_mode.then(|| DeleteSelectedButton {
            enabled: state.can_delete_selected(),
            count: state.selected_count(),
        });
        Self {
            edit_button_label: if edit_mode {
                prompts::EDIT_MODE_ON_LABEL
            } else {
                prompts::EDIT_MODE_OFF_LABEL
            },
            items,
            delete_collection_visible: !edit_mode,
            delete_selected,
        }
    }
}
