//! Back-to-front stacking order shared by every open window.

use crate::model::WindowId;

/// z-index given to the back-most window.
pub const WINDOW_Z_INDEX_BASE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowOrder {
    ids: Vec<WindowId>,
}

impl WindowOrder {
    /// Moves `window_id` to the front, appending it if it was not stacked yet.
    ///
    /// Returns `true` when the order changed.
    pub fn bring_to_front(&mut self, window_id: &WindowId) -> bool {
        if self.front() == Some(window_id) {
            return false;
        }
        self.ids.retain(|id| id != window_id);
        self.ids.push(window_id.clone());
        true
    }

    pub fn remove(&mut self, window_id: &WindowId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != window_id);
        self.ids.len() != before
    }

    pub fn z_index(&self, window_id: &WindowId) -> Option<u32> {
        self.ids
            .iter()
            .position(|id| id == window_id)
            .map(|idx| idx as u32 + WINDOW_Z_INDEX_BASE)
    }

    pub fn front(&self) -> Option<&WindowId> {
        self.ids.last()
    }

    pub fn back_to_front(&self) -> &[WindowId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
