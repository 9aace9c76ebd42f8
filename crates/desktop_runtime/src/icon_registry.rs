//! Authoritative grid positions for every desktop icon.
//!
//! The registry is the single writer of icon positions and enforces that no two icons share a
//! grid cell once a move is committed. Live drag positions never pass through here; only the
//! final snapped cell does.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    grid::{cells_by_distance, grid_cell_for, place_on_grid, snap_to_grid, GridCell},
    model::{IconId, Point, Viewport},
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconPlacementRegistry {
    positions: BTreeMap<IconId, Point>,
}

/// Result of asking the registry to move an icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The icon now rests at this grid-aligned position.
    Committed(Point),
    /// The destination cell belongs to another icon; nothing changed.
    Rejected {
        /// Icon currently holding the requested cell.
        occupied_by: IconId,
    },
}

impl MoveOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IconRegistryError {
    #[error("icon `{0}` is not registered")]
    IconNotFound(IconId),
}

impl IconPlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, icon_id: &IconId) -> bool {
        self.positions.contains_key(icon_id)
    }

    pub fn position(&self, icon_id: &IconId) -> Option<Point> {
        self.positions.get(icon_id).copied()
    }

    /// Iterates committed positions in icon-id order.
    pub fn iter(&self) -> impl Iterator<Item = (&IconId, Point)> {
        self.positions.iter().map(|(id, point)| (id, *point))
    }

    /// Registers an icon, returning its committed position.
    ///
    /// Re-registering a known id is a no-op. A first registration is clamped into the desktop
    /// area and snapped; if that cell is already taken the nearest free cell is used instead.
    pub fn register(&mut self, icon_id: IconId, requested: Point, viewport: Viewport) -> Point {
        if let Some(existing) = self.position(&icon_id) {
            return existing;
        }
        let mut placed = place_on_grid(requested, viewport);
        if self.is_occupied(placed, Some(&icon_id)) {
            placed = self.free_cell_near(placed, viewport, &icon_id);
        }
        self.positions.insert(icon_id, placed);
        placed
    }

    /// Forgets an icon that has been permanently unmounted.
    pub fn remove(&mut self, icon_id: &IconId) -> Option<Point> {
        self.positions.remove(icon_id)
    }

    /// Returns the icon other than `excluding` resting exactly at `position`.
    pub fn occupant(&self, position: Point, excluding: Option<&IconId>) -> Option<&IconId> {
        self.positions
            .iter()
            .find(|(id, point)| Some(*id) != excluding && **point == position)
            .map(|(id, _)| id)
    }

    pub fn is_occupied(&self, position: Point, excluding: Option<&IconId>) -> bool {
        self.occupant(position, excluding).is_some()
    }

    /// Moves `icon_id` to the cell containing `proposed` unless another icon holds it.
    ///
    /// # Errors
    ///
    /// Returns [`IconRegistryError::IconNotFound`] for an id that was never registered.
    pub fn move_icon(
        &mut self,
        icon_id: &IconId,
        proposed: Point,
    ) -> Result<MoveOutcome, IconRegistryError> {
        if !self.contains(icon_id) {
            return Err(IconRegistryError::IconNotFound(icon_id.clone()));
        }
        let target = snap_to_grid(proposed);
        if let Some(occupied_by) = self.occupant(target, Some(icon_id)) {
            return Ok(MoveOutcome::Rejected {
                occupied_by: occupied_by.clone(),
            });
        }
        self.positions.insert(icon_id.clone(), target);
        Ok(MoveOutcome::Committed(target))
    }

    /// Re-clamps every icon into `viewport` and returns the icons whose position changed.
    ///
    /// Icons that still fit keep their cell. Icons pushed back inside the bounds are placed in
    /// id order; one that lands on an occupied cell moves to the nearest free cell.
    pub fn reclamp(&mut self, viewport: Viewport) -> Vec<(IconId, Point)> {
        let previous = std::mem::take(&mut self.positions);
        let (kept, displaced): (Vec<_>, Vec<_>) = previous
            .into_iter()
            .partition(|(_, point)| place_on_grid(*point, viewport) == *point);

        self.positions.extend(kept);

        let mut changed = Vec::new();
        for (icon_id, point) in displaced {
            let mut placed = place_on_grid(point, viewport);
            if self.is_occupied(placed, Some(&icon_id)) {
                placed = self.free_cell_near(placed, viewport, &icon_id);
            }
            self.positions.insert(icon_id.clone(), placed);
            changed.push((icon_id, placed));
        }
        changed
    }

    fn free_cell_near(&self, near: Point, viewport: Viewport, icon_id: &IconId) -> Point {
        if let Some(cell) = cells_by_distance(near, viewport)
            .into_iter()
            .find(|cell| !self.is_occupied(*cell, Some(icon_id)))
        {
            return cell;
        }
        // Every visible cell is taken: spill down the same column.
        let col = grid_cell_for(near).col;
        let mut row = 0;
        loop {
            let cell = GridCell { col, row }.origin();
            if !self.is_occupied(cell, Some(icon_id)) {
                return cell;
            }
            row += 1;
        }
    }
}
