//! Pointer-driven icon dragging and click/double-click classification.
//!
//! A drag follows the pointer freely while previewing the snapped destination cell; the
//! registry is only consulted for real on release, where the move is either committed or the
//! icon reverts to where it started.

use std::collections::BTreeMap;

use crate::{
    grid::place_on_grid,
    icon_registry::{IconPlacementRegistry, IconRegistryError, MoveOutcome},
    model::{IconId, Point, Viewport, ViewportClass},
};

/// Two clicks on the same icon closer together than this form a double-click.
pub const DOUBLE_CLICK_WINDOW_MS: f64 = 250.0;

/// In-progress drag of one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDragSession {
    pub icon_id: IconId,
    /// Position committed before the drag started; the revert target.
    pub committed: Point,
    pub pointer_start: Point,
    pub pointer_offset: Point,
    /// Unsnapped position following the pointer.
    pub live: Point,
    /// Snapped cell the icon would land on if released now.
    pub preview: Point,
    pub preview_occupied: bool,
    pub moved: bool,
}

/// How a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconDragOutcome {
    /// The pointer never moved; the interaction counts as a click.
    Clicked,
    /// The icon now rests at the new cell.
    Committed(Point),
    /// The icon went back to its pre-drag position.
    Reverted {
        position: Point,
        blocked_by: Option<IconId>,
    },
}

/// Ghost outline drawn at the preview cell during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapGhost {
    pub position: Point,
    pub occupied: bool,
}

/// What the render layer should draw for one icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRenderState {
    pub position: Point,
    pub dragging: bool,
    pub ghost: Option<SnapGhost>,
}

impl IconDragSession {
    /// Starts a drag, or returns `None` on mobile viewports where icons are not draggable.
    pub fn begin(
        icon_id: IconId,
        committed: Point,
        pointer: Point,
        class: ViewportClass,
    ) -> Option<Self> {
        if class == ViewportClass::Mobile {
            return None;
        }
        Some(Self {
            icon_id,
            committed,
            pointer_start: pointer,
            pointer_offset: pointer.offset_from(committed),
            live: committed,
            preview: committed,
            preview_occupied: false,
            moved: false,
        })
    }

    /// Follows the pointer and refreshes the snap preview.
    pub fn update(&mut self, pointer: Point, viewport: Viewport, registry: &IconPlacementRegistry) {
        if pointer != self.pointer_start {
            self.moved = true;
        }
        self.live = pointer.offset_from(self.pointer_offset);
        self.preview = place_on_grid(self.live, viewport);
        self.preview_occupied = registry.is_occupied(self.preview, Some(&self.icon_id));
    }

    /// Ends the drag at `pointer`, committing the snapped cell through the registry.
    ///
    /// # Errors
    ///
    /// Propagates [`IconRegistryError::IconNotFound`] when the icon was removed mid-drag.
    pub fn finish(
        self,
        pointer: Point,
        viewport: Viewport,
        registry: &mut IconPlacementRegistry,
    ) -> Result<IconDragOutcome, IconRegistryError> {
        if !self.moved && pointer == self.pointer_start {
            return Ok(IconDragOutcome::Clicked);
        }
        let target = place_on_grid(pointer.offset_from(self.pointer_offset), viewport);
        Ok(match registry.move_icon(&self.icon_id, target)? {
            MoveOutcome::Committed(position) => IconDragOutcome::Committed(position),
            MoveOutcome::Rejected { occupied_by } => IconDragOutcome::Reverted {
                position: self.committed,
                blocked_by: Some(occupied_by),
            },
        })
    }

    /// Abandons the drag without touching the registry.
    pub fn cancel(self) -> IconDragOutcome {
        IconDragOutcome::Reverted {
            position: self.committed,
            blocked_by: None,
        }
    }
}

/// Resolves how an icon should be drawn given the committed registry and any active drag.
pub fn icon_render_state(
    registry: &IconPlacementRegistry,
    drag: Option<&IconDragSession>,
    icon_id: &IconId,
) -> Option<IconRenderState> {
    let committed = registry.position(icon_id)?;
    Some(match drag.filter(|session| &session.icon_id == icon_id) {
        Some(session) if session.moved => IconRenderState {
            position: session.live,
            dragging: true,
            ghost: Some(SnapGhost {
                position: session.preview,
                occupied: session.preview_occupied,
            }),
        },
        _ => IconRenderState {
            position: committed,
            dragging: false,
            ghost: None,
        },
    })
}

/// Classification of a click once double-click disambiguation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResolution {
    /// First click; its single-click action fires once the double-click window lapses.
    PendingSingle,
    /// Second click inside the window; the pending single click is suppressed.
    Double,
    /// Tap on a mobile viewport, treated directly as the primary action.
    Primary,
}

/// Per-icon pending single clicks awaiting the double-click window.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClickTracker {
    pending: BTreeMap<IconId, f64>,
}

impl ClickTracker {
    pub fn register_click(
        &mut self,
        icon_id: IconId,
        now_ms: f64,
        class: ViewportClass,
    ) -> ClickResolution {
        if class == ViewportClass::Mobile {
            self.pending.remove(&icon_id);
            return ClickResolution::Primary;
        }
        match self.pending.remove(&icon_id) {
            Some(first) if now_ms - first < DOUBLE_CLICK_WINDOW_MS => ClickResolution::Double,
            _ => {
                self.pending.insert(icon_id, now_ms);
                ClickResolution::PendingSingle
            }
        }
    }

    /// Removes and returns icons whose single click is now due.
    pub fn flush(&mut self, now_ms: f64) -> Vec<IconId> {
        let due: Vec<IconId> = self
            .pending
            .iter()
            .filter(|(_, first)| now_ms - **first >= DOUBLE_CLICK_WINDOW_MS)
            .map(|(icon_id, _)| icon_id.clone())
            .collect();
        for icon_id in &due {
            self.pending.remove(icon_id);
        }
        due
    }

    /// Milliseconds until the earliest pending single click is due, if any click is pending.
    pub fn next_due_in(&self, now_ms: f64) -> Option<f64> {
        self.pending
            .values()
            .copied()
            .reduce(f64::min)
            .map(|first| (DOUBLE_CLICK_WINDOW_MS - (now_ms - first)).max(0.0))
    }

    /// Drops any pending click for an icon that went away.
    pub fn forget(&mut self, icon_id: &IconId) {
        self.pending.remove(icon_id);
    }
}
