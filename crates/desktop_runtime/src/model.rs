use std::fmt;

use crate::{
    icon_drag::{ClickTracker, IconDragSession},
    icon_registry::IconPlacementRegistry,
    window_manager::{ResizeSession, WindowDragSession, WindowGeometry},
    window_order::WindowOrder,
};

/// Height of the menu bar, including its border.
pub const MENU_BAR_HEIGHT: i32 = 36;
/// Height of the status bar pinned to the bottom of the desktop.
pub const STATUS_BAR_HEIGHT: i32 = 32;
/// Viewports narrower than this are treated as mobile-sized.
pub const MOBILE_BREAKPOINT_PX: i32 = 768;
/// Viewport assumed before the host reports a real one.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280,
    height: 800,
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconId(pub String);

impl IconId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pixel position relative to the desktop's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_from(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Inner size of the browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn class(self) -> ViewportClass {
        if self.width < MOBILE_BREAKPOINT_PX {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self.class() == ViewportClass::Mobile
    }
}

impl Default for Viewport {
    fn default() -> Self {
        DEFAULT_VIEWPORT
    }
}

/// Coarse viewport classification driving drag/resize availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn moves_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn moves_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }
}

/// Authoritative desktop state owned by the application root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DesktopState {
    pub viewport: Viewport,
    pub icons: IconPlacementRegistry,
    pub selected_icon: Option<IconId>,
    pub windows: Vec<WindowGeometry>,
    pub window_order: WindowOrder,
}

impl DesktopState {
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowGeometry> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn is_window_open(&self, window_id: &WindowId) -> bool {
        self.window(window_id).is_some()
    }

    /// Rendered z-index for an open window.
    pub fn z_index(&self, window_id: &WindowId) -> Option<u32> {
        self.window_order.z_index(window_id)
    }
}

/// Transient pointer-gesture state. At most one gesture is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub icon_drag: Option<IconDragSession>,
    pub window_drag: Option<WindowDragSession>,
    pub window_resize: Option<ResizeSession>,
    pub clicks: ClickTracker,
}

impl InteractionState {
    pub fn has_active_gesture(&self) -> bool {
        self.icon_drag.is_some() || self.window_drag.is_some() || self.window_resize.is_some()
    }
}
