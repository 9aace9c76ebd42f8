//! Per-window geometry transitions: drag, edge/corner resize, maximize/restore and the
//! mobile fullscreen override.

use crate::model::{
    Point, ResizeEdge, Viewport, ViewportClass, WindowId, WindowRect, MENU_BAR_HEIGHT,
    STATUS_BAR_HEIGHT,
};

/// Minimum allowed window width while resizing.
pub const MIN_WINDOW_WIDTH: i32 = 320;
/// Minimum allowed window height while resizing.
pub const MIN_WINDOW_HEIGHT: i32 = 200;
/// Pixels of a dragged window that must stay inside the right/bottom viewport edges.
pub const DRAG_VISIBLE_MARGIN: i32 = 100;
/// Margin used when a viewport resize pushes a window back on-screen.
pub const RESIZE_VISIBLE_MARGIN: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub draggable: bool,
    pub resizable: bool,
    pub maximizable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            draggable: true,
            resizable: false,
            maximizable: true,
        }
    }
}

/// Stored geometry of one open window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowGeometry {
    pub id: WindowId,
    pub title: String,
    /// Free-form geometry. Not the rendered geometry while maximized.
    pub rect: WindowRect,
    pub maximized: bool,
    /// Geometry captured by the most recent maximize; `Some` only while maximized.
    pub saved_rect: Option<WindowRect>,
    pub flags: WindowFlags,
}

/// Drag of a window by its title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDragSession {
    pub window_id: WindowId,
    pub pointer_offset: Point,
}

/// Resize of a window from one of its eight handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: Point,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMode {
    Floating,
    Maximized,
    Fullscreen,
}

/// Geometry and affordances the render layer should use for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPresentation {
    pub rect: WindowRect,
    pub mode: PresentationMode,
    pub draggable: bool,
    pub resizable: bool,
    pub show_maximize: bool,
}

impl WindowGeometry {
    /// Creates a window, pulling a malformed initial rect back into valid space.
    pub fn open(
        id: WindowId,
        title: impl Into<String>,
        rect: WindowRect,
        flags: WindowFlags,
    ) -> Self {
        let rect = WindowRect {
            x: rect.x.max(0),
            y: rect.y.max(MENU_BAR_HEIGHT),
            ..rect
        }
        .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);
        Self {
            id,
            title: title.into(),
            rect,
            maximized: false,
            saved_rect: None,
            flags,
        }
    }

    pub fn can_drag(&self, class: ViewportClass) -> bool {
        self.flags.draggable && !self.maximized && class == ViewportClass::Desktop
    }

    pub fn can_resize(&self, class: ViewportClass) -> bool {
        self.flags.resizable && !self.maximized && class == ViewportClass::Desktop
    }

    /// Moves the window so its origin follows `origin`, clamped on-screen.
    ///
    /// Returns `true` when the stored rect changed.
    pub fn move_to(&mut self, origin: Point, viewport: Viewport) -> bool {
        if !self.can_drag(viewport.class()) {
            return false;
        }
        let next = self.rect.with_origin(clamp_window_origin(origin, viewport));
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Applies an in-progress resize for the pointer at `pointer`.
    pub fn resize(&mut self, session: &ResizeSession, pointer: Point, viewport: Viewport) -> bool {
        if !self.can_resize(viewport.class()) {
            return false;
        }
        let next = resize_rect(
            session.rect_start,
            session.edge,
            pointer.x - session.pointer_start.x,
            pointer.y - session.pointer_start.y,
        );
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Maximizes a floating window or restores a maximized one.
    ///
    /// Returns the new maximized flag.
    pub fn toggle_maximize(&mut self) -> bool {
        if self.maximized {
            self.restore();
        } else {
            self.maximize();
        }
        self.maximized
    }

    pub fn maximize(&mut self) {
        if self.maximized || !self.flags.maximizable {
            return;
        }
        self.saved_rect = Some(self.rect);
        self.rect = self.rect.with_origin(Point::new(0, MENU_BAR_HEIGHT));
        self.maximized = true;
    }

    pub fn restore(&mut self) {
        if !self.maximized {
            return;
        }
        if let Some(saved) = self.saved_rect.take() {
            self.rect = saved;
        }
        self.maximized = false;
    }

    /// Pushes a floating window back on-screen after the viewport shrank.
    pub fn fit_to_viewport(&mut self, viewport: Viewport) -> bool {
        if self.maximized || viewport.is_mobile() || !self.flags.draggable {
            return false;
        }
        let max_x = viewport.width - RESIZE_VISIBLE_MARGIN;
        let max_y = viewport.height - RESIZE_VISIBLE_MARGIN;
        let origin = Point::new(
            self.rect.x.min(max_x).max(0),
            self.rect.y.min(max_y).max(MENU_BAR_HEIGHT),
        );
        let next = self.rect.with_origin(origin);
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Resolves rendered geometry; mobile viewports override everything with fullscreen.
    pub fn presentation(&self, viewport: Viewport) -> WindowPresentation {
        if viewport.is_mobile() {
            return WindowPresentation {
                rect: fullscreen_rect(viewport),
                mode: PresentationMode::Fullscreen,
                draggable: false,
                resizable: false,
                show_maximize: false,
            };
        }
        if self.maximized {
            return WindowPresentation {
                rect: maximized_rect(viewport),
                mode: PresentationMode::Maximized,
                draggable: false,
                resizable: false,
                show_maximize: true,
            };
        }
        WindowPresentation {
            rect: self.rect,
            mode: PresentationMode::Floating,
            draggable: self.flags.draggable,
            resizable: self.flags.resizable,
            show_maximize: self.flags.maximizable,
        }
    }
}

/// Keeps a dragged window's origin below the menu bar and at least partly on-screen.
pub fn clamp_window_origin(origin: Point, viewport: Viewport) -> Point {
    let max_x = viewport.width - DRAG_VISIBLE_MARGIN;
    let max_y = viewport.height - DRAG_VISIBLE_MARGIN;
    Point::new(
        origin.x.min(max_x).max(0),
        origin.y.min(max_y).max(MENU_BAR_HEIGHT),
    )
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Growing edges (east, south) floor at the minimum size. Shrinking from the west or north
/// only applies while the result stays at or above the minimum, and the top edge never rises
/// above the menu bar.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let mut next = start;

    if edge.moves_east() {
        next.w = (start.w + dx).max(MIN_WINDOW_WIDTH);
    } else if edge.moves_west() {
        let width = start.w - dx;
        if width >= MIN_WINDOW_WIDTH {
            next.w = width;
            next.x = start.x + dx;
        }
    }

    if edge.moves_south() {
        next.h = (start.h + dy).max(MIN_WINDOW_HEIGHT);
    } else if edge.moves_north() {
        let height = start.h - dy;
        let top = start.y + dy;
        if height >= MIN_WINDOW_HEIGHT && top >= MENU_BAR_HEIGHT {
            next.h = height;
            next.y = top;
        }
    }

    next
}

/// Desktop maximized layout: full width, between the menu bar and the status bar.
pub fn maximized_rect(viewport: Viewport) -> WindowRect {
    WindowRect {
        x: 0,
        y: MENU_BAR_HEIGHT,
        w: viewport.width,
        h: viewport.height - MENU_BAR_HEIGHT - STATUS_BAR_HEIGHT,
    }
}

pub fn fullscreen_rect(viewport: Viewport) -> WindowRect {
    WindowRect {
        x: 0,
        y: 0,
        w: viewport.width,
        h: viewport.height,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESKTOP: Viewport = Viewport {
        width: 1920,
        height: 1080,
    };

    fn resizable_window() -> WindowGeometry {
        WindowGeometry::open(
            WindowId::new("help"),
            "Help",
            WindowRect {
                x: 250,
                y: 140,
                w: 400,
                h: 300,
            },
            WindowFlags {
                draggable: true,
                resizable: true,
                maximizable: true,
            },
        )
    }

    fn start() -> WindowRect {
        WindowRect {
            x: 200,
            y: 200,
            w: 400,
            h: 300,
        }
    }

    #[test]
    fn open_clamps_malformed_rect() {
        let window = WindowGeometry::open(
            WindowId::new("about"),
            "About",
            WindowRect {
                x: -40,
                y: -10,
                w: 10,
                h: 10,
            },
            WindowFlags::default(),
        );
        assert_eq!(
            window.rect,
            WindowRect {
                x: 0,
                y: MENU_BAR_HEIGHT,
                w: MIN_WINDOW_WIDTH,
                h: MIN_WINDOW_HEIGHT,
            }
        );
    }

    #[test]
    fn drag_origin_is_clamped_below_menu_bar_and_on_screen() {
        assert_eq!(
            clamp_window_origin(Point::new(-50, 0), DESKTOP),
            Point::new(0, MENU_BAR_HEIGHT)
        );
        assert_eq!(
            clamp_window_origin(Point::new(5000, 5000), DESKTOP),
            Point::new(1820, 980)
        );
        assert_eq!(
            clamp_window_origin(Point::new(300, 400), DESKTOP),
            Point::new(300, 400)
        );
    }

    #[test]
    fn horizontal_edges_leave_height_alone() {
        let east = resize_rect(start(), ResizeEdge::East, 50, 80);
        assert_eq!(east, WindowRect { w: 450, ..start() });

        let west = resize_rect(start(), ResizeEdge::West, -30, 80);
        assert_eq!(
            west,
            WindowRect {
                x: 170,
                w: 430,
                ..start()
            }
        );
    }

    #[test]
    fn vertical_edges_leave_width_alone() {
        let south = resize_rect(start(), ResizeEdge::South, 90, 40);
        assert_eq!(south, WindowRect { h: 340, ..start() });

        let north = resize_rect(start(), ResizeEdge::North, 90, -40);
        assert_eq!(
            north,
            WindowRect {
                y: 160,
                h: 340,
                ..start()
            }
        );
    }

    #[test]
    fn corners_combine_both_axes() {
        let se = resize_rect(start(), ResizeEdge::SouthEast, 20, 30);
        assert_eq!(
            se,
            WindowRect {
                w: 420,
                h: 330,
                ..start()
            }
        );

        let nw = resize_rect(start(), ResizeEdge::NorthWest, 20, 30);
        assert_eq!(
            nw,
            WindowRect {
                x: 220,
                y: 230,
                w: 380,
                h: 270,
            }
        );
    }

    #[test]
    fn growing_edges_floor_at_minimum_size() {
        let shrunk = resize_rect(start(), ResizeEdge::SouthEast, -500, -500);
        assert_eq!(shrunk.w, MIN_WINDOW_WIDTH);
        assert_eq!(shrunk.h, MIN_WINDOW_HEIGHT);
        assert_eq!(shrunk.origin(), start().origin());
    }

    #[test]
    fn shrinking_from_west_or_north_stops_at_minimum() {
        let west = resize_rect(start(), ResizeEdge::West, 200, 0);
        assert_eq!(west, start());

        let north = resize_rect(start(), ResizeEdge::North, 0, 150);
        assert_eq!(north, start());
    }

    #[test]
    fn north_edge_cannot_rise_above_menu_bar() {
        let rect = resize_rect(start(), ResizeEdge::North, 0, -180);
        assert_eq!(rect, start());

        let to_menu = resize_rect(start(), ResizeEdge::NorthEast, 10, -164);
        assert_eq!(to_menu.y, MENU_BAR_HEIGHT);
        assert_eq!(to_menu.h, 464);
        assert_eq!(to_menu.w, 410);
    }

    #[test]
    fn maximize_then_restore_round_trips_exactly() {
        let mut window = resizable_window();
        let before = window.rect;

        assert!(window.toggle_maximize());
        assert_eq!(window.saved_rect, Some(before));
        assert_eq!(
            window.presentation(DESKTOP).rect,
            WindowRect {
                x: 0,
                y: MENU_BAR_HEIGHT,
                w: 1920,
                h: 1080 - MENU_BAR_HEIGHT - STATUS_BAR_HEIGHT,
            }
        );

        assert!(!window.toggle_maximize());
        assert_eq!(window.rect, before);
        assert_eq!(window.saved_rect, None);
    }

    #[test]
    fn maximize_is_single_level() {
        let mut window = resizable_window();
        let before = window.rect;
        window.maximize();
        window.maximize();
        window.restore();
        assert_eq!(window.rect, before);
        assert!(!window.maximized);
    }

    #[test]
    fn non_maximizable_window_stays_floating() {
        let mut window = resizable_window();
        window.flags.maximizable = false;
        assert!(!window.toggle_maximize());
        assert_eq!(window.saved_rect, None);
    }

    #[test]
    fn drag_and_resize_are_ignored_while_maximized() {
        let mut window = resizable_window();
        window.maximize();
        let stored = window.rect;
        let session = ResizeSession {
            window_id: window.id.clone(),
            edge: ResizeEdge::SouthEast,
            pointer_start: Point::new(10, 10),
            rect_start: stored,
        };

        assert!(!window.resize(&session, Point::new(300, 300), DESKTOP));
        assert!(!window.move_to(Point::new(500, 500), DESKTOP));
        assert_eq!(window.rect, stored);
    }

    #[test]
    fn mobile_presentation_is_fullscreen_and_keeps_stored_rect() {
        let window = resizable_window();
        let mobile = Viewport::new(375, 667);
        let presentation = window.presentation(mobile);

        assert_eq!(presentation.mode, PresentationMode::Fullscreen);
        assert_eq!(presentation.rect, fullscreen_rect(mobile));
        assert!(!presentation.draggable);
        assert!(!presentation.resizable);
        assert_eq!(window.presentation(DESKTOP).rect, window.rect);
    }

    #[test]
    fn fit_to_viewport_pulls_window_back_on_screen() {
        let mut window = resizable_window();
        window.rect.x = 1500;
        window.rect.y = 900;

        assert!(window.fit_to_viewport(Viewport::new(1024, 768)));
        assert_eq!(window.rect.origin(), Point::new(824, 568));
        assert_eq!(window.rect.w, 400);
    }
}
