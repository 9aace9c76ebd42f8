//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.
//!
//! [`reduce_desktop`] is the only writer of the icon registry and the window stack. Components
//! describe what the user did as a [`DesktopAction`]; the reducer applies it and reports the
//! follow-up work the host must perform as [`RuntimeEffect`] values.

use thiserror::Error;

use crate::{
    icon_drag::{ClickResolution, IconDragOutcome, IconDragSession, DOUBLE_CLICK_WINDOW_MS},
    icon_registry::IconRegistryError,
    model::{
        DesktopState, IconId, InteractionState, Point, ResizeEdge, Viewport, WindowId,
        WindowRect,
    },
    window_manager::{ResizeSession, WindowDragSession, WindowFlags, WindowGeometry},
};

/// Everything needed to open a window at its default geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenWindowRequest {
    pub window_id: WindowId,
    pub title: String,
    pub rect: WindowRect,
    pub flags: WindowFlags,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Register an icon when it mounts. Re-registering is a no-op.
    RegisterIcon {
        icon_id: IconId,
        /// Requested raw position; clamped and snapped on first registration.
        position: Point,
    },
    /// Forget an icon that unmounted for good.
    RemoveIcon { icon_id: IconId },
    /// Pointer pressed on an icon.
    BeginIconDrag { icon_id: IconId, pointer: Point },
    /// Pointer moved during an icon drag.
    UpdateIconDrag { pointer: Point },
    /// Pointer released during an icon drag.
    EndIconDrag {
        pointer: Point,
        /// Host clock, used when the release turns out to be a click.
        now_ms: f64,
    },
    /// Click or tap that did not go through the drag path (mobile taps, keyboard activation).
    IconClicked { icon_id: IconId, now_ms: f64 },
    /// Fire single-click actions whose double-click window has lapsed.
    FlushPendingClicks { now_ms: f64 },
    /// Click on empty desktop.
    ClearSelection,
    /// Open a window, or raise it if already open.
    OpenWindow(OpenWindowRequest),
    CloseWindow { window_id: WindowId },
    /// Raise a window; sent for bare clicks inside a window.
    FocusWindow { window_id: WindowId },
    /// Pointer pressed on a title bar.
    BeginMove { window_id: WindowId, pointer: Point },
    UpdateMove { pointer: Point },
    EndMove,
    /// Pointer pressed on a resize handle.
    BeginResize {
        window_id: WindowId,
        edge: ResizeEdge,
        pointer: Point,
    },
    UpdateResize { pointer: Point },
    EndResize,
    /// Maximize a floating window or restore a maximized one.
    ToggleMaximize { window_id: WindowId },
    /// Abort whatever gesture is active (pointer cancel, unmount mid-gesture).
    CancelGesture,
    /// The browser viewport changed size.
    ViewportResized { viewport: Viewport },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// An icon's committed position changed.
    IconCommitted { icon_id: IconId, position: Point },
    /// A drop was refused because the cell is taken; the icon reverted.
    IconMoveRejected { icon_id: IconId, occupied_by: IconId },
    /// Primary action of an icon (double-click, or tap on mobile).
    IconActivated { icon_id: IconId },
    /// Dispatch [`DesktopAction::FlushPendingClicks`] after this delay.
    ScheduleClickFlush { delay_ms: u32 },
    WindowOpened(WindowId),
    WindowClosed(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for invalid actions (for example, referencing a missing window).
pub enum ReducerError {
    #[error("window `{0}` is not open")]
    WindowNotFound(WindowId),
    #[error("icon `{0}` is not registered")]
    IconNotFound(IconId),
}

impl From<IconRegistryError> for ReducerError {
    fn from(err: IconRegistryError) -> Self {
        match err {
            IconRegistryError::IconNotFound(icon_id) => Self::IconNotFound(icon_id),
        }
    }
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action references a window or icon that does not exist.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::RegisterIcon { icon_id, position } => {
            state.icons.register(icon_id, position, state.viewport);
        }
        DesktopAction::RemoveIcon { icon_id } => {
            state
                .icons
                .remove(&icon_id)
                .ok_or_else(|| ReducerError::IconNotFound(icon_id.clone()))?;
            if interaction
                .icon_drag
                .as_ref()
                .is_some_and(|session| session.icon_id == icon_id)
            {
                interaction.icon_drag = None;
            }
            interaction.clicks.forget(&icon_id);
            if state.selected_icon.as_ref() == Some(&icon_id) {
                state.selected_icon = None;
            }
        }
        DesktopAction::BeginIconDrag { icon_id, pointer } => {
            let committed = state
                .icons
                .position(&icon_id)
                .ok_or_else(|| ReducerError::IconNotFound(icon_id.clone()))?;
            if !interaction.has_active_gesture() {
                interaction.icon_drag =
                    IconDragSession::begin(icon_id, committed, pointer, state.viewport.class());
            }
        }
        DesktopAction::UpdateIconDrag { pointer } => {
            if let Some(session) = interaction.icon_drag.as_mut() {
                session.update(pointer, state.viewport, &state.icons);
            }
        }
        DesktopAction::EndIconDrag { pointer, now_ms } => {
            if let Some(session) = interaction.icon_drag.take() {
                let icon_id = session.icon_id.clone();
                match session.finish(pointer, state.viewport, &mut state.icons)? {
                    IconDragOutcome::Clicked => {
                        register_click(state, interaction, icon_id, now_ms, &mut effects);
                    }
                    IconDragOutcome::Committed(position) => {
                        effects.push(RuntimeEffect::IconCommitted { icon_id, position });
                    }
                    IconDragOutcome::Reverted {
                        blocked_by: Some(occupied_by),
                        ..
                    } => {
                        effects.push(RuntimeEffect::IconMoveRejected {
                            icon_id,
                            occupied_by,
                        });
                    }
                    IconDragOutcome::Reverted {
                        blocked_by: None, ..
                    } => {}
                }
            }
        }
        DesktopAction::IconClicked { icon_id, now_ms } => {
            if !state.icons.contains(&icon_id) {
                return Err(ReducerError::IconNotFound(icon_id));
            }
            register_click(state, interaction, icon_id, now_ms, &mut effects);
        }
        DesktopAction::FlushPendingClicks { now_ms } => {
            flush_pending_clicks(state, interaction, now_ms);
            // The host timer and clock can disagree by a few milliseconds.
            if let Some(remaining) = interaction.clicks.next_due_in(now_ms) {
                effects.push(RuntimeEffect::ScheduleClickFlush {
                    delay_ms: (remaining.ceil() as u32).max(1),
                });
            }
        }
        DesktopAction::ClearSelection => {
            state.selected_icon = None;
        }
        DesktopAction::OpenWindow(req) => {
            if !state.is_window_open(&req.window_id) {
                state.windows.push(WindowGeometry::open(
                    req.window_id.clone(),
                    req.title,
                    req.rect,
                    req.flags,
                ));
                effects.push(RuntimeEffect::WindowOpened(req.window_id.clone()));
            }
            state.window_order.bring_to_front(&req.window_id);
        }
        DesktopAction::CloseWindow { window_id } => {
            let before = state.windows.len();
            state.windows.retain(|w| w.id != window_id);
            if state.windows.len() == before {
                return Err(ReducerError::WindowNotFound(window_id));
            }
            state.window_order.remove(&window_id);
            end_window_gestures_for(interaction, &window_id);
            effects.push(RuntimeEffect::WindowClosed(window_id));
        }
        DesktopAction::FocusWindow { window_id } => {
            find_window_mut(state, &window_id)?;
            state.window_order.bring_to_front(&window_id);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let class = state.viewport.class();
            let window = find_window_mut(state, &window_id)?;
            let session = window.can_drag(class).then(|| WindowDragSession {
                window_id: window_id.clone(),
                pointer_offset: pointer.offset_from(window.rect.origin()),
            });
            state.window_order.bring_to_front(&window_id);
            if !interaction.has_active_gesture() {
                interaction.window_drag = session;
            }
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.window_drag.as_ref() {
                let viewport = state.viewport;
                let window = find_window_mut(state, &session.window_id)?;
                window.move_to(pointer.offset_from(session.pointer_offset), viewport);
            }
        }
        DesktopAction::EndMove => {
            interaction.window_drag = None;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            let class = state.viewport.class();
            let window = find_window_mut(state, &window_id)?;
            let session = window.can_resize(class).then(|| ResizeSession {
                window_id: window_id.clone(),
                edge,
                pointer_start: pointer,
                rect_start: window.rect,
            });
            state.window_order.bring_to_front(&window_id);
            if !interaction.has_active_gesture() {
                interaction.window_resize = session;
            }
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.window_resize.as_ref() {
                let viewport = state.viewport;
                let window = find_window_mut(state, &session.window_id)?;
                window.resize(session, pointer, viewport);
            }
        }
        DesktopAction::EndResize => {
            interaction.window_resize = None;
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let mobile = state.viewport.is_mobile();
            let window = find_window_mut(state, &window_id)?;
            if !mobile {
                window.toggle_maximize();
                end_window_gestures_for(interaction, &window_id);
            }
            state.window_order.bring_to_front(&window_id);
        }
        DesktopAction::CancelGesture => {
            if let Some(session) = interaction.icon_drag.take() {
                session.cancel();
            }
            interaction.window_drag = None;
            interaction.window_resize = None;
        }
        DesktopAction::ViewportResized { viewport } => {
            state.viewport = viewport;
            if viewport.is_mobile() {
                if let Some(session) = interaction.icon_drag.take() {
                    session.cancel();
                }
                interaction.window_drag = None;
                interaction.window_resize = None;
            } else {
                for (icon_id, position) in state.icons.reclamp(viewport) {
                    effects.push(RuntimeEffect::IconCommitted { icon_id, position });
                }
                for window in &mut state.windows {
                    window.fit_to_viewport(viewport);
                }
            }
        }
    }

    Ok(effects)
}

fn register_click(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    icon_id: IconId,
    now_ms: f64,
    effects: &mut Vec<RuntimeEffect>,
) {
    flush_pending_clicks(state, interaction, now_ms);
    match interaction
        .clicks
        .register_click(icon_id.clone(), now_ms, state.viewport.class())
    {
        ClickResolution::PendingSingle => {
            effects.push(RuntimeEffect::ScheduleClickFlush {
                delay_ms: DOUBLE_CLICK_WINDOW_MS as u32,
            });
        }
        ClickResolution::Double | ClickResolution::Primary => {
            state.selected_icon = Some(icon_id.clone());
            effects.push(RuntimeEffect::IconActivated { icon_id });
        }
    }
}

fn flush_pending_clicks(state: &mut DesktopState, interaction: &mut InteractionState, now_ms: f64) {
    for icon_id in interaction.clicks.flush(now_ms) {
        if state.icons.contains(&icon_id) {
            state.selected_icon = Some(icon_id);
        }
    }
}

fn end_window_gestures_for(interaction: &mut InteractionState, window_id: &WindowId) {
    if interaction
        .window_drag
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.window_drag = None;
    }
    if interaction
        .window_resize
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.window_resize = None;
    }
}

fn find_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Result<&'a mut WindowGeometry, ReducerError> {
    state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(id: &str) -> OpenWindowRequest {
        OpenWindowRequest {
            window_id: WindowId::new(id),
            title: id.to_uppercase(),
            rect: WindowRect {
                x: 200,
                y: 120,
                w: 400,
                h: 300,
            },
            flags: WindowFlags {
                draggable: true,
                resizable: true,
                maximizable: true,
            },
        }
    }

    fn dispatch(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Vec<RuntimeEffect> {
        reduce_desktop(state, interaction, action).expect("action applies")
    }

    #[test]
    fn opening_an_open_window_only_raises_it() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let first = dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        assert_eq!(first, vec![RuntimeEffect::WindowOpened(WindowId::new("a"))]);
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("b")));

        let again = dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        assert!(again.is_empty());
        assert_eq!(state.windows.len(), 2);
        assert_eq!(state.window_order.front(), Some(&WindowId::new("a")));
    }

    #[test]
    fn closing_removes_window_and_order_entry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: WindowId::new("a"),
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::WindowClosed(WindowId::new("a"))]);
        assert!(state.windows.is_empty());
        assert!(state.window_order.is_empty());

        let err = reduce_desktop(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: WindowId::new("a"),
            },
        )
        .expect_err("already closed");
        assert_eq!(err, ReducerError::WindowNotFound(WindowId::new("a")));
    }

    #[test]
    fn reopening_uses_default_geometry() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = WindowId::new("a");
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: Point::new(210, 130),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: Point::new(610, 430),
            },
        );
        dispatch(&mut state, &mut interaction, DesktopAction::EndMove);
        assert_eq!(state.window(&id).unwrap().rect.origin(), Point::new(600, 420));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id.clone(),
            },
        );
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        assert_eq!(state.window(&id).unwrap().rect, request("a").rect);
    }

    #[test]
    fn window_drag_is_clamped_to_viewport() {
        let mut state = DesktopState::with_viewport(Viewport::new(1024, 768));
        let mut interaction = InteractionState::default();
        let id = WindowId::new("a");
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: Point::new(200, 120),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: Point::new(-400, -400),
            },
        );
        assert_eq!(state.window(&id).unwrap().rect.origin(), Point::new(0, 36));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateMove {
                pointer: Point::new(5000, 5000),
            },
        );
        assert_eq!(state.window(&id).unwrap().rect.origin(), Point::new(924, 668));
    }

    #[test]
    fn begin_move_on_mobile_raises_without_dragging() {
        let mut state = DesktopState::with_viewport(Viewport::new(375, 667));
        let mut interaction = InteractionState::default();
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("b")));

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: WindowId::new("a"),
                pointer: Point::new(10, 10),
            },
        );
        assert_eq!(interaction.window_drag, None);
        assert_eq!(state.window_order.front(), Some(&WindowId::new("a")));
    }

    #[test]
    fn resize_updates_rect_until_released() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = WindowId::new("a");
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id.clone(),
                edge: ResizeEdge::SouthEast,
                pointer: Point::new(600, 420),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: Point::new(650, 470),
            },
        );
        dispatch(&mut state, &mut interaction, DesktopAction::EndResize);
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateResize {
                pointer: Point::new(900, 900),
            },
        );

        let rect = state.window(&id).unwrap().rect;
        assert_eq!((rect.w, rect.h), (450, 350));
        assert_eq!(interaction.window_resize, None);
    }

    #[test]
    fn only_one_gesture_runs_at_a_time() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        dispatch(&mut state, &mut interaction, DesktopAction::OpenWindow(request("a")));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: WindowId::new("a"),
                pointer: Point::new(210, 130),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: WindowId::new("a"),
                edge: ResizeEdge::East,
                pointer: Point::new(600, 200),
            },
        );
        assert!(interaction.window_drag.is_some());
        assert_eq!(interaction.window_resize, None);

        dispatch(&mut state, &mut interaction, DesktopAction::CancelGesture);
        assert!(!interaction.has_active_gesture());
    }

    #[test]
    fn single_click_selects_after_window_and_double_click_activates() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let about = IconId::new("about");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: about.clone(),
                position: Point::new(16, 16),
            },
        );

        let click = |state: &mut DesktopState, interaction: &mut InteractionState, at: f64| {
            dispatch(
                state,
                interaction,
                DesktopAction::BeginIconDrag {
                    icon_id: IconId::new("about"),
                    pointer: Point::new(20, 20),
                },
            );
            dispatch(
                state,
                interaction,
                DesktopAction::EndIconDrag {
                    pointer: Point::new(20, 20),
                    now_ms: at,
                },
            )
        };

        let first = click(&mut state, &mut interaction, 1_000.0);
        assert_eq!(first, vec![RuntimeEffect::ScheduleClickFlush { delay_ms: 250 }]);
        assert_eq!(state.selected_icon, None);

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FlushPendingClicks { now_ms: 1_250.0 },
        );
        assert_eq!(state.selected_icon, Some(about.clone()));

        dispatch(&mut state, &mut interaction, DesktopAction::ClearSelection);
        click(&mut state, &mut interaction, 2_000.0);
        let second = click(&mut state, &mut interaction, 2_100.0);
        assert_eq!(
            second,
            vec![RuntimeEffect::IconActivated {
                icon_id: about.clone()
            }]
        );
        assert_eq!(state.selected_icon, Some(about));
    }

    #[test]
    fn early_flush_reschedules_the_pending_click() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let about = IconId::new("about");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: about.clone(),
                position: Point::new(16, 16),
            },
        );
        let first = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconClicked {
                icon_id: about.clone(),
                now_ms: 1_000.0,
            },
        );
        assert_eq!(first, vec![RuntimeEffect::ScheduleClickFlush { delay_ms: 250 }]);

        let early = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FlushPendingClicks { now_ms: 1_249.0 },
        );
        assert_eq!(early, vec![RuntimeEffect::ScheduleClickFlush { delay_ms: 1 }]);
        assert_eq!(state.selected_icon, None);

        let due = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FlushPendingClicks { now_ms: 1_250.0 },
        );
        assert!(due.is_empty());
        assert_eq!(state.selected_icon, Some(about));
    }

    #[test]
    fn removing_a_selected_icon_clears_selection_and_pending_click() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let help = IconId::new("help");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: help.clone(),
                position: Point::new(8, 92),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconClicked {
                icon_id: help.clone(),
                now_ms: 0.0,
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FlushPendingClicks { now_ms: 250.0 },
        );
        assert_eq!(state.selected_icon, Some(help.clone()));
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconClicked {
                icon_id: help.clone(),
                now_ms: 1_000.0,
            },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RemoveIcon { icon_id: help },
        );

        assert_eq!(state.selected_icon, None);
        assert_eq!(interaction.clicks.next_due_in(1_000.0), None);
        let late = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::FlushPendingClicks { now_ms: 1_100.0 },
        );
        assert!(late.is_empty());
    }

    #[test]
    fn mobile_tap_activates_immediately() {
        let mut state = DesktopState::with_viewport(Viewport::new(375, 667));
        let mut interaction = InteractionState::default();
        let help = IconId::new("help");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: help.clone(),
                position: Point::new(16, 100),
            },
        );

        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: help.clone(),
                pointer: Point::new(20, 110),
            },
        );
        assert_eq!(interaction.icon_drag, None);

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::IconClicked {
                icon_id: help.clone(),
                now_ms: 0.0,
            },
        );
        assert_eq!(effects, vec![RuntimeEffect::IconActivated { icon_id: help }]);
    }

    #[test]
    fn removing_icon_mid_drag_drops_the_session() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let icon = IconId::new("trash");
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: icon.clone(),
                position: Point::new(98, 92),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::BeginIconDrag {
                icon_id: icon.clone(),
                pointer: Point::new(100, 100),
            },
        );
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RemoveIcon {
                icon_id: icon.clone(),
            },
        );

        assert_eq!(interaction.icon_drag, None);
        assert!(!state.icons.contains(&icon));
        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::EndIconDrag {
                pointer: Point::new(400, 400),
                now_ms: 0.0,
            },
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn viewport_shrink_reports_reclamped_icons() {
        let mut state = DesktopState::with_viewport(Viewport::new(1920, 1080));
        let mut interaction = InteractionState::default();
        dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::RegisterIcon {
                icon_id: IconId::new("floppy"),
                position: Point::new(1820, 16),
            },
        );

        let effects = dispatch(
            &mut state,
            &mut interaction,
            DesktopAction::ViewportResized {
                viewport: Viewport::new(1000, 700),
            },
        );
        assert_eq!(
            effects,
            vec![RuntimeEffect::IconCommitted {
                icon_id: IconId::new("floppy"),
                position: Point::new(908, 8),
            }]
        );
    }
}
