//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Reducer transitions stay pure; everything that touches the browser (viewport size, the clock,
//! timers) or resolves catalog lookups for follow-up actions lives behind this boundary.

use std::time::Duration;

use leptos::{logging, set_timeout};

use crate::{
    catalog::{desktop_layout, DesktopLayout},
    model::{IconId, Viewport, DEFAULT_VIEWPORT},
    reducer::{DesktopAction, RuntimeEffect},
    runtime_context::DesktopRuntimeContext,
};

#[derive(Clone, Copy)]
/// Host bundle for desktop runtime side effects.
pub struct DesktopHostContext {
    layout: &'static DesktopLayout,
}

impl Default for DesktopHostContext {
    fn default() -> Self {
        Self::new(desktop_layout())
    }
}

impl DesktopHostContext {
    pub fn new(layout: &'static DesktopLayout) -> Self {
        Self { layout }
    }

    /// Returns the desktop layout catalog this host resolves icons and windows against.
    pub fn layout(&self) -> &'static DesktopLayout {
        self.layout
    }

    /// Returns the current browser viewport size.
    pub fn viewport(&self) -> Viewport {
        browser_viewport()
    }

    /// Milliseconds on the host clock, used for double-click timing.
    pub fn now_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            return js_sys::Date::now();
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            0.0
        }
    }

    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, runtime: DesktopRuntimeContext, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::IconActivated { icon_id } => self.activate_icon(runtime, &icon_id),
            RuntimeEffect::ScheduleClickFlush { delay_ms } => {
                let host = *self;
                set_timeout(
                    move || {
                        runtime.dispatch_action(DesktopAction::FlushPendingClicks {
                            now_ms: host.now_ms(),
                        });
                    },
                    Duration::from_millis(u64::from(delay_ms)),
                );
            }
            RuntimeEffect::IconMoveRejected {
                icon_id,
                occupied_by,
            } => {
                logging::log!("icon `{icon_id}` move rejected: cell held by `{occupied_by}`");
            }
            RuntimeEffect::IconCommitted { .. }
            | RuntimeEffect::WindowOpened(_)
            | RuntimeEffect::WindowClosed(_) => {}
        }
    }

    /// Opens the catalog window bound to an activated icon.
    fn activate_icon(&self, runtime: DesktopRuntimeContext, icon_id: &IconId) {
        match self.layout.activation_target(icon_id) {
            Ok(Some(window)) => {
                runtime.dispatch_action(DesktopAction::OpenWindow(window.open_request()));
            }
            Ok(None) => {}
            Err(err) => logging::warn!("icon activation ignored: {err}"),
        }
    }
}

fn browser_viewport() -> Viewport {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(DEFAULT_VIEWPORT.width);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .map(|value| value as i32)
                .unwrap_or(DEFAULT_VIEWPORT.height);

            return Viewport::new(width, height);
        }
    }

    DEFAULT_VIEWPORT
}
