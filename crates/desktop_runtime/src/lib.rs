//! Retro desktop window-management runtime: grid-snapped icons, draggable/resizable windows and
//! z-order, rendered with Leptos.
//!
//! The geometry core ([`grid`], [`icon_registry`], [`icon_drag`], [`window_manager`],
//! [`window_order`]) is plain Rust with no browser dependency. [`reduce_desktop`] composes it into
//! a single state transition function; [`components`] and the runtime context wire that reducer
//! into the page.

pub mod catalog;
pub mod components;
pub mod gesture;
pub mod grid;
mod host;
pub mod icon_drag;
pub mod icon_registry;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod window_manager;
pub mod window_order;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use host::DesktopHostContext;
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, OpenWindowRequest, ReducerError, RuntimeEffect};
