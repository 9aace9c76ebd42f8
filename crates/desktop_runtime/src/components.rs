//! Desktop shell UI composition and interaction surfaces.

mod icon;
mod menu_bar;
mod window;

use leptos::*;

use self::{
    icon::DesktopIcon,
    menu_bar::{MenuBar, StatusBar},
    window::DesktopWindow,
};

use crate::{
    gesture::{pointer_from_pointer_event, GestureEnd, GestureSlot},
    icon_drag::IconRenderState,
    model::{ResizeEdge, WindowId},
    reducer::DesktopAction,
    window_manager::{PresentationMode, WindowPresentation},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: menu bar, icons, windows and status bar.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let state = runtime.state;
    let layout = runtime.host.layout();
    let is_mobile = Signal::derive(move || state.get().viewport.is_mobile());

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            data-ui-kind="desktop-root"
            data-viewport=move || if is_mobile.get() { "mobile" } else { "desktop" }
        >
            <MenuBar />
            <main class="desktop-surface" data-ui-slot="desktop-surface">
                <div
                    data-ui-slot="dismiss-layer"
                    on:mousedown=move |_| runtime.dispatch_action(DesktopAction::ClearSelection)
                />
                <div class=move || {
                    if is_mobile.get() { "desktop-icons flow" } else { "desktop-icons" }
                }>
                    <For
                        each=move || layout.icons.clone()
                        key=|icon| icon.icon_id.clone()
                        let:icon
                    >
                        <DesktopIcon entry=icon />
                    </For>
                </div>
                <For
                    each=move || state.get().windows
                    key=|win| win.id.clone()
                    let:win
                >
                    <DesktopWindow window_id=win.id />
                </For>
            </main>
            <StatusBar />
        </div>
    }
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

/// Only primary-button mouse presses and primary touch/pen contacts start gestures.
fn is_primary_pointer(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

/// Inline style for an icon; mobile icons flow in the layout and get none.
fn icon_style(render: Option<IconRenderState>, mobile: bool) -> String {
    match render {
        Some(render) if !mobile => format!(
            "left:{}px;top:{}px;",
            render.position.x, render.position.y
        ),
        _ => String::new(),
    }
}

fn window_style(presentation: WindowPresentation, z_index: u32) -> String {
    let rect = presentation.rect;
    format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;z-index:{};",
        rect.x, rect.y, rect.w, rect.h, z_index
    )
}

fn window_class(presentation: WindowPresentation, focused: bool) -> String {
    let mode = match presentation.mode {
        PresentationMode::Floating => "",
        PresentationMode::Maximized => " maximized",
        PresentationMode::Fullscreen => " fullscreen",
    };
    let focused = if focused { " focused" } else { "" };
    format!("desktop-window{mode}{focused}")
}

/// Time shown in the menu bar: 12-hour `hh:mm AM/PM`.
fn format_menu_clock(hour: u32, minute: u32) -> String {
    let mut display_hour = hour % 12;
    if display_hour == 0 {
        display_hour = 12;
    }
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    format!("{display_hour:02}:{minute:02} {suffix}")
}
