use super::*;
use crate::{
    catalog::IconEntry,
    icon_drag::{icon_render_state, SnapGhost},
};

#[component]
pub(super) fn DesktopIcon(entry: IconEntry) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let icon_id = entry.id();

    runtime.dispatch_action(DesktopAction::RegisterIcon {
        icon_id: icon_id.clone(),
        position: entry.initial_position(runtime.state.get_untracked().viewport),
    });

    let gesture: GestureSlot = GestureSlot::default();
    on_cleanup({
        let gesture = gesture.clone();
        let icon_id = icon_id.clone();
        move || {
            gesture.release();
            runtime.dispatch_action(DesktopAction::RemoveIcon { icon_id });
        }
    });

    let is_mobile = Signal::derive(move || runtime.state.get().viewport.is_mobile());
    let render = Signal::derive({
        let icon_id = icon_id.clone();
        move || {
            let desktop = runtime.state.get();
            let interaction = runtime.interaction.get();
            icon_render_state(&desktop.icons, interaction.icon_drag.as_ref(), &icon_id)
        }
    });
    let selected = Signal::derive({
        let icon_id = icon_id.clone();
        move || runtime.state.get().selected_icon.as_ref() == Some(&icon_id)
    });
    let ghost = Signal::derive(move || render.get().and_then(|state| state.ghost));

    let on_pointerdown = {
        let icon_id = icon_id.clone();
        let gesture = gesture.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_pointer(&ev) || is_mobile.get_untracked() || gesture.is_active() {
                return;
            }
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::BeginIconDrag {
                icon_id: icon_id.clone(),
                pointer: pointer_from_pointer_event(&ev),
            });
            let owns_drag = runtime
                .interaction
                .get_untracked()
                .icon_drag
                .is_some_and(|session| session.icon_id == icon_id);
            if !owns_drag {
                return;
            }
            gesture.start(
                move |pointer| runtime.dispatch_action(DesktopAction::UpdateIconDrag { pointer }),
                move |end| match end {
                    GestureEnd::Released(pointer) => {
                        runtime.dispatch_action(DesktopAction::EndIconDrag {
                            pointer,
                            now_ms: runtime.host.now_ms(),
                        });
                    }
                    GestureEnd::Cancelled => runtime.dispatch_action(DesktopAction::CancelGesture),
                },
            );
        }
    };

    // Desktop pointer clicks resolve through the drag release; this path covers taps on mobile
    // and keyboard activation (detail 0).
    let on_click = {
        let icon_id = icon_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            if is_mobile.get_untracked() || ev.detail() == 0 {
                runtime.dispatch_action(DesktopAction::IconClicked {
                    icon_id: icon_id.clone(),
                    now_ms: runtime.host.now_ms(),
                });
            }
        }
    };

    let class_name = move || {
        let dragging = render.get().is_some_and(|state| state.dragging);
        format!(
            "desktop-icon{}{}",
            if selected.get() { " selected" } else { "" },
            if dragging { " dragging" } else { "" }
        )
    };
    let glyph_class = format!("icon-glyph glyph-{}", entry.glyph);
    let label = entry.label.clone();

    view! {
        <button
            type="button"
            class=class_name
            data-icon-id=icon_id.to_string()
            style=move || icon_style(render.get(), is_mobile.get())
            aria-label=label.clone()
            aria-pressed=move || selected.get().to_string()
            on:pointerdown=on_pointerdown
            on:click=on_click
        >
            <span class=glyph_class aria-hidden="true"></span>
            <span class="icon-label">{label}</span>
        </button>
        {move || ghost.get().map(|ghost| view! { <SnapGhostOutline ghost /> })}
    }
}

#[component]
fn SnapGhostOutline(ghost: SnapGhost) -> impl IntoView {
    let class_name = if ghost.occupied {
        "icon-snap-ghost occupied"
    } else {
        "icon-snap-ghost"
    };
    view! {
        <div
            class=class_name
            aria-hidden="true"
            style=format!("left:{}px;top:{}px;", ghost.position.x, ghost.position.y)
        />
    }
}
