use super::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let gesture: GestureSlot = GestureSlot::default();
    on_cleanup({
        let gesture = gesture.clone();
        move || gesture.release()
    });

    let window = Signal::derive({
        let window_id = window_id.clone();
        move || runtime.state.get().window(&window_id).cloned()
    });
    let presentation = Signal::derive(move || {
        let viewport = runtime.state.get().viewport;
        window.get().map(|win| win.presentation(viewport))
    });
    let z_index = Signal::derive({
        let window_id = window_id.clone();
        move || runtime.state.get().z_index(&window_id).unwrap_or_default()
    });
    let focused = Signal::derive({
        let window_id = window_id.clone();
        move || runtime.state.get().window_order.front() == Some(&window_id)
    });

    let focus = {
        let window_id = window_id.clone();
        move |_: web_sys::PointerEvent| {
            if !focused.get_untracked() {
                runtime.dispatch_action(DesktopAction::FocusWindow {
                    window_id: window_id.clone(),
                });
            }
        }
    };
    let close = {
        let window_id = window_id.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            runtime.dispatch_action(DesktopAction::CloseWindow {
                window_id: window_id.clone(),
            });
        }
    };
    let toggle_maximize = {
        let window_id = window_id.clone();
        move || {
            if presentation.get_untracked().is_some_and(|p| p.show_maximize) {
                runtime.dispatch_action(DesktopAction::ToggleMaximize {
                    window_id: window_id.clone(),
                });
            }
        }
    };
    let begin_move = {
        let window_id = window_id.clone();
        let gesture = gesture.clone();
        move |ev: web_sys::PointerEvent| {
            if !is_primary_pointer(&ev) || gesture.is_active() {
                return;
            }
            try_set_pointer_capture(&ev);
            ev.prevent_default();
            ev.stop_propagation();
            runtime.dispatch_action(DesktopAction::BeginMove {
                window_id: window_id.clone(),
                pointer: pointer_from_pointer_event(&ev),
            });
            if runtime.interaction.get_untracked().window_drag.is_none() {
                return;
            }
            gesture.start(
                move |pointer| runtime.dispatch_action(DesktopAction::UpdateMove { pointer }),
                move |end| match end {
                    GestureEnd::Released(_) => runtime.dispatch_action(DesktopAction::EndMove),
                    GestureEnd::Cancelled => runtime.dispatch_action(DesktopAction::CancelGesture),
                },
            );
        }
    };
    let titlebar_double_click = {
        let toggle_maximize = toggle_maximize.clone();
        move |ev: web_sys::MouseEvent| {
            stop_mouse_event(&ev);
            toggle_maximize();
        }
    };
    let maximize_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize();
    };
    let body = runtime
        .host
        .layout()
        .window(&window_id)
        .map(|entry| entry.body.clone())
        .unwrap_or_default();

    move || {
        let current = presentation.get()?;
        let title = window.get().map(|win| win.title).unwrap_or_default();
        let is_maximized = current.mode == PresentationMode::Maximized;
        let maximize_click = maximize_click.clone();

        Some(view! {
            <section
                class=window_class(current, focused.get())
                style=window_style(current, z_index.get())
                on:pointerdown=focus.clone()
                role="dialog"
                aria-label=title.clone()
            >
                <header
                    class=if current.draggable { "titlebar draggable" } else { "titlebar" }
                    on:pointerdown=begin_move.clone()
                    on:dblclick=titlebar_double_click.clone()
                >
                    <button
                        class="titlebar-close"
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=close.clone()
                    />
                    <span class="titlebar-title">{title}</span>
                    {current.show_maximize.then(|| view! {
                        <button
                            class="titlebar-zoom"
                            aria-label=if is_maximized { "Restore window" } else { "Maximize window" }
                            on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                            on:click=maximize_click
                        />
                    })}
                </header>
                <div class="window-body">
                    {body
                        .iter()
                        .map(|paragraph| view! { <p>{paragraph.clone()}</p> })
                        .collect_view()}
                </div>
                {current.resizable.then(|| {
                    ResizeEdge::ALL
                        .into_iter()
                        .map(|edge| {
                            view! {
                                <WindowResizeHandle
                                    window_id=window_id.clone()
                                    edge
                                    gesture=gesture.clone()
                                />
                            }
                        })
                        .collect_view()
                })}
            </section>
        })
    }
}

#[component]
fn WindowResizeHandle(
    window_id: WindowId,
    edge: ResizeEdge,
    gesture: GestureSlot,
) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_pointer(&ev) || gesture.is_active() {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: window_id.clone(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
        });
        if runtime.interaction.get_untracked().window_resize.is_none() {
            return;
        }
        gesture.start(
            move |pointer| runtime.dispatch_action(DesktopAction::UpdateResize { pointer }),
            move |end| match end {
                GestureEnd::Released(_) => runtime.dispatch_action(DesktopAction::EndResize),
                GestureEnd::Cancelled => runtime.dispatch_action(DesktopAction::CancelGesture),
            },
        );
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}
