use std::time::Duration;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockSnapshot {
    hour: u32,
    minute: u32,
}

impl ClockSnapshot {
    fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            return Self {
                hour: date.get_hours(),
                minute: date.get_minutes(),
            };
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self { hour: 0, minute: 0 }
        }
    }
}

#[component]
pub(super) fn MenuBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let layout = runtime.host.layout();
    let clock_now = create_rw_signal(ClockSnapshot::now());

    if let Ok(interval) = set_interval_with_handle(
        move || clock_now.set(ClockSnapshot::now()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || interval.clear());
    }

    view! {
        <nav class="menu-bar" data-ui-kind="menu-bar" aria-label="Menu bar">
            <span class="menu-bar-title">{layout.title.clone()}</span>
            <div class="menu-bar-items">
                {layout
                    .menu_windows()
                    .map(|(label, entry)| {
                        let request = entry.open_request();
                        view! {
                            <button
                                type="button"
                                class="menu-bar-item"
                                on:click=move |ev| {
                                    stop_mouse_event(&ev);
                                    runtime.dispatch_action(DesktopAction::OpenWindow(request.clone()));
                                }
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <time class="menu-bar-clock">
                {move || {
                    let now = clock_now.get();
                    format_menu_clock(now.hour, now.minute)
                }}
            </time>
        </nav>
    }
}

#[component]
pub(super) fn StatusBar() -> impl IntoView {
    view! {
        <footer class="status-bar" data-ui-kind="status-bar">
            <span>"Ready"</span>
        </footer>
    }
}
