//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived reducer container, the runtime effect queue and viewport
//! tracking. UI composition stays in [`crate::components`].

use leptos::*;

use crate::{
    host::DesktopHostContext,
    model::{DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host bundle for executing runtime side effects and environment queries.
    pub host: DesktopHostContext,
    /// Reactive desktop state signal.
    pub state: RwSignal<DesktopState>,
    /// Reactive pointer/drag/resize interaction state signal.
    pub interaction: RwSignal<InteractionState>,
    /// Queue of runtime effects emitted by the reducer and processed by the host.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }
}

/// Drains reducer-emitted effects in order.
///
/// The queue is cleared before processing so actions dispatched by an effect enqueue a fresh
/// batch instead of being overwritten by the in-flight drain.
fn install_effect_executor(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }
        runtime.effects.set(Vec::new());
        for effect in queued {
            runtime.host.run_runtime_effect(runtime, effect);
        }
    });
}

fn install_viewport_tracking(runtime: DesktopRuntimeContext) {
    let resize_listener = window_event_listener(ev::resize, move |_| {
        let viewport = runtime.host.viewport();
        if runtime.state.get_untracked().viewport != viewport {
            runtime.dispatch_action(DesktopAction::ViewportResized { viewport });
        }
    });
    on_cleanup(move || resize_listener.remove());
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Host bundle; defaults to the browser host with the built-in layout catalog.
    #[prop(optional)]
    host: Option<DesktopHostContext>,
    children: Children,
) -> impl IntoView {
    let host = host.unwrap_or_default();
    if let Err(err) = host.layout().validate() {
        logging::warn!("desktop layout catalog is inconsistent: {err}");
    }

    let state = create_rw_signal(DesktopState::with_viewport(host.viewport()));
    let interaction = create_rw_signal(InteractionState::default());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut desktop = state.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_desktop = desktop.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut desktop, &mut ui, action) {
            Ok(new_effects) => {
                if desktop != previous_desktop {
                    state.set(desktop);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("desktop reducer error: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        state,
        interaction,
        effects,
        dispatch,
    };

    provide_context(runtime);

    install_effect_executor(runtime);
    install_viewport_tracking(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
