use desktop_runtime::{catalog::desktop_layout, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=desktop_layout().title.clone() />
        <Meta name="description" content="A personal repository presented as a classic desktop." />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />

        <main class="site-root">
            <DesktopEntry />
        </main>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <DesktopShell />
        </DesktopProvider>
    }
}
