use desktop_runtime::{use_desktop_runtime, DesktopAction, DesktopProvider, DesktopShell};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Query parameter naming a virtual path to open once the desktop is mounted.
const OPEN_QUERY_KEY: &str = "open";

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Web Desktop" />
        <Meta name="description" content="A desktop environment that runs in the browser." />

        <Router>
            <main class="site-root">
                <Routes>
                    <Route path="" view=DesktopEntry />
                    <Route path="/*any" view=UnknownRoute />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn DesktopEntry() -> impl IntoView {
    view! {
        <DesktopProvider>
            <OpenFromQuery />
            <DesktopShell />
        </DesktopProvider>
    }
}

/// Opens `?open=/path` with its default app, once.
#[component]
fn OpenFromQuery() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let query = use_query_map();
    let requested = query.with_untracked(|map| map.get(OPEN_QUERY_KEY).cloned());

    if let Some(path) = requested.filter(|path| !path.trim().is_empty()) {
        queue_microtask(move || {
            if let Err(err) = runtime.try_dispatch_action(DesktopAction::OpenItem { path }) {
                logging::warn!("deep link ignored: {err}");
            }
        });
    }
}

#[component]
fn UnknownRoute() -> impl IntoView {
    view! {
        <section class="site-not-found">
            <h1>"Nothing here"</h1>
            <A href="/">"Back to the desktop"</A>
        </section>
    }
}
