use crate::editor::click_commits;
use crate::pages::{
    CheckInPage, EcqPlayersPage, ImportPage, RegistrationsPage, ResourcesPage, Shell, StatsPage,
    StreamPage, UsersPage,
};
use crate::state::{AppContext, AppState};
use crate::util::event_target_tag;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    provide_context(AppContext(state));

    // A click anywhere except on a form control closes the open inline edit.
    let _click_handle = window_event_listener(ev::click, move |ev: web_sys::MouseEvent| {
        let commits = event_target_tag(&ev)
            .map(|tag| click_commits(&tag))
            .unwrap_or(true);
        if commits {
            state.commit_edit();
        }
    });

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("resources") view=move || view! { <Shell><ResourcesPage /></Shell> } />
                <Route path=path!("registrations") view=move || view! { <Shell><RegistrationsPage /></Shell> } />
                <Route path=path!("stats") view=move || view! { <Shell><StatsPage /></Shell> } />
                <Route path=path!("checkin") view=move || view! { <Shell><CheckInPage /></Shell> } />
                <Route path=path!("admin/users") view=move || view! { <Shell><UsersPage /></Shell> } />
                <Route path=path!("admin/ecq") view=move || view! { <Shell><EcqPlayersPage /></Shell> } />
                <Route path=path!("admin/import") view=move || view! { <Shell><ImportPage /></Shell> } />
                <Route path=path!("") view=move || view! { <Shell><StreamPage /></Shell> } />
            </Routes>
        </Router>
    }
}
