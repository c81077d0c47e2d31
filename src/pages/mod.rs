mod admin;
mod stream;
mod tools;

pub use admin::{EcqPlayersPage, ImportPage, UsersPage};
pub use stream::{ResourcesPage, StreamPage};
pub use tools::{CheckInPage, RegistrationsPage, StatsPage};

use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

const NAV: &[(&str, &str)] = &[
    ("/", "Stream"),
    ("/resources", "Resources"),
    ("/registrations", "Registrations"),
    ("/stats", "Stats"),
    ("/checkin", "Check-in"),
    ("/admin/users", "Users"),
    ("/admin/ecq", "ECQ players"),
    ("/admin/import", "Import"),
];

/// Page frame: navigation plus the shared status line.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let status = app_state.0.status;
    let pathname = use_location().pathname;

    let nav_class = move |href: &'static str| {
        if pathname.get() == href {
            "font-medium text-foreground"
        } else {
            "text-muted-foreground hover:text-foreground"
        }
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <nav class="mb-6 flex flex-wrap items-center gap-4 text-sm">
                    {NAV
                        .iter()
                        .map(|&(href, label)| view! { <a href=href class=move || nav_class(href)>{label}</a> })
                        .collect_view()}
                </nav>

                <Show when=move || status.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        status.get().map(|e| view! {
                            <Alert class="mb-4 flex items-center justify-between border-destructive/30">
                                <AlertDescription class="text-destructive text-xs" attr:id="status">{e}</AlertDescription>
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Sm
                                    on:click=move |_| status.set(None)
                                >
                                    "Dismiss"
                                </Button>
                            </Alert>
                        })
                    }}
                </Show>

                {children()}
            </div>
        </div>
    }
}
