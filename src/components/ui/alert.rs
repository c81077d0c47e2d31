use leptos::prelude::*;
use leptos_ui::clx;

// Error and notice lines under forms, plus per-message deck notifications.
mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;
