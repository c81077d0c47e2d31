use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Badge, span, "inline-flex items-center justify-center rounded-md border px-2 py-0.5 text-xs font-medium w-fit whitespace-nowrap shrink-0"}
}

pub use components::*;

/// Tone classes for [`Badge`], matched to the badge meaning on each page.
pub const BADGE_SUCCESS: &str = "border-transparent bg-emerald-600/15 text-emerald-700";
pub const BADGE_DANGER: &str = "border-transparent bg-destructive/15 text-destructive";
pub const BADGE_WARNING: &str = "border-transparent bg-amber-500/15 text-amber-700";
pub const BADGE_MUTED: &str = "text-muted-foreground";
