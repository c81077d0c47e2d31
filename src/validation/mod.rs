use crate::models::{DeckValidation, Registration};
use regex::Regex;
use std::sync::LazyLock;

static ETERNAL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+[0-9]{4}$").expect("eternal name pattern"));
static DISCORD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9]{4}$").expect("discord name pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameIssue {
    EternalName,
    DiscordName,
}

impl NameIssue {
    pub fn message(self) -> &'static str {
        match self {
            NameIssue::EternalName => "Not a valid eternal name",
            NameIssue::DiscordName => "Not a valid discord name",
        }
    }
}

pub(crate) fn is_valid_eternal_name(name: &str) -> bool {
    ETERNAL_NAME.is_match(name)
}

pub(crate) fn is_valid_discord_name(name: &str) -> bool {
    DISCORD_NAME.is_match(name)
}

/// Local format checks; no network involved.
pub(crate) fn name_issues(reg: &Registration) -> Vec<NameIssue> {
    let mut out = Vec::new();
    if !is_valid_eternal_name(&reg.eternal_name) {
        out.push(NameIssue::EternalName);
    }
    if !is_valid_discord_name(&reg.discord_name) {
        out.push(NameIssue::DiscordName);
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum DeckStatus {
    /// Lookup in flight, or it failed and nothing was learned.
    #[default]
    Pending,
    Validated,
    Invalid(Vec<String>),
}

impl From<DeckValidation> for DeckStatus {
    fn from(v: DeckValidation) -> Self {
        if v.valid {
            DeckStatus::Validated
        } else {
            DeckStatus::Invalid(v.messages)
        }
    }
}
