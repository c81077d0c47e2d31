use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A decklist the backend managed to parse.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedDeck {
    pub url: String,
    pub name: String,

    /// Plain-text export of the list, shown for copy/paste.
    #[serde(default)]
    pub list: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Opponent {
    pub name: String,

    /// Absent when the backend could not parse the opponent's list.
    #[serde(default)]
    pub deck: Option<ParsedDeck>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct OpponentsResponse {
    #[serde(default)]
    pub opponents: Vec<Opponent>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeckValidation {
    pub valid: bool,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// `player -> tournament type -> stat name -> value`.
///
/// Values are numbers or strings depending on the stat, so they stay opaque.
pub(crate) type PlayerStatsMap =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, serde_json::Value>>>;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct StatsResponse {
    #[serde(default)]
    pub players: PlayerStatsMap,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct ResourcesRequest {
    pub players: String,
    pub p1score: String,
    pub p2score: String,
}

/// Overlay image filenames produced by `/resources`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct GeneratedResources {
    pub left: String,
    pub right: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct CacheDeckNameRequest {
    pub link: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EditUserRoleRequest {
    pub login: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct CreateUserRequest {
    pub login: String,
    pub role: String,
    pub password: String,
}

/// Roles the backend knows about. Rows keep the raw string so unknown roles
/// survive a round trip.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Role {
    Admin,
    Organizer,
    Streamer,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UserRow {
    pub login: String,
    pub role: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EcqPlayerRow {
    pub name: String,
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub deck_list: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Registration {
    pub player: String,
    #[serde(default)]
    pub eternal_name: String,
    #[serde(default)]
    pub discord_name: String,
    #[serde(default)]
    pub deck_url: Option<String>,
    #[serde(default)]
    pub deck_name: String,
}

/// Deck shown on the stream page before any opponent lookup.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeckSeed {
    pub player: String,
    pub deck_name: String,
    pub link: String,
    #[serde(default)]
    pub list: Option<String>,
}

/// Data the host page embeds as `window.PAGE_DATA`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageData {
    #[serde(default)]
    pub decks: Vec<DeckSeed>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
    #[serde(default)]
    pub users: Vec<UserRow>,
    #[serde(default)]
    pub ecq_players: Vec<EcqPlayerRow>,
}
