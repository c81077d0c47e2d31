mod api;
mod app;
mod checkin;
mod components;
mod editor;
mod forms;
mod links;
mod models;
mod pages;
mod roster;
mod state;
mod stats;
mod util;
mod validation;

pub use app::App;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    util::init_logging();
    mount_to_body(App);
}

// WASM-only tests (`cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_env_config_defaults_to_page_origin() {
        let env = api::EnvConfig::new();
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        assert_eq!(env.api_url, origin);
        assert_eq!(env.battlefy_url, "https://api.battlefy.com");
    }

    #[wasm_bindgen_test]
    fn test_page_data_missing_yields_empty_state() {
        let data = state::load_page_data();
        assert!(data.decks.is_empty());
        assert!(data.users.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError, ApiErrorKind};
    use crate::editor::{EditTarget, EditorState};
    use crate::links::{refresh_links, side_panel_url};
    use crate::models::{
        CreateUserRequest, DeckValidation, EcqPlayerRow, OpponentsResponse, PageData,
        ResourcesRequest,
    };
    use crate::roster::Roster;

    fn client() -> ApiClient {
        ApiClient::new(
            "http://localhost:8080".to_string(),
            "https://api.battlefy.com".to_string(),
        )
    }

    fn opponents() -> OpponentsResponse {
        let json = r#"{
            "opponents": [
                {"name": "Foo+1234", "deck": {"url": "https://eternalwarcry.com/decks/d/abc", "name": "Rakano Plate", "list": "4 Torch (Set0 #1)"}},
                {"name": "Bar+5678"},
                {"name": "Baz Qux+0001", "deck": {"url": "https://eternalwarcry.com/decks/d/xyz", "name": "Feln"}}
            ]
        }"#;
        serde_json::from_str(json).expect("opponents response should parse")
    }

    #[test]
    fn test_opponents_response_contract_deserialize() {
        let res = opponents();
        assert_eq!(res.opponents.len(), 3);
        assert!(res.opponents[1].deck.is_none());
        assert_eq!(
            res.opponents[0].deck.as_ref().and_then(|d| d.list.as_deref()),
            Some("4 Torch (Set0 #1)")
        );
        assert!(res.opponents[2].deck.as_ref().is_some_and(|d| d.list.is_none()));
    }

    #[test]
    fn test_validate_deck_response_contract_deserialize() {
        let v: DeckValidation =
            serde_json::from_str(r#"{"valid": false, "messages": ["Deck has 74 cards"]}"#)
                .expect("validation should parse");
        assert!(!v.valid);
        assert_eq!(v.messages, vec!["Deck has 74 cards".to_string()]);

        let ok: DeckValidation =
            serde_json::from_str(r#"{"valid": true}"#).expect("messages are optional");
        assert!(ok.messages.is_empty());
    }

    #[test]
    fn test_request_bodies_serialize_with_backend_keys() {
        let v = serde_json::to_value(ResourcesRequest {
            players: "A vs B".to_string(),
            p1score: "1".to_string(),
            p2score: "0".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v["players"], "A vs B");
        assert_eq!(v["p1score"], "1");
        assert_eq!(v["p2score"], "0");

        let v = serde_json::to_value(CreateUserRequest {
            login: "bob".to_string(),
            role: "admin".to_string(),
            password: "pw".to_string(),
        })
        .expect("should serialize");
        assert_eq!(v["login"], "bob");
        assert_eq!(v["password"], "pw");
    }

    #[test]
    fn test_page_data_accepts_partial_payload() {
        let data: PageData = serde_json::from_str(
            r#"{"ecqPlayers": [{"name": "Foo+1234", "deckName": "Feln", "deckList": "1 Card"}]}"#,
        )
        .expect("partial page data should parse");
        assert!(data.decks.is_empty());
        assert_eq!(
            data.ecq_players,
            vec![EcqPlayerRow {
                name: "Foo+1234".to_string(),
                deck_name: "Feln".to_string(),
                deck_list: "1 Card".to_string(),
            }]
        );
    }

    #[test]
    fn test_side_panel_has_one_triple_per_visible_card() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(opponents().opponents);
        roster.set_score(0, "2".to_string());
        roster.set_score(2, "1 & 0".to_string());

        let url = side_panel_url("http://localhost:8080", &roster);
        assert!(url.starts_with("http://localhost:8080/download/streaming/panel?player1Name=Foo%2B1234&player1Score=2&player1DeckName=Rakano%20Plate"));
        assert!(url.contains("&player2Name=Bar%2B5678&player2Score=&player2DeckName=&"));
        assert!(url.contains("&player3Name=Baz%20Qux%2B0001&player3Score=1%20%26%200&player3DeckName=Feln"));
        assert!(!url.contains("player4"));
        assert!(!url.contains("mainCam"));
    }

    #[test]
    fn test_renaming_deck_regenerates_links_keeping_source() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(opponents().opponents);
        let before = refresh_links("", &roster);

        let mut editor = EditorState::default();
        let key = roster.cards[0].deck_key().expect("card has a deck");
        editor.begin(EditTarget::DeckName(key), roster.cards[0].deck_name());
        editor.set_draft("Rakano Valkyries".to_string());
        let commit = editor.commit().expect("edit was open");
        let EditTarget::DeckName(key) = commit.target else {
            panic!("deck edit expected");
        };
        let cached = roster.set_deck_name(&key, commit.value);

        assert_eq!(
            cached,
            Some((
                "https://eternalwarcry.com/decks/d/abc".to_string(),
                "Rakano Valkyries".to_string()
            ))
        );
        assert_eq!(roster.cards[0].deck_name(), "Rakano Valkyries");

        let after = refresh_links("", &roster);
        let left = after.decks[0].as_ref().expect("card has links");
        assert!(left.left.contains("name=Rakano%20Valkyries"));
        assert!(left
            .left
            .contains("link=https%3A%2F%2Feternalwarcry.com%2Fdecks%2Fd%2Fabc"));
        assert_ne!(before.decks[0], after.decks[0]);
        assert_eq!(before.decks[2], after.decks[2]);
        assert!(after.panel.contains("player1DeckName=Rakano%20Valkyries"));
    }

    #[test]
    fn test_placeholder_deck_cannot_be_renamed() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(opponents().opponents);
        assert!(roster.cards[1].deck_key().is_none());
        assert!(refresh_links("", &roster).decks[1].is_none());
    }

    #[test]
    fn test_new_opponent_fetch_replaces_previous_cards() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(opponents().opponents);
        roster.select_main_cam(Some("Foo+1234".to_string()));
        assert_eq!(roster.main_cam_visible(), Some("Foo+1234"));

        let second: OpponentsResponse = serde_json::from_str(
            r#"{"opponents": [{"name": "Solo+4321", "deck": {"url": "u", "name": "n"}}]}"#,
        )
        .expect("second response should parse");
        roster.replace_with_opponents(second.opponents);

        assert_eq!(roster.cards.len(), 1);
        assert_eq!(roster.cards[0].player, "Solo+4321");
        assert!(roster.main_cam.is_none());
        assert!(!side_panel_url("", &roster).contains("player2"));
    }

    #[test]
    fn test_open_rename_does_not_land_on_next_opponent_card() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(opponents().opponents);

        let mut editor = EditorState::default();
        let key = roster.cards[0].deck_key().expect("card has a deck");
        editor.begin(EditTarget::DeckName(key), roster.cards[0].deck_name());
        editor.set_draft("Renamed Rakano".to_string());

        // Enter in the opponent-list field fetches without closing the edit.
        let next: OpponentsResponse = serde_json::from_str(
            r#"{"opponents": [{"name": "Other+0002", "deck": {"url": "https://x/b", "name": "Feln"}}]}"#,
        )
        .expect("next response should parse");
        roster.replace_with_opponents(next.opponents);

        // A commit that slipped through still cannot touch the new card.
        let mut stale = editor.clone();
        let commit = stale.commit().expect("edit was open");
        let EditTarget::DeckName(key) = commit.target else {
            panic!("deck edit expected");
        };
        assert!(roster.set_deck_name(&key, commit.value).is_none());
        assert_eq!(roster.cards[0].deck_name(), "Feln");

        editor.retain(|target| match target {
            EditTarget::DeckName(key) => roster.contains_deck(key),
            EditTarget::UserRole(_) => true,
        });
        assert!(editor.commit().is_none());
    }

    #[test]
    fn test_check_in_url_encodes_ids() {
        assert_eq!(
            client().check_in_url("t 1", "team/2"),
            "https://api.battlefy.com/tournaments/t%201/teams/team%2F2/check-in"
        );
    }

    #[test]
    fn test_http_error_uses_body_text() {
        let e = ApiError::http(
            reqwest::StatusCode::BAD_REQUEST,
            "Season already imported\n".to_string(),
        );
        assert_eq!(e.kind, ApiErrorKind::Http);
        assert_eq!(e.to_string(), "Season already imported");

        let empty = ApiError::http(reqwest::StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(empty.to_string(), "Request failed (502 Bad Gateway)");
    }

    #[test]
    fn test_unauthorized_keeps_body_text() {
        let e = ApiError::http(
            reqwest::StatusCode::UNAUTHORIZED,
            "Session expired, log in again".to_string(),
        );
        assert_eq!(e.kind, ApiErrorKind::Unauthorized);
        assert_eq!(e.to_string(), "Session expired, log in again");

        let bare = ApiError::http(reqwest::StatusCode::UNAUTHORIZED, "  ".to_string());
        assert_eq!(bare.to_string(), "Request failed (401 Unauthorized)");
    }

    #[test]
    fn test_api_client_new() {
        let c = client();
        assert_eq!(c.base_url(), "http://localhost:8080");
        assert_eq!(c.battlefy_url, "https://api.battlefy.com");
    }
}
