use crate::forms::{ImportRequest, NewEcqPlayer};
use crate::links::UrlBuilder;
use crate::models::{
    CacheDeckNameRequest, CreateUserRequest, DeckValidation, EditUserRoleRequest,
    GeneratedResources, OpponentsResponse, ResourcesRequest, StatsResponse,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    /// Pages print the backend's own error text, so the body is the message.
    pub(crate) fn http(status: reqwest::StatusCode, body: String) -> Self {
        let body = body.trim();
        let kind = if status == reqwest::StatusCode::UNAUTHORIZED {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Http
        };
        Self {
            kind,
            message: if body.is_empty() {
                format!("Request failed ({status})")
            } else {
                body.to_string()
            },
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

const DEFAULT_BATTLEFY_URL: &str = "https://api.battlefy.com";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub battlefy_url: String,
}

fn env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}

impl EnvConfig {
    pub fn new() -> Self {
        let window = web_sys::window();

        // The backend serves this bundle, so same-origin is the natural default.
        let origin = window
            .as_ref()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();

        let env = window
            .and_then(|w| w.get("ENV"))
            .map(wasm_bindgen::JsValue::from)
            .filter(|env| !env.is_undefined() && env.is_object());

        // Both `window.ENV.API_URL` and the lower-case spelling are accepted.
        let api_url = env
            .as_ref()
            .and_then(|env| env_string(env, &["API_URL", "api_url"]))
            .unwrap_or(origin);
        let battlefy_url = env
            .as_ref()
            .and_then(|env| env_string(env, &["BATTLEFY_API_URL", "battlefy_api_url"]))
            .unwrap_or_else(|| DEFAULT_BATTLEFY_URL.to_string());

        Self {
            api_url,
            battlefy_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the tournament backend plus the one Battlefy call it needs.
///
/// No timeouts and no retries: a stuck request only stalls its own feature.
#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) battlefy_url: String,
}

impl ApiClient {
    pub fn new(base_url: String, battlefy_url: String) -> Self {
        Self {
            base_url,
            battlefy_url,
        }
    }

    pub fn from_env() -> Self {
        let env = EnvConfig::new();
        Self::new(env.api_url, env.battlefy_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> UrlBuilder {
        UrlBuilder::new(&self.base_url, path)
    }

    pub(crate) fn check_in_url(&self, tournament_id: &str, team_id: &str) -> String {
        UrlBuilder::new(&self.battlefy_url, "/tournaments")
            .segment(tournament_id)
            .segment("teams")
            .segment(team_id)
            .segment("check-in")
            .build()
    }

    async fn send(req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = req.send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body))
        }
    }

    async fn send_json<T: serde::de::DeserializeOwned>(
        req: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        Self::send(req).await?.json().await.map_err(ApiError::parse)
    }

    /// For endpoints that answer with plain text (or nothing).
    async fn send_text(req: reqwest::RequestBuilder) -> ApiResult<String> {
        Self::send(req).await?.text().await.map_err(ApiError::parse)
    }

    pub async fn generate_resources(
        &self,
        body: &ResourcesRequest,
    ) -> ApiResult<GeneratedResources> {
        let req = reqwest::Client::new()
            .post(self.url("/resources").build())
            .json(body);
        Self::send_json(req).await
    }

    pub async fn validate_deck(&self, deck_url: &str) -> ApiResult<DeckValidation> {
        let url = self.url("/validateDeck").param("url", deck_url).build();
        Self::send_json(reqwest::Client::new().get(url)).await
    }

    pub async fn player_stats(&self, players: &[String]) -> ApiResult<StatsResponse> {
        let url = self
            .url("/players/stats")
            .param("players", &players.join(","))
            .build();
        Self::send_json(reqwest::Client::new().get(url)).await
    }

    pub async fn opponents_info(&self, opponents: &str) -> ApiResult<OpponentsResponse> {
        let url = self.url("/opponents/info").param("opponents", opponents).build();
        Self::send_json(reqwest::Client::new().get(url)).await
    }

    pub async fn cache_deck_name(&self, link: &str, name: &str) -> ApiResult<()> {
        let req = reqwest::Client::new()
            .post(self.url("/cache/deck/name").build())
            .json(&CacheDeckNameRequest {
                link: link.to_string(),
                name: name.to_string(),
            });
        Self::send_text(req).await.map(|_| ())
    }

    pub async fn edit_user_role(&self, login: &str, role: &str) -> ApiResult<()> {
        let req = reqwest::Client::new()
            .post(self.url("/edit/user/role").build())
            .json(&EditUserRoleRequest {
                login: login.to_string(),
                role: role.to_string(),
            });
        Self::send_text(req).await.map(|_| ())
    }

    pub async fn create_user(&self, body: &CreateUserRequest) -> ApiResult<String> {
        let req = reqwest::Client::new()
            .post(self.url("/create/user").build())
            .json(body);
        Self::send_text(req).await
    }

    pub async fn delete_user(&self, login: &str) -> ApiResult<()> {
        let url = self.url("/user/delete").segment(login).build();
        Self::send_text(reqwest::Client::new().delete(url))
            .await
            .map(|_| ())
    }

    pub async fn delete_ecq_player(&self, name: &str) -> ApiResult<()> {
        let url = self.url("/delete/ecq/player").segment(name).build();
        Self::send_text(reqwest::Client::new().delete(url))
            .await
            .map(|_| ())
    }

    pub async fn add_ecq_player(&self, player: &NewEcqPlayer) -> ApiResult<String> {
        let url = self
            .url("/add/ecq/player")
            .param("playerName", &player.name)
            .param("deckName", &player.deck_name)
            .build();
        let req = reqwest::Client::new()
            .post(url)
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(player.deck_list.clone());
        Self::send_text(req).await
    }

    pub async fn import_tournament(&self, import: &ImportRequest) -> ApiResult<String> {
        let url = self
            .url("/import/tournament")
            .param("battlefyUuid", &import.battlefy_uuid)
            .param("season", &import.season.to_string())
            .param("tournamentType", &import.tournament_type)
            .build();
        Self::send_text(reqwest::Client::new().post(url)).await
    }

    /// `authorization` must already carry the `Bearer ` prefix.
    pub async fn check_in(
        &self,
        tournament_id: &str,
        team_id: &str,
        authorization: &str,
    ) -> ApiResult<()> {
        let req = reqwest::Client::new()
            .post(self.check_in_url(tournament_id, team_id))
            .header("Authorization", authorization);
        Self::send_text(req).await.map(|_| ())
    }
}
