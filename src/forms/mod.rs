use crate::models::{CreateUserRequest, Role};
use std::str::FromStr;

pub(crate) fn validate_season(raw: &str) -> Result<u8, String> {
    match raw.trim().parse::<u8>() {
        Ok(s) if (1..=4).contains(&s) => Ok(s),
        _ => Err("Season must be a number between 1 and 4".to_string()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ImportRequest {
    pub battlefy_uuid: String,
    pub season: u8,
    pub tournament_type: String,
}

impl ImportRequest {
    pub fn new(battlefy_uuid: &str, season: &str, tournament_type: &str) -> Result<Self, String> {
        let battlefy_uuid = battlefy_uuid.trim();
        if battlefy_uuid.is_empty() {
            return Err("Battlefy tournament id is required".to_string());
        }
        let season = validate_season(season)?;
        Ok(Self {
            battlefy_uuid: battlefy_uuid.to_string(),
            season,
            tournament_type: tournament_type.trim().to_string(),
        })
    }
}

pub(crate) fn create_user_request(
    login: &str,
    role: &str,
    password: &str,
) -> Result<CreateUserRequest, String> {
    let login = login.trim();
    if login.is_empty() {
        return Err("Login is required".to_string());
    }
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    let role = role.trim();
    if role.is_empty() {
        return Err("Role is required".to_string());
    }
    let role = Role::from_str(role).map_err(|_| format!("Unknown role: {role}"))?;
    Ok(CreateUserRequest {
        login: login.to_string(),
        role: role.to_string(),
        password: password.to_string(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewEcqPlayer {
    pub name: String,
    pub deck_name: String,
    pub deck_list: String,
}

impl NewEcqPlayer {
    pub fn new(name: &str, deck_name: &str, deck_list: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Player name is required".to_string());
        }
        Ok(Self {
            name: name.to_string(),
            deck_name: deck_name.trim().to_string(),
            deck_list: deck_list.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_outside_range_is_rejected() {
        assert!(validate_season("0").is_err());
        assert!(validate_season("5").is_err());
        assert!(validate_season("").is_err());
        assert!(validate_season("two").is_err());
        assert_eq!(validate_season(" 2 "), Ok(2));
    }

    #[test]
    fn import_request_validates_before_anything_is_sent() {
        assert!(ImportRequest::new("uuid", "0", "ECQ").is_err());
        assert!(ImportRequest::new("uuid", "5", "ECQ").is_err());
        assert!(ImportRequest::new("  ", "2", "ECQ").is_err());

        let req = ImportRequest::new(" uuid ", "2", "ECQ").expect("season 2 is valid");
        assert_eq!(req.battlefy_uuid, "uuid");
        assert_eq!(req.season, 2);
    }

    #[test]
    fn create_user_requires_all_fields() {
        assert!(create_user_request("", "admin", "pw").is_err());
        assert!(create_user_request("bob", "admin", "").is_err());
        assert!(create_user_request("bob", "", "pw").is_err());
        assert!(create_user_request("bob", "wizard", "pw").is_err());

        let req = create_user_request(" bob ", "streamer", "pw").expect("valid user");
        assert_eq!(req.login, "bob");
        assert_eq!(req.role, "streamer");
    }

    #[test]
    fn ecq_player_needs_a_name() {
        assert!(NewEcqPlayer::new(" ", "Deck", "list").is_err());
        let p = NewEcqPlayer::new("Foo+1234", " Deck ", "1 Card").expect("valid player");
        assert_eq!(p.deck_name, "Deck");
    }
}
