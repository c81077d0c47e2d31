use crate::models::StatsResponse;

/// Player ids may be pasted comma- or whitespace-separated.
pub(crate) fn parse_player_ids(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TournamentTypeStats {
    pub tournament_type: String,
    pub stats: Vec<(String, String)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PlayerStatsRow {
    pub player: String,
    pub types: Vec<TournamentTypeStats>,
}

/// Nested table model: player rows, an inner table per tournament type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StatsTable {
    pub rows: Vec<PlayerStatsRow>,
}

fn display_value(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<StatsResponse> for StatsTable {
    fn from(res: StatsResponse) -> Self {
        let rows = res
            .players
            .into_iter()
            .map(|(player, by_type)| PlayerStatsRow {
                player,
                types: by_type
                    .into_iter()
                    .map(|(tournament_type, stats)| TournamentTypeStats {
                        tournament_type,
                        stats: stats
                            .iter()
                            .map(|(k, v)| (k.clone(), display_value(v)))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }
}

impl StatsTable {
    /// Rows follow the order players were asked for; the backend's map is keyed
    /// alphabetically. Players nobody asked for go last.
    pub fn ordered_by(mut self, requested: &[String]) -> Self {
        self.rows.sort_by_key(|row| {
            requested
                .iter()
                .position(|p| p == &row.player)
                .unwrap_or(requested.len())
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_ids_accept_commas_and_newlines() {
        assert_eq!(
            parse_player_ids("a, b\nc,,d "),
            vec!["a", "b", "c", "d"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn stats_response_flattens_into_nested_rows() {
        let json = r#"{
            "players": {
                "Foo+1234": {
                    "ECQ": {"wins": 5, "losses": 2, "winRate": "71%"},
                    "Weekly": {"wins": 1, "note": null}
                },
                "Bar+0001": {}
            }
        }"#;
        let res: StatsResponse = serde_json::from_str(json).expect("stats response should parse");
        let table = StatsTable::from(res);

        assert_eq!(table.rows.len(), 2);
        let foo = table
            .rows
            .iter()
            .find(|r| r.player == "Foo+1234")
            .expect("Foo row");
        assert_eq!(foo.types.len(), 2);
        let ecq = &foo.types[0];
        assert_eq!(ecq.tournament_type, "ECQ");
        assert!(ecq.stats.contains(&("wins".to_string(), "5".to_string())));
        assert!(ecq.stats.contains(&("winRate".to_string(), "71%".to_string())));
        assert!(foo.types[1]
            .stats
            .contains(&("note".to_string(), String::new())));
    }

    #[test]
    fn missing_players_key_yields_empty_table() {
        let res: StatsResponse = serde_json::from_str("{}").expect("empty object parses");
        assert!(StatsTable::from(res).rows.is_empty());
    }

    #[test]
    fn rows_follow_requested_player_order() {
        let json = r#"{"players": {"Alpha+0001": {}, "Zed+0002": {}, "Mid+0003": {}}}"#;
        let res: StatsResponse = serde_json::from_str(json).expect("stats response should parse");
        let requested = parse_player_ids("Zed+0002, Alpha+0001");

        let table = StatsTable::from(res).ordered_by(&requested);
        let order: Vec<&str> = table.rows.iter().map(|r| r.player.as_str()).collect();
        assert_eq!(order, vec!["Zed+0002", "Alpha+0001", "Mid+0003"]);
    }
}
