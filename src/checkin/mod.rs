/// Split pasted team ids on any whitespace, newlines included.
pub(crate) fn parse_identifiers(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// `abc` and `Bearer abc` both become `Bearer abc`.
pub(crate) fn normalize_bearer(token: &str) -> String {
    let token = token.trim();
    match token.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => {
            format!("Bearer {}", token[7..].trim_start())
        }
        _ => format!("Bearer {token}"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CheckInStatus {
    Pending,
    CheckedIn,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CheckInRow {
    pub team_id: String,
    pub status: CheckInStatus,
}

/// One submission of the check-in form. Rows resolve independently and in
/// any order; nothing is rolled back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CheckInBatch {
    pub tournament_id: String,
    pub rows: Vec<CheckInRow>,
}

impl CheckInBatch {
    pub fn new(tournament_id: &str, identifiers: &str) -> Result<Self, String> {
        let tournament_id = tournament_id.trim();
        if tournament_id.is_empty() {
            return Err("Tournament id is required".to_string());
        }
        let ids = parse_identifiers(identifiers);
        if ids.is_empty() {
            return Err("Paste at least one team id".to_string());
        }
        Ok(Self {
            tournament_id: tournament_id.to_string(),
            rows: ids
                .into_iter()
                .map(|team_id| CheckInRow {
                    team_id,
                    status: CheckInStatus::Pending,
                })
                .collect(),
        })
    }

    pub fn resolve(&mut self, index: usize, outcome: Result<(), String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.status = match outcome {
                Ok(()) => CheckInStatus::CheckedIn,
                Err(e) => CheckInStatus::Failed(e),
            };
        }
    }

    pub fn checked_in(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == CheckInStatus::CheckedIn)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| matches!(r.status, CheckInStatus::Failed(_)))
            .count()
    }

    pub fn pending(&self) -> usize {
        self.rows.len() - self.checked_in() - self.failed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_split_on_any_whitespace() {
        assert_eq!(
            parse_identifiers(" a\nb\t c \r\n\n"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(parse_identifiers("  \n ").is_empty());
    }

    #[test]
    fn bearer_prefix_added_once() {
        assert_eq!(normalize_bearer("abc"), "Bearer abc");
        assert_eq!(normalize_bearer("Bearer abc"), "Bearer abc");
        assert_eq!(normalize_bearer("  bearer   abc "), "Bearer abc");
        assert_eq!(normalize_bearer("Bearerabc"), "Bearer Bearerabc");
    }

    #[test]
    fn batch_requires_tournament_and_ids() {
        assert!(CheckInBatch::new("", "a").is_err());
        assert!(CheckInBatch::new("t", " \n").is_err());
        let b = CheckInBatch::new(" t1 ", "a b").expect("valid batch");
        assert_eq!(b.tournament_id, "t1");
        assert_eq!(b.pending(), 2);
    }

    #[test]
    fn partial_failure_is_per_row_regardless_of_order() {
        let mut b = CheckInBatch::new("t", "one\ntwo\nthree").expect("valid batch");
        b.resolve(2, Ok(()));
        b.resolve(1, Err("403".to_string()));
        b.resolve(0, Ok(()));

        assert_eq!(b.checked_in(), 2);
        assert_eq!(b.failed(), 1);
        assert_eq!(b.pending(), 0);
        assert_eq!(b.rows[1].status, CheckInStatus::Failed("403".to_string()));
        assert_eq!(b.rows[0].status, CheckInStatus::CheckedIn);
        assert_eq!(b.rows[2].status, CheckInStatus::CheckedIn);
    }
}
