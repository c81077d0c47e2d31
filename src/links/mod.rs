use crate::roster::{DeckCard, Roster};

/// Builds `base + path + ?k=v&...` with every dynamic piece percent-encoded.
///
/// Path segments must be pushed before the first query parameter.
#[derive(Clone, Debug)]
pub(crate) struct UrlBuilder {
    url: String,
    has_query: bool,
}

impl UrlBuilder {
    pub fn new(base: &str, path: &str) -> Self {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Self {
            url: format!("{base}/{path}"),
            has_query: false,
        }
    }

    pub fn segment(mut self, raw: &str) -> Self {
        debug_assert!(!self.has_query, "path segment after query");
        if !self.url.ends_with('/') {
            self.url.push('/');
        }
        self.url.push_str(&urlencoding::encode(raw));
        self
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.url.push(if self.has_query { '&' } else { '?' });
        self.has_query = true;
        self.url.push_str(&urlencoding::encode(key));
        self.url.push('=');
        self.url.push_str(&urlencoding::encode(value));
        self
    }

    pub fn param_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn build(self) -> String {
        self.url
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DownloadLinks {
    pub left: String,
    pub right: String,
}

/// Everything the stream page links to, recomputed from the roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RosterLinks {
    /// Parallel to `Roster::cards`; `None` for placeholder cards.
    pub decks: Vec<Option<DownloadLinks>>,
    pub panel: String,
}

fn overlay_url(base: &str, path: &str, link: &str, name: &str, player: &str) -> String {
    UrlBuilder::new(base, path)
        .param("link", link)
        .param("name", name)
        .param("player", player)
        .build()
}

pub(crate) fn deck_download_links(base: &str, card: &DeckCard) -> Option<DownloadLinks> {
    let deck = card.deck.as_ref()?;
    Some(DownloadLinks {
        left: overlay_url(base, "/download/tourney-left", &deck.link, &deck.name, &card.player),
        right: overlay_url(base, "/download/tourney-right", &deck.link, &deck.name, &card.player),
    })
}

/// Full-deck image, used by the admin player table.
pub(crate) fn deck_image_url(base: &str, link: &str, name: &str, player: &str) -> String {
    overlay_url(base, "/download/deck", link, name, player)
}

pub(crate) fn side_panel_url(base: &str, roster: &Roster) -> String {
    let mut url = UrlBuilder::new(base, "/download/streaming/panel");
    for (i, card) in roster.visible().enumerate() {
        let n = i + 1;
        url = url
            .param(&format!("player{n}Name"), &card.player)
            .param(&format!("player{n}Score"), &card.score)
            .param(&format!("player{n}DeckName"), card.deck_name());
    }
    url.param_opt("mainCam", roster.main_cam_visible()).build()
}

pub(crate) fn refresh_links(base: &str, roster: &Roster) -> RosterLinks {
    RosterLinks {
        decks: roster
            .cards
            .iter()
            .map(|c| deck_download_links(base, c))
            .collect(),
        panel: side_panel_url(base, roster),
    }
}

/// Radio id/class for a player's camera selector.
///
/// Only `+` and spaces are replaced; this is not a general encoder.
pub(crate) fn camera_selector_class(player: &str) -> String {
    let safe: String = player
        .chars()
        .map(|c| if c == '+' || c == ' ' { '_' } else { c })
        .collect();
    format!("cam-{safe}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::CardDeck;

    fn card(player: &str, deck: &str, link: &str, score: &str) -> DeckCard {
        DeckCard {
            player: player.to_string(),
            deck: Some(CardDeck {
                name: deck.to_string(),
                link: link.to_string(),
                list: None,
            }),
            score: score.to_string(),
            hidden: false,
        }
    }

    #[test]
    fn builder_joins_base_and_path_once() {
        assert_eq!(UrlBuilder::new("http://h/", "/a").build(), "http://h/a");
        assert_eq!(UrlBuilder::new("", "a").build(), "/a");
    }

    #[test]
    fn builder_encodes_segments_and_params() {
        let url = UrlBuilder::new("http://h", "/user/delete")
            .segment("a b/c")
            .param("q", "x+y #1")
            .build();
        assert_eq!(url, "http://h/user/delete/a%20b%2Fc?q=x%2By%20%231");
    }

    #[test]
    fn download_links_encode_every_value() {
        let c = card("Foo+1234", "Big Deck", "https://eternalwarcry.com/d?x=1#y", "");
        let links = deck_download_links("http://h", &c).expect("card has a deck");
        assert_eq!(
            links.left,
            "http://h/download/tourney-left?link=https%3A%2F%2Feternalwarcry.com%2Fd%3Fx%3D1%23y&name=Big%20Deck&player=Foo%2B1234"
        );
        assert!(links.right.starts_with("http://h/download/tourney-right?link="));
    }

    #[test]
    fn placeholder_card_has_no_download_links() {
        let c = DeckCard {
            player: "P".to_string(),
            deck: None,
            score: String::new(),
            hidden: false,
        };
        assert!(deck_download_links("http://h", &c).is_none());
    }

    #[test]
    fn side_panel_lists_visible_cards_in_order() {
        let roster = Roster {
            cards: vec![card("A", "D1", "l1", "2"), card("B b", "D 2", "l2", "")],
            main_cam: None,
        };
        assert_eq!(
            side_panel_url("http://h", &roster),
            "http://h/download/streaming/panel?player1Name=A&player1Score=2&player1DeckName=D1&player2Name=B%20b&player2Score=&player2DeckName=D%202"
        );
    }

    #[test]
    fn side_panel_renumbers_after_hidden_cards() {
        let mut hidden = card("A", "D1", "l1", "1");
        hidden.hidden = true;
        let roster = Roster {
            cards: vec![hidden, card("B", "D2", "l2", "0")],
            main_cam: None,
        };
        let url = side_panel_url("", &roster);
        assert!(url.contains("player1Name=B"));
        assert!(!url.contains("player2Name"));
    }

    #[test]
    fn main_cam_is_appended_once_for_visible_player() {
        let mut roster = Roster {
            cards: vec![card("A", "D1", "l1", ""), card("B#1", "D2", "l2", "")],
            main_cam: Some("B#1".to_string()),
        };
        let url = side_panel_url("", &roster);
        assert!(url.ends_with("&mainCam=B%231"));
        assert_eq!(url.matches("mainCam").count(), 1);

        roster.toggle_hidden(1);
        assert!(!side_panel_url("", &roster).contains("mainCam"));
    }

    #[test]
    fn camera_class_replaces_plus_and_space_only() {
        assert_eq!(camera_selector_class("Foo Bar+1234"), "cam-Foo_Bar_1234");
        assert_eq!(camera_selector_class("a#b"), "cam-a#b");
    }

    #[test]
    fn refresh_tracks_card_order() {
        let roster = Roster {
            cards: vec![card("A", "D1", "l1", ""), card("B", "D2", "l2", "")],
            main_cam: None,
        };
        let links = refresh_links("", &roster);
        assert_eq!(links.decks.len(), 2);
        assert!(links.decks[1]
            .as_ref()
            .is_some_and(|l| l.left.ends_with("player=B")));
    }
}
