use crate::models::{DeckSeed, Opponent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CardDeck {
    pub name: String,
    pub link: String,
    pub list: Option<String>,
}

/// Identifies a deck across roster swaps; card positions do not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct DeckKey {
    pub player: String,
    pub link: String,
}

/// One player panel on the stream page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DeckCard {
    pub player: String,

    /// `None` renders the "Deck cannot be parsed" placeholder.
    pub deck: Option<CardDeck>,

    pub score: String,
    pub hidden: bool,
}

impl DeckCard {
    pub fn deck_name(&self) -> &str {
        self.deck.as_ref().map(|d| d.name.as_str()).unwrap_or_default()
    }

    /// `None` for placeholder cards, which have nothing to rename.
    pub fn deck_key(&self) -> Option<DeckKey> {
        self.deck.as_ref().map(|d| DeckKey {
            player: self.player.clone(),
            link: d.link.clone(),
        })
    }
}

impl From<DeckSeed> for DeckCard {
    fn from(seed: DeckSeed) -> Self {
        Self {
            player: seed.player,
            deck: Some(CardDeck {
                name: seed.deck_name,
                link: seed.link,
                list: seed.list,
            }),
            score: String::new(),
            hidden: false,
        }
    }
}

impl From<Opponent> for DeckCard {
    fn from(op: Opponent) -> Self {
        Self {
            player: op.name,
            deck: op.deck.map(|d| CardDeck {
                name: d.name,
                link: d.url,
                list: d.list,
            }),
            score: String::new(),
            hidden: false,
        }
    }
}

/// The stream page view-model. Links and markup are derived from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Roster {
    pub cards: Vec<DeckCard>,

    /// Player whose camera is the main one (radio group).
    pub main_cam: Option<String>,
}

impl Roster {
    pub fn from_seeds(seeds: Vec<DeckSeed>) -> Self {
        Self {
            cards: seeds.into_iter().map(DeckCard::from).collect(),
            main_cam: None,
        }
    }

    /// Swap the whole card list, e.g. after an opponent lookup.
    ///
    /// The camera selection survives only if its player is still present.
    pub fn replace_cards(&mut self, cards: Vec<DeckCard>) {
        self.cards = cards;
        if let Some(cam) = &self.main_cam {
            if !self.cards.iter().any(|c| &c.player == cam) {
                self.main_cam = None;
            }
        }
    }

    pub fn replace_with_opponents(&mut self, opponents: Vec<Opponent>) {
        self.replace_cards(opponents.into_iter().map(DeckCard::from).collect());
    }

    pub fn visible(&self) -> impl Iterator<Item = &DeckCard> {
        self.cards.iter().filter(|c| !c.hidden)
    }

    pub fn set_score(&mut self, index: usize, score: String) {
        if let Some(card) = self.cards.get_mut(index) {
            card.score = score;
        }
    }

    pub fn contains_deck(&self, key: &DeckKey) -> bool {
        self.cards.iter().any(|c| c.deck_key().as_ref() == Some(key))
    }

    /// Returns the `(link, name)` pair to cache server-side. `None` when the
    /// deck is no longer on the roster.
    pub fn set_deck_name(&mut self, key: &DeckKey, name: String) -> Option<(String, String)> {
        let deck = self
            .cards
            .iter_mut()
            .filter(|c| c.player == key.player)
            .filter_map(|c| c.deck.as_mut())
            .find(|d| d.link == key.link)?;
        deck.name = name;
        Some((deck.link.clone(), deck.name.clone()))
    }

    pub fn toggle_hidden(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.hidden = !card.hidden;
        }
    }

    pub fn select_main_cam(&mut self, player: Option<String>) {
        self.main_cam = player;
    }

    /// Main camera player, only if that card is currently visible.
    pub fn main_cam_visible(&self) -> Option<&str> {
        let cam = self.main_cam.as_deref()?;
        self.visible().any(|c| c.player == cam).then_some(cam)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParsedDeck;

    fn opponent(name: &str, link: &str, deck: &str) -> Opponent {
        Opponent {
            name: name.to_string(),
            deck: Some(ParsedDeck {
                url: link.to_string(),
                name: deck.to_string(),
                list: None,
            }),
        }
    }

    #[test]
    fn rename_follows_the_deck_not_the_position() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(vec![
            opponent("A+0001", "https://x/a", "Deck A"),
            opponent("B+0002", "https://x/b", "Deck B"),
        ]);
        let key = roster.cards[1].deck_key().expect("card has a deck");

        roster.replace_with_opponents(vec![
            opponent("B+0002", "https://x/b", "Deck B"),
            opponent("C+0003", "https://x/c", "Deck C"),
        ]);

        assert_eq!(
            roster.set_deck_name(&key, "Renamed B".to_string()),
            Some(("https://x/b".to_string(), "Renamed B".to_string()))
        );
        assert_eq!(roster.cards[0].deck_name(), "Renamed B");
        assert_eq!(roster.cards[1].deck_name(), "Deck C");
    }

    #[test]
    fn rename_of_a_swapped_out_deck_is_dropped() {
        let mut roster = Roster::default();
        roster.replace_with_opponents(vec![opponent("A+0001", "https://x/a", "Deck A")]);
        let key = roster.cards[0].deck_key().expect("card has a deck");

        roster.replace_with_opponents(vec![opponent("B+0002", "https://x/b", "Deck B")]);

        assert!(!roster.contains_deck(&key));
        assert!(roster.set_deck_name(&key, "Renamed A".to_string()).is_none());
        assert_eq!(roster.cards[0].deck_name(), "Deck B");
    }

    #[test]
    fn placeholder_cards_have_no_key() {
        let card = DeckCard::from(Opponent {
            name: "P+0001".to_string(),
            deck: None,
        });
        assert!(card.deck_key().is_none());
    }
}
