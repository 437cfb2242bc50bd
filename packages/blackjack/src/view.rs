//! Read-only snapshot of the table for a rendering layer.
//!
//! The dealer's hole card is masked here, so a renderer working only from a
//! [`TableView`] cannot show an unrevealed card or total.

use crate::card::{Card, Rank, Suit};
use crate::game_state::GamePhase;
use crate::outcome::HandOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardView {
    FaceDown,
    FaceUp { rank: Rank, suit: Suit },
}

impl CardView {
    pub fn label(&self) -> String {
        match self {
            CardView::FaceDown => "??".to_string(),
            CardView::FaceUp { rank, suit } => format!("{}{}", rank.label(), suit.symbol()),
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            CardView::FaceDown => None,
            CardView::FaceUp { suit, .. } => Some(*suit),
        }
    }
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        if card.face_up {
            CardView::FaceUp {
                rank: card.rank(),
                suit: card.suit(),
            }
        } else {
            CardView::FaceDown
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub phase: GamePhase,
    pub player_cards: Vec<CardView>,
    pub dealer_cards: Vec<CardView>,
    pub player_total: Option<u8>,
    pub dealer_total: Option<u8>,
    pub balance: u64,
    pub bet: u64,
    pub outcome: Option<HandOutcome>,
    pub outcome_text: Option<String>,
    pub shoe_remaining: usize,
    pub reshuffled: bool,
    pub rounds_since_shuffle: u32,
    pub min_bet: u64,
    pub max_bet: u64,
}
