use crate::card::Card;
use serde::{Deserialize, Serialize};

pub const BLACKJACK: u8 = 21;

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Card]) -> u8 {
    let mut total: u16 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += u16::from(card.point_value());
    }

    // Adjust for aces
    while total > u16::from(BLACKJACK) && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    u8::try_from(total).unwrap_or(u8::MAX)
}

/// Check if a hand is soft (has an ace still counted as 11)
pub fn is_soft_hand(cards: &[Card]) -> bool {
    let hard: u16 = cards
        .iter()
        .map(|c| if c.is_ace() { 1 } else { u16::from(c.point_value()) })
        .sum();
    cards.iter().any(|c| c.is_ace()) && hard + 10 == u16::from(calculate_hand_value(cards))
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Card]) -> bool {
    calculate_hand_value(cards) > BLACKJACK
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn total(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn all_face_up(&self) -> bool {
        self.cards.iter().all(|c| c.face_up)
    }

    /// Total for display; withheld while any card is face-down.
    pub fn visible_total(&self) -> Option<u8> {
        self.all_face_up().then(|| self.total())
    }

    /// Flip the card at `index`. Returns false when there is no such card.
    pub fn set_face_up(&mut self, index: usize, face_up: bool) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.face_up = face_up;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }
}
