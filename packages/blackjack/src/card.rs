use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Blackjack points with the ace counted soft (11).
    pub fn points(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            numeric => *numeric as u8,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A playing card. Rank and suit never change; `face_up` is flipped only
/// for the dealer's hole card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    pub face_up: bool,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: true,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn point_value(&self) -> u8 {
        self.rank.points()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    pub fn to_display(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cards_are_worth_their_rank() {
        assert_eq!(Card::new(Rank::Two, Suit::Clubs).point_value(), 2);
        assert_eq!(Card::new(Rank::Seven, Suit::Hearts).point_value(), 7);
        assert_eq!(Card::new(Rank::Ten, Suit::Spades).point_value(), 10);
    }

    #[test]
    fn test_face_cards_are_worth_ten() {
        for rank in [Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(Card::new(rank, Suit::Diamonds).point_value(), 10);
        }
    }

    #[test]
    fn test_ace_is_soft_eleven() {
        let ace = Card::new(Rank::Ace, Suit::Spades);
        assert!(ace.is_ace());
        assert_eq!(ace.point_value(), 11);
        assert!(!Card::new(Rank::King, Suit::Spades).is_ace());
    }

    #[test]
    fn test_new_card_is_face_up() {
        assert!(Card::new(Rank::Four, Suit::Hearts).face_up);
    }

    #[test]
    fn test_to_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_display(), "A♠");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_display(), "10♥");
        assert_eq!(Card::new(Rank::Queen, Suit::Diamonds).to_string(), "Q♦");
    }
}
