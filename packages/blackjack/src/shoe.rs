use crate::card::{Card, Rank, Suit};
use crate::error::ShoeError;
use rand::seq::SliceRandom;
use rand::Rng;

pub const SHOE_SIZE: usize = 52;

/// The drawable stack for one reshuffle period. The top of the shoe is the
/// end of the vector.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// One of each rank/suit pair, uniformly shuffled.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(SHOE_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(rng);
        Self { cards }
    }

    /// A shoe that deals `cards` in the given order.
    pub fn stacked(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Empty)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_low(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }
}
