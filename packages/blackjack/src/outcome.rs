use crate::hand::Hand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    Win,
    Loss,
    Push,
}

impl HandOutcome {
    /// Multiple of the bet credited back to the player.
    pub fn payout_multiple(&self) -> u64 {
        match self {
            HandOutcome::Win => 2,
            HandOutcome::Push => 1,
            HandOutcome::Loss => 0,
        }
    }
}

/// Settlement of one round, recorded once when the round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: HandOutcome,
    pub player_total: u8,
    /// None when the round ended with the hole card still face-down
    pub dealer_total: Option<u8>,
    pub player_busted: bool,
    pub dealer_busted: bool,
    pub payout: u64,
}

impl RoundResult {
    /// Decide the round. A player bust loses before the dealer's hand is
    /// looked at; otherwise a dealer bust wins, then totals are compared.
    pub fn resolve(player: &Hand, dealer: &Hand, player_busted: bool, dealer_busted: bool) -> Self {
        let player_total = player.total();
        let outcome = if player_busted {
            HandOutcome::Loss
        } else if dealer_busted {
            HandOutcome::Win
        } else if player_total > dealer.total() {
            HandOutcome::Win
        } else if player_total == dealer.total() {
            HandOutcome::Push
        } else {
            HandOutcome::Loss
        };

        Self {
            outcome,
            player_total,
            dealer_total: dealer.visible_total(),
            player_busted,
            dealer_busted,
            payout: 0,
        }
    }

    /// One-line settlement for the game log. Leaves out a dealer total that
    /// was never revealed.
    pub fn summary(&self, balance: u64) -> String {
        match self.dealer_total {
            Some(dealer) => format!(
                "{} Player {} vs dealer {}, paid {}, balance {}",
                self.message(),
                self.player_total,
                dealer,
                self.payout,
                balance
            ),
            None => format!(
                "{} Player {}, paid {}, balance {}",
                self.message(),
                self.player_total,
                self.payout,
                balance
            ),
        }
    }

    pub fn message(&self) -> &'static str {
        match self.outcome {
            HandOutcome::Loss if self.player_busted => "Bust! You lose.",
            HandOutcome::Win if self.dealer_busted => "Dealer busts! You win!",
            HandOutcome::Win => "You win!",
            HandOutcome::Push => "Push! It's a tie.",
            HandOutcome::Loss => "You lose.",
        }
    }
}
