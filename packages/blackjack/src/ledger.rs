use crate::error::BetError;
use serde::{Deserialize, Serialize};

/// The player's bankroll and the wager riding on the current round.
///
/// The stake leaves `balance` when the bet is placed, so a loss needs no
/// further bookkeeping and a payout only ever credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balance: u64,
    bet: u64,
}

impl Ledger {
    pub fn new(balance: u64) -> Self {
        Self { balance, bet: 0 }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn place_bet(&mut self, amount: u64) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if amount > self.balance {
            return Err(BetError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        self.bet = amount;
        Ok(())
    }

    /// Credit `bet * multiple`. Returns the amount credited.
    pub fn payout(&mut self, multiple: u64) -> u64 {
        let amount = self.bet.saturating_mul(multiple);
        self.balance = self.balance.saturating_add(amount);
        amount
    }

    pub fn reset_bet(&mut self) {
        self.bet = 0;
    }

    pub fn set_balance(&mut self, amount: u64) {
        self.balance = amount;
    }
}
