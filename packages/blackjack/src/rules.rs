use crate::error::RulesError;
use crate::shoe::SHOE_SIZE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dealer stands on any 17, soft or hard. Not configurable.
pub const DEALER_STANDS_ON: u8 = 17;

/// Lowest accepted reshuffle threshold. Every round starts with at least this
/// many cards in the shoe.
pub const MIN_RESHUFFLE_BELOW: usize = 15;

/// Session parameters for a single-player table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    /// Balance at session start and after a restart
    pub starting_balance: u64,

    /// Floor of the bet selector
    pub min_bet: u64,

    /// Step of the bet selector
    pub bet_increment: u64,

    /// Replace the shoe at round end when fewer cards remain
    pub reshuffle_below: usize,

    /// Replace the shoe after this many completed rounds
    pub rounds_per_shoe: u32,

    /// Milliseconds between dealer draws
    pub dealer_tick_ms: u64,

    /// Fixed shuffle seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_balance: 10_000,
            min_bet: 100,
            bet_increment: 500,
            reshuffle_below: 15,
            rounds_per_shoe: 10,
            dealer_tick_ms: 1000,
            seed: None,
        }
    }
}

impl TableRules {
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.starting_balance == 0 {
            return Err(RulesError::ZeroStartingBalance);
        }
        if self.min_bet == 0 {
            return Err(RulesError::ZeroMinimumBet);
        }
        if self.bet_increment == 0 {
            return Err(RulesError::ZeroBetIncrement);
        }
        if self.dealer_tick_ms == 0 {
            return Err(RulesError::ZeroDealerTick);
        }
        if !(MIN_RESHUFFLE_BELOW..=SHOE_SIZE).contains(&self.reshuffle_below) {
            return Err(RulesError::ReshuffleThreshold(self.reshuffle_below));
        }
        if self.rounds_per_shoe == 0 {
            return Err(RulesError::ZeroRoundsPerShoe);
        }
        Ok(())
    }

    pub fn dealer_tick(&self) -> Duration {
        Duration::from_millis(self.dealer_tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let rules = TableRules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.starting_balance, 10_000);
        assert_eq!(rules.dealer_tick(), Duration::from_secs(1));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let rules = TableRules {
            min_bet: 0,
            ..TableRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroMinimumBet));

        let rules = TableRules {
            dealer_tick_ms: 0,
            ..TableRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroDealerTick));
    }

    #[test]
    fn test_validate_rejects_oversized_threshold() {
        let rules = TableRules {
            reshuffle_below: 53,
            ..TableRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ReshuffleThreshold(53)));
    }

    #[test]
    fn test_validate_rejects_threshold_too_small_for_a_round() {
        let rules = TableRules {
            reshuffle_below: 0,
            rounds_per_shoe: 1000,
            ..TableRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ReshuffleThreshold(0)));

        let rules = TableRules {
            reshuffle_below: MIN_RESHUFFLE_BELOW - 1,
            ..TableRules::default()
        };
        assert!(rules.validate().is_err());

        let rules = TableRules {
            reshuffle_below: MIN_RESHUFFLE_BELOW,
            ..TableRules::default()
        };
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_rounds_per_shoe() {
        let rules = TableRules {
            rounds_per_shoe: 0,
            ..TableRules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroRoundsPerShoe));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let rules: TableRules = serde_json::from_str(r#"{"min_bet": 25, "seed": 9}"#).unwrap();
        assert_eq!(rules.min_bet, 25);
        assert_eq!(rules.seed, Some(9));
        assert_eq!(rules.bet_increment, 500);
        assert_eq!(rules.rounds_per_shoe, 10);
    }
}
