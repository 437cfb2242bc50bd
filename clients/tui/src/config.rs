use std::error::Error;
use std::fs;
use std::path::PathBuf;

use blackjack::TableRules;
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "blackjack-tui", about = "Single-player blackjack against a scripted dealer")]
pub struct Cli {
    /// JSON file with table rules; flags below override it
    #[arg(long, env = "BLACKJACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Balance at the start of every session
    #[arg(long, env = "BLACKJACK_STARTING_BALANCE")]
    pub starting_balance: Option<u64>,

    /// Smallest bet the selector offers
    #[arg(long, env = "BLACKJACK_MIN_BET")]
    pub min_bet: Option<u64>,

    /// Bet selector step
    #[arg(long, env = "BLACKJACK_BET_INCREMENT")]
    pub bet_increment: Option<u64>,

    /// Milliseconds between dealer draws
    #[arg(long, env = "BLACKJACK_DEALER_TICK_MS")]
    pub dealer_tick_ms: Option<u64>,

    /// Shuffle seed for a reproducible session
    #[arg(long, env = "BLACKJACK_SEED")]
    pub seed: Option<u64>,

    #[arg(long, env = "BLACKJACK_LOG_LEVEL", default_value = "info")]
    pub log_level: LevelFilter,
}

impl Cli {
    pub fn table_rules(&self) -> Result<TableRules, Box<dyn Error>> {
        let mut rules = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                serde_json::from_str::<TableRules>(&raw)
                    .map_err(|e| format!("Invalid config {}: {e}", path.display()))?
            }
            None => TableRules::default(),
        };

        if let Some(balance) = self.starting_balance {
            rules.starting_balance = balance;
        }
        if let Some(min_bet) = self.min_bet {
            rules.min_bet = min_bet;
        }
        if let Some(increment) = self.bet_increment {
            rules.bet_increment = increment;
        }
        if let Some(ms) = self.dealer_tick_ms {
            rules.dealer_tick_ms = ms;
        }
        if self.seed.is_some() {
            rules.seed = self.seed;
        }

        rules.validate()?;
        Ok(rules)
    }
}
