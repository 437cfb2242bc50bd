mod card;
mod error;
mod game_state;
mod hand;
mod ledger;
mod outcome;
mod rules;
mod shoe;
mod timer;
mod view;

pub use card::{Card, Rank, Suit};
pub use error::{BetError, GameError, GameResult, RulesError, ShoeError};
pub use game_state::{Event, GamePhase, GameState, Step};
pub use hand::{calculate_hand_value, is_busted, is_soft_hand, Hand, BLACKJACK};
pub use ledger::Ledger;
pub use outcome::{HandOutcome, RoundResult};
pub use rules::{TableRules, DEALER_STANDS_ON, MIN_RESHUFFLE_BELOW};
pub use shoe::{Shoe, SHOE_SIZE};
pub use timer::DealerTimer;
pub use view::{CardView, TableView};
