use std::time::Instant;

use blackjack::{Event, GameError, GamePhase, GameState};
use crossterm::event::KeyCode;

use crate::slider::BetSlider;
use crate::tui_logger::LogBuffer;

const MAX_LOG_LINES: usize = 20;

pub struct App {
    pub game: GameState,
    pub slider: BetSlider,
    pub logs: Vec<String>,
    log_buffer: LogBuffer,
    pub log_visible: bool,
    /// Last rejected input, shown until the next accepted one
    pub notice: Option<String>,
    pub should_quit: bool,
}

/// Table event for a key press in `phase`, if the key means anything there.
/// Bet adjustment and app-level keys are handled by [`App::on_key`].
pub fn event_for_key(phase: GamePhase, code: KeyCode, bet: u64) -> Option<Event> {
    match (phase, code) {
        (GamePhase::Betting, KeyCode::Enter) => Some(Event::ConfirmBet(bet)),
        (GamePhase::PlayerTurn, KeyCode::Char('h' | 'H') | KeyCode::Up) => Some(Event::Hit),
        (GamePhase::PlayerTurn, KeyCode::Char('s' | 'S') | KeyCode::Down) => Some(Event::Stand),
        (GamePhase::GameOver, _) => Some(Event::AcknowledgeRoundEnd),
        (GamePhase::GameEnded, KeyCode::Char('r' | 'R')) => Some(Event::RestartSession),
        (GamePhase::GameEnded, KeyCode::Char('q' | 'Q')) => Some(Event::Dismiss),
        _ => None,
    }
}

pub fn event_for_click(phase: GamePhase) -> Option<Event> {
    match phase {
        GamePhase::GameOver => Some(Event::AcknowledgeRoundEnd),
        GamePhase::GameEnded => Some(Event::Dismiss),
        _ => None,
    }
}

impl App {
    pub fn new(game: GameState, log_buffer: LogBuffer) -> App {
        let rules = *game.rules();
        let mut slider = BetSlider::new(rules.min_bet, rules.bet_increment);
        slider.clamp(&game.bet_range());
        App {
            game,
            slider,
            logs: vec![
                "Welcome to the blackjack table!".to_string(),
                format!("Starting balance: ${}", rules.starting_balance),
            ],
            log_buffer,
            log_visible: true,
            notice: None,
            should_quit: false,
        }
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > MAX_LOG_LINES {
            self.logs.remove(0);
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> Result<(), GameError> {
        let phase = self.game.phase();
        let range = self.game.bet_range();

        match code {
            KeyCode::Char('l' | 'L') => {
                self.log_visible = !self.log_visible;
                return Ok(());
            }
            KeyCode::Char('q' | 'Q') if phase != GamePhase::GameEnded => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Left if phase == GamePhase::Betting => {
                self.slider.decrease(&range);
                return Ok(());
            }
            KeyCode::Right if phase == GamePhase::Betting => {
                self.slider.increase(&range);
                return Ok(());
            }
            _ => {}
        }

        match event_for_key(phase, code, self.slider.value()) {
            Some(event) => self.dispatch(event),
            None => Ok(()),
        }
    }

    pub fn on_click(&mut self) -> Result<(), GameError> {
        match event_for_click(self.game.phase()) {
            Some(event) => self.dispatch(event),
            None => Ok(()),
        }
    }

    /// Called after every wake-up of the event loop.
    pub fn on_tick(&mut self, now: Instant) -> Result<(), GameError> {
        self.game.poll_dealer(now)?;
        self.slider.clamp(&self.game.bet_range());
        Ok(())
    }

    fn dispatch(&mut self, event: Event) -> Result<(), GameError> {
        match self.game.handle(event) {
            Ok(_) => {
                self.notice = None;
            }
            Err(GameError::Bet(e)) => {
                self.notice = Some(e.to_string());
                return Ok(());
            }
            Err(e) => return Err(e),
        }

        if event == Event::RestartSession {
            self.slider.reset(self.game.rules().min_bet);
        }
        self.slider.clamp(&self.game.bet_range());
        if self.game.is_closed() {
            self.should_quit = true;
        }
        Ok(())
    }

    pub fn status(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        match self.game.phase() {
            GamePhase::Betting => "Adjust your bet with ←/→ and press Enter".to_string(),
            GamePhase::Dealing => "Dealing...".to_string(),
            GamePhase::PlayerTurn => "[H]it or [S]tand".to_string(),
            GamePhase::DealerTurn | GamePhase::DealerHitting => "Dealer playing...".to_string(),
            GamePhase::GameOver if self.game.balance() == 0 => "Click to continue".to_string(),
            GamePhase::GameOver => "Press any key to play again.".to_string(),
            GamePhase::GameEnded => "Press 'R' to restart or Q to exit.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::{Card, Rank, Shoe, Suit, TableRules};
    use std::sync::{Arc, Mutex};

    fn app_with(rules: TableRules, ranks: &[Rank]) -> App {
        let cards = ranks.iter().map(|r| Card::new(*r, Suit::Diamonds)).collect();
        let game = GameState::new(rules).unwrap().with_shoe(Shoe::stacked(cards));
        App::new(game, Arc::new(Mutex::new(Vec::new())))
    }

    fn rules() -> TableRules {
        TableRules {
            seed: Some(11),
            ..TableRules::default()
        }
    }

    #[test]
    fn test_key_mapping_per_phase() {
        assert_eq!(
            event_for_key(GamePhase::Betting, KeyCode::Enter, 600),
            Some(Event::ConfirmBet(600))
        );
        assert_eq!(event_for_key(GamePhase::Betting, KeyCode::Char('h'), 600), None);
        assert_eq!(event_for_key(GamePhase::PlayerTurn, KeyCode::Up, 0), Some(Event::Hit));
        assert_eq!(
            event_for_key(GamePhase::PlayerTurn, KeyCode::Char('S'), 0),
            Some(Event::Stand)
        );
        assert_eq!(event_for_key(GamePhase::DealerHitting, KeyCode::Char('h'), 0), None);
        assert_eq!(
            event_for_key(GamePhase::GameOver, KeyCode::Char('x'), 0),
            Some(Event::AcknowledgeRoundEnd)
        );
        assert_eq!(
            event_for_key(GamePhase::GameEnded, KeyCode::Char('r'), 0),
            Some(Event::RestartSession)
        );
        assert_eq!(
            event_for_key(GamePhase::GameEnded, KeyCode::Char('q'), 0),
            Some(Event::Dismiss)
        );
    }

    #[test]
    fn test_click_mapping() {
        assert_eq!(event_for_click(GamePhase::GameOver), Some(Event::AcknowledgeRoundEnd));
        assert_eq!(event_for_click(GamePhase::GameEnded), Some(Event::Dismiss));
        assert_eq!(event_for_click(GamePhase::PlayerTurn), None);
    }

    #[test]
    fn test_arrows_then_enter_places_bet() {
        let mut app = app_with(rules(), &[Rank::Two, Rank::Three, Rank::King, Rank::Nine]);
        app.on_key(KeyCode::Right).unwrap();
        app.on_key(KeyCode::Right).unwrap();
        app.on_key(KeyCode::Left).unwrap();
        assert_eq!(app.slider.value(), 600);

        app.on_key(KeyCode::Enter).unwrap();
        assert_eq!(app.game.phase(), GamePhase::PlayerTurn);
        assert_eq!(app.game.bet(), 600);
        assert_eq!(app.status(), "[H]it or [S]tand");
    }

    #[test]
    fn test_rejected_bet_shows_notice() {
        let rules = TableRules {
            starting_balance: 300,
            ..rules()
        };
        let mut app = app_with(rules, &[Rank::Two, Rank::Three, Rank::King, Rank::Nine]);
        // Force an unaffordable amount past the slider.
        app.slider.reset(1_000);
        app.on_key(KeyCode::Enter).unwrap();

        assert_eq!(app.game.phase(), GamePhase::Betting);
        assert_eq!(app.status(), "Insufficient funds: requested 1000, available 300");

        app.on_tick(Instant::now()).unwrap();
        assert_eq!(app.slider.value(), 300);
        app.on_key(KeyCode::Enter).unwrap();
        assert_eq!(app.game.phase(), GamePhase::PlayerTurn);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_bust_then_any_key_returns_to_betting() {
        let mut app = app_with(
            rules(),
            &[Rank::King, Rank::Queen, Rank::Two, Rank::Three, Rank::Jack],
        );
        app.on_key(KeyCode::Enter).unwrap();
        app.on_key(KeyCode::Char('h')).unwrap();
        assert_eq!(app.game.phase(), GamePhase::GameOver);
        assert_eq!(app.game.outcome_text(), Some("Bust! You lose."));

        app.on_key(KeyCode::Char(' ')).unwrap();
        assert_eq!(app.game.phase(), GamePhase::Betting);
    }

    #[test]
    fn test_bankrupt_restart_resets_slider() {
        let rules = TableRules {
            starting_balance: 100,
            ..rules()
        };
        let mut app = app_with(rules, &[Rank::King, Rank::Queen, Rank::Two, Rank::Three, Rank::Jack]);
        app.on_key(KeyCode::Enter).unwrap();
        app.on_key(KeyCode::Char('h')).unwrap();
        assert_eq!(app.status(), "Click to continue");

        app.on_click().unwrap();
        assert_eq!(app.game.phase(), GamePhase::GameEnded);

        app.on_key(KeyCode::Char('r')).unwrap();
        assert_eq!(app.game.phase(), GamePhase::Betting);
        assert_eq!(app.game.balance(), 100);
        assert_eq!(app.slider.value(), 100);
    }

    #[test]
    fn test_quit_from_game_ended_dismisses_session() {
        let rules = TableRules {
            starting_balance: 100,
            ..rules()
        };
        let mut app = app_with(rules, &[Rank::King, Rank::Queen, Rank::Two, Rank::Three, Rank::Jack]);
        app.on_key(KeyCode::Enter).unwrap();
        app.on_key(KeyCode::Char('h')).unwrap();
        app.on_key(KeyCode::Enter).unwrap();

        app.on_key(KeyCode::Char('q')).unwrap();
        assert!(app.game.is_closed());
        assert!(app.should_quit);
    }

    #[test]
    fn test_log_toggle_and_sync() {
        let buffer: LogBuffer = Arc::new(Mutex::new(Vec::new()));
        let game = GameState::new(rules()).unwrap();
        let mut app = App::new(game, buffer.clone());

        buffer.lock().unwrap().push("Dealer draws 5♣ (16)".to_string());
        app.sync_logs();
        assert_eq!(app.logs.last().map(String::as_str), Some("Dealer draws 5♣ (16)"));
        assert!(buffer.lock().unwrap().is_empty());

        app.on_key(KeyCode::Char('l')).unwrap();
        assert!(!app.log_visible);
    }
}
