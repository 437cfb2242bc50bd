use std::ops::RangeInclusive;
use std::time::Instant;

use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameResult, RulesError, ShoeError};
use crate::outcome::RoundResult;
use crate::rules::{TableRules, DEALER_STANDS_ON};
use crate::timer::DealerTimer;
use crate::view::{CardView, TableView};
use crate::{Hand, Ledger, Shoe};

/// Index of the dealer's hole card
const HOLE_CARD: usize = 1;

/// Cards drawn by the opening deal
const INITIAL_DEAL: usize = 4;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Betting,
    Dealing,
    PlayerTurn,
    DealerTurn,
    DealerHitting,
    GameOver,
    GameEnded,
}

/// Input accepted by the table. Anything sent in the wrong phase is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ConfirmBet(u64),
    Hit,
    Stand,
    DealerTick,
    AcknowledgeRoundEnd,
    RestartSession,
    Dismiss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Ignored,
    Applied(GamePhase),
}

/// Single-player table: owns the shoe, both hands and the player's ledger,
/// and advances them through one round at a time.
#[derive(Debug, Clone)]
pub struct GameState {
    rules: TableRules,
    phase: GamePhase,
    shoe: Shoe,
    player: Hand,
    dealer: Hand,
    ledger: Ledger,
    rng: ChaCha8Rng,
    timer: DealerTimer,
    player_busted: bool,
    dealer_busted: bool,
    outcome_processed: bool,
    result: Option<RoundResult>,
    rounds_since_shuffle: u32,
    reshuffled: bool,
    closed: bool,
}

impl GameState {
    pub fn new(rules: TableRules) -> Result<Self, RulesError> {
        rules.validate()?;

        let mut rng = match rules.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let shoe = Shoe::new(&mut rng);

        Ok(Self {
            rules,
            phase: GamePhase::Betting,
            shoe,
            player: Hand::new(),
            dealer: Hand::new(),
            ledger: Ledger::new(rules.starting_balance),
            rng,
            timer: DealerTimer::new(rules.dealer_tick()),
            player_busted: false,
            dealer_busted: false,
            outcome_processed: false,
            result: None,
            rounds_since_shuffle: 0,
            reshuffled: false,
            closed: false,
        })
    }

    /// Replace the current shoe, e.g. with a stacked one for replays.
    pub fn with_shoe(mut self, shoe: Shoe) -> Self {
        self.shoe = shoe;
        self
    }

    pub fn handle(&mut self, event: Event) -> GameResult<Step> {
        if self.closed {
            debug!("Session closed, ignoring {event:?}");
            return Ok(Step::Ignored);
        }

        match (self.phase, event) {
            (GamePhase::Betting, Event::ConfirmBet(amount)) => self.confirm_bet(amount)?,
            (GamePhase::PlayerTurn, Event::Hit) => self.player_hit()?,
            (GamePhase::PlayerTurn, Event::Stand) => self.player_stand(),
            (GamePhase::DealerHitting, Event::DealerTick) => self.dealer_tick()?,
            (GamePhase::GameOver, Event::AcknowledgeRoundEnd) => self.finish_round(),
            (GamePhase::GameEnded, Event::RestartSession) => self.restart_session(),
            (GamePhase::GameEnded, Event::Dismiss) => {
                info!("Session dismissed");
                self.closed = true;
            }
            (phase, event) => {
                debug!("Ignoring {event:?} during {phase:?}");
                return Ok(Step::Ignored);
            }
        }

        self.run_automatic()?;
        Ok(Step::Applied(self.phase))
    }

    /// Deliver a dealer tick if the timer is due.
    pub fn poll_dealer(&mut self, now: Instant) -> GameResult<Step> {
        if self.timer.poll(now) {
            self.handle(Event::DealerTick)
        } else {
            Ok(Step::Ignored)
        }
    }

    /// Record the round result and pay it out. Safe to call repeatedly:
    /// only the first call in GAME_OVER touches the ledger.
    pub fn settle(&mut self) -> Option<RoundResult> {
        if self.phase != GamePhase::GameOver {
            return None;
        }
        if !self.outcome_processed {
            let mut result = RoundResult::resolve(
                &self.player,
                &self.dealer,
                self.player_busted,
                self.dealer_busted,
            );
            result.payout = self.ledger.payout(result.outcome.payout_multiple());
            info!("{}", result.summary(self.ledger.balance()));
            self.result = Some(result);
            self.outcome_processed = true;
        }
        self.result
    }

    fn run_automatic(&mut self) -> GameResult<()> {
        loop {
            match self.phase {
                GamePhase::Dealing => self.deal_initial()?,
                GamePhase::DealerTurn => self.reveal_and_arm(),
                _ => return Ok(()),
            }
        }
    }

    fn confirm_bet(&mut self, amount: u64) -> GameResult<()> {
        // No stake is taken unless the whole opening deal can be drawn.
        if self.shoe.remaining() < INITIAL_DEAL {
            warn!("Only {} cards left, cannot deal", self.shoe.remaining());
            return Err(ShoeError::Empty.into());
        }
        if let Err(e) = self.ledger.place_bet(amount) {
            warn!("Bet of {amount} rejected: {e}");
            return Err(e.into());
        }
        info!("Bet {amount}, balance {}", self.ledger.balance());
        self.reshuffled = false;
        self.phase = GamePhase::Dealing;
        Ok(())
    }

    fn deal_initial(&mut self) -> GameResult<()> {
        self.player.add_card(self.shoe.draw()?);
        self.player.add_card(self.shoe.draw()?);
        self.dealer.add_card(self.shoe.draw()?);
        let mut hole = self.shoe.draw()?;
        hole.face_up = false;
        self.dealer.add_card(hole);

        self.player_busted = false;
        self.dealer_busted = false;
        self.outcome_processed = false;
        info!(
            "Dealt {} {} ({}), dealer shows {}",
            self.player.cards()[0],
            self.player.cards()[1],
            self.player.total(),
            self.dealer.cards()[0]
        );
        self.phase = GamePhase::PlayerTurn;
        Ok(())
    }

    fn player_hit(&mut self) -> GameResult<()> {
        let card = self.shoe.draw()?;
        self.player.add_card(card);
        let total = self.player.total();
        info!("Player hits: {card} ({total})");

        if self.player.is_bust() {
            info!("Player busts with {total}");
            self.player_busted = true;
            self.enter_game_over();
        }
        Ok(())
    }

    fn player_stand(&mut self) {
        info!("Player stands on {}", self.player.total());
        self.phase = GamePhase::DealerTurn;
    }

    fn reveal_and_arm(&mut self) {
        self.dealer.set_face_up(HOLE_CARD, true);
        info!("Dealer reveals {}", self.dealer.cards()[HOLE_CARD]);
        self.timer.arm(Instant::now());
        debug!("Dealer timer armed, every {:?}", self.timer.interval());
        self.phase = GamePhase::DealerHitting;
    }

    fn dealer_tick(&mut self) -> GameResult<()> {
        if self.dealer.total() < DEALER_STANDS_ON {
            let card = self.shoe.draw()?;
            self.dealer.add_card(card);
            info!("Dealer draws {card} ({})", self.dealer.total());
            return Ok(());
        }

        if self.dealer.is_bust() {
            info!("Dealer busts with {}", self.dealer.total());
            self.dealer_busted = true;
        } else {
            info!("Dealer stands on {}", self.dealer.total());
        }
        self.enter_game_over();
        Ok(())
    }

    fn enter_game_over(&mut self) {
        self.disarm_timer();
        self.phase = GamePhase::GameOver;
        self.outcome_processed = false;
        self.settle();
    }

    fn finish_round(&mut self) {
        self.player.reset();
        self.dealer.reset();
        self.disarm_timer();

        self.rounds_since_shuffle += 1;
        if self.shoe.is_low(self.rules.reshuffle_below)
            || self.rounds_since_shuffle >= self.rules.rounds_per_shoe
        {
            info!(
                "Shuffling new shoe ({} cards left after {} rounds)",
                self.shoe.remaining(),
                self.rounds_since_shuffle
            );
            self.shoe = Shoe::new(&mut self.rng);
            self.rounds_since_shuffle = 0;
            self.reshuffled = true;
        }

        self.player_busted = false;
        self.dealer_busted = false;
        self.outcome_processed = false;
        self.result = None;
        self.ledger.reset_bet();

        if self.ledger.balance() < 1 {
            info!("Out of money, session over");
            self.phase = GamePhase::GameEnded;
        } else {
            self.phase = GamePhase::Betting;
        }
    }

    fn restart_session(&mut self) {
        info!("New session with balance {}", self.rules.starting_balance);
        self.ledger.set_balance(self.rules.starting_balance);
        self.ledger.reset_bet();
        self.player.reset();
        self.dealer.reset();
        self.disarm_timer();
        self.shoe = Shoe::new(&mut self.rng);
        self.rounds_since_shuffle = 0;
        self.reshuffled = true;
        self.player_busted = false;
        self.dealer_busted = false;
        self.outcome_processed = false;
        self.result = None;
        self.phase = GamePhase::Betting;
    }

    fn disarm_timer(&mut self) {
        if self.timer.is_armed() {
            debug!("Dealer timer disarmed");
        }
        self.timer.disarm();
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn player_total(&self) -> u8 {
        self.player.total()
    }

    /// None while the hole card is face-down.
    pub fn dealer_total(&self) -> Option<u8> {
        if self.dealer.is_empty() {
            return None;
        }
        self.dealer.visible_total()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn bet(&self) -> u64 {
        self.ledger.bet()
    }

    pub fn result(&self) -> Option<&RoundResult> {
        match self.phase {
            GamePhase::GameOver => self.result.as_ref(),
            _ => None,
        }
    }

    pub fn outcome_text(&self) -> Option<&'static str> {
        self.result().map(RoundResult::message)
    }

    pub fn shoe_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    pub fn rounds_since_shuffle(&self) -> u32 {
        self.rounds_since_shuffle
    }

    /// True from the reset that replaced the shoe until the next bet.
    pub fn reshuffled(&self) -> bool {
        self.reshuffled
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn dealer_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn dealer_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Bets the selector may offer: from the table minimum (or the whole
    /// balance when it is smaller) up to the balance.
    pub fn bet_range(&self) -> RangeInclusive<u64> {
        let balance = self.ledger.balance();
        let low = self.rules.min_bet.min(balance).max(1);
        low..=balance
    }

    pub fn view(&self) -> TableView {
        let range = self.bet_range();
        TableView {
            phase: self.phase,
            player_cards: self.player.cards().iter().map(CardView::from).collect(),
            dealer_cards: self.dealer.cards().iter().map(CardView::from).collect(),
            player_total: (!self.player.is_empty()).then(|| self.player.total()),
            dealer_total: self.dealer_total(),
            balance: self.ledger.balance(),
            bet: self.ledger.bet(),
            outcome: self.result().map(|r| r.outcome),
            outcome_text: self.outcome_text().map(str::to_string),
            shoe_remaining: self.shoe.remaining(),
            reshuffled: self.reshuffled,
            rounds_since_shuffle: self.rounds_since_shuffle,
            min_bet: *range.start(),
            max_bet: *range.end(),
        }
    }
}
