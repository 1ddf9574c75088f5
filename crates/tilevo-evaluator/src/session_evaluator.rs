//! Session evaluation: one network, one board, played to the end.
//!
//! [`SessionEvaluator`] holds the settings shared by every session of a run
//! (board configuration, high-score threshold). [`Session`] drives a single
//! game turn by turn and is what [`SessionEvaluator::play_session`] loops over;
//! callers that want to watch a game (the `play` command) step it themselves.

use tilevo_engine::{Board, BoardConfig, BoardSeed, Direction};
use tilevo_network::Network;

use crate::SessionError;

/// Consecutive ineffective turns a session tolerates before it stops.
pub const MOVE_BUDGET: usize = 3;

/// Ranked moves tried per turn before the turn counts as ineffective.
pub const FALLBACK_MOVES: usize = 3;

/// Final score above which the finished board is logged.
pub const DEFAULT_HIGH_SCORE_THRESHOLD: u32 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
    ExhaustedBudget,
}

impl SessionState {
    #[must_use]
    pub fn is_finished(self) -> bool {
        !self.is_playing()
    }
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Board score when the session ended; this is the fitness.
    pub score: u32,
    pub turns: usize,
    pub state: SessionState,
    pub max_tile: u32,
    /// Ineffective turns that were still allowed when the session ended.
    pub moves_left: usize,
    /// Times the win value was reached (each one resets the board).
    pub wins: usize,
}

/// What happened during one [`Session::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Directions shifted this turn, in the order they were tried.
    pub attempts: Vec<Direction>,
    /// Whether the score changed.
    pub effective: bool,
    pub score: u32,
}

/// A single game in progress.
#[derive(Debug)]
pub struct Session<'a> {
    network: &'a mut Network,
    board: &'a mut Board,
    budget: usize,
    turns: usize,
    wins_at_start: usize,
    state: SessionState,
}

impl<'a> Session<'a> {
    /// Resets and re-populates `board`, then prepares the first turn.
    pub fn start(network: &'a mut Network, board: &'a mut Board) -> Self {
        board.reset();
        board.rebuild();
        let wins_at_start = board.wins();
        Self {
            network,
            board,
            budget: MOVE_BUDGET,
            turns: 0,
            wins_at_start,
            state: SessionState::Playing,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    #[must_use]
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Ineffective turns left before the session gives up.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Plays one turn.
    ///
    /// Returns `None` once the session has finished.
    pub fn step(&mut self) -> Result<Option<TurnReport>, SessionError> {
        if self.state.is_finished() {
            return Ok(None);
        }
        if let Some(state) = self.terminal_state() {
            self.state = state;
            return Ok(None);
        }

        self.network.scan_input(self.board)?;
        self.network.feed_forward();

        let before = self.board.score();
        let mut attempts = Vec::with_capacity(FALLBACK_MOVES);
        for &index in self.network.ranked_moves().iter().take(FALLBACK_MOVES) {
            let direction = Direction::try_from(index)?;
            self.board.shift(direction);
            attempts.push(direction);
            if self.board.score() != before {
                break;
            }
        }

        let effective = self.board.score() != before;
        self.budget -= 1;
        if effective {
            self.budget = MOVE_BUDGET;
        }
        self.turns += 1;
        if let Some(state) = self.terminal_state() {
            self.state = state;
        }

        Ok(Some(TurnReport {
            attempts,
            effective,
            score: self.board.score(),
        }))
    }

    fn terminal_state(&self) -> Option<SessionState> {
        if self.board.is_game_over() {
            Some(SessionState::GameOver)
        } else if self.budget == 0 {
            Some(SessionState::ExhaustedBudget)
        } else {
            None
        }
    }

    /// Summarizes the session; the session should be finished.
    #[must_use]
    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            score: self.board.score(),
            turns: self.turns,
            state: self.state,
            max_tile: self.board.max_tile(),
            moves_left: self.budget,
            wins: self.board.wins() - self.wins_at_start,
        }
    }
}

/// Plays sessions for fitness evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvaluator {
    board_config: BoardConfig,
    high_score_threshold: u32,
}

impl Default for SessionEvaluator {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl SessionEvaluator {
    #[must_use]
    pub fn new(board_config: BoardConfig) -> Self {
        Self {
            board_config,
            high_score_threshold: DEFAULT_HIGH_SCORE_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_high_score_threshold(self, high_score_threshold: u32) -> Self {
        Self {
            high_score_threshold,
            ..self
        }
    }

    #[must_use]
    pub fn board_config(&self) -> &BoardConfig {
        &self.board_config
    }

    #[must_use]
    pub fn high_score_threshold(&self) -> u32 {
        self.high_score_threshold
    }

    /// Plays `network` on `board` until the session ends.
    ///
    /// The board is reset and re-populated first, so any previous state is
    /// discarded.
    pub fn play_session(
        &self,
        network: &mut Network,
        board: &mut Board,
    ) -> Result<SessionOutcome, SessionError> {
        let mut session = Session::start(network, board);
        while session.step()?.is_some() {}

        let outcome = session.outcome();
        if outcome.score > self.high_score_threshold {
            tracing::info!(
                score = outcome.score,
                turns = outcome.turns,
                "high score\n{}",
                session.board()
            );
        }
        Ok(outcome)
    }

    /// Builds a board from this evaluator's configuration and plays on it.
    pub fn play_seeded(
        &self,
        network: &mut Network,
        seed: BoardSeed,
    ) -> Result<SessionOutcome, SessionError> {
        let mut board = Board::new(self.board_config, seed)?;
        self.play_session(network, &mut board)
    }
}
