//! Game state module - the loop controller
//!
//! Owns the board, the active piece, the event state machine, scores and
//! particles, and orchestrates them: gravity on accumulated time, player
//! actions, merge/clear/score on landing, next-piece generation and game-over
//! detection.
//!
//! Observable changes are queued as [`GameEvent`]s and drained by the frontend.

use log::{debug, info};

use crate::board::{Board, ClearedRows};
use crate::config::GameConfig;
use crate::event_state::EventState;
use crate::generator;
use crate::movement::{collides, try_rotate};
use crate::particles::{Particle, ParticleField};
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::{apply_delta, score_cleared_rows, CoinScore};
use crate::sink::GameEvent;
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, CoinKind, EventMode, GameAction, LoopState, SpecialTag};

/// Events kept when the frontend stops draining; oldest are dropped first
const MAX_PENDING_EVENTS: usize = 64;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Piece>,
    events: EventState,
    score: CoinScore,
    particles: ParticleField,
    /// Drives piece generation only
    rng: SimpleRng,
    /// Drives particle motion so cosmetics never shift the piece sequence
    fx_rng: SimpleRng,
    loop_state: LoopState,
    drop_timer_ms: u32,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn)
    piece_id: u32,
    lines: u32,
    doge_scored: bool,
    outbox: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u32, config: GameConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            events: EventState::new(),
            score: CoinScore::new(),
            particles: ParticleField::new(),
            rng: SimpleRng::new(seed),
            fx_rng: SimpleRng::new(seed.rotate_left(16) ^ 0x9E37_79B9),
            loop_state: LoopState::Inactive,
            drop_timer_ms: 0,
            episode_id: 0,
            piece_id: 0,
            lines: 0,
            doge_scored: false,
            outbox: Vec::with_capacity(16),
        }
    }

    /// Leave the start screen and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.loop_state != LoopState::Inactive {
            return false;
        }
        self.loop_state = LoopState::Running;
        self.emit(GameEvent::Started);
        info!(
            "game started (episode {}, seed {}, pipeline {})",
            self.episode_id,
            self.rng.seed(),
            self.config.pipeline.as_str()
        );
        self.spawn_piece();
        true
    }

    /// Tear everything down and start a fresh run.
    ///
    /// From the start screen the current seed is kept; after a run has
    /// begun a new seed is drawn.
    pub fn restart(&mut self) {
        let seed = if self.loop_state == LoopState::Inactive {
            self.rng.seed()
        } else {
            self.rng.next_u32()
        };
        let next_episode = self.episode_id.wrapping_add(1);
        let config = std::mem::take(&mut self.config);
        *self = Self::with_config(seed, config);
        self.episode_id = next_episode;
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn started(&self) -> bool {
        self.loop_state != LoopState::Inactive
    }

    pub fn paused(&self) -> bool {
        self.loop_state == LoopState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.loop_state == LoopState::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn seed(&self) -> u32 {
        self.rng.seed()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn mode(&self) -> EventMode {
        self.events.mode()
    }

    pub fn events(&self) -> &EventState {
        &self.events
    }

    pub fn score(&self) -> &CoinScore {
        &self.score
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scenario setup
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Direct score access for scenario setup
    pub fn score_mut(&mut self) -> &mut CoinScore {
        &mut self.score
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.outbox
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Move queued events into `out`, keeping the outbox allocation
    pub fn drain_events_into(&mut self, out: &mut Vec<GameEvent>) {
        out.extend(self.outbox.drain(..));
    }

    fn emit(&mut self, event: GameEvent) {
        if self.outbox.len() >= MAX_PENDING_EVENTS {
            debug!("event outbox full, dropping {:?}", self.outbox[0]);
            self.outbox.remove(0);
        }
        self.outbox.push(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.grid);

        out.active = self.active;
        out.mode = self.events.mode();
        out.gold_blocks_dropped = self.events.gold_blocks_dropped();
        out.special_blocks_dropped = self.events.special_blocks_dropped();
        out.doge_blocks_remaining = self.events.doge_blocks_remaining();
        out.scores = self.score;
        out.loop_state = self.loop_state;
        out.episode_id = self.episode_id;
        out.seed = self.rng.seed();
        out.piece_id = self.piece_id;
        out.lines = self.lines;
        out.particles.clear();
        out.particles.extend_from_slice(self.particles.as_slice());
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Generate the next piece and place it at its spawn position.
    ///
    /// A piece that collides where it spawns ends the game.
    pub fn spawn_piece(&mut self) -> bool {
        let generated = generator::next_piece(&mut self.rng, &mut self.events, &self.config);
        for edge in generated.edges {
            self.emit(edge);
        }

        let piece = generated.piece;
        if collides(&piece, &self.board, 0, 0) {
            self.active = None;
            self.loop_state = LoopState::GameOver;
            self.emit(GameEvent::GameOver);
            info!(
                "game over after {} pieces, {} lines (episode {})",
                self.piece_id, self.lines, self.episode_id
            );
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if collides(&active, &self.board, dx, dy) {
            return false;
        }
        self.active = Some(active.shifted(dx, dy));
        true
    }

    /// Try to rotate the active piece clockwise with wall kicks
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, &self.board) {
            Some((rotated, _kick)) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// One gravity step: fall a row, or land and lock
    pub fn gravity_step(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_piece();
        true
    }

    /// Merge the active piece, then clear, score, advance events and spawn
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let mode = self.events.mode();

        self.board.merge(&piece);
        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            self.on_rows_cleared(&cleared, mode);
        }

        if mode == EventMode::DogeEvent && self.events.finish_doge_block() {
            self.emit(GameEvent::DogeEnded);
        }

        let trigger_score = self.score.get(self.config.trigger_coin);
        if let Some(threshold) = self
            .events
            .check_gold_trigger(trigger_score, &self.config.thresholds)
        {
            self.emit(GameEvent::GoldStarted { threshold });
        }

        self.spawn_piece();
    }

    fn on_rows_cleared(&mut self, cleared: &ClearedRows, mode: EventMode) {
        let rows = cleared.len() as u32;
        self.lines += rows;
        debug!(
            "cleared {} row(s) at {:?} in {} mode",
            rows,
            cleared.iter().map(|c| c.row).collect::<Vec<_>>(),
            mode.as_str()
        );

        for row in cleared {
            for (col, &cell) in row.cells.iter().enumerate() {
                let tag = match cell {
                    Cell::Special(_) if self.config.special_particles_as_gold => {
                        Cell::Special(SpecialTag::Gold)
                    }
                    other => other,
                };
                self.particles.emit(
                    col,
                    row.row,
                    tag,
                    self.config.particles_per_cell,
                    &mut self.fx_rng,
                );
            }
        }
        self.emit(GameEvent::LinesCleared { rows });

        let delta = score_cleared_rows(cleared, mode);
        if apply_delta(&mut self.score, &delta) {
            self.emit(GameEvent::ScoreChanged);
            if !self.doge_scored && delta.get(CoinKind::Doge) > 0 {
                self.doge_scored = true;
                self.emit(GameEvent::FirstDogeScore);
            }
        }
    }

    /// Main game tick - advance particles and run gravity on accumulated time.
    ///
    /// Returns true when a gravity step happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.loop_state != LoopState::Running {
            return false;
        }

        self.particles.step();

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.config.drop_interval_ms {
            self.drop_timer_ms = 0;
            return self.gravity_step();
        }

        false
    }

    /// Apply a player action
    ///
    /// Movement is ignored unless the loop is running. During the Doge event
    /// rotation is ignored and soft drop only moves down; gravity does the merge.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(),
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            _ if self.loop_state != LoopState::Running => false,
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                if self.events.mode() == EventMode::DogeEvent {
                    self.try_move(0, 1)
                } else {
                    self.gravity_step()
                }
            }
            GameAction::Rotate => {
                if self.events.mode() == EventMode::DogeEvent {
                    false
                } else {
                    self.try_rotate()
                }
            }
        }
    }

    fn toggle_pause(&mut self) -> bool {
        let paused = match self.loop_state {
            LoopState::Running => true,
            LoopState::Paused => false,
            LoopState::Inactive | LoopState::GameOver => return false,
        };
        self.loop_state = if paused {
            LoopState::Paused
        } else {
            LoopState::Running
        };
        self.emit(GameEvent::PauseChanged(paused));
        true
    }

    /// Check if the active piece can move in the given direction
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(ref piece) => !collides(piece, &self.board, dx, dy),
            None => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LetterShape;

    const BTC: Cell = Cell::Coin(CoinKind::Btc);

    fn started(seed: u32, config: GameConfig) -> GameState {
        let mut game = GameState::with_config(seed, config);
        game.start();
        game.drain_events();
        game
    }

    /// Run gravity until the current piece locks
    fn lock_active(game: &mut GameState) {
        let id = game.piece_id();
        for _ in 0..40 {
            game.gravity_step();
            if game.piece_id() != id || game.game_over() {
                return;
            }
        }
        panic!("piece never locked");
    }

    /// Config whose Gold event is empty, so the first trigger goes straight to Doge
    fn instant_doge(blocks: u32) -> GameConfig {
        GameConfig {
            thresholds: vec![1],
            gold_standard_draws: 0,
            letter_shapes: vec![],
            doge_blocks: blocks,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_new_game_state() {
        let game = GameState::new(12345);
        assert_eq!(game.loop_state(), LoopState::Inactive);
        assert!(game.active().is_none());
        assert!(game.score().is_zero());
        assert_eq!(game.mode(), EventMode::Normal);
        assert_eq!(game.board().filled_count(), 0);
        assert_eq!(game.seed(), 12345);
    }

    #[test]
    fn test_game_start() {
        let mut game = GameState::new(12345);
        assert!(game.start());
        assert_eq!(game.loop_state(), LoopState::Running);
        assert!(game.active().is_some());
        assert_eq!(game.piece_id(), 1);
        assert_eq!(game.pending_events(), &[GameEvent::Started]);

        // second start is a no-op
        assert!(!game.start());
        assert_eq!(game.piece_id(), 1);
    }

    #[test]
    fn test_actions_ignored_before_start() {
        let mut game = GameState::new(1);
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::Rotate));
        assert!(!game.apply_action(GameAction::Pause));
        assert!(!game.tick(1000));
        assert!(game.active().is_none());
    }

    #[test]
    fn test_tick_gravity_needs_more_than_interval() {
        let mut game = started(7, GameConfig::default());
        let y = game.active().unwrap().y;

        assert!(!game.tick(500));
        assert_eq!(game.active().unwrap().y, y);
        assert!(game.tick(16));
        assert_eq!(game.active().unwrap().y, y + 1);
        assert_eq!(game.drop_timer_ms(), 0);
    }

    #[test]
    fn test_pause_freezes_gravity_and_input() {
        let mut game = started(7, GameConfig::default());
        let before = game.active();

        assert!(game.apply_action(GameAction::Pause));
        assert!(game.paused());
        assert!(!game.tick(5000));
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::SoftDrop));
        assert_eq!(game.active(), before);

        assert!(game.apply_action(GameAction::Pause));
        assert_eq!(game.loop_state(), LoopState::Running);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::PauseChanged(true), GameEvent::PauseChanged(false)]
        );
    }

    #[test]
    fn test_try_move_blocked_by_wall() {
        let mut game = started(3, GameConfig::default());
        while game.try_move(-1, 0) {}
        let piece = game.active().unwrap();
        let leftmost = piece.cells().map(|(x, _, _)| x).min().unwrap();
        assert_eq!(leftmost, 0);

        assert!(!game.apply_action(GameAction::MoveLeft));
        assert_eq!(game.active(), Some(piece));
    }

    #[test]
    fn test_active_never_overlaps_board() {
        let mut game = started(99, GameConfig::default());
        for step in 0..3000u32 {
            let action = match step % 5 {
                0 => GameAction::MoveLeft,
                1 => GameAction::Rotate,
                2 => GameAction::MoveRight,
                3 => GameAction::SoftDrop,
                _ => GameAction::Rotate,
            };
            game.apply_action(action);
            game.tick(16);
            if let Some(piece) = game.active() {
                assert!(!collides(&piece, game.board(), 0, 0));
            }
            if game.game_over() {
                break;
            }
        }
    }

    #[test]
    fn test_lock_piece_clears_and_scores() {
        let mut game = started(11, GameConfig::default());
        game.board_mut().fill_row(19, [BTC; 10]);
        lock_active(&mut game);

        assert_eq!(game.lines(), 1);
        assert_eq!(game.score().get(CoinKind::Btc), 10);
        assert!(game.particles().len() >= 100);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::LinesCleared { rows: 1 }));
        assert!(events.contains(&GameEvent::ScoreChanged));
        assert!(events.contains(&GameEvent::GoldStarted { threshold: 10 }));
        assert_eq!(game.mode(), EventMode::Gold);
    }

    #[test]
    fn test_gold_clears_do_not_score() {
        let mut game = started(11, GameConfig::default());
        game.score_mut().set(CoinKind::Btc, 10);
        lock_active(&mut game);
        assert_eq!(game.mode(), EventMode::Gold);
        game.drain_events();

        game.board_mut().clear();
        game.board_mut().fill_row(19, [Cell::Coin(CoinKind::Eth); 10]);
        lock_active(&mut game);

        assert_eq!(game.lines(), 1);
        assert_eq!(game.score().get(CoinKind::Eth), 0);
        assert!(!game.drain_events().contains(&GameEvent::ScoreChanged));
    }

    #[test]
    fn test_gold_pieces_until_sequence_exhausts() {
        let mut game = started(21, GameConfig::default());
        game.score_mut().set(CoinKind::Btc, 10);
        lock_active(&mut game);
        assert_eq!(game.mode(), EventMode::Gold);

        for _ in 0..10 {
            let piece = game.active().unwrap();
            assert!(piece.all_labels(|c| c == Cell::Special(SpecialTag::Gold)));
            game.board_mut().clear();
            lock_active(&mut game);
        }
        for letter in [LetterShape::F, LetterShape::U, LetterShape::N] {
            let piece = game.active().unwrap();
            assert!(piece.all_labels(|c| c == Cell::Special(letter.tag())));
            game.board_mut().clear();
            lock_active(&mut game);
        }

        assert_eq!(game.mode(), EventMode::DogeEvent);
        let events = game.drain_events();
        assert!(events.ends_with(&[GameEvent::GoldEnded, GameEvent::DogeStarted]));
    }

    #[test]
    fn test_doge_event_controls_and_countdown() {
        let mut game = started(5, instant_doge(2));
        game.score_mut().set(CoinKind::Btc, 1);
        lock_active(&mut game);

        assert_eq!(game.mode(), EventMode::DogeEvent);
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::GoldStarted { threshold: 1 },
                GameEvent::GoldEnded,
                GameEvent::DogeStarted
            ]
        );
        let block = game.active().unwrap();
        assert_eq!((block.x, block.y), (4, 0));
        assert!(!game.apply_action(GameAction::Rotate));

        // soft drop never merges a Doge block
        game.board_mut().clear();
        let id = game.piece_id();
        while game.apply_action(GameAction::SoftDrop) {}
        assert_eq!(game.active().unwrap().y, 19);
        assert_eq!(game.piece_id(), id);

        assert!(game.gravity_step());
        assert_eq!(game.board().get(4, 19), Some(Cell::Coin(CoinKind::Doge)));
        assert_eq!(game.events().doge_blocks_remaining(), 1);

        lock_active(&mut game);
        assert_eq!(game.mode(), EventMode::Normal);
        assert!(game.drain_events().contains(&GameEvent::DogeEnded));
        assert_eq!(game.active().unwrap().cell_count(), 4);
    }

    #[test]
    fn test_first_doge_score_fires_once() {
        let mut game = started(5, instant_doge(3));
        game.score_mut().set(CoinKind::Btc, 1);
        lock_active(&mut game);
        game.board_mut().clear();
        game.drain_events();

        for _ in 0..2 {
            let mut row = [BTC; 10];
            row[4] = Cell::Empty;
            game.board_mut().fill_row(19, row);
            lock_active(&mut game);
        }

        assert_eq!(game.score().get(CoinKind::Doge), 2);
        let firsts = game
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::FirstDogeScore)
            .count();
        assert_eq!(firsts, 1);
    }

    #[test]
    fn test_game_over_on_spawn_collision() {
        let mut game = started(8, GameConfig::default());
        let mut row = [BTC; 10];
        row[0] = Cell::Empty;
        game.board_mut().fill_row(0, row);
        game.board_mut().fill_row(1, row);

        assert!(!game.spawn_piece());
        assert!(game.game_over());
        assert!(game.active().is_none());
        assert_eq!(game.pending_events().last(), Some(&GameEvent::GameOver));

        assert!(!game.tick(1000));
        assert!(!game.apply_action(GameAction::MoveRight));
        assert!(!game.apply_action(GameAction::Pause));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = started(8, GameConfig::gold_only());
        game.board_mut().fill_row(19, [BTC; 10]);
        lock_active(&mut game);
        assert!(!game.score().is_zero());

        assert!(game.apply_action(GameAction::Restart));
        assert_eq!(game.episode_id(), 1);
        assert_eq!(game.loop_state(), LoopState::Running);
        assert!(game.score().is_zero());
        assert_eq!(game.mode(), EventMode::Normal);
        assert_eq!(game.lines(), 0);
        assert!(game.particles().is_empty());
        assert!(game.events().consumed_thresholds().is_empty());
        assert_eq!(game.config().pipeline, crate::types::EventPipeline::GoldOnly);
        assert_eq!(game.pending_events(), &[GameEvent::Started]);
    }

    #[test]
    fn test_restart_from_start_screen_keeps_seed() {
        let mut game = GameState::new(42);
        let mut fresh = GameState::new(42);
        fresh.start();

        assert!(game.apply_action(GameAction::Restart));
        assert_eq!(game.seed(), 42);
        assert_eq!(game.loop_state(), LoopState::Running);
        assert_eq!(game.active(), fresh.active());

        // Once running, a restart moves on to a new seed
        game.restart();
        assert_ne!(game.seed(), 42);
    }

    #[test]
    fn test_particles_freeze_while_paused() {
        let mut game = started(8, GameConfig::default());
        game.board_mut().fill_row(19, [BTC; 10]);
        lock_active(&mut game);
        let before = game.particles().to_vec();

        game.apply_action(GameAction::Pause);
        game.tick(16);
        assert_eq!(game.particles(), before.as_slice());

        game.apply_action(GameAction::Pause);
        game.tick(16);
        assert_ne!(game.particles(), before.as_slice());
    }

    #[test]
    fn test_special_particles_as_gold() {
        let config = GameConfig {
            special_particles_as_gold: true,
            ..GameConfig::default()
        };
        let mut game = started(8, config);
        game.board_mut()
            .fill_row(19, [Cell::Special(SpecialTag::F); 10]);
        lock_active(&mut game);

        assert!(!game.particles().is_empty());
        assert!(game
            .particles()
            .iter()
            .all(|p| p.tag == Cell::Special(SpecialTag::Gold)));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = started(8, GameConfig::default());
        game.score_mut().set(CoinKind::Sol, 4);
        let snap = game.snapshot();

        assert_eq!(snap.active, game.active());
        assert_eq!(snap.scores.get(CoinKind::Sol), 4);
        assert_eq!(snap.loop_state, LoopState::Running);
        assert_eq!(snap.piece_id, 1);
        assert!(snap.playable());
    }

    #[test]
    fn test_outbox_is_bounded() {
        let mut game = started(8, GameConfig::default());
        for _ in 0..(MAX_PENDING_EVENTS * 2) {
            game.apply_action(GameAction::Pause);
        }
        assert_eq!(game.pending_events().len(), MAX_PENDING_EVENTS);
    }
}
