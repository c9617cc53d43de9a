//! Integration tests - full engine scenarios driven through player actions

use tui_coinfall::core::{collides, GameConfig, GameEvent, GameState};
use tui_coinfall::types::{Cell, CoinKind, EventMode, GameAction, LoopState, SpecialTag};

fn started(seed: u32, config: GameConfig) -> GameState {
    let mut game = GameState::with_config(seed, config);
    assert!(game.apply_action(GameAction::Start));
    game
}

/// Soft-drop until the active piece locks (or the game ends)
fn drop_and_lock(game: &mut GameState) {
    let id = game.piece_id();
    for _ in 0..40 {
        game.apply_action(GameAction::SoftDrop);
        if game.piece_id() != id || game.game_over() {
            return;
        }
    }
    panic!("piece never locked");
}

fn is_gold_label(cell: Cell) -> bool {
    matches!(cell, Cell::Special(_))
}

#[test]
fn test_scenario_piece_lands_on_floor() {
    let mut game = started(12345, GameConfig::default());
    assert!(game.board().filled_count() == 0);
    assert!(game.score().is_zero());

    while game.can_move(0, 1) {
        assert!(game.apply_action(GameAction::SoftDrop));
    }
    let piece = game.active().expect("piece in play");
    let bottom = piece.cells().map(|(_, y, _)| y).max().unwrap();
    assert_eq!(bottom, 19);
    let cells = piece.cell_count();

    // The next drop locks it in place
    drop_and_lock(&mut game);
    assert_eq!(game.board().filled_count(), cells);
    assert!((0..10).any(|x| game.board().is_occupied(x, 19)));
}

#[test]
fn test_scenario_full_row_scores_per_coin() {
    let mut game = started(42, GameConfig::default());
    let row = [
        Cell::Coin(CoinKind::Btc),
        Cell::Coin(CoinKind::Btc),
        Cell::Coin(CoinKind::Eth),
        Cell::Coin(CoinKind::Eth),
        Cell::Coin(CoinKind::Eth),
        Cell::Coin(CoinKind::Doge),
        Cell::Coin(CoinKind::Sol),
        Cell::Coin(CoinKind::Sol),
        Cell::Coin(CoinKind::Sol),
        Cell::Coin(CoinKind::Xrp),
    ];
    game.board_mut().fill_row(19, row);
    let piece_cells = game.active().unwrap().cell_count();

    drop_and_lock(&mut game);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score().get(CoinKind::Btc), 2);
    assert_eq!(game.score().get(CoinKind::Eth), 3);
    assert_eq!(game.score().get(CoinKind::Doge), 1);
    assert_eq!(game.score().get(CoinKind::Sol), 3);
    assert_eq!(game.score().get(CoinKind::Xrp), 1);

    // Row 19 is gone; only the landed piece remains and the top row is empty
    assert_eq!(game.board().filled_count(), piece_cells);
    assert!((0..10).all(|x| !game.board().is_occupied(x, 0)));

    let events = game.drain_events();
    assert!(events.contains(&GameEvent::LinesCleared { rows: 1 }));
    assert!(events.contains(&GameEvent::ScoreChanged));
    assert!(events.contains(&GameEvent::FirstDogeScore));
}

#[test]
fn test_scenario_gold_triggers_once_and_relabels_pieces() {
    let config = GameConfig::default();
    let threshold = config.thresholds[0];
    let letters = config.letter_shapes.len();
    let draws = config.gold_standard_draws as usize;

    let mut game = started(7, config);
    game.score_mut().set(CoinKind::Btc, threshold - 1);
    game.board_mut().fill_row(19, [Cell::Coin(CoinKind::Btc); 10]);
    drop_and_lock(&mut game);

    assert_eq!(game.mode(), EventMode::Gold);
    let golds = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GoldStarted { .. }))
        .count();
    assert_eq!(golds, 1);

    for n in 0..draws + letters {
        let piece = game.active().expect("piece in play");
        assert!(
            piece.all_labels(is_gold_label),
            "gold piece {} carried a coin label",
            n
        );
        if n < draws {
            assert!(piece.all_labels(|c| c == Cell::Special(SpecialTag::Gold)));
        }
        game.board_mut().clear();
        drop_and_lock(&mut game);
        if n + 1 < draws + letters {
            assert_eq!(game.mode(), EventMode::Gold);
        }
    }

    assert_eq!(game.mode(), EventMode::DogeEvent);
    assert!(game.events().is_consumed(threshold));
    // No second trigger for the same threshold
    let golds = game
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GoldStarted { .. }))
        .count();
    assert_eq!(golds, 0);
}

#[test]
fn test_scenario_move_left_at_wall_is_noop() {
    let mut game = started(3, GameConfig::default());
    while game.apply_action(GameAction::MoveLeft) {}

    let piece = game.active().unwrap();
    let leftmost = piece.cells().map(|(x, _, _)| x).min().unwrap();
    assert_eq!(leftmost, 0);

    assert!(!game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.active(), Some(piece));
}

#[test]
fn test_active_piece_never_overlaps_committed_cells() {
    let mut game = started(99, GameConfig::default());
    let actions = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::SoftDrop,
        GameAction::MoveRight,
        GameAction::MoveRight,
        GameAction::Rotate,
        GameAction::SoftDrop,
    ];

    for step in 0..2_000 {
        if game.game_over() {
            break;
        }
        game.apply_action(actions[step % actions.len()]);
        game.tick(17);
        if let Some(piece) = game.active() {
            assert!(!collides(&piece, game.board(), 0, 0), "overlap at step {}", step);
        }
    }
}

#[test]
fn test_thresholds_are_consumed_monotonically() {
    let config = GameConfig {
        thresholds: vec![5, 15],
        gold_standard_draws: 0,
        letter_shapes: vec![],
        doge_blocks: 0,
        ..GameConfig::default()
    };
    let mut game = started(11, config);
    let mut consumed = 0;

    for _ in 0..4 {
        game.board_mut().clear();
        game.board_mut().fill_row(19, [Cell::Coin(CoinKind::Btc); 10]);
        drop_and_lock(&mut game);

        let now = game.events().consumed_thresholds().len();
        assert!(now >= consumed);
        consumed = now;
    }

    assert_eq!(game.events().consumed_thresholds(), &[5, 15]);
}

#[test]
fn test_consumed_threshold_ignores_dip_and_recross() {
    let config = GameConfig {
        thresholds: vec![10],
        gold_standard_draws: 0,
        letter_shapes: vec![],
        doge_blocks: 0,
        ..GameConfig::default()
    };
    let mut game = started(13, config);
    game.board_mut().fill_row(19, [Cell::Coin(CoinKind::Btc); 10]);
    drop_and_lock(&mut game);

    // With nothing staged, Gold ends on the spawn right after it fires
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::GoldStarted { threshold: 10 }));
    assert!(events.contains(&GameEvent::GoldEnded));
    assert_eq!(game.mode(), EventMode::Normal);
    assert_eq!(game.events().consumed_thresholds(), &[10]);

    game.score_mut().set(CoinKind::Btc, 3);
    game.board_mut().clear();
    game.board_mut().fill_row(19, [Cell::Coin(CoinKind::Btc); 10]);
    drop_and_lock(&mut game);

    assert_eq!(game.score().get(CoinKind::Btc), 13);
    assert_eq!(game.mode(), EventMode::Normal);
    assert_eq!(game.events().consumed_thresholds(), &[10]);
    assert!(!game
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GoldStarted { .. })));
}

#[test]
fn test_pause_resume_round_trip() {
    let mut game = started(5, GameConfig::default());
    let piece = game.active();

    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.loop_state(), LoopState::Paused);
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.tick(10_000));
    assert_eq!(game.active(), piece);

    assert!(game.apply_action(GameAction::Pause));
    assert_eq!(game.loop_state(), LoopState::Running);
    assert_eq!(
        game.drain_events(),
        vec![
            GameEvent::Started,
            GameEvent::PauseChanged(true),
            GameEvent::PauseChanged(false)
        ]
    );
}

#[test]
fn test_same_seed_replays_same_pieces() {
    let mut a = started(2024, GameConfig::default());
    let mut b = started(2024, GameConfig::default());

    for _ in 0..20 {
        assert_eq!(a.active(), b.active());
        a.board_mut().clear();
        b.board_mut().clear();
        drop_and_lock(&mut a);
        drop_and_lock(&mut b);
    }
}
