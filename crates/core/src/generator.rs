//! Piece generator - what spawns next, per event mode
//!
//! - **Normal**: uniform standard shape; 20% of pieces carry one random coin on
//!   every cell, the rest draw a coin per cell.
//! - **Gold**: `gold_standard_draws` gold-labelled standard shapes, then one of
//!   each configured letter shape, then the pipeline decides what follows.
//! - **DogeEvent**: a 1x1 DOGE block at the configured column.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::event_state::EventState;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::shapes::{letter_shape, single_cell_shape, standard_shape};
use crate::sink::GameEvent;
use crate::types::{Cell, CoinKind, EventMode, EventPipeline, ShapeKind, SpecialTag};

/// A freshly generated piece plus the mode edges crossed to produce it
#[derive(Debug, Clone)]
pub struct Generated {
    pub piece: Piece,
    pub edges: ArrayVec<GameEvent, 2>,
}

impl Generated {
    fn plain(piece: Piece) -> Self {
        Self {
            piece,
            edges: ArrayVec::new(),
        }
    }
}

/// Draw the next piece, advancing the event state's drop counters.
pub fn next_piece(rng: &mut SimpleRng, events: &mut EventState, config: &GameConfig) -> Generated {
    match events.mode() {
        EventMode::Normal => Generated::plain(normal_piece(rng, config)),
        EventMode::DogeEvent => Generated::plain(doge_block(config)),
        EventMode::Gold => gold_piece(rng, events, config),
    }
}

fn random_shape(rng: &mut SimpleRng) -> ShapeKind {
    rng.pick(&ShapeKind::ALL).unwrap_or(ShapeKind::I)
}

fn random_coin(rng: &mut SimpleRng) -> CoinKind {
    rng.pick(&CoinKind::ALL).unwrap_or(CoinKind::Btc)
}

/// Standard shape with coin labels
pub fn normal_piece(rng: &mut SimpleRng, config: &GameConfig) -> Piece {
    let shape = standard_shape(random_shape(rng));
    let piece = if rng.chance_percent(config.mono_piece_percent) {
        let coin = Cell::Coin(random_coin(rng));
        Piece::from_rows(shape, || coin)
    } else {
        Piece::from_rows(shape, || Cell::Coin(random_coin(rng)))
    };
    piece.centered(0)
}

/// The single-cell Doge event block
pub fn doge_block(config: &GameConfig) -> Piece {
    Piece::from_rows(single_cell_shape(), || Cell::Coin(CoinKind::Doge)).at(config.doge_spawn_x, 0)
}

fn gold_piece(rng: &mut SimpleRng, events: &mut EventState, config: &GameConfig) -> Generated {
    if events.gold_blocks_dropped() < config.gold_standard_draws {
        events.record_gold_block();
        let shape = standard_shape(random_shape(rng));
        let piece = Piece::from_rows(shape, || Cell::Special(SpecialTag::Gold));
        return Generated::plain(piece.centered(0));
    }

    let next_letter = config
        .letter_shapes
        .get(events.special_blocks_dropped() as usize)
        .copied();
    if let Some(letter) = next_letter {
        events.record_special_block();
        let tag = Cell::Special(letter.tag());
        let piece = Piece::from_rows(letter_shape(letter), || tag);
        return Generated::plain(piece.centered(0));
    }

    // Staged sequence exhausted.
    let mut edges = ArrayVec::new();
    edges.push(GameEvent::GoldEnded);

    if config.pipeline == EventPipeline::GoldThenDoge && config.doge_blocks > 0 {
        events.start_doge(config.doge_blocks);
        edges.push(GameEvent::DogeStarted);
        return Generated {
            piece: doge_block(config),
            edges,
        };
    }

    events.end_gold();
    Generated {
        piece: normal_piece(rng, config),
        edges,
    }
}
