//! Terminal Coinfall runner (default binary).
//!
//! Polls crossterm input between frames, ticks the engine with real elapsed
//! time, routes engine events to the HUD and audio sinks, and presents one
//! snapshot per frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use log::info;

use tui_coinfall::audio::SilentAudio;
use tui_coinfall::cli::{parse_args, RunConfig, USAGE};
use tui_coinfall::core::{dispatch_events, AudioSink, GameSnapshot, GameState, RenderSink, Sinks};
use tui_coinfall::input::{handle_key_event, is_actionable, should_quit};
use tui_coinfall::logging;
use tui_coinfall::term::TerminalRenderer;
use tui_coinfall::types::TICK_MS;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(run_config) = parse_args(&args)? else {
        print!("{}", USAGE);
        return Ok(());
    };
    logging::init(run_config.log_file.as_deref())?;

    let mut audio = open_audio();
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, audio.as_mut(), run_config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

#[cfg(feature = "audio")]
fn open_audio() -> Box<dyn AudioSink> {
    match tui_coinfall::audio::RodioAudio::new() {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            log::warn!("audio disabled: {:#}", e);
            Box::new(SilentAudio::new())
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_audio() -> Box<dyn AudioSink> {
    Box::new(SilentAudio::new())
}

fn run(term: &mut TerminalRenderer, audio: &mut dyn AudioSink, run_config: RunConfig) -> Result<()> {
    info!("seed {}", run_config.seed);
    let mut game = GameState::with_config(run_config.seed, run_config.game);
    let mut snap = GameSnapshot::default();
    let mut events = Vec::with_capacity(16);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Route engine events to the HUD and audio.
        game.drain_events_into(&mut events);
        if !events.is_empty() {
            let hud = term.hud_mut();
            let mut sinks = Sinks {
                scoreboard: &mut hud.scoreboard,
                visuals: &mut hud.banners,
                audio: &mut *audio,
            };
            dispatch_events(events.drain(..), game.score(), &mut sinks);
        }

        // Render.
        game.snapshot_into(&mut snap);
        term.present(&snap)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_actionable(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(w, h) => term.resize(w, h),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
