//! Boundary contracts between the engine and its collaborators
//!
//! The engine never calls a renderer, scoreboard or speaker directly. It queues
//! [`GameEvent`]s; the frontend drains them and hands them to
//! [`dispatch_events`], which routes each one to the matching sink.

use crate::scoring::CoinScore;
use crate::snapshot::GameSnapshot;

/// Something observable happened inside the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began (fresh state)
    Started,
    /// At least one coin counter changed
    ScoreChanged,
    /// Rows were removed by one merge
    LinesCleared { rows: u32 },
    GoldStarted { threshold: u32 },
    GoldEnded,
    DogeStarted,
    DogeEnded,
    /// The DOGE counter left zero for the first time this run
    FirstDogeScore,
    PauseChanged(bool),
    GameOver,
}

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    LineClear,
    GoldStarted,
    DogeStarted,
    FirstDogeScore,
    GameOver,
}

pub trait ScoreboardSink {
    fn show_scores(&mut self, scores: &CoinScore);
}

pub trait EventVisualSink {
    fn set_gold_indicator(&mut self, visible: bool);
    fn set_doge_indicator(&mut self, visible: bool);
}

/// Playback failures are the sink's problem; they never reach the engine.
pub trait AudioSink {
    fn set_music_playing(&mut self, playing: bool);
    fn play_cue(&mut self, cue: AudioCue);
}

pub trait RenderSink {
    type Error;

    /// Draw one frame. The snapshot's grid and active piece never overlap.
    fn present(&mut self, snap: &GameSnapshot) -> Result<(), Self::Error>;
}

/// The non-render sinks a frontend wires up
pub struct Sinks<'a> {
    pub scoreboard: &'a mut dyn ScoreboardSink,
    pub visuals: &'a mut dyn EventVisualSink,
    pub audio: &'a mut dyn AudioSink,
}

/// Route drained events to their sinks, in order
pub fn dispatch_events<I>(events: I, scores: &CoinScore, sinks: &mut Sinks<'_>)
where
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        match event {
            GameEvent::Started => {
                sinks.scoreboard.show_scores(scores);
                sinks.visuals.set_gold_indicator(false);
                sinks.visuals.set_doge_indicator(false);
                sinks.audio.set_music_playing(true);
            }
            GameEvent::ScoreChanged => sinks.scoreboard.show_scores(scores),
            GameEvent::LinesCleared { .. } => sinks.audio.play_cue(AudioCue::LineClear),
            GameEvent::GoldStarted { .. } => {
                sinks.visuals.set_gold_indicator(true);
                sinks.audio.play_cue(AudioCue::GoldStarted);
            }
            GameEvent::GoldEnded => sinks.visuals.set_gold_indicator(false),
            GameEvent::DogeStarted => {
                sinks.visuals.set_doge_indicator(true);
                sinks.audio.play_cue(AudioCue::DogeStarted);
            }
            GameEvent::DogeEnded => sinks.visuals.set_doge_indicator(false),
            GameEvent::FirstDogeScore => sinks.audio.play_cue(AudioCue::FirstDogeScore),
            GameEvent::PauseChanged(paused) => sinks.audio.set_music_playing(!paused),
            GameEvent::GameOver => sinks.audio.play_cue(AudioCue::GameOver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoinKind;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u32>,
        gold: Vec<bool>,
        doge: Vec<bool>,
        music: Vec<bool>,
        cues: Vec<AudioCue>,
    }

    impl ScoreboardSink for Recorder {
        fn show_scores(&mut self, scores: &CoinScore) {
            self.scores.push(scores.get(CoinKind::Btc));
        }
    }

    impl EventVisualSink for Recorder {
        fn set_gold_indicator(&mut self, visible: bool) {
            self.gold.push(visible);
        }
        fn set_doge_indicator(&mut self, visible: bool) {
            self.doge.push(visible);
        }
    }

    impl AudioSink for Recorder {
        fn set_music_playing(&mut self, playing: bool) {
            self.music.push(playing);
        }
        fn play_cue(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }
    }

    #[test]
    fn test_indicator_edges_follow_events() {
        let mut board = Recorder::default();
        let mut visuals = Recorder::default();
        let mut audio = Recorder::default();
        let mut scores = CoinScore::new();
        scores.set(CoinKind::Btc, 10);

        let mut sinks = Sinks {
            scoreboard: &mut board,
            visuals: &mut visuals,
            audio: &mut audio,
        };
        dispatch_events(
            [
                GameEvent::ScoreChanged,
                GameEvent::GoldStarted { threshold: 10 },
                GameEvent::GoldEnded,
                GameEvent::DogeStarted,
                GameEvent::DogeEnded,
                GameEvent::PauseChanged(true),
            ],
            &scores,
            &mut sinks,
        );

        assert_eq!(board.scores, vec![10]);
        assert_eq!(visuals.gold, vec![true, false]);
        assert_eq!(visuals.doge, vec![true, false]);
        assert_eq!(audio.music, vec![false]);
        assert_eq!(audio.cues, vec![AudioCue::GoldStarted, AudioCue::DogeStarted]);
    }
}
