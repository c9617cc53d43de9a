//! Audio sinks.
//!
//! [`SilentAudio`] only logs what it would play. With the `audio` feature,
//! [`RodioAudio`] plays a procedural background loop and short sine cues on the
//! default output device. Playback problems are logged and never reach the game.

use log::debug;

use crate::core::{AudioCue, AudioSink};

/// Logs cues instead of playing them
#[derive(Debug, Default)]
pub struct SilentAudio {
    music_playing: bool,
    cues_played: u32,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn cues_played(&self) -> u32 {
        self.cues_played
    }
}

impl AudioSink for SilentAudio {
    fn set_music_playing(&mut self, playing: bool) {
        self.music_playing = playing;
        debug!("music {}", if playing { "on" } else { "off" });
    }

    fn play_cue(&mut self, cue: AudioCue) {
        self.cues_played = self.cues_played.wrapping_add(1);
        debug!("cue {:?}", cue);
    }
}

/// Cue tone: (frequency Hz, duration ms)
pub fn cue_tone(cue: AudioCue) -> (f32, u64) {
    match cue {
        AudioCue::LineClear => (660.0, 80),
        AudioCue::GoldStarted => (880.0, 300),
        AudioCue::DogeStarted => (523.25, 300),
        AudioCue::FirstDogeScore => (987.77, 200),
        AudioCue::GameOver => (110.0, 600),
    }
}

#[cfg(feature = "audio")]
pub use rodio_sink::RodioAudio;

#[cfg(feature = "audio")]
mod rodio_sink {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::warn;
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::cue_tone;
    use crate::core::{AudioCue, AudioSink};

    const MUSIC_VOLUME: f32 = 0.25;
    const CUE_VOLUME: f32 = 0.35;

    /// A short procedural arpeggio that loops forever
    #[derive(Debug, Clone)]
    struct BgMusic {
        sample_rate: u32,
        frame: u64,
    }

    impl BgMusic {
        fn new() -> Self {
            Self {
                sample_rate: 44_100,
                frame: 0,
            }
        }
    }

    impl Iterator for BgMusic {
        type Item = f32;

        fn next(&mut self) -> Option<f32> {
            const NOTES_HZ: [f32; 8] = [
                261.63, 329.63, 392.0, 523.25, 392.0, 329.63, 293.66, 349.23,
            ];

            let note_len = self.sample_rate as u64 / 5;
            let note = NOTES_HZ[((self.frame / note_len) % NOTES_HZ.len() as u64) as usize];
            let pos = self.frame % note_len;
            let t = pos as f32 / self.sample_rate as f32;

            // 10ms attack and release avoid clicks between notes
            let edge = self.sample_rate as u64 / 100;
            let env = if pos < edge {
                pos as f32 / edge as f32
            } else if pos > note_len - edge {
                (note_len - pos) as f32 / edge as f32
            } else {
                1.0
            };

            self.frame = self.frame.wrapping_add(1);
            Some((2.0 * std::f32::consts::PI * note * t).sin() * 0.2 * env)
        }
    }

    impl Source for BgMusic {
        fn current_frame_len(&self) -> Option<usize> {
            None
        }

        fn channels(&self) -> u16 {
            1
        }

        fn sample_rate(&self) -> u32 {
            self.sample_rate
        }

        fn total_duration(&self) -> Option<Duration> {
            None
        }
    }

    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Option<Sink>,
    }

    impl RodioAudio {
        pub fn new() -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().context("open default audio output")?;
            let music = match Sink::try_new(&handle) {
                Ok(sink) => {
                    sink.set_volume(MUSIC_VOLUME);
                    sink.append(BgMusic::new());
                    sink.pause();
                    Some(sink)
                }
                Err(e) => {
                    warn!("background music unavailable: {}", e);
                    None
                }
            };
            Ok(Self {
                _stream: stream,
                handle,
                music,
            })
        }
    }

    impl AudioSink for RodioAudio {
        fn set_music_playing(&mut self, playing: bool) {
            let Some(sink) = self.music.as_ref() else {
                return;
            };
            if playing {
                sink.play();
            } else {
                sink.pause();
            }
        }

        fn play_cue(&mut self, cue: AudioCue) {
            let sink = match Sink::try_new(&self.handle) {
                Ok(sink) => sink,
                Err(e) => {
                    warn!("cue {:?} not played: {}", cue, e);
                    return;
                }
            };
            let (freq, ms) = cue_tone(cue);
            sink.set_volume(CUE_VOLUME);
            sink.append(
                SineWave::new(freq)
                    .take_duration(Duration::from_millis(ms))
                    .fade_in(Duration::from_millis(5)),
            );
            sink.detach();
        }
    }
}
