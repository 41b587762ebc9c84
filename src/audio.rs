//! Fire-and-forget sound cues. Each cue runs on a detached sink so cues may
//! overlap and retrigger freely; a machine without an audio device just
//! plays silently.

use std::time::Duration;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};

pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Audio {
    pub fn new() -> Option<Self> {
        let (stream, handle) = OutputStream::try_default().ok()?;
        Some(Self {
            _stream: stream,
            handle,
        })
    }

    /// Short ascending blip, played once per obstacle cleared.
    pub fn play_score(&self) {
        self.play_tones(&[(520.0, 90), (680.0, 120)], 0.10);
    }

    /// Descending end-of-session cue.
    pub fn play_die(&self) {
        self.play_tones(&[(330.0, 120), (220.0, 140), (140.0, 220)], 0.12);
    }

    fn play_tones(&self, notes: &[(f32, u64)], amplitude: f32) {
        let Ok(sink) = Sink::try_new(&self.handle) else {
            return;
        };
        for &(freq, ms) in notes {
            let tone = SineWave::new(freq)
                .take_duration(Duration::from_millis(ms))
                .amplify(amplitude);
            sink.append(tone);
        }
        sink.detach();
    }
}
