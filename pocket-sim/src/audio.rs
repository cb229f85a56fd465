//! Cue synthesis and sample mixing

/// Expected audio sample rate
pub const SAMPLE_RATE: u32 = 44100;

/// Expected number of audio channels
#[cfg(not(target_arch = "wasm32"))]
pub const CHANNELS: usize = 2;

/// Expected number of audio channels (WebAssembly)
#[cfg(target_arch = "wasm32")]
pub const CHANNELS: usize = 1;

static_assertions::const_assert!(CHANNELS == 1 || CHANNELS == 2);

/// Gain reached by every voice at its stop time
const FLOOR: f32 = 0.01;

/// Named short sound
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SoundCue {
    Navigate,
    Confirm,
    Cancel,
    Startup,
    Secret,
}

/// Single square-wave oscillator with exponential decay
///
/// Times are in seconds, relative to the moment the cue is played.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Voice {
    /// Start time
    pub start: f32,
    /// Stop time; the gain has decayed to its floor here
    pub stop: f32,
    /// Initial gain
    pub gain: f32,
    /// Frequency changes as `(time, hz)`, sorted by time
    pub pitch: &'static [(f32, f32)],
}

impl Voice {
    /// Returns the frequency at time `t`
    fn frequency(&self, t: f32) -> f32 {
        self.pitch
            .iter()
            .take_while(|(at, _)| *at <= t)
            .last()
            .or(self.pitch.first())
            .map(|(_, hz)| *hz)
            .unwrap_or(0.0)
    }

    /// Returns the gain at time `t`, which is zero outside the voice
    fn envelope(&self, t: f32) -> f32 {
        if t < self.start || t >= self.stop {
            0.0
        } else {
            let frac = (t - self.start) / (self.stop - self.start);
            self.gain * (FLOOR / self.gain).powf(frac)
        }
    }
}

const fn note(start: f32, len: f32, hz: &'static [(f32, f32)]) -> Voice {
    Voice {
        start,
        stop: start + len,
        gain: 0.08,
        pitch: hz,
    }
}

/// Two-tone chime
const STARTUP: [Voice; 2] = [
    note(0.0, 0.3, &[(0.0, 392.0)]),
    note(0.15, 0.35, &[(0.15, 523.0)]),
];

/// Rising arpeggio, C5 E5 G5 C6
const FANFARE: [Voice; 4] = [
    note(0.0, 0.2, &[(0.0, 523.0)]),
    note(0.1, 0.2, &[(0.1, 659.0)]),
    note(0.2, 0.2, &[(0.2, 784.0)]),
    note(0.3, 0.2, &[(0.3, 1047.0)]),
];

impl SoundCue {
    /// Returns the voices that make up this cue
    pub fn voices(&self) -> &'static [Voice] {
        match self {
            SoundCue::Navigate => &[Voice {
                start: 0.0,
                stop: 0.08,
                gain: 0.1,
                pitch: &[(0.0, 880.0), (0.03, 660.0)],
            }],
            SoundCue::Confirm => &[Voice {
                start: 0.0,
                stop: 0.15,
                gain: 0.1,
                pitch: &[(0.0, 523.0), (0.05, 659.0), (0.1, 784.0)],
            }],
            SoundCue::Cancel => &[Voice {
                start: 0.0,
                stop: 0.12,
                gain: 0.1,
                pitch: &[(0.0, 440.0), (0.05, 330.0), (0.1, 220.0)],
            }],
            SoundCue::Startup => &STARTUP,
            SoundCue::Secret => &FANFARE,
        }
    }

    /// Total length of the cue, in seconds
    pub fn duration(&self) -> f32 {
        self.voices().iter().map(|v| v.stop).fold(0.0, f32::max)
    }
}

/// A voice scheduled on the mixer's clock
struct Playing {
    voice: Voice,

    /// Mixer time (in seconds) at which the cue was played
    origin: f64,

    /// Oscillator phase, in cycles
    phase: f32,
}

/// Sums every playing voice into an output buffer
///
/// The mixer keeps its own clock, counted in output samples; cues are
/// scheduled relative to that clock when they are played.
pub struct Mixer {
    playing: Vec<Playing>,
    samples: u64,
    sample_rate: u32,
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixer {
    /// Builds an idle mixer at [`SAMPLE_RATE`]
    pub fn new() -> Self {
        Self {
            playing: vec![],
            samples: 0,
            sample_rate: SAMPLE_RATE,
        }
    }

    /// Current mixer time, in seconds
    pub fn time(&self) -> f64 {
        self.samples as f64 / self.sample_rate as f64
    }

    /// Number of voices that have not yet stopped
    pub fn active(&self) -> usize {
        self.playing.len()
    }

    /// Schedules every voice of the given cue, starting now
    pub fn play(&mut self, cue: SoundCue) {
        let origin = self.time();
        self.playing.extend(cue.voices().iter().map(|v| Playing {
            voice: *v,
            origin,
            phase: 0.0,
        }));
    }

    /// Drops every playing voice
    pub fn stop(&mut self) {
        self.playing.clear();
    }

    /// Fills the buffer with interleaved samples, [`CHANNELS`] per frame
    pub fn next(&mut self, data: &mut [f32]) {
        let dt = 1.0 / self.sample_rate as f32;
        for frame in data.chunks_mut(CHANNELS) {
            let now = self.time();
            let mut d = 0.0;
            for p in &mut self.playing {
                let t = (now - p.origin) as f32;
                let gain = p.voice.envelope(t);
                if gain > 0.0 {
                    d += if p.phase < 0.5 { gain } else { -gain };
                    p.phase = (p.phase + p.voice.frequency(t) * dt).fract();
                }
            }
            frame.fill(d);
            self.samples += 1;
        }
        let now = self.time();
        self.playing
            .retain(|p| now - p.origin < f64::from(p.voice.stop));
    }
}
