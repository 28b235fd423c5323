// Internal clock - Tick generator driven by host millisecond timestamps
// Keeps a microsecond residual so uneven polling never drifts

use super::PPQN;

const DEFAULT_BPM: f32 = 120.0;

/// Internal clock (PPQN = 24)
///
/// - Uses millisecond timestamps (`now_ms`) supplied by the host.
/// - Converts BPM + elapsed time into a monotonic tick counter.
/// - Resets the tick to 0 on every play start.
///
/// Timestamps are treated as a wrapping `u32` domain. Differences are taken
/// with `wrapping_sub` and no rollover correction is attempted.
#[derive(Debug, Clone)]
pub struct InternalClock {
    playing: bool,
    was_playing: bool,
    initialized: bool,
    bpm: f32,
    tick: u32,
    last_ms: u32,
    accum_us: u64,
}

impl InternalClock {
    /// Create a stopped, uninitialized clock at 120 BPM
    pub fn new() -> Self {
        Self {
            playing: false,
            was_playing: false,
            initialized: false,
            bpm: DEFAULT_BPM,
            tick: 0,
            last_ms: 0,
            accum_us: 0,
        }
    }

    /// Restore construction state; the next `update` is an initialization call
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Set tempo in BPM. Values <= 0 (or NaN) halt advancement until corrected.
    pub fn set_tempo(&mut self, bpm: f32) {
        self.bpm = bpm;
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current tick in the PPQN domain
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Tick period in microseconds, or 0 when the tempo is not usable
    ///
    /// period_us = 60s / (BPM * PPQN), rounded to nearest, floored at 1
    pub fn period_us(&self) -> u32 {
        if !(self.bpm > 0.0) {
            return 0;
        }

        let denom = self.bpm as f64 * PPQN as f64;
        let us = 60_000_000.0 / denom;
        // `as` saturates for absurdly slow tempos
        let period = (us + 0.5) as u32;
        period.max(1)
    }

    /// Advance the clock to `now_ms`
    pub fn update(&mut self, now_ms: u32) {
        if !self.initialized {
            self.initialized = true;
            self.last_ms = now_ms;
            self.was_playing = self.playing;
            if self.playing {
                self.tick = 0;
                self.accum_us = 0;
            }
            return;
        }

        // Play start: hard reset of the tick domain
        if self.playing && !self.was_playing {
            self.tick = 0;
            self.accum_us = 0;
            self.last_ms = now_ms;
            self.was_playing = true;
            return;
        }
        self.was_playing = self.playing;

        let delta_ms = now_ms.wrapping_sub(self.last_ms);
        self.last_ms = now_ms;

        if !self.playing {
            return;
        }

        let period_us = self.period_us() as u64;
        if period_us == 0 {
            return;
        }

        self.accum_us += delta_ms as u64 * 1000;
        if self.accum_us < period_us {
            return;
        }

        let inc = self.accum_us / period_us;
        self.tick = self.tick.wrapping_add(inc as u32);
        self.accum_us -= inc * period_us;
    }

    /// Residual microseconds not yet converted into a tick
    pub fn residual_us(&self) -> u64 {
        self.accum_us
    }
}

impl Default for InternalClock {
    fn default() -> Self {
        Self::new()
    }
}
