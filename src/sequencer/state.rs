// Step sequencer state - Mono-track pattern + transport parameters
// Flat arrays and a packed enable mask: fast for the engine, cheap to edit

use crate::clock::PPQN;
use crate::params::Param;

/// Minimal mono-track step sequencer state
///
/// Transport values and the enable mask live in `Param` cells so a UI can
/// observe them; per-step data is plain arrays indexed by step.
#[derive(Debug, Clone)]
pub struct StepSequencerState {
    // Playback / transport
    pub length: Param<u8>,
    pub playhead_step: Param<Option<u8>>,
    pub steps_per_beat: Param<u8>,
    pub midi_channel: Param<u8>,

    // Step enable flags, bit i = step i
    pub enabled_mask: Param<u64>,

    // Step properties
    pub note: [u8; Self::MAX_STEPS],
    pub velocity: [u8; Self::MAX_STEPS],
    pub gate: [u16; Self::MAX_STEPS],
    pub nudge: [i8; Self::MAX_STEPS],
}

impl StepSequencerState {
    pub const MAX_STEPS: usize = 64;

    pub const DEFAULT_LENGTH: u8 = 18;
    pub const DEFAULT_STEPS_PER_BEAT: u8 = 4; // 1/16
    pub const DEFAULT_MIDI_CHANNEL: u8 = 0; // channel 1

    pub const DEFAULT_VELOCITY: u8 = 100;
    pub const DEFAULT_GATE: u16 = 75;
    pub const NUDGE_RANGE: i8 = 50;

    pub fn new() -> Self {
        let mut state = Self {
            length: Param::new(Self::DEFAULT_LENGTH),
            playhead_step: Param::new(None),
            steps_per_beat: Param::new(Self::DEFAULT_STEPS_PER_BEAT),
            midi_channel: Param::new(Self::DEFAULT_MIDI_CHANNEL),
            enabled_mask: Param::new(0),
            note: [0; Self::MAX_STEPS],
            velocity: [0; Self::MAX_STEPS],
            gate: [0; Self::MAX_STEPS],
            nudge: [0; Self::MAX_STEPS],
        };
        state.reset();
        state
    }

    /// Restore defaults; cells are `set` so observers see the change
    pub fn reset(&mut self) {
        self.length.set(Self::DEFAULT_LENGTH);
        self.playhead_step.set(None);
        self.steps_per_beat.set(Self::DEFAULT_STEPS_PER_BEAT);
        self.midi_channel.set(Self::DEFAULT_MIDI_CHANNEL);
        self.enabled_mask.set(0);

        for i in 0..Self::MAX_STEPS {
            self.note[i] = 48 + (i % 12) as u8; // C3..B3
            self.velocity[i] = Self::DEFAULT_VELOCITY;
            self.gate[i] = Self::DEFAULT_GATE;
            self.nudge[i] = 0;
        }
    }

    /// Effective step count, clamped to `MAX_STEPS`
    pub fn pattern_length(&self) -> u8 {
        self.length.get().min(Self::MAX_STEPS as u8)
    }

    /// Steps per beat clamped to [1, PPQN]; 0 falls back to the default
    pub fn steps_per_beat(&self) -> u8 {
        match self.steps_per_beat.get() {
            0 => Self::DEFAULT_STEPS_PER_BEAT,
            spb => spb.min(PPQN as u8),
        }
    }

    /// Tick span of a single step, never 0
    pub fn ticks_per_step(&self) -> u8 {
        let tps = PPQN / self.steps_per_beat() as u16;
        tps.max(1) as u8
    }

    pub fn is_enabled(&self, step: u8) -> bool {
        if step as usize >= Self::MAX_STEPS {
            return false;
        }
        (self.enabled_mask.get() & (1u64 << step)) != 0
    }

    pub fn set_enabled(&mut self, step: u8, enabled: bool) {
        if step as usize >= Self::MAX_STEPS {
            return;
        }
        let mut m = self.enabled_mask.get();
        if enabled {
            m |= 1u64 << step;
        } else {
            m &= !(1u64 << step);
        }
        self.enabled_mask.set(m);
    }

    pub fn toggle(&mut self, step: u8) {
        if step as usize >= Self::MAX_STEPS {
            return;
        }
        self.enabled_mask.set(self.enabled_mask.get() ^ (1u64 << step));
    }

    pub fn set_note(&mut self, step: u8, note: u8) {
        if let Some(n) = self.note.get_mut(step as usize) {
            *n = note.min(127);
        }
    }

    pub fn set_velocity(&mut self, step: u8, velocity: u8) {
        if let Some(v) = self.velocity.get_mut(step as usize) {
            *v = velocity.min(127);
        }
    }

    /// Gate in percent of the step span; 0 mutes, > 100 rings into later steps
    pub fn set_gate(&mut self, step: u8, gate_percent: u16) {
        if let Some(g) = self.gate.get_mut(step as usize) {
            *g = gate_percent;
        }
    }

    /// Stored for timing offsets; the engine does not read it yet
    pub fn set_nudge(&mut self, step: u8, nudge: i8) {
        if let Some(n) = self.nudge.get_mut(step as usize) {
            *n = nudge.clamp(-Self::NUDGE_RANGE, Self::NUDGE_RANGE);
        }
    }

    /// Channel is stored as given; the engine clamps to 0..=15 on output
    pub fn set_midi_channel(&mut self, channel: u8) {
        self.midi_channel.set(channel);
    }

    /// Current playhead step, `None` when no step is active
    pub fn playhead(&self) -> Option<u8> {
        self.playhead_step.get()
    }
}

impl Default for StepSequencerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let st = StepSequencerState::new();
        assert_eq!(st.length.get(), 18);
        assert_eq!(st.steps_per_beat.get(), 4);
        assert_eq!(st.midi_channel.get(), 0);
        assert_eq!(st.enabled_mask.get(), 0);
        assert_eq!(st.playhead(), None);

        assert_eq!(st.note[0], 48);
        assert_eq!(st.note[11], 59);
        assert_eq!(st.note[12], 48);
        assert_eq!(st.velocity[5], 100);
        assert_eq!(st.gate[63], 75);
        assert_eq!(st.nudge[7], 0);
    }

    #[test]
    fn test_pattern_length_is_clamped() {
        let mut st = StepSequencerState::new();
        st.length.set(200);
        assert_eq!(st.pattern_length(), 64);
        st.length.set(0);
        assert_eq!(st.pattern_length(), 0);
    }

    #[test]
    fn test_ticks_per_step() {
        let mut st = StepSequencerState::new();

        st.steps_per_beat.set(4);
        assert_eq!(st.ticks_per_step(), 6);

        st.steps_per_beat.set(3);
        assert_eq!(st.ticks_per_step(), 8);

        st.steps_per_beat.set(1);
        assert_eq!(st.ticks_per_step(), 24);

        // Falls back to default subdivision
        st.steps_per_beat.set(0);
        assert_eq!(st.ticks_per_step(), 6);

        // Clamped to PPQN
        st.steps_per_beat.set(200);
        assert_eq!(st.steps_per_beat(), 24);
        assert_eq!(st.ticks_per_step(), 1);

        // Non-divisor subdivisions truncate
        st.steps_per_beat.set(7);
        assert_eq!(st.ticks_per_step(), 3);
    }

    #[test]
    fn test_enable_mask_helpers() {
        let mut st = StepSequencerState::new();

        st.set_enabled(0, true);
        st.set_enabled(63, true);
        assert!(st.is_enabled(0));
        assert!(st.is_enabled(63));
        assert_eq!(st.enabled_mask.get(), 1 | (1u64 << 63));

        st.toggle(0);
        assert!(!st.is_enabled(0));
        st.toggle(0);
        assert!(st.is_enabled(0));

        st.set_enabled(63, false);
        assert!(!st.is_enabled(63));

        // Out of range is ignored
        st.set_enabled(64, true);
        st.toggle(200);
        assert!(!st.is_enabled(64));
        assert_eq!(st.enabled_mask.get(), 1);
    }

    #[test]
    fn test_step_setters_clamp() {
        let mut st = StepSequencerState::new();

        st.set_note(3, 200);
        st.set_velocity(3, 0);
        st.set_gate(3, 250);
        st.set_nudge(3, 100);
        assert_eq!(st.note[3], 127);
        assert_eq!(st.velocity[3], 0);
        assert_eq!(st.gate[3], 250);
        assert_eq!(st.nudge[3], 50);

        st.set_nudge(3, -128);
        assert_eq!(st.nudge[3], -50);

        // No panic past the end
        st.set_note(64, 1);
        st.set_gate(255, 1);
    }

    #[test]
    fn test_reset_restores_pattern() {
        let mut st = StepSequencerState::new();
        st.set_note(0, 99);
        st.set_enabled(1, true);
        st.length.set(4);
        st.playhead_step.set(Some(2));

        st.reset();
        assert_eq!(st.note[0], 48);
        assert_eq!(st.enabled_mask.get(), 0);
        assert_eq!(st.length.get(), 18);
        assert_eq!(st.playhead(), None);
    }
}
