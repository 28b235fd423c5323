// Session - Clock, pattern state, engine, and sink wired into one poll loop
// Commands mutate between polls; `poll` is the only thing that emits

use crate::clock::InternalClock;
use crate::config::HostConfig;
use crate::messaging::Command;
use crate::sequencer::{SequencerOutput, StepSequencerEngine, StepSequencerState};

pub struct Session<O: SequencerOutput> {
    clock: InternalClock,
    state: StepSequencerState,
    engine: StepSequencerEngine,
    output: O,
}

impl<O: SequencerOutput> Session<O> {
    /// Stopped session at 120 BPM with the default (empty) pattern
    pub fn new(output: O) -> Self {
        Self {
            clock: InternalClock::new(),
            state: StepSequencerState::new(),
            engine: StepSequencerEngine::new(),
            output,
        }
    }

    pub fn with_config(config: &HostConfig, output: O) -> Self {
        let mut session = Self::new(output);
        session.clock.set_tempo(config.tempo_bpm);
        session.clock.set_playing(config.autoplay);
        session.state.length.set(config.pattern_length);
        session.state.steps_per_beat.set(config.steps_per_beat);
        session.state.set_midi_channel(config.channel);
        session
    }

    /// Apply one control command. Returns `false` when the host should exit.
    pub fn apply(&mut self, command: Command) -> bool {
        log::debug!("command: {:?}", command);
        match command {
            Command::Play => self.clock.set_playing(true),
            Command::Stop => self.clock.set_playing(false),
            Command::TogglePlay => {
                let playing = self.clock.is_playing();
                self.clock.set_playing(!playing);
            }
            Command::SetTempo(bpm) => {
                if !(bpm > 0.0) {
                    log::warn!("tempo {} halts the clock until changed", bpm);
                }
                self.clock.set_tempo(bpm);
            }
            Command::SetLength(len) => self.state.length.set(len),
            Command::SetStepsPerBeat(spb) => self.state.steps_per_beat.set(spb),
            Command::SetChannel(ch) => self.state.set_midi_channel(ch),
            Command::SetStepEnabled { step, enabled } => self.state.set_enabled(step, enabled),
            Command::ToggleStep(step) => self.state.toggle(step),
            Command::SetStep {
                step,
                note,
                velocity,
                gate,
            } => {
                self.state.set_note(step, note);
                if let Some(velocity) = velocity {
                    self.state.set_velocity(step, velocity);
                }
                if let Some(gate) = gate {
                    self.state.set_gate(step, gate);
                }
            }
            Command::ResetPattern => self.state.reset(),
            Command::Quit => return false,
        }
        true
    }

    /// Advance clock and engine to `now_ms`
    pub fn poll(&mut self, now_ms: u32) {
        self.clock.update(now_ms);
        self.engine.update(
            self.clock.tick(),
            self.clock.is_playing(),
            &mut self.state,
            &mut self.output,
        );
    }

    pub fn clock(&self) -> &InternalClock {
        &self.clock
    }

    pub fn state(&self) -> &StepSequencerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StepSequencerState {
        &mut self.state
    }

    pub fn engine(&self) -> &StepSequencerEngine {
        &self.engine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn playhead(&self) -> Option<u8> {
        self.state.playhead()
    }
}
