// Step sequencer engine - Walks the tick domain and triggers steps
// Note-offs due on a boundary always go out before that boundary's note-on

use super::output::SequencerOutput;
use super::scheduler::NoteScheduler;
use super::state::StepSequencerState;

/// Minimal mono-track step sequencer engine
///
/// Contract:
/// - the tick domain is PPQN = 24 and resets to 0 when playback starts;
/// - the engine emits MIDI while `playing == true`, independent of any view.
///
/// State and output are borrowed per call; the engine only owns its
/// scheduler and cursors.
#[derive(Debug, Clone, Default)]
pub struct StepSequencerEngine {
    scheduler: NoteScheduler,
    playing: bool,
    last_tick: u32,
    // u64 so the cursor can step past u32::MAX without wrapping back
    next_step_tick: u64,
}

impl StepSequencerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop (if playing) and forget all pending work
    pub fn reset<O: SequencerOutput + ?Sized>(
        &mut self,
        state: &mut StepSequencerState,
        output: &mut O,
    ) {
        self.stop(state, output);
        self.scheduler.clear();
        self.last_tick = 0;
        self.next_step_tick = 0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of note-offs waiting in the scheduler
    pub fn pending_note_offs(&self) -> usize {
        self.scheduler.len()
    }

    /// Advance to `tick`. Call once per poll, after the clock update.
    pub fn update<O: SequencerOutput + ?Sized>(
        &mut self,
        tick: u32,
        playing: bool,
        state: &mut StepSequencerState,
        output: &mut O,
    ) {
        if playing && !self.playing {
            self.start();
        } else if !playing && self.playing {
            self.stop(state, output);
            return;
        }

        if !self.playing {
            return;
        }

        // Tick went backwards: restarted or rewound clock
        if tick < self.last_tick {
            log::debug!(
                "tick domain discontinuity ({} -> {}), clearing {} pending note-offs",
                self.last_tick,
                tick,
                self.scheduler.len()
            );
            self.scheduler.clear();
            self.next_step_tick = 0;
        }

        self.advance_to_tick(tick, state, output);
        self.last_tick = tick;
    }

    fn start(&mut self) {
        log::debug!("sequencer start");
        self.playing = true;
        self.scheduler.clear();
        self.next_step_tick = 0;
        self.last_tick = 0;
    }

    fn stop<O: SequencerOutput + ?Sized>(
        &mut self,
        state: &mut StepSequencerState,
        output: &mut O,
    ) {
        if !self.playing {
            return;
        }
        log::debug!("sequencer stop");
        self.playing = false;
        self.scheduler.clear();
        output.all_notes_off();
        state.playhead_step.set(None);
    }

    fn advance_to_tick<O: SequencerOutput + ?Sized>(
        &mut self,
        tick: u32,
        state: &mut StepSequencerState,
        output: &mut O,
    ) {
        let len = state.pattern_length();
        if len == 0 {
            state.playhead_step.set(None);
            return;
        }

        let ticks_per_step = state.ticks_per_step();

        while self.next_step_tick <= tick as u64 {
            // Bounded by `tick` above, so it fits back into u32
            let boundary = self.next_step_tick as u32;

            // Note-offs on the boundary go out before the new step's note-on
            self.scheduler.process_until(boundary, output);

            let step_number = boundary / ticks_per_step as u32;
            let step_index = (step_number % len as u32) as u8;

            state.playhead_step.set(Some(step_index));
            self.trigger_step(step_index, boundary, ticks_per_step, state, output);

            self.next_step_tick += ticks_per_step as u64;
        }

        // Gates ending between boundaries
        self.scheduler.process_until(tick, output);
    }

    fn trigger_step<O: SequencerOutput + ?Sized>(
        &mut self,
        step_index: u8,
        step_start_tick: u32,
        ticks_per_step: u8,
        state: &StepSequencerState,
        output: &mut O,
    ) {
        if step_index as usize >= StepSequencerState::MAX_STEPS {
            return;
        }
        if !state.is_enabled(step_index) {
            return;
        }

        let i = step_index as usize;
        let gate_pct = state.gate[i];
        if gate_pct == 0 {
            return;
        }

        let ch = clamp_channel(state.midi_channel.get());
        let note = state.note[i].min(127);
        let vel = state.velocity[i].min(127);

        output.send_note_on(ch, note, vel);

        let off_ticks = (gate_pct as u32 * ticks_per_step as u32 / 100).max(1);
        let off_tick = step_start_tick.saturating_add(off_ticks);

        if !self.scheduler.schedule_note_off(off_tick, ch, note, 0) {
            // Fail-safe: never leave a hanging note when saturated
            log::warn!(
                "note-off scheduler saturated at tick {}, forcing all notes off",
                step_start_tick
            );
            output.all_notes_off();
            self.scheduler.clear();
        }
    }
}

fn clamp_channel(ch: u8) -> u8 {
    ch.min(15)
}
