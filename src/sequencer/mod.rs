// Sequencer module - Step pattern playback in the tick domain
// State, note-off scheduling, and the step-advance engine

pub mod engine;
pub mod output;
pub mod scheduler;
pub mod state;

pub use engine::StepSequencerEngine;
pub use output::{EventLog, LoggingOutput, OutputEvent, SequencerOutput};
pub use scheduler::{NoteOff, NoteScheduler, MAX_EVENTS};
pub use state::StepSequencerState;
