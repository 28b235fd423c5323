// notestep - Library exports for the host binary, tests and benchmarks

pub mod clock;
pub mod config;
pub mod error;
pub mod messaging;
pub mod midi;
pub mod params;
pub mod sequencer;
pub mod session;

// Re-export commonly used types for convenience
pub use clock::{InternalClock, PPQN};
pub use config::HostConfig;
pub use error::{Result, SeqError};
pub use messaging::{Command, create_command_channel};
pub use midi::{MidiEvent, MidiOutputSink};
pub use params::Param;
pub use sequencer::{
    EventLog, LoggingOutput, NoteScheduler, OutputEvent, SequencerOutput, StepSequencerEngine,
    StepSequencerState,
};
pub use session::Session;
