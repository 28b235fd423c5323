// Clock module - Musical tick domain
// Converts host timestamps + tempo into a PPQN tick counter

pub mod internal;

pub use internal::InternalClock;

/// MIDI clock resolution: pulses per quarter note
pub const PPQN: u16 = 24;
