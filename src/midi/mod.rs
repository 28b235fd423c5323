// MIDI module - Output port discovery, message encoding, and the MIDI sink

pub mod device;
pub mod event;
pub mod output;

pub use device::{MidiDeviceInfo, find_output_port, list_output_ports};
pub use event::{CC_ALL_NOTES_OFF, MidiEvent};
pub use output::{MidiOutputSink, RawMidiOut};
