// MIDI output - SequencerOutput over a raw MIDI byte transport
// midir connection in production, an in-memory buffer in tests

use crate::error::{Result, SeqError};
use crate::midi::device;
use crate::midi::event::MidiEvent;
use crate::sequencer::output::SequencerOutput;
use midir::MidiOutputConnection;

const MIDI_CHANNELS: u8 = 16;

/// Anything that can push one raw MIDI message
pub trait RawMidiOut {
    fn send_raw(&mut self, bytes: &[u8]) -> std::result::Result<(), String>;
}

impl RawMidiOut for MidiOutputConnection {
    fn send_raw(&mut self, bytes: &[u8]) -> std::result::Result<(), String> {
        self.send(bytes).map_err(|e| e.to_string())
    }
}

impl RawMidiOut for Vec<[u8; 3]> {
    fn send_raw(&mut self, bytes: &[u8]) -> std::result::Result<(), String> {
        match bytes {
            [a, b, c] => {
                self.push([*a, *b, *c]);
                Ok(())
            }
            _ => Err(format!("expected 3 bytes, got {}", bytes.len())),
        }
    }
}

/// Sequencer output that encodes events as MIDI 1.0 messages
pub struct MidiOutputSink<T: RawMidiOut = MidiOutputConnection> {
    transport: T,
    port_name: String,
    send_errors: u64,
}

impl MidiOutputSink<MidiOutputConnection> {
    /// Open an output port (by name, or the first one available)
    pub fn connect(client_name: &str, port_name: Option<&str>) -> Result<Self> {
        let (midi_out, port, resolved_name) = device::find_output_port(client_name, port_name)?;

        let connection = midi_out
            .connect(&port, "notestep-out")
            .map_err(|e| SeqError::MidiConnect(e.to_string()))?;

        log::info!("MIDI output connected: {}", resolved_name);
        Ok(Self::with_transport(connection, resolved_name))
    }
}

impl<T: RawMidiOut> MidiOutputSink<T> {
    pub fn with_transport(transport: T, port_name: String) -> Self {
        Self {
            transport,
            port_name,
            send_errors: 0,
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Messages the transport refused since creation
    pub fn send_errors(&self) -> u64 {
        self.send_errors
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send_event(&mut self, event: MidiEvent) {
        if let Err(e) = self.transport.send_raw(&event.to_bytes()) {
            self.send_errors += 1;
            // Only the first failure and then every 1000th, a dead port would flood the log
            if self.send_errors == 1 || self.send_errors % 1000 == 0 {
                log::warn!(
                    "MIDI send failed on '{}' ({} total): {}",
                    self.port_name,
                    self.send_errors,
                    e
                );
            }
        }
    }
}

impl<T: RawMidiOut> SequencerOutput for MidiOutputSink<T> {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.send_event(MidiEvent::NoteOn {
            channel,
            note,
            velocity,
        });
    }

    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) {
        self.send_event(MidiEvent::NoteOff {
            channel,
            note,
            velocity,
        });
    }

    fn send_cc(&mut self, channel: u8, cc: u8, value: u8) {
        self.send_event(MidiEvent::ControlChange {
            channel,
            controller: cc,
            value,
        });
    }

    fn all_notes_off(&mut self) {
        for channel in 0..MIDI_CHANNELS {
            self.send_event(MidiEvent::all_notes_off(channel));
        }
    }
}
