// MIDI event types - Channel voice messages sent by the sequencer

/// CC 123: All Notes Off
pub const CC_ALL_NOTES_OFF: u8 = 123;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

impl MidiEvent {
    /// "All Notes Off" controller message for one channel
    pub fn all_notes_off(channel: u8) -> Self {
        MidiEvent::ControlChange {
            channel,
            controller: CC_ALL_NOTES_OFF,
            value: 0,
        }
    }

    /// Encode as a 3-byte MIDI 1.0 message
    ///
    /// Channel is masked to the low nibble, data bytes to 7 bits. A NoteOn
    /// with velocity 0 is sent as-is; receivers usually treat it as a NoteOff.
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            MidiEvent::NoteOn {
                channel,
                note,
                velocity,
            } => [0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiEvent::NoteOff {
                channel,
                note,
                velocity,
            } => [0x80 | (channel & 0x0F), note & 0x7F, velocity & 0x7F],
            MidiEvent::ControlChange {
                channel,
                controller,
                value,
            } => [0xB0 | (channel & 0x0F), controller & 0x7F, value & 0x7F],
        }
    }
}
