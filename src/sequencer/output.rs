// Sequencer output - Abstract sink for note and controller events
// Concrete transports (MIDI, logging, test capture) implement this trait

/// Sequencer output (USB MIDI, DIN, protocol bridge, ...)
///
/// Calls are synchronous and fire-and-forget: the transport owns its own
/// delivery guarantees and never reports failure back to the engine.
pub trait SequencerOutput {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8);
    fn send_cc(&mut self, channel: u8, cc: u8, value: u8);

    /// Silence everything. Transports without a panic message can ignore it.
    fn all_notes_off(&mut self) {}
}

impl<T: SequencerOutput + ?Sized> SequencerOutput for &mut T {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        (**self).send_note_on(channel, note, velocity);
    }

    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) {
        (**self).send_note_off(channel, note, velocity);
    }

    fn send_cc(&mut self, channel: u8, cc: u8, value: u8) {
        (**self).send_cc(channel, cc, value);
    }

    fn all_notes_off(&mut self) {
        (**self).all_notes_off();
    }
}

impl<T: SequencerOutput + ?Sized> SequencerOutput for Box<T> {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        (**self).send_note_on(channel, note, velocity);
    }

    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) {
        (**self).send_note_off(channel, note, velocity);
    }

    fn send_cc(&mut self, channel: u8, cc: u8, value: u8) {
        (**self).send_cc(channel, cc, value);
    }

    fn all_notes_off(&mut self) {
        (**self).all_notes_off();
    }
}

/// One call made on a `SequencerOutput`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, cc: u8, value: u8 },
    AllNotesOff,
}

/// Output that records every event in call order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<OutputEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<OutputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count_note_ons(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OutputEvent::NoteOn { .. }))
            .count()
    }

    pub fn count_note_offs(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OutputEvent::NoteOff { .. }))
            .count()
    }

    pub fn count_all_notes_off(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OutputEvent::AllNotesOff))
            .count()
    }
}

impl SequencerOutput for EventLog {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        self.events.push(OutputEvent::NoteOn {
            channel,
            note,
            velocity,
        });
    }

    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) {
        self.events.push(OutputEvent::NoteOff {
            channel,
            note,
            velocity,
        });
    }

    fn send_cc(&mut self, channel: u8, cc: u8, value: u8) {
        self.events
            .push(OutputEvent::ControlChange { channel, cc, value });
    }

    fn all_notes_off(&mut self) {
        self.events.push(OutputEvent::AllNotesOff);
    }
}

/// Output that writes each event to the `log` facade
/// Used by the host when no MIDI port is available
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOutput;

impl SequencerOutput for LoggingOutput {
    fn send_note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        log::info!(target: "notestep::out", "note on  ch={} note={} vel={}", channel, note, velocity);
    }

    fn send_note_off(&mut self, channel: u8, note: u8, velocity: u8) {
        log::info!(target: "notestep::out", "note off ch={} note={} vel={}", channel, note, velocity);
    }

    fn send_cc(&mut self, channel: u8, cc: u8, value: u8) {
        log::info!(target: "notestep::out", "cc       ch={} cc={} val={}", channel, cc, value);
    }

    fn all_notes_off(&mut self) {
        log::info!(target: "notestep::out", "all notes off");
    }
}
