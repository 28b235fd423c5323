// Note scheduler - Fixed-capacity pending note-off set
// Linear scan + in-place compaction; no allocation, no ordering requirement

use super::output::SequencerOutput;

/// Maximum number of pending note-offs
pub const MAX_EVENTS: usize = 64;

/// A note-off waiting for its deadline tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteOff {
    pub tick: u32,
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
}

/// Minimal fixed-capacity scheduler for note-off events
#[derive(Debug, Clone)]
pub struct NoteScheduler {
    events: [NoteOff; MAX_EVENTS],
    count: usize,
}

impl NoteScheduler {
    pub fn new() -> Self {
        Self {
            events: [NoteOff::default(); MAX_EVENTS],
            count: 0,
        }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pending entries in insertion order (due ones are removed by `process_until`)
    pub fn pending(&self) -> &[NoteOff] {
        &self.events[..self.count]
    }

    /// Queue a note-off at `tick`. Returns false when the scheduler is full.
    pub fn schedule_note_off(&mut self, tick: u32, channel: u8, note: u8, velocity: u8) -> bool {
        if self.count >= MAX_EVENTS {
            return false;
        }
        self.events[self.count] = NoteOff {
            tick,
            channel,
            note,
            velocity,
        };
        self.count += 1;
        true
    }

    /// Emit every note-off whose deadline is <= `tick`, then drop those entries
    /// Remaining entries keep their relative order.
    pub fn process_until<O: SequencerOutput + ?Sized>(&mut self, tick: u32, out: &mut O) {
        if self.count == 0 {
            return;
        }

        let mut write = 0;
        for read in 0..self.count {
            let e = self.events[read];
            if e.tick <= tick {
                out.send_note_off(e.channel, e.note, e.velocity);
            } else {
                self.events[write] = e;
                write += 1;
            }
        }
        self.count = write;
    }
}

impl Default for NoteScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::output::{EventLog, OutputEvent};

    #[test]
    fn test_schedule_and_len() {
        let mut s = NoteScheduler::new();
        assert!(s.is_empty());

        assert!(s.schedule_note_off(10, 0, 60, 0));
        assert!(s.schedule_note_off(5, 1, 62, 0));
        assert_eq!(s.len(), 2);

        s.clear();
        assert!(s.is_empty());
    }

    #[test]
    fn test_process_until_is_inclusive() {
        let mut s = NoteScheduler::new();
        let mut out = EventLog::new();

        s.schedule_note_off(6, 0, 60, 0);

        s.process_until(5, &mut out);
        assert!(out.is_empty());
        assert_eq!(s.len(), 1);

        s.process_until(6, &mut out);
        assert_eq!(
            out.events(),
            &[OutputEvent::NoteOff { channel: 0, note: 60, velocity: 0 }]
        );
        assert!(s.is_empty());
    }

    #[test]
    fn test_process_until_keeps_order_of_remaining() {
        let mut s = NoteScheduler::new();
        let mut out = EventLog::new();

        s.schedule_note_off(30, 0, 1, 0);
        s.schedule_note_off(3, 0, 2, 0);
        s.schedule_note_off(20, 0, 3, 0);
        s.schedule_note_off(4, 0, 4, 0);
        s.schedule_note_off(10, 0, 5, 0);

        s.process_until(4, &mut out);

        // Due entries are emitted in scan order
        assert_eq!(
            out.events(),
            &[
                OutputEvent::NoteOff { channel: 0, note: 2, velocity: 0 },
                OutputEvent::NoteOff { channel: 0, note: 4, velocity: 0 },
            ]
        );
        let remaining: Vec<u8> = s.pending().iter().map(|e| e.note).collect();
        assert_eq!(remaining, vec![1, 3, 5]);
    }

    #[test]
    fn test_process_until_twice_emits_once() {
        let mut s = NoteScheduler::new();
        let mut out = EventLog::new();

        s.schedule_note_off(2, 3, 40, 0);
        s.schedule_note_off(2, 3, 40, 0); // duplicates are allowed

        s.process_until(2, &mut out);
        assert_eq!(out.count_note_offs(), 2);

        s.process_until(2, &mut out);
        assert_eq!(out.count_note_offs(), 2);
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mut s = NoteScheduler::new();
        for i in 0..MAX_EVENTS {
            assert!(s.schedule_note_off(i as u32, 0, 60, 0));
        }
        assert_eq!(s.len(), MAX_EVENTS);
        assert!(!s.schedule_note_off(1000, 0, 61, 0));
        assert_eq!(s.len(), MAX_EVENTS);

        // Freed slots become usable again
        let mut out = EventLog::new();
        s.process_until(0, &mut out);
        assert!(s.schedule_note_off(1000, 0, 61, 0));
    }
}
