//! Edge case tests and robustness validation
//!
//! Extreme tempos, out-of-range pattern settings and a saturated note-off
//! scheduler must all degrade gracefully: no panic, no hanging note.

use notestep::midi::MidiOutputSink;
use notestep::{Command, EventLog, OutputEvent, Session};

/// Tempos that cannot produce a usable period freeze the tick counter
#[test]
fn test_unusable_tempos_halt_the_clock() {
    for bpm in [0.0f32, -120.0, f32::NAN, f32::NEG_INFINITY] {
        let mut session = Session::new(EventLog::new());
        session.apply(Command::SetTempo(bpm));
        session.apply(Command::Play);
        for ms in 0..1000u32 {
            session.poll(ms);
        }
        assert_eq!(session.clock().tick(), 0, "bpm {}", bpm);
        assert_eq!(session.clock().residual_us(), 0);
    }
}

#[test]
fn test_extremely_slow_tempo() {
    let mut session = Session::new(EventLog::new());
    session.apply(Command::SetTempo(0.0001));
    session.apply(Command::Play);
    assert_eq!(session.clock().period_us(), u32::MAX);

    session.poll(0);
    session.poll(60_000);
    assert_eq!(session.clock().tick(), 0);
}

#[test]
fn test_extremely_fast_tempo() {
    let mut session = Session::new(EventLog::new());
    session.apply(Command::SetTempo(1.0e9));
    session.apply(Command::Play);
    assert_eq!(session.clock().period_us(), 1);

    session.poll(0);
    session.poll(1);
    assert_eq!(session.clock().tick(), 1000);
    // step 166 of an 18-step pattern
    assert_eq!(session.playhead(), Some(4));
}

#[test]
fn test_tempo_recovers_after_zero() {
    let mut session = Session::new(EventLog::new());
    session.apply(Command::Play);
    session.poll(0);

    session.apply(Command::SetTempo(0.0));
    session.poll(500);
    assert_eq!(session.clock().tick(), 0);

    session.apply(Command::SetTempo(125.0));
    session.poll(520);
    assert_eq!(session.clock().tick(), 1);
}

#[test]
fn test_out_of_range_pattern_settings() {
    let mut session = Session::new(EventLog::new());

    session.apply(Command::SetStepsPerBeat(0));
    assert_eq!(session.state().ticks_per_step(), 6);
    session.apply(Command::SetStepsPerBeat(100));
    assert_eq!(session.state().ticks_per_step(), 1);
    session.apply(Command::SetLength(200));
    assert_eq!(session.state().pattern_length(), 64);

    // Indices past the last step are ignored
    session.apply(Command::ToggleStep(64));
    session.apply(Command::SetStepEnabled {
        step: 255,
        enabled: true,
    });
    session.apply(Command::SetStep {
        step: 100,
        note: 60,
        velocity: Some(1),
        gate: Some(1),
    });
    assert_eq!(session.state().enabled_mask.get(), 0);
}

#[test]
fn test_zero_length_plays_silently() {
    let mut session = Session::new(EventLog::new());
    session.state_mut().enabled_mask.set(u64::MAX);
    session.apply(Command::SetLength(0));
    session.apply(Command::Play);

    for ms in (0..2000u32).step_by(7) {
        session.poll(ms);
    }
    assert!(session.output().is_empty());
    assert_eq!(session.playhead(), None);
    assert!(session.engine().is_playing());
}

/// Gates far longer than the pattern fill the scheduler; the fail-safe
/// silences everything instead of dropping a note-off
#[test]
fn test_saturated_scheduler_forces_all_notes_off() {
    let mut session = Session::new(EventLog::new());
    session.apply(Command::SetStepsPerBeat(24));
    session.apply(Command::SetLength(64));
    for step in 0..64 {
        session.apply(Command::SetStep {
            step,
            note: 60,
            velocity: None,
            gate: Some(10_000),
        });
        session.apply(Command::SetStepEnabled {
            step,
            enabled: true,
        });
    }
    session.apply(Command::Play);

    session.poll(0);
    // 96 ticks at 120 BPM, one step per tick
    session.poll(2000);
    assert_eq!(session.clock().tick(), 96);

    let log = session.output();
    assert_eq!(log.count_note_ons(), 97);
    assert_eq!(log.count_all_notes_off(), 1);
    assert_eq!(log.count_note_offs(), 0);
    // steps 65..=96 rescheduled after the flush
    assert_eq!(session.engine().pending_note_offs(), 32);

    // the flush happens right after the 65th note-on
    let flush = log
        .events()
        .iter()
        .position(|e| *e == OutputEvent::AllNotesOff);
    assert_eq!(flush, Some(65));
}

/// Out-of-range channel reaches the wire clamped, and stop panics every channel
#[test]
fn test_midi_bytes_end_to_end() {
    let sink = MidiOutputSink::with_transport(Vec::new(), "capture".to_string());
    let mut session = Session::new(sink);
    session.apply(Command::SetChannel(200));
    session.apply(Command::SetStep {
        step: 0,
        note: 60,
        velocity: Some(0),
        gate: None,
    });
    session.apply(Command::SetStepEnabled {
        step: 0,
        enabled: true,
    });

    session.apply(Command::Play);
    session.poll(0);
    session.apply(Command::Stop);
    session.poll(1);
    session.poll(2);

    let sent = session.output().transport();
    assert_eq!(sent.len(), 17);
    assert_eq!(sent[0], [0x9F, 60, 0]);
    for (ch, msg) in sent[1..].iter().enumerate() {
        assert_eq!(*msg, [0xB0 | ch as u8, 123, 0]);
    }
    assert_eq!(session.output().send_errors(), 0);
}
