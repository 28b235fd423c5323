// Command types - Control input → Poll loop
// One command per text line, parsed with `str::parse`

use crate::error::SeqError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Play,
    Stop,
    TogglePlay,
    SetTempo(f32),
    SetLength(u8),
    SetStepsPerBeat(u8),
    SetChannel(u8),
    SetStepEnabled {
        step: u8,
        enabled: bool,
    },
    ToggleStep(u8),
    /// Per-step data; `None` leaves velocity or gate untouched
    SetStep {
        step: u8,
        note: u8,
        velocity: Option<u8>,
        gate: Option<u16>,
    },
    ResetPattern,
    Quit,
}

fn invalid(msg: impl Into<String>) -> SeqError {
    SeqError::InvalidCommand(msg.into())
}

fn arg<T: FromStr>(word: Option<&str>, what: &str) -> Result<T, SeqError> {
    let word = word.ok_or_else(|| invalid(format!("missing {}", what)))?;
    word.parse()
        .map_err(|_| invalid(format!("bad {} '{}'", what, word)))
}

fn opt_arg<T: FromStr>(word: Option<&str>, what: &str) -> Result<Option<T>, SeqError> {
    match word {
        Some(_) => arg(word, what).map(Some),
        None => Ok(None),
    }
}

impl FromStr for Command {
    type Err = SeqError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words
            .next()
            .ok_or_else(|| invalid("empty line"))?
            .to_ascii_lowercase();

        let cmd = match head.as_str() {
            "play" => Command::Play,
            "stop" => Command::Stop,
            "toggle" => Command::TogglePlay,
            "bpm" | "tempo" => Command::SetTempo(arg(words.next(), "tempo")?),
            "length" => Command::SetLength(arg(words.next(), "length")?),
            "spb" => Command::SetStepsPerBeat(arg(words.next(), "steps per beat")?),
            "channel" => Command::SetChannel(arg(words.next(), "channel")?),
            "step" => {
                let step = arg(words.next(), "step index")?;
                match words.next() {
                    Some("on") => Command::SetStepEnabled { step, enabled: true },
                    Some("off") => Command::SetStepEnabled {
                        step,
                        enabled: false,
                    },
                    Some("toggle") => Command::ToggleStep(step),
                    Some(other) => return Err(invalid(format!("expected on|off|toggle, got '{}'", other))),
                    None => return Err(invalid("missing on|off|toggle")),
                }
            }
            "note" => Command::SetStep {
                step: arg(words.next(), "step index")?,
                note: arg(words.next(), "note")?,
                velocity: opt_arg(words.next(), "velocity")?,
                gate: opt_arg(words.next(), "gate")?,
            },
            "reset" => Command::ResetPattern,
            "quit" | "exit" => Command::Quit,
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };

        if let Some(extra) = words.next() {
            return Err(invalid(format!("unexpected argument '{}'", extra)));
        }
        Ok(cmd)
    }
}
