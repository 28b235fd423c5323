// Host-side error types
// The real-time core never returns these; only setup and control paths do

/// Errors raised by the host layer (MIDI setup, config, control input)
#[derive(Debug, thiserror::Error)]
pub enum SeqError {
    #[error("Failed to initialize MIDI: {0}")]
    MidiInit(String),

    #[error("No MIDI output ports available")]
    NoOutputPorts,

    #[error("MIDI output port '{0}' not found")]
    PortNotFound(String),

    #[error("Failed to connect to MIDI output: {0}")]
    MidiConnect(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("RON error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

pub type Result<T> = std::result::Result<T, SeqError>;
