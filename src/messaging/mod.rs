// Messaging - Control commands from the input thread to the poll loop

pub mod channels;
pub mod command;

pub use channels::{CommandConsumer, CommandProducer, create_command_channel};
pub use command::Command;
