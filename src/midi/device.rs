// MIDI output devices - Port discovery

use crate::error::{Result, SeqError};
use midir::{MidiOutput, MidiOutputPort};

#[derive(Clone, Debug)]
pub struct MidiDeviceInfo {
    pub id: String,
    pub name: String,
    pub is_default: bool,
}

/// List all MIDI output ports
pub fn list_output_ports(client_name: &str) -> Vec<MidiDeviceInfo> {
    let mut devices = Vec::new();

    // Temporary instance just for scanning
    if let Ok(midi_out) = MidiOutput::new(client_name) {
        for (index, port) in midi_out.ports().iter().enumerate() {
            if let Ok(name) = midi_out.port_name(port) {
                devices.push(MidiDeviceInfo {
                    id: format!("midi_out_{}", index),
                    name,
                    is_default: index == 0, // first port is treated as default
                });
            }
        }
    }

    devices
}

/// Resolve an output port by exact name, or the first port when `name` is None
pub fn find_output_port(
    client_name: &str,
    name: Option<&str>,
) -> Result<(MidiOutput, MidiOutputPort, String)> {
    let midi_out = MidiOutput::new(client_name).map_err(|e| SeqError::MidiInit(e.to_string()))?;
    let ports = midi_out.ports();

    if ports.is_empty() {
        return Err(SeqError::NoOutputPorts);
    }

    let found = match name {
        Some(wanted) => ports.into_iter().find_map(|port| {
            let port_name = midi_out.port_name(&port).ok()?;
            (port_name == wanted).then_some((port, port_name))
        }),
        None => ports.into_iter().next().map(|port| {
            let port_name = midi_out
                .port_name(&port)
                .unwrap_or_else(|_| "Unknown".to_string());
            (port, port_name)
        }),
    };

    match found {
        Some((port, port_name)) => Ok((midi_out, port, port_name)),
        None => Err(SeqError::PortNotFound(name.unwrap_or_default().to_string())),
    }
}
