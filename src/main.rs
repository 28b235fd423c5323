use notestep::messaging::CommandProducer;
use notestep::midi::list_output_ports;
use notestep::{
    Command, HostConfig, LoggingOutput, MidiOutputSink, SequencerOutput, Session,
    create_command_channel,
};
use ringbuf::traits::{Consumer, Producer};
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

// Typing speed is the producer rate; a handful of slots is plenty
const COMMAND_RINGBUFFER_CAPACITY: usize = 64;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run() -> notestep::Result<()> {
    let mut config_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--list-ports" => {
                print_ports();
                return Ok(());
            }
            _ => config_path = Some(PathBuf::from(arg)),
        }
    }

    let config = HostConfig::load_or_default(config_path.as_deref())?;
    log::info!("config: {:?}", config);

    let output: Box<dyn SequencerOutput> =
        match MidiOutputSink::connect(&config.client_name, config.midi_port.as_deref()) {
            Ok(sink) => {
                println!("MIDI output: {}", sink.port_name());
                Box::new(sink)
            }
            // A named port that is missing is a user error; no ports at all is not
            Err(e) if config.midi_port.is_some() => return Err(e),
            Err(e) => {
                log::warn!("{}; events go to the log instead", e);
                Box::new(LoggingOutput)
            }
        };

    let (command_tx, mut command_rx) = create_command_channel(COMMAND_RINGBUFFER_CAPACITY);
    spawn_input_thread(command_tx);

    println!("=== notestep ===");
    println!("Commands: play | stop | toggle | bpm <n> | length <n> | spb <n> | channel <n>");
    println!("          step <i> on|off|toggle | note <i> <note> [vel] [gate] | reset | quit\n");

    let mut session = Session::with_config(&config, output);
    let poll_interval = Duration::from_millis(config.poll_interval_ms);
    let start = Instant::now();
    let now_ms = || start.elapsed().as_millis() as u32;

    'outer: loop {
        while let Some(command) = command_rx.try_pop() {
            if !session.apply(command) {
                break 'outer;
            }
        }

        session.poll(now_ms());
        thread::sleep(poll_interval);
    }

    // Let the engine see the stop edge so sounding notes get released
    session.apply(Command::Stop);
    session.poll(now_ms());
    println!("Bye.");
    Ok(())
}

fn print_ports() {
    let ports = list_output_ports("notestep");
    if ports.is_empty() {
        println!("No MIDI output ports");
        return;
    }
    for port in ports {
        let marker = if port.is_default { " (default)" } else { "" };
        println!("{}: {}{}", port.id, port.name, marker);
    }
}

/// Read control lines from stdin; `quit` or EOF ends the session
fn spawn_input_thread(mut command_tx: CommandProducer) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("stdin read failed: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if command_tx.try_push(command).is_err() {
                        log::warn!("command queue full, dropped {:?}", command);
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }

        // Retry until the poll loop has room; it drains every interval
        while command_tx.try_push(Command::Quit).is_err() {
            thread::sleep(Duration::from_millis(10));
        }
    })
}
