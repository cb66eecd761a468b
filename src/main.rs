/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use std::io::BufRead;
use std::path::Path;
use std::thread::Builder;

/* Custom libraries */
use dispatch::DispatchCenter;
use shared::{BankCommand, BankEvent, HallDirection};

/* Modules */
mod config;
mod demand;
mod dispatch;
mod elevator;
mod shared;

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator-bank")
        .about("Simulated elevator-bank dispatch engine")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the bank configuration file"),
        )
        .get_matches();
    let config_path = matches.value_of("config").unwrap_or("config.toml");

    // Load the configuration
    let config = unwrap_or_exit!(config::load_config(Path::new(config_path)));

    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<BankCommand>();
    let (event_tx, event_rx) = cbc::unbounded::<BankEvent>();
    let (_terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the dispatch center (spawns one controller thread per car)
    let mut center = DispatchCenter::new(&config.bank, command_rx, event_tx, terminate_rx);
    let center_thread = Builder::new().name("dispatch_center".into());
    let _ = unwrap_or_exit!(center_thread.spawn(move || center.run()));

    // Event printer standing in for the presentation layer
    let event_thread = Builder::new().name("event_log".into());
    let _ = unwrap_or_exit!(event_thread.spawn(move || {
        for event in event_rx.iter() {
            match event {
                BankEvent::FloorChanged(id, floor) => debug!("elevator {} at floor {}", id, floor),
                BankEvent::DoorOpened(id) => info!("elevator {}: door open", id),
                BankEvent::DoorClosed(id) => info!("elevator {}: door closed", id),
                BankEvent::DemandCleared(floor) => debug!("demand cleared at floor {}", floor),
                BankEvent::FaultStateChanged(id, faulted) => {
                    info!("elevator {}: faulted = {}", id, faulted)
                }
                BankEvent::HallCallRegistered(direction, floor) => {
                    info!("hall call {} registered at floor {}", direction, floor)
                }
                BankEvent::CarCallRegistered(id, floor) => {
                    info!("elevator {}: car call registered for floor {}", id, floor)
                }
            }
        }
    }));

    info!("commands: hall <up|down> <floor> | car <elevator> <floor> | fault <elevator>");

    // Line-oriented command shell on stdin
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = unwrap_or_exit!(line);
        match parse_command(&line) {
            Some(command) => unwrap_or_exit!(command_tx.send(command)),
            None => {
                if !line.trim().is_empty() {
                    warn!("unrecognized command: {}", line);
                }
            }
        }
    }
}

fn parse_command(line: &str) -> Option<BankCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        ["hall", direction, floor] => {
            let direction = match *direction {
                "up" => HallDirection::Up,
                "down" => HallDirection::Down,
                _ => return None,
            };
            Some(BankCommand::CallHall(direction, floor.parse().ok()?))
        }
        ["car", elevator, floor] => Some(BankCommand::CallCar(
            elevator.parse().ok()?,
            floor.parse().ok()?,
        )),
        ["fault", elevator] => Some(BankCommand::ToggleFault(elevator.parse().ok()?)),
        _ => None,
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
