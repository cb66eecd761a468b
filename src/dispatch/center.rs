/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::Builder;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::BankConfig;
use crate::demand::DemandRegistry;
use crate::dispatch::policy;
use crate::elevator::{ControllerCommand, ElevatorController};
use crate::shared::{
    BankCommand, BankEvent, CommitOrigin, ElevatorId, Floor, HallDirection, StatusBoard,
};
use crate::unwrap_or_exit;

/**
 * The aggregate owning the whole bank.
 *
 * `new` builds the shared demand registry and status board, then spawns one
 * controller thread per car. `run` is the command surface consumed by the
 * presentation layer: it validates each command at the boundary, updates
 * the registry, runs the dispatch policy for hall calls and fans car-level
 * commands out to the owning controller's channel.
 */
pub struct DispatchCenter {
    n_elevators: u8,
    n_floors: u8,
    registry: Arc<Mutex<DemandRegistry>>,
    statuses: StatusBoard,
    controller_txs: Vec<cbc::Sender<ControllerCommand>>,
    event_tx: cbc::Sender<BankEvent>,
    command_rx: cbc::Receiver<BankCommand>,
    terminate_rx: cbc::Receiver<()>,
}

impl DispatchCenter {
    pub fn new(
        config: &BankConfig,
        command_rx: cbc::Receiver<BankCommand>,
        event_tx: cbc::Sender<BankEvent>,
        terminate_rx: cbc::Receiver<()>,
    ) -> DispatchCenter {
        let registry = Arc::new(Mutex::new(DemandRegistry::new(config.n_elevators)));
        let statuses = StatusBoard::new(config.n_elevators);

        let mut controller_txs = Vec::with_capacity(config.n_elevators as usize);
        for id in 1..=config.n_elevators {
            let (cmd_tx, cmd_rx) = cbc::unbounded::<ControllerCommand>();
            let controller = ElevatorController::new(
                id,
                config,
                Arc::clone(&registry),
                statuses.clone(),
                event_tx.clone(),
                cmd_rx,
            );

            let controller_thread = Builder::new().name(format!("elevator_{}", id));
            let _ = unwrap_or_exit!(controller_thread.spawn(move || controller.run()));

            controller_txs.push(cmd_tx);
        }

        DispatchCenter {
            n_elevators: config.n_elevators,
            n_floors: config.n_floors,
            registry,
            statuses,
            controller_txs,
            event_tx,
            command_rx,
            terminate_rx,
        }
    }

    pub fn run(&mut self) {
        loop {
            cbc::select! {
                recv(self.command_rx) -> command => {
                    match command {
                        Ok(command) => self.handle_command(command),
                        Err(e) => {
                            error!("Command channel closed: {}", e);
                            return;
                        }
                    }
                }
                recv(self.terminate_rx) -> _ => {
                    info!("Dispatch center terminated");
                    for controller_tx in &self.controller_txs {
                        let _ = controller_tx.send(ControllerCommand::Terminate);
                    }
                    return;
                }
            }
        }
    }

    fn handle_command(&mut self, command: BankCommand) {
        match command {
            BankCommand::CallHall(direction, floor) => self.call_hall(direction, floor),
            BankCommand::CallCar(elevator, floor) => self.call_car(elevator, floor),
            BankCommand::ToggleFault(elevator) => self.toggle_fault(elevator),
        }
    }

    /// Registers a hall call and assigns it to the nearest in-service car.
    /// With no eligible car the call stays registered, unassigned, until a
    /// fault recovery or a repeated call at the same floor picks it up;
    /// nothing re-scans pending calls in the background.
    fn call_hall(&mut self, direction: HallDirection, floor: Floor) {
        if !self.valid_floor(floor) {
            warn!("Rejected hall call at floor {}: out of range", floor);
            return;
        }
        if (direction == HallDirection::Up && floor == self.n_floors)
            || (direction == HallDirection::Down && floor == 1)
        {
            warn!("Rejected {} hall call at floor {}: no such call there", direction, floor);
            return;
        }

        let assigned = {
            let mut registry = self.registry.lock();
            registry.add_hall_call(direction, floor);

            let snapshots = self.statuses.snapshot();
            let assigned = policy::select_eligible(&snapshots, None, floor);
            if let Some(elevator) = assigned {
                registry.add_commit(elevator, floor, CommitOrigin::External);
            }
            assigned
        };

        let _ = self
            .event_tx
            .send(BankEvent::HallCallRegistered(direction, floor));

        match assigned {
            Some(elevator) => {
                debug!("Hall call {} at floor {} assigned to elevator {}", direction, floor, elevator)
            }
            None => warn!(
                "No eligible elevator for {} hall call at floor {}; call stays pending",
                direction, floor
            ),
        }
    }

    fn call_car(&mut self, elevator: ElevatorId, floor: Floor) {
        if !self.valid_elevator(elevator) || !self.valid_floor(floor) {
            warn!("Rejected car call: elevator {} floor {}", elevator, floor);
            return;
        }

        self.send_to_controller(elevator, ControllerCommand::CallCar(floor));
    }

    fn toggle_fault(&mut self, elevator: ElevatorId) {
        if !self.valid_elevator(elevator) {
            warn!("Rejected fault toggle: no elevator {}", elevator);
            return;
        }

        self.send_to_controller(elevator, ControllerCommand::ToggleFault);
    }

    fn send_to_controller(&self, elevator: ElevatorId, command: ControllerCommand) {
        if let Err(e) = self.controller_txs[(elevator - 1) as usize].send(command) {
            error!("Failed to reach elevator {}: {}", elevator, e);
        }
    }

    fn valid_floor(&self, floor: Floor) -> bool {
        (1..=self.n_floors).contains(&floor)
    }

    fn valid_elevator(&self, elevator: ElevatorId) -> bool {
        (1..=self.n_elevators).contains(&elevator)
    }
}

/***************************************/
/*            Test helpers             */
/***************************************/
#[cfg(test)]
impl DispatchCenter {
    pub fn test_registry(&self) -> Arc<Mutex<DemandRegistry>> {
        Arc::clone(&self.registry)
    }

    pub fn test_statuses(&self) -> StatusBoard {
        self.statuses.clone()
    }
}
