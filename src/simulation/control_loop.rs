use crate::simulation::bus::SimulatedBus;
use crate::simulation::controller::{ControllerError, SetpointController};
use hardware_interface::InterfaceManager;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// Runs `cycles` control cycles, one every `period`.
#[instrument(skip(bus, interfaces, controllers))]
pub async fn run(
    bus: &SimulatedBus,
    interfaces: &mut InterfaceManager,
    controllers: &[SetpointController],
    period: Duration,
    cycles: u64,
) -> Result<(), ControllerError> {
    info!("🔁 Running {} control cycle(s)...", cycles);
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    for cycle in 0..cycles {
        interval.tick().await;
        run_cycle(bus, interfaces, controllers)?;
        debug!(cycle, "🔁 Completed cycle");
    }

    info!("🔁 Running {} control cycle(s)... OK", cycles);
    Ok(())
}

/// Claims only last for one cycle: they are released before the controllers update.
fn run_cycle(bus: &SimulatedBus, interfaces: &mut InterfaceManager, controllers: &[SetpointController]) -> Result<(), ControllerError> {
    interfaces.clear_claims();

    for controller in controllers {
        controller.update(interfaces)?;
    }

    bus.write();
    Ok(())
}
