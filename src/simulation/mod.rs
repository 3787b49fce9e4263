mod bus;
mod control_loop;
mod controller;
mod handles;

pub use bus::SimulatedBus;
pub use control_loop::run;
pub use controller::SetpointController;
