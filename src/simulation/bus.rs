use crate::app_config::ResourceConfig;
use crate::simulation::handles::{CommandHandle, CommandInterface, StateHandle, StateInterface};
use std::cell::Cell;
use std::rc::Rc;
use tracing::trace;

#[derive(Debug)]
struct Channel {
    name: String,
    state: Rc<Cell<f64>>,
    command: Rc<Cell<f64>>,
}

/// Simulated hardware: one value per resource that follows its command with a first-order response.
#[derive(Debug)]
pub struct SimulatedBus {
    channels: Vec<Channel>,
    response: f64,
}

impl SimulatedBus {
    pub fn new(resources: &[ResourceConfig], response: f64) -> Self {
        let channels = resources
            .iter()
            .map(|resource| Channel {
                name: resource.name().to_owned(),
                state: Rc::new(Cell::new(resource.initial_value())),
                command: Rc::new(Cell::new(resource.initial_value())),
            })
            .collect();

        SimulatedBus { channels, response }
    }

    pub fn state_interface(&self) -> StateInterface {
        let mut interface = StateInterface::new();
        for channel in &self.channels {
            interface.register_handle(StateHandle::new(channel.name.clone(), channel.state.clone()));
        }
        interface
    }

    pub fn command_interface(&self) -> CommandInterface {
        let mut interface = CommandInterface::new();
        for channel in &self.channels {
            interface.register_handle(CommandHandle::new(
                channel.name.clone(),
                channel.state.clone(),
                channel.command.clone(),
            ));
        }
        interface
    }

    /// Moves every value towards its command.
    pub fn write(&self) {
        for channel in &self.channels {
            let state = channel.state.get();
            let next = state + (channel.command.get() - state) * self.response;
            channel.state.set(next);
            trace!(resource = channel.name, "🔧 {} -> {}", state, next);
        }
    }

    pub fn states(&self) -> Vec<(&str, f64)> {
        self.channels.iter().map(|c| (c.name.as_str(), c.state.get())).collect()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hardware_interface::{HardwareInterface, ResourceHandle};
    use pretty_assertions::assert_eq;

    fn bus() -> SimulatedBus {
        SimulatedBus::new(
            &[
                ResourceConfig::new("left_wheel_joint", 1.0),
                ResourceConfig::new("right_wheel_joint", 0.0),
            ],
            0.5,
        )
    }

    #[test]
    fn interfaces_expose_every_resource() {
        let bus = bus();

        assert_eq!(bus.len(), 2);
        assert_eq!(bus.state_interface().get_names(), vec!["left_wheel_joint", "right_wheel_joint"]);
        assert_eq!(bus.command_interface().get_names(), vec!["left_wheel_joint", "right_wheel_joint"]);
    }

    #[test]
    fn write_moves_states_towards_commands() {
        let bus = bus();
        let mut commands = bus.command_interface();
        commands.get_handle("right_wheel_joint").unwrap().set_command(2.0);

        bus.write();

        assert_eq!(bus.states(), vec![("left_wheel_joint", 1.0), ("right_wheel_joint", 1.0)]);
    }

    #[test]
    fn state_handles_observe_written_values() {
        let bus = bus();
        let states = bus.state_interface();
        let mut commands = bus.command_interface();
        let handle = states.get_handle("left_wheel_joint").unwrap();

        commands.get_handle("left_wheel_joint").unwrap().set_command(3.0);
        bus.write();

        assert_eq!(handle.name(), "left_wheel_joint");
        assert_eq!(handle.state(), 2.0);
    }
}
