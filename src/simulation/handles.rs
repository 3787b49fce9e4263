use hardware_interface::{ClaimResources, DontClaimResources, HardwareResourceManager, ResourceHandle};
use std::cell::Cell;
use std::rc::Rc;

pub type StateInterface = HardwareResourceManager<StateHandle, DontClaimResources>;
pub type CommandInterface = HardwareResourceManager<CommandHandle, ClaimResources>;

/// Read access to the value of a simulated resource.
#[derive(Clone, Debug, ResourceHandle)]
pub struct StateHandle {
    name: String,
    state: Rc<Cell<f64>>,
}

impl StateHandle {
    pub fn new(name: String, state: Rc<Cell<f64>>) -> Self {
        StateHandle { name, state }
    }

    pub fn state(&self) -> f64 {
        self.state.get()
    }
}

/// Write access to the command of a simulated resource, plus read access to its value.
#[derive(Clone, Debug, ResourceHandle)]
pub struct CommandHandle {
    name: String,
    state: Rc<Cell<f64>>,
    command: Rc<Cell<f64>>,
}

impl CommandHandle {
    pub fn new(name: String, state: Rc<Cell<f64>>, command: Rc<Cell<f64>>) -> Self {
        CommandHandle { name, state, command }
    }

    pub fn state(&self) -> f64 {
        self.state.get()
    }

    pub fn command(&self) -> f64 {
        self.command.get()
    }

    pub fn set_command(&self, command: f64) {
        self.command.set(command);
    }
}
