use crate::interface::HardwareInterface;
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Owns the hardware interfaces of a robot, at most one per interface type.
#[derive(Default)]
pub struct InterfaceManager {
    interfaces: HashMap<TypeId, Box<dyn HardwareInterface>>,
}

impl InterfaceManager {
    pub fn new() -> Self {
        InterfaceManager { interfaces: HashMap::new() }
    }

    pub fn register<I: HardwareInterface + 'static>(&mut self, interface: I) {
        let name = interface.interface_name();
        if self.interfaces.insert(TypeId::of::<I>(), Box::new(interface)).is_some() {
            warn!("⚠️ Replaced previously registered interface '{}'", name);
        } else {
            info!("🔌 Registered interface '{}'", name);
        }
    }

    pub fn get<I: HardwareInterface + 'static>(&self) -> Option<&I> {
        self.interfaces.get(&TypeId::of::<I>()).and_then(|i| i.as_any().downcast_ref::<I>())
    }

    pub fn get_mut<I: HardwareInterface + 'static>(&mut self) -> Option<&mut I> {
        self.interfaces
            .get_mut(&TypeId::of::<I>())
            .and_then(|i| i.as_any_mut().downcast_mut::<I>())
    }

    /// Returns the names of all registered interfaces, sorted.
    pub fn get_names(&self) -> Vec<String> {
        let mut names = self.interfaces.values().map(|i| i.interface_name()).collect::<Vec<_>>();
        names.sort();
        names
    }

    /// Releases every claim on every interface. Called at the start of each control cycle.
    pub fn clear_claims(&mut self) {
        for interface in self.interfaces.values_mut() {
            interface.clear_claims();
        }
    }

    /// Fails if any resource of an interface is claimed by more than one controller.
    ///
    /// Interfaces are told apart by type, their names are only used for reporting.
    #[instrument(skip_all)]
    pub fn check_for_conflict(controllers: &[ControllerInfo]) -> Result<(), ConflictError> {
        let mut claimed_by: BTreeMap<(&str, TypeId, &str), Vec<&str>> = BTreeMap::new();

        for controller in controllers {
            for claimed in &controller.claimed_resources {
                for resource in &claimed.resources {
                    claimed_by
                        .entry((claimed.hardware_interface.as_str(), claimed.interface, resource.as_str()))
                        .or_default()
                        .push(controller.name.as_str());
                }
            }
        }

        let conflicts = claimed_by
            .into_iter()
            .filter(|(_, controllers)| controllers.len() > 1)
            .map(|((hardware_interface, _, resource), controllers)| ResourceConflict {
                hardware_interface: hardware_interface.to_owned(),
                resource: resource.to_owned(),
                controllers: controllers.into_iter().map(str::to_owned).collect(),
            })
            .collect::<Vec<_>>();

        if conflicts.is_empty() {
            debug!("🟢 No conflicts between {} controller(s)", controllers.len());
            return Ok(());
        }

        for conflict in &conflicts {
            warn!("⚠️ {}", conflict);
        }
        Err(ConflictError { conflicts })
    }
}

/// The resources a controller claims, grouped by hardware interface.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ControllerInfo {
    pub name: String,
    pub claimed_resources: Vec<InterfaceResources>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InterfaceResources {
    pub interface: TypeId,
    pub hardware_interface: String,
    pub resources: BTreeSet<String>,
}

impl InterfaceResources {
    /// Resources claimed on the interface type `I`. `hardware_interface` names it in reports.
    pub fn new<I: HardwareInterface + 'static>(
        hardware_interface: impl Into<String>,
        resources: impl IntoIterator<Item = String>,
    ) -> Self {
        InterfaceResources {
            interface: TypeId::of::<I>(),
            hardware_interface: hardware_interface.into(),
            resources: resources.into_iter().collect(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ResourceConflict {
    pub hardware_interface: String,
    pub resource: String,
    pub controllers: Vec<String>,
}

impl Display for ResourceConflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "resource '{}' of '{}' is claimed by {}",
            self.resource,
            self.hardware_interface,
            self.controllers.join(", ")
        )
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("conflicting controllers: {}", .conflicts.iter().map(|c| c.to_string()).collect::<Vec<_>>().join("; "))]
pub struct ConflictError {
    pub conflicts: Vec<ResourceConflict>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClaimResources, DontClaimResources, HardwareResourceManager, ResourceHandle};
    use pretty_assertions::assert_eq;
    use test_log::test;

    #[derive(Clone, Debug, PartialEq, ResourceHandle)]
    struct TestHandle {
        name: String,
    }

    type StateInterface = HardwareResourceManager<TestHandle, DontClaimResources>;
    type CommandInterface = HardwareResourceManager<TestHandle, ClaimResources>;

    fn manager() -> InterfaceManager {
        let mut states = StateInterface::new();
        let mut commands = CommandInterface::new();
        for name in ["left_wheel_joint", "right_wheel_joint"] {
            states.register_handle(TestHandle { name: name.to_string() });
            commands.register_handle(TestHandle { name: name.to_string() });
        }

        let mut manager = InterfaceManager::new();
        manager.register(states);
        manager.register(commands);
        manager
    }

    fn controller<I: HardwareInterface + 'static>(name: &str, interface: &str, resources: &[&str]) -> ControllerInfo {
        ControllerInfo {
            name: name.to_string(),
            claimed_resources: vec![InterfaceResources::new::<I>(
                interface,
                resources.iter().map(|r| r.to_string()),
            )],
        }
    }
    #[test]
    fn get_returns_interfaces_by_type() {
        let manager = manager();

        let states = manager.get::<StateInterface>().expect("state interface");
        let commands = manager.get::<CommandInterface>().expect("command interface");

        assert_eq!(states.get_names(), vec!["left_wheel_joint", "right_wheel_joint"]);
        assert_eq!(commands.get_names(), vec!["left_wheel_joint", "right_wheel_joint"]);
    }

    #[test]
    fn get_returns_none_for_an_unregistered_type() {
        let manager = InterfaceManager::new();

        assert!(manager.get::<StateInterface>().is_none());
        assert!(manager.get_names().is_empty());
    }

    #[test]
    fn register_replaces_an_interface_of_the_same_type() {
        let mut manager = manager();

        manager.register(StateInterface::new());

        assert_eq!(manager.get_names().len(), 2);
        assert!(manager.get::<StateInterface>().unwrap().get_names().is_empty());
    }

    #[test]
    fn clear_claims_releases_claims_on_every_interface() {
        let mut manager = manager();
        let commands = manager.get_mut::<CommandInterface>().unwrap();
        commands.get_handle("left_wheel_joint").unwrap();
        assert!(commands.is_claimed("left_wheel_joint"));

        manager.clear_claims();

        let commands = manager.get_mut::<CommandInterface>().unwrap();
        assert!(commands.get_claims().is_empty());
        assert!(commands.get_handle("left_wheel_joint").is_ok());
    }

    #[test]
    fn check_for_conflict_accepts_disjoint_claims() {
        let controllers = vec![
            controller::<CommandInterface>("left", "CommandInterface", &["left_wheel_joint"]),
            controller::<CommandInterface>("right", "CommandInterface", &["right_wheel_joint"]),
        ];

        assert_eq!(InterfaceManager::check_for_conflict(&controllers), Ok(()));
    }

    #[test]
    fn check_for_conflict_accepts_the_same_resource_on_different_interfaces() {
        let controllers = vec![
            controller::<CommandInterface>("drive", "CommandInterface", &["left_wheel_joint"]),
            controller::<StateInterface>("odometry", "StateInterface", &["left_wheel_joint"]),
        ];

        assert_eq!(InterfaceManager::check_for_conflict(&controllers), Ok(()));
    }

    #[test]
    fn check_for_conflict_reports_every_shared_resource() {
        let controllers = vec![
            controller::<CommandInterface>("drive", "CommandInterface", &["left_wheel_joint", "right_wheel_joint"]),
            controller::<CommandInterface>("teleop", "CommandInterface", &["left_wheel_joint"]),
            controller::<CommandInterface>("brake", "CommandInterface", &["left_wheel_joint", "right_wheel_joint"]),
        ];

        let result = InterfaceManager::check_for_conflict(&controllers);

        let error = result.unwrap_err();
        assert_eq!(
            error.conflicts,
            vec![
                ResourceConflict {
                    hardware_interface: "CommandInterface".to_string(),
                    resource: "left_wheel_joint".to_string(),
                    controllers: vec!["drive".to_string(), "teleop".to_string(), "brake".to_string()],
                },
                ResourceConflict {
                    hardware_interface: "CommandInterface".to_string(),
                    resource: "right_wheel_joint".to_string(),
                    controllers: vec!["drive".to_string(), "brake".to_string()],
                },
            ]
        );
        assert_eq!(
            error.to_string(),
            "conflicting controllers: resource 'left_wheel_joint' of 'CommandInterface' is claimed by drive, teleop, brake; \
             resource 'right_wheel_joint' of 'CommandInterface' is claimed by drive, brake"
        );
    }

    #[test]
    fn check_for_conflict_accepts_no_controllers() {
        assert_eq!(InterfaceManager::check_for_conflict(&[]), Ok(()));
    }

    mod front {
        use crate::ResourceHandle;

        #[derive(Clone, Debug, ResourceHandle)]
        pub struct WheelHandle {
            pub name: String,
        }
    }

    mod rear {
        use crate::ResourceHandle;

        #[derive(Clone, Debug, ResourceHandle)]
        pub struct WheelHandle {
            pub name: String,
        }
    }

    #[test]
    fn check_for_conflict_tells_same_named_handle_types_apart() {
        type FrontInterface = HardwareResourceManager<front::WheelHandle, ClaimResources>;
        type RearInterface = HardwareResourceManager<rear::WheelHandle, ClaimResources>;
        let mut manager = InterfaceManager::new();
        manager.register(FrontInterface::new());
        manager.register(RearInterface::new());

        let controllers = vec![
            controller::<FrontInterface>("front_drive", &FrontInterface::type_name(), &["wheel_joint"]),
            controller::<RearInterface>("rear_drive", &RearInterface::type_name(), &["wheel_joint"]),
        ];

        assert_eq!(FrontInterface::type_name(), RearInterface::type_name());
        assert_eq!(manager.get_names().len(), 2);
        assert_eq!(InterfaceManager::check_for_conflict(&controllers), Ok(()));
    }

    #[test]
    fn check_for_conflict_reports_same_named_resources_on_one_type() {
        let controllers = vec![
            controller::<CommandInterface>("drive", "CommandInterface", &["left_wheel_joint"]),
            controller::<CommandInterface>("teleop", "CommandInterface", &["left_wheel_joint"]),
        ];

        let result = InterfaceManager::check_for_conflict(&controllers);

        assert_eq!(result.map_err(|e| e.conflicts.len()), Err(1));
    }
}
