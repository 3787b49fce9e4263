use std::fmt::Debug;

/// A lightweight, named handle to a piece of hardware state or command.
///
/// Handles are values: a registry hands out clones, so any state the handle gives access to must
/// live behind the handle (e.g. a shared cell owned by the hardware layer), not inside it.
///
/// Most handles derive this trait, which requires a `name: String` field:
///
/// ```
/// use hardware_interface::ResourceHandle;
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct StateHandle {
///     name: String,
///     position: f64,
/// }
///
/// let handle = StateHandle { name: "left_wheel_joint".to_string(), position: 0.0 };
/// assert_eq!(handle.name(), "left_wheel_joint");
/// ```
///
/// Anything else is rejected by the derive. Enums and tuple structs:
///
/// ```compile_fail
/// use hardware_interface::ResourceHandle;
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// enum Handle {
///     State { name: String },
/// }
/// ```
///
/// ```compile_fail
/// use hardware_interface::ResourceHandle;
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct Handle(String);
/// ```
///
/// structs without a `name` field:
///
/// ```compile_fail
/// use hardware_interface::ResourceHandle;
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct Handle {
///     id: String,
/// }
/// ```
///
/// and a `name` that isn't a `String`:
///
/// ```compile_fail
/// use hardware_interface::ResourceHandle;
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct Handle {
///     name: u32,
/// }
/// ```
pub trait ResourceHandle: Clone + Debug {
    fn name(&self) -> &str;
}
