//! Capability views the container exposes and can inject into itself.

use crate::error::DiResult;
use crate::target::Target;

/// Service-locator view: invocation only.
///
/// Request `Rc<dyn ServiceLocator>` as a parameter to receive the container
/// that is running the invocation.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, ServiceLocator, Target};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// #[derive(Clone)]
/// struct Port(u16);
///
/// let container = Container::new();
/// container.register(Target::value(Port(8080))).unwrap();
///
/// let seen = Rc::new(Cell::new(0));
/// let sink = seen.clone();
/// container
///     .invoke(Target::function(move |locator: Rc<dyn ServiceLocator>| {
///         let sink = sink.clone();
///         locator
///             .invoke(Target::function(move |port: Port| sink.set(port.0)))
///             .unwrap();
///     }))
///     .unwrap();
/// assert_eq!(seen.get(), 8080);
/// ```
pub trait ServiceLocator {
    /// Resolves every parameter of `invoker` and calls it.
    fn invoke(&self, invoker: Target) -> DiResult<()>;
}

/// IoC-container view.
///
/// Currently the same capability set as [`ServiceLocator`]; requested as
/// `Rc<dyn IocContainer>`.
pub trait IocContainer: ServiceLocator {}
