//! Component lifetime definitions.

use std::fmt;

/// Lifetime scopes controlling instance caching behavior.
///
/// The scope is fixed at registration time by the shape of the target:
/// a plain value is always [`ContainerManaged`](LifetimeScope::ContainerManaged),
/// a function is always [`InvokeManaged`](LifetimeScope::InvokeManaged).
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, LifetimeScope, Target};
///
/// #[derive(Clone)]
/// struct Settings { verbose: bool }
/// #[derive(Clone)]
/// struct Session { verbose: bool }
///
/// let container = Container::new();
/// container.register(Target::value(Settings { verbose: true })).unwrap();
/// container.register(Target::function(|s: Settings| Session { verbose: s.verbose })).unwrap();
///
/// let descriptors = container.descriptors();
/// let settings = descriptors.iter().find(|d| d.type_name().contains("Settings")).unwrap();
/// let session = descriptors.iter().find(|d| d.type_name().contains("Session")).unwrap();
/// assert_eq!(settings.lifetime, LifetimeScope::ContainerManaged);
/// assert_eq!(session.lifetime, LifetimeScope::InvokeManaged);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifetimeScope {
    /// One instance per container, cached until the type is re-registered
    ///
    /// Produced lazily on first resolution and shared by every later
    /// resolution in every invocation.
    ContainerManaged,
    /// One instance per `invoke` call
    ///
    /// All parameters and nested dependencies resolved during a single
    /// invocation share the instance; the next invocation builds a new one.
    InvokeManaged,
}

impl fmt::Display for LifetimeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifetimeScope::ContainerManaged => f.write_str("container-managed"),
            LifetimeScope::InvokeManaged => f.write_str("invoke-managed"),
        }
    }
}
