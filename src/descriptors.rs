//! Component descriptors for introspection and diagnostics.

use crate::key::ComponentType;
use crate::lifetime::LifetimeScope;

/// Component descriptor for introspection and diagnostics
///
/// Snapshot of one registry entry: what it produces, how long instances
/// live, and which components it needs.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, LifetimeScope, Target};
///
/// #[derive(Clone)]
/// struct Database { url: String }
/// #[derive(Clone)]
/// struct Repository { url: String }
///
/// let container = Container::new();
/// container.register(Target::value(Database { url: "postgres://localhost".into() })).unwrap();
/// container.register(Target::function(|db: Database| Repository { url: db.url })).unwrap();
///
/// let descriptors = container.descriptors();
/// let repo = descriptors.iter().find(|d| d.type_name().contains("Repository")).unwrap();
/// assert_eq!(repo.lifetime, LifetimeScope::InvokeManaged);
/// assert!(repo.is_callable);
/// assert!(repo.depends_on(&ferrous_ioc::component_type_of::<Database>()));
/// ```
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// The component type this entry produces
    pub component: ComponentType,
    /// Lifetime scope fixed at registration
    pub lifetime: LifetimeScope,
    /// Dependencies, in declaration order (empty for values)
    pub parameters: Vec<ComponentType>,
    /// Whether the entry is a function rather than a value
    pub is_callable: bool,
}

impl ComponentDescriptor {
    /// Get the component type name
    pub fn type_name(&self) -> &'static str {
        self.component.name()
    }

    /// Returns `true` if `component` is one of this entry's parameters.
    pub fn depends_on(&self, component: &ComponentType) -> bool {
        self.parameters.contains(component)
    }
}
