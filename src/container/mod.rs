//! The IoC container.
//!
//! This module contains the [`Container`] type: registration of values and
//! factory functions, and invocation of functions whose parameters the
//! container resolves.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::config::{ContainerOptions, PointerPolicy};
use crate::descriptors::ComponentDescriptor;
use crate::error::{DiError, DiResult};
use crate::key::ComponentType;
use crate::registration::{FactoryInfo, Registry};
use crate::target::{Target, TargetKind};
use crate::traits::{AnyValue, Component, Function, IocContainer, ServiceLocator};

mod resolve;
mod scope;

use scope::InvokeScope;

/// Dependency-injection container.
///
/// Maps component types to factories and invokes functions with their
/// parameters resolved. A `Container` is a cheap handle: clones share the
/// same registry and caches.
///
/// # Lifetimes
///
/// - A registered **value** is container-managed: every resolution returns
///   (a clone of) the same instance until the type is registered again.
/// - A registered **function** is invoke-managed: it runs at most once per
///   `invoke` call, and every consumer within that call shares its result.
///
/// # Threading
///
/// The container is single-threaded. It is neither `Send` nor `Sync`, so
/// sharing one across threads does not compile.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, Target};
///
/// #[derive(Clone)]
/// struct Database { url: String }
/// #[derive(Clone)]
/// struct UserService { db: Database }
///
/// let container = Container::new();
/// container.register(Target::value(Database { url: "postgres://localhost".to_string() })).unwrap();
/// container.register(Target::function(|db: Database| UserService { db })).unwrap();
///
/// container
///     .invoke(Target::function(|users: UserService| {
///         assert_eq!(users.db.url, "postgres://localhost");
///     }))
///     .unwrap();
/// ```
pub struct Container {
    inner: Rc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    pub(crate) registry: RefCell<Registry>,
    pub(crate) cache: RefCell<HashMap<ComponentType, AnyValue>>,
    pub(crate) options: ContainerOptions,
}

impl Container {
    /// Creates an empty container with default options.
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// Creates an empty container.
    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            inner: Rc::new(ContainerInner {
                registry: RefCell::new(Registry::new()),
                cache: RefCell::new(HashMap::new()),
                options,
            }),
        }
    }

    /// Registers a value or a factory function.
    ///
    /// A value is keyed by its own type; a function by its first declared
    /// result type, with its parameters as dependencies. Registering a type
    /// again replaces the previous entry and evicts its cached instance.
    ///
    /// # Errors
    ///
    /// - [`DiError::RequireResponse`] if the function declares no result
    /// - [`DiError::UndeclaredError`] if a `Target::function` returns `Result`
    /// - [`DiError::UnableRegisterFunction`] if the component type is
    ///   pointer-kind and the [`PointerPolicy`] is `Reject`
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, DiError, Target};
    ///
    /// let container = Container::new();
    /// container.register(Target::value(1u32)).unwrap();
    ///
    /// let err = container.register(Target::function(|_: u32| ())).unwrap_err();
    /// assert!(matches!(err, DiError::RequireResponse));
    /// ```
    pub fn register(&self, target: Target) -> DiResult<()> {
        let (component, info) = FactoryInfo::from_target(target)?;

        if component.kind().is_pointer() && self.inner.options.pointer_policy == PointerPolicy::Reject {
            return Err(DiError::UnableRegisterFunction(component.name()));
        }

        let lifetime = info.lifetime;
        self.inner.registry.borrow_mut().insert(component, info);
        self.inner.cache.borrow_mut().remove(&component);

        self.inner.options.observers.registered(&component, lifetime);
        Ok(())
    }

    /// Registers a ready-made value.
    pub fn register_value<T: Component>(&self, value: T) -> DiResult<()> {
        self.register(Target::value(value))
    }

    /// Registers an infallible factory function.
    pub fn register_function<Args, F>(&self, function: F) -> DiResult<()>
    where
        Args: 'static,
        F: Function<Args>,
        F::Output: Component,
    {
        self.register(Target::function(function))
    }

    /// Registers a factory function returning `Result<T, E>`.
    pub fn register_fallible<Args, F, T, E>(&self, function: F) -> DiResult<()>
    where
        Args: 'static,
        F: Function<Args, Output = Result<T, E>>,
        T: Component,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.register(Target::fallible(function))
    }

    /// Resolves every parameter of `invoker` and calls it.
    ///
    /// One invoke-scoped cache is shared by all resolutions this call
    /// triggers. Parameters are resolved in declaration order and the first
    /// failure aborts the call before `invoker` runs.
    ///
    /// # Errors
    ///
    /// - [`DiError::RequireFunction`] if `invoker` is a value target
    /// - [`DiError::NotFoundComponent`] if `invoker` takes no parameters
    /// - [`DiError::UndeclaredError`] if a `Target::function` returns `Result`
    /// - [`DiError::InvalidResolveComponent`] for a missing registration
    /// - any error returned by a factory, or by `invoker` itself, unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// use ferrous_ioc::{Container, DiError, Target};
    ///
    /// let container = Container::new();
    /// assert!(matches!(container.invoke(Target::value(1u8)), Err(DiError::RequireFunction)));
    /// assert!(matches!(container.invoke(Target::function(|| ())), Err(DiError::NotFoundComponent)));
    /// ```
    pub fn invoke(&self, invoker: Target) -> DiResult<()> {
        let function = match invoker.kind {
            TargetKind::Function(function) => function,
            TargetKind::Value { .. } => return Err(DiError::RequireFunction),
        };
        function.check_declared()?;
        if function.parameters.is_empty() {
            return Err(DiError::NotFoundComponent);
        }

        let observers = &self.inner.options.observers;
        let start = observers.has_observers().then(std::time::Instant::now);

        let mut scope = InvokeScope::new();
        let args = self.resolve_arguments(&function.parameters, &mut scope)?;
        if let Some(error) = function.call(&args)?.trailing_error() {
            return Err(error);
        }

        if let Some(start) = start {
            observers.invoked(function.parameters.len(), start.elapsed());
        }
        Ok(())
    }

    /// Invokes an infallible function.
    pub fn invoke_function<Args, F>(&self, function: F) -> DiResult<()>
    where
        Args: 'static,
        F: Function<Args>,
        F::Output: Component,
    {
        self.invoke(Target::function(function))
    }

    /// Invokes a function returning `Result<T, E>`; `Err` is returned unchanged.
    pub fn invoke_fallible<Args, F, T, E>(&self, function: F) -> DiResult<()>
    where
        Args: 'static,
        F: Function<Args, Output = Result<T, E>>,
        T: Component,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.invoke(Target::fallible(function))
    }

    /// Returns `true` if a factory is registered for `T`.
    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.inner.registry.borrow().contains_key(&ComponentType::of::<T>())
    }

    /// Returns `true` if a container-managed instance of `T` is cached.
    pub fn is_cached<T: ?Sized + 'static>(&self) -> bool {
        self.inner.cache.borrow().contains_key(&ComponentType::of::<T>())
    }

    /// Number of registered component types.
    pub fn len(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes every registration, sorted by type name.
    pub fn descriptors(&self) -> Vec<ComponentDescriptor> {
        let registry = self.inner.registry.borrow();
        let mut descriptors: Vec<ComponentDescriptor> = registry
            .iter()
            .map(|(component, info)| ComponentDescriptor {
                component: *component,
                lifetime: info.lifetime,
                parameters: info.parameter_types().to_vec(),
                is_callable: info.is_callable(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.type_name().cmp(b.type_name()));
        descriptors
    }

    /// The options this container was created with.
    pub fn options(&self) -> &ContainerOptions {
        &self.inner.options
    }

    /// Returns `true` if both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        s.push_str(&format!("Pointer policy: {}\n", self.inner.options.pointer_policy));
        s.push_str("Registrations:\n");
        for d in self.descriptors() {
            let params: Vec<&str> = d.parameters.iter().map(|p| p.name()).collect();
            s.push_str(&format!("  {}: {} [{}]\n", d.type_name(), d.lifetime, params.join(", ")));
        }
        s.push_str("Container-managed cache:\n");
        let mut cached: Vec<&str> = self.inner.cache.borrow().keys().map(|k| k.name()).collect();
        cached.sort_unstable();
        for name in cached {
            s.push_str(&format!("  {}\n", name));
        }
        s
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("registrations", &self.len())
            .field("cached", &self.inner.cache.borrow().len())
            .field("options", &self.inner.options)
            .finish()
    }
}

impl ServiceLocator for Container {
    fn invoke(&self, invoker: Target) -> DiResult<()> {
        Container::invoke(self, invoker)
    }
}

impl IocContainer for Container {}

/// Creates a new, empty container with default options.
pub fn new_container() -> Container {
    Container::new()
}
