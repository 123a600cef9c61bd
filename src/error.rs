//! Error types for the IoC container.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::key::ComponentType;

/// Container errors
///
/// Every variant except [`Failed`](DiError::Failed) is a programming or
/// configuration mistake; none of them is transient. `Failed` carries an
/// error returned by a registered factory or by the invoked function,
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, DiError, Target};
///
/// #[derive(Clone)]
/// struct Missing;
///
/// let container = Container::new();
/// let err = container.invoke(Target::function(|_: Missing| ())).unwrap_err();
///
/// assert!(err.is_invalid_resolve_component());
/// assert!(err.unresolved_component().unwrap().is::<Missing>());
/// println!("Error: {}", err);
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// A registered function declares no result type
    RequireResponse,
    /// The component type is pointer-kind and the pointer policy rejects it
    UnableRegisterFunction(&'static str),
    /// `invoke` was given a value target instead of a function
    RequireFunction,
    /// `invoke` was given a function with no parameters
    NotFoundComponent,
    /// No factory is registered for a required component type
    InvalidResolveComponent(ComponentType),
    /// A function built with `Target::function` returns a `Result`; it must
    /// be declared with `Target::fallible` so its `Err` is propagated
    UndeclaredError(&'static str),
    /// An erased argument failed to downcast to its declared type
    TypeMismatch(&'static str),
    /// Error returned by a factory or by the invoked function
    Failed(Arc<dyn Error + Send + Sync + 'static>),
    /// Container options could not be parsed
    InvalidConfig(String),
}

impl DiError {
    /// Wraps an error returned by user code.
    ///
    /// A `DiError` is passed through as-is rather than nested, so errors
    /// raised by a nested `invoke` keep their variant.
    pub fn from_source<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let any: &dyn Any = &error;
        if let Some(inner) = any.downcast_ref::<DiError>() {
            return inner.clone();
        }
        DiError::Failed(Arc::new(error))
    }

    /// Same as [`from_source`](Self::from_source) for an already boxed error.
    pub fn from_boxed(error: Box<dyn Error + Send + Sync + 'static>) -> Self {
        match error.downcast::<DiError>() {
            Ok(inner) => *inner,
            Err(other) => DiError::Failed(Arc::from(other)),
        }
    }

    /// Returns `true` for [`DiError::InvalidResolveComponent`].
    pub fn is_invalid_resolve_component(&self) -> bool {
        matches!(self, DiError::InvalidResolveComponent(_))
    }

    /// The component type that could not be resolved, if any.
    pub fn unresolved_component(&self) -> Option<ComponentType> {
        match self {
            DiError::InvalidResolveComponent(component) => Some(*component),
            _ => None,
        }
    }

    /// Borrows the propagated user error as `E`.
    ///
    /// ```rust
    /// use ferrous_ioc::DiError;
    /// use std::fmt;
    ///
    /// #[derive(Debug)]
    /// struct Timeout;
    /// impl fmt::Display for Timeout {
    ///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    ///         f.write_str("timed out")
    ///     }
    /// }
    /// impl std::error::Error for Timeout {}
    ///
    /// let err = DiError::from_source(Timeout);
    /// assert!(err.downcast_ref::<Timeout>().is_some());
    /// assert_eq!(err.to_string(), "timed out");
    /// ```
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            DiError::Failed(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::RequireResponse => f.write_str("Registered function must declare a result type"),
            DiError::UnableRegisterFunction(name) => {
                write!(f, "Unable to register pointer-kind component: {}", name)
            }
            DiError::RequireFunction => f.write_str("Invoke requires a function target"),
            DiError::NotFoundComponent => f.write_str("Invoker declares no components to resolve"),
            DiError::InvalidResolveComponent(component) => {
                write!(f, "Unable to resolve component: {}", component)
            }
            DiError::UndeclaredError(name) => write!(
                f,
                "Function returns {} but was not declared fallible; use Target::fallible",
                name
            ),
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Failed(inner) => fmt::Display::fmt(inner, f),
            DiError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl Error for DiError {
    // Transparent: the wrapped error stands in for this one
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DiError::Failed(inner) => inner.source(),
            _ => None,
        }
    }
}

/// Result type for container operations
pub type DiResult<T> = Result<T, DiError>;
