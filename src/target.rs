//! Registration and invocation targets.
//!
//! A [`Target`] is either a ready value or a function. Functions are
//! type-erased on construction: the container only sees their ordered
//! parameter types, their declared result types and an erased call that
//! reports a trailing error separately from the produced value.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::error::{DiError, DiResult};
use crate::key::ComponentType;
use crate::traits::{AnyValue, Component, Function};

type ErasedCall = Box<dyn Fn(&[AnyValue]) -> DiResult<Outputs>>;

/// Something the container can register or invoke.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Target;
/// use std::fmt;
///
/// #[derive(Clone)]
/// struct Config { url: String }
/// #[derive(Clone)]
/// struct Client { url: String }
///
/// #[derive(Debug)]
/// struct BadUrl;
/// impl fmt::Display for BadUrl {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("bad url") }
/// }
/// impl std::error::Error for BadUrl {}
///
/// let value = Target::value(Config { url: "mem://".into() });
/// assert!(!value.is_callable());
///
/// let factory = Target::function(|c: Config| Client { url: c.url });
/// assert!(factory.is_callable());
/// assert!(factory.parameter_types()[0].is::<Config>());
/// assert!(factory.result_types()[0].is::<Client>());
///
/// let fallible = Target::fallible(|c: Config| {
///     if c.url.is_empty() { Err(BadUrl) } else { Ok(Client { url: c.url }) }
/// });
/// assert!(fallible.result_types()[0].is::<Client>());
/// ```
pub struct Target {
    pub(crate) kind: TargetKind,
}

pub(crate) enum TargetKind {
    Value {
        component: ComponentType,
        value: AnyValue,
    },
    Function(ErasedFunction),
}

impl Target {
    /// A ready-made instance.
    pub fn value<T: Component>(value: T) -> Self {
        Self {
            kind: TargetKind::Value {
                component: ComponentType::of::<T>(),
                value: Rc::new(value),
            },
        }
    }

    /// An infallible function.
    ///
    /// A function returning `()` declares no result: it can be invoked but
    /// not registered. A function returning `Result` belongs in
    /// [`fallible`](Self::fallible); built here, it is refused by both
    /// `register` and `invoke` with [`DiError::UndeclaredError`].
    pub fn function<Args, F>(function: F) -> Self
    where
        Args: 'static,
        F: Function<Args>,
        F::Output: Component,
    {
        let output = ComponentType::of::<F::Output>();
        let returns_value = !output.is::<()>();
        let call: ErasedCall = Box::new(move |args: &[AnyValue]| {
            let out = function.call_erased(args)?;
            Ok(if returns_value {
                Outputs::value(Rc::new(out))
            } else {
                Outputs::empty()
            })
        });

        Self {
            kind: TargetKind::Function(ErasedFunction {
                parameters: F::parameter_types(),
                results: if returns_value { vec![output] } else { Vec::new() },
                fallible: false,
                call,
            }),
        }
    }

    /// A function returning `Result<T, E>`.
    ///
    /// `Err` is treated as the trailing error result and propagated
    /// unchanged; `Ok(())` declares no result.
    pub fn fallible<Args, F, T, E>(function: F) -> Self
    where
        Args: 'static,
        F: Function<Args, Output = Result<T, E>>,
        T: Component,
        E: Error + Send + Sync + 'static,
    {
        let output = ComponentType::of::<T>();
        let returns_value = !output.is::<()>();
        let call: ErasedCall = Box::new(move |args: &[AnyValue]| match function.call_erased(args)? {
            Ok(out) if returns_value => Ok(Outputs::value(Rc::new(out))),
            Ok(_) => Ok(Outputs::empty()),
            Err(error) => Ok(Outputs::failed(DiError::from_source(error))),
        });

        Self {
            kind: TargetKind::Function(ErasedFunction {
                parameters: F::parameter_types(),
                results: if returns_value { vec![output] } else { Vec::new() },
                fallible: true,
                call,
            }),
        }
    }

    /// Returns `true` for function targets.
    pub fn is_callable(&self) -> bool {
        matches!(self.kind, TargetKind::Function(_))
    }

    /// Parameter types of a function target; empty for values.
    pub fn parameter_types(&self) -> &[ComponentType] {
        match &self.kind {
            TargetKind::Value { .. } => &[],
            TargetKind::Function(function) => &function.parameters,
        }
    }

    /// Declared result types, excluding the trailing error.
    ///
    /// A value target reports its own type.
    pub fn result_types(&self) -> Vec<ComponentType> {
        match &self.kind {
            TargetKind::Value { component, .. } => vec![*component],
            TargetKind::Function(function) => function.results.clone(),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TargetKind::Value { component, .. } => {
                f.debug_struct("Target::Value").field("type", &component.name()).finish()
            }
            TargetKind::Function(function) => f
                .debug_struct("Target::Function")
                .field("parameters", &function.parameters.iter().map(|p| p.name()).collect::<Vec<_>>())
                .field("results", &function.results.iter().map(|r| r.name()).collect::<Vec<_>>())
                .field("fallible", &function.fallible)
                .finish(),
        }
    }
}

/// Type-erased function with its signature.
pub(crate) struct ErasedFunction {
    pub(crate) parameters: Vec<ComponentType>,
    pub(crate) results: Vec<ComponentType>,
    pub(crate) fallible: bool,
    call: ErasedCall,
}

impl ErasedFunction {
    /// Refuses a `Result` output that was not declared fallible.
    pub(crate) fn check_declared(&self) -> DiResult<()> {
        match self.results.first() {
            Some(output) if !self.fallible && output.is_result() => {
                Err(DiError::UndeclaredError(output.name()))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn call(&self, args: &[AnyValue]) -> DiResult<Outputs> {
        (self.call)(args)
    }
}

/// What an erased call returned.
pub(crate) struct Outputs {
    values: Vec<AnyValue>,
    error: Option<DiError>,
}

impl Outputs {
    fn value(value: AnyValue) -> Self {
        Self { values: vec![value], error: None }
    }

    fn empty() -> Self {
        Self { values: Vec::new(), error: None }
    }

    fn failed(error: DiError) -> Self {
        Self { values: Vec::new(), error: Some(error) }
    }

    /// The trailing error, if the call returned one.
    pub(crate) fn trailing_error(&mut self) -> Option<DiError> {
        self.error.take()
    }

    /// First produced value, failing with the trailing error if present.
    pub(crate) fn into_first(mut self) -> DiResult<AnyValue> {
        if let Some(error) = self.trailing_error() {
            return Err(error);
        }
        self.values.into_iter().next().ok_or(DiError::RequireResponse)
    }
}
