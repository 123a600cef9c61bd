//! Container options.
//!
//! Options are fixed when the container is created. They can be built in
//! code, read from environment variables, or (with the `config` feature)
//! parsed from JSON.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::observer::{DiObserver, Observers};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "FERROUS_IOC";

/// What `register` does with a pointer-kind component type.
///
/// References, raw pointers and smart pointers to sized types are
/// pointer-kind (see [`TypeKind`](crate::TypeKind)). Smart pointers to
/// `dyn Trait` are interface-kind and always accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum PointerPolicy {
    /// Fail with [`DiError::UnableRegisterFunction`]
    #[default]
    Reject,
    /// Register pointer-kind components like any other type
    Allow,
}

impl FromStr for PointerPolicy {
    type Err = DiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(PointerPolicy::Reject),
            "allow" => Ok(PointerPolicy::Allow),
            other => Err(DiError::InvalidConfig(format!(
                "unknown pointer policy '{}', expected 'reject' or 'allow'",
                other
            ))),
        }
    }
}

impl fmt::Display for PointerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerPolicy::Reject => f.write_str("reject"),
            PointerPolicy::Allow => f.write_str("allow"),
        }
    }
}

/// Serializable part of [`ContainerOptions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OptionsConfig {
    pub pointer_policy: PointerPolicy,
}

/// Options for a new container.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{Container, ContainerOptions, DiError, PointerPolicy, Target};
/// use std::rc::Rc;
///
/// let strict = Container::new();
/// assert!(matches!(
///     strict.register(Target::value(Rc::new(5u32))),
///     Err(DiError::UnableRegisterFunction(_))
/// ));
///
/// let relaxed = Container::with_options(
///     ContainerOptions::new().pointer_policy(PointerPolicy::Allow),
/// );
/// assert!(relaxed.register(Target::value(Rc::new(5u32))).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct ContainerOptions {
    pub(crate) pointer_policy: PointerPolicy,
    pub(crate) observers: Observers,
}

impl ContainerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pointer policy.
    pub fn pointer_policy(mut self, policy: PointerPolicy) -> Self {
        self.pointer_policy = policy;
        self
    }

    /// Adds an observer. Observers are notified in the order they were added.
    pub fn observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    /// Applies a serializable configuration, keeping observers.
    pub fn apply(mut self, config: OptionsConfig) -> Self {
        self.pointer_policy = config.pointer_policy;
        self
    }

    /// The serializable part of these options.
    pub fn config(&self) -> OptionsConfig {
        OptionsConfig {
            pointer_policy: self.pointer_policy,
        }
    }

    /// Reads options from `FERROUS_IOC_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Reads options from `<PREFIX>_*` environment variables.
    ///
    /// Recognized variables:
    /// - `<PREFIX>_POINTER_POLICY`: `reject` or `allow`, case-insensitive
    ///
    /// Unset variables keep their defaults.
    pub fn from_env_with_prefix(prefix: &str) -> DiResult<Self> {
        let mut options = Self::new();
        let key = format!("{}_POINTER_POLICY", prefix.to_uppercase());
        if let Ok(raw) = env::var(&key) {
            options.pointer_policy = raw.parse()?;
        }
        Ok(options)
    }

    /// Parses options from JSON, e.g. `{"pointer_policy": "allow"}`.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let config: OptionsConfig =
            serde_json::from_str(json).map_err(|e| DiError::InvalidConfig(e.to_string()))?;
        Ok(Self::new().apply(config))
    }
}

impl fmt::Debug for ContainerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerOptions")
            .field("pointer_policy", &self.pointer_policy)
            .field("observers", &format!("{} observers", self.observers.len()))
            .finish()
    }
}
