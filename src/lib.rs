//! # ferrous-ioc
//!
//! A type-keyed inversion-of-control container: register values and factory
//! functions, then hand the container a function and let it supply every
//! parameter.
//!
//! ## Features
//!
//! - **Function injection**: any `Fn(T1, ..., Tn)` with up to twelve parameters
//! - **Two lifetimes**: container-managed values, invoke-managed factories
//! - **Per-invocation sharing**: one factory call per type per `invoke`
//! - **Self injection**: request `Container`, `Rc<dyn IocContainer>` or
//!   `Rc<dyn ServiceLocator>` to receive the running container
//! - **Structured errors**: factory errors are propagated unchanged
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_ioc::{new_container, Target};
//!
//! #[derive(Clone)]
//! struct Config { name: String }
//! #[derive(Clone)]
//! struct Logger { prefix: String }
//! #[derive(Clone)]
//! struct Service { logger: Logger, config: Config }
//!
//! let container = new_container();
//! container.register(Target::function(|| Logger { prefix: "[app]".into() })).unwrap();
//! container.register(Target::function(|| Config { name: "demo".into() })).unwrap();
//! container
//!     .register(Target::function(|logger: Logger, config: Config| Service { logger, config }))
//!     .unwrap();
//!
//! container
//!     .invoke(Target::function(|service: Service| {
//!         assert_eq!(service.logger.prefix, "[app]");
//!         assert_eq!(service.config.name, "demo");
//!     }))
//!     .unwrap();
//! ```
//!
//! ## Lifetimes
//!
//! - **Container-managed**: registered values. Produced once, shared by every
//!   invocation until the type is registered again.
//! - **Invoke-managed**: registered functions. Run at most once per `invoke`
//!   call; every parameter and nested dependency in that call shares the result.
//!
//! ```rust
//! use ferrous_ioc::{Container, Target};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! #[derive(Clone)]
//! struct RequestId(u32);
//!
//! let next = Rc::new(Cell::new(0));
//! let counter = next.clone();
//!
//! let container = Container::new();
//! container
//!     .register(Target::function(move || {
//!         counter.set(counter.get() + 1);
//!         RequestId(counter.get())
//!     }))
//!     .unwrap();
//!
//! // Same invocation, same instance
//! container
//!     .invoke(Target::function(|a: RequestId, b: RequestId| assert_eq!(a.0, b.0)))
//!     .unwrap();
//! // Next invocation, fresh instance
//! container
//!     .invoke(Target::function(|id: RequestId| assert_eq!(id.0, 2)))
//!     .unwrap();
//! ```

// Module declarations
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod target;
pub mod traits;

// Internal modules
mod registration;

// Re-export core types
pub use config::{ContainerOptions, OptionsConfig, PointerPolicy, DEFAULT_ENV_PREFIX};
pub use container::{new_container, Container};
pub use descriptors::ComponentDescriptor;
pub use error::{DiError, DiResult};
pub use key::{component_type_of, ComponentType, TypeKind};
pub use lifetime::LifetimeScope;
pub use observer::{DiObserver, LoggingObserver, MetricsObserver};
pub use target::Target;
pub use traits::{Component, Function, IocContainer, ServiceLocator};
