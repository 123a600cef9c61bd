//! Core traits for the IoC container.

mod function;
mod locator;

pub use function::{Component, Function};
pub(crate) use function::AnyValue;
pub use locator::{IocContainer, ServiceLocator};
