//! Function introspection for injectable callables.

use std::any::Any;
use std::rc::Rc;

use crate::error::{DiError, DiResult};
use crate::key::ComponentType;

// Type-erased component value
pub(crate) type AnyValue = Rc<dyn Any>;

/// Marker for types that can be registered, resolved and injected.
///
/// Components are handed to functions by value, so every injection clones
/// the stored instance. Share state between injections by making the
/// component a cheap handle (an `Rc` field, a `Rc<dyn Trait>`, ...).
pub trait Component: Clone + 'static {}

impl<T: Clone + 'static> Component for T {}

/// A callable whose parameters the container can supply.
///
/// Implemented for every `Fn(T1, ..., Tn) -> R` with up to twelve
/// [`Component`] parameters. `Args` is the parameter tuple and only exists
/// to keep the per-arity implementations apart.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::Function;
///
/// #[derive(Clone)]
/// struct Config;
/// #[derive(Clone)]
/// struct Logger;
///
/// fn parameters<Args, F: Function<Args>>(_: &F) -> Vec<&'static str> {
///     F::parameter_types().iter().map(|t| t.name()).collect()
/// }
///
/// let names = parameters(&|_: Config, _: Logger| ());
/// assert_eq!(names.len(), 2);
/// assert!(names[0].ends_with("Config"));
/// assert!(names[1].ends_with("Logger"));
/// ```
pub trait Function<Args>: 'static {
    /// Declared return type.
    type Output;

    /// Parameter types, in declaration order.
    fn parameter_types() -> Vec<ComponentType>;

    /// Calls the function with type-erased arguments in declaration order.
    fn call_erased(&self, args: &[Rc<dyn Any>]) -> DiResult<Self::Output>;
}

fn next_argument<'a, T, I>(args: &mut I) -> DiResult<T>
where
    T: Component,
    I: Iterator<Item = &'a AnyValue>,
{
    args.next()
        .and_then(|value| {
            let value: &dyn Any = &**value;
            value.downcast_ref::<T>()
        })
        .cloned()
        .ok_or(DiError::TypeMismatch(std::any::type_name::<T>()))
}

macro_rules! impl_function {
    ($($param:ident),*) => {
        impl<Func, Out, $($param,)*> Function<($($param,)*)> for Func
        where
            Func: Fn($($param),*) -> Out + 'static,
            $($param: Component,)*
        {
            type Output = Out;

            fn parameter_types() -> Vec<ComponentType> {
                vec![$(ComponentType::of::<$param>()),*]
            }

            #[allow(non_snake_case, unused_variables, unused_mut)]
            fn call_erased(&self, args: &[Rc<dyn Any>]) -> DiResult<Out> {
                let mut args = args.iter();
                $(let $param = next_argument::<$param, _>(&mut args)?;)*
                Ok((self)($($param),*))
            }
        }
    };
}

impl_function!();
impl_function!(T1);
impl_function!(T1, T2);
impl_function!(T1, T2, T3);
impl_function!(T1, T2, T3, T4);
impl_function!(T1, T2, T3, T4, T5);
impl_function!(T1, T2, T3, T4, T5, T6);
impl_function!(T1, T2, T3, T4, T5, T6, T7);
impl_function!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_function!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_function!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_function!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_function!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);

#[cfg(test)]
mod tests {
    use super::*;

    fn params_of<Args, F: Function<Args>>(_: &F) -> Vec<ComponentType> {
        F::parameter_types()
    }

    #[test]
    fn reports_parameters_in_declaration_order() {
        let params = params_of(&|_: u8, _: String, _: bool| ());
        assert_eq!(params.len(), 3);
        assert!(params[0].is::<u8>());
        assert!(params[1].is::<String>());
        assert!(params[2].is::<bool>());
    }

    #[test]
    fn zero_arity_has_no_parameters() {
        assert!(params_of(&|| 5u32).is_empty());
    }

    #[test]
    fn calls_with_erased_arguments() {
        let add = |a: u32, b: u32| a + b;
        let args: Vec<AnyValue> = vec![Rc::new(2u32) as AnyValue, Rc::new(40u32) as AnyValue];
        assert_eq!(add.call_erased(&args).unwrap(), 42);
    }

    #[test]
    fn mismatched_argument_is_reported() {
        let negate = |flag: bool| !flag;
        let args: Vec<AnyValue> = vec![Rc::new("not a bool".to_string()) as AnyValue];
        match negate.call_erased(&args) {
            Err(DiError::TypeMismatch(name)) => assert_eq!(name, "bool"),
            other => panic!("expected TypeMismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_argument_is_reported() {
        let identity = |value: u8| value;
        assert!(matches!(identity.call_erased(&[]), Err(DiError::TypeMismatch("u8"))));
    }
}
