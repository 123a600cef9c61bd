//! Component type keys for the container.

use std::any::TypeId;
use std::fmt;

/// Smart pointer and reference prefixes as rendered by `std::any::type_name`.
const POINTER_PREFIXES: &[&str] = &[
    "alloc::boxed::Box<",
    "alloc::rc::Rc<",
    "alloc::sync::Arc<",
    "core::ptr::non_null::NonNull<",
];

const RESULT_PREFIX: &str = "core::result::Result<";

/// Coarse classification of a component type's shape.
///
/// Rust exposes no runtime reflection over a type's kind, so the
/// classification is derived from `std::any::type_name`. It is only used to
/// apply the registration [`PointerPolicy`](crate::PointerPolicy).
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::TypeKind;
/// use std::rc::Rc;
///
/// trait Logger {}
///
/// assert_eq!(TypeKind::of::<String>(), TypeKind::Value);
/// assert_eq!(TypeKind::of::<Box<u32>>(), TypeKind::Pointer);
/// assert_eq!(TypeKind::of::<&'static str>(), TypeKind::Pointer);
/// assert_eq!(TypeKind::of::<Rc<dyn Logger>>(), TypeKind::Interface);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A plain value type (structs, enums, primitives, collections)
    Value,
    /// A reference, raw pointer or owning smart pointer to a sized type
    Pointer,
    /// A reference or smart pointer to a `dyn Trait` object
    Interface,
}

impl TypeKind {
    /// Classifies `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::from_type_name(std::any::type_name::<T>())
    }

    pub(crate) fn from_type_name(name: &str) -> Self {
        match pointee(name) {
            Some(inner) if inner.trim_start().starts_with("dyn ") => TypeKind::Interface,
            Some(_) => TypeKind::Pointer,
            None => TypeKind::Value,
        }
    }

    /// Returns `true` for [`TypeKind::Pointer`].
    pub fn is_pointer(self) -> bool {
        self == TypeKind::Pointer
    }
}

// Returns the pointee part of a pointer-like type name.
fn pointee(name: &str) -> Option<&str> {
    if let Some(rest) = name.strip_prefix('&') {
        let rest = rest.strip_prefix("mut ").unwrap_or(rest);
        return Some(rest);
    }
    if let Some(rest) = name.strip_prefix("*const ").or_else(|| name.strip_prefix("*mut ")) {
        return Some(rest);
    }
    POINTER_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
}

/// Key identifying a registrable and resolvable component.
///
/// Two keys are equal when their `TypeId`s are equal; the name and kind are
/// carried along for diagnostics and registration policy only.
///
/// # Examples
///
/// ```rust
/// use ferrous_ioc::{component_type_of, TypeKind};
///
/// let key = component_type_of::<String>();
/// assert_eq!(key.name(), "alloc::string::String");
/// assert_eq!(key.kind(), TypeKind::Value);
/// assert_eq!(key, component_type_of::<String>());
/// assert_ne!(key, component_type_of::<u32>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
    kind: TypeKind,
}

impl ComponentType {
    /// Builds the key for `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind: TypeKind::of::<T>(),
        }
    }

    /// The `TypeId` backing this key.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name, as reported by `std::any::type_name`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shape classification used by the pointer policy.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns `true` if this key names a `core::result::Result`.
    ///
    /// A function with such an output must be declared fallible, or its
    /// `Err` would travel as an ordinary value.
    pub fn is_result(&self) -> bool {
        self.name.starts_with(RESULT_PREFIX)
    }

    /// Returns `true` if this key was built for `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

// TypeId-only comparison; the name is diagnostics
impl PartialEq for ComponentType {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl std::hash::Hash for ComponentType {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[inline(always)]
pub fn component_type_of<T: ?Sized + 'static>() -> ComponentType {
    ComponentType::of::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::sync::Arc;

    trait Greeter {}

    #[test]
    fn classifies_plain_values() {
        assert_eq!(TypeKind::of::<u32>(), TypeKind::Value);
        assert_eq!(TypeKind::of::<Vec<Box<u8>>>(), TypeKind::Value);
        assert_eq!(TypeKind::of::<Option<Rc<u8>>>(), TypeKind::Value);
    }

    #[test]
    fn classifies_pointers() {
        assert_eq!(TypeKind::of::<&'static u32>(), TypeKind::Pointer);
        assert_eq!(TypeKind::of::<*const u8>(), TypeKind::Pointer);
        assert_eq!(TypeKind::of::<*mut u8>(), TypeKind::Pointer);
        assert_eq!(TypeKind::of::<Rc<String>>(), TypeKind::Pointer);
        assert_eq!(TypeKind::of::<Arc<String>>(), TypeKind::Pointer);
        assert_eq!(TypeKind::of::<std::ptr::NonNull<u8>>(), TypeKind::Pointer);
    }

    #[test]
    fn classifies_trait_objects_as_interfaces() {
        assert_eq!(TypeKind::of::<Rc<dyn Greeter>>(), TypeKind::Interface);
        assert_eq!(TypeKind::of::<Arc<dyn Greeter>>(), TypeKind::Interface);
        assert_eq!(TypeKind::of::<Box<dyn Greeter>>(), TypeKind::Interface);
        assert_eq!(TypeKind::of::<&'static dyn Greeter>(), TypeKind::Interface);
    }

    #[test]
    fn detects_result_outputs() {
        assert!(component_type_of::<Result<u8, String>>().is_result());
        assert!(component_type_of::<crate::DiResult<()>>().is_result());
        assert!(!component_type_of::<Option<Result<u8, String>>>().is_result());
        assert!(!component_type_of::<u8>().is_result());
    }

    #[test]
    fn keys_compare_by_type_id() {
        let a = component_type_of::<u64>();
        let b = ComponentType::of::<u64>();
        assert_eq!(a, b);
        assert!(a.is::<u64>());
        assert!(!a.is::<u32>());
        assert_eq!(a.to_string(), "u64");
    }
}
