//! Nil-Safety Module
//!
//! Decides whether a value represents "absence" under its own type's
//! semantics. Each type reports a [`Nullability`]: either a nullable slot
//! (which may be unset) or a plain value (which is always present, even
//! when zero-valued).

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::{self, Rc};
use std::sync::{self, mpsc, Arc};

// == Kinds ==
/// Categories that can be left unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullableKind {
    OwningRef,
    SharedRef,
    DynamicRef,
    Map,
    Sequence,
    Callable,
    Channel,
}

/// Categories with no representation of absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Boolean,
    Text,
    Array,
    Struct,
    Unit,
    /// Raw pointers. Never treated as nullable: there is no safe way to ask
    /// whether the address is meaningful.
    RawAddress,
    /// Container or handle that is always present once constructed
    Present(NullableKind),
}

// == Nullability ==
/// Outcome of classifying a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullability {
    /// A slot that may be unset
    Nullable { kind: NullableKind, unset: bool },
    /// A value that is always present
    Value(ValueKind),
}

impl Nullability {
    /// Returns true when this is an unset nullable slot.
    pub fn is_unset(self) -> bool {
        matches!(self, Nullability::Nullable { unset: true, .. })
    }
}

// == Nullable Trait ==
/// Reports the nullability of a value.
///
/// Plain structs opt in with an empty impl, which classifies them as
/// [`ValueKind::Struct`]:
///
/// ```
/// use transcache::nil::{is_nil, Nullable};
///
/// struct User { name: String }
/// impl Nullable for User {}
///
/// assert!(!is_nil(&User { name: String::new() }));
/// ```
pub trait Nullable {
    /// Classifies this value.
    fn nullability(&self) -> Nullability {
        Nullability::Value(ValueKind::Struct)
    }

    /// Category of an optional slot holding this type, e.g. `Option<Vec<T>>`
    /// is a nullable sequence.
    fn slot_kind() -> NullableKind
    where
        Self: Sized,
    {
        NullableKind::OwningRef
    }
}

/// Returns true if `value` is absent under its type's own semantics.
pub fn is_nil<T: Nullable + ?Sized>(value: &T) -> bool {
    value.nullability().is_unset()
}

// == Optional Slots ==
impl<T: Nullable> Nullable for Option<T> {
    fn nullability(&self) -> Nullability {
        Nullability::Nullable {
            kind: T::slot_kind(),
            unset: self.is_none(),
        }
    }
}

impl<T: ?Sized> Nullable for rc::Weak<T> {
    fn nullability(&self) -> Nullability {
        Nullability::Nullable {
            kind: NullableKind::SharedRef,
            unset: self.strong_count() == 0,
        }
    }
}

impl<T: ?Sized> Nullable for sync::Weak<T> {
    fn nullability(&self) -> Nullability {
        Nullability::Nullable {
            kind: NullableKind::SharedRef,
            unset: self.strong_count() == 0,
        }
    }
}

// == Pointers ==
// Smart pointers never hold "nothing" themselves, so they report whatever
// they point at. A `Box<dyn Nullable>` wrapping `None` is therefore nil.
impl<T: Nullable + ?Sized> Nullable for Box<T> {
    fn nullability(&self) -> Nullability {
        (**self).nullability()
    }

    fn slot_kind() -> NullableKind {
        NullableKind::OwningRef
    }
}

impl<T: Nullable + ?Sized> Nullable for Rc<T> {
    fn nullability(&self) -> Nullability {
        (**self).nullability()
    }

    fn slot_kind() -> NullableKind {
        NullableKind::SharedRef
    }
}

impl<T: Nullable + ?Sized> Nullable for Arc<T> {
    fn nullability(&self) -> Nullability {
        (**self).nullability()
    }

    fn slot_kind() -> NullableKind {
        NullableKind::SharedRef
    }
}

impl<T: Nullable + ?Sized> Nullable for &T {
    fn nullability(&self) -> Nullability {
        (**self).nullability()
    }

    fn slot_kind() -> NullableKind {
        NullableKind::SharedRef
    }
}

impl<T: ?Sized> Nullable for *const T {
    fn nullability(&self) -> Nullability {
        Nullability::Value(ValueKind::RawAddress)
    }
}

impl<T: ?Sized> Nullable for *mut T {
    fn nullability(&self) -> Nullability {
        Nullability::Value(ValueKind::RawAddress)
    }
}

// == Plain Values ==
macro_rules! impl_value {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Nullable for $ty {
                fn nullability(&self) -> Nullability {
                    Nullability::Value($kind)
                }
            }
        )+
    };
}

impl_value!(ValueKind::Numeric => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_value!(ValueKind::Boolean => bool);
impl_value!(ValueKind::Text => char, str, String);
impl_value!(ValueKind::Unit => ());

impl<T, const N: usize> Nullable for [T; N] {
    fn nullability(&self) -> Nullability {
        Nullability::Value(ValueKind::Array)
    }
}

// == Containers ==
macro_rules! impl_container {
    ($kind:expr => $([$($gen:tt)*] $ty:ty),+ $(,)?) => {
        $(
            impl<$($gen)*> Nullable for $ty {
                fn nullability(&self) -> Nullability {
                    Nullability::Value(ValueKind::Present($kind))
                }

                fn slot_kind() -> NullableKind {
                    $kind
                }
            }
        )+
    };
}

impl_container!(NullableKind::Sequence =>
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] HashSet<T>,
    [T] BTreeSet<T>,
);
impl_container!(NullableKind::Map =>
    [K, V] HashMap<K, V>,
    [K, V] BTreeMap<K, V>,
);
impl_container!(NullableKind::Channel =>
    [T] mpsc::Sender<T>,
    [T] mpsc::SyncSender<T>,
    [T] mpsc::Receiver<T>,
    [T] tokio::sync::mpsc::Sender<T>,
    [T] tokio::sync::mpsc::UnboundedSender<T>,
    [T] tokio::sync::mpsc::Receiver<T>,
);

impl<T> Nullable for [T] {
    fn nullability(&self) -> Nullability {
        Nullability::Value(ValueKind::Present(NullableKind::Sequence))
    }
}

// == Callables ==
macro_rules! impl_callable {
    ($(($($arg:ident),*)),+ $(,)?) => {
        $(
            impl<R, $($arg),*> Nullable for fn($($arg),*) -> R {
                fn nullability(&self) -> Nullability {
                    Nullability::Value(ValueKind::Present(NullableKind::Callable))
                }

                fn slot_kind() -> NullableKind {
                    NullableKind::Callable
                }
            }
        )+
    };
}

impl_callable!((), (A), (A, B), (A, B, C));

// == JSON ==
// `serde_json::Value` is a dynamic reference whose unset state is `null`.
impl Nullable for serde_json::Value {
    fn nullability(&self) -> Nullability {
        Nullability::Nullable {
            kind: NullableKind::DynamicRef,
            unset: self.is_null(),
        }
    }

    fn slot_kind() -> NullableKind {
        NullableKind::DynamicRef
    }
}
