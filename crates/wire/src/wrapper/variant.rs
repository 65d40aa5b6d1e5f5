//! Tagged unions encoded as "exactly one of these keys".
//!
//! Every alternative of a union gets its own wire name. Inside an object
//! the union occupies one slot per alternative; reading fails with
//! `invalid_key` when a second alternative shows up and with
//! `missing_key` when a required union has none.

use crate::error::{Result, WireError};
use crate::field::{ReadField, WriteField};
use crate::read::Reader;
use crate::write::Writer;

pub trait WireVariant {
    /// Wire names of the alternatives.
    const OPTIONS: &'static [&'static str];

    /// Wire name of the alternative currently held.
    fn active(&self) -> Option<&'static str>;

    /// Decodes the alternative called `option` into a new value.
    fn read_new<R: Reader + ?Sized>(option: &str, source: &mut R) -> Result<Self>
    where
        Self: Sized;

    /// Replaces the current value with the decoded alternative.
    fn read_option<R: Reader + ?Sized>(&mut self, option: &str, source: &mut R) -> Result<()>
    where
        Self: Sized,
    {
        *self = Self::read_new(option, source)?;
        Ok(())
    }

    /// Writes the payload of the active alternative (not its key).
    fn write_active<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()>;

    /// State after an optional union was absent.
    fn reset(&mut self) {}
}

impl<V: WireVariant> WireVariant for Option<V> {
    const OPTIONS: &'static [&'static str] = V::OPTIONS;

    fn active(&self) -> Option<&'static str> {
        self.as_ref().and_then(V::active)
    }

    fn read_new<R: Reader + ?Sized>(option: &str, source: &mut R) -> Result<Self> {
        V::read_new(option, source).map(Some)
    }

    fn write_active<W: Writer + ?Sized>(&self, dest: &mut W) -> Result<()> {
        match self {
            Some(value) => value.write_active(dest),
            None => Err(WireError::Traversal("absent variant written")),
        }
    }

    fn reset(&mut self) {
        *self = None;
    }
}

/// Object slot holding a union inline.
#[derive(Debug)]
pub struct VariantField<T> {
    value: T,
    required: bool,
}

/// A union that must be present exactly once.
pub fn variant<T>(value: T) -> VariantField<T> {
    VariantField {
        value,
        required: true,
    }
}

/// A union that may be absent (typically an `Option<V>`).
pub fn optional_variant<T>(value: T) -> VariantField<T> {
    VariantField {
        value,
        required: false,
    }
}

impl<'a, R, V> ReadField<R> for VariantField<&'a mut V>
where
    R: Reader + ?Sized,
    V: WireVariant,
{
    fn names(&self) -> &[&'static str] {
        V::OPTIONS
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn read(&mut self, source: &mut R, option: usize) -> Result<()> {
        match V::OPTIONS.get(option) {
            Some(name) => self.value.read_option(name, source),
            None => Err(WireError::Traversal("variant option out of range")),
        }
    }

    fn reset(&mut self) {
        self.value.reset();
    }
}

impl<'a, W, V> WriteField<W> for VariantField<&'a V>
where
    W: Writer + ?Sized,
    V: WireVariant,
{
    fn is_available(&self) -> bool {
        self.value.active().is_some()
    }

    fn write(&self, dest: &mut W) -> Result<()> {
        let Some(name) = self.value.active() else {
            return Err(WireError::Traversal("absent variant written"));
        };
        dest.key(name)?;
        self.value.write_active(dest)
    }
}

/// Implements [`WireVariant`] for an enum whose variants each hold one
/// value, and encodes the enum as an object with exactly one key.
///
/// ```
/// use wire::{wire_variant, Format, Json};
///
/// #[derive(Debug, PartialEq)]
/// enum Amount {
///     Exact(u64),
///     Label(String),
/// }
///
/// wire_variant!(Amount {
///     "exact" => Exact(u64),
///     "label" => Label(String),
/// });
///
/// let bytes = Json::to_bytes(&Amount::Exact(5)).unwrap();
/// assert_eq!(bytes, br#"{"exact":5}"#);
/// ```
#[macro_export]
macro_rules! wire_variant {
    ($ty:ident { $($name:literal => $variant:ident($payload:ty)),+ $(,)? }) => {
        impl $crate::WireVariant for $ty {
            const OPTIONS: &'static [&'static str] = &[$($name),+];

            fn active(&self) -> ::core::option::Option<&'static str> {
                match self {
                    $(Self::$variant(_) => ::core::option::Option::Some($name),)+
                }
            }

            fn read_new<R: $crate::Reader + ?Sized>(
                option: &str,
                source: &mut R,
            ) -> $crate::Result<Self> {
                $(
                    if option == $name {
                        let mut value = <$payload as ::core::default::Default>::default();
                        $crate::ReadBytes::read_bytes(&mut value, source)?;
                        return ::core::result::Result::Ok(Self::$variant(value));
                    }
                )+
                ::core::result::Result::Err($crate::WireError::Schema($crate::Schema::InvalidKey))
            }

            fn write_active<W: $crate::Writer + ?Sized>(&self, dest: &mut W) -> $crate::Result<()> {
                match self {
                    $(Self::$variant(value) => $crate::WriteBytes::write_bytes(value, dest),)+
                }
            }
        }

        impl $crate::WireSchema for $ty {
            const KIND: $crate::WireKind = $crate::WireKind::Object;
        }

        impl $crate::ArrayElement for $ty {}

        impl $crate::ReadBytes for $ty {
            fn read_bytes<R: $crate::Reader + ?Sized>(
                &mut self,
                source: &mut R,
            ) -> $crate::Result<()> {
                $crate::read::object(source, &mut [&mut $crate::variant(self)])
            }
        }

        impl $crate::WriteBytes for $ty {
            fn write_bytes<W: $crate::Writer + ?Sized>(&self, dest: &mut W) -> $crate::Result<()> {
                $crate::write::object(dest, &[&$crate::variant(self)])
            }
        }
    };
}
