//! Declarative object schemas.

/// Implements [`WireSchema`](crate::WireSchema),
/// [`ArrayElement`](crate::ArrayElement), [`ReadBytes`](crate::ReadBytes)
/// and [`WriteBytes`](crate::WriteBytes) for a struct encoded as an object.
///
/// Each entry names a struct field, optionally renamed on the wire with
/// `as "name"`, followed by an optional kind:
///
/// - nothing: a required field;
/// - `: optional`: may be absent, absent resets the value;
/// - `: variant` / `: optional_variant`: a [`WireVariant`](crate::WireVariant)
///   held inline, one key per alternative;
/// - `: wrapper(args..)` / `: optional wrapper(args..)`: the field is passed
///   through a function of [`crate::wrapper`] first.
///
/// ```
/// use wire::{wire_object, Format, Json, MaxElementCount};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Peer {
///     host: String,
///     port: u16,
///     tags: Vec<String>,
///     last_seen: Option<u64>,
/// }
///
/// wire_object!(Peer {
///     host,
///     port as "rpc_port",
///     tags: optional array(MaxElementCount::<8>),
///     last_seen: optional,
/// });
///
/// let peer = Peer { host: "node".into(), port: 18081, ..Peer::default() };
/// let bytes = Json::to_bytes(&peer).unwrap();
/// assert_eq!(bytes, br#"{"host":"node","rpc_port":18081}"#);
/// assert_eq!(Json::decode::<Peer>(&bytes).unwrap(), peer);
/// ```
#[macro_export]
macro_rules! wire_object {
    ($ty:ident { $($body:tt)* }) => {
        $crate::__wire_object!(@munch $ty [] $($body)* ,);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_object {
    // entries
    (@munch $ty:ident [$($done:tt)*]) => {
        $crate::__wire_object!(@emit $ty [$($done)*]);
    };
    (@munch $ty:ident [$($done:tt)*] , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)*] $($rest)*);
    };
    (@munch $ty:ident [$($done:tt)*] $name:ident as $wire:literal $($rest:tt)*) => {
        $crate::__wire_object!(@kind $ty [$($done)*] $name ($wire) $($rest)*);
    };
    (@munch $ty:ident [$($done:tt)*] $name:ident $($rest:tt)*) => {
        $crate::__wire_object!(@kind $ty [$($done)*] $name (stringify!($name)) $($rest)*);
    };

    // kinds
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr) : optional_variant , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, optional_variant, () }] $($rest)*);
    };
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr) : variant , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, variant, () }] $($rest)*);
    };
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr) : optional , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, optional, () }] $($rest)*);
    };
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr)
        : optional $wrap:ident ( $($arg:expr),* $(,)? ) , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, optional, ($wrap($($arg),*)) }] $($rest)*);
    };
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr)
        : $wrap:ident ( $($arg:expr),* $(,)? ) , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, required, ($wrap($($arg),*)) }] $($rest)*);
    };
    (@kind $ty:ident [$($done:tt)*] $name:ident ($wire:expr) , $($rest:tt)*) => {
        $crate::__wire_object!(@munch $ty [$($done)* { $name, $wire, required, () }] $($rest)*);
    };

    // one field descriptor; `$this` is the method's `self`
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, required, ()) => {
        $crate::field($wire, $($borrow)+ $this.$name)
    };
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, optional, ()) => {
        $crate::optional_field($wire, $($borrow)+ $this.$name)
    };
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, variant, ()) => {
        $crate::variant($($borrow)+ $this.$name)
    };
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, optional_variant, ()) => {
        $crate::optional_variant($($borrow)+ $this.$name)
    };
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, required,
        ($wrap:ident($($arg:expr),*))) => {
        $crate::field($wire, $crate::wrapper::$wrap($($borrow)+ $this.$name $(, $arg)*))
    };
    (@field [$($borrow:tt)+] $this:tt, $name:ident, $wire:expr, optional,
        ($wrap:ident($($arg:expr),*))) => {
        $crate::optional_field($wire, $crate::wrapper::$wrap($($borrow)+ $this.$name $(, $arg)*))
    };

    (@emit $ty:ident [$({ $name:ident, $wire:expr, $kind:ident, $wrap:tt })*]) => {
        impl $crate::WireSchema for $ty {
            const KIND: $crate::WireKind = $crate::WireKind::Object;
        }

        impl $crate::ArrayElement for $ty {}

        impl $crate::ReadBytes for $ty {
            fn read_bytes<R: $crate::Reader + ?Sized>(
                &mut self,
                source: &mut R,
            ) -> $crate::Result<()> {
                const {
                    let names: &[&str] = &[$(stringify!($name)),*];
                    assert!(
                        names.len() < $crate::MAX_SUBFIELDS,
                        "objects declare fewer than MAX_SUBFIELDS fields"
                    )
                };
                $crate::read::object(
                    source,
                    &mut [$(
                        &mut $crate::__wire_object!(@field [&mut] self, $name, $wire, $kind, $wrap)
                    ),*],
                )
            }
        }

        impl $crate::WriteBytes for $ty {
            fn write_bytes<W: $crate::Writer + ?Sized>(&self, dest: &mut W) -> $crate::Result<()> {
                $crate::write::object(
                    dest,
                    &[$(
                        &$crate::__wire_object!(@field [&] self, $name, $wire, $kind, $wrap)
                    ),*],
                )
            }
        }
    };
}
