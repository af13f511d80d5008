//! `define_port_error!`: thiserror enums for port failures.
//!
//! Each variant gets a snake_case constructor (string-like fields accept
//! `impl Into<_>`) and a snake_case label returned by `kind()` for log fields.

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            /// Construct the matching variant.
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            /// Construct the matching variant.
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };

    (
        $(#[$enum_meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $ty:ty),+ $(,)? })? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $({
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported by the failure.")]
                        $field: $ty
                    ),+
                })?,
            )+
        }

        impl $name {
            /// Snake_case label of the variant.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant { .. } => ::paste::paste! { stringify!([<$variant:snake>]) },
                    )+
                }
            }

            $(
                define_port_error!(@constructor $variant $({ $($field: $ty),+ })?);
            )+
        }
    };
}

pub(crate) use define_port_error;
