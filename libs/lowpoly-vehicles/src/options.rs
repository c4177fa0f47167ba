//! # Creation Options
//!
//! Every builder takes a complete, versioned options record. Callers hand in
//! a partial record whose fields are all optional; missing fields are copied
//! from the defaults of the requested version. The caller's record is
//! consumed, never mutated in place.
//!
//! Both records, their setters and the merge are generated by
//! [`creation_options!`]. The defaults themselves are written by hand per
//! builder as a `match` over its version enum.
//!
//! ```rust
//! use lowpoly_vehicles::builders::wing::{PartialWingOptions, WingOptions};
//! use lowpoly_vehicles::Resolve;
//!
//! let options = PartialWingOptions::default().length(2.0).resolve();
//! assert_eq!(options.length, 2.0);
//! assert_eq!(options.width, WingOptions::default().width);
//! ```

/// Version-tagged defaults of a complete options record.
pub trait DefaultOptions: Sized {
    /// Builder version enum
    type Version: Copy + Default;

    /// Complete defaults for `version`.
    fn default_options(version: Self::Version) -> Self;
}

/// A partial options record that can be completed from defaults.
pub trait Resolve: Sized {
    /// The complete record
    type Complete: DefaultOptions;

    /// Version requested by the partial record, if any.
    fn version(&self) -> Option<<Self::Complete as DefaultOptions>::Version>;

    /// Takes every set field from `self` and every other field from
    /// `defaults`.
    fn merge(self, defaults: Self::Complete) -> Self::Complete;

    /// Completes the record from the defaults of its own version.
    fn resolve(self) -> Self::Complete {
        let version = self.version().unwrap_or_default();
        self.merge(Self::Complete::default_options(version))
    }
}

/// Completes `partial` from `defaults`.
pub fn resolve<P: Resolve>(partial: P, defaults: P::Complete) -> P::Complete {
    partial.merge(defaults)
}

/// Declares a builder version enum with a single `V1` variant.
///
/// Numeric tags convert with `From<u32>`; unknown tags fall back to `V1`.
macro_rules! builder_version {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            #[default]
            V1,
        }

        impl From<u32> for $name {
            fn from(tag: u32) -> Self {
                match tag {
                    0 => $name::V1,
                    _ => {
                        log::trace!(
                            "unknown {} tag {}, falling back to V1",
                            stringify!($name),
                            tag
                        );
                        $name::V1
                    }
                }
            }
        }
    };
}

/// Declares a complete options record, its partial twin, chained setters on
/// the partial and the [`Resolve`] implementation.
///
/// The complete record must implement [`DefaultOptions`] separately.
macro_rules! creation_options {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $partial:ident : $version:ty {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Version the defaults were taken from
            pub version: $version,
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        #[doc = concat!("[`", stringify!($name), "`] with every field optional.")]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $partial {
            /// Version whose defaults fill the missing fields
            pub version: Option<$version>,
            $(
                $(#[$fmeta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $partial {
            /// Sets the version.
            pub fn version(mut self, version: impl Into<$version>) -> Self {
                self.version = Some(version.into());
                self
            }

            $(
                #[doc = concat!("Sets `", stringify!($field), "`.")]
                pub fn $field(mut self, value: impl Into<$ty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }

        impl $crate::options::Resolve for $partial {
            type Complete = $name;

            fn version(&self) -> Option<$version> {
                self.version
            }

            fn merge(self, defaults: $name) -> $name {
                $name {
                    version: self.version.unwrap_or(defaults.version),
                    $(
                        $field: match self.$field {
                            Some(value) => value,
                            None => defaults.$field,
                        },
                    )*
                }
            }
        }

        impl From<$name> for $partial {
            fn from(options: $name) -> Self {
                Self {
                    version: Some(options.version),
                    $( $field: Some(options.$field), )*
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                <$name as $crate::options::DefaultOptions>::default_options(Default::default())
            }
        }
    };
}
