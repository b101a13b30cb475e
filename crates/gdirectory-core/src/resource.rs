//! Shared plumbing for directory resources.
//!
//! Every payload returned by the Directory API carries a `kind` literal that
//! identifies its shape. [`DirectoryResource`] exposes the expected literal so
//! callers can validate a decoded value; list envelopes additionally implement
//! [`Paginated`].

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A typed Directory API payload with a fixed `kind` discriminator.
pub trait DirectoryResource {
    /// The `kind` literal the API returns for this shape.
    const KIND: &'static str;

    /// The `kind` value actually present in the payload.
    fn kind(&self) -> &str;

    /// Returns true if the payload carries the expected `kind`.
    fn has_expected_kind(&self) -> bool {
        self.kind() == Self::KIND
    }
}

/// A list envelope that may be continued with a page token.
///
/// Following the token is up to the caller: nothing in this workspace
/// loops over pages.
pub trait Paginated {
    /// The element type of the wrapped list.
    type Item;

    /// The items contained in this page.
    fn items(&self) -> &[Self::Item];

    /// Token for the next page, if the API reported one.
    fn next_page_token(&self) -> Option<&str>;

    /// Returns true if another page is available.
    fn has_next_page(&self) -> bool {
        self.next_page_token().is_some()
    }
}

/// Error returned when parsing one of the API's enumerated string values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value: {value:?} (expected one of: {expected})")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Deserializes `null` (or a missing field, with `#[serde(default)]`) as the
/// type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `skip_serializing_if` predicate for flags that default to `false`.
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Declares an enum whose variants map to fixed wire strings.
///
/// Generates serde renames, `as_str`, `Display` and a case-insensitive
/// `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $label:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the wire representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::resource::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| {
                        $crate::resource::ParseEnumError::new(
                            $label,
                            s,
                            &[$($wire),+],
                        )
                    })
            }
        }
    };
}

pub(crate) use wire_enum;
