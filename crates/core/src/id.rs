//! Strongly-typed surrogate-key identifiers.
//!
//! Records are keyed by store-assigned integers. Each entity wraps the raw
//! integer in its own newtype so ids of different entities cannot be mixed up.

/// Plain decimal digits with no sign, whitespace or leading zero (`"0"` itself is fine).
pub fn is_canonical_int(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

/// Implement the common surface of an integer id newtype.
///
/// The newtype must be a single-field tuple struct over `i64`:
///
/// ```ignore
/// #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// pub struct ProductId(i64);
/// catalog_core::impl_int_id!(ProductId, "ProductId");
/// ```
#[macro_export]
macro_rules! impl_int_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl ::core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if !$crate::id::is_canonical_int(s) {
                    return Err($crate::DomainError::invalid_id(format!(
                        "{}: not a decimal integer: {:?}",
                        $name, s
                    )));
                }
                let raw = s
                    .parse::<i64>()
                    .map_err(|e| $crate::DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(raw))
            }
        }
    };
}
