//! Newtype IDs for type-safe record references.
//!
//! Ids are strings derived from the creation time in Unix milliseconds, the
//! same shape the browser build of the showcase stored. Use the `define_id!`
//! macro to create wrappers that cannot be mixed up across record types.

/// Macro to define a type-safe, timestamp-derived ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `new()`, `as_str()` and `generate()`
/// - `Display`, `AsRef<str>`, `From<String>` and `From<&str>`
///
/// # Example
///
/// ```rust
/// # use m5_core::define_id;
/// define_id!(ReviewId);
/// define_id!(AuthorId);
///
/// let review = ReviewId::new("1");
/// let author = AuthorId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: ReviewId = author;
/// # let _ = (review, author);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an ID from an existing string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Generate the first timestamp-derived ID at or after `at` that
            /// is not `taken`.
            ///
            /// Two records created within the same millisecond get
            /// consecutive values instead of colliding.
            #[must_use]
            pub fn generate(
                at: ::chrono::DateTime<::chrono::Utc>,
                mut taken: impl FnMut(&Self) -> bool,
            ) -> Self {
                let mut millis = at.timestamp_millis();
                loop {
                    let candidate = Self(millis.to_string());
                    if !taken(&candidate) {
                        return candidate;
                    }
                    millis = millis.saturating_add(1);
                }
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

define_id!(ProductId);
define_id!(SubmissionId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_generate_uses_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(ProductId::generate(at, |_| false).as_str(), "1700000000123");
    }

    #[test]
    fn test_generate_skips_taken_values() {
        let at = Utc.timestamp_millis_opt(1_000).unwrap();
        let taken = [ProductId::new("1000"), ProductId::new("1001")];

        let id = ProductId::generate(at, |candidate| taken.contains(candidate));
        assert_eq!(id.as_str(), "1002");
    }

    #[test]
    fn test_generate_returns_timestamp_when_free() {
        let at = Utc.timestamp_millis_opt(42).unwrap();
        let id = SubmissionId::generate(at, |_| false);
        assert_eq!(id, SubmissionId::new("42"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::new("3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"3\"");
        let parsed: ProductId = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(SubmissionId::from("abc").to_string(), "abc");
    }
}
