//! Validated URL handles for storefront resources.
//!
//! Use the `define_handle!` macro to create type-safe handle wrappers that
//! prevent accidentally mixing handles of different resource types.

/// Errors that can occur when parsing a handle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that cannot appear in a handle.
    #[error("handle contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// Maximum length of a handle (Shopify limit).
pub const MAX_HANDLE_LENGTH: usize = 255;

/// Validate a raw handle string.
///
/// Handles are lowercase: letters, digits, `-` and `_` only.
///
/// # Errors
///
/// Returns an error if the input is empty, longer than 255 characters, or
/// contains anything other than lowercase alphanumerics, `-` and `_`.
pub fn validate_handle(s: &str) -> Result<(), HandleError> {
    if s.is_empty() {
        return Err(HandleError::Empty);
    }

    if s.chars().count() > MAX_HANDLE_LENGTH {
        return Err(HandleError::TooLong {
            max: MAX_HANDLE_LENGTH,
        });
    }

    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_alphanumeric() && !c.is_uppercase()) && *c != '-' && *c != '_')
    {
        return Err(HandleError::InvalidCharacter(c));
    }

    Ok(())
}

/// Macro to define a type-safe handle wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `parse()` that validates the input, `as_str()`, `Display`, `FromStr`
///
/// # Example
///
/// ```rust
/// # use aula_core::define_handle;
/// define_handle!(CourseHandle);
///
/// let handle = CourseHandle::parse("intro-rust").unwrap();
/// assert_eq!(handle.as_str(), "intro-rust");
/// assert!(CourseHandle::parse("Intro Rust").is_err());
/// ```
#[macro_export]
macro_rules! define_handle {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse and validate a handle.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is not a valid handle.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::handle::HandleError> {
                $crate::types::handle::validate_handle(s)?;
                Ok(Self(s.to_owned()))
            }

            /// Returns the handle as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the handle and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::handle::HandleError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Handles for every resource the storefront links to
define_handle!(CollectionHandle);
define_handle!(ProductHandle);
define_handle!(PageHandle);
define_handle!(BlogHandle);
define_handle!(ArticleHandle);
