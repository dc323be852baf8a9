//! Product barcode type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Barcode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum BarcodeError {
    /// The input string is empty.
    #[error("barcode cannot be empty")]
    Empty,
    /// The input string is not exactly the required length.
    #[error("barcode must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a character that is not an ASCII digit.
    #[error("barcode must contain only digits")]
    NonDigit,
}

/// A product barcode.
///
/// Barcodes identify a product uniquely alongside its name. The format is
/// fixed: exactly 12 ASCII digits, with no separators and no check-digit
/// validation.
///
/// ## Constraints
///
/// - Length: exactly 12 characters
/// - Characters: ASCII digits only
///
/// ## Examples
///
/// ```
/// use stockroom_core::Barcode;
///
/// // Valid barcodes
/// assert!(Barcode::parse("123456789012").is_ok());
/// assert!(Barcode::parse("000000000000").is_ok());
///
/// // Invalid barcodes
/// assert!(Barcode::parse("").is_err());              // empty
/// assert!(Barcode::parse("12345").is_err());         // too short
/// assert!(Barcode::parse("1234567890123").is_err()); // too long
/// assert!(Barcode::parse("12345678901a").is_err());  // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Required number of digits in a barcode.
    pub const LENGTH: usize = 12;

    /// Parse a `Barcode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 12 characters long
    /// - Contains anything other than ASCII digits
    pub fn parse(s: &str) -> Result<Self, BarcodeError> {
        if s.is_empty() {
            return Err(BarcodeError::Empty);
        }

        if s.len() != Self::LENGTH {
            return Err(BarcodeError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the barcode as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Barcode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Barcode {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Barcode {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Barcode {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Barcode {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
