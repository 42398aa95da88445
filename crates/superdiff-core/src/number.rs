use serde::{Deserialize, Serialize};

use crate::{hash::hash_bytes, CanonicalizeError};

/// Represents a numeric scalar using IEEE-754 double precision.
#[derive(Clone, Copy, Debug, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Number(f64);

impl Number {
    /// Creates a new [`Number`] after validating finiteness.
    ///
    /// ```
    /// # use superdiff_core::Number;
    /// let num = Number::new(42.0)?;
    /// assert_eq!(num.get(), 42.0);
    /// # Ok::<(), superdiff_core::CanonicalizeError>(())
    /// ```
    pub fn new(value: f64) -> Result<Self, CanonicalizeError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(CanonicalizeError::NotFinite { value })
        }
    }

    /// Creates a [`Number`] from an integer without a fallible conversion.
    #[must_use]
    pub fn from_int(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(value as f64)
    }

    /// Returns the raw floating-point value.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Computes the fingerprint for this number.
    #[must_use]
    pub fn hash_code(self) -> crate::hash::HashCode {
        hash_bytes(&self.0.to_le_bytes())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Rust's f64 Display already prints integral values without a
        // fractional part, which matches the inspection conventions.
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_values() {
        let err = Number::new(f64::INFINITY).unwrap_err();
        assert!(matches!(err, CanonicalizeError::NotFinite { .. }));
    }

    #[test]
    fn integral_values_display_without_fraction() {
        assert_eq!(Number::from_int(31).to_string(), "31");
        assert_eq!(Number::new(1.5).unwrap().to_string(), "1.5");
    }
}
