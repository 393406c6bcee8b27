//! Error types for body descriptors.

use thiserror::Error;

/// Errors raised while checking body descriptors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Mass or inertia that no physics engine can integrate.
    #[error("invalid mass properties: {reason}")]
    InvalidMassProperties {
        /// What is wrong with them.
        reason: String,
    },

    /// A pose with `NaN` or infinite components.
    #[error("non-finite pose for {body}")]
    NonFinitePose {
        /// Body the pose belongs to.
        body: crate::BodyId,
    },
}

impl SimError {
    /// Create an invalid mass properties error.
    #[must_use]
    pub fn invalid_mass(reason: impl Into<String>) -> Self {
        Self::InvalidMassProperties {
            reason: reason.into(),
        }
    }

    /// Check if the error concerns mass properties.
    #[must_use]
    pub fn is_mass_error(&self) -> bool {
        matches!(self, Self::InvalidMassProperties { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BodyId;

    #[test]
    fn messages() {
        let err = SimError::invalid_mass("mass cannot be negative");
        assert!(err.is_mass_error());
        assert_eq!(err.to_string(), "invalid mass properties: mass cannot be negative");

        let err = SimError::NonFinitePose { body: BodyId::new(3) };
        assert!(!err.is_mass_error());
        assert_eq!(err.to_string(), "non-finite pose for Body(3)");
    }
}
