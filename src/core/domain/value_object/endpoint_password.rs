use crate::core::domain::error::ValidationError;
use zxcvbn::zxcvbn;

/// The password SMD uses to reach a Redfish endpoint (plaintext, sent on registration).
#[derive(Clone)]
pub struct EndpointPassword(String);

impl EndpointPassword {
    /// Creates a validated password.
    pub fn new(
        password: impl Into<String>,
        min_score: Option<zxcvbn::Score>,
    ) -> Result<Self, ValidationError> {
        let password = password.into();
        validate_password(&password, min_score)?;
        Ok(Self(password))
    }

    /// Creates a new password without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(password: String) -> Self {
        Self(password)
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for EndpointPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EndpointPassword(****)")
    }
}

/// Validates a password according to the configuration.
pub(crate) fn validate_password(
    password: &str,
    min_score: Option<zxcvbn::Score>,
) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if let Some(min_score) = min_score {
        let entropy = zxcvbn(password, &[]);
        if entropy.score() < min_score {
            return Err(ValidationError::ConstraintViolation(
                "Password is too weak (increase complexity)".to_string(),
            ));
        }
    }
    Ok(())
}

/// Maps a numeric strength (0-4) to a zxcvbn score.
pub fn score_from_level(level: u8) -> Result<zxcvbn::Score, ValidationError> {
    match level {
        0 => Ok(zxcvbn::Score::Zero),
        1 => Ok(zxcvbn::Score::One),
        2 => Ok(zxcvbn::Score::Two),
        3 => Ok(zxcvbn::Score::Three),
        4 => Ok(zxcvbn::Score::Four),
        other => Err(ValidationError::Field {
            field: "password_min_score".to_string(),
            message: format!("Score must be between 0 and 4, got {}", other),
        }),
    }
}
