use crate::core::domain::{
    error::{SmdResult, ValidationError},
    value_object::EndpointPassword,
};

/// BMC credentials SMD uses when discovering a Redfish endpoint.
#[derive(Debug, Clone)]
pub struct RedfishCredentials {
    user: String,
    password: EndpointPassword,
}

impl RedfishCredentials {
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        min_score: Option<zxcvbn::Score>,
    ) -> SmdResult<Self> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "user".to_string(),
                message: "User cannot be empty".to_string(),
            }
            .into());
        }
        let password = EndpointPassword::new(password, min_score)?;
        Ok(Self { user, password })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &EndpointPassword {
        &self.password
    }
}
