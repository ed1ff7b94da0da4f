use serde::Serialize;

/// How SMD answered an endpoint registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegistrationOutcome {
    /// The endpoint was created and discovery was started.
    Created,
    /// SMD already knew the endpoint (`409 Conflict`).
    AlreadyRegistered,
}
