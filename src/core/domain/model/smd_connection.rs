use crate::core::domain::value_object::SmdUrl;

/// Addressing information for one SMD instance.
#[derive(Debug, Clone)]
pub struct SmdConnection {
    name: String,
    url: SmdUrl,
}

impl SmdConnection {
    pub fn new(name: impl Into<String>, url: SmdUrl) -> Self {
        Self {
            name: name.into(),
            url,
        }
    }

    /// Label used in logs (e.g. "primary", "secondary").
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &SmdUrl {
        &self.url
    }
}
