//! Gateway configuration.

pub const DEFAULT_API_URL: &str = "https://localhost:7285/api";
pub const API_URL_ENV: &str = "LIBRIS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every resource path is joined onto.
    pub base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// `LIBRIS_API_URL`, falling back to the development server.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        let config = ApiConfig::new("http://api.test/api/");
        assert_eq!(config.endpoint("/book/1"), "http://api.test/api/book/1");
        assert_eq!(ApiConfig::default().endpoint("Account/login"), "https://localhost:7285/api/Account/login");
    }
}
