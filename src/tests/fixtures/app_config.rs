// Shared test fixture for AppConfig.
// Starts from the defaults the process would use with an empty environment.

use crate::shell::config::AppConfig;
use std::path::PathBuf;

pub struct AppConfigBuilder {
    inner: AppConfig,
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        Self {
            inner: AppConfig::from_lookup(|_| None).unwrap(),
        }
    }

    pub fn host(mut self, v: &str) -> Self {
        self.inner.host = v.parse().unwrap();
        self
    }

    pub fn port(mut self, v: u16) -> Self {
        self.inner.port = v;
        self
    }

    pub fn allowed_origins(mut self, v: &[&str]) -> Self {
        self.inner.allowed_origins = v.iter().map(|o| o.parse().unwrap()).collect();
        self
    }

    pub fn static_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.inner.static_dir = v.into();
        self
    }

    pub fn json_body_limit(mut self, v: usize) -> Self {
        self.inner.json_body_limit = v;
        self
    }

    pub fn build(self) -> AppConfig {
        self.inner
    }
}

#[cfg(test)]
mod app_config_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn setters_override_fields_and_build_returns_inner() {
        let config = AppConfigBuilder::new()
            .host("127.0.0.1")
            .port(5000)
            .allowed_origins(&["https://a.example"])
            .static_dir("/tmp/images")
            .json_body_limit(10)
            .build();

        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.allowed_origins, vec!["https://a.example"]);
        assert_eq!(config.static_dir, PathBuf::from("/tmp/images"));
        assert_eq!(config.json_body_limit, 10);
    }
}
