//! Where the presentation content is served from.

use crate::config::HostConfig;
use std::path::{Path, PathBuf};

/// Directory of the packaged bundle under the application root.
pub const BUNDLE_DIR: &str = "dist";

/// Source of the presentation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A live development server.
    DevServer(String),
    /// The packaged static bundle.
    Bundle(PathBuf),
}

impl ContentSource {
    /// Pick the dev server when a URL is given, else the bundle under `app_root`.
    pub fn resolve(dev_server_url: Option<String>, app_root: &Path) -> Self {
        match dev_server_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::DevServer(url),
            None => Self::Bundle(app_root.join(BUNDLE_DIR)),
        }
    }

    /// Resolve from the process environment.
    pub fn from_env(config: &HostConfig) -> Self {
        let app_root = config
            .app_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::resolve(std::env::var(&config.dev_server_env).ok(), &app_root)
    }

    /// Check if content comes from a development server.
    pub fn is_dev(&self) -> bool {
        matches!(self, Self::DevServer(_))
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DevServer(url) => write!(f, "dev {}", url),
            Self::Bundle(path) => write!(f, "bundle {}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dev_server_wins_when_set() {
        let source = ContentSource::resolve(
            Some("http://localhost:5173".to_string()),
            Path::new("/opt/ndl"),
        );
        assert_eq!(
            source,
            ContentSource::DevServer("http://localhost:5173".to_string())
        );
        assert!(source.is_dev());
    }

    #[test]
    fn test_bundle_when_unset_or_blank() {
        let expected = ContentSource::Bundle(PathBuf::from("/opt/ndl/dist"));
        assert_eq!(ContentSource::resolve(None, Path::new("/opt/ndl")), expected);
        assert_eq!(
            ContentSource::resolve(Some("  ".to_string()), Path::new("/opt/ndl")),
            expected
        );
    }

    #[test]
    fn test_from_env_uses_configured_root() {
        let config = HostConfig {
            dev_server_env: "NDL_LITE_TEST_UNSET_VARIABLE".to_string(),
            app_root: Some(PathBuf::from("/srv/app")),
            ..HostConfig::default()
        };
        assert_eq!(
            ContentSource::from_env(&config),
            ContentSource::Bundle(PathBuf::from("/srv/app/dist"))
        );
    }
}
