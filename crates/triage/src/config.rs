//! Configuration for the studio server.
//!
//! Loaded from a TOML file when one is given, otherwise built from defaults.
//! Environment variables override the file for deployment-specific values.

use serde::{Deserialize, Serialize};
use studio_llm::LlmConfig;
use tracing::warn;

/// Top-level studio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Model behind the triage agent
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub triage: TriageConfig,

    /// Timing of the placeholder producers
    #[serde(default)]
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            cors_origins: Vec::new(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Instructions for requests that carry no system prompt.
    /// Falls back to the built-in style triage instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_min_delay")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,
}

fn default_min_delay() -> u64 {
    2000
}

fn default_max_delay() -> u64 {
    5000
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay(),
            max_delay_ms: default_max_delay(),
        }
    }
}

impl StudioConfig {
    /// Load configuration from a TOML file.
    ///
    /// On Unix the file must be a regular file that is not world-writable,
    /// and must not be world-readable if it holds an API key.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        #[cfg(unix)]
        let permission_bits = validate_config_file_permissions(path)?;

        let config = Self::from_file_unchecked(path)?;

        if config.llm.api_key.is_some() {
            #[cfg(unix)]
            {
                if permission_bits & 0o004 != 0 {
                    anyhow::bail!(
                        "Config file '{}' contains an API key but is world-readable (mode {:04o}). Fix with: chmod 600 {}",
                        path.display(),
                        permission_bits,
                        path.display()
                    );
                }
            }
            warn!(
                "API key found in config file '{}'. Prefer the OPENAI_API_KEY environment variable.",
                path.display()
            );
        }

        Ok(config)
    }

    /// Load configuration from a TOML file without permission checks.
    pub fn from_file_unchecked(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STUDIO_BIND_ADDR`, `STUDIO_PORT` and `STUDIO_CORS_ORIGINS`.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(bind) = lookup("STUDIO_BIND_ADDR") {
            self.server.bind = bind;
        }
        if let Some(port) = lookup("STUDIO_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid STUDIO_PORT '{port}': {e}"))?;
        }
        if let Some(origins) = lookup("STUDIO_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.mock.min_delay_ms > self.mock.max_delay_ms {
            anyhow::bail!(
                "mock.min_delay_ms ({}) must not exceed mock.max_delay_ms ({})",
                self.mock.min_delay_ms,
                self.mock.max_delay_ms
            );
        }
        if self.server.body_limit_bytes == 0 {
            anyhow::bail!("server.body_limit_bytes must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(unix)]
/// Rejects non-regular and world-writable files. Returns the permission bits.
fn validate_config_file_permissions(path: &std::path::Path) -> anyhow::Result<u32> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

    if !metadata.is_file() {
        anyhow::bail!(
            "Config path '{}' is not a regular file. Symlinks and directories are not allowed.",
            path.display()
        );
    }

    let permission_bits = metadata.permissions().mode() & 0o777;

    if permission_bits & 0o002 != 0 {
        anyhow::bail!(
            "Config file '{}' is world-writable (mode {:04o}). Fix with: chmod o-w {}",
            path.display(),
            permission_bits,
            path.display()
        );
    }

    Ok(permission_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = StudioConfig::default();
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.mock.min_delay_ms, 2000);
        assert_eq!(config.mock.max_delay_ms, 5000);
        assert!(config.triage.default_instructions.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8080

[llm]
provider = "ollama"
model = "llama3.2"

[triage]
default_instructions = "Pick Hype or Ad."
"#
        )
        .unwrap();

        let config = StudioConfig::from_file_unchecked(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind, "127.0.0.1");
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.triage.default_instructions.as_deref(), Some("Pick Hype or Ad."));
        assert_eq!(config.mock.max_delay_ms, 5000);
    }

    #[test]
    fn inverted_mock_range_is_rejected() {
        let config = StudioConfig {
            mock: MockConfig {
                min_delay_ms: 10,
                max_delay_ms: 5,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("STUDIO_BIND_ADDR", "0.0.0.0"),
            ("STUDIO_PORT", "9000"),
            ("STUDIO_CORS_ORIGINS", "http://localhost:3000, https://studio.example ,"),
        ]
        .into_iter()
        .collect();

        let mut config = StudioConfig::default();
        config
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.server.cors_origins,
            vec!["http://localhost:3000", "https://studio.example"]
        );
    }

    #[test]
    fn bad_port_override_fails() {
        let mut config = StudioConfig::default();
        let result = config.apply_overrides(|name| (name == "STUDIO_PORT").then(|| "nope".into()));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn world_readable_file_with_key_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\napi_key = \"sk-test\"").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(StudioConfig::from_file(file.path()).is_err());

        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o600)).unwrap();
        let config = StudioConfig::from_file(file.path()).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    }

    #[cfg(unix)]
    #[test]
    fn commented_out_key_does_not_block_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\n# api_key = \"sk-old\"\nmodel = \"gpt-4o\"").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        let config = StudioConfig::from_file(file.path()).unwrap();
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.model, "gpt-4o");
    }

    #[cfg(unix)]
    #[test]
    fn world_writable_file_is_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 8080").unwrap();
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o666)).unwrap();

        assert!(StudioConfig::from_file(file.path()).is_err());
    }
}
