//! Construction-time configuration
//!
//! Configuration is loaded from TOML, optionally overridden from `WARDEN_*`
//! environment variables, then validated. Nothing here is consulted after
//! construction: a vault's authorizer and identity are fixed once built.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::{NetworkId, VaultId};

/// Environment variable overriding `vault.vault_id`
pub const ENV_VAULT_ID: &str = "WARDEN_VAULT_ID";
/// Environment variable overriding `vault.network_id`
pub const ENV_NETWORK_ID: &str = "WARDEN_NETWORK_ID";
/// Environment variable overriding `authority.verifying_key`
pub const ENV_AUTHORITY_KEY: &str = "WARDEN_AUTHORITY_KEY";
/// Environment variable overriding `authority.ledger_path`
pub const ENV_LEDGER_PATH: &str = "WARDEN_LEDGER_PATH";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unacceptable value
    #[error("field '{field}': {message}")]
    Invalid {
        /// Dotted field name
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Vault section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultSettings {
    /// Hex-encoded 32-byte vault identity
    pub vault_id: String,
    /// Network discriminator the vault runs on
    pub network_id: u64,
}

impl VaultSettings {
    /// Parsed vault identity
    pub fn vault_id(&self) -> Result<VaultId, ConfigError> {
        self.vault_id
            .parse()
            .map_err(|e| ConfigError::invalid("vault.vault_id", format!("{e}")))
    }

    /// Network discriminator
    pub fn network_id(&self) -> NetworkId {
        NetworkId::new(self.network_id)
    }
}

/// Authority section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthoritySettings {
    /// Hex-encoded 32-byte verifying key of the trusted signer.
    ///
    /// May be absent when the identity is registered later via bootstrap.
    #[serde(default)]
    pub verifying_key: Option<String>,
    /// Path of the durable replay ledger; in-memory when absent
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

impl AuthoritySettings {
    /// Raw verifying key bytes, if configured
    pub fn verifying_key_bytes(&self) -> Result<Option<[u8; 32]>, ConfigError> {
        let Some(key) = &self.verifying_key else {
            return Ok(None);
        };
        let key = key.strip_prefix("0x").unwrap_or(key);
        let bytes = hex::decode(key)
            .map_err(|e| ConfigError::invalid("authority.verifying_key", e.to_string()))?;
        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            ConfigError::invalid(
                "authority.verifying_key",
                format!("expected 32 bytes, got {}", bytes.len()),
            )
        })?;
        Ok(Some(bytes))
    }
}

/// Top-level Warden configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Custody vault settings
    pub vault: VaultSettings,
    /// Authorization authority settings
    #[serde(default)]
    pub authority: AuthoritySettings,
}

impl WardenConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded warden config");
        Ok(config)
    }

    /// Apply `WARDEN_*` overrides from the process environment
    pub fn merge_with_env(&mut self) -> Result<(), ConfigError> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply `WARDEN_*` overrides from an explicit variable list
    pub fn merge_with_vars<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                ENV_VAULT_ID => self.vault.vault_id = value,
                ENV_NETWORK_ID => {
                    self.vault.network_id = value.parse().map_err(|_| {
                        ConfigError::invalid("vault.network_id", format!("not a u64: {value}"))
                    })?;
                }
                ENV_AUTHORITY_KEY => self.authority.verifying_key = Some(value),
                ENV_LEDGER_PATH => self.authority.ledger_path = Some(PathBuf::from(value)),
                _ => continue,
            }
            tracing::debug!(variable = %key, "config override applied");
        }
        Ok(())
    }

    /// Check that every field parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vault.vault_id()?;
        self.authority.verifying_key_bytes()?;
        if let Some(path) = &self.authority.ledger_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::invalid(
                    "authority.ledger_path",
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }
}
