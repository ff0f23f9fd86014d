//! Configuration management
//!
//! This module handles loading and saving the cloudphoto configuration file.
//! The file is stored in INI format at ~/.config/cloudphoto/cloudphotorc and
//! holds a single `default` section with the storage credentials, bucket name,
//! region and endpoint.

use std::path::{Path, PathBuf};

use ini::Ini;
use serde::Serialize;

use crate::error::{Error, Result};

/// Section holding the profile
pub const SECTION: &str = "default";

/// Default region offered by `init`
pub const DEFAULT_REGION: &str = "ru-central1";

/// Default endpoint offered by `init`
pub const DEFAULT_ENDPOINT_URL: &str = "https://storage.yandexcloud.net";

/// A complete storage profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    /// Bucket holding the albums and the generated site
    pub bucket: String,

    /// Access key ID
    pub aws_access_key_id: String,

    /// Secret access key
    #[serde(skip_serializing)]
    pub aws_secret_access_key: String,

    /// Storage region
    pub region: String,

    /// S3 endpoint URL
    pub endpoint_url: String,
}

/// Profile values as found on disk, any of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialProfile {
    pub bucket: Option<String>,
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
}

impl PartialProfile {
    fn from_ini(ini: &Ini) -> Self {
        let get = |key: &str| {
            ini.section(Some(SECTION))
                .and_then(|s| s.get(key))
                .map(str::to_string)
        };
        Self {
            bucket: get("bucket"),
            aws_access_key_id: get("aws_access_key_id"),
            aws_secret_access_key: get("aws_secret_access_key"),
            region: get("region"),
            endpoint_url: get("endpoint_url"),
        }
    }

    fn entries(&self) -> [(&'static str, Option<&String>); 5] {
        [
            ("bucket", self.bucket.as_ref()),
            ("aws_access_key_id", self.aws_access_key_id.as_ref()),
            ("aws_secret_access_key", self.aws_secret_access_key.as_ref()),
            ("region", self.region.as_ref()),
            ("endpoint_url", self.endpoint_url.as_ref()),
        ]
    }

    /// Turn into a complete profile, failing on the first missing key
    pub fn complete(self) -> Result<Profile> {
        fn require(value: Option<String>, key: &str) -> Result<String> {
            value.ok_or_else(|| Error::Config(format!("Missing parameter '{key}'")))
        }

        let profile = Profile {
            bucket: require(self.bucket, "bucket")?,
            aws_access_key_id: require(self.aws_access_key_id, "aws_access_key_id")?,
            aws_secret_access_key: require(self.aws_secret_access_key, "aws_secret_access_key")?,
            region: require(self.region, "region")?,
            endpoint_url: require(self.endpoint_url, "endpoint_url")?,
        };

        url::Url::parse(&profile.endpoint_url)?;
        Ok(profile)
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
        let config_path = home.join(".config").join("cloudphoto").join("cloudphotorc");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the complete profile
    ///
    /// A missing or unreadable file and a missing key are both configuration errors.
    pub fn load(&self) -> Result<Profile> {
        let content = std::fs::read_to_string(&self.config_path).map_err(|e| {
            Error::Config(format!(
                "Could not read configuration file {}: {e}",
                self.config_path.display()
            ))
        })?;
        let ini = Ini::load_from_str(&content)?;
        PartialProfile::from_ini(&ini).complete()
    }

    /// Load whatever values exist, for interactive editing
    ///
    /// Returns an empty profile if the file does not exist yet.
    pub fn load_partial(&self) -> Result<PartialProfile> {
        if !self.config_path.exists() {
            return Ok(PartialProfile::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let ini = Ini::load_from_str(&content)?;
        Ok(PartialProfile::from_ini(&ini))
    }

    /// Save the profile to disk
    ///
    /// Only the profile keys of the `default` section are replaced; other
    /// sections and keys already in the file are kept.
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 600 (owner read/write only).
    pub fn save(&self, profile: &PartialProfile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = if self.config_path.exists() {
            Ini::load_from_str(&std::fs::read_to_string(&self.config_path)?)?
        } else {
            Ini::new()
        };
        for (key, value) in profile.entries() {
            if let Some(value) = value {
                ini.with_section(Some(SECTION)).set(key, value.as_str());
            }
        }
        ini.write_to_file(&self.config_path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.config_path, permissions)?;
        }

        tracing::debug!(path = %self.config_path.display(), "configuration saved");
        Ok(())
    }
}
