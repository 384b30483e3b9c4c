use std::{collections::HashMap, fs, io, path::Path};

use shared::{
    domain::Gene,
    error::UnknownGene,
};
use thiserror::Error;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "predictor.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid prediction endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error(transparent)]
    UnknownGene(#[from] UnknownGene),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Root URL of the prediction service, without a trailing slash.
    pub endpoint: String,
    pub default_gene: Gene,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            default_gene: Gene::default(),
        }
    }
}

/// Defaults, then `predictor.toml` in the working directory, then the process environment.
pub fn load_settings() -> Result<ClientSettings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Layers a flat `key = "value"` TOML file and then environment variables over the
/// defaults. A missing file is not an error.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, SettingsError> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<HashMap<String, String>>(&raw).map_err(|source| {
                SettingsError::Parse {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            if let Some(v) = file_cfg.get("endpoint") {
                settings.endpoint = normalize_endpoint(v)?;
            }
            if let Some(v) = file_cfg.get("default_gene") {
                settings.default_gene = v.parse()?;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    }

    for name in ["PREDICTOR_ENDPOINT", "APP__ENDPOINT"] {
        if let Some(v) = env(name) {
            settings.endpoint = normalize_endpoint(&v)?;
        }
    }
    for name in ["PREDICTOR_DEFAULT_GENE", "APP__DEFAULT_GENE"] {
        if let Some(v) = env(name) {
            settings.default_gene = v.parse()?;
        }
    }

    Ok(settings)
}

/// Validates an endpoint as an absolute http(s) URL and strips trailing slashes.
pub fn normalize_endpoint(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| SettingsError::InvalidEndpoint {
        endpoint: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed".into()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
