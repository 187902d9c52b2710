use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use vcardify_core::{VcardDialect, DEFAULT_COUNTRY_CODE};

const APP_DIR: &str = "vcardify";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

const MAX_COUNTRY_CODE_DIGITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub country_code: String,
    pub dialect: VcardDialect,
    pub name_suffix: String,
    pub output_dir: PathBuf,
    pub backup: bool,
    pub preview_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            dialect: VcardDialect::default(),
            name_suffix: String::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            backup: true,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid country_code value: {0} (expected '+' followed by 1-4 digits)")]
    InvalidCountryCode(String),
    #[error("invalid output_dir value: {0}")]
    InvalidOutputDir(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    country_code: Option<String>,
    vcard_version: Option<VcardDialect>,
    name_suffix: Option<String>,
    output_dir: Option<PathBuf>,
    backup: Option<bool>,
    preview_limit: Option<usize>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Checks a country code such as `+91` or `+1`.
pub fn validate_country_code(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('+')
        .ok_or_else(|| ConfigError::InvalidCountryCode(raw.to_string()))?;
    if digits.is_empty()
        || digits.len() > MAX_COUNTRY_CODE_DIGITS
        || !digits.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(ConfigError::InvalidCountryCode(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(country_code) = parsed.country_code {
        config.country_code = validate_country_code(&country_code)?;
    }

    if let Some(dialect) = parsed.vcard_version {
        config.dialect = dialect;
    }

    if let Some(suffix) = parsed.name_suffix {
        config.name_suffix = suffix;
    }

    if let Some(dir) = parsed.output_dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidOutputDir(dir));
        }
        config.output_dir = dir;
    }

    if let Some(backup) = parsed.backup {
        config.backup = backup;
    }

    if let Some(limit) = parsed.preview_limit {
        config.preview_limit = limit;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, validate_country_code, AppConfig, ConfigError, ConfigFile,
    };
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use vcardify_core::VcardDialect;

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            country_code: Some(" +1 ".to_string()),
            vcard_version: Some(VcardDialect::Legacy),
            name_suffix: Some(" (Work)".to_string()),
            output_dir: Some(PathBuf::from("exports")),
            backup: Some(false),
            preview_limit: Some(10),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.country_code, "+1");
        assert_eq!(merged.dialect, VcardDialect::Legacy);
        assert_eq!(merged.name_suffix, " (Work)");
        assert_eq!(merged.output_dir, PathBuf::from("exports"));
        assert!(!merged.backup);
        assert_eq!(merged.preview_limit, 10);
    }

    #[test]
    fn merge_config_keeps_defaults_for_missing_keys() {
        let merged = merge_config(ConfigFile::default()).expect("merge");
        assert_eq!(merged, AppConfig::default());
        assert_eq!(merged.country_code, "+91");
        assert_eq!(merged.dialect, VcardDialect::Modern);
        assert!(merged.backup);
    }

    #[test]
    fn validate_country_code_rules() {
        assert_eq!(validate_country_code("+91").unwrap(), "+91");
        assert!(validate_country_code("91").is_err());
        assert!(validate_country_code("+").is_err());
        assert!(validate_country_code("+12345").is_err());
        assert!(validate_country_code("+9a").is_err());
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        assert!(matches!(err, ConfigError::MissingConfigFile(_)));
        assert!(load_at_path(&missing, false).expect("optional").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "country_code = \"+44\"\nvcard_version = \"2.1\"\nbackup = false\n",
        )
        .expect("write config");

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.country_code, "+44");
        assert_eq!(config.dialect, VcardDialect::Legacy);
        assert!(!config.backup);
        assert_eq!(config.preview_limit, 5);
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"\n").expect("write config");
        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_at_path_rejects_unknown_version() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "vcard_version = \"4.0\"\n").expect("write config");
        assert!(load_at_path(&path, true).is_err());
    }
}
