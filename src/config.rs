use crate::{dom::Dom, language::Language, logging::LogLevel};
use thiserror::Error;

const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_LANGUAGE: Language = Language::Es;
const DEFAULT_SERVICE_WORKER_URL: &str = "/sw.js";

const LOG_LEVEL_ATTRIBUTE: &str = "data-log-level";
const DEFAULT_LANGUAGE_ATTRIBUTE: &str = "data-default-language";
const SERVICE_WORKER_ATTRIBUTE: &str = "data-service-worker";
const CRITICAL_IMAGES_ATTRIBUTE: &str = "data-critical-images";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported value {value:?} for {attribute}")]
    Unsupported {
        attribute: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub default_language: Language,
    pub service_worker_url: Option<String>,
    pub critical_images: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            default_language: DEFAULT_LANGUAGE,
            service_worker_url: Some(DEFAULT_SERVICE_WORKER_URL.to_string()),
            critical_images: Vec::new(),
        }
    }
}

impl SiteConfig {
    pub fn from_root<D: Dom>(dom: &D) -> (Self, Vec<ConfigError>) {
        match dom.root() {
            Some(root) => Self::from_attributes(|name| dom.attribute(&root, name)),
            None => (Self::default(), Vec::new()),
        }
    }

    /// Unsupported values fall back to their default and are reported.
    pub fn from_attributes<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        let log_level = parse_log_level(&lookup, DEFAULT_LOG_LEVEL).unwrap_or_else(|err| {
            errors.push(err);
            DEFAULT_LOG_LEVEL
        });
        let default_language = parse_language(&lookup, DEFAULT_LANGUAGE).unwrap_or_else(|err| {
            errors.push(err);
            DEFAULT_LANGUAGE
        });
        let service_worker_url = parse_service_worker_url(&lookup);
        let critical_images = parse_critical_images(&lookup);

        (
            Self {
                log_level,
                default_language,
                service_worker_url,
                critical_images,
            },
            errors,
        )
    }
}

fn parse_non_empty_string<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level<F>(lookup: &F, default: LogLevel) -> Result<LogLevel, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = parse_non_empty_string(lookup, LOG_LEVEL_ATTRIBUTE) else {
        return Ok(default);
    };

    LogLevel::from_str(&value.to_ascii_lowercase()).ok_or(ConfigError::Unsupported {
        attribute: LOG_LEVEL_ATTRIBUTE,
        value,
    })
}

fn parse_language<F>(lookup: &F, default: Language) -> Result<Language, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = parse_non_empty_string(lookup, DEFAULT_LANGUAGE_ATTRIBUTE) else {
        return Ok(default);
    };

    Language::from_str(&value.to_ascii_lowercase()).ok_or(ConfigError::Unsupported {
        attribute: DEFAULT_LANGUAGE_ATTRIBUTE,
        value,
    })
}

fn parse_service_worker_url<F>(lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match parse_non_empty_string(lookup, SERVICE_WORKER_ATTRIBUTE) {
        None => Some(DEFAULT_SERVICE_WORKER_URL.to_string()),
        Some(value) if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("none") => None,
        Some(value) => Some(value),
    }
}

fn parse_critical_images<F>(lookup: &F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    parse_non_empty_string(lookup, CRITICAL_IMAGES_ATTRIBUTE)
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
