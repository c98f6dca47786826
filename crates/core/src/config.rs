//! Session configuration for ac-time.
//!
//! The configuration is read once at startup from a YAML file and resolved
//! into an immutable [`Config`]. Resolving needs the password, which may come
//! from the file itself, from a password file or from an interactive prompt;
//! [`ConfigFile::password_source`] tells the caller which one applies.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the configuration file
const DEFAULT_CONFIG_PATH: &str = "~/.ac-time/config.yml";

pub const DEFAULT_CLIENT_NAME: &str = "ac-time";
pub const DEFAULT_CLIENT_VENDOR: &str = "ac-time";
pub const DEFAULT_TARGET_WEEKLY_HOURS: f64 = 37.5;
pub const DEFAULT_SUMMARY_WIDTH: usize = 60;

fn default_calendar_command() -> Vec<String> {
    vec!["cal".to_string(), "-3".to_string()]
}

/// Resolves the configuration file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// configuration path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use ac_time_core::config::get_config_path;
///
/// let custom_path = get_config_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}

/// The configuration file as written, before the password is resolved.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub password_file: Option<String>,
    pub client_name: Option<String>,
    pub client_vendor: Option<String>,
    pub target_weekly_hours: Option<f64>,
    pub summary_width: Option<usize>,
    pub utc_offset_hours: Option<i32>,
    pub calendar_command: Option<Vec<String>>,
}

/// Where the session password comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordSource {
    Inline(String),
    File(String),
    Prompt,
}

impl ConfigFile {
    /// Picks the password source: an explicit password file first, then the
    /// password in the config, then the config's password file, then a prompt.
    #[must_use]
    pub fn password_source(&self, password_file_arg: Option<&str>) -> PasswordSource {
        if let Some(path) = password_file_arg {
            return PasswordSource::File(shellexpand::tilde(path).to_string());
        }

        match (&self.password, &self.password_file) {
            (Some(password), _) if !password.is_empty() => {
                PasswordSource::Inline(password.clone())
            }
            (_, Some(path)) => PasswordSource::File(shellexpand::tilde(path).to_string()),
            _ => PasswordSource::Prompt,
        }
    }
}

/// Resolved, read-only session configuration.
#[derive(Clone)]
pub struct Config {
    pub url: String,
    pub user: String,
    pub password: String,
    pub client_name: String,
    pub client_vendor: String,
    pub target_weekly_hours: f64,
    pub summary_width: usize,
    pub utc_offset_hours: i32,
    pub calendar_command: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("client_name", &self.client_name)
            .field("client_vendor", &self.client_vendor)
            .field("target_weekly_hours", &self.target_weekly_hours)
            .field("summary_width", &self.summary_width)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .field("calendar_command", &self.calendar_command)
            .finish()
    }
}

impl Config {
    /// Builds the session configuration from the file contents and a resolved password.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` or `user` is missing, or if a numeric setting
    /// is out of range.
    pub fn resolve(file: ConfigFile, password: String) -> Result<Self> {
        let url = file
            .url
            .filter(|url| !url.trim().is_empty())
            .ok_or(Error::MissingConfigField("url"))?;
        let user = file
            .user
            .filter(|user| !user.trim().is_empty())
            .ok_or(Error::MissingConfigField("user"))?;

        let target_weekly_hours = file
            .target_weekly_hours
            .unwrap_or(DEFAULT_TARGET_WEEKLY_HOURS);
        if !target_weekly_hours.is_finite() || target_weekly_hours <= 0.0 {
            return Err(Error::InvalidConfigField {
                field: "target_weekly_hours",
                reason: format!("expected a positive number of hours, got {target_weekly_hours}"),
            });
        }

        let utc_offset_hours = file.utc_offset_hours.unwrap_or(0);
        if !(-23..=23).contains(&utc_offset_hours) {
            return Err(Error::InvalidConfigField {
                field: "utc_offset_hours",
                reason: format!("expected -23 to 23, got {utc_offset_hours}"),
            });
        }

        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            user,
            password,
            client_name: file
                .client_name
                .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
            client_vendor: file
                .client_vendor
                .unwrap_or_else(|| DEFAULT_CLIENT_VENDOR.to_string()),
            target_weekly_hours,
            summary_width: file.summary_width.unwrap_or(DEFAULT_SUMMARY_WIDTH),
            utc_offset_hours,
            calendar_command: file
                .calendar_command
                .unwrap_or_else(default_calendar_command),
        })
    }
}
