//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the ac-time CLI tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use ac_time_cli::cli_args::Args;
///
/// let args = Args::parse_from(["act", "List Daily Time Records"]);
/// assert_eq!(args.action.as_deref(), Some("List Daily Time Records"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the configuration YAML.
    ///
    /// If not provided, defaults to `~/.ac-time/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Read the password from the first line of this file.
    ///
    /// Takes precedence over `password` and `password_file` in the config.
    #[arg(long)]
    pub password_file: Option<String>,

    /// Weekly hour target used for the billable percentage.
    ///
    /// Overrides `target_weekly_hours` from the config.
    #[arg(long)]
    pub target_weekly_hours: Option<f64>,

    /// Run a single action by its exact name and exit.
    ///
    /// If not provided, the action prompt is shown repeatedly until cancelled.
    /// One of: "Create Time Record", "List Daily Time Records",
    /// "List Weekly Time Records".
    #[arg(num_args(1))]
    pub action: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["act"]);

        assert!(args.config_path.is_none());
        assert!(args.password_file.is_none());
        assert!(args.target_weekly_hours.is_none());
        assert!(args.action.is_none());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from(["act", "-c", "/custom/config.yml"]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "act",
            "--config-path",
            "/custom/config.yml",
            "--password-file",
            "~/.ac-time/password",
            "--target-weekly-hours",
            "40",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.password_file, Some("~/.ac-time/password".to_string()));
        assert_eq!(args.target_weekly_hours, Some(40.0));
    }

    #[test]
    fn test_args_action() {
        let args = Args::parse_from(["act", "Create Time Record"]);
        assert_eq!(args.action, Some("Create Time Record".to_string()));
    }

    #[test]
    fn test_args_rejects_bad_target() {
        let result = Args::try_parse_from(["act", "--target-weekly-hours", "lots"]);
        assert!(result.is_err());
    }
}
