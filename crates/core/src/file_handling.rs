//! Reading the configuration and password files from disk.

use std::fs::{self, File};

use log::debug;

use crate::config::ConfigFile;
use crate::error::{Error, Result};

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    match File::open(path) {
        Ok(reader) => Ok(reader),
        Err(e) => Err(Error::io_error(
            file_description.to_string(),
            path.to_string(),
            e,
        )),
    }
}

/// Loads the YAML configuration file.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
///
/// # Examples
///
/// ```no_run
/// use ac_time_core::file_handling::get_config_file;
///
/// let config_file = get_config_file("/home/me/.ac-time/config.yml")?;
/// println!("Server: {:?}", config_file.url);
/// # Ok::<(), ac_time_core::error::Error>(())
/// ```
pub fn get_config_file(config_path: &str) -> Result<ConfigFile> {
    let config_reader = get_reader("config", config_path)?;

    let config_file: ConfigFile = serde_yaml::from_reader(config_reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "config".to_string(),
            config_path.to_string(),
            e,
        )
    })?;

    debug!("Loaded config file `{config_path}`");
    Ok(config_file)
}

/// Reads a password from the first line of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its first line is empty.
pub fn read_password_file(path: &str) -> Result<String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io_error("password".to_string(), path.to_string(), e))?;

    let password = contents.lines().next().unwrap_or_default().trim_end();
    if password.is_empty() {
        return Err(Error::Password(format!("the password file `{path}` is empty")));
    }

    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{contents}").unwrap();
        temp_file
    }

    #[test]
    fn test_get_config_file() {
        let temp_file = write_temp(
            r#"
url: "https://ac.example.com/api/v1"
user: "me@example.com"
target_weekly_hours: 40
calendar_command: []
"#,
        );
        let config_file = get_config_file(temp_file.path().to_str().unwrap()).unwrap();

        assert_eq!(config_file.url.as_deref(), Some("https://ac.example.com/api/v1"));
        assert_eq!(config_file.user.as_deref(), Some("me@example.com"));
        assert_eq!(config_file.target_weekly_hours, Some(40.0));
        assert_eq!(config_file.calendar_command, Some(vec![]));
        assert!(config_file.password.is_none());
    }

    #[test]
    fn test_get_config_file_missing() {
        let result = get_config_file("/definitely/not/here/config.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_get_config_file_bad_yaml() {
        let temp_file = write_temp("url: [unclosed");
        let result = get_config_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_read_password_file_uses_first_line() {
        let temp_file = write_temp("s3cret\nignored\n");
        let password = read_password_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(password, "s3cret");
    }

    #[test]
    fn test_read_password_file_empty() {
        let temp_file = write_temp("\n");
        let result = read_password_file(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Password(_))));
    }
}
