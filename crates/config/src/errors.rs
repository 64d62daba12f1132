use std::path::PathBuf;

use thiserror::Error;

use crate::CONFIG_FILE_NAME;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// returned if the config file is not found in the current or any parent directory
    #[error("config file {CONFIG_FILE_NAME} not found in the current or any parent directory")]
    ConfigFileNotFound,
    /// returned if the current directory path cannot be read
    #[error("could not read the current path")]
    ReadCurrentDirectory,
    /// returned if the config file cannot be read
    #[error("could not read '{0}'\nCaused by: {1}")]
    ReadConfigFile(PathBuf, std::io::Error),
    /// returned if the config file is not valid TOML
    #[error("could not parse '{0}'\nCaused by: {1}")]
    ParseConfigFile(PathBuf, toml::de::Error),
    /// returned if the config file lacks the expected section
    #[error("file '{path}' has no [{section}] section")]
    MissingSection { path: PathBuf, section: &'static str },
    /// returned if required keys are absent from the config section
    #[error("missing configuration fields: {0}")]
    MissingFields(String),
    /// returned if the section does not deserialize into settings
    #[error("invalid configuration in '{0}'\nCaused by: {1}")]
    DeserializeSettings(PathBuf, toml::de::Error),
    /// returned if a configured path does not exist
    #[error("provided path '{0}' doesn't exist")]
    PathDoesNotExist(PathBuf),
    /// returned if the target package path is not a directory
    #[error("provided path '{0}' isn't a directory")]
    NotADirectory(PathBuf),
    /// returned if the target package name is not a legal identifier
    #[error("'{0}' isn't a valid package name")]
    InvalidPackageName(String),
}
