//! Settings for the GraphQL SDK generator.
//!
//! Configuration lives in a `sdkgen.toml` file found by walking up from the
//! current directory, inside a `[sdkgen]` table:
//!
//! ```toml
//! [sdkgen]
//! schema_path = "schema.graphql"
//! queries_path = "queries"
//! target_package_name = "my_client"
//! ```
//!
//! Loading fails fast: a missing file, a missing section, absent required
//! keys, nonexistent paths or an illegal package name all abort before any
//! generation starts.

mod errors;

pub use errors::ConfigError;

use std::{
    env,
    path::{Path, PathBuf},
};

/// The fixed file name looked up in the current and every parent directory.
pub const CONFIG_FILE_NAME: &str = "sdkgen.toml";

/// The table the settings are read from.
pub const CONFIG_SECTION: &str = "sdkgen";

const DEFAULT_PACKAGE_NAME: &str = "graphql_client";

const REQUIRED_FIELDS: &[&str] = &["schema_path", "queries_path"];

/// Validated generator settings.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path of the GraphQL schema the client is generated against.
    pub schema_path: PathBuf,
    /// Path of the query and mutation documents to generate builders for.
    pub queries_path: PathBuf,
    /// Name of the generated package. Must be a legal identifier.
    #[serde(default = "default_package_name")]
    pub target_package_name: String,
    /// Directory the generated package is written into.
    #[serde(default = "default_package_path")]
    pub target_package_path: PathBuf,
}

fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_owned()
}

fn default_package_path() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Settings {
    /// Checks that every configured path points where it should and that the
    /// package name is usable as an identifier.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.schema_path, &self.queries_path] {
            if !path.exists() {
                return Err(ConfigError::PathDoesNotExist(path.clone()));
            }
        }

        if !is_valid_package_name(&self.target_package_name) {
            return Err(ConfigError::InvalidPackageName(
                self.target_package_name.clone(),
            ));
        }

        if !self.target_package_path.is_dir() {
            return Err(ConfigError::NotADirectory(self.target_package_path.clone()));
        }

        Ok(())
    }
}

/// Walks from the current directory towards the filesystem root, loading the
/// first config file found.
pub fn discover() -> Result<Settings, ConfigError> {
    let current_dir = env::current_dir().map_err(|_| ConfigError::ReadCurrentDirectory)?;
    let path = find_config_file(&current_dir)?;

    tracing::debug!("using config file at {}", path.display());

    load(&path)
}

/// The nearest ancestor of `start` (including `start` itself) containing a
/// config file.
pub fn find_config_file(start: &Path) -> Result<PathBuf, ConfigError> {
    start
        .ancestors()
        .map(|directory| directory.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
        .ok_or(ConfigError::ConfigFileNotFound)
}

/// Reads and validates settings from the given config file.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|error| ConfigError::ReadConfigFile(path.to_owned(), error))?;

    let table: toml::Table = contents
        .parse()
        .map_err(|error| ConfigError::ParseConfigFile(path.to_owned(), error))?;

    let section = table
        .get(CONFIG_SECTION)
        .ok_or_else(|| ConfigError::MissingSection {
            path: path.to_owned(),
            section: CONFIG_SECTION,
        })?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| section.get(field).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(ConfigError::MissingFields(missing.join(", ")));
    }

    let settings: Settings = section
        .clone()
        .try_into()
        .map_err(|error| ConfigError::DeserializeSettings(path.to_owned(), error))?;

    settings.validate()?;

    Ok(settings)
}

fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();

    let starts_well = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');

    starts_well
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&name)
}

/// Rust keywords, strict and reserved. The generated package is a Rust
/// crate, so its name must not be one of these.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];
