use std::path::{Path, PathBuf};

use crate::error::Error;

/// Project configuration loaded from `.msgident.toml`.
/// Names the two input files, the sections to reconcile, and where the
/// resolved snapshot is written.
pub struct Config {
    /// Path to the analyzer's JSON catalog dump.
    pub catalog: PathBuf,
    /// Path to the curated `name=hash` identifiers file.
    pub identifiers: PathBuf,
    /// Path the resolved `name=id` snapshot is written to.
    pub output: PathBuf,
    /// Section names to reconcile, in order.
    pub sections: Vec<String>,
}

/// Raw TOML structure for `.msgident.toml`.
#[derive(serde::Deserialize)]
struct MsgidentTomlConfig {
    catalog: Option<String>,
    identifiers: Option<String>,
    output: Option<String>,
    sections: Option<Vec<String>>,
}

impl Config {
    /// Load config from `.msgident.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. Returns an error if
    /// the file exists but is malformed — never silently falls back to
    /// defaults when the user wrote a config file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".msgident.toml");
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::defaults()),
            Err(e) => return Err(Error::Io(e)),
        };

        let raw: MsgidentTomlConfig = toml::from_str(&content)?;
        let defaults = Self::defaults();
        Ok(Self {
            catalog: raw.catalog.map_or(defaults.catalog, PathBuf::from),
            identifiers: raw.identifiers.map_or(defaults.identifiers, PathBuf::from),
            output: raw.output.map_or(defaults.output, PathBuf::from),
            sections: raw.sections.unwrap_or(defaults.sections),
        })
    }

    /// The conventional file names used when no config file exists.
    fn defaults() -> Self {
        Self {
            catalog: PathBuf::from("messages.catalog.json"),
            identifiers: PathBuf::from("messages.ini"),
            output: PathBuf::from("messages.resolved"),
            sections: vec!["Incoming".to_string(), "Outgoing".to_string()],
        }
    }

    /// Check that a section name is configured.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSection` if the name is not in `sections`.
    pub fn require_section(&self, name: &str) -> Result<(), Error> {
        if self.sections.iter().any(|s| s == name) {
            return Ok(());
        }
        Err(Error::UnknownSection {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test assertions")]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert_eq!(config.identifiers, PathBuf::from("messages.ini"));
        assert_eq!(config.sections, vec!["Incoming", "Outgoing"]);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".msgident.toml"),
            "identifiers = \"names.ini\"\nsections = [\"Composer\"]\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.identifiers, PathBuf::from("names.ini"));
        assert_eq!(config.sections, vec!["Composer"]);
        assert_eq!(config.catalog, PathBuf::from("messages.catalog.json"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".msgident.toml"), "sections = 3\n").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();

        assert!(config.require_section("Incoming").is_ok());
        assert!(matches!(
            config.require_section("Composer"),
            Err(Error::UnknownSection { .. })
        ));
    }
}
