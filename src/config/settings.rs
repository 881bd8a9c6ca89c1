use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Optional override file looked up at the root directory
pub const CONFIG_FILE_NAME: &str = "handoff.toml";

/// Layout and header settings for a snapshot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Source document file name, relative to the root
    pub document_name: String,
    /// Archive directory name, relative to the root
    pub archive_dir: String,
    /// Marker the first line must start with to be rewritten
    pub header_prefix: String,
    /// Zone label shown in the rewritten header. Display only.
    pub time_zone_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_name: "HANDOFF.md".into(),
            archive_dir: "logs".into(),
            header_prefix: "# HANDOFF".into(),
            time_zone_label: "Africa/Johannesburg".into(),
        }
    }
}

/// TOML representation of the override file
///
/// Unknown keys are ignored so unrelated settings in the file never block a run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub document_name: Option<String>,
    pub archive_dir: Option<String>,
    pub header_prefix: Option<String>,
    pub time_zone_label: Option<String>,
}

impl Config {
    /// Load settings for `root`, merging `<root>/handoff.toml` over the defaults.
    ///
    /// Never fails: a missing, unreadable or unparseable file yields the defaults.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config, using defaults"
                );
                return Self::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "Loaded config overrides");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }

    fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(name) = toml_config.document_name {
            config.document_name = name;
        }
        if let Some(dir) = toml_config.archive_dir {
            config.archive_dir = dir;
        }
        if let Some(prefix) = toml_config.header_prefix {
            config.header_prefix = prefix;
        }
        if let Some(label) = toml_config.time_zone_label {
            config.time_zone_label = label;
        }

        Ok(config)
    }

    /// Path of the source document under `root`
    pub fn document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.document_name)
    }

    /// Path of the archive directory under `root`
    pub fn archive_path(&self, root: &Path) -> PathBuf {
        root.join(&self.archive_dir)
    }

    /// File stem used for snapshot files (`HANDOFF` for `HANDOFF.md`)
    pub fn snapshot_stem(&self) -> &str {
        Path::new(&self.document_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.document_name)
    }

    /// Extension used for snapshot files, without the dot
    pub fn snapshot_extension(&self) -> Option<&str> {
        Path::new(&self.document_name)
            .extension()
            .and_then(|s| s.to_str())
    }
}
