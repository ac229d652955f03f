use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::io::{ConfigIoError, read_json_file, write_json_file};

/// Name of the per-directory pipeline config, looked up beside the model.
pub const CONFIG_FILE_NAME: &str = "daetex.json";

/// Conventions of the asset pipeline that produced the model.
///
/// The exporter drops models two directories below the asset root, so
/// relative texture paths resolve through `../..`. That offset is a property
/// of the pipeline, not of the format; it is carried here as configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub texture_root_offset: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            texture_root_offset: PathBuf::from("../.."),
        }
    }
}

impl PipelineConfig {
    /// Load `daetex.json` from the model's directory; defaults when absent.
    pub fn discover(model_dir: &Path) -> Result<Self, ConfigIoError> {
        match read_json_file(model_dir.join(CONFIG_FILE_NAME)) {
            Ok(config) => Ok(config),
            Err(ConfigIoError::Missing { .. }) => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    pub fn save_to(&self, model_dir: &Path) -> Result<(), ConfigIoError> {
        write_json_file(model_dir.join(CONFIG_FILE_NAME), self)
    }

    pub fn offset(&self) -> &Path {
        &self.texture_root_offset
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn discover_defaults_when_no_config_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = PipelineConfig::discover(dir.path()).expect("discover");
        assert_eq!(config.offset(), Path::new("../.."));
    }

    #[test]
    fn discover_reads_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "texture_root_offset": "assets" }"#,
        )
        .expect("write config");

        let config = PipelineConfig::discover(dir.path()).expect("discover");
        assert_eq!(config.offset(), Path::new("assets"));
    }

    #[test]
    fn discover_rejects_corrupt_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "{ not json").expect("write config");
        assert!(matches!(
            PipelineConfig::discover(dir.path()),
            Err(ConfigIoError::Corrupt { .. })
        ));
    }

    #[test]
    fn save_and_discover_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = PipelineConfig {
            texture_root_offset: PathBuf::from("../textures"),
        };
        config.save_to(dir.path()).expect("save");
        assert_eq!(PipelineConfig::discover(dir.path()).expect("discover"), config);
    }
}
