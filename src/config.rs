use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub map: MapConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
}

/// Directory-scanner settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source file extension scanned into modules
    pub extension: String,
    /// Glob patterns pruned from the scan
    pub exclude: Vec<String>,
}

/// Descriptor-walker settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// 0 = public only, 1 = +protected, 2 = +private
    pub access_level: u8,
    /// Emit dependency edges recorded during the walk
    pub dependencies: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: PathBuf,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Puml,
    Json,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extension: "py".to_string(),
            exclude: vec![
                "__pycache__/**".to_string(),
                ".git/**".to_string(),
                "venv/**".to_string(),
                ".venv/**".to_string(),
                "*.egg-info/**".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: PathBuf::from("/tmp/class_diagram.puml"),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        exclude: Vec<String>,
        format: Option<String>,
        access_level: Option<u8>,
        dependencies: bool,
    ) {
        if let Some(out) = output {
            self.output.path = out;
        }

        if !exclude.is_empty() {
            self.scan.exclude.extend(exclude);
        }

        if let Some(fmt) = format {
            self.output.format = match fmt.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Puml,
            };
        }

        if let Some(level) = access_level {
            self.map.access_level = level;
        }

        if dependencies {
            self.map.dependencies = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.map.access_level > 2 {
            return Err(Error::config_validation("access_level must be 0, 1, or 2"));
        }

        if self.scan.extension.is_empty() {
            return Err(Error::config_validation("scan extension must not be empty"));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(Error::config_validation("output path must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.extension, "py");
        assert_eq!(config.map.access_level, 0);
        assert!(!config.map.dependencies);
        assert_eq!(config.output.format, OutputFormat::Puml);
        assert_eq!(config.output.path, PathBuf::from("/tmp/class_diagram.puml"));
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[project]
name = "My Project"

[scan]
extension = "py"
exclude = ["vendor/**"]

[map]
access_level = 2
dependencies = true

[output]
format = "json"
path = "/tmp/out.json"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.project.name, "My Project");
        assert_eq!(config.scan.exclude, vec!["vendor/**".to_string()]);
        assert_eq!(config.map.access_level, 2);
        assert!(config.map.dependencies);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.scan.extension, "py");
    }

    #[test]
    fn test_validation_access_level() {
        let mut config = Config::default();
        config.map.access_level = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_extension() {
        let mut config = Config::default();
        config.scan.extension.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(PathBuf::from("/custom/out.puml")), vec![], None, None, false);
        assert_eq!(config.output.path, PathBuf::from("/custom/out.puml"));
    }

    #[test]
    fn test_merge_cli_exclude() {
        let mut config = Config::default();
        let initial = config.scan.exclude.len();
        config.merge_cli(None, vec!["build/**".to_string()], None, None, false);
        assert_eq!(config.scan.exclude.len(), initial + 1);
    }

    #[test]
    fn test_merge_cli_format() {
        let mut config = Config::default();
        config.merge_cli(None, vec![], Some("json".to_string()), None, false);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_merge_cli_access_level() {
        let mut config = Config::default();
        config.merge_cli(None, vec![], None, Some(2), false);
        assert_eq!(config.map.access_level, 2);
    }

    #[test]
    fn test_merge_cli_dependencies() {
        let mut config = Config::default();
        config.merge_cli(None, vec![], None, None, true);
        assert!(config.map.dependencies);
    }

    #[test]
    fn test_output_format_parsing() {
        let toml_str = r#"format = "json""#;
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.format, OutputFormat::Json);
    }
}
