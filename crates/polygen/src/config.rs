//! Configuration for polygen.
//!
//! Loads config from:
//! 1. Global: ~/.config/polygen/config.toml
//! 2. Per-project: .polygen/config.toml (overrides global)
//!
//! Every key is optional; a project file only overrides what it sets.
//!
//! Example config.toml:
//! ```toml
//! [generate]
//! targets = ["go", "python"]
//! parallel = false
//!
//! [go]
//! sdk_import = "github.com/pulumi/pulumi/sdk/v3/go/pulumi"
//! provider_prefix = "github.com/pulumi/pulumi-"
//! ```

use polygen_emit::{GoOptions, Target};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `[generate]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Targets used when none are given on the command line.
    pub targets: Option<Vec<Target>>,
    /// Emit targets concurrently.
    pub parallel: Option<bool>,
}

/// `[go]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GoConfig {
    pub sdk_import: Option<String>,
    pub provider_prefix: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolygenConfig {
    pub generate: GenerateConfig,
    pub go: GoConfig,
}

impl PolygenConfig {
    /// Load the global config, then the project config under `root`.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();
        if let Some(global) = Self::global_config_path().and_then(|p| Self::load_file(&p)) {
            config = config.merge(global);
        }
        if let Some(project) = Self::load_file(&root.join(".polygen").join("config.toml")) {
            config = config.merge(project);
        }
        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("polygen").join("config.toml"))
    }

    /// A missing file is silently skipped; a malformed one is skipped with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed config");
                None
            }
        }
    }

    /// Keys set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            generate: GenerateConfig {
                targets: other.generate.targets.or(self.generate.targets),
                parallel: other.generate.parallel.or(self.generate.parallel),
            },
            go: GoConfig {
                sdk_import: other.go.sdk_import.or(self.go.sdk_import),
                provider_prefix: other.go.provider_prefix.or(self.go.provider_prefix),
            },
        }
    }

    /// Configured targets, or every target.
    pub fn targets(&self) -> Vec<Target> {
        self.generate
            .targets
            .clone()
            .unwrap_or_else(|| Target::ALL.to_vec())
    }

    pub fn parallel(&self) -> bool {
        self.generate.parallel.unwrap_or(true)
    }

    pub fn go_options(&self) -> GoOptions {
        let defaults = GoOptions::default();
        GoOptions {
            sdk_import: self.go.sdk_import.clone().unwrap_or(defaults.sdk_import),
            provider_prefix: self
                .go
                .provider_prefix
                .clone()
                .unwrap_or(defaults.provider_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_project_config(dir: &TempDir, content: &str) {
        let config_dir = dir.path().join(".polygen");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), content).unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = PolygenConfig::default();
        assert_eq!(config.targets(), Target::ALL.to_vec());
        assert!(config.parallel());
        assert_eq!(config.go_options(), GoOptions::default());
    }

    #[test]
    fn test_load_project_file() {
        let dir = TempDir::new().unwrap();
        write_project_config(
            &dir,
            r#"
[generate]
targets = ["python", "dotnet"]
parallel = false

[go]
provider_prefix = "example.com/sdks/"
"#,
        );
        let config = PolygenConfig::load_file(&dir.path().join(".polygen/config.toml")).unwrap();
        assert_eq!(config.targets(), vec![Target::Python, Target::CSharp]);
        assert!(!config.parallel());
        let go = config.go_options();
        assert_eq!(go.provider_prefix, "example.com/sdks/");
        assert_eq!(go.sdk_import, GoOptions::default().sdk_import);
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let global = PolygenConfig {
            generate: GenerateConfig {
                targets: Some(vec![Target::Go]),
                parallel: Some(false),
            },
            go: GoConfig::default(),
        };
        let project = PolygenConfig {
            generate: GenerateConfig {
                targets: None,
                parallel: Some(true),
            },
            go: GoConfig {
                sdk_import: Some("example.com/pulumi".into()),
                provider_prefix: None,
            },
        };
        let merged = PolygenConfig::default().merge(global).merge(project);
        assert_eq!(merged.targets(), vec![Target::Go]);
        assert!(merged.parallel());
        assert_eq!(merged.go_options().sdk_import, "example.com/pulumi");
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_project_config(&dir, "[generate]\ntargets = [\"cobol\"]\n");
        assert!(PolygenConfig::load_file(&dir.path().join(".polygen/config.toml")).is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(PolygenConfig::load_file(&dir.path().join("nope.toml")).is_none());
    }
}
