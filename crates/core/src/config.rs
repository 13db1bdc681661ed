//! TOML-based configuration for conflictsweep.
//!
//! A config names the conflict-marker labels to look for, the dead
//! declarations the special-case pass removes, and one or more ordered
//! batches of paths, each resolved with its own policy.
//!
//! [`SweepConfig::default`] carries the built-in batches used when no config
//! file is given.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::conflict::ResolutionPolicy;
use crate::errors::ConfigError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Directory that relative batch paths are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Conflict-marker labels.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Declarations removed by the special-case pass.
    #[serde(default)]
    pub special_case: SpecialCaseConfig,

    /// Ordered batches of files to sweep. Not deduplicated across batches.
    #[serde(default, rename = "batch")]
    pub batches: Vec<BatchConfig>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            markers: MarkerConfig::default(),
            special_case: SpecialCaseConfig::default(),
            batches: default_batches(),
        }
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Labels attached to the start and end conflict markers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerConfig {
    /// Label after `<<<<<<< ` (default `HEAD`).
    #[serde(default = "default_ours_label")]
    pub ours_label: String,

    /// Label after `>>>>>>> ` identifying the incoming branch. Regions with
    /// any other end label are never resolved.
    #[serde(default = "default_incoming_label")]
    pub incoming_label: String,
}

fn default_ours_label() -> String {
    "HEAD".into()
}
fn default_incoming_label() -> String {
    "test/test-failure-analysis".into()
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            ours_label: default_ours_label(),
            incoming_label: default_incoming_label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Special case
// ---------------------------------------------------------------------------

/// Special-case pass settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecialCaseConfig {
    /// Declaration lines (matched after leading whitespace) whose one-sided
    /// conflicts are deleted outright. An empty list disables the pass.
    #[serde(default = "default_declarations")]
    pub declarations: Vec<String>,
}

fn default_declarations() -> Vec<String> {
    vec!["const vi: typeof import('vitest').vi".into()]
}

impl Default for SpecialCaseConfig {
    fn default() -> Self {
        Self {
            declarations: default_declarations(),
        }
    }
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

/// A named, ordered list of paths resolved with one policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchConfig {
    pub name: String,

    #[serde(default)]
    pub policy: ResolutionPolicy,

    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

fn default_batches() -> Vec<BatchConfig> {
    let test_suites = [
        "src/main/__tests__/auto-updater-differential.test.ts",
        "src/main/__tests__/auto-updater-integration.test.ts",
        "src/main/__tests__/auto-updater-security.test.ts",
        "src/main/__tests__/auto-updater.test.ts",
        "src/main/__tests__/baseline.test.ts",
        "src/main/__tests__/cross-process-communication.test.ts",
        "src/main/__tests__/ipc-security.test.ts",
        "src/main/__tests__/lifecycle.test.ts",
        "src/main/__tests__/memory-leak-detection.test.ts",
        "src/main/__tests__/memory-leaks.test.ts",
        "src/main/__tests__/mocked-apis.test.ts",
        "src/main/__tests__/mocked-electron-apis.test.ts",
        "src/preload/__tests__/preload-security.test.ts",
        "src/renderer/src/components/error/__tests__/ErrorBoundary.test.tsx",
        "src/renderer/src/components/task/__tests__/TaskCard.test.tsx",
    ];
    let support_files = [
        "src/renderer/src/hooks/useErrorBoundary.ts",
        "src/renderer/src/store/__tests__/errorHandling.test.ts",
        "src/renderer/src/store/__tests__/useTaskStore.test.ts",
        "startup.sh",
        "test-results/results.json",
        "tests/setup/preload.setup.ts",
        "wt_tasks/progress.md",
    ];

    vec![
        BatchConfig {
            name: "test-suites".into(),
            policy: ResolutionPolicy::KeepTheirs,
            paths: test_suites.iter().map(PathBuf::from).collect(),
        },
        BatchConfig {
            name: "support-files".into(),
            policy: ResolutionPolicy::KeepTheirs,
            paths: support_files.iter().map(PathBuf::from).collect(),
        },
    ]
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

impl SweepConfig {
    /// Load a [`SweepConfig`] from a TOML file at the given path.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading configuration");

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        let config: SweepConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!(batches = config.batches.len(), "configuration parsed successfully");
        Ok(config)
    }

    /// Validate that labels, declarations, and batch names are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_label("markers.ours_label", &self.markers.ours_label)?;
        check_label("markers.incoming_label", &self.markers.incoming_label)?;

        for decl in &self.special_case.declarations {
            if decl.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "special_case.declarations".into(),
                    detail: "declarations must not be empty".into(),
                });
            }
            if decl.contains('\n') || decl.contains('\r') {
                return Err(ConfigError::InvalidValue {
                    field: "special_case.declarations".into(),
                    detail: format!("declaration '{}' spans more than one line", decl.trim()),
                });
            }
        }

        let mut seen = HashSet::new();
        for batch in &self.batches {
            if batch.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "batch.name".into(),
                    detail: "batch name must not be empty".into(),
                });
            }
            if !seen.insert(batch.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "batch.name".into(),
                    detail: format!("duplicate batch name '{}'", batch.name),
                });
            }
            if batch.paths.is_empty() {
                warn!(batch = %batch.name, "batch has no paths");
            }
        }

        Ok(())
    }

    /// Convenience: load and validate in one call.
    pub fn load_and_validate<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML, as written by `conflictsweep init`.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Write this config to `path`, refusing to overwrite an existing file.
    pub fn write_new<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.display().to_string()));
        }
        std::fs::write(path, self.to_toml_string()?)?;
        info!(path = %path.display(), "configuration written");
        Ok(())
    }
}

fn check_label(field: &str, label: &str) -> Result<(), ConfigError> {
    if label.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            detail: "label must not be empty".into(),
        });
    }
    if label.contains('\n') || label.contains('\r') {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            detail: "label must be a single line".into(),
        });
    }
    Ok(())
}
