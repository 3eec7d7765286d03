//! Layered configuration for the CLI.
//!
//! Values are resolved in increasing order of precedence:
//!
//! 1. built-in defaults (the `VectorProfiling` naming conventions)
//! 2. `benchratio.toml` in the working directory, or the file given with `--config`
//! 3. `BENCHRATIO_*` environment variables (a `.env` file is loaded first)
//! 4. command-line flags, applied by the caller

use benchratio_core::{AlignSpec, Direction, IndexOptions, ARRAY_LENGTH};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BENCHRATIO";

/// Default configuration file name, without extension.
pub const DEFAULT_CONFIG_NAME: &str = "benchratio";

/// Effective settings for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Parameter carrying the input size.
    pub size_key: String,
    /// Identifier prefix of baseline benchmarks.
    pub prefix: String,
    /// Identifier prefix of comparison benchmarks, when different.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_prefix: Option<String>,
    /// Variant suffix of baseline benchmarks.
    pub baseline_suffix: String,
    /// Variant suffix of comparison benchmarks.
    pub comparison_suffix: String,
    /// Ratio direction.
    pub direction: Direction,
    /// Operations to align.
    pub operations: Vec<String>,
    /// Width in bytes of one array element.
    pub element_bytes: u64,
    /// Reject repeated sizes for the same benchmark.
    pub strict: bool,
}

impl Settings {
    /// Load settings from the default file location and the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings with an explicit environment source.
    pub fn load_from(config_file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("size_key", ARRAY_LENGTH)?
            .set_default("prefix", "fr.centralesupelec.simd.VectorProfiling.")?
            .set_default("baseline_suffix", "RegularNoSuperWord")?
            .set_default("comparison_suffix", "SIMD")?
            .set_default("direction", Direction::BaselineOverComparison.as_str())?
            .set_default("operations", vec!["mul", "sum", "add"])?
            .set_default("element_bytes", 4_i64)?
            .set_default("strict", false)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder
            .add_source(
                env.try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("operations"),
            )
            .build()?
            .try_deserialize()
    }

    /// Naming convention and direction for the aligner.
    pub fn align_spec(&self) -> AlignSpec {
        let spec = AlignSpec::new(&self.baseline_suffix, &self.comparison_suffix)
            .with_prefix(&self.prefix)
            .with_direction(self.direction);
        match &self.comparison_prefix {
            Some(prefix) => spec.with_comparison_prefix(prefix),
            None => spec,
        }
    }

    /// Ingestion options for the result index.
    pub fn index_options(&self) -> IndexOptions {
        let options = IndexOptions::new(&self.size_key);
        if self.strict {
            options.strict()
        } else {
            options
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchratio_core::DuplicatePolicy;
    use std::fs;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let settings = Settings::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(settings.size_key, "ARRAY_LENGTH");
        assert_eq!(settings.operations, vec!["mul", "sum", "add"]);
        assert_eq!(settings.direction, Direction::BaselineOverComparison);
        assert_eq!(settings.element_bytes, 4);
        assert!(settings.comparison_prefix.is_none());

        let spec = settings.align_spec();
        assert_eq!(
            spec.baseline_id("mul"),
            "fr.centralesupelec.simd.VectorProfiling.mulRegularNoSuperWord"
        );
        assert_eq!(spec.comparison_id("mul"), "fr.centralesupelec.simd.VectorProfiling.mulSIMD");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchratio.toml");
        fs::write(
            &path,
            r#"
size_key = "array_size"
comparison_prefix = "fr.centralesupelec.simd.VectorOffHeapProfiling."
direction = "comparison-over-baseline"
operations = ["mul", "filter"]
strict = true
"#,
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(settings.size_key, "array_size");
        assert_eq!(settings.direction, Direction::ComparisonOverBaseline);
        assert_eq!(settings.operations, vec!["mul", "filter"]);
        assert_eq!(settings.index_options().duplicates, DuplicatePolicy::Reject);
        assert_eq!(
            settings.align_spec().comparison_id("mul"),
            "fr.centralesupelec.simd.VectorOffHeapProfiling.mulSIMD"
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchratio.toml");
        fs::write(&path, "size_key = \"array_size\"\n").unwrap();

        let settings = Settings::load_from(
            Some(&path),
            env(&[
                ("BENCHRATIO_SIZE_KEY", "LEN"),
                ("BENCHRATIO_OPERATIONS", "sum,add"),
                ("BENCHRATIO_ELEMENT_BYTES", "8"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.size_key, "LEN");
        assert_eq!(settings.operations, vec!["sum", "add"]);
        assert_eq!(settings.element_bytes, 8);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load_from(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_settings_serialize_to_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let settings = Settings::load_from(Some(&path), env(&[])).unwrap();
        let rendered = toml::to_string_pretty(&settings).unwrap();
        assert!(rendered.contains("direction = \"baseline-over-comparison\""));
        assert!(!rendered.contains("comparison_prefix"));
    }
}
