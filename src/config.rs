use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SbkError};

/// Top-level configuration for the knowledge engine.
///
/// Every heuristic threshold the engine uses lives here as a named value so
/// behavior is reproducible and tests can pin exact boundaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub insights: InsightConfig,
}

impl Config {
    /// Load configuration, merging an optional TOML file over defaults.
    ///
    /// Resolution order: `--config` path if given, else the `SBK_CONFIG`
    /// environment variable, else defaults. A missing explicit file is an
    /// error; a missing env-var file is not.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = explicit_path {
            let patch = Self::load_patch(path)?
                .ok_or_else(|| SbkError::MissingConfig(format!("{}", path.display())))?;
            config.merge_patch(patch);
        } else if let Some(path) = std::env::var("SBK_CONFIG").ok().map(PathBuf::from) {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SbkError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SbkError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.graph {
            self.graph.merge(patch);
        }
        if let Some(patch) = patch.insights {
            self.insights.merge(patch);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.default_limit == 0 {
            return Err(SbkError::Config(
                "search.default_limit must be greater than 0".to_string(),
            ));
        }
        if self.insights.rising_ratio <= 0.0 || self.insights.falling_ratio <= 0.0 {
            return Err(SbkError::Config(
                "insights ratio thresholds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Search engine tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result count when the caller does not pass an explicit limit.
    #[serde(default)]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 50 }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
    }
}

/// Relationship graph tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Minimum shared-tag count for an edge to exist. The default keeps
    /// every pair with at least one shared tag; raise to 2 for the stricter
    /// graphs some deployments prefer.
    #[serde(default)]
    pub min_shared_tags: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self { min_shared_tags: 1 }
    }
}

impl GraphConfig {
    fn merge(&mut self, patch: GraphPatch) {
        if let Some(value) = patch.min_shared_tags {
            self.min_shared_tags = value;
        }
    }
}

/// Thresholds for heuristic insight generation.
///
/// These are deliberately explicit configuration, not constants: the
/// insight policy is a heuristic and tests pin exact boundary behavior
/// through these values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// A category fires RISING_CATEGORY when its count in the most recent
    /// third of the observed year range is at least this multiple of its
    /// count in the earliest third.
    #[serde(default)]
    pub rising_ratio: f64,
    /// Mirror of `rising_ratio` for FALLING_CATEGORY.
    #[serde(default)]
    pub falling_ratio: f64,
    /// A tag must appear in at least this many publications before it
    /// participates in SPARSE_COMBINATION detection.
    #[serde(default)]
    pub min_tag_frequency: usize,
    /// SPARSE_COMBINATION fires for frequent tag pairs whose co-occurrence
    /// weight in the graph is strictly below this value.
    #[serde(default)]
    pub sparse_max_weight: usize,
    /// Number of TOP_TERM insights to emit.
    #[serde(default)]
    pub top_terms: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            rising_ratio: 1.5,
            falling_ratio: 1.5,
            min_tag_frequency: 5,
            sparse_max_weight: 2,
            top_terms: 5,
        }
    }
}

impl InsightConfig {
    fn merge(&mut self, patch: InsightPatch) {
        if let Some(value) = patch.rising_ratio {
            self.rising_ratio = value;
        }
        if let Some(value) = patch.falling_ratio {
            self.falling_ratio = value;
        }
        if let Some(value) = patch.min_tag_frequency {
            self.min_tag_frequency = value;
        }
        if let Some(value) = patch.sparse_max_weight {
            self.sparse_max_weight = value;
        }
        if let Some(value) = patch.top_terms {
            self.top_terms = value;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    search: Option<SearchPatch>,
    graph: Option<GraphPatch>,
    insights: Option<InsightPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    default_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct GraphPatch {
    min_shared_tags: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct InsightPatch {
    rising_ratio: Option<f64>,
    falling_ratio: Option<f64>,
    min_tag_frequency: Option<usize>,
    sparse_max_weight: Option<usize>,
    top_terms: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 50);
    }

    #[test]
    fn graph_config_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.min_shared_tags, 1);
    }

    #[test]
    fn insight_config_defaults() {
        let config = InsightConfig::default();
        assert!((config.rising_ratio - 1.5).abs() < f64::EPSILON);
        assert!((config.falling_ratio - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.min_tag_frequency, 5);
        assert_eq!(config.sparse_max_weight, 2);
        assert_eq!(config.top_terms, 5);
    }

    #[test]
    fn insight_config_serialization() {
        let config = InsightConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"min_tag_frequency\":5"));
    }

    #[test]
    fn load_merges_patch_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[insights]\nrising_ratio = 2.0\n\n[graph]\nmin_shared_tags = 2"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!((config.insights.rising_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.graph.min_shared_tags, 2);
        // Untouched sections keep defaults.
        assert_eq!(config.search.default_limit, 50);
        assert!((config.insights.falling_ratio - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_explicit_path_is_error() {
        let err = Config::load(Some(Path::new("/nonexistent/sbk.toml"))).unwrap_err();
        assert!(matches!(err, SbkError::MissingConfig(_)));
    }

    #[test]
    fn load_rejects_zero_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[search]\ndefault_limit = 0").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SbkError::Config(_)));
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [ valid toml").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, SbkError::Config(_)));
    }
}
