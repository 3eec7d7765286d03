//! JMH result types.
//!
//! This module models the JSON array written by JMH with `-rf json` and
//! converts each entry into the core [`BenchmarkRecord`].

use benchratio_core::BenchmarkRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a JMH JSON result file.
///
/// Only `benchmark`, `params` and `primaryMetric.score` are used downstream.
/// They are optional here so a foreign file is reported as a malformed record
/// by the core rather than as an opaque decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JmhResult {
    /// Fully qualified benchmark method.
    #[serde(default)]
    pub benchmark: Option<String>,
    /// Benchmark mode, e.g. `avgt` or `thrpt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Number of benchmark threads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    /// Number of forks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forks: Option<u32>,
    /// `@Param` values. JMH writes strings; numbers are accepted too.
    #[serde(default)]
    pub params: HashMap<String, serde_json::Value>,
    /// Primary metric.
    #[serde(default)]
    pub primary_metric: Option<PrimaryMetric>,
}

/// JMH primary metric.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryMetric {
    /// Score, in `score_unit`.
    #[serde(default)]
    pub score: Option<f64>,
    /// Half-width of the confidence interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_error: Option<f64>,
    /// Unit of the score, e.g. `ns/op`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_unit: Option<String>,
}

impl JmhResult {
    /// Create a result with one string parameter and a score.
    pub fn new(benchmark: impl Into<String>, param: &str, value: impl Into<String>, score: f64) -> Self {
        let mut params = HashMap::new();
        params.insert(param.to_string(), serde_json::Value::String(value.into()));
        Self {
            benchmark: Some(benchmark.into()),
            params,
            primary_metric: Some(PrimaryMetric {
                score: Some(score),
                ..PrimaryMetric::default()
            }),
            ..Self::default()
        }
    }

    /// Unit of the primary score, if recorded.
    pub fn score_unit(&self) -> Option<&str> {
        self.primary_metric.as_ref()?.score_unit.as_deref()
    }
}

impl From<JmhResult> for BenchmarkRecord {
    fn from(result: JmhResult) -> Self {
        let parameters = result
            .params
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Number(n) => Some((key, n.to_string())),
                serde_json::Value::Bool(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect();

        BenchmarkRecord {
            identifier: result.benchmark,
            parameters,
            score: result.primary_metric.and_then(|m| m.score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchratio_core::ARRAY_LENGTH;

    #[test]
    fn test_decode_jmh_entry() {
        let json = r#"{
            "jmhVersion": "1.35",
            "benchmark": "fr.centralesupelec.simd.VectorProfiling.mulSIMD",
            "mode": "avgt",
            "threads": 1,
            "forks": 1,
            "params": { "ARRAY_LENGTH": "512" },
            "primaryMetric": {
                "score": 97.25,
                "scoreError": 1.5,
                "scoreConfidence": [95.75, 98.75],
                "scoreUnit": "ns/op",
                "rawData": [[97.0, 97.5]]
            },
            "secondaryMetrics": {}
        }"#;

        let result: JmhResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.mode.as_deref(), Some("avgt"));
        assert_eq!(result.score_unit(), Some("ns/op"));

        let record = BenchmarkRecord::from(result);
        assert_eq!(
            record.identifier.as_deref(),
            Some("fr.centralesupelec.simd.VectorProfiling.mulSIMD")
        );
        assert_eq!(record.parameters[ARRAY_LENGTH], "512");
        assert_eq!(record.score, Some(97.25));
    }

    #[test]
    fn test_numeric_params_are_stringified() {
        let json = r#"{"benchmark": "a.sum", "params": {"array_size": 1024}, "primaryMetric": {"score": 1.0}}"#;
        let record = BenchmarkRecord::from(serde_json::from_str::<JmhResult>(json).unwrap());
        assert_eq!(record.parameters["array_size"], "1024");
    }

    #[test]
    fn test_missing_fields_survive_decoding() {
        let record = BenchmarkRecord::from(serde_json::from_str::<JmhResult>("{}").unwrap());
        assert!(record.identifier.is_none());
        assert!(record.parameters.is_empty());
        assert!(record.score.is_none());
    }
}
