use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// All triage system parameters. Loaded from environment variables at
/// startup; unset or unparsable values fall back to defaults.
///
/// The scoring constants default to the values the knowledge catalog was
/// calibrated against — change them and the ranked output changes too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageCfg {
    // matcher
    pub boost_threshold: f32,
    pub boost_factor: f32,
    pub confidence_cap: f32,

    // façade
    pub max_conditions: usize,

    // traversal
    pub default_depth: usize,

    // runtime
    pub input_buffer: usize,
    pub output_buffer: usize,
    pub shutdown_timeout_secs: u64,
}

impl Default for TriageCfg {
    fn default() -> Self {
        Self {
            boost_threshold: 0.6,
            boost_factor: 1.2,
            confidence_cap: 0.95,
            max_conditions: 5,
            default_depth: 2,
            input_buffer: 16,
            output_buffer: 16,
            shutdown_timeout_secs: 5,
        }
    }
}

impl TriageCfg {
    /// Load config from `TRIAGE_*` environment variables.
    pub fn from_env() -> Self {
        let map: HashMap<String, String> = std::env::vars().collect();
        Self::from_map(&map)
    }

    fn from_map(m: &HashMap<String, String>) -> Self {
        let d = Self::default();
        Self {
            boost_threshold: get_or(m, "TRIAGE_BOOST_THRESHOLD", d.boost_threshold),
            boost_factor: get_or(m, "TRIAGE_BOOST_FACTOR", d.boost_factor),
            confidence_cap: get_or(m, "TRIAGE_CONFIDENCE_CAP", d.confidence_cap),
            max_conditions: get_or(m, "TRIAGE_MAX_CONDITIONS", d.max_conditions),
            default_depth: get_or(m, "TRIAGE_DEFAULT_DEPTH", d.default_depth),
            input_buffer: get_or(m, "TRIAGE_INPUT_BUFFER", d.input_buffer),
            output_buffer: get_or(m, "TRIAGE_OUTPUT_BUFFER", d.output_buffer),
            shutdown_timeout_secs: get_or(m, "TRIAGE_SHUTDOWN_TIMEOUT_SECS", d.shutdown_timeout_secs),
        }
    }
}

fn get_or<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str, default: T) -> T {
    map.get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
