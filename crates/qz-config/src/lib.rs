//! qz-config
//!
//! Layered YAML configuration for the quiz editor.
//!
//! # Invariants
//!
//! - Layers merge left to right: later layers override earlier ones key by
//!   key; non-object values replace wholesale.
//! - The canonical JSON has object keys sorted at every depth, so the hash
//!   depends only on content, never on key order in the source files.
//! - `config_hash` is the lowercase hex SHA-256 of the canonical JSON.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::path::Path;

mod consumption;

pub use consumption::{consumed_pointers, report_unused_keys, UnusedKeyPolicy, UnusedKeyReport};

/// Default log filter when neither `RUST_LOG` nor `/log/filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
    /// Number of layers merged.
    pub layers: usize,
}

impl LoadedConfig {
    /// No layers at all. Every consumer falls back to its defaults.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }

    /// `/log/filter`, if configured.
    pub fn log_filter(&self) -> Option<&str> {
        self.config_json.pointer("/log/filter").and_then(Value::as_str)
    }
}

pub fn load_layered_yaml<P: AsRef<Path>>(paths: &[P]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read yaml path: {}", p.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        let layer = serde_json::to_value(layer)
            .with_context(|| format!("layer {i}: yaml->json conversion failed"))?;
        // An empty YAML file parses as null; treat it as an empty layer.
        if !layer.is_null() {
            merged = deep_merge(merged, layer);
        }
    }

    let canonical_json = canonical_json(&merged)?;
    Ok(LoadedConfig {
        config_hash: sha256_hex(canonical_json.as_bytes()),
        canonical_json,
        config_json: merged,
        layers: yaml_docs.len(),
    })
}

pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (k, v) in overlay {
                let merged = match base.remove(&k) {
                    Some(prev) => deep_merge(prev, v),
                    None => v,
                };
                base.insert(k, merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

/// Compact JSON with object keys sorted at every depth.
pub fn canonical_json(v: &Value) -> Result<String> {
    serde_json::to_string(&sorted(v)).context("canonical json serialize failed")
}

fn sorted(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for k in keys {
                if let Some(child) = map.get(k) {
                    out.insert(k.clone(), sorted(child));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
