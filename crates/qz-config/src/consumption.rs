//! Consumed-key registry and unused-key report.
//!
//! A consumed pointer is a JSON-pointer prefix: `/export` consumes
//! `/export/indent` but not `/exporter`. Every leaf of the effective config
//! not covered by a consumed prefix is unused.
//!
//! The registry must list only keys the code actually reads.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Observed reads:
// - qz-editor::EditorSettings::from_config_json
//     /export/file_name, /export/indent, /exam/id_prefix,
//     /notifications/{success_ms,import_error_ms,file_error_ms}
// - qz-cli tracing init
//     /log/filter
static CONSUMED: &[&str] = &[
    "/exam/id_prefix",
    "/export/file_name",
    "/export/indent",
    "/log/filter",
    "/notifications/file_error_ms",
    "/notifications/import_error_ms",
    "/notifications/success_ms",
];

pub fn consumed_pointers() -> &'static [&'static str] {
    CONSUMED
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub consumed_prefixes: Vec<String>,
    /// Sorted, unique.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// With `Fail`, unused keys are an error; with `Warn` the report is always
/// returned.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut consumed_prefixes: Vec<String> = CONSUMED.iter().map(|p| normalize(p)).collect();
    consumed_prefixes.sort();
    consumed_prefixes.dedup();

    let mut leaves = Vec::new();
    walk_leaves(config_json, String::new(), &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|p| covers(p, leaf)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let preview: Vec<&String> = report.unused_leaf_pointers.iter().take(12).collect();
        bail!(
            "CONFIG_UNUSED_KEYS: {} unused config leaf key(s). \
            Remove them or register the reader. First few: {:?}",
            report.unused_leaf_pointers.len(),
            preview
        );
    }
    Ok(report)
}

fn normalize(p: &str) -> String {
    let trimmed = p.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn covers(prefix: &str, leaf: &str) -> bool {
    prefix == "/"
        || leaf
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn walk_leaves(v: &Value, at: String, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, child) in map {
                let token = k.replace('~', "~0").replace('/', "~1");
                walk_leaves(child, format!("{at}/{token}"), out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (i, child) in items.iter().enumerate() {
                walk_leaves(child, format!("{at}/{i}"), out);
            }
        }
        // Scalars and empty containers are leaves. The empty root is no leaf.
        _ if at.is_empty() && v.as_object().is_some_and(|m| m.is_empty()) => {}
        _ => out.push(if at.is_empty() { "/".to_string() } else { at }),
    }
}
