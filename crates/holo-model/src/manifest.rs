use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use holo_core::errors::ErrorInfo;
use holo_core::{FitProvenance, HoloError, Result, SchemaVersion};
use holo_ppl::Trace;
use serde::{Deserialize, Serialize};

use crate::config::ModelKind;
use crate::prior::PriorSpec;

/// Serialized record of one model evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceManifest {
    /// Provenance of the evaluation.
    pub provenance: FitProvenance,
    /// Model that produced the trace.
    pub model_kind: ModelKind,
    /// Declared parameter names, in order.
    pub param_names: Vec<String>,
    /// Visited sample sites.
    pub trace: Trace,
    /// Sum of the site log densities.
    pub log_joint: f64,
}

impl TraceManifest {
    /// Builds a manifest for `trace`, stamped with the current time.
    pub fn new(model_kind: ModelKind, priors: &PriorSpec, seed: u64, trace: Trace) -> Self {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let provenance = FitProvenance {
            schema_version: SchemaVersion::new(1, 0, 0),
            prior_hash: priors.canonical_hash(),
            seed,
            created_at: chrono::Utc::now().to_rfc3339(),
            tool_versions,
        };
        Self {
            provenance,
            model_kind,
            param_names: priors.names().map(str::to_string).collect(),
            log_joint: trace.log_joint(),
            trace,
        }
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_failure("manifest-mkdir", parent))?;
        }
        let json =
            serde_json::to_string_pretty(self).map_err(io_failure("manifest-serialize", path))?;
        fs::write(path, json).map_err(io_failure("manifest-write", path))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(io_failure("manifest-read", path))?;
        serde_json::from_str(&contents).map_err(io_failure("manifest-parse", path))
    }
}

/// Maps an IO or JSON failure on `path` to a `HoloError::Serde` with code `code`.
fn io_failure<'a, E: std::fmt::Display>(
    code: &'static str,
    path: &'a Path,
) -> impl FnOnce(E) -> HoloError + 'a {
    move |err| {
        HoloError::Serde(
            ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
        )
    }
}
