//! # Schema Registry
//!
//! Loads named structural schemas from a directory and holds them, compiled,
//! for the lifetime of a batch run.
//!
//! ## Naming
//!
//! Each `*.json`, `*.yaml` or `*.yml` file directly inside the directory is
//! one schema, named by its file stem with any trailing `.schema` removed:
//! `image-analysis.json` and `image-analysis.schema.json` both register as
//! `image-analysis`. Subdirectories are not scanned.
//!
//! ## Failure policy
//!
//! Loading never fails as a whole. A file that cannot be read, parsed, or
//! compiled is logged, recorded in [`SchemaRegistry::skipped`], and left out;
//! documents bound to other schemas still validate. A missing directory
//! yields an empty registry with a warning.
//!
//! ## `$ref` resolution
//!
//! Cross-schema references resolve against the loaded schemas only, by
//! `$id`, file name, or schema name. Nothing is fetched over the network.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;

use qgate_core::{QgateError, Telemetry};

/// Resolves `$ref` URIs against schemas already in memory.
struct LocalSchemaRetriever {
    /// Map from URI, file name, or schema name to schema document.
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();

        if let Some(value) = self.schemas_by_uri.get(uri_str) {
            return Ok(value.clone());
        }

        // Fall back to the last path segment, then to its stem.
        let filename = uri_str.rsplit('/').next().unwrap_or(uri_str);
        if let Some(value) = self.schemas_by_uri.get(filename) {
            return Ok(value.clone());
        }
        if let Some(value) = self.schemas_by_uri.get(schema_name_for(filename)) {
            return Ok(value.clone());
        }

        Err(format!("schema not found for URI: {uri_str}").into())
    }
}

/// A loaded, compiled schema.
pub struct Schema {
    name: String,
    path: PathBuf,
    document: Value,
    validator: Validator,
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Schema {
    /// Registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The schema document as written.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The schema's `$id`, if it declares one.
    pub fn version(&self) -> Option<&str> {
        self.document.get("$id").and_then(Value::as_str)
    }

    pub(crate) fn validator(&self) -> &Validator {
        &self.validator
    }
}

/// Immutable mapping from schema name to compiled [`Schema`].
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    schemas: BTreeMap<String, Schema>,
    skipped: Vec<QgateError>,
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("schema_dir", &self.schema_dir)
            .field("schema_count", &self.schemas.len())
            .field("skipped", &self.skipped.len())
            .finish()
    }
}

impl SchemaRegistry {
    /// Load every schema file in `schema_dir`.
    pub fn load(schema_dir: impl Into<PathBuf>, telemetry: &Telemetry) -> Self {
        let schema_dir = schema_dir.into();
        telemetry.in_scope(|| Self::load_inner(schema_dir))
    }

    /// Build a registry from schema documents already in memory.
    ///
    /// Documents that do not compile are skipped exactly as on disk.
    pub fn from_documents<I, S>(documents: I, telemetry: &Telemetry) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        telemetry.in_scope(|| {
            let parsed = documents
                .into_iter()
                .map(|(name, doc)| {
                    let name = name.into();
                    let path = PathBuf::from(format!("{name}.json"));
                    (name, path, doc)
                })
                .collect();
            Self::compile_all(PathBuf::new(), parsed, Vec::new())
        })
    }

    fn load_inner(schema_dir: PathBuf) -> Self {
        if !schema_dir.is_dir() {
            tracing::warn!(
                dir = %schema_dir.display(),
                "schema directory does not exist; registry is empty"
            );
            return Self {
                schema_dir,
                schemas: BTreeMap::new(),
                skipped: Vec::new(),
            };
        }

        let mut skipped = Vec::new();
        let mut parsed: Vec<(String, PathBuf, Value)> = Vec::new();

        for path in schema_files(&schema_dir) {
            let Some(name) = path
                .file_name()
                .and_then(|f| f.to_str())
                .map(|f| schema_name_for(f).to_string())
            else {
                continue;
            };

            if parsed.iter().any(|(existing, _, _)| *existing == name) {
                let err = QgateError::SchemaLoad {
                    path: path.display().to_string(),
                    reason: format!("duplicate schema name '{name}'"),
                };
                tracing::error!("{err}; skipping");
                skipped.push(err);
                continue;
            }

            match read_schema_file(&path) {
                Ok(document) => parsed.push((name, path, document)),
                Err(err) => {
                    tracing::error!("{err}; skipping");
                    skipped.push(err);
                }
            }
        }

        Self::compile_all(schema_dir, parsed, skipped)
    }

    fn compile_all(
        schema_dir: PathBuf,
        parsed: Vec<(String, PathBuf, Value)>,
        mut skipped: Vec<QgateError>,
    ) -> Self {
        let mut schemas_by_uri: HashMap<String, Value> = HashMap::new();
        for (name, path, document) in &parsed {
            if let Some(id) = document.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), document.clone());
            }
            if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
                schemas_by_uri.insert(filename.to_string(), document.clone());
            }
            schemas_by_uri.insert(name.clone(), document.clone());
        }

        let mut schemas = BTreeMap::new();
        for (name, path, document) in parsed {
            let retriever = LocalSchemaRetriever {
                schemas_by_uri: schemas_by_uri.clone(),
            };
            match jsonschema::options().with_retriever(retriever).build(&document) {
                Ok(validator) => {
                    tracing::info!(schema = %name, "loaded schema");
                    schemas.insert(
                        name.clone(),
                        Schema {
                            name,
                            path,
                            document,
                            validator,
                        },
                    );
                }
                Err(e) => {
                    let err = QgateError::SchemaLoad {
                        path: path.display().to_string(),
                        reason: format!("schema does not compile: {e}"),
                    };
                    tracing::error!("{err}; skipping");
                    skipped.push(err);
                }
            }
        }

        Self {
            schema_dir,
            schemas,
            skipped,
        }
    }

    /// Look up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True if no schema loaded.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema files that were left out, with the reason for each.
    pub fn skipped(&self) -> &[QgateError] {
        &self.skipped
    }

    /// Directory the registry was loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }
}

/// Registry name for a schema file name: the stem, minus a trailing `.schema`.
fn schema_name_for(filename: &str) -> &str {
    let stem = filename
        .strip_suffix(".json")
        .or_else(|| filename.strip_suffix(".yaml"))
        .or_else(|| filename.strip_suffix(".yml"))
        .unwrap_or(filename);
    stem.strip_suffix(".schema").unwrap_or(stem)
}

/// Schema candidates directly under `dir`, sorted for stable load order.
fn schema_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(dir = %dir.display(), error = %e, "cannot read schema directory");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                None
            }
        })
        .filter(|p| p.is_file())
        .filter(|p| {
            matches!(
                p.extension().and_then(|e| e.to_str()),
                Some("json" | "yaml" | "yml")
            )
        })
        .collect();
    files.sort();
    files
}

fn read_schema_file(path: &Path) -> Result<Value, QgateError> {
    let content = std::fs::read_to_string(path).map_err(|e| QgateError::SchemaLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let document: Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| QgateError::SchemaLoad {
            path: path.display().to_string(),
            reason: format!("invalid YAML: {e}"),
        })?,
        _ => serde_json::from_str(&content).map_err(|e| QgateError::SchemaLoad {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        })?,
    };

    if !(document.is_object() || document.is_boolean()) {
        return Err(QgateError::SchemaLoad {
            path: path.display().to_string(),
            reason: "schema must be a JSON object or boolean".to_string(),
        });
    }
    Ok(document)
}
