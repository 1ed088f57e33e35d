//! CSV export of grid rows.
//!
//! Every field is wrapped in double quotes and only embedded quotes are
//! escaped (doubled); commas and newlines inside a field are left alone.
//! Each line, header included, ends with `\n`.
//!
//! ```
//! use serde_json::json;
//! use sirona_console::data::csv::{to_csv, FieldOverrides};
//! use sirona_console::data::grid::ColumnDef;
//!
//! let columns = [ColumnDef::new("name").display("Counter")];
//! let rows = [json!({"name": "a,b"})];
//! assert_eq!(to_csv(&columns, &rows, &FieldOverrides::new()), "\"Counter\"\n\"a,b\"\n");
//! ```

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::data::grid::ColumnDef;

type Override = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Per-field replacements for the generic stringify rule.
///
/// An override receives the whole row, so it can combine several fields,
/// and returns the value to stringify in place of the field's own.
#[derive(Default)]
pub struct FieldOverrides {
    overrides: HashMap<String, Override>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        field: impl Into<String>,
        f: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.overrides.insert(field.into(), Box::new(f));
        self
    }

    fn get(&self, field: &str) -> Option<&Override> {
        self.overrides.get(field)
    }
}

impl fmt::Debug for FieldOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.overrides.keys().collect();
        fields.sort();
        f.debug_struct("FieldOverrides").field("fields", &fields).finish()
    }
}

/// Generic field rule, before quoting.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.replace('"', "\"\""),
        other => other.to_string().replace('"', "\"\""),
    }
}

// Integral floats print without a fractional part, like the grid shows them.
fn format_number(n: &serde_json::Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            return format!("{}", f);
        }
    }
    n.to_string()
}

fn push_line(out: &mut String, fields: impl Iterator<Item = String>) {
    for field in fields {
        out.push('"');
        out.push_str(&field);
        out.push_str("\",");
    }
    if out.ends_with(',') {
        out.pop();
    }
    out.push('\n');
}

/// Render `rows` (JSON objects) under `columns`.
pub fn to_csv(columns: &[ColumnDef], rows: &[Value], overrides: &FieldOverrides) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        columns.iter().map(|c| c.header().replace('"', "\"\"")),
    );

    for row in rows {
        push_line(
            &mut out,
            columns.iter().map(|column| match overrides.get(&column.field) {
                Some(f) => stringify(&f(row)),
                None => stringify(row.get(&column.field).unwrap_or(&Value::Null)),
            }),
        );
    }
    out
}

/// Fingerprint of the identities of a rendered row set.
pub fn fingerprint<I, K>(identities: I) -> u64
where
    I: IntoIterator<Item = K>,
    K: Hash,
{
    let mut hasher = DefaultHasher::new();
    let mut count = 0usize;
    for id in identities {
        id.hash(&mut hasher);
        count += 1;
    }
    count.hash(&mut hasher);
    hasher.finish()
}

/// Holds the export filename and the last generated document.
///
/// The document is regenerated only when the fingerprint of the row set
/// changes.
#[derive(Debug)]
pub struct CsvExporter {
    filename: String,
    export_dir: PathBuf,
    cached: Option<(u64, String)>,
    generated: usize,
}

impl CsvExporter {
    pub fn new(export_dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            export_dir: export_dir.into(),
            cached: None,
            generated: 0,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Where [`CsvExporter::write`] puts the document.
    pub fn path(&self) -> PathBuf {
        self.export_dir.join(&self.filename)
    }

    /// How many times the document has been rebuilt.
    pub fn generation_count(&self) -> usize {
        self.generated
    }

    /// The document for a row set identified by `fingerprint`.
    pub fn document(&mut self, fingerprint: u64, render: impl FnOnce() -> String) -> &str {
        let stale = !matches!(&self.cached, Some((fp, _)) if *fp == fingerprint);
        if stale {
            self.cached = Some((fingerprint, render()));
            self.generated += 1;
        }
        match &self.cached {
            Some((_, doc)) => doc,
            None => "",
        }
    }

    /// Write the current document to disk, regenerating it if needed.
    pub fn write(&mut self, fingerprint: u64, render: impl FnOnce() -> String) -> Result<PathBuf> {
        let path = self.path();
        let document = self.document(fingerprint, render).to_string();
        write_file(&path, &document)?;
        tracing::info!(path = %path.display(), bytes = document.len(), "exported CSV");
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn name_column() -> Vec<ColumnDef> {
        vec![ColumnDef::new("name").display("Counter")]
    }

    #[test]
    fn test_commas_are_not_escaped() {
        let csv = to_csv(&name_column(), &[json!({"name": "a,b"})], &FieldOverrides::new());
        assert_eq!(csv, "\"Counter\"\n\"a,b\"\n");
    }

    #[test]
    fn test_null_and_boolean() {
        let columns = vec![ColumnDef::new("a"), ColumnDef::new("b"), ColumnDef::new("c")];
        let rows = [json!({"a": null, "b": true, "c": false})];
        let csv = to_csv(&columns, &rows, &FieldOverrides::new());
        assert_eq!(csv, "\"a\",\"b\",\"c\"\n\"\",\"TRUE\",\"FALSE\"\n");
    }

    #[test]
    fn test_missing_field_is_empty() {
        let csv = to_csv(&name_column(), &[json!({})], &FieldOverrides::new());
        assert_eq!(csv, "\"Counter\"\n\"\"\n");
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = to_csv(
            &name_column(),
            &[json!({"name": "say \"hi\""})],
            &FieldOverrides::new(),
        );
        assert_eq!(csv, "\"Counter\"\n\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_numbers_and_objects() {
        assert_eq!(stringify(&json!(12.0)), "12");
        assert_eq!(stringify(&json!(12)), "12");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!({"k": "v"})), "{\"\"k\"\":\"\"v\"\"}");
        assert_eq!(stringify(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_override() {
        let columns = vec![ColumnDef::new("roleName").display("Role")];
        let overrides = FieldOverrides::new().with("roleName", |row| {
            json!(format!("{} ({})", row["roleName"].as_str().unwrap_or(""), row["unitName"].as_str().unwrap_or("")))
        });
        let rows = [json!({"roleName": "performances", "unitName": "ns"})];
        assert_eq!(
            to_csv(&columns, &rows, &overrides),
            "\"Role\"\n\"performances (ns)\"\n"
        );
    }

    #[test]
    fn test_no_rows() {
        assert_eq!(
            to_csv(&name_column(), &[], &FieldOverrides::new()),
            "\"Counter\"\n"
        );
    }

    #[test]
    fn test_exporter_regenerates_on_change_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path(), "counters.csv");

        let first = fingerprint(["a", "b"]);
        assert_eq!(exporter.document(first, || "one".to_string()), "one");
        assert_eq!(exporter.document(first, || "two".to_string()), "one");
        assert_eq!(exporter.generation_count(), 1);

        let second = fingerprint(["a", "b", "c"]);
        assert_ne!(first, second);
        assert_eq!(exporter.document(second, || "three".to_string()), "three");
        assert_eq!(exporter.generation_count(), 2);
    }

    #[test]
    fn test_exporter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = CsvExporter::new(dir.path().join("out"), "report.csv");
        let path = exporter
            .write(fingerprint(["x"]), || "\"Counter\"\n".to_string())
            .unwrap();
        assert_eq!(path, dir.path().join("out").join("report.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "\"Counter\"\n");
    }
}
