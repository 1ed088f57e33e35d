//! Column definitions and filter/sort/selection state for tabular pages.

use std::cmp::Ordering;

use serde_json::{json, Value};
use sirona_types::CounterRow;

use crate::data::csv::{self, FieldOverrides};

/// A grid column: the row field it shows and an optional header label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub field: String,
    pub display_name: Option<String>,
}

impl ColumnDef {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            display_name: None,
        }
    }

    pub fn display(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Header text: the display name, else the field key.
    pub fn header(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.field)
    }
}

/// Columns of the counters report.
pub fn counter_columns() -> Vec<ColumnDef> {
    [
        ("name", "Counter"),
        ("roleName", "Role"),
        ("hits", "Hits"),
        ("max", "Max"),
        ("mean", "Mean"),
        ("min", "Min"),
        ("standardDeviation", "StandardDeviation"),
        ("sum", "Sum"),
        ("variance", "Variance"),
        ("concurrency", "Concurrency"),
        ("maxConcurrency", "MaxConcurrency"),
    ]
    .into_iter()
    .map(|(field, name)| ColumnDef::new(field).display(name))
    .collect()
}

/// The Role column shows `roleName (unitName)`, in the grid and in exports.
pub fn counter_overrides() -> FieldOverrides {
    FieldOverrides::new().with("roleName", |row| json!(role_label(row)))
}

fn role_label(row: &Value) -> String {
    let role = row.get("roleName").and_then(Value::as_str).unwrap_or("");
    let unit = row.get("unitName").and_then(Value::as_str).unwrap_or("");
    format!("{role} ({unit})")
}

/// Row as a JSON object keyed by field.
pub fn counter_value(row: &CounterRow) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}

/// Display text of one cell.
pub fn cell_text(row: &CounterRow, field: &str) -> String {
    match field {
        "name" => row.name.clone(),
        "roleName" => format!("{} ({})", row.role_name, row.unit_name),
        "unitName" => row.unit_name.clone(),
        _ => number_field(row, field).map(format_number).unwrap_or_default(),
    }
}

fn number_field(row: &CounterRow, field: &str) -> Option<f64> {
    Some(match field {
        "hits" => row.hits,
        "max" => row.max,
        "mean" => row.mean,
        "min" => row.min,
        "standardDeviation" => row.standard_deviation,
        "sum" => row.sum,
        "variance" => row.variance,
        "concurrency" => row.concurrency,
        "maxConcurrency" => row.max_concurrency,
        _ => return None,
    })
}

/// Format a statistic for a cell: integers stay integral, other values get
/// up to three decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{:.3}", value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn compare(a: &CounterRow, b: &CounterRow, field: &str) -> Ordering {
    match (number_field(a, field), number_field(b, field)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => cell_text(a, field).cmp(&cell_text(b, field)),
    }
}

/// Filter, sort, selection and sizing of the counters grid.
#[derive(Debug, Clone)]
pub struct GridState {
    pub columns: Vec<ColumnDef>,
    pub filter_text: String,
    pub sort_column: usize,
    pub sort_ascending: bool,
    pub selected: usize,
    pub min_height: Option<u16>,
    pub max_height: Option<u16>,
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(counter_columns())
    }
}

impl GridState {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            filter_text: String::new(),
            sort_column: 0,
            sort_ascending: true,
            selected: 0,
            min_height: None,
            max_height: None,
        }
    }

    pub fn with_height_bounds(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    pub fn sort_field(&self) -> &str {
        self.columns
            .get(self.sort_column)
            .map(|c| c.field.as_str())
            .unwrap_or("name")
    }

    pub fn cycle_sort(&mut self) {
        if !self.columns.is_empty() {
            self.sort_column = (self.sort_column + 1) % self.columns.len();
        }
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort_ascending = !self.sort_ascending;
    }

    /// Check if a counter name matches the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        if self.filter_text.is_empty() {
            return true;
        }
        name.to_lowercase().contains(&self.filter_text.to_lowercase())
    }

    /// The rows as rendered: filtered by name, then sorted.
    pub fn visible<'a>(&self, rows: &'a [CounterRow]) -> Vec<&'a CounterRow> {
        let field = self.sort_field();
        let mut visible: Vec<&CounterRow> =
            rows.iter().filter(|r| self.matches_filter(&r.name)).collect();
        visible.sort_by(|a, b| {
            let primary = compare(a, b, field);
            let primary = if self.sort_ascending {
                primary
            } else {
                primary.reverse()
            };
            // Secondary sort by identity keeps equal rows stable across polls
            primary.then_with(|| a.key().cmp(&b.key()))
        });
        visible
    }

    /// Height of the grid: one line per row plus the header, clamped.
    pub fn natural_height(&self, row_count: usize) -> u16 {
        let natural = u16::try_from(row_count).unwrap_or(u16::MAX).saturating_add(1);
        let natural = match self.min_height {
            Some(min) => natural.max(min),
            None => natural,
        };
        match self.max_height {
            Some(max) => natural.min(max),
            None => natural,
        }
    }

    pub fn select_next_n(&mut self, n: usize, count: usize) {
        self.selected = (self.selected + n).min(count.saturating_sub(1));
    }

    pub fn select_prev_n(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn clamp_selection(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// CSV of the rendered rows.
    pub fn export(&self, rows: &[&CounterRow]) -> String {
        let values: Vec<Value> = rows.iter().map(|r| counter_value(r)).collect();
        csv::to_csv(&self.columns, &values, &counter_overrides())
    }

    /// Change signal of the rendered row set. `generation` identifies the
    /// fetch the rows came from, so refreshed values of the same rows count
    /// as a change.
    pub fn fingerprint(&self, generation: u64, rows: &[&CounterRow]) -> u64 {
        csv::fingerprint(rows.iter().map(|r| (generation, r.key())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, role: &str, hits: f64) -> CounterRow {
        CounterRow {
            name: name.into(),
            role_name: role.into(),
            unit_name: "ns".into(),
            hits,
            ..Default::default()
        }
    }

    fn rows() -> Vec<CounterRow> {
        vec![
            row("OrderService.place", "performances", 12.0),
            row("CartService.add", "performances", 40.0),
            row("OrderService.cancel", "failures", 3.0),
        ]
    }

    #[test]
    fn test_counter_columns() {
        let columns = counter_columns();
        assert_eq!(columns.len(), 11);
        assert_eq!(columns[0].header(), "Counter");
        assert_eq!(columns[1].field, "roleName");
        assert_eq!(columns[10].header(), "MaxConcurrency");
        assert_eq!(ColumnDef::new("hits").header(), "hits");
    }

    #[test]
    fn test_filter_and_sort() {
        let rows = rows();
        let mut grid = GridState::default();

        let names: Vec<&str> = grid.visible(&rows).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["CartService.add", "OrderService.cancel", "OrderService.place"]
        );

        grid.filter_text = "order".into();
        assert_eq!(grid.visible(&rows).len(), 2);

        grid.filter_text.clear();
        grid.sort_column = 2; // hits
        grid.sort_ascending = false;
        let hits: Vec<f64> = grid.visible(&rows).iter().map(|r| r.hits).collect();
        assert_eq!(hits, vec![40.0, 12.0, 3.0]);
    }

    #[test]
    fn test_cycle_sort_wraps() {
        let mut grid = GridState::default();
        for _ in 0..11 {
            grid.cycle_sort();
        }
        assert_eq!(grid.sort_field(), "name");
    }

    #[test]
    fn test_cell_text() {
        let r = CounterRow {
            mean: 10.123456,
            ..row("a", "performances", 12.0)
        };
        assert_eq!(cell_text(&r, "roleName"), "performances (ns)");
        assert_eq!(cell_text(&r, "hits"), "12");
        assert_eq!(cell_text(&r, "mean"), "10.123");
        assert_eq!(cell_text(&r, "unknown"), "");
    }

    #[test]
    fn test_natural_height_is_clamped() {
        let grid = GridState::default();
        assert_eq!(grid.natural_height(3), 4);

        let bounded = GridState::default().with_height_bounds(Some(6), Some(10));
        assert_eq!(bounded.natural_height(0), 6);
        assert_eq!(bounded.natural_height(5), 6);
        assert_eq!(bounded.natural_height(7), 8);
        assert_eq!(bounded.natural_height(100), 10);
    }

    #[test]
    fn test_export_uses_role_override() {
        let rows = vec![row("a", "performances", 2.0)];
        let grid = GridState::new(vec![
            ColumnDef::new("name").display("Counter"),
            ColumnDef::new("roleName").display("Role"),
            ColumnDef::new("hits").display("Hits"),
        ]);
        let visible = grid.visible(&rows);
        assert_eq!(
            grid.export(&visible),
            "\"Counter\",\"Role\",\"Hits\"\n\"a\",\"performances (ns)\",\"2\"\n"
        );
    }

    #[test]
    fn test_fingerprint_follows_rendered_rows() {
        let rows = rows();
        let mut grid = GridState::default();
        let all = grid.fingerprint(1, &grid.visible(&rows));
        assert_eq!(all, grid.fingerprint(1, &grid.visible(&rows)));
        assert_ne!(all, grid.fingerprint(2, &grid.visible(&rows)));
        grid.filter_text = "cart".into();
        let filtered = grid.fingerprint(1, &grid.visible(&rows));
        assert_ne!(all, filtered);
    }

    #[test]
    fn test_selection_bounds() {
        let mut grid = GridState::default();
        grid.select_next_n(10, 3);
        assert_eq!(grid.selected, 2);
        grid.select_prev_n(5);
        assert_eq!(grid.selected, 0);
        grid.selected = 9;
        grid.clamp_selection(0);
        assert_eq!(grid.selected, 0);
    }
}
