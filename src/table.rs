//! Generic in-memory table for opaque API records.
//!
//! Records keep their source order and columns keep first-seen order, so a
//! table written back out matches what the API returned.

use crate::error::AppError;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::{Read, Write};

/// One table row, keyed by column name.
pub type Row = Map<String, Value>;

/// Column used when a record is a bare value instead of an object.
pub const VALUE_COLUMN: &str = "value";

/// Ordered columns plus ordered rows of JSON values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from JSON records.
    ///
    /// Columns are the union of object keys in first-seen order. Records that
    /// are not objects land in a single `value` column.
    pub fn from_records(records: Vec<Value>) -> Self {
        let mut table = Table::default();

        for record in records {
            let row = match record {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert(VALUE_COLUMN.to_string(), other);
                    map
                }
            };
            table.push_row(row);
        }

        table
    }

    /// Parses CSV with a header row. Every cell is kept as a string; empty
    /// cells become `null`. Empty input gives an empty table.
    ///
    /// Repeated header names get a `.1`, `.2`, ... suffix so no cell is
    /// shadowed. A row whose width differs from the header is an error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                // Baseball Savant prefixes its exports with a UTF-8 BOM
                if i == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();
        let columns = dedupe_columns(headers);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row = Map::with_capacity(columns.len());
            for (column, cell) in columns.iter().zip(record.iter()) {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                row.insert(column.clone(), value);
            }
            rows.push(row);
        }

        Ok(Table { columns, rows })
    }

    pub fn from_csv_str(text: &str) -> Result<Self, AppError> {
        Self::from_csv_reader(text.as_bytes())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn push_row(&mut self, row: Row) {
        for key in row.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Returns the rows whose `column` renders as exactly `value`,
    /// in their original order. A missing column matches nothing.
    pub fn filter_eq(&self, column: &str, value: &str) -> Table {
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.get(column)
                    .and_then(cell_text)
                    .is_some_and(|text| text == value)
            })
            .cloned()
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Writes the header and every row as CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if !self.columns.is_empty() {
            csv_writer.write_record(&self.columns)?;
        }

        for row in &self.rows {
            let record: Vec<String> = self
                .columns
                .iter()
                .map(|column| row.get(column).map(render_cell).unwrap_or_default())
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, AppError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// The rows as a JSON array of objects, one per row.
    pub fn to_json_records(&self) -> Value {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect())
    }
}

/// Renames repeated column names to `name.1`, `name.2`, ... in order of
/// appearance, skipping any suffix already taken.
fn dedupe_columns(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = headers.iter().cloned().collect();
    let mut used: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut columns = Vec::with_capacity(headers.len());

    for name in headers {
        if used.insert(name.clone()) {
            columns.push(name);
            continue;
        }

        let mut suffix = 1;
        let renamed = loop {
            let candidate = format!("{name}.{suffix}");
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        seen.insert(renamed.clone());
        used.insert(renamed.clone());
        columns.push(renamed);
    }

    columns
}

/// String form of a scalar cell; `None` for null and composite values.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// CSV form of a cell. Nested values are written as compact JSON.
fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
        scalar => cell_text(scalar).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_records_keeps_order_and_union_of_columns() {
        let table = Table::from_records(vec![
            json!({"propertyCode": "A", "price": 950.0}),
            json!({"propertyCode": "B", "price": 1200.0, "floor": "3"}),
        ]);

        assert_eq!(table.columns(), &["propertyCode", "price", "floor"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0]["propertyCode"], json!("A"));
        assert_eq!(table.rows()[1]["propertyCode"], json!("B"));
    }

    #[test]
    fn test_from_records_wraps_scalars() {
        let table = Table::from_records(vec![json!(1), json!("two")]);
        assert_eq!(table.columns(), &[VALUE_COLUMN]);
        assert_eq!(table.rows()[1][VALUE_COLUMN], json!("two"));
    }

    #[test]
    fn test_csv_output_fills_missing_and_nests_json() {
        let table = Table::from_records(vec![
            json!({"code": "A", "parkingSpace": {"hasParkingSpace": true}}),
            json!({"code": "B, with comma", "floor": null}),
        ]);

        let csv = table.to_csv_string().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "code,parkingSpace,floor");
        assert_eq!(lines[1], r#"A,"{""hasParkingSpace"":true}","#);
        assert_eq!(lines[2], r#""B, with comma",,"#);
    }

    #[test]
    fn test_from_csv_strips_bom_and_nulls_empty_cells() {
        let text = "\u{feff}pitch_type,home_team,hc_x\nFF,KC,\nSL,DET,101.5\n";
        let table = Table::from_csv_str(text).unwrap();

        assert_eq!(table.columns(), &["pitch_type", "home_team", "hc_x"]);
        assert_eq!(table.rows()[0]["hc_x"], Value::Null);
        assert_eq!(table.rows()[1]["hc_x"], json!("101.5"));
    }

    #[test]
    fn test_from_empty_csv() {
        let table = Table::from_csv_str("").unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
        assert_eq!(table.to_csv_string().unwrap(), "");
    }

    #[test]
    fn test_filter_eq_keeps_only_matching_rows() {
        let text = "game_pk,home_team\n1,KC\n2,CLE\n3,DET\n";
        let table = Table::from_csv_str(text).unwrap();

        let filtered = table.filter_eq("home_team", "KC");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0]["game_pk"], json!("1"));
        assert_eq!(filtered.columns(), table.columns());
    }

    #[test]
    fn test_filter_eq_on_missing_column_is_empty() {
        let table = Table::from_records(vec![json!({"a": 1})]);
        assert!(table.filter_eq("home_team", "KC").is_empty());
    }

    #[test]
    fn test_filter_eq_matches_numbers_by_text() {
        let table = Table::from_records(vec![json!({"rooms": 2}), json!({"rooms": 3})]);
        let filtered = table.filter_eq("rooms", "3");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_csv_roundtrip_preserves_statcast_cells() {
        let text = "player_name,launch_speed\n\"Perez, Salvador\",104.2\n";
        let table = Table::from_csv_str(text).unwrap();
        assert_eq!(table.to_csv_string().unwrap(), text);
    }

    #[test]
    fn test_repeated_headers_keep_every_cell() {
        let text = "pitch_type,pitcher,fielder_2,pitcher,fielder_2\nFF,111,222,333,444\n";
        let table = Table::from_csv_str(text).unwrap();

        assert_eq!(
            table.columns(),
            &["pitch_type", "pitcher", "fielder_2", "pitcher.1", "fielder_2.1"]
        );
        assert_eq!(table.rows()[0]["pitcher"], json!("111"));
        assert_eq!(table.rows()[0]["pitcher.1"], json!("333"));
        assert_eq!(
            table.to_csv_string().unwrap(),
            "pitch_type,pitcher,fielder_2,pitcher.1,fielder_2.1\nFF,111,222,333,444\n"
        );
    }

    #[test]
    fn test_repeated_header_skips_taken_suffix() {
        let table = Table::from_csv_str("a,a.1,a\n1,2,3\n").unwrap();
        assert_eq!(table.columns(), &["a", "a.1", "a.2"]);
        assert_eq!(table.rows()[0]["a.2"], json!("3"));
    }

    #[test]
    fn test_row_wider_than_header_is_rejected() {
        let result = Table::from_csv_str("game_pk,home_team\n1,KC,extra\n");
        assert!(matches!(result, Err(AppError::Csv(_))));
    }

    #[test]
    fn test_row_narrower_than_header_is_rejected() {
        let result = Table::from_csv_str("game_pk,home_team,away_team\n1,KC\n");
        assert!(matches!(result, Err(AppError::Csv(_))));
    }

    #[test]
    fn test_to_json_records() {
        let table = Table::from_records(vec![json!({"a": 1}), json!({"a": 2})]);
        assert_eq!(table.to_json_records(), json!([{"a": 1}, {"a": 2}]));
    }
}
