// dqaudit-core/src/domain/dataset/table.rs

use crate::domain::dataset::value::Value;
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// One named table. Rows are padded so that every row has one cell per
/// column; a key missing from a source record is stored as `Value::Null`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    name: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        let mut dataset = Self {
            name: name.into(),
            ..Default::default()
        };
        for column in columns {
            dataset.ensure_column(&column);
        }
        dataset
    }

    /// Builds a dataset from keyed records. Columns appear in first-seen order.
    pub fn from_records<I, R, K>(name: impl Into<String>, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut dataset = Self::new(name, Vec::new());
        for record in records {
            dataset.push_record(record);
        }
        dataset
    }

    /// Builds a dataset from JSON objects. Non-object entries become all-null rows.
    pub fn from_json_rows(name: impl Into<String>, rows: &[serde_json::Value]) -> Self {
        Self::from_records(
            name,
            rows.iter().map(|row| {
                row.as_object()
                    .map(|obj| {
                        obj.iter()
                            .map(|(k, v)| (k.clone(), Value::from(v)))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            }),
        )
    }

    pub fn push_record<R, K>(&mut self, record: R)
    where
        R: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut row = vec![Value::Null; self.columns.len()];
        for (key, value) in record {
            let position = self.ensure_column(&key.into());
            if position >= row.len() {
                row.resize(position + 1, Value::Null);
            }
            row[position] = value;
        }
        self.rows.push(row);
    }

    fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(position) = self.index.get(column) {
            return *position;
        }
        let position = self.columns.len();
        self.columns.push(column.to_string());
        self.index.insert(column.to_string(), position);
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        position
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of a column in row order, or `None` when the column is absent.
    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let position = *self.index.get(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(position).unwrap_or(&NULL))
                .collect(),
        )
    }

    /// Like [`Dataset::column`], but an absent column reads as all-null.
    pub fn column_or_null(&self, column: &str) -> Vec<&Value> {
        self.column(column)
            .unwrap_or_else(|| vec![&NULL; self.rows.len()])
    }

    /// Projects a row back to a JSON record for diagnostics.
    pub fn row_record(&self, row: usize) -> serde_json::Value {
        let mut record = serde_json::Map::new();
        if let Some(cells) = self.rows.get(row) {
            for (column, value) in self.columns.iter().zip(cells) {
                record.insert(column.clone(), value.to_json());
            }
        }
        serde_json::Value::Object(record)
    }
}
