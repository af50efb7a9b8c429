//! JSON 記錄讀取
//!
//! 接受三種結構：記錄陣列 `[{col: v}, ...]`、欄位陣列 `{col: [v, ...]}`、
//! 以及欄位對列標籤 `{col: {row: v}}`。

use crate::data_ingestion::error::{IngestionError, IngestionResult};
use crate::domain_types::Table;
use serde_json::{Map, Value};
use std::collections::HashSet;

pub fn parse_json(data: &[u8], file: &str) -> IngestionResult<Table> {
    let value: Value = serde_json::from_slice(data).map_err(|source| IngestionError::Json {
        file: file.to_string(),
        source,
    })?;

    let columns = match value {
        Value::Array(records) => from_records(records, file)?,
        Value::Object(columns) => from_columns(columns, file)?,
        _ => {
            return Err(IngestionError::json_layout(file, "頂層必須是陣列或物件"));
        }
    };

    Table::from_columns(columns).map_err(|source| IngestionError::table(file, source))
}

type Columns = Vec<(String, Vec<Option<String>>)>;

fn from_records(records: Vec<Value>, file: &str) -> IngestionResult<Columns> {
    let mut names: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let mut objects = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let Value::Object(object) = record else {
            return Err(IngestionError::json_layout(file, format!("第 {row} 筆記錄不是物件")));
        };
        for key in object.keys() {
            if seen.insert(key.clone()) {
                names.push(key.clone());
            }
        }
        objects.push(object);
    }

    Ok(names
        .into_iter()
        .map(|name| {
            let values: Vec<Option<String>> = objects
                .iter()
                .map(|object| object.get(&name).and_then(cell_text))
                .collect();
            (name, values)
        })
        .collect())
}

fn from_columns(columns: Map<String, Value>, file: &str) -> IngestionResult<Columns> {
    if columns.values().all(Value::is_array) {
        return Ok(columns
            .into_iter()
            .map(|(name, values)| {
                let values: Vec<Option<String>> = match values {
                    Value::Array(items) => items.iter().map(cell_text).collect(),
                    _ => Vec::new(),
                };
                (name, values)
            })
            .collect());
    }

    if !columns.values().all(Value::is_object) {
        return Err(IngestionError::json_layout(
            file,
            "欄位值必須全部是陣列或全部是物件",
        ));
    }

    // 列標籤依首次出現的順序排列
    let mut labels: Vec<&String> = Vec::new();
    let mut seen = HashSet::new();
    for cells in columns.values().filter_map(Value::as_object) {
        for label in cells.keys() {
            if seen.insert(label) {
                labels.push(label);
            }
        }
    }

    Ok(columns
        .iter()
        .map(|(name, cells)| {
            let values: Vec<Option<String>> = labels
                .iter()
                .map(|label| cells.get(label.as_str()).and_then(cell_text))
                .collect();
            (name.clone(), values)
        })
        .collect())
}

/// 單格 JSON 值轉字串，null 為缺值
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}
