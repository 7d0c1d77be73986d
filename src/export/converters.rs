use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::export::config::configured_columns;
use crate::export::types::{ColumnConfig, ColumnConfigMap, ColumnType, Row, TypeOptions};

/// Convert one present field value for export. `None` drops the field from
/// the row.
pub fn transform_value(
    value: &Value,
    config: &ColumnConfig,
    options: &TypeOptions,
) -> Option<Value> {
    match config.kind {
        Some(ColumnType::Number) => {
            if !value.is_number() {
                return None;
            }
            match &options.handle_number {
                Some(handle) => Some(handle(value)),
                None => Some(value.clone()),
            }
        }
        Some(ColumnType::Date) => {
            if !value.is_number() && !value.is_string() {
                return None;
            }
            match &options.handle_date {
                Some(handle) => Some(handle(value, config.date_format.as_deref())),
                None => Some(value.clone()),
            }
        }
        Some(ColumnType::String) | None => Some(value.clone()),
    }
}

/// Project every row onto the configured, exportable columns.
///
/// Rows come back sparse: absent or type-mismatched fields have no entry.
pub fn transform_data(rows: &[Row], columns: &ColumnConfigMap, options: &TypeOptions) -> Vec<Row> {
    rows.iter()
        .map(|row| {
            let mut transformed = Row::new();
            for (key, config) in configured_columns(columns) {
                let Some(value) = row.get(key) else {
                    continue;
                };
                if let Some(value) = transform_value(value, config, options) {
                    transformed.insert(key.to_string(), value);
                }
            }
            transformed
        })
        .collect()
}

// Excel day 0 once the 1900 leap-year quirk is accounted for
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);
const SECONDS_IN_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Parse a date or datetime string into an Excel serial date.
pub fn date_string_to_excel_serial(value: &str) -> Option<f64> {
    let value = value.trim();

    let datetime = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y/%m/%d %H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    let (year, month, day) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let elapsed = datetime.signed_duration_since(epoch);

    Some(elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_IN_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn number() -> ColumnConfig {
        ColumnConfig::new("n").kind(ColumnType::Number)
    }

    fn date() -> ColumnConfig {
        ColumnConfig::new("d")
            .kind(ColumnType::Date)
            .date_format("yyyy-mm-dd")
    }

    #[test]
    fn number_passes_through() {
        let options = TypeOptions::default();
        assert_eq!(transform_value(&json!(42), &number(), &options), Some(json!(42)));
    }

    #[test]
    fn non_numeric_number_is_omitted() {
        let options = TypeOptions::default();
        assert_eq!(transform_value(&json!("abc"), &number(), &options), None);
        assert_eq!(transform_value(&Value::Null, &number(), &options), None);
    }

    #[test]
    fn number_handler_is_applied() {
        let options = TypeOptions::default()
            .with_number(|v| json!(v.as_f64().unwrap_or_default() * 100.0));
        assert_eq!(
            transform_value(&json!(0.5), &number(), &options),
            Some(json!(50.0))
        );
    }

    #[test]
    fn date_accepts_numbers_and_strings_only() {
        let options = TypeOptions::default();
        assert_eq!(
            transform_value(&json!("2025-01-01"), &date(), &options),
            Some(json!("2025-01-01"))
        );
        assert_eq!(transform_value(&json!(45658), &date(), &options), Some(json!(45658)));
        assert_eq!(transform_value(&json!(true), &date(), &options), None);
        assert_eq!(transform_value(&json!({"y": 2025}), &date(), &options), None);
    }

    #[test]
    fn date_handler_receives_format() {
        let options = TypeOptions::default().with_date(|v, format| {
            json!(format!("{}|{}", v.as_str().unwrap_or(""), format.unwrap_or("")))
        });
        assert_eq!(
            transform_value(&json!("2025-01-01"), &date(), &options),
            Some(json!("2025-01-01|yyyy-mm-dd"))
        );
    }

    #[test]
    fn untyped_passes_anything_through() {
        let options = TypeOptions::default();
        let plain = ColumnConfig::new("x");
        assert_eq!(transform_value(&Value::Null, &plain, &options), Some(Value::Null));
        assert_eq!(transform_value(&json!([1, 2]), &plain, &options), Some(json!([1, 2])));
    }

    #[test]
    fn transform_data_keeps_only_configured_fields() {
        let rows: Vec<Row> = vec![
            serde_json::from_value(json!({"id": 1, "name": "张三", "age": 25})).unwrap(),
            serde_json::from_value(json!({"id": 2, "name": "李四", "age": 30})).unwrap(),
        ];
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(ColumnConfig::new("ID").width(10.0)));
        columns.insert("name".into(), Some(ColumnConfig::new("姓名").width(15.0)));

        let result = transform_data(&rows, &columns, &TypeOptions::default());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].get("id"), Some(&json!(1)));
        assert_eq!(result[0].get("name"), Some(&json!("张三")));
        assert!(!result[0].contains_key("age"));
    }

    #[test]
    fn transform_data_is_sparse_on_mismatch() {
        let rows: Vec<Row> = vec![
            serde_json::from_value(json!({"id": "x", "name": "王五"})).unwrap(),
            serde_json::from_value(json!({"name": "赵六"})).unwrap(),
        ];
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(number()));
        columns.insert("name".into(), Some(ColumnConfig::new("姓名")));
        columns.insert("hidden".into(), Some(ColumnConfig::new("隐藏").exportable(false)));

        let result = transform_data(&rows, &columns, &TypeOptions::default());

        assert!(!result[0].contains_key("id"));
        assert_eq!(result[0].len(), 1);
        assert_eq!(result[1].keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn transform_data_on_empty_input() {
        let mut columns = ColumnConfigMap::new();
        columns.insert("id".into(), Some(ColumnConfig::new("ID")));
        assert!(transform_data(&[], &columns, &TypeOptions::default()).is_empty());
    }

    #[test]
    fn date_strings_become_excel_serials() {
        assert_eq!(date_string_to_excel_serial("2025-01-01"), Some(45658.0));
        assert_eq!(date_string_to_excel_serial("2025/01/01"), Some(45658.0));
        assert_eq!(date_string_to_excel_serial("1900-03-01"), Some(61.0));
        assert_eq!(date_string_to_excel_serial("2025-01-01T12:00:00"), Some(45658.5));
        assert_eq!(date_string_to_excel_serial("2025-01-01T06:00:00Z"), Some(45658.25));
        assert_eq!(date_string_to_excel_serial("not a date"), None);
    }
}
