use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::{ColumnConfig, ColumnConfigMap, ColumnType, Row};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub register_time: NaiveDateTime,
}

/// Column configuration for exporting the user table.
pub fn user_columns() -> ColumnConfigMap {
    let mut columns = ColumnConfigMap::new();
    columns.insert(
        "id".into(),
        Some(ColumnConfig::new("ID").width(10.0).kind(ColumnType::Number)),
    );
    columns.insert("name".into(), Some(ColumnConfig::new("姓名").width(15.0)));
    columns.insert("phone".into(), Some(ColumnConfig::new("手机号").width(15.0)));
    columns.insert(
        "registerTime".into(),
        Some(
            ColumnConfig::new("注册时间")
                .width(20.0)
                .kind(ColumnType::Date)
                .date_format("yyyy-mm-dd"),
        ),
    );
    columns
}

pub fn users_to_rows(users: &[User]) -> Result<Vec<Row>> {
    users
        .iter()
        .map(|user| -> Result<Row> { Ok(serde_json::from_value(serde_json::to_value(user)?)?) })
        .collect()
}
