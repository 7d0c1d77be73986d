use serde::{Deserialize, Serialize};

/// Column selection state shown to the user before an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedColumn {
    pub field: String,
    pub label: String,
    pub checked: bool,
}

impl CheckedColumn {
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}
