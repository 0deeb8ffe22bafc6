use crate::time::Timestamp;

/// A generic key/value application setting.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSetting {
    pub key: String,
    pub value: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
