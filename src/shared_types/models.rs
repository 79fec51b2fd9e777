use chrono::{DateTime, Utc};
use serde::Serialize;

/// metadata of a markdown post, no content
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub full_path: String,
    /// always "/" separated
    pub relative_path: String,
    pub file_name: String,
    /// file name without extension
    pub name: String,
    pub title: String,
    pub extension: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FileDetail {
    #[serde(flatten)]
    pub entry: FileEntry,
    pub content: String,
}
