use serde::Serialize;
use serde_with::skip_serializing_none;

use super::{FileDetail, FileEntry};

/// every successful outcome a route handler can produce
#[derive(Debug)]
pub enum ApiResponse {
    Saved { file_name: String },
    Uploaded { file_name: String },
    Deleted { file_name: String },
    FileList(Vec<FileEntry>),
    FileDetail(FileDetail),
    Raw {
        content_type: &'static str,
        data: Vec<u8>,
    },
    Preflight,
}

/// `{message, fileName, status}` acknowledgement of a write
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AckBody<'a> {
    pub message: &'a str,
    pub file_name: &'a str,
    pub status: &'a str,
}

#[skip_serializing_none]
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub detail: Option<String>,
    pub file_name: Option<String>,
    pub path: Option<String>,
    pub status: Option<&'static str>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            file_name: None,
            path: None,
            status: None,
        }
    }
}
