use std::{io::Cursor, path::Path};

use serde::Serialize;
use tiny_http::{Header, Response};

use crate::{
    constants::{self, MIME_TYPES, UNKNOWN_MIME_TYPE},
    shared_types::{AckBody, ApiError, ApiResponse},
};

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

fn header(name: &str, value: &str) -> Header {
    // names and values all come from `constants`, which are plain ascii
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("invalid static header")
}

/// every response leaves through here so the CORS header is never missing
fn with_cors(response: HttpResponse) -> HttpResponse {
    response.with_header(header(
        constants::HEADER_ALLOW_ORIGIN,
        constants::CORS_ALLOW_ORIGIN,
    ))
}

/// content length is set from `data`
pub fn bytes_response(status: u16, content_type: &str, data: Vec<u8>) -> HttpResponse {
    with_cors(
        Response::from_data(data)
            .with_status_code(status)
            .with_header(header(constants::HEADER_CONTENT_TYPE, content_type)),
    )
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> anyhow::Result<HttpResponse> {
    let data = serde_json::to_vec_pretty(body)?;

    Ok(bytes_response(status, constants::JSON_MIME_TYPE, data))
}

pub fn preflight_response() -> HttpResponse {
    with_cors(
        Response::from_data(Vec::new())
            .with_status_code(200)
            .with_header(header(
                constants::HEADER_ALLOW_METHODS,
                constants::CORS_ALLOW_METHODS,
            ))
            .with_header(header(
                constants::HEADER_ALLOW_HEADERS,
                constants::CORS_ALLOW_HEADERS,
            )),
    )
}

/// lookup by lower-cased extension, unknown extensions are served as octet-stream
pub fn get_content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| MIME_TYPES.get(ext.to_ascii_lowercase().as_str()))
        .copied()
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

impl ApiResponse {
    pub fn status_code(&self) -> u16 {
        200
    }

    pub fn into_http(self) -> anyhow::Result<HttpResponse> {
        let status = self.status_code();

        match self {
            Self::Saved { file_name } | Self::Uploaded { file_name } => json_response(
                status,
                &AckBody {
                    message: constants::MSG_FILE_SAVED,
                    file_name: &file_name,
                    status: constants::STATUS_SUCCESS,
                },
            ),
            Self::Deleted { file_name } => json_response(
                status,
                &AckBody {
                    message: constants::MSG_FILE_DELETED,
                    file_name: &file_name,
                    status: constants::STATUS_OK,
                },
            ),
            Self::FileList(entries) => json_response(status, &entries),
            Self::FileDetail(detail) => json_response(status, &detail),
            Self::Raw { content_type, data } => Ok(bytes_response(status, content_type, data)),
            Self::Preflight => Ok(preflight_response()),
        }
    }
}

impl ApiError {
    pub fn to_http(&self) -> HttpResponse {
        let status = self.status_code();

        match json_response(status, &self.body()) {
            Ok(response) => response,
            Err(_) => bytes_response(status, constants::JSON_MIME_TYPE, Vec::new()),
        }
    }
}
