use std::io;

use thiserror::Error;

use crate::constants;

use super::ErrorBody;

const INVALID_SAVE_REQUEST: &str = "Invalid save request";
const INVALID_REQUEST_BODY: &str = "Invalid request body";
const FILE_NOT_FOUND: &str = "File not found";

/// every failure a request can end in, each maps to one status code and body shape
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{error}: {detail}")]
    InvalidRequest { error: &'static str, detail: String },

    #[error("Missing '{0}' query parameter")]
    MissingQuery(&'static str),

    #[error("File not found: {file_name}")]
    PostNotFound { file_name: String },

    #[error("File not found: {path}")]
    PathNotFound { path: String },

    #[error("Not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{error}: {detail}")]
    Persistence { error: &'static str, detail: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<io::Error> for ApiError {
    fn from(err: io::Error) -> Self {
        Self::Internal(err.into())
    }
}

impl ApiError {
    pub fn invalid_file_name() -> Self {
        Self::InvalidRequest {
            error: INVALID_SAVE_REQUEST,
            detail: "Missing or invalid fileName".to_string(),
        }
    }

    pub fn invalid_blog_file_name() -> Self {
        Self::InvalidRequest {
            error: INVALID_SAVE_REQUEST,
            detail: "Missing or invalid blogFileName".to_string(),
        }
    }

    pub fn invalid_body<E: ToString>(err: E) -> Self {
        Self::InvalidRequest {
            error: INVALID_REQUEST_BODY,
            detail: err.to_string(),
        }
    }

    pub fn save_failed<E: ToString>(err: E) -> Self {
        Self::Persistence {
            error: "Failed to save file",
            detail: err.to_string(),
        }
    }

    pub fn delete_failed<E: ToString>(err: E) -> Self {
        Self::Persistence {
            error: "Failed to delete file",
            detail: err.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } | Self::MissingQuery(_) => 400,
            Self::PostNotFound { .. } | Self::PathNotFound { .. } | Self::RouteNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Persistence { .. } | Self::Internal(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            Self::InvalidRequest { error, detail } => ErrorBody {
                detail: Some(detail.clone()),
                ..ErrorBody::new(*error)
            },
            Self::MissingQuery(_) | Self::RouteNotFound | Self::MethodNotAllowed => {
                ErrorBody::new(self.to_string())
            }
            Self::PostNotFound { file_name } => ErrorBody {
                file_name: Some(file_name.clone()),
                status: Some(constants::STATUS_ERROR),
                ..ErrorBody::new(FILE_NOT_FOUND)
            },
            Self::PathNotFound { path } => ErrorBody {
                path: Some(path.clone()),
                ..ErrorBody::new(FILE_NOT_FOUND)
            },
            Self::Persistence { error, detail } => ErrorBody {
                detail: Some(detail.clone()),
                status: Some(constants::STATUS_ERROR),
                ..ErrorBody::new(*error)
            },
            Self::Internal(err) => ErrorBody {
                detail: Some(format!("{:#}", err)),
                ..ErrorBody::new("Internal server error")
            },
        }
    }
}
