use std::fs;

use crate::{
    constants,
    server::ServerContext,
    shared_types::{ApiError, ApiResponse},
};

/// the three files making up the browser editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFile {
    Index,
    Styles,
    Script,
}

impl UiFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Styles => "styles.css",
            Self::Script => "app.js",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Index => constants::HTML_MIME_TYPE,
            Self::Styles => constants::CSS_MIME_TYPE,
            Self::Script => constants::JS_MIME_TYPE,
        }
    }
}

/// a missing file is a broken install and surfaces as a plain 500
pub fn serve(ctx: &ServerContext, ui_file: UiFile) -> Result<ApiResponse, ApiError> {
    let data = fs::read(ctx.ui_root.join(ui_file.file_name()))?;

    Ok(ApiResponse::Raw {
        content_type: ui_file.content_type(),
        data,
    })
}
