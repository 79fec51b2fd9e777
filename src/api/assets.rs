use std::fs;

use base64::prelude::*;
use tracing::info;

use super::response::get_content_type;
use crate::{
    server::ServerContext,
    shared_types::{ApiError, ApiResponse, UploadRequest},
    utils::{files, paths},
};

/// `POST /upload`. both names are validated before anything touches the disk, so a
/// malformed request is always a 400 and only decode/write failures are a 500.
pub fn upload(ctx: &ServerContext, req: UploadRequest) -> Result<ApiResponse, ApiError> {
    let file_name = req.get_file_name().ok_or_else(ApiError::invalid_file_name)?;
    let blog_file_name = req
        .get_blog_file_name()
        .ok_or_else(ApiError::invalid_blog_file_name)?;

    let asset_dir = files::get_asset_dir(&ctx.assets_root, blog_file_name)
        .ok_or_else(ApiError::invalid_blog_file_name)?;
    if paths::join_segment(&asset_dir, file_name).is_none() {
        return Err(ApiError::invalid_file_name());
    }

    // line breaks and padding spaces are common in pasted base64
    let encoded: String = req
        .base64_content
        .as_deref()
        .unwrap_or_default()
        .split_whitespace()
        .collect();
    let data = BASE64_STANDARD
        .decode(encoded)
        .map_err(ApiError::save_failed)?;

    let asset_path =
        files::write_asset(&asset_dir, file_name, &data).map_err(ApiError::save_failed)?;
    info!("saved asset {} ({} bytes)", asset_path.display(), data.len());

    Ok(ApiResponse::Uploaded {
        file_name: file_name.to_string(),
    })
}

/// `GET /image?path=P`, P is resolved under the assets root
pub fn image(ctx: &ServerContext, path: Option<String>) -> Result<ApiResponse, ApiError> {
    let requested = path.unwrap_or_default();

    let asset_path = match paths::join_within(&ctx.assets_root, &requested) {
        Some(asset_path) => asset_path,
        None => return Err(ApiError::PathNotFound { path: requested }),
    };
    if !asset_path.is_file() {
        return Err(ApiError::PathNotFound {
            path: asset_path.to_string_lossy().to_string(),
        });
    }

    let data = fs::read(&asset_path)?;

    Ok(ApiResponse::Raw {
        content_type: get_content_type(&asset_path),
        data,
    })
}
