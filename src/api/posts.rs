use std::{env, path::PathBuf};

use tracing::info;

use crate::{
    server::ServerContext,
    shared_types::{ApiError, ApiResponse, DeleteRequest, SaveRequest},
    utils::{files, paths},
};

/// `POST /save`
pub fn save(ctx: &ServerContext, req: SaveRequest) -> Result<ApiResponse, ApiError> {
    let file_name = req.get_file_name().ok_or_else(ApiError::invalid_file_name)?;
    let post_path =
        files::get_post_path(&ctx.blog_root, file_name).ok_or_else(ApiError::invalid_file_name)?;

    let contents = files::compose_post(
        req.title.as_deref().unwrap_or_default(),
        req.author.as_deref().unwrap_or_default(),
        req.content.as_deref().unwrap_or_default(),
    );
    files::write_post(&post_path, &contents)?;
    info!("saved post {}", post_path.display());

    Ok(ApiResponse::Saved {
        file_name: file_name.to_string(),
    })
}

/// `DELETE /delete`
pub fn delete(ctx: &ServerContext, req: DeleteRequest) -> Result<ApiResponse, ApiError> {
    let file_name = req.get_file_name().ok_or_else(ApiError::invalid_file_name)?;
    let post_path =
        files::get_post_path(&ctx.blog_root, file_name).ok_or_else(ApiError::invalid_file_name)?;

    if !post_path.is_file() {
        return Err(ApiError::PostNotFound {
            file_name: file_name.to_string(),
        });
    }

    files::delete_post(&post_path).map_err(ApiError::delete_failed)?;
    info!("deleted post {}", post_path.display());

    Ok(ApiResponse::Deleted {
        file_name: file_name.to_string(),
    })
}

/// `GET /list`
pub fn list(ctx: &ServerContext) -> Result<ApiResponse, ApiError> {
    Ok(ApiResponse::FileList(files::list_markdown_files(
        &ctx.blog_root,
    )))
}

/// `GET /file?path=P`, P must point at a file inside the blog root.
/// `relativePath` of the result is relative to the process working directory.
pub fn file(ctx: &ServerContext, path: Option<String>) -> Result<ApiResponse, ApiError> {
    // already percent-decoded by the query parser
    let requested = match path {
        Some(path) if !path.trim().is_empty() => path,
        _ => return Err(ApiError::MissingQuery("path")),
    };

    let file_path = PathBuf::from(&requested);
    if !file_path.is_file() || !paths::is_within(&ctx.blog_root, &file_path) {
        return Err(ApiError::PathNotFound { path: requested });
    }

    let cwd = env::current_dir()?;
    // matches the `fullPath` of `/list` only because the blog root is already absolute
    let file_path = std::path::absolute(&file_path)?;

    Ok(ApiResponse::FileDetail(files::read_file_detail(
        &file_path, &cwd,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> ServerContext {
        let blog_root = temp.path().join("blog");
        fs::create_dir_all(&blog_root).unwrap();

        ServerContext {
            blog_root,
            assets_root: temp.path().join("assets"),
            ui_root: temp.path().join("ui"),
        }
    }

    fn save_request(file_name: &str) -> SaveRequest {
        SaveRequest {
            file_name: Some(file_name.to_string()),
            title: Some("Hi".to_string()),
            author: Some("Bob".to_string()),
            content: Some("Body".to_string()),
        }
    }

    #[test]
    fn test_save_writes_header_and_content() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let res = save(&ctx, save_request("hello")).unwrap();

        assert!(matches!(res, ApiResponse::Saved { file_name } if file_name == "hello"));
        assert_eq!(
            fs::read_to_string(ctx.blog_root.join("hello.md")).unwrap(),
            "---\ntitle: Hi\nauthors: Bob\n---\nBody"
        );
    }

    #[test]
    fn test_save_rejects_blank_and_escaping_names() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let err = save(&ctx, SaveRequest::default()).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = save(&ctx, save_request("  ")).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = save(&ctx, save_request("../outside")).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(!temp.path().join("outside.md").exists());
    }

    #[test]
    fn test_save_into_missing_subdir_is_internal_error() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let err = save(&ctx, save_request("no-such-dir/post")).unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn test_delete_missing_post() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        let err = delete(
            &ctx,
            DeleteRequest {
                file_name: Some("missing".to_string()),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::PostNotFound { ref file_name } if file_name == "missing"));
    }

    #[test]
    fn test_delete_removes_saved_post() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        save(&ctx, save_request("hello")).unwrap();

        let res = delete(
            &ctx,
            DeleteRequest {
                file_name: Some("hello".to_string()),
            },
        )
        .unwrap();

        assert!(matches!(res, ApiResponse::Deleted { .. }));
        assert!(!ctx.blog_root.join("hello.md").exists());
    }

    #[test]
    fn test_file_requires_path() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);

        assert!(matches!(file(&ctx, None), Err(ApiError::MissingQuery("path"))));
        assert!(matches!(
            file(&ctx, Some(" ".to_string())),
            Err(ApiError::MissingQuery("path"))
        ));
    }

    #[test]
    fn test_file_outside_blog_root_is_not_found() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        let outside = temp.path().join("secret.md");
        fs::write(&outside, "secret").unwrap();

        let err = file(&ctx, Some(outside.to_string_lossy().to_string())).unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_file_returns_detail() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp);
        save(&ctx, save_request("hello-world")).unwrap();
        let full_path = ctx.blog_root.join("hello-world.md");

        let res = file(&ctx, Some(full_path.to_string_lossy().to_string())).unwrap();

        let detail = match res {
            ApiResponse::FileDetail(detail) => detail,
            other => panic!("unexpected response: {:?}", other),
        };
        assert_eq!(detail.entry.file_name, "hello-world.md");
        assert_eq!(detail.entry.title, "HELLO WORLD");
        assert_eq!(detail.content, "---\ntitle: Hi\nauthors: Bob\n---\nBody");
        assert!(!detail.entry.relative_path.contains('\\'));
    }
}
