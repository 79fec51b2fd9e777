use std::time::Duration;

use phf::phf_map;

pub const DEFAULT_PORT: u16 = 30078;

pub const CONFIG_DIR: &str = "~/.sbe";

pub const CONFIG_FILENAME: &str = "config.toml";

pub const ENV_CONFIG_PATH: &str = "SBE_CONFIG";
pub const ENV_BLOG_PATH: &str = "BLOG_PATH";
pub const ENV_ASSETS_PATH: &str = "ASSETS_PATH";
pub const ENV_UI_PATH: &str = "UI_PATH";

/// relative to the directory of the running executable
pub const DEFAULT_UI_DIR: &str = "assets/editor-ui";

pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_millis(2000);

/// how often the accept loop wakes up to check for a stop request
pub const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const POST_FILE_EXT: &str = "md";
pub const MARKDOWN_FILE_EXTS: [&str; 2] = ["md", "mdx"];

/// assets of a post land in `<assets root>/img/blog/<post file name>/`
pub const ASSET_SUBDIRS: [&str; 2] = ["img", "blog"];

pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const HEADER_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

pub const JSON_MIME_TYPE: &str = "application/json; charset=utf-8";
pub const HTML_MIME_TYPE: &str = "text/html; charset=utf-8";
pub const CSS_MIME_TYPE: &str = "text/css; charset=utf-8";
pub const JS_MIME_TYPE: &str = "application/javascript; charset=utf-8";

pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";
pub static MIME_TYPES: phf::Map<&'static str, &'static str> = phf_map! {
    "jpg" => "image/jpeg",
    "jpeg" => "image/jpeg",
    "png" => "image/png",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "svg" => "image/svg+xml",
    "ico" => "image/x-icon",
    "pdf" => "application/pdf",
    "txt" => "text/plain",
    "html" => "text/html",
    "css" => "text/css",
    "js" => "application/javascript",
    "json" => "application/json",
};

pub const MSG_FILE_SAVED: &str = "File saved successfully";
pub const MSG_FILE_DELETED: &str = "File deleted successfully";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "error";
