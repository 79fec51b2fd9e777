use std::{
    any::Any,
    io::Read,
    panic::{self, AssertUnwindSafe},
    time::Instant,
};

use anyhow::anyhow;
use serde::de::DeserializeOwned;
use tiny_http::{Method, Request};
use tracing::{error, info, warn};
use url::Url;

use crate::{
    server::ServerContext,
    shared_types::{ApiError, ApiResponse},
};

pub mod assets;
pub mod posts;
pub mod response;
pub mod ui;

use ui::UiFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ui(UiFile),
    List,
    File,
    Image,
    Save,
    Upload,
    Delete,
}

impl Route {
    /// paths match case-insensitively, query strings are not part of `path`
    pub fn resolve(path: &str) -> Option<Self> {
        match path.to_ascii_lowercase().as_str() {
            "/" => Some(Self::Ui(UiFile::Index)),
            "/styles.css" => Some(Self::Ui(UiFile::Styles)),
            "/app.js" => Some(Self::Ui(UiFile::Script)),
            "/list" => Some(Self::List),
            "/file" => Some(Self::File),
            "/image" => Some(Self::Image),
            "/save" => Some(Self::Save),
            "/upload" => Some(Self::Upload),
            "/delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::Save | Self::Upload => Method::Post,
            Self::Delete => Method::Delete,
            _ => Method::Get,
        }
    }
}

fn parse_url(raw_url: &str) -> anyhow::Result<Url> {
    Ok(Url::parse("http://localhost")?.join(raw_url)?)
}

fn get_query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn read_json<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = Vec::new();
    request.as_reader().read_to_end(&mut body)?;

    serde_json::from_slice(&body).map_err(ApiError::invalid_body)
}

fn dispatch(request: &mut Request, ctx: &ServerContext) -> Result<ApiResponse, ApiError> {
    if *request.method() == Method::Options {
        return Ok(ApiResponse::Preflight);
    }

    let url = parse_url(request.url())?;
    let route = Route::resolve(url.path()).ok_or(ApiError::RouteNotFound)?;
    if *request.method() != route.method() {
        return Err(ApiError::MethodNotAllowed);
    }

    match route {
        Route::Ui(ui_file) => ui::serve(ctx, ui_file),
        Route::List => posts::list(ctx),
        Route::File => posts::file(ctx, get_query_param(&url, "path")),
        Route::Image => assets::image(ctx, get_query_param(&url, "path")),
        Route::Save => posts::save(ctx, read_json(request)?),
        Route::Upload => assets::upload(ctx, read_json(request)?),
        Route::Delete => posts::delete(ctx, read_json(request)?),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// a panicking handler becomes an internal error, so it still gets a json body and cors
fn run_guarded<F>(handler: F) -> Result<ApiResponse, ApiError>
where
    F: FnOnce() -> Result<ApiResponse, ApiError>,
{
    panic::catch_unwind(AssertUnwindSafe(handler)).unwrap_or_else(|payload| {
        Err(ApiError::Internal(anyhow!(
            "handler panicked: {}",
            panic_message(payload.as_ref())
        )))
    })
}

/// runs one request to completion. `respond` consumes the request, so the connection
/// is answered exactly once whichever way the handler ends.
pub fn handle_request(mut request: Request, ctx: &ServerContext) {
    let started_at = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_string();

    let outcome = run_guarded(|| dispatch(&mut request, ctx)).and_then(|res| {
        let status = res.status_code();
        Ok((status, res.into_http()?))
    });
    let (status, response) = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.status_code() >= 500 {
                error!("{} {} failed: {:#}", method, url, err);
            }
            (err.status_code(), err.to_http())
        }
    };

    if let Err(err) = request.respond(response) {
        warn!("{} {}: could not write response: {}", method, url, err);
    }

    info!(
        "{} {} {} ({}ms)",
        method,
        url,
        status,
        started_at.elapsed().as_millis()
    );
}
