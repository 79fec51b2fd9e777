use std::{
    io,
    net::SocketAddr,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use anyhow::anyhow;
use tiny_http::{Request, Server};
use tokio::{
    sync::mpsc,
    task::{JoinHandle, JoinSet},
    time::timeout,
};
use tracing::{debug, error, info, warn};

use crate::{api, config::CliConfig, constants};

/// the two content roots plus the editor ui, fixed for the lifetime of a server
#[derive(Debug, Clone)]
pub struct ServerContext {
    pub blog_root: PathBuf,
    pub assets_root: PathBuf,
    pub ui_root: PathBuf,
}

impl ServerContext {
    pub fn from_config(config: &CliConfig) -> io::Result<Self> {
        let ctx = Self {
            blog_root: config.get_blog_dir()?,
            assets_root: config.get_assets_dir()?,
            ui_root: config.get_ui_dir()?,
        };

        if config.get_blog_path().trim().is_empty() {
            warn!("blog path is not configured, the post list will be empty");
        }
        if config.get_assets_path().trim().is_empty() {
            warn!("assets path is not configured, assets resolve against the working directory");
        }

        Ok(ctx)
    }
}

pub struct ApiServer {
    local_addr: SocketAddr,
    stopping: Arc<AtomicBool>,
    dispatcher: JoinHandle<()>,
}

impl ApiServer {
    /// binds `addr` and starts accepting right away. must be called inside a tokio runtime.
    pub fn start(addr: SocketAddr, ctx: ServerContext) -> anyhow::Result<Self> {
        let http = Server::http(addr).map_err(|err| anyhow!("could not bind {}: {}", addr, err))?;
        let local_addr = http
            .server_addr()
            .to_ip()
            .ok_or_else(|| anyhow!("server is not listening on an ip address"))?;

        let stopping = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::unbounded_channel();

        let accept_stopping = stopping.clone();
        thread::Builder::new()
            .name("sbe-accept".to_string())
            .spawn(move || accept_loop(http, tx, accept_stopping))?;

        let dispatcher = tokio::spawn(dispatch_loop(rx, Arc::new(ctx)));
        info!("listening on {}", local_addr);

        Ok(Self {
            local_addr,
            stopping,
            dispatcher,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// stops accepting, then waits up to `grace` for in-flight requests. handlers still
    /// running after that are left to finish on their own, nothing is aborted.
    pub async fn stop(self, grace: Duration) {
        self.stopping.store(true, Ordering::SeqCst);

        match timeout(grace, self.dispatcher).await {
            Ok(Ok(())) => info!("server stopped"),
            Ok(Err(err)) => error!("dispatcher ended abnormally: {}", err),
            Err(_) => warn!(
                "requests still running after {}ms, not waiting any longer",
                grace.as_millis()
            ),
        }
    }
}

/// blocking side: tiny_http hands out parsed requests, they are forwarded to the
/// dispatcher. dropping `http` on exit closes the listening socket.
fn accept_loop(http: Server, tx: mpsc::UnboundedSender<Request>, stopping: Arc<AtomicBool>) {
    while !stopping.load(Ordering::SeqCst) {
        match http.recv_timeout(constants::ACCEPT_POLL_INTERVAL) {
            Ok(Some(request)) => {
                if tx.send(request).is_err() {
                    break;
                }
            }
            Ok(None) => continue,
            Err(err) => warn!("accept failed: {}", err),
        }
    }

    // listener goes before the sender so the dispatcher only finishes once nothing new can arrive
    drop(http);
    drop(tx);
    debug!("accept loop finished");
}

/// every request runs as its own task in `handlers`; a panic stays inside that task.
/// returns once the accept loop is gone and all handlers are done.
async fn dispatch_loop(mut rx: mpsc::UnboundedReceiver<Request>, ctx: Arc<ServerContext>) {
    let mut handlers = JoinSet::new();

    loop {
        tokio::select! {
            request = rx.recv() => match request {
                Some(request) => {
                    let ctx = ctx.clone();
                    handlers.spawn_blocking(move || api::handle_request(request, &ctx));
                }
                None => break,
            },
            Some(joined) = handlers.join_next() => log_handler_exit(joined),
        }
    }

    if !handlers.is_empty() {
        debug!("waiting for {} in-flight requests", handlers.len());
    }
    while let Some(joined) = handlers.join_next().await {
        log_handler_exit(joined);
    }
}

fn log_handler_exit(joined: Result<(), tokio::task::JoinError>) {
    if let Err(err) = joined {
        if err.is_panic() {
            error!("request handler panicked: {}", err);
        }
    }
}
