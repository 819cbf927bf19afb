use crate::config::Config;
use crate::router::handle;
use crate::state::{build_runtime, build_store, AppState};
use astra::{Request, Server};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod fetcher;
mod responses;
mod router;
mod state;
mod store;
mod templates;
mod views;

#[cfg(test)]
mod tests;

fn main() {
    // .env is optional; real environment variables win.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match build_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "listing store initialization failed");
            std::process::exit(1);
        }
    };

    let runtime = match build_runtime() {
        Ok(rt) => Arc::new(rt),
        Err(e) => {
            error!(error = %e, "could not start async runtime");
            std::process::exit(1);
        }
    };

    let state = AppState::new(
        store,
        runtime,
        config.home_section_limit,
        config.category_page_limit,
    );

    info!(addr = %config.bind_addr, store = config.store.kind(), "starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req: Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => responses::html_error_response(err),
        };
        info!(%method, %path, status = resp.status().as_u16(), "handled request");
        resp
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down cleanly");
}
