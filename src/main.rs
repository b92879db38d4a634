use crate::config::Config;
use crate::listing::HttpTransport;
use crate::responses::error_to_response;
use crate::router::{handle, App};
use anyhow::Context;
use astra::Server;
use log::LevelFilter;
use std::sync::Arc;

mod config;
mod errors;
mod listing;
mod responses;
mod router;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win.
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("reqwest", LevelFilter::Info)
        .filter_module("hyper", LevelFilter::Warn)
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    match config.listing.endpoint.as_deref() {
        Some(endpoint) => log::info!("listings endpoint: {endpoint}"),
        None => log::warn!(
            "{} is not set; listing requests will fail until it is configured",
            config::ENDPOINT_VAR
        ),
    }

    let transport =
        HttpTransport::new(config.listing.timeout).context("failed to build HTTP client")?;
    let app = App::new(config.listing, Arc::new(transport));

    let addr = config.server.bind_addr;
    log::info!("Starting server at http://{addr}");

    let server = Server::bind(addr).max_workers(config.server.max_workers);

    server
        .serve(move |req, _info| match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        })
        .context("server ended with error")?;

    log::info!("Server shut down cleanly.");
    Ok(())
}
