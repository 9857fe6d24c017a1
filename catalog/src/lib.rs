// Cocktail catalog
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! REST service that manages a catalog of cocktails, their ingredients, and the users that
//! create, rate and collect them.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use cocktails_core::db::Db;
use cocktails_core::env::get_optional_var;
use log::{error, info};
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod db;
pub use db::init_schema;
mod driver;
use driver::Driver;
mod model;
mod rest;
use rest::app;

/// Default port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Options to configure the network endpoint of the service.
#[derive(Debug, PartialEq)]
pub struct ServiceOptions {
    /// Address to bind to.
    pub host: IpAddr,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self { host: IpAddr::V4(Ipv4Addr::LOCALHOST), port: DEFAULT_PORT }
    }
}

impl ServiceOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_HOST` and `<prefix>_PORT`, all of which are
    /// optional.
    pub fn from_env(prefix: &str) -> Result<ServiceOptions, String> {
        let defaults = ServiceOptions::default();
        Ok(ServiceOptions {
            host: get_optional_var::<IpAddr>(prefix, "HOST")?.unwrap_or(defaults.host),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
        })
    }

    /// Returns the socket address described by these options.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Instantiates all resources to serve the application on `bind_addr` backed by `db`.
///
/// The server runs until it receives a Ctrl+C signal, at which point it stops accepting new
/// connections and waits for in-flight requests to complete.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db);
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to wait for Ctrl+C: {}", e);
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
