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

//! Entry point to the cocktail catalog service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use cocktails_catalog::{ServiceOptions, init_schema, serve};
use cocktails_core::db::{Db, SqliteDb, SqliteOptions};
use log::error;
use std::error::Error;
use std::process;
use std::sync::Arc;

/// Connects to the database, prepares its schema and serves requests until interrupted.
async fn run() -> Result<(), Box<dyn Error>> {
    let service_opts = ServiceOptions::from_env("CATALOG")?;
    let db_opts = SqliteOptions::from_env("SQLITE")?;

    let db = Arc::new(SqliteDb::connect(db_opts).await?);
    let mut ex = db.ex().await?;
    init_schema(&mut ex).await?;
    drop(ex);

    let result = serve(service_opts.addr(), db.clone()).await;
    db.close().await;
    result
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}
