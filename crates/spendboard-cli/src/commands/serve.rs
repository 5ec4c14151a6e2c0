//! Server command implementation

use std::path::PathBuf;

use anyhow::Result;
use spendboard_server::ServerConfig;

use super::{build_table, Inputs};

pub async fn cmd_serve(
    inputs: &Inputs,
    host: &str,
    port: u16,
    static_dir: Option<PathBuf>,
    snapshot: Option<PathBuf>,
) -> Result<()> {
    println!("🚀 Starting Spendboard dashboard...");
    if let Some(source) = &inputs.source {
        println!("   Source: {}", source);
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = &static_dir {
        println!("   Static files: {}", dir.display());
    }

    // The table must be complete before the listener binds
    let table = build_table(inputs, snapshot).await?;

    let config = ServerConfig { static_dir };
    spendboard_server::serve_with_config(table, host, port, config).await
}
