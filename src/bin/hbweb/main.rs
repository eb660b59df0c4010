use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use hourbook::commands::Arguments;
use hourbook::config::load_config;
use hourbook::{records, web};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Arguments::parse();

    stderrlog::new()
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 2)
        .init()?;

    let config = load_config(args.config);
    let conn = records::establish_connection(&config.database_path)?;

    let state = Arc::new(web::AppState::new(conn));
    web::serve(&config.listen_addr, state).await
}
