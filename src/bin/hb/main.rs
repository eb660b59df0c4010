use std::io;

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use hourbook::commands::Arguments;
use hourbook::config::load_config;
use hourbook::records;

mod menu;

fn main() -> Result<()> {
    dotenv().ok();
    let args = Arguments::parse();

    stderrlog::new()
        .quiet(args.quiet)
        .verbosity(args.verbose as usize + 2)
        .init()?;

    let config = load_config(args.config);
    let mut conn = records::establish_connection(&config.database_path)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    menu::run(&mut conn, &mut input, &mut output)?;
    Ok(())
}
