use std::path::PathBuf;

use clap::Parser;

/// Subject tutor: a browser chat that answers questions on one topic.
#[derive(Parser, Debug)]
#[command(name = "tutor", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides `server.host`).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log filter directive override (e.g. `tutor=debug`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
