use anyhow::Result;
use clap::Parser;

mod client;
mod config;
mod error;
mod models;
mod pool;
mod prompt;
mod publish;
mod session;


use crate::client::SpotifyClient;
use crate::config::{load_config, parse_artist_list, parse_sample_size};
use crate::pool::{TrackPoolBuilder, WeightSynthesizer};
use crate::prompt::Prompter;
use crate::session::{Session, SessionOptions};

#[derive(Parser)]
#[command(name = "artist-mix")]
#[command(about = "Build a weighted playlist from a set of Spotify artists")]
#[command(version)]
struct Args {
    /// Comma-separated artist names (prompted for when omitted)
    #[arg(short = 'a', long = "artists")]
    artists: Option<String>,

    /// Include albums whose name mentions "instrumental" (prompted for when omitted)
    #[arg(short = 'i', long = "include-instrumental")]
    include_instrumental: Option<bool>,

    /// Number of tracks to pick (prompted for when omitted)
    #[arg(short = 'n', long = "size", value_parser = parse_sample_size)]
    size: Option<usize>,

    /// Enable debug mode - print the selection instead of uploading
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load configuration from .env
    let config = load_config()?;
    let client = SpotifyClient::new(config);

    let options = SessionOptions {
        artists: args.artists.as_deref().map(parse_artist_list),
        include_instrumental: args.include_instrumental,
        sample_size: args.size,
        debug: args.debug,
    };
    let builder = TrackPoolBuilder::new(WeightSynthesizer::default());

    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let mut session = Session::new(&client, &client, prompter, builder, options);

    session.run()?;
    Ok(())
}
