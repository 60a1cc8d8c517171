use anyhow::{Result, anyhow};

const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Configuration loaded from environment variables
#[derive(Debug)]
pub struct Config {
    pub api_base_url: String,
    pub access_token: String,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    let access_token = std::env::var("SPOTIFY_ACCESS_TOKEN")
        .map_err(|_| anyhow!("SPOTIFY_ACCESS_TOKEN is not set"))?;
    let api_base_url = std::env::var("SPOTIFY_API_BASE_URL")
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    Ok(Config {
        api_base_url,
        access_token,
    })
}

/// Parse a requested playlist length, rejecting zero and non-numbers
pub fn parse_sample_size(input: &str) -> Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(0) => Err("sample size must be a positive number".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid sample size '{input}': {e}")),
    }
}

/// Split a comma-separated artist list, trimming whitespace and dropping blanks
pub fn parse_artist_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
