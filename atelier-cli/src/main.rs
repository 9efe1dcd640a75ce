mod api;
mod cli;
mod config;
mod form;
mod list;
mod media;
mod records;
mod submit;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    cli::run().await
}
