//! Dashboard: record counts fetched concurrently.

use anyhow::Result;
use colored::*;

use crate::api::Resource;
use crate::cli::CliContext;
use crate::records::{Event, Opening, Project, Video};

pub async fn handle(ctx: &CliContext) -> Result<()> {
    let session = ctx.client.session();
    if let Some(name) = session.display_name.as_deref() {
        println!("Welcome back, {}", name.bold());
        println!();
    }

    let (projects, events, openings, videos) = futures::try_join!(
        ctx.client.fetch_list::<Project>(Resource::Projects),
        ctx.client.fetch_list::<Event>(Resource::Events),
        ctx.client.fetch_list::<Opening>(Resource::Careers),
        ctx.client.fetch_list::<Video>(Resource::Videos),
    )?;

    let open = openings.iter().filter(|o| o.is_open).count();
    println!("{:>4}  projects", projects.len().to_string().bold());
    println!("{:>4}  events", events.len().to_string().bold());
    println!(
        "{:>4}  career openings ({} {})",
        openings.len().to_string().bold(),
        open,
        "open".green()
    );
    println!("{:>4}  films", videos.len().to_string().bold());
    Ok(())
}
