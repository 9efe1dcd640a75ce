//! Film commands. A film is added by pasting a watch URL; only
//! allow-listed providers are accepted and the embed URL is derived, so
//! arbitrary markup never reaches the site.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use colored::*;
use serde_json::json;

use super::{confirm, created_id, submit_operation};
use crate::api::{Operation, RequestBody, Resource};
use crate::cli::CliContext;
use crate::list::{CategoryFilter, Collection};
use crate::records::{Video, VideoSource};

#[derive(Subcommand)]
pub enum FilmCommands {
    /// List films, optionally filtered by search text and category
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a film from a YouTube or Vimeo watch URL
    Add {
        url: String,
        #[arg(long, default_value = "")]
        category: String,
        /// Film date as YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a film
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(ctx: &CliContext, command: FilmCommands) -> Result<()> {
    match command {
        FilmCommands::List { search, category } => list(ctx, &search, category).await,
        FilmCommands::Add {
            url,
            category,
            date,
        } => add(ctx, &url, category, date.as_deref()).await,
        FilmCommands::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

async fn list(ctx: &CliContext, search: &str, category: Option<String>) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Video>(Resource::Videos).await?);

    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
    let view = collection.filter_view(search, &filter);
    if view.is_empty() {
        println!("{}", "No matching films.".yellow());
        return Ok(());
    }
    for video in view {
        println!(
            "{}  {}  {}",
            video.id.dimmed(),
            video.source.embed_url().bold(),
            video.category.cyan()
        );
    }
    Ok(())
}

/// The film's date at day precision, today when not given.
fn film_date(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(text) => {
            let day = chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .map_err(|_| anyhow!("date must be YYYY-MM-DD, got '{text}'"))?;
            Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
        }
        None => Ok(Utc::now()),
    }
}

async fn add(ctx: &CliContext, url: &str, category: String, date: Option<&str>) -> Result<()> {
    let source = VideoSource::parse(url)?;
    let date = film_date(date)?;

    let body = RequestBody::Json(json!({
        "source": &source,
        "category": category,
        "date": date,
    }));
    let value = submit_operation(ctx, Operation::create(Resource::Videos, body)).await?;
    println!(
        "{} film {} ({})",
        "Added".green().bold(),
        created_id(&value),
        source.embed_url().dimmed()
    );
    ctx.controller.reset();
    Ok(())
}

async fn delete(ctx: &CliContext, id: String, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete film {id}?"), yes)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }
    submit_operation(ctx, Operation::delete(Resource::Videos, &id)).await?;
    println!("{} film {id}", "Deleted".green().bold());
    ctx.controller.reset();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_date_accepts_a_backdated_day() {
        let date = film_date(Some("2024-06-01")).unwrap();
        assert_eq!(date.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn film_date_rejects_other_formats() {
        assert!(film_date(Some("01/06/2024")).is_err());
        assert!(film_date(Some("soon")).is_err());
        assert!(film_date(Some("")).is_err());
    }

    #[test]
    fn film_date_defaults_to_now() {
        let before = Utc::now();
        let date = film_date(None).unwrap();
        assert!(date >= before);
    }
}
