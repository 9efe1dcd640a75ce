//! Event commands.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::*;

use super::{apply_set_args, confirm, created_id, submit_operation};
use crate::api::{Operation, Resource};
use crate::cli::CliContext;
use crate::form::{validate, FormModel};
use crate::list::{CategoryFilter, Collection};
use crate::records::{Event, EVENT_CATEGORIES};
use crate::submit;

#[derive(Subcommand)]
pub enum EventCommands {
    /// List events, optionally filtered by search text
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Create an event
    Create {
        /// Field assignments, e.g. title="Earth Day Build" or date=2026-04-22
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        /// Category selections (repeatable, from the fixed set)
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        main_image: Option<PathBuf>,
        #[arg(long = "gallery")]
        gallery: Vec<PathBuf>,
    },
    /// Update an existing event
    Update {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        /// Toggle a category selection (repeatable)
        #[arg(long = "toggle-category")]
        toggled: Vec<String>,
        #[arg(long)]
        main_image: Option<PathBuf>,
        #[arg(long = "gallery")]
        gallery: Vec<PathBuf>,
    },
    /// Delete an event
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(ctx: &CliContext, command: EventCommands) -> Result<()> {
    match command {
        EventCommands::List { search } => list(ctx, &search).await,
        EventCommands::Create {
            sets,
            categories,
            main_image,
            gallery,
        } => create(ctx, sets, categories, main_image, gallery).await,
        EventCommands::Update {
            id,
            sets,
            toggled,
            main_image,
            gallery,
        } => update(ctx, id, sets, toggled, main_image, gallery).await,
        EventCommands::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

fn check_category(name: &str) -> Result<()> {
    if EVENT_CATEGORIES.contains(&name) {
        Ok(())
    } else {
        Err(anyhow!(
            "unknown category '{name}'; expected one of: {}",
            EVENT_CATEGORIES.join(", ")
        ))
    }
}

fn check_date(form: &FormModel) -> Result<()> {
    if let Some(crate::form::FieldValue::Text(date)) = form.get("date") {
        chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| anyhow!("date must be YYYY-MM-DD, got '{date}'"))?;
    }
    Ok(())
}

async fn list(ctx: &CliContext, search: &str) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Event>(Resource::Events).await?);

    let view = collection.filter_view(search, &CategoryFilter::All);
    if view.is_empty() {
        println!("{}", "No matching events.".yellow());
        return Ok(());
    }
    for event in view {
        println!(
            "{}  {}  {} [{}]",
            event.id.dimmed(),
            event.title.bold(),
            event.date.format("%Y-%m-%d").to_string().cyan(),
            event.categories.join(", ").dimmed()
        );
    }
    Ok(())
}

async fn create(
    ctx: &CliContext,
    sets: Vec<String>,
    categories: Vec<String>,
    main_image: Option<PathBuf>,
    gallery: Vec<PathBuf>,
) -> Result<()> {
    let mut form = Event::create_form();
    apply_set_args(&mut form, &sets)?;
    for category in &categories {
        check_category(category)?;
        form.toggle_list_member("categories", category)?;
    }
    validate(&Event::SCHEMA, &form, false).map_err(|err| anyhow!("{err}"))?;
    check_date(&form)?;

    let main = match &main_image {
        Some(path) => Some(ctx.staging.stage(path).await?),
        None => None,
    };
    let gallery_files = ctx.controller.stage_gallery(&ctx.staging, &gallery).await?;

    let body = submit::multipart_body(&form, main, gallery_files);
    let value = submit_operation(ctx, Operation::create(Resource::Events, body)).await?;
    println!("{} event {}", "Created".green().bold(), created_id(&value));
    ctx.controller.reset();
    Ok(())
}

async fn update(
    ctx: &CliContext,
    id: String,
    sets: Vec<String>,
    toggled: Vec<String>,
    main_image: Option<PathBuf>,
    gallery: Vec<PathBuf>,
) -> Result<()> {
    if sets.is_empty() && toggled.is_empty() && main_image.is_none() && gallery.is_empty() {
        anyhow::bail!("nothing to update");
    }

    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Event>(Resource::Events).await?);
    let event = collection
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("no event with id {id}"))?;

    let mut form = event.edit_form();
    apply_set_args(&mut form, &sets)?;
    for category in &toggled {
        check_category(category)?;
        form.toggle_list_member("categories", category)?;
    }
    check_date(&form)?;

    let main = match &main_image {
        Some(path) => Some(ctx.staging.stage(path).await?),
        None => None,
    };
    let gallery_files = if gallery.is_empty() {
        Vec::new()
    } else {
        ctx.controller.stage_gallery(&ctx.staging, &gallery).await?
    };

    let body = submit::multipart_body(&form, main, gallery_files);
    submit_operation(ctx, Operation::update(Resource::Events, &id, body)).await?;
    println!("{} event {id}", "Updated".green().bold());
    ctx.controller.reset();
    Ok(())
}

async fn delete(ctx: &CliContext, id: String, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete event {id}?"), yes)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }
    submit_operation(ctx, Operation::delete(Resource::Events, &id)).await?;
    println!("{} event {id}", "Deleted".green().bold());
    ctx.controller.reset();
    Ok(())
}
