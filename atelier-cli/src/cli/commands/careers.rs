//! Career opening commands. Openings carry no images, so create and
//! update send JSON bodies; toggle is its own endpoint and the list is
//! patched in place from its response.

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::*;

use super::{apply_set_args, confirm, created_id, submit_operation};
use crate::api::{Operation, RequestBody, Resource};
use crate::cli::CliContext;
use crate::form::validate;
use crate::list::{CategoryFilter, Collection};
use crate::records::Opening;

#[derive(Subcommand)]
pub enum CareerCommands {
    /// List openings, optionally filtered by search text and employment type
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        employment_type: Option<String>,
    },
    /// Create an opening
    Create {
        /// Field assignments, e.g. position="Site Architect"
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
    },
    /// Update an existing opening
    Update {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
    },
    /// Flip an opening between open and closed
    Toggle { id: String },
    /// Delete an opening
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(ctx: &CliContext, command: CareerCommands) -> Result<()> {
    match command {
        CareerCommands::List {
            search,
            employment_type,
        } => list(ctx, &search, employment_type).await,
        CareerCommands::Create { sets } => create(ctx, sets).await,
        CareerCommands::Update { id, sets } => update(ctx, id, sets).await,
        CareerCommands::Toggle { id } => toggle(ctx, id).await,
        CareerCommands::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

fn status_label(is_open: bool) -> ColoredString {
    if is_open {
        "open".green()
    } else {
        "closed".red()
    }
}

async fn list(ctx: &CliContext, search: &str, employment_type: Option<String>) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Opening>(Resource::Careers).await?);

    let filter = employment_type.map_or(CategoryFilter::All, CategoryFilter::Only);
    let view = collection.filter_view(search, &filter);
    if view.is_empty() {
        println!("{}", "No matching openings.".yellow());
        return Ok(());
    }
    for opening in view {
        println!(
            "{}  {}  {}  {}",
            opening.id.dimmed(),
            opening.position.bold(),
            opening.employment_type.cyan(),
            status_label(opening.is_open)
        );
    }
    Ok(())
}

async fn create(ctx: &CliContext, sets: Vec<String>) -> Result<()> {
    let mut form = Opening::create_form();
    apply_set_args(&mut form, &sets)?;
    validate(&Opening::SCHEMA, &form, false).map_err(|err| anyhow!("{err}"))?;

    let body = RequestBody::Json(form.to_json());
    let value = submit_operation(ctx, Operation::create(Resource::Careers, body)).await?;
    println!("{} opening {}", "Created".green().bold(), created_id(&value));
    ctx.controller.reset();
    Ok(())
}

async fn update(ctx: &CliContext, id: String, sets: Vec<String>) -> Result<()> {
    if sets.is_empty() {
        anyhow::bail!("nothing to update; pass --set");
    }

    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Opening>(Resource::Careers).await?);
    let opening = collection
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("no opening with id {id}"))?;

    let mut form = opening.edit_form();
    apply_set_args(&mut form, &sets)?;

    let body = RequestBody::Json(form.to_json());
    submit_operation(ctx, Operation::update(Resource::Careers, &id, body)).await?;
    println!("{} opening {id}", "Updated".green().bold());
    ctx.controller.reset();
    Ok(())
}

async fn toggle(ctx: &CliContext, id: String) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Opening>(Resource::Careers).await?);
    if collection.get(&id).is_none() {
        anyhow::bail!("no opening with id {id}");
    }

    let value = submit_operation(ctx, Operation::toggle_opening(&id)).await?;
    // The toggle response is the updated record; patch it into the list
    // instead of refetching.
    let updated: Opening = serde_json::from_value(value)
        .map_err(|err| anyhow!("unexpected toggle response: {err}"))?;
    collection.apply_local_update(updated.clone());

    println!(
        "{} is now {}",
        updated.position.bold(),
        status_label(updated.is_open)
    );
    let open = collection.records().iter().filter(|o| o.is_open).count();
    println!(
        "{} of {} openings accepting applications",
        open,
        collection.len()
    );
    ctx.controller.reset();
    Ok(())
}

async fn delete(ctx: &CliContext, id: String, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete opening {id}?"), yes)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }
    submit_operation(ctx, Operation::delete(Resource::Careers, &id)).await?;
    println!("{} opening {id}", "Deleted".green().bold());
    ctx.controller.reset();
    Ok(())
}
