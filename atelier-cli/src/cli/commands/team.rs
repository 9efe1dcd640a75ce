//! Team commands: members and interns share the same shape and flows,
//! differing only in the target collection and the specialty field.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::*;

use super::{apply_set_args, confirm, created_id, submit_operation};
use crate::api::Operation;
use crate::cli::CliContext;
use crate::form::validate;
use crate::list::{CategoryFilter, Collection};
use crate::records::{Person, PersonKind};
use crate::submit;

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List team members or interns
    List {
        #[arg(long, value_enum, default_value = "member")]
        kind: PersonKind,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a person
    Add {
        #[arg(long, value_enum, default_value = "member")]
        kind: PersonKind,
        /// Field assignments, e.g. name="Priya" role="Architect"
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        /// Portrait image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Update an existing person
    Update {
        id: String,
        #[arg(long, value_enum, default_value = "member")]
        kind: PersonKind,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Remove a person
    Delete {
        id: String,
        #[arg(long, value_enum, default_value = "member")]
        kind: PersonKind,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(ctx: &CliContext, command: TeamCommands) -> Result<()> {
    match command {
        TeamCommands::List { kind, search } => list(ctx, kind, &search).await,
        TeamCommands::Add { kind, sets, image } => add(ctx, kind, sets, image).await,
        TeamCommands::Update {
            id,
            kind,
            sets,
            image,
        } => update(ctx, id, kind, sets, image).await,
        TeamCommands::Delete { id, kind, yes } => delete(ctx, id, kind, yes).await,
    }
}

async fn list(ctx: &CliContext, kind: PersonKind, search: &str) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Person>(kind.resource()).await?);

    let view = collection.filter_view(search, &CategoryFilter::All);
    if view.is_empty() {
        println!("No matching {}s.", kind.label());
        return Ok(());
    }
    for person in view {
        println!(
            "{}  {}  {}",
            person.id.dimmed(),
            person.name.bold(),
            person.role.cyan()
        );
    }
    Ok(())
}

async fn add(
    ctx: &CliContext,
    kind: PersonKind,
    sets: Vec<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    let mut form = Person::create_form(kind);
    apply_set_args(&mut form, &sets)?;
    validate(&Person::SCHEMA, &form, false).map_err(|err| anyhow!("{err}"))?;

    let portrait = match &image {
        Some(path) => Some(ctx.staging.stage(path).await?),
        None => None,
    };

    let body = submit::person_body(&form, portrait);
    let value = submit_operation(ctx, Operation::create(kind.resource(), body)).await?;
    println!(
        "{} {} {}",
        "Added".green().bold(),
        kind.label(),
        created_id(&value)
    );
    ctx.controller.reset();
    Ok(())
}

async fn update(
    ctx: &CliContext,
    id: String,
    kind: PersonKind,
    sets: Vec<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    if sets.is_empty() && image.is_none() {
        anyhow::bail!("nothing to update; pass --set or --image");
    }

    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Person>(kind.resource()).await?);
    let person = collection
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("no {} with id {id}", kind.label()))?;

    let mut form = person.edit_form(kind);
    apply_set_args(&mut form, &sets)?;

    let portrait = match &image {
        Some(path) => Some(ctx.staging.stage(path).await?),
        None => None,
    };

    let body = submit::person_body(&form, portrait);
    submit_operation(ctx, Operation::update(kind.resource(), &id, body)).await?;
    println!("{} {} {id}", "Updated".green().bold(), kind.label());
    ctx.controller.reset();
    Ok(())
}

async fn delete(ctx: &CliContext, id: String, kind: PersonKind, yes: bool) -> Result<()> {
    if !confirm(&format!("Remove {} {id}?", kind.label()), yes)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }
    submit_operation(ctx, Operation::delete(kind.resource(), &id)).await?;
    println!("{} {} {id}", "Removed".green().bold(), kind.label());
    ctx.controller.reset();
    Ok(())
}
