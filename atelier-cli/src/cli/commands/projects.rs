//! Project commands: the full create/edit flow with media staging.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Subcommand;
use colored::*;

use super::{apply_set_args, confirm, created_id, submit_operation};
use crate::api::{Operation, Resource};
use crate::cli::CliContext;
use crate::form::validate;
use crate::list::{CategoryFilter, Collection};
use crate::records::Project;
use crate::submit;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects, optionally filtered by search text and category
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<String>,
    },
    /// Create a project from field assignments and image files
    Create {
        /// Field assignments, e.g. title="Hillside House" or area.value=2400
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        /// Key feature entries (repeatable)
        #[arg(long = "feature")]
        features: Vec<String>,
        /// Material entries (repeatable)
        #[arg(long = "material")]
        materials: Vec<String>,
        /// Primary image file
        #[arg(long)]
        main_image: PathBuf,
        /// Gallery image files (repeatable)
        #[arg(long = "gallery")]
        gallery: Vec<PathBuf>,
    },
    /// Update fields or images of an existing project
    Update {
        id: String,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
        #[arg(long)]
        main_image: Option<PathBuf>,
        #[arg(long = "gallery")]
        gallery: Vec<PathBuf>,
    },
    /// Delete a project
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn handle(ctx: &CliContext, command: ProjectCommands) -> Result<()> {
    match command {
        ProjectCommands::List { search, category } => list(ctx, &search, category).await,
        ProjectCommands::Create {
            sets,
            features,
            materials,
            main_image,
            gallery,
        } => create(ctx, sets, features, materials, main_image, gallery).await,
        ProjectCommands::Update {
            id,
            sets,
            main_image,
            gallery,
        } => update(ctx, id, sets, main_image, gallery).await,
        ProjectCommands::Delete { id, yes } => delete(ctx, id, yes).await,
    }
}

async fn list(ctx: &CliContext, search: &str, category: Option<String>) -> Result<()> {
    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Project>(Resource::Projects).await?);

    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Only);
    let view = collection.filter_view(search, &filter);
    if view.is_empty() {
        println!("{}", "No matching projects.".yellow());
        return Ok(());
    }
    for project in view {
        println!(
            "{}  {}  {} {}",
            project.id.dimmed(),
            project.title.bold(),
            project.category.cyan(),
            project.year.to_string().dimmed()
        );
    }
    Ok(())
}

async fn create(
    ctx: &CliContext,
    sets: Vec<String>,
    features: Vec<String>,
    materials: Vec<String>,
    main_image: PathBuf,
    gallery: Vec<PathBuf>,
) -> Result<()> {
    let mut form = Project::create_form();
    apply_set_args(&mut form, &sets)?;
    if !features.is_empty() {
        let refs: Vec<&str> = features.iter().map(String::as_str).collect();
        form = form.with_entries("keyFeatures", &refs);
    }
    if !materials.is_empty() {
        let refs: Vec<&str> = materials.iter().map(String::as_str).collect();
        form = form.with_entries("materialsUsed", &refs);
    }
    validate(&Project::SCHEMA, &form, true).map_err(|err| anyhow!("{err}"))?;

    let main = ctx.staging.stage(&main_image).await?;
    let gallery_files = ctx.controller.stage_gallery(&ctx.staging, &gallery).await?;

    let body = submit::multipart_body(&form, Some(main), gallery_files);
    let value = submit_operation(ctx, Operation::create(Resource::Projects, body)).await?;
    println!("{} project {}", "Created".green().bold(), created_id(&value));
    ctx.controller.reset();
    Ok(())
}

async fn update(
    ctx: &CliContext,
    id: String,
    sets: Vec<String>,
    main_image: Option<PathBuf>,
    gallery: Vec<PathBuf>,
) -> Result<()> {
    if sets.is_empty() && main_image.is_none() && gallery.is_empty() {
        anyhow::bail!("nothing to update; pass --set, --main-image, or --gallery");
    }

    let mut collection = Collection::new();
    collection.refresh(ctx.client.fetch_list::<Project>(Resource::Projects).await?);
    let project = collection
        .get(&id)
        .cloned()
        .ok_or_else(|| anyhow!("no project with id {id}"))?;

    let mut form = project.edit_form();
    apply_set_args(&mut form, &sets)?;

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
    submit_operation(ctx, Operation::update(Resource::Projects, &id, body)).await?;
    println!("{} project {id}", "Updated".green().bold());
    ctx.controller.reset();
    Ok(())
}

async fn delete(ctx: &CliContext, id: String, yes: bool) -> Result<()> {
    if !confirm(&format!("Delete project {id}?"), yes)? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }
    submit_operation(ctx, Operation::delete(Resource::Projects, &id)).await?;
    println!("{} project {id}", "Deleted".green().bold());
    ctx.controller.reset();
    Ok(())
}
