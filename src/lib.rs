// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod persist;
pub mod types;
pub mod view;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::{CliArgs, CliCommand, ViewArg};
use crate::config::ConfigFile;
use crate::engine::{Command, NodeAttributes, RenderedView, Session};
use crate::errors::TechdagError;
use crate::graph::Node;
use crate::layout::{Extent, container_size};
use crate::persist::{FileImageStore, ImageStore, JsonFileStore};
use crate::types::ViewKind;
use crate::view::{Clock, SystemClock, ViewContext};

/// Nominal rendered extent of one node, used for container sizing in the
/// textual output (the original read this off the DOM per element).
const NODE_EXTENT: Extent = Extent::new(100.0, 120.0);

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the persisted graph session
/// - the image store (for `add --image-file`)
/// - one CLI command dispatched against the session
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load_or_default(args.config.as_deref().map(Path::new))?;

    let data_path = args.data.clone().unwrap_or_else(|| cfg.data.path.clone());
    info!(data = %data_path, "opening graph");

    let mut session = Session::load(JsonFileStore::new(&data_path)).await?;

    let command = args.command.unwrap_or(CliCommand::Show {
        view: ViewArg::TechTree,
        job_mode: false,
    });

    match command {
        CliCommand::Show { view, job_mode } => {
            let view = ViewKind::from(view);
            let ctx = ViewContext {
                job_mode: job_mode || cfg.view.job_mode,
                moment: SystemClock.now(),
            };
            let rendered = session.render(view, &ctx, &cfg.layout_options())?;
            print_view(&rendered, &cfg);
        }

        CliCommand::Add {
            id,
            name,
            image,
            image_file,
        } => {
            let image = match image_file {
                Some(path) => {
                    let bytes = tokio::fs::read(&path).await?;
                    let original_name = Path::new(&path)
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("upload")
                        .to_string();
                    let mut images = FileImageStore::new(&cfg.data.images_dir);
                    images.store(bytes, original_name).await?
                }
                None => image,
            };

            let id = id.unwrap_or_else(generate_node_id);
            let mut node = Node::new(id.clone(), image);
            node.name = name;
            session.dispatch(Command::AddNode(node)).await?;
            println!("added node {id}");
        }

        CliCommand::Remove { id } => {
            session.dispatch(Command::DeleteNode { id: id.clone() }).await?;
            println!("removed node {id}");
        }

        CliCommand::Link { source, target } => {
            session
                .dispatch(Command::AddDependency {
                    source_id: source.clone(),
                    target_id: target.clone(),
                })
                .await?;
            println!("linked: {target} now depends on {source}");
        }

        CliCommand::Unlink { source, target } => {
            session
                .dispatch(Command::RemoveDependency {
                    source_id: source.clone(),
                    target_id: target.clone(),
                })
                .await?;
            println!("unlinked: {target} no longer depends on {source}");
        }

        CliCommand::Set {
            id,
            name,
            description,
            image,
            done,
            waiting,
            hidden,
            job,
        } => {
            let node = session
                .store()
                .get(&id)
                .ok_or_else(|| TechdagError::NodeNotFound(id.clone()))?;

            let mut attrs = NodeAttributes::from_node(node);
            if let Some(v) = name {
                attrs.name = v;
            }
            if let Some(v) = description {
                attrs.description = v;
            }
            if let Some(v) = image {
                attrs.image = v;
            }
            if let Some(v) = done {
                attrs.done = v;
            }
            if let Some(v) = waiting {
                attrs.waiting = v;
            }
            if let Some(v) = hidden {
                attrs.hidden = v;
            }
            if let Some(v) = job {
                attrs.job = v;
            }

            session
                .dispatch(Command::UpdateAttributes {
                    id: id.clone(),
                    attrs,
                })
                .await?;
            println!("updated node {id}");
        }
    }

    Ok(())
}

/// Time-based id in the original's format (`node<unix millis>`).
fn generate_node_id() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("node{millis}")
}

/// Textual rendering of one view: tree views grouped by level with
/// positions, list views flat.
fn print_view(rendered: &RenderedView, cfg: &ConfigFile) {
    println!(
        "techdag view: {:?} ({} nodes)",
        rendered.view,
        rendered.nodes.len()
    );

    if rendered.view.is_tree() {
        let mut by_level: BTreeMap<u32, Vec<&Node>> = BTreeMap::new();
        for node in &rendered.nodes {
            if let Some(&level) = rendered.levels.get(&node.id) {
                by_level.entry(level).or_default().push(node);
            }
        }

        for (level, nodes) in by_level {
            println!("  level {level}:");
            for node in nodes {
                let flags = state_flags(node);
                match rendered.positions.get(&node.id) {
                    Some(p) => println!(
                        "    - {} {:?} x={:.0} y={:.0}{}",
                        node.id, node.name, p.x, p.y, flags
                    ),
                    None => println!("    - {} {:?}{}", node.id, node.name, flags),
                }
            }
        }

        let size = container_size(
            &rendered.positions,
            NODE_EXTENT,
            cfg.viewport(),
            cfg.layout.padding,
        );
        println!("  container: {:.0} x {:.0}", size.width, size.height);
    } else {
        for node in &rendered.nodes {
            println!("  - {} {:?}{}", node.id, node.name, state_flags(node));
        }
    }
}

fn state_flags(node: &Node) -> String {
    let mut flags = String::new();
    if node.done {
        flags.push_str(" [done]");
    }
    if node.waiting {
        flags.push_str(" [waiting]");
    }
    if node.hidden {
        flags.push_str(" [hidden]");
    }
    if node.job {
        flags.push_str(" [job]");
    }
    flags
}
