//! Manifest preparation: turn a hand-written (or missing) manifest plus the
//! skills directory into the `skills.json` that gets served

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::loader::{scan_categories, scan_skill_paths};
use crate::catalog::{Manifest, RawNode};
use crate::config::Settings;
use crate::constants::catalog::{
    CATEGORY_ID_PREFIX, MANIFEST_FILE, OVERVIEW_FILE, ROOT_ID, SKILLS_URL_PREFIX, SKILL_ID_PREFIX,
};

/// Outcome of [`prepare_manifest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// Skills found on disk
    pub skill_count: usize,
    /// `true` when the tree was generated from the directory layout
    pub generated: bool,
    pub overview: bool,
}

fn humanize(dir_name: &str) -> String {
    dir_name.replace('-', " ")
}

/// Set `skillPath` on every `skill` node whose id (minus `skill-`) names a
/// scanned skill. Other nodes and unknown skills are left alone.
pub fn inject_skill_paths(tree: &mut RawNode, paths: &BTreeMap<String, String>) -> usize {
    let mut injected = 0;
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        if node.node_type.as_deref() == Some("skill") {
            let name = node.id.strip_prefix(SKILL_ID_PREFIX).unwrap_or(&node.id);
            if let Some(path) = paths.get(name) {
                node.skill_path = Some(path.clone());
                injected += 1;
            }
        }
        stack.extend(node.children.iter_mut());
    }

    injected
}

/// Build a manifest straight from the directory layout: one category per
/// directory that holds at least one skill.
pub fn generate_manifest(skills_dir: &Path, paths: &BTreeMap<String, String>) -> Result<Manifest> {
    let children = scan_categories(skills_dir)?
        .into_iter()
        .filter_map(|category| {
            let skills: Vec<RawNode> = category
                .skills
                .iter()
                .filter_map(|skill| {
                    Some(RawNode {
                        id: format!("{}{}", SKILL_ID_PREFIX, skill),
                        label: Some(humanize(skill)),
                        node_type: Some("skill".to_string()),
                        skill_path: Some(paths.get(skill)?.clone()),
                        ..Default::default()
                    })
                })
                .collect();

            (!skills.is_empty()).then(|| RawNode {
                id: format!("{}{}", CATEGORY_ID_PREFIX, category.name),
                label: Some(humanize(&category.name)),
                node_type: Some("category".to_string()),
                children: skills,
                ..Default::default()
            })
        })
        .collect();

    Ok(Manifest::with_tree(RawNode {
        id: ROOT_ID.to_string(),
        node_type: Some("root".to_string()),
        children,
        ..Default::default()
    }))
}

/// Read the hand-written manifest, keeping it only when it parses with a tree
fn read_manifest(manifest_path: &Path) -> Option<Manifest> {
    let text = fs::read_to_string(manifest_path).ok()?;
    match Manifest::parse(&text) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!(
                "Failed to parse {:?}, generating from skills directory: {}",
                manifest_path, e
            );
            None
        }
    }
}

/// Write `<public_dir>/skills.json` from `settings.manifest_path` and
/// `settings.skills_dir`
pub fn prepare_manifest(settings: &Settings) -> Result<Prepared> {
    let paths = scan_skill_paths(&settings.skills_dir)?;

    let (mut manifest, generated) = match read_manifest(&settings.manifest_path) {
        Some(mut manifest) => {
            inject_skill_paths(&mut manifest.tree, &paths);
            (manifest, false)
        }
        None if settings.skills_dir.is_dir() => {
            (generate_manifest(&settings.skills_dir, &paths)?, true)
        }
        None => (Manifest::empty(), true),
    };

    let overview = settings.skills_dir.join(OVERVIEW_FILE).is_file();
    if overview && manifest.overview_path.is_none() {
        manifest.overview_path = Some(format!("{}/{}", SKILLS_URL_PREFIX, OVERVIEW_FILE));
    }

    fs::create_dir_all(&settings.public_dir)
        .with_context(|| format!("Failed to create {:?}", settings.public_dir))?;
    let output = settings.public_dir.join(MANIFEST_FILE);
    fs::write(&output, manifest.to_json_pretty()?)
        .with_context(|| format!("Failed to write {:?}", output))?;

    info!(
        "Prepared: {} skills found, manifest written to {:?}",
        paths.len(),
        output
    );

    Ok(Prepared {
        skill_count: paths.len(),
        generated,
        overview: manifest.overview_path.is_some(),
    })
}
