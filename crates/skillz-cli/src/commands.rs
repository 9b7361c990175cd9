//! Subcommand implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use skillz_core::layout::{export_layout, LiveNode};
use skillz_core::skills::prepare_manifest;
use skillz_core::{CatalogSession, Settings, Toggle};

use crate::output::{render_items, render_outline};
use crate::source::CatalogSource;

/// Write to `out`, or stdout when absent
fn emit(text: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("Failed to write {:?}", path))?;
            info!("Wrote {:?}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}

pub fn prepare(settings: &Settings) -> Result<()> {
    let prepared = prepare_manifest(settings)?;
    eprintln!(
        "Prepared: {} skills found{}{}",
        prepared.skill_count,
        if prepared.generated {
            ", manifest generated from directory"
        } else {
            ""
        },
        if prepared.overview {
            ", overview included"
        } else {
            ""
        },
    );
    Ok(())
}

pub async fn tree(source: &CatalogSource, settings: &Settings) -> Result<()> {
    let session = source.load(settings).await?;
    print!("{}", render_outline(&session));
    Ok(())
}

pub async fn graph(source: &CatalogSource, settings: &Settings) -> Result<()> {
    let session = source.load(settings).await?;
    emit(&serde_json::to_string_pretty(&session.graph())?, None)
}

/// Click each id in order against a fresh session
pub fn apply_clicks(session: &mut CatalogSession, ids: &[String]) {
    for id in ids {
        match session.click(id) {
            Some(Toggle::Selected(n)) => info!("Selected {} ({} nodes)", id, n),
            Some(Toggle::Deselected(n)) => info!("Deselected {} ({} nodes)", id, n),
            None => warn!("Unknown node id: {}", id),
        }
    }
}

fn copy_to_clipboard(text: &str) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => info!("Copied export to clipboard"),
        Err(e) => warn!("Clipboard unavailable: {}", e),
    }
}

pub async fn loadout(
    source: &CatalogSource,
    settings: &Settings,
    ids: &[String],
    out: Option<&Path>,
    copy: bool,
) -> Result<()> {
    let mut session = source.load(settings).await?;
    apply_clicks(&mut session, ids);

    eprint!("{}", render_items(&session.items()));

    let export = session.export();
    if copy {
        copy_to_clipboard(&export);
    }
    emit(&export, out)
}

pub async fn layout(
    source: &CatalogSource,
    settings: &Settings,
    nodes: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let layout = match nodes {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {:?}", path))?;
            let nodes: Vec<LiveNode> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse {:?}", path))?;
            export_layout(&nodes)
        }
        None => source.load(settings).await?.export_layout(),
    };

    emit(&serde_json::to_string_pretty(&layout)?, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillz_core::content::StaticFetcher;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_apply_clicks_skips_unknown() {
        let fetcher = StaticFetcher::default().with(
            "skills.json",
            r#"{"tree": {"id": "root", "children": [
                {"id": "cat-a", "type": "category", "children": [{"id": "skill-x", "type": "skill"}]}
            ]}}"#,
        );
        let mut session = CatalogSession::load(&fetcher, "", "skillz").await;

        apply_clicks(&mut session, &["ghost".to_string(), "cat-a".to_string()]);
        assert_eq!(session.selection().len(), 2);

        apply_clicks(&mut session, &["cat-a".to_string()]);
        assert!(session.selection().is_empty());
    }

    #[tokio::test]
    async fn test_layout_from_nodes_file() {
        let temp = tempdir().unwrap();
        let nodes = temp.path().join("nodes.json");
        let out = temp.path().join("layout.json");
        std::fs::write(&nodes, r#"[{"id": "root", "position": {"x": 12.34, "y": 0}}]"#).unwrap();

        let source = CatalogSource::Dir(temp.path().to_path_buf());
        layout(&source, &Settings::default(), Some(&nodes), Some(&out))
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"root": {"x": 12.3, "y": 0.0}}));
    }

    #[tokio::test]
    async fn test_layout_from_graph() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("layout.json");

        // no manifest: the root-only tree
        let source = CatalogSource::Dir(temp.path().to_path_buf());
        layout(&source, &Settings::default(), None, Some(&out))
            .await
            .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"root": {"x": 500.0, "y": 500.0}}));
    }
}
