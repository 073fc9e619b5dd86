//! CLI presentation: text and json formatters per command.

use crate::error::TrackError;
use crate::tracker::{ChangeReport, SnapshotHealth};
use crate::tree::node::MerkleTree;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Leading characters of a hash shown in tables
const SHORT_HASH_LEN: usize = 16;

fn to_json<T: Serialize>(value: &T) -> Result<String, TrackError> {
    serde_json::to_string_pretty(value).map_err(|e| TrackError::Serialization {
        path: PathBuf::from("-"),
        source: e,
    })
}

fn title(text: &str, color: bool) -> String {
    if color {
        format!("{}", text.bold())
    } else {
        text.to_string()
    }
}

fn short(hash: &str) -> &str {
    &hash[..hash.len().min(SHORT_HASH_LEN)]
}

pub fn format_change_report_text(report: &ChangeReport, sidecar: &Path, color: bool) -> String {
    let dir = report.directory.display();
    if report.baseline_created {
        return format!(
            "Now tracking {} ({} leaves)\n  Snapshot: {}",
            dir,
            report.leaf_count,
            sidecar.display()
        );
    }

    if report.changed.is_empty() {
        return format!("No changes in {}", dir);
    }

    let mut lines = vec![title(
        &format!("Changed files in {} ({}):", dir, report.changed.len()),
        color,
    )];
    for path in &report.changed {
        if color {
            lines.push(format!("  {}", path.yellow()));
        } else {
            lines.push(format!("  {}", path));
        }
    }
    lines.join("\n")
}

pub fn format_change_report_json(report: &ChangeReport) -> Result<String, TrackError> {
    to_json(report)
}

#[derive(Serialize)]
struct TreeSummary<'a> {
    directory: &'a Path,
    root_hash: Option<&'a str>,
    leaf_count: usize,
    depth: usize,
    leaves: Vec<crate::tree::node::LeafEntry>,
}

pub fn format_tree_json(dir: &Path, tree: &MerkleTree) -> Result<String, TrackError> {
    to_json(&TreeSummary {
        directory: dir,
        root_hash: tree.root_hash(),
        leaf_count: tree.leaf_count(),
        depth: tree.depth(),
        leaves: tree.leaves(),
    })
}

pub fn format_tree_text(dir: &Path, tree: &MerkleTree, color: bool) -> String {
    let Some(root_hash) = tree.root_hash() else {
        return format!("{} has no files", dir.display());
    };

    let mut out = title(&format!("Tree for {}", dir.display()), color);
    out.push_str(&format!(
        "\n  Root hash: {}\n  Leaves: {}\n  Depth: {}\n\n",
        root_hash,
        tree.leaf_count(),
        tree.depth()
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "File", "Hash"]);
    for (i, leaf) in tree.leaves().iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            leaf.file_name.clone(),
            short(&leaf.hash_value).to_string(),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn format_commit_summary(dir: &Path, tree: &MerkleTree, sidecar: &Path) -> String {
    format!(
        "Snapshot of {} updated ({} leaves, root {})\n  Snapshot: {}",
        dir.display(),
        tree.leaf_count(),
        tree.root_hash().map(short).unwrap_or("-"),
        sidecar.display()
    )
}

pub fn format_health_text(dir: &Path, health: &SnapshotHealth) -> String {
    match health {
        SnapshotHealth::Missing => format!("{} is not tracked", dir.display()),
        SnapshotHealth::Consistent {
            root_hash,
            leaf_count,
        } => format!(
            "Snapshot of {} is consistent\n  Root hash: {}\n  Leaves: {}",
            dir.display(),
            root_hash.as_deref().unwrap_or("-"),
            leaf_count
        ),
        SnapshotHealth::Inconsistent { node, hash_value } => format!(
            "Snapshot of {} is inconsistent: node {} ({}) does not match its children",
            dir.display(),
            node,
            short(hash_value)
        ),
    }
}
