//! Rolls completed leaves back up into the tracker.
//!
//! Every referenced leaf is completed first. Parents named by subtask leaves
//! are then re-checked once each, and completed only if none of their
//! subtasks is still open.

use std::collections::HashSet;

use crate::error::Result;
use crate::integrations::TaskTracker;

use super::LeafId;

/// What a propagation run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Leaf gids marked complete, in input order.
    pub completed_leaves: Vec<String>,
    /// Parent gids that were re-checked.
    pub checked_parents: Vec<String>,
    /// Parent gids that were promoted to complete.
    pub completed_parents: Vec<String>,
}

/// Complete the given leaves and promote parents whose subtasks are all done.
///
/// Identifiers are `"<gid>"` or `"<subtask_gid> <parent_gid>"`. Blank
/// entries are ignored; malformed ones are rejected before any tracker call.
pub fn propagate_completion<T, I, S>(tracker: &T, identifiers: I) -> Result<PropagationReport>
where
    T: TaskTracker + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let leaves = identifiers
        .into_iter()
        .filter(|raw| !raw.as_ref().trim().is_empty())
        .map(|raw| raw.as_ref().parse::<LeafId>())
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = PropagationReport::default();
    let mut seen_parents = HashSet::new();

    for leaf in &leaves {
        tracker.complete(leaf.gid())?;
        report.completed_leaves.push(leaf.gid().to_string());

        if let Some(parent) = leaf.parent() {
            if seen_parents.insert(parent.to_string()) {
                report.checked_parents.push(parent.to_string());
            }
        }
    }

    for parent in &report.checked_parents {
        let subtasks = tracker.subtasks(parent)?;
        if subtasks.iter().all(|s| s.completed) {
            tracker.complete(parent)?;
            report.completed_parents.push(parent.clone());
        } else {
            tracing::debug!(%parent, "parent still has open subtasks");
        }
    }

    tracing::info!(
        leaves = report.completed_leaves.len(),
        parents = report.completed_parents.len(),
        "propagated completion"
    );
    Ok(report)
}
