//! Parallel restoration of independent trees.

use rayon::prelude::*;

use super::{RestoreOptions, Result, restore};
use crate::positioned::PositionedTree;
use crate::syntax::{DecoratedTree, NodeId};

/// One tree to restore, rooted at `root`.
#[derive(Debug, Clone, Copy)]
pub struct RestoreJob<'t> {
    pub tree: &'t DecoratedTree,
    pub root: NodeId,
}

impl<'t> RestoreJob<'t> {
    pub fn new(tree: &'t DecoratedTree, root: NodeId) -> Self {
        Self { tree, root }
    }
}

/// Restore every job on the rayon pool, each with its own pass.
///
/// Results come back in job order. A failing job does not affect the others.
pub fn restore_batch(
    jobs: &[RestoreJob<'_>],
    options: &RestoreOptions,
) -> Vec<Result<PositionedTree>> {
    jobs.par_iter()
        .map(|job| restore(job.tree, job.root, options))
        .collect()
}
