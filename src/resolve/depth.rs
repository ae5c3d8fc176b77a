//! Topological layering of one step's mini-app runs.
//!
//! Depth is a layout concept only: runs without valid parents sit at depth 1,
//! every other run one layer past its deepest parent. Cycles are broken where
//! the traversal re-enters a run that is still being resolved.

use crate::source::MiniAppRun;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Resolved layering for the runs of a single step.
#[derive(Debug, Clone)]
pub struct Layering<'a> {
    /// True when any run declares a non-empty `depends_on`, valid or not.
    pub has_dependencies: bool,
    /// Declared dependencies restricted to runs of the same step.
    pub parents: BTreeMap<&'a str, Vec<&'a str>>,
    pub depths: BTreeMap<&'a str, i64>,
    /// Depth -> runs at that depth, sorted by sentinel-defaulted `order`.
    pub rows: BTreeMap<i64, Vec<&'a MiniAppRun>>,
}

impl<'a> Layering<'a> {
    pub fn valid_parents(&self, run_id: &str) -> &[&'a str] {
        self.parents.get(run_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn depth(&self, run_id: &str) -> Option<i64> {
        self.depths.get(run_id).copied()
    }

    /// Height of the tallest column, never below 1.
    pub fn max_rows(&self) -> usize {
        self.rows.values().map(Vec::len).max().unwrap_or(0).max(1)
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done(i64),
}

/// Layer the runs of one step.
///
/// When no run declares any dependency the step is laid out as an ordered
/// chain: each run's `order` (or the missing-order sentinel) is its depth key.
pub fn resolve_step(runs: &[MiniAppRun]) -> Layering<'_> {
    let has_dependencies = runs.iter().any(|r| !r.depends_on.is_empty());

    let known: BTreeSet<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();

    let mut parents: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for run in runs {
        let mut valid: Vec<&str> = Vec::with_capacity(run.depends_on.len());
        for dep in &run.depends_on {
            if !known.contains(dep.as_str()) {
                debug!(run_id = %run.run_id, depends_on = %dep, "dropping dangling dependency");
                continue;
            }
            if !valid.contains(&dep.as_str()) {
                valid.push(dep.as_str());
            }
        }
        // A duplicated run id keeps the later record's parents.
        parents.insert(run.run_id.as_str(), valid);
    }

    let mut depths: BTreeMap<&str, i64> = BTreeMap::new();
    if has_dependencies {
        let mut marks: BTreeMap<&str, Mark> = BTreeMap::new();
        for run in runs {
            let d = depth_of(run.run_id.as_str(), &parents, &mut marks);
            depths.insert(run.run_id.as_str(), d);
        }
    } else {
        for run in runs {
            depths.insert(run.run_id.as_str(), run.sort_key());
        }
    }

    let mut rows: BTreeMap<i64, Vec<&MiniAppRun>> = BTreeMap::new();
    for run in runs {
        let d = depths.get(run.run_id.as_str()).copied().unwrap_or(1);
        rows.entry(d).or_default().push(run);
    }
    for row in rows.values_mut() {
        row.sort_by_key(|r| r.sort_key());
    }

    Layering {
        has_dependencies,
        parents,
        depths,
        rows,
    }
}

/// Resolution of one run, suspended while a parent is being resolved.
struct Frame<'a> {
    run_id: &'a str,
    next_parent: usize,
    depth: i64,
}

/// Depth of `run_id`, resolving unfinished ancestors on an explicit stack so
/// long chains cannot exhaust the thread stack.
fn depth_of<'a>(
    run_id: &'a str,
    parents: &BTreeMap<&'a str, Vec<&'a str>>,
    marks: &mut BTreeMap<&'a str, Mark>,
) -> i64 {
    if let Some(Mark::Done(d)) = marks.get(run_id) {
        return *d;
    }

    marks.insert(run_id, Mark::Visiting);
    let mut stack = vec![Frame {
        run_id,
        next_parent: 0,
        depth: 1,
    }];

    let mut resolved = 1;
    while let Some(top) = stack.last_mut() {
        let own = parents.get(top.run_id).map(Vec::as_slice).unwrap_or(&[]);

        if let Some(&parent) = own.get(top.next_parent) {
            top.next_parent += 1;
            match marks.get(parent) {
                Some(Mark::Done(d)) => top.depth = top.depth.max(d + 1),
                Some(Mark::Visiting) => {
                    debug!(run_id = parent, "dependency cycle; treating re-entry as depth 1");
                    top.depth = top.depth.max(2);
                }
                None => {
                    marks.insert(parent, Mark::Visiting);
                    stack.push(Frame {
                        run_id: parent,
                        next_parent: 0,
                        depth: 1,
                    });
                }
            }
            continue;
        }

        let (finished, depth) = (top.run_id, top.depth);
        stack.pop();
        marks.insert(finished, Mark::Done(depth));
        match stack.last_mut() {
            Some(child) => child.depth = child.depth.max(depth + 1),
            None => resolved = depth,
        }
    }
    resolved
}
