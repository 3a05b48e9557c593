//! Deterministic fallback for choosing the next action.
//!
//! Used when the model-driven choice is vetoed or unusable. Picking the
//! least-used kind over a recent window keeps long runs from starving
//! any one kind of work.

use super::kind::ActionKind;

/// Number of most recent actions inspected by the fallback.
pub const FALLBACK_WINDOW: usize = 10;

/// Returns the least frequent kind among the last [`FALLBACK_WINDOW`] entries
/// of `history`.
///
/// Only [`ActionKind::FALLBACK_CANDIDATES`] are considered; search variants
/// count as `search`. Ties resolve to the earliest candidate in
/// `plan, search, analyze, write, review` order, so an empty history yields
/// `plan`.
pub fn select_least_frequent_action(history: &[ActionKind]) -> ActionKind {
    select_least_frequent_action_excluding(history, None)
}

/// Same as [`select_least_frequent_action`], but never returns a kind of the
/// `excluded` fallback family.
///
/// A vetoed `externalSearch` excludes every search variant. Kinds without a
/// family (terminal and bookkeeping kinds) exclude nothing.
pub fn select_least_frequent_action_excluding(
    history: &[ActionKind],
    excluded: Option<ActionKind>,
) -> ActionKind {
    let window = &history[history.len().saturating_sub(FALLBACK_WINDOW)..];
    let excluded = excluded.and_then(|kind| kind.fallback_family());

    let mut counts = [0usize; ActionKind::FALLBACK_CANDIDATES.len()];
    for family in window.iter().filter_map(ActionKind::fallback_family) {
        if let Some(index) = ActionKind::FALLBACK_CANDIDATES
            .iter()
            .position(|candidate| *candidate == family)
        {
            counts[index] += 1;
        }
    }

    let mut best: Option<usize> = None;
    for (index, candidate) in ActionKind::FALLBACK_CANDIDATES.iter().enumerate() {
        if Some(*candidate) == excluded {
            continue;
        }
        match best {
            Some(current) if counts[index] >= counts[current] => {}
            _ => best = Some(index),
        }
    }
    // at most one of the five candidates is excluded
    ActionKind::FALLBACK_CANDIDATES[best.unwrap_or(0)]
}
