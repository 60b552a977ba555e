//! Pareto dominance between labels at the same vertex, and the per-vertex stores that keep
//! only the non-dominated frontier.

use indexmap::IndexSet;

use crate::label::{Direction, Label, LabelArena, LabelId};

/// `a` dominates `b`: no worse in cost and no worse in resource slack, strictly better in at
/// least one. "Slack" means lower resource consumption for a forward label (more room to keep
/// extending before hitting `max_res`) and higher remaining resources for a backward label
/// (more room to keep extending before hitting `min_res`).
pub(crate) fn dominates(a: &Label, b: &Label) -> bool {
    debug_assert_eq!(a.vertex, b.vertex);
    debug_assert_eq!(a.direction, b.direction);
    if a.cost > b.cost {
        return false;
    }
    let resources_ok = match a.direction {
        Direction::Forward => a.resources.le(&b.resources),
        Direction::Backward => a.resources.ge(&b.resources),
    };
    if !resources_ok {
        return false;
    }
    a.cost < b.cost || a.resources != b.resources
}

/// The non-dominated labels seen so far at one vertex, in one direction.
///
/// `IndexSet` (rather than `HashSet`) preserves insertion order, which keeps result extraction
/// and tie-breaking deterministic across runs for the same input.
#[derive(Default)]
pub(crate) struct Frontier {
    members: IndexSet<LabelId, fxhash::FxBuildHasher>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self {
            members: IndexSet::default(),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = LabelId> + '_ {
        self.members.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Tries to add `candidate` to the frontier. Returns `false` (and adds nothing) if an
    /// existing member already dominates it; otherwise removes every member the candidate
    /// dominates and inserts it.
    pub(crate) fn try_insert(&mut self, arena: &LabelArena, candidate: LabelId) -> bool {
        let candidate_label = arena.get(candidate);
        if self
            .members
            .iter()
            .any(|&existing| dominates(arena.get(existing), candidate_label))
        {
            return false;
        }
        self.members
            .retain(|&existing| !dominates(candidate_label, arena.get(existing)));
        self.members.insert(candidate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceVector;

    fn fwd(vertex: usize, cost: f64, res: f64) -> Label {
        let mut l = Label::root(vertex, ResourceVector::new(vec![res]), Direction::Forward);
        l.cost = cost;
        l
    }

    #[test]
    fn cheaper_and_lighter_dominates() {
        let a = fwd(0, 1.0, 1.0);
        let b = fwd(0, 2.0, 2.0);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn incomparable_labels_do_not_dominate() {
        let a = fwd(0, 1.0, 5.0);
        let b = fwd(0, 2.0, 1.0);
        assert!(!dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn frontier_drops_dominated_members() {
        let mut arena = LabelArena::new();
        let mut frontier = Frontier::new();
        let worse = arena.push(fwd(0, 3.0, 3.0));
        assert!(frontier.try_insert(&arena, worse));
        let better = arena.push(fwd(0, 1.0, 1.0));
        assert!(frontier.try_insert(&arena, better));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.iter().next(), Some(better));
    }
}
