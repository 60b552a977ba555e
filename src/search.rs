//! The bidirectional labeling search: frontier expansion from both terminals, meeting in the
//! middle at a dynamically chosen halfway point on the critical resource (Tilk et al. 2017)
//! rather than a fixed a-priori split.

use std::cmp::Reverse;
use std::time::Instant;

use dary_heap::DaryHeap;
use error_stack::Result;
use fixedbitset::FixedBitSet;

use crate::dominance::Frontier;
use crate::error::EngineError;
use crate::graph::Graph;
use crate::label::{Direction, Label, LabelArena, LabelId};
use crate::measure::Scored;
use crate::preprocess::Preprocessed;
use crate::refs::ResourceExtension;
use crate::resources::ResourceVector;

/// Which side(s) of the search to run. `Bidirectional` is the default; the one-sided modes
/// exist mainly for the equivalence property tests and for callers who know one direction's
/// frontier will stay small (e.g. a near-degenerate sink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
    Bidirectional,
}

/// Runtime knobs threaded through from the engine's configuration.
pub(crate) struct SearchConfig<'a> {
    pub direction: SearchDirection,
    pub elementary: bool,
    pub max_labels: Option<usize>,
    pub deadline: Option<Instant>,
    pub min_res: &'a ResourceVector,
    pub max_res: &'a ResourceVector,
}

/// Everything the join stage (and the one-sided fallback) needs out of the search.
pub(crate) struct SearchOutcome {
    pub forward_arena: LabelArena,
    pub backward_arena: LabelArena,
    pub forward_frontier: Vec<Frontier>,
    pub backward_frontier: Vec<Frontier>,
    /// Forward labels that reached the sink directly, without needing a join.
    pub direct_forward: Vec<LabelId>,
    /// Backward labels that reached the source directly, without needing a join.
    pub direct_backward: Vec<LabelId>,
}

pub(crate) fn run(
    graph: &Graph,
    pre: &Preprocessed,
    ext: &dyn ResourceExtension,
    config: &SearchConfig<'_>,
) -> Result<SearchOutcome, EngineError> {
    let n = graph.num_vertices();
    let mut forward_arena = LabelArena::new();
    let mut backward_arena = LabelArena::new();
    let mut forward_frontier: Vec<Frontier> = (0..n).map(|_| Frontier::new()).collect();
    let mut backward_frontier: Vec<Frontier> = (0..n).map(|_| Frontier::new()).collect();
    let mut direct_forward = Vec::new();
    let mut direct_backward = Vec::new();

    let run_forward = matches!(
        config.direction,
        SearchDirection::Forward | SearchDirection::Bidirectional
    );
    let run_backward = matches!(
        config.direction,
        SearchDirection::Backward | SearchDirection::Bidirectional
    );

    let mut forward_queue: DaryHeap<Reverse<Scored<LabelId>>, 4> = DaryHeap::new();
    let mut backward_queue: DaryHeap<Scored<LabelId>, 4> = DaryHeap::new();

    if run_forward && pre.on_some_path(graph.source()) {
        let root = Label::root(graph.source(), config.min_res.clone(), Direction::Forward);
        let id = forward_arena.push(root);
        forward_frontier[graph.source()].try_insert(&forward_arena, id);
        forward_queue.push(Reverse(Scored::new(config.min_res.critical(), id)));
    }
    if run_backward && pre.on_some_path(graph.sink()) {
        let root = Label::root(graph.sink(), config.max_res.clone(), Direction::Backward);
        let id = backward_arena.push(root);
        backward_frontier[graph.sink()].try_insert(&backward_arena, id);
        backward_queue.push(Scored::new(config.max_res.critical(), id));
    }

    let mut labels_created = forward_arena.len() + backward_arena.len();

    loop {
        if let Some(deadline) = config.deadline {
            if Instant::now() >= deadline {
                return Err(error_stack::Report::new(EngineError::Aborted));
            }
        }
        if let Some(limit) = config.max_labels {
            if labels_created >= limit {
                return Err(error_stack::Report::new(EngineError::Aborted));
            }
        }

        // The dynamic halfway rule (Tilk et al.): look at the *next* label each side would pop,
        // not at a running watermark, and advance whichever side's next label sits closer to the
        // meeting point. `DaryHeap::peek` doesn't consume, so this costs nothing extra.
        let next_forward = if run_forward {
            forward_queue.peek().map(|Reverse(scored)| scored.priority)
        } else {
            None
        };
        let next_backward = if run_backward {
            backward_queue.peek().map(|scored| scored.priority)
        } else {
            None
        };

        let expand_forward = match (next_forward, next_backward) {
            (None, None) => break,
            // Both sides have a pending label and the forward frontier has already reached (or
            // passed) the backward frontier: every bridge worth enumerating is already in the
            // frontiers, so expanding further would only add labels beyond the meeting point.
            (Some(nf), Some(nb)) if nf >= nb => break,
            (Some(nf), Some(nb)) => nf <= nb,
            (Some(_), None) => true,
            (None, Some(_)) => false,
        };

        if expand_forward {
            let Some(Reverse(Scored { item: label_id, .. })) = forward_queue.pop() else {
                continue;
            };
            let label = forward_arena.get(label_id).clone();
            if !forward_frontier[label.vertex].iter().any(|id| id == label_id) {
                continue; // superseded by a later dominance check; lazy deletion
            }
            if label.vertex == graph.sink() {
                direct_forward.push(label_id);
            }
            expand_label(
                graph,
                pre,
                ext,
                config,
                Direction::Forward,
                &label,
                label_id,
                &mut forward_arena,
                &mut forward_frontier,
                &mut forward_queue,
                &mut labels_created,
            )?;
        } else {
            let Some(Scored { item: label_id, .. }) = backward_queue.pop() else {
                continue;
            };
            let label = backward_arena.get(label_id).clone();
            if !backward_frontier[label.vertex].iter().any(|id| id == label_id) {
                continue;
            }
            if label.vertex == graph.source() {
                direct_backward.push(label_id);
            }
            expand_label(
                graph,
                pre,
                ext,
                config,
                Direction::Backward,
                &label,
                label_id,
                &mut backward_arena,
                &mut backward_frontier,
                &mut backward_queue,
                &mut labels_created,
            )?;
        }
    }

    Ok(SearchOutcome {
        forward_arena,
        backward_arena,
        forward_frontier,
        backward_frontier,
        direct_forward,
        direct_backward,
    })
}

#[allow(clippy::too_many_arguments)]
fn expand_label(
    graph: &Graph,
    pre: &Preprocessed,
    ext: &dyn ResourceExtension,
    config: &SearchConfig<'_>,
    direction: Direction,
    label: &Label,
    label_id: LabelId,
    arena: &mut LabelArena,
    frontier: &mut [Frontier],
    queue: &mut DaryHeap<impl QueueEntry, 4>,
    labels_created: &mut usize,
) -> Result<(), EngineError> {
    let edges = match direction {
        Direction::Forward => graph.out_edges(label.vertex),
        Direction::Backward => graph.in_edges(label.vertex),
    };

    for &edge_id in edges {
        let edge = graph.edge(edge_id);
        let (tail, head, next_vertex) = match direction {
            Direction::Forward => (edge.tail, edge.head, edge.head),
            Direction::Backward => (edge.tail, edge.head, edge.tail),
        };

        if !pre.on_some_path(next_vertex) {
            continue;
        }
        if let Some(visited) = &label.visited {
            if visited.contains(next_vertex) {
                continue;
            }
        }

        let next_resources = match direction {
            Direction::Forward => {
                ext.extend_forward(&label.resources, tail, head, &edge.resources, label.cost)
            }
            Direction::Backward => {
                ext.extend_backward(&label.resources, tail, head, &edge.resources, label.cost)
            }
        };
        if next_resources.dims() != config.min_res.dims() {
            return Err(error_stack::Report::new(crate::error::bad_callback(
                crate::error::length_mismatch(config.min_res.dims(), next_resources.dims()),
            )));
        }
        let monotone_ok = match direction {
            Direction::Forward => next_resources.critical() > label.resources.critical(),
            Direction::Backward => next_resources.critical() < label.resources.critical(),
        };
        if !monotone_ok {
            return Err(error_stack::Report::new(crate::error::bad_callback(
                "resource extension did not strictly move the critical resource",
            )));
        }
        if !next_resources.within_bounds(config.min_res, config.max_res) {
            continue;
        }

        let next_cost = label.cost + edge.cost;
        let visited = if config.elementary {
            let mut v = label
                .visited
                .clone()
                .unwrap_or_else(|| FixedBitSet::with_capacity(graph.num_vertices()));
            v.insert(next_vertex);
            Some(v)
        } else {
            None
        };

        let candidate = Label {
            vertex: next_vertex,
            cost: next_cost,
            resources: next_resources,
            direction,
            predecessor: Some(label_id),
            generating_edge: Some(edge_id),
            visited,
        };
        let candidate_priority = candidate.resources.critical();
        let candidate_id = arena.push(candidate);
        *labels_created += 1;
        if frontier[next_vertex].try_insert(arena, candidate_id) {
            queue.push(QueueEntry::wrap(candidate_priority, candidate_id));
        }
    }
    Ok(())
}

/// Lets `expand_label` push into either a min-ordered (forward) or max-ordered (backward) heap
/// without duplicating the function body.
trait QueueEntry: Ord {
    fn wrap(priority: f64, id: LabelId) -> Self;
}

impl QueueEntry for Reverse<Scored<LabelId>> {
    fn wrap(priority: f64, id: LabelId) -> Self {
        Reverse(Scored::new(priority, id))
    }
}

impl QueueEntry for Scored<LabelId> {
    fn wrap(priority: f64, id: LabelId) -> Self {
        Scored::new(priority, id)
    }
}
