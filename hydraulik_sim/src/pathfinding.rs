// A* pathfinding over the hex grid.
//
// Implements standard A* search using a `BinaryHeap` (min-heap via reversed
// ordering). Every step costs 1 and the heuristic is hex distance, which is
// admissible and consistent on a uniform-cost hex grid.
//
// Search nodes live in a per-call arena (`Vec<SearchNode>`) and refer to
// their parent by index. A position index (`FxHashMap<Axial, usize>`) points
// at the current best node for each discovered cell. Improving a cell pushes
// a fresh arena node and heap entry rather than mutating the heap; the stale
// entry is skipped when popped because its cell is already closed.
//
// Passability comes from a caller-supplied predicate. It is evaluated at most
// once per cell per call (memoized in `passable_memo`), and never for
// `start`.
//
// See also: `hydraulik_hex` for `neighbors` and `distance`, `tick.rs` whose
// subscribers typically call into this module once per tick.
//
// **Critical constraint: determinism.** Ties on `f` are broken by insertion
// sequence (FIFO), and neighbors are expanded in `DIRECTIONS` order, so the
// same inputs always yield the same path. Hash maps are used only for
// lookup, never iterated.
//
// The search does not recurse into or re-enter itself; a predicate that calls
// `find_path` is not supported. There is no cancellation: on an unbounded
// passable region with an unreachable goal, the search does not terminate.
// Use `find_path_within` (or a bounded predicate) for open-ended grids.

use crate::hex::{self, Axial};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One discovered (position, cost) pair. Owned by a single search.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
    pos: Axial,
    g: u64,
    parent: Option<usize>,
}

/// Entry in the A* open set (min-heap via reversed ordering).
struct OpenEntry {
    f_score: u64,
    /// Insertion order, for FIFO tie-breaking among equal `f`.
    sequence: u64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.sequence == other.sequence
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest (f_score, sequence) is "greatest".
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Find a shortest path from `start` to `goal`.
///
/// Returns the cells from `start` to `goal` inclusive, or an empty `Vec` if
/// the goal cannot be reached through cells for which `passable` is true.
/// `find_path(a, a, _)` is `[a]`.
pub fn find_path<F>(start: Axial, goal: Axial, mut passable: F) -> Vec<Axial>
where
    F: FnMut(Axial) -> bool,
{
    let mut arena: Vec<SearchNode> = Vec::new();
    let mut best: FxHashMap<Axial, usize> = FxHashMap::default();
    let mut closed: FxHashSet<Axial> = FxHashSet::default();
    let mut passable_memo: FxHashMap<Axial, bool> = FxHashMap::default();
    let mut open = BinaryHeap::new();
    let mut next_sequence: u64 = 0;

    arena.push(SearchNode {
        pos: start,
        g: 0,
        parent: None,
    });
    best.insert(start, 0);
    open.push(OpenEntry {
        f_score: hex::distance(start, goal),
        sequence: next_sequence,
        node: 0,
    });
    next_sequence += 1;

    while let Some(current) = open.pop() {
        let node = arena[current.node];

        if node.pos == goal {
            let path = reconstruct_path(&arena, current.node);
            tracing::trace!(
                start = %start,
                goal = %goal,
                expanded = closed.len(),
                path_len = path.len(),
                "path found"
            );
            return path;
        }

        // A cell may sit in the heap more than once after its cost improved.
        if !closed.insert(node.pos) {
            continue;
        }

        for next in hex::neighbors(node.pos) {
            if closed.contains(&next) {
                continue;
            }
            let is_passable = *passable_memo
                .entry(next)
                .or_insert_with(|| passable(next));
            if !is_passable {
                continue;
            }

            let tentative_g = node.g + 1;
            if best
                .get(&next)
                .is_some_and(|&idx| arena[idx].g <= tentative_g)
            {
                continue;
            }

            let idx = arena.len();
            arena.push(SearchNode {
                pos: next,
                g: tentative_g,
                parent: Some(current.node),
            });
            best.insert(next, idx);
            open.push(OpenEntry {
                f_score: tentative_g + hex::distance(next, goal),
                sequence: next_sequence,
                node: idx,
            });
            next_sequence += 1;
        }
    }

    tracing::trace!(
        start = %start,
        goal = %goal,
        expanded = closed.len(),
        "no path"
    );
    Vec::new()
}

/// Like `find_path`, but never enters a cell farther than `max_radius` from
/// `start`. Always terminates, even on an unbounded grid.
pub fn find_path_within<F>(
    start: Axial,
    goal: Axial,
    max_radius: u32,
    mut passable: F,
) -> Vec<Axial>
where
    F: FnMut(Axial) -> bool,
{
    find_path(start, goal, |cell| {
        hex::distance(start, cell) <= u64::from(max_radius) && passable(cell)
    })
}

/// Walk parent links from `goal_idx` back to the root, then reverse.
fn reconstruct_path(arena: &[SearchNode], goal_idx: usize) -> Vec<Axial> {
    let mut path = Vec::new();
    let mut current = Some(goal_idx);
    while let Some(idx) = current {
        let node = arena[idx];
        path.push(node.pos);
        current = node.parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn open_grid(_: Axial) -> bool {
        true
    }

    fn assert_contiguous(path: &[Axial]) {
        for pair in path.windows(2) {
            assert_eq!(hex::distance(pair[0], pair[1]), 1, "gap in {path:?}");
        }
    }

    #[test]
    fn trivial_path() {
        let a = Axial::new(3, -1);
        assert_eq!(find_path(a, a, open_grid), vec![a]);
    }

    #[test]
    fn trivial_path_ignores_predicate() {
        let a = Axial::new(0, 0);
        assert_eq!(find_path(a, a, |_| false), vec![a]);
    }

    #[test]
    fn adjacent_path() {
        let a = Axial::ZERO;
        let b = Axial::new(1, 0);
        assert_eq!(find_path(a, b, open_grid), vec![a, b]);
    }

    #[test]
    fn open_grid_path_is_shortest() {
        let a = Axial::new(-3, 2);
        let b = Axial::new(4, -1);
        let path = find_path(a, b, open_grid);
        assert_eq!(path.len(), hex::distance(a, b) as usize + 1);
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&b));
        assert_contiguous(&path);
    }

    #[test]
    fn enclosed_start_has_no_path() {
        let start = Axial::ZERO;
        let goal = Axial::new(2, 0);
        assert!(find_path(start, goal, |c| c == start).is_empty());
    }

    #[test]
    fn impassable_goal_has_no_path() {
        let start = Axial::ZERO;
        let goal = Axial::new(2, 0);
        let path = find_path_within(start, goal, 5, |c| c != goal);
        assert!(path.is_empty());
    }

    #[test]
    fn routes_around_wall() {
        // A wall along q == 1 for r in -2..=2, with the goal directly behind it.
        let wall: BTreeSet<Axial> = (-2..=2).map(|r| Axial::new(1, r)).collect();
        let start = Axial::ZERO;
        let goal = Axial::new(2, 0);
        let path = find_path_within(start, goal, 6, |c| !wall.contains(&c));

        assert!(!path.is_empty());
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|c| !wall.contains(c)));
        assert!(path.len() > hex::distance(start, goal) as usize + 1);
        assert_contiguous(&path);
    }

    #[test]
    fn detour_length_is_optimal() {
        // (1, 1) has two shortest routes, through (1, 0) or (0, 1). Blocking
        // one must not lengthen the path.
        let start = Axial::ZERO;
        let goal = Axial::new(1, 1);
        let blocked = Axial::new(1, 0);
        let path = find_path_within(start, goal, 4, |c| c != blocked);
        assert_eq!(path, vec![start, Axial::new(0, 1), goal]);

        // (2, 0) has a single midpoint; blocking it costs one extra step.
        let goal = Axial::new(2, 0);
        let path = find_path_within(start, goal, 4, |c| c != blocked);
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&blocked));
    }

    #[test]
    fn predicate_called_once_per_cell() {
        let mut seen: Vec<Axial> = Vec::new();
        let start = Axial::ZERO;
        let goal = Axial::new(3, -3);
        let path = find_path_within(start, goal, 5, |c| {
            seen.push(c);
            c != Axial::new(1, -1)
        });
        assert!(!path.is_empty());
        let unique: BTreeSet<_> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len());
        assert!(!unique.contains(&start));
    }

    #[test]
    fn bounded_search_terminates_when_unreachable() {
        // Goal outside the radius on an otherwise open, infinite grid.
        let path = find_path_within(Axial::ZERO, Axial::new(10, 0), 3, open_grid);
        assert!(path.is_empty());
    }

    #[test]
    fn deterministic() {
        let blocked: BTreeSet<Axial> = [Axial::new(1, 0), Axial::new(1, -1), Axial::new(0, 1)]
            .into_iter()
            .collect();
        let run = || find_path_within(Axial::ZERO, Axial::new(3, -1), 6, |c| !blocked.contains(&c));
        let p1 = run();
        let p2 = run();
        assert!(!p1.is_empty());
        assert_eq!(p1, p2);
    }
}
