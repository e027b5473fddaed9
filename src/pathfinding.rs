//! 4-connected grid A* with a Manhattan heuristic (spec §4.4).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::model::{GameState, Position};
use crate::rules::RuleModule;

#[derive(Debug, Clone, Default)]
pub struct PathOptions<'a> {
    pub entity_id: Option<&'a str>,
    pub max_cost: Option<u32>,
    pub allow_occupied_goal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Does not include the starting cell; the final cell is the target.
    pub path: Vec<Position>,
    pub cost: u32,
}

/// A frontier entry. Insertion order is the tie-breaker for otherwise equal
/// `f = g + h`, mirroring the priority-queue pattern used for the request
/// queue elsewhere in this crate: reverse the natural `Ord` so `BinaryHeap`
/// (a max-heap) pops the lowest `f`, then the earliest-inserted entry.
struct Frontier {
    f: u32,
    insertion_order: u64,
    position: Position,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.insertion_order == other.insertion_order
    }
}
impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.insertion_order.cmp(&self.insertion_order))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

fn step_cost(state: &GameState, rules: &dyn RuleModule, pos: Position) -> u32 {
    match state.map.tile_at(pos) {
        Some(tile) => rules.movement().terrain_cost(tile.kind),
        None => rules.movement().terrain_cost(crate::model::TileKind::Open),
    }
}

fn is_blocked(state: &GameState, pos: Position) -> bool {
    state.map.blocks_movement(pos)
}

fn is_occupied_by_other(state: &GameState, pos: Position, mover_id: Option<&str>) -> bool {
    state.entities.iter().any(|e| {
        e.position == pos
            && mover_id.map_or(true, |id| e.id != id)
    })
}

/// Finds the lowest-cost path from `from` to `to`, or `None` if unreachable
/// within `opts.max_cost` (when set).
pub fn find_path(
    state: &GameState,
    rules: &dyn RuleModule,
    from: Position,
    to: Position,
    opts: &PathOptions,
) -> Option<PathResult> {
    if from == to {
        return Some(PathResult { path: Vec::new(), cost: 0 });
    }
    if !state.map.in_bounds(from) || !state.map.in_bounds(to) {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut insertion_counter: u64 = 0;
    let mut g_score: HashMap<Position, u32> = HashMap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();

    g_score.insert(from, 0);
    open.push(Frontier { f: from.manhattan_distance(to) as u32, insertion_order: 0, position: from });

    while let Some(Frontier { position: current, .. }) = open.pop() {
        if current == to {
            return Some(reconstruct_path(&came_from, current, *g_score.get(&to).unwrap()));
        }

        let current_g = *g_score.get(&current).unwrap();

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let next = Position::new(current.x + dx, current.y + dy);

            if !state.map.in_bounds(next) {
                continue;
            }
            let is_goal = next == to;
            if is_blocked(state, next) {
                continue;
            }
            if is_occupied_by_other(state, next, opts.entity_id) {
                let goal_allowed = is_goal && opts.allow_occupied_goal;
                if !goal_allowed {
                    continue;
                }
            }

            let cost = step_cost(state, rules, next);
            if cost == u32::MAX {
                continue;
            }
            let tentative_g = current_g.saturating_add(cost);

            if let Some(max_cost) = opts.max_cost {
                if tentative_g > max_cost {
                    continue;
                }
            }

            let better = g_score.get(&next).map_or(true, |&existing| tentative_g < existing);
            if better {
                g_score.insert(next, tentative_g);
                came_from.insert(next, current);
                insertion_counter += 1;
                let h = next.manhattan_distance(to) as u32;
                open.push(Frontier {
                    f: tentative_g.saturating_add(h),
                    insertion_order: insertion_counter,
                    position: next,
                });
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<Position, Position>, goal: Position, cost: u32) -> PathResult {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        current = prev;
        if came_from.contains_key(&current) {
            path.push(current);
        }
    }
    path.reverse();
    path.push(goal);
    // `goal` may have been pushed twice if it had no predecessor chain beyond
    // the start; dedupe the rebuilt sequence rather than special-case it.
    path.dedup();
    PathResult { path, cost }
}

/// Uses the entity's own `movement_speed` as the hard cost cutoff.
pub fn find_path_for_entity(
    state: &GameState,
    rules: &dyn RuleModule,
    entity_id: &str,
    goal: Position,
) -> Option<PathResult> {
    let entity = state.entities.get(entity_id)?;
    let opts = PathOptions {
        entity_id: Some(entity_id),
        max_cost: Some(entity.stats.movement_speed),
        allow_occupied_goal: false,
    };
    find_path(state, rules, entity.position, goal, &opts)
}

/// Cheapest reachable cell at Manhattan distance 1 from `target_id`'s
/// position, ties broken by lowest A* cost then lexicographic `(x, y)`.
pub fn find_path_to_adjacent(
    state: &GameState,
    rules: &dyn RuleModule,
    mover_id: &str,
    target_id: &str,
) -> Option<PathResult> {
    let mover = state.entities.get(mover_id)?;
    let target = state.entities.get(target_id)?;

    let mut candidates: Vec<Position> = [(0, -1), (0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .map(|(dx, dy)| Position::new(target.position.x + dx, target.position.y + dy))
        .filter(|p| state.map.in_bounds(*p))
        .collect();
    candidates.sort_by_key(|p| (p.x, p.y));

    let opts = PathOptions {
        entity_id: Some(mover_id),
        max_cost: Some(mover.stats.movement_speed),
        allow_occupied_goal: false,
    };

    let mut best: Option<PathResult> = None;
    for cell in candidates {
        if let Some(result) = find_path(state, rules, mover.position, cell, &opts) {
            let better = match &best {
                None => true,
                Some(b) => result.cost < b.cost,
            };
            if better {
                best = Some(result);
            }
        }
    }
    best
}
