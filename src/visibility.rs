//! Fog-of-war visibility (spec §4.5): Bresenham line-of-sight gated by
//! Chebyshev range.

use std::collections::HashSet;

use crate::model::{EntityKind, GameState, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Players,
    Npcs,
    All,
}

fn faction_matches(kind: EntityKind, faction: Faction) -> bool {
    match faction {
        Faction::Players => kind == EntityKind::Player,
        Faction::Npcs => kind == EntityKind::Npc,
        Faction::All => true,
    }
}

/// Bresenham's line algorithm between two cells, inclusive of both endpoints.
fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let mut cells = Vec::new();
    let (mut x0, mut y0) = (from.x, from.y);
    let (x1, y1) = (to.x, to.y);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        cells.push(Position::new(x0, y0));
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
    cells
}

/// Whether `to` is visible from `from`: its Bresenham line passes through no
/// cell (other than the two endpoints) with `blocks_vision=true`.
fn has_line_of_sight(state: &GameState, from: Position, to: Position) -> bool {
    let line = bresenham_line(from, to);
    line.iter()
        .skip(1)
        .take(line.len().saturating_sub(2))
        .all(|&cell| !state.map.blocks_vision(cell))
}

/// Every cell within Chebyshev `range` of `center`, in-bounds.
fn cells_within_range(state: &GameState, center: Position, range: i32) -> Vec<Position> {
    let mut out = Vec::new();
    for dy in -range..=range {
        for dx in -range..=range {
            let cell = Position::new(center.x + dx, center.y + dy);
            if state.map.in_bounds(cell) {
                out.push(cell);
            }
        }
    }
    out
}

/// Cells visible to `faction`. With fog of war disabled, every in-bounds
/// cell is visible regardless of faction or entity positions.
pub fn compute_visible_cells(state: &GameState, faction: Faction) -> HashSet<Position> {
    if !state.map.fog_of_war_enabled {
        let mut all = HashSet::new();
        for y in 0..state.map.grid.size.h as i32 {
            for x in 0..state.map.grid.size.w as i32 {
                all.insert(Position::new(x, y));
            }
        }
        return all;
    }

    let mut visible = HashSet::new();
    for entity in state.entities.iter() {
        if !entity.is_alive() || !faction_matches(entity.kind, faction) {
            continue;
        }
        let range = entity.stats.vision_range_or_default() as i32;
        for cell in cells_within_range(state, entity.position, range) {
            if entity.position.chebyshev_distance(cell) <= range
                && has_line_of_sight(state, entity.position, cell)
            {
                visible.insert(cell);
            }
        }
    }
    visible
}
