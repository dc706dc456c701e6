//! The crafting workspace: free-floating tiles, dragging, and combinations
//!
//! The workspace exclusively owns its tiles and the inventory. Combining is
//! split in two halves so the generator call can run without holding the
//! workspace:
//! 1. `end_drag` removes the colliding pair and returns a `CombinationRequest`
//! 2. the caller awaits the generator, then hands the result to
//!    `complete_combination`
//!
//! Consumed tiles are parked with the pending request. A failed or expired
//! request puts them back where they were dropped.

use std::fmt;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::find_drop_target;
use super::tile::{CraftElement, Inventory, TileId, TileInstance};
use crate::consts::*;
use crate::settings::Settings;
use crate::{Point, midpoint};

/// Handle pairing a combination request with its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombinationId(pub u32);

/// Emitted when a dropped tile lands on another one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRequest {
    pub id: CombinationId,
    /// The dragged element
    pub first: CraftElement,
    /// The element it was dropped on
    pub second: CraftElement,
    /// Where the result will appear
    pub midpoint: Point,
}

/// What happened to a delivered combination result
#[derive(Debug, Clone, PartialEq)]
pub enum CombineOutcome {
    /// Result placed at the midpoint; `discovered` if it was new to the inventory
    Created { tile: TileInstance, discovered: bool },
    /// Generator failed; the two source tiles are back
    Restored { error: String },
    /// Request already expired (or was never issued); result dropped
    Stale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PendingCombination {
    request: CombinationRequest,
    consumed: [TileInstance; 2],
    issued_at_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DragState {
    id: TileId,
    /// Pointer minus tile anchor at grab time
    offset: DVec2,
}

/// Tile simulation state for one crafting session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    /// Stacking order: last is drawn on top
    tiles: Vec<TileInstance>,
    inventory: Inventory,
    drag: Option<DragState>,
    pending: Vec<PendingCombination>,
    last_creation: Option<String>,
    /// Measured workspace size, if known
    size: Option<DVec2>,
    collision_threshold: f64,
    spawn_jitter: f64,
    combine_timeout_ms: f64,
    /// Latest time seen by `expire_pending`
    clock_ms: f64,
    #[serde(skip, default = "default_rng")]
    rng: Pcg32,
    next_tile_id: u32,
    next_request_id: u32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl Workspace {
    /// New workspace with default tunables and the starter inventory
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        Self {
            tiles: Vec::new(),
            inventory: Inventory::with_starters(),
            drag: None,
            pending: Vec::new(),
            last_creation: None,
            size: None,
            collision_threshold: settings.collision_threshold,
            spawn_jitter: settings.spawn_jitter,
            combine_timeout_ms: settings.combine_timeout_ms,
            clock_ms: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_tile_id: 1,
            next_request_id: 1,
        }
    }

    /// Record the on-screen size so new tiles spawn near the middle
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Some(DVec2::new(width, height));
    }

    fn allocate_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    fn spawn_point(&mut self) -> Point {
        let Some(size) = self.size else {
            return DVec2::new(FALLBACK_SPAWN.0, FALLBACK_SPAWN.1);
        };
        let jitter = self.spawn_jitter;
        let mut wiggle = || {
            if jitter > 0.0 {
                self.rng.random_range(-jitter..jitter)
            } else {
                0.0
            }
        };
        let dx = wiggle();
        let dy = wiggle();
        DVec2::new(
            size.x / 2.0 + dx - TILE_HALF_WIDTH,
            size.y / 2.0 + dy - TILE_HALF_HEIGHT,
        )
    }

    /// Drop a fresh copy of `template` near the center of the workspace
    pub fn place(&mut self, template: &CraftElement) -> TileInstance {
        let pos = self.spawn_point();
        self.insert(template.clone(), pos)
    }

    fn insert(&mut self, element: CraftElement, pos: Point) -> TileInstance {
        let tile = TileInstance {
            id: self.allocate_tile_id(),
            element,
            pos,
        };
        self.tiles.push(tile.clone());
        tile
    }

    /// Topmost tile whose box contains `pointer`
    pub fn tile_at(&self, pointer: Point) -> Option<TileId> {
        self.tiles
            .iter()
            .rev()
            .find(|t| {
                let local = pointer - t.pos;
                (0.0..=TILE_HALF_WIDTH * 2.0).contains(&local.x)
                    && (0.0..=TILE_HALF_HEIGHT * 2.0).contains(&local.y)
            })
            .map(|t| t.id)
    }

    /// Grab a tile. Raises it to the top of the stack. Returns false for unknown ids.
    pub fn begin_drag(&mut self, id: TileId, pointer: Point) -> bool {
        let Some(index) = self.tiles.iter().position(|t| t.id == id) else {
            return false;
        };
        let tile = self.tiles.remove(index);
        self.drag = Some(DragState {
            id,
            offset: pointer - tile.pos,
        });
        self.tiles.push(tile);
        true
    }

    /// Follow the pointer with the grabbed tile. Returns false if nothing is grabbed.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match self.tiles.iter_mut().find(|t| t.id == drag.id) {
            Some(tile) => {
                tile.pos = pointer - drag.offset;
                true
            }
            None => false,
        }
    }

    /// Release the grabbed tile. If it landed on another tile both are
    /// consumed and a combination request is returned.
    pub fn end_drag(&mut self) -> Option<CombinationRequest> {
        let drag = self.drag.take()?;
        let hit = find_drop_target(&self.tiles, drag.id, self.collision_threshold)?;

        let dragged_index = self.tiles.iter().position(|t| t.id == drag.id)?;
        // Remove the higher index first so the lower one stays valid
        let (hi, lo) = if dragged_index > hit.index {
            (dragged_index, hit.index)
        } else {
            (hit.index, dragged_index)
        };
        let removed_hi = self.tiles.remove(hi);
        let removed_lo = self.tiles.remove(lo);
        let (dragged, target) = if removed_hi.id == drag.id {
            (removed_hi, removed_lo)
        } else {
            (removed_lo, removed_hi)
        };

        let request = CombinationRequest {
            id: CombinationId(self.next_request_id),
            first: dragged.element.clone(),
            second: target.element.clone(),
            midpoint: midpoint(dragged.pos, target.pos),
        };
        self.next_request_id += 1;

        log::info!(
            "Combining {} + {} (request {})",
            request.first.name,
            request.second.name,
            request.id.0
        );
        self.pending.push(PendingCombination {
            request: request.clone(),
            consumed: [dragged, target],
            issued_at_ms: self.clock_ms,
        });
        Some(request)
    }

    /// Deliver the generator's answer for a request
    pub fn complete_combination<E: fmt::Display>(
        &mut self,
        id: CombinationId,
        result: Result<CraftElement, E>,
    ) -> CombineOutcome {
        let Some(index) = self.pending.iter().position(|p| p.request.id == id) else {
            log::warn!("Dropping result for unknown or expired request {}", id.0);
            return CombineOutcome::Stale;
        };
        let pending = self.pending.remove(index);

        match result {
            Ok(element) => {
                let [first, second] = &pending.consumed;
                self.last_creation = Some(format!(
                    "{} + {} = {}",
                    first.emoji(),
                    second.emoji(),
                    element.name
                ));
                let discovered = self.inventory.add(element.clone());
                let tile = self.insert(element, pending.request.midpoint);
                log::info!("Created {} {} (new: {})", tile.emoji(), tile.name(), discovered);
                CombineOutcome::Created { tile, discovered }
            }
            Err(err) => {
                log::error!("Combination {} failed: {}", id.0, err);
                self.restore(pending);
                CombineOutcome::Restored {
                    error: err.to_string(),
                }
            }
        }
    }

    fn restore(&mut self, pending: PendingCombination) {
        let [first, second] = pending.consumed;
        self.tiles.push(second);
        self.tiles.push(first);
    }

    /// Advance the workspace clock and give back the tiles of every request
    /// that has been pending longer than the timeout. Returns how many expired.
    pub fn expire_pending(&mut self, now_ms: f64) -> usize {
        self.clock_ms = self.clock_ms.max(now_ms);
        let deadline = self.clock_ms - self.combine_timeout_ms;

        let (expired, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.issued_at_ms <= deadline);
        self.pending = waiting;

        let count = expired.len();
        for pending in expired {
            log::warn!(
                "Combination {} + {} timed out, restoring tiles",
                pending.request.first.name,
                pending.request.second.name
            );
            self.restore(pending);
        }
        count
    }

    /// Remove every tile. The inventory and pending requests are untouched.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.drag = None;
    }

    /// True while any combination is waiting on the generator
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn tiles(&self) -> &[TileInstance] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&TileInstance> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub fn dragging(&self) -> Option<TileId> {
        self.drag.map(|d| d.id)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// "💧 + 🔥 = Steam" for the most recent success
    pub fn last_creation(&self) -> Option<&str> {
        self.last_creation.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> CraftElement {
        CraftElement::new("Water", "💧")
    }

    fn fire() -> CraftElement {
        CraftElement::new("Fire", "🔥")
    }

    fn steam() -> CraftElement {
        CraftElement::new("Steam", "💨")
    }

    /// Workspace with Water at (100,100) and Fire at (130,120)
    fn water_and_fire() -> (Workspace, TileId, TileId) {
        let mut ws = Workspace::new(1);
        let w = ws.place(&water()).id;
        let f = ws.place(&fire()).id;
        ws.tiles.iter_mut().find(|t| t.id == w).unwrap().pos = DVec2::new(100.0, 100.0);
        ws.tiles.iter_mut().find(|t| t.id == f).unwrap().pos = DVec2::new(130.0, 120.0);
        (ws, w, f)
    }

    #[test]
    fn test_tile_at_prefers_topmost() {
        let (ws, w, f) = water_and_fire();
        assert_eq!(ws.tile_at(DVec2::new(140.0, 130.0)), Some(f));
        assert_eq!(ws.tile_at(DVec2::new(105.0, 105.0)), Some(w));
        assert_eq!(ws.tile_at(DVec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_place_twice_distinct_ids() {
        let mut ws = Workspace::new(42);
        ws.set_size(800.0, 600.0);
        let a = ws.place(&water());
        let b = ws.place(&water());
        assert_ne!(a.id, b.id);
        assert_eq!(a.element, b.element);
        assert_eq!(ws.tiles().len(), 2);
    }

    #[test]
    fn test_place_spawns_in_jitter_window() {
        let mut ws = Workspace::new(7);
        ws.set_size(800.0, 600.0);
        for _ in 0..50 {
            let t = ws.place(&fire());
            assert!((330.0..=370.0).contains(&t.pos.x), "x = {}", t.pos.x);
            assert!((255.0..=295.0).contains(&t.pos.y), "y = {}", t.pos.y);
        }
    }

    #[test]
    fn test_place_without_size_uses_fallback() {
        let mut ws = Workspace::new(7);
        assert_eq!(ws.place(&fire()).pos, DVec2::new(100.0, 100.0));
    }

    #[test]
    fn test_begin_drag_raises_tile_and_keeps_offset() {
        let (mut ws, w, f) = water_and_fire();
        assert!(ws.begin_drag(w, DVec2::new(110.0, 105.0)));
        assert_eq!(ws.tiles().last().unwrap().id, w);
        assert_eq!(ws.dragging(), Some(w));

        ws.update_drag(DVec2::new(410.0, 305.0));
        assert_eq!(ws.tile(w).unwrap().pos, DVec2::new(400.0, 300.0));
        assert_eq!(ws.tile(f).unwrap().pos, DVec2::new(130.0, 120.0));
    }

    #[test]
    fn test_begin_drag_unknown_id_is_noop() {
        let (mut ws, w, _) = water_and_fire();
        let before = ws.tiles().to_vec();
        assert!(!ws.begin_drag(TileId(999), DVec2::ZERO));
        assert_eq!(ws.tiles(), &before[..]);
        assert_eq!(ws.dragging(), None);
        assert!(!ws.update_drag(DVec2::ZERO));
        assert!(ws.end_drag().is_none());
        assert!(ws.tile(w).is_some());
    }

    #[test]
    fn test_end_drag_far_away_keeps_membership() {
        let (mut ws, w, f) = water_and_fire();
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        ws.update_drag(DVec2::new(500.0, 500.0));
        assert!(ws.end_drag().is_none());
        assert_eq!(ws.tiles().len(), 2);
        assert_eq!(ws.tile(w).unwrap().pos, DVec2::new(500.0, 500.0));
        assert!(ws.tile(f).is_some());
        assert_eq!(ws.dragging(), None);
        assert!(!ws.is_loading());
    }

    #[test]
    fn test_water_fire_makes_steam() {
        let (mut ws, w, _) = water_and_fire();
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        let request = ws.end_drag().unwrap();

        assert_eq!(request.first.name, "Water");
        assert_eq!(request.second.name, "Fire");
        assert_eq!(request.midpoint, DVec2::new(115.0, 110.0));
        assert!(ws.tiles().is_empty());
        assert!(ws.is_loading());

        let outcome = ws.complete_combination::<String>(request.id, Ok(steam()));
        let CombineOutcome::Created { tile, discovered } = outcome else {
            panic!("expected a new tile");
        };
        assert!(discovered);
        assert_eq!(tile.pos, DVec2::new(115.0, 110.0));
        assert_eq!(ws.tiles().len(), 1);
        assert_eq!(ws.tiles()[0].name(), "Steam");
        assert_eq!(ws.inventory().iter().filter(|e| e.name == "Steam").count(), 1);
        assert_eq!(ws.last_creation(), Some("💧 + 🔥 = Steam"));
        assert!(!ws.is_loading());
    }

    fn move_to(ws: &mut Workspace, id: TileId, pos: DVec2) {
        ws.tiles.iter_mut().find(|t| t.id == id).unwrap().pos = pos;
    }

    #[test]
    fn test_end_drag_removes_only_pair_with_bystander() {
        let mut ws = Workspace::new(5);
        let w = ws.place(&water()).id;
        let e = ws.place(&CraftElement::new("Earth", "🌍")).id;
        let f = ws.place(&fire()).id;
        move_to(&mut ws, w, DVec2::new(100.0, 100.0));
        move_to(&mut ws, e, DVec2::new(400.0, 400.0));
        move_to(&mut ws, f, DVec2::new(130.0, 120.0));

        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        let request = ws.end_drag().unwrap();
        assert_eq!(request.second.name, "Fire");
        assert_eq!(ws.tiles().len(), 1);
        assert_eq!(ws.tile(e).unwrap().pos, DVec2::new(400.0, 400.0));

        ws.complete_combination::<String>(request.id, Ok(steam()));
        let names: Vec<&str> = ws.tiles().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Earth", "Steam"]);
    }

    #[test]
    fn test_repeated_release_is_noop() {
        let (mut ws, w, f) = water_and_fire();
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        ws.update_drag(DVec2::new(600.0, 600.0));
        assert!(ws.end_drag().is_none());
        // pointerleave after pointerup
        assert!(ws.end_drag().is_none());
        assert_eq!(ws.tile(w).unwrap().pos, DVec2::new(600.0, 600.0));
        assert!(ws.tile(f).is_some());
        assert!(!ws.is_loading());
    }

    #[test]
    fn test_result_landing_mid_drag_can_be_combined() {
        let (mut ws, w, _) = water_and_fire();
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        let first = ws.end_drag().unwrap();

        let e = ws.place(&CraftElement::new("Earth", "🌍")).id;
        move_to(&mut ws, e, DVec2::new(500.0, 500.0));
        ws.begin_drag(e, DVec2::new(500.0, 500.0));

        // Steam arrives while Earth is held and stacks above it
        let CombineOutcome::Created { tile: made, .. } =
            ws.complete_combination::<String>(first.id, Ok(steam()))
        else {
            panic!("expected a new tile");
        };
        assert_eq!(ws.tiles().last().unwrap().id, made.id);

        ws.update_drag(DVec2::new(120.0, 115.0));
        let second = ws.end_drag().unwrap();
        assert_eq!(second.first.name, "Earth");
        assert_eq!(second.second.name, "Steam");
        assert!(ws.tiles().is_empty());
        assert_eq!(ws.pending_count(), 1);
    }

    #[test]
    fn test_known_result_not_duplicated_in_inventory() {
        let mut ws = Workspace::new(3);
        let before = ws.inventory().len();
        let a = ws.place(&water()).id;
        ws.place(&water());
        ws.begin_drag(a, DVec2::new(100.0, 100.0));
        let request = ws.end_drag().unwrap();
        let outcome = ws.complete_combination::<String>(request.id, Ok(CraftElement::new("Fire", "🔥")));
        assert!(matches!(outcome, CombineOutcome::Created { discovered: false, .. }));
        assert_eq!(ws.inventory().len(), before);
    }

    #[test]
    fn test_failure_restores_pair() {
        let (mut ws, w, f) = water_and_fire();
        ws.begin_drag(f, DVec2::new(130.0, 120.0));
        let request = ws.end_drag().unwrap();
        assert_eq!(request.first.name, "Fire");

        let outcome = ws.complete_combination(request.id, Err("network down"));
        assert!(matches!(outcome, CombineOutcome::Restored { .. }));
        assert_eq!(ws.tile(w).unwrap().pos, DVec2::new(100.0, 100.0));
        assert_eq!(ws.tile(f).unwrap().pos, DVec2::new(130.0, 120.0));
        assert!(!ws.is_loading());
    }

    #[test]
    fn test_timeout_restores_and_late_result_is_stale() {
        let (mut ws, w, f) = water_and_fire();
        ws.expire_pending(1_000.0);
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        let request = ws.end_drag().unwrap();

        assert_eq!(ws.expire_pending(5_000.0), 0);
        assert!(ws.is_loading());
        assert_eq!(ws.expire_pending(1_000.0 + COMBINE_TIMEOUT_MS), 1);
        assert!(ws.tile(w).is_some() && ws.tile(f).is_some());

        let outcome = ws.complete_combination::<String>(request.id, Ok(steam()));
        assert_eq!(outcome, CombineOutcome::Stale);
        assert_eq!(ws.tiles().len(), 2);
        assert!(!ws.inventory().contains("Steam"));
    }

    #[test]
    fn test_concurrent_combinations_are_independent() {
        let mut ws = Workspace::new(9);
        let a = ws.place(&water()).id;
        ws.place(&fire());
        let first = {
            ws.begin_drag(a, DVec2::new(100.0, 100.0));
            ws.end_drag().unwrap()
        };
        let c = ws.place(&water()).id;
        ws.place(&water());
        let second = {
            ws.begin_drag(c, DVec2::new(100.0, 100.0));
            ws.end_drag().unwrap()
        };
        assert_ne!(first.id, second.id);
        assert_eq!(ws.pending_count(), 2);

        ws.complete_combination::<String>(second.id, Ok(CraftElement::new("Lake", "🏞️")));
        assert!(ws.is_loading());
        ws.complete_combination::<String>(first.id, Ok(steam()));
        assert!(!ws.is_loading());
        let names: Vec<&str> = ws.tiles().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Lake", "Steam"]);
    }

    #[test]
    fn test_ids_unique_across_combinations() {
        let (mut ws, w, f) = water_and_fire();
        ws.begin_drag(w, DVec2::new(100.0, 100.0));
        let request = ws.end_drag().unwrap();
        let CombineOutcome::Created { tile, .. } = ws.complete_combination::<String>(request.id, Ok(steam())) else {
            panic!("expected a new tile");
        };
        assert_ne!(tile.id, w);
        assert_ne!(tile.id, f);
    }

    #[test]
    fn test_clear_empties_tiles_only() {
        let (mut ws, w, _) = water_and_fire();
        ws.begin_drag(w, DVec2::ZERO);
        ws.clear();
        assert!(ws.tiles().is_empty());
        assert_eq!(ws.dragging(), None);
        assert_eq!(ws.inventory().len(), 4);
    }
}
