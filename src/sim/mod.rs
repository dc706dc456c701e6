//! Toy simulations
//!
//! Everything the toys compute lives here. This module must stay pure:
//! - Seeded RNG only
//! - Time passed in by the caller (no clocks)
//! - Stable iteration order (insertion / stacking order)
//! - No rendering, network or platform dependencies

pub mod budget;
pub mod circle;
pub mod collision;
pub mod particles;
pub mod quest;
pub mod stroke;
pub mod tile;
pub mod workspace;

pub use budget::{Cart, SHOP_ITEMS, TOTAL_BUDGET, format_money};
pub use circle::{CircleFit, CircleScore, ScoreError, score_stroke, verdict};
pub use collision::{DropHit, find_drop_target};
pub use particles::{Particle, ParticleField};
pub use quest::{Fighter, Quest, Strike, Upgrade};
pub use stroke::{CircleRound, RoundPhase, Stroke};
pub use tile::{CraftElement, Inventory, TileId, TileInstance};
pub use workspace::{CombinationId, CombinationRequest, CombineOutcome, Workspace};
