//! Discrete-step collision: swept AABB against blocks and brick grids.

pub mod collision;
pub mod grid;

pub use collision::{check_collision_block, CollisionResult, Direction};
pub use grid::{check_collision_grid, BrickGrid, Cell, CellCoord};
