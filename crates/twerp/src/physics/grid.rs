//! Brick grid: a uniform grid of cells that a moving body can strike.
//!
//! Cells are stored in row-major order: index = y * width + x.
//! A cell with value 0 is empty; any other value is a solid brick whose
//! value counts the hits it can still take.

use glam::Vec2;

use super::collision::{check_collision_block, CollisionResult};
use crate::math::color::{Rgb, RED};
use crate::error::{Result, TwerpError};
use crate::math::Bounds;

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Hit count; 0 means passable.
    pub value: u32,
    pub color: Rgb,
    pub border: Rgb,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            value: 0,
            color: RED,
            border: RED.darken(),
        }
    }

    pub fn brick(value: u32, color: Rgb) -> Self {
        Self {
            value,
            color,
            border: color.darken(),
        }
    }

    pub fn is_solid(&self) -> bool {
        self.value != 0
    }

    /// Take one hit. Returns `true` when this hit clears the cell.
    pub fn hit(&mut self) -> bool {
        if self.value == 0 {
            return false;
        }
        self.value -= 1;
        self.value == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Grid coordinates of a cell, used as the collision target.
pub type CellCoord = (u32, u32);

#[derive(Debug, Clone)]
pub struct BrickGrid {
    /// Width of the grid in cells.
    width: u32,
    /// Height of the grid in cells.
    height: u32,
    /// Edge length of each square cell in world units. Always finite and > 0.
    cell_size: f32,
    /// World position of the grid's top-left corner.
    pub origin: Vec2,
    cells: Vec<Cell>,
}

impl BrickGrid {
    /// Create a grid of empty cells. Rejects a cell size that is not
    /// finite and positive.
    pub fn new(width: u32, height: u32, cell_size: f32) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(TwerpError::DegenerateCellSize(cell_size));
        }
        let count = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            cell_size,
            origin: Vec2::ZERO,
            cells: vec![Cell::empty(); count],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Get a cell at grid position (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y))
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = self.index(x, y);
        self.cells.get_mut(index)
    }

    /// Set a cell; out-of-range positions are ignored.
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill every cell from a function of its coordinates.
    pub fn fill_with(&mut self, mut f: impl FnMut(u32, u32) -> Cell) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = self.index(x, y);
                self.cells[index] = f(x, y);
            }
        }
    }

    /// Visit every cell with its coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (((i % width) as u32, (i / width) as u32), c))
    }

    /// World-space bounds of a cell.
    pub fn cell_bounds(&self, x: u32, y: u32) -> Bounds {
        Bounds::new(
            x as f32 * self.cell_size,
            y as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
        .translate(self.origin)
    }

    /// World-space bounds of the whole grid.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.origin.x,
            self.origin.y,
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    /// Convert a world position to grid coordinates.
    pub fn world_to_cell(&self, world_pos: Vec2) -> Option<CellCoord> {
        let local = (world_pos - self.origin) / self.cell_size;
        let (fx, fy) = (local.x.floor(), local.y.floor());
        if fx.is_nan() || fy.is_nan() || fx < 0.0 || fy < 0.0 {
            return None;
        }
        let (x, y) = (fx as u32, fy as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x, y))
    }

    /// Count of solid cells. Zero means the grid is cleared.
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_solid()).count()
    }
}

/// Check a body moving from `old` by `velocity` against the grid.
///
/// The four corners of the moved bounds are probed in the order top-right,
/// bottom-right, bottom-left, top-left. Each corner that lands on a solid
/// cell runs a block test against that cell; the first hit wins and carries
/// the cell coordinates as its target.
pub fn check_collision_grid(grid: &BrickGrid, old: Bounds, velocity: Vec2) -> CollisionResult<CellCoord> {
    let area = grid.bounds();
    let moved = old.translate(velocity);
    if !area.intersects(&moved) && !area.intersects(&old) {
        return CollisionResult::miss();
    }

    let corners = [
        moved.top_right(),
        moved.bottom_right(),
        moved.bottom_left(),
        moved.top_left(),
    ];
    for corner in corners {
        let Some((x, y)) = grid.world_to_cell(corner) else {
            continue;
        };
        let Some(cell) = grid.get(x, y) else {
            continue;
        };
        if !cell.is_solid() {
            continue;
        }
        let r = check_collision_block(old, grid.cell_bounds(x, y), velocity);
        if r.collided {
            return r.with_target((x, y));
        }
    }

    CollisionResult::miss()
}
