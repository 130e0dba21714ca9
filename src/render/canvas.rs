//! Persistent per-cell color buffer.
//!
//! The canvas is only ever painted over, never rebuilt from scratch, so a
//! moving snake would leave a trail unless the vacated tail cell is painted
//! back to background. [`Canvas::apply`] does exactly that from a
//! [`StepResult`], and wipes the whole buffer when the game resets.

use crate::game::{Entity, Food, Grid, Palette, Position, Rgb, Snake, StepResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    grid: Grid,
    background: Rgb,
    cells: Vec<Rgb>,
}

impl Canvas {
    pub fn new(grid: Grid, background: Rgb) -> Self {
        Self {
            grid,
            background,
            cells: vec![background; grid.cell_count()],
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.grid
            .contains(pos)
            .then(|| pos.y as usize * self.grid.width + pos.x as usize)
    }

    pub fn get(&self, pos: Position) -> Option<Rgb> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn paint(&mut self, pos: Position, color: Rgb) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = color;
        }
    }

    pub fn erase(&mut self, pos: Position) {
        self.paint(pos, self.background);
    }

    pub fn clear(&mut self) {
        self.cells.fill(self.background);
    }

    pub fn draw<E: Entity>(&mut self, entity: &E, palette: &Palette) {
        let color = entity.color(palette);
        for pos in entity.cells() {
            self.paint(pos, color);
        }
    }

    /// Bring the canvas up to date with one tick.
    pub fn apply(&mut self, result: &StepResult, snake: &Snake, food: &Food, palette: &Palette) {
        if result.reset.is_some() {
            self.clear();
        }
        self.draw(snake, palette);
        if let Some(tail) = result.vacated {
            // On a one-cell-wide grid the head can wrap onto the cell it left
            if !snake.contains(tail) {
                self.erase(tail);
            }
        }
        self.draw(food, palette);
    }

    /// Rows of colors, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> + '_ {
        self.cells.chunks(self.grid.width)
    }
}
