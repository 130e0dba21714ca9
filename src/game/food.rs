use std::collections::HashSet;

use log::debug;
use rand::Rng;
use rand::seq::IteratorRandom;

use super::entity::{Entity, EntityKind};
use super::grid::{Grid, Position};

/// Random draws tried before falling back to enumerating the free cells
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// A single piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Move to a uniformly random cell of `grid` that is not in `forbidden`.
    ///
    /// Samples up to [`MAX_REJECTION_ATTEMPTS`] cells, then picks uniformly
    /// among the remaining free cells. When every cell is forbidden the
    /// position is left as is and `None` is returned.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        grid: Grid,
        forbidden: &HashSet<Position>,
        rng: &mut R,
    ) -> Option<Position> {
        for _ in 0..MAX_REJECTION_ATTEMPTS {
            let x = rng.gen_range(0..grid.width) as i32;
            let y = rng.gen_range(0..grid.height) as i32;
            let pos = Position::new(x, y);

            if !forbidden.contains(&pos) {
                self.position = pos;
                return Some(pos);
            }
        }

        debug!(
            "food sampling fell back to free-cell scan ({} of {} cells occupied)",
            forbidden.len(),
            grid.cell_count()
        );
        let pos = grid
            .cells()
            .filter(|pos| !forbidden.contains(pos))
            .choose(rng)?;
        self.position = pos;
        Some(pos)
    }
}

impl Entity for Food {
    fn kind(&self) -> EntityKind {
        EntityKind::Food
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.position)
    }
}
