use std::collections::{HashSet, VecDeque};

use super::direction::Direction;
use super::entity::{Entity, EntityKind};
use super::grid::{Grid, Position};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    grid: Grid,
    /// Body segments, with head at index 0
    segments: VecDeque<Position>,
    /// Target segment count; the tail stops being trimmed while segments < length
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
}

impl Snake {
    /// A one-cell snake at the grid center heading right
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            segments: VecDeque::from([grid.center()]),
            length: 1,
            direction: Direction::Right,
            pending_direction: None,
        }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// The target length is the segment count. Positions are wrapped onto the grid.
    pub fn from_segments(
        grid: Grid,
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().map(|p| grid.wrap(p)).collect();
        if segments.is_empty() {
            let mut snake = Self::new(grid);
            snake.direction = direction;
            return snake;
        }
        Self {
            grid,
            length: segments.len(),
            segments,
            direction,
            pending_direction: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        // segments is never empty: construction and reset both seed one cell,
        // and advance pushes before it pops.
        self.segments[0]
    }

    pub fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    /// Number of segments currently on the grid
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Target segment count
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Every occupied cell, for use as a forbidden set
    pub fn occupied(&self) -> HashSet<Position> {
        self.segments.iter().copied().collect()
    }

    /// Request a direction change for the next tick. Last call wins.
    pub fn steer(&mut self, direction: Direction) {
        self.pending_direction = Some(direction);
    }

    /// Adopt the pending direction unless it would reverse onto the neck.
    pub fn apply_pending_direction(&mut self) {
        let Some(next) = self.pending_direction.take() else {
            return;
        };
        if !self.direction.is_opposite(next) {
            self.direction = next;
        }
    }

    /// Move one cell in the current direction.
    ///
    /// Returns the vacated tail cell, or `None` when the snake grew this tick.
    pub fn advance(&mut self) -> Option<Position> {
        let new_head = self.grid.step(self.head(), self.direction);
        self.segments.push_front(new_head);

        if self.segments.len() > self.length {
            self.segments.pop_back()
        } else {
            None
        }
    }

    /// Lengthen by one; takes effect on the next [`advance`](Self::advance)
    pub fn grow(&mut self) {
        self.length += 1;
    }

    /// True when the head overlaps any other segment
    pub fn detect_self_collision(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|&p| p == head)
    }

    /// Back to a one-cell snake at the center
    pub fn reset(&mut self) {
        *self = Self::new(self.grid);
    }
}

impl Entity for Snake {
    fn kind(&self) -> EntityKind {
        EntityKind::Snake
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }
}
