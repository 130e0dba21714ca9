use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    direction::Direction,
    food::Food,
    grid::Position,
    snake::Snake,
};

/// Why the snake was put back to its starting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Head ran into the body
    SelfCollision,
    /// The snake covered every cell, leaving nowhere for food
    BoardFilled,
    /// Player asked for a new game
    Restart,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Tick counter after this step
    pub tick: u64,
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Tail cell freed by the move; `None` when the snake grew
    pub vacated: Option<Position>,
    /// Set when the snake was reset; accumulated draw state should be cleared
    pub reset: Option<ResetReason>,
    /// Final length of the snake that was reset
    pub final_length: Option<usize>,
}

/// The game engine that owns the snake, the food and the RNG
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    rng: R,
    ticks: u64,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration.
    ///
    /// Uses `config.seed` when set, otherwise seeds from the OS.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        let grid = config.grid();
        let snake = Snake::new(grid);
        let mut food = Food::at(grid.center());
        let placed = food.respawn(grid, &snake.occupied(), &mut rng);
        debug_assert!(placed.is_some(), "no free cell for food on a fresh grid");

        Self {
            config,
            snake,
            food,
            rng,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Forward player input to the snake; applied on the next step
    pub fn steer(&mut self, direction: Direction) {
        self.snake.steer(direction);
    }

    /// Replace the snake, e.g. to set up a known position
    pub fn set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    /// Move the food to a chosen cell
    pub fn place_food(&mut self, position: Position) {
        self.food.set_position(self.config.grid().wrap(position));
    }

    /// Execute one tick.
    ///
    /// Order matters: food is checked before self-collision, so growth from
    /// food eaten on a colliding tick is wiped by the reset.
    pub fn step(&mut self, inputs: impl IntoIterator<Item = Direction>) -> StepResult {
        for direction in inputs {
            self.snake.steer(direction);
        }
        self.snake.apply_pending_direction();

        let vacated = self.snake.advance();
        self.ticks += 1;

        let mut result = StepResult {
            tick: self.ticks,
            ate_food: false,
            vacated,
            reset: None,
            final_length: None,
        };

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            result.ate_food = true;
            debug!(
                "tick {}: ate food at {:?}, length now {}",
                self.ticks,
                self.food.position(),
                self.snake.length()
            );

            if self.respawn_food().is_none() {
                warn!(
                    "tick {}: snake fills the {}x{} grid",
                    self.ticks, self.config.grid_width, self.config.grid_height
                );
                self.reset_snake(ResetReason::BoardFilled, &mut result);
                return result;
            }
        }

        if self.snake.detect_self_collision() {
            self.reset_snake(ResetReason::SelfCollision, &mut result);
        }

        result
    }

    /// Start over without waiting for a collision
    pub fn restart(&mut self) -> StepResult {
        let mut result = StepResult {
            tick: self.ticks,
            ate_food: false,
            vacated: None,
            reset: None,
            final_length: None,
        };
        self.reset_snake(ResetReason::Restart, &mut result);
        result
    }

    fn reset_snake(&mut self, reason: ResetReason, result: &mut StepResult) {
        let final_length = self.snake.length();
        info!(
            "tick {}: reset ({:?}) at length {}",
            self.ticks, reason, final_length
        );
        self.snake.reset();
        // A one-cell snake always leaves a free cell on a validated grid.
        let placed = self.respawn_food();
        debug_assert!(placed.is_some(), "no free cell for food after reset");

        result.reset = Some(reason);
        result.final_length = Some(final_length);
        result.vacated = None;
    }

    fn respawn_food(&mut self) -> Option<Position> {
        let forbidden = self.snake.occupied();
        self.food.respawn(self.config.grid(), &forbidden, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;
    use std::iter;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::new(config.with_seed(1234))
    }

    fn pixels(engine: &GameEngine, pos: Position) -> (i32, i32) {
        engine.config().to_pixels(pos)
    }

    #[test]
    fn test_initial_state() {
        let engine = engine(GameConfig::default());
        assert_eq!(pixels(&engine, engine.snake().head()), (320, 240));
        assert_eq!(engine.snake().len(), 1);
        assert_eq!(engine.snake().direction(), Direction::Right);
        assert!(!engine.snake().contains(engine.food().position()));
        assert_eq!(engine.ticks(), 0);
    }

    #[test]
    fn test_first_advance_from_center() {
        let mut engine = engine(GameConfig::default());
        engine.place_food(Position::new(0, 0));

        let result = engine.step(iter::empty());

        assert_eq!(pixels(&engine, engine.snake().head()), (340, 240));
        assert_eq!(engine.snake().len(), 1);
        assert!(!result.ate_food);
        assert_eq!(result.reset, None);
        assert_eq!(result.tick, 1);
        // A length-1 snake leaves its previous cell behind
        assert_eq!(result.vacated, Some(Position::new(16, 12)));
    }

    #[test]
    fn test_wraps_at_right_edge() {
        let mut engine = engine(GameConfig::default());
        let grid = engine.config().grid();
        let start = engine.config().from_pixels(620, 240);
        engine.set_snake(Snake::from_segments(grid, [start], Direction::Right));
        engine.place_food(Position::new(5, 5));

        engine.step(iter::empty());

        assert_eq!(pixels(&engine, engine.snake().head()), (0, 240));
    }

    #[test]
    fn test_reverse_input_ignored() {
        let mut engine = engine(GameConfig::default());
        let grid = engine.config().grid();
        let segments = [(100, 100), (80, 100), (60, 100)]
            .map(|(x, y)| engine.config().from_pixels(x, y));
        engine.set_snake(Snake::from_segments(grid, segments, Direction::Right));
        engine.place_food(Position::new(0, 20));

        engine.step([Direction::Left]);

        assert_eq!(engine.snake().direction(), Direction::Right);
        assert_eq!(pixels(&engine, engine.snake().head()), (120, 100));
    }

    #[test]
    fn test_last_input_wins() {
        let mut engine = engine(GameConfig::default());
        engine.place_food(Position::new(0, 0));

        engine.step([Direction::Up, Direction::Down]);

        assert_eq!(engine.snake().direction(), Direction::Down);
        assert_eq!(engine.snake().head(), Position::new(16, 13));
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine(GameConfig::default());
        let grid = engine.config().grid();
        let food_cell = engine.config().from_pixels(100, 100);
        engine.set_snake(Snake::from_segments(
            grid,
            [food_cell.moved_by(-1, 0)],
            Direction::Right,
        ));
        engine.place_food(food_cell);

        let result = engine.step(iter::empty());

        assert!(result.ate_food);
        assert_eq!(result.reset, None);
        assert_eq!(engine.snake().length(), 2);
        assert_eq!(pixels(&engine, engine.snake().head()), (100, 100));
        assert!(!engine.snake().contains(engine.food().position()));

        // Growth shows up on the next move: no tail removed
        engine.place_food(Position::new(0, 0));
        let result = engine.step(iter::empty());
        assert_eq!(result.vacated, None);
        assert_eq!(engine.snake().len(), 2);
    }

    #[test]
    fn test_self_collision_resets() {
        let mut engine = engine(GameConfig::small());
        let grid = engine.config().grid();
        let snake = Snake::from_segments(
            grid,
            (0..5).map(|i| Position::new(5 - i, 5)),
            Direction::Right,
        );
        engine.set_snake(snake);
        engine.place_food(Position::new(0, 9));

        assert_eq!(engine.step([Direction::Down]).reset, None);
        assert_eq!(engine.step([Direction::Left]).reset, None);
        let result = engine.step([Direction::Up]);

        assert_eq!(result.reset, Some(ResetReason::SelfCollision));
        assert_eq!(result.final_length, Some(5));
        assert_eq!(result.vacated, None);
        assert_eq!(*engine.snake(), Snake::new(grid));
        assert!(!engine.snake().contains(engine.food().position()));
    }

    #[test]
    fn test_growth_wiped_when_eating_into_collision() {
        let mut engine = engine(GameConfig::small());
        let grid = engine.config().grid();
        engine.set_snake(Snake::from_segments(
            grid,
            (0..5).map(|i| Position::new(5 - i, 5)),
            Direction::Right,
        ));
        engine.place_food(Position::new(0, 9));
        engine.step([Direction::Down]);
        engine.step([Direction::Left]);

        // The head is about to land on (4, 5), a body cell; put food there too.
        engine.place_food(Position::new(4, 5));
        let result = engine.step([Direction::Up]);

        assert!(result.ate_food);
        assert_eq!(result.reset, Some(ResetReason::SelfCollision));
        assert_eq!(result.final_length, Some(6));
        assert_eq!(engine.snake().length(), 1);
    }

    #[test]
    fn test_board_filled_resets() {
        let mut engine = engine(GameConfig::new(3, 1));
        let grid = Grid::new(3, 1);
        // Two segments with one pending growth: eating fills all three cells
        let mut snake =
            Snake::from_segments(grid, [Position::new(1, 0), Position::new(0, 0)], Direction::Right);
        snake.grow();
        engine.set_snake(snake);
        engine.place_food(Position::new(2, 0));

        let result = engine.step(iter::empty());

        assert!(result.ate_food);
        assert_eq!(result.reset, Some(ResetReason::BoardFilled));
        assert_eq!(result.final_length, Some(4));
        assert_eq!(engine.snake().len(), 1);
        assert!(!engine.snake().contains(engine.food().position()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no free cell for food")]
    fn test_single_cell_grid_rejected() {
        let _ = GameEngine::new(GameConfig::new(1, 1).with_seed(1));
    }

    #[test]
    fn test_two_cell_grid_places_food() {
        let engine = engine(GameConfig::new(2, 1));
        assert_eq!(engine.snake().head(), Position::new(1, 0));
        assert_eq!(engine.food().position(), Position::new(0, 0));
    }

    #[test]
    fn test_restart() {
        let mut engine = engine(GameConfig::default());
        engine.place_food(Position::new(17, 12));
        engine.step(iter::empty());
        assert_eq!(engine.snake().length(), 2);

        let result = engine.restart();
        assert_eq!(result.reset, Some(ResetReason::Restart));
        assert_eq!(result.final_length, Some(2));
        assert_eq!(engine.snake().length(), 1);
        assert!(!engine.snake().contains(engine.food().position()));
    }

    #[test]
    fn test_food_invariant_over_long_run() {
        let mut engine = engine(GameConfig::small());
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
        for tick in 0..2_000usize {
            let input = turns[(tick / 3) % turns.len()];
            engine.step([input]);
            assert!(!engine.snake().contains(engine.food().position()));
            assert!(engine.config().grid().contains(engine.food().position()));
        }
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = engine(GameConfig::small());
        let mut b = engine(GameConfig::small());
        for _ in 0..200 {
            a.step([Direction::Down]);
            b.step([Direction::Down]);
            assert_eq!(a.food().position(), b.food().position());
            assert_eq!(a.snake(), b.snake());
        }
    }
}
