use std::time::{Duration, Instant};

use crate::game::StepResult;

/// Session counters; nothing here outlives the process
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub food_eaten: u32,
    pub resets: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            food_eaten: 0,
            resets: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold one tick into the counters.
    ///
    /// `length` is the snake's target length after the step.
    pub fn on_step(&mut self, result: &StepResult, length: usize) {
        if result.ate_food {
            self.food_eaten += 1;
        }
        let reached = result.final_length.unwrap_or(length);
        self.best_length = self.best_length.max(reached);
        if result.reset.is_some() {
            self.on_game_start();
            self.resets += 1;
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ResetReason;

    fn step(ate_food: bool, reset: Option<ResetReason>, final_length: Option<usize>) -> StepResult {
        StepResult {
            tick: 1,
            ate_food,
            vacated: None,
            reset,
            final_length,
        }
    }

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_length_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_step(&step(true, None, None), 2);
        metrics.on_step(&step(true, None, None), 3);
        assert_eq!(metrics.best_length, 3);
        assert_eq!(metrics.food_eaten, 2);

        // A reset reports the length that was lost
        metrics.on_step(&step(false, Some(ResetReason::SelfCollision), Some(7)), 1);
        assert_eq!(metrics.best_length, 7);
        assert_eq!(metrics.resets, 1);

        metrics.on_step(&step(false, None, None), 1);
        assert_eq!(metrics.best_length, 7); // Should not decrease
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
