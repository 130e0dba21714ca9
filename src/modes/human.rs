use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Direction, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Canvas, Renderer};

/// Whether the loop keeps going after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct HumanMode {
    engine: GameEngine,
    canvas: Canvas,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Directions pressed since the last tick, oldest first
    inputs: Vec<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let engine = GameEngine::new(config);
        let palette = engine.config().palette;
        let mut canvas = Canvas::new(engine.config().grid(), palette.background);
        canvas.draw(engine.snake(), &palette);
        canvas.draw(engine.food(), &palette);

        Self {
            engine,
            canvas,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            inputs: Vec::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        if let Err(err) = self.cleanup_terminal(&mut terminal) {
            error!("terminal cleanup failed: {:#}", err);
            result?;
            return Err(err);
        }

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.draw(terminal)?;

        loop {
            let control = tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key),
                    Some(Ok(Event::Resize(_, _))) => {
                        terminal.autoresize().context("Failed to resize terminal")?;
                        self.draw(terminal)?;
                        Control::Continue
                    }
                    Some(Ok(_)) => Control::Continue,
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => Control::Quit,
                },

                _ = tick_timer.tick() => {
                    self.tick();
                    self.draw(terminal)?;
                    Control::Continue
                }

                _ = tokio::signal::ctrl_c() => Control::Quit,
            };

            if control == Control::Quit {
                info!("quit after {} ticks", self.engine.ticks());
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.inputs.push(direction);
                Control::Continue
            }
            KeyAction::Restart => {
                self.restart();
                Control::Continue
            }
            KeyAction::Quit => Control::Quit,
            KeyAction::None => Control::Continue,
        }
    }

    /// Advance the game by one tick and fold the result into the canvas
    fn tick(&mut self) {
        let result = self.engine.step(self.inputs.drain(..));
        let palette = self.engine.config().palette;
        self.canvas.apply(&result, self.engine.snake(), self.engine.food(), &palette);
        self.metrics.on_step(&result, self.engine.snake().length());
    }

    fn restart(&mut self) {
        let result = self.engine.restart();
        let palette = self.engine.config().palette;
        self.canvas.apply(&result, self.engine.snake(), self.engine.food(), &palette);
        self.metrics.on_step(&result, self.engine.snake().length());
        self.inputs.clear();
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        terminal
            .draw(|frame| {
                self.renderer
                    .render(frame, &self.canvas, self.engine.snake(), &self.metrics);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
