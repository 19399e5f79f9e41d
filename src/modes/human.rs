use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::audio::{Silent, SoundCue, SoundPlayer, TerminalBell, play_best_effort};
use crate::game::{Difficulty, GameConfig, GameEngine, Phase, TickOutcome};
use crate::input::{InputHandler, KeyAction, SwipeDetector};
use crate::metrics::GameMetrics;
use crate::persistence::{FileHighScoreStore, HighScoreStore};
use crate::render::Renderer;

/// Interactive terminal game: the only driver of the engine's ticks
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeDetector,
    store: Box<dyn HighScoreStore>,
    sound: Box<dyn SoundPlayer>,
    /// Speed picked by the player
    difficulty: Difficulty,
    /// Speed the tick timer is currently running at
    active_difficulty: Difficulty,
    /// Ticking was (re)started since the timer was last built
    loop_restarted: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let store = Box::new(FileHighScoreStore::new(config.high_score_path.clone()));
        let sound: Box<dyn SoundPlayer> = if config.sound {
            Box::new(TerminalBell::new(stderr()))
        } else {
            Box::new(Silent)
        };

        Self::with_parts(GameEngine::new(config), store, sound)
    }

    pub fn with_parts(
        mut engine: GameEngine,
        store: Box<dyn HighScoreStore>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        let high_score = store.load().unwrap_or_else(|e| {
            error!("Error loading high score: {:#}", e);
            0
        });
        let swipe = SwipeDetector::new(engine.config().swipe_threshold);
        let difficulty = engine.config().difficulty;

        // Wait for the player to press start
        engine.pause();

        Self {
            engine,
            metrics: GameMetrics::new(high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            swipe,
            store,
            sound,
            difficulty,
            active_difficulty: difficulty,
            loop_restarted: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            "Starting game on a {0}x{0} grid at {1} speed",
            self.engine.config().tile_count,
            self.difficulty.label()
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = new_tick_timer(self.active_difficulty.tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.engine.state().is_running() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics, self.difficulty);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if let Some(period) = self.take_timer_change() {
                tick_timer = new_tick_timer(period);
            }

            if self.should_quit {
                break;
            }
        }

        info!("Quitting after {} games", self.metrics.games_played);
        Ok(())
    }

    /// New tick period if the loop was restarted with a different speed
    fn take_timer_change(&mut self) -> Option<Duration> {
        if !std::mem::take(&mut self.loop_restarted) || self.active_difficulty == self.difficulty
        {
            return None;
        }

        self.active_difficulty = self.difficulty;
        Some(self.active_difficulty.tick_interval())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);
                self.apply_action(action);
            }
            Event::Mouse(mouse) => {
                if let Some(direction) = self.swipe.handle_mouse_event(mouse) {
                    self.engine.set_direction(direction);
                }
            }
            _ => {}
        }
    }

    fn apply_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                self.engine.set_direction(direction);
            }
            KeyAction::TogglePause => self.toggle_pause(),
            KeyAction::Restart => self.reset_game(),
            KeyAction::SelectDifficulty(difficulty) => {
                if difficulty != self.difficulty {
                    info!("Speed set to {}", difficulty.label());
                    self.difficulty = difficulty;
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn toggle_pause(&mut self) {
        if self.engine.state().is_game_over() {
            self.reset_game();
            return;
        }

        self.engine.toggle_pause();
        let state = self.engine.state();
        if state.is_running() {
            if state.steps == 0 {
                self.metrics.on_game_start();
            } else {
                self.metrics.on_resume();
            }
            self.loop_restarted = true;
        } else {
            self.metrics.on_pause();
        }
    }

    fn update_game(&mut self) {
        match self.engine.tick() {
            TickOutcome::AteFood => play_best_effort(self.sound.as_mut(), SoundCue::Eat),
            TickOutcome::GameOver(reason) => {
                let score = self.engine.state().score;
                info!("Game over ({:?}) with score {}", reason, score);
                play_best_effort(self.sound.as_mut(), SoundCue::GameOver);

                if self.metrics.on_game_over(score) {
                    info!("New high score: {}", score);
                    if let Err(e) = self.store.save(score) {
                        error!("Error saving high score: {:#}", e);
                    }
                }
            }
            TickOutcome::Moved | TickOutcome::Idle => {}
        }
    }

    fn reset_game(&mut self) {
        self.engine.restart();
        self.metrics.on_game_start();
        self.loop_restarted = true;
        info!("Game restarted");
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.engine.state().phase
    }
}

/// Timer whose first tick is one full period away
fn new_tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
