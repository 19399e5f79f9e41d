use super::{
    action::Direction,
    config::GameConfig,
    state::{GameOverReason, GameState, Phase, Position, Snake, free_cells},
};
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

/// What a single call to [`GameEngine::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is paused or over; nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food, grew and scored
    AteFood,
    /// The game ended on this tick
    GameOver(GameOverReason),
}

/// The game engine: owns the state and advances it one tick at a time
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create an engine around an existing state, e.g. a scripted scenario
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        Self {
            config,
            state,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = initial_state(&config, &mut rng);
        Self { config, state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the state with a fresh game
    pub fn reset(&mut self) -> &GameState {
        self.state = initial_state(&self.config, &mut self.rng);
        &self.state
    }

    /// Start over after a game over (or at any time)
    pub fn restart(&mut self) {
        self.reset();
    }

    /// Queue a direction for the next tick.
    ///
    /// A reversal of the direction applied at the last tick is ignored while
    /// the snake is longer than one segment. Returns whether `direction` was
    /// accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        let snake = &self.state.snake;
        if snake.len() > 1 && snake.direction.is_opposite(direction) {
            debug!("Ignoring reversal to {:?}", direction);
            return false;
        }

        self.state.pending_direction = direction;
        true
    }

    pub fn pause(&mut self) {
        if self.state.phase == Phase::Running {
            self.state.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state.phase == Phase::Paused {
            self.state.phase = Phase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::GameOver => {}
        }
    }

    /// Advance the game by exactly one step
    pub fn tick(&mut self) -> TickOutcome {
        let state = &mut self.state;
        if state.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        state.snake.direction = state.pending_direction;
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = state.food == Some(new_head);

        state.snake.advance(ate_food);
        state.steps += 1;

        if ate_food {
            state.score = state.score.saturating_add(self.config.food_score);
            state.food = place_food(&mut self.rng, &state.snake, state.tile_count);
        }

        let reason = if !state.is_in_bounds(new_head) {
            Some(GameOverReason::Wall)
        } else if state.snake.collides_with_body(new_head) {
            Some(GameOverReason::SelfCollision)
        } else if state.food.is_none() {
            Some(GameOverReason::BoardFull)
        } else {
            None
        };

        match reason {
            Some(reason) => {
                debug!("Game over after {} steps: {:?}", state.steps, reason);
                state.phase = Phase::GameOver;
                state.game_over_reason = Some(reason);
                TickOutcome::GameOver(reason)
            }
            None if ate_food => TickOutcome::AteFood,
            None => TickOutcome::Moved,
        }
    }
}

fn initial_state<R: Rng>(config: &GameConfig, rng: &mut R) -> GameState {
    let snake = Snake::new(
        config.initial_head(),
        config.initial_direction,
        config.initial_length,
    );
    let food = place_food(rng, &snake, config.tile_count);

    GameState::new(snake, food, config.tile_count)
}

/// Pick a uniformly random cell not covered by the snake, if any is left
fn place_food<R: Rng>(rng: &mut R, snake: &Snake, tile_count: usize) -> Option<Position> {
    free_cells(snake, tile_count).choose(rng).copied()
}
