use std::collections::HashSet;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied at the last tick
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction.
    ///
    /// Extra segments are laid out behind the head, opposite to `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];
        let (dx, dy) = direction.opposite().delta();

        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(dx, dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first; `None` if `body` is empty
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Prepend the next head in the current direction, dropping the tail
    /// unless `grow` is set.
    pub fn advance(&mut self, grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// State-machine phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// Snake covers every cell, so no food can be placed
    BoardFull,
}

impl GameOverReason {
    pub fn describe(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "Hit the wall",
            GameOverReason::SelfCollision => "Ran into itself",
            GameOverReason::BoardFull => "Board cleared",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction that will be applied at the next tick
    pub pending_direction: Direction,
    /// `None` only once the snake fills the whole grid
    pub food: Option<Position>,
    pub tile_count: usize,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a new running game state
    pub fn new(snake: Snake, food: Option<Position>, tile_count: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            tile_count,
            score: 0,
            steps: 0,
            phase: Phase::Running,
            game_over_reason: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let limit = self.tile_count as i32;
        pos.x >= 0 && pos.x < limit && pos.y >= 0 && pos.y < limit
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }

    /// All in-bounds cells not covered by the snake, in row-major order
    pub fn free_cells(&self) -> Vec<Position> {
        free_cells(&self.snake, self.tile_count)
    }
}

pub(crate) fn free_cells(snake: &Snake, tile_count: usize) -> Vec<Position> {
    let occupied: HashSet<Position> = snake.body.iter().copied().collect();
    let n = tile_count as i32;

    (0..n)
        .flat_map(|y| (0..n).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
    }

    #[test]
    fn test_zero_length_snake_still_has_a_head() {
        let snake = Snake::new(Position::new(2, 2), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_from_segments_needs_a_head() {
        assert_eq!(Snake::from_segments(Vec::new(), Direction::Up), None);

        let snake = Snake::from_segments(
            vec![Position::new(3, 3), Position::new(3, 4)],
            Direction::Up,
        )
        .unwrap();
        assert_eq!(snake.head(), Position::new(3, 3));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.advance(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(*snake.body.last().unwrap(), Position::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Some(Position::new(10, 10)),
            20,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_free_cells_excludes_snake() {
        let state = GameState::new(
            Snake::new(Position::new(1, 0), Direction::Right, 2),
            None,
            3,
        );
        let free = state.free_cells();

        assert_eq!(free.len(), 7);
        assert!(!free.contains(&Position::new(0, 0)));
        assert!(!free.contains(&Position::new(1, 0)));
        assert_eq!(free[0], Position::new(2, 0));
    }

    #[test]
    fn test_new_state_starts_running() {
        let state = GameState::new(
            Snake::new(Position::new(1, 1), Direction::Down, 1),
            Some(Position::new(0, 0)),
            4,
        );
        assert!(state.is_running());
        assert_eq!(state.pending_direction, Direction::Down);
        assert_eq!(state.game_over_reason, None);
    }
}
