use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Difficulty, GameState, Phase, Position};
use crate::metrics::GameMetrics;

/// Label for the start/pause control in the current phase
pub fn pause_label(state: &GameState) -> &'static str {
    match state.phase {
        Phase::Running => "Pause",
        Phase::Paused if state.steps == 0 => "Start",
        Phase::Paused => "Resume",
        Phase::GameOver => "Restart",
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        difficulty: Difficulty,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics, difficulty);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_game_over() {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(state);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.tile_count);

        for y in 0..state.tile_count {
            let mut spans = Vec::with_capacity(state.tile_count);

            for x in 0..state.tile_count {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if state.food == Some(pos) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = if state.phase == Phase::Paused {
            " Snake (paused) "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        difficulty: Difficulty,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("High Score: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(difficulty.label(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let reason = state
            .game_over_reason
            .map(|r| r.describe())
            .unwrap_or_default();

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if metrics.new_high_score {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", key),
            Span::raw(" / "),
            Span::styled("WASD", key),
            Span::raw(" / swipe to move | "),
            Span::styled("Space", key),
            Span::raw(format!(" {} | ", pause_label(state))),
            Span::styled("1-3", key),
            Span::raw(" speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameOverReason, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn sample_state() -> GameState {
        GameState::new(
            Snake::new(Position::new(4, 4), Direction::Right, 2),
            Some(Position::new(1, 1)),
            8,
        )
    }

    fn draw(state: &GameState, metrics: &GameMetrics) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let renderer = Renderer::new();
        terminal
            .draw(|frame| renderer.render(frame, state, metrics, Difficulty::Medium))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_pause_labels() {
        let mut state = sample_state();
        assert_eq!(pause_label(&state), "Pause");

        state.phase = Phase::Paused;
        assert_eq!(pause_label(&state), "Start");

        state.steps = 3;
        assert_eq!(pause_label(&state), "Resume");

        state.phase = Phase::GameOver;
        assert_eq!(pause_label(&state), "Restart");
    }

    #[test]
    fn test_board_shows_snake_food_and_score() {
        let mut state = sample_state();
        state.score = 7;
        let screen = draw(&state, &GameMetrics::new(12));

        assert!(screen.contains("Score: 7"));
        assert!(screen.contains("High Score: 12"));
        assert!(screen.contains("Speed: Medium"));
        assert!(screen.contains('■'));
        assert!(screen.contains('□'));
        assert!(screen.contains('O'));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = sample_state();
        state.score = 9;
        state.phase = Phase::GameOver;
        state.game_over_reason = Some(GameOverReason::Wall);
        let mut metrics = GameMetrics::new(4);
        metrics.on_game_over(9);

        let screen = draw(&state, &metrics);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 9"));
        assert!(screen.contains("Hit the wall"));
        assert!(screen.contains("New high score!"));
    }

    #[test]
    fn test_out_of_bounds_head_is_not_drawn() {
        let mut state = sample_state();
        state.snake = Snake::from_segments(
            vec![Position::new(-1, 0), Position::new(0, 0)],
            Direction::Left,
        )
        .unwrap();
        // Still paints the rest of the board
        let screen = draw(&state, &GameMetrics::default());
        assert!(screen.contains('□'));
        assert!(!screen.contains('■'));
    }
}
