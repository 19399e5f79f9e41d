use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

/// Turns a press/release pair into a direction along the dominant axis.
///
/// A drag must exceed `threshold` pointer units to count as a swipe.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold: i32,
    start: Option<(i32, i32)>,
}

impl SwipeDetector {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold,
            start: None,
        }
    }

    pub fn begin(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    /// Finish a gesture; `None` if there was no press or the drag was too short
    pub fn end(&mut self, x: i32, y: i32) -> Option<Direction> {
        let (start_x, start_y) = self.start.take()?;
        classify(x - start_x, y - start_y, self.threshold)
    }

    /// Feed a terminal mouse event, using cells as pointer units
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        let (x, y) = (i32::from(event.column), i32::from(event.row));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.begin(x, y);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.end(x, y),
            _ => None,
        }
    }
}

fn classify(dx: i32, dy: i32, threshold: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        if dx > threshold {
            Some(Direction::Right)
        } else if dx < -threshold {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > threshold {
        Some(Direction::Down)
    } else if dy < -threshold {
        Some(Direction::Up)
    } else {
        None
    }
}
