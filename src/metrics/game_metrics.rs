use std::time::{Duration, Instant};

/// Per-session bookkeeping shown alongside the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Set when the last finished game beat the previous high score
    pub new_high_score: bool,
    paused_at: Option<Instant>,
}

impl GameMetrics {
    pub fn new(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
            new_high_score: false,
            paused_at: None,
        }
    }

    /// Refresh the clock; frozen while paused
    pub fn update(&mut self) {
        if self.paused_at.is_none() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.new_high_score = false;
        self.paused_at = None;
    }

    pub fn on_pause(&mut self) {
        if self.paused_at.is_none() {
            self.update();
            self.paused_at = Some(Instant::now());
        }
    }

    /// Shift the start forward by the paused span so it never counts as play
    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.start_time += paused_at.elapsed();
        }
    }

    /// Record a finished game; returns true if it set a new high score
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        self.new_high_score = final_score > self.high_score;
        if self.new_high_score {
            self.high_score = final_score;
        }
        self.new_high_score
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
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::default();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new(8);

        assert!(metrics.on_game_over(10));
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        assert!(!metrics.on_game_over(5));
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert!(!metrics.new_high_score);

        // A tie is not a new record
        assert!(!metrics.on_game_over(10));
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::default();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_game_over(1);
        metrics.on_game_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
        assert!(!metrics.new_high_score);
    }

    #[test]
    fn test_paused_span_is_not_counted() {
        let mut metrics = GameMetrics::default();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_pause();
        let before_pause = metrics.elapsed_time;
        assert!(before_pause.as_millis() >= 20);

        std::thread::sleep(Duration::from_millis(200));
        metrics.update();
        assert_eq!(metrics.elapsed_time, before_pause);

        metrics.on_resume();
        metrics.update();
        assert!(metrics.elapsed_time >= before_pause);
        assert!(metrics.elapsed_time < before_pause + Duration::from_millis(150));
    }

    #[test]
    fn test_resume_without_pause_is_a_no_op() {
        let mut metrics = GameMetrics::default();
        let start = metrics.start_time;
        metrics.on_resume();
        assert_eq!(metrics.start_time, start);
    }
}
