use std::time::{Duration, Instant};

use crate::game::Phase;

/// Statistics for the lifetime of the process. Nothing is written to disk.
pub struct GameMetrics {
    /// Time actually spent running in the current game
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    running_since: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            running_since: None,
        }
    }

    /// Follow the game phase; the clock only runs while the snake moves
    pub fn update(&mut self, phase: Phase) {
        let now = Instant::now();

        if let Some(since) = self.running_since.take() {
            self.elapsed_time += now.duration_since(since);
        }
        if phase == Phase::Running {
            self.running_since = Some(now);
        }
    }

    pub fn on_game_start(&mut self) {
        self.elapsed_time = Duration::ZERO;
        self.running_since = None;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
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
