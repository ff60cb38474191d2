use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, GameSnapshot, Phase, Position};
use crate::metrics::GameMetrics;

/// What occupies one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Head(Direction),
    CrashedHead,
    Body,
    Food,
    Empty,
}

impl Cell {
    pub fn at(snapshot: &GameSnapshot, pos: Position) -> Self {
        if snapshot.head() == Some(pos) {
            if snapshot.crashing {
                Cell::CrashedHead
            } else {
                Cell::Head(snapshot.direction)
            }
        } else if snapshot.snake.contains(&pos) {
            Cell::Body
        } else if pos == snapshot.food && !snapshot.game_over {
            Cell::Food
        } else {
            Cell::Empty
        }
    }

    fn span(self) -> Span<'static> {
        match self {
            Cell::Head(direction) => {
                let glyph = match direction {
                    Direction::Up => "▲ ",
                    Direction::Down => "▼ ",
                    Direction::Left => "◀ ",
                    Direction::Right => "▶ ",
                };
                Span::styled(
                    glyph,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            }
            Cell::CrashedHead => Span::styled(
                "× ",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::REVERSED),
            ),
            Cell::Body => Span::styled("□ ", Style::default().fg(Color::Green)),
            Cell::Food => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Cell::Empty => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &GameSnapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.game_over {
            frame.render_widget(self.render_game_over(snapshot, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(snapshot.phase), chunks[2]);
    }

    fn render_grid(&self, snapshot: &GameSnapshot) -> Paragraph<'static> {
        let size = snapshot.board_size as i32;
        let lines: Vec<Line> = (0..size)
            .map(|y| {
                let spans: Vec<Span> = (0..size)
                    .map(|x| Cell::at(snapshot, Position::new(x, y)).span())
                    .collect();
                Line::from(spans)
            })
            .collect();

        let (title, border) = match snapshot.phase {
            Phase::Ready => (" Snake - press an arrow to start ", Color::White),
            Phase::Running => (" Snake ", Color::White),
            Phase::Paused => (" Snake - paused ", Color::Yellow),
            Phase::Dissolving | Phase::GameOver => (" Snake - crashed ", Color::Red),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Multiplier: ", label),
            Span::styled(format!("x{}", snapshot.multiplier), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", snapshot.speed_ms), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &GameSnapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let bold = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled("GAME OVER", bold(Color::Red))]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(snapshot.score.to_string(), bold(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'static> {
        let pause_hint = match phase {
            Phase::Paused => " to resume | ",
            Phase::Ready => " to start | ",
            _ => " to pause | ",
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(pause_hint),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
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
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(snapshot: &GameSnapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot, &GameMetrics::new()))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_cells() {
        let snapshot = GameEngine::new(GameConfig::default()).snapshot();

        assert_eq!(
            Cell::at(&snapshot, Position::new(10, 10)),
            Cell::Head(Direction::Right)
        );
        assert_eq!(Cell::at(&snapshot, Position::new(9, 10)), Cell::Body);
        assert_eq!(Cell::at(&snapshot, Position::new(15, 10)), Cell::Food);
        assert_eq!(Cell::at(&snapshot, Position::new(0, 0)), Cell::Empty);
    }

    #[test]
    fn test_crashed_head() {
        let mut snapshot = GameEngine::new(GameConfig::default()).snapshot();
        snapshot.crashing = true;
        assert_eq!(Cell::at(&snapshot, Position::new(10, 10)), Cell::CrashedHead);
    }

    #[test]
    fn test_renders_grid_and_score() {
        let snapshot = GameEngine::new(GameConfig::default()).snapshot();
        let text = screen_text(&snapshot);

        assert!(text.contains("Score:"));
        assert!(text.contains("x1"));
        assert!(text.contains("press an arrow to start"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut snapshot = GameEngine::new(GameConfig::default()).snapshot();
        snapshot.game_over = true;
        snapshot.phase = Phase::GameOver;
        snapshot.score = 120;

        let text = screen_text(&snapshot);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("120"));
    }
}
