use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{
    Feature, FoodKind, GameSession, GameState, Outcome, PlayerSlot, Position, SnakeColor, Variant,
    World,
};
use crate::metrics::{format_clock, GameMetrics};

/// Entries of the launcher menu, in display order
pub const LAUNCHER_ENTRIES: [(&str, Variant); 3] = [
    ("Single Player", Variant::Classic),
    ("Challenge Mode", Variant::Challenge),
    ("Two Player", Variant::Versus),
];

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session, metrics);
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

        match session.state() {
            GameState::Menu => frame.render_widget(self.render_menu(session), game_area),
            GameState::Playing => {
                frame.render_widget(self.render_grid(session.world()), game_area)
            }
            GameState::GameOver => {
                frame.render_widget(self.render_game_over(session), game_area)
            }
        }

        let controls = self.render_controls(session.variant(), session.state());
        frame.render_widget(controls, chunks[2]);
    }

    /// Launcher screen with `selected` highlighted
    pub fn render_launcher(&self, frame: &mut Frame, selected: usize) {
        let area = centered(frame.area(), 40, 12);
        let mut lines = vec![
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, (label, _)) in LAUNCHER_ENTRIES.iter().enumerate() {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(format!("  {label:^18}  "), style)));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "↑↓ select | Enter launch | Q quit",
            Style::default().fg(Color::Gray),
        )));

        let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::LightBlue)),
        );
        frame.render_widget(menu, area);
    }

    fn render_grid(&self, world: &World) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..world.grid.height {
            let mut spans = Vec::new();
            for x in 0..world.grid.width {
                spans.push(cell_span(world, Position::new(x, y)));
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let mut spans = Vec::new();

        match session.variant() {
            Variant::Versus => {
                for snake in &session.world().snakes {
                    spans.push(Span::styled(
                        format!("{}: ", snake.name),
                        Style::default().fg(snake_color(snake.color)),
                    ));
                    spans.push(Span::styled(snake.score.to_string(), value));
                    spans.push(Span::raw("    "));
                }
            }
            Variant::Classic | Variant::Challenge => {
                spans.push(Span::styled("Score: ", label));
                spans.push(Span::styled(session.score().to_string(), value));
                spans.push(Span::raw("    "));
                if session.config().tracks_high_score {
                    spans.push(Span::styled("Best: ", label));
                    spans.push(Span::styled(
                        session.best_score().max(session.score()).to_string(),
                        value,
                    ));
                    spans.push(Span::raw("    "));
                }
                spans.push(Span::styled(
                    session.config().mode_name.clone(),
                    Style::default().fg(Color::Magenta),
                ));
                spans.push(Span::raw("    "));
            }
        }

        spans.push(Span::styled("Time: ", label));
        let clock = match session.time_remaining() {
            Some(remaining) => format_clock(remaining),
            None => metrics.format_time(),
        };
        spans.push(Span::styled(clock, Style::default().fg(Color::White)));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_menu(&self, session: &GameSession) -> Paragraph<'_> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                match session.variant() {
                    Variant::Classic => "SNAKE",
                    Variant::Challenge => "CHALLENGE MODE",
                    Variant::Versus => "TWO PLAYER SNAKE",
                },
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match session.variant() {
            Variant::Challenge => {
                let features = session.features();
                for (i, feature) in Feature::ALL.iter().enumerate() {
                    let mark = if features.is_enabled(*feature) { "x" } else { " " };
                    lines.push(Line::from(vec![
                        Span::styled(format!("{} ", i + 1), Style::default().fg(Color::Cyan)),
                        Span::raw(format!("[{mark}] {:<16}", feature.label())),
                    ]));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    Span::styled("C ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        "CHAOS MODE (Everything!)",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    features.mode_name(),
                    Style::default().fg(Color::Magenta),
                )));
            }
            Variant::Classic => {
                lines.push(Line::from(vec![
                    Span::styled("High Score: ", Style::default().fg(Color::Yellow)),
                    Span::raw(session.best_score().to_string()),
                ]));
            }
            Variant::Versus => {
                lines.push(Line::from("Player A: WASD    Player B: Arrow keys"));
                lines.push(Line::from("Most fruit in two minutes wins"));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        let world = session.world();
        match session.outcome() {
            Some(outcome) => {
                for snake in &world.snakes {
                    text.push(Line::from(Span::styled(
                        format!("{}: {}", snake.name, snake.score),
                        Style::default().fg(snake_color(snake.color)),
                    )));
                }
                text.push(Line::from(""));
                let verdict = match outcome {
                    Outcome::Winner(PlayerSlot::One) => "Player A Wins!",
                    Outcome::Winner(PlayerSlot::Two) => "Player B Wins!",
                    Outcome::Draw => "It's a Draw!",
                };
                text.push(Line::from(Span::styled(
                    verdict,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            None => {
                text.push(Line::from(vec![
                    Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        session.score().to_string(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
                if session.config().tracks_high_score {
                    let best = session.best_score();
                    let line = if session.is_new_best() {
                        Span::styled(
                            "New High Score!",
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::raw(format!("High Score: {best}"))
                    };
                    text.push(Line::from(line));
                }
            }
        }

        let again = if session.variant() == Variant::Challenge {
            " for the menu or "
        } else {
            " to play again or "
        };
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(again, Style::default().fg(Color::Gray)),
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

    fn render_controls(&self, variant: Variant, state: GameState) -> Paragraph<'_> {
        let mut spans = match variant {
            Variant::Versus => vec![
                Span::styled("WASD", Style::default().fg(Color::Green)),
                Span::raw(" / "),
                Span::styled("↑↓←→", Style::default().fg(Color::Blue)),
                Span::raw(" to move | "),
            ],
            Variant::Classic | Variant::Challenge => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
            ],
        };
        if variant == Variant::Challenge && state == GameState::Menu {
            spans.push(Span::styled("1-5", Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(" toggle | "));
        }
        spans.push(Span::styled("Esc", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" menu | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(world: &World, pos: Position) -> Span<'static> {
    for snake in &world.snakes {
        let color = if snake.alive {
            snake_color(snake.color)
        } else {
            Color::DarkGray
        };
        if snake.head() == pos {
            return Span::styled("■ ", Style::default().fg(color).add_modifier(Modifier::BOLD));
        }
        if snake.body.contains(&pos) {
            return Span::styled("□ ", Style::default().fg(color));
        }
    }

    if let Some(food) = world.active_foods().find(|f| f.position == pos) {
        let (glyph, color) = match food.kind {
            FoodKind::Apple => ("O ", Color::Red),
            FoodKind::Banana => (") ", Color::Yellow),
            FoodKind::Grapes => ("% ", Color::Magenta),
            FoodKind::Star => ("* ", Color::LightYellow),
        };
        return Span::styled(glyph, Style::default().fg(color).add_modifier(Modifier::BOLD));
    }

    if world.obstacle_at(pos) {
        return Span::styled("# ", Style::default().fg(Color::Gray));
    }

    Span::styled(". ", Style::default().fg(Color::DarkGray))
}

fn snake_color(color: SnakeColor) -> Color {
    match color {
        SnakeColor::Green => Color::Green,
        SnakeColor::Blue => Color::LightBlue,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
