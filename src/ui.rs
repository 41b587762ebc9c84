use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::{GameSession, PairEnd, Phase, BOARD_HEIGHT, BOARD_WIDTH};
use crate::profile::NAME_LEN;

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🚀 Alien Escape ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Help
        ])
        .split(inner);

    render_status(frame, chunks[0], app);
    render_playfield(frame, chunks[1], &app.session);
    render_help(frame, chunks[2], app);

    match app.session.phase {
        Phase::Menu if !app.entering_name => render_menu_overlay(frame, chunks[1]),
        Phase::Over => render_final_score(frame, chunks[1], app),
        _ => {}
    }

    // Name prompt renders on top of everything
    if app.entering_name {
        render_name_entry(frame, frame.area(), &app.name_buffer);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let score = Line::from(vec![
        Span::styled(" Score: ", Style::default().fg(Color::Rgb(120, 120, 140))),
        Span::styled(
            format!("{}", app.session.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(score), cols[0]);

    let best = Line::from(vec![
        Span::styled("🏆 ", Style::default()),
        Span::styled(
            format!("{}", app.profile.best()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(best).alignment(Alignment::Center),
        cols[1],
    );

    let timer = Line::from(vec![
        Span::styled("⏱ ", Style::default()),
        Span::styled(
            format!("{}s ", app.session.time_left),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(timer).alignment(Alignment::Right),
        cols[2],
    );
}

fn render_playfield(frame: &mut Frame, area: Rect, session: &GameSession) {
    let w = area.width as usize;
    let h = area.height as usize;
    if w == 0 || h == 0 {
        return;
    }

    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); w]; h];

    // Sparse starfield, stable per cell
    for (y, row) in grid.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let hash = (x.wrapping_mul(31).wrapping_add(y.wrapping_mul(17))) % 53;
            if hash == 0 {
                *cell = ('·', Style::default().fg(Color::Rgb(70, 70, 100)));
            } else if hash == 29 {
                *cell = ('✦', Style::default().fg(Color::Rgb(50, 50, 80)));
            }
        }
    }

    // Everything simulates in logical board coordinates; scale down to cells.
    let sx = w as f32 / BOARD_WIDTH;
    let sy = h as f32 / BOARD_HEIGHT;

    for obstacle in &session.obstacles {
        let x0 = (obstacle.x * sx).floor() as i32;
        let x1 = (((obstacle.x + obstacle.width) * sx).ceil() as i32).max(x0 + 1);
        let y0 = (obstacle.y * sy).floor() as i32;
        let y1 = (((obstacle.y + obstacle.height) * sy).ceil() as i32).max(y0 + 1);

        // Cap row sits on the gap edge of each end
        let cap_y = match obstacle.end {
            PairEnd::Top => y1 - 1,
            PairEnd::Bottom => y0,
        };

        for y in y0..y1 {
            if y < 0 || y as usize >= h {
                continue;
            }
            for x in x0..x1 {
                if x < 0 || x as usize >= w {
                    continue;
                }
                let (ch, color) = if y == cap_y {
                    ('▓', Color::Rgb(25, 120, 25))
                } else {
                    ('█', Color::Rgb(40, 160, 40))
                };
                grid[y as usize][x as usize] = (ch, Style::default().fg(color));
            }
        }
    }

    // Ship sprite over its scaled box
    let ship = &session.ship;
    let x0 = (ship.x * sx).floor() as i32;
    let x1 = (((ship.x + ship.width) * sx).ceil() as i32).max(x0 + 1);
    let y0 = (ship.y * sy).floor() as i32;
    let y1 = (((ship.y + ship.height) * sy).ceil() as i32).max(y0 + 1);
    let mid_y = y0 + (y1 - y0) / 2;

    for y in y0..y1 {
        if y < 0 || y as usize >= h {
            continue;
        }
        for x in x0..x1 {
            if x < 0 || x as usize >= w {
                continue;
            }
            let (ch, color) = if y == mid_y && x == x1 - 1 {
                ('▶', Color::Rgb(120, 220, 255)) // nose
            } else {
                ('▓', Color::Rgb(200, 200, 200))
            };
            grid[y as usize][x as usize] = (
                ch,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }
    }

    // Thrust flame behind the ship while climbing
    if session.velocity_y < 0.0 && session.phase == Phase::Running {
        for dx in 1..=2 {
            let x = x0 - dx;
            if x >= 0 && (x as usize) < w && mid_y >= 0 && (mid_y as usize) < h {
                grid[mid_y as usize][x as usize] = (
                    '≈',
                    Style::default()
                        .fg(Color::Rgb(255, 140, 40))
                        .add_modifier(Modifier::BOLD),
                );
            }
        }
    }

    let lines: Vec<Line<'static>> = grid
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let spans = match app.session.phase {
        Phase::Menu => vec![
            Span::styled(" SPACE/↑/X Launch ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
        ],
        Phase::Running => vec![
            Span::styled(" SPACE/↑/X Thrust ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Ctrl+C Quit", Style::default().fg(Color::DarkGray)),
        ],
        Phase::Over => vec![
            Span::styled(" SPACE/ENTER Menu ", Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Ctrl+C Quit", Style::default().fg(Color::DarkGray)),
        ],
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(2));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

fn render_menu_overlay(frame: &mut Frame, area: Rect) {
    let overlay = centered_rect(area, 36, 9);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "👾 ALIEN ESCAPE",
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "S T A R T",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press SPACE to launch",
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

fn render_final_score(frame: &mut Frame, area: Rect, app: &App) {
    let overlay = centered_rect(area, 40, 11);
    frame.render_widget(Clear, overlay);

    let (title, title_color) = if app.session.time_up {
        (" ⏱ TIME UP! ", Color::Rgb(255, 220, 80))
    } else {
        (" 💥 CRASHED! ", Color::Red)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(title_color))
        .title(title)
        .title_style(
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let name = if app.profile.name().is_empty() {
        "PLAYER"
    } else {
        app.profile.name()
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::Rgb(80, 200, 255))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(
                format!("{}", app.session.score_floor()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(
                format!("{}", app.profile.best()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "SPACE or ENTER for menu",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

fn render_name_entry(frame: &mut Frame, area: Rect, name_buffer: &str) {
    let overlay = centered_rect(area, 44, 11);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(" 🚀 WELCOME, PILOT ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let typed_len = name_buffer.chars().count();
    let display_name = format!(
        "{}{}",
        name_buffer,
        "_".repeat(NAME_LEN.saturating_sub(typed_len))
    );

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter your name:",
            Style::default().fg(Color::Rgb(180, 180, 200)),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                display_name,
                Style::default()
                    .fg(Color::Rgb(255, 255, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Rgb(80, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" confirm  ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                "Esc",
                Style::default()
                    .fg(Color::Rgb(80, 200, 255))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" skip", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
