use crate::history::snapshot::{BRIGHTNESS_RANGE, CONTRAST_RANGE, Preset};
use crate::tui::app::{App, Control};
use crate::tui::edit::EntryTarget;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.size());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    draw_header(frame, chunks[0], app);
    draw_controls(frame, body[0], app);
    draw_history(frame, body[1], app);
    draw_footer(frame, chunks[2], app);

    if app.entry.is_open() {
        draw_entry_window(frame, app);
    }
    if app.help_mode {
        draw_help_window(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_text = match &app.image {
        Some(path) => format!("Adjust - {}", path.display()),
        None => "Adjust - no image loaded (o to open)".to_string(),
    };
    let header = Paragraph::new(header_text)
        .block(Block::default().borders(Borders::ALL).title("Adjust"))
        .style(Style::default().fg(Color::Cyan));

    frame.render_widget(header, area);
}

fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Controls");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let values = app.live.values;
    for (row, control) in rows.iter().zip(Control::ALL) {
        let focused = app.focus == control;
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if focused { "▶ " } else { "  " };
        let title = format!("{}{}", marker, control.label());

        match control {
            Control::Brightness | Control::Contrast | Control::Threshold => {
                let (value, ratio, label) = match control {
                    Control::Brightness => signed_gauge(values.brightness, BRIGHTNESS_RANGE),
                    Control::Contrast => signed_gauge(values.contrast, CONTRAST_RANGE),
                    _ => (
                        values.threshold as i32,
                        values.threshold as f64 / 255.0,
                        values.threshold.to_string(),
                    ),
                };
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title(title).style(style))
                    .gauge_style(if focused {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(if value == 0 { Color::DarkGray } else { Color::Blue })
                    })
                    .ratio(ratio)
                    .label(label);
                frame.render_widget(gauge, *row);
            }
            Control::Preset => {
                let spans: Vec<Span> = Preset::ALL
                    .iter()
                    .map(|preset| {
                        let name = format!(" {} ", preset);
                        if *preset == values.preset {
                            Span::styled(
                                name,
                                Style::default()
                                    .bg(Color::Yellow)
                                    .fg(Color::Black)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(name, Style::default().fg(Color::Gray))
                        }
                    })
                    .collect();
                let selector = Paragraph::new(Line::from(spans))
                    .block(Block::default().borders(Borders::ALL).title(title).style(style));
                frame.render_widget(selector, *row);
            }
        }
    }
}

fn signed_gauge(value: i8, (min, max): (i8, i8)) -> (i32, f64, String) {
    let span = (max as f64) - (min as f64);
    let ratio = ((value as f64) - (min as f64)) / span;
    (value as i32, ratio.clamp(0.0, 1.0), format!("{:+}", value))
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let cursor = app.history.cursor();
    let marked = |active: bool, text: String| {
        let style = if active {
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if active { "● " } else { "  " };
        ListItem::new(Line::from(Span::styled(format!("{}{}", marker, text), style)))
    };

    let mut items = vec![marked(cursor.is_none(), "baseline".to_string())];
    items.extend(app.history.entries().iter().enumerate().map(|(i, snapshot)| {
        let active = cursor == Some(i);
        let redo_branch = cursor.is_none_or(|c| i > c);
        let item = marked(active, format!("{:>2}. {}", i + 1, snapshot));
        if redo_branch {
            item.style(Style::default().fg(Color::DarkGray))
        } else {
            item
        }
    }));

    let title = format!("History {}/{}", app.history.len(), app.history.capacity());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let availability = |enabled: bool, text: &'static str| {
        if enabled {
            Span::styled(text, Style::default().fg(Color::Green))
        } else {
            Span::styled(text, Style::default().fg(Color::DarkGray))
        }
    };

    let mut spans = vec![
        availability(app.history.can_undo(), "u: undo"),
        Span::raw(" | "),
        availability(app.history.can_redo(), "r: redo"),
        Span::raw(" | ←→: adjust | ↑↓: focus | ?: help | q: quit"),
    ];
    if let Some(status) = &app.status {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn draw_entry_window(frame: &mut Frame, app: &App) {
    let title = match app.entry.target {
        Some(EntryTarget::Value(control)) => format!(" Set {} ", control.label()),
        _ => " Open image ".to_string(),
    };
    let (before_cursor, after_cursor) = app.entry.buffer.split_at(app.entry.cursor_position);
    let text = format!("{}█{}", before_cursor, after_cursor);

    let entry = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Yellow)),
    );

    let area = centered_rect(60, 20, frame.size());
    let area = Rect {
        height: area.height.min(3),
        ..area
    };
    frame.render_widget(Clear, area);
    frame.render_widget(entry, area);
}

fn draw_help_window(frame: &mut Frame) {
    let help_text = vec![
        "Adjust - Keyboard Commands",
        "",
        "CONTROLS:",
        "  ↑↓ / j/k          Move focus between controls",
        "  ←→ / h/l          Adjust focused value (Shift: x10)",
        "  Enter / =         Type an exact value",
        "",
        "HISTORY:",
        "  u / Ctrl+Z        Undo",
        "  r / Ctrl+Y        Redo (also Ctrl+Shift+Z)",
        "  Shift+R           Reset to defaults (clears history)",
        "  a                 Re-run auto-prep (clears history)",
        "",
        "OTHER:",
        "  o                 Open image (clears history)",
        "  ?                 Show this help (press ? or Esc to close)",
        "  q / Ctrl+C        Quit application",
        "",
        "Undo and redo keys are typed as text while an entry box is open.",
    ];

    let help_paragraph = Paragraph::new(help_text.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - Keyboard Commands ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    let area = centered_rect(80, 70, frame.size());

    frame.render_widget(Clear, area);
    frame.render_widget(help_paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_signed_gauge_ratio() {
        assert_eq!(signed_gauge(0, (-100, 100)).1, 0.5);
        assert_eq!(signed_gauge(-100, (-100, 100)).1, 0.0);
        assert_eq!(signed_gauge(100, (-100, 100)).2, "+100");
    }

    #[test]
    fn test_renders_baseline_row_and_controls() {
        let app = App::new(Config::default());
        let screen = render(&app);
        assert!(screen.contains("baseline"));
        assert!(screen.contains("Brightness"));
        assert!(screen.contains("History 0/10"));
    }

    #[test]
    fn test_renders_recorded_entries() {
        let mut app = App::new(Config::default());
        let now = Instant::now();
        app.handle_key_event(KeyEvent::from(KeyCode::Right), now).unwrap();
        app.tick(now + Duration::from_millis(100));

        let screen = render(&app);
        assert!(screen.contains("b=+1 c=+0 t=128 auto"));
        assert!(screen.contains("History 1/10"));
    }

    #[test]
    fn test_renders_help_overlay() {
        let mut app = App::new(Config::default());
        app.help_mode = true;
        assert!(render(&app).contains("Help - Keyboard Commands"));
    }
}
