use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use super::app::{App, Speaker};

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Conversation + tasks
            Constraint::Length(3), // Input
            Constraint::Length(1), // Help
        ].as_ref())
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(rows[0]);

    // Conversation
    let mut lines: Vec<Line> = Vec::new();
    for entry in &app.transcript {
        let (label, style) = match entry.speaker {
            Speaker::User => ("You", Style::default().fg(Color::Cyan)),
            Speaker::Bot if entry.is_error => (
                app.bot_name.as_str(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Speaker::Bot => (app.bot_name.as_str(), Style::default().fg(Color::Gray)),
        };
        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            style.add_modifier(Modifier::BOLD),
        )));
        for text_line in entry.text.lines() {
            lines.push(Line::from(Span::styled(format!("  {text_line}"), style)));
        }
        lines.push(Line::from(""));
    }

    let inner_width = columns[0].width.saturating_sub(2).max(1) as usize;
    let inner_height = columns[0].height.saturating_sub(2);
    let wrapped: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(inner_width))
        .sum();
    let bottom = last_page_offset(wrapped, inner_height);
    app.scroll = app.scroll.min(bottom);

    let conversation = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((bottom - app.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(format!("{} - Chat", app.bot_name)));
    f.render_widget(conversation, columns[0]);

    // Tasks
    let task_rows: Vec<Row> = app
        .session
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if t.done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(format!("{}.", i + 1)),
                Cell::from(t.to_string()),
            ]).style(style)
        })
        .collect();

    let widths = [Constraint::Length(4), Constraint::Min(20)];
    let table = Table::new(task_rows, widths)
        .header(Row::new(vec!["#", "Task"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Tasks ({})",
            app.session.tasks().count()
        )));
    f.render_widget(table, columns[1]);

    // Input
    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Say something"));
    f.render_widget(input, rows[1]);
    f.set_cursor_position((
        rows[1].x + 1 + app.input_buffer.chars().count() as u16,
        rows[1].y + 1,
    ));

    let help = Paragraph::new("Enter: Send | Esc: Clear | Up/Down: Scroll | Ctrl-C: Quit | bye: Quit")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, rows[2]);
}

/// Scroll offset that shows the last `height` of `wrapped` lines.
fn last_page_offset(wrapped: usize, height: u16) -> u16 {
    u16::try_from(wrapped).unwrap_or(u16::MAX).saturating_sub(height)
}
