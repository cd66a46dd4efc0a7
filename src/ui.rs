//! UI layout and rendering for ptop.
//!
//! One header row of host gauges, the ranked process table, a one-line key
//! hint footer, and an open-files popup over the top when toggled.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::collectors::Sampler;
use crate::theme;

/// Main draw function.
pub fn draw<P: Sampler>(f: &mut Frame, app: &App<P>) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    draw_gauges(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    draw_footer(f, chunks[2]);

    if app.show_files {
        draw_files_overlay(f, app, area);
    }
}

fn draw_gauges<P: Sampler>(f: &mut Frame, app: &App<P>, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let cpu = Gauge::default()
        .block(Block::default().title(" CPU ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(theme::percent_color(app.cpu_percent)))
        .ratio((app.cpu_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", app.cpu_percent));
    f.render_widget(cpu, halves[0]);

    let mem = Gauge::default()
        .block(Block::default().title(" MEM ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(theme::percent_color(app.mem_percent)))
        .ratio((app.mem_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", app.mem_percent));
    f.render_widget(mem, halves[1]);
}

fn draw_table<P: Sampler>(f: &mut Frame, app: &App<P>, area: Rect) {
    let title = format!(
        " Processes ({}) │ Sort: {} ▼ ",
        app.rows.len(),
        app.sort_key.name()
    );
    let block = Block::default().title(title).borders(Borders::ALL);

    let header_cells = ["PID", "NAME", "CPU%", "MEM%", "READ/s", "WRITE/s", "OPEN FILES"];
    let header = Row::new(header_cells.iter().map(|h| {
        let style = if *h == app.sort_key.name() {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        Span::styled(*h, style)
    }))
    .height(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let s = &r.sample;
            let row = Row::new(vec![
                Span::styled(format!("{:>7}", s.pid), Style::default().fg(Color::DarkGray)),
                Span::styled(s.name.clone(), Style::default().fg(Color::White)),
                Span::styled(
                    format!("{:>6.1}", s.cpu_percent),
                    Style::default().fg(theme::percent_color(s.cpu_percent)),
                ),
                Span::styled(
                    format!("{:>6.1}", s.mem_percent),
                    Style::default().fg(theme::percent_color(s.mem_percent)),
                ),
                Span::styled(
                    format!("{:>12}", theme::humanize_rate(r.read_rate)),
                    Style::default().fg(theme::rate_color(r.read_rate)),
                ),
                Span::styled(
                    format!("{:>12}", theme::humanize_rate(r.write_rate)),
                    Style::default().fg(theme::rate_color(r.write_rate)),
                ),
                Span::styled(files_preview(&s.open_files), Style::default().fg(Color::DarkGray)),
            ]);

            if i == app.selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(20),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Fill(1),
    ];

    let table = Table::new(rows, widths).header(header).block(block).column_spacing(1);
    f.render_widget(table, area);
}

/// At most three paths joined, a count for the rest, `-` when empty.
fn files_preview(files: &[String]) -> String {
    if files.is_empty() {
        return "-".to_string();
    }

    let shown: Vec<&str> = files.iter().take(3).map(String::as_str).collect();
    if files.len() > 3 {
        format!("{} (+{})", shown.join(", "), files.len() - 3)
    } else {
        shown.join(", ")
    }
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![Span::styled(
        " q quit │ c/r/w sort: cpu/read/write │ ↑/↓ select │ enter open files",
        Style::default().fg(Color::DarkGray),
    )]);
    f.render_widget(Paragraph::new(hints), area);
}

fn draw_files_overlay<P: Sampler>(f: &mut Frame, app: &App<P>, area: Rect) {
    let Some(row) = app.selected_row() else {
        return;
    };

    let files = &row.sample.open_files;
    let mut lines: Vec<Line> = files.iter().map(|p| Line::from(p.as_str())).collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no open files)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let popup_width = 70.min(area.width);
    let popup_height = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2)).max(3);
    let popup_area = Rect {
        x: (area.width.saturating_sub(popup_width)) / 2,
        y: (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);

    let title = format!(" Open files: {} ({}) ", row.sample.name, row.sample.pid);
    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(popup, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_preview_empty() {
        assert_eq!(files_preview(&[]), "-");
    }

    #[test]
    fn test_files_preview_up_to_three() {
        let files = vec!["/a".to_string(), "/b".to_string()];
        assert_eq!(files_preview(&files), "/a, /b");
    }

    #[test]
    fn test_files_preview_caps_at_three_with_count() {
        let files: Vec<String> = (0..5).map(|i| format!("/f{i}")).collect();
        assert_eq!(files_preview(&files), "/f0, /f1, /f2 (+2)");
    }
}
