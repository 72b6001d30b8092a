//! Dashboard rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::controller::MSG_REMOTE_FAILED;
use crate::traits::Indicator;
use crate::ui::theme::{
    COLOR_BORDER, COLOR_DIM, COLOR_DISENGAGED, COLOR_ENGAGED, COLOR_ERROR, COLOR_HEADER,
    COLOR_INDICATOR_TEXT,
};
use crate::ui::Dashboard;

/// Render the whole dashboard into `frame`.
pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(5), // Indicator
            Constraint::Min(3),    // Transcript
            Constraint::Length(1), // Footer
        ])
        .split(size);

    render_title(frame, chunks[0]);
    render_indicator(frame, chunks[1], dashboard);
    render_transcript(frame, chunks[2], dashboard);
    render_footer(frame, chunks[3], dashboard);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Line::from(Span::styled(
        "SEATBELT",
        Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn render_indicator(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let fill = match dashboard.indicator() {
        Indicator::Engaged => COLOR_ENGAGED,
        Indicator::Disengaged => COLOR_DISENGAGED,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Belt ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Vertically centre the label inside the filled area.
    let pad = inner.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(
        dashboard.label().to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(fill).fg(COLOR_INDICATOR_TEXT));
    frame.render_widget(body, inner);
}

fn render_transcript(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Status ");
    let visible = block.inner(area).height as usize;

    // Newest at the bottom; older lines scroll off the top.
    let entries = dashboard.transcript();
    let start = entries.len().saturating_sub(visible);
    let lines: Vec<Line> = entries[start..]
        .iter()
        .map(|entry| {
            let text_style = if entry.text == MSG_REMOTE_FAILED {
                Style::default().fg(COLOR_ERROR)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(COLOR_DIM),
                ),
                Span::styled(entry.text.clone(), text_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let mut spans = vec![Span::styled(
        format!("device {}", dashboard.device_id()),
        Style::default().fg(COLOR_DIM),
    )];
    if dashboard.is_local_only() {
        spans.push(Span::styled(" · local-only", Style::default().fg(COLOR_ERROR)));
    }
    spans.push(Span::styled("  q quit", Style::default().fg(COLOR_DIM)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
