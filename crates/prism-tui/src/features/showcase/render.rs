//! Showcase panel renderer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{HEADLINES, RotationState};

/// Renders the rotating headline panel.
///
/// `focused` draws the focus border; focus is also what suspends the
/// rotation, so the hint line reflects it.
pub fn render_panel(frame: &mut Frame, area: Rect, rotation: &RotationState, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" AI REGULATION RADAR ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 6 || inner.width < 20 {
        return;
    }

    let headline = rotation.current_headline();
    let accent = Style::default().fg(headline.accent);

    let mut lines = vec![
        Line::from(Span::styled(
            "Shaping the Future of AI Governance",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} ", headline.category),
                accent.add_modifier(Modifier::REVERSED),
            ),
            Span::raw(" "),
            Span::styled(format!("[{}]", headline.tag), Style::default().fg(Color::Gray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            headline.title,
            accent.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            headline.subtitle,
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(position_dots(rotation)),
        Line::from(""),
    ];

    let hint = if focused {
        "←/→ browse · rotation paused while focused"
    } else {
        "rotates every 5s"
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn position_dots(rotation: &RotationState) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(HEADLINES.len() * 2);
    for idx in 0..rotation.len() {
        let dot = if idx == rotation.current() {
            Span::styled("●", Style::default().fg(Color::White))
        } else {
            Span::styled("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(dot);
        spans.push(Span::raw(" "));
    }
    spans
}
