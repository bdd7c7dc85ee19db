//! Sign-in screen view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{Focus, SignInState};
use crate::features::Busy;
use crate::render::widgets::{button_line, centered_rect, field_lines, link_line, status_lines};

pub fn render_screen(frame: &mut Frame, area: Rect, state: &SignInState, spinner_frame: usize) {
    let popup = centered_rect(area, 56, 20);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" PRISM · Sign in ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    lines.push(Line::from(""));
    lines.extend(field_lines(
        "Email",
        &state.email,
        state.focus == Focus::Email,
    ));
    lines.extend(field_lines(
        "Password",
        &state.password,
        state.focus == Focus::Password,
    ));
    lines.push(Line::from(""));
    lines.push(button_line("Sign in", state.focus == Focus::Submit));
    lines.push(Line::from(Span::styled(
        "─── or ───",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(button_line(
        "Continue with Google",
        state.focus == Focus::Google,
    ));
    lines.push(Line::from(""));
    lines.push(link_line(
        "New here? Create an account",
        state.focus == Focus::RegisterLink,
    ));

    let busy_label = match state.busy {
        Some(Busy::Email) => Some("Signing in..."),
        Some(Busy::Google) => Some("Waiting for browser sign-in... (Esc cancels)"),
        None => None,
    };
    lines.extend(status_lines(
        busy_label,
        state.consent_url.as_deref(),
        state.error.as_deref(),
        spinner_frame,
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}
