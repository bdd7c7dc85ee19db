//! Register screen view: form on the left, showcase on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::state::{Focus, RegisterState};
use crate::features::Busy;
use crate::features::showcase;
use crate::render::widgets::{
    button_line, checkbox_line, field_lines, link_line, status_lines,
};

pub fn render_screen(frame: &mut Frame, area: Rect, state: &RegisterState, spinner_frame: usize) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_form(frame, columns[0], state, spinner_frame);
    showcase::render_panel(
        frame,
        columns[1],
        &state.showcase,
        state.focus == Focus::Showcase,
    );
}

fn render_form(frame: &mut Frame, area: Rect, state: &RegisterState, spinner_frame: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Create an account ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    lines.push(Line::from(""));
    lines.push(button_line(
        "Sign up with Google",
        state.focus == Focus::Google,
    ));
    lines.push(Line::from(Span::styled(
        "─── or continue with email ───",
        Style::default().fg(Color::DarkGray),
    )));
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
    lines.push(checkbox_line(
        "Send me updates, special offers, and promotional emails",
        state.accept_updates,
        state.focus == Focus::Updates,
    ));
    lines.push(checkbox_line(
        "I agree to the Terms of Service and Privacy Policy",
        state.accept_terms,
        state.focus == Focus::Terms,
    ));
    lines.push(Line::from(""));
    lines.push(button_line("Sign up", state.focus == Focus::Submit));
    lines.push(Line::from(""));
    lines.push(link_line(
        "Already registered? Sign in",
        state.focus == Focus::SignInLink,
    ));

    let busy_label = match state.busy {
        Some(Busy::Email) => Some("Creating your account..."),
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
