//! Pure view functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{dashboard, register, signin};
use crate::state::{AppState, View};

/// Renders the current screen per the route guard.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    match app.view() {
        View::Loading => render_loading(frame, area, app.spinner_frame),
        View::SignIn => signin::render_screen(frame, area, &app.signin, app.spinner_frame),
        View::Register => register::render_screen(frame, area, &app.register, app.spinner_frame),
        View::Dashboard => match app.session.principal() {
            Some(principal) => dashboard::render_screen(frame, area, principal),
            None => render_loading(frame, area, app.spinner_frame),
        },
    }
}

fn render_loading(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let popup = widgets::centered_rect(area, 34, 3);
    let line = Line::from(vec![
        Span::styled(
            widgets::spinner(spinner_frame),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" Checking your session..."),
    ]);
    frame.render_widget(Paragraph::new(line), popup);
}

pub(crate) mod widgets {
    //! Small shared rendering helpers for the form screens.

    use ratatui::layout::Rect;
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};

    use crate::common::TextField;

    const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

    pub fn spinner(frame: usize) -> &'static str {
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
    }

    /// A rect of at most `width` x `height`, centered in `area`.
    pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width);
        let height = height.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    fn focus_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        }
    }

    /// A labeled input: label line plus value line with a cursor mark.
    pub fn field_lines(label: &str, field: &TextField, focused: bool) -> Vec<Line<'static>> {
        let marker = if focused { "› " } else { "  " };
        let mut value = field.display();
        if focused {
            value.push('▏');
        }
        vec![
            Line::from(Span::styled(
                format!("  {label}"),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled(marker.to_string(), focus_style(focused)),
                Span::styled(value, focus_style(focused)),
            ]),
            Line::from(""),
        ]
    }

    pub fn checkbox_line(label: &str, checked: bool, focused: bool) -> Line<'static> {
        let mark = if checked { "[x]" } else { "[ ]" };
        Line::from(vec![
            Span::styled(format!("  {mark} "), focus_style(focused)),
            Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        ])
    }

    pub fn button_line(label: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("[ {label} ]"), style),
        ])
    }

    pub fn link_line(label: &str, focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Blue)
        };
        Line::from(Span::styled(format!("  {label}"), style))
    }

    /// The status block under a form: busy indicator, pending consent
    /// URL, and error message.
    pub fn status_lines(
        busy: Option<&str>,
        consent_url: Option<&str>,
        error: Option<&str>,
        spinner_frame: usize,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(label) = busy {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {} ", spinner(spinner_frame)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(label.to_string(), Style::default().fg(Color::Yellow)),
            ]));
        }
        if let Some(url) = consent_url {
            lines.push(Line::from(Span::styled(
                format!("  {}", truncate_middle(url, 60)),
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(message) = error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }

    /// Truncates a string in the middle with "..." if it exceeds `max_len`.
    fn truncate_middle(s: &str, max_len: usize) -> String {
        if s.len() <= max_len || max_len < 10 {
            return s.to_string();
        }
        let half = (max_len - 3) / 2;
        format!("{}...{}", &s[..half], &s[s.len() - half..])
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn centered_rect_clamps_to_the_area() {
            let area = Rect::new(0, 0, 20, 10);
            let rect = centered_rect(area, 100, 100);
            assert_eq!((rect.width, rect.height), (20, 10));
        }

        #[test]
        fn truncate_middle_keeps_both_ends() {
            let url = "https://accounts.google.com/o/oauth2/v2/auth?client_id=abcdefghijklmnop";
            let out = truncate_middle(url, 30);
            assert!(out.len() <= 30);
            assert!(out.starts_with("https://"));
            assert!(out.contains("..."));
        }
    }
}
