//! Dashboard feature slice: the protected root.

mod render;

pub use render::render_screen;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::features::FormCommand;

/// Key handling for the dashboard: `s` or Ctrl+D signs out.
pub fn handle_key(key: KeyEvent) -> FormCommand {
    match key.code {
        KeyCode::Char('s') => FormCommand::SignOut,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            FormCommand::SignOut
        }
        _ => FormCommand::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s_signs_out() {
        let key = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(handle_key(key), FormCommand::SignOut);
    }

    #[test]
    fn other_keys_do_nothing() {
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key(key), FormCommand::None);
    }
}
