use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::{Command, ScrollAmount};
use crate::reader::state::OverlayState;

/// Maps one key press to a command. While the drawer is open its navigation
/// keys win; everything else falls through to the global bindings, so zoom
/// and fullscreen shortcuts keep working with an overlay up (the original
/// reader behaves the same way).
pub fn map_key_to_command(key: KeyEvent, overlay: &OverlayState) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    if overlay.drawer_open {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => return Some(Command::DrawerNext),
            KeyCode::Up | KeyCode::Char('k') => return Some(Command::DrawerPrev),
            KeyCode::Enter => return Some(Command::DrawerActivate),
            _ => {}
        }
    }

    // Shortcut letters are case-insensitive, matching the original reader;
    // g/G stay distinct because they are separate vim-style motions.
    match key.code {
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Command::OpenDrawer),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::OpenHelp),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(Command::ToggleFullscreen),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::StartReading),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::ZoomIn),
        KeyCode::Char('-') => Some(Command::ZoomOut),
        KeyCode::Char('0') => Some(Command::ZoomReset),
        KeyCode::Esc => Some(Command::CloseOverlays),

        KeyCode::Char('j') | KeyCode::Down => Some(Command::Scroll {
            amount: ScrollAmount::Lines(2),
        }),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Scroll {
            amount: ScrollAmount::Lines(-2),
        }),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Command::Scroll {
            amount: ScrollAmount::Screens(1),
        }),
        KeyCode::PageUp => Some(Command::Scroll {
            amount: ScrollAmount::Screens(-1),
        }),
        KeyCode::Char('g') => Some(Command::FirstPage),
        KeyCode::Char('G') => Some(Command::LastPage),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
        _ => None,
    }
}
