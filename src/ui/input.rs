use crate::{
    audio::commands::AudioCommand,
    ui::{
        message::AppMessage,
        state::{AppState, Route},
    },
};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent, state: &AppState) -> Option<AppMessage> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            return Some(AppMessage::Quit);
        }

        let is_editing = state.ui.current_route == Route::Login
            || (state.ui.current_route == Route::Search && state.search.is_editing);
        if is_editing {
            return if ctrl { None } else { Self::handle_text_key(key) };
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('l') => Some(AppMessage::Logout),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(' ') => Some(AppMessage::Audio(AudioCommand::TogglePlay)),
            KeyCode::Char('n') => Some(AppMessage::Audio(AudioCommand::Next)),
            KeyCode::Char('p') => Some(AppMessage::Audio(AudioCommand::Previous)),
            KeyCode::Char('s') => Some(AppMessage::Audio(AudioCommand::Stop)),
            KeyCode::Char('r') => Some(AppMessage::Audio(AudioCommand::RefreshQueue)),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                Some(AppMessage::Audio(AudioCommand::VolumeUp))
            }
            KeyCode::Char('-') => Some(AppMessage::Audio(AudioCommand::VolumeDown)),
            KeyCode::Char('H') => Some(AppMessage::Audio(AudioCommand::SeekBackward)),
            KeyCode::Char('L') => Some(AppMessage::Audio(AudioCommand::SeekForward)),
            KeyCode::Char('m') => Some(AppMessage::Audio(AudioCommand::ToggleMute)),
            KeyCode::Char('l') => Some(AppMessage::ToggleLike),
            KeyCode::Char('/') => Some(AppMessage::FocusSearch),
            KeyCode::Tab => Some(AppMessage::NextTab),
            KeyCode::Down | KeyCode::Char('j') => Some(AppMessage::SelectDown),
            KeyCode::Up | KeyCode::Char('k') => Some(AppMessage::SelectUp),
            KeyCode::Char('g') => Some(AppMessage::SelectFirst),
            KeyCode::Char('G') => Some(AppMessage::SelectLast),
            KeyCode::Enter => Some(AppMessage::PlaySelected),
            KeyCode::Char('q') => Some(AppMessage::Quit),
            _ => None,
        }
    }

    fn handle_text_key(key: KeyEvent) -> Option<AppMessage> {
        match key.code {
            KeyCode::Enter => Some(AppMessage::Submit),
            KeyCode::Esc => Some(AppMessage::CancelInput),
            KeyCode::Tab => Some(AppMessage::SwitchField),
            KeyCode::Backspace => Some(AppMessage::Backspace),
            KeyCode::Char(c) => Some(AppMessage::Input(c)),
            _ => None,
        }
    }
}
