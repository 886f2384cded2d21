use crate::audio::commands::AudioCommand;

#[derive(Debug, Clone)]
pub enum AppMessage {
    Quit,
    Audio(AudioCommand),

    // Navigation
    NextTab,
    SelectDown,
    SelectUp,
    SelectFirst,
    SelectLast,
    PlaySelected,
    FocusSearch,

    // Text input
    Input(char),
    Backspace,
    Submit,
    CancelInput,
    SwitchField,

    ToggleLike,
    Logout,
}
