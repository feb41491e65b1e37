use carousel::{InputEvent, Language};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Input(InputEvent),
    /// Page scroll that does not pass over the carousel stack.
    Scroll(f64),
    Language(Language),
    Reveal,
    ConfigReload,
    Quit,
}
