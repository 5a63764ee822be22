//! Slash-command parsing for the interactive prompt.

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Wipe the persisted history.
    Clear,
    /// Re-render the persisted history.
    History,
    /// Toggle translation of input/output.
    ToggleTranslate,
    /// Show or set the chat model.
    Model(Option<String>),
    /// Show or set the image style descriptor.
    Style(Option<String>),
    /// Start an image turn with the given prompt.
    Image(String),
    /// Start a text turn.
    Chat(String),
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return Command::Chat(trimmed.to_string());
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match name {
            "/help" => Command::Help,
            "/quit" => Command::Quit,
            "/clear" => Command::Clear,
            "/history" => Command::History,
            "/translate" => Command::ToggleTranslate,
            "/model" => Command::Model(non_empty(rest)),
            "/style" => Command::Style(non_empty(rest)),
            "/image" => Command::Image(rest.to_string()),
            _ => Command::Unknown(name.to_string()),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
