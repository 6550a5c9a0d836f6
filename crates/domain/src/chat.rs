/// Global commands which are honored in every conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Add,
    List,
    Help,
    Language,
}

impl Command {
    /// Parses a slash command such as `/add` or `/add@SomeBot`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let name = text.strip_prefix('/')?;
        let name = name.split(|c: char| c == '@' || c.is_whitespace()).next()?;
        match name {
            "start" => Some(Self::Start),
            "add" => Some(Self::Add),
            "list" => Some(Self::List),
            "help" => Some(Self::Help),
            "language" => Some(Self::Language),
            _ => None,
        }
    }
}

/// An input event from the chat transport, already attributed to a `User`
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Command(Command),
    Text(String),
    /// A press on an inline button, carrying the button data
    Button(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Transport independent description of the buttons attached to a message
#[derive(Debug, Clone, PartialEq)]
pub enum Keyboard {
    /// Persistent menu, one label per row
    Menu(Vec<String>),
    /// Buttons attached to the message itself
    Inline(Vec<Vec<Button>>),
    /// Hide a previously shown menu
    Remove,
}
