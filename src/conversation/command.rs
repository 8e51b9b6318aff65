//! Recognized bot commands

/// Commands the bot reacts to in any conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Weather,
}

impl Command {
    /// All commands with their menu descriptions
    pub const ALL: [(Command, &'static str); 3] = [
        (Command::Start, "Приветствие и описание бота"),
        (Command::Help, "Список команд и инструкция"),
        (Command::Weather, "Прогноз погоды по маршруту"),
    ];

    /// Parse a message as a command.
    ///
    /// Accepts `/name` and `/name@botname`, ignoring anything after the
    /// first whitespace.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let token = text.split_whitespace().next()?;
        let name = token.strip_prefix('/')?;
        let name = name.split_once('@').map_or(name, |(name, _bot)| name);

        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "weather" => Some(Self::Weather),
            _ => None,
        }
    }

    /// Command name without the slash
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Weather => "weather",
        }
    }
}
