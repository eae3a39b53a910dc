//! Parsing of console command lines

use std::str::FromStr;

use crate::state::ConfigField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the game, or resume it when paused
    Start,
    Pause,
    /// Re-arm with the current settings
    Restart,
    /// Restore default settings
    Reset,
    Set(ConfigField, u64),
    Status,
    Json,
    Rounds,
    /// Open the settings panel
    Settings,
    /// Close the settings panel
    Close,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("empty command".to_string());
        };

        let command = match verb.to_lowercase().as_str() {
            "start" | "play" | "resume" => Command::Start,
            "pause" => Command::Pause,
            "restart" => Command::Restart,
            "reset" => Command::Reset,
            "status" | "s" => Command::Status,
            "json" => Command::Json,
            "rounds" => Command::Rounds,
            "settings" => Command::Settings,
            "close" => Command::Close,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "set" => {
                let field = words
                    .next()
                    .ok_or_else(|| "usage: set <setting> <value>".to_string())?
                    .parse::<ConfigField>()?;
                let raw = words
                    .next()
                    .ok_or_else(|| format!("missing value for {}", field.name()))?;
                let value = raw
                    .parse::<u64>()
                    .map_err(|_| format!("{} is not a whole number", raw))?;
                Command::Set(field, value)
            }
            other => return Err(format!("unknown command: {} (try help)", other)),
        };

        if let Some(extra) = words.next() {
            return Err(format!("unexpected argument: {}", extra));
        }
        Ok(command)
    }
}
