//! Interactive command parsing

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Commands accepted at the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Start,
    Stop,
    Status,
    Download,
    Upload,
    List,
    Help,
    Quit,
}

/// Input line that is not a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown command '{0}'. Type 'help' for the list of commands")]
pub struct UnknownCommand(pub String);

impl FromStr for UiCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" | "record" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "download" | "save" => Ok(Self::Download),
            "upload" => Ok(Self::Upload),
            "list" | "ls" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(UnknownCommand(s.trim().to_string())),
        }
    }
}

impl fmt::Display for UiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Status => "status",
            Self::Download => "download",
            Self::Upload => "upload",
            Self::List => "list",
            Self::Help => "help",
            Self::Quit => "quit",
        };
        f.write_str(name)
    }
}

/// Prompt help text
pub const HELP: &str = "\
Commands:
  start     Start recording (screen, system audio and microphone)
  stop      Stop recording
  status    Show the recorder state
  download  Save the last recording to the download directory
  upload    Upload the last recording to the recordings service
  list      List uploaded recordings
  help      Show this help
  quit      Exit (stops an active recording)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!("start".parse(), Ok(UiCommand::Start));
        assert_eq!("  STOP \n".parse(), Ok(UiCommand::Stop));
        assert_eq!("Upload".parse(), Ok(UiCommand::Upload));
        assert_eq!("exit".parse(), Ok(UiCommand::Quit));
    }

    #[test]
    fn rejects_unknown_input() {
        let err = "pause".parse::<UiCommand>().unwrap_err();
        assert_eq!(err, UnknownCommand("pause".to_string()));
        assert!(err.to_string().contains("help"));
    }

    #[test]
    fn help_lists_every_command() {
        for cmd in [
            UiCommand::Start,
            UiCommand::Stop,
            UiCommand::Status,
            UiCommand::Download,
            UiCommand::Upload,
            UiCommand::List,
            UiCommand::Help,
            UiCommand::Quit,
        ] {
            assert!(HELP.contains(&cmd.to_string()));
        }
    }
}
