//! Bot command surface

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "register and show the menu")]
    Start,
    #[command(description = "ask the AI a question")]
    Chat(String),
    #[command(description = "generate an image")]
    Img(String),
    #[command(description = "generate a video")]
    Video(String),
    #[command(description = "usage statistics (admin)")]
    Stats,
    #[command(description = "block a user (admin)")]
    Block(String),
    #[command(description = "unblock a user (admin)")]
    Unblock(String),
    #[command(description = "set a daily limit (admin)")]
    Setlimit(String),
    #[command(description = "broadcast the replied-to message (admin)")]
    Broadcast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        assert_eq!(Command::parse("/start", "jarvisbot").unwrap(), Command::Start);
    }

    #[test]
    fn test_parse_chat_keeps_full_prompt() {
        assert_eq!(
            Command::parse("/chat what is rust", "jarvisbot").unwrap(),
            Command::Chat("what is rust".to_string())
        );
    }

    #[test]
    fn test_parse_chat_without_args() {
        assert_eq!(
            Command::parse("/chat", "jarvisbot").unwrap(),
            Command::Chat(String::new())
        );
    }

    #[test]
    fn test_parse_admin_commands() {
        assert_eq!(
            Command::parse("/block 42", "jarvisbot").unwrap(),
            Command::Block("42".to_string())
        );
        assert_eq!(
            Command::parse("/setlimit img 10", "jarvisbot").unwrap(),
            Command::Setlimit("img 10".to_string())
        );
        assert_eq!(
            Command::parse("/broadcast", "jarvisbot").unwrap(),
            Command::Broadcast
        );
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(Command::parse("/frobnicate", "jarvisbot").is_err());
    }
}
