//! Slash command parsing (/join, /create, /rooms, ...).

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch to the room with this name
    Join(String),
    /// Create a room with this name
    Create(String),
    /// List known rooms
    Rooms,
    Logout,
    Help,
    /// A command that needs an argument was given none
    Usage(&'static str),
}

pub const HELP_TEXT: &str = "Supported commands: /join <room>, /create <room>, /rooms, /logout, /help";

/// Parse a line of input. Returns None when the line is a normal message,
/// including lines like `/shrug` that only look like a command.
pub fn parse_command(input: &str) -> Option<Command> {
    let s = input.trim();
    let cmdline = s.strip_prefix('/')?.trim();

    let (cmd, rest) = match cmdline.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (cmdline, ""),
    };

    let command = match cmd.to_lowercase().as_str() {
        "join" | "j" => {
            if rest.is_empty() {
                Command::Usage("Usage: /join <room>")
            } else {
                Command::Join(rest.to_string())
            }
        }
        "create" | "new" => {
            if rest.is_empty() {
                Command::Usage("Usage: /create <room>")
            } else {
                Command::Create(rest.to_string())
            }
        }
        "rooms" | "list" => Command::Rooms,
        "logout" | "quit" => Command::Logout,
        "help" => Command::Help,
        _ => return None,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_messages_are_not_commands() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("**bold** /join"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_join_and_create_keep_spaces() {
        assert_eq!(
            parse_command("/join  Book Club "),
            Some(Command::Join("Book Club".into()))
        );
        assert_eq!(parse_command("/j general"), Some(Command::Join("general".into())));
        assert_eq!(
            parse_command("/CREATE rust"),
            Some(Command::Create("rust".into()))
        );
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            parse_command("/join"),
            Some(Command::Usage("Usage: /join <room>"))
        );
        assert_eq!(
            parse_command("/create   "),
            Some(Command::Usage("Usage: /create <room>"))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command("/rooms"), Some(Command::Rooms));
        assert_eq!(parse_command("/logout"), Some(Command::Logout));
        assert_eq!(parse_command(" /help "), Some(Command::Help));
        assert_eq!(parse_command("/dance"), None);
        assert_eq!(parse_command("/usr/bin is where it lives"), None);
        assert_eq!(parse_command("/"), None);
    }
}
