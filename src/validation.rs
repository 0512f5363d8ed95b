//! Input validation and display helpers for users, rooms and messages.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::store::Room;

/// Minimum username length accepted at login.
pub const MIN_USERNAME_LEN: usize = 3;

/// Validates a login username.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(format!(
            "Username must be at least {} characters",
            MIN_USERNAME_LEN
        ));
    }

    Ok(())
}

/// Validates a room name before it is sent to the store.
pub fn validate_room_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Room name cannot be empty".to_string());
    }
    Ok(())
}

/// Whether a room with this name (ignoring case) is already known.
pub fn room_name_taken(rooms: &[Room], name: &str) -> bool {
    let lower = name.to_lowercase();
    rooms.iter().any(|r| r.name.to_lowercase() == lower)
}

/// Blank messages are dropped silently rather than reported.
pub fn is_blank_message(content: &str) -> bool {
    content.trim().is_empty()
}

/// Render `n` in lowercase base 36.
fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

/// Client-side user id: `user_` followed by the epoch milliseconds in base 36.
pub fn generate_user_id(now: DateTime<Utc>) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    format!("user_{}", to_base36(millis))
}

/// Name shown next to a message: the local username for our own messages,
/// otherwise `User-` and the first four characters of the author id.
pub fn display_name(user_id: &str, me: Option<(&str, &str)>) -> String {
    match me {
        Some((my_id, my_name)) if my_id == user_id => my_name.to_string(),
        _ => format!("User-{}", user_id.chars().take(4).collect::<String>()),
    }
}

/// Avatar fallback: first two characters, upper-cased.
pub fn initials(username: &str) -> String {
    username.chars().take(2).collect::<String>().to_uppercase()
}

/// Message time in the local zone as `HH:MM`.
pub fn format_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> Room {
        Room {
            id: format!("id-{name}"),
            name: name.to_string(),
            created_by: "user_x".to_string(),
        }
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("bob").is_ok());
        assert!(validate_username("日本語").is_ok());

        assert_eq!(
            validate_username("").unwrap_err(),
            "Username cannot be empty"
        );
        assert_eq!(
            validate_username("   ").unwrap_err(),
            "Username cannot be empty"
        );
        assert_eq!(
            validate_username("ab").unwrap_err(),
            "Username must be at least 3 characters"
        );
    }

    #[test]
    fn test_validate_room_name() {
        assert!(validate_room_name("general").is_ok());
        assert!(validate_room_name("").is_err());
        assert!(validate_room_name(" \t").is_err());
    }

    #[test]
    fn test_room_name_taken_ignores_case() {
        let rooms = vec![room("General"), room("random")];
        assert!(room_name_taken(&rooms, "general"));
        assert!(room_name_taken(&rooms, "RANDOM"));
        assert!(!room_name_taken(&rooms, "rust"));
        assert!(!room_name_taken(&[], "general"));
    }

    #[test]
    fn test_is_blank_message() {
        assert!(is_blank_message(""));
        assert!(is_blank_message("  \n "));
        assert!(!is_blank_message(" hi "));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_generate_user_id() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        assert_eq!(generate_user_id(now), "user_loyw3v28");
    }

    #[test]
    fn test_display_name() {
        let me = Some(("user_abc", "alice"));
        assert_eq!(display_name("user_abc", me), "alice");
        assert_eq!(display_name("user_xyz", me), "User-user");
        assert_eq!(display_name("9f3a77", None), "User-9f3a");
        assert_eq!(display_name("ab", None), "User-ab");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("alice"), "AL");
        assert_eq!(initials("x"), "X");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_format_time_shape() {
        let ts = Utc.timestamp_opt(0, 0).unwrap();
        let s = format_time(&ts);
        assert_eq!(s.len(), 5);
        assert_eq!(&s[2..3], ":");
    }
}
