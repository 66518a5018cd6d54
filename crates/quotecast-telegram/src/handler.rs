//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::commands;
use crate::context::BotState;
use crate::send;

/// Main message handler. Runs for every incoming `Message`.
///
/// Commands are routed by name; any other text is echoed back verbatim.
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    // Ignore messages from other bots.
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }

    if let Some((command, args)) = parse_command(text) {
        let sender_name = msg
            .from
            .as_ref()
            .map(|u| u.first_name.as_str())
            .unwrap_or("there");
        let replies = commands::dispatch(&command, &args, msg.chat.id.0, sender_name, &state);
        for reply in &replies {
            send::send_response(&bot, msg.chat.id, reply).await;
        }
    } else {
        // Non-command messages are echoed.
        send::send_response(&bot, msg.chat.id, text).await;
    }

    Ok(())
}

/// Split `/command@botname arg1 arg2` into a lowercase command name and args.
///
/// Returns `None` for anything that is not a slash command. The `@botname`
/// suffix Telegram appends in group chats is stripped.
pub fn parse_command(text: &str) -> Option<(String, Vec<String>)> {
    let rest = text.strip_prefix('/')?;
    let mut tokens = rest.split_whitespace();
    let first = tokens.next()?;
    if first.is_empty() {
        return None;
    }

    let name = match first.split_once('@') {
        Some((name, _bot)) => name,
        None => first,
    };
    if name.is_empty() {
        return None;
    }

    let args: Vec<String> = tokens.map(str::to_string).collect();
    Some((name.to_ascii_lowercase(), args))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("hello world"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn bare_command() {
        let (name, args) = parse_command("/finish").unwrap();
        assert_eq!(name, "finish");
        assert!(args.is_empty());
    }

    #[test]
    fn command_with_args() {
        let (name, args) = parse_command("/set_period 00:00:05").unwrap();
        assert_eq!(name, "set_period");
        assert_eq!(args, vec!["00:00:05"]);
    }

    #[test]
    fn bot_mention_suffix_is_stripped() {
        let (name, args) = parse_command("/once@my_quotes_bot 00:01:00").unwrap();
        assert_eq!(name, "once");
        assert_eq!(args, vec!["00:01:00"]);
    }

    #[test]
    fn command_name_is_lowercased() {
        let (name, _) = parse_command("/Set_Quotes ON").unwrap();
        assert_eq!(name, "set_quotes");
    }

    #[test]
    fn lone_slash_is_not_a_command() {
        assert_eq!(parse_command("/"), None);
        assert_eq!(parse_command("/@bot"), None);
    }

    #[test]
    fn extra_whitespace_between_args() {
        let (name, args) = parse_command("/set_quotes    off").unwrap();
        assert_eq!(name, "set_quotes");
        assert_eq!(args, vec!["off"]);
    }
}
