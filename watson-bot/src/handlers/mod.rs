//! User-facing handlers: slash commands, live search, assistant fallback.

mod assistant;
mod commands;
mod live_search;

pub use assistant::{AssistantHandler, ERROR_REPLY, SYSTEM_PROMPT};
pub use commands::{CommandHandler, HELP_TEXT};
pub use live_search::{LiveSearchHandler, MISSING_QUERY_REPLY, SEARCHING_STATUS};

/// Matches `text` against the slash command `name` and returns its argument
/// tail. Accepts the `/name@botname` form used in group chats; a mention of a
/// different bot means the command is not ours. When our own username is not
/// yet known, mentions are accepted as-is.
pub(crate) fn command_args<'a>(
    text: &'a str,
    name: &str,
    bot_username: Option<&str>,
) -> Option<&'a str> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args),
        None => (rest, ""),
    };
    let (command, mention) = match head.split_once('@') {
        Some((command, mention)) => (command, Some(mention)),
        None => (head, None),
    };
    if command != name {
        return None;
    }
    if let (Some(mention), Some(username)) = (mention, bot_username) {
        if !mention.eq_ignore_ascii_case(username) {
            return None;
        }
    }
    Some(args)
}
