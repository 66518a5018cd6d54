//! Command handlers.
//!
//! Each handler validates its argument count, delegates to the scheduler /
//! quote selector, and produces plain-text replies. Validation failures never
//! touch scheduler state.

use chrono::Local;
use tracing::warn;

use quotecast_quotes::{Corpus, QuoteError};
use quotecast_scheduler::{TimeSpec, TimeSpecError};

use crate::context::BotState;

const TIME_FORMAT_HINT: &str =
    "Supported format: HH:MM:SS, where 00 <= HH <= 99, 00 <= MM <= 59 and 00 <= SS <= 59.";

/// Route a parsed command to its handler. Returns the replies to send, in order.
pub fn dispatch(
    command: &str,
    args: &[String],
    chat_id: i64,
    sender_name: &str,
    state: &BotState,
) -> Vec<String> {
    match command {
        "start" => start(args, sender_name),
        "help" => help(args),
        "now" => now(args),
        "random_quote" => random_quote(args, state),
        "set_period" => set_period(args, chat_id, state),
        "once" => once(args, chat_id, state),
        "set_quotes" => set_quotes(args, state),
        "finish" => finish(args, state),
        other => vec![format!(
            "Unknown command /{other}. Type /help to list commands."
        )],
    }
}

fn start(args: &[String], sender_name: &str) -> Vec<String> {
    if !args.is_empty() {
        return vec!["The start command takes no parameters.".to_string()];
    }
    vec![
        format!("Hi {sender_name}!"),
        "Type /help to list commands.".to_string(),
    ]
}

fn help(args: &[String]) -> Vec<String> {
    if !args.is_empty() {
        return vec!["The help command takes no parameters.".to_string()];
    }
    vec![concat!(
        "/start - welcomes you.\n",
        "/now - prints the current date and time (in YYYY.MM.DD - HH:MM:SS format).\n",
        "/random_quote - immediately sends a quote.\n",
        "/set_period <HH:MM:SS> - schedules periodic quotes, one every given interval.\n",
        "/once <HH:MM:SS> - schedules a one-time-only quote.\n",
        "/set_quotes <on|off> - resumes or pauses the schedule (pausing does not remove the scheduled quotes).\n",
        "/finish - clears the schedule, removing all pending quotes.\n",
        "\n/help - prints this message.",
    )
    .to_string()]
}

fn now(args: &[String]) -> Vec<String> {
    if !args.is_empty() {
        return vec!["The now command takes no parameters.".to_string()];
    }
    vec![Local::now().format("%Y.%m.%d - %H:%M:%S").to_string()]
}

fn random_quote(args: &[String], state: &BotState) -> Vec<String> {
    let mut replies = Vec::new();
    // Extra parameters are discarded with a warning; the quote is still sent.
    if !args.is_empty() {
        replies
            .push("Discarding the provided parameters - the random_quote command takes none.".to_string());
    }
    replies.push(pick_quote(&state.quotes_path));
    replies
}

fn set_period(args: &[String], chat_id: i64, state: &BotState) -> Vec<String> {
    let [arg] = args else {
        return vec![format!(
            "The set_period command takes a parameter representing the time between quotes. {TIME_FORMAT_HINT}"
        )];
    };

    match arg.parse::<TimeSpec>() {
        Ok(spec) => {
            state
                .scheduler
                .schedule_repeating(spec.to_duration(), chat_id);
            vec![format!("A random quote will be issued every {arg}.")]
        }
        Err(e) => vec![time_spec_error_reply(e)],
    }
}

fn once(args: &[String], chat_id: i64, state: &BotState) -> Vec<String> {
    let [arg] = args else {
        return vec![format!(
            "The once command takes a time parameter. {TIME_FORMAT_HINT}"
        )];
    };

    match arg.parse::<TimeSpec>() {
        Ok(spec) => {
            state.scheduler.schedule_once(spec.to_duration(), chat_id);
            vec![format!("A random quote will be issued in {arg}.")]
        }
        Err(e) => vec![time_spec_error_reply(e)],
    }
}

fn set_quotes(args: &[String], state: &BotState) -> Vec<String> {
    const USAGE: &str = "The set_quotes command takes one parameter, either \"on\" or \"off\".";

    let [arg] = args else {
        return vec![USAGE.to_string()];
    };

    match arg.trim().to_ascii_lowercase().as_str() {
        "on" => {
            state.scheduler.set_all_enabled(true);
            vec!["Schedule is active.".to_string()]
        }
        "off" => {
            state.scheduler.set_all_enabled(false);
            vec!["The whole schedule has been paused.".to_string()]
        }
        _ => vec![USAGE.to_string()],
    }
}

fn finish(args: &[String], state: &BotState) -> Vec<String> {
    if !args.is_empty() {
        return vec!["The finish command takes no parameters.".to_string()];
    }
    state.scheduler.clear_all();
    vec!["The schedule has been cleared.".to_string()]
}

fn time_spec_error_reply(e: TimeSpecError) -> String {
    match e {
        TimeSpecError::MalformedInput => {
            format!("That does not look like a time parameter. {TIME_FORMAT_HINT}")
        }
        TimeSpecError::OutOfRange => {
            format!("That time parameter is out of range. {TIME_FORMAT_HINT}")
        }
    }
}

/// Load the corpus and format one random quote, mapping failures to
/// user-facing text.
fn pick_quote(quotes_path: &str) -> String {
    match Corpus::load(quotes_path).and_then(|c| c.pick().cloned()) {
        Ok(quote) => quote.formatted(),
        Err(QuoteError::EmptyCorpus) => {
            warn!(path = quotes_path, "quote corpus is empty");
            "There are no quotes to send - the collection is empty.".to_string()
        }
        Err(e) => {
            warn!(path = quotes_path, error = %e, "failed to load quote corpus");
            "The quote collection could not be read.".to_string()
        }
    }
}
