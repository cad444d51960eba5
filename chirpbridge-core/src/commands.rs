// ABOUTME: Classification of inbound chat text into bot commands.
// ABOUTME: Pure parsing, no I/O; unknown verbs map to Unrecognized.

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `now` — reply with the current time.
    TimeQuery,
    /// `new-content [language]` — search the configured sources for new posts.
    NewContent { language: String },
    /// `new-content` with too many arguments; reply with usage.
    NewContentUsage,
    /// `tweet <text>` — publish the remainder as a post.
    PostTweet { body: String },
    /// `tweet` with no payload; reply with usage.
    PostTweetUsage,
    /// Anything else; silently ignored.
    Unrecognized,
}

/// Classify raw message text.
///
/// `now` must match the whole text exactly. All other commands are keyed on
/// the first whitespace-separated token.
pub fn parse_command(text: &str, default_language: &str) -> Command {
    if text == "now" {
        return Command::TimeQuery;
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some(verb) = tokens.first() else {
        return Command::Unrecognized;
    };

    match *verb {
        "new-content" => match tokens.len() {
            1 => Command::NewContent {
                language: default_language.to_lowercase(),
            },
            2 => Command::NewContent {
                language: tokens[1].to_lowercase(),
            },
            _ => Command::NewContentUsage,
        },
        "tweet" => {
            if tokens.len() == 1 {
                return Command::PostTweetUsage;
            }
            // The post body is the original text minus the prefix up to and
            // including the first "tweet " occurrence, so inner whitespace
            // survives verbatim. When the verb is followed by other
            // whitespace ("tweet\thello"), fall back to the remaining tokens.
            let body = match text.split_once("tweet ") {
                Some((_, rest)) => rest.to_string(),
                None => tokens[1..].join(" "),
            };
            Command::PostTweet { body }
        }
        _ => Command::Unrecognized,
    }
}
