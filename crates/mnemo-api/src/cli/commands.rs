//! Command parsing for the interactive memory session.
//!
//! One command per line: a verb followed by whitespace-separated arguments,
//! with the last argument taking the rest of the line.

use console::style;

use mnemo_types::memory::MemoryId;

/// A parsed session command.
#[derive(Debug, PartialEq)]
pub enum SessionCommand {
    /// Extract and store facts from text or a JSON turn list.
    Add { owner: String, input: String },
    /// Similarity search within an owner's memories.
    Search {
        owner: String,
        query: String,
        limit: Option<usize>,
    },
    /// Replace a memory's text.
    Update { id: MemoryId, text: String },
    /// Show all of an owner's memories.
    List { owner: String },
    /// Delete all of an owner's memories.
    Forget { owner: String },
    Help,
    Quit,
    /// Unrecognized or malformed input, with a hint.
    Invalid(String),
}

/// Parse one input line. Returns `None` for blank lines.
pub fn parse(input: &str) -> Option<SessionCommand> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (verb, rest) = split_word(trimmed);
    let command = match verb.to_lowercase().as_str() {
        "help" | "h" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        "add" => match split_word(rest) {
            (owner, input) if !owner.is_empty() && !input.is_empty() => SessionCommand::Add {
                owner: owner.to_string(),
                input: input.to_string(),
            },
            _ => invalid("usage: add <owner> <text|json>"),
        },
        "search" => match split_word(rest) {
            (owner, query) if !owner.is_empty() && !query.is_empty() => {
                match split_limit(query) {
                    Ok((query, limit)) if !query.is_empty() => SessionCommand::Search {
                        owner: owner.to_string(),
                        query: query.to_string(),
                        limit,
                    },
                    Ok(_) => invalid(SEARCH_USAGE),
                    Err(hint) => invalid(&hint),
                }
            }
            _ => invalid(SEARCH_USAGE),
        },
        "update" => match split_word(rest) {
            (id, text) if !id.is_empty() && !text.is_empty() => match id.parse::<MemoryId>() {
                Ok(id) => SessionCommand::Update {
                    id,
                    text: text.to_string(),
                },
                Err(_) => invalid(&format!("'{id}' is not a memory id")),
            },
            _ => invalid("usage: update <id> <text>"),
        },
        "list" | "ls" => match split_word(rest) {
            (owner, "") if !owner.is_empty() => SessionCommand::List {
                owner: owner.to_string(),
            },
            _ => invalid("usage: list <owner>"),
        },
        "forget" => match split_word(rest) {
            (owner, "") if !owner.is_empty() => SessionCommand::Forget {
                owner: owner.to_string(),
            },
            _ => invalid("usage: forget <owner>"),
        },
        other => invalid(&format!("unknown command '{other}', type 'help'")),
    };
    Some(command)
}

const SEARCH_USAGE: &str = "usage: search <owner> [--limit N] <query>";

fn invalid(hint: &str) -> SessionCommand {
    SessionCommand::Invalid(hint.to_string())
}

/// Split off the first whitespace-delimited word; the rest is trimmed.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

/// Strip a leading `--limit N` (or `-n N`) option from a search query.
///
/// Everything after the option is the query, verbatim.
fn split_limit(input: &str) -> Result<(&str, Option<usize>), String> {
    let (flag, rest) = split_word(input);
    if flag != "--limit" && flag != "-n" {
        return Ok((input, None));
    }

    let (value, query) = split_word(rest);
    match value.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok((query, Some(limit))),
        _ => Err(format!("'{value}' is not a positive limit")),
    }
}

/// Help text listing all session commands.
pub fn help_text() -> String {
    let rows = [
        ("add <owner> <text|json>", "Extract facts and store them"),
        ("search <owner> [--limit N] <query>", "Find related memories"),
        ("update <id> <text>", "Replace a memory's text"),
        ("list <owner>", "Show an owner's memories"),
        ("forget <owner>", "Delete all of an owner's memories"),
        ("help", "Show this help message"),
        ("quit", "End the session"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (usage, description) in rows {
        out.push_str(&format!("  {:<36} {description}\n", style(usage).cyan()));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Memories live only as long as this session.").dim()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_is_none() {
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_parse_help_and_quit() {
        assert_eq!(parse("help"), Some(SessionCommand::Help));
        assert_eq!(parse("?"), Some(SessionCommand::Help));
        assert_eq!(parse("QUIT"), Some(SessionCommand::Quit));
        assert_eq!(parse("exit"), Some(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_add_keeps_rest_of_line() {
        assert_eq!(
            parse("add u1   I moved to Paris last year"),
            Some(SessionCommand::Add {
                owner: "u1".to_string(),
                input: "I moved to Paris last year".to_string(),
            })
        );
        assert!(matches!(parse("add u1"), Some(SessionCommand::Invalid(_))));
    }

    #[test]
    fn test_parse_search_with_and_without_limit() {
        assert_eq!(
            parse("search u1 --limit 5 Where does Alice live"),
            Some(SessionCommand::Search {
                owner: "u1".to_string(),
                query: "Where does Alice live".to_string(),
                limit: Some(5),
            })
        );
        assert_eq!(
            parse("search u1 -n 3 cats"),
            Some(SessionCommand::Search {
                owner: "u1".to_string(),
                query: "cats".to_string(),
                limit: Some(3),
            })
        );
        assert_eq!(
            parse("search u1 2024"),
            Some(SessionCommand::Search {
                owner: "u1".to_string(),
                query: "2024".to_string(),
                limit: None,
            })
        );
    }

    #[test]
    fn test_parse_search_keeps_trailing_number_in_query() {
        assert_eq!(
            parse("search u1 Where did Alice live in 2019"),
            Some(SessionCommand::Search {
                owner: "u1".to_string(),
                query: "Where did Alice live in 2019".to_string(),
                limit: None,
            })
        );
    }

    #[test]
    fn test_parse_search_rejects_bad_limit() {
        assert!(matches!(
            parse("search u1 --limit 0 cats"),
            Some(SessionCommand::Invalid(_))
        ));
        assert!(matches!(
            parse("search u1 --limit many cats"),
            Some(SessionCommand::Invalid(_))
        ));
        assert!(matches!(
            parse("search u1 --limit 5"),
            Some(SessionCommand::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_update() {
        let id = MemoryId::new();
        assert_eq!(
            parse(&format!("update {id} Bob has a cat")),
            Some(SessionCommand::Update {
                id,
                text: "Bob has a cat".to_string(),
            })
        );
        assert!(matches!(
            parse("update not-an-id Bob has a cat"),
            Some(SessionCommand::Invalid(_))
        ));
    }

    #[test]
    fn test_parse_list_and_forget() {
        assert_eq!(
            parse("list u1"),
            Some(SessionCommand::List {
                owner: "u1".to_string()
            })
        );
        assert_eq!(
            parse("forget u1"),
            Some(SessionCommand::Forget {
                owner: "u1".to_string()
            })
        );
        assert!(matches!(parse("forget"), Some(SessionCommand::Invalid(_))));
        assert!(matches!(parse("list u1 extra"), Some(SessionCommand::Invalid(_))));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("remember u1 x"),
            Some(SessionCommand::Invalid(
                "unknown command 'remember', type 'help'".to_string()
            ))
        );
    }
}
