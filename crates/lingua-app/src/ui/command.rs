use lingua_types::{AppEvent, Capability};

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Forward these events to the app, in order
    Send(Vec<AppEvent>),
    Help,
    Languages,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
Type any text to translate it.
  :to <language>   set the target language (alias :lang)
  :define          explain the meaning of the current translation
  :pronounce       show how to pronounce the current translation
  :listen          read the current translation aloud
  :history         list recent translations
  :open <n>        show history entry n again
  :clear           clear the history
  :languages       list available languages
  :help            show this help
  :quit            exit";

/// Parse one input line. Plain text sets the input and translates it.
pub fn parse_command(line: &str) -> UiCommand {
    let line = line.trim();
    if line.is_empty() {
        return UiCommand::Empty;
    }

    let Some(rest) = line.strip_prefix(':') else {
        return UiCommand::Send(vec![
            AppEvent::SetInput(line.to_string()),
            AppEvent::Request(Capability::Translate),
        ]);
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let event = match (name.to_lowercase().as_str(), arg) {
        ("to" | "lang", arg) if !arg.is_empty() => AppEvent::SetLanguage(arg.to_string()),
        ("define" | "d", "") => AppEvent::Request(Capability::Define),
        ("pronounce" | "p", "") => AppEvent::Request(Capability::Pronounce),
        ("listen" | "l", "") => AppEvent::Listen,
        ("history" | "h", "") => AppEvent::ShowHistory,
        ("open" | "o", arg) => match arg.parse::<usize>() {
            Ok(n) if n > 0 => AppEvent::SelectHistory(n - 1),
            _ => return UiCommand::Unknown(line.to_string()),
        },
        ("clear", "") => AppEvent::ClearHistory,
        ("quit" | "q" | "exit", "") => AppEvent::Quit,
        ("help" | "?", "") => return UiCommand::Help,
        ("languages", "") => return UiCommand::Languages,
        _ => return UiCommand::Unknown(line.to_string()),
    };

    UiCommand::Send(vec![event])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(line: &str) -> AppEvent {
        match parse_command(line) {
            UiCommand::Send(mut events) if events.len() == 1 => events.remove(0),
            other => panic!("expected one event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_translates() {
        let UiCommand::Send(events) = parse_command("  Where is the station?  ") else {
            panic!("expected events");
        };
        assert!(matches!(&events[0], AppEvent::SetInput(t) if t == "Where is the station?"));
        assert!(matches!(events[1], AppEvent::Request(Capability::Translate)));
    }

    #[test]
    fn colon_commands() {
        assert!(matches!(single(":to  German "), AppEvent::SetLanguage(l) if l == "German"));
        assert!(matches!(single(":lang portuguese"), AppEvent::SetLanguage(_)));
        assert!(matches!(single(":define"), AppEvent::Request(Capability::Define)));
        assert!(matches!(single(":P"), AppEvent::Request(Capability::Pronounce)));
        assert!(matches!(single(":listen"), AppEvent::Listen));
        assert!(matches!(single(":history"), AppEvent::ShowHistory));
        assert!(matches!(single(":open 3"), AppEvent::SelectHistory(2)));
        assert!(matches!(single(":clear"), AppEvent::ClearHistory));
        assert!(matches!(single(":quit"), AppEvent::Quit));
    }

    #[test]
    fn local_and_bad_commands() {
        assert_eq!(parse_command("   "), UiCommand::Empty);
        assert_eq!(parse_command(":help"), UiCommand::Help);
        assert_eq!(parse_command(":languages"), UiCommand::Languages);
        assert_eq!(parse_command(":open 0"), UiCommand::Unknown(":open 0".to_string()));
        assert_eq!(parse_command(":to"), UiCommand::Unknown(":to".to_string()));
        assert_eq!(parse_command(":frobnicate"), UiCommand::Unknown(":frobnicate".to_string()));
    }
}
