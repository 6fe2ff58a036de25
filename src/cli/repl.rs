//! Line-oriented driver for the interactive front end.
//!
//! Plain lines are appended to the message being composed; lines starting
//! with `:` are commands.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::Result;
use crate::frontend::{Action, FrontEnd};

pub const HELP: &str = "\
Type a message (multiple lines are joined), then:
  :predict       classify the message
  :clear         discard the message
  :sample        show random dataset rows
  :upload PATH   preview a CSV file
  :help          show this help
  :quit          exit";

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Action(Action),
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line of REPL input.
pub fn parse_line(line: &str) -> ReplCommand {
    let Some(command) = line.trim().strip_prefix(':') else {
        return ReplCommand::Action(Action::Input(line.to_string()));
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    match (name, argument) {
        ("predict" | "p", "") => ReplCommand::Action(Action::Predict),
        ("clear" | "c", "") => ReplCommand::Action(Action::Clear),
        ("sample" | "s", "") => ReplCommand::Action(Action::ShowSample),
        ("upload" | "u", path) if !path.is_empty() => {
            ReplCommand::Action(Action::Upload(PathBuf::from(path)))
        }
        ("help" | "h", "") => ReplCommand::Help,
        ("quit" | "q" | "exit", "") => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.trim().to_string()),
    }
}

/// Drive `front_end` with lines from `input` until `:quit` or end of input.
pub fn run<R: BufRead, W: Write>(front_end: &mut FrontEnd, input: R, mut output: W) -> Result<()> {
    writeln!(output, "{HELP}")?;
    writeln!(output)?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            ReplCommand::Action(action) => {
                for panel in front_end.handle(action) {
                    writeln!(output, "{panel}")?;
                }
            }
            ReplCommand::Help => writeln!(output, "{HELP}")?,
            ReplCommand::Quit => break,
            ReplCommand::Unknown(command) => {
                writeln!(output, "Unknown command: {command} (type :help)")?
            }
        }
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("Win a prize"),
            ReplCommand::Action(Action::Input("Win a prize".to_string()))
        );
        assert_eq!(parse_line(":predict"), ReplCommand::Action(Action::Predict));
        assert_eq!(parse_line("  :clear  "), ReplCommand::Action(Action::Clear));
        assert_eq!(parse_line(":sample"), ReplCommand::Action(Action::ShowSample));
        assert_eq!(
            parse_line(":upload data/my file.csv"),
            ReplCommand::Action(Action::Upload(PathBuf::from("data/my file.csv")))
        );
        assert_eq!(parse_line(":quit"), ReplCommand::Quit);
        assert_eq!(parse_line(":upload"), ReplCommand::Unknown(":upload".to_string()));
        assert_eq!(parse_line(":bogus"), ReplCommand::Unknown(":bogus".to_string()));
    }

    #[test]
    fn test_run_session() {
        let mut front_end = FrontEnd::new(None, "missing.csv");
        let input = Cursor::new(":predict\nhello there\n:predict\n:quit\nnot reached\n");
        let mut output = Vec::new();

        run(&mut front_end, input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Please enter a message first."));
        assert!(output.contains("Model not available. Train model and try again."));
        assert_eq!(front_end.input(), "hello there");
    }
}
