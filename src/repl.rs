use nu_ansi_term::{Color, Style};
use reedline::{
    Highlighter, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    StyledText,
};
use std::borrow::Cow;
use std::io::{BufRead, Write};

use crate::error::Result;
use crate::evaluator::evaluate;
use crate::format::format_number;
use crate::tokenizer::{is_separator, tokenize, TokenKind};

pub const BANNER: &str = "Simple Calculator - type 'help' for instructions, 'q' to quit.";
pub const PROMPT: &str = ">>> ";
pub const GOODBYE: &str = "Goodbye.";
pub const EXITING: &str = "Exiting.";

pub const QUIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

pub const HELP: &str = "\
Simple Calculator (CLI)

Usage:
  - Enter expressions in the form: <number> <operator> <number>
    Examples:
      2 + 3
      10 - 4.5
      7 * 8
      9 / 2
      9 // 2
      10 % 3
      2 ** 8

  - Operators:
      +   addition
      -   subtraction
      *   multiplication
      /   division
      //  floor division
      %   modulo (takes the sign of the divisor)
      **  exponentiation

  - Commands:
      help  -> show this help
      q     -> quit (also: quit, exit)

Notes:
  - Supports integers and decimals, including negatives
  - Gracefully handles division by zero and invalid inputs
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Handles one line of input, writing whatever the user should see.
pub fn handle_line(line: &str, out: &mut impl Write) -> Result<Control> {
    let line = line.trim_matches(is_separator);
    if line.is_empty() {
        return Ok(Control::Continue);
    }

    let lower = line.to_lowercase();
    if QUIT_COMMANDS.contains(&lower.as_str()) {
        writeln!(out, "{}", GOODBYE)?;
        return Ok(Control::Quit);
    }
    if lower == "help" {
        writeln!(out, "{}", HELP)?;
        return Ok(Control::Continue);
    }

    match evaluate(line) {
        Ok(result) => writeln!(out, "= {}", format_number(result))?,
        Err(err) if err.is_recoverable() => writeln!(out, "Error: {}", err)?,
        Err(err) => return Err(err),
    }

    Ok(Control::Continue)
}

/// Ends the prompt line and says goodbye on end of input or interrupt.
pub fn farewell(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n{}", EXITING)?;
    out.flush()?;
    Ok(())
}

/// Line loop for non-terminal input. End of input is a clean exit.
pub fn run_piped(mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", BANNER)?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break farewell(out);
        }

        if handle_line(&line, out)? == Control::Quit {
            break Ok(());
        }
    }
}

#[derive(Clone)]
pub struct REPLPrompt;

impl Prompt for REPLPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed(PROMPT)
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}

pub static COMMAND_COLOR: Color = Color::LightBlue;
pub static LITERAL_COLOR: Color = Color::Yellow;
pub static DEFAULT_COLOR: Color = Color::White;
pub static OPERATOR_COLOR: Color = Color::DarkGray;
pub static INVALID_COLOR: Color = Color::Red;

pub struct SyntaxHighlighter;

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();

        let lower = line.trim_matches(is_separator).to_lowercase();
        if lower == "help" || QUIT_COMMANDS.contains(&lower.as_str()) {
            styled_text.push((Style::new().fg(COMMAND_COLOR), line.to_string()));
            return styled_text;
        }

        let tokens = match tokenize(line) {
            Ok(t) => t,
            Err(_) => {
                styled_text.push((Style::new().fg(INVALID_COLOR), line.to_string()));
                return styled_text;
            }
        };

        let mut cursor = 0;
        for token in tokens {
            let color = match token.kind {
                TokenKind::EOF => break,
                TokenKind::Number(_) => LITERAL_COLOR,
                _ => OPERATOR_COLOR,
            };

            let span = token.byte_span;
            if span.start > cursor {
                styled_text.push((
                    Style::new().fg(DEFAULT_COLOR),
                    line[cursor..span.start].to_string(),
                ));
            }
            styled_text.push((Style::new().fg(color), line[span.clone()].to_string()));
            cursor = span.end;
        }

        if cursor < line.len() {
            styled_text.push((Style::new().fg(DEFAULT_COLOR), line[cursor..].to_string()));
        }

        styled_text
    }
}
