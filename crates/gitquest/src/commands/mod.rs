//! Command interpretation for the simulated terminal.
//!
//! One trimmed input line is classified into exactly one recognized
//! command or the fallback. Classification is tokenize-then-match over
//! a closed grammar, tested in a fixed priority order: literal forms
//! (`git init`, `git status`, `git push -u origin main`) before
//! parameterized ones (`git remote add origin <url>`,
//! `git commit -m "<message>"`, `git add <pathspec>`, `touch`,
//! `mkdir`). Executing a command returns the exact terminal text to
//! display; the reducer owns the transcript append.

mod git;
mod workspace;

use crate::state::TutorialState;

/// A recognized terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    GitInit,
    GitStatus,
    GitPush,
    GitRemoteAdd { url: String },
    GitCommit { message: String },
    GitAdd { pathspec: String },
    Touch { path: Option<String> },
    Mkdir { name: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    quoted: bool,
}

impl Token {
    /// True for an unquoted token with exactly this text.
    fn is(&self, literal: &str) -> bool {
        !self.quoted && self.text == literal
    }

    fn bare(&self) -> Option<&str> {
        (!self.quoted).then_some(self.text.as_str())
    }
}

/// Split an input line into whitespace-separated tokens, grouping
/// double-quoted spans into a single quoted token. An unterminated
/// quote yields a plain token so the commit form does not match.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' if in_quotes => {
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    quoted: true,
                });
                in_quotes = false;
            }
            '"' => {
                if !current.is_empty() {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted: false,
                    });
                }
                in_quotes = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted: false,
                    });
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(Token {
            text: current,
            quoted: false,
        });
    }

    tokens
}

/// Classify one trimmed input line, `None` meaning unrecognized.
fn parse(input: &str) -> Option<Command> {
    let tokens = tokenize(input);
    match tokens.as_slice() {
        [a, b] if a.is("git") && b.is("init") => Some(Command::GitInit),
        [a, b] if a.is("git") && b.is("status") => Some(Command::GitStatus),
        [a, b, c, d, e]
            if a.is("git") && b.is("push") && c.is("-u") && d.is("origin") && e.is("main") =>
        {
            Some(Command::GitPush)
        }
        [a, b, c, d, url] if a.is("git") && b.is("remote") && c.is("add") && d.is("origin") => {
            url.bare().map(|url| Command::GitRemoteAdd {
                url: url.to_string(),
            })
        }
        [a, b, c, message] if a.is("git") && b.is("commit") && c.is("-m") && message.quoted => {
            Some(Command::GitCommit {
                message: message.text.clone(),
            })
        }
        [a, b, pathspec] if a.is("git") && b.is("add") => {
            pathspec.bare().map(|p| Command::GitAdd {
                pathspec: p.to_string(),
            })
        }
        [a] if a.is("touch") => Some(Command::Touch { path: None }),
        [a, path] if a.is("touch") => Some(Command::Touch {
            path: Some(path.text.clone()),
        }),
        [a] if a.is("mkdir") => Some(Command::Mkdir { name: None }),
        [a, name] if a.is("mkdir") => Some(Command::Mkdir {
            name: Some(name.text.clone()),
        }),
        _ => None,
    }
}

/// Interpret `input` against `state`, returning the terminal output
/// text. Recognized commands apply their effect; anything else is the
/// guaranteed fallback with no state change.
pub(crate) fn execute(state: &mut TutorialState, input: &str) -> String {
    match parse(input) {
        Some(Command::GitInit) => git::init(state),
        Some(Command::GitStatus) => git::status(state),
        Some(Command::GitPush) => git::push(state),
        Some(Command::GitRemoteAdd { url }) => git::remote_add(state, url),
        Some(Command::GitCommit { message }) => git::commit(state, &message),
        Some(Command::GitAdd { pathspec }) => git::add(state, &pathspec),
        Some(Command::Touch { path }) => workspace::touch(state, path.as_deref()),
        Some(Command::Mkdir { name }) => workspace::mkdir(state, name.as_deref()),
        None => format!("Command not recognized: {input}"),
    }
}
