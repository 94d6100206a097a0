//! The tutorial aggregate and its pure state reducer.
//!
//! Every transition consumes the aggregate and returns the next one;
//! nothing outside a single [`reduce`] call ever observes an in-place
//! mutation. The reducer owns the file tree, the commit log, the
//! terminal transcript, the repository flag, and the remote URL.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::catalog::TutorialId;
use crate::commands;
use crate::fs::{Directory, File, FileStatus};

/// Name of the simulated project workspace.
pub const PROJECT_DIR: &str = "gitquest-project";

const WELCOME_LINE: &str = "Welcome to the GitQuest terminal!";
const RESET_LINE: &str = "Tutorial reset. Welcome back!";

/// Kind of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Echo of the learner's input.
    Command,
    /// Computed terminal output (possibly empty, possibly multi-line).
    Output,
}

/// One line of the append-only terminal transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalLine {
    pub id: u64,
    pub kind: LineKind,
    pub content: String,
}

/// An immutable entry in the commit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// Full 40-hex-character id.
    pub id: String,
    /// First seven characters of the full id.
    pub short_id: String,
    pub message: String,
    /// Unix timestamp (seconds).
    pub timestamp: i64,
    /// Whether this was the repository's first commit.
    pub root_commit: bool,
}

impl Commit {
    /// Record a commit for the current log. `log_len` is the number of
    /// commits already recorded; the id digests message, time, and
    /// position so repeated messages stay distinct.
    pub fn new(message: &str, log_len: usize) -> Self {
        let timestamp = chrono::Utc::now().timestamp();
        let mut hasher = Sha1::new();
        hasher.update(message.as_bytes());
        hasher.update(timestamp.to_be_bytes());
        hasher.update(log_len.to_be_bytes());
        let id: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        let short_id = id[..7].to_string();
        Self {
            id,
            short_id,
            message: message.to_string(),
            timestamp,
            root_commit: log_len == 0,
        }
    }
}

/// The entire mutation API the surrounding UI may invoke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Move to a step, marking the previous one completed when moving
    /// forward.
    SetStep { step: usize },
    /// Restore the initial state, keeping the active tutorial.
    Reset,
    /// Interpret one line of terminal input.
    ProcessCommand { input: String },
    /// Insert a new untracked file; no-op if the path already exists.
    CreateFile { name: String, content: String },
    /// Replace content and force `modified`; no-op if the path does not
    /// resolve.
    ModifyFile { name: String, content: String },
}

/// The tutorial aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorialState {
    pub tutorial_id: TutorialId,
    pub current_step: usize,
    pub repo_initialized: bool,
    pub root: Directory,
    /// Commit log, most recent first.
    pub commits: Vec<Commit>,
    pub terminal: Vec<TerminalLine>,
    pub remote_url: Option<String>,
    pub completed_steps: BTreeSet<usize>,
    next_line_id: u64,
}

impl TutorialState {
    /// Fresh state for a tutorial: empty workspace, welcome line.
    pub fn new(tutorial_id: TutorialId) -> Self {
        Self {
            tutorial_id,
            current_step: 0,
            repo_initialized: false,
            root: Directory::new(PROJECT_DIR),
            commits: Vec::new(),
            terminal: vec![TerminalLine {
                id: 0,
                kind: LineKind::Output,
                content: WELCOME_LINE.to_string(),
            }],
            remote_url: None,
            completed_steps: BTreeSet::new(),
            next_line_id: 1,
        }
    }

    /// Append a transcript line with the next monotonic id.
    pub(crate) fn push_line(&mut self, kind: LineKind, content: String) {
        let id = self.next_line_id;
        self.next_line_id += 1;
        self.terminal.push(TerminalLine { id, kind, content });
    }

    /// Look up a file by workspace-relative path.
    pub fn find_file(&self, path: &str) -> Option<&File> {
        self.root.resolve(path)
    }

    /// Whether the transcript contains `command` as a command line.
    pub fn ran_command(&self, command: &str) -> bool {
        self.terminal
            .iter()
            .any(|l| l.kind == LineKind::Command && l.content == command)
    }

    /// The most recent command line, if any.
    pub fn last_command(&self) -> Option<&str> {
        self.terminal
            .iter()
            .rev()
            .find(|l| l.kind == LineKind::Command)
            .map(|l| l.content.as_str())
    }
}

/// The pure transition function over the aggregate.
pub fn reduce(mut state: TutorialState, action: Action) -> TutorialState {
    match action {
        Action::SetStep { step } => {
            if step > state.current_step {
                state.completed_steps.insert(state.current_step);
            }
            state.current_step = step;
            state
        }

        Action::ProcessCommand { input } => {
            let input = input.trim().to_string();
            tracing::debug!(command = %input, "processing terminal input");
            state.push_line(LineKind::Command, input.clone());
            let output = commands::execute(&mut state, &input);
            state.push_line(LineKind::Output, output);
            state
        }

        Action::CreateFile { name, content } => {
            let _ = state.root.create_file(&name, &content);
            state
        }

        Action::ModifyFile { name, content } => {
            state.root.update_file(&name, |file| {
                file.content = content;
                file.status = FileStatus::Modified;
            });
            state
        }

        Action::Reset => {
            tracing::info!(tutorial = ?state.tutorial_id, "tutorial reset");
            let mut next = TutorialState::new(state.tutorial_id);
            next.terminal = vec![TerminalLine {
                id: 0,
                kind: LineKind::Output,
                content: RESET_LINE.to_string(),
            }];
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: TutorialState, input: &str) -> TutorialState {
        reduce(
            state,
            Action::ProcessCommand {
                input: input.to_string(),
            },
        )
    }

    fn last_output(state: &TutorialState) -> &str {
        let line = state.terminal.last().unwrap();
        assert_eq!(line.kind, LineKind::Output);
        &line.content
    }

    #[test]
    fn test_initial_state() {
        let state = TutorialState::new(TutorialId::GitBasics);
        assert_eq!(state.current_step, 0);
        assert!(!state.repo_initialized);
        assert!(state.commits.is_empty());
        assert_eq!(state.root.name, PROJECT_DIR);
        assert_eq!(state.terminal.len(), 1);
        assert_eq!(state.terminal[0].content, WELCOME_LINE);
    }

    #[test]
    fn test_process_command_appends_two_lines() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let state = run(state, "  git init  ");
        assert_eq!(state.terminal.len(), 3);
        assert_eq!(state.terminal[1].kind, LineKind::Command);
        assert_eq!(state.terminal[1].content, "git init");
        assert_eq!(state.terminal[2].kind, LineKind::Output);
        assert!(state.repo_initialized);
    }

    #[test]
    fn test_line_ids_increase() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        let ids: Vec<u64> = state.terminal.iter().map(|l| l.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_unrecognized_command_leaves_state_unchanged() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let state = run(state, "git blame");
        assert_eq!(last_output(&state), "Command not recognized: git blame");
        assert!(!state.repo_initialized);
        assert!(state.root.walk().is_empty());
    }

    #[test]
    fn test_set_step_marks_previous_completed() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let state = reduce(state, Action::SetStep { step: 1 });
        assert_eq!(state.current_step, 1);
        assert!(state.completed_steps.contains(&0));
        // Moving backwards records nothing new.
        let state = reduce(state, Action::SetStep { step: 0 });
        assert_eq!(state.current_step, 0);
        assert_eq!(state.completed_steps.len(), 1);
    }

    #[test]
    fn test_create_file_action() {
        let state = TutorialState::new(TutorialId::GithubPortfolio);
        let state = reduce(
            state,
            Action::CreateFile {
                name: "index.html".to_string(),
                content: String::new(),
            },
        );
        let file = state.find_file("index.html").unwrap();
        assert_eq!(file.status, FileStatus::Untracked);
    }

    #[test]
    fn test_create_file_existing_is_noop() {
        let state = TutorialState::new(TutorialId::GithubPortfolio);
        let state = reduce(
            state,
            Action::CreateFile {
                name: "index.html".to_string(),
                content: "original".to_string(),
            },
        );
        let state = reduce(
            state,
            Action::CreateFile {
                name: "index.html".to_string(),
                content: "replacement".to_string(),
            },
        );
        assert_eq!(state.find_file("index.html").unwrap().content, "original");
    }

    #[test]
    fn test_modify_file_forces_modified() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add README.md");
        state = run(state, "git commit -m \"Initial commit\"");
        let state = reduce(
            state,
            Action::ModifyFile {
                name: "README.md".to_string(),
                content: "# Updated".to_string(),
            },
        );
        let file = state.find_file("README.md").unwrap();
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.content, "# Updated");
    }

    #[test]
    fn test_modify_file_unresolved_is_noop() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let before = state.clone();
        let state = reduce(
            state,
            Action::ModifyFile {
                name: "ghost.txt".to_string(),
                content: "boo".to_string(),
            },
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_keeps_tutorial_id() {
        let mut state = TutorialState::new(TutorialId::FirebasePortfolio);
        state = run(state, "git init");
        state = reduce(state, Action::SetStep { step: 3 });
        let state = reduce(state, Action::Reset);
        assert_eq!(state.tutorial_id, TutorialId::FirebasePortfolio);
        assert_eq!(state.current_step, 0);
        assert!(!state.repo_initialized);
        assert!(state.completed_steps.is_empty());
        assert_eq!(state.terminal.len(), 1);
        assert_eq!(state.terminal[0].content, RESET_LINE);
    }

    #[test]
    fn test_commit_ids() {
        let commit = Commit::new("Initial commit", 0);
        assert_eq!(commit.id.len(), 40);
        assert!(commit.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(commit.short_id, &commit.id[..7]);
        assert!(commit.root_commit);
        assert!(!Commit::new("Second", 1).root_commit);
    }
}
