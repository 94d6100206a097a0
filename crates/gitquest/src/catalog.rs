//! Tutorial registry: ordered lesson steps per tutorial.
//!
//! Step descriptions are opaque display payloads for the surrounding
//! UI; the engine never inspects them. `command_to_proceed` is an
//! advisory pattern for display and hinting only; progression is
//! driven exclusively by each step's completion predicate over the
//! aggregate state.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fs::FileStatus;
use crate::state::{Action, TutorialState};

/// Identifier of a tutorial in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TutorialId {
    GitBasics,
    GithubPortfolio,
    FirebasePortfolio,
}

impl TutorialId {
    /// Every tutorial in the catalog.
    pub const ALL: [TutorialId; 3] = [
        TutorialId::GitBasics,
        TutorialId::GithubPortfolio,
        TutorialId::FirebasePortfolio,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            TutorialId::GitBasics => "Git Basics: The Core Workflow",
            TutorialId::GithubPortfolio => "Build a Portfolio with GitHub Pages",
            TutorialId::FirebasePortfolio => "Build a Portfolio with Firebase Hosting",
        }
    }

    /// Stable identifier used in persistence and on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            TutorialId::GitBasics => "git-basics",
            TutorialId::GithubPortfolio => "github-portfolio",
            TutorialId::FirebasePortfolio => "firebase-portfolio",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.slug() == slug)
    }
}

/// A UI-triggerable action attached to a step.
#[derive(Debug, Clone, PartialEq)]
pub struct UiAction {
    pub label: &'static str,
    pub action: Action,
}

/// One lesson step.
#[derive(Clone)]
pub struct Step {
    pub id: usize,
    pub title: &'static str,
    /// Opaque display payload; the engine never branches on it.
    pub description: &'static str,
    /// Advisory regex source for the suggested command, display only.
    pub command_to_proceed: Option<&'static str>,
    pub ui_action: Option<UiAction>,
    /// Total, side-effect-free completion predicate.
    pub is_completed: fn(&TutorialState) -> bool,
}

impl Step {
    /// Whether an input line matches the step's suggested command.
    /// A hint for the UI; never used for progression.
    pub fn matches_suggestion(&self, input: &str) -> bool {
        self.command_to_proceed
            .and_then(|pattern| Regex::new(pattern).ok())
            .is_some_and(|re| re.is_match(input.trim()))
    }
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("command_to_proceed", &self.command_to_proceed)
            .finish_non_exhaustive()
    }
}

fn file_has_status(state: &TutorialState, path: &str, status: FileStatus) -> bool {
    state.find_file(path).is_some_and(|f| f.status == status)
}

/// The ordered step list for a tutorial. The final step of every list
/// is terminal: its predicate is constantly false.
pub fn steps(id: TutorialId) -> Vec<Step> {
    match id {
        TutorialId::GitBasics => git_basics(),
        TutorialId::GithubPortfolio => github_portfolio(),
        TutorialId::FirebasePortfolio => firebase_portfolio(),
    }
}

fn git_basics() -> Vec<Step> {
    vec![
        Step {
            id: 0,
            title: "Welcome to GitQuest!",
            description: "Initialize a new Git repository in the project folder with `git init`.",
            command_to_proceed: Some("^git init$"),
            ui_action: None,
            is_completed: |s| s.repo_initialized,
        },
        Step {
            id: 1,
            title: "Creating a File",
            description: "Create your first file with `touch README.md`.",
            command_to_proceed: Some("^touch README.md$"),
            ui_action: None,
            is_completed: |s| s.find_file("README.md").is_some(),
        },
        Step {
            id: 2,
            title: "Checking the Status",
            description: "See what Git knows about your project with `git status`.",
            command_to_proceed: Some("^git status$"),
            ui_action: None,
            is_completed: |s| s.current_step == 2 && s.ran_command("git status"),
        },
        Step {
            id: 3,
            title: "Staging Changes",
            description: "Stage the new file for the next commit with `git add README.md`.",
            command_to_proceed: Some("^git add (README.md|\\.)$"),
            ui_action: None,
            is_completed: |s| file_has_status(s, "README.md", FileStatus::Staged),
        },
        Step {
            id: 4,
            title: "Committing Changes",
            description: "Snapshot your staged changes with `git commit -m \"Initial commit\"`.",
            command_to_proceed: Some("^git commit -m \".*\"$"),
            ui_action: None,
            is_completed: |s| !s.commits.is_empty(),
        },
        Step {
            id: 5,
            title: "Modifying a File",
            description: "Update README.md and watch its status change.",
            command_to_proceed: None,
            ui_action: Some(UiAction {
                label: "Modify README.md",
                action: Action::ModifyFile {
                    name: "README.md".to_string(),
                    content: "# My Awesome GitQuest Project".to_string(),
                },
            }),
            is_completed: |s| file_has_status(s, "README.md", FileStatus::Modified),
        },
        Step {
            id: 6,
            title: "Creating a Directory",
            description: "Organize your code: create a directory with `mkdir src`.",
            command_to_proceed: Some("^mkdir src$"),
            ui_action: None,
            is_completed: |s| s.root.dirs.iter().any(|d| d.name == "src"),
        },
        Step {
            id: 7,
            title: "Creating a File in a Directory",
            description: "Create a file inside it with `touch src/app.js`.",
            command_to_proceed: Some("^touch src/app.js$"),
            ui_action: None,
            is_completed: |s| s.find_file("src/app.js").is_some(),
        },
        Step {
            id: 8,
            title: "Viewing Full Status",
            description: "Run `git status` again to see every kind of change at once.",
            command_to_proceed: Some("^git status$"),
            ui_action: None,
            is_completed: |s| s.current_step == 8 && s.last_command() == Some("git status"),
        },
        Step {
            id: 9,
            title: "Staging All Changes",
            description: "Stage everything in one go with `git add .`.",
            command_to_proceed: Some("^git add \\.$"),
            ui_action: None,
            is_completed: |s| {
                file_has_status(s, "README.md", FileStatus::Staged)
                    && file_has_status(s, "src/app.js", FileStatus::Staged)
            },
        },
        Step {
            id: 10,
            title: "Committing Multiple Changes",
            description: "Commit the whole set with a message summarizing the work.",
            command_to_proceed: Some("^git commit -m \".*\"$"),
            ui_action: None,
            is_completed: |s| s.commits.len() > 1,
        },
        Step {
            id: 11,
            title: "Connecting to GitHub",
            description: "Link the repository to a remote with `git remote add origin <url>`.",
            command_to_proceed: Some("^git remote add origin .*"),
            ui_action: None,
            is_completed: |s| s.remote_url.is_some(),
        },
        Step {
            id: 12,
            title: "Pushing to Remote",
            description: "Publish your commits with `git push -u origin main`.",
            command_to_proceed: Some("^git push -u origin main$"),
            ui_action: None,
            is_completed: |s| s.ran_command("git push -u origin main"),
        },
        Step {
            id: 13,
            title: "Congratulations!",
            description: "You've completed the core Git workflow.",
            command_to_proceed: None,
            ui_action: None,
            // Terminal step: never auto-completed.
            is_completed: |_| false,
        },
    ]
}

fn github_portfolio() -> Vec<Step> {
    vec![
        Step {
            id: 0,
            title: "Build a Portfolio with GitHub Pages",
            description: "Create the main file for your website, index.html.",
            command_to_proceed: None,
            ui_action: Some(UiAction {
                label: "Create index.html",
                action: Action::CreateFile {
                    name: "index.html".to_string(),
                    content: String::new(),
                },
            }),
            is_completed: |s| s.find_file("index.html").is_some(),
        },
        Step {
            id: 1,
            title: "Add Content to Your Portfolio",
            description: "Add a title and a heading to index.html.",
            command_to_proceed: None,
            ui_action: Some(UiAction {
                label: "Add HTML Content",
                action: Action::ModifyFile {
                    name: "index.html".to_string(),
                    content: "<!DOCTYPE html>\n<html>\n<head>\n  <title>My Portfolio</title>\n</head>\n<body>\n  <h1>Welcome to My Portfolio!</h1>\n</body>\n</html>".to_string(),
                },
            }),
            is_completed: |s| {
                s.find_file("index.html")
                    .is_some_and(|f| f.content.contains("<h1>") && f.status == FileStatus::Modified)
            },
        },
        Step {
            id: 2,
            title: "Initialize a Git Repository",
            description: "Start tracking the project with `git init`.",
            command_to_proceed: Some("^git init$"),
            ui_action: None,
            is_completed: |s| s.repo_initialized,
        },
        Step {
            id: 3,
            title: "Stage Your File",
            description: "Stage index.html for the first commit.",
            command_to_proceed: Some("^git add (index.html|\\.)$"),
            ui_action: None,
            is_completed: |s| file_has_status(s, "index.html", FileStatus::Staged),
        },
        Step {
            id: 4,
            title: "Make Your First Commit",
            description: "Commit the staged file with a message.",
            command_to_proceed: Some("^git commit -m \".*\"$"),
            ui_action: None,
            is_completed: |s| !s.commits.is_empty(),
        },
        Step {
            id: 5,
            title: "Create a GitHub Repository",
            description: "Add the remote named origin with your repository URL.",
            command_to_proceed: Some("^git remote add origin .*"),
            ui_action: None,
            is_completed: |s| s.remote_url.is_some(),
        },
        Step {
            id: 6,
            title: "Push Your Code to GitHub",
            description: "Push the main branch to origin.",
            command_to_proceed: Some("^git push -u origin main$"),
            ui_action: None,
            is_completed: |s| s.ran_command("git push -u origin main"),
        },
        Step {
            id: 7,
            title: "Enable GitHub Pages",
            description: "Enable Pages in the repository settings; your site goes live.",
            command_to_proceed: None,
            ui_action: None,
            is_completed: |_| false,
        },
    ]
}

fn firebase_portfolio() -> Vec<Step> {
    vec![
        Step {
            id: 0,
            title: "Build a Portfolio with Firebase Hosting",
            description: "Create the main file for your website, index.html.",
            command_to_proceed: None,
            ui_action: Some(UiAction {
                label: "Create index.html",
                action: Action::CreateFile {
                    name: "index.html".to_string(),
                    content: String::new(),
                },
            }),
            is_completed: |s| s.find_file("index.html").is_some(),
        },
        Step {
            id: 1,
            title: "Add Content to Your Portfolio",
            description: "Add a title and a heading to index.html.",
            command_to_proceed: None,
            ui_action: Some(UiAction {
                label: "Add HTML Content",
                action: Action::ModifyFile {
                    name: "index.html".to_string(),
                    content: "<!DOCTYPE html>\n<html>\n<head>\n  <title>My Firebase Portfolio</title>\n</head>\n<body>\n  <h1>Welcome to My Firebase Portfolio!</h1>\n</body>\n</html>".to_string(),
                },
            }),
            is_completed: |s| {
                s.find_file("index.html")
                    .is_some_and(|f| f.content.contains("<h1>") && f.status == FileStatus::Modified)
            },
        },
        Step {
            id: 2,
            title: "Initialize a Git Repository",
            description: "Start tracking the project with `git init`.",
            command_to_proceed: Some("^git init$"),
            ui_action: None,
            is_completed: |s| s.repo_initialized,
        },
        Step {
            id: 3,
            title: "Stage Your File",
            description: "Stage index.html for the first commit.",
            command_to_proceed: Some("^git add (index.html|\\.)$"),
            ui_action: None,
            is_completed: |s| file_has_status(s, "index.html", FileStatus::Staged),
        },
        Step {
            id: 4,
            title: "Make Your First Commit",
            description: "Commit the staged file with a message.",
            command_to_proceed: Some("^git commit -m \".*\"$"),
            ui_action: None,
            is_completed: |s| !s.commits.is_empty(),
        },
        Step {
            id: 5,
            title: "The Firebase Hosting Workflow",
            description: "Read through the Firebase CLI deployment steps, then type `continue`.",
            command_to_proceed: Some("^continue$"),
            ui_action: None,
            // Acknowledged through the transcript even though `continue`
            // is not a recognized command.
            is_completed: |s| s.current_step == 5 && s.ran_command("continue"),
        },
        Step {
            id: 6,
            title: "Congratulations!",
            description: "You've learned the Git-to-Firebase deployment cycle.",
            command_to_proceed: None,
            ui_action: None,
            is_completed: |_| false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tutorial_ends_with_terminal_step() {
        for id in TutorialId::ALL {
            let steps = steps(id);
            assert!(!steps.is_empty());
            let last = steps.last().unwrap();
            // The terminal step must never auto-advance, whatever the state.
            assert!(!(last.is_completed)(&TutorialState::new(id)));
        }
    }

    #[test]
    fn test_step_ids_are_positional() {
        for id in TutorialId::ALL {
            for (index, step) in steps(id).iter().enumerate() {
                assert_eq!(step.id, index);
            }
        }
    }

    #[test]
    fn test_slug_round_trip() {
        for id in TutorialId::ALL {
            assert_eq!(TutorialId::from_slug(id.slug()), Some(id));
        }
        assert_eq!(TutorialId::from_slug("unknown"), None);
    }

    #[test]
    fn test_matches_suggestion() {
        let steps = steps(TutorialId::GitBasics);
        assert!(steps[0].matches_suggestion("git init"));
        assert!(steps[0].matches_suggestion("  git init  "));
        assert!(!steps[0].matches_suggestion("git status"));
        // Steps without a suggested command match nothing.
        assert!(!steps[5].matches_suggestion("git init"));
    }

    #[test]
    fn test_advisory_patterns_compile() {
        for id in TutorialId::ALL {
            for step in steps(id) {
                if let Some(pattern) = step.command_to_proceed {
                    assert!(Regex::new(pattern).is_ok(), "bad pattern: {pattern}");
                }
            }
        }
    }
}
