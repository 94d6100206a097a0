//! Simulated git subcommands.
//!
//! Each handler computes the exact terminal text and applies its state
//! effect. Failures are output text, never errors; the tree and commit
//! log are untouched on any failing path.

use crate::fs::FileStatus;
use crate::state::{Commit, TutorialState, PROJECT_DIR};

pub(super) fn init(state: &mut TutorialState) -> String {
    if state.repo_initialized {
        return format!("Reinitialized existing Git repository in /{PROJECT_DIR}/.git/");
    }
    state.repo_initialized = true;
    format!("Initialized empty Git repository in /{PROJECT_DIR}/.git/")
}

pub(super) fn status(state: &TutorialState) -> String {
    if !state.repo_initialized {
        return "fatal: not a git repository (or any of the parent directories): .git".to_string();
    }

    let mut staged = Vec::new();
    let mut modified = Vec::new();
    let mut untracked = Vec::new();
    for (path, file) in state.root.walk() {
        match file.status {
            FileStatus::Staged => staged.push(path),
            FileStatus::Modified => modified.push(path),
            FileStatus::Untracked => untracked.push(path),
            FileStatus::Unmodified => {}
        }
    }

    let mut out = String::from("On branch main\n");
    if state.commits.is_empty() {
        out.push_str("\nNo commits yet\n");
    }
    if !staged.is_empty() {
        out.push_str("\nChanges to be committed:\n");
        out.push_str("  (use \"git restore --staged <file>...\" to unstage)\n");
        for path in &staged {
            out.push_str(&format!("\tnew file:   {path}\n"));
        }
    }
    if !modified.is_empty() {
        out.push_str("\nChanges not staged for commit:\n");
        out.push_str("  (use \"git add <file>...\" to update what will be committed)\n");
        for path in &modified {
            out.push_str(&format!("\tmodified:   {path}\n"));
        }
    }
    if !untracked.is_empty() {
        out.push_str("\nUntracked files:\n");
        out.push_str("  (use \"git add <file>...\" to include in what will be committed)\n");
        for path in &untracked {
            out.push_str(&format!("\t{path}\n"));
        }
    }
    if staged.is_empty() && modified.is_empty() && untracked.is_empty() {
        out.push_str("\nnothing to commit, working tree clean\n");
    }

    out.trim_end().to_string()
}

pub(super) fn add(state: &mut TutorialState, pathspec: &str) -> String {
    if pathspec == "." {
        state.root.stage_pending();
        return String::new();
    }
    let matched = state.root.update_file(pathspec, |file| {
        if file.status.is_pending() {
            file.status = FileStatus::Staged;
        }
    });
    if matched {
        String::new()
    } else {
        format!("fatal: pathspec '{pathspec}' did not match any files")
    }
}

pub(super) fn commit(state: &mut TutorialState, message: &str) -> String {
    let staged_count = state.root.staged_count();
    if staged_count == 0 {
        let mut out = String::from("On branch main\n");
        if state.commits.is_empty() {
            out.push_str("No commits yet\n");
        }
        out.push_str("nothing to commit, working tree clean");
        return out;
    }

    let commit = Commit::new(message, state.commits.len());
    state.root.commit_staged();

    let qualifier = if commit.root_commit {
        " (root-commit)"
    } else {
        ""
    };
    let files = if staged_count == 1 { "file" } else { "files" };
    let insertions = if staged_count == 1 {
        "insertion"
    } else {
        "insertions"
    };
    let out = format!(
        "[main{qualifier} {}] {message}\n {staged_count} {files} changed, {staged_count} {insertions}(+)",
        commit.short_id
    );
    state.commits.insert(0, commit);
    out
}

pub(super) fn remote_add(state: &mut TutorialState, url: String) -> String {
    state.remote_url = Some(url);
    String::new()
}

pub(super) fn push(state: &TutorialState) -> String {
    match &state.remote_url {
        None => "fatal: 'origin' does not appear to be a git repository".to_string(),
        Some(url) => format!(
            "Enumerating objects: 3, done.\n\
             Counting objects: 100% (3/3), done.\n\
             Writing objects: 100% (3/3), 241 bytes | 241.00 KiB/s, done.\n\
             Total 3 (delta 0), reused 0 (delta 0), pack-reused 0\n\
             To {url}\n \
             * [new branch]      main -> main\n\
             Branch 'main' set up to track remote branch 'main' from 'origin'."
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::TutorialId;
    use crate::fs::FileStatus;
    use crate::state::{reduce, Action, LineKind, TutorialState};
    use pretty_assertions::assert_eq;

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
    fn test_init_output() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let state = run(state, "git init");
        assert_eq!(
            last_output(&state),
            "Initialized empty Git repository in /gitquest-project/.git/"
        );
        assert!(state.repo_initialized);
    }

    #[test]
    fn test_init_twice_reports_reinitialized() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        let state = run(state, "git init");
        assert_eq!(
            last_output(&state),
            "Reinitialized existing Git repository in /gitquest-project/.git/"
        );
        assert!(state.repo_initialized);
    }

    #[test]
    fn test_status_outside_repository() {
        let state = TutorialState::new(TutorialId::GitBasics);
        let state = run(state, "git status");
        assert_eq!(
            last_output(&state),
            "fatal: not a git repository (or any of the parent directories): .git"
        );
    }

    #[test]
    fn test_status_clean_tree() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        let state = run(state, "git status");
        assert_eq!(
            last_output(&state),
            "On branch main\n\nNo commits yet\n\nnothing to commit, working tree clean"
        );
    }

    #[test]
    fn test_status_sections() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add README.md");
        state = run(state, "mkdir src");
        state = run(state, "touch src/app.js");
        let state = run(state, "git status");
        assert_eq!(
            last_output(&state),
            "On branch main\n\
             \n\
             No commits yet\n\
             \n\
             Changes to be committed:\n  \
             (use \"git restore --staged <file>...\" to unstage)\n\
             \tnew file:   README.md\n\
             \n\
             Untracked files:\n  \
             (use \"git add <file>...\" to include in what will be committed)\n\
             \tsrc/app.js"
        );
    }

    #[test]
    fn test_status_lists_modified_section() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add .");
        state = run(state, "git commit -m \"Initial commit\"");
        state = reduce(
            state,
            Action::ModifyFile {
                name: "README.md".to_string(),
                content: "# Updated".to_string(),
            },
        );
        let state = run(state, "git status");
        assert_eq!(
            last_output(&state),
            "On branch main\n\
             \n\
             Changes not staged for commit:\n  \
             (use \"git add <file>...\" to update what will be committed)\n\
             \tmodified:   README.md"
        );
    }

    #[test]
    fn test_add_missing_pathspec() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        let state = run(state, "git add notes.txt");
        assert_eq!(
            last_output(&state),
            "fatal: pathspec 'notes.txt' did not match any files"
        );
    }

    #[test]
    fn test_add_single_path_stages_only_that_file() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "touch notes.txt");
        let state = run(state, "git add README.md");
        assert_eq!(last_output(&state), "");
        assert_eq!(
            state.find_file("README.md").unwrap().status,
            FileStatus::Staged
        );
        assert_eq!(
            state.find_file("notes.txt").unwrap().status,
            FileStatus::Untracked
        );
    }

    #[test]
    fn test_add_dot_stages_tree_wide() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "mkdir src");
        state = run(state, "touch src/app.js");
        let state = run(state, "git add .");
        assert_eq!(last_output(&state), "");
        for (_, file) in state.root.walk() {
            assert_eq!(file.status, FileStatus::Staged);
        }
    }

    #[test]
    fn test_add_dot_twice_is_idempotent() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add .");
        let once = state.root.clone();
        let state = run(state, "git add .");
        assert_eq!(state.root, once);
        assert_eq!(last_output(&state), "");
    }

    #[test]
    fn test_commit_nothing_staged() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        let state = run(state, "git commit -m \"empty\"");
        assert_eq!(
            last_output(&state),
            "On branch main\nNo commits yet\nnothing to commit, working tree clean"
        );
        assert!(state.commits.is_empty());
    }

    #[test]
    fn test_commit_root_commit_output() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add README.md");
        let state = run(state, "git commit -m \"Initial commit\"");
        let commit = &state.commits[0];
        assert_eq!(
            last_output(&state),
            format!(
                "[main (root-commit) {}] Initial commit\n 1 file changed, 1 insertion(+)",
                commit.short_id
            )
        );
        assert!(commit.root_commit);
        assert_eq!(
            state.find_file("README.md").unwrap().status,
            FileStatus::Unmodified
        );
    }

    #[test]
    fn test_second_commit_drops_root_qualifier() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "touch README.md");
        state = run(state, "git add .");
        state = run(state, "git commit -m \"first\"");
        state = run(state, "touch notes.txt");
        state = run(state, "mkdir src");
        state = run(state, "touch src/app.js");
        state = run(state, "git add .");
        let state = run(state, "git commit -m \"second\"");
        let commit = &state.commits[0];
        assert_eq!(
            last_output(&state),
            format!(
                "[main {}] second\n 2 files changed, 2 insertions(+)",
                commit.short_id
            )
        );
        assert!(!commit.root_commit);
        assert_eq!(state.commits.len(), 2);
        // Most recent first.
        assert_eq!(state.commits[1].message, "first");
    }

    #[test]
    fn test_push_without_remote() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        let tree_before = state.root.clone();
        let commits_before = state.commits.clone();
        let state = run(state, "git push -u origin main");
        assert_eq!(
            last_output(&state),
            "fatal: 'origin' does not appear to be a git repository"
        );
        assert_eq!(state.root, tree_before);
        assert_eq!(state.commits, commits_before);
    }

    #[test]
    fn test_remote_add_then_push() {
        let mut state = TutorialState::new(TutorialId::GitBasics);
        state = run(state, "git init");
        state = run(state, "git remote add origin https://github.com/me/repo.git");
        assert_eq!(last_output(&state), "");
        assert_eq!(
            state.remote_url.as_deref(),
            Some("https://github.com/me/repo.git")
        );
        let state = run(state, "git push -u origin main");
        assert_eq!(
            last_output(&state),
            "Enumerating objects: 3, done.\n\
             Counting objects: 100% (3/3), done.\n\
             Writing objects: 100% (3/3), 241 bytes | 241.00 KiB/s, done.\n\
             Total 3 (delta 0), reused 0 (delta 0), pack-reused 0\n\
             To https://github.com/me/repo.git\n \
             * [new branch]      main -> main\n\
             Branch 'main' set up to track remote branch 'main' from 'origin'."
        );
    }
}
