//! File and directory commands: touch, mkdir.

use crate::state::TutorialState;

pub(super) fn touch(state: &mut TutorialState, path: Option<&str>) -> String {
    let Some(path) = path else {
        return "touch: missing file operand".to_string();
    };
    match state.root.create_file(path, "") {
        Ok(()) => String::new(),
        Err(_) => format!("touch: cannot touch '{path}': No such file or directory"),
    }
}

pub(super) fn mkdir(state: &mut TutorialState, name: Option<&str>) -> String {
    let Some(name) = name else {
        return "mkdir: missing operand".to_string();
    };
    // Flat two-level workspace: only first-level directories.
    if name.is_empty() || name.contains('/') {
        return format!("mkdir: cannot create directory '{name}': Invalid name");
    }
    match state.root.create_dir(name) {
        Ok(()) => String::new(),
        Err(_) => format!("mkdir: cannot create directory '{name}': File exists"),
    }
}
