//! GitQuest - interactive Git tutorial engine.
//!
//! A simulated terminal over an in-memory file tree, a pure state
//! reducer implementing a miniature Git workflow (init / add / commit /
//! status / remote / push), and a lesson sequencer that advances a
//! tutorial whenever the learner's actions satisfy the active step's
//! completion predicate.
//!
//! # Example
//!
//! ```rust
//! use gitquest::{Tutorial, TutorialId};
//!
//! let mut tutorial = Tutorial::new(TutorialId::GitBasics);
//! let advance = tutorial.input("git init");
//! assert!(tutorial.state().repo_initialized);
//! assert_eq!(advance.unwrap().next_step, 1);
//! ```

pub mod catalog;
mod commands;
pub mod error;
pub mod explainer;
pub mod export;
pub mod fs;
pub mod persist;
mod state;

pub use catalog::{Step, TutorialId, UiAction};
pub use error::{Error, Result};
pub use explainer::{get_explanation, ExplainOutcome, ExplainRequest, Explainer, Explanation};
#[cfg(feature = "http_client")]
pub use explainer::HttpExplainer;
pub use persist::{MemoryProgressStore, ProgressStore, STEP_STORAGE_KEY};
pub use state::{reduce, Action, Commit, LineKind, TerminalLine, TutorialState, PROJECT_DIR};

/// Notification that a step was completed and the tutorial advanced.
///
/// Returned from [`Tutorial::dispatch`]; how it is surfaced (toast,
/// terminal banner, nothing) is the collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAdvance {
    /// Index of the step that was just completed.
    pub completed_step: usize,
    /// Title of the completed step.
    pub completed_title: &'static str,
    /// Index of the now-active step.
    pub next_step: usize,
}

/// The tutorial engine: the aggregate state plus the lesson sequencer.
///
/// All transitions are synchronous and run to completion (at most one
/// automatic step advance per dispatched action) before the next input
/// is accepted. The caller serializes dispatches.
pub struct Tutorial {
    state: TutorialState,
    steps: Vec<Step>,
    store: Option<Box<dyn ProgressStore>>,
    resume_hint: Option<usize>,
}

impl Tutorial {
    /// Create an engine for a tutorial with default settings.
    pub fn new(tutorial: TutorialId) -> Self {
        Self::builder().tutorial(tutorial).build()
    }

    /// Create a [`TutorialBuilder`] for customized configuration.
    pub fn builder() -> TutorialBuilder {
        TutorialBuilder::default()
    }

    /// The current aggregate state.
    pub fn state(&self) -> &TutorialState {
        &self.state
    }

    /// The active tutorial's ordered step list.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The active step.
    pub fn current_step(&self) -> &Step {
        &self.steps[self.state.current_step]
    }

    /// Step index read from the progress store at build time, if any.
    /// A resume hint only; the engine does not reconstruct state from
    /// it.
    pub fn resume_hint(&self) -> Option<usize> {
        self.resume_hint
    }

    /// Process one line of terminal input.
    pub fn input(&mut self, line: &str) -> Option<StepAdvance> {
        self.dispatch(Action::ProcessCommand {
            input: line.to_string(),
        })
    }

    /// Trigger the active step's UI action, if it has one.
    pub fn trigger_ui_action(&mut self) -> Option<StepAdvance> {
        let action = self.current_step().ui_action.as_ref()?.action.clone();
        self.dispatch(action)
    }

    /// Restart the active tutorial from the beginning.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }

    /// Apply an action, then run the sequencer check: evaluate the
    /// active step's predicate and advance by exactly one step when it
    /// is satisfied and the step is not the tutorial's last.
    pub fn dispatch(&mut self, action: Action) -> Option<StepAdvance> {
        if let Action::SetStep { step } = action {
            if step >= self.steps.len() {
                tracing::warn!(step, "ignoring out-of-range step");
                return None;
            }
        }

        let before = self.state.current_step;
        self.apply(action);
        let advance = self.check_completion();
        if self.state.current_step != before {
            if let Some(store) = self.store.as_deref_mut() {
                store.save_step(self.state.current_step);
            }
        }
        advance
    }

    /// Switch to another tutorial, restarting at step 0.
    pub fn switch_tutorial(&mut self, tutorial: TutorialId) {
        self.state = TutorialState::new(tutorial);
        self.steps = catalog::steps(tutorial);
    }

    fn apply(&mut self, action: Action) {
        let placeholder = TutorialState::new(self.state.tutorial_id);
        let state = std::mem::replace(&mut self.state, placeholder);
        self.state = reduce(state, action);
    }

    fn check_completion(&mut self) -> Option<StepAdvance> {
        let index = self.state.current_step;
        let step = &self.steps[index];
        let is_last = index + 1 == self.steps.len();
        if is_last || !(step.is_completed)(&self.state) {
            return None;
        }

        let advance = StepAdvance {
            completed_step: index,
            completed_title: step.title,
            next_step: index + 1,
        };
        tracing::info!(step = index, title = step.title, "step complete");
        self.apply(Action::SetStep { step: index + 1 });
        Some(advance)
    }
}

/// Builder for customized [`Tutorial`] configuration.
#[derive(Default)]
pub struct TutorialBuilder {
    tutorial: Option<TutorialId>,
    store: Option<Box<dyn ProgressStore>>,
}

impl TutorialBuilder {
    /// Select the tutorial to run. Defaults to
    /// [`TutorialId::GitBasics`].
    pub fn tutorial(mut self, tutorial: TutorialId) -> Self {
        self.tutorial = Some(tutorial);
        self
    }

    /// Attach a progress store. Read once at build time for the resume
    /// hint, written on every step change.
    pub fn progress_store(mut self, store: impl ProgressStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Build the [`Tutorial`] engine.
    pub fn build(self) -> Tutorial {
        let tutorial = self.tutorial.unwrap_or(TutorialId::GitBasics);
        let steps = catalog::steps(tutorial);
        let resume_hint = self
            .store
            .as_deref()
            .and_then(|s| s.load_step())
            .filter(|&step| step < steps.len());
        Tutorial {
            state: TutorialState::new(tutorial),
            steps,
            store: self.store,
            resume_hint,
        }
    }
}
