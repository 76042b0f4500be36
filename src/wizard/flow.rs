use anyhow::{bail, Result};

use crate::wizard::session::SessionState;

/// Caller-supplied transition override. When present it replaces the default
/// index mutation for its action; the flow still owns the rerun decision.
/// The cursor gives the hook clamped access to this flow's step index, so a
/// hook can substitute its own mutation, e.g. conditionally skip a step.
pub type NavHook = Box<dyn Fn(&mut StepCursor<'_>) + Send + Sync>;

/// Handle passed to transition hooks: the one sanctioned way to move this
/// flow's step index from outside the flow, always clamped into range.
pub struct StepCursor<'a> {
    key: &'a str,
    step_count: usize,
    session: &'a mut SessionState,
}

impl StepCursor<'_> {
    /// Current step index of the flow being navigated.
    pub fn step(&self) -> usize {
        self.session.step(self.key).min(self.step_count - 1)
    }

    /// Assign the step index, clamped into `[0, step_count - 1]`.
    pub fn set_step(&mut self, step: isize) {
        let clamped = step.clamp(0, self.step_count as isize - 1) as usize;
        self.session.put_step(self.key, clamped);
    }

    /// The underlying session, for cached values and form state.
    pub fn session(&mut self) -> &mut SessionState {
        self.session
    }
}

/// Navigation rendering options. Named fields with defaults instead of a
/// free-form option map, so unrecognized options cannot slip through.
#[derive(Debug, Clone)]
pub struct NavStyle {
    pub back_label: String,
    pub next_label: String,
    pub generate_label: String,
    pub show_counter: bool,
}

impl Default for NavStyle {
    fn default() -> Self {
        Self {
            back_label: "Back".to_string(),
            next_label: "Next".to_string(),
            generate_label: "Generate Report".to_string(),
            show_counter: true,
        }
    }
}

/// Which navigation controls were activated during one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavClicks {
    pub back: bool,
    pub forward: bool,
}

/// Step-sequencing state machine for one named flow.
///
/// Holds the configured step titles; the mutable step index lives in the
/// `SessionState` under this flow's key. All transitions clamp into
/// `[0, step_count - 1]` and never fail.
pub struct WizardFlow {
    tool: String,
    steps: Vec<String>,
    key: String,
    style: NavStyle,
    on_back: Option<NavHook>,
    on_next: Option<NavHook>,
    on_generate: Option<NavHook>,
}

impl WizardFlow {
    /// A flow needs at least one step; an empty step list is a
    /// configuration error, raised here rather than deferred.
    pub fn new(tool: impl Into<String>, steps: Vec<String>) -> Result<Self> {
        let tool = tool.into();
        if steps.is_empty() {
            bail!("wizard flow `{tool}` configured with zero steps");
        }
        let key = format!("{tool}_step");
        Ok(Self {
            tool,
            steps,
            key,
            style: NavStyle::default(),
            on_back: None,
            on_next: None,
            on_generate: None,
        })
    }

    /// Isolate this flow's session key from other simultaneous flows.
    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.key = format!("{prefix}_{}_step", self.tool);
        self
    }

    pub fn with_style(mut self, style: NavStyle) -> Self {
        self.style = style;
        self
    }

    pub fn on_back(mut self, hook: impl Fn(&mut StepCursor<'_>) + Send + Sync + 'static) -> Self {
        self.on_back = Some(Box::new(hook));
        self
    }

    pub fn on_next(mut self, hook: impl Fn(&mut StepCursor<'_>) + Send + Sync + 'static) -> Self {
        self.on_next = Some(Box::new(hook));
        self
    }

    pub fn on_generate(
        mut self,
        hook: impl Fn(&mut StepCursor<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.on_generate = Some(Box::new(hook));
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Current step index, clamped in case the stored value outlived a
    /// reconfiguration to fewer steps.
    pub fn step(&self, session: &SessionState) -> usize {
        session.step(&self.key).min(self.steps.len() - 1)
    }

    pub fn step_title<'a>(&'a self, session: &SessionState) -> &'a str {
        &self.steps[self.step(session)]
    }

    pub fn is_last_step(&self, session: &SessionState) -> bool {
        self.step(session) == self.steps.len() - 1
    }

    /// Counter line for the navigation header, when enabled.
    pub fn counter_text(&self, session: &SessionState) -> Option<String> {
        if !self.style.show_counter {
            return None;
        }
        Some(format!(
            "Step {} of {}: {}",
            self.step(session) + 1,
            self.steps.len(),
            self.step_title(session)
        ))
    }

    /// Label for the forward control: "generate" semantics on the terminal
    /// step, plain "next" everywhere else.
    pub fn forward_label(&self, session: &SessionState) -> &str {
        if self.is_last_step(session) {
            &self.style.generate_label
        } else {
            &self.style.next_label
        }
    }

    pub fn back_label(&self) -> &str {
        &self.style.back_label
    }

    /// Advance one step; no-op when already on the last step.
    pub fn next(&self, session: &mut SessionState) {
        let current = self.step(session);
        if current + 1 < self.steps.len() {
            session.put_step(&self.key, current + 1);
        }
    }

    /// Go back one step; no-op when already on the first step.
    pub fn back(&self, session: &mut SessionState) {
        let current = self.step(session);
        if current > 0 {
            session.put_step(&self.key, current - 1);
        }
    }

    /// Arbitrary jump, clamped into range. Used by restart actions.
    pub fn set_step(&self, session: &mut SessionState, step: isize) {
        let clamped = step.clamp(0, self.steps.len() as isize - 1) as usize;
        session.put_step(&self.key, clamped);
    }

    pub fn reset(&self, session: &mut SessionState) {
        self.set_step(session, 0);
    }

    /// Apply one render pass worth of navigation input.
    ///
    /// `back` and non-terminal `forward` commit a transition and request a
    /// synchronous rerun, because the surrounding render pass reads the step
    /// index near its start; without the rerun the transition would only
    /// become visible on the next unrelated interaction. The terminal
    /// forward action fires the generate hook and deliberately does not
    /// request a rerun: generation produces its output within the same pass
    /// and a forced re-run would discard it.
    pub fn render_nav(&self, session: &mut SessionState, clicks: NavClicks) -> NavClicks {
        if clicks.back {
            match &self.on_back {
                Some(hook) => hook(&mut self.cursor(session)),
                None => self.back(session),
            }
            session.request_rerun();
        }

        if clicks.forward {
            if self.is_last_step(session) {
                if let Some(hook) = &self.on_generate {
                    hook(&mut self.cursor(session));
                }
            } else {
                match &self.on_next {
                    Some(hook) => hook(&mut self.cursor(session)),
                    None => self.next(session),
                }
                session.request_rerun();
            }
        }

        clicks
    }

    fn cursor<'a>(&'a self, session: &'a mut SessionState) -> StepCursor<'a> {
        StepCursor {
            key: &self.key,
            step_count: self.steps.len(),
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_step_flow() -> WizardFlow {
        WizardFlow::new(
            "generator",
            vec![
                "Project".to_string(),
                "Findings".to_string(),
                "Review".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn zero_steps_is_a_configuration_error() {
        let err = match WizardFlow::new("broken", Vec::new()) {
            Ok(_) => panic!("zero-step flow should not construct"),
            Err(err) => err,
        };
        assert!(format!("{err}").contains("zero steps"));
    }

    #[test]
    fn next_and_back_clamp_at_the_ends() {
        let flow = three_step_flow();
        let mut session = SessionState::new();

        assert_eq!(flow.step(&session), 0);
        flow.next(&mut session);
        assert_eq!(flow.step(&session), 1);
        flow.next(&mut session);
        assert_eq!(flow.step(&session), 2);
        flow.next(&mut session);
        assert_eq!(flow.step(&session), 2);

        flow.back(&mut session);
        assert_eq!(flow.step(&session), 1);
        flow.back(&mut session);
        assert_eq!(flow.step(&session), 0);
        flow.back(&mut session);
        assert_eq!(flow.step(&session), 0);
    }

    #[test]
    fn set_step_clamps_both_directions() {
        let flow = three_step_flow();
        let mut session = SessionState::new();

        flow.set_step(&mut session, 99);
        assert_eq!(flow.step(&session), 2);
        flow.set_step(&mut session, -5);
        assert_eq!(flow.step(&session), 0);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let flow = three_step_flow();
        let mut session = SessionState::new();
        flow.set_step(&mut session, 2);
        flow.reset(&mut session);
        assert_eq!(flow.step(&session), 0);
    }

    #[test]
    fn key_prefix_isolates_simultaneous_flows() {
        let generator = three_step_flow().with_key_prefix("site_a");
        let transformer = three_step_flow().with_key_prefix("site_b");
        let mut session = SessionState::new();

        generator.next(&mut session);
        assert_eq!(generator.step(&session), 1);
        assert_eq!(transformer.step(&session), 0);
    }

    #[test]
    fn forward_label_switches_to_generate_on_last_step() {
        let flow = three_step_flow();
        let mut session = SessionState::new();
        assert_eq!(flow.forward_label(&session), "Next");
        flow.set_step(&mut session, 2);
        assert_eq!(flow.forward_label(&session), "Generate Report");
    }

    #[test]
    fn counter_text_respects_show_counter() {
        let mut session = SessionState::new();
        let flow = three_step_flow();
        assert_eq!(
            flow.counter_text(&session).as_deref(),
            Some("Step 1 of 3: Project")
        );

        let quiet = three_step_flow().with_style(NavStyle {
            show_counter: false,
            ..NavStyle::default()
        });
        assert_eq!(quiet.counter_text(&session), None);
        flow.next(&mut session);
        assert_eq!(
            flow.counter_text(&session).as_deref(),
            Some("Step 2 of 3: Findings")
        );
    }

    #[test]
    fn committed_transitions_request_rerun_but_generate_does_not() {
        let flow = three_step_flow();
        let mut session = SessionState::new();

        flow.render_nav(
            &mut session,
            NavClicks {
                back: false,
                forward: true,
            },
        );
        assert_eq!(flow.step(&session), 1);
        assert!(session.take_rerun());

        flow.render_nav(
            &mut session,
            NavClicks {
                back: true,
                forward: false,
            },
        );
        assert_eq!(flow.step(&session), 0);
        assert!(session.take_rerun());

        // Jump to the terminal step and fire the generate action
        flow.set_step(&mut session, 2);
        session.take_rerun();
        flow.render_nav(
            &mut session,
            NavClicks {
                back: false,
                forward: true,
            },
        );
        assert_eq!(flow.step(&session), 2);
        assert!(!session.rerun_requested());
    }

    #[test]
    fn hooks_override_default_transitions() {
        // on_next skips straight to the review step
        let flow = three_step_flow().on_next(|cursor| cursor.set_step(2));
        let mut session = SessionState::new();

        flow.render_nav(
            &mut session,
            NavClicks {
                back: false,
                forward: true,
            },
        );
        assert_eq!(flow.step(&session), 2);
        assert!(session.take_rerun());
    }

    #[test]
    fn cursor_set_step_clamps_like_the_flow() {
        let flow = three_step_flow().on_next(|cursor| cursor.set_step(99));
        let mut session = SessionState::new();
        flow.render_nav(
            &mut session,
            NavClicks {
                back: false,
                forward: true,
            },
        );
        assert_eq!(flow.step(&session), 2);
    }

    #[test]
    fn generate_hook_fires_on_terminal_forward() {
        let flow = three_step_flow()
            .on_generate(|cursor| cursor.session().set("generated", serde_json::json!(true)));
        let mut session = SessionState::new();
        flow.set_step(&mut session, 2);

        flow.render_nav(
            &mut session,
            NavClicks {
                back: false,
                forward: true,
            },
        );
        assert_eq!(session.get("generated"), Some(&serde_json::json!(true)));
        assert!(!session.rerun_requested());
    }
}
