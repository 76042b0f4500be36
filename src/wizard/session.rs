use std::collections::HashMap;

/// Per-session mutable state: wizard step indices, cached fetched rows and
/// form values, and the rerun flag the presentation loop checks.
///
/// Explicit object threaded through the render pass rather than hidden
/// process-global state, so flows stay testable without a live UI runtime.
/// A step entry is created on first access (default 0) and lives for the
/// session.
#[derive(Debug, Default)]
pub struct SessionState {
    steps: HashMap<String, usize>,
    values: HashMap<String, serde_json::Value>,
    rerun_requested: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step index for a flow key, 0 when never set.
    pub fn step(&self, key: &str) -> usize {
        self.steps.get(key).copied().unwrap_or(0)
    }

    /// Raw step assignment. Clamping is the flow's job; only `WizardFlow`
    /// transitions should call this.
    pub(crate) fn put_step(&mut self, key: &str, step: usize) {
        self.steps.insert(key.to_string(), step);
    }

    /// Cached value (fetched row, form data) under a session key.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Mark the render pass dirty: the owner of the presentation loop should
    /// re-run it so the next displayed state reflects the transition.
    pub fn request_rerun(&mut self) {
        self.rerun_requested = true;
    }

    /// Consume the rerun flag. The presentation loop calls this at the top
    /// of each pass.
    pub fn take_rerun(&mut self) -> bool {
        std::mem::take(&mut self.rerun_requested)
    }

    pub fn rerun_requested(&self) -> bool {
        self.rerun_requested
    }
}
