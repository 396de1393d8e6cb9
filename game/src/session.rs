use crate::drill_core::DrillCore;

/// Owner of the single live drill.
///
/// Installing a new engine always shuts the previous one down first (countdown stopped,
/// pending events dropped), so two sessions can never tick at the same time.
#[derive(Debug, Default)]
pub struct SessionManager {
    active: Option<DrillCore>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tears down the current engine, if any, installs `next` and returns the old one.
    pub fn replace(&mut self, next: DrillCore) -> Option<DrillCore> {
        let previous = self.close();
        self.active = Some(next);
        tracing::debug!(replaced = previous.is_some(), "session installed");
        previous
    }

    /// Tears down and removes the current engine.
    pub fn close(&mut self) -> Option<DrillCore> {
        let mut previous = self.active.take()?;
        previous.shutdown();
        Some(previous)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn get(&self) -> Option<&DrillCore> {
        self.active.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut DrillCore> {
        self.active.as_mut()
    }
}
