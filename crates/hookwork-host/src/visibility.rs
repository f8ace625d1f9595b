//! Page Visibility API
//!
//! Track document visibility state on the virtual clock.

/// Visibility state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityState {
    #[default]
    Visible,
    Hidden,
    Prerender,
}

/// Document visibility
#[derive(Debug, Default)]
pub struct DocumentVisibility {
    state: VisibilityState,
    last_change_ms: u64,
    hidden_duration_ms: u64,
}

impl DocumentVisibility {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Get current visibility state
    pub fn visibility_state(&self) -> VisibilityState {
        self.state
    }
    
    /// Check if document is hidden
    pub fn is_hidden(&self) -> bool {
        self.state == VisibilityState::Hidden
    }
    
    /// Set visibility state at virtual time `now_ms`. Returns true on change.
    pub fn set_state(&mut self, state: VisibilityState, now_ms: u64) -> bool {
        if self.state == state {
            return false;
        }
        
        if self.is_hidden() {
            self.hidden_duration_ms += now_ms.saturating_sub(self.last_change_ms);
        }
        
        tracing::debug!("visibility {:?} -> {:?}", self.state, state);
        self.state = state;
        self.last_change_ms = now_ms;
        true
    }
    
    /// Total hidden time up to `now_ms`
    pub fn hidden_duration(&self, now_ms: u64) -> u64 {
        let mut duration = self.hidden_duration_ms;
        if self.is_hidden() {
            duration += now_ms.saturating_sub(self.last_change_ms);
        }
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_visibility_change() {
        let mut vis = DocumentVisibility::new();
        assert_eq!(vis.visibility_state(), VisibilityState::Visible);
        
        assert!(vis.set_state(VisibilityState::Hidden, 100));
        assert!(vis.is_hidden());
        assert!(!vis.set_state(VisibilityState::Hidden, 150));
    }
    
    #[test]
    fn test_hidden_duration() {
        let mut vis = DocumentVisibility::new();
        vis.set_state(VisibilityState::Hidden, 100);
        assert_eq!(vis.hidden_duration(250), 150);
        
        vis.set_state(VisibilityState::Visible, 300);
        vis.set_state(VisibilityState::Hidden, 1_000);
        vis.set_state(VisibilityState::Visible, 1_050);
        assert_eq!(vis.hidden_duration(5_000), 250);
    }
}
