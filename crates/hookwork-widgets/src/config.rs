//! Runtime Configuration

/// Runtime configuration options
#[derive(Debug, Clone)]
pub struct Config {
    /// Topic remote commands arrive on
    pub message_topic: String,
    
    /// Install an in-memory editor channel when building a page
    pub editor_channel: bool,
    
    /// Dispose instances whose root is removed from the document
    pub dispose_on_removal: bool,
    
    /// Maximum timers a single `advance` may run
    pub timer_step_limit: usize,
    
    /// Maximum mutation-record passes per flush
    pub flush_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            message_topic: "hookwork:command".to_string(),
            editor_channel: false,
            dispose_on_removal: true,
            timer_step_limit: 10_000,
            flush_limit: 64,
        }
    }
}
