//! Engine - Main entry point

use crate::{Error, Page};
use hookwork_host::{EditorChannel, Host};
use hookwork_widgets::{ComponentDefinition, Config, Runtime, DEFAULT_COMPONENTS};

/// The hookwork engine
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    components: Vec<ComponentDefinition>,
}

impl Engine {
    /// Create an engine with the built-in carousel and accordion
    pub fn new(config: Config) -> Self {
        tracing::info!("hookwork {} initialized", crate::VERSION);
        Self { config, components: DEFAULT_COMPONENTS.to_vec() }
    }
    
    /// Register an additional component kind for every page
    pub fn with_component(mut self, definition: ComponentDefinition) -> Self {
        self.components.push(definition);
        self
    }
    
    /// Load server-rendered markup and start every component kind
    pub fn load_html(&self, html: &str) -> Result<Page, Error> {
        let mut host = Host::new();
        if self.config.editor_channel {
            host = host.with_channel(Box::new(EditorChannel::new()));
        }
        self.load_html_with_host(html, host)
    }
    
    /// Load markup against caller-provided host capabilities
    pub fn load_html_with_host(&self, html: &str, host: Host) -> Result<Page, Error> {
        let document = hookwork_html::parse(html)?;
        let mut runtime = Runtime::new(self.config.clone(), document, host);
        for definition in &self.components {
            runtime.define(*definition)?;
        }
        let constructed = runtime.start_all()?;
        
        tracing::info!("Page loaded: {} widgets", constructed);
        Ok(Page::new(runtime))
    }
    
    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
