//! Page - A loaded document with live widgets

use crate::Error;
use hookwork_dom::{Document, NodeId};
use hookwork_host::VisibilityState;
use hookwork_widgets::{Accordion, Carousel, Key, Runtime, UiEvent};

/// A loaded page
#[derive(Debug)]
pub struct Page {
    runtime: Runtime,
}

impl Page {
    pub(crate) fn new(runtime: Runtime) -> Self {
        Self { runtime }
    }
    
    pub fn document(&self) -> &Document {
        self.runtime.document()
    }
    
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }
    
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }
    
    /// Element by `id` attribute
    pub fn element(&self, id: &str) -> Result<NodeId, Error> {
        self.document()
            .get_element_by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }
    
    /// Append markup under `parent` and construct any widgets it declares
    pub fn inject_html(&mut self, parent: NodeId, html: &str) -> Result<Vec<NodeId>, Error> {
        let inserted = hookwork_html::insert_fragment(self.runtime.document_mut(), parent, html)?;
        self.runtime.flush()?;
        Ok(inserted)
    }
    
    /// Remove a subtree; widgets rooted in it are disposed
    pub fn remove(&mut self, node: NodeId) -> Result<(), Error> {
        self.runtime.remove(node)?;
        Ok(())
    }
    
    pub fn click(&mut self, target: NodeId) -> Result<UiEvent, Error> {
        Ok(self.runtime.click(target)?)
    }
    
    /// Key down by DOM key name (`"ArrowLeft"`, `"End"`, `" "`, ...)
    pub fn press(&mut self, target: NodeId, key: &str) -> Result<UiEvent, Error> {
        Ok(self.runtime.key_down(target, Key::from_name(key))?)
    }
    
    pub fn hover(&mut self, target: NodeId) -> Result<UiEvent, Error> {
        Ok(self.runtime.mouse_enter(target)?)
    }
    
    pub fn unhover(&mut self, target: NodeId) -> Result<UiEvent, Error> {
        Ok(self.runtime.mouse_leave(target)?)
    }
    
    /// Advance the virtual clock
    pub fn advance(&mut self, ms: u64) -> Result<usize, Error> {
        Ok(self.runtime.advance(ms)?)
    }
    
    pub fn set_visibility(&mut self, state: VisibilityState) -> bool {
        self.runtime.set_visibility(state)
    }
    
    /// Post an editor command; false when the page has no editor channel
    pub fn post_message(&mut self, data: &str) -> Result<bool, Error> {
        Ok(self.runtime.post_message(data)?)
    }
    
    pub fn carousel(&self, root: NodeId) -> Option<&Carousel> {
        self.runtime.instance::<Carousel>(root)
    }
    
    pub fn accordion(&self, root: NodeId) -> Option<&Accordion> {
        self.runtime.instance::<Accordion>(root)
    }
    
    pub fn widget_count(&self) -> usize {
        self.runtime.instance_count()
    }
}
