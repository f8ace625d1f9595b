//! Media playback
//!
//! The carousel rewinds audio/video in the slide it activates. Hosts plug
//! a backend in through `MediaPlayback`; `MediaLog` records requests and can
//! be told to refuse specific elements the way a browser refuses to replay
//! some resources.

use hookwork_dom::NodeId;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Media backend errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("Playback not allowed for {0:?}")]
    NotAllowed(NodeId),
    
    #[error("Media source not supported")]
    Unsupported,
}

/// Restart playback of a media element from position zero
pub trait MediaPlayback: std::fmt::Debug {
    fn restart(&mut self, element: NodeId) -> Result<(), MediaError>;
}

/// Recording media backend.
///
/// Clones share one log, so a test can keep a handle after giving the
/// backend to a `Host`.
#[derive(Debug, Clone, Default)]
pub struct MediaLog {
    inner: Rc<RefCell<MediaLogState>>,
}

#[derive(Debug, Default)]
struct MediaLogState {
    restarted: Vec<NodeId>,
    refused: HashSet<NodeId>,
}

impl MediaLog {
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Make every later restart of `element` fail
    pub fn refuse(&self, element: NodeId) {
        self.inner.borrow_mut().refused.insert(element);
    }
    
    /// Successfully restarted elements, oldest first
    pub fn restarted(&self) -> Vec<NodeId> {
        self.inner.borrow().restarted.clone()
    }
}

impl MediaPlayback for MediaLog {
    fn restart(&mut self, element: NodeId) -> Result<(), MediaError> {
        let mut state = self.inner.borrow_mut();
        if state.refused.contains(&element) {
            return Err(MediaError::NotAllowed(element));
        }
        state.restarted.push(element);
        Ok(())
    }
}
