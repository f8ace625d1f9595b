//! hookwork host capabilities
//!
//! What a page offers the widget runtime besides the DOM:
//! - `TimerQueue`: virtual clock and one-shot timers
//! - `DocumentVisibility`: page visibility state
//! - `MediaPlayback`: restarting audio/video elements
//! - `MessageChannel`: optional editor command bridge

mod timers;
mod visibility;
mod media;
mod channel;

pub use timers::{TimerQueue, TimerId, PendingTimer};
pub use visibility::{DocumentVisibility, VisibilityState};
pub use media::{MediaPlayback, MediaLog, MediaError};
pub use channel::{MessageChannel, EditorChannel, Delivery};

/// Identity of whoever owns a timer or subscription (one widget instance)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u32);

/// Capabilities handed to the widget runtime
#[derive(Debug)]
pub struct Host {
    pub timers: TimerQueue,
    pub visibility: DocumentVisibility,
    pub media: Box<dyn MediaPlayback>,
    pub channel: Option<Box<dyn MessageChannel>>,
}

impl Host {
    /// Host without an editor channel
    pub fn new() -> Self {
        Self {
            timers: TimerQueue::new(),
            visibility: DocumentVisibility::new(),
            media: Box::new(MediaLog::new()),
            channel: None,
        }
    }
    
    /// Install a message channel
    pub fn with_channel(mut self, channel: Box<dyn MessageChannel>) -> Self {
        self.channel = Some(channel);
        self
    }
    
    /// Replace the media backend
    pub fn with_media(mut self, media: Box<dyn MediaPlayback>) -> Self {
        self.media = media;
        self
    }
    
    /// Drop every timer and subscription held by `owner`
    pub fn release(&mut self, owner: OwnerId) {
        self.timers.clear_owner(owner);
        if let Some(channel) = self.channel.as_mut() {
            channel.unsubscribe_owner(owner);
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}
