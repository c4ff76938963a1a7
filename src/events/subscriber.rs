//! # Status Subscribers
//!
//! Callbacks notified on every status transition of a job, in the order they
//! were registered. Registration is append-only: there is no unsubscribe and
//! the same callback may be registered twice.

use crate::models::Job;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with the job after each of its status transitions
pub type StatusSubscriber = Arc<dyn Fn(&Job) + Send + Sync>;

/// Wrap a closure as a [`StatusSubscriber`]
pub fn subscriber<F>(callback: F) -> StatusSubscriber
where
    F: Fn(&Job) + Send + Sync + 'static,
{
    Arc::new(callback)
}

/// Ordered list of a job's subscribers
#[derive(Clone, Default)]
pub struct SubscriberRegistry {
    subscribers: Vec<StatusSubscriber>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, subscriber: StatusSubscriber) {
        self.subscribers.push(subscriber);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Copy of the current subscribers, so dispatch can run without holding
    /// a borrow of the registry
    pub fn snapshot(&self) -> Vec<StatusSubscriber> {
        self.subscribers.clone()
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
