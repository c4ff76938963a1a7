pub mod publisher;
pub mod queued;
pub mod subscriber;

// Re-export key types for convenience
pub use publisher::{EventPublisher, PublishedEvent};
pub use queued::QueuedSubscriber;
pub use subscriber::{subscriber, StatusSubscriber, SubscriberRegistry};
