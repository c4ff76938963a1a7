// Job lifecycle state machine
//
// Statuses, the events that move a job between them, and the guard policy
// deciding which of those moves are accepted.

pub mod errors;
pub mod events;
pub mod guards;
pub mod states;

pub use errors::{GuardError, StateMachineError, StateMachineResult};
pub use events::JobEvent;
pub use guards::{StateGuard, TransitionPolicy};
pub use states::JobStatus;
