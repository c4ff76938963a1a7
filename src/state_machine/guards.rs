use super::errors::{GuardError, GuardResult};
use super::states::JobStatus;
use serde::{Deserialize, Serialize};

/// Trait for implementing job status transition guards
pub trait StateGuard: Send + Sync {
    /// Check if a transition from `from` to `to` is allowed
    fn check(&self, from: JobStatus, to: JobStatus) -> GuardResult<()>;

    /// Get a description of this guard for logging
    fn description(&self) -> &'static str;
}

/// How strictly a job polices its own transitions.
///
/// `Permissive` lets every transition operation run from any status, which is
/// how schedulers have always driven jobs. `Strict` only accepts the edges in
/// [`TransitionPolicy::allowed_targets`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    /// Allowed-transition table used by [`TransitionPolicy::Strict`].
    /// Terminal statuses have no outgoing edges.
    pub fn allowed_targets(from: JobStatus) -> &'static [JobStatus] {
        use JobStatus::*;
        match from {
            Submitted => &[Blocked, Pending, Running, Cancelled, Skipped, Failed],
            Blocked => &[Pending, Cancelled, Skipped, Failed],
            Pending => &[Running, Cancelled, Skipped, Failed],
            Running => &[Completed, Failed, Cancelled],
            Cancelled | Failed | Completed | Skipped => &[],
        }
    }

    pub fn allows(&self, from: JobStatus, to: JobStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => Self::allowed_targets(from).contains(&to),
        }
    }
}

impl StateGuard for TransitionPolicy {
    fn check(&self, from: JobStatus, to: JobStatus) -> GuardResult<()> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(GuardError::TransitionNotAllowed { from, to })
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::Permissive => "Any transition is allowed",
            Self::Strict => "Transition must follow the job lifecycle table",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_descriptions() {
        assert_eq!(
            TransitionPolicy::Permissive.description(),
            "Any transition is allowed"
        );
        assert_eq!(
            TransitionPolicy::Strict.description(),
            "Transition must follow the job lifecycle table"
        );
    }

    #[test]
    fn test_permissive_allows_everything() {
        for from in JobStatus::ALL {
            for to in JobStatus::ALL {
                assert!(TransitionPolicy::Permissive.check(from, to).is_ok());
            }
        }
    }

    #[test]
    fn test_strict_lifecycle() {
        let policy = TransitionPolicy::Strict;
        assert!(policy.check(JobStatus::Submitted, JobStatus::Pending).is_ok());
        assert!(policy.check(JobStatus::Pending, JobStatus::Running).is_ok());
        assert!(policy.check(JobStatus::Running, JobStatus::Completed).is_ok());

        assert_eq!(
            policy.check(JobStatus::Submitted, JobStatus::Completed),
            Err(GuardError::TransitionNotAllowed {
                from: JobStatus::Submitted,
                to: JobStatus::Completed,
            })
        );
        assert!(policy.check(JobStatus::Running, JobStatus::Pending).is_err());
    }

    #[test]
    fn test_strict_terminal_states_are_closed() {
        for from in JobStatus::ALL.iter().filter(|s| s.is_terminal()) {
            for to in JobStatus::ALL {
                assert!(TransitionPolicy::Strict.check(*from, to).is_err());
            }
        }
    }

    #[test]
    fn test_policy_serde() {
        let policy: TransitionPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, TransitionPolicy::Strict);
        assert_eq!(TransitionPolicy::default(), TransitionPolicy::Permissive);
    }
}
