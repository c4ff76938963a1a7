mod common;

use common::strategies::*;
use common::{job_created_at, test_task, CallRecorder};
use proptest::prelude::*;
use tasker_job::models::{Job, JobId};
use tasker_job::state_machine::{StateMachineError, TransitionPolicy};

proptest! {
    /// Property: ordering follows creation dates and never consults ids
    #[test]
    fn ordering_follows_creation_dates(
        id_a in job_id_strategy(),
        id_b in job_id_strategy(),
        date_a in creation_date_strategy(),
        date_b in creation_date_strategy(),
    ) {
        let a = job_created_at(&id_a, date_a);
        let b = job_created_at(&id_b, date_b);

        prop_assert_eq!(a < b, date_a < date_b);
        prop_assert_eq!(a > b, date_a > date_b);
        prop_assert_eq!(a <= b, date_a <= date_b);
        prop_assert_eq!(a >= b, date_a >= date_b);
        prop_assert_eq!(a == b, id_a == id_b);
    }

    /// Property: under the permissive policy every event lands its target status
    /// and notifies each subscriber exactly once
    #[test]
    fn permissive_jobs_follow_every_event(events in event_sequence_strategy()) {
        let job = Job::new(JobId::new("job_1"), test_task(), false);
        let recorder = CallRecorder::new();
        job.on_status_change(recorder.callback("a"));

        for event in &events {
            prop_assert!(job.transition(*event).is_ok());
            prop_assert_eq!(job.status(), event.target_status());
        }
        prop_assert_eq!(recorder.count(), events.len());
    }

    /// Property: under the strict policy a transition succeeds exactly when the
    /// table allows it, and a rejection leaves status and subscribers untouched
    #[test]
    fn strict_jobs_follow_the_table(events in event_sequence_strategy()) {
        let job = Job::builder(JobId::new("job_1"), test_task())
            .policy(TransitionPolicy::Strict)
            .build();
        let recorder = CallRecorder::new();
        job.on_status_change(recorder.callback("a"));
        let mut accepted = 0;

        for event in events {
            let before = job.status();
            let target = event.target_status();
            match job.transition(event) {
                Ok(()) => {
                    prop_assert!(TransitionPolicy::Strict.allows(before, target));
                    prop_assert_eq!(job.status(), target);
                    accepted += 1;
                }
                Err(err) => {
                    prop_assert!(!TransitionPolicy::Strict.allows(before, target));
                    prop_assert_eq!(err, StateMachineError::InvalidTransition { from: before, to: target });
                    prop_assert_eq!(job.status(), before);
                }
            }
        }
        prop_assert_eq!(recorder.count(), accepted);
    }

    /// Property: terminal statuses have no outgoing edges in the strict table
    #[test]
    fn strict_terminal_statuses_are_final(from in job_status_strategy(), to in job_status_strategy()) {
        if from.is_terminal() {
            prop_assert!(!TransitionPolicy::Strict.allows(from, to));
        }
        prop_assert!(TransitionPolicy::Permissive.allows(from, to));
    }

    /// Property: a late subscriber is caught up exactly when the job left submitted
    #[test]
    fn late_subscribers_are_caught_up(events in event_sequence_strategy()) {
        let job = Job::new(JobId::new("job_1"), test_task(), false);
        for event in &events {
            job.transition(*event).unwrap();
        }

        let recorder = CallRecorder::new();
        job.on_status_change(recorder.callback("late"));

        let expected = usize::from(!job.is_submitted());
        prop_assert_eq!(recorder.count(), expected);
    }
}
