use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tasker_job::state_machine::{JobEvent, JobStatus};

/// Strategy for generating any job status
pub fn job_status_strategy() -> impl Strategy<Value = JobStatus> {
    prop::sample::select(JobStatus::ALL.to_vec())
}

/// Strategy for generating transition events
pub fn job_event_strategy() -> impl Strategy<Value = JobEvent> {
    prop_oneof![
        Just(JobEvent::Block),
        Just(JobEvent::Pend),
        Just(JobEvent::Run),
        Just(JobEvent::Cancel),
        Just(JobEvent::Fail),
        Just(JobEvent::Complete),
        Just(JobEvent::Skip),
    ]
}

/// Strategy for generating event sequences a scheduler might issue
pub fn event_sequence_strategy() -> impl Strategy<Value = Vec<JobEvent>> {
    prop::collection::vec(job_event_strategy(), 0..20)
}

/// Strategy for generating creation dates within a day of a fixed instant
pub fn creation_date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..86_400_000).prop_map(|offset_ms| {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::milliseconds(offset_ms)
    })
}

/// Strategy for generating job ids
pub fn job_id_strategy() -> impl Strategy<Value = String> {
    "job_[a-z0-9]{1,8}"
}
