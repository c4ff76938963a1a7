//! Cross-thread transition tests

mod common;

use common::{test_job, CallRecorder};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tasker_job::models::CapturedException;
use tasker_job::state_machine::JobStatus;

#[test]
fn test_every_transition_dispatches_once() {
    let job = Arc::new(test_job("job_1"));
    let recorder = CallRecorder::new();
    job.on_status_change(recorder.callback("a"));

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let job = job.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    if i % 2 == 0 {
                        job.running().unwrap();
                    } else {
                        job.pending().unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    assert_eq!(recorder.count(), 200);
}

#[test]
fn test_dispatches_do_not_interleave() {
    let job = Arc::new(test_job("job_1"));
    let inside = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let statuses = Arc::new(Mutex::new(Vec::new()));

    {
        let inside = inside.clone();
        let overlaps = overlaps.clone();
        let statuses = statuses.clone();
        job.on_status_change(move |job| {
            if inside.swap(true, Ordering::SeqCst) {
                overlaps.fetch_add(1, Ordering::SeqCst);
            }
            let status = job.status();
            thread::yield_now();
            // The status a subscriber sees is the one its dispatch set
            assert_eq!(job.status(), status);
            statuses.lock().push(status);
            inside.store(false, Ordering::SeqCst);
        });
    }

    let threads: Vec<_> = [JobStatus::Running, JobStatus::Blocked]
        .into_iter()
        .map(|target| {
            let job = job.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    match target {
                        JobStatus::Running => job.running().unwrap(),
                        _ => job.blocked().unwrap(),
                    }
                }
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    let statuses = statuses.lock();
    assert_eq!(statuses.len(), 100);
    assert_eq!(
        statuses.iter().filter(|s| **s == JobStatus::Running).count(),
        50
    );
}

#[test]
fn test_completion_from_worker_thread() {
    let job = Arc::new(test_job("job_1"));
    let recorder = CallRecorder::new();
    job.on_status_change(recorder.callback("a"));
    job.running().unwrap();

    let settling = job.clone();
    thread::spawn(move || settling.update_status(Vec::new()))
        .join()
        .unwrap()
        .unwrap();

    assert!(job.is_completed());
    assert_eq!(
        recorder.calls(),
        vec![
            ("a".to_string(), JobStatus::Running),
            ("a".to_string(), JobStatus::Completed),
        ]
    );
}

#[test]
fn test_snapshot_is_consistent_across_threads() {
    let job = Arc::new(test_job("job_1"));
    let done = Arc::new(AtomicBool::new(false));

    let settling = {
        let job = job.clone();
        let done = done.clone();
        thread::spawn(move || {
            for _ in 0..200 {
                job.update_status(Vec::new()).unwrap();
                job.update_status(vec![CapturedException::new("ValueError", "boom")])
                    .unwrap();
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    // Completed always comes with no exceptions and Failed with exactly one
    while !done.load(Ordering::SeqCst) {
        let snapshot = job.snapshot();
        match snapshot.status {
            JobStatus::Completed => assert!(snapshot.exceptions.is_empty()),
            JobStatus::Failed => assert_eq!(snapshot.exceptions.len(), 1),
            other => assert_eq!(other, JobStatus::Submitted),
        }
    }
    settling.join().unwrap();
}
