//! Transcript buffer tests

use kubescribe::{CommandResult, Transcript};
use std::thread;

fn entry(n: usize) -> CommandResult {
    CommandResult {
        command: format!("kubectl describe pod web-{} -n default", n),
        stdout: format!("Name: web-{}", n),
        stderr: String::new(),
        exit_code: 0,
        duration_ms: n as u64,
        parsed_data: None,
    }
}

#[test]
fn test_fifo_keeps_last_200_of_205() {
    let transcript = Transcript::new();
    let appended: Vec<CommandResult> = (0..205).map(entry).collect();
    for result in &appended {
        transcript.append(result.clone());
    }

    let snapshot = transcript.snapshot();
    assert_eq!(snapshot.len(), 200);
    assert_eq!(snapshot, appended[5..].to_vec());
}

#[test]
fn test_snapshot_does_not_observe_later_mutation() {
    let transcript = Transcript::new();
    transcript.append(entry(1));

    let snapshot = transcript.snapshot();
    transcript.append(entry(2));
    transcript.clear();

    assert_eq!(snapshot, vec![entry(1)]);
    assert!(transcript.is_empty());
}

#[test]
fn test_clear_then_append() {
    let transcript = Transcript::with_capacity(2);
    transcript.append(entry(1));
    transcript.append(entry(2));
    transcript.clear();
    transcript.append(entry(3));

    assert_eq!(transcript.snapshot(), vec![entry(3)]);
}

#[test]
fn test_isolated_instances_do_not_share_state() {
    let first = Transcript::new();
    let second = Transcript::new();
    first.append(entry(1));

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn test_concurrent_appends_stay_bounded() {
    let transcript = Transcript::with_capacity(50);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let transcript = transcript.clone();
            thread::spawn(move || {
                for n in 0..100 {
                    transcript.append(entry(worker * 1000 + n));
                    if n % 10 == 0 {
                        let _ = transcript.snapshot();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(transcript.len(), 50);
}

#[test]
fn test_per_writer_order_is_preserved() {
    let transcript = Transcript::with_capacity(1000);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let transcript = transcript.clone();
            thread::spawn(move || {
                for n in 0..50 {
                    transcript.append(entry(worker * 1000 + n));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = transcript.snapshot();
    for worker in 0..4u64 {
        let seen: Vec<u64> = snapshot
            .iter()
            .map(|r| r.duration_ms)
            .filter(|d| d / 1000 == worker)
            .collect();
        let expected: Vec<u64> = (0..50).map(|n| worker * 1000 + n).collect();
        assert_eq!(seen, expected);
    }
}
