//! Coach client behaviour that does not need the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use united_runners::coach::{
    generate_or_fallback, CoachClient, CoachError, PlanJob, PlanRequest, UNAVAILABLE_TEXT,
};
use united_runners::config::CoachSettings;

fn client_without_key() -> CoachClient {
    let settings = CoachSettings {
        api_key: Some("   ".to_string()),
        ..CoachSettings::default()
    };
    CoachClient::new(&settings).unwrap()
}

#[test]
fn test_blank_key_counts_as_missing() {
    let client = client_without_key();
    assert!(!client.has_api_key());
    assert!(matches!(
        client.generate(&PlanRequest::default()),
        Err(CoachError::MissingApiKey)
    ));
}

#[test]
fn test_failure_becomes_apology() {
    let client = client_without_key();
    assert_eq!(generate_or_fallback(&client, &PlanRequest::default()), UNAVAILABLE_TEXT);
}

#[test]
fn test_unreachable_endpoint_becomes_apology() {
    let settings = CoachSettings {
        api_key: Some("test-key".to_string()),
        // Discard port on loopback, nothing listens there.
        base_url: "http://127.0.0.1:9/v1beta".to_string(),
        ..CoachSettings::default()
    };
    let client = CoachClient::new(&settings).unwrap();
    assert_eq!(generate_or_fallback(&client, &PlanRequest::default()), UNAVAILABLE_TEXT);
}

#[test]
fn test_plan_job_delivers_result_and_notifies() {
    let notified = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&notified);

    let job = PlanJob::spawn(
        Arc::new(client_without_key()),
        PlanRequest::default(),
        move || flag.store(true, Ordering::SeqCst),
    );

    let deadline = Instant::now() + Duration::from_secs(10);
    let plan = loop {
        if let Some(plan) = job.poll() {
            break plan;
        }
        assert!(Instant::now() < deadline, "plan job did not finish");
        thread::sleep(Duration::from_millis(10));
    };

    assert_eq!(plan.text, UNAVAILABLE_TEXT);

    let deadline = Instant::now() + Duration::from_secs(1);
    while !notified.load(Ordering::SeqCst) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(notified.load(Ordering::SeqCst));
}
