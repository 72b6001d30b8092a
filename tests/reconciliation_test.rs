//! End-to-end reconciliation through the app loop and the mock adapters.

mod common;

use std::time::Duration;

use common::*;
use seatbelt::app::{run_headless, App};
use seatbelt::config::BeltConfig;
use seatbelt::controller::{
    Controller, ControllerPhase, SyncTrigger, MSG_CONNECTED, MSG_NO_GPIO, MSG_REMOTE_FAILED,
};
use seatbelt::gpio::EdgeEvent;
use seatbelt::remote::RemoteSyncClient;
use seatbelt::state::{BeltState, LABEL_NOT_SECURED, LABEL_SECURED};
use seatbelt::traits::{Indicator, Level};

fn never() -> std::future::Pending<()> {
    std::future::pending()
}

fn after(ms: u64) -> impl std::future::Future<Output = ()> {
    tokio::time::sleep(Duration::from_millis(ms))
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_startup_push_failure_then_fetch_secured() {
    let rig = TestRig::new();
    rig.http.set_method_response("POST", URL, refused());
    rig.http.set_method_response("GET", URL, ok(r#"{"secured":true}"#));

    let app = rig.open(quiet_config());
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;

    assert!(ctl.secured());
    assert_eq!(rig.gpio.output_level(LED_PIN), Some(Level::High));
    assert_eq!(ctl.ui().indicator, Some(Indicator::Engaged));
    assert_eq!(ctl.ui().label.as_deref(), Some(LABEL_SECURED));
    assert_eq!(ctl.ui().count_lines(MSG_REMOTE_FAILED), 1);
    assert!(!ctl.ui().has_line(MSG_CONNECTED));
    assert_eq!(ctl.phase(), ControllerPhase::Idle);
}

#[tokio::test]
async fn test_startup_fetch_failure_reports_once() {
    let rig = TestRig::new();
    rig.http.set_response(URL, refused());

    let app = rig.open(quiet_config());
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;

    assert!(!ctl.secured());
    assert_eq!(rig.gpio.output_level(LED_PIN), Some(Level::Low));
    assert_eq!(ctl.ui().label.as_deref(), Some(LABEL_NOT_SECURED));
    assert_eq!(ctl.ui().count_lines(MSG_REMOTE_FAILED), 1);
    assert!(!ctl.ui().has_line(MSG_CONNECTED));
}

#[tokio::test]
async fn test_startup_non_2xx_fetch_counts_as_failure() {
    let rig = TestRig::new();
    rig.http.set_method_response("POST", URL, status(200));
    rig.http.set_method_response("GET", URL, status(503));

    let app = rig.open(quiet_config());
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;

    assert!(!ctl.secured());
    assert_eq!(ctl.ui().count_lines(MSG_REMOTE_FAILED), 1);
}

#[tokio::test]
async fn test_startup_pushes_baseline_then_fetches() {
    let rig = TestRig::new();
    rig.http.set_method_response("POST", URL, status(200));
    rig.http.set_method_response("GET", URL, ok(r#"{"secured":false}"#));

    let app = rig.open(quiet_config());
    rig.gpio.disconnect(BUTTON_PIN);
    run_headless(app, never()).await;

    let requests = rig.http.get_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, URL);
    assert_eq!(requests[0].body.as_deref(), Some(r#"{"secured":false}"#));
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].url, URL);
}

#[tokio::test]
async fn test_request_urls_are_echoed_by_default() {
    let rig = TestRig::new();
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));

    let app = rig.open(BeltConfig::default());
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;

    assert_eq!(
        ctl.ui().transcript,
        vec![URL.to_string(), URL.to_string(), MSG_CONNECTED.to_string()]
    );
}

// ============================================================================
// Edges
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_falling_then_rising_pushes_in_order() {
    let rig = TestRig::new();
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));
    let config = quiet_config();
    let remote = RemoteSyncClient::new(rig.http.clone(), &config.base_url).unwrap();
    let mut ctl = Controller::new(
        remote,
        BeltState::new(None, seatbelt::adapters::RecordingUi::new()),
        &config,
    );

    assert!(ctl.startup().await.is_ok());
    rig.http.clear_requests();

    ctl.process_edge(EdgeEvent::FallingEdge).await;
    assert!(ctl.secured());
    ctl.process_edge(EdgeEvent::RisingEdge).await;
    assert!(!ctl.secured());
    ctl.settle_pushes().await;

    let bodies: Vec<_> = rig
        .http
        .requests_with_method("POST")
        .into_iter()
        .filter_map(|r| r.body)
        .collect();
    assert_eq!(bodies, vec![r#"{"secured":true}"#, r#"{"secured":false}"#]);
    assert_eq!(ctl.ui().label.as_deref(), Some(LABEL_NOT_SECURED));
}

#[tokio::test]
async fn test_edges_from_another_thread_reach_the_app() {
    let rig = TestRig::new();
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));
    let app = rig.open(quiet_config());

    let gpio = rig.gpio.clone();
    let driver = std::thread::spawn(move || {
        assert!(gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 1_000)));
        std::thread::sleep(Duration::from_millis(10));
        assert!(gpio.trigger(BUTTON_PIN, raw(EdgeEvent::RisingEdge, 1_400)));
        std::thread::sleep(Duration::from_millis(10));
        assert!(gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 1_800)));
        gpio.disconnect(BUTTON_PIN);
    });

    let ctl = run_headless(app, never()).await;
    driver.join().unwrap();
    ctl.settle_pushes().await;

    // The last physical edge wins whatever the startup fetch said.
    assert!(ctl.secured());
    assert_eq!(rig.gpio.output_level(LED_PIN), Some(Level::High));
    assert_eq!(ctl.ui().label.as_deref(), Some(LABEL_SECURED));
    let edge_pushes = rig
        .http
        .requests_with_method("POST")
        .into_iter()
        .filter(|r| r.body.as_deref() == Some(r#"{"secured":true}"#))
        .count();
    assert_eq!(edge_pushes, 2);
}

#[tokio::test]
async fn test_bounces_collapse_to_one_edge() {
    let rig = TestRig::new();
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));
    let app = rig.open(quiet_config());

    // Contact chatter within the 50ms window.
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 500));
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::RisingEdge, 510));
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 530));
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::RisingEdge, 545));
    rig.gpio.disconnect(BUTTON_PIN);

    let ctl = run_headless(app, never()).await;
    ctl.settle_pushes().await;

    assert!(ctl.secured());
    let pushes = rig.http.requests_with_method("POST");
    // Baseline plus exactly one edge push.
    assert_eq!(pushes.len(), 2);
    assert_eq!(rig.gpio.debounce_for(BUTTON_PIN), Some(Duration::from_millis(50)));
}

#[tokio::test]
async fn test_push_failure_keeps_local_state() {
    let rig = TestRig::new();
    rig.http.set_method_response("GET", URL, ok(r#"{"secured":false}"#));
    rig.http.set_method_response("POST", URL, refused());
    let app = rig.open(quiet_config());

    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 100));
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;
    ctl.settle_pushes().await;

    assert!(ctl.secured());
    assert_eq!(rig.gpio.output_level(LED_PIN), Some(Level::High));
    // Only the failed baseline is reported; the edge push failure is not.
    assert_eq!(ctl.ui().transcript, vec![MSG_REMOTE_FAILED.to_string()]);
    assert_eq!(rig.http.requests_with_method("POST").len(), 2);
}

#[tokio::test]
async fn test_edge_not_blocked_by_hanging_startup() {
    let rig = TestRig::new();
    rig.http.set_method_response("POST", URL, status(200));
    rig.http
        .set_method_response("GET", URL, seatbelt::adapters::mock::MockResponse::Hang);
    let app = rig.open(quiet_config());

    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 100));
    let ctl = run_headless(app, after(200)).await;

    assert!(ctl.secured());
    assert_eq!(rig.gpio.output_level(LED_PIN), Some(Level::High));
    assert_eq!(ctl.phase(), ControllerPhase::Syncing(SyncTrigger::Startup));
    assert!(!ctl.ui().has_line(MSG_CONNECTED));
    assert!(!ctl.ui().has_line(MSG_REMOTE_FAILED));
}

#[tokio::test]
async fn test_best_effort_push_does_not_block_next_edge() {
    let rig = TestRig::new();
    rig.http.set_method_response("GET", URL, ok(r#"{"secured":false}"#));
    rig.http
        .set_method_response("POST", URL, seatbelt::adapters::mock::MockResponse::Hang);
    let app = rig.open(quiet_config());

    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 100));
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::RisingEdge, 400));
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, after(300)).await;

    // Hanging startup push keeps the fetch from ever running.
    assert!(!ctl.secured());
    assert_eq!(rig.gpio.output_levels(LED_PIN), vec![Level::High, Level::Low]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_default_policy_pushes_follow_edge_order() {
    let rig = TestRig::new();
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));
    let app = rig.open(quiet_config());

    for (i, edge) in [EdgeEvent::FallingEdge, EdgeEvent::RisingEdge]
        .into_iter()
        .cycle()
        .take(8)
        .enumerate()
    {
        rig.gpio.trigger(BUTTON_PIN, raw(edge, 1_000 + 200 * i as u64));
    }
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;
    ctl.settle_pushes().await;

    let bodies: Vec<_> = rig
        .http
        .requests_with_method("POST")
        .into_iter()
        .filter_map(|r| r.body)
        .collect();
    let mut expected = vec![r#"{"secured":false}"#.to_string()];
    for _ in 0..4 {
        expected.push(r#"{"secured":true}"#.to_string());
        expected.push(r#"{"secured":false}"#.to_string());
    }
    assert_eq!(bodies, expected);
    assert!(!ctl.secured());
}

#[tokio::test]
async fn test_awaited_policy_finishes_pushes_before_returning() {
    let rig = TestRig::new();
    rig.http.set_method_response("GET", URL, ok(r#"{"secured":false}"#));
    rig.http.set_method_response("POST", URL, delayed(20));
    let app = rig.open(quiet_config().with_best_effort_remote_sync(false));

    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::FallingEdge, 100));
    rig.gpio.trigger(BUTTON_PIN, raw(EdgeEvent::RisingEdge, 400));
    rig.gpio.disconnect(BUTTON_PIN);
    let ctl = run_headless(app, never()).await;

    // No settling: each edge push completed before the loop moved on.
    let edge_pushes = rig.http.requests_with_method("POST").len() - 1;
    assert_eq!(edge_pushes, 2);
    assert!(!ctl.secured());
}

// ============================================================================
// Local-only mode
// ============================================================================

#[tokio::test]
async fn test_no_gpio_runs_local_only() {
    let rig = TestRig::without_gpio();
    rig.http.set_response(URL, ok(r#"{"secured":true}"#));
    let app = rig.open(quiet_config());

    assert!(app.is_local_only());
    assert_eq!(app.controller().ui().transcript, vec![MSG_NO_GPIO.to_string()]);

    let ctl = run_headless(app, after(200)).await;
    assert!(ctl.secured());
    assert_eq!(ctl.ui().label.as_deref(), Some(LABEL_SECURED));
    assert!(ctl.ui().has_line(MSG_CONNECTED));
}

#[tokio::test]
async fn test_failing_button_pin_runs_local_only() {
    let rig = TestRig::new();
    rig.gpio.fail_pin(BUTTON_PIN);
    rig.http.set_response(URL, ok(r#"{"secured":false}"#));
    let app = rig.open(quiet_config());

    assert!(app.is_local_only());
    assert_eq!(app.controller().ui().count_lines(MSG_NO_GPIO), 1);
    let ctl = run_headless(app, after(200)).await;
    assert!(rig.gpio.output_levels(LED_PIN).is_empty());
    assert!(!ctl.state().has_output());
}

#[tokio::test]
async fn test_invalid_base_url_is_rejected() {
    let rig = TestRig::new();
    let config = BeltConfig::default().with_base_url("not a url");
    let mut gpio = rig.gpio.clone();
    let result = App::open(
        &config,
        rig.http.clone(),
        &mut gpio,
        seatbelt::adapters::RecordingUi::new(),
    );
    assert!(result.is_err());
}
