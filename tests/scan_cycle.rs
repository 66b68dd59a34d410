use qriva::domain::checkin::CheckInResult;
use qriva::domain::payload::classify;
use qriva::gateways::mock::MockGateway;
use qriva::service::checkin_service::CheckInService;
use qriva::service::scanner::{
    apply_event, Feedback, NotificationKind, PermissionState, ScanEvent, ScanState, ScannerSession,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingFeedback {
    impacts: Mutex<usize>,
    notifications: Mutex<Vec<NotificationKind>>,
}

impl Feedback for RecordingFeedback {
    fn impact(&self) {
        *self.impacts.lock().unwrap() += 1;
    }

    fn notify(&self, kind: NotificationKind) {
        self.notifications.lock().unwrap().push(kind);
    }
}

fn session(behavior: &str) -> (ScannerSession, Arc<MockGateway>, Arc<RecordingFeedback>) {
    let gateway = Arc::new(MockGateway::new(behavior));
    let feedback = Arc::new(RecordingFeedback::default());
    let mut s = ScannerSession::new(CheckInService::new(gateway.clone()), feedback.clone());
    s.set_permission(PermissionState::Granted);
    (s, gateway, feedback)
}

#[tokio::test]
async fn badge_scan_settles_on_success_notice() {
    let (mut s, gateway, feedback) = session("ALWAYS_SUCCESS");

    let state = s.handle_decode("REGULAR-123").await.cloned();
    assert!(matches!(
        state,
        Some(ScanState::SuccessNotice { ref status, .. }) if status.as_deref() == Some("P")
    ));
    assert_eq!(gateway.calls(), 1);
    assert_eq!(*feedback.impacts.lock().unwrap(), 1);
    assert_eq!(*feedback.notifications.lock().unwrap(), vec![NotificationKind::Success]);
}

#[tokio::test]
async fn decodes_suppressed_until_dismissed() {
    let (mut s, gateway, _) = session("ALWAYS_SUCCESS");

    assert!(s.handle_decode("VIP-1").await.is_some());
    assert!(s.handle_decode("VIP-2").await.is_none());
    assert_eq!(gateway.calls(), 1);

    s.dismiss();
    assert_eq!(s.state(), &ScanState::Idle);
    assert!(s.handle_decode("VIP-2").await.is_some());
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn no_decode_without_camera_permission() {
    let (mut s, gateway, _) = session("ALWAYS_SUCCESS");
    s.set_permission(PermissionState::Denied);

    assert!(s.handle_decode("VIP-1").await.is_none());
    assert_eq!(s.state(), &ScanState::Idle);
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn url_and_text_skip_gateway() {
    let (mut s, gateway, _) = session("ALWAYS_SUCCESS");

    let state = s.handle_decode("www.example.com").await.cloned();
    assert_eq!(
        state,
        Some(ScanState::UrlConfirm {
            link: "https://www.example.com".to_string()
        })
    );
    s.dismiss();

    let state = s.handle_decode("hello there").await.cloned();
    assert_eq!(
        state,
        Some(ScanState::TextDisplay {
            text: "hello there".to_string()
        })
    );
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn unpaid_badge_shows_notice_without_gateway() {
    let (mut s, gateway, feedback) = session("ALWAYS_SUCCESS");

    let state = s.handle_decode("VIP-UP-42").await.cloned();
    assert!(matches!(state, Some(ScanState::UnpaidNotice { .. })));
    assert_eq!(gateway.calls(), 0);
    assert_eq!(*feedback.notifications.lock().unwrap(), vec![NotificationKind::Warning]);
}

#[tokio::test]
async fn duplicate_and_errors_return_to_idle_after_dismissal() {
    let (mut s, _, feedback) = session("ALWAYS_DUPLICATE");
    let state = s.handle_decode("GENAD-8").await.cloned();
    assert!(matches!(state, Some(ScanState::DuplicateNotice { .. })));
    s.dismiss();
    assert!(s.state().accepts_decode());
    assert_eq!(*feedback.notifications.lock().unwrap(), vec![NotificationKind::Warning]);

    let (mut s, _, feedback) = session("ALWAYS_ERROR");
    let state = s.handle_decode("GENAD-8").await.cloned();
    assert_eq!(
        state,
        Some(ScanState::ErrorNotice {
            message: "mock transport error".to_string()
        })
    );
    s.dismiss();
    assert!(s.state().accepts_decode());
    assert_eq!(*feedback.notifications.lock().unwrap(), vec![NotificationKind::Error]);
}

#[test]
fn gateway_result_maps_to_notice() {
    let awaiting = || ScanState::AwaitingGateway {
        payload: classify("VIP-1"),
    };

    let out = apply_event(awaiting(), ScanEvent::GatewayResolved(CheckInResult::failure("Bad id")));
    assert_eq!(
        out,
        ScanState::ErrorNotice {
            message: "Bad id".to_string()
        }
    );

    let out = apply_event(
        awaiting(),
        ScanEvent::GatewayResolved(CheckInResult::AlreadyScanned {
            time_in: Some("09:55".to_string()),
            security_message: Some("Already checked in".to_string()),
        }),
    );
    assert_eq!(
        out,
        ScanState::DuplicateNotice {
            time_in: Some("09:55".to_string()),
            security_message: Some("Already checked in".to_string()),
        }
    );
}

#[test]
fn full_transition_walk() {
    let mut state = ScanState::Idle;
    state = apply_event(state, ScanEvent::Decoded("REGULAR-5".to_string()));
    assert!(matches!(state, ScanState::Scanning { .. }));
    state = apply_event(state, ScanEvent::Classified(classify("REGULAR-5")));
    assert!(matches!(state, ScanState::Classified { .. }));
    state = apply_event(state, ScanEvent::Routed);
    assert!(matches!(state, ScanState::AwaitingGateway { .. }));
    state = apply_event(
        state,
        ScanEvent::GatewayResolved(CheckInResult::Success {
            time_in: Some("10:00".to_string()),
            status: Some("P".to_string()),
        }),
    );
    assert!(matches!(state, ScanState::SuccessNotice { .. }));
    state = apply_event(state, ScanEvent::Dismissed);
    assert_eq!(state, ScanState::Idle);
}
