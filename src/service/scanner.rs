use crate::domain::checkin::CheckInResult;
use crate::domain::payload::{classify, BadgeCode, ScanPayload};
use crate::service::checkin_service::CheckInService;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PermissionState {
    Granted,
    Denied,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanState {
    Idle,
    Scanning {
        raw: String,
    },
    Classified {
        payload: ScanPayload,
    },
    UrlConfirm {
        link: String,
    },
    TextDisplay {
        text: String,
    },
    UnpaidNotice {
        badge: BadgeCode,
    },
    AwaitingGateway {
        payload: ScanPayload,
    },
    SuccessNotice {
        time_in: Option<String>,
        status: Option<String>,
    },
    DuplicateNotice {
        time_in: Option<String>,
        security_message: Option<String>,
    },
    ErrorNotice {
        message: String,
    },
}

impl ScanState {
    /// Camera decodes are dropped everywhere except `Idle`.
    pub fn accepts_decode(&self) -> bool {
        matches!(self, ScanState::Idle)
    }

    /// States that wait for the user to dismiss them.
    pub fn is_presentation(&self) -> bool {
        matches!(
            self,
            ScanState::UrlConfirm { .. }
                | ScanState::TextDisplay { .. }
                | ScanState::UnpaidNotice { .. }
                | ScanState::SuccessNotice { .. }
                | ScanState::DuplicateNotice { .. }
                | ScanState::ErrorNotice { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub enum ScanEvent {
    Decoded(String),
    Classified(ScanPayload),
    Routed,
    GatewayResolved(CheckInResult),
    Dismissed,
}

pub fn apply_event(state: ScanState, event: ScanEvent) -> ScanState {
    match (state, event) {
        (ScanState::Idle, ScanEvent::Decoded(raw)) => ScanState::Scanning { raw },
        (ScanState::Scanning { .. }, ScanEvent::Classified(payload)) => ScanState::Classified { payload },
        (ScanState::Classified { payload }, ScanEvent::Routed) => route(payload),
        (ScanState::AwaitingGateway { .. }, ScanEvent::GatewayResolved(result)) => settle(result),
        (state, ScanEvent::Dismissed) if state.is_presentation() => ScanState::Idle,
        (state, event) => {
            tracing::debug!(?event, "event ignored in current scan state");
            state
        }
    }
}

fn route(payload: ScanPayload) -> ScanState {
    match payload {
        ScanPayload::Url { link, .. } => ScanState::UrlConfirm { link },
        ScanPayload::Text { raw } => ScanState::TextDisplay { text: raw },
        ScanPayload::Badge { badge, .. } if badge.is_unpaid() => ScanState::UnpaidNotice { badge },
        payload => ScanState::AwaitingGateway { payload },
    }
}

fn settle(result: CheckInResult) -> ScanState {
    match result {
        CheckInResult::Success { time_in, status } => ScanState::SuccessNotice { time_in, status },
        CheckInResult::AlreadyScanned {
            time_in,
            security_message,
        } => ScanState::DuplicateNotice {
            time_in,
            security_message,
        },
        CheckInResult::Unpaid { badge } => ScanState::UnpaidNotice { badge },
        CheckInResult::Failure { error_message } => ScanState::ErrorNotice { message: error_message },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// Fire-and-forget haptic/notification signals.
pub trait Feedback: Send + Sync {
    fn impact(&self);
    fn notify(&self, kind: NotificationKind);
}

pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn impact(&self) {
        tracing::debug!("feedback: impact");
    }

    fn notify(&self, kind: NotificationKind) {
        tracing::debug!(?kind, "feedback: notification");
    }
}

pub struct ScannerSession {
    state: ScanState,
    permission: PermissionState,
    service: CheckInService,
    feedback: Arc<dyn Feedback>,
}

impl ScannerSession {
    pub fn new(service: CheckInService, feedback: Arc<dyn Feedback>) -> Self {
        Self {
            state: ScanState::Idle,
            permission: PermissionState::Pending,
            service,
            feedback,
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn set_permission(&mut self, permission: PermissionState) {
        self.permission = permission;
    }

    /// Runs one scan cycle up to its presentation state. Returns `None` when
    /// the decode was suppressed.
    pub async fn handle_decode(&mut self, raw: &str) -> Option<&ScanState> {
        if self.permission != PermissionState::Granted || !self.state.accepts_decode() {
            return None;
        }

        self.fire(ScanEvent::Decoded(raw.to_string()));
        self.feedback.impact();

        let payload = classify(raw);
        tracing::debug!(category = ?payload.category(), "payload classified");
        self.fire(ScanEvent::Classified(payload));
        self.fire(ScanEvent::Routed);

        if let ScanState::AwaitingGateway { payload } = &self.state {
            let result = self.service.check_in(payload).await;
            self.fire(ScanEvent::GatewayResolved(result));
        }

        match &self.state {
            ScanState::SuccessNotice { .. } => self.feedback.notify(NotificationKind::Success),
            ScanState::DuplicateNotice { .. } | ScanState::UnpaidNotice { .. } => {
                self.feedback.notify(NotificationKind::Warning)
            }
            ScanState::ErrorNotice { .. } => self.feedback.notify(NotificationKind::Error),
            _ => {}
        }

        Some(&self.state)
    }

    pub fn dismiss(&mut self) {
        self.fire(ScanEvent::Dismissed);
    }

    fn fire(&mut self, event: ScanEvent) {
        let current = std::mem::replace(&mut self.state, ScanState::Idle);
        self.state = apply_event(current, event);
    }
}
