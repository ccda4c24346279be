pub mod dispatcher;

pub use dispatcher::{LogChannel, NotificationChannel, spawn_dispatch_worker};

use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::db::enums::InterestRole;

/// Outbound message emitted after a state transition commits. Delivery is
/// best-effort and at-least-once; nothing in the engine waits on it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    CycleLaunched {
        cycle_id: Uuid,
        user_id: Uuid,
    },
    OnboardingInvite {
        user_id: Uuid,
        role: InterestRole,
        cycle_id: Option<Uuid>,
    },
    MatchProposed {
        match_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
        match_score: i32,
    },
    MatchApproved {
        match_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
    },
    MatchRejected {
        match_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
    },
    MentorshipActivated {
        mentorship_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
    },
    MentorshipCompleted {
        mentorship_id: Uuid,
        mentor_id: Uuid,
        mentee_id: Uuid,
    },
    MentorshipCancelled {
        mentorship_id: Uuid,
        reason: String,
    },
    WeekAdvanced {
        program_id: Uuid,
        mentorship_id: Uuid,
        week: i32,
    },
    TaskCompleted {
        task_id: Uuid,
        mentorship_id: Uuid,
    },
    EvaluationSubmitted {
        mentorship_id: Uuid,
        evaluator_id: Uuid,
    },
    CertificateIssued {
        mentorship_id: Uuid,
        certificate_number: String,
    },
}

/// Cheap cloneable handle held in AppState. `publish` never blocks and
/// never surfaces an error to the caller; a closed channel is logged and
/// the event dropped.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<NotificationEvent>,
}

impl Notifier {
    pub fn publish(&self, event: NotificationEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(error = %e, "notification channel closed, dropping event");
        }
    }
}

pub fn notification_channel() -> (Notifier, mpsc::UnboundedReceiver<NotificationEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Notifier { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_survives_dropped_receiver() {
        let (notifier, rx) = notification_channel();
        drop(rx);
        // must not panic or error out
        notifier.publish(NotificationEvent::MentorshipCancelled {
            mentorship_id: Uuid::new_v4(),
            reason: "test".to_string(),
        });
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = NotificationEvent::CycleLaunched {
            cycle_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_value(&event).expect("serializable");
        assert_eq!(json["type"], "cycle_launched");
    }
}
