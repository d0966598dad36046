// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Email notifier: event-bus subscriber that turns onboarding and account
//! events into outbound notifications.
//!
//! Approve/reject transitions never send email themselves; they publish
//! an event and this task forwards it through the email port after the
//! fact. Send failures are logged and never fed back into the workflow.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::ports::EmailService;
use crate::domain::events::{AccountEvent, OnboardingEvent};
use crate::infrastructure::event_bus::{DomainEvent, EventBus, EventBusError};

pub struct EmailNotifier;

impl EmailNotifier {
    /// Subscribe to the bus and forward events until the bus closes.
    pub fn spawn(event_bus: &EventBus, email: Arc<dyn EmailService>) -> JoinHandle<()> {
        let mut receiver = event_bus.subscribe();
        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => Self::handle(&*email, event).await,
                    Err(EventBusError::Lagged(skipped)) => {
                        warn!(skipped, "email notifier lagged; continuing");
                    }
                    Err(_) => break,
                }
            }
            debug!("email notifier stopped");
        })
    }

    async fn handle(email: &dyn EmailService, event: DomainEvent) {
        let result = match &event {
            DomainEvent::Account(AccountEvent::UserRegistered { email: to, name, .. }) => {
                email.send_welcome(to, name).await
            }
            DomainEvent::Onboarding(OnboardingEvent::ApplicationApproved {
                contact_email,
                proposed_restaurant_name,
                ..
            }) => {
                email
                    .send_application_approved(contact_email, proposed_restaurant_name)
                    .await
            }
            DomainEvent::Onboarding(OnboardingEvent::ApplicationRejected {
                contact_email,
                proposed_restaurant_name,
                reason,
                ..
            }) => {
                email
                    .send_application_rejected(
                        contact_email,
                        proposed_restaurant_name,
                        reason.as_deref(),
                    )
                    .await
            }
            _ => return,
        };

        if let Err(err) = result {
            warn!(%err, "failed to send notification email");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;

    use crate::domain::application::ApplicationId;
    use crate::domain::error::DomainError;
    use crate::domain::user::UserId;
    use crate::domain::value_objects::Email;

    #[derive(Default)]
    struct RecordingEmailService {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EmailService for RecordingEmailService {
        async fn send_welcome(&self, to: &Email, _name: &str) -> Result<(), DomainError> {
            self.sent.lock().push(format!("welcome:{to}"));
            Ok(())
        }

        async fn send_application_approved(
            &self,
            to: &Email,
            restaurant_name: &str,
        ) -> Result<(), DomainError> {
            self.sent.lock().push(format!("approved:{to}:{restaurant_name}"));
            Ok(())
        }

        async fn send_application_rejected(
            &self,
            to: &Email,
            restaurant_name: &str,
            _reason: Option<&str>,
        ) -> Result<(), DomainError> {
            self.sent.lock().push(format!("rejected:{to}:{restaurant_name}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn approved_event_triggers_email() {
        let bus = EventBus::new(16);
        let recorder = Arc::new(RecordingEmailService::default());
        let handle = EmailNotifier::spawn(&bus, recorder.clone());

        bus.publish_onboarding_event(OnboardingEvent::ApplicationApproved {
            application_id: ApplicationId::new(),
            owner_id: UserId::new(),
            contact_email: Email::new("rosa@example.com").unwrap(),
            proposed_restaurant_name: "La Cocina".into(),
            approved_by: UserId::new(),
            approved_at: Utc::now(),
        });

        // Give the subscriber task a moment to drain the event.
        for _ in 0..50 {
            if !recorder.sent.lock().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let sent = recorder.sent.lock().clone();
        assert_eq!(sent, vec!["approved:rosa@example.com:La Cocina"]);
        handle.abort();
    }
}
