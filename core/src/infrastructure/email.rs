// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Logging implementation of the email port. Writes the notification to
//! the log instead of sending it; real delivery belongs to an SMTP/API
//! adapter outside this crate.

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::EmailService;
use crate::domain::error::DomainError;
use crate::domain::value_objects::Email;

pub struct LoggingEmailService {
    sender: String,
}

impl LoggingEmailService {
    pub fn new(sender: impl Into<String>) -> Self {
        Self { sender: sender.into() }
    }
}

impl Default for LoggingEmailService {
    fn default() -> Self {
        Self::new("no-reply@mesa.mx")
    }
}

#[async_trait]
impl EmailService for LoggingEmailService {
    async fn send_welcome(&self, to: &Email, name: &str) -> Result<(), DomainError> {
        info!(from = %self.sender, to = %to.masked(), name, "email: bienvenida");
        Ok(())
    }

    async fn send_application_approved(
        &self,
        to: &Email,
        restaurant_name: &str,
    ) -> Result<(), DomainError> {
        info!(
            from = %self.sender,
            to = %to.masked(),
            restaurant_name,
            "email: solicitud aprobada"
        );
        Ok(())
    }

    async fn send_application_rejected(
        &self,
        to: &Email,
        restaurant_name: &str,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        info!(
            from = %self.sender,
            to = %to.masked(),
            restaurant_name,
            reason = reason.unwrap_or("-"),
            "email: solicitud rechazada"
        );
        Ok(())
    }
}
