//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by the auth,
//! matchmaking and users domains. All external collaborators sit behind
//! trait abstractions so tests can swap them for in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;
use brevo::BrevoService;
use std::sync::Arc;

use crate::domains::auth::otp::OtpEngine;
use crate::domains::auth::JwtService;
use crate::kernel::{
    BaseMailer, BaseOtpStore, BasePreferenceStore, BaseSmsSender, BaseTokenVerifier,
    BaseUserStore,
};

// =============================================================================
// BrevoService Adapters (implement the delivery traits)
// =============================================================================

/// Wrapper around BrevoService that implements the BaseMailer trait
pub struct BrevoMailer(pub Arc<BrevoService>);

#[async_trait]
impl BaseMailer for BrevoMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.0
            .send_email(to, subject, body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

/// Wrapper around BrevoService that implements the BaseSmsSender trait
pub struct BrevoSms(pub Arc<BrevoService>);

#[async_trait]
impl BaseSmsSender for BrevoSms {
    async fn send_sms(&self, to: &str, body: &str) -> Result<()> {
        self.0
            .send_sms(to, body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Collaborators accessible to domain actions
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn BaseUserStore>,
    pub preferences: Arc<dyn BasePreferenceStore>,
    pub otp_store: Arc<dyn BaseOtpStore>,
    pub mailer: Arc<dyn BaseMailer>,
    pub sms: Arc<dyn BaseSmsSender>,
    pub google: Arc<dyn BaseTokenVerifier>,
    pub facebook: Arc<dyn BaseTokenVerifier>,
    /// JWT service for session credential creation and validation
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// OTP engine bound to this container's store and delivery channels.
    pub fn otp_engine(&self) -> OtpEngine {
        OtpEngine::new(
            self.otp_store.clone(),
            self.mailer.clone(),
            self.sms.clone(),
        )
    }
}
