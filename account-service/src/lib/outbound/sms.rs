use async_trait::async_trait;

use crate::account::errors::CodeDeliveryError;
use crate::domain::account::models::PhoneNumber;
use crate::domain::account::ports::CodeSender;

/// Code sender that writes to the log instead of an SMS gateway.
///
/// The phone number is masked at `info`; the code itself only appears at
/// `debug` so development builds can complete a login without a gateway.
#[derive(Debug, Clone, Default)]
pub struct LoggingCodeSender;

impl LoggingCodeSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CodeSender for LoggingCodeSender {
    async fn send_code(&self, phone: &PhoneNumber, code: &str) -> Result<(), CodeDeliveryError> {
        tracing::info!(
            target: "sms",
            provider = "log",
            phone = %phone.masked(),
            code_length = code.len(),
            "Verification code dispatched"
        );
        tracing::debug!(target: "sms", phone = %phone, code = %code, "Verification code content");

        Ok(())
    }
}
