use std::sync::Arc;

use shiftdesk_types::{
    ApiResponse, LoginByPhoneRequest, LoginByPhoneResponse, PhoneNumber,
    ValidateLoginCodeRequest, ValidateLoginCodeResponse,
};

use super::machine::{AuthEffect, AuthEvent, AuthMachine, AuthState, PhoneSession};
use crate::client::{ApiClient, RequestOptions};
use crate::error::ClientError;
use crate::otp::EntryUpdate;
use crate::token_store::TokenStore;

const LOGIN_BY_PHONE_PATH: &str = "/user/auth/loginbyphone";
const VALIDATE_CODE_PATH: &str = "/user/auth/validatelogincode";

/// Drives an [`AuthMachine`] against the backend.
///
/// Methods take `&mut self`, so one flow never has two submissions in flight.
#[derive(Debug)]
pub struct AuthFlow {
    client: ApiClient,
    tokens: Arc<dyn TokenStore>,
    machine: AuthMachine,
}

impl AuthFlow {
    /// Starts signed in when the client's token store already holds a token.
    pub fn new(client: ApiClient) -> Self {
        Self::with_machine(client, AuthMachine::new())
    }

    pub fn with_machine(client: ApiClient, machine: AuthMachine) -> Self {
        let tokens = client.token_store();
        let machine = if tokens.has_token() { machine.authenticated() } else { machine };
        Self { client, tokens, machine }
    }

    pub fn state(&self) -> &AuthState {
        self.machine.state()
    }

    pub fn session(&self) -> Option<&PhoneSession> {
        self.machine.session()
    }

    /// True iff the token store holds a non-empty token. No expiry tracking.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token()
    }

    pub async fn submit_phone(&mut self, phone: &str) -> Result<(), ClientError> {
        self.run(AuthEvent::SubmitPhone(phone.to_string())).await
    }

    pub async fn verify_code(&mut self, code: &str) -> Result<(), ClientError> {
        self.run(AuthEvent::VerifyCode(code.to_string())).await
    }

    /// Verify whatever the entry currently holds, complete or not.
    pub async fn submit_entry(&mut self) -> Result<(), ClientError> {
        let code = self.session_or("submit the code")?.entry.code();
        self.verify_code(&code).await
    }

    /// Returns `false` without touching the network while the cooldown runs.
    pub async fn resend_code(&mut self) -> Result<bool, ClientError> {
        let allowed = self.can_resend();
        self.run(AuthEvent::ResendCode).await?;
        Ok(allowed)
    }

    /// Write one box of the entry; a completed code is verified immediately.
    pub async fn input_digit(
        &mut self,
        index: usize,
        input: &str,
    ) -> Result<EntryUpdate, ClientError> {
        let update = self.session_mut_or("enter a digit")?.entry.set_digit(index, input);
        self.verify_update(update).await
    }

    pub async fn paste_code(&mut self, text: &str) -> Result<EntryUpdate, ClientError> {
        let update = self.session_mut_or("paste a code")?.entry.paste(text);
        self.verify_update(update).await
    }

    pub fn backspace_at(&self, index: usize) -> Option<usize> {
        self.session().and_then(|s| s.entry.backspace_at(index))
    }

    /// Advance the resend cooldown by one second. True on the tick that re-enables resend.
    pub fn tick(&mut self) -> bool {
        let was_ready = self.can_resend();
        self.apply_local(AuthEvent::Tick);
        !was_ready && self.can_resend()
    }

    pub fn can_resend(&self) -> bool {
        self.session().is_some_and(|s| s.entry.can_resend())
    }

    pub fn back(&mut self) {
        self.apply_local(AuthEvent::Back);
    }

    /// Clear the stored token from any state.
    pub fn logout(&mut self) {
        self.apply_local(AuthEvent::Logout);
    }

    async fn verify_update(&mut self, update: EntryUpdate) -> Result<EntryUpdate, ClientError> {
        if let Some(code) = &update.submit {
            self.verify_code(code).await?;
        }
        Ok(update)
    }

    fn session_or(&self, operation: &'static str) -> Result<&PhoneSession, ClientError> {
        let state = self.machine.state().name();
        self.machine.session().ok_or(ClientError::InvalidState { operation, state })
    }

    fn session_mut_or(&mut self, operation: &'static str) -> Result<&mut PhoneSession, ClientError> {
        let state = self.machine.state().name();
        self.machine.session_mut().ok_or(ClientError::InvalidState { operation, state })
    }

    fn apply_local(&mut self, event: AuthEvent) {
        match self.machine.apply(event) {
            AuthEffect::ClearToken => {
                self.tokens.clear();
                tracing::info!("Logged out");
            }
            effect => tracing::trace!(?effect, state = self.machine.state().name(), "Auth event"),
        }
    }

    async fn run(&mut self, event: AuthEvent) -> Result<(), ClientError> {
        let mut effect = self.machine.apply(event);
        loop {
            let outcome = match effect {
                AuthEffect::SendCode { session, phone } => {
                    let sent = self.send_code(&phone).await?;
                    AuthEvent::CodeDispatched { session, phone, sent }
                }
                AuthEffect::ValidateCode { session, phone, code } => {
                    let token = self.validate_code(&phone, &code).await?;
                    AuthEvent::CodeValidated { session, token }
                }
                AuthEffect::StoreToken(token) => {
                    self.tokens.save(&token);
                    if !self.tokens.has_token() {
                        // Store degraded to "no token".
                        tracing::warn!("Token store rejected the new token, staying signed out");
                        self.machine.apply(AuthEvent::Logout);
                        return Err(ClientError::TokenNotSaved);
                    }
                    tracing::info!("Login succeeded");
                    return Ok(());
                }
                AuthEffect::ClearToken => {
                    self.tokens.clear();
                    tracing::info!("Logged out");
                    return Ok(());
                }
                AuthEffect::Ignored => {
                    tracing::debug!("Ignoring response for a finished login session");
                    return Ok(());
                }
                AuthEffect::Fail(err) => return Err(err),
                AuthEffect::None => return Ok(()),
            };
            effect = self.machine.apply(outcome);
        }
    }

    async fn send_code(&self, phone: &PhoneNumber) -> Result<bool, ClientError> {
        let body = LoginByPhoneRequest { phone_number: phone.international() };
        let response: ApiResponse<Option<LoginByPhoneResponse>> =
            self.client.post(LOGIN_BY_PHONE_PATH, &body, RequestOptions::anonymous()).await?;

        let sent = response.data.is_some_and(|d| d.is_message_sent);
        let masked = format!("***{}", phone.last_four());
        tracing::info!(phone = %masked, sent, "Code dispatch");
        Ok(sent)
    }

    async fn validate_code(
        &self,
        phone: &PhoneNumber,
        code: &str,
    ) -> Result<Option<String>, ClientError> {
        let body = ValidateLoginCodeRequest {
            phone_number: phone.international(),
            validation_code: code.to_string(),
        };
        let response: ApiResponse<Option<ValidateLoginCodeResponse>> =
            self.client.post(VALIDATE_CODE_PATH, &body, RequestOptions::anonymous()).await?;

        Ok(response.data.as_ref().and_then(|d| d.token()).map(str::to_string))
    }
}
