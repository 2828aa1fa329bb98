use shiftdesk_types::{PhoneNumber, ValidationError};

use crate::error::ClientError;
use crate::otp::{OtpEntry, DEFAULT_CODE_LENGTH, RESEND_WINDOW_SECS};

/// Identifies one phone submission. Outcomes tagged with an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

/// Transient state of the code entry step. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneSession {
    pub id: SessionId,
    pub phone: PhoneNumber,
    pub entry: OtpEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    PhoneSubmitted(PhoneSession),
    Authenticated,
}

impl AuthState {
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Anonymous => "signed out",
            AuthState::PhoneSubmitted(_) => "waiting for the code",
            AuthState::Authenticated => "signed in",
        }
    }
}

/// User actions and backend outcomes fed into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Raw phone input as typed.
    SubmitPhone(String),
    /// Dispatch endpoint answered. `session` is `None` for the initial send.
    CodeDispatched { session: Option<SessionId>, phone: PhoneNumber, sent: bool },
    VerifyCode(String),
    /// Validation endpoint answered.
    CodeValidated { session: SessionId, token: Option<String> },
    ResendCode,
    /// One second of cooldown elapsed.
    Tick,
    Back,
    Logout,
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEffect {
    None,
    SendCode { session: Option<SessionId>, phone: PhoneNumber },
    ValidateCode { session: SessionId, phone: PhoneNumber, code: String },
    StoreToken(String),
    ClearToken,
    /// Outcome belonged to a session that no longer exists.
    Ignored,
    Fail(ClientError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMachine {
    state: AuthState,
    code_length: usize,
    resend_window: u32,
    sessions_started: u64,
}

impl Default for AuthMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthMachine {
    pub fn new() -> Self {
        Self::with_entry(DEFAULT_CODE_LENGTH, RESEND_WINDOW_SECS)
    }

    /// Machine whose code entry has `code_length` digits and a `resend_window` second cooldown.
    pub fn with_entry(code_length: usize, resend_window: u32) -> Self {
        Self {
            state: AuthState::Anonymous,
            code_length: code_length.max(1),
            resend_window,
            sessions_started: 0,
        }
    }

    /// Start in the signed-in state (a token was found at startup).
    pub fn authenticated(mut self) -> Self {
        self.state = AuthState::Authenticated;
        self
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn session(&self) -> Option<&PhoneSession> {
        match &self.state {
            AuthState::PhoneSubmitted(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut PhoneSession> {
        match &mut self.state {
            AuthState::PhoneSubmitted(session) => Some(session),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: AuthEvent) -> AuthEffect {
        let state = std::mem::take(&mut self.state);
        let (next, effect) = self.transition(state, event);
        self.state = next;
        effect
    }

    fn start_session(&mut self, phone: PhoneNumber) -> PhoneSession {
        self.sessions_started += 1;
        PhoneSession {
            id: SessionId(self.sessions_started),
            phone,
            entry: OtpEntry::with_length(self.code_length, self.resend_window),
        }
    }

    fn transition(&mut self, state: AuthState, event: AuthEvent) -> (AuthState, AuthEffect) {
        use AuthEvent as E;
        use AuthState as S;

        match (state, event) {
            (_, E::Logout) => (S::Anonymous, AuthEffect::ClearToken),

            (S::Anonymous, E::SubmitPhone(input)) => match PhoneNumber::parse(&input) {
                Ok(phone) => (S::Anonymous, AuthEffect::SendCode { session: None, phone }),
                Err(e) => (S::Anonymous, AuthEffect::Fail(e.into())),
            },
            (S::Anonymous, E::CodeDispatched { session: None, phone, sent }) => {
                if sent {
                    (S::PhoneSubmitted(self.start_session(phone)), AuthEffect::None)
                } else {
                    (S::Anonymous, AuthEffect::Fail(ClientError::SendFailed))
                }
            }

            (S::PhoneSubmitted(session), E::VerifyCode(code)) => {
                match check_code(&code, session.entry.len()) {
                    Ok(()) => {
                        let effect = AuthEffect::ValidateCode {
                            session: session.id,
                            phone: session.phone.clone(),
                            code,
                        };
                        (S::PhoneSubmitted(session), effect)
                    }
                    Err(e) => (S::PhoneSubmitted(session), AuthEffect::Fail(e.into())),
                }
            }
            (S::PhoneSubmitted(mut session), E::CodeValidated { session: id, token })
                if id == session.id =>
            {
                match token.filter(|t| !t.trim().is_empty()) {
                    Some(token) => (S::Authenticated, AuthEffect::StoreToken(token)),
                    None => {
                        session.entry.clear();
                        (S::PhoneSubmitted(session), AuthEffect::Fail(ClientError::InvalidCode))
                    }
                }
            }
            (S::PhoneSubmitted(session), E::ResendCode) => {
                let effect = if session.entry.can_resend() {
                    AuthEffect::SendCode { session: Some(session.id), phone: session.phone.clone() }
                } else {
                    AuthEffect::None
                };
                (S::PhoneSubmitted(session), effect)
            }
            (S::PhoneSubmitted(mut session), E::CodeDispatched { session: Some(id), sent, .. })
                if id == session.id =>
            {
                if sent {
                    session.entry.resend();
                    (S::PhoneSubmitted(session), AuthEffect::None)
                } else {
                    (S::PhoneSubmitted(session), AuthEffect::Fail(ClientError::SendFailed))
                }
            }
            (S::PhoneSubmitted(mut session), E::Tick) => {
                session.entry.tick();
                (S::PhoneSubmitted(session), AuthEffect::None)
            }
            (S::PhoneSubmitted(_), E::Back) => (S::Anonymous, AuthEffect::None),

            (state, E::CodeDispatched { .. } | E::CodeValidated { .. }) => {
                (state, AuthEffect::Ignored)
            }
            (state, E::Tick | E::Back) => (state, AuthEffect::None),
            (state, E::SubmitPhone(_)) => rejected(state, "submit a phone number"),
            (state, E::VerifyCode(_)) => rejected(state, "verify a code"),
            (state, E::ResendCode) => rejected(state, "resend the code"),
        }
    }
}

fn rejected(state: AuthState, operation: &'static str) -> (AuthState, AuthEffect) {
    let err = ClientError::InvalidState { operation, state: state.name() };
    (state, AuthEffect::Fail(err))
}

fn check_code(code: &str, expected: usize) -> Result<(), ValidationError> {
    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NonDigitCode);
    }
    let entered = code.chars().count();
    if entered < expected {
        Err(ValidationError::IncompleteCode { expected, entered })
    } else if entered > expected {
        Err(ValidationError::CodeTooLong { expected, entered })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("5551234567").expect("valid phone")
    }

    fn submitted() -> (AuthMachine, SessionId) {
        let mut machine = AuthMachine::with_entry(4, 3);
        machine.apply(AuthEvent::SubmitPhone("555 123 45 67".to_string()));
        machine.apply(AuthEvent::CodeDispatched { session: None, phone: phone(), sent: true });
        let id = machine.session().expect("session").id;
        (machine, id)
    }

    #[test]
    fn test_submit_phone_normalizes_before_sending() {
        let mut machine = AuthMachine::new();
        let effect = machine.apply(AuthEvent::SubmitPhone("0555 123 45 67".to_string()));
        assert_eq!(effect, AuthEffect::SendCode { session: None, phone: phone() });
        match effect {
            AuthEffect::SendCode { phone, .. } => assert_eq!(phone.international(), "+905551234567"),
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(machine.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_invalid_phone_fails_locally() {
        let mut machine = AuthMachine::new();
        let effect = machine.apply(AuthEvent::SubmitPhone("12345".to_string()));
        assert_eq!(
            effect,
            AuthEffect::Fail(ClientError::Validation(ValidationError::PhoneLength { digits: 5 }))
        );
    }

    #[test]
    fn test_unconfirmed_dispatch_stays_anonymous() {
        let mut machine = AuthMachine::new();
        let effect =
            machine.apply(AuthEvent::CodeDispatched { session: None, phone: phone(), sent: false });
        assert_eq!(effect, AuthEffect::Fail(ClientError::SendFailed));
        assert_eq!(machine.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_short_code_fails_without_validation_effect() {
        let (mut machine, _) = submitted();
        let effect = machine.apply(AuthEvent::VerifyCode("123".to_string()));
        assert_eq!(
            effect,
            AuthEffect::Fail(ValidationError::IncompleteCode { expected: 4, entered: 3 }.into())
        );
        assert!(machine.session().is_some());
    }

    #[test]
    fn test_token_moves_to_authenticated() {
        let (mut machine, id) = submitted();
        let effect = machine.apply(AuthEvent::VerifyCode("1234".to_string()));
        assert_eq!(
            effect,
            AuthEffect::ValidateCode { session: id, phone: phone(), code: "1234".to_string() }
        );

        let effect = machine
            .apply(AuthEvent::CodeValidated { session: id, token: Some("tok_abc".to_string()) });
        assert_eq!(effect, AuthEffect::StoreToken("tok_abc".to_string()));
        assert_eq!(machine.state(), &AuthState::Authenticated);
    }

    #[test]
    fn test_missing_token_is_invalid_code_and_clears_entry() {
        let (mut machine, id) = submitted();
        if let Some(session) = machine.session_mut() {
            session.entry.paste("1234");
        }
        let effect =
            machine.apply(AuthEvent::CodeValidated { session: id, token: Some(String::new()) });
        assert_eq!(effect, AuthEffect::Fail(ClientError::InvalidCode));
        let session = machine.session().expect("still on code step");
        assert!(session.entry.is_empty());
    }

    #[test]
    fn test_stale_validation_after_back_is_ignored() {
        let (mut machine, id) = submitted();
        machine.apply(AuthEvent::Back);
        assert_eq!(machine.state(), &AuthState::Anonymous);

        let effect =
            machine.apply(AuthEvent::CodeValidated { session: id, token: Some("late".to_string()) });
        assert_eq!(effect, AuthEffect::Ignored);
        assert_eq!(machine.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_outcome_from_previous_session_is_ignored() {
        let (mut machine, old) = submitted();
        machine.apply(AuthEvent::Back);
        machine.apply(AuthEvent::CodeDispatched { session: None, phone: phone(), sent: true });
        let current = machine.session().expect("new session").id;
        assert_ne!(old, current);

        let effect =
            machine.apply(AuthEvent::CodeValidated { session: old, token: Some("late".to_string()) });
        assert_eq!(effect, AuthEffect::Ignored);
        assert_eq!(machine.session().map(|s| s.id), Some(current));
    }

    #[test]
    fn test_resend_is_gated_by_cooldown() {
        let (mut machine, id) = submitted();
        assert_eq!(machine.apply(AuthEvent::ResendCode), AuthEffect::None);

        for _ in 0..3 {
            machine.apply(AuthEvent::Tick);
        }
        assert_eq!(
            machine.apply(AuthEvent::ResendCode),
            AuthEffect::SendCode { session: Some(id), phone: phone() }
        );

        machine.apply(AuthEvent::CodeDispatched { session: Some(id), phone: phone(), sent: true });
        let session = machine.session().expect("session");
        assert_eq!(session.entry.cooldown(), 3);
        assert!(session.entry.is_empty());
    }

    #[test]
    fn test_logout_from_any_state() {
        let (mut machine, _) = submitted();
        assert_eq!(machine.apply(AuthEvent::Logout), AuthEffect::ClearToken);
        assert_eq!(machine.state(), &AuthState::Anonymous);

        let mut machine = AuthMachine::new().authenticated();
        assert_eq!(machine.apply(AuthEvent::Logout), AuthEffect::ClearToken);
        assert_eq!(machine.apply(AuthEvent::Logout), AuthEffect::ClearToken);
        assert_eq!(machine.state(), &AuthState::Anonymous);
    }

    #[test]
    fn test_operations_rejected_in_wrong_state() {
        let mut machine = AuthMachine::new();
        assert!(matches!(
            machine.apply(AuthEvent::VerifyCode("1234".to_string())),
            AuthEffect::Fail(ClientError::InvalidState { .. })
        ));

        let (mut machine, _) = submitted();
        assert!(matches!(
            machine.apply(AuthEvent::SubmitPhone("5551234567".to_string())),
            AuthEffect::Fail(ClientError::InvalidState { .. })
        ));
    }
}
