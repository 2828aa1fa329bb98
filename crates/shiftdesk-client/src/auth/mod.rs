//! Phone + OTP login.
//!
//! ```text
//!             SubmitPhone ─► SendCode
//!   Anonymous ──────────────────────────► PhoneSubmitted ──► Authenticated
//!       ▲        CodeDispatched(sent)        │  │  VerifyCode ─► ValidateCode
//!       │                                    │  │  CodeValidated(token) ─► StoreToken
//!       └──────────── Back ──────────────────┘  └─ ResendCode / Tick
//!       ▲
//!       └──────────── Logout (any state) ─► ClearToken
//! ```
//!
//! [`AuthMachine`] is the pure transition table; [`AuthFlow`] runs its effects
//! against the backend and the token store.

mod flow;
mod machine;

pub use flow::AuthFlow;
pub use machine::{AuthEffect, AuthEvent, AuthMachine, AuthState, PhoneSession, SessionId};
