//! Application services for identity and session management.

mod session;

pub use session::{SessionError, SessionEvent, SessionResult, SessionService, SignUpRequest};
