//! Domain model for user accounts and sessions.

mod email;
mod error;
mod ids;
mod user;

pub use email::EmailAddress;
pub use error::{IdentityDomainError, ParseUserRoleError};
pub use ids::{TeamId, UserId};
pub use user::{
    NotificationPreferences, Theme, UserAccount, UserPatch, UserRecord, UserRole, UserSettings,
};
