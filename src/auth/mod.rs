//! Caller identity and permission checks
//!
//! Callers authenticate with an opaque bearer token, sent either as an
//! `Authorization: Bearer <token>` header or a `session_token` cookie.
//! Permissions are granted per user as codenames such as
//! `backend.change_album`; superusers implicitly hold all of them.

pub mod identity;
pub mod permission;
pub mod token;

pub use identity::{AuthenticatedUser, CurrentUser};
pub use permission::Permission;
