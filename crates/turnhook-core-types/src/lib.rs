//! Small types shared by the turnhook crates: the encounter id carried in
//! every webhook event, a redacting wrapper for secrets, and the field and
//! event names used in lifecycle logs.

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::EncounterId;
pub use sensitive::Sensitive;
