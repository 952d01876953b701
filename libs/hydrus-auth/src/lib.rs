//! HTTP Basic authentication for hydrus.
//!
//! The [`AuthGate`] decides, per request, whether the caller may proceed.
//! Credential verification is delegated to an [`IdentityStore`].

pub mod credentials;
pub mod errors;
pub mod gate;
pub mod memory;
pub mod traits;

pub use credentials::{BasicCredentials, Password};
pub use errors::AuthError;
pub use gate::{AuthGate, AuthOutcome, BASIC_CHALLENGE, Identity};
pub use memory::MemoryIdentityStore;
pub use traits::IdentityStore;
