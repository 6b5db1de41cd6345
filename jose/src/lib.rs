//! Portable JSON Web Key storage and JWS signing-input construction.
//!
//! Concrete key types join by implementing [`crypto::OctetKeyPortable`] (or
//! [`crypto::KeyImportable`] / [`crypto::KeyExportable`] directly) and the
//! signing traits in [`crypto`]. Headers travel inside a
//! [`container::ProtectedJsonWebContainer`] so that the bytes signed are the
//! bytes that were sent.

pub mod builder;
pub mod container;
pub mod crypto;
pub mod error;
pub mod header;
pub mod jwk;
pub mod jws;
pub mod serde;
pub mod signature;
pub mod storage;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
