//! Ed25519 and X25519 keys for the `jose` crate, backed by `ed25519-dalek`
//! and `x25519-dalek`.

#[macro_use]
extern crate log;

pub mod ed25519;
pub mod x25519;

pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
pub use x25519::{X25519PrivateKey, X25519PublicKey};
