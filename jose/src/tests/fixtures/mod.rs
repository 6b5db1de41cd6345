mod crypto;
mod headers;

pub use crypto::*;
pub use headers::*;
