mod algorithm;
mod key;
mod portable;

pub use algorithm::*;
pub use key::*;
pub use portable::*;
