//! External store protocols.

mod traits;

pub use traits::*;
