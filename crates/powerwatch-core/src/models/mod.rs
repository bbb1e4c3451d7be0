//! Data models for PowerWatch

mod alert;
mod balance;
mod email;

pub use alert::*;
pub use balance::*;
pub use email::*;
