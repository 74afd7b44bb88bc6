//! Authentication primitives: password hashing, the session-token codec,
//! and the token ledger.

pub mod jwt;
pub mod ledger;
pub mod password;
