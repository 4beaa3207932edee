//! Credential handling: JWT issuing/verification and password hashing

pub mod jwt;
pub mod password;
