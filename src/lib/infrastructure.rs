//! Infrastructure backing the domain traits

pub mod email;
pub mod templates;
