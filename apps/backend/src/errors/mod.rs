//! Error handling for the Mock Trial backend.

pub mod domain;

#[cfg(test)]
mod tests_error_mapping;

pub use domain::DomainError;
