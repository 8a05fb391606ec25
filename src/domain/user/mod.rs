//! User domain
//!
//! This module provides domain types and traits for user accounts,
//! including the user entity, validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::{NewUser, UserRepository};
pub use validation::{
    validate_full_name, validate_password, validate_username, UserValidationError,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
