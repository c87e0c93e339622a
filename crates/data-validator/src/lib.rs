//! Data Validation
//!
//! Provides the user input type and range checking for house attributes.

mod error;
mod input;
mod validator;

pub use error::{ValidRange, ValidationError};
pub use input::UserInputSet;
pub use validator::{ValidationConfig, Validator};
