//! Route Handlers

pub mod form;
pub mod options;
pub mod predictions;
