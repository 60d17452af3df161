//! Entity Module

pub mod analytics;
pub mod feedback;
pub mod internal_note;
