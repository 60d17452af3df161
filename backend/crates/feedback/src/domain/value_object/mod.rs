//! Value Object Module

pub mod category;
pub mod department;
pub mod feedback_id;
pub mod message;
pub mod status;
pub mod tracking_id;
