//! Shared Kernel
//!
//! The small vocabulary every bounded context agrees on:
//! - The unified error type returned at the HTTP boundary
//! - Typed identifiers for entities referenced across contexts
//!
//! Anything context-specific (feedback statuses, admin roles) stays out.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
