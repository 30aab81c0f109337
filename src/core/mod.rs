/*!
 * Core Module
 * Error types and fatal invariant reporting
 */

pub mod errors;
pub mod verify;

// Re-export for convenience
pub use errors::*;
pub use verify::verify_failed;
