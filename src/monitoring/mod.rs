/*!
 * Monitoring
 * Tracing setup for hosts embedding the signal layer
 */

mod tracer;

pub use tracer::{init_tracing, TRACE_JSON_ENV};
