//! Simulated registrar server
//!
//! [`SimTransport`] implements [`registrar_api::Transport`] against an
//! in-memory registrar that follows the same REST contract and server-side
//! rules as the real service:
//!
//! - Required fields and malformed values answer `400`
//! - Duplicate student email, course code or enrollment answers `409`
//! - Unknown ids answer `404` with `"<Entity> not found with ID: N"`
//! - New enrollments start `ACTIVE` with no grade, dated "today"
//! - Deleting a student or course removes its enrollments
//! - Enrollment display names are joined in on every read
//!
//! It also records every request and can inject failures per path prefix,
//! which makes it the transport of choice for controller tests and for the
//! CLI's `--sim` mode.
//!
//! # Example
//!
//! ```ignore
//! use registrar_adapter_sim::SimTransport;
//! use registrar_api::{Course, fetch_list};
//!
//! let sim = SimTransport::seeded();
//! sim.fail_path("/courses", 500);
//! let err = fetch_list::<Course>(&sim, "/courses").await.unwrap_err();
//! assert_eq!(err.to_string(), "Error 500");
//! ```

mod simulator;
mod store;

pub use simulator::SimTransport;
