//! Registrar API contract
//!
//! This crate holds everything a registrar client shares with the remote
//! student-management service:
//!
//! - The resource model ([`Student`], [`Course`], [`Enrollment`]) and the
//!   write bodies sent on create/update ([`StudentDraft`], [`CourseDraft`],
//!   [`EnrollmentDraft`])
//! - The [`Transport`] trait, a single-call request/response seam that
//!   adapters implement (HTTP, in-process simulator)
//! - [`ApiError`], the uniform failure every transport reports
//! - Envelope helpers that unwrap the server's `{ data: ... }` responses
//!
//! # Endpoints
//!
//! | Resource | Operations |
//! |----------|------------|
//! | Students | `GET /students`, `GET /students/:id`, `POST /students`, `PUT /students/:id`, `DELETE /students/:id` |
//! | Courses | `GET /courses`, `GET /courses/:id`, `POST /courses`, `PUT /courses/:id`, `DELETE /courses/:id` |
//! | Enrollments | `GET /enrollments`, `POST /enrollments`, `PATCH /enrollments/:id/grade?grade=X`, `PATCH /enrollments/:id/status?status=Y`, `DELETE /enrollments/:id` |
//!
//! # Example
//!
//! ```ignore
//! use registrar_api::{Student, Transport, fetch_list};
//! use registrar_adapter_http::HttpTransport;
//!
//! let transport = HttpTransport::new("http://localhost:8080/api")?;
//! let students: Vec<Student> = fetch_list(&transport, "/students").await?;
//! println!("{} students", students.len());
//! ```

pub mod error;
pub mod model;
pub mod transport;

pub use error::{ApiError, ApiResult};
pub use model::{
    Course, CourseDraft, Enrollment, EnrollmentDraft, EnrollmentStatus, Grade, ParseEnumError,
    Student, StudentDraft,
};
pub use transport::{ApiRequest, Envelope, Method, Transport, fetch_list, fetch_one, send_json};
