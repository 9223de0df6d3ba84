//! Simulated registrar transport.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, instrument, warn};

use registrar_api::{
    ApiError, ApiRequest, ApiResult, CourseDraft, EnrollmentDraft, EnrollmentStatus, Method,
    StudentDraft, Transport,
};

use crate::store::{Rejection, Store, StoreResult};

/// An injected failure: every request whose path starts with `prefix`
/// answers with `status`.
#[derive(Debug, Clone)]
struct Fault {
    prefix: String,
    status: u16,
}

/// In-process registrar server.
///
/// Clones share the same state, so a test can hand one clone to the code
/// under test and inspect the request log through another.
#[derive(Debug, Clone)]
pub struct SimTransport {
    store: Arc<Mutex<Store>>,
    faults: Arc<Mutex<Vec<Fault>>>,
    log: Arc<Mutex<Vec<ApiRequest>>>,
}

impl SimTransport {
    /// Create an empty registrar whose "today" is the current local date.
    pub fn new() -> Self {
        Self::with_today(chrono::Local::now().date_naive())
    }

    /// Create an empty registrar with a fixed "today".
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::new(today))),
            faults: Arc::new(Mutex::new(Vec::new())),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a registrar pre-populated with demo records.
    ///
    /// Students and courses get ids 1 to 3 in the order listed below; the
    /// two seeded enrollments never pair student 1 with course 2.
    pub fn seeded() -> Self {
        let sim = Self::new();
        sim.seed();
        sim
    }

    fn seed(&self) {
        let mut store = self.store();
        let students = [
            ("Grace", "Hopper", "grace@navy.mil", "5550000001"),
            ("Alan", "Turing", "alan@bletchley.uk", "5550000002"),
            ("Edsger", "Dijkstra", "edsger@tue.nl", "5550000003"),
        ];
        for (first, last, email, phone) in students {
            let draft = StudentDraft {
                first_name: first.into(),
                last_name: last.into(),
                email: email.into(),
                phone: phone.into(),
                date_of_birth: None,
                address: None,
            };
            if let Err(rejection) = store.create_student(draft) {
                warn!(email, reason = %rejection.message, "seed student rejected");
            }
        }

        let courses = [
            ("Compilers", "CS301", 4, "Dr. Aho"),
            ("Algorithms", "CS201", 4, "Dr. Knuth"),
            ("Discrete Mathematics", "MA101", 3, "Dr. Erdős"),
        ];
        for (name, code, credits, instructor) in courses {
            let draft = CourseDraft {
                course_name: name.into(),
                course_code: code.into(),
                credits,
                instructor: Some(instructor.into()),
                description: None,
            };
            if let Err(rejection) = store.create_course(draft) {
                warn!(code, reason = %rejection.message, "seed course rejected");
            }
        }

        for (student_id, course_id) in [(1, 1), (2, 2)] {
            let draft = EnrollmentDraft {
                student_id,
                course_id,
            };
            if let Err(rejection) = store.enroll(draft) {
                warn!(student_id, course_id, reason = %rejection.message, "seed enrollment rejected");
            }
        }
    }

    /// Move the simulator's notion of "today".
    pub fn set_today(&self, today: NaiveDate) {
        self.store().set_today(today);
    }

    /// Answer every request whose path starts with `prefix` with `status`.
    pub fn fail_path(&self, prefix: impl Into<String>, status: u16) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Fault {
                prefix: prefix.into(),
                status,
            });
    }

    /// Remove all injected failures.
    pub fn clear_faults(&self) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fault_for(&self, path: &str) -> Option<u16> {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|f| path.starts_with(&f.prefix))
            .map(|f| f.status)
    }

    /// Route a request to the store.
    fn route(&self, request: &ApiRequest) -> StoreResult<Value> {
        let segments: Vec<&str> = request
            .path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let mut store = self.store();

        match (request.method, segments.as_slice()) {
            (Method::Get, ["students"]) => ok("Students retrieved successfully", store.students()),
            (Method::Get, ["students", id]) => {
                ok("Student retrieved successfully", store.student(parse_id(id)?)?)
            }
            (Method::Post, ["students"]) => {
                let draft = body::<StudentDraft>(request)?;
                ok("Student created successfully", store.create_student(draft)?)
            }
            (Method::Put, ["students", id]) => {
                let id = parse_id(id)?;
                let draft = body::<StudentDraft>(request)?;
                ok("Student updated successfully", store.update_student(id, draft)?)
            }
            (Method::Delete, ["students", id]) => {
                store.delete_student(parse_id(id)?)?;
                ok("Student deleted successfully", Value::Null)
            }

            (Method::Get, ["courses"]) => ok("Courses retrieved successfully", store.courses()),
            (Method::Get, ["courses", id]) => {
                ok("Course retrieved successfully", store.course(parse_id(id)?)?)
            }
            (Method::Post, ["courses"]) => {
                let draft = body::<CourseDraft>(request)?;
                ok("Course created successfully", store.create_course(draft)?)
            }
            (Method::Put, ["courses", id]) => {
                let id = parse_id(id)?;
                let draft = body::<CourseDraft>(request)?;
                ok("Course updated successfully", store.update_course(id, draft)?)
            }
            (Method::Delete, ["courses", id]) => {
                store.delete_course(parse_id(id)?)?;
                ok("Course deleted successfully", Value::Null)
            }

            (Method::Get, ["enrollments"]) => {
                ok("Enrollments retrieved successfully", store.enrollments())
            }
            (Method::Get, ["enrollments", id]) => {
                ok("Enrollment retrieved successfully", store.enrollment(parse_id(id)?)?)
            }
            (Method::Post, ["enrollments"]) => {
                let draft = body::<EnrollmentDraft>(request)?;
                ok("Student enrolled successfully", store.enroll(draft)?)
            }
            (Method::Patch, ["enrollments", id, "grade"]) => {
                let id = parse_id(id)?;
                let grade: String = param(request, "grade")?;
                ok("Grade updated successfully", store.set_grade(id, grade)?)
            }
            (Method::Patch, ["enrollments", id, "status"]) => {
                let id = parse_id(id)?;
                let status: EnrollmentStatus = param(request, "status")?;
                ok("Status updated successfully", store.set_status(id, status)?)
            }
            (Method::Delete, ["enrollments", id]) => {
                store.delete_enrollment(parse_id(id)?)?;
                ok("Enrollment deleted successfully", Value::Null)
            }

            _ => Err(Rejection::not_found(format!(
                "No handler for {} {}",
                request.method, request.path
            ))),
        }
    }
}

impl Default for SimTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn ok(message: &str, data: impl serde::Serialize) -> StoreResult<Value> {
    let data = serde_json::to_value(data).map_err(|e| Rejection::bad_request(e.to_string()))?;
    Ok(json!({ "success": true, "message": message, "data": data }))
}

fn parse_id(segment: &str) -> StoreResult<i64> {
    segment
        .parse()
        .map_err(|_| Rejection::bad_request(format!("Invalid id: '{segment}'")))
}

fn body<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> StoreResult<T> {
    let value = request.body.clone().ok_or_else(Rejection::invalid)?;
    serde_json::from_value(value).map_err(|_| Rejection::invalid())
}

fn param<T: std::str::FromStr>(request: &ApiRequest, key: &str) -> StoreResult<T> {
    let raw = request
        .query_param(key)
        .ok_or_else(|| Rejection::bad_request(format!("Missing parameter '{key}'")))?;
    raw.parse()
        .map_err(|_| Rejection::bad_request(format!("Invalid {key}: '{raw}'")))
}

#[async_trait]
impl Transport for SimTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn call(&self, request: ApiRequest) -> ApiResult<Value> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let outcome = match self.fault_for(&request.path) {
            Some(status) => Err(Rejection {
                status,
                error: "Injected Fault",
                message: String::new(),
            }),
            None => self.route(&request),
        };

        outcome.map_err(|rejection| {
            debug!(status = rejection.status, "request rejected");
            let body = json!({
                "status": rejection.status,
                "error": rejection.error,
                "message": rejection.message,
                "path": format!("/api{}", request.path),
            });
            ApiError::from_status(rejection.status, &body.to_string())
        })
    }
}
