//! Record store and server-side rules of the simulated registrar.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

use registrar_api::{
    Course, CourseDraft, Enrollment, EnrollmentDraft, EnrollmentStatus, Student,
    StudentDraft,
};

/// A request the registrar refused, rendered as an error response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rejection {
    pub status: u16,
    pub error: &'static str,
    pub message: String,
}

impl Rejection {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: 404,
            error: "Not Found",
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: 409,
            error: "Conflict",
            message: message.into(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            status: 400,
            error: "Validation Failed",
            message: "One or more fields have validation errors".into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            error: "Bad Request",
            message: message.into(),
        }
    }
}

pub(crate) type StoreResult<T> = Result<T, Rejection>;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_student(draft: &StudentDraft) -> StoreResult<()> {
    let required = [
        &draft.first_name,
        &draft.last_name,
        &draft.email,
        &draft.phone,
    ];
    if required.iter().any(|v| blank(v)) || !draft.email.contains('@') {
        return Err(Rejection::invalid());
    }
    if draft.phone.len() != 10 || !draft.phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::invalid());
    }
    Ok(())
}

/// Two to four uppercase letters, then three digits ("CS101").
static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}[0-9]{3}$").expect("course code pattern is valid"));

fn check_course(draft: &CourseDraft) -> StoreResult<()> {
    if blank(&draft.course_name)
        || !COURSE_CODE.is_match(&draft.course_code)
        || !CourseDraft::CREDITS.contains(&draft.credits)
    {
        return Err(Rejection::invalid());
    }
    Ok(())
}

/// Stored enrollment; display names are joined in at read time.
#[derive(Debug, Clone)]
struct EnrollmentRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    status: EnrollmentStatus,
    /// Free text, as the server stores it.
    grade: Option<String>,
    enrollment_date: NaiveDate,
}

/// In-memory registrar state.
#[derive(Debug)]
pub(crate) struct Store {
    today: NaiveDate,
    /// Last issued id per table.
    student_seq: i64,
    course_seq: i64,
    enrollment_seq: i64,
    students: FxHashMap<i64, Student>,
    courses: FxHashMap<i64, Course>,
    enrollments: FxHashMap<i64, EnrollmentRow>,
}

impl Store {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            student_seq: 0,
            course_seq: 0,
            enrollment_seq: 0,
            students: FxHashMap::default(),
            courses: FxHashMap::default(),
            enrollments: FxHashMap::default(),
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    fn sorted<T: Clone>(map: &FxHashMap<i64, T>) -> Vec<T> {
        let mut ids: Vec<_> = map.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(|id| map.get(&id).cloned()).collect()
    }

    // ─── Students ───────────────────────────────────────────────────

    pub fn students(&self) -> Vec<Student> {
        Self::sorted(&self.students)
    }

    pub fn student(&self, id: i64) -> StoreResult<Student> {
        self.students
            .get(&id)
            .cloned()
            .ok_or_else(|| Rejection::not_found(format!("Student not found with ID: {id}")))
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.students
            .values()
            .any(|s| Some(s.id) != except && s.email.eq_ignore_ascii_case(email))
    }

    pub fn create_student(&mut self, draft: StudentDraft) -> StoreResult<Student> {
        check_student(&draft)?;
        if self.email_taken(&draft.email, None) {
            return Err(Rejection::conflict(format!(
                "Student with email {} already exists",
                draft.email
            )));
        }

        self.student_seq += 1;
        let student = Student {
            id: self.student_seq,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: Some(draft.phone),
            date_of_birth: draft.date_of_birth,
            address: draft.address,
            enrollment_date: Some(self.today),
        };
        debug!(id = student.id, "student created");
        self.students.insert(student.id, student.clone());
        Ok(student)
    }

    pub fn update_student(&mut self, id: i64, draft: StudentDraft) -> StoreResult<Student> {
        let existing = self.student(id)?;
        check_student(&draft)?;
        if self.email_taken(&draft.email, Some(id)) {
            return Err(Rejection::conflict(format!(
                "Student with email {} already exists",
                draft.email
            )));
        }

        let student = Student {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: Some(draft.phone),
            date_of_birth: draft.date_of_birth,
            address: draft.address,
            enrollment_date: existing.enrollment_date,
        };
        self.students.insert(id, student.clone());
        Ok(student)
    }

    pub fn delete_student(&mut self, id: i64) -> StoreResult<()> {
        if self.students.remove(&id).is_none() {
            return Err(Rejection::not_found(format!(
                "Student not found with ID: {id}"
            )));
        }
        self.enrollments.retain(|_, e| e.student_id != id);
        Ok(())
    }

    // ─── Courses ────────────────────────────────────────────────────

    pub fn courses(&self) -> Vec<Course> {
        Self::sorted(&self.courses)
    }

    pub fn course(&self, id: i64) -> StoreResult<Course> {
        self.courses
            .get(&id)
            .cloned()
            .ok_or_else(|| Rejection::not_found(format!("Course not found with ID: {id}")))
    }

    fn code_taken(&self, code: &str, except: Option<i64>) -> bool {
        self.courses
            .values()
            .any(|c| Some(c.id) != except && c.course_code == code)
    }

    fn course_from(id: i64, draft: CourseDraft) -> Course {
        Course {
            id,
            course_name: draft.course_name,
            course_code: draft.course_code,
            credits: draft.credits,
            instructor: draft.instructor,
            description: draft.description,
        }
    }

    pub fn create_course(&mut self, draft: CourseDraft) -> StoreResult<Course> {
        check_course(&draft)?;
        if self.code_taken(&draft.course_code, None) {
            return Err(Rejection::conflict(format!(
                "Course with code {} already exists",
                draft.course_code
            )));
        }

        self.course_seq += 1;
        let course = Self::course_from(self.course_seq, draft);
        debug!(id = course.id, "course created");
        self.courses.insert(course.id, course.clone());
        Ok(course)
    }

    pub fn update_course(&mut self, id: i64, draft: CourseDraft) -> StoreResult<Course> {
        self.course(id)?;
        check_course(&draft)?;
        if self.code_taken(&draft.course_code, Some(id)) {
            return Err(Rejection::conflict(format!(
                "Course with code {} already exists",
                draft.course_code
            )));
        }

        let course = Self::course_from(id, draft);
        self.courses.insert(id, course.clone());
        Ok(course)
    }

    pub fn delete_course(&mut self, id: i64) -> StoreResult<()> {
        if self.courses.remove(&id).is_none() {
            return Err(Rejection::not_found(format!(
                "Course not found with ID: {id}"
            )));
        }
        self.enrollments.retain(|_, e| e.course_id != id);
        Ok(())
    }

    // ─── Enrollments ────────────────────────────────────────────────

    fn resolve(&self, row: &EnrollmentRow) -> Enrollment {
        let student = self.students.get(&row.student_id);
        let course = self.courses.get(&row.course_id);
        Enrollment {
            id: row.id,
            student_id: row.student_id,
            student_name: student.map(Student::full_name),
            course_id: row.course_id,
            course_name: course.map(|c| c.course_name.clone()),
            course_code: course.map(|c| c.course_code.clone()),
            status: row.status,
            grade: row.grade.clone(),
            enrollment_date: Some(row.enrollment_date),
        }
    }

    pub fn enrollments(&self) -> Vec<Enrollment> {
        Self::sorted(&self.enrollments)
            .iter()
            .map(|row| self.resolve(row))
            .collect()
    }

    fn row_mut(&mut self, id: i64) -> StoreResult<&mut EnrollmentRow> {
        self.enrollments
            .get_mut(&id)
            .ok_or_else(|| Rejection::not_found(format!("Enrollment not found with ID: {id}")))
    }

    pub fn enrollment(&self, id: i64) -> StoreResult<Enrollment> {
        self.enrollments
            .get(&id)
            .map(|row| self.resolve(row))
            .ok_or_else(|| Rejection::not_found(format!("Enrollment not found with ID: {id}")))
    }

    pub fn enroll(&mut self, draft: EnrollmentDraft) -> StoreResult<Enrollment> {
        self.student(draft.student_id)?;
        self.course(draft.course_id)?;
        let duplicate = self
            .enrollments
            .values()
            .any(|e| e.student_id == draft.student_id && e.course_id == draft.course_id);
        if duplicate {
            return Err(Rejection::conflict(
                "Student is already enrolled in this course",
            ));
        }

        self.enrollment_seq += 1;
        let row = EnrollmentRow {
            id: self.enrollment_seq,
            student_id: draft.student_id,
            course_id: draft.course_id,
            status: EnrollmentStatus::Active,
            grade: None,
            enrollment_date: self.today,
        };
        debug!(
            id = row.id,
            student = row.student_id,
            course = row.course_id,
            "enrollment created"
        );
        let enrollment = self.resolve(&row);
        self.enrollments.insert(row.id, row);
        Ok(enrollment)
    }

    pub fn set_grade(&mut self, id: i64, grade: String) -> StoreResult<Enrollment> {
        if blank(&grade) {
            return Err(Rejection::bad_request("Grade cannot be blank"));
        }
        let row = self.row_mut(id)?;
        row.grade = Some(grade);
        let row = row.clone();
        Ok(self.resolve(&row))
    }

    pub fn set_status(&mut self, id: i64, status: EnrollmentStatus) -> StoreResult<Enrollment> {
        let row = self.row_mut(id)?;
        row.status = status;
        let row = row.clone();
        Ok(self.resolve(&row))
    }

    pub fn delete_enrollment(&mut self, id: i64) -> StoreResult<()> {
        self.enrollments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Rejection::not_found(format!("Enrollment not found with ID: {id}")))
    }
}
