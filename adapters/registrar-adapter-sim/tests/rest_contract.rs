//! The simulator answers the registrar REST contract.

use chrono::NaiveDate;
use registrar_adapter_sim::SimTransport;
use registrar_api::{
    ApiError, ApiRequest, Course, Enrollment, EnrollmentStatus, Grade, Student, Transport,
    fetch_list, fetch_one,
};
use serde_json::json;

fn sim() -> SimTransport {
    SimTransport::with_today(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap())
}

fn ada() -> serde_json::Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@x.com",
        "phone": "1234567890",
        "dateOfBirth": null,
        "address": null
    })
}

#[tokio::test]
async fn test_student_crud() {
    let sim = sim();

    let created = sim.call(ApiRequest::post("/students", ada())).await.unwrap();
    assert_eq!(created["message"], "Student created successfully");
    let id = created["data"]["id"].as_i64().unwrap();

    let student: Student = fetch_one(&sim, &format!("/students/{id}")).await.unwrap();
    assert_eq!(student.full_name(), "Ada Lovelace");
    assert_eq!(student.enrollment_date, NaiveDate::from_ymd_opt(2024, 9, 1));

    let mut edit = ada();
    edit["address"] = json!("12 St James's Square");
    sim.call(ApiRequest::put(format!("/students/{id}"), edit))
        .await
        .unwrap();
    let students: Vec<Student> = fetch_list(&sim, "/students").await.unwrap();
    assert_eq!(students[0].address.as_deref(), Some("12 St James's Square"));

    sim.call(ApiRequest::delete(format!("/students/{id}")))
        .await
        .unwrap();
    let students: Vec<Student> = fetch_list(&sim, "/students").await.unwrap();
    assert!(students.is_empty());
}

#[tokio::test]
async fn test_missing_required_field_is_bad_request() {
    let sim = sim();
    let mut body = ada();
    body["email"] = json!("");

    let err = sim.call(ApiRequest::post("/students", body)).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let sim = sim();
    let err = sim.call(ApiRequest::delete("/courses/42")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Course not found with ID: 42");
}

#[tokio::test]
async fn test_duplicate_course_code_conflicts() {
    let sim = sim();
    let course = json!({"courseName": "Algorithms", "courseCode": "CS201", "credits": 4,
                        "instructor": null, "description": null});
    sim.call(ApiRequest::post("/courses", course.clone()))
        .await
        .unwrap();

    let err = sim.call(ApiRequest::post("/courses", course)).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.to_string(), "Course with code CS201 already exists");
}

#[tokio::test]
async fn test_grade_and_status_patches() {
    let sim = SimTransport::seeded();
    let before: Vec<Enrollment> = fetch_list(&sim, "/enrollments").await.unwrap();
    let target = before[0].clone();

    sim.call(
        ApiRequest::patch(format!("/enrollments/{}/grade", target.id)).with_query("grade", "B+"),
    )
    .await
    .unwrap();
    sim.call(
        ApiRequest::patch(format!("/enrollments/{}/status", target.id))
            .with_query("status", "COMPLETED"),
    )
    .await
    .unwrap();

    let after: Vec<Enrollment> = fetch_list(&sim, "/enrollments").await.unwrap();
    let updated = after.iter().find(|e| e.id == target.id).unwrap();
    assert_eq!(updated.known_grade(), Some(Grade::BPlus));
    assert_eq!(updated.status, EnrollmentStatus::Completed);
    assert_eq!(updated.student_id, target.student_id);
    assert_eq!(updated.course_id, target.course_id);
    assert_eq!(updated.enrollment_date, target.enrollment_date);
}

#[tokio::test]
async fn test_grade_is_stored_as_free_text() {
    let sim = SimTransport::seeded();
    let err = sim
        .call(ApiRequest::patch("/enrollments/1/grade").with_query("grade", "  "))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Grade cannot be blank");

    sim.call(ApiRequest::patch("/enrollments/1/grade").with_query("grade", "A "))
        .await
        .unwrap();
    let enrollment: Enrollment = fetch_one(&sim, "/enrollments/1").await.unwrap();
    assert_eq!(enrollment.grade.as_deref(), Some("A "));
    assert_eq!(enrollment.known_grade(), Some(Grade::A));
}

#[tokio::test]
async fn test_seeded_ids_are_stable() {
    let sim = SimTransport::seeded();
    let students: Vec<Student> = fetch_list(&sim, "/students").await.unwrap();
    let courses: Vec<Course> = fetch_list(&sim, "/courses").await.unwrap();
    assert_eq!(students.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(courses.iter().map(|c| c.id).collect::<Vec<_>>(), [1, 2, 3]);

    let enrollments: Vec<Enrollment> = fetch_list(&sim, "/enrollments").await.unwrap();
    assert!(
        !enrollments
            .iter()
            .any(|e| e.student_id == 1 && e.course_id == 2)
    );
}

#[tokio::test]
async fn test_fault_injection_and_log() {
    let sim = SimTransport::seeded();
    sim.fail_path("/courses", 500);

    let err = fetch_list::<Course>(&sim, "/courses").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "Error 500");

    assert!(fetch_list::<Student>(&sim, "/students").await.is_ok());
    assert_eq!(sim.request_count(), 2);
    assert_eq!(sim.requests()[0].path, "/courses");

    sim.clear_faults();
    assert!(fetch_list::<Course>(&sim, "/courses").await.is_ok());
}

#[tokio::test]
async fn test_unrouted_path_is_not_found() {
    let sim = sim();
    let err = sim.call(ApiRequest::get("/classrooms")).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
}
