//! Route table for the `/api/v1` surface.
//!
//! ```text
//! POST /api/v1/login                      POST /api/v1/logout
//! POST /api/v1/students                   GET  /api/v1/students
//! GET  /api/v1/students/{id}              PUT  /api/v1/students/{id}
//! DELETE /api/v1/students/{id}
//! POST /api/v1/parents                    POST /api/v1/parents/links
//! GET  /api/v1/me/children
//! POST /api/v1/enrollments                POST /api/v1/enrollments/{id}/drop
//! GET  /api/v1/students/{id}/enrollments
//! POST /api/v1/grades                     GET  /api/v1/students/{id}/grades
//! GET  /api/v1/me/grades
//! POST /api/v1/attendance                 GET  /api/v1/attendance
//! POST /api/v1/categories                 GET  /api/v1/categories
//! POST /api/v1/notifications              GET  /api/v1/me/notifications
//! POST /api/v1/me/notifications/{id}/read
//! GET  /api/v1/me/profile                 PUT  /api/v1/me/profile
//! ```

use actix_web::web;

use crate::inbound::http::validation::{json_config, path_config, query_config};
use crate::inbound::http::{
    attendance, auth, categories, enrollment, grading, notifications, parents, profiles, students,
};

/// Prefix shared by every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Mount the API scope and the envelope-producing extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use school_backend::inbound::http::routes::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(
            web::scope(API_PREFIX)
                .service(auth::login)
                .service(auth::logout)
                .service(students::create_student)
                .service(students::list_students)
                .service(students::get_student)
                .service(students::update_student)
                .service(students::delete_student)
                .service(parents::create_parent)
                .service(parents::link_parent)
                .service(parents::my_children)
                .service(enrollment::enroll_student)
                .service(enrollment::drop_enrollment)
                .service(enrollment::student_enrollments)
                .service(grading::record_grade)
                .service(grading::student_grades)
                .service(grading::my_grades)
                .service(attendance::mark_attendance)
                .service(attendance::list_attendance)
                .service(categories::create_category)
                .service(categories::list_categories)
                .service(notifications::send_notification)
                .service(notifications::my_notifications)
                .service(notifications::mark_notification_read)
                .service(profiles::my_profile)
                .service(profiles::update_my_profile),
        );
}
