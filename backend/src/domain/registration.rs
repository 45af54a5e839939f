//! Wiring of every feature service into one frozen dispatcher.
//!
//! [`declare_intents`] lists every intent the application exposes, so a
//! handler that is forgotten here or in [`build_dispatcher`] stops start-up
//! with [`RegistrationError::MissingHandlers`] instead of failing on the
//! first request.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::PageLimits;
use crate::domain::attendance::{AttendanceService, GetAttendanceQuery, MarkAttendanceCommand};
use crate::domain::categories::{CategoryService, CreateCategoryCommand, GetCategoriesQuery};
use crate::domain::dispatch::{Dispatcher, RegistrationError, RegistryBuilder};
use crate::domain::enrollment::{
    DropEnrollmentCommand, EnrollStudentCommand, EnrollmentService, GetStudentEnrollmentsQuery,
};
use crate::domain::grading::{
    GetMyGradesQuery, GetStudentGradesQuery, GradingService, RecordGradeCommand,
};
use crate::domain::notifications::{
    GetMyNotificationsQuery, MarkNotificationReadCommand, NotificationService,
    SendNotificationCommand,
};
use crate::domain::parents::{
    CreateParentCommand, GetMyChildrenQuery, LinkParentToStudentCommand, ParentService,
};
use crate::domain::ports::{
    AttendanceRepository, CategoryRepository, EnrollmentRepository, GradeRepository,
    NotificationRepository, ParentRepository, ProfileRepository, StudentRepository,
};
use crate::domain::profiles::{GetMyProfileQuery, ProfileService, UpdateMyProfileCommand};
use crate::domain::students::{
    CreateStudentCommand, DeleteStudentCommand, GetStudentByIdQuery, GetStudentsQuery,
    StudentService, UpdateStudentCommand,
};

/// Driven ports shared by the feature services.
#[derive(Clone)]
pub struct SchoolPorts {
    pub students: Arc<dyn StudentRepository>,
    pub parents: Arc<dyn ParentRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub grades: Arc<dyn GradeRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub clock: Arc<dyn Clock>,
}

/// Mark every application intent as required.
pub fn declare_intents(builder: &mut RegistryBuilder) -> &mut RegistryBuilder {
    builder
        .require::<CreateStudentCommand>()
        .require::<UpdateStudentCommand>()
        .require::<DeleteStudentCommand>()
        .require::<GetStudentByIdQuery>()
        .require::<GetStudentsQuery>()
        .require::<CreateParentCommand>()
        .require::<LinkParentToStudentCommand>()
        .require::<GetMyChildrenQuery>()
        .require::<EnrollStudentCommand>()
        .require::<DropEnrollmentCommand>()
        .require::<GetStudentEnrollmentsQuery>()
        .require::<RecordGradeCommand>()
        .require::<GetStudentGradesQuery>()
        .require::<GetMyGradesQuery>()
        .require::<MarkAttendanceCommand>()
        .require::<GetAttendanceQuery>()
        .require::<CreateCategoryCommand>()
        .require::<GetCategoriesQuery>()
        .require::<SendNotificationCommand>()
        .require::<GetMyNotificationsQuery>()
        .require::<MarkNotificationReadCommand>()
        .require::<GetMyProfileQuery>()
        .require::<UpdateMyProfileCommand>()
}

/// Build the application dispatcher over `ports`.
///
/// # Errors
/// Returns [`RegistrationError`] when a declared intent has no handler or a
/// handler is registered twice.
pub fn build_dispatcher(
    ports: &SchoolPorts,
    limits: PageLimits,
) -> Result<Dispatcher, RegistrationError> {
    let mut builder = Dispatcher::builder();
    declare_intents(&mut builder);
    register_students(&mut builder, ports, limits)?;
    register_parents(&mut builder, ports)?;
    register_enrollment(&mut builder, ports)?;
    register_grading(&mut builder, ports)?;
    register_attendance(&mut builder, ports, limits)?;
    register_categories(&mut builder, ports, limits)?;
    register_notifications(&mut builder, ports, limits)?;
    register_profiles(&mut builder, ports)?;
    builder.build()
}

fn register_students(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
    limits: PageLimits,
) -> Result<(), RegistrationError> {
    let service = Arc::new(StudentService::new(ports.students.clone(), limits));
    builder
        .register::<CreateStudentCommand>(service.clone())?
        .register::<UpdateStudentCommand>(service.clone())?
        .register::<DeleteStudentCommand>(service.clone())?
        .register::<GetStudentByIdQuery>(service.clone())?
        .register::<GetStudentsQuery>(service)?;
    Ok(())
}

fn register_parents(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
) -> Result<(), RegistrationError> {
    let service = Arc::new(ParentService::new(
        ports.parents.clone(),
        ports.students.clone(),
    ));
    builder
        .register::<CreateParentCommand>(service.clone())?
        .register::<LinkParentToStudentCommand>(service.clone())?
        .register::<GetMyChildrenQuery>(service)?;
    Ok(())
}

fn register_enrollment(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
) -> Result<(), RegistrationError> {
    let service = Arc::new(EnrollmentService::new(
        ports.enrollments.clone(),
        ports.students.clone(),
        ports.clock.clone(),
    ));
    builder
        .register::<EnrollStudentCommand>(service.clone())?
        .register::<DropEnrollmentCommand>(service.clone())?
        .register::<GetStudentEnrollmentsQuery>(service)?;
    Ok(())
}

fn register_grading(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
) -> Result<(), RegistrationError> {
    let service = Arc::new(GradingService::new(
        ports.grades.clone(),
        ports.enrollments.clone(),
        ports.students.clone(),
        ports.clock.clone(),
    ));
    builder
        .register::<RecordGradeCommand>(service.clone())?
        .register::<GetStudentGradesQuery>(service.clone())?
        .register::<GetMyGradesQuery>(service)?;
    Ok(())
}

fn register_attendance(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
    limits: PageLimits,
) -> Result<(), RegistrationError> {
    let service = Arc::new(AttendanceService::new(
        ports.attendance.clone(),
        ports.students.clone(),
        ports.clock.clone(),
        limits,
    ));
    builder
        .register::<MarkAttendanceCommand>(service.clone())?
        .register::<GetAttendanceQuery>(service)?;
    Ok(())
}

fn register_categories(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
    limits: PageLimits,
) -> Result<(), RegistrationError> {
    let service = Arc::new(CategoryService::new(ports.categories.clone(), limits));
    builder
        .register::<CreateCategoryCommand>(service.clone())?
        .register::<GetCategoriesQuery>(service)?;
    Ok(())
}

fn register_notifications(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
    limits: PageLimits,
) -> Result<(), RegistrationError> {
    let service = Arc::new(NotificationService::new(
        ports.notifications.clone(),
        ports.clock.clone(),
        limits,
    ));
    builder
        .register::<SendNotificationCommand>(service.clone())?
        .register::<GetMyNotificationsQuery>(service.clone())?
        .register::<MarkNotificationReadCommand>(service)?;
    Ok(())
}

fn register_profiles(
    builder: &mut RegistryBuilder,
    ports: &SchoolPorts,
) -> Result<(), RegistrationError> {
    let service = Arc::new(ProfileService::new(
        ports.profiles.clone(),
        ports.clock.clone(),
    ));
    builder
        .register::<GetMyProfileQuery>(service.clone())?
        .register::<UpdateMyProfileCommand>(service)?;
    Ok(())
}
