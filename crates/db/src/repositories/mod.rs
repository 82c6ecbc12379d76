//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes run in a
//! single transaction inside the repository method.

pub mod checklist_template_repo;
pub mod course_repo;
pub mod exam_result_repo;
pub mod lesson_checklist_repo;
pub mod lesson_plan_repo;
pub mod study_session_repo;
pub mod subject_repo;

pub use checklist_template_repo::ChecklistTemplateRepo;
pub use course_repo::CourseRepo;
pub use exam_result_repo::ExamResultRepo;
pub use lesson_checklist_repo::LessonChecklistRepo;
pub use lesson_plan_repo::LessonPlanRepo;
pub use study_session_repo::StudySessionRepo;
pub use subject_repo::SubjectRepo;
