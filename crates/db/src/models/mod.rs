//! Row structs, request DTOs, and enriched response types.

pub mod checklist_template;
pub mod course;
pub mod exam_result;
pub mod lesson_plan;
pub mod study_session;
pub mod subject;
