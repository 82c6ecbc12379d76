pub mod courses;
pub mod exams;
pub mod lessons;
pub mod sessions;
pub mod stats;
pub mod subjects;
pub mod templates;
