//! Integration tests for template-seeded lesson checklists and derived
//! lesson completion.
//!
//! Exercises `LessonPlanRepo`, `LessonChecklistRepo`, and
//! `ChecklistTemplateRepo` against a real database:
//! - Template items are copied into the lesson at creation
//! - Unknown templates fall back to an empty checklist
//! - Toggling recomputes the lesson flag in the same transaction
//! - Manual completion is independent of the checklist
//! - Concurrent toggles leave the lesson flag consistent

use chrono::NaiveDate;
use sqlx::PgPool;
use studytrack_core::checklist::ordered_items;
use studytrack_db::models::course::CreateCourse;
use studytrack_db::models::lesson_plan::{CreateLessonPlan, LessonPlanDetail};
use studytrack_db::models::subject::SubjectInput;
use studytrack_db::repositories::{
    ChecklistTemplateRepo, CourseRepo, LessonChecklistRepo, LessonPlanRepo, SubjectRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_subject(pool: &PgPool) -> i64 {
    let course = CourseRepo::create(
        pool,
        &CreateCourse {
            name: "Science".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    SubjectRepo::create(
        pool,
        &SubjectInput {
            name: "Physics".to_string(),
            description: None,
            color: None,
            course_id: Some(course.id),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_template(pool: &PgPool, name: &str, items: &[&str]) -> i64 {
    let texts: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    ChecklistTemplateRepo::create(pool, name, None, &ordered_items(&texts))
        .await
        .unwrap()
        .template
        .id
}

fn new_lesson(subject_id: i64, template_id: Option<i64>) -> CreateLessonPlan {
    CreateLessonPlan {
        title: "Kinematics".to_string(),
        subject_id,
        content: None,
        planned_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        template_id,
    }
}

async fn create_lesson(pool: &PgPool, subject_id: i64, template_id: Option<i64>) -> LessonPlanDetail {
    LessonPlanRepo::create_with_checklist(pool, &new_lesson(subject_id, template_id))
        .await
        .unwrap()
        .expect("subject exists")
}

async fn lesson_completed(pool: &PgPool, lesson_id: i64) -> bool {
    LessonPlanRepo::find_by_id(pool, lesson_id)
        .await
        .unwrap()
        .unwrap()
        .is_completed
}

async fn toggle(pool: &PgPool, item_id: i64) -> bool {
    LessonChecklistRepo::toggle(pool, item_id)
        .await
        .unwrap()
        .expect("item exists")
        .item
        .is_completed
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lesson_copies_template_items(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Basics", &["Read", "Summarize", "Quiz"]).await;

    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;

    assert!(!lesson.lesson.is_completed);
    assert_eq!(lesson.subject.id, subject_id);
    assert_eq!(lesson.checklist.len(), 3);

    let texts: Vec<&str> = lesson.checklist.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["Read", "Summarize", "Quiz"]);
    for (index, item) in lesson.checklist.iter().enumerate() {
        assert_eq!(item.sort_order, index as i32);
        assert!(!item.is_completed);
        assert_eq!(item.lesson_id, lesson.lesson.id);
    }
    assert_eq!(lesson.progress.total, 3);
    assert_eq!(lesson.progress.done, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_template_yields_empty_checklist(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;

    let lesson = create_lesson(&pool, subject_id, Some(999_999)).await;

    assert!(lesson.checklist.is_empty());
    assert!(!lesson.lesson.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_subject_creates_nothing(pool: PgPool) {
    let result = LessonPlanRepo::create_with_checklist(&pool, &new_lesson(999_999, None))
        .await
        .unwrap();
    assert!(result.is_none());

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lesson_plans")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_template_changes_do_not_touch_existing_lessons(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Basics", &["Read", "Quiz"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;

    let replacement = ordered_items(&["Watch".to_string()]);
    ChecklistTemplateRepo::replace(&pool, template_id, "Renamed", None, &replacement)
        .await
        .unwrap()
        .unwrap();

    let checklist = LessonChecklistRepo::list_by_lesson(&pool, lesson.lesson.id)
        .await
        .unwrap();
    assert_eq!(checklist.len(), 2);
    assert_eq!(checklist[0].text, "Read");

    assert!(ChecklistTemplateRepo::delete(&pool, template_id).await.unwrap());
    let checklist = LessonChecklistRepo::list_by_lesson(&pool, lesson.lesson.id)
        .await
        .unwrap();
    assert_eq!(checklist.len(), 2);
}

// ---------------------------------------------------------------------------
// Toggle and derived completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_round_trips(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Basics", &["Read", "Quiz"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;
    let item_id = lesson.checklist[0].id;

    assert!(toggle(&pool, item_id).await);
    assert!(!toggle(&pool, item_id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_last_item_completes_lesson_and_undo_reopens_it(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Pair", &["First", "Second"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;
    let lesson_id = lesson.lesson.id;
    let (first, second) = (lesson.checklist[0].id, lesson.checklist[1].id);

    toggle(&pool, first).await;
    assert!(!lesson_completed(&pool, lesson_id).await);

    let outcome = LessonChecklistRepo::toggle(&pool, second).await.unwrap().unwrap();
    assert!(outcome.lesson_is_completed);
    assert!(lesson_completed(&pool, lesson_id).await);

    toggle(&pool, first).await;
    assert!(!lesson_completed(&pool, lesson_id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_toggle_unknown_item_changes_nothing(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Solo", &["Only"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;

    let outcome = LessonChecklistRepo::toggle(&pool, 999_999).await.unwrap();
    assert!(outcome.is_none());

    let checklist = LessonChecklistRepo::list_by_lesson(&pool, lesson.lesson.id)
        .await
        .unwrap();
    assert!(!checklist[0].is_completed);
    assert!(!lesson_completed(&pool, lesson.lesson.id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manual_completion_without_checklist(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let lesson = create_lesson(&pool, subject_id, None).await;
    assert!(lesson.checklist.is_empty());

    let updated = LessonPlanRepo::set_completion(&pool, lesson.lesson.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.is_completed);

    let detail = LessonPlanRepo::find_detail(&pool, lesson.lesson.id)
        .await
        .unwrap()
        .unwrap();
    assert!(detail.lesson.is_completed);
    assert!(detail.checklist.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_manual_completion_overrides_checklist(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Pair", &["First", "Second"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;

    LessonPlanRepo::set_completion(&pool, lesson.lesson.id, true)
        .await
        .unwrap()
        .unwrap();
    assert!(lesson_completed(&pool, lesson.lesson.id).await);

    // The next toggle re-derives the flag from the items.
    toggle(&pool, lesson.checklist[0].id).await;
    assert!(!lesson_completed(&pool, lesson.lesson.id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_basics_end_to_end(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Basics", &["Read", "Summarize", "Quiz"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;
    let lesson_id = lesson.lesson.id;
    assert_eq!(lesson.checklist.len(), 3);
    assert!(!lesson.lesson.is_completed);

    let read = lesson.checklist[0].id;
    let summarize = lesson.checklist[1].id;
    let quiz = lesson.checklist[2].id;

    toggle(&pool, read).await;
    toggle(&pool, summarize).await;
    assert!(!lesson_completed(&pool, lesson_id).await);

    toggle(&pool, quiz).await;
    assert!(lesson_completed(&pool, lesson_id).await);

    toggle(&pool, read).await;
    assert!(!lesson_completed(&pool, lesson_id).await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_toggles_keep_flag_consistent(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let names: Vec<String> = (0..8).map(|i| format!("Step {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let template_id = seed_template(&pool, "Many", &refs).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;
    let lesson_id = lesson.lesson.id;

    let all_on = lesson
        .checklist
        .iter()
        .map(|item| LessonChecklistRepo::toggle(&pool, item.id));
    futures::future::try_join_all(all_on).await.unwrap();
    assert!(lesson_completed(&pool, lesson_id).await);

    let all_off = lesson
        .checklist
        .iter()
        .map(|item| LessonChecklistRepo::toggle(&pool, item.id));
    futures::future::try_join_all(all_off).await.unwrap();
    assert!(!lesson_completed(&pool, lesson_id).await);

    let checklist = LessonChecklistRepo::list_by_lesson(&pool, lesson_id).await.unwrap();
    assert!(checklist.iter().all(|item| !item.is_completed));
}

// ---------------------------------------------------------------------------
// Cascade
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_lesson_removes_checklist(pool: PgPool) {
    let subject_id = seed_subject(&pool).await;
    let template_id = seed_template(&pool, "Basics", &["Read", "Quiz"]).await;
    let lesson = create_lesson(&pool, subject_id, Some(template_id)).await;
    let item_id = lesson.checklist[0].id;

    assert!(LessonPlanRepo::delete(&pool, lesson.lesson.id).await.unwrap());
    assert!(LessonChecklistRepo::find_by_id(&pool, item_id)
        .await
        .unwrap()
        .is_none());
    assert!(!LessonPlanRepo::delete(&pool, lesson.lesson.id).await.unwrap());
}
