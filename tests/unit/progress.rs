use mentorship_backend::db::enums::{TaskKind, TaskStatus};
use mentorship_backend::db::models::task::Task;
use mentorship_backend::services::programs_service::derive_progress;
use uuid::Uuid;

fn task(kind: TaskKind, status: TaskStatus) -> Task {
    Task {
        id: Uuid::new_v4(),
        program_id: Uuid::new_v4(),
        mentorship_id: Uuid::new_v4(),
        week: 2,
        kind,
        title: "week two task".to_string(),
        description: None,
        status,
        feedback: None,
        completed_at: None,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn recomputation_of_unchanged_tasks_is_byte_identical() {
    let tasks = vec![
        task(TaskKind::Learning, TaskStatus::Completed),
        task(TaskKind::Practice, TaskStatus::Completed),
        task(TaskKind::Practice, TaskStatus::InProgress),
        task(TaskKind::Reflection, TaskStatus::Pending),
    ];
    let first = derive_progress(&tasks);
    let second = derive_progress(&tasks);
    assert_eq!(first, second);
}

#[test]
fn counts_track_only_completed_tasks() {
    let tasks = vec![
        task(TaskKind::Learning, TaskStatus::Completed),
        task(TaskKind::Practice, TaskStatus::InProgress),
        task(TaskKind::Reflection, TaskStatus::Pending),
    ];
    let (completed, total, engagement, skill) = derive_progress(&tasks);
    assert_eq!(completed, 1);
    assert_eq!(total, 3);
    assert_eq!(engagement, 33);
    assert_eq!(skill, 50);
}

#[test]
fn all_done_week_scores_full_marks() {
    let tasks = vec![
        task(TaskKind::Learning, TaskStatus::Completed),
        task(TaskKind::Practice, TaskStatus::Completed),
        task(TaskKind::Reflection, TaskStatus::Completed),
    ];
    assert_eq!(derive_progress(&tasks), (3, 3, 100, 100));
}
