use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait};
use taskboard_server::entities::task;
use taskboard_server::task::{TaskRepository, TaskStatus};

mod common;

async fn setup() -> DatabaseConnection {
    common::setup_db().await.expect("Failed to setup test database")
}

/// Inserts a row directly so repository reads are tested on their own.
async fn insert_task(db: &DatabaseConnection, title: &str, status: TaskStatus) -> task::Model {
    let active_model = task::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(format!("{} description", title)),
        status: ActiveValue::Set(status),
        update_date: ActiveValue::Set(chrono::Utc::now().fixed_offset()),
        ..Default::default()
    };
    active_model.insert(db).await.expect("Failed to insert task")
}

#[tokio::test]
async fn can_create_task_with_to_do_status() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);

    let created = repository
        .create("T".to_string(), "D".to_string())
        .await
        .expect("Failed to create task");

    let tasks = repository.get_all().await.expect("Failed to list tasks");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id(), created.id());
    assert_eq!(tasks[0].title(), "T");
    assert_eq!(tasks[0].description(), "D");
    assert_eq!(tasks[0].status(), TaskStatus::ToDo);
    assert!(created.id() > 0);
}

#[tokio::test]
async fn can_update_all_mutable_fields() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);
    let model = insert_task(&db, "Old", TaskStatus::ToDo).await;

    let rows = repository
        .update(model.id, "New".to_string(), "New description".to_string(), TaskStatus::Done)
        .await
        .expect("Failed to update task");

    assert_eq!(rows, 1);
    let updated = repository
        .get_by_id(model.id)
        .await
        .expect("Failed to fetch task")
        .expect("Task should exist");
    assert_eq!(updated.id(), model.id);
    assert_eq!(updated.title(), "New");
    assert_eq!(updated.description(), "New description");
    assert_eq!(updated.status(), TaskStatus::Done);
    assert!(updated.update_date() >= model.update_date);
}

#[tokio::test]
async fn can_repeat_identical_update_without_changing_row() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);
    let model = insert_task(&db, "Task", TaskStatus::ToDo).await;

    repository
        .update(model.id, "A".to_string(), "B".to_string(), TaskStatus::Done)
        .await
        .expect("Failed to update task");
    let after_first = task::Entity::find_by_id(model.id).one(&db).await.unwrap().unwrap();

    repository
        .update(model.id, "A".to_string(), "B".to_string(), TaskStatus::Done)
        .await
        .expect("Failed to update task");
    let after_second = task::Entity::find_by_id(model.id).one(&db).await.unwrap().unwrap();

    assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn can_ignore_update_of_missing_task() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);
    let model = insert_task(&db, "Existing", TaskStatus::ToDo).await;

    let rows = repository
        .update(model.id + 1, "A".to_string(), "B".to_string(), TaskStatus::Done)
        .await
        .expect("Update of a missing task should not fail");

    assert_eq!(rows, 0);
    let untouched = task::Entity::find_by_id(model.id).one(&db).await.unwrap().unwrap();
    assert_eq!(untouched, model);
}

#[tokio::test]
async fn can_delete_task() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);
    let model = insert_task(&db, "Doomed", TaskStatus::ToDo).await;
    assert!(repository.exists_by_id(model.id).await.unwrap());

    let rows = repository.delete(model.id).await.expect("Failed to delete task");

    assert_eq!(rows, 1);
    assert!(!repository.exists_by_id(model.id).await.unwrap());
    assert!(repository.get_by_id(model.id).await.unwrap().is_none());
}

#[tokio::test]
async fn can_ignore_delete_of_missing_task() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);

    let rows = repository.delete(42).await.expect("Delete of a missing task should not fail");

    assert_eq!(rows, 0);
}

#[tokio::test]
async fn can_list_done_tasks_before_to_do_tasks() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);
    insert_task(&db, "First to-do", TaskStatus::ToDo).await;
    insert_task(&db, "First done", TaskStatus::Done).await;
    insert_task(&db, "Second to-do", TaskStatus::ToDo).await;
    insert_task(&db, "Second done", TaskStatus::Done).await;

    let tasks = repository.get_all().await.expect("Failed to list tasks");

    let titles: Vec<&str> = tasks.iter().map(|task| task.title()).collect();
    assert_eq!(
        titles,
        vec!["First done", "Second done", "First to-do", "Second to-do"]
    );
}

#[tokio::test]
async fn can_handle_empty_task_list() {
    let db = setup().await;
    let repository = TaskRepository::new(&db);

    let tasks = repository.get_all().await.expect("Failed to list tasks");

    assert!(tasks.is_empty());
    assert!(!repository.exists_by_id(1).await.unwrap());
}
