use lecturenote_core::{
    decode_pdf_data_url, Database, LecturePatch, LibraryService, NewClass, NotebookStore,
    RepoError, StoreConfig, StoreLocation,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn memory_library() -> LibraryService {
    LibraryService::new(NotebookStore::from_config(&StoreConfig::in_memory()))
}

fn broken_library(dir: &tempfile::TempDir) -> LibraryService {
    let db = Database::new(StoreLocation::File(dir.path().to_path_buf()));
    LibraryService::new(NotebookStore::new(Arc::new(db)))
}

#[tokio::test]
async fn classes_are_listed_most_recently_updated_first() {
    let library = memory_library();

    let mut created = Vec::new();
    for name in ["first", "second", "third"] {
        created.push(
            library
                .create_class(NewClass::new(name, "2025"))
                .await
                .unwrap(),
        );
        tokio::time::sleep(Duration::from_millis(3)).await;
    }

    let names: Vec<String> = library
        .classes_recent_first()
        .await
        .into_iter()
        .map(|class| class.name)
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn lectures_for_class_are_oldest_first() {
    let library = memory_library();
    let class = library
        .create_class(NewClass::new("CS101", "2025"))
        .await
        .unwrap();

    for name in ["Week 1", "Week 2", "Week 3"] {
        library
            .import_lecture(class.id, name, b"%PDF-1.4")
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(3)).await;
    }

    let names: Vec<String> = library
        .lectures_for_class(class.id)
        .await
        .into_iter()
        .map(|lecture| lecture.name)
        .collect();
    assert_eq!(names, vec!["Week 1", "Week 2", "Week 3"]);
}

#[tokio::test]
async fn listing_failures_degrade_to_empty_results() {
    let dir = tempfile::tempdir().unwrap();
    let library = broken_library(&dir);

    assert!(library.classes_recent_first().await.is_empty());
    assert!(library.lectures_for_class(Uuid::new_v4()).await.is_empty());

    let view = library.open_lecture(Uuid::new_v4(), Uuid::new_v4()).await;
    assert!(view.lecture.is_none());
    assert!(view.class.is_none());
}

#[tokio::test]
async fn mutation_failures_propagate() {
    let dir = tempfile::tempdir().unwrap();
    let library = broken_library(&dir);

    let err = library
        .create_class(NewClass::new("CS101", "2025"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::EngineUnavailable(_)));

    let err = library.delete_class(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RepoError::EngineUnavailable(_)));

    let err = library
        .save_slide_note(Uuid::new_v4(), 1, "<p>x</p>")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::EngineUnavailable(_)));
}

#[tokio::test]
async fn import_embeds_pdf_and_starts_without_notes() {
    let library = memory_library();
    let class_id = Uuid::new_v4();

    let lecture = library
        .import_lecture(class_id, "  Week 1  ", b"%PDF-1.7 body")
        .await
        .unwrap();
    assert_eq!(lecture.name, "Week 1");
    assert!(lecture.notes.is_empty());
    assert_eq!(
        decode_pdf_data_url(&lecture.pdf_url).unwrap(),
        b"%PDF-1.7 body"
    );
}

#[tokio::test]
async fn save_slide_note_keeps_other_slides() {
    let library = memory_library();
    let lecture = library
        .import_lecture(Uuid::new_v4(), "Week 1", b"%PDF")
        .await
        .unwrap();

    library
        .save_slide_note(lecture.id, 1, "<p>one</p>")
        .await
        .unwrap();
    let saved = library
        .save_slide_note(lecture.id, 3, "<p>three</p>")
        .await
        .unwrap();

    assert_eq!(saved.notes.authored_slides(), vec![1, 3]);
    assert_eq!(saved.notes.get(1), Some("<p>one</p>"));
    assert!(saved.updated_at > lecture.updated_at);
}

#[tokio::test]
async fn save_slide_note_rejects_missing_lecture_and_slide_zero() {
    let library = memory_library();

    let err = library
        .save_slide_note(Uuid::new_v4(), 1, "<p>x</p>")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));

    let lecture = library
        .import_lecture(Uuid::new_v4(), "Week 1", b"%PDF")
        .await
        .unwrap();
    let err = library
        .save_slide_note(lecture.id, 0, "<p>x</p>")
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn open_lecture_joins_class_and_tolerates_orphans() {
    let library = memory_library();
    let class = library
        .create_class(NewClass::new("CS101", "2025"))
        .await
        .unwrap();
    let lecture = library
        .import_lecture(class.id, "Week 1", b"%PDF")
        .await
        .unwrap();

    let view = library.open_lecture(class.id, lecture.id).await;
    assert_eq!(view.class.as_ref(), Some(&class));
    assert_eq!(view.lecture.as_ref(), Some(&lecture));

    library.delete_class(class.id).await.unwrap();
    let view = library.open_lecture(class.id, lecture.id).await;
    assert!(view.class.is_none());
    assert_eq!(view.lecture, Some(lecture.clone()));

    let moved = library
        .store()
        .update_lecture(lecture.id, LecturePatch {
            class_id: Some(Uuid::new_v4()),
            ..LecturePatch::default()
        })
        .await
        .unwrap();
    assert!(library.lectures_for_class(class.id).await.is_empty());
    assert_eq!(library.lectures_for_class(moved.class_id).await, vec![moved]);
}
