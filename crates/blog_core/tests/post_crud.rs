use blog_core::db::open_db_in_memory;
use blog_core::{
    Category, NewPost, PostListQuery, PostRepository, PostService, RepoError, SqlitePostRepository,
    ValidationError,
};

fn body(fill: char) -> String {
    std::iter::repeat(fill).take(260).collect()
}

fn draft(title: &str, category: &str) -> NewPost {
    NewPost::new(title, body('x'), category)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo
        .create_post(&draft("Top 10 gardens", "Non-Fiction").with_summary("Plants."))
        .unwrap();

    let loaded = repo.get_post(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Top 10 gardens");
    assert_eq!(loaded.content, body('x'));
    assert_eq!(loaded.summary.as_deref(), Some("Plants."));
    assert_eq!(loaded.category, Category::NonFiction);
    assert_eq!(loaded.updated_at, None);
}

#[test]
fn invalid_drafts_are_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let cases = [
        (draft("Plain title", "Fiction"), "missing_required_keyword"),
        (NewPost::new("Secret", "short", "Fiction"), "content_too_short"),
        (
            draft("Secret", "Fiction").with_summary("s".repeat(251)),
            "summary_too_long",
        ),
        (draft("Secret", "Memoir"), "invalid_category"),
    ];

    for (post, expected_code) in cases {
        let err = repo.create_post(&post).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
        assert_eq!(err.code(), expected_code);
    }

    assert!(repo
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn update_revalidates_and_stamps_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo.create_post(&draft("Guess again", "Fiction")).unwrap();
    let mut post = repo.get_post(id).unwrap().unwrap();

    post.title = "Secret garden".to_string();
    post.category = Category::NonFiction;
    repo.update_post(&post).unwrap();

    let reloaded = repo.get_post(id).unwrap().unwrap();
    assert_eq!(reloaded.title, "Secret garden");
    assert_eq!(reloaded.category, Category::NonFiction);
    assert!(reloaded.updated_at.is_some());

    post.content = "tiny".to_string();
    let err = repo.update_post(&post).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::ContentTooShort { chars: 4 })
    ));
    assert_eq!(repo.get_post(id).unwrap().unwrap().content, body('x'));
}

#[test]
fn update_and_delete_missing_post_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo.create_post(&draft("Top picks", "Fiction")).unwrap();
    let post = repo.get_post(id).unwrap().unwrap();
    repo.delete_post(id).unwrap();

    assert!(repo.get_post(id).unwrap().is_none());
    assert!(matches!(
        repo.update_post(&post).unwrap_err(),
        RepoError::PostNotFound(missing) if missing == id
    ));
    assert!(matches!(
        repo.delete_post(id).unwrap_err(),
        RepoError::PostNotFound(missing) if missing == id
    ));
}

#[test]
fn update_of_deleted_post_reports_not_found_before_validation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo.create_post(&draft("Secret recipes", "Fiction")).unwrap();
    let mut post = repo.get_post(id).unwrap().unwrap();
    repo.delete_post(id).unwrap();

    post.content = "short".to_string();
    assert!(matches!(
        repo.update_post(&post).unwrap_err(),
        RepoError::PostNotFound(missing) if missing == id
    ));
}

#[test]
fn count_posts_ignores_list_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count_posts().unwrap(), 0);

    for n in 0..25 {
        repo.create_post(&draft(&format!("Top {n}"), "Fiction")).unwrap();
    }

    assert_eq!(repo.list_posts(&PostListQuery::default()).unwrap().len(), 20);
    assert_eq!(repo.count_posts().unwrap(), 25);
}

#[test]
fn list_filters_by_category_and_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let first = repo.create_post(&draft("Top one", "Fiction")).unwrap();
    let second = repo.create_post(&draft("Top two", "Non-Fiction")).unwrap();
    let third = repo.create_post(&draft("Top three", "Fiction")).unwrap();
    conn.execute("UPDATE posts SET created_at = 1700000000000;", [])
        .unwrap();

    let all = repo.list_posts(&PostListQuery::default()).unwrap();
    let ids: Vec<_> = all.iter().map(|post| post.id).collect();
    assert_eq!(ids, [third, second, first]);

    let fiction = repo
        .list_posts(&PostListQuery {
            category: Some(Category::Fiction),
            ..PostListQuery::default()
        })
        .unwrap();
    let ids: Vec<_> = fiction.iter().map(|post| post.id).collect();
    assert_eq!(ids, [third, first]);

    let page = repo
        .list_posts(&PostListQuery {
            limit: Some(1),
            offset: 1,
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second);
}

#[test]
fn read_rejects_invalid_persisted_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    conn.execute(
        "INSERT INTO posts (title, content, category) VALUES ('Top', 'too short', 'Fiction');",
        [],
    )
    .unwrap();
    let id = conn.last_insert_rowid();

    assert!(matches!(
        repo.get_post(id).unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn schema_rejects_unknown_category() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO posts (title, content, category) VALUES ('Top', 'x', 'Poetry');",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn service_field_updates_validate_each_field() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let post = service.create_post(&draft("Guess what", "Fiction")).unwrap();

    let err = service.retitle_post(post.id, "Nothing special").unwrap_err();
    assert_eq!(err.code(), "missing_required_keyword");

    let err = service.set_post_content(post.id, "short").unwrap_err();
    assert_eq!(err.code(), "content_too_short");

    let err = service
        .set_post_summary(post.id, Some("s".repeat(251)))
        .unwrap_err();
    assert_eq!(err.code(), "summary_too_long");

    let err = service.set_post_category(post.id, "Fantasy").unwrap_err();
    assert_eq!(err.code(), "invalid_category");

    let unchanged = service.get_post(post.id).unwrap().unwrap();
    assert_eq!(unchanged, post);

    service.retitle_post(post.id, "You Won't Believe This").unwrap();
    service.set_post_content(post.id, body('y')).unwrap();
    service
        .set_post_summary(post.id, Some("s".repeat(250)))
        .unwrap();
    let updated = service.set_post_category(post.id, "Non-Fiction").unwrap();

    assert_eq!(updated.title, "You Won't Believe This");
    assert_eq!(updated.content, body('y'));
    assert_eq!(updated.summary.as_deref().map(str::len), Some(250));
    assert_eq!(updated.category, Category::NonFiction);

    let cleared = service.set_post_summary(post.id, None).unwrap();
    assert_eq!(cleared.summary, None);

    let err = service.retitle_post(4_242, "Top").unwrap_err();
    assert!(matches!(err, RepoError::PostNotFound(4_242)));

    service.delete_post(post.id).unwrap();
    assert!(service
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}
