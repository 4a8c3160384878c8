#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::practical::Model as PracticalModel;
    use serde_json::{Value, json};
    use serial_test::serial;
    use services::remote_repository::memory::RemoteCall;

    const LINK_PREFIX: &str = "https://github.com/owner/repo/blob/main/";

    #[tokio::test]
    #[serial]
    async fn create_publishes_under_subject_folder() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;

        let (status, json) = app
            .send(
                "POST",
                "/api/practicals",
                Some(&token),
                Some(json!({
                    "subject": subject.id,
                    "title": "Bubble Sort",
                    "description": "Sorts in place",
                    "code": "def sort(xs): pass",
                    "extension": "cpp"
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            json["data"]["code_link"],
            format!("{LINK_PREFIX}CS/SEM3/DSA/bubble_sort.cpp")
        );
        assert_eq!(
            app.repo.file("CS/SEM3/DSA/bubble_sort.cpp").await.as_deref(),
            Some(b"def sort(xs): pass".as_slice())
        );
        match app.repo.writes().await.as_slice() {
            [RemoteCall::Write { message, .. }] => assert_eq!(message, "Add practical: Bubble Sort"),
            other => panic!("unexpected writes: {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn create_for_unknown_subject_is_not_found() {
        let app = make_test_app().await;
        let token = app.admin_token().await;

        let (status, _) = app
            .send(
                "POST",
                "/api/practicals",
                Some(&token),
                Some(json!({
                    "subject": 999,
                    "title": "Bubble Sort",
                    "description": "d",
                    "code": "x = 1"
                })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(app.repo.writes().await.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn create_with_repository_down_is_bad_gateway() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        app.repo.set_unavailable(true).await;

        let (status, _) = app
            .send(
                "POST",
                "/api/practicals",
                Some(&token),
                Some(json!({
                    "subject": subject.id,
                    "title": "Bubble Sort",
                    "description": "d",
                    "code": "x = 1"
                })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(
            PracticalModel::find_all_with_subject(app.state.db())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    #[serial]
    async fn list_by_subject_includes_code() {
        let app = make_test_app().await;
        let subject = app.subject("DSA", "SEM3").await;
        app.repo.seed_file("CS/SEM3/DSA/stack.py", b"stack = []").await;
        PracticalModel::create(
            app.state.db(),
            subject.id,
            "Stack",
            "push/pop",
            Some(&format!("{LINK_PREFIX}CS/SEM3/DSA/stack.py")),
        )
        .await
        .unwrap();
        PracticalModel::create(
            app.state.db(),
            subject.id,
            "Queue",
            "fifo",
            Some(&format!("{LINK_PREFIX}CS/SEM3/DSA/queue.py")),
        )
        .await
        .unwrap();

        let (status, json) = app
            .send("GET", &format!("/api/practicals/subject/{}", subject.id), None, None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["title"], "Stack");
        assert_eq!(rows[0]["code"], "stack = []");
        assert_eq!(
            rows[0]["raw_url"],
            "https://raw.githubusercontent.com/owner/repo/main/CS/SEM3/DSA/stack.py"
        );
        // Missing remote file degrades to no code.
        assert_eq!(rows[1]["code"], Value::Null);

        let (status, _) = app.send("GET", "/api/practicals/subject/999", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn list_populates_subject() {
        let app = make_test_app().await;
        let subject = app.subject("DSA", "SEM3").await;
        PracticalModel::create(app.state.db(), subject.id, "Stack", "push/pop", None)
            .await
            .unwrap();

        let (status, json) = app.send("GET", "/api/practicals", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"][0]["title"], "Stack");
        assert_eq!(json["data"][0]["subject"]["name"], "DSA");
    }

    #[tokio::test]
    #[serial]
    async fn update_rewrites_file_with_current_revision() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let revision = app.repo.seed_file("CS/SEM3/DSA/stack.py", b"old").await;
        let practical = PracticalModel::create(
            app.state.db(),
            subject.id,
            "Stack",
            "push/pop",
            Some(&format!("{LINK_PREFIX}CS/SEM3/DSA/stack.py")),
        )
        .await
        .unwrap();

        let (status, json) = app
            .send(
                "PUT",
                &format!("/api/practicals/{}", practical.id),
                Some(&token),
                Some(json!({ "title": "Stack v2", "code": "new" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["title"], "Stack v2");
        assert_eq!(json["data"]["description"], "push/pop");
        assert_eq!(
            app.repo.file("CS/SEM3/DSA/stack.py").await.as_deref(),
            Some(b"new".as_slice())
        );
        match app.repo.writes().await.as_slice() {
            [RemoteCall::Write { revision: sent, message, .. }] => {
                assert_eq!(sent.as_deref(), Some(revision.as_str()));
                assert_eq!(message, "Update practical: Stack v2");
            }
            other => panic!("unexpected writes: {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn update_with_foreign_link_is_bad_request() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let practical = PracticalModel::create(
            app.state.db(),
            subject.id,
            "Stack",
            "push/pop",
            Some("https://gitlab.com/someone/else/stack.py"),
        )
        .await
        .unwrap();

        let (status, _) = app
            .send(
                "PUT",
                &format!("/api/practicals/{}", practical.id),
                Some(&token),
                Some(json!({ "code": "new" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.repo.writes().await.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn update_gives_up_after_repeated_conflicts() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        app.repo.seed_file("CS/SEM3/DSA/stack.py", b"old").await;
        let practical = PracticalModel::create(
            app.state.db(),
            subject.id,
            "Stack",
            "push/pop",
            Some(&format!("{LINK_PREFIX}CS/SEM3/DSA/stack.py")),
        )
        .await
        .unwrap();
        app.repo.force_write_conflicts(2).await;

        let (status, _) = app
            .send(
                "PUT",
                &format!("/api/practicals/{}", practical.id),
                Some(&token),
                Some(json!({ "code": "new" })),
            )
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            app.repo.file("CS/SEM3/DSA/stack.py").await.as_deref(),
            Some(b"old".as_slice())
        );
    }

    #[tokio::test]
    #[serial]
    async fn delete_removes_file_and_record() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        app.repo.seed_file("CS/SEM3/DSA/stack.py", b"stack = []").await;
        let practical = PracticalModel::create(
            app.state.db(),
            subject.id,
            "Stack",
            "push/pop",
            Some(&format!("{LINK_PREFIX}CS/SEM3/DSA/stack.py")),
        )
        .await
        .unwrap();

        let (status, _) = app
            .send("DELETE", &format!("/api/practicals/{}", practical.id), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(app.repo.paths().await.is_empty());
        let (status, _) = app
            .send("GET", &format!("/api/practicals/{}", practical.id), None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
