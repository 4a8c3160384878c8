#[cfg(test)]
mod tests {
    use crate::helpers::{TestApp, make_test_app, make_test_app_with};
    use axum::http::StatusCode;
    use db::models::practical::Model as PracticalModel;
    use db::models::submission::{Model as SubmissionModel, SubmissionStatus};
    use serde_json::{Value, json};
    use serial_test::serial;
    use services::remote_repository::memory::RemoteCall;
    use services::test_utils::RecordingNotifier;

    async fn submit(app: &TestApp, subject_id: i64, title: &str) -> i64 {
        let (status, json) = app
            .send(
                "POST",
                "/api/submissions",
                None,
                Some(json!({
                    "name": "A",
                    "email": "a@x.com",
                    "subject": subject_id,
                    "title": title,
                    "description": "d",
                    "code": "print(1)",
                    "extension": ".py"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().unwrap()
    }

    async fn stored(app: &TestApp, id: i64) -> SubmissionModel {
        SubmissionModel::find_by_id(app.state.db(), id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn submit_is_public_and_pending() {
        let app = make_test_app().await;
        let subject = app.subject("DSA", "SEM3").await;

        let (status, json) = app
            .send(
                "POST",
                "/api/submissions",
                None,
                Some(json!({
                    "name": "A",
                    "email": "a@x.com",
                    "subject": subject.id,
                    "title": "Loop Demo",
                    "description": "d",
                    "code": "print(1)"
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Submission received");
        assert_eq!(json["data"]["status"], "pending");
        assert_eq!(json["data"]["extension"], ".py");
        assert_eq!(json["data"]["rejection_reason"], Value::Null);
        assert!(app.repo.calls().await.is_empty());
        assert!(app.notifier.sent().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn submit_validates_fields_and_subject() {
        let app = make_test_app().await;
        let subject = app.subject("DSA", "SEM3").await;

        let (status, json) = app
            .send(
                "POST",
                "/api/submissions",
                None,
                Some(json!({
                    "name": "A",
                    "email": "not-an-email",
                    "subject": subject.id,
                    "title": "",
                    "description": "d",
                    "code": "   "
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["message"].as_str().unwrap();
        assert!(message.contains("Title is required"));
        assert!(message.contains("Code is required"));
        assert!(message.contains("email"));

        let (status, _) = app
            .send(
                "POST",
                "/api/submissions",
                None,
                Some(json!({
                    "name": "A",
                    "email": "a@x.com",
                    "subject": 999,
                    "title": "Loop Demo",
                    "description": "d",
                    "code": "print(1)"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = app
            .send(
                "POST",
                "/api/submissions",
                None,
                Some(json!({
                    "name": "A",
                    "email": "a@x.com",
                    "subject": subject.id,
                    "title": "x".repeat(300),
                    "description": "d",
                    "code": "print(1)"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("at most 200"));
        assert!(app.repo.calls().await.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn review_routes_require_admin() {
        let app = make_test_app().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;

        let (status, _) = app.send("GET", "/api/submissions", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), None, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(stored(&app, id).await.status, SubmissionStatus::Pending);
    }

    #[tokio::test]
    #[serial]
    async fn approve_publishes_records_and_notifies() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;

        let (status, json) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let link = "https://github.com/owner/repo/blob/main/CS/SEM3/DSA/loop_demo.py";
        assert_eq!(json["data"]["practical"]["code_link"], link);
        assert_eq!(json["data"]["practical"]["title"], "Loop Demo");

        match app.repo.writes().await.as_slice() {
            [RemoteCall::Write { path, content, revision, message }] => {
                assert_eq!(path, "CS/SEM3/DSA/loop_demo.py");
                assert_eq!(content, "cHJpbnQoMSk=");
                assert_eq!(revision, &None);
                assert_eq!(message, "Approve student submission: Loop Demo");
            }
            other => panic!("unexpected writes: {other:?}"),
        }

        assert_eq!(stored(&app, id).await.status, SubmissionStatus::Approved);
        let sent = app.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@x.com");
        assert!(sent[0].html_body.contains(link));

        let (status, json) = app.send("GET", "/api/practicals", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn approve_avoids_existing_file_names() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        app.repo.seed_file("CS/SEM3/DSA/loop_demo.py", b"taken").await;
        let id = submit(&app, subject.id, "Loop Demo").await;

        let (status, json) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"]["practical"]["code_link"],
            "https://github.com/owner/repo/blob/main/CS/SEM3/DSA/loop_demo_1.py"
        );
        assert_eq!(
            app.repo.file("CS/SEM3/DSA/loop_demo.py").await.as_deref(),
            Some(b"taken".as_slice())
        );
    }

    #[tokio::test]
    #[serial]
    async fn approve_twice_is_already_decided() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;

        let uri = format!("/api/submissions/{id}/approve");
        let (status, _) = app.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = app.send("POST", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(app.repo.writes().await.len(), 1);
        assert_eq!(
            PracticalModel::find_all_with_subject(app.state.db())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    #[serial]
    async fn approve_with_repository_down_stays_pending() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;
        app.repo.set_unavailable(true).await;

        let (status, _) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(stored(&app, id).await.status, SubmissionStatus::Pending);
        assert!(
            PracticalModel::find_all_with_subject(app.state.db())
                .await
                .unwrap()
                .is_empty()
        );
        assert!(app.notifier.sent().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn approve_unknown_submission_is_not_found() {
        let app = make_test_app().await;
        let token = app.admin_token().await;

        let (status, _) = app
            .send("POST", "/api/submissions/42/approve", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    #[serial]
    async fn approve_survives_notification_failure() {
        let app = make_test_app_with(RecordingNotifier::failing()).await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;

        let (status, _) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), Some(&token), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored(&app, id).await.status, SubmissionStatus::Approved);
        assert_eq!(app.notifier.sent().len(), 1);
    }

    #[tokio::test]
    #[serial]
    async fn reject_records_reason_without_remote_calls() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let id = submit(&app, subject.id, "Loop Demo").await;
        let uri = format!("/api/submissions/{id}/reject");

        let (status, _) = app
            .send("PUT", &uri, Some(&token), Some(json!({ "reason": "  " })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = app
            .send("PUT", &uri, Some(&token), Some(json!({ "reason": "incomplete" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"], "rejected");
        assert_eq!(json["data"]["rejection_reason"], "incomplete");
        assert!(app.repo.calls().await.is_empty());

        let sent = app.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].text_body.contains("incomplete"));

        let (status, json) = app
            .send("PUT", &uri, Some(&token), Some(json!({ "reason": "again" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);

        let (status, _) = app
            .send("POST", &format!("/api/submissions/{id}/approve"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.repo.calls().await.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn pending_list_excludes_decided_and_populates_subject() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let subject = app.subject("DSA", "SEM3").await;
        let keep = submit(&app, subject.id, "Loop Demo").await;
        let rejected = submit(&app, subject.id, "Other").await;
        app.send(
            "PUT",
            &format!("/api/submissions/{rejected}/reject"),
            Some(&token),
            Some(json!({ "reason": "dup" })),
        )
        .await;

        let (status, json) = app
            .send("GET", "/api/submissions/pending", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], keep);
        assert_eq!(rows[0]["subject"]["semester"], "SEM3");

        let (status, json) = app.send("GET", "/api/submissions", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }
}
