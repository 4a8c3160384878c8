#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn writes_require_admin() {
        let app = make_test_app().await;
        let payload = json!({ "name": "DSA", "semester": "SEM3" });

        let (status, _) = app.send("POST", "/api/subjects", None, Some(payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = app.send("GET", "/api/subjects", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    #[serial]
    async fn create_update_and_list() {
        let app = make_test_app().await;
        let token = app.admin_token().await;

        let (status, json) = app
            .send(
                "POST",
                "/api/subjects",
                Some(&token),
                Some(json!({ "name": " DSA ", "code": "210244", "semester": "SEM3" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["name"], "DSA");
        let id = json["data"]["id"].as_i64().unwrap();

        let (status, json) = app
            .send(
                "PUT",
                &format!("/api/subjects/{id}"),
                Some(&token),
                Some(json!({ "code": null, "semester": "SEM4" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["code"], serde_json::Value::Null);
        assert_eq!(json["data"]["semester"], "SEM4");
        assert_eq!(json["data"]["name"], "DSA");

        let (status, json) = app.send("GET", &format!("/api/subjects/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["semester"], "SEM4");
    }

    #[tokio::test]
    #[serial]
    async fn create_rejects_blank_name() {
        let app = make_test_app().await;
        let token = app.admin_token().await;

        let (status, json) = app
            .send(
                "POST",
                "/api/subjects",
                Some(&token),
                Some(json!({ "name": "  ", "semester": "SEM3" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["message"].as_str().unwrap().contains("Name is required"));
    }

    #[tokio::test]
    #[serial]
    async fn delete_refuses_subject_in_use() {
        let app = make_test_app().await;
        let token = app.admin_token().await;
        let used = app.subject("DSA", "SEM3").await;
        let unused = app.subject("OS", "SEM4").await;

        app.send(
            "POST",
            "/api/submissions",
            None,
            Some(json!({
                "name": "A",
                "email": "a@x.com",
                "subject": used.id,
                "title": "Loop Demo",
                "description": "d",
                "code": "print(1)"
            })),
        )
        .await;

        let (status, _) = app
            .send("DELETE", &format!("/api/subjects/{}", used.id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = app
            .send("DELETE", &format!("/api/subjects/{}", unused.id), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send("GET", &format!("/api/subjects/{}", unused.id), None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
