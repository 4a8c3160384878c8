#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn first_registration_succeeds_then_closes() {
        let app = make_test_app().await;
        let payload = json!({ "email": "admin@portal.test", "password": "password123" });

        let (status, json) = app
            .send("POST", "/api/auth/register", None, Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Admin registered successfully");
        assert_eq!(json["data"]["email"], "admin@portal.test");
        assert!(json["data"]["token"].as_str().is_some());

        let second = json!({ "email": "other@portal.test", "password": "password123" });
        let (status, json) = app.send("POST", "/api/auth/register", None, Some(second)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Registration is closed");
    }

    #[tokio::test]
    #[serial]
    async fn register_rejects_short_password() {
        let app = make_test_app().await;
        let payload = json!({ "email": "admin@portal.test", "password": "short" });

        let (status, json) = app.send("POST", "/api/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Password must be at least 8 characters")
        );
    }

    #[tokio::test]
    #[serial]
    async fn login_checks_email_and_password() {
        let app = make_test_app().await;
        app.admin_token().await;

        let unknown = json!({ "email": "nobody@portal.test", "password": "password123" });
        let (status, _) = app.send("POST", "/api/auth/login", None, Some(unknown)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let wrong = json!({ "email": "admin@portal.test", "password": "wrong-password" });
        let (status, json) = app.send("POST", "/api/auth/login", None, Some(wrong)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid password");

        let good = json!({ "email": "admin@portal.test", "password": "password123" });
        let (status, json) = app.send("POST", "/api/auth/login", None, Some(good)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Login successful");
        assert!(json["data"]["token"].as_str().is_some());
    }

    #[tokio::test]
    #[serial]
    async fn me_requires_a_token() {
        let app = make_test_app().await;

        let (status, _) = app.send("GET", "/api/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send("GET", "/api/auth/me", Some("not-a-jwt"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn me_returns_and_updates_profile() {
        let app = make_test_app().await;
        let token = app.admin_token().await;

        let (status, json) = app.send("GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], "admin@portal.test");

        let (status, _) = app
            .send("PUT", "/api/auth/me", Some(&token), Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = app
            .send(
                "PUT",
                "/api/auth/me",
                Some(&token),
                Some(json!({ "email": "new@portal.test" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], "new@portal.test");
    }
}
