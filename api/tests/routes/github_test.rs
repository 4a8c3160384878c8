#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn serves_file_with_revision() {
        let app = make_test_app().await;
        let revision = app.repo.seed_file("CS/SEM3/DSA/loop_demo.py", b"print(1)").await;

        let (status, json) = app
            .send("GET", "/api/github/files/CS/SEM3/DSA/loop_demo.py", None, None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["path"], "CS/SEM3/DSA/loop_demo.py");
        assert_eq!(json["data"]["revision"], revision);
        assert_eq!(json["data"]["content"], "print(1)");
    }

    #[tokio::test]
    #[serial]
    async fn missing_file_is_not_found() {
        let app = make_test_app().await;
        let (status, json) = app
            .send("GET", "/api/github/files/CS/nothing.py", None, None)
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    #[serial]
    async fn unreachable_host_is_bad_gateway() {
        let app = make_test_app().await;
        app.repo.set_unavailable(true).await;

        let (status, _) = app
            .send("GET", "/api/github/files/CS/SEM3/DSA/loop_demo.py", None, None)
            .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
