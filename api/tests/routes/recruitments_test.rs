#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Review edits replace review and comment, keep unspecified round flags
    #[tokio::test]
    #[serial]
    async fn test_review_update_semantics() {
        let app = make_test_app().await;
        let member = app.token_for(Role::Member).await;
        let target = app.seed_user("s@x.com", "S1", Role::User).await;
        let uri = format!("/api/recruitments/{}/review", target.id);

        let (status, json) = app
            .call(
                "PUT",
                &uri,
                Some(&member),
                Some(json!({ "review": 8, "comment": "strong", "round_one_qualified": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["review"], 8);
        assert_eq!(json["data"]["round_one_qualified"], true);

        let (_, json) = app
            .call("PUT", &uri, Some(&member), Some(json!({ "round_two_attendance": true })))
            .await;
        assert!(json["data"]["review"].is_null());
        assert_eq!(json["data"]["comment"], "");
        assert_eq!(json["data"]["round_one_qualified"], true);
        assert_eq!(json["data"]["round_two_attendance"], true);
    }

    /// Test Case: Review outside 0..=10
    #[tokio::test]
    #[serial]
    async fn test_review_out_of_range() {
        let app = make_test_app().await;
        let member = app.token_for(Role::Member).await;
        let target = app.seed_user("s@x.com", "S1", Role::User).await;

        let (status, json) = app
            .call(
                "PUT",
                &format!("/api/recruitments/{}/review", target.id),
                Some(&member),
                Some(json!({ "review": 11 })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    /// Test Case: Listing is newest first and includes attendance history
    #[tokio::test]
    #[serial]
    async fn test_list_recruitments() {
        let app = make_test_app().await;
        let member = app.token_for(Role::Member).await;
        app.seed_user("s@x.com", "S1", Role::User).await;
        app.call("POST", "/api/scan/seedS1", Some(&member), None).await;

        let (status, json) = app.call("GET", "/api/recruitments", Some(&member), None).await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["email"], "s@x.com");
        assert_eq!(rows[0]["attendance"].as_array().unwrap().len(), 1);
    }
}
