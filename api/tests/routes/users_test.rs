#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::user::{Model as UserModel, NewUser, Role};
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Roster listing is sorted by name and filterable by the legacy flag
    #[tokio::test]
    #[serial]
    async fn test_list_users_with_legacy_filter() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;

        let (status, _) = app
            .call(
                "POST",
                "/api/users",
                Some(&admin),
                Some(json!({ "users": [
                    { "name": "Zed", "email": "z@x.com", "roll_number": "Z1", "legacy": true },
                    { "name": "Bea", "email": "b@x.com", "roll_number": "B1", "legacy": true }
                ]})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = app.call("GET", "/api/users?legacy=true", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Bea", "Zed"]);

        let (_, json) = app.call("GET", "/api/users?legacy=false", Some(&admin), None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Bulk add reports a result per entry and continues past duplicates
    #[tokio::test]
    #[serial]
    async fn test_bulk_add_reports_each_entry() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;
        app.seed_user("taken@x.com", "T1", Role::User).await;

        let (status, json) = app
            .call(
                "POST",
                "/api/users",
                Some(&admin),
                Some(json!({ "users": [
                    { "name": "New", "email": "new@x.com", "roll_number": "N1" },
                    { "name": "Dup", "email": "taken@x.com", "roll_number": "N2" }
                ]})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Created 1 of 2 users");
        assert_eq!(json["data"][0]["created"], true);
        assert!(json["data"][0]["id"].as_i64().is_some());
        assert_eq!(json["data"][1]["created"], false);

        // Created with the default member password.
        app.login("new@x.com", "welcome123").await;
    }

    /// Test Case: Members may look records up but not create them or change roles
    #[tokio::test]
    #[serial]
    async fn test_member_cannot_use_admin_routes() {
        let app = make_test_app().await;
        let member = app.token_for(Role::Member).await;
        let target = app.seed_user("s@x.com", "S1", Role::User).await;

        let (status, json) = app
            .call("GET", &format!("/api/users/roll/{}", "S1"), Some(&member), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], "s@x.com");
        assert!(json["data"]["attendance"].as_array().unwrap().is_empty());

        let (status, json) = app
            .call("POST", "/api/users", Some(&member), Some(json!({ "users": [] })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Admin access required");

        let (status, _) = app
            .call(
                "PUT",
                &format!("/api/users/{}/role", target.id),
                Some(&member),
                Some(json!({ "role": "admin" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Students cannot read the roster
    #[tokio::test]
    #[serial]
    async fn test_student_cannot_list_users() {
        let app = make_test_app().await;
        let student = app.token_for(Role::User).await;

        let (status, _) = app.call("GET", "/api/users", Some(&student), None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    /// Test Case: Admin promotes a student; the new role applies from the next login
    #[tokio::test]
    #[serial]
    async fn test_admin_sets_role() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;
        let target = app.seed_user("s@x.com", "S1", Role::User).await;

        let (status, json) = app
            .call(
                "PUT",
                &format!("/api/users/{}/role", target.id),
                Some(&admin),
                Some(json!({ "role": "member" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["role"], "member");

        let promoted = app.login("s@x.com", "password123").await;
        let (status, _) = app.call("GET", "/api/users", Some(&promoted), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Test Case: Lookup of a missing record
    #[tokio::test]
    #[serial]
    async fn test_get_missing_user() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;

        let (status, json) = app.call("GET", "/api/users/9999", Some(&admin), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "User not found");
    }

    /// Test Case: The dashboard endpoint returns the caller's own record
    #[tokio::test]
    #[serial]
    async fn test_me_returns_own_record() {
        let app = make_test_app().await;
        let student = app.token_for(Role::User).await;

        let (status, json) = app.call("GET", "/api/me", Some(&student), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["email"], "user@club.test");
        assert!(json["data"]["qr_code"].as_str().unwrap().contains("/scan/"));
    }

    /// Test Case: An admin gives a legacy record its first password, then it can log in
    #[tokio::test]
    #[serial]
    async fn test_admin_sets_password_for_legacy_record() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;
        let member = app.token_for(Role::Member).await;
        let legacy = UserModel::create(
            app.state.db(),
            NewUser {
                name: "Legacy".into(),
                email: "old@x.com".into(),
                roll_number: "L1".into(),
                qr_code: app.state.settings().scan_url("legacy1"),
                legacy: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let path = format!("/api/users/{}/password", legacy.id);

        let (status, _) = app
            .call("PUT", &path, Some(&member), Some(json!({ "password": "fresh-start" })))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = app
            .call("PUT", &path, Some(&admin), Some(json!({ "password": "" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Password is required");

        let (status, json) = app
            .call("PUT", &path, Some(&admin), Some(json!({ "password": "fresh-start" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Password updated successfully");

        app.login("old@x.com", "fresh-start").await;
    }

    /// Test Case: A user changes their own password with the current one
    #[tokio::test]
    #[serial]
    async fn test_me_change_password() {
        let app = make_test_app().await;
        app.seed_user("s@x.com", "S1", Role::User).await;
        let student = app.login("s@x.com", "password123").await;

        let (status, json) = app
            .call(
                "PUT",
                "/api/me/password",
                Some(&student),
                Some(json!({ "current_password": "wrong", "new_password": "next-one" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Current password is incorrect");

        let (status, json) = app
            .call(
                "PUT",
                "/api/me/password",
                Some(&student),
                Some(json!({ "current_password": "password123", "new_password": "next-one" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Password changed successfully");

        app.login("s@x.com", "next-one").await;
        let (status, _) = app
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "s@x.com", "password": "password123" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Password change needs a session
    #[tokio::test]
    #[serial]
    async fn test_me_change_password_requires_session() {
        let app = make_test_app().await;
        let (status, _) = app
            .call(
                "PUT",
                "/api/me/password",
                None,
                Some(json!({ "current_password": "a", "new_password": "b" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
