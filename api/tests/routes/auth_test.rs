#[cfg(test)]
mod tests {
    use crate::helpers::app::get_json_body;
    use crate::helpers::make_test_app;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::COOKIE, header::SET_COOKIE};
    use db::models::user::{Model as UserModel, NewUser, Role};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn registration(email: &str, roll: &str) -> serde_json::Value {
        json!({
            "name": "Asha Rao",
            "email": email,
            "password": "hunter22",
            "roll_number": roll,
            "branch": "CSE",
            "skills": ["rust", "sql"]
        })
    }

    /// Test Case: Successful self-service registration
    #[tokio::test]
    #[serial]
    async fn test_register_success() {
        let app = make_test_app().await;

        let (status, json) = app
            .call("POST", "/api/auth/register", None, Some(registration("A@X.com", "R1")))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "User registered successfully");
        assert_eq!(json["data"]["email"], "a@x.com");
        assert_eq!(json["data"]["role"], "user");
        assert!(json["data"].get("password_hash").is_none());

        let qr = json["data"]["qr_code"].as_str().unwrap();
        assert!(qr.starts_with("https://club.test/scan/"));

        let subjects = app.mailer.wait_for(1).await;
        assert!(subjects[0].starts_with("Welcome to"));
    }

    /// Test Case: Duplicate email or roll number is a conflict and creates nothing
    #[tokio::test]
    #[serial]
    async fn test_register_duplicate_is_conflict() {
        let app = make_test_app().await;
        app.call("POST", "/api/auth/register", None, Some(registration("a@x.com", "R1")))
            .await;

        let (status, json) = app
            .call("POST", "/api/auth/register", None, Some(registration("b@x.com", "R1")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "User with this email or roll number already exists.");

        let (status, _) = app
            .call("POST", "/api/auth/register", None, Some(registration("a@x.com", "R2")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        assert!(UserModel::find_by_email(app.state.db(), "b@x.com").await.unwrap().is_none());
    }

    /// Test Case: Blank required field
    #[tokio::test]
    #[serial]
    async fn test_register_missing_fields() {
        let app = make_test_app().await;
        let mut payload = registration("a@x.com", "R1");
        payload["roll_number"] = json!("  ");

        let (status, json) = app.call("POST", "/api/auth/register", None, Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Missing required fields (Name, Email, Password, Roll Number)");
    }

    /// Test Case: Login sets an HTTP-only session cookie that authorizes later requests
    #[tokio::test]
    #[serial]
    async fn test_login_sets_cookie_and_session_reads_it() {
        let app = make_test_app().await;
        app.seed_user("m@x.com", "M1", Role::Member).await;

        let response = app
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "M@x.com", "password": "password123" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        assert!(set_cookie.starts_with("auth-token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert!(set_cookie.contains("Path=/"));
        assert!(set_cookie.contains("Max-Age=604800"));
        assert!(!set_cookie.contains("Secure"));

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["role"], "member");
        assert!(json["data"]["expires_at"].as_str().is_some());

        let cookie = set_cookie.split(';').next().unwrap().to_string();
        let req = Request::builder()
            .uri("/api/auth/session")
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["email"], "m@x.com");
        assert_eq!(json["data"]["role"], "member");
    }

    /// Test Case: Wrong password and unknown email give the same answer
    #[tokio::test]
    #[serial]
    async fn test_login_invalid_credentials() {
        let app = make_test_app().await;
        app.seed_user("m@x.com", "M1", Role::Member).await;

        for payload in [
            json!({ "email": "m@x.com", "password": "wrong" }),
            json!({ "email": "nobody@x.com", "password": "password123" }),
        ] {
            let (status, json) = app.call("POST", "/api/auth/login", None, Some(payload)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(json["message"], "Invalid credentials");
        }
    }

    /// Test Case: Imported record without a password
    #[tokio::test]
    #[serial]
    async fn test_login_without_password_asks_for_admin() {
        let app = make_test_app().await;
        UserModel::create(
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

        let (status, json) = app
            .call(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "email": "old@x.com", "password": "anything" })),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Please contact admin to set your password.");
    }

    /// Test Case: A token signed with another secret is rejected
    #[tokio::test]
    #[serial]
    async fn test_forged_token_is_rejected() {
        let app = make_test_app().await;
        let claims = api::auth::Claims {
            sub: 1,
            email: "evil@x.com".into(),
            role: Role::Admin,
            iat: 0,
            exp: usize::MAX / 2,
        };
        let forged = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(b"not-the-server-secret"),
        )
        .unwrap();

        let (status, json) = app.call("GET", "/api/auth/session", Some(&forged), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }

    /// Test Case: Logout expires the cookie
    #[tokio::test]
    #[serial]
    async fn test_logout_clears_cookie() {
        let app = make_test_app().await;

        let response = app.send("POST", "/api/auth/logout", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.starts_with("auth-token="));
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
