#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use chrono::Duration;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Register, scan, scan again, next civil day
    #[tokio::test]
    #[serial]
    async fn test_end_to_end_attendance_flow() {
        let app = make_test_app().await;
        let scanner = app.token_for(Role::Member).await;

        let (status, json) = app
            .call(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "name": "Asha",
                    "email": "a@x.com",
                    "password": "pw",
                    "roll_number": "R1"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let qr = json["data"]["qr_code"].as_str().unwrap().to_string();
        let identifier = qr.rsplit('/').next().unwrap().to_string();

        let (status, json) = app
            .call(
                "POST",
                "/api/attendance/mark",
                Some(&scanner),
                Some(json!({ "identifier": identifier })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Attendance marked successfully");
        assert_eq!(json["data"]["status"], "marked");
        assert_eq!(json["data"]["civil_date"], "2024-05-01");
        assert_eq!(json["data"]["attendance"].as_array().unwrap().len(), 1);

        app.advance(Duration::hours(3));
        let (status, json) = app
            .call("POST", &format!("/api/scan/{identifier}"), Some(&scanner), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Attendance already marked for today");
        assert_eq!(json["data"]["attendance"].as_array().unwrap().len(), 1);

        app.advance(Duration::days(1));
        let (_, json) = app
            .call("POST", &format!("/api/scan/{identifier}"), Some(&scanner), None)
            .await;
        assert_eq!(json["message"], "Attendance marked successfully");
        assert_eq!(json["data"]["attendance"].as_array().unwrap().len(), 2);

        let subjects = app.mailer.wait_for(3).await;
        let confirmations = subjects
            .iter()
            .filter(|s| s.as_str() == "Thanks For Attending the Event")
            .count();
        assert_eq!(confirmations, 2);
    }

    /// Test Case: The civil day turns over at IST midnight, not UTC midnight
    #[tokio::test]
    #[serial]
    async fn test_mark_after_ist_midnight_counts_as_new_day() {
        let app = make_test_app().await;
        let scanner = app.token_for(Role::Admin).await;
        app.seed_user("s@x.com", "S1", Role::User).await;

        // Start is 10:00 IST; 14h later is 00:00 IST next day but still 18:30 UTC same day.
        let (_, first) = app
            .call("POST", "/api/scan/seedS1", Some(&scanner), None)
            .await;
        assert_eq!(first["data"]["civil_date"], "2024-05-01");

        app.advance(Duration::hours(14));
        let (_, second) = app
            .call("POST", "/api/scan/seedS1", Some(&scanner), None)
            .await;
        assert_eq!(second["message"], "Attendance marked successfully");
        assert_eq!(second["data"]["civil_date"], "2024-05-02");
    }

    /// Test Case: Unknown identifier
    #[tokio::test]
    #[serial]
    async fn test_unknown_identifier_is_not_found() {
        let app = make_test_app().await;
        let scanner = app.token_for(Role::Member).await;

        let (status, json) = app
            .call(
                "POST",
                "/api/attendance/mark",
                Some(&scanner),
                Some(json!({ "identifier": "doesnotexist" })),
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "User not found");
    }

    /// Test Case: A plain GET of the scan link never marks attendance
    #[tokio::test]
    #[serial]
    async fn test_scan_link_rejects_get() {
        let app = make_test_app().await;
        let scanner = app.token_for(Role::Member).await;
        let student = app.seed_user("s@x.com", "S1", Role::User).await;

        let response = app
            .send("GET", "/api/scan/seedS1", Some(&scanner), None)
            .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let history = db::models::attendance_entry::Model::history(app.state.db(), student.id)
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    /// Test Case: Both marking entry points require a verified member or admin session
    #[tokio::test]
    #[serial]
    async fn test_marking_requires_scanner_role() {
        let app = make_test_app().await;
        app.seed_user("s@x.com", "S1", Role::User).await;
        let student = app.login("s@x.com", "password123").await;

        let (status, _) = app.call("POST", "/api/scan/seedS1", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, json) = app
            .call("POST", "/api/scan/seedS1", Some("not.a.jwt"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Authentication required");

        let (status, json) = app
            .call(
                "POST",
                "/api/attendance/mark",
                Some(&student),
                Some(json!({ "identifier": "seedS1" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Member or admin access required");
    }

    /// Test Case: Dashboard counters
    #[tokio::test]
    #[serial]
    async fn test_today_summary() {
        let app = make_test_app().await;
        let scanner = app.token_for(Role::Admin).await;
        app.seed_user("s1@x.com", "S1", Role::User).await;
        app.seed_user("s2@x.com", "S2", Role::User).await;
        app.seed_user("s3@x.com", "S3", Role::User).await;

        app.call("POST", "/api/scan/seedS1", Some(&scanner), None).await;
        app.call("POST", "/api/scan/seedS2", Some(&scanner), None).await;

        let (status, json) = app
            .call("GET", "/api/attendance/today", Some(&scanner), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["date"], "2024-05-01");
        assert_eq!(json["data"]["total"], 4);
        assert_eq!(json["data"]["present"], 2);
        assert_eq!(json["data"]["rate"], 50.0);
    }
}
