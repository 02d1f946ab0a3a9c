#[cfg(test)]
mod tests {
    use crate::helpers::{RecordingMailer, make_test_app, make_test_app_with_mailer};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;
    use serial_test::serial;

    /// Test Case: Anyone can list events; only admins can create them
    #[tokio::test]
    #[serial]
    async fn test_create_and_list_events() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;
        let member = app.token_for(Role::Member).await;

        let payload = json!({ "name": "Placement Drive", "date": "2024-08-01" });
        let (status, _) = app
            .call("POST", "/api/events", Some(&member), Some(payload.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, json) = app.call("POST", "/api/events", Some(&admin), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["name"], "Placement Drive");

        let (status, json) = app.call("GET", "/api/events", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    /// Test Case: Registering with an event name joins its roster; detail shows it
    #[tokio::test]
    #[serial]
    async fn test_event_detail_and_attendance_list() {
        let app = make_test_app().await;
        let admin = app.token_for(Role::Admin).await;

        let (_, json) = app
            .call(
                "POST",
                "/api/events",
                Some(&admin),
                Some(json!({ "name": "Hackathon", "date": "2024-09-10" })),
            )
            .await;
        let event_id = json["data"]["id"].as_i64().unwrap();

        app.call(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": "Asha",
                "email": "a@x.com",
                "password": "pw",
                "roll_number": "R1",
                "event_name": "Hackathon"
            })),
        )
        .await;

        let (status, _) = app
            .call(
                "POST",
                &format!("/api/events/{event_id}/attendance"),
                Some(&admin),
                Some(json!({ "name": "Asha", "email": "a@x.com", "roll_no": "R1" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) = app
            .call("GET", &format!("/api/events/{event_id}"), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["registrations"][0]["email"], "a@x.com");
        assert_eq!(json["data"]["attendance"][0]["present"], true);

        let (status, _) = app
            .call("DELETE", &format!("/api/events/{event_id}"), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = app
            .call("GET", &format!("/api/events/{event_id}"), Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Event not found");
    }

    /// Test Case: One failing recipient does not stop the other reminders
    #[tokio::test]
    #[serial]
    async fn test_remind_isolates_failures() {
        let app = make_test_app_with_mailer(RecordingMailer {
            fail_for: Some("b@x.com".into()),
            ..Default::default()
        })
        .await;
        let admin = app.token_for(Role::Admin).await;

        let (_, json) = app
            .call(
                "POST",
                "/api/events",
                Some(&admin),
                Some(json!({ "name": "Orientation", "date": "2024-07-01" })),
            )
            .await;
        let event_id = json["data"]["id"].as_i64().unwrap();

        for (email, roll) in [("a@x.com", "R1"), ("b@x.com", "R2"), ("c@x.com", "R3")] {
            app.call(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "name": "Student",
                    "email": email,
                    "password": "pw",
                    "roll_number": roll,
                    "event_name": "Orientation"
                })),
            )
            .await;
        }

        let (status, json) = app
            .call("POST", &format!("/api/events/{event_id}/remind"), Some(&admin), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["recipients"], 3);
        assert_eq!(json["data"]["sent"], 2);
        assert_eq!(json["data"]["failed"], 1);
        assert_eq!(json["message"], "Sent 2 reminders, 1 failed");
    }
}
