mod common;

use std::sync::Arc;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{token_claims, RecordingNotifier, TestServer};
use staff_portal::auth::Role;

fn leave(reason: &str) -> Value {
    json!({ "reason": reason, "start_date": "2024-06-10", "end_date": "2024-06-12" })
}

#[tokio::test]
async fn added_staff_without_password_gets_temporary_one() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;

    let res = server
        .post_json("/users/admin/addStaff", Some(&admin), json!({ "name": "Jane", "email": "jane@x.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["role"], "staff");
    assert_eq!(body["data"]["notification_sent"], false);

    let temporary = body["data"]["temporary_password"].as_str().unwrap_or_default().to_string();
    assert_eq!(temporary.len(), 12);
    assert!(temporary.chars().all(|c| c.is_ascii_alphanumeric()));

    let token = server.login("/api/staff/login", "jane@x.com", &temporary).await?;
    let claims = token_claims(&token)?;
    assert_eq!(claims.role, Role::Staff);
    Ok(())
}

#[tokio::test]
async fn delivered_welcome_hides_temporary_password() -> Result<()> {
    let notifier = Arc::new(RecordingNotifier::default());
    let server = TestServer::spawn_with(|_| {}, notifier.clone()).await?;
    let admin = server.admin_token("head@x.com").await?;

    let res = server
        .post_json("/users/admin/addStaff", Some(&admin), json!({ "name": "Kwesi", "email": "kwesi@x.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["notification_sent"], true);
    assert!(body["data"].get("temporary_password").is_none());

    let sent = notifier.sent.lock().expect("notifier lock").clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "kwesi@x.com");

    server.login("/api/staff/login", "kwesi@x.com", &sent[0].password).await?;
    Ok(())
}

#[tokio::test]
async fn add_staff_validates_role_and_duplicates() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;

    let res = server
        .post_json(
            "/users/admin/addStaff",
            Some(&admin),
            json!({ "name": "X", "email": "x@x.com", "role": "janitor" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .post_json(
            "/users/admin/addStaff",
            Some(&admin),
            json!({ "name": "Deputy", "email": "deputy@x.com", "role": "admin", "password": "chosen-pass" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("temporary_password").is_none());
    server.login("/api/admin/login", "deputy@x.com", "chosen-pass").await?;

    let res = server
        .post_json("/users/admin/addStaff", Some(&admin), json!({ "name": "Again", "email": "head@x.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn admin_decides_leave_by_id_and_by_email() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;
    let staff = server.staff_token("ama@x.com").await?;

    let created: Value = server
        .post_json("/users/staff/leave", Some(&staff), leave("Wedding"))
        .await?
        .json()
        .await?;
    let id = created["data"]["id"].as_i64().unwrap_or_default();

    let res = server
        .put_json(&format!("/users/admin/leaveApplications/{}", id), &admin, json!({ "status": "approved" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"], "approved");

    // a later decision overwrites the earlier one
    let res = server
        .put_json(&format!("/users/admin/leaveApplications/{}", id), &admin, json!({ "status": "rejected" }))
        .await?;
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"], "rejected");

    let res = server
        .put_json(&format!("/users/admin/leaveApplications/{}", id), &admin, json!({ "status": "pending" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .put_json("/users/admin/leaveApplications/9999", &admin, json!({ "status": "approved" }))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .put_json("/users/admin/LeaveApplication/approve", &admin, json!({ "email": "ama@x.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let mine: Value = server.get("/users/staff/leaveResponce", &staff).await?.json().await?;
    assert_eq!(mine["data"][0]["status"], "approved");

    let res = server
        .put_json("/users/admin/LeaveApplication/reject", &admin, json!({ "email": "nobody@x.com" }))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let all: Value = server.get("/users/admin/leaveApplications", &admin).await?.json().await?;
    assert_eq!(all["data"][0]["email"], "ama@x.com");
    Ok(())
}

#[tokio::test]
async fn deleting_staff_removes_everything_they_own() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;
    let staff = server.staff_token("gone@x.com").await?;

    server.post_json("/users/staff/leave", Some(&staff), leave("One")).await?;
    server.post_json("/users/staff/leave", Some(&staff), leave("Two")).await?;
    server
        .post_json("/users/staff/submitTALMs", Some(&staff), json!({ "week": "Week 5", "topic": "Maps" }))
        .await?;

    let res = server.delete_json("/users/admin/delete", &admin, json!({ "email": "gone@x.com" })).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["deleted"]["leave_applications"], 2);
    assert_eq!(body["data"]["deleted"]["topic_logs"], 1);

    let all: Value = server.get("/users/admin/leaveApplications", &admin).await?.json().await?;
    assert_eq!(all["data"].as_array().map(Vec::len), Some(0));

    let res = server.get("/users/admin/viewTALMs", &admin).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.delete_json("/users/admin/delete", &admin, json!({ "email": "gone@x.com" })).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn staff_profiles_and_stats() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;
    let staff = server.staff_token("ama@x.com").await?;
    server.post_json("/users/staff/leave", Some(&staff), leave("Rest")).await?;

    let profiles: Value = server.get("/users/admin/staffProfiles", &admin).await?.json().await?;
    let profiles = profiles["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(profiles.len(), 2);
    assert!(profiles.iter().all(|p| p.get("password").is_none()));

    let id = profiles
        .iter()
        .find(|p| p["email"] == "ama@x.com")
        .and_then(|p| p["id"].as_i64())
        .unwrap_or_default();
    let res = server.get(&format!("/users/admin/staffProfiles/{}", id), &admin).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.get("/users/admin/staffProfiles/424242", &admin).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let stats: Value = server.get("/users/admin/stats", &admin).await?.json().await?;
    assert_eq!(stats["data"]["staff"], 1);
    assert_eq!(stats["data"]["admins"], 1);
    assert_eq!(stats["data"]["leave_pending"], 1);
    Ok(())
}

#[tokio::test]
async fn announcements_and_suggestions_flow() -> Result<()> {
    let server = TestServer::spawn().await?;
    let admin = server.admin_token("head@x.com").await?;
    let staff = server.staff_token("ama@x.com").await?;

    let res = server
        .post_json("/users/admin/announcement", Some(&admin), json!({ "title": "PTA" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .post_json(
            "/users/admin/announcement",
            Some(&admin),
            json!({ "title": "PTA", "announcement": "Meeting on Friday" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let feed: Value = server.get("/users/staff/announcements", &staff).await?.json().await?;
    assert_eq!(feed["data"]["recent"][0]["title"], "PTA");
    assert_eq!(feed["data"]["old"].as_array().map(Vec::len), Some(0));

    let admin_feed: Value = server.get("/users/admin/announcement", &admin).await?.json().await?;
    assert_eq!(admin_feed["data"]["recent"].as_array().map(Vec::len), Some(1));

    server
        .post_json("/users/staff/suggestions", Some(&staff), json!({ "suggestion": "Water dispenser" }))
        .await?;
    let suggestions: Value = server.get("/users/admin/viewSuggestions", &admin).await?.json().await?;
    assert_eq!(suggestions["data"][0]["body"], "Water dispenser");
    Ok(())
}
