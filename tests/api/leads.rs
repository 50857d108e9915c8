use sqlx::{postgres::PgRow, Row};
use std::collections::HashMap;

use crate::helpers::{valid_lead_body, TestApp};

#[tokio::test]
async fn create_lead_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_lead(valid_lead_body()).await;

    assert_eq!(201, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Roadmap email sent");
}

#[tokio::test]
async fn create_lead_persists_the_new_lead() {
    let test_app = TestApp::spawn_app().await;

    test_app.post_lead(valid_lead_body()).await;

    let (email, full_name, phone_number): (String, String, String) =
        sqlx::query("SELECT email, full_name, phone_number FROM leads;")
            .map(|row: PgRow| (row.get("email"), row.get("full_name"), row.get("phone_number")))
            .fetch_one(&test_app.db_pool)
            .await
            .expect("Query to fetch leads failed.");

    assert_eq!(email, "jane@example.com");
    assert_eq!(full_name, "Jane Doe");
    assert_eq!(phone_number, "+919876543210");
}

#[tokio::test]
async fn create_lead_stores_the_email_lowercased() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([
        ("name", "Jane Doe"),
        ("email", "JANE@Example.com"),
        ("phone", "+919876543210"),
    ]);

    let response = test_app.post_lead(body).await;

    assert_eq!(201, response.status().as_u16());

    let email: String = sqlx::query("SELECT email FROM leads;")
        .map(|row: PgRow| row.get("email"))
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to fetch leads failed.");

    assert_eq!(email, "jane@example.com");
}

#[tokio::test]
async fn create_lead_returns_400_with_an_error_per_missing_field() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(HashMap<&str, &str>, Vec<&str>)> = vec![
        (HashMap::from([]), vec!["name", "email", "phone"]),
        (
            HashMap::from([("name", "Jane Doe")]),
            vec!["email", "phone"],
        ),
        (
            HashMap::from([("email", "jane@example.com"), ("phone", "+919876543210")]),
            vec!["name"],
        ),
    ];

    for (invalid_body, missing_fields) in test_cases {
        let response = test_app.post_lead(invalid_body).await;

        assert_eq!(400, response.status().as_u16());

        let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");

        assert_eq!(body["success"], false);

        for field in missing_fields {
            assert!(
                body["errors"][field][0].is_string(),
                "Expected an error entry for missing field '{}'",
                field
            );
        }
    }
}

#[tokio::test]
async fn create_lead_returns_400_when_phone_format_is_invalid() {
    let test_app = TestApp::spawn_app().await;

    let test_cases: Vec<(&str, &str)> = vec![
        ("919876543210", "missing +91 prefix"),
        ("+91987654321", "9 digits"),
        ("+9198765432100", "11 digits"),
        ("+91abcde12345", "non-digit characters"),
    ];

    for (invalid_phone, description) in test_cases {
        let body = HashMap::from([
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("phone", invalid_phone),
        ]);

        let response = test_app.post_lead(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when phone had {}",
            description
        );

        let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");

        assert_eq!(body["success"], false);
        assert!(
            body["errors"]["phone"][0].is_string(),
            "Expected a phone error when phone had {}",
            description
        );
    }
}

#[tokio::test]
async fn create_lead_returns_400_when_name_is_too_short_after_trimming() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([
        ("name", " J "),
        ("email", "jane@example.com"),
        ("phone", "+919876543210"),
    ]);

    let response = test_app.post_lead(body).await;

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.expect("Body was not valid JSON.");

    assert!(body["errors"]["name"][0].is_string());
}

#[tokio::test]
async fn create_lead_rejects_a_duplicate_email_without_a_second_record() {
    let test_app = TestApp::spawn_app().await;

    let first_response = test_app.post_lead(valid_lead_body()).await;

    assert_eq!(201, first_response.status().as_u16());

    // Same address with different casing collides on the lowercased key
    let duplicate_body = HashMap::from([
        ("name", "Jane Again"),
        ("email", "JANE@EXAMPLE.COM"),
        ("phone", "+919876543210"),
    ]);
    let second_response = test_app.post_lead(duplicate_body).await;

    assert_eq!(400, second_response.status().as_u16());

    let body: serde_json::Value = second_response
        .json()
        .await
        .expect("Body was not valid JSON.");

    assert_eq!(body["success"], false);
    assert!(body["errors"]["email"][0]
        .as_str()
        .unwrap()
        .contains("already been registered"));

    let lead_count: i64 = sqlx::query("SELECT COUNT(*) as count FROM leads;")
        .map(|row: PgRow| row.get("count"))
        .fetch_one(&test_app.db_pool)
        .await
        .expect("Query to count leads failed.");

    assert_eq!(lead_count, 1);
}

#[tokio::test]
async fn create_lead_succeeds_even_though_no_mail_transport_is_configured() {
    // The test config carries no SMTP credentials, so the background send is
    // skipped; the submission response must not depend on it
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_lead(valid_lead_body()).await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn list_leads_returns_leads_newest_first() {
    let test_app = TestApp::spawn_app().await;

    let first = HashMap::from([
        ("name", "Jane Doe"),
        ("email", "jane@example.com"),
        ("phone", "+919876543210"),
    ]);
    let second = HashMap::from([
        ("name", "John Roe"),
        ("email", "john@example.com"),
        ("phone", "+919876543211"),
    ]);

    test_app.post_lead(first).await;
    test_app.post_lead(second).await;

    let response = test_app.get_leads().await;

    assert_eq!(200, response.status().as_u16());

    let leads: serde_json::Value = response.json().await.expect("Body was not valid JSON.");
    let leads = leads.as_array().expect("Expected a JSON array.");

    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["email"], "john@example.com");
    assert_eq!(leads[1]["email"], "jane@example.com");
}
