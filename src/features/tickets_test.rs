use super::*;
use crate::net::transport::Method;
use crate::test_helpers::{MockTransport, signed_in_service};
use serde_json::json;

fn ticket(subject: &str, message: &str) -> NewTicket {
    NewTicket { subject: subject.to_owned(), message: message.to_owned(), category: None }
}

#[test]
fn validated_trims_and_drops_blank_category() {
    let raw = NewTicket { category: Some("  ".to_owned()), ..ticket("  Refund ", " Charged twice ") };
    let clean = raw.validated().unwrap();
    assert_eq!(clean, ticket("Refund", "Charged twice"));
}

#[test]
fn validated_reports_first_missing_field() {
    assert_eq!(ticket(" ", "").validated(), Err(ValidationError::MissingSubject));
    assert_eq!(ticket("Refund", "\n").validated(), Err(ValidationError::MissingMessage));
}

#[tokio::test]
async fn create_posts_clean_ticket_and_reads_envelope() {
    let transport = MockTransport::new();
    let service = signed_in_service(&transport);
    transport.respond(201, json!({ "message": "Created", "ticket": { "_id": "t1", "subject": "Refund" } }));

    let created = create_ticket(&service, &ticket(" Refund", "Charged twice")).await.unwrap();
    assert_eq!(created.id, "t1");
    assert_eq!(created.status, "open");

    let sent = transport.last_request();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, "https://api.test/support-tickets");
    assert_eq!(sent.body, Some(json!({ "subject": "Refund", "message": "Charged twice" })));
}

#[tokio::test]
async fn create_rejects_blank_subject_without_request() {
    let transport = MockTransport::new();
    let service = signed_in_service(&transport);
    let err = create_ticket(&service, &ticket("", "body")).await.unwrap_err();
    assert_eq!(err, AuthError::Validation(ValidationError::MissingSubject));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn list_reads_bare_array() {
    let transport = MockTransport::new();
    let service = signed_in_service(&transport);
    transport.respond(200, json!([{ "id": "t1", "subject": "Refund", "status": "resolved" }]));

    let tickets = list_tickets(&service).await.unwrap();
    assert_eq!(tickets[0].status, "resolved");
    assert_eq!(transport.last_request().method, Method::Get);
}
