use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use ceva_api::{app, ApiConfig, AppState};
use ceva_core::{Admin, Customer, Location, User, UserIdentity, Vehicle};
use ceva_db::repository::generate_id;
use ceva_db::{Database, DbConfig};

// ── Fixtures ──

struct TestApp {
    app: Router,
    db: Database,
    customer_id: String,
    admin_id: String,
    vehicle_id: String,
    location_id: String,
}

fn identity(name: &str, email: &str) -> UserIdentity {
    let now = Utc::now();
    UserIdentity {
        id: generate_id(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory database with one location, one vehicle at 150.00 per day,
/// one customer and one admin.
async fn test_app() -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let now = Utc::now();

    let location = Location {
        id: generate_id(),
        name: "Matriz".to_string(),
        address: "Av. Paulista, 1000".to_string(),
        created_at: now,
        updated_at: now,
    };
    db.locations().insert(&location).await.unwrap();

    let vehicle = Vehicle {
        id: generate_id(),
        plate: "ABC-1234".to_string(),
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: 2022,
        color: "Prata".to_string(),
        daily_rate_cents: 15_000,
        category: "sedan".to_string(),
        description: None,
        available: true,
        featured: false,
        location_id: Some(location.id.clone()),
        created_at: now,
        updated_at: now,
    };
    db.vehicles().insert(&vehicle).await.unwrap();

    let customer = User::Customer(Customer {
        identity: identity("Joana Silva", "joana@ceva.test"),
        driver_license: "04512345678".to_string(),
        tax_id: "123.456.789-09".to_string(),
    });
    db.users().insert(&customer).await.unwrap();

    let admin = User::Admin(Admin {
        identity: identity("Carlos Souza", "carlos@ceva.test"),
        role: "manager".to_string(),
    });
    db.users().insert(&admin).await.unwrap();

    let config = ApiConfig {
        environment: "test".to_string(),
        ..ApiConfig::default()
    };

    TestApp {
        app: app(AppState::new(db.clone(), config)),
        db,
        customer_id: customer.id().to_string(),
        admin_id: admin.id().to_string(),
        vehicle_id: vehicle.id,
        location_id: location.id,
    }
}

impl TestApp {
    fn booking_body(&self, pickup_at: &str, return_at: &str) -> Value {
        json!({
            "customer_id": self.customer_id,
            "vehicle_id": self.vehicle_id,
            "pickup_location_id": self.location_id,
            "return_location_id": self.location_id,
            "pickup_at": pickup_at,
            "return_at": return_at,
        })
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let res = self.app.clone().oneshot(request).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Creates a three-day booking and returns its id.
    async fn create_booking(&self) -> String {
        let body = self.booking_body("2025-03-01T10:00:00Z", "2025-03-04T10:00:00Z");
        let (status, json) = self.send("POST", "/bookings", Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_string()
    }
}

// ── Service Endpoints ──

#[tokio::test]
async fn test_banner() {
    let t = test_app().await;
    let (status, json) = t.send("GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "online");
    assert_eq!(json["message"], "Welcome to Ceva Automotives API");
}

#[tokio::test]
async fn test_health() {
    let t = test_app().await;
    let (status, json) = t.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["environment"], "test");
    assert_eq!(json["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_closed_database() {
    let t = test_app().await;
    t.db.close().await;

    let (status, json) = t.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unhealthy");
}

// ── Lifecycle ──

#[tokio::test]
async fn test_booking_lifecycle_end_to_end() {
    let t = test_app().await;

    let body = t.booking_body("2025-03-01T10:00:00Z", "2025-03-04T10:00:00Z");
    let (status, created) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["total_charge_cents"], 45_000);
    assert_eq!(created["total_charge"], 450.0);

    let id = created["id"].as_str().unwrap();

    let (status, confirmed) = t
        .send("PATCH", &format!("/bookings/{id}/confirm"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "Confirmed");

    let (status, completed) = t
        .send("PATCH", &format!("/bookings/{id}/complete"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "Completed");
    assert_eq!(completed["total_charge_cents"], 45_000);

    let (status, err) = t
        .send("PATCH", &format!("/bookings/{id}/cancel"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "INVALID_TRANSITION");
    assert_eq!(err["message"], "completed bookings may not be cancelled");
}

#[tokio::test]
async fn test_cancel_pending_then_confirm_rejected() {
    let t = test_app().await;
    let id = t.create_booking().await;

    let (status, json) = t
        .send("PATCH", &format!("/bookings/{id}/cancel"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "Cancelled");

    let (status, err) = t
        .send("PATCH", &format!("/bookings/{id}/confirm"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "only pending bookings may be confirmed");
}

#[tokio::test]
async fn test_complete_pending_rejected() {
    let t = test_app().await;
    let id = t.create_booking().await;

    let (status, err) = t
        .send("PATCH", &format!("/bookings/{id}/complete"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["message"], "only confirmed bookings may be completed");
}

#[tokio::test]
async fn test_same_day_rental_bills_one_day() {
    let t = test_app().await;

    let body = t.booking_body("2025-03-01T09:00:00Z", "2025-03-01T18:00:00Z");
    let (status, json) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["total_charge_cents"], 15_000);
}

// ── Request Errors ──

#[tokio::test]
async fn test_create_with_invalid_window() {
    let t = test_app().await;

    let body = t.booking_body("2025-03-04T10:00:00Z", "2025-03-04T10:00:00Z");
    let (status, err) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert_eq!(err["message"], "return time must be after pickup time");
}

#[tokio::test]
async fn test_create_with_unknown_vehicle() {
    let t = test_app().await;

    let mut body = t.booking_body("2025-03-01T10:00:00Z", "2025-03-04T10:00:00Z");
    body["vehicle_id"] = json!("no-such-vehicle");
    let (status, err) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["message"], "vehicle not found: no-such-vehicle");
}

#[tokio::test]
async fn test_admin_cannot_book() {
    let t = test_app().await;

    let mut body = t.booking_body("2025-03-01T10:00:00Z", "2025-03-04T10:00:00Z");
    body["customer_id"] = json!(t.admin_id);
    let (status, err) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_with_malformed_body() {
    let t = test_app().await;

    let body = json!({ "customer_id": t.customer_id, "pickup_at": "tomorrow" });
    let (status, err) = t.send("POST", "/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_booking_is_404() {
    let t = test_app().await;

    let (status, _) = t.send("GET", "/bookings/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, err) = t.send("PATCH", "/bookings/missing/confirm", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["message"], "booking not found: missing");

    let (status, _) = t
        .send("PUT", "/bookings/missing", Some(json!({ "status": "Confirmed" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t.send("DELETE", "/bookings/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Update ──

#[tokio::test]
async fn test_update_merges_fields_and_keeps_charge() {
    let t = test_app().await;
    let id = t.create_booking().await;

    let patch = json!({
        "return_at": "2025-03-10T10:00:00Z",
        "status": "Completed",
        "pickup_location_id": null,
    });
    let (status, json) = t
        .send("PUT", &format!("/bookings/{id}"), Some(patch))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["return_at"], "2025-03-10T10:00:00Z");
    assert_eq!(json["status"], "Completed");
    assert_eq!(json["pickup_location_id"], json!(t.location_id));
    assert_eq!(json["total_charge_cents"], 45_000);

    let (_, stored) = t.send("GET", &format!("/bookings/{id}"), None).await;
    assert_eq!(stored["status"], "Completed");
    assert_eq!(stored["pickup_at"], "2025-03-01T10:00:00Z");
}

// ── Queries ──

#[tokio::test]
async fn test_listing_and_counts() {
    let t = test_app().await;
    let first = t.create_booking().await;
    t.create_booking().await;

    t.send("PATCH", &format!("/bookings/{first}/confirm"), None)
        .await;

    let (status, all) = t.send("GET", "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, count) = t.send("GET", "/bookings/count", None).await;
    assert_eq!(count["count"], 2);

    let (_, pending) = t.send("GET", "/bookings/count/status/pending", None).await;
    assert_eq!(pending["count"], 1);

    let (_, confirmed) = t.send("GET", "/bookings/status/Confirmed", None).await;
    let confirmed = confirmed.as_array().unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0]["id"], json!(first));

    let (_, by_customer) = t
        .send("GET", &format!("/bookings/customer/{}", t.customer_id), None)
        .await;
    assert_eq!(by_customer.as_array().unwrap().len(), 2);

    let (_, by_vehicle) = t
        .send("GET", &format!("/bookings/vehicle/{}", t.vehicle_id), None)
        .await;
    assert_eq!(by_vehicle.as_array().unwrap().len(), 2);

    let (_, nobody) = t.send("GET", "/bookings/customer/nobody", None).await;
    assert!(nobody.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_status_filter() {
    let t = test_app().await;

    let (status, err) = t.send("GET", "/bookings/status/lost", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete() {
    let t = test_app().await;
    let id = t.create_booking().await;

    let (status, body) = t.send("DELETE", &format!("/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = t.send("GET", &format!("/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, count) = t.send("GET", "/bookings/count", None).await;
    assert_eq!(count["count"], 0);
}
