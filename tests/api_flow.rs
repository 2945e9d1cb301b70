//! End-to-end flows through `ClinicClient` against a live server on an
//! ephemeral port.

use std::sync::Arc;

use clinicbook::api::{serve_on, AppState};
use clinicbook::auth::AdminAuth;
use clinicbook::client::{ClientError, ClinicClient};
use clinicbook::config::ApiConfig;
use clinicbook::storage::{
    seed_gallery, AppointmentStatus, ClinicStore, ImageCategory, NewAppointment,
};
use tokio::net::TcpListener;

const ADMIN: &str = "admin";
const PASSWORD: &str = "s3cret-pass";

/// Start a server over an in-memory store and return its base URL
async fn start_server(seed: bool) -> String {
    let store = Arc::new(ClinicStore::in_memory().unwrap());
    if seed {
        seed_gallery(&store).unwrap();
    }

    let auth = Arc::new(AdminAuth::new(Arc::clone(&store), chrono::Duration::hours(1)));
    auth.bootstrap(ADMIN, Some(PASSWORD)).unwrap();

    let state = AppState::new(store, auth, ApiConfig::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        serve_on(listener, state).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn admin_client(base_url: &str) -> ClinicClient {
    let mut client = ClinicClient::new(base_url).unwrap();
    client.login(ADMIN, PASSWORD).await.unwrap();
    client
}

#[tokio::test]
async fn test_booking_and_review_flow() {
    let base_url = start_server(false).await;
    let public = ClinicClient::new(&base_url).unwrap();
    let admin = admin_client(&base_url).await;

    let first = public
        .create_appointment(
            NewAppointment::new("Asha", "9876543210", "2024-06-01", "Dental Cleaning")
                .time("10:00 AM"),
        )
        .await
        .unwrap();
    let second = public
        .create_appointment(NewAppointment::new("Ravi", "9123456780", "2024-06-02", "Root Canal"))
        .await
        .unwrap();

    assert_eq!(first.status, AppointmentStatus::Pending);
    assert_eq!(first.time.as_deref(), Some("10:00 AM"));
    assert!(second.time.is_none());
    assert_ne!(first.id, second.id);

    let listed = admin.list_appointments().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

    let confirmed = admin
        .update_appointment_status(&first.id, AppointmentStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);
    assert_eq!(confirmed.name, "Asha");

    // Any transition is allowed, including back to pending
    let reverted = admin
        .update_appointment_status(&first.id, AppointmentStatus::Pending)
        .await
        .unwrap();
    assert_eq!(reverted.status, AppointmentStatus::Pending);

    let listed = admin.list_appointments().await.unwrap();
    assert_eq!(listed[0].status, AppointmentStatus::Pending);
    assert_eq!(listed[1].status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn test_booking_validation_and_missing_ids() {
    let base_url = start_server(false).await;
    let public = ClinicClient::new(&base_url).unwrap();
    let admin = admin_client(&base_url).await;

    let err = public
        .create_appointment(NewAppointment::new("  ", "9876543210", "2024-06-01", "Cleaning"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let err = admin
        .update_appointment_status("missing", AppointmentStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    assert!(admin.list_appointments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let base_url = start_server(false).await;
    let anonymous = ClinicClient::new(&base_url).unwrap();

    assert!(matches!(
        anonymous.list_appointments().await.unwrap_err(),
        ClientError::Unauthorized(_)
    ));
    assert!(matches!(
        anonymous
            .create_gallery_image("https://example.com/a.jpg", "A", None)
            .await
            .unwrap_err(),
        ClientError::Unauthorized(_)
    ));

    let forged = ClinicClient::new(&base_url).unwrap().with_token("not-a-token");
    assert!(matches!(
        forged.list_appointments().await.unwrap_err(),
        ClientError::Unauthorized(_)
    ));

    let mut wrong = ClinicClient::new(&base_url).unwrap();
    assert!(matches!(
        wrong.login(ADMIN, "wrong").await.unwrap_err(),
        ClientError::Unauthorized(_)
    ));
    assert!(wrong.token().is_none());
}

#[tokio::test]
async fn test_gallery_lifecycle() {
    let base_url = start_server(true).await;
    let public = ClinicClient::new(&base_url).unwrap();
    let admin = admin_client(&base_url).await;

    let seeded = public.list_gallery_images().await.unwrap();
    assert_eq!(seeded.len(), 6);

    let added = admin
        .create_gallery_image("https://example.com/chair.jpg", "New Chair", None)
        .await
        .unwrap();
    assert_eq!(added.category, ImageCategory::Clinic);

    let team = admin
        .create_gallery_image(
            "https://example.com/team.jpg",
            "Our Team",
            Some(ImageCategory::Team),
        )
        .await
        .unwrap();
    assert_eq!(team.category, ImageCategory::Team);

    let images = public.list_gallery_images().await.unwrap();
    assert_eq!(images.len(), 8);
    assert_eq!(images[6].id, added.id);
    assert_eq!(images[7].id, team.id);

    admin.delete_gallery_image(&added.id).await.unwrap();
    let images = public.list_gallery_images().await.unwrap();
    assert_eq!(images.len(), 7);
    assert!(images.iter().all(|image| image.id != added.id));

    let err = admin.delete_gallery_image(&added.id).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));

    let err = admin
        .create_gallery_image("", "No URL", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn test_logout_and_change_password() {
    let base_url = start_server(false).await;
    let mut admin = admin_client(&base_url).await;
    let token = admin.token().unwrap().to_string();

    let err = admin
        .change_password("wrong", "another-pass")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let response = admin
        .change_password(PASSWORD, "another-pass")
        .await
        .unwrap();
    assert!(response.success);

    admin.logout().await.unwrap();
    assert!(admin.token().is_none());

    let revoked = ClinicClient::new(&base_url).unwrap().with_token(token);
    assert!(matches!(
        revoked.list_appointments().await.unwrap_err(),
        ClientError::Unauthorized(_)
    ));

    let mut fresh = ClinicClient::new(&base_url).unwrap();
    assert!(fresh.login(ADMIN, PASSWORD).await.is_err());
    fresh.login(ADMIN, "another-pass").await.unwrap();
    assert!(fresh.list_appointments().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_health_and_banner() {
    let base_url = start_server(true).await;
    let client = ClinicClient::new(&base_url).unwrap();

    let banner = client.root().await.unwrap();
    assert_eq!(banner.status, "active");

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.gallery_images, 6);
    assert_eq!(health.appointments, 0);
}
