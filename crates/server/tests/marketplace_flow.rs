mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};

use support::{build_app, register, send, token};

fn pet(name: &str) -> Value {
    json!({"name": name, "type": "Dog", "size": "Medium", "age": "Adult", "getAlongWithDogs": true})
}

fn sitter_profile() -> Value {
    json!({
        "about": "Former vet tech",
        "city": "Denver",
        "state": "CO",
        "zipCode": "80202",
        "latitude": 39.7392,
        "longitude": -104.9903,
        "dailyRate": 45,
        "services": [
            {"serviceType": "Boarding", "price": 45},
            {"serviceType": "Walking", "price": 20}
        ]
    })
}

#[tokio::test]
async fn test_pets_listed_alphabetically_and_scoped() -> anyhow::Result<()> {
    let app = build_app().await?;
    let owner = token(&register(&app, "owner@example.com", "Olive").await?);
    let other = token(&register(&app, "other@example.com", "Otto").await?);

    let mut first_id = Value::Null;
    for name in ["Rufus", "Bella", "Max"] {
        let reply = send(&app, "POST", "/api/pets", Some(&owner), Some(pet(name))).await?;
        assert_eq!(reply.status, StatusCode::CREATED);
        if first_id.is_null() {
            first_id = reply.body["id"].clone();
        }
    }
    let reply = send(&app, "GET", "/api/pets", Some(&owner), None).await?;
    let names: Vec<&str> = reply.body.as_array().unwrap().iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Bella", "Max", "Rufus"]);

    let uri = format!("/api/pets/{}", first_id.as_str().unwrap());
    assert_eq!(send(&app, "GET", &uri, Some(&other), None).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &uri, Some(&other), None).await?.status, StatusCode::NOT_FOUND);

    let before = send(&app, "GET", &uri, Some(&owner), None).await?.body;
    let after = send(&app, "PUT", &uri, Some(&owner), Some(json!({}))).await?;
    assert_eq!(after.status, StatusCode::OK);
    for key in ["name", "type", "size", "age", "getAlongWithDogs", "createdAt"] {
        assert_eq!(after.body[key], before[key], "{key} changed");
    }

    let cleared = send(&app, "PUT", &uri, Some(&owner), Some(json!({"name": null}))).await?;
    assert_eq!(cleared.status, StatusCode::BAD_REQUEST);

    assert_eq!(send(&app, "DELETE", &uri, Some(&owner), None).await?.status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn test_sitter_profile_and_search() -> anyhow::Result<()> {
    let app = build_app().await?;
    let sitter = token(&register(&app, "sitter@example.com", "Sasha").await?);

    let created = send(&app, "POST", "/api/petsitters", Some(&sitter), Some(sitter_profile())).await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["services"].as_array().map(Vec::len), Some(2));
    let id = created.body["id"].as_str().unwrap_or_default().to_string();

    let dup = send(&app, "POST", "/api/petsitters", Some(&sitter), Some(sitter_profile())).await?;
    assert_eq!(dup.status, StatusCode::BAD_REQUEST);
    assert_eq!(dup.body["message"], "pet sitter profile already exists");

    let public = send(&app, "GET", &format!("/api/petsitters/{id}"), None, None).await?;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body["user"]["firstName"], "Sasha");
    assert_eq!(public.body["reviews"], json!([]));

    let mine = send(&app, "GET", "/api/petsitters/profile", Some(&sitter), None).await?;
    assert_eq!(mine.body["id"], public.body["id"]);

    let hits = send(&app, "GET", "/api/petsitters/search?location=Denver&serviceType=Walking&maxPrice=50", None, None).await?;
    assert_eq!(hits.status, StatusCode::OK);
    assert_eq!(hits.body.as_array().map(Vec::len), Some(1));
    assert!(hits.body[0].get("distanceInMiles").is_none());

    let geo = send(&app, "GET", "/api/petsitters/search?latitude=39.75&longitude=-105.0&radiusInMiles=10", None, None).await?;
    assert!(geo.body[0]["distanceInMiles"].as_f64().is_some_and(|d| d < 10.0));

    let misses = send(&app, "GET", "/api/petsitters/search?location=denver", None, None).await?;
    assert_eq!(misses.body, json!([]));
    let cheap = send(&app, "GET", "/api/petsitters/search?maxPrice=10", None, None).await?;
    assert_eq!(cheap.body, json!([]));

    let paused = send(&app, "PUT", "/api/petsitters", Some(&sitter), Some(json!({"isAvailable": false}))).await?;
    assert_eq!(paused.body["isAvailable"], false);
    assert_eq!(paused.body["city"], "Denver");
    let none = send(&app, "GET", "/api/petsitters/search", None, None).await?;
    assert_eq!(none.body, json!([]));

    assert_eq!(send(&app, "DELETE", "/api/petsitters", Some(&sitter), None).await?.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &format!("/api/petsitters/{id}"), None, None).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_booking_lifecycle_ends_in_review() -> anyhow::Result<()> {
    let app = build_app().await?;
    let sitter = token(&register(&app, "host@example.com", "Hana").await?);
    let customer = token(&register(&app, "guest@example.com", "Gio").await?);

    let profile = send(&app, "POST", "/api/petsitters", Some(&sitter), Some(sitter_profile())).await?.body;
    let sitter_id = profile["id"].clone();
    let pet_id = send(&app, "POST", "/api/pets", Some(&customer), Some(pet("Pepper"))).await?.body["id"].clone();

    let booking = send(
        &app,
        "POST",
        "/api/bookings",
        Some(&customer),
        Some(json!({
            "petSitterId": sitter_id,
            "petId": pet_id,
            "serviceType": "Boarding",
            "startDate": "2030-06-01T10:00:00Z",
            "endDate": "2030-06-03T09:00:00Z",
            "specialInstructions": "Loves tennis balls"
        })),
    )
    .await?;
    assert_eq!(booking.status, StatusCode::CREATED, "{}", booking.body);
    assert_eq!(booking.body["status"], "Pending");
    assert_eq!(booking.body["totalAmount"], 90.0);
    let uri = format!("/api/bookings/{}", booking.body["id"].as_str().unwrap_or_default());

    let listed = send(&app, "GET", "/api/bookings?page=1&perPage=10", Some(&sitter), None).await?;
    assert_eq!(listed.body["totalItems"], 1);

    let review_uri = "/api/petsitters/reviews";
    let early = send(&app, "POST", review_uri, Some(&customer), Some(json!({"bookingId": booking.body["id"], "rating": 5}))).await?;
    assert_eq!(early.status, StatusCode::BAD_REQUEST);

    let wrong_side = send(&app, "PUT", &uri, Some(&customer), Some(json!({"status": "Confirmed"}))).await?;
    assert_eq!(wrong_side.status, StatusCode::FORBIDDEN);

    for status in ["Confirmed", "InProgress", "Completed"] {
        let reply = send(&app, "PUT", &uri, Some(&sitter), Some(json!({"status": status}))).await?;
        assert_eq!(reply.status, StatusCode::OK, "{status}: {}", reply.body);
        assert_eq!(reply.body["status"], status);
    }

    let msg = send(&app, "POST", &format!("{uri}/messages"), Some(&customer), Some(json!({"message": "Thanks!"}))).await?;
    assert_eq!(msg.status, StatusCode::CREATED);
    let thread = send(&app, "GET", &format!("{uri}/messages"), Some(&sitter), None).await?;
    assert_eq!(thread.body[0]["message"], "Thanks!");

    let review = send(&app, "POST", review_uri, Some(&customer), Some(json!({"bookingId": booking.body["id"], "rating": 4, "comment": "Great"}))).await?;
    assert_eq!(review.status, StatusCode::CREATED, "{}", review.body);
    let again = send(&app, "POST", review_uri, Some(&customer), Some(json!({"bookingId": booking.body["id"], "rating": 5}))).await?;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let sid = sitter_id.as_str().unwrap_or_default();
    let rated = send(&app, "GET", &format!("/api/petsitters/{sid}"), None, None).await?.body;
    assert_eq!(rated["averageRating"], 4.0);
    assert_eq!(rated["totalReviews"], 1);
    let reviews = send(&app, "GET", &format!("/api/petsitters/{sid}/reviews"), None, None).await?.body;
    assert_eq!(reviews[0]["reviewer"]["firstName"], "Gio");

    assert_eq!(send(&app, "DELETE", &uri, Some(&customer), None).await?.status, StatusCode::BAD_REQUEST);
    let pet_uri = format!("/api/pets/{}", pet_id.as_str().unwrap_or_default());
    let booked = send(&app, "DELETE", &pet_uri, Some(&customer), None).await?;
    assert_eq!(booked.status, StatusCode::BAD_REQUEST);
    assert_eq!(booked.body["message"], "pet has bookings and cannot be deleted");
    Ok(())
}

#[tokio::test]
async fn test_account_settings_and_profile() -> anyhow::Result<()> {
    let app = build_app().await?;
    let me = token(&register(&app, "me@example.com", "Mia").await?);
    register(&app, "taken@example.com", "Tak").await?;

    let settings = send(&app, "GET", "/api/notifications/settings", Some(&me), None).await?;
    assert_eq!(settings.status, StatusCode::OK);
    let changed = send(&app, "PUT", "/api/notifications/settings", Some(&me), Some(json!({"marketingEmails": false}))).await?;
    assert_eq!(changed.body["marketingEmails"], false);
    assert_eq!(changed.body["newMessages"], settings.body["newMessages"]);
    let nulled = send(&app, "PUT", "/api/notifications/settings", Some(&me), Some(json!({"quietHours": null}))).await?;
    assert_eq!(nulled.status, StatusCode::BAD_REQUEST);

    let profile = send(&app, "PUT", "/api/users/profile", Some(&me), Some(json!({"lastName": "Lopez", "zipCode": null}))).await?;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.body["lastName"], "Lopez");
    assert_eq!(profile.body["zipCode"], Value::Null);
    assert_eq!(profile.body["firstName"], "Mia");

    let taken = send(&app, "PUT", "/api/users/profile", Some(&me), Some(json!({"email": "taken@example.com"}))).await?;
    assert_eq!(taken.status, StatusCode::BAD_REQUEST);
    assert_eq!(taken.body["message"], "email already in use");
    Ok(())
}
