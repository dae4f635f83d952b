// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Pet Squad

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AdminStatusResponse, AdoptionRequest, CreateAdoptionRequest, CreateCampaignRequest,
        CreateDonationRequest, CreatePetRequest, DeleteResult, Donation, DonationCampaign,
        DonationReceipt, InsertOneResult, PaymentIntentRequest, PaymentIntentResponse, Pet,
        RegisterUserRequest, RegisterUserResponse, TokenResponse, UpdateAdoptionRequest,
        UpdateCampaignRequest, UpdatePetRequest, UpdateResult, User,
    },
    state::AppState,
};

pub mod adoptions;
pub mod campaigns;
pub mod donations;
pub mod health;
pub mod payments;
pub mod pets;
pub mod tokens;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/jwt", post(tokens::issue_token))
        .route(
            "/users",
            get(users::list_users).post(users::register_user),
        )
        .route(
            "/users/admin/{email}",
            get(users::admin_status).patch(users::make_admin),
        )
        .route("/pets", get(pets::list_pets).post(pets::create_pet))
        .route("/pets/myPets", get(pets::list_my_pets))
        .route("/pets/isNotAdopted", get(pets::list_unadopted_pets))
        .route(
            "/pets/{id}",
            get(pets::get_pet)
                .patch(pets::update_pet)
                .delete(pets::delete_pet),
        )
        .route("/adoption", post(adoptions::create_adoption_request))
        .route("/adoption/request", get(adoptions::list_received_requests))
        .route("/adoption/myRequest", get(adoptions::list_my_requests))
        .route(
            "/adoption/update/{id}",
            put(adoptions::resolve_adoption_request),
        )
        .route(
            "/donationCampaign",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route(
            "/donationCampaign/myDonationCampaign",
            get(campaigns::list_my_campaigns),
        )
        .route(
            "/donationCampaign/{id}",
            get(campaigns::get_campaign).put(campaigns::update_campaign),
        )
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route("/myDonation", post(donations::record_donation))
        .route("/myDonation/{email}", get(donations::list_my_donations))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health,
        health::liveness,
        health::readiness,
        tokens::issue_token,
        users::list_users,
        users::register_user,
        users::admin_status,
        users::make_admin,
        pets::list_pets,
        pets::list_my_pets,
        pets::list_unadopted_pets,
        pets::get_pet,
        pets::create_pet,
        pets::update_pet,
        pets::delete_pet,
        adoptions::create_adoption_request,
        adoptions::list_received_requests,
        adoptions::list_my_requests,
        adoptions::resolve_adoption_request,
        campaigns::list_campaigns,
        campaigns::list_my_campaigns,
        campaigns::get_campaign,
        campaigns::create_campaign,
        campaigns::update_campaign,
        payments::create_payment_intent,
        donations::list_my_donations,
        donations::record_donation
    ),
    components(
        schemas(
            User,
            Pet,
            AdoptionRequest,
            DonationCampaign,
            Donation,
            RegisterUserRequest,
            RegisterUserResponse,
            AdminStatusResponse,
            CreatePetRequest,
            UpdatePetRequest,
            CreateAdoptionRequest,
            UpdateAdoptionRequest,
            CreateCampaignRequest,
            UpdateCampaignRequest,
            CreateDonationRequest,
            DonationReceipt,
            InsertOneResult,
            UpdateResult,
            DeleteResult,
            TokenResponse,
            PaymentIntentRequest,
            PaymentIntentResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Auth", description = "Bearer token issuing"),
        (name = "Users", description = "Registration and admin role"),
        (name = "Pets", description = "Pet catalog"),
        (name = "Adoption", description = "Adoption requests and their resolution"),
        (name = "Campaigns", description = "Donation campaigns"),
        (name = "Payments", description = "Stripe payment intents"),
        (name = "Donations", description = "Donation ledger")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::test_state;
    use crate::storage::UserRepository;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn token_for(app: &Router, email: &str) -> String {
        let (status, body) =
            send(app, json_request("POST", "/jwt", json!({ "email": email }), None)).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (state, _dir) = test_state();
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn admin_route_without_header_is_unauthorized() {
        let (state, _dir) = test_state();
        let app = router(state);

        let (status, body) = send(&app, get_request("/users", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "missing_auth_header");
    }

    #[tokio::test]
    async fn admin_route_with_plain_user_is_forbidden() {
        let (state, _dir) = test_state();
        let app = router(state);
        send(
            &app,
            json_request("POST", "/users", json!({ "email": "plain@example.com" }), None),
        )
        .await;
        let token = token_for(&app, "plain@example.com").await;

        let (status, body) = send(&app, get_request("/users", Some(&token))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error_code"], "insufficient_permissions");
    }

    #[tokio::test]
    async fn promoted_user_reports_admin() {
        let (state, _dir) = test_state();
        let app = router(state.clone());

        let (_, registered) = send(
            &app,
            json_request("POST", "/users", json!({ "email": "a@example.com" }), None),
        )
        .await;
        let user_id = registered["insertedId"].as_str().unwrap().to_string();

        // Bootstrap the first admin directly in the store.
        let users = UserRepository::new(&state.db);
        users
            .register(serde_json::from_value(json!({ "email": "boss@example.com" })).unwrap())
            .unwrap();
        let boss_id = users.find_by_email("boss@example.com").unwrap().unwrap().id;
        users.make_admin(&boss_id).unwrap();

        let boss_token = token_for(&app, "boss@example.com").await;
        let (status, result) = send(
            &app,
            json_request("PATCH", &format!("/users/admin/{user_id}"), json!({}), Some(&boss_token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["modifiedCount"], 1);

        let token = token_for(&app, "a@example.com").await;
        let (status, body) =
            send(&app, get_request("/users/admin/a@example.com", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "admin": true }));
    }

    #[tokio::test]
    async fn registering_twice_returns_existing_user() {
        let (state, _dir) = test_state();
        let app = router(state);
        let request = || json_request("POST", "/users", json!({ "email": "a@example.com" }), None);

        let (_, first) = send(&app, request()).await;
        let (status, second) = send(&app, request()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["_id"], first["insertedId"]);
        assert_eq!(second["email"], "a@example.com");
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let (state, _dir) = test_state();
        let app = router(state);

        let (status, _) = send(&app, get_request("/pets/isNotAdopted?sort=password", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, get_request("/pets/isNotAdopted?sort=date%20and%20time", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_pet_returns_null() {
        let (state, _dir) = test_state();
        let app = router(state);

        let uri = format!("/pets/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, get_request(&uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn root_banner_and_openapi_are_served() {
        let (state, _dir) = test_state();
        let app = router(state);

        let response = app.clone().oneshot(get_request("/", None)).await.unwrap();
        assert!(response.headers().contains_key("x-request-id"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Pet Squad Server is running");

        let (status, doc) = send(&app, get_request("/api-doc/openapi.json", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/adoption/update/{id}"].is_object());
    }
}
