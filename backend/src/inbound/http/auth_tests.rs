//! Tests for the session cookie extractors.

use actix_web::http::StatusCode;
use actix_web::{get, test, web, App, HttpResponse};
use rstest::rstest;
use serde_json::Value;

use super::{ChairSession, OwnerSession, RiderSession};
use crate::domain::PrincipalKind;
use crate::inbound::http::test_utils::{
    session_cookie, Fixture, CHAIR_TOKEN, OWNER_TOKEN, RIDER_TOKEN,
};
use crate::inbound::http::ApiResult;

#[get("/rider")]
async fn whoami_rider(session: RiderSession) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().body(session.into_inner().username))
}

#[get("/chair")]
async fn whoami_chair(session: ChairSession) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().body(session.into_inner().name))
}

#[get("/owner")]
async fn whoami_owner(session: OwnerSession) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().body(session.into_inner().name))
}

#[rstest]
#[case::rider("/rider", PrincipalKind::Rider, RIDER_TOKEN, "hanako")]
#[case::chair("/chair", PrincipalKind::Chair, CHAIR_TOKEN, "chair-1")]
#[case::owner("/owner", PrincipalKind::Owner, OWNER_TOKEN, "owner-1")]
#[actix_web::test]
async fn session_cookie_resolves_principal(
    #[case] path: &str,
    #[case] kind: PrincipalKind,
    #[case] token: &str,
    #[case] expected: &str,
) {
    let fixture = Fixture::new().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.state.clone()))
            .service(whoami_rider)
            .service(whoami_chair)
            .service(whoami_owner),
    )
    .await;

    let request = test::TestRequest::get()
        .uri(path)
        .cookie(session_cookie(kind, token))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = test::read_body(response).await;
    assert_eq!(body.as_ref(), expected.as_bytes());
}

#[rstest]
#[case::rider("/rider", "app_session cookie is required")]
#[case::chair("/chair", "chair_session cookie is required")]
#[case::owner("/owner", "owner_session cookie is required")]
#[actix_web::test]
async fn missing_cookie_names_the_expected_cookie(#[case] path: &str, #[case] message: &str) {
    let fixture = Fixture::new().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.state.clone()))
            .service(whoami_rider)
            .service(whoami_chair)
            .service(whoami_owner),
    )
    .await;

    let response = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], message);
}

#[actix_web::test]
async fn token_of_another_kind_is_rejected() {
    let fixture = Fixture::new().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.state.clone()))
            .service(whoami_chair),
    )
    .await;

    // A rider token presented in the chair cookie.
    let request = test::TestRequest::get()
        .uri("/chair")
        .cookie(session_cookie(PrincipalKind::Chair, RIDER_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "invalid access token");
}

#[actix_web::test]
async fn empty_cookie_counts_as_missing() {
    let fixture = Fixture::new().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.state.clone()))
            .service(whoami_chair),
    )
    .await;

    let request = test::TestRequest::get()
        .uri("/chair")
        .cookie(session_cookie(PrincipalKind::Chair, ""))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn chair_lookups_are_served_from_the_cache_after_first_use() {
    let fixture = Fixture::new().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.state.clone()))
            .service(whoami_chair)
            .service(whoami_owner),
    )
    .await;

    for _ in 0..2 {
        let request = test::TestRequest::get()
            .uri("/chair")
            .cookie(session_cookie(PrincipalKind::Chair, CHAIR_TOKEN))
            .to_request();
        assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);
    }
    let request = test::TestRequest::get()
        .uri("/owner")
        .cookie(session_cookie(PrincipalKind::Owner, OWNER_TOKEN))
        .to_request();
    assert_eq!(test::call_service(&app, request).await.status(), StatusCode::OK);

    assert_eq!(fixture.cache.len(), 1);
}

#[actix_web::test]
async fn missing_state_is_an_internal_error() {
    let app = test::init_service(App::new().service(whoami_chair)).await;

    let request = test::TestRequest::get()
        .uri("/chair")
        .cookie(session_cookie(PrincipalKind::Chair, CHAIR_TOKEN))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
