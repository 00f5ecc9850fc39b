//! Tests for the admin panel handlers.

use super::*;
use crate::domain::ports::{InMemoryParticipantRepository, ParticipantRepository};
use crate::domain::validate_new_participant;
use crate::inbound::http::admin_access::ADMIN_KEY_HEADER;
use crate::inbound::http::configure;
use crate::inbound::http::test_utils::{TEST_ADMIN_KEY, in_memory_state};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn app(
    state: web::Data<HttpState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).configure(configure)
}

async fn seed(repo: &InMemoryParticipantRepository, codigo: &str) -> Participant {
    repo.insert(&validate_new_participant("Ana", "Lopez", codigo).expect("valid"))
        .await
        .expect("seed")
}

#[rstest]
#[case(json!({ "key": TEST_ADMIN_KEY }), StatusCode::OK)]
#[case(json!({ "key": "otra" }), StatusCode::UNAUTHORIZED)]
#[case(json!({}), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn verify_checks_the_submitted_key(#[case] body: Value, #[case] expected: StatusCode) {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), expected);
    let body: Value = actix_test::read_body_json(res).await;
    if expected == StatusCode::OK {
        assert_eq!(body, json!({ "ok": true }));
    } else {
        assert_eq!(body["error"], "Clave incorrecta");
    }
}

#[rstest]
#[case::no_body(actix_test::TestRequest::post())]
#[case::plain_text(
    actix_test::TestRequest::post()
        .insert_header(("content-type", "text/plain"))
        .set_payload("clave")
)]
#[case::malformed_json(
    actix_test::TestRequest::post()
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
)]
#[actix_web::test]
async fn verify_treats_an_unreadable_body_as_a_missing_key(
    #[case] request: actix_test::TestRequest,
) {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res =
        actix_test::call_service(&app, request.uri("/api/admin/verify").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Clave incorrecta");
}

#[rstest]
#[case(None, StatusCode::UNAUTHORIZED, "No autorizado")]
#[case(Some("otra"), StatusCode::UNAUTHORIZED, "No autorizado")]
#[case(Some(TEST_ADMIN_KEY), StatusCode::NOT_FOUND, "Ruta no encontrada")]
#[actix_web::test]
async fn unknown_admin_paths_check_the_key_first(
    #[case] key: Option<&str>,
    #[case] expected: StatusCode,
    #[case] message: &str,
) {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let mut req = actix_test::TestRequest::get().uri("/api/admin/nada");
    if let Some(key) = key {
        req = req.insert_header((ADMIN_KEY_HEADER, key));
    }
    let res = actix_test::call_service(&app, req.to_request()).await;
    assert_eq!(res.status(), expected);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], message);
}

#[rstest]
#[actix_web::test]
async fn privileged_routes_reject_missing_key_without_touching_the_store() {
    let (state, repo) = in_memory_state();
    let stored = seed(&repo, "A1").await;
    let app = actix_test::init_service(app(state)).await;

    let requests = [
        actix_test::TestRequest::get().uri("/api/admin/students"),
        actix_test::TestRequest::post()
            .uri("/api/admin/students")
            .set_json(json!({ "nombre": "Beto", "apellido": "Ruiz", "codigo": "B2" })),
        actix_test::TestRequest::patch()
            .uri(&format!("/api/admin/students/{}/sellos", stored.id))
            .set_json(json!({ "sellos": 5 })),
        actix_test::TestRequest::delete().uri(&format!("/api/admin/students/{}", stored.id)),
    ];
    for req in requests {
        let res = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    let rows = repo.list_all().await.expect("list");
    assert_eq!(rows, vec![stored]);
}

#[rstest]
#[actix_web::test]
async fn create_trims_fields_and_starts_at_zero() {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(json!({ "nombre": " Ana ", "apellido": "Lopez", "codigo": " A1 " }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["student"]["nombre"], "Ana");
    assert_eq!(body["student"]["codigo"], "A1");
    assert_eq!(body["student"]["sellos"], 0);
    assert!(body["student"]["created_at"].is_string());
}

#[rstest]
#[actix_web::test]
async fn create_rejects_duplicate_codes() {
    let (state, repo) = in_memory_state();
    seed(&repo, "A1").await;
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(json!({ "nombre": "Beto", "apellido": "Ruiz", "codigo": "A1" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "El código A1 ya está registrado");
    assert_eq!(repo.list_all().await.expect("list").len(), 1);
}

#[rstest]
#[case(json!({ "nombre": "Ana", "apellido": "", "codigo": "A1" }))]
#[case(json!({ "nombre": "Ana", "codigo": "A1" }))]
#[actix_web::test]
async fn create_rejects_blank_fields(#[case] body: Value) {
    let (state, repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Nombre, apellido y código son obligatorios");
    assert!(repo.list_all().await.expect("list").is_empty());
}

#[rstest]
#[case(json!({ "sellos": 8 }))]
#[case(json!({ "sellos": -1 }))]
#[case(json!({ "sellos": "3" }))]
#[case(json!({}))]
#[actix_web::test]
async fn update_rejects_invalid_counts_and_keeps_the_row(#[case] body: Value) {
    let (state, repo) = in_memory_state();
    let stored = seed(&repo, "A1").await;
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/admin/students/{}/sellos", stored.id))
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let row = repo.find_by_id(&stored.id).await.expect("lookup");
    assert_eq!(row.map(|p| p.sellos), Some(stored.sellos));
}

#[rstest]
#[actix_web::test]
async fn update_overwrites_the_count() {
    let (state, repo) = in_memory_state();
    let stored = seed(&repo, "A1").await;
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/admin/students/{}/sellos", stored.id))
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(json!({ "sellos": 7 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["student"]["sellos"], 7);
}

#[rstest]
#[case("00000000-0000-0000-0000-000000000000")]
#[case("42")]
#[actix_web::test]
async fn update_of_unknown_participant_is_not_found(#[case] id: &str) {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::patch()
            .uri(&format!("/api/admin/students/{id}/sellos"))
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .set_json(json!({ "sellos": 3 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_is_idempotent() {
    let (state, repo) = in_memory_state();
    let stored = seed(&repo, "A1").await;
    let app = actix_test::init_service(app(state)).await;
    for _ in 0..2 {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/admin/students/{}", stored.id))
                .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, json!({ "ok": true }));
    }
    assert!(repo.list_all().await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn list_orders_by_surname_and_includes_creation_time() {
    let (state, repo) = in_memory_state();
    for (apellido, codigo) in [("Zapata", "Z1"), ("Alvarez", "A1")] {
        repo.insert(&validate_new_participant("Ana", apellido, codigo).expect("valid"))
            .await
            .expect("seed");
    }
    let app = actix_test::init_service(app(state)).await;
    let body: StudentRecordList = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .to_request(),
    )
    .await;
    let surnames: Vec<&str> = body.students.iter().map(|s| s.apellido.as_str()).collect();
    assert_eq!(surnames, vec!["Alvarez", "Zapata"]);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let (state, _repo) = in_memory_state();
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, TEST_ADMIN_KEY))
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
}
