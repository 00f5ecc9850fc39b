//! Black-box HTTP scenarios against the in-memory wiring.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use stampcard::domain::ports::ParticipantRepository;
use stampcard::inbound::http::state::HttpState;
use stampcard::inbound::http::{ADMIN_KEY_HEADER, configure, route_not_found};
use stampcard::test_support::http::in_memory_http_state;

const KEY: &str = "clave-integracion";

fn app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .configure(configure)
        .default_service(web::to(route_not_found))
}

fn create(nombre: &str, apellido: &str, codigo: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::post()
        .uri("/api/admin/students")
        .insert_header((ADMIN_KEY_HEADER, KEY))
        .set_json(json!({ "nombre": nombre, "apellido": apellido, "codigo": codigo }))
}

fn set_stamps(id: &str, sellos: Value) -> actix_test::TestRequest {
    actix_test::TestRequest::patch()
        .uri(&format!("/api/admin/students/{id}/sellos"))
        .insert_header((ADMIN_KEY_HEADER, KEY))
        .set_json(json!({ "sellos": sellos }))
}

#[actix_web::test]
async fn register_stamp_search_and_delete() {
    let (state, _repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;

    let res = actix_test::call_service(&app, create("Ana", "Lopez", "A1").to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(res).await;
    assert_eq!(created["student"]["sellos"], 0);
    let id = created["student"]["id"]
        .as_str()
        .expect("id string")
        .to_owned();

    let res = actix_test::call_service(&app, set_stamps(&id, json!(7)).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = actix_test::read_body_json(res).await;
    assert_eq!(updated["student"]["sellos"], 7);

    let found: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/students/search?q=an")
            .to_request(),
    )
    .await;
    let codes: Vec<&str> = found["students"]
        .as_array()
        .expect("students array")
        .iter()
        .filter_map(|s| s["codigo"].as_str())
        .collect();
    assert_eq!(codes, vec!["A1"]);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/admin/students/{id}"))
            .insert_header((ADMIN_KEY_HEADER, KEY))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/students/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Estudiante no encontrado");
}

#[actix_web::test]
async fn lookup_round_trips_the_created_fields() {
    let (state, _repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;

    let created: Value = actix_test::call_and_read_body_json(
        &app,
        create(" Beto ", "Ruiz", "B2").to_request(),
    )
    .await;
    let id = created["student"]["id"].as_str().expect("id string");

    let fetched: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/students/{id}"))
            .to_request(),
    )
    .await;
    let student = &fetched["student"];
    assert_eq!(student["nombre"], "Beto");
    assert_eq!(student["apellido"], "Ruiz");
    assert_eq!(student["codigo"], "B2");
    assert_eq!(student["sellos"], 0);
    assert!(student.get("created_at").is_none());
}

#[rstest]
#[case("")]
#[case("a")]
#[case("  b  ")]
#[actix_web::test]
async fn short_search_terms_are_rejected(#[case] q: &str) {
    let (state, _repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!(
                "/api/students/search?q={}",
                q.replace(' ', "%20")
            ))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "La búsqueda debe tener al menos 2 caracteres");
}

#[actix_web::test]
async fn repeated_stamp_updates_are_idempotent() {
    let (state, repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;
    let created: Value =
        actix_test::call_and_read_body_json(&app, create("Ana", "Lopez", "A1").to_request()).await;
    let id = created["student"]["id"].as_str().expect("id string");

    for _ in 0..2 {
        let res = actix_test::call_service(&app, set_stamps(id, json!(4)).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
    let rows = repo.list_all().await.expect("list");
    assert_eq!(rows[0].sellos.get(), 4);
}

#[actix_web::test]
async fn duplicate_codes_leave_a_single_row() {
    let (state, repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(&app, create("Ana", "Lopez", "A1").to_request()).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = actix_test::call_service(&app, create("Beto", "Ruiz", "A1").to_request()).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let rows = repo.list_all().await.expect("list");
    assert_eq!(rows.iter().filter(|p| p.codigo == "A1").count(), 1);
}

#[actix_web::test]
async fn a_rejected_key_opens_no_admin_route() {
    let (state, _repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/admin/verify")
            .set_json(json!({ "key": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/admin/students")
            .insert_header((ADMIN_KEY_HEADER, "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "No autorizado");
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn unmatched_routes_report_ruta_no_encontrada() {
    let (state, _repo) = in_memory_http_state(KEY);
    let app = actix_test::init_service(app(state)).await;
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/nada").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(res).await;
    assert_eq!(body["error"], "Ruta no encontrada");
}
