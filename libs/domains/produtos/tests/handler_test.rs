//! Handler tests for the Produtos domain
//!
//! These drive `handlers::router` directly over the in-memory repository:
//! - request deserialization and validation
//! - the `{message, data, count?}` envelope
//! - HTTP status codes and failure messages

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use domain_produtos::*;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn default_app(test_name: &str) -> Router {
    app(
        InMemoryProdutoRepository::new(),
        FakeIdentity::with(ana()),
        RecordingMail::default(),
        test_name,
    )
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn leite() -> Value {
    json!({
        "descricao": "Leite Integral",
        "precoCusto": "5.250",
        "precoVenda": "7.490",
        "codigoBarras": [7891000100066u64]
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

fn list_uri(page: u64, size: u64, order: &str, filter: Option<&str>) -> String {
    let mut uri = format!("/{}/{}/{}", page, size, urlencoding::encode(order));
    if let Some(filter) = filter {
        uri.push_str(&format!("?filter={}", urlencoding::encode(filter)));
    }
    uri
}

#[tokio::test]
async fn test_create_returns_201_with_saved_message() {
    let app = default_app("create_201");

    let body = create(&app, leite()).await;

    assert_eq!(body["message"], "Salvo com sucesso");
    assert!(body["data"]["id"].as_i64().is_some());
    assert_eq!(body["data"]["descricao"], "Leite Integral");
    assert_eq!(body["data"]["precoCusto"], "5.250");
    assert_eq!(body["data"]["precoVenda"], "7.490");
    assert_eq!(body["data"]["ativo"], true);
    assert_eq!(body["data"]["codigoBarras"], json!(["7891000100066"]));
}

#[tokio::test]
async fn test_create_rejects_price_beyond_storage_precision() {
    let app = default_app("create_precision");

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({
                "descricao": "Leite",
                "precoCusto": "99999999999999.12345",
                "precoVenda": "1.50"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "precoCusto não é válido");
}

#[tokio::test]
async fn test_create_missing_price_is_bad_request() {
    let app = default_app("create_missing_field");

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({"descricao": "Leite", "precoVenda": 1}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "precoCusto não pode ser vazio");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_create_rejects_empty_descricao() {
    let app = default_app("create_invalid");

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({"descricao": "", "precoCusto": 1, "precoVenda": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "descricao não pode ser vazio");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_get_by_id_and_missing_id() {
    let app = default_app("get_by_id");
    let created = create(&app, leite()).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], Value::Null);
    assert_eq!(body["data"], created["data"]);

    let response = app
        .oneshot(empty_request("GET", "/999"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Produto não encontrado");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = default_app("bad_id");

    let response = app
        .oneshot(empty_request("GET", "/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_update_with_different_ids_is_not_acceptable() {
    let app = default_app("update_ids");
    create(&app, leite()).await;

    let mut body = leite();
    body["id"] = json!(2);
    let response = app
        .oneshot(json_request("PATCH", "/1", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Os IDs informados são diferentes");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_record_is_not_acceptable() {
    let app = default_app("update_missing");

    let mut body = leite();
    body["id"] = json!(77);
    let response = app
        .oneshot(json_request("PATCH", "/77", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Impossível alterar");
}

#[tokio::test]
async fn test_update_replaces_and_clears_omitted_fields() {
    let app = default_app("update_ok");
    let created = create(&app, leite()).await;
    let id = created["data"]["id"].clone();

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", id),
            json!({
                "id": id,
                "descricao": "Leite Desnatado",
                "precoCusto": "4.100",
                "precoVenda": "5.330"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Atualizado com sucesso");
    assert_eq!(body["data"]["descricao"], "Leite Desnatado");
    assert_eq!(body["data"]["precoVenda"], "5.330");
    assert_eq!(body["data"]["codigoBarras"], Value::Null);
}

#[tokio::test]
async fn test_delete_deactivates_and_is_repeatable() {
    let app = default_app("delete");
    let created = create(&app, leite()).await;
    let uri = format!("/{}", created["data"]["id"]);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Desativado com sucesso");
        assert_eq!(body["data"], false);
    }

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["ativo"], false);
}

#[tokio::test]
async fn test_delete_missing_record_is_not_acceptable() {
    let app = default_app("delete_missing");

    let response = app
        .oneshot(empty_request("DELETE", "/404"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Impossível alterar");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_listing_pages_carry_total_count() {
    let app = default_app("listing");
    for i in 0..11 {
        create(
            &app,
            json!({"descricao": format!("Produto {:02}", i), "precoCusto": i, "precoVenda": i}),
        )
        .await;
    }

    let order = r#"{"column":"id","sort":"asc"}"#;
    let mut lengths = Vec::new();
    for page in 0..3 {
        let response = app
            .clone()
            .oneshot(empty_request("GET", &list_uri(page, 5, order, None)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], Value::Null);
        assert_eq!(body["count"], 11);
        lengths.push(body["data"].as_array().unwrap().len());
    }

    assert_eq!(lengths, vec![5, 5, 1]);
}

#[tokio::test]
async fn test_listing_orders_and_filters() {
    let app = default_app("listing_filter");
    for (descricao, custo) in [("Arroz", 18), ("Café", 12), ("Sal", 2)] {
        create(
            &app,
            json!({"descricao": descricao, "precoCusto": custo, "precoVenda": custo}),
        )
        .await;
    }
    app.clone()
        .oneshot(empty_request("DELETE", "/1"))
        .await
        .unwrap();

    let uri = list_uri(
        0,
        10,
        r#"{"column":"precoCusto","sort":"DESC"}"#,
        Some(r#"[{"column":"ativo","value":true}]"#),
    );
    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 2);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["descricao"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Café", "Sal"]);
}

#[tokio::test]
async fn test_listing_rejects_malformed_order_and_filter() {
    let app = default_app("listing_invalid");

    let response = app
        .clone()
        .oneshot(empty_request("GET", &list_uri(0, 5, "{oops", None)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await["message"],
        "Order inválido"
    );

    let response = app
        .oneshot(empty_request(
            "GET",
            &list_uri(
                0,
                5,
                r#"{"column":"id","sort":"asc"}"#,
                Some(r#"{"column":"ativo","value":"sim"}"#),
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response.into_body()).await["message"],
        "Filter inválido"
    );
}

#[tokio::test]
async fn test_export_returns_started_message() {
    let mail = RecordingMail::default();
    let app = app(
        InMemoryProdutoRepository::new(),
        FakeIdentity::with(ana()),
        mail.clone(),
        "export_ok",
    );
    create(&app, leite()).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/export",
            json!({
                "idUsuario": 1,
                "order": {"column": "descricao", "sort": "asc"},
                "filter": [{"column": "ativo", "value": true}]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Iniciada a geração do PDF");
    assert_eq!(body["data"], true);

    let sent = mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "ana@example.com");
    assert_eq!(sent[0].attachments[0].filename, "relatorio-1.pdf");
}

#[tokio::test]
async fn test_export_for_unknown_user_is_not_acceptable() {
    let mail = RecordingMail::default();
    let app = app(
        InMemoryProdutoRepository::new(),
        FakeIdentity::with(ana()),
        mail.clone(),
        "export_unknown",
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/export",
            json!({"idUsuario": 99, "order": {"column": "id", "sort": "asc"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Usuário não identificado");
    assert!(mail.sent().is_empty());
}

#[tokio::test]
async fn test_export_with_identity_down_is_server_error() {
    let app = app(
        InMemoryProdutoRepository::new(),
        FakeIdentity::unreachable(),
        RecordingMail::default(),
        "export_rpc_down",
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/export",
            json!({"idUsuario": 1, "order": {"column": "id", "sort": "asc"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Erro ao conectar ao gRPC - APIUsuario");
}

#[tokio::test]
async fn test_export_requires_id_usuario() {
    let app = default_app("export_missing_user");

    let response = app
        .oneshot(json_request(
            "POST",
            "/export",
            json!({"order": {"column": "id", "sort": "asc"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "idUsuario deve ser informado");
}
