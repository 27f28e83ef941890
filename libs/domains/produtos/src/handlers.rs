use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::PathRejection},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, AppError, ValidatedJson,
    errors::responses::{
        BadRequestResponse, InternalServerErrorResponse, NotAcceptableResponse, NotFoundResponse,
    },
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};

use crate::error::ProdutoError;
use crate::export::ExportService;
use crate::messages::{self, Message};
use crate::models::{
    CreateProduto, ExportRequest, FilterItem, FindAllFilter, FindAllOrder, Produto,
    ProdutoColumn, SortDirection, UpdateProduto,
};
use crate::repository::ProdutoRepository;
use crate::service::ProdutoService;

const TAG: &str = "produto";

/// OpenAPI documentation for the Produto API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_produto,
        list_produtos,
        get_produto,
        update_produto,
        unactivate_produto,
        export_pdf,
    ),
    components(
        schemas(
            Produto,
            CreateProduto,
            UpdateProduto,
            ExportRequest,
            FindAllOrder,
            FilterItem,
            ProdutoColumn,
            SortDirection
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            NotAcceptableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Catalog of products and PDF export")
    )
)]
pub struct ApiDoc;

/// Shared handler state.
pub struct ProdutoState<R: ProdutoRepository> {
    pub service: ProdutoService<R>,
    pub export: ExportService,
}

/// Create the produto router with all HTTP endpoints
pub fn router<R: ProdutoRepository + 'static>(
    service: ProdutoService<R>,
    export: ExportService,
) -> Router {
    let state = Arc::new(ProdutoState { service, export });

    Router::new()
        .route("/", post(create_produto))
        .route("/export", post(export_pdf))
        .route(
            "/{id}",
            get(get_produto)
                .patch(update_produto)
                .delete(unactivate_produto),
        )
        .route("/{page}/{size}/{order}", get(list_produtos))
        .with_state(state)
}

type SharedState<R> = State<Arc<ProdutoState<R>>>;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// JSON `{column, value}` or an array of them
    #[param(example = r#"[{"column":"ativo","value":true}]"#)]
    pub filter: Option<String>,
}

/// Create a produto
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduto,
    responses(
        (status = 201, description = "Produto created", body = ApiResponse<Produto>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_produto<R: ProdutoRepository>(
    State(state): SharedState<R>,
    ValidatedJson(input): ValidatedJson<CreateProduto>,
) -> Result<impl IntoResponse, AppError> {
    let produto = state.service.create(input).await?;
    Ok(messages::created(produto))
}

/// One page of produtos plus the total count
#[utoipa::path(
    get,
    path = "/{page}/{size}/{order}",
    tag = TAG,
    params(
        ("page" = u64, Path, description = "Zero-based page index"),
        ("size" = u64, Path, description = "Page size"),
        ("order" = String, Path, description = r#"URL-encoded JSON, e.g. {"column":"descricao","sort":"asc"}"#),
        ListQuery
    ),
    responses(
        (status = 200, description = "Page of produtos", body = ApiResponse<Vec<Produto>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_produtos<R: ProdutoRepository>(
    State(state): SharedState<R>,
    path: Result<Path<(u64, u64, String)>, PathRejection>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Produto>>>, AppError> {
    let Path((page, size, order)) = path?;
    let order = FindAllOrder::parse(&order)?;
    let filter = FindAllFilter::from_query(query.filter.as_deref())?;

    let (rows, count) = state.service.find_all(page, size, order, filter).await?;
    Ok(Json(ApiResponse::listed(rows, count)))
}

/// Get a produto by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Produto id")),
    responses(
        (status = 200, description = "Produto found", body = ApiResponse<Produto>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_produto<R: ProdutoRepository>(
    State(state): SharedState<R>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<Produto>>, AppError> {
    let Path(id) = path?;
    let produto = state.service.find_one(id).await?;
    Ok(Json(ApiResponse::data(produto)))
}

/// Replace a produto
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Produto id")),
    request_body = UpdateProduto,
    responses(
        (status = 200, description = "Produto updated", body = ApiResponse<Produto>),
        (status = 400, response = BadRequestResponse),
        (status = 406, response = NotAcceptableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_produto<R: ProdutoRepository>(
    State(state): SharedState<R>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(input): ValidatedJson<UpdateProduto>,
) -> Result<Json<ApiResponse<Produto>>, AppError> {
    let Path(id) = path?;
    let produto = state.service.update(id, input).await?;
    Ok(messages::updated(produto))
}

/// Deactivate a produto
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = i32, Path, description = "Produto id")),
    responses(
        (status = 200, description = "Produto deactivated; data is the stored ativo", body = ApiResponse<bool>),
        (status = 400, response = BadRequestResponse),
        (status = 406, response = NotAcceptableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn unactivate_produto<R: ProdutoRepository>(
    State(state): SharedState<R>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<ApiResponse<bool>>, AppError> {
    let Path(id) = path?;
    let ativo = state.service.unactivate(id).await?;
    Ok(messages::unactivated(ativo))
}

/// Generate the catalog PDF and mail it to the user
#[utoipa::path(
    post,
    path = "/export",
    tag = TAG,
    request_body = ExportRequest,
    responses(
        (status = 200, description = "Report queued for mailing", body = ApiResponse<bool>),
        (status = 400, response = BadRequestResponse),
        (status = 406, response = NotAcceptableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn export_pdf<R: ProdutoRepository>(
    State(state): SharedState<R>,
    ValidatedJson(input): ValidatedJson<ExportRequest>,
) -> Result<Json<ApiResponse<bool>>, AppError> {
    let id_usuario = input
        .id_usuario
        .ok_or_else(|| ProdutoError::Validation("idUsuario deve ser informado".to_string()))?;
    let order = input
        .order
        .ok_or_else(|| ProdutoError::Validation("order deve ser informado".to_string()))?;

    let order = FindAllOrder::from_value(order)?;
    let filter = match &input.filter {
        Some(filter) => FindAllFilter::from_value(filter)?,
        None => FindAllFilter::default(),
    };

    let started = state.export.export_pdf(id_usuario, order, filter).await?;
    Ok(Json(ApiResponse::success(started, Message::IniciadaGeracaoPdf)))
}
