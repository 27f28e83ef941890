//! Reusable OpenAPI response types for the failure envelope.

use super::ErrorResponse;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation, malformed order or filter",
    content_type = "application/json",
    example = json!({
        "message": "descricao não pode ser vazio",
        "data": null
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "message": "Produto não encontrado",
        "data": null
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Not Acceptable - rejected by a business rule",
    content_type = "application/json",
    example = json!({
        "message": "Os IDs informados são diferentes",
        "data": null
    })
)]
pub struct NotAcceptableResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "message": "Erro ao exportar PDF",
        "data": null
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
