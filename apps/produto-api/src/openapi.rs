//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Produto API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Produto API",
        version = "0.1.0",
        description = "Product catalog with soft deactivation and PDF export by mail"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    nest(
        (path = "/api/v1/produto", api = domain_produtos::ApiDoc)
    )
)]
pub struct ApiDoc;
