use axum::Router;
use domain_produtos::{
    ExportService, GrpcIdentityLookup, PdfReportBuilder, PgProdutoRepository, ProdutoService,
    StreamMailDispatcher, handlers,
};
use std::sync::Arc;

use crate::state::AppState;

/// Catalog routes wired to PostgreSQL, the identity service and the mail stream.
pub fn router(state: &AppState) -> Router {
    let repository = PgProdutoRepository::new(state.db.clone());

    let export = ExportService::new(
        Arc::new(repository.clone()),
        Arc::new(GrpcIdentityLookup::new(state.usuario_channel.clone())),
        Arc::new(PdfReportBuilder::new(&state.config.export_dir)),
        Arc::new(StreamMailDispatcher::from_redis(state.redis.clone())),
    );

    handlers::router(ProdutoService::new(repository), export)
}
