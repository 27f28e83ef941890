use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::messages::Message;

#[derive(Debug, Error)]
pub enum ProdutoError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid order")]
    InvalidOrder,

    #[error("Invalid filter")]
    InvalidFilter,

    #[error("Path id {path} differs from body id {body:?}")]
    IdsMismatch { path: i32, body: Option<i32> },

    #[error("Produto {0} cannot be modified")]
    NotModifiable(i32),

    #[error("Produto not found: {0}")]
    NotFound(i32),

    #[error("Usuario {0} could not be identified")]
    IdentityUnresolved(i32),

    #[error("Identity service unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProdutoResult<T> = Result<T, ProdutoError>;

impl From<ProdutoError> for AppError {
    fn from(err: ProdutoError) -> Self {
        match err {
            ProdutoError::Validation(msg) => AppError::BadRequest(msg),
            ProdutoError::InvalidOrder => AppError::BadRequest(Message::OrderInvalido.into()),
            ProdutoError::InvalidFilter => AppError::BadRequest(Message::FilterInvalido.into()),
            ProdutoError::IdsMismatch { .. } => {
                AppError::NotAcceptable(Message::IdsDiferentes.into())
            }
            ProdutoError::NotModifiable(_) => {
                AppError::NotAcceptable(Message::ImpossivelAlterar.into())
            }
            ProdutoError::NotFound(_) => AppError::NotFound(Message::ProdutoNaoEncontrado.into()),
            ProdutoError::IdentityUnresolved(_) => {
                AppError::NotAcceptable(Message::UsuarioNaoIdentificado.into())
            }
            ProdutoError::IdentityUnavailable(cause) => {
                AppError::internal(Message::ErroConexaoUsuario, cause)
            }
            ProdutoError::ExportFailed(cause) => AppError::internal(Message::ErroExportarPdf, cause),
            ProdutoError::Database(cause) => {
                AppError::internal("An internal server error occurred", cause)
            }
        }
    }
}

impl IntoResponse for ProdutoError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
