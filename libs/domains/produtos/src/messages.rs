//! User-facing messages and the success envelopes built from them.

use axum::{Json, http::StatusCode};
use axum_helpers::ApiResponse;
use strum::{AsRefStr, Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, IntoStaticStr)]
pub enum Message {
    #[strum(serialize = "Salvo com sucesso")]
    SalvoSucesso,
    #[strum(serialize = "Atualizado com sucesso")]
    AtualizadoSucesso,
    #[strum(serialize = "Desativado com sucesso")]
    DesativadoSucesso,
    #[strum(serialize = "Iniciada a geração do PDF")]
    IniciadaGeracaoPdf,

    #[strum(serialize = "Os IDs informados são diferentes")]
    IdsDiferentes,
    #[strum(serialize = "Impossível alterar")]
    ImpossivelAlterar,
    #[strum(serialize = "Filter inválido")]
    FilterInvalido,
    #[strum(serialize = "Order inválido")]
    OrderInvalido,
    #[strum(serialize = "Produto não encontrado")]
    ProdutoNaoEncontrado,
    #[strum(serialize = "Usuário não identificado")]
    UsuarioNaoIdentificado,
    #[strum(serialize = "Erro ao conectar ao gRPC - APIUsuario")]
    ErroConexaoUsuario,
    #[strum(serialize = "Erro ao exportar PDF")]
    ErroExportarPdf,
}

impl From<Message> for String {
    fn from(message: Message) -> Self {
        message.to_string()
    }
}

/// 201 with `Salvo com sucesso`.
pub fn created<T>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(data, Message::SalvoSucesso)),
    )
}

pub fn updated<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data, Message::AtualizadoSucesso))
}

pub fn unactivated<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data, Message::DesativadoSucesso))
}
