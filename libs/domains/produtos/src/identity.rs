//! Lookup of the requesting user in the Usuario service.

use async_trait::async_trait;
use rpc::usuario::{FindOneRequest, usuario_service_client::UsuarioServiceClient};
use tonic::transport::Channel;

use crate::error::{ProdutoError, ProdutoResult};
use crate::models::Usuario;

/// Resolves a user id to name and email.
///
/// An unknown user comes back as `Usuario { id: 0, .. }`; callers decide
/// whether that is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn find_one(&self, id: i32) -> ProdutoResult<Usuario>;
}

/// `usuario.UsuarioService/FindOne` over a shared tonic channel.
#[derive(Clone)]
pub struct GrpcIdentityLookup {
    client: UsuarioServiceClient<Channel>,
}

impl GrpcIdentityLookup {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: UsuarioServiceClient::new(channel),
        }
    }
}

impl From<rpc::usuario::Usuario> for Usuario {
    fn from(usuario: rpc::usuario::Usuario) -> Self {
        Self {
            id: usuario.id,
            nome: usuario.nome,
            email: usuario.email,
        }
    }
}

#[async_trait]
impl IdentityLookup for GrpcIdentityLookup {
    #[tracing::instrument(skip(self), fields(id_usuario = id))]
    async fn find_one(&self, id: i32) -> ProdutoResult<Usuario> {
        // Clones share the underlying channel.
        let mut client = self.client.clone();

        let response = client
            .find_one(FindOneRequest { id })
            .await
            .map_err(|status| {
                tracing::warn!(code = ?status.code(), "FindOne failed");
                ProdutoError::IdentityUnavailable(status.message().to_string())
            })?;

        Ok(response
            .into_inner()
            .usuario
            .map(Usuario::from)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::transport::Endpoint;

    #[test]
    fn test_usuario_from_rpc_message() {
        let usuario = Usuario::from(rpc::usuario::Usuario {
            id: 3,
            nome: "Ana".into(),
            email: "ana@example.com".into(),
        });
        assert_eq!(usuario.id, 3);
        assert_eq!(usuario.email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Port 1 is never served; the lazy channel fails on first use.
        let channel = Endpoint::from_static("http://127.0.0.1:1")
            .connect_timeout(std::time::Duration::from_secs(1))
            .connect_lazy();
        let lookup = GrpcIdentityLookup::new(channel);

        let result = lookup.find_one(1).await;
        assert!(matches!(result, Err(ProdutoError::IdentityUnavailable(_))));
    }
}
