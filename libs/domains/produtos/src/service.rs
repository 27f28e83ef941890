use axum_helpers::errors::validation_message;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProdutoError, ProdutoResult};
use crate::models::{CreateProduto, FindAllFilter, FindAllOrder, Produto, UpdateProduto};
use crate::repository::ProdutoRepository;

/// Service layer for Produto business logic
#[derive(Clone)]
pub struct ProdutoService<R: ProdutoRepository> {
    repository: Arc<R>,
}

impl<R: ProdutoRepository> ProdutoService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(descricao = %input.descricao))]
    pub async fn create(&self, input: CreateProduto) -> ProdutoResult<Produto> {
        input
            .validate()
            .map_err(|e| ProdutoError::Validation(validation_message(&e)))?;

        self.repository.create(input).await
    }

    /// Reads page `page` (zero-based) and the total number of matches.
    #[instrument(skip(self, filter))]
    pub async fn find_all(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<(Vec<Produto>, u64)> {
        if size == 0 {
            return Err(ProdutoError::Validation("size não é válido".to_string()));
        }

        self.repository
            .find_and_count(page, size, order, filter)
            .await
    }

    #[instrument(skip(self), fields(produto_id = id))]
    pub async fn find_one(&self, id: i32) -> ProdutoResult<Produto> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProdutoError::NotFound(id))
    }

    /// Full replace. The body id must match the path id.
    #[instrument(skip(self, input), fields(produto_id = id))]
    pub async fn update(&self, id: i32, input: UpdateProduto) -> ProdutoResult<Produto> {
        input
            .validate()
            .map_err(|e| ProdutoError::Validation(validation_message(&e)))?;

        if input.id != Some(id) {
            return Err(ProdutoError::IdsMismatch {
                path: id,
                body: input.id,
            });
        }

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ProdutoError::NotModifiable(id));
        }

        self.repository.save(input.into_produto(id)).await
    }

    /// Soft delete. Returns the stored `ativo`, always `false`.
    #[instrument(skip(self), fields(produto_id = id))]
    pub async fn unactivate(&self, id: i32) -> ProdutoResult<bool> {
        let mut produto = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProdutoError::NotModifiable(id))?;

        produto.ativo = false;
        let saved = self.repository.save(produto).await?;

        tracing::info!("Produto deactivated");
        Ok(saved.ativo)
    }
}
