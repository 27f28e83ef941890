use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProdutoResult;
use crate::models::{
    CreateProduto, FindAllFilter, FindAllOrder, Produto, ProdutoColumn, ProdutoResumo,
    SortDirection,
};

/// Repository trait for Produto persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProdutoRepository: Send + Sync {
    /// Insert a new product; the store assigns the id
    async fn create(&self, input: CreateProduto) -> ProdutoResult<Produto>;

    async fn find_by_id(&self, id: i32) -> ProdutoResult<Option<Produto>>;

    /// One page of full records plus the total number of matching records
    async fn find_and_count(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<(Vec<Produto>, u64)>;

    /// One page of the export projection
    async fn find_page(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<Vec<ProdutoResumo>>;

    /// Replace every mutable column of an existing record
    async fn save(&self, produto: Produto) -> ProdutoResult<Produto>;
}

/// In-memory implementation of ProdutoRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryProdutoRepository {
    produtos: Arc<RwLock<HashMap<i32, Produto>>>,
    next_id: Arc<RwLock<i32>>,
}

impl Default for InMemoryProdutoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryProdutoRepository {
    pub fn new() -> Self {
        Self {
            produtos: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(RwLock::new(1)),
        }
    }

    async fn select(&self, order: FindAllOrder, filter: &FindAllFilter) -> Vec<Produto> {
        let produtos = self.produtos.read().await;
        let mut selected: Vec<Produto> = produtos
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        selected.sort_by(|a, b| compare(order, a, b));
        selected
    }
}

fn compare(order: FindAllOrder, a: &Produto, b: &Produto) -> Ordering {
    let by_column = match order.column {
        ProdutoColumn::Id => a.id.cmp(&b.id),
        ProdutoColumn::Descricao => a.descricao.cmp(&b.descricao),
        ProdutoColumn::PrecoCusto => a.preco_custo.cmp(&b.preco_custo),
        ProdutoColumn::PrecoVenda => a.preco_venda.cmp(&b.preco_venda),
        ProdutoColumn::Ativo => a.ativo.cmp(&b.ativo),
    };
    let by_column = match order.sort {
        SortDirection::Asc => by_column,
        SortDirection::Desc => by_column.reverse(),
    };
    // Ties fall back to id so pages never overlap.
    by_column.then(a.id.cmp(&b.id))
}

fn page_of<T>(rows: Vec<T>, page: u64, size: u64) -> Vec<T> {
    let skip = usize::try_from(page.saturating_mul(size)).unwrap_or(usize::MAX);
    let take = usize::try_from(size).unwrap_or(usize::MAX);
    rows.into_iter().skip(skip).take(take).collect()
}

#[async_trait]
impl ProdutoRepository for InMemoryProdutoRepository {
    async fn create(&self, input: CreateProduto) -> ProdutoResult<Produto> {
        let id = {
            let mut next_id = self.next_id.write().await;
            let id = *next_id;
            *next_id += 1;
            id
        };

        let produto = Produto {
            id,
            descricao: input.descricao,
            preco_custo: input.preco_custo,
            preco_venda: input.preco_venda,
            imagem: input.imagem,
            ativo: input.ativo,
            codigo_barras: input.codigo_barras,
        };
        self.produtos.write().await.insert(id, produto.clone());

        tracing::info!(produto_id = id, "Created produto");
        Ok(produto)
    }

    async fn find_by_id(&self, id: i32) -> ProdutoResult<Option<Produto>> {
        let produtos = self.produtos.read().await;
        Ok(produtos.get(&id).cloned())
    }

    async fn find_and_count(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<(Vec<Produto>, u64)> {
        let selected = self.select(order, &filter).await;
        let count = selected.len() as u64;
        Ok((page_of(selected, page, size), count))
    }

    async fn find_page(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<Vec<ProdutoResumo>> {
        let selected = self.select(order, &filter).await;
        Ok(page_of(selected, page, size)
            .iter()
            .map(Produto::resumo)
            .collect())
    }

    async fn save(&self, produto: Produto) -> ProdutoResult<Produto> {
        self.produtos
            .write()
            .await
            .insert(produto.id, produto.clone());

        tracing::info!(produto_id = produto.id, "Saved produto");
        Ok(produto)
    }
}
