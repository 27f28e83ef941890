use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    entity,
    error::{ProdutoError, ProdutoResult},
    models::{
        CreateProduto, FilterCondition, FindAllFilter, FindAllOrder, Produto, ProdutoColumn,
        ProdutoResumo, SortDirection,
    },
    repository::ProdutoRepository,
};

#[derive(Clone)]
pub struct PgProdutoRepository {
    db: DatabaseConnection,
}

impl PgProdutoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(e: sea_orm::DbErr) -> ProdutoError {
    ProdutoError::Database(format!("Database error: {}", e))
}

fn column_of(column: ProdutoColumn) -> entity::Column {
    match column {
        ProdutoColumn::Id => entity::Column::Id,
        ProdutoColumn::Descricao => entity::Column::Descricao,
        ProdutoColumn::PrecoCusto => entity::Column::PrecoCusto,
        ProdutoColumn::PrecoVenda => entity::Column::PrecoVenda,
        ProdutoColumn::Ativo => entity::Column::Ativo,
    }
}

fn filtered(query: Select<entity::Entity>, filter: &FindAllFilter) -> Select<entity::Entity> {
    filter
        .conditions()
        .iter()
        .fold(query, |query, condition| match condition {
            FilterCondition::Id(id) => query.filter(entity::Column::Id.eq(*id)),
            FilterCondition::Descricao(text) => {
                query.filter(entity::Column::Descricao.eq(text.as_str()))
            }
            FilterCondition::PrecoCusto(price) => {
                query.filter(entity::Column::PrecoCusto.eq(*price))
            }
            FilterCondition::PrecoVenda(price) => {
                query.filter(entity::Column::PrecoVenda.eq(*price))
            }
            FilterCondition::Ativo(ativo) => query.filter(entity::Column::Ativo.eq(*ativo)),
        })
}

fn ordered(query: Select<entity::Entity>, order: FindAllOrder) -> Select<entity::Entity> {
    let direction = match order.sort {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    let query = query.order_by(column_of(order.column), direction);

    // Tie-break on the key so offset pages are stable.
    if order.column == ProdutoColumn::Id {
        query
    } else {
        query.order_by_asc(entity::Column::Id)
    }
}

#[async_trait]
impl ProdutoRepository for PgProdutoRepository {
    async fn create(&self, input: CreateProduto) -> ProdutoResult<Produto> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await.map_err(db_error)?;

        tracing::info!(produto_id = model.id, "Created produto");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> ProdutoResult<Option<Produto>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn find_and_count(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<(Vec<Produto>, u64)> {
        let query = filtered(entity::Entity::find(), &filter);

        let count = query.clone().count(&self.db).await.map_err(db_error)?;
        let rows = ordered(query, order)
            .offset(page.saturating_mul(size))
            .limit(size)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok((rows.into_iter().map(Into::into).collect(), count))
    }

    async fn find_page(
        &self,
        page: u64,
        size: u64,
        order: FindAllOrder,
        filter: FindAllFilter,
    ) -> ProdutoResult<Vec<ProdutoResumo>> {
        let query = entity::Entity::find().select_only().columns([
            entity::Column::Id,
            entity::Column::Descricao,
            entity::Column::PrecoCusto,
            entity::Column::PrecoVenda,
            entity::Column::Ativo,
        ]);

        ordered(filtered(query, &filter), order)
            .offset(page.saturating_mul(size))
            .limit(size)
            .into_model::<ProdutoResumo>()
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    async fn save(&self, produto: Produto) -> ProdutoResult<Produto> {
        let active_model: entity::ActiveModel = produto.into();
        let model = active_model.update(&self.db).await.map_err(db_error)?;

        tracing::info!(produto_id = model.id, "Saved produto");
        Ok(model.into())
    }
}
