use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduto, Produto};

/// Sea-ORM entity for the `produto` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(StringLen::N(60))")]
    pub descricao: String,
    #[sea_orm(column_type = "Decimal(Some((13, 3)))")]
    pub preco_custo: Decimal,
    #[sea_orm(column_type = "Decimal(Some((13, 3)))")]
    pub preco_venda: Decimal,
    pub imagem: Option<Vec<u8>>,
    pub ativo: bool,
    pub codigo_barras: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Produto {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            descricao: model.descricao,
            preco_custo: model.preco_custo,
            preco_venda: model.preco_venda,
            imagem: model.imagem,
            ativo: model.ativo,
            codigo_barras: model.codigo_barras,
        }
    }
}

impl From<CreateProduto> for ActiveModel {
    fn from(input: CreateProduto) -> Self {
        ActiveModel {
            id: NotSet,
            descricao: Set(input.descricao),
            preco_custo: Set(input.preco_custo),
            preco_venda: Set(input.preco_venda),
            imagem: Set(input.imagem),
            ativo: Set(input.ativo),
            codigo_barras: Set(input.codigo_barras),
        }
    }
}

// Every column is set, so an update rewrites the whole row.
impl From<Produto> for ActiveModel {
    fn from(produto: Produto) -> Self {
        ActiveModel {
            id: Set(produto.id),
            descricao: Set(produto.descricao),
            preco_custo: Set(produto.preco_custo),
            preco_venda: Set(produto.preco_venda),
            imagem: Set(produto.imagem),
            ativo: Set(produto.ativo),
            codigo_barras: Set(produto.codigo_barras),
        }
    }
}
