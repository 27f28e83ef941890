use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Produto::Table)
                    .if_not_exists()
                    .col(pk_auto(Produto::Id))
                    .col(string_len(Produto::Descricao, 60))
                    .col(decimal_len(Produto::PrecoCusto, 13, 3))
                    .col(decimal_len(Produto::PrecoVenda, 13, 3))
                    .col(ColumnDef::new(Produto::Imagem).blob().null())
                    .col(boolean(Produto::Ativo).default(true))
                    .col(
                        ColumnDef::new(Produto::CodigoBarras)
                            .array(ColumnType::Text)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Listings filter on ativo far more often than on anything else
        manager
            .create_index(
                Index::create()
                    .name("idx_produto_ativo")
                    .table(Produto::Table)
                    .col(Produto::Ativo)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Produto::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Produto {
    Table,
    Id,
    Descricao,
    PrecoCusto,
    PrecoVenda,
    Imagem,
    Ativo,
    CodigoBarras,
}
