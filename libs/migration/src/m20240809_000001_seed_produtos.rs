use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sale price is cost plus a 30% margin
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO produto (descricao, preco_custo, preco_venda, ativo, codigo_barras)
            SELECT v.descricao, v.custo, ROUND(v.custo * 1.3, 3), true, ARRAY[v.barras]::TEXT[]
            FROM (
                VALUES
                    ('Arroz Branco Tipo 1 5kg', 18.900, '7891000100011'),
                    ('Feijão Carioca 1kg', 6.450, '7891000100028'),
                    ('Açúcar Refinado 1kg', 3.790, '7891000100035'),
                    ('Café Torrado e Moído 500g', 12.300, '7891000100042'),
                    ('Óleo de Soja 900ml', 5.990, '7891000100059'),
                    ('Leite Integral 1L', 4.250, '7891000100066'),
                    ('Macarrão Espaguete 500g', 3.100, '7891000100073'),
                    ('Farinha de Trigo 1kg', 4.680, '7891000100080'),
                    ('Sal Refinado 1kg', 1.890, '7891000100097'),
                    ('Molho de Tomate 340g', 2.350, '7891000100103')
            ) AS v (descricao, custo, barras)
            WHERE NOT EXISTS (SELECT 1 FROM produto)
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM produto WHERE codigo_barras[1] LIKE '78910001%'")
            .await?;

        Ok(())
    }
}
