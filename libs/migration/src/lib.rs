pub use sea_orm_migration::prelude::*;

mod m20240809_000000_create_produto;
mod m20240809_000001_seed_produtos;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240809_000000_create_produto::Migration),
            Box::new(m20240809_000001_seed_produtos::Migration),
        ]
    }
}
