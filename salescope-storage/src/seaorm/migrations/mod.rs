use sea_orm_migration::prelude::*;

mod m20241201_000001_create_sales_table;
mod m20241201_000002_create_sale_tags_table;
mod m20241201_000003_create_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000001_create_sales_table::Migration),
            Box::new(m20241201_000002_create_sale_tags_table::Migration),
            Box::new(m20241201_000003_create_indexes::Migration),
        ]
    }
}
