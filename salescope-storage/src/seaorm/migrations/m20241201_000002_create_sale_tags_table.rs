use sea_orm_migration::prelude::*;

use super::m20241201_000001_create_sales_table::Sales;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SaleTags::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SaleTags::SaleId).string().not_null())
                    .col(ColumnDef::new(SaleTags::Tag).string().not_null())
                    .col(ColumnDef::new(SaleTags::Position).integer().not_null().default(0))
                    .primary_key(Index::create().col(SaleTags::SaleId).col(SaleTags::Tag))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sale_tags_sale_id")
                            .from(SaleTags::Table, SaleTags::SaleId)
                            .to(Sales::Table, Sales::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SaleTags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum SaleTags {
    Table,
    SaleId,
    Tag,
    Position,
}
