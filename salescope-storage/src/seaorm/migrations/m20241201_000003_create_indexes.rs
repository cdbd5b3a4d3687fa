use sea_orm_migration::prelude::*;

use super::m20241201_000001_create_sales_table::Sales;
use super::m20241201_000002_create_sale_tags_table::SaleTags;

const SALES_INDEXES: &[(&str, Sales)] = &[
    ("idx_sales_customer_name", Sales::CustomerName),
    ("idx_sales_phone_number", Sales::PhoneNumber),
    ("idx_sales_customer_region", Sales::CustomerRegion),
    ("idx_sales_gender", Sales::Gender),
    ("idx_sales_age", Sales::Age),
    ("idx_sales_product_category", Sales::ProductCategory),
    ("idx_sales_payment_method", Sales::PaymentMethod),
    ("idx_sales_order_status", Sales::OrderStatus),
    ("idx_sales_delivery_type", Sales::DeliveryType),
    ("idx_sales_date", Sales::Date),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Single-column indexes for the filter and sort fields
        for (name, column) in SALES_INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(*name)
                        .table(Sales::Table)
                        .col(*column)
                        .to_owned(),
                )
                .await?;
        }

        // Tag lookups go from tag to sale
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sale_tags_tag")
                    .table(SaleTags::Table)
                    .col(SaleTags::Tag)
                    .col(SaleTags::SaleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let index_names = SALES_INDEXES
            .iter()
            .map(|(name, _)| *name)
            .chain(std::iter::once("idx_sale_tags_tag"));

        for index_name in index_names {
            manager
                .drop_index(Index::drop().name(index_name).to_owned())
                .await?;
        }

        Ok(())
    }
}
