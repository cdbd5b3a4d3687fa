use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sales::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sales::CustomerId).string().not_null())
                    .col(ColumnDef::new(Sales::CustomerName).string().not_null())
                    .col(ColumnDef::new(Sales::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Sales::Gender).string().not_null())
                    .col(ColumnDef::new(Sales::Age).integer().not_null())
                    .col(ColumnDef::new(Sales::CustomerRegion).string().not_null())
                    .col(ColumnDef::new(Sales::CustomerType).string().not_null())
                    .col(ColumnDef::new(Sales::ProductId).string().not_null())
                    .col(ColumnDef::new(Sales::ProductName).string().not_null())
                    .col(ColumnDef::new(Sales::Brand).string().not_null())
                    .col(ColumnDef::new(Sales::ProductCategory).string().not_null())
                    .col(ColumnDef::new(Sales::Quantity).integer().not_null())
                    .col(ColumnDef::new(Sales::PricePerUnit).double().not_null())
                    .col(ColumnDef::new(Sales::DiscountPercentage).double().not_null())
                    .col(ColumnDef::new(Sales::TotalAmount).double().not_null())
                    .col(ColumnDef::new(Sales::FinalAmount).double().not_null())
                    .col(ColumnDef::new(Sales::Date).date().not_null())
                    .col(ColumnDef::new(Sales::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Sales::OrderStatus).string().not_null())
                    .col(ColumnDef::new(Sales::DeliveryType).string().not_null())
                    .col(ColumnDef::new(Sales::StoreId).string().not_null())
                    .col(ColumnDef::new(Sales::StoreLocation).string().not_null())
                    .col(ColumnDef::new(Sales::SalespersonId).string().not_null())
                    .col(ColumnDef::new(Sales::EmployeeName).string().not_null())
                    .col(
                        ColumnDef::new(Sales::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sales::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(Iden, Clone, Copy)]
pub(super) enum Sales {
    Table,
    Id,
    CustomerId,
    CustomerName,
    PhoneNumber,
    Gender,
    Age,
    CustomerRegion,
    CustomerType,
    ProductId,
    ProductName,
    Brand,
    ProductCategory,
    Quantity,
    PricePerUnit,
    DiscountPercentage,
    TotalAmount,
    FinalAmount,
    Date,
    PaymentMethod,
    OrderStatus,
    DeliveryType,
    StoreId,
    StoreLocation,
    SalespersonId,
    EmployeeName,
    CreatedAt,
    UpdatedAt,
}
