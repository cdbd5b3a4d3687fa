use async_trait::async_trait;
use salescope_api_types::{AgeBounds, FilterOptions, QueryBuilderRequest, QueryBuilderResponse, Sale, SalesStats};
use salescope_interfaces::DatabaseError as InterfaceError;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use crate::query::SalesQuery;
use crate::seaorm::connection::{DatabaseConnection, DatabaseError};
use crate::seaorm::entities::{sale_tags, sales};
use crate::seaorm::safe_errors::to_interface_error;

/// SeaORM-backed implementation of the sales repository
#[derive(Clone)]
pub struct SeaOrmSaleRepository {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct SalesTotals {
    units: Option<i64>,
    gross: Option<f64>,
    net: Option<f64>,
    records: i64,
}

#[derive(Debug, FromQueryResult)]
struct AgeExtent {
    min_age: Option<i32>,
    max_age: Option<i32>,
}

impl SeaOrmSaleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    fn backend(&self) -> DbBackend {
        self.db.get_connection().get_database_backend()
    }

    /// Run the search/filter/sort query and wrap the page in the response envelope
    pub async fn find_page(&self, request: &QueryBuilderRequest) -> Result<QueryBuilderResponse<Sale>, DatabaseError> {
        let query = SalesQuery::new(request, self.backend())?;
        let page = query.fetch_page(self.db.get_connection()).await?;

        let data = page
            .rows
            .into_iter()
            .map(|(model, tags)| model.into_sale(tags))
            .collect();

        Ok(QueryBuilderResponse::new(request, data, page.total))
    }

    /// Distinct values for each categorical filter, sorted ascending
    pub async fn find_filter_options(&self) -> Result<FilterOptions, DatabaseError> {
        let conn = self.db.get_connection();

        let age_range = sales::Entity::find()
            .select_only()
            .column_as(sales::Column::Age.min(), "min_age")
            .column_as(sales::Column::Age.max(), "max_age")
            .into_model::<AgeExtent>()
            .one(conn)
            .await?
            .and_then(|extent| match (extent.min_age, extent.max_age) {
                (Some(min), Some(max)) => Some(AgeBounds { min, max }),
                _ => None,
            })
            .unwrap_or_default();

        let tags = sale_tags::Entity::find()
            .select_only()
            .column(sale_tags::Column::Tag)
            .distinct()
            .order_by_asc(sale_tags::Column::Tag)
            .into_tuple::<String>()
            .all(conn)
            .await?;

        Ok(FilterOptions {
            customer_regions: self.distinct_values(sales::Column::CustomerRegion).await?,
            genders: self.distinct_values(sales::Column::Gender).await?,
            product_categories: self.distinct_values(sales::Column::ProductCategory).await?,
            payment_methods: self.distinct_values(sales::Column::PaymentMethod).await?,
            order_statuses: self.distinct_values(sales::Column::OrderStatus).await?,
            delivery_types: self.distinct_values(sales::Column::DeliveryType).await?,
            tags,
            age_range,
        })
    }

    async fn distinct_values(&self, column: sales::Column) -> Result<Vec<String>, DatabaseError> {
        let values = sales::Entity::find()
            .select_only()
            .column(column)
            .distinct()
            .order_by_asc(column)
            .into_tuple::<String>()
            .all(self.db.get_connection())
            .await?;
        Ok(values)
    }

    /// Totals over every row matching the request's search and filters
    pub async fn compute_stats(&self, request: &QueryBuilderRequest) -> Result<SalesStats, DatabaseError> {
        let query = SalesQuery::new(request, self.backend())?;

        let totals = sales::Entity::find()
            .select_only()
            .column_as(sales::Column::Quantity.sum(), "units")
            .column_as(sales::Column::TotalAmount.sum(), "gross")
            .column_as(sales::Column::FinalAmount.sum(), "net")
            .column_as(sales::Column::Id.count(), "records")
            .filter(query.condition().clone())
            .into_model::<SalesTotals>()
            .one(self.db.get_connection())
            .await?;

        let stats = match totals {
            Some(totals) => SalesStats::from_sums(
                totals.units.unwrap_or(0),
                totals.gross.unwrap_or(0.0),
                totals.net.unwrap_or(0.0),
                totals.records.max(0) as u64,
            ),
            None => SalesStats::default(),
        };

        debug!(records = stats.total_sales_records, "Computed sales stats");
        Ok(stats)
    }

    /// Total number of stored sales
    pub async fn count(&self) -> Result<u64, DatabaseError> {
        Ok(sales::Entity::find().count(self.db.get_connection()).await?)
    }
}

/// Rows per INSERT statement, keeping bound parameters under SQLite's limit
const INSERT_CHUNK: usize = 500;

/// Insert `batch` and its tags using `conn`, which may be a transaction
pub async fn insert_sales<C: ConnectionTrait>(conn: &C, batch: &[Sale]) -> Result<(), DbErr> {
    for chunk in batch.chunks(INSERT_CHUNK) {
        let models = chunk.iter().map(sales::ActiveModel::from);
        sales::Entity::insert_many(models).exec_without_returning(conn).await?;
    }

    let tag_rows: Vec<sale_tags::ActiveModel> = batch
        .iter()
        .flat_map(|sale| {
            sale.tags.iter().enumerate().map(|(position, tag)| sale_tags::ActiveModel {
                sale_id: Set(sale.id.clone()),
                tag: Set(tag.clone()),
                position: Set(position as i32),
            })
        })
        .collect();

    for chunk in tag_rows.chunks(INSERT_CHUNK * 4) {
        sale_tags::Entity::insert_many(chunk.to_vec()).exec_without_returning(conn).await?;
    }

    Ok(())
}

/// Remove every sale and tag
pub async fn clear_sales<C: ConnectionTrait>(conn: &C) -> Result<u64, DbErr> {
    sale_tags::Entity::delete_many().exec(conn).await?;
    let deleted = sales::Entity::delete_many().exec(conn).await?;
    info!(deleted = deleted.rows_affected, "Cleared sales table");
    Ok(deleted.rows_affected)
}

#[async_trait]
impl salescope_interfaces::Repository for SeaOrmSaleRepository {
    async fn health_check(&self) -> Result<(), InterfaceError> {
        self.db.ping().await.map_err(to_interface_error)
    }
}

#[async_trait]
impl salescope_interfaces::SaleRepository for SeaOrmSaleRepository {
    async fn query_sales(&self, request: &QueryBuilderRequest) -> Result<QueryBuilderResponse<Sale>, InterfaceError> {
        self.find_page(request).await.map_err(to_interface_error)
    }

    async fn filter_options(&self) -> Result<FilterOptions, InterfaceError> {
        self.find_filter_options().await.map_err(to_interface_error)
    }

    async fn sales_stats(&self, request: &QueryBuilderRequest) -> Result<SalesStats, InterfaceError> {
        self.compute_stats(request).await.map_err(to_interface_error)
    }
}
