use std::collections::HashMap;

use salescope_api_types::{PageWindow, QueryBuilderRequest, SortDirection};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbBackend, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;

use super::predicate::{build_condition, sort_column};
use crate::seaorm::connection::DatabaseError;
use crate::seaorm::entities::{sale_tags, sales};

/// Rows of one page plus the total number of matching rows
#[derive(Debug, Clone)]
pub struct SalesPage {
    pub rows: Vec<(sales::Model, Vec<String>)>,
    pub total: u64,
}

/// A request bound to its predicate, ready to run
pub struct SalesQuery<'a> {
    request: &'a QueryBuilderRequest,
    condition: Condition,
}

impl<'a> SalesQuery<'a> {
    pub fn new(request: &'a QueryBuilderRequest, backend: DbBackend) -> Result<Self, DatabaseError> {
        let condition = build_condition(request, backend)?;
        Ok(Self { request, condition })
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Number of rows matching the predicate, ignoring pagination
    pub async fn count(&self, db: &DatabaseConnection) -> Result<u64, DatabaseError> {
        let total = sales::Entity::find().filter(self.condition.clone()).count(db).await?;
        Ok(total)
    }

    /// Count and fetch the requested page.
    ///
    /// The two reads are independent; a concurrent import can make them
    /// disagree.
    pub async fn fetch_page(&self, db: &DatabaseConnection) -> Result<SalesPage, DatabaseError> {
        let window = self.request.window();
        let total = self.count(db).await?;

        if window.offset() >= total {
            debug!(total, page = window.page, "Requested page is past the last row");
            return Ok(SalesPage { rows: Vec::new(), total });
        }

        let mut select = sales::Entity::find().filter(self.condition.clone());
        if let Some(field) = self.request.sort_by {
            select = select.order_by(sort_column(field)?, order_for(self.request.sort_dir));
        }
        // Primary key keeps pages stable when the sort column has ties
        select = select.order_by(sales::Column::Id, Order::Asc);

        let models = select
            .offset(window.offset())
            .limit(window.limit())
            .all(db)
            .await?;

        let rows = attach_tags(db, models).await?;

        debug!(
            total,
            returned = rows.len(),
            page = window.page,
            size = window.size,
            "Fetched sales page"
        );

        Ok(SalesPage { rows, total })
    }

    pub fn window(&self) -> PageWindow {
        self.request.window()
    }
}

fn order_for(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// Load the tags of `models` in a single query, preserving source order
async fn attach_tags(
    db: &DatabaseConnection,
    models: Vec<sales::Model>,
) -> Result<Vec<(sales::Model, Vec<String>)>, DatabaseError> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = models.iter().map(|m| m.id.clone()).collect();
    let tag_rows = sale_tags::Entity::find()
        .filter(sale_tags::Column::SaleId.is_in(ids))
        .order_by_asc(sale_tags::Column::SaleId)
        .order_by_asc(sale_tags::Column::Position)
        .all(db)
        .await?;

    let mut by_sale: HashMap<String, Vec<String>> = HashMap::new();
    for row in tag_rows {
        by_sale.entry(row.sale_id).or_default().push(row.tag);
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let tags = by_sale.remove(&model.id).unwrap_or_default();
            (model, tags)
        })
        .collect())
}
