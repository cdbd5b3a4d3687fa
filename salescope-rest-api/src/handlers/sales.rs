//! Sales query, filter option and statistics endpoints

use axum::{extract::State, Json};
use salescope_api_types::{FilterOptions, QueryBuilderResponse, Sale, SalesStats};
use salescope_interfaces::SaleRepository;
use salescope_web::ValidatedJson;
use tracing::info;

use crate::{
    context::SalesContext,
    errors::RestResult,
    models::sales::{SalesQueryRequest, SalesStatsRequest},
};

/// `POST /api/sales`: one page of matching sales plus the page envelope
pub async fn query_sales(
    State(ctx): State<SalesContext>,
    ValidatedJson(body): ValidatedJson<SalesQueryRequest>,
) -> RestResult<Json<QueryBuilderResponse<Sale>>> {
    let query = body.into_query(&ctx.limits)?;

    info!(
        page = query.current_page,
        size = query.page_size,
        filters = query.filters.len(),
        search = query.has_search(),
        sort_by = ?query.sort_by,
        "Querying sales"
    );

    let response = ctx.sales.query_sales(&query).await?;
    Ok(Json(response))
}

/// `GET /api/sales/filters`
pub async fn filter_options(State(ctx): State<SalesContext>) -> RestResult<Json<FilterOptions>> {
    info!("Listing filter options");

    let options = ctx.sales.filter_options().await?;
    Ok(Json(options))
}

/// `POST /api/sales/stats`: totals over everything matching the filters and search
pub async fn sales_stats(
    State(ctx): State<SalesContext>,
    ValidatedJson(body): ValidatedJson<SalesStatsRequest>,
) -> RestResult<Json<SalesStats>> {
    let query = body.into_query()?;

    info!(filters = query.filters.len(), search = query.has_search(), "Computing sales stats");

    let stats = ctx.sales.sales_stats(&query).await?;
    Ok(Json(stats))
}
