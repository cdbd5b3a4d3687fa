//! CSV import of the sales dataset
//!
//! The whole file is parsed and validated before the store is touched, so a
//! malformed row leaves existing data in place. Rows are then written in
//! batches, one transaction per batch.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::Utc;
use salescope_api_types::query::parse_date;
use salescope_api_types::Sale;
use sea_orm::{DbErr, TransactionTrait};
use serde::Deserialize;
use tracing::{info, warn};

use crate::seaorm::{clear_sales, insert_sales, DatabaseConnection};

/// Rows written per transaction unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}: {message}")]
    InvalidRow { row: u64, message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Outcome of an import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub inserted: usize,
    /// Rows whose Transaction ID repeated an earlier row
    pub skipped_duplicates: usize,
    pub batches: usize,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Transaction ID", default)]
    transaction_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: i32,
    #[serde(rename = "Customer Region")]
    customer_region: String,
    #[serde(rename = "Customer Type")]
    customer_type: String,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Product Category")]
    product_category: String,
    #[serde(rename = "Tags", default)]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: i32,
    #[serde(rename = "Price per Unit")]
    price_per_unit: f64,
    #[serde(rename = "Discount Percentage")]
    discount_percentage: f64,
    #[serde(rename = "Total Amount")]
    total_amount: f64,
    #[serde(rename = "Final Amount")]
    final_amount: f64,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Order Status")]
    order_status: String,
    #[serde(rename = "Delivery Type")]
    delivery_type: String,
    #[serde(rename = "Store ID")]
    store_id: String,
    #[serde(rename = "Store Location")]
    store_location: String,
    #[serde(rename = "Salesperson ID")]
    salesperson_id: String,
    #[serde(rename = "Employee Name")]
    employee_name: String,
}

impl CsvRow {
    fn into_sale(self, row: u64) -> Result<Sale, ImportError> {
        let date = parse_date(&self.date).ok_or_else(|| ImportError::InvalidRow {
            row,
            message: format!("invalid Date '{}'", self.date),
        })?;

        let id = if self.transaction_id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            self.transaction_id
        };

        let now = Utc::now();
        Ok(Sale {
            id,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender,
            age: self.age,
            customer_region: self.customer_region,
            customer_type: self.customer_type,
            product_id: self.product_id,
            product_name: self.product_name,
            brand: self.brand,
            product_category: self.product_category,
            tags: split_tags(&self.tags),
            quantity: self.quantity,
            price_per_unit: self.price_per_unit,
            discount_percentage: self.discount_percentage,
            total_amount: self.total_amount,
            final_amount: self.final_amount,
            date,
            payment_method: self.payment_method,
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id,
            employee_name: self.employee_name,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Split a comma-separated tag list, trimming and dropping empties and repeats
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_string)
        .collect()
}

/// Replaces the contents of the store with the rows of a CSV file
pub struct CsvImporter {
    db: DatabaseConnection,
    batch_size: usize,
}

impl CsvImporter {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub async fn import_file(&self, path: impl AsRef<Path>) -> Result<ImportSummary, ImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Importing sales from CSV");
        self.import_reader(file).await
    }

    pub async fn import_reader<R: Read>(&self, reader: R) -> Result<ImportSummary, ImportError> {
        let (sales, rows_read) = parse_sales(reader)?;
        let mut summary = ImportSummary {
            rows_read,
            skipped_duplicates: rows_read - sales.len(),
            ..Default::default()
        };

        let conn = self.db.get_connection();
        let txn = conn.begin().await?;
        clear_sales(&txn).await?;
        txn.commit().await?;

        let total_batches = sales.len().div_ceil(self.batch_size);
        for (index, batch) in sales.chunks(self.batch_size).enumerate() {
            let txn = conn.begin().await?;
            insert_sales(&txn, batch).await?;
            txn.commit().await?;

            summary.inserted += batch.len();
            summary.batches += 1;
            info!(
                batch = index + 1,
                total_batches,
                records = batch.len(),
                "Batch inserted"
            );
        }

        info!(
            inserted = summary.inserted,
            skipped_duplicates = summary.skipped_duplicates,
            "CSV import completed"
        );
        Ok(summary)
    }
}

/// Parse every row, keeping the first occurrence of each Transaction ID
fn parse_sales<R: Read>(reader: R) -> Result<(Vec<Sale>, usize), ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut sales = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut rows_read = 0;

    for record in csv_reader.records() {
        let record = record?;
        let row = record.position().map(|p| p.line()).unwrap_or(rows_read as u64 + 2);
        rows_read += 1;

        let parsed: CsvRow = record.deserialize(Some(&headers)).map_err(|e| ImportError::InvalidRow {
            row,
            message: e.to_string(),
        })?;
        let sale = parsed.into_sale(row)?;

        if !seen_ids.insert(sale.id.clone()) {
            warn!(row, id = %sale.id, "Skipping duplicate Transaction ID");
            continue;
        }
        sales.push(sale);
    }

    Ok((sales, rows_read))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDatabase;
    use salescope_api_types::QueryBuilderRequest;
    use salescope_interfaces::SaleRepository;

    const HEADER: &str = "Transaction ID,Date,Customer ID,Customer Name,Phone Number,Gender,Age,Customer Region,Customer Type,Product ID,Product Name,Brand,Product Category,Tags,Quantity,Price per Unit,Discount Percentage,Total Amount,Final Amount,Payment Method,Order Status,Delivery Type,Store ID,Store Location,Salesperson ID,Employee Name";

    fn row(id: &str, name: &str, age: &str, tags: &str) -> String {
        format!(
            "{id},2023-03-14,CUST-1,{name},9123456789,Female,{age},North,Loyal,PROD-1,Linen Kurta,Fabindia,Clothing,\"{tags}\",2,500,10,1000,900,UPI,Completed,Express,ST-01,Pune,EMP-1,Asha Rao"
        )
    }

    fn csv_of(rows: &[String]) -> String {
        let mut out = String::from(HEADER);
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(split_tags("organic, fashion ,,organic"), vec!["organic", "fashion"]);
        assert!(split_tags("").is_empty());
        assert!(split_tags(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_import_replaces_existing_rows() {
        let db = TestDatabase::new().await.unwrap();
        db.seed_sales(crate::testing::factories::generated_sales(5)).await.unwrap();

        let csv = csv_of(&[
            row("T-1", "Neha Kumar", "29", "organic, fashion"),
            row("T-2", "Arjun Mehta", "41", ""),
            row("T-1", "Duplicate", "50", ""),
        ]);

        let summary = CsvImporter::new(db.connection.clone())
            .with_batch_size(1)
            .import_reader(csv.as_bytes())
            .await
            .unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                rows_read: 3,
                inserted: 2,
                skipped_duplicates: 1,
                batches: 2,
            }
        );

        let page = db.repository().query_sales(&QueryBuilderRequest::new(0, 10)).await.unwrap();
        assert_eq!(page.total_elements, 2);
        let first = page.data.iter().find(|s| s.id == "T-1").unwrap();
        assert_eq!(first.customer_name, "Neha Kumar");
        assert_eq!(first.tags, vec!["organic", "fashion"]);
        assert_eq!(first.date.to_string(), "2023-03-14");
    }

    #[tokio::test]
    async fn test_malformed_row_aborts_before_clearing() {
        let db = TestDatabase::new().await.unwrap();
        db.seed_sales(crate::testing::factories::generated_sales(3)).await.unwrap();

        let csv = csv_of(&[row("T-1", "Neha", "29", ""), row("T-2", "Arjun", "forty", "")]);
        let err = CsvImporter::new(db.connection.clone())
            .import_reader(csv.as_bytes())
            .await
            .unwrap_err();

        match err {
            ImportError::InvalidRow { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(db.repository().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_missing_transaction_id_gets_generated() {
        let db = TestDatabase::new().await.unwrap();
        let csv = csv_of(&[row("", "Neha", "29", "")]);

        CsvImporter::new(db.connection.clone())
            .import_reader(csv.as_bytes())
            .await
            .unwrap();

        let page = db.repository().query_sales(&QueryBuilderRequest::new(0, 10)).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(uuid::Uuid::parse_str(&page.data[0].id).is_ok());
    }

    #[tokio::test]
    async fn test_import_file_missing() {
        let db = TestDatabase::new().await.unwrap();
        let err = CsvImporter::new(db.connection.clone())
            .import_file(db.temp_path().join("absent.csv"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }

    #[tokio::test]
    async fn test_import_file() {
        let db = TestDatabase::new().await.unwrap();
        let path = db.temp_path().join("sales.csv");
        std::fs::write(&path, csv_of(&[row("T-9", "Ravi", "35", "gadgets")])).unwrap();

        let summary = CsvImporter::new(db.connection.clone()).import_file(&path).await.unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.batches, 1);
    }
}
