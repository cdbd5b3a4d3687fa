pub mod sale_repository;

pub use sale_repository::{clear_sales, insert_sales, SeaOrmSaleRepository};
