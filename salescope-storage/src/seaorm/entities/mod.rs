pub mod sale_tags;
pub mod sales;

pub use sale_tags::{
    ActiveModel as SaleTagActiveModel, Column as SaleTagColumn, Entity as SaleTags, Model as SaleTag,
};
pub use sales::{ActiveModel as SaleActiveModel, Column as SaleColumn, Entity as Sales, Model as SaleRecord};
