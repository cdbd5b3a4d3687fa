pub mod json;

pub use json::ValidatedJson;
