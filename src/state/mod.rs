mod catalog;
mod selection;

pub use catalog::{load_records, Catalog, CATALOG_FILES};
pub use selection::{parse_entry, Selection};
