mod manager;
mod persistence;

pub use manager::{Catalog, FUZZY_THRESHOLD};
pub use persistence::{
    load_catalog, load_or_default, read_catalog_file, save_catalog, CatalogFile,
};
