//! Catalog Toolkit
//!
//! Desktop front-end for a remote product catalog service.
//!
//! This library provides:
//! - `api`: REST client for the catalog service (list, create, update)
//! - `pipeline`: pure filter/sort/paginate transformation
//! - `store`: catalog state owned by the top-level controller
//! - `export`: CSV export of the current view
//! - `images`: image URL validation and placeholder fallback
//!
//! Binaries:
//! - `catalog-ui`: graphical catalog browser
//! - `catalog-csv`: headless fetch-and-export tool

pub mod api;
pub mod export;
pub mod images;
pub mod pipeline;
pub mod store;
