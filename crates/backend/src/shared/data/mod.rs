pub mod sale_store;
