pub mod credentials;
pub mod page_cache;
