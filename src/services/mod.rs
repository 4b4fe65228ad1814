pub mod cart_service;
pub mod cart_store;
pub mod catalog_service;
pub mod lead_service;
pub mod pricing_service;
