pub mod listing_service;
pub mod reference_service;
