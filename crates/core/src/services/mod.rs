pub mod analytics_service;
pub mod asset_service;
pub mod refresh_service;
