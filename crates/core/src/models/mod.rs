pub mod analytics;
pub mod asset;
pub mod form;
pub mod portfolio;
pub mod price;
pub mod settings;
