pub mod api;
pub mod composer;
pub mod config;
pub mod data_models;
pub mod extractor;
pub mod inference;
pub mod searcher;
