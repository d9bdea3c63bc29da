pub mod clock;
pub mod config;
pub mod error;
pub mod feed;
pub mod grouping;
pub mod handler;
pub mod model;
pub mod normalize;
pub mod popup;
pub mod query;
