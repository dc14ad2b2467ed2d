pub mod answer;
pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod normalize;
pub mod page;

