//! Yahoo Finance market-data adapter.

pub mod client;
pub mod dto;

pub use client::YahooRateSource;
