//! Typed client for the Alpha Vantage query API.
//!
//! Builds authenticated GET requests, checks responses for the provider's
//! HTTP-200 error envelopes and decodes bodies into typed records, with
//! `"None"`-as-string optional numbers and dates handled by
//! [`models::OptionalNumber`] and [`models::OptionalDate`].

pub mod api;
pub mod dump;
pub mod error;
pub mod models;

pub use api::{AlphaVantageClient, ApiResponse, FundamentalDataProvider, QueryParameters};
pub use dump::{dump_json, dump_json_to_file, to_pretty_json};
pub use error::{AlphaVantageError, Result};
pub use models::{CompanyOverview, Config, OptionalDate, OptionalNumber};
