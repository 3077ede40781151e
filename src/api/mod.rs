use async_trait::async_trait;

use crate::error::Result;
use crate::models::CompanyOverview;

pub mod alpha_vantage_client;
pub use alpha_vantage_client::{
    decode_response, AlphaVantageClient, AlphaVantageClientBuilder, ApiResponse, QueryParameters,
    API_KEY_PARAM, FUNCTION_PARAM, OVERVIEW_FUNCTION,
};

/// Source of company fundamentals
#[async_trait]
pub trait FundamentalDataProvider: Send + Sync {
    async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview>;
}

#[async_trait]
impl FundamentalDataProvider for AlphaVantageClient {
    async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        AlphaVantageClient::company_overview(self, symbol).await
    }
}
