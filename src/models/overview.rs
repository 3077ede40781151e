use serde::{Deserialize, Deserializer, Serialize};

use super::optional::{OptionalDate, OptionalNumber};

// The provider sends the employee count as a string, dumps may hold a number
fn string_or_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInteger {
        Integer(i64),
        Text(String),
    }

    match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::Integer(value) => Ok(value),
        StringOrInteger::Text(text) => text.trim().parse::<i64>().map_err(serde::de::Error::custom),
    }
}

/// Company profile snapshot returned by `function=OVERVIEW`.
///
/// String fields are required. Optional numbers and dates go through
/// [`OptionalNumber`] / [`OptionalDate`]; a missing key decodes as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    pub symbol: String,
    pub asset_type: String,
    pub name: String,
    pub description: String,
    pub exchange: String,
    pub currency: String,
    pub country: String,
    pub sector: String,
    pub industry: String,
    pub address: String,
    #[serde(deserialize_with = "string_or_integer")]
    pub full_time_employees: i64,
    pub fiscal_year_end: String,
    #[serde(default)]
    pub latest_quarter: OptionalDate,
    #[serde(default)]
    pub market_capitalization: OptionalNumber,
    #[serde(rename = "EBITDA", default)]
    pub ebitda: OptionalNumber,
    #[serde(rename = "PERatio", default)]
    pub pe_ratio: OptionalNumber,
    #[serde(rename = "PEGRatio", default)]
    pub peg_ratio: OptionalNumber,
    #[serde(default)]
    pub book_value: OptionalNumber,
    #[serde(default)]
    pub dividend_per_share: OptionalNumber,
    #[serde(default)]
    pub dividend_yield: OptionalNumber,
    #[serde(rename = "EPS", default)]
    pub eps: OptionalNumber,
    #[serde(rename = "RevenuePerShareTTM", default)]
    pub revenue_per_share_ttm: OptionalNumber,
    #[serde(default)]
    pub profit_margin: OptionalNumber,
    #[serde(rename = "OperatingMarginTTM", default)]
    pub operating_margin_ttm: OptionalNumber,
    #[serde(rename = "ReturnOnAssetsTTM", default)]
    pub return_on_assets_ttm: OptionalNumber,
    #[serde(rename = "ReturnOnEquityTTM", default)]
    pub return_on_equity_ttm: OptionalNumber,
    #[serde(rename = "RevenueTTM", default)]
    pub revenue_ttm: OptionalNumber,
    #[serde(rename = "GrossProfitTTM", default)]
    pub gross_profit_ttm: OptionalNumber,
    #[serde(rename = "DilutedEPSTTM", default)]
    pub diluted_eps_ttm: OptionalNumber,
    #[serde(rename = "QuarterlyEarningsGrowthYOY", default)]
    pub quarterly_earnings_growth_yoy: OptionalNumber,
    #[serde(rename = "QuarterlyRevenueGrowthYOY", default)]
    pub quarterly_revenue_growth_yoy: OptionalNumber,
    #[serde(default)]
    pub analyst_target_price: OptionalNumber,
    #[serde(rename = "TrailingPE", default)]
    pub trailing_pe: OptionalNumber,
    #[serde(rename = "ForwardPE", default)]
    pub forward_pe: OptionalNumber,
    #[serde(rename = "PriceToSalesRatioTTM", default)]
    pub price_to_sales_ratio_ttm: OptionalNumber,
    #[serde(default)]
    pub price_to_book_ratio: OptionalNumber,
    #[serde(rename = "EVToRevenue", default)]
    pub ev_to_revenue: OptionalNumber,
    #[serde(rename = "EVToEBITDA", default)]
    pub ev_to_ebitda: OptionalNumber,
    #[serde(default)]
    pub beta: OptionalNumber,
    #[serde(rename = "52WeekHigh", default)]
    pub week_52_high: OptionalNumber,
    #[serde(rename = "52WeekLow", default)]
    pub week_52_low: OptionalNumber,
    #[serde(rename = "50DayMovingAverage", default)]
    pub moving_average_50_day: OptionalNumber,
    #[serde(rename = "200DayMovingAverage", default)]
    pub moving_average_200_day: OptionalNumber,
    #[serde(default)]
    pub shares_outstanding: OptionalNumber,
    #[serde(default)]
    pub shares_float: OptionalNumber,
    #[serde(default)]
    pub shares_short: OptionalNumber,
    #[serde(default)]
    pub shares_short_prior_month: OptionalNumber,
    #[serde(default)]
    pub short_ratio: OptionalNumber,
    #[serde(default)]
    pub short_percent_outstanding: OptionalNumber,
    #[serde(default)]
    pub short_percent_float: OptionalNumber,
    #[serde(default)]
    pub percent_insiders: OptionalNumber,
    #[serde(default)]
    pub percent_institutions: OptionalNumber,
    #[serde(default)]
    pub forward_annual_dividend_rate: OptionalNumber,
    #[serde(default)]
    pub forward_annual_dividend_yield: OptionalNumber,
    #[serde(default)]
    pub payout_ratio: OptionalNumber,
    #[serde(default)]
    pub dividend_date: OptionalDate,
    #[serde(default)]
    pub ex_dividend_date: OptionalDate,
    pub last_split_factor: String,
    #[serde(default)]
    pub last_split_date: OptionalDate,
}
