//! Canned provider responses

pub const TEST_API_KEY: &str = "test-api-key";

pub const ERROR_MESSAGE_BODY: &str = r#"{
    "Error Message": "Invalid API call. Please retry or visit the documentation (https://www.alphavantage.co/documentation/) for OVERVIEW."
}"#;

pub const INFORMATION_BODY: &str = r#"{
    "Information": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day. Please subscribe to any of the premium plans at https://www.alphavantage.co/premium/ to instantly remove all daily rate limits."
}"#;

/// `OVERVIEW` answer for IBM, including sentinel values and fields this crate does not model.
pub const IBM_OVERVIEW_BODY: &str = r#"{
    "Symbol": "IBM",
    "AssetType": "Common Stock",
    "Name": "International Business Machines",
    "Description": "International Business Machines Corporation (IBM) is an American multinational technology company headquartered in Armonk, New York.",
    "CIK": "51143",
    "Exchange": "NYSE",
    "Currency": "USD",
    "Country": "USA",
    "Sector": "TECHNOLOGY",
    "Industry": "COMPUTER & OFFICE EQUIPMENT",
    "Address": "1 NEW ORCHARD ROAD, ARMONK, NY, US",
    "OfficialSite": "https://www.ibm.com",
    "FullTimeEmployees": "282100",
    "FiscalYearEnd": "December",
    "LatestQuarter": "2024-03-31",
    "MarketCapitalization": "390000000000.0000",
    "EBITDA": "14625000000",
    "PERatio": "None",
    "PEGRatio": "4.347",
    "BookValue": "25.32",
    "DividendPerShare": "6.64",
    "DividendYield": "0.0359",
    "EPS": "8.15",
    "RevenuePerShareTTM": "67.74",
    "ProfitMargin": "0.121",
    "OperatingMarginTTM": "0.129",
    "ReturnOnAssetsTTM": "0.0461",
    "ReturnOnEquityTTM": "0.339",
    "RevenueTTM": "61860000000",
    "GrossProfitTTM": "32688000000",
    "DilutedEPSTTM": "8.15",
    "QuarterlyEarningsGrowthYOY": "-0.188",
    "QuarterlyRevenueGrowthYOY": "0.015",
    "AnalystTargetPrice": "187.88",
    "TrailingPE": "22.64",
    "ForwardPE": "17.76",
    "PriceToSalesRatioTTM": "2.736",
    "PriceToBookRatio": "7.49",
    "EVToRevenue": "3.58",
    "EVToEBITDA": "13.93",
    "Beta": "0.703",
    "52WeekHigh": "199.18",
    "52WeekLow": "120.55",
    "50DayMovingAverage": "184.95",
    "200DayMovingAverage": "None",
    "SharesOutstanding": "916869000",
    "SharesFloat": "None",
    "SharesShort": "None",
    "SharesShortPriorMonth": "None",
    "ShortRatio": "None",
    "ShortPercentOutstanding": "None",
    "ShortPercentFloat": "None",
    "PercentInsiders": "0.106",
    "PercentInstitutions": "61.547",
    "ForwardAnnualDividendRate": "6.64",
    "ForwardAnnualDividendYield": "0.0359",
    "PayoutRatio": "0.7",
    "DividendDate": "2024-03-09",
    "ExDividendDate": "2024-02-08",
    "LastSplitFactor": "2:1",
    "LastSplitDate": "None"
}"#;

/// IBM overview with one optional field replaced by a raw token.
pub fn ibm_overview_with(field: &str, token: &str) -> String {
    let mut document: serde_json::Value =
        serde_json::from_str(IBM_OVERVIEW_BODY).expect("fixture is valid JSON");
    document[field] = serde_json::Value::String(token.to_string());
    document.to_string()
}
