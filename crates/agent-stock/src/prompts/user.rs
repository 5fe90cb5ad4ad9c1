//! Request messages sent to each role by the research pipeline

/// Request for the FundamentalAnalyst
pub fn fundamental_request(ticker: &str) -> String {
    format!("Analyze the financial health of the company with stock ticker {ticker}.")
}

/// Request for the MarketSentimentAnalyst
pub fn sentiment_request(company: &str) -> String {
    format!("Report on the current market sentiment and news for {company}.")
}

/// Request for the EconomicAndIndustryAnalyst
pub fn economic_request(company: &str, industry: Option<&str>) -> String {
    match industry {
        Some(industry) => format!(
            "Analyze the industry and macroeconomic landscape for {company}, which operates in the {industry} industry."
        ),
        None => format!("Analyze the industry and macroeconomic landscape for {company}."),
    }
}

/// Message handed to the CIO for the final synthesis
pub fn synthesis_request(
    query: &str,
    fundamental: &str,
    sentiment: &str,
    economic: &str,
) -> String {
    format!(
        "User request: {query}\n\n\
         ## Fundamental analysis report\n{fundamental}\n\n\
         ## Market sentiment report\n{sentiment}\n\n\
         ## Industry and economic report\n{economic}"
    )
}
