//! Prompt templates for the narrative analysis

use crate::error::Result;
use minijinja::{Environment, context};

const ANALYST_REPORT_TEMPLATE: &str = r#"You are a professional financial analyst working for a long-term investor.

You are provided with recent financial news headlines and summaries related to various sectors and companies.

1. Based on the news below, identify 3–5 **specific stock tickers** likely to:
   - Secure major contracts,
   - Receive FDA/clinical/regulatory approvals,
   - Benefit from favorable macro or sector-specific trends, or
   - Outperform in the long term.

2. Avoid vague generalities or references to institutions (e.g., "Gates Foundation-backed"). Focus on **public companies**, **tickers**, and **specific drivers**.

3. Separately, analyze the current portfolio: {{ portfolio }}
   - Forecast short- to mid-term trends (bullish, bearish, stable)
   - Note catalysts, risks, or signals from the latest news
   - Recommend: Hold, Add, Reduce (with brief rationale)

News:
{{ news }}

Provide a clean, structured analyst-style report."#;

/// Render the analyst report prompt
///
/// `headlines` is the pre-rendered `- title: description` block.
pub fn analyst_report_prompt(tickers: &[String], headlines: &str) -> Result<String> {
    let env = Environment::new();
    let prompt = env.render_str(
        ANALYST_REPORT_TEMPLATE,
        context! {
            portfolio => tickers.join(", "),
            news => headlines,
        },
    )?;
    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolation() {
        let tickers = vec!["AAPL".to_string(), "NVDA".to_string()];
        let prompt =
            analyst_report_prompt(&tickers, "- Chip order: NVDA wins a large contract").unwrap();

        assert!(prompt.contains("analyze the current portfolio: AAPL, NVDA\n"));
        assert!(prompt.contains("News:\n- Chip order: NVDA wins a large contract\n"));
        assert!(prompt.contains("identify 3–5 **specific stock tickers**"));
        assert!(prompt.ends_with("Provide a clean, structured analyst-style report."));
    }

    #[test]
    fn test_headlines_are_not_escaped() {
        let prompt = analyst_report_prompt(&[], "- R&D <update>: \"quoted\"").unwrap();
        assert!(prompt.contains("- R&D <update>: \"quoted\""));
    }
}
