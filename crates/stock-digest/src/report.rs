//! Plaintext report assembly

use chrono::{Local, NaiveDate};

pub const NARRATIVE_HEADER: &str = "🧠 AI-Powered Market Intelligence:";
pub const PORTFOLIO_HEADER: &str = "💼 Portfolio Snapshot:";

/// Title line carrying the report date
pub fn title(date: NaiveDate) -> String {
    format!("📈 Daily Stock Insight Report – {}", date.format("%Y-%m-%d"))
}

/// Assemble the report: date title, narrative section, portfolio section
pub fn assemble(date: NaiveDate, narrative: &str, snapshot: &str) -> String {
    format!(
        "{}\n\n{NARRATIVE_HEADER}\n{narrative}\n\n{PORTFOLIO_HEADER}\n{snapshot}\n",
        title(date)
    )
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_in_order() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let report = assemble(
            date,
            "Top picks: NVDA",
            "AAPL – 6mo Change: 10.00% | Current Price: $110.00\n",
        );

        let title_at = report.find("Daily Stock Insight Report – 2025-08-04").unwrap();
        let narrative_at = report.find(NARRATIVE_HEADER).unwrap();
        let picks_at = report.find("Top picks: NVDA").unwrap();
        let portfolio_at = report.find(PORTFOLIO_HEADER).unwrap();
        let line_at = report.find("AAPL – 6mo Change").unwrap();

        assert!(title_at < narrative_at);
        assert!(narrative_at < picks_at);
        assert!(picks_at < portfolio_at);
        assert!(portfolio_at < line_at);
    }

    #[test]
    fn test_exact_layout() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(
            assemble(date, "N", "S\n"),
            "📈 Daily Stock Insight Report – 2025-01-09\n\n🧠 AI-Powered Market Intelligence:\nN\n\n💼 Portfolio Snapshot:\nS\n\n"
        );
    }

    #[test]
    fn test_empty_sections_keep_headers() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let report = assemble(date, "", "");

        assert!(report.starts_with("📈 Daily Stock Insight Report – 2025-12-31"));
        assert!(report.contains(NARRATIVE_HEADER));
        assert!(report.contains(PORTFOLIO_HEADER));
    }
}
