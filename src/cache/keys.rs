//! Cache key catalogue for the POS service.
//!
//! Keys are colon-delimited namespaces. Because invalidation matches on
//! substrings, a namespace such as [`DASHBOARD_SCOPE`] clears every key
//! beneath it.

/// Namespace of the dashboard counters.
pub const DASHBOARD_SCOPE: &str = "dashboard";
/// Namespace of the report/analytics queries.
pub const ANALYTICS_SCOPE: &str = "analytics";

pub const DASHBOARD_STATS: &str = "dashboard:stats";
pub const LOW_STOCK_COUNT: &str = "dashboard:low_stock_count";
pub const TODAY_SALES: &str = "dashboard:today_sales";
pub const PRODUCT_COUNT: &str = "dashboard:product_count";
pub const TOTAL_REVENUE: &str = "dashboard:total_revenue";
pub const CATEGORY_SALES: &str = "analytics:category_sales";

/// `analytics:top_products:{limit}`
pub fn top_products(limit: u32) -> String {
    format!("{ANALYTICS_SCOPE}:top_products:{limit}")
}

/// `analytics:sales_by_date:{days}`
pub fn sales_by_date(days: u32) -> String {
    format!("{ANALYTICS_SCOPE}:sales_by_date:{days}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_keys() {
        assert_eq!(top_products(5), "analytics:top_products:5");
        assert_eq!(sales_by_date(30), "analytics:sales_by_date:30");
    }

    #[test]
    fn test_dashboard_keys_share_scope() {
        for key in [
            DASHBOARD_STATS,
            LOW_STOCK_COUNT,
            TODAY_SALES,
            PRODUCT_COUNT,
            TOTAL_REVENUE,
        ] {
            assert!(key.starts_with(DASHBOARD_SCOPE), "{key}");
        }
        assert!(!CATEGORY_SALES.contains(DASHBOARD_SCOPE));
    }
}
