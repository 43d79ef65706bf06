//! KPI keys read by the consistency checks

/// Reported revenue for the period
pub const REVENUE: &str = "revenue";
/// Reported gross profit for the period
pub const GROSS_PROFIT: &str = "gross_profit";
/// Reported gross margin, percent
pub const GROSS_MARGIN_PCT: &str = "gross_margin_pct";
/// Gross margin the company guided to, percent
pub const GUIDED_GROSS_MARGIN_PCT: &str = "guided_gross_margin_pct";
/// Reported operating expenses for the period
pub const OPERATING_EXPENSES: &str = "operating_expenses";
/// Operating expenses as a share of revenue the company guided to, percent
pub const GUIDED_OPEX_RATIO_PCT: &str = "guided_opex_ratio_pct";
/// Low end of revenue guidance
pub const REVENUE_GUIDANCE_LOW: &str = "revenue_guidance_low";
/// High end of revenue guidance
pub const REVENUE_GUIDANCE_HIGH: &str = "revenue_guidance_high";

/// Every key the guard reads
pub const GUARD_INPUTS: &[&str] = &[
    REVENUE,
    GROSS_PROFIT,
    GROSS_MARGIN_PCT,
    GUIDED_GROSS_MARGIN_PCT,
    OPERATING_EXPENSES,
    GUIDED_OPEX_RATIO_PCT,
    REVENUE_GUIDANCE_LOW,
    REVENUE_GUIDANCE_HIGH,
];
