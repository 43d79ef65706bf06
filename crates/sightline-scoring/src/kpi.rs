//! KPI keys read by the axis formulas and the valuation axis

/// Forward revenue growth, percent
pub const FORWARD_GROWTH_PCT: &str = "forward_growth_pct";
/// Change in operating margin, percentage points
pub const MARGIN_DELTA_PP: &str = "margin_delta_pp";
/// Share dilution, percent
pub const DILUTION_PCT: &str = "dilution_pct";
/// Capital expenditure as a share of revenue, percent
pub const CAPEX_INTENSITY_PCT: &str = "capex_intensity_pct";

/// Next-period revenue growth, percent
pub const NEXT_PERIOD_GROWTH_PCT: &str = "next_period_growth_pct";
/// Revision to company guidance, percent
pub const GUIDANCE_REVISION_PCT: &str = "guidance_revision_pct";
/// Order or backlog growth, percent
pub const ORDER_BACKLOG_GROWTH_PCT: &str = "order_backlog_growth_pct";
/// Composite financial-health score, 0 to 100
pub const COMPOSITE_HEALTH_SCORE: &str = "composite_health_score";

/// Observed valuation multiple
pub const ACTUAL_MULTIPLE: &str = "actual_multiple";
/// Median multiple of the peer group
pub const PEER_MEDIAN_MULTIPLE: &str = "peer_median_multiple";
/// Operating margin, percent
pub const OPERATING_MARGIN_PCT: &str = "operating_margin_pct";
/// Growth the current price implies, percent
pub const IMPLIED_GROWTH_PCT: &str = "implied_growth_pct";

/// Inputs of the growth-confidence axis, in formula order
pub const GROWTH_CONFIDENCE_INPUTS: &[&str] = &[
    FORWARD_GROWTH_PCT,
    MARGIN_DELTA_PP,
    DILUTION_PCT,
    CAPEX_INTENSITY_PCT,
];

/// Inputs of the momentum axis, in formula order
pub const MOMENTUM_INPUTS: &[&str] = &[
    NEXT_PERIOD_GROWTH_PCT,
    GUIDANCE_REVISION_PCT,
    ORDER_BACKLOG_GROWTH_PCT,
    MARGIN_DELTA_PP,
    COMPOSITE_HEALTH_SCORE,
];

/// Required inputs of the valuation axis
///
/// [`IMPLIED_GROWTH_PCT`] is optional and never reported as a gap.
pub const VALUATION_INPUTS: &[&str] = &[
    ACTUAL_MULTIPLE,
    PEER_MEDIAN_MULTIPLE,
    FORWARD_GROWTH_PCT,
    OPERATING_MARGIN_PCT,
];
