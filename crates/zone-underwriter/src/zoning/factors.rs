use super::domain::{
    Demographics, MarketCyclePhase, MarketMetrics, MlMetrics, RiskAssessment, ZoneFactors,
};

struct MarketStrengthWeights;

impl MarketStrengthWeights {
    const PRICE_GROWTH: f64 = 0.3;
    const DAYS_ON_MARKET: f64 = 0.2;
    const CLEARANCE_RATE: f64 = 0.2;
    const SUPPLY_DEMAND: f64 = 0.3;
}

struct GrowthWeights;

impl GrowthWeights {
    const PRICE_GROWTH: f64 = 0.25;
    const EMPLOYMENT: f64 = 0.25;
    const INFRASTRUCTURE: f64 = 0.25;
    const MARKET_CYCLE: f64 = 0.25;
}

struct SafetyWeights;

impl SafetyWeights {
    const MARKET: f64 = 0.3;
    const DEVELOPMENT: f64 = 0.2;
    const ENVIRONMENTAL: f64 = 0.2;
    const REGULATORY: f64 = 0.3;
}

/// Days on market at which the liquidity contribution bottoms out.
const DAYS_ON_MARKET_CEILING: f64 = 90.0;
/// Annual growth (percent) that earns the full price-growth contribution.
const PRICE_GROWTH_CEILING: f64 = 10.0;

/// Derive the four zone factors from normalized suburb signals.
pub fn calculate_factors(
    market: &MarketMetrics,
    demographics: &Demographics,
    ml: &MlMetrics,
) -> ZoneFactors {
    ZoneFactors {
        market_strength: market_strength(market, ml),
        growth_potential: growth_potential(market, demographics, ml),
        risk_level: safety_score(&ml.risk_assessment),
        // Planned works are the only infrastructure signal available today.
        infrastructure_score: ml.infrastructure_analysis.average_improvement(),
    }
}

pub(crate) fn market_cycle_score(phase: MarketCyclePhase) -> f64 {
    match phase {
        MarketCyclePhase::Growth => 1.0,
        MarketCyclePhase::Peak => 0.5,
        MarketCyclePhase::Decline => 0.2,
        MarketCyclePhase::Bottom => 0.8,
    }
}

fn normalized_price_growth(market: &MarketMetrics) -> f64 {
    (market.price_growth / PRICE_GROWTH_CEILING).clamp(0.0, 1.0)
}

fn market_strength(market: &MarketMetrics, ml: &MlMetrics) -> f64 {
    let days = 1.0 - (market.days_on_market / DAYS_ON_MARKET_CEILING).clamp(0.0, 1.0);
    let clearance = market.clearance_rate / 100.0;
    let supply_demand = ml.supply_demand.ratio / 2.0;

    MarketStrengthWeights::PRICE_GROWTH * normalized_price_growth(market)
        + MarketStrengthWeights::DAYS_ON_MARKET * days
        + MarketStrengthWeights::CLEARANCE_RATE * clearance
        + MarketStrengthWeights::SUPPLY_DEMAND * supply_demand
}

fn growth_potential(market: &MarketMetrics, demographics: &Demographics, ml: &MlMetrics) -> f64 {
    let employment = demographics.employment_rate / 100.0;
    let infrastructure = ml.infrastructure_analysis.average_improvement();
    let cycle = market_cycle_score(ml.market_cycle.phase);

    GrowthWeights::PRICE_GROWTH * normalized_price_growth(market)
        + GrowthWeights::EMPLOYMENT * employment
        + GrowthWeights::INFRASTRUCTURE * infrastructure
        + GrowthWeights::MARKET_CYCLE * cycle
}

fn safety_score(risk: &RiskAssessment) -> f64 {
    SafetyWeights::MARKET * (1.0 - risk.market_risk / 100.0)
        + SafetyWeights::DEVELOPMENT * (1.0 - risk.development_risk / 100.0)
        + SafetyWeights::ENVIRONMENTAL * (1.0 - risk.environmental_risk / 100.0)
        + SafetyWeights::REGULATORY * (1.0 - risk.regulatory_risk / 100.0)
}
