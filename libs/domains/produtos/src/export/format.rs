use rust_decimal::{Decimal, RoundingStrategy};

/// Brazilian-style money text: fixed `decimals` digits, no thousands
/// separator, comma as decimal mark.
///
/// ```
/// use domain_produtos::export::monetary_format;
/// use rust_decimal::Decimal;
///
/// assert_eq!(monetary_format(Decimal::new(125, 1), 2), "12,50");
/// assert_eq!(monetary_format(Decimal::new(1000, 0), 3), "1000,000");
/// ```
pub fn monetary_format(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, rounded)
        .replace(',', "")
        .replace('.', ",")
}

pub fn sim_nao(value: bool) -> &'static str {
    if value { "Sim" } else { "Não" }
}

/// File-name slug of a report title: spaces become `-`, lowercased.
pub fn slug(title: &str) -> String {
    title.replace(' ', "-").to_lowercase()
}
