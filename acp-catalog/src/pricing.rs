use acp_core::checkout::{FulfillmentOption, Item, LineItem, TotalKind, TotalsRow};
use acp_core::{CheckoutError, CheckoutResult};
use acp_shared::{prefixed_id, IdPrefix};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::product::PriceOracle;

const BPS_DENOMINATOR: i64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Sales tax rate in basis points (850 = 8.5%).
    pub tax_rate_bps: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { tax_rate_bps: 850 }
    }
}

/// Result of pricing a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartBreakdown {
    pub line_items: Vec<LineItem>,
    pub totals: Vec<TotalsRow>,
    pub grand_total: i64,
}

/// Turns requested items plus an optional fulfillment choice into priced line
/// items and a totals breakdown. Holds no mutable state; the same input always
/// yields the same amounts.
#[derive(Clone)]
pub struct CartCalculator {
    oracle: Arc<dyn PriceOracle>,
    config: PricingConfig,
}

impl CartCalculator {
    pub fn new(oracle: Arc<dyn PriceOracle>, config: PricingConfig) -> Self {
        Self { oracle, config }
    }

    /// Tax on a single line, rounded half-up to the nearest minor unit.
    pub fn tax_for(&self, base_amount: i64) -> CheckoutResult<i64> {
        base_amount
            .checked_mul(i64::from(self.config.tax_rate_bps))
            .and_then(|scaled| scaled.checked_add(BPS_DENOMINATOR / 2))
            .map(|scaled| scaled / BPS_DENOMINATOR)
            .ok_or_else(|| CheckoutError::AmountOverflow("tax".to_string()))
    }

    fn price_line(&self, item: &Item) -> CheckoutResult<LineItem> {
        let unit_price = self.oracle.price_for(&item.id)?;
        let base_amount = unit_price
            .checked_mul(i64::from(item.quantity))
            .ok_or_else(|| CheckoutError::AmountOverflow(item.id.clone()))?;
        let discount = 0;
        let subtotal = base_amount - discount;
        let tax = self.tax_for(subtotal)?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| CheckoutError::AmountOverflow(item.id.clone()))?;

        Ok(LineItem {
            id: prefixed_id(IdPrefix::LineItem),
            item: item.clone(),
            base_amount,
            discount,
            subtotal,
            tax,
            total,
        })
    }

    /// Price every item. Any unknown SKU aborts the whole computation.
    pub fn compute(
        &self,
        items: &[Item],
        fulfillment: Option<&FulfillmentOption>,
    ) -> CheckoutResult<CartBreakdown> {
        let line_items = items
            .iter()
            .map(|item| self.price_line(item))
            .collect::<CheckoutResult<Vec<_>>>()?;

        let items_base_amount = checked_sum(line_items.iter().map(|li| li.base_amount), "items")?;
        let tax = checked_sum(line_items.iter().map(|li| li.tax), "tax")?;
        let shipping = fulfillment.map(|option| option.amount).unwrap_or(0);
        let grand_total = checked_sum([items_base_amount, tax, shipping], "total")?;

        let mut totals = vec![
            TotalsRow::new(TotalKind::ItemsBaseAmount, items_base_amount),
            TotalsRow::new(TotalKind::Tax, tax),
        ];
        if fulfillment.is_some() {
            totals.push(TotalsRow::new(TotalKind::Shipping, shipping));
        }
        totals.push(TotalsRow::new(TotalKind::Total, grand_total));

        Ok(CartBreakdown {
            line_items,
            totals,
            grand_total,
        })
    }
}

fn checked_sum(amounts: impl IntoIterator<Item = i64>, what: &str) -> CheckoutResult<i64> {
    amounts
        .into_iter()
        .try_fold(0i64, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| CheckoutError::AmountOverflow(what.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fulfillment::default_fulfillment_options;
    use crate::product::{CatalogEntry, StaticCatalog};
    use rstest::rstest;

    fn calculator() -> CartCalculator {
        CartCalculator::new(Arc::new(StaticCatalog::default()), PricingConfig::default())
    }

    fn amount(breakdown: &CartBreakdown, kind: TotalKind) -> Option<i64> {
        breakdown
            .totals
            .iter()
            .find(|row| row.kind == kind)
            .map(|row| row.amount)
    }

    #[rstest]
    #[case(0, 0)]
    #[case(100, 9)] // 8.5 rounds up
    #[case(300, 26)] // 25.5 rounds up, not to even
    #[case(500, 43)] // 42.5 rounds up
    #[case(1000, 85)]
    #[case(2000, 170)]
    #[case(1850, 157)] // 157.25
    #[case(8999, 765)] // 764.915
    fn test_tax_rounds_half_up(#[case] base: i64, #[case] expected: i64) {
        assert_eq!(calculator().tax_for(base).unwrap(), expected);
    }

    #[test]
    fn test_default_economy_scenario() {
        let options = default_fulfillment_options();
        let breakdown = calculator()
            .compute(&[Item::new("sku1", 2)], options.first())
            .unwrap();

        assert_eq!(amount(&breakdown, TotalKind::ItemsBaseAmount), Some(2000));
        assert_eq!(amount(&breakdown, TotalKind::Tax), Some(170));
        assert_eq!(amount(&breakdown, TotalKind::Shipping), Some(599));
        assert_eq!(amount(&breakdown, TotalKind::Total), Some(2769));
        assert_eq!(breakdown.grand_total, 2769);

        let line = &breakdown.line_items[0];
        assert_eq!(line.base_amount, 2000);
        assert_eq!(line.discount, 0);
        assert_eq!(line.subtotal, 2000);
        assert_eq!(line.tax, 170);
        assert_eq!(line.total, 2170);
        assert!(line.id.starts_with("li_"));
    }

    #[test]
    fn test_totals_rows_are_ordered() {
        let options = default_fulfillment_options();
        let breakdown = calculator()
            .compute(&[Item::new("sku2", 1)], options.get(1))
            .unwrap();

        let kinds: Vec<TotalKind> = breakdown.totals.iter().map(|row| row.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TotalKind::ItemsBaseAmount,
                TotalKind::Tax,
                TotalKind::Shipping,
                TotalKind::Total
            ]
        );
        assert_eq!(breakdown.totals[0].display_text, "Item(s) total");
    }

    #[test]
    fn test_no_fulfillment_omits_shipping_row() {
        let breakdown = calculator().compute(&[Item::new("sku1", 1)], None).unwrap();

        assert_eq!(amount(&breakdown, TotalKind::Shipping), None);
        assert_eq!(breakdown.totals.len(), 3);
        assert_eq!(breakdown.grand_total, 1000 + 85);
    }

    #[test]
    fn test_unknown_sku_aborts_whole_cart() {
        let result = calculator().compute(&[Item::new("sku1", 1), Item::new("ghost", 1)], None);
        assert!(matches!(result, Err(CheckoutError::UnknownSku(sku)) if sku == "ghost"));
    }

    #[test]
    fn test_line_totals_plus_shipping_equal_total() {
        let options = default_fulfillment_options();
        let items = vec![
            Item::new("sku1", 3),
            Item::new("sku3", 1),
            Item::new("sku4", 2),
            Item::new("sku5", 1),
        ];

        for option in [None, options.first(), options.get(1)] {
            let breakdown = calculator().compute(&items, option).unwrap();
            let lines: i64 = breakdown.line_items.iter().map(|li| li.total).sum();
            let shipping = amount(&breakdown, TotalKind::Shipping).unwrap_or(0);
            assert_eq!(lines + shipping, amount(&breakdown, TotalKind::Total).unwrap());
        }
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let options = default_fulfillment_options();
        let items = vec![Item::new("sku1", 2), Item::new("sku2", 5)];

        let first = calculator().compute(&items, options.first()).unwrap();
        let second = calculator().compute(&items, options.first()).unwrap();

        assert_eq!(first.totals, second.totals);
        assert_eq!(first.grand_total, second.grand_total);
        for (a, b) in first.line_items.iter().zip(&second.line_items) {
            assert_eq!((a.base_amount, a.tax, a.total), (b.base_amount, b.tax, b.total));
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn test_empty_cart() {
        let breakdown = calculator().compute(&[], None).unwrap();
        assert!(breakdown.line_items.is_empty());
        assert_eq!(breakdown.grand_total, 0);
    }

    #[test]
    fn test_overflow_is_reported() {
        let catalog = StaticCatalog::new([CatalogEntry::new("whale", "Whale", i64::MAX / 2)]);
        let calculator = CartCalculator::new(Arc::new(catalog), PricingConfig::default());

        let result = calculator.compute(&[Item::new("whale", 4)], None);
        assert!(matches!(result, Err(CheckoutError::AmountOverflow(_))));
    }
}
