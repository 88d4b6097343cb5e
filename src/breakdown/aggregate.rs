//! Size Aggregation
//!
//! Groups roster members by `(product, size)`. Order rosters carry their own product per member;
//! design-request rosters are replicated across every selected garment, one unit per member.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    breakdown::{BreakdownError, ProductSizeBreakdown, SizeEntry},
    catalog::{Catalog, PricingSource},
    roster::{RosterMember, records::ApparelSelection},
    sizes::{compare_sizes, normalize_size},
};

/// How members map onto products.
#[derive(Debug, Clone, Copy)]
pub enum AggregationMode<'s> {
    /// Each member carries its order line's product and unit price.
    Order,

    /// Every member needs one of each selected garment, priced at the selection's stored price.
    DesignRequest(&'s [ApparelSelection]),
}

/// Build one [`ProductSizeBreakdown`] per product.
///
/// Products appear in first-seen order (line order for orders, selection order for design
/// requests); sizes follow the canonical size table. The same inputs always give the same output.
///
/// # Errors
///
/// Returns [`BreakdownError::Overflow`] if quantities or totals overflow.
pub fn aggregate<'a>(
    products: &Catalog<'a>,
    members: &[RosterMember],
    mode: AggregationMode<'_>,
) -> Result<Vec<ProductSizeBreakdown<'a>>, BreakdownError> {
    let mut groups = ProductGroups::default();

    match mode {
        AggregationMode::Order => {
            for member in members {
                let Some(line) = &member.line else {
                    warn!(player = %member.player_id, "roster member has no order line, skipping");
                    continue;
                };

                let name = product_name(products, &line.product_id, line.product_name.as_deref());

                groups
                    .group(&line.product_id, name, line.unit_price)
                    .add(member, line.quantity)?;
            }
        }
        AggregationMode::DesignRequest(selections) => {
            for selection in selections {
                if groups.contains(&selection.product_id) {
                    continue;
                }

                let name = product_name(
                    products,
                    &selection.product_id,
                    selection.product_name.as_deref(),
                );

                let group = groups.group(&selection.product_id, name, selection.unit_price);

                for member in members {
                    group.add(member, 1)?;
                }
            }
        }
    }

    let breakdowns = groups.finish(products.currency())?;

    debug!(
        products = breakdowns.len(),
        members = members.len(),
        "aggregated size breakdown"
    );

    Ok(breakdowns)
}

fn product_name(products: &Catalog<'_>, product_id: &str, recorded: Option<&str>) -> String {
    products
        .product(product_id)
        .map(|product| product.name.as_str())
        .or(recorded)
        .unwrap_or(product_id)
        .to_string()
}

#[derive(Debug, Default)]
struct ProductGroups {
    order: Vec<String>,
    groups: FxHashMap<String, ProductGroup>,
}

impl ProductGroups {
    fn contains(&self, product_id: &str) -> bool {
        self.groups.contains_key(product_id)
    }

    fn group(&mut self, product_id: &str, name: String, unit_price: i64) -> &mut ProductGroup {
        self.groups
            .entry(product_id.to_string())
            .or_insert_with(|| {
                self.order.push(product_id.to_string());

                ProductGroup {
                    product_id: product_id.to_string(),
                    product_name: name,
                    unit_price,
                    sizes: FxHashMap::default(),
                }
            })
    }

    fn finish<'a>(
        self,
        currency: &'a Currency,
    ) -> Result<Vec<ProductSizeBreakdown<'a>>, BreakdownError> {
        let Self { order, mut groups } = self;

        order
            .iter()
            .filter_map(|product_id| groups.remove(product_id))
            .map(|group| group.finish(currency))
            .collect()
    }
}

#[derive(Debug)]
struct ProductGroup {
    product_id: String,
    product_name: String,
    unit_price: i64,
    sizes: FxHashMap<String, SizeEntry>,
}

impl ProductGroup {
    fn add(&mut self, member: &RosterMember, quantity: u32) -> Result<(), BreakdownError> {
        let size = normalize_size(member.size.as_deref());

        let entry = self
            .sizes
            .entry(size.clone())
            .or_insert_with(|| SizeEntry::new(size));

        entry.quantity = entry
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| BreakdownError::Overflow(self.product_id.clone()))?;

        if let Some(number) = &member.jersey_number {
            entry.jersey_numbers.push(number.clone());
        }

        if !member.display_name.is_empty() {
            entry.player_names.push(member.display_name.clone());
        }

        entry.player_ids.push(member.player_id.clone());
        entry.payment_statuses.push(member.paid);

        Ok(())
    }

    fn finish(self, currency: &Currency) -> Result<ProductSizeBreakdown<'_>, BreakdownError> {
        let mut sizes: Vec<SizeEntry> = self.sizes.into_values().collect();

        sizes.sort_by(|a, b| compare_sizes(&a.size, &b.size));

        let overflow = || BreakdownError::Overflow(self.product_id.clone());

        let total_quantity = sizes
            .iter()
            .try_fold(0u32, |acc, entry| acc.checked_add(entry.quantity))
            .ok_or_else(overflow)?;

        let total_price = self
            .unit_price
            .checked_mul(i64::from(total_quantity))
            .ok_or_else(overflow)?;

        Ok(ProductSizeBreakdown {
            product_id: self.product_id,
            product_name: self.product_name,
            sizes,
            total_quantity,
            unit_price: Money::from_minor(self.unit_price, currency),
            total_price: Money::from_minor(total_price, currency),
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::CLP;
    use testresult::TestResult;

    use crate::{
        pricing::fabrics::{DEFAULT_BASELINE_FABRIC, FabricOption, FabricTable},
        products::Product,
        roster::LineRef,
        sizes::UNKNOWN_SIZE,
    };

    use super::*;

    fn catalog() -> TestResult<Catalog<'static>> {
        let mut catalog = Catalog::new(
            CLP,
            FabricTable::new(Vec::<FabricOption<'static>>::new(), DEFAULT_BASELINE_FABRIC)?,
        );

        catalog.insert_product(Product::new(
            "jersey",
            "Home Jersey",
            Money::from_minor(1_000, CLP),
        ))?;

        Ok(catalog)
    }

    fn member(id: &str, size: Option<&str>, number: Option<&str>, paid: bool) -> RosterMember {
        RosterMember {
            player_id: id.to_string(),
            name: id.to_uppercase(),
            display_name: id.to_uppercase(),
            size: size.map(ToString::to_string),
            jersey_number: number.map(ToString::to_string),
            paid,
            line: None,
        }
    }

    fn on_line(mut member: RosterMember, product_id: &str, unit_price: i64) -> RosterMember {
        member.line = Some(LineRef {
            product_id: product_id.to_string(),
            product_name: Some(format!("{product_id} (recorded)")),
            unit_price,
            quantity: 1,
        });

        member
    }

    fn selection(product_id: &str, unit_price: i64) -> ApparelSelection {
        ApparelSelection {
            product_id: product_id.to_string(),
            product_name: None,
            unit_price,
        }
    }

    #[test]
    fn design_request_roster_is_grouped_by_size() -> TestResult {
        let members = [
            member("a", Some("M"), Some("1"), true),
            member("b", Some("M"), None, false),
            member("c", Some("L"), Some("3"), false),
        ];
        let selections = [selection("jersey", 1_000)];

        let breakdowns = aggregate(
            &catalog()?,
            &members,
            AggregationMode::DesignRequest(&selections),
        )?;

        assert_eq!(breakdowns.len(), 1);

        let jersey = breakdowns.first().ok_or("missing breakdown")?;
        let sizes: Vec<(&str, u32)> = jersey
            .sizes
            .iter()
            .map(|entry| (entry.size.as_str(), entry.quantity))
            .collect();

        assert_eq!(sizes, [("M", 2), ("L", 1)]);
        assert_eq!(jersey.total_quantity, 3);
        assert_eq!(jersey.total_price, Money::from_minor(3_000, CLP));
        assert_eq!(jersey.product_name, "Home Jersey");

        Ok(())
    }

    #[test]
    fn design_request_roster_is_replicated_per_selection() -> TestResult {
        let members = [
            member("a", Some("S"), None, false),
            member("b", Some("XL"), None, false),
        ];
        let selections = [
            selection("jersey", 1_000),
            selection("shorts", 700),
            selection("jersey", 1_000),
        ];

        let breakdowns = aggregate(
            &catalog()?,
            &members,
            AggregationMode::DesignRequest(&selections),
        )?;

        let ids: Vec<&str> = breakdowns.iter().map(|b| b.product_id.as_str()).collect();

        assert_eq!(ids, ["jersey", "shorts"]);
        assert!(breakdowns.iter().all(|b| b.total_quantity == 2));
        assert_eq!(
            breakdowns.last().map(|b| b.total_price),
            Some(Money::from_minor(1_400, CLP))
        );
        assert_eq!(
            breakdowns.last().map(|b| b.product_name.as_str()),
            Some("shorts")
        );

        Ok(())
    }

    #[test]
    fn missing_size_is_grouped_last_as_sentinel() -> TestResult {
        let members = [
            member("a", None, None, false),
            member("b", Some("XS"), None, false),
            member("c", Some("  "), None, false),
            member("d", Some("Custom"), None, false),
        ];
        let selections = [selection("jersey", 1_000)];

        let breakdowns = aggregate(
            &catalog()?,
            &members,
            AggregationMode::DesignRequest(&selections),
        )?;

        let sizes: Vec<(&str, u32)> = breakdowns
            .first()
            .map(|b| {
                b.sizes
                    .iter()
                    .map(|entry| (entry.size.as_str(), entry.quantity))
                    .collect()
            })
            .unwrap_or_default();

        assert_eq!(sizes, [("XS", 1), ("Custom", 1), (UNKNOWN_SIZE, 2)]);

        Ok(())
    }

    #[test]
    fn order_roster_groups_by_line_product() -> TestResult {
        let members = [
            on_line(member("a", Some("M"), Some("10"), true), "jersey", 1_200),
            on_line(member("b", Some("S"), Some("4"), false), "shorts", 800),
            on_line(member("c", Some("M"), Some("7"), false), "jersey", 1_200),
            member("d", Some("M"), None, false),
        ];

        let breakdowns = aggregate(&catalog()?, &members, AggregationMode::Order)?;

        let ids: Vec<&str> = breakdowns.iter().map(|b| b.product_id.as_str()).collect();

        assert_eq!(ids, ["jersey", "shorts"]);

        let jersey = breakdowns.first().ok_or("missing jersey")?;
        let medium = jersey.size("M").ok_or("missing size M")?;

        assert_eq!(medium.quantity, 2);
        assert_eq!(medium.jersey_numbers, ["10", "7"]);
        assert_eq!(medium.player_ids, ["a", "c"]);
        assert_eq!(medium.payment_statuses, [true, false]);
        assert_eq!(medium.paid_count(), 1);
        assert_eq!(jersey.unit_price, Money::from_minor(1_200, CLP));
        assert_eq!(jersey.total_price, Money::from_minor(2_400, CLP));
        assert_eq!(jersey.product_name, "Home Jersey");
        assert_eq!(
            breakdowns.last().map(|b| b.product_name.as_str()),
            Some("shorts (recorded)")
        );

        Ok(())
    }

    #[test]
    fn optional_fields_only_push_when_present() -> TestResult {
        let mut nameless = member("b", Some("M"), None, false);
        nameless.display_name = String::new();

        let members = [member("a", Some("M"), Some("9"), true), nameless];
        let selections = [selection("jersey", 1_000)];

        let breakdowns = aggregate(
            &catalog()?,
            &members,
            AggregationMode::DesignRequest(&selections),
        )?;

        let medium = breakdowns
            .first()
            .and_then(|b| b.size("M"))
            .ok_or("missing size M")?;

        assert_eq!(medium.jersey_numbers.len(), 1);
        assert_eq!(medium.player_names.len(), 1);
        assert_eq!(medium.player_ids.len(), 2);
        assert_eq!(medium.payment_statuses.len(), 2);

        Ok(())
    }

    #[test]
    fn every_member_lands_in_exactly_one_size_per_product() -> TestResult {
        let sizes = ["M", "XL", "S", "", "L", "YM", "M", "Custom", "S"];
        let members: Vec<RosterMember> = sizes
            .iter()
            .enumerate()
            .map(|(idx, size)| member(&format!("p{idx}"), Some(size), None, idx % 2 == 0))
            .collect();
        let selections = [selection("jersey", 1_000), selection("socks", 300)];

        let breakdowns = aggregate(
            &catalog()?,
            &members,
            AggregationMode::DesignRequest(&selections),
        )?;

        for breakdown in &breakdowns {
            let mut ids: Vec<&str> = breakdown
                .sizes
                .iter()
                .flat_map(|entry| entry.player_ids.iter().map(String::as_str))
                .collect();
            ids.sort_unstable();
            ids.dedup();

            let quantity: u32 = breakdown.sizes.iter().map(|entry| entry.quantity).sum();

            assert_eq!(ids.len(), members.len());
            assert_eq!(quantity, breakdown.total_quantity);
        }

        Ok(())
    }

    #[test]
    fn aggregation_is_deterministic() -> TestResult {
        let catalog = catalog()?;
        let members: Vec<RosterMember> = ["XL", "M", "N/A", "S", "Custom", "M"]
            .iter()
            .enumerate()
            .map(|(idx, size)| {
                on_line(
                    member(&format!("p{idx}"), Some(size), None, false),
                    if idx % 2 == 0 { "jersey" } else { "shorts" },
                    500,
                )
            })
            .collect();

        let first = aggregate(&catalog, &members, AggregationMode::Order)?;
        let second = aggregate(&catalog, &members, AggregationMode::Order)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn overflowing_totals_are_errors() -> TestResult {
        let members = [on_line(member("a", Some("M"), None, false), "jersey", i64::MAX)];
        let mut doubled = members.to_vec();
        doubled.extend(members.iter().cloned());

        let result = aggregate(&catalog()?, &doubled, AggregationMode::Order);

        assert!(matches!(result, Err(BreakdownError::Overflow(id)) if id == "jersey"));

        Ok(())
    }
}
