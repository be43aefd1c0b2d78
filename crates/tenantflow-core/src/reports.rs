//! # Sales Reports
//!
//! Pure aggregation functions behind the store-owner dashboard.
//!
//! ## Reporting Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Reporting Pipeline                                  │
//! │                                                                         │
//! │  OrderRepository ──► orders of ONE store ──┐                            │
//! │  (caller filters)                          │                            │
//! │                                            ▼                            │
//! │                              ┌──────────────────────────┐               │
//! │                              │   this module (pure)     │               │
//! │                              │                          │               │
//! │                              │  period filter           │               │
//! │                              │  drop Cancelled          │               │
//! │                              │  bucket / merge / rank   │               │
//! │                              └────────────┬─────────────┘               │
//! │                                           │                             │
//! │        ┌──────────────┬──────────────┬────┴─────────┬──────────────┐   │
//! │        ▼              ▼              ▼              ▼              ▼   │
//! │  SalesSummary   DailyRevenue   ProductSales   CategorySales  Period-   │
//! │  (cards)        (line chart)   (top 5)        (pie chart)    Comparison│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Callers pass the orders of a single store; nothing here joins stores
//! - Cancelled orders never count, regardless of payment status
//! - Orders bucket by the UTC calendar date of `created_at`
//! - Summary, daily series and comparisons use the charged order total
//!   (items + delivery fee); product and category tables use line totals
//! - Category slices resolve each line's owning product at report time;
//!   order lines themselves never store a category
//! - Rankings keep first-encountered order on ties (stable sort over
//!   insertion-ordered aggregation)

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Category, Order, Product};
use crate::{TOP_RANKING_LIMIT, UNCATEGORIZED_LABEL};

// =============================================================================
// Report Period
// =============================================================================

/// An inclusive range of calendar dates.
///
/// "Last 7 days" means the 7 calendar days ending today, so the summary
/// filter and the daily chart agree bucket for bucket: summary revenue
/// always equals the sum of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportPeriod {
    #[ts(as = "String")]
    pub start: NaiveDate,
    #[ts(as = "String")]
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// The `days` calendar days ending at `today` (inclusive).
    ///
    /// `days` is clamped to at least 1.
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let days = days.max(1);
        let start = today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .unwrap_or(today);
        ReportPeriod { start, end: today }
    }

    /// A full calendar month.
    pub fn month(year: i32, month: u32) -> CoreResult<Self> {
        let out_of_range = || ValidationError::OutOfRange {
            field: "month".to_string(),
            min: 1,
            max: 12,
        };

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let next_month_start = match month {
            12 => NaiveDate::from_ymd_opt(year + 1, 1, 1),
            _ => NaiveDate::from_ymd_opt(year, month + 1, 1),
        };
        let end = next_month_start
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .ok_or_else(out_of_range)?;

        Ok(ReportPeriod { start, end })
    }

    /// A full calendar year.
    pub fn year(year: i32) -> CoreResult<Self> {
        let out_of_range = || ValidationError::InvalidFormat {
            field: "year".to_string(),
            reason: "outside the supported calendar range".to_string(),
        };

        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;
        Ok(ReportPeriod { start, end })
    }

    /// Checks if a date falls inside the period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered (at least 1).
    pub fn days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days() + 1
    }

    /// Every date in the period, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(|d| *d <= self.end)
    }

    /// The window of the same length immediately before this one.
    ///
    /// None only when the result would leave the supported calendar range.
    pub fn previous(&self) -> Option<Self> {
        let end = self.start.checked_sub_days(Days::new(1))?;
        let start = end.checked_sub_days(Days::new((self.days() - 1) as u64))?;
        Some(ReportPeriod { start, end })
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Charged totals summed, in cents.
    pub revenue_cents: i64,
    pub order_count: i64,
    /// revenue / orders, integer division; 0 when there are no orders.
    pub average_order_value_cents: i64,
    /// Distinct registered customers; walk-in orders carry no identity
    /// and are not counted here.
    pub unique_customers: i64,
}

/// One point of the revenue line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub revenue_cents: i64,
    pub order_count: i64,
}

/// What to rank products by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Revenue,
    Quantity,
}

/// One product's aggregate over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    /// Name from the first line encountered (snapshots may differ after
    /// a rename; the first one wins).
    pub name: String,
    pub quantity_millis: i64,
    pub revenue_cents: i64,
}

/// One category slice of the pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    /// None is the bucket for lines without a (known) category.
    pub category_id: Option<String>,
    pub name: String,
    pub quantity_millis: i64,
    pub revenue_cents: i64,
}

/// One customer's aggregate over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSales {
    pub customer_id: String,
    pub name: String,
    pub order_count: i64,
    pub revenue_cents: i64,
}

/// Current window vs the one before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current_period: ReportPeriod,
    pub previous_period: ReportPeriod,
    pub current: SalesSummary,
    pub previous: SalesSummary,
    /// Whole-percent change. When the previous window had no revenue the
    /// convention is 100 if the current one has any, else 0.
    pub revenue_change_pct: i64,
    /// Same convention as `revenue_change_pct`, over order counts.
    pub order_count_change_pct: i64,
}

/// One row of the monthly per-product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductBreakdownRow {
    pub product_id: String,
    pub name: String,
    pub quantity_millis: i64,
    pub revenue_cents: i64,
    /// Mean of the unit prices of the lines that sold this product, NOT
    /// revenue divided by quantity. Two lines at R$ 10 and R$ 20 average
    /// R$ 15 no matter how much each line sold.
    pub average_unit_price_cents: i64,
}

// =============================================================================
// Aggregations
// =============================================================================

/// Orders that count for reports inside a period.
fn eligible(orders: &[Order], period: ReportPeriod) -> impl Iterator<Item = &Order> {
    orders
        .iter()
        .filter(move |o| o.counts_for_reports() && period.contains(o.created_at.date_naive()))
}

/// Headline figures over a period.
pub fn sales_summary(orders: &[Order], period: ReportPeriod) -> SalesSummary {
    let mut revenue_cents: i64 = 0;
    let mut order_count: i64 = 0;
    let mut customers: HashSet<&str> = HashSet::new();

    for order in eligible(orders, period) {
        revenue_cents += order.total_cents;
        order_count += 1;
        if let Some(id) = order.customer_id.as_deref() {
            customers.insert(id);
        }
    }

    let average_order_value_cents = if order_count == 0 {
        0
    } else {
        revenue_cents / order_count
    };

    SalesSummary {
        revenue_cents,
        order_count,
        average_order_value_cents,
        unique_customers: customers.len() as i64,
    }
}

/// Revenue per calendar day, zero-filled over the whole period.
///
/// Every date in the period gets a point, revenue or not; charts never
/// have to infer gaps.
pub fn daily_revenue(orders: &[Order], period: ReportPeriod) -> Vec<DailyRevenue> {
    let mut series: Vec<DailyRevenue> = period
        .dates()
        .map(|date| DailyRevenue {
            date,
            revenue_cents: 0,
            order_count: 0,
        })
        .collect();

    for order in eligible(orders, period) {
        let date = order.created_at.date_naive();
        if let Some(point) = series.iter_mut().find(|p| p.date == date) {
            point.revenue_cents += order.total_cents;
            point.order_count += 1;
        }
    }

    series
}

/// The five best-selling products of a period, by the chosen metric.
///
/// Aggregation keeps insertion order, so ties rank in first-encountered
/// order (an accepted ambiguity of the dashboard).
pub fn top_products(orders: &[Order], period: ReportPeriod, metric: RankMetric) -> Vec<ProductSales> {
    let mut rows: Vec<ProductSales> = Vec::new();

    for order in eligible(orders, period) {
        for item in &order.items {
            match rows.iter_mut().find(|r| r.product_id == item.product_id) {
                Some(row) => {
                    row.quantity_millis += item.quantity_millis;
                    row.revenue_cents += item.line_total_cents;
                }
                None => rows.push(ProductSales {
                    product_id: item.product_id.clone(),
                    name: item.name_snapshot.clone(),
                    quantity_millis: item.quantity_millis,
                    revenue_cents: item.line_total_cents,
                }),
            }
        }
    }

    match metric {
        RankMetric::Revenue => rows.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents)),
        RankMetric::Quantity => rows.sort_by(|a, b| b.quantity_millis.cmp(&a.quantity_millis)),
    }
    rows.truncate(TOP_RANKING_LIMIT);
    rows
}

/// Line revenue grouped by product category, highest first.
///
/// Each line resolves its owning product's category at report time, so
/// recategorizing a product moves its past sales too. Lines whose product
/// is gone, carries no category, or points at a category the store no
/// longer has, fold into one "Uncategorized" bucket.
pub fn sales_by_category(
    orders: &[Order],
    products: &[Product],
    categories: &[Category],
    period: ReportPeriod,
) -> Vec<CategorySales> {
    let product_categories: HashMap<&str, Option<&str>> = products
        .iter()
        .map(|p| (p.id.as_str(), p.category_id.as_deref()))
        .collect();
    let names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let mut rows: Vec<CategorySales> = Vec::new();

    for order in eligible(orders, period) {
        for item in &order.items {
            // Deleted products and unknown ids fold into the
            // uncategorized bucket
            let key = product_categories
                .get(item.product_id.as_str())
                .copied()
                .flatten()
                .filter(|id| names.contains_key(id))
                .map(str::to_string);

            match rows.iter_mut().find(|r| r.category_id == key) {
                Some(row) => {
                    row.quantity_millis += item.quantity_millis;
                    row.revenue_cents += item.line_total_cents;
                }
                None => {
                    let name = key
                        .as_deref()
                        .and_then(|id| names.get(id))
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
                    rows.push(CategorySales {
                        category_id: key,
                        name,
                        quantity_millis: item.quantity_millis,
                        revenue_cents: item.line_total_cents,
                    });
                }
            }
        }
    }

    rows.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));
    rows
}

/// The five highest-spending registered customers of a period.
///
/// Walk-in orders carry no customer identity and are skipped.
pub fn top_customers(orders: &[Order], period: ReportPeriod) -> Vec<CustomerSales> {
    let mut rows: Vec<CustomerSales> = Vec::new();

    for order in eligible(orders, period) {
        let Some(customer_id) = order.customer_id.as_deref() else {
            continue;
        };

        match rows.iter_mut().find(|r| r.customer_id == customer_id) {
            Some(row) => {
                row.order_count += 1;
                row.revenue_cents += order.total_cents;
            }
            None => rows.push(CustomerSales {
                customer_id: customer_id.to_string(),
                name: order.customer_name.clone(),
                order_count: 1,
                revenue_cents: order.total_cents,
            }),
        }
    }

    rows.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));
    rows.truncate(TOP_RANKING_LIMIT);
    rows
}

/// Whole-percent change with the zero-previous convention: a window that
/// grew out of nothing reads as +100%, two empty windows read as 0%.
fn percentage_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    ((current - previous) as i128 * 100 / previous as i128) as i64
}

/// Compares two arbitrary windows.
pub fn compare_periods(
    orders: &[Order],
    current_period: ReportPeriod,
    previous_period: ReportPeriod,
) -> PeriodComparison {
    let current = sales_summary(orders, current_period);
    let previous = sales_summary(orders, previous_period);

    let revenue_change_pct = percentage_change(current.revenue_cents, previous.revenue_cents);
    let order_count_change_pct = percentage_change(current.order_count, previous.order_count);

    PeriodComparison {
        current_period,
        previous_period,
        current,
        previous,
        revenue_change_pct,
        order_count_change_pct,
    }
}

/// A month against the month before it (January compares to December of
/// the previous year).
pub fn month_over_month(orders: &[Order], year: i32, month: u32) -> CoreResult<PeriodComparison> {
    let current = ReportPeriod::month(year, month)?;
    let previous = match month {
        1 => ReportPeriod::month(year - 1, 12)?,
        _ => ReportPeriod::month(year, month - 1)?,
    };
    Ok(compare_periods(orders, current, previous))
}

/// A year against the year before it.
pub fn year_over_year(orders: &[Order], year: i32) -> CoreResult<PeriodComparison> {
    let current = ReportPeriod::year(year)?;
    let previous = ReportPeriod::year(year - 1)?;
    Ok(compare_periods(orders, current, previous))
}

/// Per-product table for one calendar month, highest revenue first.
pub fn monthly_product_breakdown(
    orders: &[Order],
    year: i32,
    month: u32,
) -> CoreResult<Vec<ProductBreakdownRow>> {
    struct Acc {
        product_id: String,
        name: String,
        quantity_millis: i64,
        revenue_cents: i64,
        unit_price_sum_cents: i128,
        line_count: i64,
    }

    let period = ReportPeriod::month(year, month)?;
    let mut accs: Vec<Acc> = Vec::new();

    for order in eligible(orders, period) {
        for item in &order.items {
            match accs.iter_mut().find(|a| a.product_id == item.product_id) {
                Some(acc) => {
                    acc.quantity_millis += item.quantity_millis;
                    acc.revenue_cents += item.line_total_cents;
                    acc.unit_price_sum_cents += i128::from(item.unit_price_cents);
                    acc.line_count += 1;
                }
                None => accs.push(Acc {
                    product_id: item.product_id.clone(),
                    name: item.name_snapshot.clone(),
                    quantity_millis: item.quantity_millis,
                    revenue_cents: item.line_total_cents,
                    unit_price_sum_cents: i128::from(item.unit_price_cents),
                    line_count: 1,
                }),
            }
        }
    }

    let mut rows: Vec<ProductBreakdownRow> = accs
        .into_iter()
        .map(|acc| ProductBreakdownRow {
            product_id: acc.product_id,
            name: acc.name,
            quantity_millis: acc.quantity_millis,
            revenue_cents: acc.revenue_cents,
            average_unit_price_cents: (acc.unit_price_sum_cents / i128::from(acc.line_count))
                as i64,
        })
        .collect();

    rows.sort_by(|a, b| b.revenue_cents.cmp(&a.revenue_cents));
    Ok(rows)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{
        DeliveryDetails, DeliveryMethod, OrderItem, OrderStatus, PaymentStatus, ProductUnit,
        Quantity,
    };
    use chrono::{TimeZone, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(product_id: &str, unit_price_cents: i64, qty_millis: i64) -> OrderItem {
        OrderItem {
            product_id: product_id.to_string(),
            name_snapshot: format!("Product {}", product_id),
            unit: ProductUnit::Unit,
            unit_price_cents,
            quantity_millis: qty_millis,
            line_total_cents: Money::from_cents(unit_price_cents)
                .multiply_quantity(Quantity::from_millis(qty_millis))
                .cents(),
        }
    }

    fn product(id: &str, category: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            store_id: "store-1".to_string(),
            category_id: category.map(str::to_string),
            name: format!("Product {}", id),
            description: None,
            price_cents: 1000,
            unit: ProductUnit::Unit,
            image_url: None,
            stock_millis: 10_000,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order_on(
        id: &str,
        date: NaiveDate,
        customer: Option<(&str, &str)>,
        items: Vec<OrderItem>,
    ) -> Order {
        let subtotal: i64 = items.iter().map(|i| i.line_total_cents).sum();
        let created = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        Order {
            id: id.to_string(),
            store_id: "store-1".to_string(),
            customer_id: customer.map(|(id, _)| id.to_string()),
            customer_name: customer.map(|(_, name)| name.to_string()).unwrap_or_else(|| "Visitante".to_string()),
            items,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: "Pix".to_string(),
            delivery: DeliveryDetails {
                method: DeliveryMethod::Pickup,
                address: None,
                reference: None,
                fee_cents: 0,
            },
            observations: None,
            subtotal_cents: subtotal,
            total_cents: subtotal,
            created_at: created,
            updated_at: created,
            version: 1,
        }
    }

    fn cancelled(mut order: Order) -> Order {
        order.status = OrderStatus::Cancelled;
        order
    }

    #[test]
    fn test_period_last_days() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        assert_eq!(period.start, day(2024, 3, 4));
        assert_eq!(period.end, day(2024, 3, 10));
        assert_eq!(period.days(), 7);
        assert!(period.contains(day(2024, 3, 4)));
        assert!(period.contains(day(2024, 3, 10)));
        assert!(!period.contains(day(2024, 3, 3)));

        // Clamped to at least one day
        let single = ReportPeriod::last_days(day(2024, 3, 10), 0);
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_period_month_and_leap_february() {
        let feb = ReportPeriod::month(2024, 2).unwrap();
        assert_eq!(feb.start, day(2024, 2, 1));
        assert_eq!(feb.end, day(2024, 2, 29));

        let dec = ReportPeriod::month(2023, 12).unwrap();
        assert_eq!(dec.end, day(2023, 12, 31));

        assert!(ReportPeriod::month(2024, 13).is_err());
        assert!(ReportPeriod::month(2024, 0).is_err());
    }

    #[test]
    fn test_period_previous_window() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let previous = period.previous().unwrap();
        assert_eq!(previous.end, day(2024, 3, 3));
        assert_eq!(previous.start, day(2024, 2, 26));
        assert_eq!(previous.days(), 7);
    }

    #[test]
    fn test_summary_filters_period_and_cancelled() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let orders = vec![
            order_on("o1", day(2024, 3, 8), Some(("c1", "Ana")), vec![item("p1",1000, 2000)]),
            order_on("o2", day(2024, 3, 9), Some(("c1", "Ana")), vec![item("p1",1000, 1000)]),
            // Outside the window
            order_on("o3", day(2024, 3, 1), Some(("c2", "Bruno")), vec![item("p1",1000, 1000)]),
            // Cancelled never counts
            cancelled(order_on("o4", day(2024, 3, 9), Some(("c3", "Carla")), vec![item("p1",9999, 1000)])),
        ];

        let summary = sales_summary(&orders, period);
        assert_eq!(summary.revenue_cents, 3000);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.average_order_value_cents, 1500);
        assert_eq!(summary.unique_customers, 1);
    }

    #[test]
    fn test_summary_empty_period_is_all_zeros() {
        let summary = sales_summary(&[], ReportPeriod::last_days(day(2024, 3, 10), 7));
        assert_eq!(summary.revenue_cents, 0);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.average_order_value_cents, 0);
        assert_eq!(summary.unique_customers, 0);
    }

    #[test]
    fn test_summary_walk_ins_not_unique_customers() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let orders = vec![
            order_on("o1", day(2024, 3, 8), None, vec![item("p1",1000, 1000)]),
            order_on("o2", day(2024, 3, 9), None, vec![item("p1",1000, 1000)]),
        ];

        let summary = sales_summary(&orders, period);
        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.unique_customers, 0);
    }

    #[test]
    fn test_daily_revenue_zero_filled_and_matches_summary() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 5);
        let orders = vec![
            order_on("o1", day(2024, 3, 7), None, vec![item("p1",1000, 1000)]),
            order_on("o2", day(2024, 3, 7), None, vec![item("p1",500, 1000)]),
            order_on("o3", day(2024, 3, 10), None, vec![item("p1",2000, 1000)]),
        ];

        let series = daily_revenue(&orders, period);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].date, day(2024, 3, 6));
        assert_eq!(series[0].revenue_cents, 0);
        assert_eq!(series[1].revenue_cents, 1500);
        assert_eq!(series[1].order_count, 2);
        assert_eq!(series[4].revenue_cents, 2000);

        let series_total: i64 = series.iter().map(|p| p.revenue_cents).sum();
        assert_eq!(series_total, sales_summary(&orders, period).revenue_cents);
    }

    #[test]
    fn test_top_products_by_revenue_limits_to_five() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let mut items = Vec::new();
        for i in 0..7 {
            // p0 earns 100, p1 earns 200, ... p6 earns 700
            items.push(item(&format!("p{}", i), (i + 1) * 100, 1000));
        }
        let orders = vec![order_on("o1", day(2024, 3, 9), None, items)];

        let top = top_products(&orders, period, RankMetric::Revenue);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].product_id, "p6");
        assert_eq!(top[0].revenue_cents, 700);
        assert_eq!(top[4].product_id, "p2");
    }

    #[test]
    fn test_top_products_merges_across_orders() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let orders = vec![
            order_on("o1", day(2024, 3, 8), None, vec![item("p1",1000, 2000)]),
            order_on("o2", day(2024, 3, 9), None, vec![item("p1",1000, 3000)]),
            order_on("o3", day(2024, 3, 9), None, vec![item("p2", 10000, 1000)]),
        ];

        let by_qty = top_products(&orders, period, RankMetric::Quantity);
        assert_eq!(by_qty[0].product_id, "p1");
        assert_eq!(by_qty[0].quantity_millis, 5000);

        let by_revenue = top_products(&orders, period, RankMetric::Revenue);
        assert_eq!(by_revenue[0].product_id, "p2");
    }

    #[test]
    fn test_top_products_ties_keep_first_encountered_order() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let orders = vec![order_on(
            "o1",
            day(2024, 3, 9),
            None,
            vec![
                item("pa", 500, 1000),
                item("pb", 500, 1000),
                item("pc", 500, 1000),
            ],
        )];

        let top = top_products(&orders, period, RankMetric::Revenue);
        let ids: Vec<&str> = top.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["pa", "pb", "pc"]);
    }

    #[test]
    fn test_sales_by_category_with_uncategorized_bucket() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let categories = vec![
            Category {
                id: "cat-1".to_string(),
                store_id: "store-1".to_string(),
                name: "Laticínios".to_string(),
                created_at: Utc::now(),
            },
        ];
        let products = vec![
            product("p1", Some("cat-1")),
            product("p2", None),
            product("p3", Some("cat-gone")),
        ];
        let orders = vec![order_on(
            "o1",
            day(2024, 3, 9),
            None,
            vec![
                item("p1", 1000, 1000),
                // Product without a category
                item("p2", 500, 1000),
                // Product pointing at a removed category
                item("p3", 300, 1000),
                // Product removed from the catalog entirely
                item("p4", 200, 1000),
            ],
        )];

        let rows = sales_by_category(&orders, &products, &categories, period);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Laticínios");
        assert_eq!(rows[0].revenue_cents, 1000);
        assert_eq!(rows[1].name, UNCATEGORIZED_LABEL);
        assert_eq!(rows[1].category_id, None);
        assert_eq!(rows[1].revenue_cents, 1000);
    }

    #[test]
    fn test_sales_by_category_resolves_at_report_time() {
        // The dashboard moved p1 from cat-1 to cat-2 after the sale;
        // the slice follows the product's current category.
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let categories = vec![
            Category {
                id: "cat-1".to_string(),
                store_id: "store-1".to_string(),
                name: "Padaria".to_string(),
                created_at: Utc::now(),
            },
            Category {
                id: "cat-2".to_string(),
                store_id: "store-1".to_string(),
                name: "Mercearia".to_string(),
                created_at: Utc::now(),
            },
        ];
        let products = vec![product("p1", Some("cat-2"))];
        let orders = vec![order_on(
            "o1",
            day(2024, 3, 9),
            None,
            vec![item("p1", 1000, 1000)],
        )];

        let rows = sales_by_category(&orders, &products, &categories, period);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Mercearia");
        assert_eq!(rows[0].category_id.as_deref(), Some("cat-2"));
    }

    #[test]
    fn test_top_customers_skips_walk_ins_and_ranks_by_revenue() {
        let period = ReportPeriod::last_days(day(2024, 3, 10), 7);
        let orders = vec![
            order_on("o1", day(2024, 3, 8), Some(("c1", "Ana")), vec![item("p1",1000, 1000)]),
            order_on("o2", day(2024, 3, 9), Some(("c2", "Bruno")), vec![item("p1",5000, 1000)]),
            order_on("o3", day(2024, 3, 9), Some(("c1", "Ana")), vec![item("p1",2500, 1000)]),
            order_on("o4", day(2024, 3, 9), None, vec![item("p1",99999, 1000)]),
        ];

        let top = top_customers(&orders, period);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].customer_id, "c2");
        assert_eq!(top[0].revenue_cents, 5000);
        assert_eq!(top[1].customer_id, "c1");
        assert_eq!(top[1].order_count, 2);
        assert_eq!(top[1].revenue_cents, 3500);
    }

    #[test]
    fn test_percentage_change_zero_previous_convention() {
        assert_eq!(percentage_change(500, 0), 100);
        assert_eq!(percentage_change(0, 0), 0);
        assert_eq!(percentage_change(150, 100), 50);
        assert_eq!(percentage_change(50, 100), -50);
        assert_eq!(percentage_change(100, 100), 0);
    }

    #[test]
    fn test_compare_periods() {
        let current = ReportPeriod::month(2024, 3).unwrap();
        let previous = ReportPeriod::month(2024, 2).unwrap();
        let orders = vec![
            order_on("o1", day(2024, 3, 5), None, vec![item("p1",3000, 1000)]),
            order_on("o2", day(2024, 2, 5), None, vec![item("p1",2000, 1000)]),
        ];

        let cmp = compare_periods(&orders, current, previous);
        assert_eq!(cmp.current.revenue_cents, 3000);
        assert_eq!(cmp.previous.revenue_cents, 2000);
        assert_eq!(cmp.revenue_change_pct, 50);
        assert_eq!(cmp.order_count_change_pct, 0);
    }

    #[test]
    fn test_month_over_month_january_wraps_year() {
        let orders = vec![
            order_on("o1", day(2024, 1, 10), None, vec![item("p1",2000, 1000)]),
            order_on("o2", day(2023, 12, 20), None, vec![item("p1",1000, 1000)]),
        ];

        let cmp = month_over_month(&orders, 2024, 1).unwrap();
        assert_eq!(cmp.previous_period.start, day(2023, 12, 1));
        assert_eq!(cmp.current.revenue_cents, 2000);
        assert_eq!(cmp.previous.revenue_cents, 1000);
        assert_eq!(cmp.revenue_change_pct, 100);
    }

    #[test]
    fn test_year_over_year_growth_from_nothing() {
        let orders = vec![order_on(
            "o1",
            day(2024, 6, 1),
            None,
            vec![item("p1",1000, 1000)],
        )];

        let cmp = year_over_year(&orders, 2024).unwrap();
        assert_eq!(cmp.revenue_change_pct, 100);
        assert_eq!(cmp.previous.revenue_cents, 0);
    }

    #[test]
    fn test_monthly_breakdown_average_is_mean_of_line_prices() {
        // Same product sold at two prices: R$ 10,00 × 5 and R$ 20,00 × 1.
        // The average unit price is (1000 + 2000) / 2 = 1500, independent
        // of how much each line sold.
        let orders = vec![
            order_on("o1", day(2024, 3, 5), None, vec![item("p1",1000, 5000)]),
            order_on("o2", day(2024, 3, 6), None, vec![item("p1",2000, 1000)]),
        ];

        let rows = monthly_product_breakdown(&orders, 2024, 3).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity_millis, 6000);
        assert_eq!(rows[0].revenue_cents, 7000);
        assert_eq!(rows[0].average_unit_price_cents, 1500);
    }

    #[test]
    fn test_monthly_breakdown_sorted_by_revenue() {
        let orders = vec![order_on(
            "o1",
            day(2024, 3, 5),
            None,
            vec![
                item("small", 100, 1000),
                item("big", 9000, 1000),
            ],
        )];

        let rows = monthly_product_breakdown(&orders, 2024, 3).unwrap();
        assert_eq!(rows[0].product_id, "big");
        assert_eq!(rows[1].product_id, "small");
    }
}
