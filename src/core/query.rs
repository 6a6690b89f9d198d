//! Listing filter and sort policy.
//!
//! Applied to every listing the service produces. The ordering is total and
//! stable: ship-by date ascending, orders without one after all orders that
//! have one, then creation time ascending, then id as the ultimate tiebreak.

use crate::core::order::Order;

/// Status filter parsed from the `?status=` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusFilter {
    /// No filtering: parameter omitted, blank, or `all` (case-insensitive).
    All,
    /// Case-insensitive exact match against the lowercase status name.
    /// An unknown name matches nothing rather than erroring.
    Named(String),
}

impl StatusFilter {
    pub fn parse(param: Option<&str>) -> Self {
        match param {
            None => StatusFilter::All,
            Some(s) if s.trim().is_empty() => StatusFilter::All,
            Some(s) if s.eq_ignore_ascii_case("all") => StatusFilter::All,
            Some(s) => StatusFilter::Named(s.to_ascii_lowercase()),
        }
    }

    fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Named(name) => order.status.as_str() == name,
        }
    }
}

/// Filter and sort a raw store listing for presentation.
pub fn apply_listing(orders: Vec<Order>, status_param: Option<&str>) -> Vec<Order> {
    let filter = StatusFilter::parse(status_param);
    let mut orders: Vec<Order> = orders
        .into_iter()
        .filter(|order| filter.matches(order))
        .collect();
    orders.sort_by_key(|order| {
        (
            order.ship_by.is_none(),
            order.ship_by,
            order.created_at,
            order.id,
        )
    });
    orders
}
