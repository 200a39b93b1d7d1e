//! Price-time priority book for a single market outcome.
//!
//! Orders rest on two sides:
//! - **Bids**: buy orders, best (highest) price first
//! - **Asks**: sell orders, best (lowest) price first
//!
//! Orders at the same price keep arrival order.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::request::Direction;

/// An order resting on the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestingOrder {
    pub id: u64,
    pub direction: Direction,
    pub price: Decimal,
    pub amount: Decimal,
}

/// One resting order consumed by a taker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub order_id: u64,
    pub price: Decimal,
    pub amount: Decimal,
}

/// Result of taking liquidity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TakeResult {
    pub matches: Vec<Match>,
    pub filled: Decimal,
    pub unfilled: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct OutcomeBook {
    bids: Vec<RestingOrder>,
    asks: Vec<RestingOrder>,
}

impl OutcomeBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rest `order` behind every order at an equal or better price.
    pub fn insert(&mut self, order: RestingOrder) {
        let side = self.side_mut(order.direction);
        let position = side
            .iter()
            .position(|resting| ranks_before(order.direction, order.price, resting.price))
            .unwrap_or(side.len());
        side.insert(position, order);
    }

    /// Match a `direction` taker against the opposite side.
    ///
    /// Consumes orders whose price crosses `limit`, best first, touching at
    /// most `max_orders` of them.
    pub fn take(
        &mut self,
        direction: Direction,
        limit: Decimal,
        amount: Decimal,
        max_orders: usize,
    ) -> TakeResult {
        let side = self.side_mut(direction.opposite());
        let mut unfilled = amount;
        let mut matches = Vec::new();

        while unfilled > Decimal::ZERO && matches.len() < max_orders {
            let Some(best) = side.first_mut() else {
                break;
            };
            if !crosses(direction, limit, best.price) {
                break;
            }

            let traded = unfilled.min(best.amount);
            best.amount -= traded;
            unfilled -= traded;
            matches.push(Match {
                order_id: best.id,
                price: best.price,
                amount: traded,
            });
            if best.amount.is_zero() {
                side.remove(0);
            }
        }

        TakeResult {
            filled: amount - unfilled,
            unfilled,
            matches,
        }
    }

    /// Whether a `direction` taker at `limit` would match anything.
    #[must_use]
    pub fn has_crossing(&self, direction: Direction, limit: Decimal) -> bool {
        self.side(direction.opposite())
            .first()
            .is_some_and(|best| crosses(direction, limit, best.price))
    }

    #[must_use]
    pub fn orders(&self, side: Direction) -> &[RestingOrder] {
        self.side(side)
    }

    /// Total resting amount on one side.
    #[must_use]
    pub fn depth(&self, side: Direction) -> Decimal {
        self.side(side).iter().map(|o| o.amount).sum()
    }

    fn side(&self, side: Direction) -> &[RestingOrder] {
        match side {
            Direction::Buy => &self.bids,
            Direction::Sell => &self.asks,
        }
    }

    fn side_mut(&mut self, side: Direction) -> &mut Vec<RestingOrder> {
        match side {
            Direction::Buy => &mut self.bids,
            Direction::Sell => &mut self.asks,
        }
    }
}

/// A buyer at `limit` matches asks at or below it; a seller matches bids at
/// or above it.
fn crosses(taker: Direction, limit: Decimal, resting: Decimal) -> bool {
    match taker {
        Direction::Buy => resting <= limit,
        Direction::Sell => resting >= limit,
    }
}

/// Strictly better price than `resting` for an order on side `direction`.
fn ranks_before(direction: Direction, price: Decimal, resting: Decimal) -> bool {
    match direction {
        Direction::Buy => price > resting,
        Direction::Sell => price < resting,
    }
}
