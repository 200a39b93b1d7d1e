//! In-memory venue implementing both trade ports.
//!
//! Every transaction is matched and mined as soon as it is submitted. The
//! per-transaction order cap reproduces the gas-bounded partial fills of the
//! real contract:
//!
//! - `public_trade` takes up to the cap, then rests the remainder at the
//!   limit price unless crossing liquidity is still left on the book
//! - `public_take_best_order` takes up to the cap and never rests anything
//!
//! The remaining amount of a transaction is whatever it neither filled nor
//! rested.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::debug;

use super::book::{OutcomeBook, RestingOrder, TakeResult};
use super::settings::PaperConfig;
use crate::domain::error::DomainError;
use crate::domain::fixed_point::{RemainingAmount, TickCodec};
use crate::domain::id::{MarketId, TxHash};
use crate::domain::request::Direction;
use crate::error::{ConfigError, Result, TransportError};
use crate::port::outbound::contract::{Receipt, TradeContract, TradePayload, TransactionInfo};
use crate::port::outbound::oracle::RemainingAmountOracle;

type BookKey = (MarketId, u32);

/// A mined paper transaction.
#[derive(Debug, Clone)]
struct PaperTransaction {
    block_number: u64,
    filled: Decimal,
    remaining: RemainingAmount,
}

#[derive(Default)]
struct State {
    books: HashMap<BookKey, OutcomeBook>,
    transactions: HashMap<TxHash, PaperTransaction>,
    next_order_id: u64,
    next_nonce: u64,
    block_number: u64,
}

/// Simulated venue for driving the trade loop without a chain.
pub struct PaperExchange {
    codec: TickCodec,
    max_orders_per_trade: usize,
    state: Mutex<State>,
}

impl PaperExchange {
    /// Create an empty venue.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_ticks` is zero.
    pub fn new(num_ticks: u64, max_orders_per_trade: usize) -> std::result::Result<Self, DomainError> {
        Ok(Self {
            codec: TickCodec::new(num_ticks)?,
            max_orders_per_trade: max_orders_per_trade.max(1),
            state: Mutex::new(State::default()),
        })
    }

    /// Create a venue and seed its book from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a seed order has a non-positive price or amount.
    pub fn from_config(config: &PaperConfig, num_ticks: u64) -> Result<Self> {
        let exchange = Self::new(num_ticks, config.max_orders_per_trade)?;
        for order in &config.orders {
            exchange
                .rest_order(
                    MarketId::new(order.market.as_str()),
                    order.outcome,
                    order.direction,
                    order.price,
                    order.amount,
                )
                .map_err(|e| ConfigError::InvalidValue {
                    field: "paper.orders",
                    reason: e.to_string(),
                })?;
        }
        Ok(exchange)
    }

    /// Place a maker order directly on the book.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or amount is not positive.
    pub fn rest_order(
        &self,
        market: MarketId,
        outcome: u32,
        direction: Direction,
        price: Decimal,
        amount: Decimal,
    ) -> std::result::Result<u64, DomainError> {
        if price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveAmount { amount });
        }

        let mut state = self.state.lock();
        Ok(state.rest((market, outcome), direction, price, amount))
    }

    /// Snapshot of one side of a book.
    #[must_use]
    pub fn resting_orders(&self, market: &MarketId, outcome: u32, side: Direction) -> Vec<RestingOrder> {
        let state = self.state.lock();
        state
            .books
            .get(&(market.clone(), outcome))
            .map(|book| book.orders(side).to_vec())
            .unwrap_or_default()
    }

    /// Total resting amount on one side of a book.
    #[must_use]
    pub fn depth(&self, market: &MarketId, outcome: u32, side: Direction) -> Decimal {
        let state = self.state.lock();
        state
            .books
            .get(&(market.clone(), outcome))
            .map_or(Decimal::ZERO, |book| book.depth(side))
    }

    /// Shares filled by a mined transaction.
    #[must_use]
    pub fn filled(&self, tx_hash: &TxHash) -> Option<Decimal> {
        self.state.lock().transactions.get(tx_hash).map(|tx| tx.filled)
    }

    fn execute(
        &self,
        payload: &TradePayload,
        rest_remainder: bool,
    ) -> std::result::Result<TransactionInfo, TransportError> {
        if payload.meta.signer.is_empty() {
            return Err(TransportError::Signing("no signer supplied".into()));
        }
        let amount = self
            .codec
            .decode(payload.fxp_amount)
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        let price = self
            .codec
            .decode(payload.fxp_price)
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        if amount.is_zero() {
            return Err(TransportError::Rejected("zero amount".into()));
        }
        if price.is_zero() {
            return Err(TransportError::Rejected("zero price".into()));
        }

        let mut state = self.state.lock();
        let key = (payload.market.clone(), payload.outcome);
        let book = state.books.entry(key.clone()).or_default();
        let TakeResult {
            matches, unfilled, ..
        } = book.take(payload.direction, price, amount, self.max_orders_per_trade);
        let crossing_left = book.has_crossing(payload.direction, price);

        let mut remaining = unfilled;
        if rest_remainder && unfilled > Decimal::ZERO && !crossing_left {
            let order_id = state.rest(key, payload.direction, price, unfilled);
            debug!(order_id, amount = %unfilled, price = %price, "Rested remainder");
            remaining = Decimal::ZERO;
        }

        let remaining = RemainingAmount::from_shares(remaining)
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        state.block_number += 1;
        state.next_nonce += 1;
        let hash = TxHash::new(format!("0x{:064x}", state.next_nonce));
        let block_number = state.block_number;

        debug!(
            tx_hash = %hash,
            market = %payload.market,
            outcome = payload.outcome,
            direction = %payload.direction,
            matched_orders = matches.len(),
            filled = %(amount - unfilled),
            remaining = %remaining,
            "Paper trade mined"
        );

        state.transactions.insert(
            hash.clone(),
            PaperTransaction {
                block_number,
                filled: amount - unfilled,
                remaining,
            },
        );
        Ok(TransactionInfo { hash })
    }
}

impl State {
    fn rest(&mut self, key: BookKey, direction: Direction, price: Decimal, amount: Decimal) -> u64 {
        self.next_order_id += 1;
        let id = self.next_order_id;
        self.books.entry(key).or_default().insert(RestingOrder {
            id,
            direction,
            price,
            amount,
        });
        id
    }
}

#[async_trait]
impl TradeContract for PaperExchange {
    async fn public_trade(
        &self,
        payload: &TradePayload,
    ) -> std::result::Result<TransactionInfo, TransportError> {
        self.execute(payload, true)
    }

    async fn public_take_best_order(
        &self,
        payload: &TradePayload,
    ) -> std::result::Result<TransactionInfo, TransportError> {
        self.execute(payload, false)
    }

    async fn wait_for_receipt(&self, tx_hash: &TxHash) -> std::result::Result<Receipt, TransportError> {
        let block_number = self
            .state
            .lock()
            .transactions
            .get(tx_hash)
            .map(|tx| tx.block_number);
        block_number
            .map(|block| Receipt::success(tx_hash.clone(), Some(block)))
            .ok_or_else(|| TransportError::UnknownTransaction(tx_hash.clone()))
    }

    fn venue_name(&self) -> &'static str {
        "paper"
    }
}

#[async_trait]
impl RemainingAmountOracle for PaperExchange {
    async fn trade_amount_remaining(
        &self,
        tx_hash: &TxHash,
    ) -> std::result::Result<RemainingAmount, TransportError> {
        let remaining = self
            .state
            .lock()
            .transactions
            .get(tx_hash)
            .map(|tx| tx.remaining);
        remaining.ok_or_else(|| TransportError::UnknownTransaction(tx_hash.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixed_point::{FixedPoint, DEFAULT_NUM_TICKS};
    use crate::testkit::domain;
    use rust_decimal_macros::dec;

    fn exchange(max_orders: usize) -> PaperExchange {
        PaperExchange::new(DEFAULT_NUM_TICKS, max_orders).unwrap()
    }

    fn market() -> MarketId {
        MarketId::from(domain::MARKET)
    }

    fn remaining_of(exchange: &PaperExchange, hash: &TxHash) -> Decimal {
        tokio_test::block_on(exchange.trade_amount_remaining(hash))
            .unwrap()
            .to_shares()
            .unwrap()
    }

    #[test]
    fn full_trade_rests_unmatched_remainder() {
        let exchange = exchange(4);
        exchange
            .rest_order(market(), 2, Direction::Sell, dec!(0.45), dec!(4))
            .unwrap();

        let tx = tokio_test::block_on(exchange.public_trade(&domain::payload())).unwrap();

        assert_eq!(exchange.filled(&tx.hash), Some(dec!(4)));
        assert_eq!(remaining_of(&exchange, &tx.hash), dec!(0));
        let bids = exchange.resting_orders(&market(), 2, Direction::Buy);
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].amount, dec!(6));
        assert_eq!(bids[0].price, dec!(0.5));
    }

    #[test]
    fn capped_trade_reports_remaining_instead_of_resting() {
        let exchange = exchange(1);
        exchange
            .rest_order(market(), 2, Direction::Sell, dec!(0.45), dec!(4))
            .unwrap();
        exchange
            .rest_order(market(), 2, Direction::Sell, dec!(0.5), dec!(3))
            .unwrap();

        let tx = tokio_test::block_on(exchange.public_trade(&domain::payload())).unwrap();

        assert_eq!(remaining_of(&exchange, &tx.hash), dec!(6));
        assert!(exchange.resting_orders(&market(), 2, Direction::Buy).is_empty());
    }

    #[test]
    fn unfilled_ticks_are_reported_without_loss() {
        let exchange = exchange(4);
        let codec = TickCodec::new(DEFAULT_NUM_TICKS).unwrap();

        for raw in [1u64, 11_782_400_447, 3_439_627_444_937] {
            let mut payload = domain::payload();
            payload.fxp_amount = FixedPoint::from(raw);

            let tx = tokio_test::block_on(exchange.public_take_best_order(&payload)).unwrap();

            let remaining = remaining_of(&exchange, &tx.hash);
            assert_eq!(codec.encode(remaining).unwrap(), payload.fxp_amount, "raw = {raw}");
        }
    }

    #[test]
    fn take_only_never_rests() {
        let exchange = exchange(4);

        let tx = tokio_test::block_on(exchange.public_take_best_order(&domain::payload())).unwrap();

        assert_eq!(remaining_of(&exchange, &tx.hash), dec!(10));
        assert_eq!(exchange.depth(&market(), 2, Direction::Buy), dec!(0));
    }

    #[test]
    fn receipts_carry_increasing_blocks() {
        let exchange = exchange(4);
        let first = tokio_test::block_on(exchange.public_take_best_order(&domain::payload())).unwrap();
        let second = tokio_test::block_on(exchange.public_take_best_order(&domain::payload())).unwrap();

        let a = tokio_test::block_on(exchange.wait_for_receipt(&first.hash)).unwrap();
        let b = tokio_test::block_on(exchange.wait_for_receipt(&second.hash)).unwrap();

        assert!(a.is_success());
        assert!(a.block_number < b.block_number);
        assert_eq!(first.hash.as_str().len(), 66);
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn unknown_hash_is_rejected() {
        let exchange = exchange(4);
        let hash = TxHash::from("0xdead");

        let err = tokio_test::block_on(exchange.trade_amount_remaining(&hash)).unwrap_err();

        assert_eq!(err, TransportError::UnknownTransaction(hash));
    }

    #[test]
    fn empty_signer_cannot_sign() {
        let exchange = exchange(4);
        let mut payload = domain::payload();
        payload.meta = crate::domain::request::Meta::default();

        let err = tokio_test::block_on(exchange.public_trade(&payload)).unwrap_err();

        assert!(matches!(err, TransportError::Signing(_)));
    }

    #[test]
    fn seed_orders_are_validated() {
        let exchange = exchange(4);
        let err = exchange
            .rest_order(market(), 0, Direction::Buy, dec!(0), dec!(1))
            .unwrap_err();
        assert_eq!(err, DomainError::NonPositivePrice { price: dec!(0) });
    }
}
