//! End-to-end runs of the completion loop against the paper venue.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradefill::adapter::outbound::paper::exchange::PaperExchange;
use tradefill::application::completion::{LoopConfig, TradeCompletionLoop};
use tradefill::domain::fixed_point::DEFAULT_NUM_TICKS;
use tradefill::domain::id::MarketId;
use tradefill::domain::request::Direction;
use tradefill::error::TradeError;
use tradefill::testkit::config::fast_loop;
use tradefill::testkit::domain;
use tradefill::testkit::observer::{Observed, RecordingObserver};

fn venue(max_orders: usize, asks: &[(Decimal, Decimal)]) -> Arc<PaperExchange> {
    let exchange = PaperExchange::new(DEFAULT_NUM_TICKS, max_orders).unwrap();
    for (price, amount) in asks {
        exchange
            .rest_order(market(), 2, Direction::Sell, *price, *amount)
            .unwrap();
    }
    Arc::new(exchange)
}

fn market() -> MarketId {
    MarketId::from(domain::MARKET)
}

fn completion(exchange: &Arc<PaperExchange>, config: LoopConfig) -> TradeCompletionLoop {
    TradeCompletionLoop::new(exchange.clone(), exchange.clone()).with_config(config)
}

fn layered_book() -> Vec<(Decimal, Decimal)> {
    vec![
        (dec!(0.45), dec!(4)),
        (dec!(0.5), dec!(3)),
        (dec!(0.5), dec!(5)),
    ]
}

#[tokio::test]
async fn gas_bounded_fills_continue_until_zero() {
    let exchange = venue(1, &layered_book());
    let observer = RecordingObserver::new();

    let report = completion(&exchange, fast_loop())
        .run(&domain::request(), &observer)
        .await
        .unwrap();

    let amounts: Vec<String> = report
        .attempts()
        .iter()
        .map(|a| a.fxp_amount().to_hex())
        .collect();
    assert_eq!(amounts, vec!["0x1a400", "0xfc00", "0x7e00"]);
    assert_eq!(observer.sent_hashes().len(), 3);
    assert_eq!(observer.events().last(), Some(&Observed::Success));
    assert_eq!(exchange.depth(&market(), 2, Direction::Sell), dec!(2));
    assert_eq!(exchange.depth(&market(), 2, Direction::Buy), dec!(0));
}

#[tokio::test]
async fn full_strategy_rests_what_it_cannot_match() {
    let exchange = venue(4, &[(dec!(0.45), dec!(4))]);
    let observer = RecordingObserver::new();

    let report = completion(&exchange, fast_loop())
        .run(&domain::request(), &observer)
        .await
        .unwrap();

    assert_eq!(report.transactions(), 1);
    let bids = exchange.resting_orders(&market(), 2, Direction::Buy);
    assert_eq!(bids.len(), 1);
    assert_eq!(bids[0].amount, dec!(6));
    assert_eq!(bids[0].price, dec!(0.5));
}

#[tokio::test]
async fn take_only_stalls_when_liquidity_runs_out() {
    let exchange = venue(1, &layered_book());
    let observer = RecordingObserver::new();
    let request = domain::request_builder()
        .amount(dec!(15))
        .take_only(true)
        .build()
        .unwrap();

    let err = completion(&exchange, fast_loop())
        .run(&request, &observer)
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::Stalled { remaining, .. } if remaining == dec!(3)));
    assert_eq!(observer.sent_hashes().len(), 4);
    assert_eq!(observer.failures(), 1);
    assert_eq!(observer.successes(), 0);
    assert!(exchange.resting_orders(&market(), 2, Direction::Buy).is_empty());
}

#[tokio::test]
async fn take_only_completes_when_book_is_deep_enough() {
    let exchange = venue(1, &layered_book());
    let request = domain::request_builder()
        .amount(dec!(12))
        .take_only(true)
        .build()
        .unwrap();

    let report = completion(&exchange, fast_loop())
        .run(&request, &RecordingObserver::new())
        .await
        .unwrap();

    assert_eq!(report.transactions(), 3);
    assert_eq!(exchange.depth(&market(), 2, Direction::Sell), dec!(0));
}

#[tokio::test]
async fn sell_matches_resting_bids() {
    let exchange = Arc::new(PaperExchange::new(DEFAULT_NUM_TICKS, 2).unwrap());
    exchange
        .rest_order(market(), 2, Direction::Buy, dec!(0.6), dec!(7))
        .unwrap();
    exchange
        .rest_order(market(), 2, Direction::Buy, dec!(0.55), dec!(3))
        .unwrap();
    let request = domain::request_builder()
        .direction(Direction::Sell)
        .build()
        .unwrap();

    let report = completion(&exchange, fast_loop())
        .run(&request, &RecordingObserver::new())
        .await
        .unwrap();

    assert_eq!(report.transactions(), 1);
    assert_eq!(exchange.depth(&market(), 2, Direction::Buy), dec!(0));
    assert_eq!(exchange.depth(&market(), 2, Direction::Sell), dec!(0));
}

#[tokio::test]
async fn iteration_guard_stops_long_runs() {
    let asks: Vec<(Decimal, Decimal)> = (0..5).map(|_| (dec!(0.5), dec!(1))).collect();
    let exchange = venue(1, &asks);
    let request = domain::request_builder().amount(dec!(5)).build().unwrap();
    let config = LoopConfig {
        max_iterations: Some(3),
        ..fast_loop()
    };

    let err = completion(&exchange, config)
        .run(&request, &RecordingObserver::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TradeError::IterationLimit { limit: 3, remaining } if remaining == dec!(2)
    ));
}

#[tokio::test]
async fn runs_on_separate_markets_do_not_interfere() {
    let exchange = venue(1, &layered_book());
    exchange
        .rest_order(MarketId::from("OTHER_MARKET"), 0, Direction::Sell, dec!(0.2), dec!(1))
        .unwrap();
    let completion = completion(&exchange, fast_loop());

    let first = domain::request();
    let second = domain::request_builder()
        .market("OTHER_MARKET")
        .outcome(0)
        .amount(dec!(1))
        .price(dec!(0.2))
        .build()
        .unwrap();
    let first_observer = RecordingObserver::new();
    let second_observer = RecordingObserver::new();
    let (a, b) = tokio::join!(
        completion.run(&first, &first_observer),
        completion.run(&second, &second_observer),
    );

    assert_eq!(a.unwrap().transactions(), 3);
    assert_eq!(b.unwrap().transactions(), 1);
    assert_eq!(
        exchange.depth(&MarketId::from("OTHER_MARKET"), 0, Direction::Sell),
        dec!(0)
    );
}
