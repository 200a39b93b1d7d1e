use std::io::Write;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;
use tradefill::adapter::outbound::paper::exchange::PaperExchange;
use tradefill::domain::id::MarketId;
use tradefill::domain::request::{AccountType, Direction};
use tradefill::error::{ConfigError, Error};
use tradefill::infrastructure::config::settings::{Config, SIGNER_ENV};
use tradefill::testkit::config::PAPER_TOML;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_from_file() {
    let file = write_temp_config(PAPER_TOML);

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.market.num_ticks, 10_752);
    assert_eq!(config.paper.orders.len(), 3);
    assert_eq!(config.paper.orders[2].amount, dec!(5));
    assert_eq!(config.paper.orders[2].direction, Direction::Sell);
    assert_eq!(config.loop_config().max_iterations, Some(8));
}

#[test]
fn config_rejects_zero_ticks() {
    let file = write_temp_config("[market]\nnum_ticks = 0\n");

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "num_ticks", ..
        })) => {}
        Err(err) => panic!("Expected invalid num_ticks error, got {err}"),
        Ok(config) => panic!("Expected zero ticks to be rejected, got {}", config.market.num_ticks),
    }
}

#[test]
fn config_rejects_non_positive_seed_order() {
    let toml = r#"
[[paper.orders]]
market = "MARKET_ADDRESS"
outcome = 1
direction = "buy"
price = "0.4"
amount = "0"
"#;
    let file = write_temp_config(toml);

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "paper.orders.amount",
            ..
        })
    ));
}

#[test]
fn config_rejects_zero_orders_per_trade() {
    let file = write_temp_config("[paper]\nmax_orders_per_trade = 0\n");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "max_orders_per_trade",
            ..
        })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_temp_config("[market\nnum_ticks = 1");

    let err = Config::load(file.path()).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn account_type_and_signer_build_meta() {
    std::env::set_var(SIGNER_ENV, "PRIVATE_KEY");
    let config = Config::parse_toml("[account]\ntype = \"trezor\"\n").unwrap();
    std::env::remove_var(SIGNER_ENV);

    let meta = config.meta().unwrap();

    assert_eq!(meta.account_type, AccountType::Trezor);
    assert_eq!(meta.signer.as_bytes(), b"PRIVATE_KEY");
}

#[test]
fn meta_requires_signer() {
    let mut config = Config::parse_toml("").unwrap();
    config.account.signer = None;

    let err = config.meta().unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: SIGNER_ENV })
    ));
}

#[test]
fn paper_venue_is_seeded_from_config() {
    let config = Config::parse_toml(PAPER_TOML).unwrap();

    let exchange = PaperExchange::from_config(&config.paper, config.market.num_ticks).unwrap();

    let market = MarketId::from("MARKET_ADDRESS");
    let asks = exchange.resting_orders(&market, 2, Direction::Sell);
    let prices: Vec<_> = asks.iter().map(|o| o.price).collect();
    assert_eq!(prices, vec![dec!(0.45), dec!(0.5), dec!(0.5)]);
    assert_eq!(exchange.depth(&market, 2, Direction::Sell), dec!(12));
}
