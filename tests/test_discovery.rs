mod common;

use algo_otc::common::types::{ALGO_ASSET_ID, ROUNDS_PER_HOUR};
use algo_otc::manager::Manager;
use algo_otc::offer::Offer;
use algo_otc::testing::{SomeTestParams, SomeTestWallet};

use common::logger;
use common::stub_network::{StubBehavior, StubNetwork};

#[tokio::test]
async fn test_discovery_decodes_offers() {
    logger::setup();

    let mut second = SomeTestParams::some_offer();
    second.app_id = SomeTestParams::APP_ID + 1;
    second.taker = SomeTestParams::taker_address();
    second.buy_asset_id = ALGO_ASSET_ID;
    second.buy_amount = 5_000_000;
    second.expiry_round = 24 * ROUNDS_PER_HOUR;

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer(), second]),
    ))
    .await;
    let manager = Manager::new(
        SomeTestParams::config_for(&stub.base_url),
        SomeTestWallet::approving(SomeTestParams::taker_address()),
    );

    let offers = manager.refresh_offers().await.unwrap();
    assert_eq!(offers.len(), 2);

    let first: &Offer = &offers[0];
    assert_eq!(first.app_id, SomeTestParams::APP_ID);
    assert_eq!(first.maker, SomeTestParams::maker_address());
    assert!(first.is_public());
    assert_eq!(first.sell_asset_id, SomeTestParams::SELL_ASSET_ID);
    assert_eq!(first.sell_amount, SomeTestParams::SELL_AMOUNT);
    assert_eq!(first.expiry_text(), "10h left");

    let second: &Offer = &offers[1];
    assert!(!second.is_public());
    assert!(second.eligible_taker(&SomeTestParams::taker_address()));
    assert!(!second.eligible_taker(&SomeTestParams::deployer_address()));
    // 5 ALGO for 100 units => 0.05 ALGO per unit
    assert_eq!(second.price_per_unit(), Some(0.05));
    assert_eq!(second.expiry_text(), "24h left");

    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_discovery_failure_empties_list() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let manager = Manager::new(
        SomeTestParams::config_for(&stub.base_url),
        SomeTestWallet::approving(SomeTestParams::taker_address()),
    );

    manager.refresh_offers().await.unwrap();
    assert_eq!(manager.offers().await.len(), 1);
    stub.shutdown();

    // Indexer now unreachable - the refresh fails and the stale list is dropped
    let result = manager.refresh_offers().await;
    assert!(result.is_err());
    assert!(manager.offers().await.is_empty());

    manager.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_discovery_indexer_error_is_surfaced() {
    logger::setup();

    let mut behavior =
        StubBehavior::serving(SomeTestParams::created_applications_json(&[]));
    behavior.fail_indexer = true;
    let stub = StubNetwork::start(behavior).await;
    let manager = Manager::new(
        SomeTestParams::config_for(&stub.base_url),
        SomeTestWallet::approving(SomeTestParams::taker_address()),
    );

    let result = manager.refresh_offers().await;
    assert!(result.is_err());
    assert!(manager.offers().await.is_empty());

    manager.shutdown().await.unwrap();
    stub.shutdown();
}
