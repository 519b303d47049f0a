mod common;

use std::sync::Arc;
use std::time::Duration;

use algo_otc::manager::Manager;
use algo_otc::offer::Offer;
use algo_otc::testing::{SomeTestParams, SomeTestWallet};

use common::logger;
use common::stub_network::{StubBehavior, StubNetwork, STUB_TX_ID};

fn completed_offer() -> Offer {
    let mut offer = SomeTestParams::some_offer();
    offer.app_id = SomeTestParams::APP_ID + 1;
    offer.is_completed = true;
    offer
}

async fn wait_for_sign_calls(wallet: &SomeTestWallet, count: usize) {
    for _ in 0..200 {
        if wallet.sign_calls().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("Timed out waiting for {} signing requests", count);
}

#[tokio::test]
async fn test_accept_offer_flow() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[
            SomeTestParams::some_offer(),
            completed_offer(),
        ]),
    ))
    .await;
    let wallet = SomeTestWallet::approving(SomeTestParams::taker_address());
    let manager = Manager::new(SomeTestParams::config_for(&stub.base_url), wallet.clone());

    manager.connect_wallet().await.unwrap();
    let offers = manager.refresh_offers().await.unwrap();

    // Completed offers never reach the displayed list
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].app_id, SomeTestParams::APP_ID);

    let tx_id = manager.accept_offer(SomeTestParams::APP_ID).await.unwrap();
    assert_eq!(tx_id, STUB_TX_ID);

    // Two transactions, signed as one group: deposit then method call
    let sign_calls = wallet.sign_calls();
    assert_eq!(sign_calls.len(), 1);
    let group = &sign_calls[0][0];
    assert_eq!(group.len(), 2);
    assert!(group[0].is_asset_transfer());
    assert!(group[1].is_app_call());
    assert_eq!(group[0].header.group, group[1].header.group);
    assert!(group[0].header.group.is_some());

    // Accepted offer is removed from the local list
    assert!(manager.offers().await.is_empty());

    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_accept_offer_signing_rejected_keeps_offer() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let wallet =
        SomeTestWallet::rejecting_sign(SomeTestParams::taker_address(), "declined by user");
    let manager = Manager::new(SomeTestParams::config_for(&stub.base_url), wallet);

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let result = manager.accept_offer(SomeTestParams::APP_ID).await;
    assert!(result.is_err());

    // A failed accept leaves the offer in place
    let offers = manager.offers().await;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].app_id, SomeTestParams::APP_ID);

    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_accept_own_offer_rejected() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let wallet = SomeTestWallet::approving(SomeTestParams::maker_address());
    let manager = Manager::new(SomeTestParams::config_for(&stub.base_url), wallet.clone());

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let result = manager.accept_offer(SomeTestParams::APP_ID).await;
    assert!(result.is_err());
    assert!(wallet.sign_calls().is_empty());
    assert_eq!(manager.offers().await.len(), 1);

    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_accept_guard_is_keyed_by_offer() {
    logger::setup();

    let mut other = SomeTestParams::some_offer();
    other.app_id = SomeTestParams::APP_ID + 1;

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer(), other]),
    ))
    .await;
    let wallet = SomeTestWallet::parking(SomeTestParams::taker_address());
    let manager = Arc::new(Manager::new(
        SomeTestParams::config_for(&stub.base_url),
        wallet.clone(),
    ));

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let first = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.accept_offer(SomeTestParams::APP_ID).await })
    };
    wait_for_sign_calls(&wallet, 1).await;

    // Same offer while the first accept is parked in signing: immediate error
    let duplicate = manager.accept_offer(SomeTestParams::APP_ID).await;
    assert!(duplicate.is_err());

    // A different offer is not held up by the first one's guard
    let second = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.accept_offer(SomeTestParams::APP_ID + 1).await })
    };
    wait_for_sign_calls(&wallet, 2).await;

    wallet.release_signs(2);
    assert_eq!(first.await.unwrap().unwrap(), STUB_TX_ID);
    assert_eq!(second.await.unwrap().unwrap(), STUB_TX_ID);
    assert!(manager.offers().await.is_empty());

    let Ok(manager) = Arc::try_unwrap(manager) else {
        panic!("Manager handle still shared");
    };
    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_reclaim_guard_rejects_duplicate() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let wallet = SomeTestWallet::parking(SomeTestParams::maker_address());
    let manager = Arc::new(Manager::new(
        SomeTestParams::config_for(&stub.base_url),
        wallet.clone(),
    ));

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let first = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.reclaim_offer(SomeTestParams::APP_ID).await })
    };
    wait_for_sign_calls(&wallet, 1).await;

    let duplicate = manager.reclaim_offer(SomeTestParams::APP_ID).await;
    assert!(duplicate.is_err());

    wallet.release_signs(1);
    assert_eq!(first.await.unwrap().unwrap(), STUB_TX_ID);

    let Ok(manager) = Arc::try_unwrap(manager) else {
        panic!("Manager handle still shared");
    };
    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_reclaim_offer_flow() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let wallet = SomeTestWallet::approving(SomeTestParams::maker_address());
    let manager = Manager::new(SomeTestParams::config_for(&stub.base_url), wallet.clone());

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let tx_id = manager.reclaim_offer(SomeTestParams::APP_ID).await.unwrap();
    assert_eq!(tx_id, STUB_TX_ID);

    // Reclaim is a single ungrouped method call
    let sign_calls = wallet.sign_calls();
    assert_eq!(sign_calls.len(), 1);
    let group = &sign_calls[0][0];
    assert_eq!(group.len(), 1);
    assert!(group[0].is_app_call());
    assert!(group[0].header.group.is_none());

    assert!(manager.offers().await.is_empty());

    manager.shutdown().await.unwrap();
    stub.shutdown();
}

#[tokio::test]
async fn test_reclaim_requires_maker() {
    logger::setup();

    let stub = StubNetwork::start(StubBehavior::serving(
        SomeTestParams::created_applications_json(&[SomeTestParams::some_offer()]),
    ))
    .await;
    let wallet = SomeTestWallet::approving(SomeTestParams::taker_address());
    let manager = Manager::new(SomeTestParams::config_for(&stub.base_url), wallet.clone());

    manager.connect_wallet().await.unwrap();
    manager.refresh_offers().await.unwrap();

    let result = manager.reclaim_offer(SomeTestParams::APP_ID).await;
    assert!(result.is_err());
    assert!(wallet.sign_calls().is_empty());

    manager.shutdown().await.unwrap();
    stub.shutdown();
}
