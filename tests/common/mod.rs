#![allow(dead_code)]

use axum_test::TestServer;
use chrono::Utc;
use std::sync::Arc;
use tinyurl::domain::entities::Record;
use tinyurl::domain::repositories::RecordStore;
use tinyurl::infrastructure::persistence::InMemoryRecordStore;
use tinyurl::routes::router;
use tinyurl::state::AppState;

pub const TEST_DOMAIN: &str = "yourtinyurl.com";

pub fn create_test_state() -> (AppState, Arc<InMemoryRecordStore>) {
    let store = Arc::new(InMemoryRecordStore::new());
    let state = AppState::new(store.clone(), TEST_DOMAIN, 5);
    (state, store)
}

pub fn create_test_server() -> (TestServer, Arc<InMemoryRecordStore>) {
    let (state, store) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();
    (server, store)
}

pub async fn create_test_record(store: &dyn RecordStore, short_id: &str, url: &str) {
    let inserted = store
        .put_if_absent(&Record::new(short_id, url, Utc::now()))
        .await
        .unwrap();
    assert!(inserted, "fixture {short_id} already exists");
}

pub async fn click_count(store: &dyn RecordStore, short_id: &str) -> u64 {
    store.get(short_id).await.unwrap().unwrap().click_count
}
