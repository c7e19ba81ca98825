#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use vitrine_fetch::{create_source, Dataset, DatasetCache, DatasetFetcher, Resource, SourceConfig};
use vitrine_listing::Record;

use crate::common::TestServer;

fn http_fetcher(server: &TestServer) -> DatasetFetcher {
    let source = create_source(&SourceConfig {
        base_url: Some(server.base_url.clone()),
        ..Default::default()
    })
    .unwrap();
    DatasetFetcher::new(source)
}

#[tokio::test]
async fn test_http_fetch_dataset() {
    let server = TestServer::start().await;
    let fetcher = http_fetcher(&server);

    let dataset: Dataset<Record> = fetcher.fetch(&Resource::zkvms()).await.unwrap();
    assert_eq!(dataset.len(), 3);
    assert!(dataset.last_updated.is_some());
    assert_eq!(dataset.find("zkvm", "jolt").unwrap().name, "Jolt");
}

#[tokio::test]
async fn test_http_non_success_status_is_fetch_failure() {
    let server = TestServer::start().await;
    let fetcher = http_fetcher(&server);

    let err = fetcher
        .fetch::<Record>(&Resource::new("error.json", "zkvms"))
        .await
        .unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(err.to_string().contains("500"));

    let err = fetcher
        .fetch::<Record>(&Resource::new("missing.json", "zkvms"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_http_malformed_payload() {
    let server = TestServer::start().await;
    let fetcher = http_fetcher(&server);

    let err = fetcher
        .fetch::<Record>(&Resource::new("broken.json", "zkvms"))
        .await
        .unwrap_err();
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_http_cache_avoids_second_request() {
    let server = TestServer::start().await;
    let cache = Arc::new(DatasetCache::new());
    let fetcher = http_fetcher(&server).with_cache(cache.clone());

    let _: Dataset<Record> = fetcher.fetch(&Resource::zkvms()).await.unwrap();
    let _: Dataset<Record> = fetcher.fetch(&Resource::zkvms()).await.unwrap();
    assert_eq!(server.zkvms_hits(), 1);

    fetcher.forget("zkvms.json");
    let _: Dataset<Record> = fetcher.fetch(&Resource::zkvms()).await.unwrap();
    assert_eq!(server.zkvms_hits(), 2);
}
