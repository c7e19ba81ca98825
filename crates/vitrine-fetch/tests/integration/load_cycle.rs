#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use vitrine_core::{LoadHandle, LoadState};
use vitrine_fetch::{Dataset, DatasetFetcher, DirSource, Resource};
use vitrine_listing::Record;

use crate::common::data_dir;

#[tokio::test]
async fn test_load_moves_loading_to_ready() {
    let dir = data_dir();
    let fetcher = DatasetFetcher::new(Arc::new(DirSource::new(dir.path())));
    let handle: LoadHandle<Dataset<Record>> = LoadHandle::new("zkvms");
    assert!(handle.state().is_loading());

    let background = {
        let fetcher = fetcher.clone();
        let handle = handle.clone();
        tokio::spawn(async move { fetcher.load(&Resource::zkvms(), &handle).await })
    };

    let dataset = handle.wait_settled(Duration::from_secs(5)).await.unwrap();
    assert_eq!(dataset.len(), 3);
    assert!(background.await.unwrap());
}

#[tokio::test]
async fn test_load_failure_is_terminal() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = DatasetFetcher::new(Arc::new(DirSource::new(dir.path())));
    let handle: LoadHandle<Dataset<Record>> = LoadHandle::new("zkvms");

    fetcher.load(&Resource::zkvms(), &handle).await;
    assert!(matches!(handle.state(), LoadState::Failed(_)));
    assert!(handle.state().data().is_none());
}

#[tokio::test]
async fn test_result_after_unmount_is_discarded() {
    let dir = data_dir();
    let fetcher = DatasetFetcher::new(Arc::new(DirSource::new(dir.path())));
    let handle: LoadHandle<Dataset<Record>> = LoadHandle::new("zkvms");

    let ticket = handle.begin();
    let result = fetcher.fetch::<Record>(&Resource::zkvms()).await;
    handle.unmount();

    assert!(!handle.resolve(ticket, result));
    assert!(handle.state().is_loading());
}
