#![allow(clippy::unwrap_used)]

use vitrine_fetch::{create_source, Dataset, DatasetFetcher, Resource, SourceConfig};
use vitrine_listing::Record;

use crate::common::data_dir;

#[tokio::test]
async fn test_dir_fetch_all_sections_present() {
    let dir = data_dir();
    let source = create_source(&SourceConfig {
        data_dir: Some(dir.path().display().to_string()),
        ..Default::default()
    })
    .unwrap();
    let fetcher = DatasetFetcher::new(source);

    let zkvms: Dataset<Record> = fetcher.fetch(&Resource::zkvms()).await.unwrap();
    assert_eq!(zkvms.len(), 3);

    let spaces: Dataset<Record> = fetcher.fetch(&Resource::spaces()).await.unwrap();
    assert_eq!(spaces.records[0].id, "isa");
    assert!(spaces.last_updated.is_none());

    let err = fetcher.fetch::<Record>(&Resource::programs()).await.unwrap_err();
    assert!(err.is_fetch_failure());
    assert!(err.to_string().contains("programs.json"));
}
