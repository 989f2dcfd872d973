use anyhow::Result;
use program_fixtures::artifacts::{ArtifactCache, ArtifactProvisioner, DownloadOptions};
use program_fixtures::errors::{AppError, FetchError};
use program_fixtures::programs::{
    directory, SourceRepository, DATA_FEEDS_PROGRAM_NAMES, KEYSTONE_PROGRAM_NAMES,
    MCMS_PROGRAM_NAMES, PROG_ACCESS_CONTROLLER, PROG_MCM, PROG_TIMELOCK,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tempfile::TempDir;

use crate::common::{artifact_bytes, create_test_provisioner, list_files, StubDownloader};

#[tokio::test]
async fn test_materialize_mcms_scenario() -> Result<()> {
    let cache_root = TempDir::new()?;
    let dest = TempDir::new()?;
    let provisioner = create_test_provisioner(cache_root.path(), StubDownloader::new());

    let ids = provisioner
        .materialize(&[PROG_MCM, PROG_TIMELOCK, PROG_ACCESS_CONTROLLER], dest.path())
        .await?;

    assert_eq!(ids.len(), 3);
    for (name, id) in &ids {
        assert_eq!(id, directory().identity(name).id);
    }
    assert_eq!(
        list_files(dest.path()),
        vec!["access_controller.so", "mcm.so", "timelock.so"]
    );
    assert_eq!(
        std::fs::read(dest.path().join("mcm.so"))?,
        artifact_bytes(SourceRepository::ChainlinkCcip, PROG_MCM)
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_program_fails_before_download() -> Result<()> {
    let cache_root = TempDir::new()?;
    let dest = TempDir::new()?;
    let downloader = StubDownloader::new();
    let calls = downloader.calls();
    let provisioner = create_test_provisioner(cache_root.path(), downloader);

    let result = provisioner
        .materialize(&[PROG_MCM, "nonexistent_program"], dest.path())
        .await;

    match result {
        Err(AppError::UnknownProgram(name)) => assert_eq!(name, "nonexistent_program"),
        other => panic!("expected UnknownProgram, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(list_files(dest.path()).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_materialize_is_idempotent_across_directories() -> Result<()> {
    let cache_root = TempDir::new()?;
    let first = TempDir::new()?;
    let second = TempDir::new()?;
    let downloader = StubDownloader::new();
    let calls = downloader.calls();
    let provisioner = create_test_provisioner(cache_root.path(), downloader);

    let first_ids = provisioner.load_keystone_programs(first.path()).await?;
    let second_ids = provisioner.load_keystone_programs(second.path()).await?;

    assert_eq!(first_ids, second_ids);
    assert_eq!(list_files(first.path()), list_files(second.path()));
    for file in list_files(first.path()) {
        assert_eq!(
            std::fs::read(first.path().join(&file))?,
            std::fs::read(second.path().join(&file))?
        );
    }
    // One download per repository, not per materialisation
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_keystone_and_data_feeds_bundle_mcms() -> Result<()> {
    let cache_root = TempDir::new()?;
    let provisioner = create_test_provisioner(cache_root.path(), StubDownloader::new());

    let mcms_dir = TempDir::new()?;
    let (returned_dir, mcms) = provisioner.load_mcms_programs(mcms_dir.path()).await?;
    assert_eq!(returned_dir, mcms_dir.path());
    assert_eq!(mcms.len(), MCMS_PROGRAM_NAMES.len());

    let keystone_dir = TempDir::new()?;
    let keystone = provisioner.load_keystone_programs(keystone_dir.path()).await?;
    assert_eq!(
        keystone.len(),
        KEYSTONE_PROGRAM_NAMES.len() + MCMS_PROGRAM_NAMES.len()
    );

    let feeds_dir = TempDir::new()?;
    let feeds = provisioner.load_data_feeds_programs(feeds_dir.path()).await?;
    assert!(feeds.contains_key(DATA_FEEDS_PROGRAM_NAMES[0]));
    assert!(!feeds.contains_key(KEYSTONE_PROGRAM_NAMES[0]));

    for (name, id) in &mcms {
        assert_eq!(keystone.get(name), Some(id));
        assert_eq!(feeds.get(name), Some(id));
    }
    assert_eq!(list_files(keystone_dir.path()).len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_names_copied_once() -> Result<()> {
    let cache_root = TempDir::new()?;
    let dest = TempDir::new()?;
    let provisioner = create_test_provisioner(cache_root.path(), StubDownloader::new());

    let ids = provisioner
        .materialize(&[PROG_MCM, PROG_MCM], dest.path())
        .await?;

    assert_eq!(ids.len(), 1);
    assert_eq!(list_files(dest.path()), vec!["mcm.so"]);
    Ok(())
}

#[tokio::test]
async fn test_incomplete_download_fails_before_copying() -> Result<()> {
    let cache_root = TempDir::new()?;
    let dest = TempDir::new()?;
    let provisioner = create_test_provisioner(
        cache_root.path(),
        StubDownloader::new().omitting(PROG_TIMELOCK),
    );

    let result = provisioner.load_mcms_programs(dest.path()).await;

    match result {
        Err(AppError::Fetch(FetchError::MissingArtifact { repository, artifact })) => {
            assert_eq!(repository, "chainlink-ccip");
            assert_eq!(artifact, "timelock.so");
        }
        other => panic!("expected MissingArtifact error, got {:?}", other),
    }
    assert!(list_files(dest.path()).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_missing_destination_directory_fails() -> Result<()> {
    let cache_root = TempDir::new()?;
    let dest = TempDir::new()?;
    let provisioner = create_test_provisioner(cache_root.path(), StubDownloader::new());

    let result = provisioner
        .materialize(&[PROG_MCM], &dest.path().join("does/not/exist"))
        .await;

    assert!(matches!(result, Err(AppError::Materialize { .. })));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_tests_share_one_download() -> Result<()> {
    let cache_root = TempDir::new()?;
    let downloader = StubDownloader::new().with_delay(std::time::Duration::from_millis(50));
    let calls = downloader.calls();
    let provisioner = create_test_provisioner(cache_root.path(), downloader);

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let provisioner = provisioner.clone();
            tokio::spawn(async move {
                let dir = TempDir::new()?;
                let ids = provisioner.load_data_feeds_programs(dir.path()).await?;
                Ok::<_, anyhow::Error>((dir, ids))
            })
        })
        .collect();

    for handle in handles {
        let (dir, ids) = handle.await??;
        assert_eq!(ids.len(), 4);
        assert_eq!(list_files(dir.path()).len(), 4);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_provisioners_over_shared_cache_download_once() -> Result<()> {
    let cache_root = TempDir::new()?;
    let downloader = StubDownloader::new();
    let calls = downloader.calls();
    let cache = Arc::new(ArtifactCache::with_root(
        cache_root.path(),
        downloader,
        DownloadOptions::default(),
    ));
    let first = ArtifactProvisioner::from_shared(Arc::clone(&cache));
    let second = ArtifactProvisioner::from_shared(Arc::clone(&cache));

    let (a, b) = (TempDir::new()?, TempDir::new()?);
    first.load_mcms_programs(a.path()).await?;
    second.load_mcms_programs(b.path()).await?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.get_stats().requests, 2);
    assert_eq!(list_files(b.path()).len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_preload_mcms() -> Result<()> {
    let cache_root = TempDir::new()?;
    let provisioner = create_test_provisioner(cache_root.path(), StubDownloader::new());

    let (dir, ids, book) = provisioner
        .preload_mcms(crate::common::TEST_CHAIN_SELECTOR)
        .await?;

    assert_eq!(list_files(dir.path()).len(), 3);
    let addresses = book.addresses_for_chain(crate::common::TEST_CHAIN_SELECTOR)?;
    assert_eq!(addresses.len(), 3);
    for id in ids.values() {
        assert!(addresses.contains_key(id));
    }
    Ok(())
}
