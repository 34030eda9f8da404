//! Bootstrap behavior: initial snapshots seed the baseline silently.

use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;

use crate::helpers::{TestRig, test_config};

#[tokio::test(start_paused = true)]
async fn login_with_existing_shares_stays_silent() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();

    rig.store.upsert(Project::new(maria, "Loft")).await;
    for name in ["Kitchen", "Garage", "Attic"] {
        rig.store
            .upsert(Project::new(jan, name).with_member(maria))
            .await;
    }

    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.snapshots_received >= 2).await;
    rig.quiesce().await;

    assert!(rig.drain_toasts().is_empty());
    let metrics = rig.watcher.metrics().snapshot();
    assert_eq!(metrics.bootstrap_seeded, 2);
    assert_eq!(metrics.diffs_run, 0);
}

#[tokio::test(start_paused = true)]
async fn first_change_after_bootstrap_notifies() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    rig.store
        .upsert(Project::new(jan, "Kitchen").with_member(maria))
        .await;

    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    rig.store
        .upsert(Project::new(jan, "Garage").with_member(maria))
        .await;
    rig.wait_for(|m| m.changes_presented == 1).await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].body, "Jan shared a project with you");
}

#[tokio::test(start_paused = true)]
async fn configured_bootstrap_count_is_respected() {
    let mut config = test_config();
    config.bootstrap_snapshots = 1;
    let mut rig = TestRig::with_config(config);

    let maria = UserId::new();
    rig.store.upsert(Project::new(maria, "Loft")).await;

    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.snapshots_received >= 2).await;
    rig.quiesce().await;

    // Only the first initial wave is skipped; the second is diffed, and
    // against an identical baseline it stays silent.
    let metrics = rig.watcher.metrics().snapshot();
    assert_eq!(metrics.bootstrap_seeded, 1);
    assert_eq!(metrics.diffs_run, 1);
    assert!(rig.drain_toasts().is_empty());
}
