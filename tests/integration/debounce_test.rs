//! Baseline commits are debounced across write bursts.

use std::time::Duration;

use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;
use tokio::time::advance;

use crate::helpers::TestRig;

#[tokio::test(start_paused = true)]
async fn burst_of_writes_commits_the_baseline_once() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    for name in ["A", "B", "C", "D", "E"] {
        rig.store
            .upsert(Project::new(jan, name).with_member(maria))
            .await;
    }
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    // Five revoke writes land inside one debounce window.
    rig.store.revoke_all(jan, maria).await;
    rig.wait_for(|m| m.diffs_run == 5).await;

    // Every snapshot was compared against the stale committed baseline,
    // so the counts grew cumulatively and nothing was committed yet.
    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 5);
    assert_eq!(toasts[0].body, "Jan stopped sharing a project with you");
    assert_eq!(toasts[4].body, "Jan stopped sharing 5 projects with you");
    assert_eq!(rig.watcher.metrics().snapshot().baseline_commits, 0);

    // Once the window lapses the final snapshot commits, exactly once.
    advance(Duration::from_millis(81)).await;
    rig.wait_for(|m| m.baseline_commits == 1).await;

    // A quiet follow-up change is measured against the new baseline.
    rig.store
        .upsert(Project::new(jan, "F").with_member(maria))
        .await;
    rig.wait_for(|m| m.changes_presented == 6).await;
    let toasts = rig.drain_toasts();
    assert_eq!(toasts[0].body, "Jan shared a project with you");
}

#[tokio::test(start_paused = true)]
async fn spaced_writes_commit_separately() {
    let rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();

    rig.store.upsert(Project::new(jan, "Kitchen")).await;
    rig.store.upsert(Project::new(jan, "Garage")).await;
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    rig.store.grant_all(jan, maria).await;
    rig.wait_for(|m| m.diffs_run == 2).await;
    advance(Duration::from_millis(81)).await;
    rig.wait_for(|m| m.baseline_commits == 1).await;

    rig.store.revoke_all(jan, maria).await;
    rig.wait_for(|m| m.diffs_run == 4).await;
    advance(Duration::from_millis(81)).await;
    rig.wait_for(|m| m.baseline_commits == 2).await;
}
