//! Session lifecycle: user switches reset state, stop tears down cleanly.

use std::time::Duration;

use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;
use tokio::time::advance;

use crate::helpers::TestRig;

#[tokio::test(start_paused = true)]
async fn switching_users_starts_a_fresh_bootstrap() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let peter = UserId::new();
    let jan = UserId::new();

    for name in ["Kitchen", "Garage"] {
        rig.store
            .upsert(
                Project::new(jan, name)
                    .with_member(maria)
                    .with_member(peter),
            )
            .await;
    }

    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;
    assert_eq!(rig.watcher.observer().await, Some(maria));

    // Peter takes over on the same device. His pre-existing shares must
    // bootstrap silently even though Maria's baseline was non-empty.
    rig.watcher.start(peter).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 4).await;
    rig.quiesce().await;

    assert_eq!(rig.watcher.observer().await, Some(peter));
    assert!(rig.drain_toasts().is_empty());
    assert_eq!(rig.watcher.metrics().snapshot().sessions_started, 2);
    // Maria's subscription was torn down with her session.
    assert_eq!(rig.store.subscriber_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_pending_baseline_commit() {
    let rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();

    rig.store.upsert(Project::new(jan, "Kitchen")).await;
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    // Schedule a commit, then stop before the window lapses.
    rig.store.grant_all(jan, maria).await;
    rig.wait_for(|m| m.diffs_run == 1).await;
    rig.watcher.stop().await;

    advance(Duration::from_millis(200)).await;
    rig.quiesce().await;
    assert_eq!(rig.watcher.metrics().snapshot().baseline_commits, 0);
    assert_eq!(rig.store.subscriber_count(), 0);
    assert_eq!(rig.watcher.observer().await, None);
}

#[tokio::test(start_paused = true)]
async fn stop_clears_suppression_marks_for_the_next_session() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    rig.store
        .upsert(Project::new(jan, "Kitchen").with_member(maria))
        .await;
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    // Mark, log out, log back in. The mark must not survive the cycle
    // even though its TTL has not lapsed.
    rig.watcher.mark_self_leave(jan);
    rig.watcher.stop().await;
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 4).await;

    rig.store.revoke_all(jan, maria).await;
    rig.wait_for(|m| m.changes_presented == 1).await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts[0].body, "Jan stopped sharing a project with you");
    assert_eq!(rig.watcher.metrics().snapshot().removals_suppressed, 0);
}
