//! Failed snapshot deliveries surface once per streak and never corrupt
//! the baseline.

use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;
use renohub_core::types::toast::ToastSeverity;

use crate::helpers::TestRig;

#[tokio::test(start_paused = true)]
async fn a_failure_streak_raises_one_error_toast() {
    let mut rig = TestRig::new();
    let maria = UserId::new();

    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    for _ in 0..3 {
        rig.store.publish_failure(maria, "permission denied").await;
    }
    rig.wait_for(|m| m.delivery_errors == 3).await;
    rig.quiesce().await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, ToastSeverity::Error);
    assert_eq!(toasts[0].body, "Couldn't load shared projects");
}

#[tokio::test(start_paused = true)]
async fn recovery_rearms_the_error_toast_and_preserves_the_baseline() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    rig.store
        .upsert(Project::new(jan, "Kitchen").with_member(maria))
        .await;
    rig.watcher.start(maria).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;

    rig.store.publish_failure(maria, "transient outage").await;
    rig.wait_for(|m| m.delivery_errors == 1).await;

    // Delivery recovers; the revoke is diffed against the baseline held
    // from before the failure.
    rig.store.revoke_all(jan, maria).await;
    rig.wait_for(|m| m.changes_presented == 1).await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 2);
    assert_eq!(toasts[0].severity, ToastSeverity::Error);
    assert_eq!(toasts[1].body, "Jan stopped sharing a project with you");

    // A fresh failure after the recovery toasts again.
    rig.store.publish_failure(maria, "permission denied").await;
    rig.wait_for(|m| m.delivery_errors == 2).await;
    rig.quiesce().await;
    assert_eq!(rig.drain_toasts().len(), 1);
}
