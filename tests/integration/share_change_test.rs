//! Grant and revoke detection end to end.

use renohub_core::types::id::UserId;
use renohub_core::types::project::Project;
use renohub_core::types::toast::ToastSeverity;

use crate::helpers::TestRig;

/// Start watching `observer` and let the bootstrap waves settle.
async fn start_watching(rig: &TestRig, observer: UserId) {
    rig.watcher.start(observer).await.unwrap();
    rig.wait_for(|m| m.bootstrap_seeded == 2).await;
    rig.quiesce().await;
}

#[tokio::test(start_paused = true)]
async fn revoking_access_raises_a_revoke_toast() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    let kitchen = Project::new(jan, "Kitchen").with_member(maria);
    let garage = Project::new(jan, "Garage").with_member(maria);
    rig.store.upsert(kitchen.clone()).await;
    rig.store.upsert(garage).await;

    start_watching(&rig, maria).await;

    let mut revoked = kitchen;
    revoked.member_ids.clear();
    rig.store.upsert(revoked).await;
    rig.wait_for(|m| m.changes_presented == 1).await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].severity, ToastSeverity::Info);
    assert_eq!(toasts[0].body, "Jan stopped sharing a project with you");
}

#[tokio::test(start_paused = true)]
async fn own_projects_never_toast() {
    let mut rig = TestRig::new();
    let maria = UserId::new();

    let loft = Project::new(maria, "Loft");
    rig.store.upsert(loft.clone()).await;
    start_watching(&rig, maria).await;

    rig.store.upsert(Project::new(maria, "Basement")).await;
    rig.store.remove(loft.id).await;
    rig.wait_for(|m| m.diffs_run >= 2).await;
    rig.quiesce().await;

    assert!(rig.drain_toasts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn multi_project_grant_reports_a_cumulative_count() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let jan = UserId::new();
    rig.directory.insert(jan, "Jan");

    for name in ["Kitchen", "Garage", "Attic"] {
        rig.store.upsert(Project::new(jan, name)).await;
    }
    start_watching(&rig, maria).await;

    // Three writes in one burst; each snapshot is diffed against the
    // still-uncommitted baseline, so counts grow cumulatively.
    rig.store.grant_all(jan, maria).await;
    rig.wait_for(|m| m.changes_presented == 3).await;

    let toasts = rig.drain_toasts();
    assert_eq!(toasts.len(), 3);
    assert_eq!(toasts[0].body, "Jan shared a project with you");
    assert_eq!(toasts[2].body, "Jan shared 3 projects with you");
}

#[tokio::test(start_paused = true)]
async fn unknown_owner_falls_back_to_short_id() {
    let mut rig = TestRig::new();
    let maria = UserId::new();
    let stranger = UserId::new();

    start_watching(&rig, maria).await;

    rig.store
        .upsert(Project::new(stranger, "Porch").with_member(maria))
        .await;
    rig.wait_for(|m| m.changes_presented == 1).await;

    let toasts = rig.drain_toasts();
    let prefix = &stranger.to_string()[..8];
    assert!(toasts[0].body.starts_with(prefix));
}
