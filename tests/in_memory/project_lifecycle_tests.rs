//! Catalog lifecycle integration tests.

use super::helpers::{Stack, stack};
use quadro::document::domain::{CollectionName, DocumentId};
use quadro::document::ports::DocumentStore;
use quadro::identity::domain::{TeamId, UserId};
use quadro::project::domain::ProjectDraft;
use quadro::task::domain::TaskDraft;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_cascades_to_its_tasks(stack: Stack) {
    let team = TeamId::new();
    let owner = UserId::new();
    let doomed = stack
        .catalog
        .create(ProjectDraft::new("Doomed"), team, owner)
        .await
        .expect("project create should succeed");
    let survivor = stack
        .catalog
        .create(ProjectDraft::new("Survivor"), team, owner)
        .await
        .expect("project create should succeed");

    for title in ["a", "b", "c"] {
        stack
            .tasks
            .create(TaskDraft::new(title), doomed.id(), owner)
            .await
            .expect("task create should succeed");
    }
    stack
        .tasks
        .create(TaskDraft::new("keep"), survivor.id(), owner)
        .await
        .expect("task create should succeed");

    stack
        .catalog
        .remove(doomed.id())
        .await
        .expect("remove should succeed");

    let project_document = stack
        .documents
        .get(
            CollectionName::PROJECTS,
            DocumentId::from_uuid(doomed.id().into_inner()),
        )
        .await
        .expect("get should succeed");
    assert!(project_document.is_none());

    let orphaned = stack
        .tasks
        .load(doomed.id())
        .await
        .expect("load should succeed");
    assert!(orphaned.is_empty());

    let kept = stack
        .tasks
        .load(survivor.id())
        .await
        .expect("load should succeed");
    assert_eq!(kept.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_catalog_lists_only_the_requested_team(stack: Stack) {
    let team = TeamId::new();
    let owner = UserId::new();
    stack
        .catalog
        .create(ProjectDraft::new("Ours"), team, owner)
        .await
        .expect("project create should succeed");
    stack
        .catalog
        .create(ProjectDraft::new("Theirs"), TeamId::new(), owner)
        .await
        .expect("project create should succeed");

    let listed = stack
        .catalog
        .list_for_team(team)
        .await
        .expect("listing should succeed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(quadro::project::domain::Project::name), Some("Ours"));
}
