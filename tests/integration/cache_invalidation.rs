use super::support::Fixture;
use agentbook::collection::AgentCollection;
use agentbook::resolver::IssueReason;
use agentbook::compile_agent;

#[tokio::test]
async fn recompiling_after_a_parent_update_sees_the_new_parent() {
    let fixture = Fixture::new(&["Lawyer\nRULE Cite statutes."]).await;
    let child = "Paul\nFROM lawyer\nRULE Be brief.";

    let before = compile_agent(child, &fixture.options()).await.unwrap();
    assert_eq!(
        before.requirements.system_message,
        "Rule: Cite statutes.\n\nRule: Be brief."
    );
    assert!(!fixture.resolver.cache().is_empty());

    fixture
        .collection
        .update_agent_source("lawyer", "Lawyer\nRULE Cite case law.")
        .await
        .unwrap();
    assert!(fixture.resolver.cache().is_empty());

    let after = compile_agent(child, &fixture.options()).await.unwrap();
    assert_eq!(
        after.requirements.system_message,
        "Rule: Cite case law.\n\nRule: Be brief."
    );
}

#[tokio::test]
async fn creating_a_missing_agent_clears_the_cached_miss() {
    let fixture = Fixture::new(&[]).await;
    let child = "Paul\nFROM lawyer\nRULE Be brief.";

    let before = compile_agent(child, &fixture.options()).await.unwrap();
    assert_eq!(before.issues[0].reason, IssueReason::NotFound);

    // served from the cache
    let again = compile_agent(child, &fixture.options()).await.unwrap();
    assert_eq!(again.issues, before.issues);

    fixture
        .collection
        .create_agent("Lawyer\nRULE Cite statutes.")
        .await
        .unwrap();

    let after = compile_agent(child, &fixture.options()).await.unwrap();
    assert!(after.issues.is_empty());
    assert_eq!(
        after.requirements.system_message,
        "Rule: Cite statutes.\n\nRule: Be brief."
    );
}

#[tokio::test]
async fn deleted_parents_stop_resolving() {
    let fixture = Fixture::new(&["Lawyer\nRULE Cite statutes."]).await;
    let child = "Paul\nFROM lawyer";
    compile_agent(child, &fixture.options()).await.unwrap();

    fixture.collection.delete_agent("lawyer").await.unwrap();
    let deleted = compile_agent(child, &fixture.options()).await.unwrap();
    assert_eq!(deleted.issues.len(), 1);
    assert!(deleted.requirements.system_message.is_empty());

    fixture.collection.restore_agent("lawyer").await.unwrap();
    let restored = compile_agent(child, &fixture.options()).await.unwrap();
    assert!(restored.issues.is_empty());
    assert_eq!(restored.requirements.system_message, "Rule: Cite statutes.");
}
