use super::support::{Fixture, ADAM_URL};
use agentbook::commitment::CommitmentKind;
use agentbook::compile_agent;
use agentbook::resolver::IssueReason;

#[tokio::test]
async fn inherited_commitments_precede_local_ones() {
    let fixture = Fixture::new(&[
        "Adam\nRULE Be kind.",
        "Lawyer\nPERSONA You are a lawyer.\nRULE Cite sources.",
    ])
    .await;
    let options = fixture.options().with_adam_agent_url(ADAM_URL);

    let compiled = compile_agent("Paul\nFROM lawyer\nRULE Be brief.", &options)
        .await
        .unwrap();

    assert_eq!(
        compiled.requirements.system_message,
        "Rule: Be kind.\n\nPersona: You are a lawyer.\n\nRule: Cite sources.\n\nRule: Be brief."
    );
    assert_eq!(compiled.requirements.parent_agent_url.as_deref(), Some("lawyer"));
    assert!(compiled.issues.is_empty(), "{:?}", compiled.issues);
}

#[tokio::test]
async fn agents_without_from_inherit_the_base_agent() {
    let fixture = Fixture::new(&["Adam\nRULE Be kind."]).await;
    let options = fixture.options().with_adam_agent_url(ADAM_URL);

    let compiled = compile_agent("Anna\nPERSONA Accountant.", &options).await.unwrap();
    assert_eq!(
        compiled.requirements.system_message,
        "Rule: Be kind.\n\nPersona: Accountant."
    );
    assert_eq!(compiled.requirements.parent_agent_url.as_deref(), Some(ADAM_URL));
}

#[tokio::test]
async fn from_void_disables_inheritance() {
    let fixture = Fixture::new(&["Adam\nRULE Be kind."]).await;
    let options = fixture.options().with_adam_agent_url(ADAM_URL);

    let compiled = compile_agent("Loner\nFROM VOID\nRULE Work alone.", &options)
        .await
        .unwrap();
    assert_eq!(compiled.requirements.system_message, "Rule: Work alone.");
    assert_eq!(compiled.requirements.parent_agent_url, None);
}

#[tokio::test]
async fn base_agent_does_not_inherit_from_itself() {
    let fixture = Fixture::new(&["Adam\nRULE Be kind."]).await;
    let options = fixture.options().with_adam_agent_url(ADAM_URL);

    let compiled = compile_agent("Adam\nRULE Be kind.", &options).await.unwrap();
    assert_eq!(compiled.requirements.system_message, "Rule: Be kind.");
    assert!(compiled.issues.is_empty());
}

#[tokio::test]
async fn inheritance_cycles_terminate_with_an_issue() {
    let fixture = Fixture::new(&["Alpha\nFROM beta\nRULE a", "Beta\nFROM alpha\nRULE b"]).await;

    let compiled = compile_agent("Alpha\nFROM beta\nRULE a", &fixture.options())
        .await
        .unwrap();

    assert_eq!(compiled.requirements.system_message, "Rule: b\n\nRule: a");
    assert!(compiled
        .issues
        .iter()
        .any(|issue| issue.reason == IssueReason::Cycle));
}

#[tokio::test]
async fn missing_parent_is_an_issue_not_an_error() {
    let fixture = Fixture::new(&[]).await;

    let compiled = compile_agent("Paul\nFROM ghost\nRULE x", &fixture.options())
        .await
        .unwrap();

    assert_eq!(compiled.requirements.system_message, "Rule: x");
    assert_eq!(compiled.issues.len(), 1);
    let issue = &compiled.issues[0];
    assert_eq!(issue.reference, "ghost");
    assert_eq!(issue.reason, IssueReason::NotFound);
    let location = issue.location.unwrap();
    assert_eq!((location.kind, location.line), (CommitmentKind::From, 2));

    let unresolved = fixture.resolver.take_unresolved_references();
    assert_eq!(unresolved, compiled.issues);
    assert!(fixture.resolver.list_unresolved_references().is_empty());
}
