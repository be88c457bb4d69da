use super::support::{local_url, Fixture};
use agentbook::collection::AgentCollection;
use agentbook::commitment::CommitmentKind;
use agentbook::create_unresolved_agent_reference_diagnostics;
use agentbook::resolver::DiagnosticSeverity;

#[tokio::test]
async fn diagnostics_point_at_each_unresolved_reference() {
    let fixture = Fixture::new(&["Anna"]).await;
    let source = format!(
        "Desk\nFROM ghost\nIMPORT {}\nTEAM Ask {} about invoices, see https://a.io/guide.pdf",
        local_url("nobody"),
        local_url("anna")
    );

    let result = create_unresolved_agent_reference_diagnostics(&source, &fixture.resolver).await;

    assert_eq!(
        result.missing_agent_references,
        vec!["ghost".to_string(), local_url("nobody")]
    );
    let kinds: Vec<_> = result
        .diagnostics
        .iter()
        .map(|diagnostic| (diagnostic.commitment_kind, diagnostic.severity))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (CommitmentKind::From, DiagnosticSeverity::Error),
            (CommitmentKind::Import, DiagnosticSeverity::Error),
            (CommitmentKind::Team, DiagnosticSeverity::Warning),
        ]
    );

    let import = &result.diagnostics[1];
    assert_eq!(import.line, 3);
    assert_eq!(import.start_column, 8);
    assert_eq!(
        import.end_column - import.start_column,
        local_url("nobody").chars().count()
    );

    // editor checks stay out of the compile-issue collector
    assert!(fixture.resolver.list_unresolved_references().is_empty());
}

#[tokio::test]
async fn diagnostics_clear_once_the_agent_exists() {
    let fixture = Fixture::new(&[]).await;
    let source = "Desk\nFROM lawyer";

    let before = create_unresolved_agent_reference_diagnostics(source, &fixture.resolver).await;
    assert_eq!(before.missing_agent_references, vec!["lawyer"]);

    fixture.collection.create_agent("Lawyer").await.unwrap();
    let after = create_unresolved_agent_reference_diagnostics(source, &fixture.resolver).await;
    assert!(after.diagnostics.is_empty());
    assert!(after.missing_agent_references.is_empty());
}

#[tokio::test]
async fn void_parents_and_file_imports_are_not_checked() {
    let fixture = Fixture::new(&[]).await;
    let result = create_unresolved_agent_reference_diagnostics(
        "Desk\nFROM VOID\nIMPORT ./notes.txt\nIMPORT https://example.com/handbook.pdf",
        &fixture.resolver,
    )
    .await;
    assert!(result.diagnostics.is_empty());
}
