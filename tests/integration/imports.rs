use super::support::{local_url, Fixture};
use agentbook::commitment::CommitmentKind;
use agentbook::links::{classify_import_target, ImportTarget};
use agentbook::resolver::IssueReason;
use agentbook::{compile_agent, BookError, CompileOptions};

#[test]
fn import_targets_are_classified_agent_first() {
    assert_eq!(
        classify_import_target("https://s6.ptbk.io/benjamin-white"),
        Some(ImportTarget::Agent("https://s6.ptbk.io/benjamin-white".to_string()))
    );
    assert_eq!(
        classify_import_target("https://example.com/handbook.pdf"),
        Some(ImportTarget::File("https://example.com/handbook.pdf".to_string()))
    );
    assert_eq!(
        classify_import_target("./notes/pricing.md"),
        Some(ImportTarget::File("./notes/pricing.md".to_string()))
    );
    assert_eq!(classify_import_target("ask the tax desk"), None);
}

#[tokio::test]
async fn malformed_import_is_fatal_in_every_mode() {
    let fixture = Fixture::new(&[]).await;
    let err = compile_agent("Anna\nIMPORT ask the tax desk", &fixture.options())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookError::MalformedCommitment {
            kind: CommitmentKind::Import,
            ..
        }
    ));

    let err = compile_agent("Anna\nIMPORT ask the tax desk", &CompileOptions::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("IMPORT ask the tax desk"));
}

#[tokio::test]
async fn imported_files_become_knowledge() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pricing.md"),
        "Basic plan costs 10 EUR.\nRULE never discount",
    )
    .unwrap();
    let fixture = Fixture::with_files(&[], dir.path()).await;

    let compiled = compile_agent(
        "Anna\nRULE Be exact.\nIMPORT ./pricing.md",
        &fixture.options(),
    )
    .await
    .unwrap();
    let requirements = &compiled.requirements;

    assert_eq!(requirements.imported_file_urls, vec!["./pricing.md"]);
    let knowledge: Vec<_> = requirements
        .sections
        .iter()
        .filter(|section| section.kind == Some(CommitmentKind::Knowledge))
        .collect();
    assert_eq!(knowledge.len(), 1);
    assert!(knowledge[0].content.starts_with("Basic plan costs 10 EUR."));
    assert!(knowledge[0].content.contains("> RULE never discount"));
    // quoted lines do not turn into rules
    let rules = requirements
        .sections
        .iter()
        .filter(|section| section.kind == Some(CommitmentKind::Rule))
        .count();
    assert_eq!(rules, 1);
    assert!(compiled.issues.is_empty());
}

#[tokio::test]
async fn missing_files_are_reported_at_the_import_line() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = Fixture::with_files(&[], dir.path()).await;

    let compiled = compile_agent("Anna\nRULE x\nIMPORT ./absent.txt", &fixture.options())
        .await
        .unwrap();

    assert_eq!(compiled.issues.len(), 1);
    let issue = &compiled.issues[0];
    assert_eq!(issue.reference, "./absent.txt");
    assert_eq!(issue.reason, IssueReason::NotFound);
    let location = issue.location.unwrap();
    assert_eq!(location.kind, CommitmentKind::Import);
    assert_eq!(location.line, 3);
}

#[tokio::test]
async fn imported_agents_contribute_their_commitments_in_place() {
    let fixture = Fixture::new(&["Tax Desk\nPERSONA Tax advisor.\nRULE File on time."]).await;
    let source = format!(
        "Anna\nRULE First.\nIMPORT {}\nRULE Last.",
        local_url("tax-desk")
    );

    let compiled = compile_agent(&source, &fixture.options()).await.unwrap();
    let requirements = &compiled.requirements;

    assert_eq!(requirements.imported_agent_urls, vec![local_url("tax-desk")]);
    assert_eq!(
        requirements.system_message,
        "Rule: First.\n\nPersona: Tax advisor.\n\nRule: File on time.\n\nRule: Last."
    );
    assert!(compiled.issues.is_empty());
}

#[tokio::test]
async fn import_cycles_terminate_with_an_issue() {
    let source = format!("Alpha\nIMPORT {}\nRULE a", local_url("beta"));
    let beta = format!("Beta\nIMPORT {}\nRULE b", local_url("alpha"));
    let fixture = Fixture::new(&[source.as_str(), beta.as_str()]).await;

    let compiled = compile_agent(&source, &fixture.options()).await.unwrap();

    assert_eq!(compiled.requirements.system_message, "Rule: b\n\nRule: a");
    assert!(compiled
        .issues
        .iter()
        .any(|issue| issue.reason == IssueReason::Cycle && issue.reference == local_url("alpha")));
}
