use super::support::{local_url, Fixture};
use agentbook::commitment::{parse_team_teammates, Strictness};
use agentbook::requirements::AgentCapability;
use agentbook::resolver::IssueReason;
use agentbook::{compile_agent, CompileOptions};

const SUPPORT_LEAD: &str =
    "Ask https://s6.ptbk.io/benjamin-white, our support lead, for billing questions.";

#[test]
fn support_lead_example_yields_one_teammate() {
    let teammates = parse_team_teammates(SUPPORT_LEAD, Strictness::Lenient).unwrap();

    assert_eq!(teammates.len(), 1);
    let teammate = &teammates[0];
    assert_eq!(teammate.url, "https://s6.ptbk.io/benjamin-white");
    assert_eq!(teammate.label, "Benjamin White");
    assert!(teammate.instructions.contains("our support lead, for billing questions"));
    assert!(!teammate.instructions.starts_with(','));
    assert!(!teammate.instructions.contains("https://"));
}

#[tokio::test]
async fn unreachable_teammates_stay_in_place_with_issues() {
    let fixture = Fixture::new(&[]).await;
    let source = format!("Desk\nTEAM {}", SUPPORT_LEAD);

    let compiled = compile_agent(&source, &fixture.options()).await.unwrap();

    assert_eq!(compiled.requirements.capabilities.len(), 1);
    assert!(matches!(
        &compiled.requirements.capabilities[0],
        AgentCapability::Team { resolved: None, teammate } if teammate.label == "Benjamin White"
    ));
    assert_eq!(compiled.issues.len(), 1);
    assert_eq!(compiled.issues[0].reason, IssueReason::NotFound);
}

#[tokio::test]
async fn team_capabilities_are_replaced_in_source_order() {
    let fixture = Fixture::new(&[
        "Anna\nPERSONA Sales lead.",
        "Bob\nA support engineer.",
    ])
    .await;
    let source = format!(
        "Desk\nTEAM Ask {} for sales.\nUSE SEARCH ENGINE\nTEAM {} handles support",
        local_url("anna"),
        local_url("bob")
    );

    let compiled = compile_agent(&source, &fixture.options()).await.unwrap();
    let capabilities = &compiled.requirements.capabilities;
    assert_eq!(capabilities.len(), 3);

    match &capabilities[0] {
        AgentCapability::Team {
            teammate,
            resolved: Some(resolved),
        } => {
            assert_eq!(teammate.instructions, "for sales");
            assert_eq!(resolved.identity.agent_name, "anna");
            assert_eq!(resolved.description.as_deref(), Some("Sales lead."));
        }
        other => panic!("unexpected capability: {other:?}"),
    }
    assert!(matches!(&capabilities[1], AgentCapability::Tool { name } if name == "web_search"));
    match &capabilities[2] {
        AgentCapability::Team {
            resolved: Some(resolved),
            ..
        } => {
            assert_eq!(resolved.identity.agent_name, "bob");
            assert_eq!(resolved.description.as_deref(), Some("A support engineer."));
        }
        other => panic!("unexpected capability: {other:?}"),
    }
    assert!(compiled.issues.is_empty());
}

#[tokio::test]
async fn teammates_may_point_back_at_the_compiled_agent() {
    let fixture = Fixture::new(&["Anna\nTEAM Ask http://localhost:4440/bob", "Bob"]).await;
    let source = "Bob\nTEAM Escalate to http://localhost:4440/anna";

    let compiled = compile_agent(source, &fixture.options()).await.unwrap();
    assert!(matches!(
        &compiled.requirements.capabilities[0],
        AgentCapability::Team { resolved: Some(_), .. }
    ));
    assert!(compiled.issues.is_empty());
}

#[tokio::test]
async fn strict_compilation_rejects_invalid_teammates() {
    let options = CompileOptions::new().with_strictness(Strictness::Strict);
    let err = compile_agent("Desk\nTEAM See https://a.io/handbook.pdf", &options)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("handbook.pdf"));

    let lenient = compile_agent("Desk\nTEAM See https://a.io/handbook.pdf", &CompileOptions::new())
        .await
        .unwrap();
    assert!(lenient.requirements.capabilities.is_empty());
}
