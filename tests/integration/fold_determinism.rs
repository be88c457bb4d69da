use agentbook::{compute_agent_hash, fold_commitments, parse_book, CommitmentRegistry, Strictness};
use proptest::prelude::*;

fn commitment_line() -> impl Strategy<Value = String> {
    let keyword = prop::sample::select(vec![
        "PERSONA", "RULE", "GOAL", "KNOWLEDGE", "STYLE", "MODEL", "META COLOR", "USE EMAIL",
        "USE TIME", "TEAM", "DELETE", "CLOSED", "SAMPLE", "INITIAL MESSAGE", "",
    ]);
    (keyword, "[a-zA-Z0-9 .,:/-]{0,40}").prop_map(|(keyword, content)| {
        if keyword.is_empty() {
            content
        } else {
            format!("{} {}", keyword, content)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn folding_the_same_source_twice_is_identical(
        title in "[A-Z][a-z]{1,10}",
        lines in prop::collection::vec(commitment_line(), 0..12),
    ) {
        let source = format!("{}\n{}", title, lines.join("\n"));
        let registry = CommitmentRegistry::standard();

        let first = fold_commitments(&parse_book(&source), registry, Strictness::Lenient);
        let second = fold_commitments(&parse_book(&source), registry, Strictness::Lenient);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn hashing_is_stable_and_content_sensitive(source in "(\\PC|\n){0,300}") {
        let hash = compute_agent_hash(&source);
        prop_assert_eq!(hash.len(), 64);
        prop_assert_eq!(&hash, &compute_agent_hash(&source));
        let extended = format!("{}\nRULE appended", source);
        prop_assert_ne!(hash, compute_agent_hash(&extended));
    }
}
