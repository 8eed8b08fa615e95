// Property tests: serializing a parsed formula is a fixed point

use cellscript::parser::parse_formula;
use cellscript::serializer::serialize;
use proptest::prelude::*;

const BINARY_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "%", "**", "&&", "||", "==", "!=", "<", "<=", ">", ">=", "&", "|", "^",
    "<<", ">>",
];

fn identifier() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["x", "total", "a1", "value"]).prop_map(String::from)
}

fn cell() -> impl Strategy<Value = String> {
    (0u8..10, 0u8..10).prop_map(|(r, c)| format!("[{}, {}]", r, c))
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..1000).prop_map(|n| n.to_string()),
        (0u32..1000, 1u32..100).prop_map(|(a, b)| format!("{}.{}", a, b)),
        Just("true".to_string()),
        Just("false".to_string()),
        identifier(),
        cell().prop_map(|c| format!("#{}", c)),
    ];

    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(BINARY_OPERATORS), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            inner.clone().prop_map(|e| format!("!{}", e)),
            inner.clone().prop_map(|e| format!("~{}", e)),
            inner.clone().prop_map(|e| format!("int({})", e)),
            inner.clone().prop_map(|e| format!("float({})", e)),
            (
                prop::sample::select(vec!["sum", "mean", "min", "max"]),
                cell(),
                cell()
            )
                .prop_map(|(f, a, b)| format!("{}({}, {})", f, a, b)),
        ]
    })
}

fn statement() -> impl Strategy<Value = String> {
    prop_oneof![
        expression(),
        (identifier(), expression()).prop_map(|(name, e)| format!("{} -> {}", name, e)),
        (expression(), expression(), expression())
            .prop_map(|(c, t, e)| format!("if {}\n{}\nelse\n{}\nend", c, t, e)),
        (identifier(), expression())
            .prop_map(|(name, e)| format!("for {} in [0, 0]..[1, 1] do\n{}\nend", name, e)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_serialization_is_a_fixed_point(statements in prop::collection::vec(statement(), 1..4)) {
        let source = statements.join("\n");
        let ast = parse_formula(&source);
        prop_assert!(ast.is_ok(), "Generated formula failed to parse: {:?}\n{}", ast.as_ref().err(), source);
        let once = serialize(&ast.unwrap());

        let reparsed = parse_formula(&once);
        prop_assert!(reparsed.is_ok(), "Canonical text failed to parse: {:?}\n{}", reparsed.as_ref().err(), once);
        prop_assert_eq!(serialize(&reparsed.unwrap()), once);
    }
}
