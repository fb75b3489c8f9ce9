//! Visitors that skip a variant must not build

#[test]
fn test_incomplete_visitors_are_rejected() {
    let cases = trybuild::TestCases::new();
    cases.compile_fail("tests/ui/*.rs");
}
