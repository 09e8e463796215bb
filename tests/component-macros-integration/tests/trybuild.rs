//! trybuild compile-time tests for component_macros

#[test]
fn trybuild_component_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/derive_component.rs");
    t.pass("tests/trybuild/derive_injectable.rs");
    t.pass("tests/trybuild/injectable_in_container.rs");
}
