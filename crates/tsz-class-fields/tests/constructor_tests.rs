//! Tests for constructor scanning: parameter properties and the field
//! initializer insertion point.

mod common;

use common::{analyse, try_analyse_with};
use tsz_class_fields::{ClassInfoError, ClassTransformOptions, SkipRewriter};
use tsz_scanner::SyntaxKind;

#[test]
fn test_no_constructor() {
    let analysis = analyse("class A { x = 1; }");
    assert_eq!(analysis.info.constructor_insert_pos, None);
    assert_eq!(analysis.info.initializer_statements, vec!["this.__init()"]);
}

#[test]
fn test_parameter_properties() {
    let analysis = analyse("class A { constructor(public a, public b) {} }");
    assert_eq!(
        analysis.info.initializer_statements,
        vec!["this.a = a", "this.b = b"]
    );
    let pos = analysis.info.constructor_insert_pos.expect("constructor present");
    assert_eq!(analysis.token_text(pos - 1), "{");
    assert_eq!(analysis.token_text(pos - 2), ")");
    assert_eq!(analysis.token_text(pos), "}");
}

#[test]
fn test_parameter_properties_with_types_and_defaults() {
    let analysis = analyse(
        "class A { constructor(private readonly a: number, b: string, protected c = 1, override d?: D) {} }",
    );
    assert_eq!(
        analysis.info.initializer_statements,
        vec!["this.a = a", "this.c = c", "this.d = d"]
    );
}

#[test]
fn test_this_parameter_is_not_a_property() {
    let analysis = analyse("class A { constructor(this: A, public a) {} }");
    assert_eq!(analysis.info.initializer_statements, vec!["this.a = a"]);
}

#[test]
fn test_insert_position_after_super_call() {
    let analysis = analyse("class A extends B { constructor(a) { super(a); this.x = 1; } }");
    let pos = analysis.info.constructor_insert_pos.expect("constructor present");
    assert_eq!(analysis.token_text(pos - 1), ")");
    assert_eq!(analysis.token_text(pos - 2), "a");
    assert_eq!(analysis.token_text(pos), ";");
}

#[test]
fn test_insert_position_skips_nested_parens_in_super_call() {
    let analysis =
        analyse("class A extends B { constructor() { foo(); super(bar(1), 2); baz(); } }");
    let pos = analysis.info.constructor_insert_pos.expect("constructor present");
    assert_eq!(analysis.token_text(pos - 2), "2");
    assert_eq!(analysis.token_text(pos - 1), ")");
    assert_eq!(analysis.token_text(pos), ";");
    assert_eq!(analysis.token_text(pos + 1), "baz");
}

#[test]
fn test_first_super_call_in_nested_block_wins() {
    let analysis = analyse(
        "class A extends B { constructor(x) { if (x) { super(x, 1); } else { super(); } } }",
    );
    let pos = analysis.info.constructor_insert_pos.expect("constructor present");
    assert_eq!(analysis.token_text(pos - 2), "1");
    assert_eq!(analysis.token_text(pos - 1), ")");
}

#[test]
fn test_field_initializers_follow_parameter_properties() {
    let analysis = analyse("class A { x = 1; constructor(public a) {} static y = 2; z = 3; }");
    assert_eq!(
        analysis.info.initializer_statements,
        vec!["this.a = a", "this.__init()", "this.__init2()"]
    );
    assert_eq!(analysis.info.static_initializer_suffixes, vec![".__initStatic()"]);
}

#[test]
fn test_constructor_after_modifiers() {
    let analysis = analyse("class A { public constructor(public a) {} x = 1; }");
    assert_eq!(
        analysis.info.initializer_statements,
        vec!["this.a = a", "this.__init()"]
    );
    assert_eq!(analysis.field_texts(), vec!["x = 1"]);
}

#[test]
fn test_constructor_overloads_are_skipped() {
    let analysis = analyse(
        "class A { constructor(a: string); constructor(public a: any) { } }",
    );
    assert_eq!(analysis.info.initializer_statements, vec!["this.a = a"]);
    let pos = analysis.info.constructor_insert_pos.expect("constructor present");
    assert_eq!(analysis.token_text(pos - 1), "{");
    assert_eq!(analysis.token_text(pos - 3), "any");
    // the overload's semicolon is still a bare class-body semicolon
    assert_eq!(analysis.removed_texts(), vec![";"]);
}

#[test]
fn test_binding_pattern_parameter_property() {
    let source = "class A { constructor(private { a }) {} }";
    let (tokens, _, result) =
        try_analyse_with(source, &ClassTransformOptions::default(), &mut SkipRewriter);
    let err = result.expect_err("binding pattern should fail");
    let brace = source.find("{ a").expect("pattern brace") as u32;
    let index = tokens
        .iter()
        .position(|t| t.start == brace)
        .expect("pattern token");
    assert_eq!(
        err,
        ClassInfoError::InvalidParameterProperty {
            index,
            found: SyntaxKind::OpenBraceToken
        }
    );
    assert!(err.is_user_facing());

    let diagnostic = err
        .to_diagnostic("a.ts", &tokens)
        .expect("user-facing errors have diagnostics");
    assert_eq!(diagnostic.code, 1187);
    assert_eq!(diagnostic.start, brace);
    assert_eq!(diagnostic.file, "a.ts");
    assert_eq!(
        diagnostic.message_text,
        "A parameter property may not be declared using a binding pattern."
    );
}

#[test]
fn test_array_binding_pattern_parameter_property() {
    let (_, _, result) = try_analyse_with(
        "class A { constructor(a, readonly [b]) {} }",
        &ClassTransformOptions::default(),
        &mut SkipRewriter,
    );
    assert!(matches!(
        result,
        Err(ClassInfoError::InvalidParameterProperty {
            found: SyntaxKind::OpenBracketToken,
            ..
        })
    ));
}
