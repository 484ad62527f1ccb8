//! Tests for `get_class_info`: headers, fields, removal ranges and the
//! cursor contract.

mod common;

use common::{Analysis, analyse, analyse_with, es_transforms_disabled, try_analyse_with};
use tsz_class_fields::{
    Annotation, ClassHeaderInfo, ClassInfoError, ClassTransformOptions, NameManager, SkipRewriter,
    TextCollector, TokenRange, get_class_info,
};
use tsz_scanner::{TokenStream, scan, tokenize};

fn all_ranges(analysis: &Analysis) -> Vec<TokenRange> {
    let mut ranges: Vec<TokenRange> = analysis
        .info
        .fields
        .iter()
        .map(|field| field.range())
        .chain(analysis.info.ranges_to_remove.iter().copied())
        .collect();
    ranges.sort();
    ranges
}

#[test]
fn test_empty_class_declaration() {
    let analysis = analyse("class Foo {}");
    assert_eq!(
        analysis.info.header_info,
        ClassHeaderInfo {
            is_expression: false,
            class_name: Some("Foo".to_string()),
            has_superclass: false,
        }
    );
    assert_eq!(analysis.info.constructor_insert_pos, None);
    assert!(analysis.info.initializer_statements.is_empty());
    assert!(analysis.info.static_initializer_suffixes.is_empty());
    assert!(analysis.info.fields.is_empty());
    assert!(analysis.info.ranges_to_remove.is_empty());
}

#[test]
fn test_anonymous_class_expression_with_superclass() {
    let analysis = analyse("const A = class extends Base {};");
    assert_eq!(
        analysis.info.header_info,
        ClassHeaderInfo {
            is_expression: true,
            class_name: None,
            has_superclass: true,
        }
    );
}

#[test]
fn test_type_parameter_constraint_is_not_a_superclass() {
    let analysis = analyse("class A<T extends B> {}");
    assert!(!analysis.info.header_info.has_superclass);
    assert_eq!(analysis.info.header_info.class_name.as_deref(), Some("A"));

    let analysis = analyse("class A<T extends B> extends C<T> implements D {}");
    assert!(analysis.info.header_info.has_superclass);
}

#[test]
fn test_instance_field() {
    let analysis = analyse("class A { x = 1; }");
    assert_eq!(analysis.info.initializer_statements, vec!["this.__init()"]);
    assert!(analysis.info.static_initializer_suffixes.is_empty());
    assert_eq!(analysis.field_texts(), vec!["x = 1"]);

    let field = &analysis.info.fields[0];
    assert_eq!(field.initializer_name, "__init");
    assert_eq!(analysis.token_text(field.equals_index), "=");
    assert_eq!(analysis.removed_texts(), vec![";"]);
}

#[test]
fn test_static_field() {
    let analysis = analyse("class A { static x = 1; }");
    assert_eq!(analysis.info.static_initializer_suffixes, vec![".__initStatic()"]);
    assert!(analysis.info.initializer_statements.is_empty());
    // the range starts at the name, after the modifiers
    assert_eq!(analysis.field_texts(), vec!["x = 1"]);
    assert_eq!(analysis.info.fields[0].initializer_name, "__initStatic");
}

#[test]
fn test_declarations_without_initializer_are_removed() {
    let analysis = analyse("class A { x: number; y?: string; }");
    assert!(analysis.info.fields.is_empty());
    assert!(analysis.info.initializer_statements.is_empty());
    assert_eq!(
        analysis.removed_texts(),
        vec!["x : number", ";", "y ? : string", ";"]
    );
}

#[test]
fn test_methods_and_accessors_are_not_reported() {
    let analysis = analyse(
        "class A {
            foo() {}
            get bar() { return 1; }
            set bar(v) {}
            async *gen() {}
            static baz<T>(x: T) {}
        }",
    );
    assert!(analysis.info.fields.is_empty());
    assert!(analysis.info.initializer_statements.is_empty());
    assert!(analysis.info.static_initializer_suffixes.is_empty());
    assert!(analysis.info.ranges_to_remove.is_empty());
}

#[test]
fn test_computed_field_range_starts_at_bracket() {
    let analysis = analyse("class A { [key] = value; }");
    assert_eq!(analysis.field_texts(), vec!["[ key ] = value"]);
    assert_eq!(analysis.token_text(analysis.info.fields[0].start), "[");
}

#[test]
fn test_fields_without_semicolons() {
    let analysis = analyse("class A {\n  x = 1\n  y = f()\n  m() {}\n}");
    assert_eq!(analysis.field_texts(), vec!["x = 1", "y = f ( )"]);
    assert!(analysis.info.ranges_to_remove.is_empty());
}

#[test]
fn test_ranges_are_disjoint_and_inside_body() {
    let analysis = analyse(
        "class A extends B {
            declare d: D;
            x = 1;
            static s: S = make();
            [k]: number;
            ;
            constructor(public a: string) { super(); }
            m(): void {}
            y = { a: [1, 2] };
        }",
    );
    let ranges = all_ranges(&analysis);
    assert!(ranges.len() >= 6, "expected fields and removals: {ranges:?}");

    let body_open = analysis
        .tokens
        .iter()
        .position(|t| t.context_id == analysis.tokens[analysis.class_index].context_id && t.text(analysis.source) == "{")
        .expect("body brace");
    let body_close = analysis.tokens.len() - 2;
    for range in &ranges {
        assert!(range.start < range.end, "empty range {range:?}");
        assert!(range.start > body_open && range.end <= body_close, "{range:?} outside body");
    }
    for pair in ranges.windows(2) {
        assert!(!pair[0].overlaps(&pair[1]), "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_initializer_names_avoid_file_identifiers() {
    let analysis = analyse("const __init = 0;\nclass A { x = 1; y = 2; static z = 3; }");
    assert_eq!(
        analysis.info.initializer_statements,
        vec!["this.__init2()", "this.__init3()"]
    );
    assert_eq!(analysis.info.static_initializer_suffixes, vec![".__initStatic()"]);
    let names: Vec<&str> = analysis
        .info
        .fields
        .iter()
        .map(|field| field.initializer_name.as_str())
        .collect();
    assert_eq!(names, vec!["__init2", "__init3", "__initStatic"]);
}

#[test]
fn test_names_are_unique_across_classes() {
    let source = "class A { x = 1; } class B { y = 2; }";
    let tokens = scan(source).expect("source should scan");
    let mut names = NameManager::from_tokens(source, &tokens);
    let options = ClassTransformOptions::default();
    let mut stream = TokenStream::new(source, &tokens);

    let first = get_class_info(&mut stream, &mut SkipRewriter, &mut names, &options)
        .expect("first class should analyse");
    stream.set_index(tokens.iter().rposition(|t| t.text(source) == "class").expect("second class"));
    let second = get_class_info(&mut stream, &mut SkipRewriter, &mut names, &options)
        .expect("second class should analyse");

    assert_eq!(first.initializer_statements, vec!["this.__init()"]);
    assert_eq!(second.initializer_statements, vec!["this.__init2()"]);
}

#[test]
fn test_rewriter_sees_exactly_the_initializer_tokens() {
    let mut collector = TextCollector::default();
    let (_, _, result) = try_analyse_with(
        "class A { x = a + b; m() { c; } static y = [1, 2]; z: number; }",
        &ClassTransformOptions::default(),
        &mut collector,
    );
    result.expect("class should analyse");
    assert_eq!(collector.texts, vec!["a", "+", "b", "[", "1", ",", "2", "]"]);
}

#[test]
fn test_disabled_es_transforms() {
    let source = "class A {
        constructor(private a) {}
        x = 1;
        static y = 2;
        z: number;
        declare w: string;
        ;
    }";
    let mut collector = TextCollector::default();
    let (_, _, result) = try_analyse_with(source, &es_transforms_disabled(), &mut collector);
    result.expect("class should analyse");
    assert_eq!(collector.texts, vec!["1", "2"]);

    let analysis = analyse_with(source, &es_transforms_disabled());
    assert!(analysis.info.fields.is_empty());
    assert!(analysis.info.static_initializer_suffixes.is_empty());
    assert_eq!(analysis.info.initializer_statements, vec!["this.a = a"]);
    assert!(analysis.info.constructor_insert_pos.is_some());
    assert_eq!(analysis.removed_texts(), vec!["declare w : string"]);
}

#[test]
fn test_stalled_rewriter_is_reported() {
    let mut stalled = |_: &mut TokenStream<'_>| {};
    let (tokens, _, result) = try_analyse_with(
        "class A { x = 1; }",
        &ClassTransformOptions::default(),
        &mut stalled,
    );
    let value = tokens.iter().position(|t| t.text("class A { x = 1; }") == "1");
    assert_eq!(
        result,
        Err(ClassInfoError::RewriterStalled {
            index: value.expect("value token")
        })
    );
}

#[test]
fn test_overshooting_rewriter_is_reported() {
    let mut greedy = |tokens: &mut TokenStream<'_>| {
        let index = tokens.current_index();
        tokens.set_index(index + 5);
    };
    let (_, _, result) = try_analyse_with(
        "class A { x = 1; y = 2; }",
        &ClassTransformOptions::default(),
        &mut greedy,
    );
    assert_eq!(result, Err(ClassInfoError::RewriterOvershot { index: 10, end: 6 }));
}

#[test]
fn test_unannotated_class_token() {
    let source = "class A { }";
    let tokens = tokenize(source).expect("source should lex");
    let mut stream = TokenStream::new(source, &tokens);
    let result = get_class_info(
        &mut stream,
        &mut SkipRewriter,
        &mut NameManager::new(),
        &ClassTransformOptions::default(),
    );
    assert_eq!(
        result,
        Err(ClassInfoError::MissingAnnotation {
            annotation: Annotation::ContextId,
            index: 0
        })
    );
    assert_eq!(stream.current_index(), 0);
}

#[test]
fn test_missing_rhs_end_index() {
    let source = "class A { x = 1; }";
    let mut tokens = scan(source).expect("source should scan");
    tokens[4].rhs_end_index = None;
    let mut stream = TokenStream::new(source, &tokens);
    let result = get_class_info(
        &mut stream,
        &mut SkipRewriter,
        &mut NameManager::new(),
        &ClassTransformOptions::default(),
    );
    let err = result.expect_err("missing annotation should fail");
    assert_eq!(
        err,
        ClassInfoError::MissingAnnotation {
            annotation: Annotation::RhsEndIndex,
            index: 4
        }
    );
    assert!(!err.is_user_facing());
    assert!(err.to_diagnostic("a.ts", &tokens).is_none());
}

#[test]
fn test_untagged_computed_field_name() {
    let source = "class A { [key] = 1; }";
    let mut tokens = scan(source).expect("source should scan");
    tokens[3].context_id = None;
    let mut stream = TokenStream::new(source, &tokens);
    let result = get_class_info(
        &mut stream,
        &mut SkipRewriter,
        &mut NameManager::new(),
        &ClassTransformOptions::default(),
    );
    assert_eq!(
        result,
        Err(ClassInfoError::MissingAnnotation {
            annotation: Annotation::ContextId,
            index: 3
        })
    );
    assert_eq!(stream.current_index(), 0);
}

#[test]
fn test_class_info_serializes_to_json() {
    let analysis = analyse("class Foo { static x = 1; }");
    let value = serde_json::to_value(&analysis.info).expect("class info should serialize");
    assert_eq!(value["header_info"]["class_name"], "Foo");
    assert_eq!(value["header_info"]["is_expression"], false);
    assert!(value["constructor_insert_pos"].is_null());
    assert_eq!(value["static_initializer_suffixes"][0], ".__initStatic()");
    assert_eq!(value["fields"][0]["initializer_name"], "__initStatic");
    assert_eq!(value["ranges_to_remove"][0]["end"], 8);
}
