// tests/render_tests.rs

use lucene_dsl::ast::{
    Column, Expression, MAX_DEPTH, Operand, Operator, and, boost, eq, fuzzy, greater, greater_eq, in_list,
    less, less_eq, like, list, lit, must, not, or, range, regexp, wild,
};
use lucene_dsl::{ElasticDsl, JoinFields, RenderError};
use serde_json::{Value as Json, json};

fn joins() -> JoinFields {
    JoinFields::from_iter([
        ("answer.author", "answer"),
        ("answer.content", "answer"),
        ("comment.author", "comment"),
        ("comment.content", "comment"),
    ])
}

fn render(expr: &Expression) -> Json {
    let joins = joins();
    let doc = ElasticDsl::new(&joins).render(expr).unwrap();
    serde_json::to_value(&doc).unwrap()
}

fn query_string(field: &str, query: &str) -> Json {
    json!({"query_string": {"fields": [field], "lenient": true, "query": query}})
}

// ============================================================================
// Field clauses
// ============================================================================

#[test]
fn test_simple_equals() {
    assert_eq!(render(&eq("a", 5)), json!({"query": query_string("a", "5")}));
}

#[test]
fn test_simple_like() {
    assert_eq!(
        render(&like("a", "%(b|d)%")),
        json!({"query": query_string("a", "%(b|d)%")})
    );
}

#[test]
fn test_space_in_field_name() {
    assert_eq!(render(&eq("a b", 1)), json!({"query": query_string(r"a\ b", "1")}));
}

#[test]
fn test_quoted_column_name() {
    assert_eq!(
        render(&eq(r#""foobar""#, 1)),
        json!({"query": query_string(r#""foobar""#, "1")})
    );
}

#[test]
fn test_in_list() {
    let expr = in_list("a", list(vec![lit("foo"), lit("baz"), lit("bar")]).unwrap()).unwrap();
    assert_eq!(
        render(&expr),
        json!({"query": {"bool": {"should": [
            query_string("a", "foo"),
            query_string("a", "baz"),
            query_string("a", "bar"),
        ]}}})
    );
}

// ============================================================================
// Boolean operators
// ============================================================================

#[test]
fn test_simple_and() {
    assert_eq!(
        render(&and(eq("a", 5), eq("b", "foo"))),
        json!({"query": {"bool": {"must": [query_string("a", "5"), query_string("b", "foo")]}}})
    );
}

#[test]
fn test_nested_and() {
    let expr = and(eq("a", 5), and(eq("b", 5), eq("c", "foo")));
    assert_eq!(
        render(&expr),
        json!({"query": {"bool": {"must": [
            query_string("a", "5"),
            {"bool": {"must": [query_string("b", "5"), query_string("c", "foo")]}},
        ]}}})
    );
}

#[test]
fn test_simple_or() {
    assert_eq!(
        render(&or(eq("a", 5), eq("b", "foo"))),
        json!({"query": {"bool": {"should": [query_string("a", "5"), query_string("b", "foo")]}}})
    );
}

#[test]
fn test_simple_not() {
    assert_eq!(
        render(&not(eq("a", 1))),
        json!({"query": {"bool": {"must_not": [query_string("a", "1")]}}})
    );
}

#[test]
fn test_must() {
    assert_eq!(
        render(&must(eq("a", 1))),
        json!({"query": {"bool": {"must": [query_string("a", "1")]}}})
    );
}

#[test]
fn test_nested_filter() {
    let b_regexp = Expression::new(
        Operator::Equals,
        Operand::Column(Column::new("b")),
        Some(regexp("/b*ar/").into()),
    )
    .unwrap();
    let expr = and(or(eq("a", "foo"), b_regexp), not(range("c", "aaa", "*", false)));

    assert_eq!(
        render(&expr),
        json!({"query": {"bool": {"must": [
            {"bool": {"should": [query_string("a", "foo"), query_string("b", "/b*ar/")]}},
            {"bool": {"must_not": [{"range": {"c": {"gt": "aaa"}}}]}},
        ]}}})
    );
}

// ============================================================================
// Bare terms
// ============================================================================

#[test]
fn test_simple_literal() {
    assert_eq!(render(&lit("a")), json!({"query": query_string("*", "a")}));
}

#[test]
fn test_or_without_fields() {
    assert_eq!(
        render(&or("a", "b")),
        json!({"query": {"bool": {"should": [query_string("*", "a"), query_string("*", "b")]}}})
    );
}

#[test]
fn test_literal_next_to_field_clause() {
    assert_eq!(
        render(&or("a", eq("b", "c"))),
        json!({"query": {"bool": {"should": [query_string("*", "a"), query_string("b", "c")]}}})
    );
}

#[test]
fn test_simple_regexp() {
    assert_eq!(render(&regexp("/a/")), json!({"query": query_string("*", "/a/")}));
}

#[test]
fn test_simple_wild() {
    assert_eq!(render(&wild("a*")), json!({"query": query_string("*", "a*")}));
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_ranges() {
    let test_cases = vec![
        (range("a", "foo", "bar", true), json!({"a": {"gte": "foo", "lte": "bar"}})),
        (range("a", 1.1, 10, true), json!({"a": {"gte": 1.1, "lte": 10}})),
        (range("a", 1, 10.1, false), json!({"a": {"gt": 1, "lt": 10.1}})),
        (range("a", 1, 10, true), json!({"a": {"gte": 1, "lte": 10}})),
        (range("a", 1, 10, false), json!({"a": {"gt": 1, "lt": 10}})),
        (range("a", 1.0, 10.0, true), json!({"a": {"gte": 1.0, "lte": 10.0}})),
        (range("a", 1.0, 10.0, false), json!({"a": {"gt": 1.0, "lt": 10.0}})),
        (range("a", "*", 10, false), json!({"a": {"lt": 10}})),
        (range("a", "*", 10, true), json!({"a": {"lte": 10}})),
        (range("a", 1, "*", false), json!({"a": {"gt": 1}})),
        (range("a", 1, "*", true), json!({"a": {"gte": 1}})),
    ];

    for (expr, expected) in test_cases {
        assert_eq!(render(&expr), json!({"query": {"range": expected}}), "Failed for: {}", expr);
    }
}

#[test]
fn test_fully_unbounded_range() {
    assert_eq!(render(&range("a", "*", "*", true)), json!({"query": {"range": {"a": {}}}}));
}

#[test]
fn test_comparisons_stringify_bound() {
    let test_cases = vec![
        (less("a", 10), json!({"a": {"lt": "10"}})),
        (less_eq("a", 10), json!({"a": {"lte": "10"}})),
        (greater("a", 10), json!({"a": {"gt": "10"}})),
        (greater_eq("a", 10), json!({"a": {"gte": "10"}})),
    ];

    for (expr, expected) in test_cases {
        assert_eq!(render(&expr), json!({"query": {"range": expected}}), "Failed for: {}", expr);
    }
}

#[test]
fn test_range_field_is_escaped() {
    assert_eq!(
        render(&range("a b", 1, 2, true)),
        json!({"query": {"range": {r"a\ b": {"gte": 1, "lte": 2}}}})
    );
}

// ============================================================================
// Modifiers
// ============================================================================

#[test]
fn test_fuzzy_equals() {
    let expr = fuzzy(eq("a", "smthg"), 2).unwrap();
    assert_eq!(render(&expr), json!({"query": query_string("a", "smthg~2")}));
}

#[test]
fn test_simple_fuzzy() {
    let expr = fuzzy(lit("foo"), 2).unwrap();
    assert_eq!(render(&expr), json!({"query": query_string("*", "foo~2")}));
}

#[test]
fn test_simple_boost() {
    let expr = boost(lit("foo"), 2.0).unwrap();
    assert_eq!(render(&expr), json!({"query": query_string("*", "foo^2.000000")}));
}

#[test]
fn test_default_modifiers_render_plain() {
    assert_eq!(
        render(&boost(lit("foo"), 1.0).unwrap()),
        json!({"query": query_string("*", "foo")})
    );
    assert_eq!(
        render(&fuzzy(lit("foo"), 1).unwrap()),
        json!({"query": query_string("*", "foo")})
    );
}

#[test]
fn test_rendering_is_repeatable() {
    let expr = boost(eq("a", "b"), 2.0).unwrap();
    let first = render(&expr);
    let second = render(&expr);
    assert_eq!(first, second);
    assert_eq!(first, json!({"query": query_string("a", "b^2.000000")}));
}

// ============================================================================
// Parent/child joins
// ============================================================================

#[test]
fn test_nested_and_has_child() {
    let expr = and(
        eq("question.text", "sup?"),
        and(eq("answer.author", "sudo"), eq("c", "foo")),
    );
    assert_eq!(
        render(&expr),
        json!({"query": {"bool": {"must": [
            query_string("question.text", "sup?"),
            {"bool": {"must": [
                {"has_child": {"query": query_string("answer.author", "sudo"), "type": "answer"}},
                query_string("c", "foo"),
            ]}},
        ]}}})
    );
}

#[test]
fn test_has_child_needs_mapping() {
    let empty = JoinFields::new();
    let doc = ElasticDsl::new(&empty).render(&eq("answer.author", "sudo")).unwrap();
    assert_eq!(
        serde_json::to_value(&doc).unwrap(),
        json!({"query": query_string("answer.author", "sudo")})
    );
}

#[test]
fn test_has_child_through_modifier() {
    let expr = boost(eq("comment.content", "rust"), 2.0).unwrap();
    assert_eq!(
        render(&expr),
        json!({"query": {"has_child": {
            "query": query_string("comment.content", "rust^2.000000"),
            "type": "comment",
        }}})
    );
}

#[test]
fn test_only_equals_is_joined() {
    assert_eq!(
        render(&like("answer.author", "sudo")),
        json!({"query": query_string("answer.author", "sudo")})
    );
    assert_eq!(
        render(&greater("answer.author", 1)),
        json!({"query": {"range": {"answer.author": {"gt": "1"}}}})
    );
}

// ============================================================================
// Errors and output
// ============================================================================

#[test]
fn test_standalone_list_is_unrenderable() {
    let joins = joins();
    let expr = list(vec![lit("a"), lit("b")]).unwrap();
    let err = ElasticDsl::new(&joins).render(&expr).unwrap_err();
    assert!(matches!(err, RenderError::Unrenderable { op: Operator::List, .. }));
    assert!(err.to_string().contains("inside IN"));
}

#[test]
fn test_tree_beyond_depth_limit_is_unrenderable() {
    let joins = joins();
    let mut expr = lit("a");
    for _ in 0..MAX_DEPTH {
        expr = and("a", expr);
    }
    assert_eq!(expr.depth(), MAX_DEPTH + 1);

    let err = ElasticDsl::new(&joins).render(&expr).unwrap_err();
    assert!(matches!(err, RenderError::Unrenderable { op: Operator::And, .. }));
    assert!(err.to_string().contains("nested too deeply"));
}

#[test]
fn test_tree_at_depth_limit_renders() {
    let mut expr = lit("a");
    for _ in 1..MAX_DEPTH {
        expr = and("a", expr);
    }
    let json = render(&expr);
    assert_eq!(json["query"]["bool"]["must"][0], query_string("*", "a"));
}

#[test]
fn test_render_to_string_is_pretty() {
    let joins = joins();
    let text = ElasticDsl::new(&joins).render_to_string(&eq("a", 5)).unwrap();
    assert!(text.starts_with("{\n  \"query\": {\n    \"query_string\": {"));
    let parsed: Json = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"query": query_string("a", "5")}));
}

#[test]
fn test_free_render_function() {
    let doc = lucene_dsl::render(&eq("answer.author", "x"), &joins()).unwrap();
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["query"]["has_child"]["type"], "answer");
}
