#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse_ok(source: &str) -> Parse {
        let parse = parse_source(source);
        assert!(parse.is_valid(), "unexpected errors: {:?}", parse.errors);
        parse
    }

    fn first_item(source: &str) -> SyntaxNode {
        let parse = parse_ok(source);
        let item = parse.root.child_nodes().next().cloned();
        item.expect("source should contain at least one item")
    }

    fn expr_sexp(source: &str) -> String {
        first_item(source).to_sexp()
    }

    // ========================================================================
    // Top level
    // ========================================================================

    #[test]
    fn empty_source_is_an_empty_source_file() {
        let parse = parse_ok("");
        assert_eq!(parse.root.kind, NodeKind::SourceFile);
        assert!(parse.root.children.is_empty());
    }

    #[test]
    fn top_level_accepts_declarations_statements_and_expressions() {
        let parse = parse_ok("field f: Int\nx := y.f\na + b");
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::FieldDecl, NodeKind::AssignStmt, NodeKind::BinExpr]
        );
    }

    #[test]
    fn comment_only_source_keeps_its_text() {
        let source = "// just a comment\n/* and another */";
        let parse = parse_ok(source);
        assert!(parse.root.child_nodes().next().is_none());
        assert_eq!(parse.root.text(), source);
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    #[test]
    fn field_declaration_shape() {
        insta::assert_snapshot!(
            first_item("field balance: Int").to_sexp(),
            @r#"(field "field" (ident "balance") (ident "Int"))"#
        );
    }

    #[test]
    fn method_with_contract_and_body() {
        let source = "method m(x: Int) returns (y: Int)\n  requires x > 0\n  ensures y == x\n{\n  y := x\n}\n";
        let parse = parse_ok(source);
        assert_eq!(parse.root.text(), source);

        let method = parse.root.child_nodes().next().unwrap();
        assert_eq!(method.kind, NodeKind::Method);
        assert_eq!(method.field_node("name").unwrap().text(), "m");

        let params = method
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Parameter)
            .count();
        assert_eq!(params, 1);

        let returns = method
            .child_nodes()
            .find(|n| n.kind == NodeKind::Returns)
            .unwrap();
        let out_params = returns
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Parameter)
            .count();
        assert_eq!(out_params, 1);

        assert!(method.child_nodes().any(|n| n.kind == NodeKind::Requires));
        assert!(method.child_nodes().any(|n| n.kind == NodeKind::Ensures));

        let body = method.field_node("body").unwrap();
        assert_eq!(body.kind, NodeKind::Block);
        let stmts: Vec<_> = body.child_nodes().collect();
        assert_eq!(stmts.len(), 1);
        insta::assert_snapshot!(
            stmts[0].to_sexp(),
            @r#"(assign_stmt target: (ident "y") ":=" expr: (ident "x"))"#
        );
    }

    #[test]
    fn abstract_method_has_no_body() {
        let method = first_item("method havoc() returns (x: Int)");
        assert!(method.field_node("body").is_none());
    }

    #[test]
    fn function_with_contracts_and_body() {
        let source = "function abs(x: Int): Int\n  ensures result >= 0\n{ x < 0 ? 0 - x : x }";
        let function = first_item(source);
        assert_eq!(function.kind, NodeKind::Function);
        assert_eq!(function.field_node("name").unwrap().text(), "abs");
        assert!(function.child_nodes().any(|n| n.kind == NodeKind::Ensures));
    }

    #[test]
    fn abstract_predicate_has_no_body() {
        let predicate = first_item("predicate P(r: Ref)");
        assert_eq!(predicate.kind, NodeKind::Predicate);
        let exprs = predicate
            .child_nodes()
            .filter(|n| n.kind != NodeKind::Ident && n.kind != NodeKind::Parameter)
            .count();
        assert_eq!(exprs, 0);
    }

    #[test]
    fn predicate_with_body() {
        let predicate = first_item("predicate P(r: Ref) { acc(r.f) }");
        assert!(predicate.child_nodes().any(|n| n.kind == NodeKind::FunctionCall));
    }

    #[test]
    fn domain_members_mix_functions_and_axioms() {
        let source = "domain D {\n  function f(x: Int): Int\n  function g(Int): Bool\n  axiom a { f(0) == 0 }\n  axiom { true }\n}";
        let domain = first_item(source);
        assert_eq!(domain.kind, NodeKind::Domain);
        assert_eq!(domain.field_node("name").unwrap().text(), "D");

        let members: Vec<_> = domain
            .child_nodes()
            .filter(|n| matches!(n.kind, NodeKind::DomainFunction | NodeKind::Axiom))
            .cloned()
            .collect();
        assert_eq!(members.len(), 4);
        assert_eq!(members[0].kind, NodeKind::DomainFunction);
        assert_eq!(members[1].kind, NodeKind::DomainFunction);
        assert_eq!(members[2].field_node("name").unwrap().text(), "a");
        assert!(members[3].field_node("name").is_none());
    }

    #[test]
    fn domain_function_accepts_bare_types() {
        let source = "domain D { function pair(Int, b: Bool): Int }";
        let domain = first_item(source);
        let f = domain
            .child_nodes()
            .find(|n| n.kind == NodeKind::DomainFunction)
            .unwrap();
        let kinds: Vec<_> = f
            .child_nodes()
            .filter(|n| matches!(n.kind, NodeKind::Typ | NodeKind::Parameter))
            .map(|n| n.kind)
            .collect();
        assert_eq!(kinds, vec![NodeKind::Typ, NodeKind::Parameter]);
    }

    #[test]
    fn contract_accepts_bracketed_expression_pair() {
        let source = "method m()\n  requires [p, q]\n{ }";
        let method = first_item(source);
        let requires = method
            .child_nodes()
            .find(|n| n.kind == NodeKind::Requires)
            .unwrap();
        insta::assert_snapshot!(
            requires.to_sexp(),
            @r#"(requires "requires" (spec_expr (ident "p") (ident "q")))"#
        );
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn var_declaration_with_initializer() {
        insta::assert_snapshot!(
            expr_sexp("var x: Int := 0"),
            @r#"(var_decl "var" ident: (ident "x") (typ (ident "Int")) ":=" expr: (int_literal "0"))"#
        );
    }

    #[test]
    fn var_declaration_with_generic_type() {
        insta::assert_snapshot!(
            expr_sexp("var s: Seq[Int]"),
            @r#"(var_decl "var" ident: (ident "s") (typ (ident "Seq") (ident "Int")))"#
        );
    }

    #[test]
    fn label_and_goto() {
        let parse = parse_ok("label loop goto loop");
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Label, NodeKind::GotoStmt]);
    }

    #[test]
    fn if_statement_with_else() {
        let stmt = first_item("if (x < 0) { y := x } else { y := 0 }");
        assert_eq!(stmt.kind, NodeKind::IfStmt);
        assert_eq!(stmt.field_node("condition").unwrap().kind, NodeKind::BinExpr);
        assert_eq!(stmt.field_node("then_clause").unwrap().kind, NodeKind::Block);
        assert_eq!(stmt.field_node("else_clause").unwrap().kind, NodeKind::Block);
    }

    #[test]
    fn if_statement_without_else() {
        let stmt = first_item("if (b) { }");
        assert!(stmt.field_node("else_clause").is_none());
    }

    #[test]
    fn inhale_statement_shape() {
        insta::assert_snapshot!(
            expr_sexp("inhale x > 0"),
            @r#"(inhale_stmt "inhale" (bin_expr lhs: (ident "x") operator: ">" rhs: (int_literal "0")))"#
        );
    }

    #[test]
    fn assertion_family_parses() {
        let parse = parse_ok("exhale p assert q assume r fold P(x) unfold P(x)");
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::ExhaleStmt,
                NodeKind::AssertStmt,
                NodeKind::AssumeStmt,
                NodeKind::FoldStmt,
                NodeKind::UnfoldStmt,
            ]
        );
    }

    #[test]
    fn field_assignment_target_is_allowed() {
        let stmt = first_item("x.f := x.f + 1");
        assert_eq!(stmt.kind, NodeKind::AssignStmt);
        assert_eq!(
            stmt.field_node("target").unwrap().kind,
            NodeKind::FieldAccessExpr
        );
    }

    #[test]
    fn call_is_a_valid_statement() {
        let parse = parse_ok("method m() { log(x) }");
        let method = parse.root.child_nodes().next().unwrap();
        let body = method.field_node("body").unwrap();
        assert_eq!(
            body.child_nodes().next().unwrap().kind,
            NodeKind::FunctionCall
        );
    }

    // ========================================================================
    // Expression precedence and shape
    // ========================================================================

    #[test]
    fn comparison_binds_with_arithmetic_tier() {
        insta::assert_snapshot!(
            expr_sexp("a + b == c"),
            @r#"(bin_expr lhs: (bin_expr lhs: (ident "a") operator: "+" rhs: (ident "b")) operator: "==" rhs: (ident "c"))"#
        );
    }

    #[test]
    fn implication_binds_loosest_of_binaries() {
        insta::assert_snapshot!(
            expr_sexp("a && b ==> c"),
            @r#"(bin_expr lhs: (bin_expr lhs: (ident "a") operator: "&&" rhs: (ident "b")) operator: "==>" rhs: (ident "c"))"#
        );
    }

    #[test]
    fn binary_operators_are_left_associative() {
        insta::assert_snapshot!(
            expr_sexp("a - b - c"),
            @r#"(bin_expr lhs: (bin_expr lhs: (ident "a") operator: "-" rhs: (ident "b")) operator: "-" rhs: (ident "c"))"#
        );
    }

    #[test]
    fn implication_chains_left() {
        insta::assert_snapshot!(
            expr_sexp("a ==> b ==> c"),
            @r#"(bin_expr lhs: (bin_expr lhs: (ident "a") operator: "==>" rhs: (ident "b")) operator: "==>" rhs: (ident "c"))"#
        );
    }

    #[test]
    fn word_set_operators_sit_in_the_binary_tier() {
        insta::assert_snapshot!(
            expr_sexp("a union b setminus c"),
            @r#"(bin_expr lhs: (bin_expr lhs: (ident "a") operator: "union" rhs: (ident "b")) operator: "setminus" rhs: (ident "c"))"#
        );
    }

    #[test]
    fn negation_binds_looser_than_comparison() {
        insta::assert_snapshot!(
            expr_sexp("!a == b"),
            @r#"(unary_expr "!" (bin_expr lhs: (ident "a") operator: "==" rhs: (ident "b")))"#
        );
    }

    #[test]
    fn negated_condition_feeds_the_ternary() {
        insta::assert_snapshot!(
            expr_sexp("!a ? b : c"),
            @r#"(ternary_expr condition: (unary_expr "!" (ident "a")) then_expr: (ident "b") else_expr: (ident "c"))"#
        );
    }

    #[test]
    fn ternary_chains_left() {
        let sexp = expr_sexp("a ? b : c ? d : e");
        assert!(sexp.starts_with("(ternary_expr condition: (ternary_expr"));
    }

    #[test]
    fn field_access_binds_tighter_than_binary() {
        insta::assert_snapshot!(
            expr_sexp("a.f + b"),
            @r#"(bin_expr lhs: (field_access_expr (ident "a") (ident "f")) operator: "+" rhs: (ident "b"))"#
        );
    }

    #[test]
    fn postfix_on_a_right_operand_stays_with_that_operand() {
        insta::assert_snapshot!(
            expr_sexp("a + b.c"),
            @r#"(bin_expr lhs: (ident "a") operator: "+" rhs: (field_access_expr (ident "b") (ident "c")))"#
        );
        insta::assert_snapshot!(
            expr_sexp("a + s[i]"),
            @r#"(bin_expr lhs: (ident "a") operator: "+" rhs: (index_expr (ident "s") (ident "i")))"#
        );
    }

    #[test]
    fn field_access_chains_left() {
        insta::assert_snapshot!(
            expr_sexp("a.b.c"),
            @r#"(field_access_expr (field_access_expr (ident "a") (ident "b")) (ident "c"))"#
        );
    }

    #[test]
    fn indexing_chains_and_nests() {
        insta::assert_snapshot!(
            expr_sexp("s[i][j]"),
            @r#"(index_expr (index_expr (ident "s") (ident "i")) (ident "j"))"#
        );
    }

    #[test]
    fn bare_identifier_is_not_a_call() {
        insta::assert_snapshot!(expr_sexp("f"), @r#"(ident "f")"#);
        insta::assert_snapshot!(expr_sexp("f()"), @r#"(function_call (ident "f"))"#);
        insta::assert_snapshot!(
            expr_sexp("f(x, 1)"),
            @r#"(function_call (ident "f") (ident "x") (int_literal "1"))"#
        );
    }

    #[test]
    fn parenthesized_expression_keeps_a_wrapper_node() {
        insta::assert_snapshot!(expr_sexp("(a)"), @r#"(paren_expr (ident "a"))"#);
    }

    #[test]
    fn boolean_literals() {
        insta::assert_snapshot!(expr_sexp("true"), @r#"(bool_literal "true")"#);
        insta::assert_snapshot!(expr_sexp("false"), @r#"(bool_literal "false")"#);
    }

    #[test]
    fn quantifier_with_triggers() {
        insta::assert_snapshot!(
            expr_sexp("forall x: Int :: { f(x) } f(x) > 0"),
            @r#"(quantified_expr "forall" (parameter (ident "x") (typ (ident "Int"))) (triggers (function_call (ident "f") (ident "x"))) (bin_expr lhs: (function_call (ident "f") (ident "x")) operator: ">" rhs: (int_literal "0")))"#
        );
    }

    #[test]
    fn quantifier_without_triggers_and_multiple_binders() {
        let expr = first_item("exists x: Int, y: Ref :: x < y");
        assert_eq!(expr.kind, NodeKind::QuantifiedExpr);
        let binders = expr
            .child_nodes()
            .filter(|n| n.kind == NodeKind::Parameter)
            .count();
        assert_eq!(binders, 2);
        assert!(!expr.child_nodes().any(|n| n.kind == NodeKind::Triggers));
    }

    #[test]
    fn labelled_old_expression() {
        insta::assert_snapshot!(
            expr_sexp("old[l](x + 1)"),
            @r#"(old_expr "old" label: (ident "l") expr: (bin_expr lhs: (ident "x") operator: "+" rhs: (int_literal "1")))"#
        );
    }

    #[test]
    fn plain_old_expression_has_no_label() {
        let expr = first_item("old(x.f)");
        assert!(expr.field_node("label").is_none());
    }

    #[test]
    fn let_binding_expression() {
        insta::assert_snapshot!(
            expr_sexp("let x == (1) in x + x"),
            @r#"(let_expr "let" (ident "x") "==" (int_literal "1") "in" (bin_expr lhs: (ident "x") operator: "+" rhs: (ident "x")))"#
        );
    }

    #[test]
    fn unfolding_expression() {
        insta::assert_snapshot!(
            expr_sexp("unfolding P(x) in x.f"),
            @r#"(unfolding "unfolding" (function_call (ident "P") (ident "x")) "in" (field_access_expr (ident "x") (ident "f")))"#
        );
    }

    // ========================================================================
    // Losslessness and round-trips
    // ========================================================================

    #[test]
    fn tree_text_reproduces_source_with_comments() {
        let source = "// header\nmethod m(x: Ref)\n  requires acc(x.f)\n{\n  /* body */\n  x.f := x.f + 1\n}\n";
        let parse = parse_ok(source);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn reparsing_tree_text_is_stable() {
        let source = "domain D { axiom { forall x: Int :: x == x } }";
        let first = parse_ok(source);
        let second = parse_ok(&first.root.text());
        assert_eq!(first.root.to_sexp(), second.root.to_sexp());
    }

    #[test]
    fn token_level_entrypoint_matches_source_entrypoint() {
        let source = "assert a ==> b";
        let lexed = crate::lexer::lex(source);
        let from_tokens = parse(&lexed.tokens);
        let from_source = parse_source(source);
        assert_eq!(from_tokens.root, from_source.root);
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    #[test]
    fn damaged_declaration_does_not_take_its_sibling_down() {
        let source = "method bad( {}\nmethod good() { }";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Error, NodeKind::Method]);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn damaged_item_does_not_take_a_statement_sibling_down() {
        let source = "?? inhale x";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Error, NodeKind::InhaleStmt]);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn damaged_statement_is_contained_in_its_block() {
        let source = "method m() {\n  inhale\n  assert true\n}";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let method = parse.root.child_nodes().next().unwrap();
        let body = method.field_node("body").unwrap();
        let kinds: Vec<_> = body.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Error, NodeKind::AssertStmt]);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn error_node_carries_the_diagnostic_message() {
        let parse = parse_source("method m() { inhale }");
        let method = parse.root.child_nodes().next().unwrap();
        let body = method.field_node("body").unwrap();
        let error = body
            .child_nodes()
            .find(|n| n.kind == NodeKind::Error)
            .unwrap();
        assert!(error.message.as_deref().unwrap().starts_with("Expected"));
    }

    #[test]
    fn missing_closing_brace_is_reported_not_fatal() {
        let source = "method m() { inhale true";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let method = parse.root.child_nodes().next().unwrap();
        assert_eq!(method.kind, NodeKind::Method);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn damaged_domain_member_is_contained() {
        let source = "domain D { function : axiom ok { true } }";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let domain = parse.root.child_nodes().next().unwrap();
        let kinds: Vec<_> = domain.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::Ident, NodeKind::Error, NodeKind::Axiom]);
        assert_eq!(parse.root.text(), source);
    }

    #[test]
    fn call_target_is_not_assignable() {
        let parse = parse_source("f() := x");
        assert_eq!(parse.errors.len(), 1);
        assert!(parse.errors[0].message.contains("assignment target"));
        assert_eq!(parse.root.text(), "f() := x");
    }

    #[test]
    fn bare_expression_is_not_a_statement_inside_a_block() {
        let parse = parse_source("method m() { x }");
        assert_eq!(parse.errors.len(), 1);
        let method = parse.root.child_nodes().next().unwrap();
        let body = method.field_node("body").unwrap();
        assert!(body.child_nodes().any(|n| n.kind == NodeKind::Error));
    }

    #[test]
    fn lexical_errors_do_not_abort_parsing() {
        let source = "inhale x @ y";
        let parse = parse_source(source);
        assert_eq!(parse.errors.len(), 1);
        let kinds: Vec<_> = parse.root.child_nodes().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NodeKind::InhaleStmt, NodeKind::Ident]);
        assert_eq!(parse.root.text(), source);
    }

    proptest! {
        #[test]
        fn parsing_is_lossless_for_arbitrary_input(source in any::<String>()) {
            let parse = parse_source(&source);
            prop_assert_eq!(parse.root.text(), source.clone());
        }
    }
}
