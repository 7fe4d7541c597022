pub mod parser;

pub use parser::Parser;

#[cfg(test)]
mod tests {
    use super::*;
    use brisk_lexer::Lexer;
    use brisk_syntax::ast::*;
    use brisk_syntax::error::Error;

    fn parse_expr_str(input: &str) -> Expr {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_expr().expect("Parsing should succeed")
    }

    fn parse_program_str(input: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(input));
        parser.parse_program().expect("Parsing should succeed")
    }

    fn parse_program_err(input: &str) -> Error {
        let mut parser = Parser::new(Lexer::new(input));
        parser
            .parse_program()
            .err()
            .expect("Parsing should fail")
    }

    #[test]
    fn test_literal_expressions() {
        assert!(matches!(parse_expr_str("42").kind, ExprKind::Int(42)));
        assert!(matches!(parse_expr_str("2.5").kind, ExprKind::Float(f) if f == 2.5));
        assert!(matches!(parse_expr_str("\"hello\"").kind, ExprKind::Str(s) if s == "hello"));
        assert!(matches!(parse_expr_str("true").kind, ExprKind::Bool(true)));
        assert!(matches!(parse_expr_str("false").kind, ExprKind::Bool(false)));
    }

    #[test]
    fn test_identifier_expressions() {
        assert!(matches!(parse_expr_str("variable").kind, ExprKind::Ident(s) if s == "variable"));
        assert!(matches!(parse_expr_str("my_var").kind, ExprKind::Ident(s) if s == "my_var"));
    }

    #[test]
    fn test_binary_operators() {
        for (src, op) in [
            ("1 + 2", BinOp::Add),
            ("5 - 3", BinOp::Sub),
            ("4 * 6", BinOp::Mul),
            ("8 / 2", BinOp::Div),
            ("8 % 3", BinOp::Mod),
            ("1 == 2", BinOp::Eq),
            ("1 != 2", BinOp::Ne),
            ("1 < 2", BinOp::Lt),
            ("1 <= 2", BinOp::Le),
            ("1 > 2", BinOp::Gt),
            ("1 >= 2", BinOp::Ge),
            ("true && false", BinOp::And),
            ("true || false", BinOp::Or),
        ] {
            match parse_expr_str(src).kind {
                ExprKind::Binary { op: got, .. } => assert_eq!(got, op, "source: {}", src),
                other => panic!("Expected Binary for {}, got {:?}", src, other),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        match parse_expr_str("1 + 2 * 3").kind {
            ExprKind::Binary { op, rhs, .. } => {
                assert_eq!(op, BinOp::Add);
                assert!(matches!(rhs.kind, ExprKind::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("Expected Add at the top, got {:?}", other),
        }
        // (1 + 2) * 3 parses as (1 + 2) * 3
        match parse_expr_str("(1 + 2) * 3").kind {
            ExprKind::Binary { op, lhs, .. } => {
                assert_eq!(op, BinOp::Mul);
                assert!(matches!(lhs.kind, ExprKind::Binary { op: BinOp::Add, .. }));
            }
            other => panic!("Expected Mul at the top, got {:?}", other),
        }
        // left associativity: 1 - 2 - 3 parses as (1 - 2) - 3
        match parse_expr_str("1 - 2 - 3").kind {
            ExprKind::Binary { op, lhs, .. } => {
                assert_eq!(op, BinOp::Sub);
                assert!(matches!(lhs.kind, ExprKind::Binary { op: BinOp::Sub, .. }));
            }
            other => panic!("Expected Sub at the top, got {:?}", other),
        }
    }

    #[test]
    fn test_list_expressions() {
        match parse_expr_str("[1, 2, 3]").kind {
            ExprKind::List(items) => assert_eq!(items.len(), 3),
            other => panic!("Expected List, got {:?}", other),
        }
        match parse_expr_str("[]").kind {
            ExprKind::List(items) => assert_eq!(items.len(), 0),
            other => panic!("Expected empty List, got {:?}", other),
        }
    }

    #[test]
    fn test_index_expressions() {
        assert!(matches!(parse_expr_str("arr[0]").kind, ExprKind::Index { .. }));
        // index chains compose with calls
        match parse_expr_str("f(1)[2]").kind {
            ExprKind::Index { target, .. } => {
                assert!(matches!(target.kind, ExprKind::Call { .. }));
            }
            other => panic!("Expected Index over Call, got {:?}", other),
        }
    }

    #[test]
    fn test_function_calls() {
        match parse_expr_str("foo()").kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "foo");
                assert_eq!(args.len(), 0);
            }
            other => panic!("Expected Call, got {:?}", other),
        }
        match parse_expr_str("add(1, 2)").kind {
            ExprKind::Call { name, args } => {
                assert_eq!(name, "add");
                assert_eq!(args.len(), 2);
            }
            other => panic!("Expected Call, got {:?}", other),
        }
    }

    #[test]
    fn test_call_target_must_be_identifier() {
        // a parenthesized group yields the inner expression, so (f) is
        // still an identifier callee
        assert!(matches!(
            parse_expr_str("(f)(1)").kind,
            ExprKind::Call { name, .. } if name == "f"
        ));
        let mut parser = Parser::new(Lexer::new("3(1)"));
        assert!(parser.parse_expr().is_err());
    }

    #[test]
    fn test_input_expression() {
        assert!(matches!(parse_expr_str("input()").kind, ExprKind::Input(None)));
        assert!(matches!(
            parse_expr_str("input(\"name? \")").kind,
            ExprKind::Input(Some(_))
        ));
        // bare input without parens is accepted too
        assert!(matches!(parse_expr_str("input").kind, ExprKind::Input(None)));
    }

    #[test]
    fn test_assignment_rewrite() {
        let program = parse_program_str("x = 42");
        assert!(matches!(
            &program.body[0].kind,
            StmtKind::Assign { name, .. } if name == "x"
        ));
    }

    #[test]
    fn test_assignment_to_non_variable_fails() {
        let err = parse_program_err("1 = 2");
        assert!(err.msg.contains("Cannot assign to non-variable"), "{}", err.msg);
    }

    #[test]
    fn test_statement_forms() {
        let src = "let x = 1\n\
                   print(x, 2)\n\
                   if (x) { x = 2 } else { x = 3 }\n\
                   while (x < 10) { x = x + 1 }\n\
                   switch (x) { case 1: break\n default: continue }\n\
                   return x\n";
        let program = parse_program_str(src);
        assert!(matches!(program.body[0].kind, StmtKind::Let { .. }));
        assert!(matches!(program.body[1].kind, StmtKind::Print(_)));
        assert!(matches!(program.body[2].kind, StmtKind::If { .. }));
        assert!(matches!(program.body[3].kind, StmtKind::While { .. }));
        assert!(matches!(program.body[4].kind, StmtKind::Switch { .. }));
        assert!(matches!(program.body[5].kind, StmtKind::Return(Some(_))));
    }

    #[test]
    fn test_else_if_chains() {
        let program = parse_program_str("if (1) { } else if (2) { } else { let z = 0 }");
        match &program.body[0].kind {
            StmtKind::If { else_body, .. } => {
                assert_eq!(else_body.len(), 1);
                assert!(matches!(else_body[0].kind, StmtKind::If { .. }));
            }
            other => panic!("Expected If, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_shape() {
        let src = "switch (x) {\n\
                   case 1: print(\"a\") break\n\
                   case 2: print(\"b\")\n\
                   default: print(\"c\")\n\
                   }";
        match &parse_program_str(src).body[0].kind {
            StmtKind::Switch { cases, default, .. } => {
                assert_eq!(cases.len(), 2);
                assert_eq!(cases[0].body.len(), 2); // print then break
                assert!(default.is_some());
            }
            other => panic!("Expected Switch, got {:?}", other),
        }
    }

    #[test]
    fn test_function_definitions() {
        let program = parse_program_str("func add(a, b) {\n return a + b\n}");
        match &program.body[0].kind {
            StmtKind::Func(f) => {
                assert_eq!(f.name, "add");
                assert_eq!(f.params, vec!["a".to_string(), "b".to_string()]);
                assert_eq!(f.body.len(), 1);
            }
            other => panic!("Expected Func, got {:?}", other),
        }
    }

    #[test]
    fn test_newlines_before_braces() {
        let _ = parse_program_str("if (1)\n{\n}\n");
        let _ = parse_program_str("while (0)\n{\n}\n");
        let _ = parse_program_str("func f()\n{\n}\n");
    }

    #[test]
    fn test_empty_and_comment_only_programs() {
        assert!(parse_program_str("").body.is_empty());
        assert!(parse_program_str("\n\n\n").body.is_empty());
        assert!(parse_program_str("# just a comment\n// another\n").body.is_empty());
    }

    #[test]
    fn test_syntax_errors_carry_lexeme_and_line() {
        let err = parse_program_err("let = 5");
        assert!(err.msg.contains("'='"), "{}", err.msg);
        assert!(err.msg.contains("line 1"), "{}", err.msg);

        let err = parse_program_err("print(1\n");
        assert!(err.msg.contains("Expected ')'"), "{}", err.msg);
    }

    #[test]
    fn test_invalid_characters_surface_as_syntax_errors() {
        let err = parse_program_err("let x = @");
        assert!(err.msg.contains("'@'"), "{}", err.msg);
    }

    #[test]
    fn test_line_numbers_on_statements() {
        let program = parse_program_str("let a = 1\nlet b = 2\n\nlet c = 3\n");
        let lines: Vec<usize> = program.body.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![1, 2, 4]);
        assert!(lines.iter().all(|&l| l >= 1));
    }
}
