use pretty_assertions::assert_eq;
use crate::interpreter::parser::parse;
use super::*;

fn run_in(source: &str, env: &Env) -> Value {
    let output = parse(source);
    assert!(output.errors.is_empty(), "unexpected parse errors: {:?}", output.error_messages());
    eval(&output.program, env)
}

fn run(source: &str) -> Value {
    run_in(source, &Environment::new_global())
}

fn error(message: &str) -> Value {
    Value::Error(message.to_owned())
}

fn string(value: &str) -> Value {
    Value::String(value.into())
}

mod arithmetic {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    pub fn test_integer_expressions() {
        let cases = [
            ("5", 5),
            ("-10", -10),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * (5 + 10)", 30),
            ("50 / 2 * 2 + 10", 60),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("7 % 3", 1),
            ("0x10 + 1", 17),
        ];

        for (source, expected) in cases {
            assert_eq!(Value::Integer(expected), run(source), "source: {}", source);
        }
    }

    #[test]
    pub fn test_division_truncates() {
        let pairs: [(i64, i64); 7] = [(7, 2), (-7, 2), (7, -2), (-7, -2), (10, 3), (0, 5), (9, 9)];

        for (a, b) in pairs {
            assert_eq!(Value::Integer(a / b), run(&format!("{} / {}", a, b)), "{} / {}", a, b);
            assert_eq!(Value::Integer(a % b), run(&format!("{} % {}", a, b)), "{} % {}", a, b);
        }
    }

    #[test]
    pub fn test_division_by_zero() {
        assert_eq!(error("division by zero"), run("1 / 0"));
        assert_eq!(error("division by zero"), run("1 % 0"));
    }

    #[test]
    pub fn test_boolean_expressions() {
        let cases = [
            ("true", true),
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("true == true", true),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 > 2) == true", false),
            ("\"a\" == \"a\"", true),
            ("\"a\" != \"a\"", false),
        ];

        for (source, expected) in cases {
            assert_eq!(Value::Boolean(expected), run(source), "source: {}", source);
        }
    }

    #[test]
    pub fn test_bang_operator() {
        let cases = [
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!!5", true),
            ("!if (false) { 1 }", true),
        ];

        for (source, expected) in cases {
            assert_eq!(Value::Boolean(expected), run(source), "source: {}", source);
        }
    }

    #[test]
    pub fn test_logical_and() {
        assert_eq!(Value::Boolean(false), run("true && false"));
        assert_eq!(Value::Boolean(true), run("1 < 2 && 2 < 3"));
        assert_eq!(Value::Boolean(false), run("false && undefined"));
        assert_eq!(error("identifier not found: undefined"), run("true && undefined"));
    }

    #[test]
    pub fn test_string_concatenation() {
        assert_eq!(string("Hello World!"), run("\"Hello\" + \" \" + \"World!\""));
    }
}

mod control_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    pub fn test_if_else() {
        assert_eq!(Value::Integer(10), run("if (true) { 10 }"));
        assert_eq!(Value::Null, run("if (false) { 10 }"));
        assert_eq!(Value::Integer(10), run("if (1) { 10 }"));
        assert_eq!(Value::Integer(20), run("if (1 > 2) { 10 } else { 20 }"));
        assert_eq!(Value::Null, run("if (true) { }"));
    }

    #[test]
    pub fn test_return_stops_evaluation() {
        assert_eq!(Value::Integer(10), run("9; return 2 * 5; 9;"));
        assert_eq!(Value::Integer(10), run("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"));
    }

    #[test]
    pub fn test_for_loop() {
        assert_eq!(Value::Null, run("for (let i = 0; i < 3; i++) { i }"));
        assert_eq!(Value::Integer(5), run("let n = 0; for (let i = 0; i < 5; i++) { n++; } n"));
        assert_eq!(Value::Integer(0), run("let n = 0; for (let i = 0; i < 0; ++i) { n++; } n"));
    }

    #[test]
    pub fn test_for_loop_scope_does_not_leak() {
        assert_eq!(error("identifier not found: i"), run("for (let i = 0; i < 1; i++) { 1 } i"));
    }

    #[test]
    pub fn test_return_from_inside_loop() {
        let source = "
            let find = fn() {
                for (let i = 0; i < 10; i++) {
                    if (i == 3) { return i; }
                }
                return -1;
            };
            find()
        ";

        assert_eq!(Value::Integer(3), run(source));
    }

    #[test]
    pub fn test_increment() {
        assert_eq!(Value::Integer(2), run("let x = 1; x++; x"));
        assert_eq!(Value::Integer(2), run("let x = 1; ++x"));
        assert_eq!(error("identifier not found: x"), run("x++"));
        assert_eq!(error("`++` requires an INTEGER, got STRING"), run("let s = \"a\"; s++"));
    }

    #[test]
    pub fn test_guard_switch_picks_first_match() {
        let source = "
            let i = 9;
            switch {
            case i % 3 == 0:
                \"fizz\";
                break;
            case i % 9 == 0:
                \"nine\";
                break;
            }
        ";

        assert_eq!(string("fizz"), run(source));
    }

    #[test]
    pub fn test_switch_with_subject() {
        let source = "let x = 2; switch x { case 1: \"one\"; break; case 2: \"two\"; break; }";
        assert_eq!(string("two"), run(source));

        assert_eq!(Value::Null, run("switch 3 { case 1: 1; break; }"));
        assert_eq!(Value::Null, run("switch 1 { case \"1\": 1; break; }"));
    }

    #[test]
    pub fn test_return_inside_switch() {
        let source = "
            let name = fn(x) {
                switch x {
                case 1:
                    return \"one\";
                    break;
                }
                \"other\"
            };
            [name(1), name(2)]
        ";

        assert_eq!("[one, other]", run(source).inspect());
    }

    #[test]
    pub fn test_block_statement() {
        let program = Program {
            statements: vec![Statement::Block(BlockStatement {
                statements: vec![
                    Statement::Let { name: String::from("a"), value: Expression::Integer(4) },
                    Statement::Expression(Expression::Identifier(String::from("a"))),
                ],
            })],
        };

        assert_eq!(Value::Integer(4), eval(&program, &Environment::new_global()));
    }
}

mod bindings {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    pub fn test_let_statements() {
        assert_eq!(Value::Integer(5), run("let a = 5; a;"));
        assert_eq!(Value::Integer(25), run("let a = 5 * 5; a;"));
        assert_eq!(Value::Integer(15), run("let a = 5; let b = a; let c = a + b + 5; c;"));
        assert_eq!(Value::Null, run("let a = 1;"));
    }

    #[test]
    pub fn test_environment_survives_between_evaluations() {
        let env = Environment::new_global();

        run_in("let a = 1;", &env);
        assert_eq!(Value::Integer(2), run_in("a + 1", &env));
    }

    #[test]
    pub fn test_function_application() {
        assert_eq!(Value::Integer(6), run("fn(x) { x + 1; }(5)"));
        assert_eq!(Value::Integer(5), run("let identity = fn(x) { x; }; identity(5);"));
        assert_eq!(Value::Integer(10), run("let double = fn(x) { return x * 2; }; double(5);"));
        assert_eq!(Value::Integer(20), run("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));"));
    }

    #[test]
    pub fn test_closures() {
        let source = "
            let newAdder = fn(x) { fn(y) { x + y }; };
            let addTwo = newAdder(2);
            addTwo(2);
        ";

        assert_eq!(Value::Integer(4), run(source));
    }

    #[test]
    pub fn test_closure_sees_later_rebinding() {
        assert_eq!(Value::Integer(5), run("let count = 0; let get = fn() { count; }; let count = 5; get();"));
    }

    #[test]
    pub fn test_closure_counter() {
        let source = "
            let counter = fn() { let n = 0; fn() { n++; n } };
            let next = counter();
            next(); next(); next();
        ";

        assert_eq!(Value::Integer(3), run(source));
    }

    #[test]
    pub fn test_recursion() {
        let source = "
            let fib = fn(n) { if (n < 2) { return n; } fib(n - 1) + fib(n - 2) };
            fib(15);
        ";

        assert_eq!(Value::Integer(610), run(source));
    }

    #[test]
    pub fn test_wrong_argument_count() {
        assert_eq!(error("wrong number of arguments. got=0, want=1"), run("fn(x) { x }()"));
        assert_eq!(error("wrong number of arguments. got=2, want=1"), run("fn(x) { x }(1, 2)"));
    }

    #[test]
    pub fn test_function_inspect() {
        assert_eq!("fn(...) {...}", run("fn(x) { x }").inspect());
    }
}

mod collections {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    pub fn test_arrays() {
        assert_eq!("[1, 4, 6]", run("[1, 2 * 2, 3 + 3]").inspect());
        assert_eq!(Value::Integer(1), run("[1, 2, 3][0]"));
        assert_eq!(Value::Integer(3), run("let i = 0; [1, 2, 3][i + 2]"));
        assert_eq!(Value::Null, run("[1, 2, 3][3]"));
        assert_eq!(Value::Null, run("[1, 2, 3][-1]"));
        assert_eq!(Value::Null, run("[1, 2][5]"));
    }

    #[test]
    pub fn test_builtins() {
        assert_eq!(Value::Integer(0), run("len(\"\")"));
        assert_eq!(Value::Integer(4), run("len(\"four\")"));
        assert_eq!(Value::Integer(3), run("len([1, 2, 3])"));
        assert_eq!(error("argument to `len` not supported, got INTEGER"), run("len(1)"));
        assert_eq!(error("wrong number of arguments. got=2, want=1"), run("len(\"one\", \"two\")"));
        assert_eq!(Value::Null, run("first([])"));
        assert_eq!(Value::Null, run("last([])"));
        assert_eq!(Value::Null, run("rest([])"));
        assert_eq!("[2, 3]", run("rest([1, 2, 3])").inspect());
        assert_eq!(Value::Integer(2), run("puts(1, \"two\")"));
    }

    #[test]
    pub fn test_push_does_not_alias() {
        assert_eq!("[[1, 2], [1, 2, 3]]", run("let a = [1, 2]; let b = push(a, 3); [a, b]").inspect());
    }

    #[test]
    pub fn test_builtins_can_be_shadowed() {
        assert_eq!(Value::Integer(7), run("let len = fn(x) { 7 }; len([])"));
    }

    #[test]
    pub fn test_hash_literal() {
        let source = r#"
            let two = "two";
            {"one": 10 - 9, two: 1 + 1, "thr" + "ee": 6 / 2, 4: 4, true: 5, false: 6}
        "#;

        assert_eq!("{4: 4, false: 6, true: 5, one: 1, three: 3, two: 2}", run(source).inspect());
    }

    #[test]
    pub fn test_hash_index() {
        assert_eq!(Value::Integer(5), run("{\"foo\": 5}[\"foo\"]"));
        assert_eq!(Value::Null, run("{\"foo\": 5}[\"bar\"]"));
        assert_eq!(Value::Integer(5), run("let key = \"foo\"; {\"foo\": 5}[key]"));
        assert_eq!(Value::Null, run("{}[\"foo\"]"));
        assert_eq!(Value::Integer(5), run("{5: 5}[5]"));
        assert_eq!(Value::Integer(5), run("{true: 5}[true]"));
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    pub fn test_error_messages() {
        let cases = [
            ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
            ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
            ("-true", "unknown operator: -BOOLEAN"),
            ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
            ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
            ("if (10 > 1) { true + false; }", "unknown operator: BOOLEAN + BOOLEAN"),
            ("if (10 > 1) { if (10 > 1) { return true + false; } return 1; }", "unknown operator: BOOLEAN + BOOLEAN"),
            ("foobar", "identifier not found: foobar"),
            ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
            ("{\"name\": \"Monkey\"}[fn(x) { x }];", "unusable as hash key: FUNCTION"),
            ("{[1]: 2}", "unusable as hash key: ARRAY"),
            ("5(1)", "not a function: INTEGER"),
            ("1[0]", "index operator not supported: INTEGER"),
        ];

        for (source, expected) in cases {
            assert_eq!(error(expected), run(source), "source: {}", source);
        }
    }

    #[test]
    pub fn test_error_short_circuits_enclosing_expression() {
        assert_eq!(error("argument to `len` not supported, got INTEGER"), run("len(5) + 1"));
        assert_eq!(error("identifier not found: nope"), run("[1, nope, undefined_too]"));
        assert_eq!(error("identifier not found: nope"), run("fn(a, b) { a }(nope, 1 + true)"));
    }

    #[test]
    pub fn test_error_inspect() {
        let value = run("x");

        assert!(value.is_error());
        assert_eq!("ERROR: identifier not found: x", value.inspect());
    }
}
