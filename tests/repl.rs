use pretty_assertions::assert_eq;
use monkey_lang::repl;

fn session(input: &str) -> String {
    let mut output = Vec::new();
    repl::start(input.as_bytes(), &mut output).expect("in-memory I/O cannot fail");
    String::from_utf8(output).expect("repl output is UTF-8")
}

#[test]
pub fn test_bindings_persist_between_lines() {
    assert_eq!(
        ">> null\n>> null\n>> 8\n>> \n",
        session("let a = 5;\nlet add = fn(x, y) { x + y };\nadd(a, 3)\n"),
    );
}

#[test]
pub fn test_parse_errors_are_indented() {
    assert_eq!(
        ">> \texpected next token to be =, got INT instead\n>> 1\n>> \n",
        session("let x 5;\n1\n"),
    );
}

#[test]
pub fn test_runtime_errors_are_printed() {
    assert_eq!(">> ERROR: identifier not found: foo\n>> \n", session("foo\n"));
}

#[test]
pub fn test_empty_input() {
    assert_eq!(">> \n", session(""));
}

#[test]
pub fn test_execute_reports_parse_failure() {
    let mut output = Vec::new();

    assert!(!repl::execute("let = 1;", &mut output).expect("in-memory I/O cannot fail"));
    assert_eq!(
        "\texpected next token to be IDENT, got = instead\n\tno prefix parse function for = found\n",
        String::from_utf8(output).expect("repl output is UTF-8"),
    );
}

#[test]
pub fn test_execute_prints_final_value() {
    let mut output = Vec::new();
    let source = "
        let map = fn(arr, f) {
            let iter = fn(arr, acc) {
                if (len(arr) == 0) { acc } else { iter(rest(arr), push(acc, f(first(arr)))) }
            };
            iter(arr, [])
        };
        map([1, 2, 3], fn(x) { x * 2 })
    ";

    assert!(repl::execute(source, &mut output).expect("in-memory I/O cannot fail"));
    assert_eq!("[2, 4, 6]\n", String::from_utf8(output).expect("repl output is UTF-8"));
}
