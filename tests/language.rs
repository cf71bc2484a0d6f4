use let_lang::Interpreter;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn assert_output(src: &str, expected: &str) {
    let output = Interpreter::new().interpret(src);
    assert_eq!(output, expected, "script:\n{}", src);
}

fn assert_error(src: &str, message: &str) {
    assert_output(src, &format!("Error: {}\n", message));
}

#[test]
fn number_formatting() {
    assert_output("print(3)", "3\n");
    assert_output("print(3.0)", "3\n");
    assert_output("print(3.14)", "3.14\n");
    assert_output("print(10 / 4)", "2.5\n");
    assert_output("print(1 / 3)", "0.333333\n");
}

#[test]
fn binding_round_trip() {
    assert_output("let x = 5; print(x)", "5\n");
    assert_output("let x = 10\nlet y = 20\nprint(x+y)", "30\n");
}

#[test]
fn playground_snippets() {
    assert_output("let x = 5;\nprint(x + 2);", "7\n");
    assert_output(
        "let counter = 0;\ncounter = counter + 1;\nprint(counter);  \n",
        "1\n",
    );
}

#[test]
fn string_concatenation() {
    assert_output("print(\"a\"+1)", "a1\n");
    assert_output("let name = \"world\"\nprint(\"hello, \" + name)", "hello, world\n");
    assert_output("print(\"\" + 0.5 + 0.25)", "0.50.25\n");
    assert_output("print(1 + 2 + \"x\")", "3x\n");
}

#[test]
fn scoping() {
    assert_output("let x = 1\n{ let x = 2 }\nprint(x)", "1\n");
    assert_output(
        "let x = \"outer\"\n{\n  print(x)\n  let x = \"inner\"\n  print(x)\n  {\n    x = \"changed\"\n  }\n  print(x)\n}\nprint(x)\n",
        "outer\ninner\nchanged\nouter\n",
    );
}

#[test]
fn undefined_variables() {
    assert_error("x = 1", "Undefined variable 'x'");
    assert_error("print(z)", "Undefined variable 'z'");
    assert_error("let a = b + 1", "Undefined variable 'b'");
}

#[test]
fn division_by_zero_renders_infinity() {
    assert_output("print(1/0)", "inf\n");
}

#[test]
fn equality_is_not_an_operator() {
    // `==` lexes as a plain assignment
    assert_output("let a = 1\na == 5\nprint(a)", "5\n");
}

#[test]
fn errors_stop_the_submission() {
    assert_output(
        "print(\"before\")\nprint(nil + 1)\nprint(\"after\")",
        "before\nError: Invalid binary operation\n",
    );
    assert_error("let 5 = 4", "Expected variable name");
    assert_error("{ print(1)", "Expected '}' after block");
    assert_error("print(1 + )", "Expected expression");
    assert_error("1 = 2", "Invalid assignment target");
    assert_error("let s = \"never closed", "Unterminated string");
    assert_error("print(2 % 3)", "Unexpected character: %");
}

#[test]
fn persistence_and_reset() {
    let mut interpreter = Interpreter::new();
    assert_eq!(interpreter.interpret("let a = 7"), "");
    assert_eq!(interpreter.interpret("print(a)"), "7\n");
    assert_eq!(interpreter.interpret("a = a + 1\nprint(a)"), "8\n");
    interpreter.reset();
    assert_eq!(interpreter.interpret("print(a)"), "Error: Undefined variable 'a'\n");
    assert_eq!(interpreter.interpret("let a = 1\nprint(a)"), "1\n");
}

#[test]
fn failures_keep_earlier_bindings() {
    let mut interpreter = Interpreter::new();
    assert_eq!(
        interpreter.interpret("let kept = 1\nprint(gone)\nlet never = 2"),
        "Error: Undefined variable 'gone'\n"
    );
    assert_eq!(interpreter.interpret("print(kept)"), "1\n");
    assert_eq!(
        interpreter.interpret("print(never)"),
        "Error: Undefined variable 'never'\n"
    );
}

/// Builds `a op b op c ...` from small integers and the four operators.
fn arithmetic_source() -> impl Strategy<Value = String> {
    let operand = (0u32..100).prop_map(|n| n.to_string());
    let op = prop::sample::select(vec!["+", "-", "*", "/"]);
    (operand.clone(), prop::collection::vec((op, operand), 0..8)).prop_map(|(first, rest)| {
        rest.into_iter().fold(first, |acc, (op, operand)| {
            format!("{} {} {}", acc, op, operand)
        })
    })
}

proptest! {
    #[test]
    fn pure_expressions_are_idempotent(expr in arithmetic_source()) {
        let mut interpreter = Interpreter::new();
        interpreter.interpret("let v = 3");
        let source = format!("print(({}) * v)", expr);

        let first = interpreter.interpret(&source);
        let second = interpreter.interpret(&source);
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.starts_with("Error"));
    }
}
