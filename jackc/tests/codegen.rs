use jackc::{compile, Error, Labels};
use std::collections::HashSet;
use vm::{Code, Inst};

fn assert(code: &str, expects: &[&str]) {
    let compiled = match compile(code, &mut Labels::new()) {
        Ok(compiled) => compiled,
        Err(e) => panic!("{}: {}", code, e),
    };
    println!("{}", compiled);
    let expects = Code::parse(&expects.join("\n")).unwrap();
    assert_eq!(compiled, expects);
}

/// Code of `main` in a class with one local `x` of each common shape.
fn body(stmts: &str) -> String {
    format!(
        "class Main {{
            static int s;
            function void main() {{
                var int x, i;
                var Array a;
                var Point p;
                {}
            }}
        }}",
        stmts
    )
}

macro_rules! case {
    ($name:ident, $code:expr, [$($expect:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            assert(&$code, &[$($expect),*]);
        }
    };
}

// ---- Expressions ----

case!(
    no_operator_precedence,
    "class Main { function int f() { return 2 + 3 * 4; } }",
    [
        "function Main.f 0",
        "push constant 2",
        "push constant 3",
        "add",
        "push constant 4",
        "call Math.multiply 2",
        "return",
    ]
);

case!(
    parenthesized_expression,
    body("let x = 2 + (3 * 4) / x; return;"),
    [
        "function Main.main 4",
        "push constant 2",
        "push constant 3",
        "push constant 4",
        "call Math.multiply 2",
        "add",
        "push local 0",
        "call Math.divide 2",
        "pop local 0",
        "push constant 0",
        "return",
    ]
);

case!(
    comparison_and_logic,
    body("let x = (x < 1) | (x > 2) & (x = 3) - 1; return;"),
    [
        "function Main.main 4",
        "push local 0",
        "push constant 1",
        "lt",
        "push local 0",
        "push constant 2",
        "gt",
        "or",
        "push local 0",
        "push constant 3",
        "eq",
        "and",
        "push constant 1",
        "sub",
        "pop local 0",
        "push constant 0",
        "return",
    ]
);

case!(
    unary_operators,
    body("let x = -x; let x = ~(x = 0); return;"),
    [
        "function Main.main 4",
        "push local 0",
        "neg",
        "pop local 0",
        "push local 0",
        "push constant 0",
        "eq",
        "not",
        "pop local 0",
        "push constant 0",
        "return",
    ]
);

case!(
    keyword_constants,
    body("let x = true; let x = false; let p = null; return;"),
    [
        "function Main.main 4",
        "push constant 1",
        "neg",
        "pop local 0",
        "push constant 0",
        "pop local 0",
        "push constant 0",
        "pop local 3",
        "push constant 0",
        "return",
    ]
);

case!(
    empty_string,
    body("let a = \"\"; return;"),
    [
        "function Main.main 4",
        "push constant 0",
        "call String.new 1",
        "pop local 2",
        "push constant 0",
        "return",
    ]
);

case!(
    string_literal,
    body("let a = \"Hi!\"; return;"),
    [
        "function Main.main 4",
        "push constant 3",
        "call String.new 1",
        "push constant 72",
        "call String.appendChar 2",
        "push constant 105",
        "call String.appendChar 2",
        "push constant 33",
        "call String.appendChar 2",
        "pop local 2",
        "push constant 0",
        "return",
    ]
);

case!(
    array_read,
    body("let x = a[i + 1]; return;"),
    [
        "function Main.main 4",
        "push local 2",
        "push local 1",
        "push constant 1",
        "add",
        "add",
        "pop pointer 1",
        "push that 0",
        "pop local 0",
        "push constant 0",
        "return",
    ]
);

// ---- Statements ----

case!(
    array_write_parks_value_in_temp,
    body("let a[i] = a[x]; return;"),
    [
        "function Main.main 4",
        "push local 2",
        "push local 1",
        "add",
        "push local 2",
        "push local 0",
        "add",
        "pop pointer 1",
        "push that 0",
        "pop temp 0",
        "pop pointer 1",
        "push temp 0",
        "pop that 0",
        "push constant 0",
        "return",
    ]
);

case!(
    static_variable,
    body("let s = s + 1; return;"),
    [
        "function Main.main 4",
        "push static 0",
        "push constant 1",
        "add",
        "pop static 0",
        "push constant 0",
        "return",
    ]
);

case!(
    if_else,
    body("if (x) { let x = 1; } else { let x = 2; } return;"),
    [
        "function Main.main 4",
        "push local 0",
        "not",
        "if-goto IF_FALSE_0",
        "push constant 1",
        "pop local 0",
        "goto IF_END_0",
        "label IF_FALSE_0",
        "push constant 2",
        "pop local 0",
        "label IF_END_0",
        "push constant 0",
        "return",
    ]
);

case!(
    if_without_else,
    body("if (x) { return; } return;"),
    [
        "function Main.main 4",
        "push local 0",
        "not",
        "if-goto IF_FALSE_0",
        "push constant 0",
        "return",
        "goto IF_END_0",
        "label IF_FALSE_0",
        "label IF_END_0",
        "push constant 0",
        "return",
    ]
);

case!(
    while_loop,
    body("while (x < 3) { let x = x + 1; } return;"),
    [
        "function Main.main 4",
        "label WHILE_EXP_0",
        "push local 0",
        "push constant 3",
        "lt",
        "not",
        "if-goto WHILE_END_0",
        "push local 0",
        "push constant 1",
        "add",
        "pop local 0",
        "goto WHILE_EXP_0",
        "label WHILE_END_0",
        "push constant 0",
        "return",
    ]
);

case!(
    nested_labels_are_allocated_outside_in,
    body("while (x) { if (i) { let x = 0; } } return;"),
    [
        "function Main.main 4",
        "label WHILE_EXP_0",
        "push local 0",
        "not",
        "if-goto WHILE_END_0",
        "push local 1",
        "not",
        "if-goto IF_FALSE_1",
        "push constant 0",
        "pop local 0",
        "goto IF_END_1",
        "label IF_FALSE_1",
        "label IF_END_1",
        "goto WHILE_EXP_0",
        "label WHILE_END_0",
        "push constant 0",
        "return",
    ]
);

case!(
    void_return_pushes_zero,
    "class Main { function void f() { return; } }",
    ["function Main.f 0", "push constant 0", "return"]
);

case!(
    void_return_keeps_value_then_pushes_zero,
    "class Main { function void f() { return 5; } }",
    [
        "function Main.f 0",
        "push constant 5",
        "push constant 0",
        "return",
    ]
);

case!(
    non_void_return,
    "class Main { function int f(int a, int b) { return b; } }",
    ["function Main.f 0", "push argument 1", "return"]
);

// ---- Calls ----

case!(
    function_call_on_class,
    body("do Output.printInt(x, 2); return;"),
    [
        "function Main.main 4",
        "push local 0",
        "push constant 2",
        "call Output.printInt 2",
        "pop temp 0",
        "push constant 0",
        "return",
    ]
);

case!(
    method_call_on_variable,
    body("do p.move(1); let x = p.getX(); return;"),
    [
        "function Main.main 4",
        "push local 3",
        "push constant 1",
        "call Point.move 2",
        "pop temp 0",
        "push local 3",
        "call Point.getX 1",
        "pop local 0",
        "push constant 0",
        "return",
    ]
);

case!(
    bare_call_passes_receiver,
    "class Box {
        method void foo() { return; }
        method void bar() { do foo(); return; }
    }",
    [
        "function Box.foo 0",
        "push argument 0",
        "pop pointer 0",
        "push constant 0",
        "return",
        "function Box.bar 0",
        "push argument 0",
        "pop pointer 0",
        "push pointer 0",
        "call Box.foo 1",
        "pop temp 0",
        "push constant 0",
        "return",
    ]
);

// ---- Object model ----

case!(
    constructor_allocates_fields,
    "class Point {
        field int x, y;
        static int count;
        field Point next;
        constructor Point new(int ax) {
            let x = ax;
            let next = null;
            return this;
        }
    }",
    [
        "function Point.new 0",
        "push constant 3",
        "call Memory.alloc 1",
        "pop pointer 0",
        "push argument 0",
        "pop this 0",
        "push constant 0",
        "pop this 2",
        "push pointer 0",
        "return",
    ]
);

case!(
    method_arguments_shift_by_receiver,
    "class Point {
        field int x;
        method int add(int dx) { var int sum; let sum = x + dx; return sum; }
    }",
    [
        "function Point.add 1",
        "push argument 0",
        "pop pointer 0",
        "push this 0",
        "push argument 1",
        "add",
        "pop local 0",
        "push local 0",
        "return",
    ]
);

case!(
    local_shadows_field,
    "class C {
        field int x;
        method int get() { var int x; let x = 1; return x; }
    }",
    [
        "function C.get 1",
        "push argument 0",
        "pop pointer 0",
        "push constant 1",
        "pop local 0",
        "push local 0",
        "return",
    ]
);

case!(
    argument_shadows_static,
    "class C {
        static int n;
        function int get(int n) { return n; }
        function int other() { return n; }
    }",
    [
        "function C.get 0",
        "push argument 0",
        "return",
        "function C.other 0",
        "push static 0",
        "return",
    ]
);

// ---- Whole program properties ----

fn labels(code: &Code) -> Vec<String> {
    code.iter()
        .filter_map(|inst| match inst {
            Inst::Label(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn labels_are_unique() {
    let code = compile(
        &body(
            "if (x) { while (i) { if (x) { let x = 0; } else { let i = 1; } } }
             while (x) { while (i) { let i = 0; } }
             if (i) { let i = 2; }
             return;",
        ),
        &mut Labels::new(),
    )
    .unwrap();
    let labels = labels(&code);
    assert_eq!(labels.len(), 12);
    assert_eq!(labels.iter().collect::<HashSet<_>>().len(), labels.len());
}

#[test]
fn labels_continue_across_classes() {
    let mut counter = Labels::new();
    let first = compile(&body("if (x) { } return;"), &mut counter).unwrap();
    let second = compile(&body("if (x) { } return;"), &mut counter).unwrap();
    assert_eq!(labels(&first), vec!["IF_FALSE_0", "IF_END_0"]);
    assert_eq!(labels(&second), vec!["IF_FALSE_1", "IF_END_1"]);
}

#[test]
fn undefined_variable() {
    let result = compile(&body("let y = 1; return;"), &mut Labels::new());
    assert!(matches!(result, Err(Error::UndefinedVariable(name)) if name == "y"));

    let result = compile(&body("let x = Foo; return;"), &mut Labels::new());
    assert!(matches!(result, Err(Error::UndefinedVariable(name)) if name == "Foo"));
}

#[test]
fn string_outside_constant_range() {
    let result = compile(&body("let a = \"\u{1F600}\"; return;"), &mut Labels::new());
    assert!(matches!(result, Err(Error::InvalidCharacter(_, '\u{1F600}'))));
}

#[test]
fn syntax_error_discards_output() {
    let result = compile(
        "class Main { function void ok() { return; } function void bad() { let = 1; } }",
        &mut Labels::new(),
    );
    assert!(matches!(result, Err(Error::UnexpectedToken(_))));
}

#[test]
fn output_text() {
    let code = compile(
        "class Main { function void main() { do Sys.halt(); return; } }",
        &mut Labels::new(),
    )
    .unwrap();
    assert_eq!(
        code.to_string(),
        "function Main.main 0\ncall Sys.halt 0\npop temp 0\npush constant 0\nreturn\n"
    );
}
