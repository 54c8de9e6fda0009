use std::{any::Any, fs};

use propscript::{
    ast::{Ast, Node, NodeKind, OpKind},
    compile_source,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::{
                core::{LibraryFn, invalid_params},
                print::format_values,
            },
        },
        lexer::{Token, lex},
        value::core::Value,
    },
    run_source,
    serialize::{load_ast, save_ast},
};
use walkdir::WalkDir;

fn assert_success(src: &str) {
    if let Err(e) = run_source(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_source(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// A `print` override that collects each rendered line into the context's
/// user data instead of writing to stdout.
fn capture_print(args: &[Value], node: &Node, user_data: Option<&mut dyn Any>) -> EvalResult<Value> {
    let rendered = format_values(args, node)?;

    let lines = user_data.and_then(|data| data.downcast_mut::<Vec<String>>())
                         .ok_or_else(|| invalid_params(node))?;
    lines.push(rendered);

    Ok(Value::Void)
}

fn run_captured_ast(ast: &Ast) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut context = Context::new();
    context.set_functions(&[("print", capture_print as LibraryFn)]);
    context.set_user_data(Box::new(Vec::<String>::new()));

    context.execute(ast)?;

    Ok(context.user_data_mut()
              .and_then(|data| data.downcast_mut::<Vec<String>>())
              .map(std::mem::take)
              .unwrap_or_default())
}

fn run_captured(src: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    run_captured_ast(&compile_source(src)?)
}

fn assert_prints(src: &str, expected: &[&str]) {
    match run_captured(src) {
        Ok(lines) => assert_eq!(lines, expected, "wrong output for:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

//--------------------------------------------------------------------//
// lexing

#[test]
fn newlines_are_coalesced_and_terminate_the_stream() {
    let tokens = lex("x = 1\n\n\n\ny = 2").unwrap();

    let newlines = tokens.iter()
                         .filter(|(token, _)| matches!(token, Token::NewLine))
                         .count();
    assert_eq!(newlines, 2);
    assert!(matches!(tokens.last(), Some((Token::NewLine, _))));
    assert!(!matches!(tokens.first(), Some((Token::NewLine, _))));
}

#[test]
fn leading_newlines_are_dropped() {
    let tokens = lex("\n\nx = 1").unwrap();
    assert_eq!(tokens[0].0, Token::Identifier("x".to_string()));
}

#[test]
fn operators_use_longest_match() {
    let tokens = lex("a <= b == c = d < e").unwrap();
    let ops: Vec<&Token> = tokens.iter()
                                 .map(|(token, _)| token)
                                 .filter(|token| {
                                     matches!(token,
                                              Token::LessEqual
                                              | Token::EqualEqual
                                              | Token::Equals
                                              | Token::Less)
                                 })
                                 .collect();

    assert_eq!(ops,
               vec![&Token::LessEqual, &Token::EqualEqual, &Token::Equals, &Token::Less]);
}

#[test]
fn comments_run_to_end_of_line() {
    let tokens = lex("x = 1 # x = vec2(3, 4)\ny = 2").unwrap();
    assert!(!tokens.iter().any(|(token, _)| matches!(token, Token::LParen)));
    assert_eq!(tokens.iter()
                     .filter(|(token, _)| matches!(token, Token::Identifier(_)))
                     .count(),
               2);
}

#[test]
fn line_numbers_are_one_based_and_advance() {
    let tokens = lex("a = 1\nb = 2\n\nc = 3").unwrap();
    let line_of = |name: &str| {
        tokens.iter()
              .find(|(token, _)| matches!(token, Token::Identifier(n) if n == name))
              .map(|(_, line)| *line)
              .unwrap()
    };

    assert_eq!(line_of("a"), 1);
    assert_eq!(line_of("b"), 2);
    assert_eq!(line_of("c"), 4);
}

#[test]
fn unknown_characters_are_invalid_tokens() {
    assert!(lex("x = $1").is_err());
    assert!(lex("x = 1 @ 2").is_err());
}

#[test]
fn oversized_int_literals_are_rejected() {
    assert!(lex("x = 99999999999").is_err());
}

//--------------------------------------------------------------------//
// parsing

fn root_node(ast: &Ast) -> &Node {
    ast.node(ast.parents[0])
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    // a + b * c - d must parse as (a + (b * c)) - d
    let ast = compile_source("a + b * c - d").unwrap();

    let NodeKind::Op { op: OpKind::Sub, left, .. } = &root_node(&ast).kind else {
        panic!("root is not a subtraction");
    };
    let NodeKind::Op { op: OpKind::Add, right, .. } = &ast.node(*left).kind else {
        panic!("left of '-' is not an addition");
    };
    let NodeKind::Op { op: OpKind::Mul, .. } = &ast.node(*right).kind else {
        panic!("right of '+' is not a multiplication");
    };
}

#[test]
fn parentheses_freeze_grouping() {
    let ast = compile_source("(a + b) * c").unwrap();

    let NodeKind::Op { op: OpKind::Mul, left, .. } = &root_node(&ast).kind else {
        panic!("root is not a multiplication");
    };
    let NodeKind::Op { op: OpKind::Add,
                       in_parens: true,
                       .. } = &ast.node(*left).kind
    else {
        panic!("left of '*' is not a parenthesized addition");
    };
}

#[test]
fn every_referenced_handle_is_in_the_pool() {
    let source = r"
func wave(origin, t)
{
    ret sin(origin[0] + t) * vec3(1, 0.5, 0.25)
}

points = vec3()
for i in range(0, 7) {
    if i % 2 == 0 {
        points = points + wave(vec3(i, 0, 0), 0.1)
    } else {
        points = points - wave(vec3(0, i, 0), 0.2)
    }
}
print(points)
";
    let ast = compile_source(source).unwrap();

    let mut handles = ast.parents.clone();
    for node in &ast.pool {
        match &node.kind {
            NodeKind::Op { left, right, .. } => handles.extend([*left, *right]),
            NodeKind::If { condition,
                           code,
                           else_code, } => {
                handles.push(*condition);
                handles.extend(code);
                if let Some(else_code) = else_code {
                    handles.extend(else_code);
                }
            },
            NodeKind::For { condition, code } => {
                handles.push(*condition);
                handles.extend(code);
            },
            NodeKind::Func { code, .. } => handles.extend(code),
            NodeKind::Return { value } => handles.extend(*value),
            NodeKind::Call { args, .. } => handles.extend(args),
            NodeKind::Var { index, .. } => handles.extend(*index),
            NodeKind::Break | NodeKind::Continue | NodeKind::Int(_) | NodeKind::Float(_) => {},
        }
    }

    for handle in handles {
        assert!((handle as usize) < ast.pool.len(), "dangling handle {handle}");
    }
}

#[test]
fn control_flow_is_rejected_inside_parentheses() {
    assert!(compile_source("x = (if 1 2)").is_err());
    assert!(compile_source("x = (for i in range(0, 1) 2)").is_err());
}

#[test]
fn missing_closing_parenthesis_is_an_error() {
    assert!(compile_source("x = (1 + 2").is_err());
    assert!(compile_source("v = vec2(1, 2\n").is_err());
}

#[test]
fn keywords_are_not_identifiers() {
    assert!(compile_source("func if { ret 1 }").is_err());
    assert!(compile_source("x = for").is_err());
}

#[test]
fn break_takes_no_operand() {
    assert!(compile_source("for i in range(0, 2) { break 1 }").is_err());
}

#[test]
fn negation_applies_only_to_simple_operands() {
    assert!(compile_source("x = -(1 + 2)").is_err());
    assert!(compile_source("x = -5").is_ok());
    assert!(compile_source("x = 1\ny = -x").is_ok());
}

//--------------------------------------------------------------------//
// expressions and assignment

#[test]
fn arithmetic_and_precedence() {
    assert_prints("x = 3 + 4 * 2\nprint(x)", &["11"]);
    assert_prints("print(2 + 3 * 4 - 5)", &["9"]);
    assert_prints("print((2 + 3) * 4)", &["20"]);
    assert_prints("print(7 % 3)", &["1"]);
}

#[test]
fn subtraction_is_left_associative() {
    assert_prints("print(10 - 4 - 3)", &["3"]);
    assert_prints("print(100 / 5 / 2)", &["10"]);
}

#[test]
fn mixed_scalars_promote_to_float() {
    assert_prints("print(1 + 0.5)", &["1.5"]);
    assert_prints("print(3 / 2.0)", &["1.5"]);
    assert_prints("print(3 / 2)", &["1"]);
}

#[test]
fn unary_minus_negates() {
    assert_prints("x = 5\nprint(-x)", &["-5"]);
    assert_prints("print(3 - -2)", &["5"]);
    assert_prints("print(-int(3.5))", &["-3"]);
}

#[test]
fn compound_assignments() {
    assert_prints("x = 1\nx += 2\nprint(x)", &["3"]);
    assert_prints("x = 7\nx -= 2\nprint(x)", &["5"]);
    assert_prints("x = 4\nx *= 2\nprint(x)", &["8"]);
    assert_prints("x = 9\nx /= 3\nprint(x)", &["3"]);
    assert_prints("x = 9\nx %= 4\nprint(x)", &["1"]);
}

#[test]
fn float_variables_absorb_int_assignments() {
    assert_prints("x = 1.5\nx = 2\nprint(x)", &["2"]);
}

#[test]
fn assignments_are_type_stable() {
    assert_failure("x = 1\nx = vec2(0)");
    assert_failure("x = vec3(0)\nx = 1.0");
}

#[test]
fn void_cannot_be_assigned() {
    assert_failure("x = print(1)");
}

#[test]
fn multiline_expressions_inside_parentheses() {
    assert_prints("x = (1 +\n     2 +\n     3)\nprint(x)", &["6"]);
}

#[test]
fn comparisons_and_logic() {
    assert_prints("print(1 < 2, 2 <= 2, 3 > 4, 4 >= 4)", &["1, 1, 0, 1"]);
    assert_prints("print(1 == 1.0, 1 != 2)", &["1, 1"]);
    assert_prints("print(1 and 0, 1 and 2, 0 or 0, 0 or 3)", &["0, 1, 0, 1"]);
}

#[test]
fn logic_does_not_short_circuit() {
    // the right side always runs, so its print is visible
    let src = r"
func bump() {
    print(1)
    ret 1
}
y = 0 and bump()
print(y)
";
    assert_prints(src, &["1", "0"]);
}

#[test]
fn comparing_vectors_elementwise() {
    assert_prints("print(vec2(1, 2) == vec2(1, 2), vec2(1, 2) != vec2(1, 3))",
                  &["1, 1"]);
    assert_failure("x = vec2(0) == vec3(0)");
    assert_failure("q = quaternion()\nx = q == q");
}

//--------------------------------------------------------------------//
// vectors and quaternions

#[test]
fn vector_construction_and_printing() {
    assert_prints("print(vec2(), vec3(7), vec4(1, 2, 3, 4))",
                  &["(0, 0), (7, 7, 7), (1, 2, 3, 4)"]);
    assert_prints("print(vec3(vec2(1, 2), 3), vec4(vec3(1, 2, 3), 4))",
                  &["(1, 2, 3), (1, 2, 3, 4)"]);
}

#[test]
fn vec4_rejects_three_scalars() {
    assert_failure("v = vec4(1, 2, 3)");
    assert_success("v = vec4(1, 2, 3, 4)");
}

#[test]
fn component_reads_and_writes() {
    assert_prints("v = vec3(1, 2, 3)\nv[1] = 5\nprint(v)", &["(1, 5, 3)"]);
    assert_prints("v = vec4(1, 2, 3, 4)\nprint(v[3])", &["4"]);
    assert_prints("v = vec2(1, 2)\nv[0] = v[1] + 1\nprint(v)", &["(3, 2)"]);
}

#[test]
fn component_writes_coerce_to_float() {
    assert_prints("v = vec2(0.5, 0.5)\nv[0] = 2\nprint(v[0])", &["2"]);
}

#[test]
fn bad_indexing_fails() {
    assert_failure("v = vec2(1, 2)\nx = v[2]");
    assert_failure("v = vec3(1, 2, 3)\nx = v[-1]");
    assert_failure("v = vec2(1, 2)\nx = v[0.5]");
    assert_failure("x = 1\ny = x[0]");
    assert_failure("q = quaternion()\nx = q[0]");
    assert_failure("w[0] = 1");
}

#[test]
fn vector_arithmetic() {
    assert_prints("print(vec2(1, 2) + vec2(3, 4), vec2(4, 6) - vec2(1, 2))",
                  &["(4, 6), (3, 4)"]);
    assert_prints("print(vec3(1, 2, 3) * 2, 2 * vec3(1, 2, 3))",
                  &["(2, 4, 6), (2, 4, 6)"]);
    assert_prints("print(vec2(2, 4) / 2, vec2(8, 4) * vec2(2, 3))",
                  &["(1, 2), (16, 12)"]);
    assert_prints("print(8 / vec2(2, 4))", &["(4, 2)"]);
    assert_failure("x = vec2(1, 2) + 1");
    assert_failure("x = vec2(1, 2) * vec3(1, 2, 3)");
}

#[test]
fn quaternion_algebra_is_available() {
    assert_success("q = quaternion()\nr = quaternion(vec3(0, 0, 1), M_PI / 2)\ns = q * r");
    assert_success("q = quaternion(vec3(0.1, 0.2, 0.3))\nr = q + q\ns = q - q\nt = q * 0.5");
    assert_failure("q = quaternion(1, 2)");
    assert_failure("q = quaternion()\nprint(q)");
}

#[test]
fn modulo_is_int_only() {
    assert_failure("x = 1.5 % 2");
    assert_failure("x = vec2(1, 2) % vec2(1, 2)");
}

#[test]
fn division_by_zero_is_an_error() {
    assert_failure("x = 1 / 0");
    assert_failure("x = 1 % 0");
}

//--------------------------------------------------------------------//
// control flow

#[test]
fn if_and_else() {
    assert_prints("if 1 < 2 { print(1) } else { print(0) }", &["1"]);
    assert_prints("if 1 > 2 { print(1) } else { print(0) }", &["0"]);
    assert_prints("if 0 { print(1) }", &[]);
    // single-statement bodies sit on their own line
    assert_prints("if 1\nprint(7)", &["7"]);
}

#[test]
fn else_if_chains() {
    let src = r"
x = 2
if x == 1 { print(1) }
else if x == 2 { print(2) }
else { print(3) }
";
    assert_prints(src, &["2"]);
}

#[test]
fn conditions_must_be_scalar() {
    assert_failure("if vec2(1, 1) { print(1) }");
}

#[test]
fn for_ranges_are_inclusive() {
    assert_prints("for i in range(0, 4) { print(i) }",
                  &["0", "1", "2", "3", "4"]);
    assert_prints("total = 0\nfor i in range(1, 5) { total += i }\nprint(total)",
                  &["15"]);
}

#[test]
fn for_accepts_any_vec2_bounds() {
    assert_prints("for i in vec2(2, 4) { print(i) }", &["2", "3", "4"]);
    // fractional bounds round inward
    assert_prints("for i in vec2(0.5, 2.5) { print(i) }", &["1", "2"]);
    // an empty range runs zero times
    assert_prints("for i in range(3, 2) { print(i) }\nprint(9)", &["9"]);
}

#[test]
fn loop_variables_are_scoped_to_the_loop() {
    assert_failure("for i in range(0, 2) { }\nprint(i)");
    assert_failure("i = 1\nfor i in range(0, 2) { }");
}

#[test]
fn break_and_continue() {
    let src = r"
total = 0
for i in range(1, 10) {
    if i % 2 == 0 { continue }
    if i > 7 { break }
    total += i
}
print(total)
";
    // 1 + 3 + 5 + 7
    assert_prints(src, &["16"]);
}

#[test]
fn nested_loops_break_independently() {
    let src = r"
for y in range(0, 2) {
    for x in range(0, 9) {
        if x > 0 { break }
        print(y * 10 + x)
    }
}
";
    assert_prints(src, &["0", "10", "20"]);
}

#[test]
fn break_outside_a_loop_fails() {
    assert_failure("break");
    assert_failure("if 1 { continue }");
}

#[test]
fn break_cannot_cross_a_call_boundary() {
    let src = r"
func f() { break }
for i in range(0, 3) { f() }
";
    assert_failure(src);
}

#[test]
fn return_exits_a_loop() {
    let src = r"
func first_over(limit) {
    for i in range(0, 100) {
        if i > limit { ret i }
    }
    ret -1
}
print(first_over(6))
";
    assert_prints(src, &["7"]);
}

//--------------------------------------------------------------------//
// functions

#[test]
fn user_functions_and_calls() {
    assert_prints("func sq(x) { ret x * x }\nprint(sq(5))", &["25"]);
    assert_prints("func add(a, b) { ret a + b }\nprint(add(2, 5))", &["7"]);
    assert_prints("func seven { ret 7 }\nprint(seven())", &["7"]);
    assert_prints("func seven() { ret 7 }\nprint(seven())", &["7"]);
}

#[test]
fn arguments_evaluate_in_the_caller_scope() {
    assert_prints("func double(v) { ret v * 2 }\nx = 4\nprint(double(x + 1))",
                  &["10"]);
}

#[test]
fn recursion_works() {
    let src = r"
func fact(n) {
    if n <= 1 { ret 1 }
    ret n * fact(n - 1)
}
print(fact(5))
";
    assert_prints(src, &["120"]);
}

#[test]
fn function_bodies_cannot_see_caller_locals() {
    assert_failure("x = 5\nfunc f() { ret x }\ny = f()");
}

#[test]
fn constants_remain_visible_inside_functions() {
    assert_prints("func tau_ish() { ret int(M_TAU * 100) }\nprint(tau_ish())",
                  &["628"]);
}

#[test]
fn void_returns_produce_no_value() {
    assert_failure("func f() { ret }\nx = f()");
    assert_success("func f() { ret }\nf()");
}

#[test]
fn wrong_arity_fails() {
    assert_failure("func f(a, b) { ret a }\nx = f(1)");
    assert_failure("func f(a) { ret a }\nx = f(1, 2)");
}

#[test]
fn duplicate_parameter_names_fail_at_call_time() {
    assert_failure("func f(a, a) { ret a }\nx = f(1, 2)");
}

#[test]
fn function_redefinition_fails() {
    assert_failure("func f { ret 1 }\nfunc f { ret 2 }");
}

#[test]
fn nested_declarations_are_scoped_to_the_call() {
    let src = r"
func outer() {
    func inner(x) { ret x + 1 }
    ret inner(41)
}
print(outer())
";
    assert_prints(src, &["42"]);

    assert_failure("func outer() {\n    func inner(x) { ret x + 1 }\n    ret inner(41)\n}\ny = outer()\nz = inner(1)");
}

#[test]
fn undefined_names_fail() {
    assert_failure("print(missing)");
    assert_failure("x = missing(1)");
}

//--------------------------------------------------------------------//
// scope cleanup

#[test]
fn names_do_not_leak_between_executions() {
    let mut context = Context::new();

    context.execute(&compile_source("x = 1\nfunc f { ret 2 }").unwrap())
           .unwrap();

    assert!(context.execute(&compile_source("y = x").unwrap()).is_err());
    assert!(context.execute(&compile_source("y = f()").unwrap()).is_err());
}

#[test]
fn state_is_cleared_after_an_error() {
    let mut context = Context::new();

    // fails after 'x' was created
    assert!(context.execute(&compile_source("x = 1\ny = x + vec2(0)").unwrap())
                   .is_err());
    assert!(context.execute(&compile_source("z = x").unwrap()).is_err());
}

#[test]
fn branch_bodies_clean_up_their_names() {
    assert_failure("if 1 { t = 1 }\nprint(t)");
    assert_failure("if 0 { } else { t = 1 }\nprint(t)");
    assert_failure("if 1 { func g { ret 1 } }\nx = g()");
}

#[test]
fn outer_variables_are_writable_inside_blocks() {
    let src = r"
total = 0
if 1 {
    total = 5
}
print(total)
";
    assert_prints(src, &["5"]);
}

//--------------------------------------------------------------------//
// builtins

#[test]
fn builtin_math() {
    assert_prints("print(int(sqrt(81)), int(pow(2, 10)))", &["9, 1024"]);
    assert_prints("print(sin(0), cos(0))", &["0, 1"]);
    assert_prints("print(int(atan(tan(0.5)) * 1000 + 0.5))", &["500"]);
    assert_prints("print(int(asin(1) * 2 * 100), int(acos(1)))", &["314, 0"]);
}

#[test]
fn int_truncates_toward_zero() {
    assert_prints("print(int(3.9), int(-1.5), int(2))", &["3, -1, 2"]);
}

#[test]
fn rand_stays_in_bounds() {
    let src = r"
ok = 1
for i in range(0, 99) {
    x = rand(2, 5)
    if x < 2 or x > 4 { ok = 0 }
}
print(ok)
";
    assert_prints(src, &["1"]);

    assert_success("v = rand(vec2(0), vec2(1))\nw = rand(vec3(0), vec3(1))\nu = rand(vec4(0), vec4(1))");
    assert_success("x = rand(0.5, 1.5)");
    assert_failure("x = rand(5, 5)");
    assert_failure("x = rand(1, vec2(0))");
}

#[test]
fn default_constants_are_seeded() {
    assert_prints("print(int(M_PI * 100), int(M_TAU * 100), int(M_E * 100))",
                  &["314, 628, 271"]);
}

#[test]
fn print_rejects_unprintable_values() {
    assert_failure("print(print(1))");
    assert_failure("print(quaternion())");
}

#[test]
fn hosts_can_extend_and_override_the_library() {
    fn forty_two(args: &[Value], node: &Node, _user: Option<&mut dyn Any>) -> EvalResult<Value> {
        if args.is_empty() {
            Ok(Value::Int(42))
        } else {
            Err(invalid_params(node))
        }
    }

    let ast = compile_source("print(answer())").unwrap();

    let mut context = Context::new();
    context.set_functions(&[("answer", forty_two as LibraryFn),
                            ("print", capture_print as LibraryFn)]);
    context.set_constants(&[("ANSWER", Value::Int(42))]);
    context.set_user_data(Box::new(Vec::<String>::new()));

    context.execute(&ast).unwrap();

    let lines = context.user_data_mut()
                       .and_then(|data| data.downcast_mut::<Vec<String>>())
                       .map(std::mem::take)
                       .unwrap();
    assert_eq!(lines, vec!["42"]);

    // host constants are merged next to the defaults
    let ast = compile_source("print(ANSWER, int(M_PI))").unwrap();
    let mut lines_ctx = Context::new();
    lines_ctx.set_functions(&[("print", capture_print as LibraryFn)]);
    lines_ctx.set_constants(&[("ANSWER", Value::Int(42))]);
    lines_ctx.set_user_data(Box::new(Vec::<String>::new()));
    lines_ctx.execute(&ast).unwrap();
    let lines = lines_ctx.user_data_mut()
                         .and_then(|data| data.downcast_mut::<Vec<String>>())
                         .map(std::mem::take)
                         .unwrap();
    assert_eq!(lines, vec!["42, 3"]);
}

//--------------------------------------------------------------------//
// serialization

#[test]
fn serialized_trees_load_identically() {
    let source = fs::read_to_string("tests/example.ps").expect("missing file");
    let ast = compile_source(&source).unwrap();

    let mut buffer = Vec::new();
    save_ast(&ast, &mut buffer).unwrap();
    let loaded = load_ast(&mut buffer.as_slice()).unwrap();

    assert_eq!(ast, loaded);
}

#[test]
fn loaded_trees_execute_identically() {
    let source = fs::read_to_string("tests/example.ps").expect("missing file");
    let ast = compile_source(&source).unwrap();

    let mut buffer = Vec::new();
    save_ast(&ast, &mut buffer).unwrap();
    let loaded = load_ast(&mut buffer.as_slice()).unwrap();

    assert_eq!(run_captured_ast(&ast).unwrap(),
               run_captured_ast(&loaded).unwrap());
}

#[test]
fn malformed_object_data_is_rejected() {
    assert!(load_ast(&mut &b"propscript"[..]).is_err());

    let ast = compile_source("x = 1").unwrap();
    let mut buffer = Vec::new();
    save_ast(&ast, &mut buffer).unwrap();

    // truncation loses the pool
    let truncated = &buffer[..buffer.len() / 2];
    assert!(load_ast(&mut &truncated[..]).is_err());
}

//--------------------------------------------------------------------//
// whole scripts

#[test]
fn example_script_output() {
    let source = fs::read_to_string("tests/example.ps").expect("missing file");
    assert_prints(&source, &["(1.5, 2.5, 3.5)", "25"]);
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "ps")
                                      })
    {
        count += 1;
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Err(e) = run_source(&source) {
            panic!("Demo {path:?} failed: {e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
