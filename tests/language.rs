use std::rc::Rc;

use renelle::error::RuntimeError;
use renelle::interpreter::evaluator::EvalContext;
use renelle::interpreter::scope::Scope;
use renelle::interpreter::value::Value;
use renelle::{RunError, eval_source, run_source};

fn eval(source: &str) -> Value {
    match run_source(source, "test", Vec::new()) {
        Ok(value) => value,
        Err(err) => panic!("evaluation of {source:?} failed:\n{err}"),
    }
}

fn eval_err(source: &str) -> RuntimeError {
    match run_source(source, "test", Vec::new()) {
        Ok(value) => panic!("expected {source:?} to fail, got {}", value.inspect()),
        Err(RunError::Runtime(error)) => error,
        Err(RunError::Parse(errors)) => panic!("parse errors in {source:?}: {errors:?}"),
    }
}

fn assert_int(source: &str, expected: i64) {
    match eval(source) {
        Value::Integer(n) => assert_eq!(n, expected, "for {source:?}"),
        other => panic!("expected integer from {source:?}, got {}", other.inspect()),
    }
}

fn assert_float(source: &str, expected: f64) {
    match eval(source) {
        Value::Float(x) => assert!((x - expected).abs() < 1e-9, "for {source:?}: {x}"),
        other => panic!("expected float from {source:?}, got {}", other.inspect()),
    }
}

fn assert_bool(source: &str, expected: bool) {
    match eval(source) {
        Value::Bool(b) => assert_eq!(b, expected, "for {source:?}"),
        other => panic!("expected boolean from {source:?}, got {}", other.inspect()),
    }
}

fn assert_str(source: &str, expected: &str) {
    match eval(source) {
        Value::Str(s) => assert_eq!(s.as_ref(), expected, "for {source:?}"),
        other => panic!("expected string from {source:?}, got {}", other.inspect()),
    }
}

fn assert_nil(source: &str) {
    let value = eval(source);
    assert!(value.is_nil(), "expected nil from {source:?}, got {}", value.inspect());
}

fn assert_inspect(source: &str, expected: &str) {
    assert_eq!(eval(source).inspect(), expected, "for {source:?}");
}

#[test]
fn integer_arithmetic() {
    assert_int("5", 5);
    assert_int("-5", -5);
    assert_int("5 + 5 + 5 + 5 - 10", 10);
    assert_int("2 * 2 * 2 * 2 * 2", 32);
    assert_int("50 / 2 * 2 + 10", 60);
    assert_int("2 ** 10", 1024);
    assert_int("2 ** 3 ** 2", 512);
    assert_int("7 % 3", 1);
    assert_int("3 * (3 * 3) + 10", 37);
}

#[test]
fn float_arithmetic_and_widening() {
    assert_float("3.14", 3.14);
    assert_float("0.5 + 0.5", 1.0);
    assert_float("1 + 2.5", 3.5);
    assert_float("2.0 * 3", 6.0);
    assert_float("10.0 / 4", 2.5);
    assert_float("2.0 ** 0.5", std::f64::consts::SQRT_2);
}

#[test]
fn integer_division_truncates_and_zero_is_an_error() {
    assert_int("10 / 4", 2);
    assert_int("-7 / 2", -3);
    assert_eq!(eval_err("1 / 0").message, "division by zero");
    assert_eq!(eval_err("1 % 0").message, "division by zero");
}

#[test]
fn float_division_by_zero_follows_ieee() {
    match eval("1.0 / 0.0") {
        Value::Float(x) => assert!(x.is_infinite() && x > 0.0),
        other => panic!("expected float, got {}", other.inspect()),
    }
    match eval("0.0 / 0.0") {
        Value::Float(x) => assert!(x.is_nan()),
        other => panic!("expected float, got {}", other.inspect()),
    }
}

#[test]
fn comparisons_and_equality() {
    assert_bool("1 < 2", true);
    assert_bool("1 > 2", false);
    assert_bool("1 <= 1", true);
    assert_bool("2 >= 3", false);
    assert_bool("1 == 1", true);
    assert_bool("1 != 2", true);
    assert_bool("true == true", true);
    assert_bool("true != false", true);
    assert_bool("1.5 == 1.5", true);
    assert_bool("\"abc\" == \"abc\"", true);
    assert_bool("\"abc\" < \"abd\"", true);
}

#[test]
fn atoms_are_interned() {
    let a = eval(":something");
    let b = eval(":something");
    let (Value::Atom(a), Value::Atom(b)) = (a, b) else {
        panic!("expected atoms");
    };
    assert!(Rc::ptr_eq(&a, &b));

    assert_bool(":foo == :foo", true);
    assert_bool(":foo == :bar", false);
    assert_bool(":foo != :bar", true);
}

#[test]
fn truthiness() {
    assert_bool("!true", false);
    assert_bool("!false", true);
    assert_bool("!:nil", true);
    assert_bool("!!true", true);
    assert_bool("!0", false);
    assert_bool("!\"\"", false);
    assert_int("if 0 { 1 } else { 2 }", 1);
    assert_int("if \"\" { 1 } else { 2 }", 1);
    assert_int("if [] { 1 } else { 2 }", 1);
}

#[test]
fn and_or_return_the_decisive_operand() {
    assert_int("5 and 6", 6);
    assert_nil(":nil and 5");
    assert_bool("false and 5 == 5", false);
    assert_str("false or \"fallback\"", "fallback");
    assert_int("0 or 1", 0);
    assert_int("1 or 2", 1);
}

#[test]
fn if_expressions() {
    assert_int("if true { 10 }", 10);
    assert_nil("if false { 10 }");
    assert_int("if 1 < 2 { 10 } else { 20 }", 10);
    assert_int("if 1 > 2 { 10 } else { 20 }", 20);
}

#[test]
fn return_statements_unwrap_at_the_boundary() {
    assert_int("9 return 2 * 5 9", 10);
    assert_int("fn f() { return 10 5 } f()", 10);
    assert_int("fn f(x) { if x { return 1 } 2 } f(true)", 1);
    assert_int("fn f(x) { if x { return 1 } 2 } f(false)", 2);
}

#[test]
fn let_bindings() {
    assert_int("let a = 5 a", 5);
    assert_int("let a = 5 * 5 a", 25);
    assert_int("let a = 5 let b = a let c = a + b + 5 c", 15);
    assert_int("let _ = 5 1", 1);
}

#[test]
fn uppercase_locals_are_rejected() {
    let error = eval_err("let Foo = 5");
    assert_eq!(error.message, "local variables can not start with an uppercase letter");
    assert_eq!(eval_err("let (A, b) = (1, 2)").message,
               "local variables can not start with an uppercase letter");
}

#[test]
fn functions_and_application() {
    assert_int("fn add(x y) { x + y } add(5 5)", 10);
    assert_int("let double = \\x => x * 2 double(5)", 10);
    assert_int("let id = \\x => x id(42)", 42);
    assert_int("fn fact(n) { if n == 0 { 1 } else { n * fact(n - 1) } } fact(5)", 120);
    assert_int("(\\x => x + 1)(41)", 42);
}

#[test]
fn arity_mismatch_is_an_error() {
    assert_eq!(eval_err("fn f(x) { x } f()").message,
               "wrong number of arguments. got=0, want=1");
    assert_eq!(eval_err("(\\x => x)(1, 2)").message,
               "wrong number of arguments. got=2, want=1");
}

#[test]
fn closures_capture_lexically() {
    assert_int("let make = \\x => \\y => x + y let add2 = make(2) add2(3)", 5);
    // A binding with the same name inside another call scope must not leak
    // into a function that closed over the outer one.
    assert_int("let x = 5 fn f() { x } fn g() { let x = 10 f() } g()", 5);
}

#[test]
fn strings_concatenate_and_index() {
    assert_str("\"Hello\" + \" \" + \"World!\"", "Hello World!");
    assert_str("\"hello\"@1", "e");
    assert_nil("\"hello\"@99");
    assert_int("len(\"hello\")", 5);
    assert_int("len(\"\")", 0);
}

#[test]
fn string_interpolation() {
    assert_str("let name = \"world\" $\"hello {name}!\"", "hello world!");
    assert_str("$\"1 + 1 = {1 + 1}\"", "1 + 1 = 2");
    assert_str("$\"tag: {:ok}\"", "tag: :ok");
    assert_str("$\"\\{braces}\"", "{braces}");
}

#[test]
fn arrays_index_and_slice() {
    assert_inspect("[1, 2 * 2, 3 + 3]", "[1, 4, 6]");
    assert_int("[1 2 3]@0", 1);
    assert_int("[1 2 3]@2", 3);
    assert_int("[1 2 3]@-1", 3);
    assert_nil("[1 2 3]@3");
    assert_nil("[1 2 3]@-4");
    assert_nil("[]@0");
    assert_int("len([])", 0);
    assert_inspect("[1 2 3 4]@(1 :: 3)", "[2, 3]");
    assert_inspect("[1 2 3 4]@(_ :: 2)", "[1, 2]");
    assert_inspect("[1 2 3 4]@(2 :: _)", "[3, 4]");
    assert_inspect("[1 2 3 4]@(-2 :: _)", "[3, 4]");
    assert_inspect("[1 2 3 4]@(3 :: 1)", "[]");
    assert_inspect("[1 2 3 4]@(0 :: 99)", "[1, 2, 3, 4]");
}

#[test]
fn array_masks_gather_and_multidimensional_indexing() {
    assert_inspect("[1 2 3]@[true false true]", "[1, 3]");
    assert_inspect("[10 20 30]@[2 0]", "[30, 10]");
    assert_inspect("[[1 2] [3 4]]@[(0 :: 2) 1]", "[2, 4]");
    assert_inspect("[[1 2] [3 4]]@[[0] 1]", "[2]");
    assert_eq!(eval_err("[1 2 3]@[true false]").message, "array length mismatch: 3 != 2");
    assert_eq!(eval_err("[1 2]@[5]").message, "index out of bounds: 5");
}

#[test]
fn elementwise_array_math_and_broadcasting() {
    assert_inspect("[1 2] + [3 4]", "[4, 6]");
    assert_inspect("[4 9] - [1 2]", "[3, 7]");
    assert_inspect("[1 2 3] * 2", "[2, 4, 6]");
    assert_inspect("[2.0 4.0] / 2", "[1, 2]");
    assert_inspect("[1 2] == [1 3]", "[true, false]");
    assert_inspect("[1 2] < [2 2]", "[true, false]");
    assert_inspect("[1 2] ++ [3 4]", "[1, 2, 3, 4]");
    assert_bool("[1 2] === [1 2]", true);
    assert_bool("[1 2] === [1 3]", false);
    assert_bool("[1 2] !== [1 3]", true);
    assert_eq!(eval_err("[1 2] + [1 2 3]").message, "vector length mismatch: 2 != 3");
}

#[test]
fn tuples_index_positionally() {
    assert_int("(1 2 3)@0", 1);
    assert_int("(1 2 3)@2", 3);
    assert_nil("(1 2 3)@3");
    assert_nil("(1 2 3)@-1");
    assert_int("len((1, 2))", 2);
}

#[test]
fn tuple_and_array_destructuring() {
    assert_int("let (a, b) = (1, 2) a + b", 3);
    assert_int("let [a, b, c] = [1, 2, 3] a + b + c", 6);
    assert_int("let ((a b) c) = ((1 2) 3) a + b + c", 6);
    assert_int("let (1, x) = (1, 5) x", 5);
    assert_int("let (_, x) = (1, 5) x", 5);
    assert_eq!(eval_err("let (a, b) = (1, 2, 3)").message,
               "cannot destructure tuple: size mismatch");
    assert_eq!(eval_err("let [a] = [1 2]").message, "cannot destructure array: size mismatch");
    assert_eq!(eval_err("let (2, x) = (1, 5)").message,
               "cannot destructure tuple: value mismatch");
    assert_eq!(eval_err("let (a, b) = [1 2]").message,
               "right-hand side of assignment is not a tuple");
}

#[test]
fn map_literals_and_access() {
    assert_str("let cat = {name: \"hayley\", age: 8} cat@:name", "hayley");
    assert_int("let cat = {name: \"hayley\", age: 8} cat@:age", 8);
    assert_str("let dog = {\"name\" = \"goldie\"} dog@\"name\"", "goldie");
    assert_str("let m = {name: \"hayley\"} m.name", "hayley");
    assert_nil("let m = {a: 1} m@:missing");
    assert_nil("let m = {a: 1} m.missing");
    assert_int("{1 = 10, 2 = 20}@2", 20);
    assert_int("len({a: 1, b: 2})", 2);
}

#[test]
fn map_keys_hash_by_kind() {
    assert_str("let m = {1 = \"int\", \"1\" = \"str\"} m@\"1\"", "str");
    assert_str("let m = {1 = \"int\", \"1\" = \"str\"} m@1", "int");
    assert_str("let m = {1.0 = \"float\", 1 = \"int\"} m@1.0", "float");
    assert_str("let m = {true = \"bool\", \"true\" = \"str\"} m@true", "bool");
}

#[test]
fn unusable_map_keys_are_an_error() {
    assert_eq!(eval_err("{[1] = 2}").message, "unusable as map key: ARRAY");
}

#[test]
fn map_update_copies_the_base() {
    assert_int("let m = {a: 1} let m2 = {m with b = 2} m2@:b", 2);
    assert_nil("let m = {a: 1} let m2 = {m with b = 2} m@:b");
    assert_int("let m = {a: 1} let m2 = {m with a = 9} m2@:a", 9);
    // Overwriting keeps the key's original position.
    assert_inspect("let m = {a: 1, b: 2} {m with a = 9}", "{:a = 9, :b = 2}");
    assert_eq!(eval_err("let x = 5 {x with a = 1}").message, "not a map: INTEGER");
}

#[test]
fn map_update_is_idempotent() {
    let once = eval("let m = {a: 1} {m with b = 2}");
    let twice = eval("let m = {a: 1} let m2 = {m with b = 2} {m2 with b = 2}");
    assert_eq!(once, twice);
}

#[test]
fn map_iteration_order_is_insertion_order() {
    assert_inspect("{b: 1, a: 2}", "{:b = 1, :a = 2}");
    assert_inspect("Map.keys({b: 1, a: 2, c: 3})", "[:b, :a, :c]");
}

#[test]
fn map_equality_ignores_insertion_order() {
    assert_eq!(eval("{a: 1, b: 2}"), eval("{b: 2, a: 1}"));
    assert_ne!(eval("{a: 1}"), eval("{a: 2}"));
}

#[test]
fn map_destructuring() {
    assert_int("let {age: a} = {name: \"x\", age: 8} a", 8);
    assert_int("let {point: (x, y)} = {point: (3, 4)} x + y", 7);
    assert_eq!(eval_err("let {missing: m} = {a: 1}").message, "key not found: :missing");
    assert_eq!(eval_err("let {a: x} = 5").message, "expected map, got INTEGER");
}

#[test]
fn cond_expressions() {
    assert_int("cond { false => 1 true => 2 }", 2);
    assert_int("cond { 1 < 2 => 10 true => 20 }", 10);
    assert_nil("cond { false => 1 }");
}

#[test]
fn case_expressions() {
    assert_int("case (1, 2) { (1, x) => x _ => 0 }", 2);
    assert_int("case (2, 9) { (1, x) => x _ => 0 }", 0);
    assert_str("case 5 { 5 => \"five\" _ => \"other\" }", "five");
    assert_int("case 10 { n => n + 1 }", 11);
    assert_int("case [1, 2] { [a, b] => a + b _ => 0 }", 3);
    assert_str("case :ok { :ok => \"yes\" :error => \"no\" }", "yes");
    assert_int("fn fib(n) { case n { 0 => 0 1 => 1 _ => fib(n - 1) + fib(n - 2) } } fib(10)",
               55);
    assert_eq!(eval_err("case 1 { 2 => 1 }").message, "no matching case");
}

#[test]
fn case_tagged_tuple_convention() {
    let source = r#"
        fn check(result) {
            case result {
                (:ok, value) => value
                (:error, _) => -1
            }
        }
        check((:ok, 42)) + check((:error, "nope"))
    "#;
    assert_int(source, 41);
}

#[test]
fn pipe_operator() {
    assert_int("5 |> (\\x => x * 2)() |> (\\x => x + 1)()", 11);
    assert_int("let add = \\x y => x + y let double = \\x => x * 2 5 |> add(5) |> double()",
               20);
    assert_int("5 |> (\\x => x * 2)", 10);
    assert_eq!(eval_err("5 |> 6").message, "pipe operator must be followed by a function call");
    assert_eq!(eval_err("5 |> (\\x y => x + y)").message,
               "function literal must take exactly one argument");
}

#[test]
fn pipe_associativity_matches_nested_calls() {
    let piped = eval("fn f(x) { x * 3 } fn g(x) { x + 1 } 2 |> f() |> g()");
    let nested = eval("fn f(x) { x * 3 } fn g(x) { x + 1 } g(f(2))");
    assert_eq!(piped, nested);
}

#[test]
fn global_builtins() {
    assert_str("type(123)", "INTEGER");
    assert_str("type(3.14)", "FLOAT");
    assert_str("type(\"x\")", "STRING");
    assert_str("type(true)", "BOOLEAN");
    assert_str("type(:a)", "ATOM");
    assert_str("type([1 2 3])", "ARRAY");
    assert_str("type((1 2 3))", "TUPLE");
    assert_str("type({ a: 1 \"b\" = 2 })", "MAP");
    assert_str("inspect([1, \"two\", :three])", "[1, \"two\", :three]");
    assert_int("len((1, 2, 3))", 3);
    assert_eq!(eval_err("len(5)").message, "argument to `len` not supported, got INTEGER");
}

#[test]
fn os_args_exposes_script_arguments() {
    let value = run_source("os_args()@0", "test", vec!["one".to_string(), "two".to_string()])
        .expect("os_args should evaluate");
    assert_eq!(value, Value::string("one"));
}

#[test]
fn loop_builtin_runs_the_state_machine() {
    assert_int("loop(0, \\x => if x < 5 { (:cont, x + 1) } else { (:halt, x) })", 5);
    let error = eval_err("loop(0, \\x => 1)");
    assert!(error.message.contains("(:cont, value) or (:halt, value)"), "{}", error.message);
}

#[test]
fn reduce_and_reduce_while() {
    assert_int("Array.reduce([1 2 3 4], 0, \\acc x => acc + x)", 10);
    assert_int("Array.reduce([1 2 3 4], \\acc x => acc + x)", 10);
    assert_int("Array.reduce_while([1 2 3 4], 0, \\acc x => if x > 2 { (:halt, acc) } else { (:cont, acc + x) })",
               3);
    assert_int("Array.reduce_while([], 42, \\acc x => (:cont, acc))", 42);
    let error = eval_err("Array.reduce_while([], \\acc x => (:cont, acc))");
    assert!(error.message.contains("empty array"), "{}", error.message);
}

#[test]
fn stdlib_array_module() {
    assert_inspect("Array.range(3)", "[0, 1, 2]");
    assert_inspect("Array.range(2, 5)", "[2, 3, 4]");
    assert_inspect("Array.reverse([1 2 3])", "[3, 2, 1]");
    assert_inspect("Array.map([1 2 3], \\x => x * 2)", "[2, 4, 6]");
    assert_inspect("Array.filter([1 2 3 4], \\x => x % 2 == 0)", "[2, 4]");
    assert_int("Array.sum([1 2 3])", 6);
    assert_int("Array.first([7 8])", 7);
    assert_int("Array.last([7 8])", 8);
    assert_inspect("Array.push([1], 2)", "[1, 2]");
    assert_bool("Array.contains?([1 2 3], 2)", true);
    assert_bool("Array.contains?([1 2 3], 9)", false);
    assert_inspect("Array.take([1 2 3 4], 2)", "[1, 2]");
    assert_inspect("Array.drop([1 2 3 4], 2)", "[3, 4]");
    assert_bool("Array.reverse(Array.reverse([1 2 3])) === [1 2 3]", true);
}

#[test]
fn stdlib_string_module() {
    assert_str("String.upper(\"abc\")", "ABC");
    assert_str("String.lower(\"ABC\")", "abc");
    assert_int("String.length(\"hello\")", 5);
    assert_inspect("String.split(\"a-b-c\", \"-\")", "[\"a\", \"b\", \"c\"]");
    assert_inspect("String.chars(\"ab\")", "[\"a\", \"b\"]");
    assert_str("String.join([\"a\" \"b\" \"c\"], \"-\")", "a-b-c");
    assert_str("String.join([], \"-\")", "");
    assert_str("String.reverse(\"abc\")", "cba");
    assert_str("String.repeat(\"ab\", 3)", "ababab");
    assert_bool("String.contains?(\"hello\", \"ell\")", true);
    assert_bool("String.starts_with?(\"hello\", \"he\")", true);
    assert_bool("String.ends_with?(\"hello\", \"lo\")", true);
    assert_int("String.index_of(\"hello\", \"ll\")", 2);
    assert_int("String.index_of(\"hello\", \"xyz\")", -1);
    assert_str("String.trim(\"  x  \")", "x");
    assert_str("String.replace(\"aaa\", \"a\", \"b\")", "baa");
    assert_str("String.replace_all(\"aaa\", \"a\", \"b\")", "bbb");
    assert_bool("String.match?(\"hello42\", \"[a-z]+[0-9]+\")", true);
    assert_int("String.parse_num(\"42\")", 42);
    assert_float("String.parse_num(\"2.5\")", 2.5);
    assert_inspect("String.try_parse_num(\"42\")", "(:ok, 42)");
    assert_bool("case String.try_parse_num(\"nope\") { (:error, _) => true _ => false }", true);
}

#[test]
fn stdlib_math_module() {
    assert_float("Math.sqrt(9)", 3.0);
    assert_int("Math.abs(-5)", 5);
    assert_float("Math.abs(-5.5)", 5.5);
    assert_float("Math.floor(2.7)", 2.0);
    assert_float("Math.ceiling(2.1)", 3.0);
    assert_float("Math.round(3.7)", 4.0);
    assert_float("Math.round(3.14159, 2)", 3.14);
    assert_int("Math.max(2, 7)", 7);
    assert_int("Math.min(2, 7)", 2);
    assert_int("Math.pow(2, 8)", 256);
    assert_int("Math.clamp(99, 0, 10)", 10);
    assert_bool("Math.even?(4)", true);
    assert_bool("Math.odd?(4)", false);
    assert_eq!(eval_err("Math.sqrt(-1)").message, "sqrt() requires a non-negative number");
}

#[test]
fn stdlib_map_module() {
    assert_int("Map.get({a: 1}, :a)", 1);
    assert_nil("Map.get({a: 1}, :b)");
    assert_int("Map.get({a: 1}, :b, 9)", 9);
    assert_bool("Map.has_key?({a: 1}, :a)", true);
    assert_bool("Map.has_key?({a: 1}, :b)", false);
    assert_int("Map.length({a: 1, b: 2})", 2);
    assert_inspect("Map.try_get({a: 1}, :a)", "(:ok, 1)");
    assert_inspect("Map.try_get({a: 1}, :b)", "(:error, :not_found)");
    assert_inspect("Map.values({a: 1, b: 2})", "[1, 2]");
    assert_int("Map.get_or({a: 1}, :b, 7)", 7);
}

#[test]
fn file_builtins_roundtrip() {
    let path = std::env::temp_dir().join("renelle_language_test.txt");
    let path = path.display().to_string();

    assert_str(&format!("File.write!(\"hello\", \"{path}\") File.open!(\"{path}\")"), "hello");
    assert_bool(&format!("case File.open(\"{path}\") {{ (:ok, c) => c == \"hello\" _ => false }}"),
                true);
    assert_bool("case File.open(\"/no/such/renelle/file\") { (:error, _) => true _ => false }",
                true);
    eval_err("File.open!(\"/no/such/renelle/file\")");

    std::fs::remove_file(&path).ok();
}

#[test]
fn modules_register_and_expose_functions() {
    let env = Scope::new();
    let mut ctx = EvalContext::new("repl");

    eval_source("module Counter fn next(n) { n + 1 } fn zero() { 0 }",
                "counter.rnl",
                &env,
                &mut ctx).expect("module should evaluate");

    let value = eval_source("Counter.next(Counter.zero()) + Counter.next(40)",
                            "repl",
                            &env,
                            &mut ctx).expect("module call should evaluate");
    assert_eq!(value, Value::Integer(42));

    // The identifier form hands the function itself back.
    let value = eval_source("let f = Counter.next f(1)", "repl", &env, &mut ctx)
        .expect("module member should be a value");
    assert_eq!(value, Value::Integer(2));
}

#[test]
fn dotted_module_names() {
    let env = Scope::new();
    let mut ctx = EvalContext::new("repl");

    eval_source("module Geo.Shapes fn area(w h) { w * h }", "geo.rnl", &env, &mut ctx)
        .expect("dotted module should evaluate");
    let value = eval_source("Geo.Shapes.area(3, 4)", "repl", &env, &mut ctx)
        .expect("dotted call should evaluate");
    assert_eq!(value, Value::Integer(12));
}

#[test]
fn missing_modules_and_members() {
    assert_eq!(eval_err("NoSuchModule.f()").message, "module not found: NoSuchModule");
    assert_eq!(eval_err("Math.no_such()").message, "function no_such not found");
    assert_eq!(eval_err("5 |> Math.pi").message,
               "pipe operator must be followed by a function call");
}

#[test]
fn property_access_requires_a_module_or_map() {
    assert_eq!(eval_err("5.foo").message, "property access not supported: INTEGER");
}

#[test]
fn runtime_errors_carry_positions() {
    let error = eval_err("5 + true");
    assert_eq!(error.message, "type mismatch: INTEGER + BOOLEAN");
    assert_eq!((error.line, error.column), (1, 3));
    assert_eq!(error.to_string(),
               "Line: 1, Column 3: ERROR: type mismatch: INTEGER + BOOLEAN");

    let error = eval_err("let x = 1\nx + :oops");
    assert_eq!(error.line, 2);
}

#[test]
fn unbound_identifiers_error() {
    assert_eq!(eval_err("foobar").message, "identifier not found: foobar");
    assert_eq!(eval_err("\"s\" - \"t\"").message, "unknown operator: STRING - STRING");
    assert_eq!(eval_err("5 @ 5").message, "index operator not supported: INTEGER");
    assert_eq!(eval_err("1()").message, "not a function: INTEGER");
}

#[test]
fn errors_propagate_through_every_combinator() {
    assert_eq!(eval_err("[1, missing, 3]").message, "identifier not found: missing");
    assert_eq!(eval_err("if missing { 1 }").message, "identifier not found: missing");
    assert_eq!(eval_err("let x = missing x").message, "identifier not found: missing");
    assert_eq!(eval_err("fn f() { missing } f() 99").message, "identifier not found: missing");
    assert_eq!(eval_err("{a: missing}").message, "identifier not found: missing");
    assert_eq!(eval_err("$\"v = {missing}\"").message, "identifier not found: missing");
}

#[test]
fn substitutivity_through_a_let_binding() {
    for expr in ["1 + 2", "[1, :two]", "(1, \"x\")", "{a: 1}"] {
        let direct = eval(expr);
        let bound = eval(&format!("let x = {expr} x"));
        assert_eq!(direct, bound, "for {expr:?}");
    }
}

#[test]
fn underscore_is_nil_in_expression_position() {
    assert_nil("_");
}

#[test]
fn slices_are_values() {
    assert_str("type(1 :: 2)", "SLICE");
    assert_inspect("1 :: 2", "1::2");
    assert_eq!(eval_err("\"a\" :: 2").message, "slice bounds must be integers");
}
