use std::collections::HashMap;

use coff_lang_core::ast;
use coff_lang_core::ast::{Expression, InfixOperationKind, PrefixOperationKind};
use gc::Gc;
use log::{debug, trace};

use crate::builtins;
use crate::environment::Environment;
use crate::object::{object_to_key, EvaluationError, HashPair, Object, ObjectType, QuickReturn};

/// Evaluates `program` in `environment`, returning the value of its last
/// statement (or of the first top level `ret`).
pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Gc<Object>, EvaluationError> {
    let mut output = Object::null();
    for statement in &program.statements {
        let result = eval_statement(statement, environment);

        match result {
            Err(QuickReturn::Return(value)) => return Ok(value),
            Err(QuickReturn::Error(error)) => {
                debug!("evaluation failed: {error}");
                return Err(error);
            }
            Ok(object) => output = object,
        };
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    match statement {
        ast::Statement::Expression(expression) => eval_expression(expression, environment),
        ast::Statement::Return(statement) => eval_return_statement(statement, environment),
        ast::Statement::Def(statement) => eval_def_statement(statement, environment),
    }
}

fn eval_def_statement(
    statement: &ast::DefStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(&statement.identifier.name, value.clone());
    Ok(value)
}

fn eval_return_statement(
    statement: &ast::ReturnStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let value = match &statement.value {
        Some(value) => eval_expression(value, environment)?,
        None => Object::null(),
    };
    Err(QuickReturn::Return(value))
}

fn eval_block_statement(
    block: &ast::BlockStatement,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let mut result = Object::null();
    for statement in &block.statements {
        result = eval_statement(statement, environment)?;
    }
    Ok(result)
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    match expression {
        Expression::IntegerLiteral { value, .. } => Ok(Object::integer(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::StringLiteral(value) => Ok(Object::string(value.clone())),
        Expression::ArrayLiteral(array) => Ok(Object::array(eval_expressions(array, environment)?)),
        Expression::HashLiteral(literal) => eval_hash_literal(literal, environment),
        Expression::Identifier(identifier) => eval_identifier(identifier, environment),
        Expression::PrefixOperation(kind, right) => {
            let right = eval_expression(right, environment)?;
            Ok(eval_prefix_operation(*kind, right)?)
        }
        Expression::InfixOperation(kind, left, right) => {
            let left = eval_expression(left, environment)?;
            let right = eval_expression(right, environment)?;
            Ok(eval_infix_operation(*kind, left, right)?)
        }
        Expression::IfExpression {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, environment)?;
            if condition.is_truthy() {
                eval_block_statement(consequence, environment)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, environment)
            } else {
                Ok(Object::null())
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(Object::function(
            parameters.clone(),
            body.clone(),
            environment.clone(),
        )),
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let function = eval_expression(function, environment)?;
            let arguments = eval_expressions(arguments, environment)?;
            Ok(apply_function(&function, arguments)?)
        }
        Expression::IndexExpression { left, index } => {
            let left = eval_expression(left, environment)?;
            let index = eval_expression(index, environment)?;
            Ok(eval_index_expression(&left, &index)?)
        }
    }
}

fn eval_identifier(
    identifier: &ast::Identifier,
    environment: &Environment,
) -> Result<Gc<Object>, QuickReturn> {
    if let Some(value) = environment.get(&identifier.name) {
        return Ok(value);
    }
    builtins::lookup(&identifier.name)
        .map(Object::builtin)
        .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()).into())
}

/// Evaluates left to right, stopping at the first failure.
fn eval_expressions(
    expressions: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Gc<Object>>, QuickReturn> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

fn eval_hash_literal(
    literal: &[(Expression, Expression)],
    environment: &mut Environment,
) -> Result<Gc<Object>, QuickReturn> {
    let mut hashmap = HashMap::new();
    for (key, value) in literal {
        let key = eval_expression(key, environment)?;
        let hashed_key = object_to_key(&key)?;
        let value = eval_expression(value, environment)?;
        hashmap.insert(hashed_key, HashPair { key, value });
    }
    Ok(Object::hash(hashmap))
}

fn apply_function(
    function: &Gc<Object>,
    arguments: Vec<Gc<Object>>,
) -> Result<Gc<Object>, EvaluationError> {
    match &**function {
        Object::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(EvaluationError::WrongArgumentCount {
                    expected: function.parameters.len(),
                    actual: arguments.len(),
                });
            }
            trace!("applying fun/{}", function.parameters.len());

            let mut new_environment = Environment::new_enclosed(function.environment.clone());
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                new_environment.set(&parameter.name, argument);
            }
            match eval_block_statement(&function.body, &mut new_environment) {
                Ok(object) => Ok(object),
                Err(QuickReturn::Return(value)) => Ok(value),
                Err(QuickReturn::Error(error)) => Err(error),
            }
        }
        Object::Builtin(builtin) => {
            trace!("calling builtin `{}`", builtin.name);
            (builtin.func)(arguments)
        }
        other => Err(EvaluationError::CallNonFunction(other.object_type())),
    }
}

fn eval_prefix_operation(
    kind: PrefixOperationKind,
    right: Gc<Object>,
) -> Result<Gc<Object>, EvaluationError> {
    match (kind, &*right) {
        (PrefixOperationKind::Bang, right) => Ok(Object::boolean(!right.is_truthy())),
        (PrefixOperationKind::Minus, Object::Integer(value)) => {
            Ok(Object::integer(value.wrapping_neg()))
        }
        (PrefixOperationKind::Minus, right) => Err(EvaluationError::UnknownPrefixOperator {
            right: right.object_type(),
            operation: kind,
        }),
    }
}

fn eval_infix_operation(
    kind: InfixOperationKind,
    left: Gc<Object>,
    right: Gc<Object>,
) -> Result<Gc<Object>, EvaluationError> {
    match (kind, &*left, &*right) {
        (_, Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_operation(kind, *left, *right)
        }
        (InfixOperationKind::Plus, Object::String(left), Object::String(right)) => {
            Ok(Object::string(format!("{}{}", left, right)))
        }
        (_, Object::String(_), Object::String(_)) => Err(EvaluationError::UnknownInfixOperator {
            left: ObjectType::String,
            right: ObjectType::String,
            operation: kind,
        }),
        (InfixOperationKind::Equal, _, _) => Ok(Object::boolean(Gc::ptr_eq(&left, &right))),
        (InfixOperationKind::NotEqual, _, _) => Ok(Object::boolean(!Gc::ptr_eq(&left, &right))),
        (_, left, right) if left.object_type() != right.object_type() => {
            Err(EvaluationError::TypeMismatch {
                left: left.object_type(),
                right: right.object_type(),
                operation: kind,
            })
        }
        (_, left, right) => Err(EvaluationError::UnknownInfixOperator {
            left: left.object_type(),
            right: right.object_type(),
            operation: kind,
        }),
    }
}

/// Arithmetic wraps on overflow like two's complement hardware.
fn eval_integer_infix_operation(
    kind: InfixOperationKind,
    left: i64,
    right: i64,
) -> Result<Gc<Object>, EvaluationError> {
    let result = match kind {
        InfixOperationKind::Plus => Object::integer(left.wrapping_add(right)),
        InfixOperationKind::Minus => Object::integer(left.wrapping_sub(right)),
        InfixOperationKind::Multiply => Object::integer(left.wrapping_mul(right)),
        InfixOperationKind::Divide => {
            if right == 0 {
                return Err(EvaluationError::DivisionByZero);
            }
            Object::integer(left.wrapping_div(right))
        }
        InfixOperationKind::LessThan => Object::boolean(left < right),
        InfixOperationKind::GreaterThan => Object::boolean(left > right),
        InfixOperationKind::Equal => Object::boolean(left == right),
        InfixOperationKind::NotEqual => Object::boolean(left != right),
    };
    Ok(result)
}

fn eval_index_expression(
    left: &Gc<Object>,
    index: &Gc<Object>,
) -> Result<Gc<Object>, EvaluationError> {
    match (&**left, &**index) {
        (Object::Array(array), Object::Integer(index)) => Ok(usize::try_from(*index)
            .ok()
            .and_then(|index| array.get(index))
            .cloned()
            .unwrap_or_else(Object::null)),
        (Object::Hash(hash), _) => {
            let hashed_index = object_to_key(index)?;
            Ok(hash
                .get(&hashed_index)
                .map(|pair| pair.value.clone())
                .unwrap_or_else(Object::null))
        }
        (left, _) => Err(EvaluationError::IndexNotSupported(left.object_type())),
    }
}

#[cfg(test)]
mod tests {
    use gc::Gc;
    use pretty_assertions::assert_eq;

    use crate::environment::Environment;
    use crate::object::{EvaluationError, Object};
    use coff_lang_core::lexer::Tokenizer;
    use coff_lang_core::parser::Parser;

    fn eval(input: &str) -> Result<Gc<Object>, EvaluationError> {
        let mut parser = Parser::new(Tokenizer::new(input));
        let ast = parser.parse_program();
        assert!(parser.errors().is_empty(), "{input}: {:?}", parser.errors());
        super::eval_program(&ast, &mut Environment::new())
    }

    fn test_evaluation(inputs: Vec<(&str, Result<Gc<Object>, EvaluationError>)>) {
        for (input, output) in inputs {
            assert_eq!(eval(input), output, "input: {input}");
        }
    }

    fn test_errors(inputs: Vec<(&str, &str)>) {
        for (input, message) in inputs {
            match eval(input) {
                Err(error) => assert_eq!(error.to_string(), message, "input: {input}"),
                Ok(object) => panic!("{input} evaluated to {object} instead of failing"),
            }
        }
    }

    #[test]
    fn test_literal() {
        let inputs = vec![
            ("5;", Ok(Object::integer(5))),
            ("true;", Ok(Object::boolean(true))),
            ("false;", Ok(Object::boolean(false))),
            ("\"hello\";", Ok(Object::string("hello".to_owned()))),
            ("", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_integer_arithmetic() {
        let inputs = vec![
            ("0", 0),
            ("-4", -4),
            ("--5", 5),
            ("5 + 5 + 5 + 5 - 10", 10),
            ("2 * 2 * 2 * 2 * 2", 32),
            ("-50 + 100 + -50", 0),
            ("5 * 2 + 10", 20),
            ("20 + 2 * -10", 0),
            ("50 / 2 * 2 + 10", 60),
            ("2 * (5 + 10)", 30),
            ("3 * (3 * 3) + 10", 37),
            ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
            ("7 / 2", 3),
            ("-7 / 2", -3),
            ("9223372036854775807 + 1", i64::MIN),
        ];

        test_evaluation(
            inputs
                .into_iter()
                .map(|(input, value)| (input, Ok(Object::integer(value))))
                .collect(),
        );
    }

    #[test]
    fn test_boolean_expressions() {
        let inputs = vec![
            ("1 < 2", true),
            ("1 > 2", false),
            ("1 == 1", true),
            ("1 != 1", false),
            ("true == true", true),
            ("false == false", true),
            ("true == false", false),
            ("true != false", true),
            ("(1 < 2) == true", true),
            ("(1 > 2) == true", false),
            ("1 == true", false),
            ("[1] == [1]", false),
            ("def a = [1]; a == a", true),
            ("!true", false),
            ("!false", true),
            ("!5", false),
            ("!0", false),
            ("!!true", true),
            ("!!5", true),
            ("!if (false) { 1 }", true),
        ];

        test_evaluation(
            inputs
                .into_iter()
                .map(|(input, value)| (input, Ok(Object::boolean(value))))
                .collect(),
        );
    }

    #[test]
    fn test_if_else_expressions() {
        let inputs = vec![
            ("if (true) { 10 }", Ok(Object::integer(10))),
            ("if (false) { 10 }", Ok(Object::null())),
            ("if (1) { 10 }", Ok(Object::integer(10))),
            ("if (0) { 10 } else { 20 }", Ok(Object::integer(10))),
            ("if (1 < 2) { 10 }", Ok(Object::integer(10))),
            ("if (1 > 2) { 10 }", Ok(Object::null())),
            ("if (1 > 2) { 10 } else { 20 }", Ok(Object::integer(20))),
            ("if (1 < 2) { 10 } else { 20 }", Ok(Object::integer(10))),
            ("if (1 < 2) { }", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_return_statements() {
        let inputs = vec![
            ("ret 10;", Ok(Object::integer(10))),
            ("ret 10; 9;", Ok(Object::integer(10))),
            ("ret 2 * 5; 9;", Ok(Object::integer(10))),
            ("9; ret 2 * 5; 9;", Ok(Object::integer(10))),
            ("ret;", Ok(Object::null())),
            (
                "if (10 > 1) { if (10 > 1) { ret 10; } ret 1; }",
                Ok(Object::integer(10)),
            ),
            (
                "def f = fun(x) { ret x; x + 10; }; f(10);",
                Ok(Object::integer(10)),
            ),
            (
                "def f = fun(x) { def result = x + 10; ret result; ret 10; }; f(10);",
                Ok(Object::integer(20)),
            ),
            ("def f = fun() { ret; 1 }; f()", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_error_handling() {
        let inputs = vec![
            ("5 + true;", "type mismatch: INT + BOOL"),
            ("5 + true; 5;", "type mismatch: INT + BOOL"),
            ("-true", "unknown operator: -BOOL"),
            ("true + false;", "unknown operator: BOOL + BOOL"),
            ("5; true + false; 5", "unknown operator: BOOL + BOOL"),
            ("if (10 > 1) { true + false; }", "unknown operator: BOOL + BOOL"),
            (
                "if (10 > 1) { if (10 > 1) { ret true + false; } ret 1; }",
                "unknown operator: BOOL + BOOL",
            ),
            ("foobar", "identifier not found: foobar"),
            ("\"Hello\" - \"World\"", "unknown operator: STR - STR"),
            ("\"a\" == \"a\"", "unknown operator: STR == STR"),
            ("\"a\" < 1", "type mismatch: STR < INT"),
            (
                "{\"name\": \"Coff\"}[fun(x) { x }];",
                "unusable as hash key: FUN",
            ),
            ("{[1]: 2}", "unusable as hash key: ARR"),
            ("5(1)", "not a function: INT"),
            ("fun(x) { x }(1, 2)", "wrong number of arguments. got=2, want=1"),
            ("1 / 0", "division by zero"),
            ("1[0]", "index operator not supported: INT"),
            ("[1][true]", "index operator not supported: ARR"),
            ("len(1, undefined)", "identifier not found: undefined"),
            ("def x = -true; 1", "unknown operator: -BOOL"),
            ("[1, 2 + true, 3]", "type mismatch: INT + BOOL"),
        ];

        test_errors(inputs);
    }

    #[test]
    fn test_def_statements() {
        let inputs = vec![
            ("def a = 5; a;", Ok(Object::integer(5))),
            ("def a = 5 * 5; a;", Ok(Object::integer(25))),
            ("def a = 5; def b = a; b;", Ok(Object::integer(5))),
            (
                "def a = 5; def b = a; def c = a + b + 5; c;",
                Ok(Object::integer(15)),
            ),
            ("def a = 5;", Ok(Object::integer(5))),
            ("def a = 1; def a = 2; a", Ok(Object::integer(2))),
            (
                "def x = 1; def f = fun() { def x = 2; x }; f() * 10 + x",
                Ok(Object::integer(21)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_function_object() {
        let function = eval("fun(x) { x + 2; };").unwrap();
        match &*function {
            Object::Function(function) => {
                assert_eq!(function.parameters.len(), 1);
                assert_eq!(&*function.parameters[0].name, "x");
                assert_eq!(function.body.to_string(), "{(x + 2);}");
            }
            other => panic!("expected a function, got {other:?}"),
        }
        assert_eq!(function.inspect(), "fun(x) {(x + 2);}");
    }

    #[test]
    fn test_function_application() {
        let inputs = vec![
            (
                "def identity = fun(x) { x }; identity(5)",
                Ok(Object::integer(5)),
            ),
            (
                "def identity = fun(x) { ret x }; identity(5)",
                Ok(Object::integer(5)),
            ),
            (
                "def double = fun(x) { x * 2 }; double(5)",
                Ok(Object::integer(10)),
            ),
            (
                "def add = fun(x, y) { x + y }; add(5, 5)",
                Ok(Object::integer(10)),
            ),
            (
                "def add = fun(x, y) { x + y }; add(5 + 5, add(5, 5))",
                Ok(Object::integer(20)),
            ),
            ("fun(x) { x }(5)", Ok(Object::integer(5))),
            ("fun() { }()", Ok(Object::null())),
            (
                "
                def factorial = fun(n) {
                    if (n < 2) { 1 }
                    else { factorial(n - 1) * n }
                };
                factorial(5)",
                Ok(Object::integer(120)),
            ),
            (
                "
                def func = fun(a) {
                    fun(b) {
                        a + b
                    }
                };
                func(5)(10)",
                Ok(Object::integer(15)),
            ),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_closure() {
        let inputs = vec![
            (
                "def newAdder = fun(x) { fun(y) { x + y } }; def addTwo = newAdder(2); addTwo(2);",
                Ok(Object::integer(4)),
            ),
            (
                r#"
            def fa = fun() {
                def x = 5;
                def fb = fun() {
                    x
                };
                fb
            };
            def temp = fa();
            temp()"#,
                Ok(Object::integer(5)),
            ),
            (
                r#"
            def fa = fun() {
                def x = 5;
                def fb = fun() {
                    fun() { x }
                };
                fb
            };
            def temp = fa();
            def temp_ = temp();
            temp_()"#,
                Ok(Object::integer(5)),
            ),
            (
                r#"
            def fa = fun() {
                def is_even = fun(x) {
                    if (x == 0) {
                        true
                    } else {
                        is_odd(x - 1)
                    }
                };
                def is_odd = fun(x) {
                    if (x == 0) {
                        false
                    } else {
                        is_even(x - 1)
                    }
                };
                is_even
            };
            def temp = fa();
            temp(3);"#,
                Ok(Object::boolean(false)),
            ),
            (
                "def addOne = fun(x) { x + 1 }; def twice = fun(f, x) { f(f(x)) }; twice(addOne, 1)",
                Ok(Object::integer(3)),
            ),
        ];

        test_evaluation(inputs)
    }

    #[test]
    fn test_calls_get_fresh_bindings() {
        let input = r#"
        def counter = fun(start) { fun() { start } };
        def a = counter(1);
        def b = counter(2);
        a() * 10 + b()"#;

        assert_eq!(eval(input), Ok(Object::integer(12)));
    }

    #[test]
    fn test_environment_is_kept_across_programs() {
        let mut env = Environment::new();
        let mut run = |input: &str| {
            let mut parser = Parser::new(Tokenizer::new(input));
            let program = parser.parse_program();
            super::eval_program(&program, &mut env)
        };

        assert_eq!(run("def x = 3;"), Ok(Object::integer(3)));
        assert!(run("def sq = fun(v) { v * v };").is_ok());
        assert_eq!(run("sq(x)"), Ok(Object::integer(9)));
        assert_eq!(
            run("y").map_err(|error| error.to_string()),
            Err("identifier not found: y".to_owned())
        );
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_string_concatenation() {
        let inputs = vec![
            (
                "\"Hello\" + \" \" + \"World!\"",
                Ok(Object::string("Hello World!".to_owned())),
            ),
            ("len(\"four\" + \"\")", Ok(Object::integer(4))),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_builtin_functions() {
        let inputs = vec![
            ("len(\"\")", Ok(Object::integer(0))),
            ("len(\"hello world\")", Ok(Object::integer(11))),
            ("len([1, 2, 3])", Ok(Object::integer(3))),
            ("first([1, 2, 3])", Ok(Object::integer(1))),
            ("first([])", Ok(Object::null())),
            ("last([1, 2, 3])", Ok(Object::integer(3))),
            ("rest([1, 2, 3])", Ok(Object::array(vec![Object::integer(2), Object::integer(3)]))),
            ("rest([])", Ok(Object::null())),
            ("push([], 1)", Ok(Object::array(vec![Object::integer(1)]))),
            ("def a = []; def b = push(a, 1); len(a)", Ok(Object::integer(0))),
            ("print(1, \"two\")", Ok(Object::null())),
            ("def len = fun(x) { 42 }; len(\"abc\")", Ok(Object::integer(42))),
        ];

        test_evaluation(inputs);

        test_errors(vec![
            ("len(1)", "argument to `len` not supported, got INT"),
            ("len(\"one\", \"two\")", "wrong number of arguments. got=2, want=1"),
            ("push(1, 1)", "argument to `push` not supported, got INT"),
        ]);
    }

    #[test]
    fn test_array_literals_and_index() {
        let inputs = vec![
            (
                "[1, 2 * 2, 3 + 3]",
                Ok(Object::array(vec![
                    Object::integer(1),
                    Object::integer(4),
                    Object::integer(6),
                ])),
            ),
            ("[1, 2, 3][0]", Ok(Object::integer(1))),
            ("[1, 2, 3][1]", Ok(Object::integer(2))),
            ("def i = 0; [1][i];", Ok(Object::integer(1))),
            ("[1, 2, 3][1 + 1];", Ok(Object::integer(3))),
            (
                "def myArray = [1, 2, 3]; myArray[0] + myArray[1] + myArray[2];",
                Ok(Object::integer(6)),
            ),
            ("[1, 2][5]", Ok(Object::null())),
            ("[1, 2, 3][-1]", Ok(Object::null())),
        ];

        test_evaluation(inputs);
    }

    #[test]
    fn test_hash_literals_and_index() {
        let inputs = vec![
            ("{\"foo\": 5}[\"foo\"]", Ok(Object::integer(5))),
            ("{\"foo\": 5}[\"bar\"]", Ok(Object::null())),
            ("def key = \"foo\"; {\"foo\": 5}[key]", Ok(Object::integer(5))),
            ("{}[\"foo\"]", Ok(Object::null())),
            ("{5: 5}[5]", Ok(Object::integer(5))),
            ("{true: 5}[true]", Ok(Object::integer(5))),
            ("{false: 5}[false]", Ok(Object::integer(5))),
            ("{\"a\" + \"b\": 1}[\"ab\"]", Ok(Object::integer(1))),
            ("{1: 1, 1: 2}[1]", Ok(Object::integer(2))),
            ("len([{1: 2}[1], {}[0]])", Ok(Object::integer(2))),
        ];

        test_evaluation(inputs);

        let hash = eval("def two = \"two\"; {\"one\": 10 - 9, two: 1 + 1, 4: 4, true: 5}").unwrap();
        match &*hash {
            Object::Hash(pairs) => {
                assert_eq!(pairs.len(), 4);
                for (key, value) in [
                    (Object::string("one".to_owned()), 1),
                    (Object::string("two".to_owned()), 2),
                    (Object::integer(4), 4),
                    (Object::boolean(true), 5),
                ] {
                    let pair = &pairs[&key.hash_key().unwrap()];
                    assert_eq!(pair.key, key);
                    assert_eq!(pair.value, Object::integer(value));
                }
            }
            other => panic!("expected a hash, got {other:?}"),
        }
    }

    #[test]
    fn test_recursive_closure_is_collected() {
        let input = r#"
        def loop = fun(n) { if (n == 0) { 0 } else { loop(n - 1) } };
        loop(100)"#;

        assert_eq!(eval(input), Ok(Object::integer(0)));
        gc::force_collect();
        assert_eq!(eval(input), Ok(Object::integer(0)));
    }
}
