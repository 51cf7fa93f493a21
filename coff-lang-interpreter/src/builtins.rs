use gc::Gc;

use crate::object::{Builtin, EvaluationError, Object};

fn check_argument_count(expected: usize, args: &[Gc<Object>]) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(EvaluationError::WrongArgumentCount {
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn unsupported(function: &'static str, argument: &Gc<Object>) -> EvaluationError {
    EvaluationError::UnsupportedArgument {
        function,
        actual: argument.object_type(),
    }
}

fn builtin_len(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    match &*args[0] {
        Object::String(s) => Ok(Object::integer(s.len() as i64)),
        Object::Array(arr) => Ok(Object::integer(arr.len() as i64)),
        _ => Err(unsupported("len", &args[0])),
    }
}

fn builtin_first(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    match &*args[0] {
        Object::Array(arr) => Ok(arr.first().cloned().unwrap_or_else(Object::null)),
        _ => Err(unsupported("first", &args[0])),
    }
}

fn builtin_last(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    match &*args[0] {
        Object::Array(arr) => Ok(arr.last().cloned().unwrap_or_else(Object::null)),
        _ => Err(unsupported("last", &args[0])),
    }
}

fn builtin_rest(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_argument_count(1, &args)?;
    match &*args[0] {
        Object::Array(arr) if arr.is_empty() => Ok(Object::null()),
        Object::Array(arr) => Ok(Object::array(arr[1..].to_vec())),
        _ => Err(unsupported("rest", &args[0])),
    }
}

fn builtin_push(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    check_argument_count(2, &args)?;
    match &*args[0] {
        Object::Array(arr) => {
            let mut new_arr = arr.clone();
            new_arr.push(args[1].clone());
            Ok(Object::array(new_arr))
        }
        _ => Err(unsupported("push", &args[0])),
    }
}

fn builtin_print(args: Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError> {
    for arg in &args {
        println!("{}", arg.inspect());
    }
    Ok(Object::null())
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
    Builtin {
        name: "print",
        func: builtin_print,
    },
];

/// Native functions, consulted when a name is not bound in any scope.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name).copied()
}
