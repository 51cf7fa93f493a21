use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use coff_lang_core::ast;
use gc::{Finalize, Gc, Trace};
use thiserror::Error;

use crate::environment::Environment;

/// Runtime value.
///
/// Values are handed around as `Gc<Object>`. `true`, `false` and `null` are
/// interned per thread: [`Object::boolean`] and [`Object::null`] always return
/// the same allocation, so identity comparison (`Gc::ptr_eq`) is value
/// comparison for those three. The language's `==` relies on this.
///
/// The derived `PartialEq` is structural and only meant for host-side
/// comparisons.
#[derive(Debug, PartialEq, Trace, Finalize)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Gc<Object>>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(#[unsafe_ignore_trace] Builtin),
    Null,
}

thread_local! {
    static NULL: Gc<Object> = Gc::new(Object::Null);
    static TRUE: Gc<Object> = Gc::new(Object::Boolean(true));
    static FALSE: Gc<Object> = Gc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Gc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Gc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn integer(value: i64) -> Gc<Object> {
        Gc::new(Object::Integer(value))
    }
    pub fn string(value: String) -> Gc<Object> {
        Gc::new(Object::String(value))
    }
    pub fn array(array: Vec<Gc<Object>>) -> Gc<Object> {
        Gc::new(Object::Array(array))
    }
    pub fn hash(hash: HashMap<HashKey, HashPair>) -> Gc<Object> {
        Gc::new(Object::Hash(hash))
    }
    pub fn function(
        parameters: Vec<ast::Identifier>,
        body: ast::BlockStatement,
        environment: Environment,
    ) -> Gc<Object> {
        Gc::new(Object::Function(Function {
            parameters,
            body,
            environment,
        }))
    }
    pub fn builtin(builtin: Builtin) -> Gc<Object> {
        Gc::new(Object::Builtin(builtin))
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Null => ObjectType::Null,
        }
    }

    /// `null` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// Only integers, booleans and strings can key a hash.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => u64::from(*value),
            Object::String(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                hasher.finish()
            }
            _ => return None,
        };
        Some(HashKey {
            kind: self.object_type(),
            value,
        })
    }

    /// Human readable rendering, as shown by the REPL and `print`.
    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(array) => {
                write!(f, "[")?;
                for (i, element) in array.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Object::Hash(hash) => {
                write!(f, "{{")?;
                for (i, pair) in hash.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
            Object::Function(function) => write!(
                f,
                "fun({}) {}",
                function
                    .parameters
                    .iter()
                    .map(|id| id.name.as_ref())
                    .collect::<Vec<_>>()
                    .join(", "),
                function.body
            ),
            Object::Builtin(_) => write!(f, "builtin function"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    Array,
    Hash,
    Function,
    Builtin,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Integer => "INT",
            ObjectType::Boolean => "BOOL",
            ObjectType::String => "STR",
            ObjectType::Null => "NULL",
            ObjectType::Array => "ARR",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUN",
            ObjectType::Builtin => "STD",
        };
        f.write_str(name)
    }
}

/// Content-derived identity of a hashable object: equal source values give
/// equal keys regardless of which allocation they came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct HashKey {
    pub kind: ObjectType,
    pub value: u64,
}

impl Finalize for HashKey {}
unsafe impl Trace for HashKey {
    gc::unsafe_empty_trace!();
}

/// A hash entry keeps the original key object for rendering.
#[derive(Debug, PartialEq, Trace, Finalize)]
pub struct HashPair {
    pub key: Gc<Object>,
    pub value: Gc<Object>,
}

#[derive(Trace, Finalize)]
pub struct Function {
    #[unsafe_ignore_trace]
    pub parameters: Vec<ast::Identifier>,
    #[unsafe_ignore_trace]
    pub body: ast::BlockStatement,
    pub environment: Environment,
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && self.environment == other.environment
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("ptr", &(self as *const Function as usize))
            .finish()
    }
}

pub type BuiltinFunction = fn(Vec<Gc<Object>>) -> Result<Gc<Object>, EvaluationError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin").field("name", &self.name).finish()
    }
}

/// Everything that stops a statement sequence early.
///
/// `Return` is unwrapped at the nearest function call (or at program level),
/// `Error` travels all the way up.
#[derive(Debug, PartialEq)]
pub enum QuickReturn {
    Return(Gc<Object>),
    Error(EvaluationError),
}

impl From<EvaluationError> for QuickReturn {
    fn from(error: EvaluationError) -> Self {
        QuickReturn::Error(error)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EvaluationError {
    #[error("type mismatch: {left} {operation} {right}")]
    TypeMismatch {
        left: ObjectType,
        right: ObjectType,
        operation: ast::InfixOperationKind,
    },
    #[error("unknown operator: {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        right: ObjectType,
        operation: ast::InfixOperationKind,
    },
    #[error("unknown operator: {operation}{right}")]
    UnknownPrefixOperator {
        right: ObjectType,
        operation: ast::PrefixOperationKind,
    },
    #[error("identifier not found: {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("not a function: {0}")]
    CallNonFunction(ObjectType),
    #[error("wrong number of arguments. got={actual}, want={expected}")]
    WrongArgumentCount { expected: usize, actual: usize },
    #[error("argument to `{function}` not supported, got {actual}")]
    UnsupportedArgument {
        function: &'static str,
        actual: ObjectType,
    },
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    #[error("unusable as hash key: {0}")]
    InvalidHashKey(ObjectType),
    #[error("division by zero")]
    DivisionByZero,
}

pub fn object_to_key(object: &Gc<Object>) -> Result<HashKey, EvaluationError> {
    object
        .hash_key()
        .ok_or_else(|| EvaluationError::InvalidHashKey(object.object_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_interned_singletons() {
        assert!(Gc::ptr_eq(&Object::boolean(true), &Object::boolean(true)));
        assert!(Gc::ptr_eq(&Object::boolean(false), &Object::boolean(false)));
        assert!(Gc::ptr_eq(&Object::null(), &Object::null()));
        assert!(!Gc::ptr_eq(&Object::boolean(true), &Object::boolean(false)));
        assert!(!Gc::ptr_eq(&Object::integer(1), &Object::integer(1)));
    }

    #[test]
    fn test_hash_keys() {
        let hello1 = Object::string("Hello World".to_owned());
        let hello2 = Object::string("Hello World".to_owned());
        let diff = Object::string("My name is johnny".to_owned());

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff.hash_key());
        assert_eq!(Object::integer(1).hash_key(), Object::integer(1).hash_key());
        assert_ne!(Object::integer(1).hash_key(), Object::boolean(true).hash_key());
        assert_eq!(Object::null().hash_key(), None);
        assert_eq!(
            object_to_key(&Object::array(vec![])),
            Err(EvaluationError::InvalidHashKey(ObjectType::Array))
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!Object::null().is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(Object::integer(0).is_truthy());
        assert!(Object::string(String::new()).is_truthy());
    }

    #[test]
    fn test_inspect() {
        let array = Object::array(vec![
            Object::integer(1),
            Object::string("two".to_owned()),
            Object::null(),
        ]);
        assert_eq!(array.inspect(), "[1, two, null]");

        let key = Object::boolean(true);
        let mut hash = HashMap::new();
        hash.insert(
            key.hash_key().unwrap(),
            HashPair {
                key,
                value: Object::integer(-3),
            },
        );
        assert_eq!(Object::hash(hash).inspect(), "{true: -3}");
        assert_eq!(
            EvaluationError::TypeMismatch {
                left: ObjectType::Integer,
                right: ObjectType::Boolean,
                operation: ast::InfixOperationKind::Plus,
            }
            .to_string(),
            "type mismatch: INT + BOOL"
        );
    }
}
