use crate::object::Object;
use gc::{Finalize, Gc, GcCell, Trace};
use std::collections::HashMap;

#[derive(Trace, Finalize)]
struct EnvironmentCore {
    store: HashMap<String, Gc<Object>>,
    outer: Option<Environment>,
}

/// Shared handle to one scope of bindings.
///
/// Cloning the handle shares the scope. Scopes captured by closures live on
/// the garbage collected heap, so a function bound inside the scope it
/// captures does not keep that scope alive forever.
#[derive(Clone, Trace, Finalize)]
pub struct Environment {
    environment: Gc<GcCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: Environment) -> Environment {
        Environment {
            environment: Gc::new(GcCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer),
            })),
        }
    }

    /// Looks `key` up in this scope, then in the enclosing ones.
    pub fn get(&self, key: &str) -> Option<Gc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    /// Binds `key` in this scope only, shadowing any outer binding.
    pub fn set(&mut self, key: &str, value: Gc<Object>) {
        self.environment
            .borrow_mut()
            .store
            .insert(key.to_owned(), value);
    }

    pub fn outer(&self) -> Option<Environment> {
        self.environment.borrow().outer.clone()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.environment.borrow().store.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Environment {
    fn eq(&self, other: &Self) -> bool {
        Gc::ptr_eq(&self.environment, &other.environment)
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env = self.environment.borrow();
        let mut names = env.store.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosed", &env.outer.is_some())
            .finish()
    }
}
