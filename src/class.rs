use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::UserFunction;
use crate::interpreter::Interpreter;
use crate::token::Token;
use crate::value::{Callable, Value};

#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub methods: HashMap<String, Rc<UserFunction>>,
}

impl Class {
    pub fn new(name: String, methods: HashMap<String, Rc<UserFunction>>) -> Self {
        Class { name, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<UserFunction>> {
        self.methods.get(name).cloned()
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Calling a class constructs an instance and, if present, runs `init` on
/// it. Implemented on `Rc<Class>` rather than `Class` itself so the call
/// can hand the new instance a shared reference to its own class.
impl Callable for Rc<Class> {
    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let instance = Rc::new(Instance::new(Rc::clone(self)));

        if let Some(initializer) = self.find_method("init") {
            let bound = initializer.bind(Value::Instance(Rc::clone(&instance)));
            bound.call(interpreter, arguments)?;
        }

        Ok(Value::Instance(instance))
    }
}

#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    fields: RefCell<HashMap<String, Value>>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance { class, fields: RefCell::new(HashMap::new()) }
    }

    /// Looks up `name` as a field first, then as a bound method.
    pub fn get(this: &Rc<Instance>, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = this.fields.borrow().get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = this.class.find_method(&name.lexeme) {
            let bound = method.bind(Value::Instance(Rc::clone(this)));
            return Ok(Value::Function(Rc::new(bound)));
        }

        Err(RuntimeError {
            token: name.clone(),
            message: format!("Undefined property '{}'.", name.lexeme),
        })
    }

    pub fn set(&self, name: &Token, value: Value) {
        self.fields.borrow_mut().insert(name.lexeme.clone(), value);
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}
