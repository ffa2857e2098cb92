use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionData;
use crate::token::{Token, Type};
use crate::value::{Callable, Value};

/// A function or method value. Holds the declaring AST node, the
/// environment frame that was active when it was declared (its closure,
/// *not* the frame at call time), and whether it is the method named
/// `init`.
#[derive(Debug)]
pub struct UserFunction {
    pub declaration: Rc<FunctionData>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl UserFunction {
    pub fn new(declaration: Rc<FunctionData>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        UserFunction { declaration, closure, is_initializer }
    }

    /// Produces a fresh function sharing this one's declaration but with a
    /// new closure that has `this` bound to `instance`. Used whenever a
    /// method is fetched off an instance.
    pub fn bind(&self, instance: Value) -> UserFunction {
        let env = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));
        env.borrow_mut().define("this", instance);
        UserFunction::new(Rc::clone(&self.declaration), env, self.is_initializer)
    }
}

impl Callable for UserFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        let env = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.closure)))));

        for (param, arg) in self.declaration.params.iter().zip(arguments) {
            env.borrow_mut().define(&param.lexeme, arg);
        }

        let flow = interpreter.execute_block(&self.declaration.body, env)?;

        if self.is_initializer {
            return self.closure.borrow().get_at(0, &Token::from("this"));
        }

        match flow {
            Flow::Return(value) => Ok(value),
            Flow::Next => Ok(Value::Nil),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

impl fmt::Display for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A function implemented in the host language rather than Lox.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Token,
    pub function: fn(&mut Interpreter, Vec<Value>) -> Result<Value, RuntimeError>,
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        0
    }
}

impl NativeFunction {
    pub fn get_globals() -> Vec<NativeFunction> {
        vec![
            NativeFunction {
                name: Token::new(Type::Identifier, "clock".to_owned(), None, 0),
                function: |_, _| {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap()
                        .as_secs_f64();
                    Ok(Value::Number(now))
                },
            },
        ]
    }
}

impl fmt::Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name.lexeme)
    }
}
