use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::expr::{Expr, ExprId, ExprKind, LiteralValue};
use crate::function::{NativeFunction, UserFunction};
use crate::stmt::Stmt;
use crate::token::Type;
use crate::value::{Callable, Value};

/// What a statement did besides evaluate side effects: either fall through
/// to the next statement, or unwind with a value because of `return`.
/// Replaces exception-style unwinding with an explicit result the caller
/// has to handle.
pub enum Flow {
    Next,
    Return(Value),
}

type ExecResult = Result<Flow, RuntimeError>;
type EvalResult = Result<Value, RuntimeError>;

pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            globals.borrow_mut().define(&native.name.lexeme.clone(), Value::NativeFunction(Rc::new(native)));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Records how many scopes out `expr`'s binding lives, as computed by the resolver.
    pub fn resolve(&mut self, expr: &Expr, depth: usize) {
        self.locals.insert(expr.id, depth);
    }

    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                error.throw();
                return;
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        match stmt {
            Stmt::Expression(data) => {
                self.evaluate(&data.expr)?;
                Ok(Flow::Next)
            },
            Stmt::Print(data) => {
                let value = self.evaluate(&data.expr)?;
                println!("{value}");
                Ok(Flow::Next)
            },
            Stmt::Var(data) => {
                let value = match &data.initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment.borrow_mut().define(&data.name.lexeme, value);
                Ok(Flow::Next)
            },
            Stmt::Block(data) => {
                let enclosing = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
                self.execute_block(&data.statements, enclosing)
            },
            Stmt::If(data) => {
                if self.evaluate(&data.condition)?.is_truthy() {
                    self.execute(&data.then_branch)
                } else if let Some(else_branch) = &data.else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Next)
                }
            },
            Stmt::While(data) => {
                while self.evaluate(&data.condition)?.is_truthy() {
                    match self.execute(&data.body)? {
                        Flow::Next => (),
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Next)
            },
            Stmt::Function(data) => {
                let declaration = Rc::new(data.clone());
                let function = UserFunction::new(declaration, Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&data.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Flow::Next)
            },
            Stmt::Return(data) => {
                let value = match &data.value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Stmt::Class(data) => {
                self.environment.borrow_mut().define(&data.name.lexeme, Value::Nil);

                let mut methods = HashMap::new();
                for method in &data.methods {
                    if let Stmt::Function(function) = method {
                        let declaration = Rc::new(function.clone());
                        let is_initializer = function.name.lexeme == "init";
                        let user_function = UserFunction::new(declaration, Rc::clone(&self.environment), is_initializer);
                        methods.insert(function.name.lexeme.clone(), Rc::new(user_function));
                    } else {
                        unreachable!("class body to contain only methods");
                    }
                }

                let class = Class::new(data.name.lexeme.clone(), methods);
                self.environment.borrow_mut().assign(&data.name, Value::Class(Rc::new(class)))?;
                Ok(Flow::Next)
            },
        }
    }

    /// Runs `statements` with `environment` as the active scope, always
    /// restoring the caller's scope afterward even if execution errors out
    /// or unwinds via `return`.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(Flow::Next);
        for statement in statements {
            match self.execute(statement) {
                Ok(Flow::Next) => continue,
                other => {
                    result = other;
                    break;
                },
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(match literal {
                LiteralValue::Nil => Value::Nil,
                LiteralValue::Bool(b) => Value::Bool(*b),
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::String(s) => Value::String(s.clone()),
            }),
            ExprKind::Grouping(data) => self.evaluate(&data.expr),
            ExprKind::Variable(data) => self.lookup_variable(expr, &data.name),
            ExprKind::This(data) => self.lookup_variable(expr, &data.keyword),
            ExprKind::Assign(data) => {
                let value = self.evaluate(&data.value)?;

                match self.locals.get(&expr.id) {
                    Some(&distance) => self.environment.borrow_mut().assign_at(distance, &data.name, value.clone())?,
                    None => self.globals.borrow_mut().assign(&data.name, value.clone())?,
                }

                Ok(value)
            },
            ExprKind::Unary(data) => {
                let right = self.evaluate(&data.expr)?;

                match data.operator.r#type {
                    Type::Minus => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError {
                            token: data.operator.clone(),
                            message: "Operand must be a number.".to_string(),
                        }),
                    },
                    Type::Bang => Ok(Value::Bool(!right.is_truthy())),
                    _ => unreachable!("unary operator to be '!' or '-'"),
                }
            },
            ExprKind::Logical(data) => {
                let left = self.evaluate(&data.left)?;

                match data.operator.r#type {
                    Type::Or if left.is_truthy() => Ok(left),
                    Type::Or => self.evaluate(&data.right),
                    Type::And if !left.is_truthy() => Ok(left),
                    Type::And => self.evaluate(&data.right),
                    _ => unreachable!("logical operator to be 'and' or 'or'"),
                }
            },
            ExprKind::Binary(data) => {
                let left = self.evaluate(&data.left)?;
                let right = self.evaluate(&data.right)?;
                let operator = &data.operator;

                match operator.r#type {
                    Type::Plus => match (left, right) {
                        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
                        (Value::String(l), Value::String(r)) => Ok(Value::String(l + &r)),
                        _ => Err(RuntimeError {
                            token: operator.clone(),
                            message: "Operands must be two numbers or two strings.".to_string(),
                        }),
                    },
                    Type::Minus => self.numeric(operator, left, right, |l, r| Value::Number(l - r)),
                    Type::Slash => self.numeric(operator, left, right, |l, r| Value::Number(l / r)),
                    Type::Star => self.numeric(operator, left, right, |l, r| Value::Number(l * r)),
                    Type::Greater => self.numeric(operator, left, right, |l, r| Value::Bool(l > r)),
                    Type::GreaterEqual => self.numeric(operator, left, right, |l, r| Value::Bool(l >= r)),
                    Type::Less => self.numeric(operator, left, right, |l, r| Value::Bool(l < r)),
                    Type::LessEqual => self.numeric(operator, left, right, |l, r| Value::Bool(l <= r)),
                    Type::EqualEqual => Ok(Value::Bool(left == right)),
                    Type::BangEqual => Ok(Value::Bool(left != right)),
                    _ => unreachable!("binary operator to be a recognized arithmetic or comparison token"),
                }
            },
            ExprKind::Call(data) => {
                let callee = self.evaluate(&data.callee)?;

                let mut arguments = Vec::with_capacity(data.arguments.len());
                for argument in &data.arguments {
                    arguments.push(self.evaluate(argument)?);
                }

                self.call(callee, arguments, &data.paren)
            },
            ExprKind::Get(data) => {
                let object = self.evaluate(&data.object)?;

                match object {
                    Value::Instance(instance) => crate::class::Instance::get(&instance, &data.name),
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have properties.".to_string(),
                    }),
                }
            },
            ExprKind::Set(data) => {
                let object = self.evaluate(&data.object)?;

                match object {
                    Value::Instance(instance) => {
                        let value = self.evaluate(&data.value)?;
                        instance.set(&data.name, value.clone());
                        Ok(value)
                    },
                    _ => Err(RuntimeError {
                        token: data.name.clone(),
                        message: "Only instances have fields.".to_string(),
                    }),
                }
            },
        }
    }

    fn numeric(&self, operator: &crate::token::Token, left: Value, right: Value, op: impl Fn(f64, f64) -> Value) -> EvalResult {
        match (left, right) {
            (Value::Number(l), Value::Number(r)) => Ok(op(l, r)),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
        }
    }

    fn lookup_variable(&mut self, expr: &Expr, name: &crate::token::Token) -> EvalResult {
        match self.locals.get(&expr.id) {
            Some(&distance) => self.environment.borrow().get_at(distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn call(&mut self, callee: Value, arguments: Vec<Value>, paren: &crate::token::Token) -> EvalResult {
        fn check_arity(paren: &crate::token::Token, arity: usize, got: usize) -> Result<(), RuntimeError> {
            if got != arity {
                return Err(RuntimeError {
                    token: paren.clone(),
                    message: format!("Expected {arity} arguments but got {got}."),
                });
            }
            Ok(())
        }

        match callee {
            Value::Function(function) => {
                check_arity(paren, function.arity(), arguments.len())?;
                function.call(self, arguments)
            },
            Value::NativeFunction(function) => {
                check_arity(paren, function.arity(), arguments.len())?;
                function.call(self, arguments)
            },
            Value::Class(class) => {
                check_arity(paren, class.arity(), arguments.len())?;
                class.call(self, arguments)
            },
            _ => Err(RuntimeError {
                token: paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
