use std::mem;
use std::collections::HashMap;

use crate::error::{Error, ResolveError};
use crate::expr::{Expr, ExprKind};
use crate::stmt::Stmt;
use crate::interpreter::Interpreter;
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
}

/// Walks the AST once after parsing to compute, for every variable
/// reference, how many scopes out its declaration lives. The interpreter
/// consults this table instead of walking the environment chain at
/// runtime, so shadowing inside closures resolves the way it was written
/// rather than the way it happens to run.
pub struct Resolver<'a> {
    interpreter: &'a mut Interpreter,
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
}

impl<'a> Resolver<'a> {
    pub fn new(interpreter: &'a mut Interpreter) -> Self {
        Resolver {
            interpreter,
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement)
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(data) => self.resolve_expr(&data.expr),
            Stmt::Print(data) => self.resolve_expr(&data.expr),
            Stmt::Var(data) => {
                self.declare(&data.name);
                if let Some(initializer) = &data.initializer {
                    self.resolve_expr(initializer);
                }
                self.define(&data.name);
            },
            Stmt::Block(data) => {
                self.begin_scope();
                self.resolve(&data.statements);
                self.end_scope();
            },
            Stmt::If(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.then_branch);
                if let Some(else_branch) = &data.else_branch {
                    self.resolve_stmt(else_branch);
                }
            },
            Stmt::While(data) => {
                self.resolve_expr(&data.condition);
                self.resolve_stmt(&data.body);
            },
            Stmt::Function(data) => {
                self.declare(&data.name);
                self.define(&data.name);
                self.resolve_function(&data.params, &data.body, FunctionType::Function);
            },
            Stmt::Return(data) => {
                if let FunctionType::None = self.current_function {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't return from top-level code.".to_string(),
                    }.throw();
                }

                if let Some(value) = &data.value {
                    if let FunctionType::Initializer = self.current_function {
                        ResolveError {
                            token: data.keyword.clone(),
                            message: "Can't return a value from an initializer.".to_string(),
                        }.throw();
                    } else {
                        self.resolve_expr(value);
                    }
                }
            },
            Stmt::Class(data) => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(&data.name);
                self.define(&data.name);

                self.begin_scope();
                self.scopes
                    .last_mut()
                    .expect("stack to be not empty")
                    .insert("this".to_string(), true);

                for method in &data.methods {
                    if let Stmt::Function(function) = method {
                        let declaration = if function.name.lexeme == "init" {
                            FunctionType::Initializer
                        } else {
                            FunctionType::Method
                        };
                        self.resolve_function(&function.params, &function.body, declaration);
                    } else {
                        unreachable!("class body to contain only methods");
                    }
                }

                self.end_scope();

                self.current_class = enclosing_class;
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(_) => (),
            ExprKind::Variable(data) => {
                if let Some(scope) = self.scopes.last() {
                    if let Some(false) = scope.get(&data.name.lexeme) {
                        ResolveError {
                            token: data.name.clone(),
                            message: "Can't read local variable in its own initializer.".to_string(),
                        }.throw();
                    }
                }

                self.resolve_local(expr, &data.name);
            },
            ExprKind::Assign(data) => {
                self.resolve_expr(&data.value);
                self.resolve_local(expr, &data.name);
            },
            ExprKind::Unary(data) => self.resolve_expr(&data.expr),
            ExprKind::Binary(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },
            ExprKind::Logical(data) => {
                self.resolve_expr(&data.left);
                self.resolve_expr(&data.right);
            },
            ExprKind::Grouping(data) => self.resolve_expr(&data.expr),
            ExprKind::Call(data) => {
                self.resolve_expr(&data.callee);
                for argument in &data.arguments {
                    self.resolve_expr(argument);
                }
            },
            ExprKind::Get(data) => self.resolve_expr(&data.object),
            ExprKind::Set(data) => {
                self.resolve_expr(&data.value);
                self.resolve_expr(&data.object);
            },
            ExprKind::This(data) => {
                if let ClassType::None = self.current_class {
                    ResolveError {
                        token: data.keyword.clone(),
                        message: "Can't use 'this' outside of a class.".to_string(),
                    }.throw();
                    return;
                }

                self.resolve_local(expr, &data.keyword);
            },
        }
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        self.resolve(body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        let scope = self.scopes.last_mut().expect("stack to be not empty");
        if scope.contains_key(&name.lexeme) {
            ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            }.throw();
        }
        scope.insert(name.lexeme.to_owned(), false);
    }

    fn define(&mut self, name: &Token) {
        if self.scopes.is_empty() {
            return;
        }

        self.scopes
            .last_mut()
            .expect("stack to be not empty")
            .insert(name.lexeme.to_owned(), true);
    }

    fn resolve_local(&mut self, expr: &Expr, name: &Token) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.interpreter.resolve(expr, i);
                return;
            }
        }
    }
}
