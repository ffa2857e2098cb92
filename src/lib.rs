#![allow(clippy::needless_return)]

//! Lox is a dynamically typed, lexically scoped scripting language with
//! first-class functions and classes. This crate implements it as a
//! tree-walking interpreter with a hand-written recursive descent parser,
//! following the design described in Bob Nystrom's
//! [Crafting Interpreters](https://craftinginterpreters.com/).
//!
//! ## Scanning
//! The first step is scanning: converting a string of characters into a
//! list of tokens. For example, `1 + 2` becomes:
//! ```text
//! [Number(1), Plus, Number(2)]
//! ```
//! The scanner is implemented in the [`scanner`](scanner) module as an
//! iterator over the characters in the source. It reports syntax errors as
//! a [`ScanError`](error::ScanError) — unterminated strings, stray
//! characters — and keeps scanning past one so several can be reported at
//! once.
//!
//! ## Parsing
//! The parser, in the [`parser`](parser) module, is a recursive descent
//! parser that turns the token list into an abstract syntax tree.
//! [`Expressions`](expr::Expr) produce a [`Value`](value::Value) when
//! evaluated; [`statements`](stmt::Stmt) run for their side effects. The
//! parser reports syntax errors as a [`ParseError`](error::ParseError) and
//! resynchronizes at statement boundaries so it can keep parsing after one.
//!
//! ## Resolving
//! Resolving is a static pre-pass over the AST, implemented in the
//! [`resolver`](resolver) module, that determines how many scopes out each
//! variable reference's declaration lives. This lets closures and shadowed
//! locals resolve according to where they're written rather than how the
//! environment chain happens to look at call time. The resolver reports
//! [`ResolveError`](error::ResolveError)s for things that are syntactically
//! fine but not allowed, like reading a local in its own initializer.
//!
//! ## Interpreting
//! The [`interpreter`](interpreter) module walks the resolved AST and
//! evaluates it directly, using the scope distances the resolver computed
//! to look variables up in the environment chain managed by
//! [`environment`](environment). Runtime type errors surface as a
//! [`RuntimeError`](error::RuntimeError).

use std::{fs, process};

use home::home_dir;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub mod class;
pub mod environment;
pub mod error;
pub mod expr;
pub mod function;
pub mod interpreter;
pub mod literal;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;

use parser::Parser;
use resolver::Resolver;
use scanner::Scanner;

/// The entry point for running Lox source, either from a file or a REPL.
/// Owns the interpreter so that variables defined at the top level of a
/// REPL session persist across lines.
pub struct Lox {
    interpreter: interpreter::Interpreter,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: interpreter::Interpreter::new(),
        }
    }

    pub fn run_file(&mut self, path: String) {
        let contents = fs::read_to_string(path)
            .expect("Should have been able to read the file");

        self.run(contents);

        if error::did_error() {
            process::exit(65);
        }
        if error::did_runtime_error() {
            process::exit(70);
        }
    }

    pub fn run_prompt(&mut self) {
        let mut editor = DefaultEditor::new().expect("readline editor to initialize");
        let history_path = home_dir().map(|home| home.join(".lox_history"));

        if let Some(path) = &history_path {
            let _ = editor.load_history(path);
        }

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    self.run(line);
                    error::reset_error();
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(error) => {
                    eprintln!("Error reading input: {error}");
                    break;
                },
            }
        }

        if let Some(path) = &history_path {
            let _ = editor.save_history(path);
        }
    }

    fn run(&mut self, source: String) {
        let mut scanner = Scanner::new(&source);
        let tokens = scanner.scan_tokens();

        if error::did_error() {
            return;
        }

        let mut parser = Parser::new(tokens);
        let statements = parser.parse();

        if error::did_error() {
            return;
        }

        let mut resolver = Resolver::new(&mut self.interpreter);
        resolver.resolve(&statements);

        if error::did_error() {
            return;
        }

        self.interpreter.interpret(&statements);
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
