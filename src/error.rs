use std::sync::atomic::{AtomicBool, Ordering};

use crate::token::{Token, Type};

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Checks if an error occurred during scanning, parsing, resolving or interpreting.
pub fn did_error() -> bool {
    HAD_ERROR.load(Ordering::SeqCst) || HAD_RUNTIME_ERROR.load(Ordering::SeqCst)
}

/// Checks if an error occurred during runtime.
pub fn did_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::SeqCst)
}

/// Resets the error flags.
/// This is used to reset the interpreter after an error occurs when running prompts.
pub fn reset_error() {
    HAD_ERROR.store(false, Ordering::SeqCst);
    HAD_RUNTIME_ERROR.store(false, Ordering::SeqCst);
}

/// Every error type must implement this trait.
pub trait Error {
    /// Prints the error message and sets the error flag.
    fn throw(&self);
}

/// Represents an error that occurs during scanning.
#[derive(Debug)]
pub struct ScanError {
    pub line: usize,
    pub message: String,
}

impl Error for ScanError {
    fn throw(&self) {
        eprintln!("[line {}] Error: {}", self.line, self.message);
        HAD_ERROR.store(true, Ordering::SeqCst);
    }
}

/// Represents an error that occurs during parsing.
#[derive(Debug)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl Error for ParseError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            eprintln!("[line {}] Error at end: {}", self.token.line, self.message);
        } else {
            eprintln!("[line {}] Error at '{}': {}", self.token.line, self.token.lexeme, self.message);
        }

        HAD_ERROR.store(true, Ordering::SeqCst);
    }
}

/// Represents an error that occurs during resolution.
#[derive(Debug)]
pub struct ResolveError {
    pub token: Token,
    pub message: String,
}

impl Error for ResolveError {
    fn throw(&self) {
        if self.token.r#type == Type::EOF {
            eprintln!("[line {}] Error at end: {}", self.token.line, self.message);
        } else {
            eprintln!("[line {}] Error at '{}': {}", self.token.line, self.token.lexeme, self.message);
        }

        HAD_ERROR.store(true, Ordering::SeqCst);
    }
}

/// Represents an error that occurs during runtime.
#[derive(Debug)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl Error for RuntimeError {
    fn throw(&self) {
        eprintln!("{}\n[line {}]", self.message, self.token.line);
        HAD_RUNTIME_ERROR.store(true, Ordering::SeqCst);
    }
}
