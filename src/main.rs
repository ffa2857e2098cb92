use std::{env, process};

use lox::Lox;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut lox = Lox::new();

    match args.len() {
        n if n > 2 => {
            println!("Usage: jlox [script]");
            process::exit(64);
        },
        2 => lox.run_file(args[1].clone()),
        _ => lox.run_prompt(),
    };
}
