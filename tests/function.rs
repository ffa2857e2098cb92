#[macro_use]
mod common;

#[cfg(test)]
mod function {
    fn params(count: usize) -> String {
        let params: Vec<String> = (0..count).map(|i| format!("a{i}")).collect();
        format!("fun f({}) {{}}\n", params.join(", "))
    }

    fn arguments(count: usize) -> String {
        let args: Vec<String> = (0..count).map(|i| i.to_string()).collect();
        format!("fun f() {{}}\nf({});\n", args.join(", "))
    }

    tests! {
        body_must_be_block:
        "fun f() 123;"
        => ERR "[line 1] Error at '123': Expect '{' before function body."
    }

    tests! {
        empty_body:
        r#"
        fun f() {}
        print f();
        "#
        => OK "nil"
    }

    tests! {
        extra_arguments:
        r#"
        fun f(a, b) {
            print a;
            print b;
        }

        f(1, 2, 3, 4);
        "#
        => ERR "Expected 2 arguments but got 4.\n[line 7]"
    }

    tests! {
        missing_arguments:
        r#"
        fun f(a, b) {}
        f(1);
        "#
        => ERR "Expected 2 arguments but got 1.\n[line 3]"
    }

    tests! {
        missing_comma_in_parameters:
        r#"
        fun f(a, b c, d) {}
        "#
        => ERR "[line 2] Error at 'c': Expect ')' after parameters."
    }

    tests! {
        local_mutual_recursion:
        r#"
        {
            fun isEven(n) {
                if (n == 0) return true;
                return isOdd(n - 1);
            }

            fun isOdd(n) {
                if (n == 0) return false;
                return isEven(n - 1);
            }

            print isEven(4);
        }
        "#
        => ERR "Undefined variable 'isOdd'.\n[line 5]"
    }

    tests! {
        mutual_recursion:
        r#"
        fun isEven(n) {
            if (n == 0) return true;
            return isOdd(n - 1);
        }

        fun isOdd(n) {
            if (n == 0) return false;
            return isEven(n - 1);
        }

        print isEven(4);
        print isOdd(3);
        "#
        => OK "true", "true"
    }

    tests! {
        local_recursion:
        r#"
        {
            fun fib(n) {
                if (n < 2) return n;
                return fib(n - 1) + fib(n - 2);
            }

            print fib(8);
        }
        "#
        => OK "21"
    }

    tests! {
        recursion:
        r#"
        fun fib(n) {
            if (n < 2) return n;
            return fib(n - 1) + fib(n - 2);
        }

        print fib(8);
        "#
        => OK "21"
    }

    tests! {
        nested_call_with_arguments:
        r#"
        fun returnArg(arg) { return arg; }
        fun returnFunCallWithArg(func, arg) { return func(arg); }
        fun printArg(arg) { print arg; }

        printArg(returnFunCallWithArg(returnArg, "hello world"));
        "#
        => OK "hello world"
    }

    tests! {
        parameters:
        r#"
        fun f0() { return 0; }
        fun f1(a) { return a; }
        fun f2(a, b) { return a + b; }
        fun f3(a, b, c) { return a + b + c; }

        print f0();
        print f1(1);
        print f2(1, 2);
        print f3(1, 2, 3);
        "#
        => OK "0", "1", "3", "6"
    }

    tests! {
        print:
        r#"
        fun foo() {}
        print foo;
        print clock;
        "#
        => OK "<fn foo>", "<native fn clock>"
    }

    tests! {
        too_many_arguments:
        &arguments(256)
        => ERR "[line 2] Error at '255': Can't have more than 255 arguments."
    }

    tests! {
        too_many_parameters:
        &params(256)
        => ERR "[line 1] Error at 'a255': Can't have more than 255 parameters."
    }
}
