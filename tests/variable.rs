#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        collide_with_parameter:
        r#"
        fun foo(a) {
            var a = "value";
        }
        "#
        => ERR "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_local:
        r#"
        {
            var a = "value";
            var a = "other";
        }
        "#
        => ERR "[line 4] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        duplicate_parameter:
        r#"
        fun foo(arg, arg) {
            print arg;
        }
        "#
        => ERR "[line 2] Error at 'arg': Already a variable with this name in this scope."
    }

    tests! {
        early_bound:
        r#"
        var a = "outer";
        {
            fun f() {
                print a;
            }

            f();
            var a = "inner";
            f();
        }
        "#
        => OK "outer", "outer"
    }

    tests! {
        in_middle_of_block:
        r#"
        {
            var a = "a";
            print a;
            var b = a + " b";
            print b;
            var c = a + " c";
            print c;
            var d = b + " d";
            print d;
        }
        "#
        => OK "a", "a b", "a c", "a b d"
    }

    tests! {
        in_nested_block:
        r#"
        {
            var a = "outer";
            {
                print a;
            }
        }
        "#
        => OK "outer"
    }

    tests! {
        local_from_method:
        r#"
        var foo = "variable";

        class Foo {
            method() {
                print foo;
            }
        }

        Foo().method();
        "#
        => OK "variable"
    }

    tests! {
        redeclare_global:
        r#"
        var a = "1";
        var a;
        print a;
        "#
        => OK "nil"
    }

    tests! {
        redefine_global:
        r#"
        var a = "1";
        var a = "2";
        print a;
        "#
        => OK "2"
    }

    tests! {
        scope_reuse_in_different_blocks:
        r#"
        {
            var a = "first";
            print a;
        }

        {
            var a = "second";
            print a;
        }
        "#
        => OK "first", "second"
    }

    tests! {
        shadow_and_local:
        r#"
        var a = "outer";
        {
            print a;
            var a = "inner";
            print a;
        }
        "#
        => OK "outer", "inner"
    }

    tests! {
        shadow_global:
        r#"
        var a = "global";
        {
            var a = "shadow";
            print a;
        }
        print a;
        "#
        => OK "shadow", "global"
    }

    tests! {
        shadow_local:
        r#"
        {
            var a = "local";
            {
                var a = "shadow";
                print a;
            }
            print a;
        }
        "#
        => OK "shadow", "local"
    }

    tests! {
        undefined_global:
        "print notDefined;"
        => ERR "Undefined variable 'notDefined'.\n[line 1]"
    }

    tests! {
        undefined_local:
        r#"
        {
            print notDefined;
        }
        "#
        => ERR "Undefined variable 'notDefined'.\n[line 3]"
    }

    tests! {
        uninitialized:
        r#"
        var a;
        print a;
        "#
        => OK "nil"
    }

    tests! {
        unreached_undefined:
        r#"
        if (false) {
            print notDefined;
        }
        print "ok";
        "#
        => OK "ok"
    }

    tests! {
        use_false_as_var:
        r#"
        var false = "value";
        "#
        => ERR "[line 2] Error at 'false': Expect variable name."
    }

    tests! {
        use_global_in_initializer:
        r#"
        var a = "value";
        var a = a;
        print a;
        "#
        => OK "value"
    }

    tests! {
        use_local_in_initializer:
        r#"
        var a = "outer";
        {
            var a = a;
        }
        "#
        => ERR "[line 4] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        use_nil_as_var:
        r#"
        var nil = "value";
        "#
        => ERR "[line 2] Error at 'nil': Expect variable name."
    }

    tests! {
        use_this_as_var:
        r#"
        var this = "value";
        "#
        => ERR "[line 2] Error at 'this': Expect variable name."
    }
}
