#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        call_function_field:
        r#"
        class Foo {}
        fun bar(a, b) {
            print "bar";
            print a;
            print b;
        }

        var foo = Foo();
        foo.bar = bar;
        foo.bar(1, 2);
        "#
        => OK "bar", "1", "2"
    }

    tests! {
        call_nonfunction_field:
        r#"
        class Foo {}
        var foo = Foo();
        foo.bar = "not fn";
        foo.bar();
        "#
        => ERR "Can only call functions and classes.\n[line 5]"
    }

    tests! {
        get_and_set_method:
        r#"
        class Foo {
            method() {
                print "other";
            }
        }

        var foo = Foo();
        foo.method();

        foo.method = foo.method;
        foo.method();
        "#
        => OK "other", "other"
    }

    tests! {
        get_on_bool:
        "true.foo;"
        => ERR "Only instances have properties.\n[line 1]"
    }

    tests! {
        get_on_class:
        r#"
        class Foo {}
        Foo.bar;
        "#
        => ERR "Only instances have properties.\n[line 3]"
    }

    tests! {
        get_on_function:
        r#"
        fun foo() {}
        foo.bar;
        "#
        => ERR "Only instances have properties.\n[line 3]"
    }

    tests! {
        get_on_nil:
        "nil.foo;"
        => ERR "Only instances have properties.\n[line 1]"
    }

    tests! {
        get_on_num:
        "123.foo;"
        => ERR "Only instances have properties.\n[line 1]"
    }

    tests! {
        get_on_string:
        r#""str".foo;"#
        => ERR "Only instances have properties.\n[line 1]"
    }

    tests! {
        many:
        r#"
        class Fruit {}
        var fruit = Fruit();
        fruit.apple = "apple";
        fruit.banana = "banana";
        fruit.cherry = "cherry";
        print fruit.apple;
        print fruit.banana;
        print fruit.cherry;
        "#
        => OK "apple", "banana", "cherry"
    }

    tests! {
        method:
        r#"
        class Foo {
            method(arg) {
                print "got method";
                print arg;
            }
        }

        Foo().method("arg");
        "#
        => OK "got method", "arg"
    }

    tests! {
        method_binds_this:
        r#"
        class Foo {
            sayName(a) {
                print this.name;
                print a;
            }
        }

        var foo1 = Foo();
        foo1.name = "foo1";

        var method = foo1.sayName;
        method(1);
        "#
        => OK "foo1", "1"
    }

    tests! {
        on_instance:
        r#"
        class Foo {}
        var foo = Foo();

        foo.bar = "bar value";
        foo.baz = "baz value";

        print foo.bar;
        print foo.baz;
        "#
        => OK "bar value", "baz value"
    }

    tests! {
        set_evaluation_order:
        "undefined1.bar = undefined2;"
        => ERR "Undefined variable 'undefined1'.\n[line 1]"
    }

    tests! {
        set_on_bool:
        "true.foo = 1;"
        => ERR "Only instances have fields.\n[line 1]"
    }

    tests! {
        set_on_class:
        r#"
        class Foo {}
        Foo.bar = 1;
        "#
        => ERR "Only instances have fields.\n[line 3]"
    }

    tests! {
        set_on_function:
        r#"
        fun foo() {}
        foo.bar = 1;
        "#
        => ERR "Only instances have fields.\n[line 3]"
    }

    tests! {
        set_on_nil:
        "nil.foo = 1;"
        => ERR "Only instances have fields.\n[line 1]"
    }

    tests! {
        set_on_num:
        "123.foo = 1;"
        => ERR "Only instances have fields.\n[line 1]"
    }

    tests! {
        set_on_string:
        r#""str".foo = 1;"#
        => ERR "Only instances have fields.\n[line 1]"
    }

    tests! {
        undefined:
        r#"
        class Foo {}
        var foo = Foo();
        print foo.bar;
        "#
        => ERR "Undefined property 'bar'.\n[line 4]"
    }
}
