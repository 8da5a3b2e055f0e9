mod common;

use common::parse_ok;

// ─── Typed Parameters ───────────────────────────────────────────────────────

#[test]
fn test_typehinted_closure_parameter() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function (User $user) {\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.function, "find");
    assert_eq!(context.fqn.as_deref(), Some("User"));
    assert_eq!(context.param.index, 0);
}

#[test]
fn test_untyped_parameter_leaves_fqn_null() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function (NotUser $user) {\n",
        "$user->where('name', 'something')->find();\n",
        "});\n",
        "\n",
        "Route::get('/', function ($user) {\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.function, "find");
    assert_eq!(context.fqn, None);
}

#[test]
fn test_unrelated_closures_do_not_sidetrack() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function (User $user) {\n",
        "\n",
        "$user->where(function($q) {\n",
        "    $q->where('something', 'something else');\n",
        "})->find('');\n",
        "\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.fqn.as_deref(), Some("User"));
    assert_eq!(context.function, "find");
}

// ─── Assignments ────────────────────────────────────────────────────────────

#[test]
fn test_variable_of_instantiated_class() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function () {\n",
        "\n",
        "$user = new User();\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.fqn.as_deref(), Some("User"));
    assert_eq!(context.function, "find");
}

#[test]
fn test_variable_of_static_factory() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function () {\n",
        "\n",
        "$user = User::make();\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.fqn.as_deref(), Some("User"));
}

#[test]
fn test_variable_of_fqn_factory() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function () {\n",
        "$user = App\\Models\\User::make();\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.fqn.as_deref(), Some("App\\Models\\User"));
}

#[test]
fn test_plain_assignment_stays_unresolved() {
    let code = concat!(
        "<?php\n",
        "\n",
        "Route::get('/', function () {\n",
        "$user = $anotherThing;\n",
        "$user->where('name', 'something')->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.function, "find");
    assert_eq!(context.fqn, None);
}

#[test]
fn test_reassignment_overwrites_binding() {
    let code = concat!(
        "<?php\n",
        "Route::get('/', function () {\n",
        "$user = new User();\n",
        "$user = $mystery;\n",
        "$user->find('",
    );
    assert_eq!(parse_ok(code).fqn, None);
}

// ─── Closure Scoping ────────────────────────────────────────────────────────

#[test]
fn test_outer_binding_not_visible_in_nested_closure() {
    let code = concat!(
        "<?php\n",
        "function outer(User $user) {\n",
        "    dispatch(function () {\n",
        "        $user->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.function, "find");
    assert_eq!(context.fqn, None);
}

#[test]
fn test_capture_clause_propagates_binding() {
    let code = concat!(
        "<?php\n",
        "function outer(User $user) {\n",
        "    dispatch(function () use ($user) {\n",
        "        $user->find('",
    );
    let context = parse_ok(code);
    assert_eq!(context.fqn.as_deref(), Some("User"));
}

#[test]
fn test_closure_binding_does_not_leak_out() {
    let code = concat!(
        "<?php\n",
        "Route::get('/', function () {\n",
        "    $inner = new User();\n",
        "});\n",
        "$inner->find('",
    );
    assert_eq!(parse_ok(code).fqn, None);
}

#[test]
fn test_use_import_resolves_parameter_hint() {
    let code = concat!(
        "<?php\n",
        "use App\\Models\\User;\n",
        "\n",
        "Route::get('/', function (User $user) {\n",
        "$user->find('",
    );
    assert_eq!(parse_ok(code).fqn.as_deref(), Some("App\\Models\\User"));
}
