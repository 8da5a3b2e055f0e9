mod common;

use common::parse_ok;

// ─── Argument Position ──────────────────────────────────────────────────────

#[test]
fn test_first_param_position() {
    let context = parse_ok("<?php\nRoute::get('/', function () {\nUser::where('");
    assert_eq!(context.fqn.as_deref(), Some("User"));
    assert_eq!(context.function, "where");
    assert_eq!(context.param.index, 0);
    assert!(context.parameters.is_empty());
}

#[test]
fn test_second_param_position() {
    let context = parse_ok("<?php\nUser::where('first', '");
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["first"]);
}

#[test]
fn test_position_after_unquoted_arguments() {
    let context = parse_ok("<?php\nUser::where($column, 5, '");
    assert_eq!(context.param.index, 2);
    assert_eq!(context.parameters, vec!["$column", "5"]);
}

// ─── Top-Level Comma Splitting ──────────────────────────────────────────────

#[test]
fn test_array_argument_does_not_split() {
    let context = parse_ok("<?php\nUser::where(['what' => 'ok'], '");
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["['what'=>'ok']"]);
}

#[test]
fn test_string_and_array_arguments() {
    let context = parse_ok("<?php\nUser::where('first', ['what' => 'ok'], '");
    assert_eq!(context.param.index, 2);
    assert_eq!(context.parameters, vec!["first", "['what'=>'ok']"]);
}

#[test]
fn test_callback_argument_collapses_to_one_line() {
    let code = concat!(
        "<?php\n",
        "User::where(function($thing) {\n",
        "    return $thing;\n",
        "}, '",
    );
    let context = parse_ok(code);
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["function($thing){return $thing;}"]);
}

#[test]
fn test_short_callback_argument() {
    let context = parse_ok("<?php\nUser::where(fn($thing) => $thing, '");
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["fn($thing)=>$thing"]);
}

#[test]
fn test_parameter_grab_bag() {
    let code = concat!(
        "<?php\n",
        "User::where('ok', [1, 2, 3], 5, function($thing) {\n",
        "    return $thing;\n",
        "}, ['hi' => 'there'], '",
    );
    let context = parse_ok(code);
    assert_eq!(context.param.index, 5);
    assert_eq!(
        context.parameters,
        vec![
            "ok",
            "[1,2,3]",
            "5",
            "function($thing){return $thing;}",
            "['hi'=>'there']",
        ]
    );
}

#[test]
fn test_commas_inside_nested_call_do_not_split() {
    let context = parse_ok("<?php\nRoute::get(route('user.show', $user), '");
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["route('user.show',$user)"]);
}

#[test]
fn test_commas_inside_string_do_not_split() {
    let context = parse_ok("<?php\nlog_message('one, two, three', '");
    assert_eq!(context.param.index, 1);
    assert_eq!(context.parameters, vec!["one, two, three"]);
}

// ─── Normalization Details ──────────────────────────────────────────────────

#[test]
fn test_single_string_argument_is_unquoted_and_unescaped() {
    let context = parse_ok("<?php\nconfig('it\\'s fine', '");
    assert_eq!(context.parameters, vec!["it's fine"]);
}

#[test]
fn test_expression_argument_keeps_quotes() {
    let context = parse_ok("<?php\nconfig('app' . '.name', '");
    assert_eq!(context.parameters, vec!["'app'.'.name'"]);
}

#[test]
fn test_new_expression_argument_keeps_word_gap() {
    let context = parse_ok("<?php\ndispatch(new SendEmail($user), '");
    assert_eq!(context.parameters, vec!["new SendEmail($user)"]);
}
