mod common;

use common::parse_ok;

#[test]
fn test_array_key_detection() {
    let context = parse_ok("<?php\nUser::where('ok', ['");
    assert_eq!(context.fqn.as_deref(), Some("User"));
    assert_eq!(context.param.index, 1);
    assert!(context.param.is_array);
    assert!(context.param.is_key);
    assert_eq!(context.param.key, None);
    assert!(context.param.keys.is_empty());
    assert_eq!(context.parameters, vec!["ok"]);
}

#[test]
fn test_array_key_detection_further_along() {
    let context = parse_ok("<?php\nUser::where('ok', ['sure' => 'thing', '");
    assert!(context.param.is_array);
    assert!(context.param.is_key);
    assert_eq!(context.param.keys, vec!["sure"]);
    assert_eq!(context.parameters, vec!["ok"]);
}

#[test]
fn test_simple_array_entries_still_contribute_keys() {
    let context = parse_ok("<?php\nUser::where('ok', ['sure', '");
    assert!(context.param.is_key);
    assert_eq!(context.param.keys, vec!["sure"]);
}

#[test]
fn test_nested_array_is_value_position() {
    let context = parse_ok("<?php\nUser::where('ok', ['sure', ['");
    assert_eq!(context.param.index, 1);
    assert!(context.param.is_array);
    assert!(!context.param.is_key);
    assert_eq!(context.param.keys, vec!["sure"]);
    assert_eq!(context.parameters, vec!["ok"]);
}

#[test]
fn test_value_position_after_double_arrow() {
    let context = parse_ok("<?php\n$this->update(['name' => '");
    assert!(context.param.is_array);
    assert!(!context.param.is_key);
    assert_eq!(context.param.key.as_deref(), Some("name"));
    assert!(context.param.keys.is_empty());
}

#[test]
fn test_keys_accumulate_in_source_order() {
    let context = parse_ok("<?php\nconfig(['a' => 1, 'b' => 2, 'c' => 3, '");
    assert_eq!(context.param.keys, vec!["a", "b", "c"]);
    assert!(context.param.is_key);
}

#[test]
fn test_completed_nested_array_does_not_leak_keys() {
    // The inner array's 'deep' key belongs to the inner array, not to the
    // outer scan, and the entry's leading literal is 'outer'.
    let context = parse_ok("<?php\nconfig(['outer' => ['deep' => 1], '");
    assert_eq!(context.param.keys, vec!["outer"]);
    assert!(context.param.is_key);
}

#[test]
fn test_no_array_state_outside_brackets() {
    let context = parse_ok("<?php\nUser::where('ok', '");
    assert!(!context.param.is_array);
    assert!(!context.param.is_key);
    assert_eq!(context.param.key, None);
    assert!(context.param.keys.is_empty());
}

#[test]
fn test_indexing_bracket_reports_no_array_state() {
    // `$data['` subscripts a variable; the cursor is not in an array
    // literal even though a `[` is unclosed.
    let context = parse_ok("<?php\nUser::where($data['");
    assert_eq!(context.function, "where");
    assert!(!context.param.is_array);
    assert!(!context.param.is_key);
    assert_eq!(context.param.key, None);
    assert!(context.param.keys.is_empty());
}

#[test]
fn test_array_as_first_argument() {
    let context = parse_ok("<?php\nvalidator(['email' => 'required', '");
    assert_eq!(context.param.index, 0);
    assert!(context.param.is_array);
    assert!(context.param.is_key);
    assert_eq!(context.param.keys, vec!["email"]);
}
