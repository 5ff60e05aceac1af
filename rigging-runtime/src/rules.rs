//! The framework-provided business rule catalog.
//!
//! Every rule conforms to the registry contract: exactly two parameters,
//! never panics, and degrades to `false` or an empty-equivalent value on
//! absent input so that chains stay composable. Rules are registered under
//! their public camelCase names, the same namespace client rules land in.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use rigging_engine::config::coerce;
use rigging_engine::prelude::*;
use valu3::value::Value;

const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

static CAMEL_CASE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z]+[a-z0-9]*|[a-z0-9]+").expect("valid word pattern"));

/// Registers the whole catalog. Called once at bootstrap, before client
/// rules, so a client collision is reported against the framework name.
pub fn register_framework_rules(engine: &mut Engine) -> Result<(), RuleRegistryError> {
    engine.register_rule("echo", rule!(echo))?;
    engine.register_rule("stringToBoolean", rule!(string_to_boolean))?;
    engine.register_rule("stringToDataType", rule!(string_to_data_type))?;
    engine.register_rule("determineObjectDataType", rule!(determine_object_data_type))?;
    engine.register_rule("isBoolean", rule!(is_boolean))?;
    engine.register_rule("isInteger", rule!(is_integer))?;
    engine.register_rule("isFloat", rule!(is_float))?;
    engine.register_rule("isString", rule!(is_string))?;
    engine.register_rule("convertStringToLowerCase", rule!(convert_string_to_lower_case))?;
    engine.register_rule("convertStringToUpperCase", rule!(convert_string_to_upper_case))?;
    engine.register_rule("swapForwardSlashToBackSlash", rule!(swap_forward_slash_to_back_slash))?;
    engine.register_rule("swapBackSlashToForwardSlash", rule!(swap_back_slash_to_forward_slash))?;
    engine.register_rule(
        "replaceCharacterWithCharacter",
        rule!(replace_character_with_character),
    )?;
    engine.register_rule("getWordsArrayFromString", rule!(get_words_array_from_string))?;
    engine.register_rule("getNowMoment", rule!(get_now_moment))?;
    engine.register_rule("isOdd", rule!(is_odd))?;
    engine.register_rule("isEven", rule!(is_even))?;

    Ok(())
}

fn echo(input: &Value, _meta: &Value) -> Value {
    println!("{}", input.to_json(JsonMode::Inline));
    input.clone()
}

fn string_to_boolean(input: &Value, _meta: &Value) -> Value {
    if let Some(flag) = input.as_bool() {
        return Value::from(*flag);
    }
    if !input.is_string() {
        return Value::from(false);
    }

    let token = input.as_str().trim().to_ascii_lowercase();
    Value::from(matches!(token.as_str(), "true" | "t" | "y" | "yes" | "on"))
}

/// The configuration coercion algorithm exposed as a rule, so loaded
/// settings can be threaded through a chain exactly like any other data.
fn string_to_data_type(input: &Value, _meta: &Value) -> Value {
    if input.is_string() {
        coerce(input.as_str())
    } else {
        input.clone()
    }
}

fn determine_object_data_type(input: &Value, _meta: &Value) -> Value {
    let classified = if input.is_string() {
        if input.as_str().trim().is_empty() {
            return Value::from(false);
        }
        coerce(input.as_str())
    } else {
        input.clone()
    };

    match classified {
        Value::Boolean(_) => "Boolean".to_value(),
        Value::Number(number) if number.is_float() => "Float".to_value(),
        Value::Number(_) => "Integer".to_value(),
        Value::String(_) => "String".to_value(),
        _ => "Object".to_value(),
    }
}

fn is_boolean(input: &Value, meta: &Value) -> Value {
    Value::from(determine_object_data_type(input, meta) == Value::from("Boolean"))
}

fn is_integer(input: &Value, meta: &Value) -> Value {
    Value::from(determine_object_data_type(input, meta) == Value::from("Integer"))
}

fn is_float(input: &Value, meta: &Value) -> Value {
    Value::from(determine_object_data_type(input, meta) == Value::from("Float"))
}

fn is_string(input: &Value, meta: &Value) -> Value {
    Value::from(determine_object_data_type(input, meta) == Value::from("String"))
}

fn convert_string_to_lower_case(input: &Value, _meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }
    input.as_str().to_lowercase().to_value()
}

fn convert_string_to_upper_case(input: &Value, _meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }
    input.as_str().to_uppercase().to_value()
}

fn swap_forward_slash_to_back_slash(input: &Value, _meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }
    input.as_str().replace('/', "\\").to_value()
}

fn swap_back_slash_to_forward_slash(input: &Value, _meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }
    input.as_str().replace('\\', "/").to_value()
}

/// `inputMetaData` carries `[characterToFind, characterToReplace]`; every
/// occurrence is replaced.
fn replace_character_with_character(input: &Value, meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }

    let Some(replacement) = meta.as_array() else {
        return input.clone();
    };
    let find = replacement
        .values
        .first()
        .map(|value| value.as_string())
        .unwrap_or_default();
    let replace = replacement
        .values
        .get(1)
        .map(|value| value.as_string())
        .unwrap_or_default();

    if find.is_empty() {
        return input.clone();
    }

    input.as_str().replace(&find, &replace).to_value()
}

/// Splits on explicit delimiters when any are present, otherwise on
/// camelCase boundaries.
fn get_words_array_from_string(input: &Value, _meta: &Value) -> Value {
    if !input.is_string() {
        return Value::from(false);
    }

    let text = input.as_str();
    const DELIMITERS: [char; 5] = [' ', '.', ',', '_', '-'];

    let words: Vec<Value> = if text.contains(DELIMITERS) {
        text.split(DELIMITERS)
            .filter(|word| !word.is_empty())
            .map(|word| word.to_value())
            .collect()
    } else {
        CAMEL_CASE_WORDS
            .find_iter(text)
            .map(|word| word.as_str().to_value())
            .collect()
    };

    words.to_value()
}

/// Formats the current local time. `inputData` may carry a strftime format;
/// anything unparseable falls back to the default so the rule never panics
/// downstream in chrono.
fn get_now_moment(input: &Value, _meta: &Value) -> Value {
    let requested = if input.is_string() {
        input.as_string()
    } else {
        String::new()
    };

    let format = if requested.is_empty() || !is_valid_strftime(&requested) {
        DEFAULT_TIMESTAMP_FORMAT
    } else {
        requested.as_str()
    };

    Local::now().format(format).to_string().to_value()
}

fn is_valid_strftime(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn is_odd(input: &Value, meta: &Value) -> Value {
    match parity(input, meta) {
        Some(remainder) => Value::from(remainder != 0),
        None => Value::from(false),
    }
}

fn is_even(input: &Value, meta: &Value) -> Value {
    match parity(input, meta) {
        Some(remainder) => Value::from(remainder == 0),
        None => Value::from(false),
    }
}

fn parity(input: &Value, meta: &Value) -> Option<i64> {
    match string_to_data_type(input, meta) {
        Value::Number(number) if !number.is_float() => number.to_i64().map(|n| n.rem_euclid(2)),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_string_to_boolean_tokens() {
        assert_eq!(string_to_boolean(&Value::from("YES"), &Value::Null), Value::from(true));
        assert_eq!(string_to_boolean(&Value::from("off"), &Value::Null), Value::from(false));
        assert_eq!(string_to_boolean(&Value::from(""), &Value::Null), Value::from(false));
        assert_eq!(string_to_boolean(&Value::from(true), &Value::Null), Value::from(true));
    }

    #[test]
    fn test_string_to_data_type_matches_coercion() {
        assert_eq!(string_to_data_type(&Value::from("12"), &Value::Null), Value::from(12i64));
        assert_eq!(
            string_to_data_type(&Value::from("3.1415"), &Value::Null),
            Value::from(3.1415)
        );
        assert_eq!(
            string_to_data_type(&Value::from("Happy Birthday"), &Value::Null),
            Value::from("Happy Birthday")
        );
        // Already-typed input passes through untouched.
        assert_eq!(
            string_to_data_type(&Value::from(7i64), &Value::Null),
            Value::from(7i64)
        );
    }

    #[test]
    fn test_determine_object_data_type() {
        assert_eq!(
            determine_object_data_type(&Value::from("false"), &Value::Null),
            Value::from("Boolean")
        );
        assert_eq!(
            determine_object_data_type(&Value::from("12"), &Value::Null),
            Value::from("Integer")
        );
        assert_eq!(
            determine_object_data_type(&Value::from("0.75"), &Value::Null),
            Value::from("Float")
        );
        assert_eq!(
            determine_object_data_type(&Value::from("hello"), &Value::Null),
            Value::from("String")
        );
    }

    #[test]
    fn test_case_conversion_degrades_on_non_strings() {
        assert_eq!(
            convert_string_to_upper_case(&Value::from("quiet"), &Value::Null),
            Value::from("QUIET")
        );
        assert_eq!(
            convert_string_to_upper_case(&Value::Null, &Value::Null),
            Value::from(false)
        );
    }

    #[test]
    fn test_slash_swapping() {
        assert_eq!(
            swap_back_slash_to_forward_slash(&Value::from("C:\\apps\\harness"), &Value::Null),
            Value::from("C:/apps/harness")
        );
        assert_eq!(
            swap_forward_slash_to_back_slash(&Value::from("a/b/c"), &Value::Null),
            Value::from("a\\b\\c")
        );
    }

    #[test]
    fn test_replace_character_with_character() {
        let replacement = vec![Value::from(":"), Value::from("_")].to_value();
        assert_eq!(
            replace_character_with_character(&Value::from("a:b:c"), &replacement),
            Value::from("a_b_c")
        );
    }

    #[test]
    fn test_get_words_array_from_string() {
        let words = get_words_array_from_string(&Value::from("system.logging.enabled"), &Value::Null);
        let words = words.as_array().unwrap();
        assert_eq!(words.values.len(), 3);
        assert_eq!(words.values[0], Value::from("system"));

        let camel = get_words_array_from_string(&Value::from("debugModeEnabled"), &Value::Null);
        let camel = camel.as_array().unwrap();
        assert_eq!(camel.values.len(), 3);
        assert_eq!(camel.values[1], Value::from("Mode"));
    }

    #[test]
    fn test_parity_rules() {
        assert_eq!(is_odd(&Value::from("3"), &Value::Null), Value::from(true));
        assert_eq!(is_even(&Value::from("3"), &Value::Null), Value::from(false));
        assert_eq!(is_even(&Value::from(-4i64), &Value::Null), Value::from(true));
        assert_eq!(is_odd(&Value::from("pear"), &Value::Null), Value::from(false));
    }

    #[test]
    fn test_get_now_moment_survives_bad_format() {
        let stamp = get_now_moment(&Value::from("%Q %nonsense"), &Value::Null);
        assert!(stamp.is_string());
        assert!(!stamp.as_str().is_empty());
    }

    #[test]
    fn test_catalog_registers_cleanly() {
        let mut engine = Engine::new();
        register_framework_rules(&mut engine).unwrap();
        assert!(engine.rules.contains("stringToBoolean"));
        assert!(engine.rules.contains("getNowMoment"));
    }
}
