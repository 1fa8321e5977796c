//! Tests for core types.

use pretty_assertions::assert_eq;
use colloq::types::*;

#[test]
fn turn_constructors_set_role() {
    assert_eq!(Turn::system("s").role(), Role::System);
    assert_eq!(Turn::user("u").role(), Role::User);
    assert_eq!(Turn::assistant("a").role(), Role::Assistant);
    assert_eq!(Turn::user("u").content(), "u");
}

#[test]
fn turn_serializes_as_role_and_content() {
    let json = serde_json::to_value(Turn::user("hello")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
}

#[test]
fn role_parses_and_displays_lowercase() {
    assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
    assert_eq!(Role::System.to_string(), "system");
    assert!("tool".parse::<Role>().is_err());
}

#[test]
fn usage_merge() {
    let mut total = Usage {
        input_tokens: 10,
        output_tokens: 20,
        total_tokens: 30,
    };
    total.merge(&Usage {
        input_tokens: 5,
        output_tokens: 15,
        total_tokens: 20,
    });
    assert_eq!(
        total,
        Usage {
            input_tokens: 15,
            output_tokens: 35,
            total_tokens: 50,
        }
    );
}

#[test]
fn usage_merge_saturates() {
    let mut total = Usage {
        input_tokens: 1,
        output_tokens: 0,
        total_tokens: u32::MAX,
    };
    total.merge(&Usage {
        input_tokens: u32::MAX,
        output_tokens: 7,
        total_tokens: u32::MAX,
    });
    assert_eq!(
        total,
        Usage {
            input_tokens: u32::MAX,
            output_tokens: 7,
            total_tokens: u32::MAX,
        }
    );
}
