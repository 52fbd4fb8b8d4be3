//! Gateway reply shapes.
//!
//! The gateway answers with a loosely typed JSON object.  It is validated once
//! here, at the client boundary, so downstream code matches on
//! [`ProxyReply`] instead of probing map keys.

use serde_json::Value;

use crate::error::GatewayError;

/// A decoded gateway response: HTTP status plus the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub body: Value,
}

impl RawReply {
    /// `true` for a 2xx status.
    pub fn success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into [`GatewayError::Status`].
    pub fn ensure_success(self) -> Result<Self, GatewayError> {
        if self.success() {
            Ok(self)
        } else {
            Err(GatewayError::Status {
                status: self.status,
                body: self.body.to_string(),
            })
        }
    }

    pub fn into_reply(self) -> ProxyReply {
        ProxyReply::from_body(self.body)
    }
}

/// The gateway reply after shape validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyReply {
    /// The body has no string `message` field.
    Malformed(Value),
    WellFormed { message: String, is_recipe: bool },
}

impl ProxyReply {
    /// Validate a gateway body.
    ///
    /// `is_recipe` is read strictly: only JSON `true` counts.  Strings such as
    /// `"true"` and numbers such as `1` are treated as `false`.
    pub fn from_body(body: Value) -> Self {
        let is_recipe = match body.get("is_recipe") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                tracing::debug!(is_recipe = %other, "non-boolean is_recipe; treating as false");
                false
            }
        };
        match body.get("message") {
            Some(Value::String(message)) => ProxyReply::WellFormed {
                message: message.clone(),
                is_recipe,
            },
            _ => ProxyReply::Malformed(body),
        }
    }
}

/// What a well-formed `message` actually carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    PlainText(String),
    /// Raw items of a JSON array; each still has to be checked for recipe shape.
    RecipeList(Vec<Value>),
}

impl ReplyBody {
    /// Decide between plain text and a recipe list.
    ///
    /// Only a reply flagged `is_recipe` whose message parses as a JSON array
    /// becomes a [`ReplyBody::RecipeList`]; anything else is kept as text.
    pub fn decode(message: &str, is_recipe: bool) -> Self {
        if is_recipe {
            match serde_json::from_str::<Vec<Value>>(message) {
                Ok(items) => return ReplyBody::RecipeList(items),
                Err(e) => {
                    tracing::warn!(error = %e, "recipe-flagged message is not a JSON array; keeping it as text");
                }
            }
        }
        ReplyBody::PlainText(message.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_is_recipe_defaults_to_false() {
        let reply = ProxyReply::from_body(json!({ "message": "안녕하세요" }));
        assert_eq!(
            reply,
            ProxyReply::WellFormed {
                message: "안녕하세요".into(),
                is_recipe: false
            }
        );
    }

    #[test]
    fn non_boolean_is_recipe_reads_as_false() {
        for flag in [json!("true"), json!(1), json!([true])] {
            let reply = ProxyReply::from_body(json!({ "message": "[]", "is_recipe": flag }));
            assert_eq!(
                reply,
                ProxyReply::WellFormed {
                    message: "[]".into(),
                    is_recipe: false
                }
            );
        }
    }

    #[test]
    fn missing_or_non_string_message_is_malformed() {
        assert!(matches!(
            ProxyReply::from_body(json!({ "detail": "boom" })),
            ProxyReply::Malformed(_)
        ));
        assert!(matches!(
            ProxyReply::from_body(json!({ "message": [1, 2] })),
            ProxyReply::Malformed(_)
        ));
    }

    #[test]
    fn status_check_keeps_body_for_diagnostics() {
        let raw = RawReply {
            status: 503,
            body: json!({ "message": "busy" }),
        };
        assert!(!raw.success());
        match raw.ensure_success() {
            Err(GatewayError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert!(body.contains("busy"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn recipe_list_decodes_only_when_flagged() {
        let msg = r#"[{"title":"a"},{"title":"b"}]"#;
        assert!(matches!(ReplyBody::decode(msg, false), ReplyBody::PlainText(_)));
        match ReplyBody::decode(msg, true) {
            ReplyBody::RecipeList(items) => assert_eq!(items.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn broken_recipe_list_degrades_to_text() {
        let msg = "레시피를 찾지 못했어요";
        assert_eq!(ReplyBody::decode(msg, true), ReplyBody::PlainText(msg.into()));
        let obj = r#"{"title":"not a list"}"#;
        assert_eq!(ReplyBody::decode(obj, true), ReplyBody::PlainText(obj.into()));
    }
}
