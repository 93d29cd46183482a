//! Reply classification.
//!
//! The model speaks a marker protocol: every reply opens with one of a
//! fixed set of keywords that tells the loop what kind of step it is.
//! Unmarked text defaults to a thought — that silent fallback is a
//! deliberate behavior, kept explicit and tested here.

use stepline_core::activity::{ActivityContent, ToolName};
use stepline_core::error::ClassificationError;

/// The recognized reply markers, in match order.
const MARKERS: [(&str, Marker); 5] = [
    ("THINKING:", Marker::Thinking),
    ("ACTION:", Marker::Action),
    ("RESPONSE:", Marker::Response),
    ("ELICITATION:", Marker::Elicitation),
    ("ERROR:", Marker::Error),
];

#[derive(Clone, Copy)]
enum Marker {
    Thinking,
    Action,
    Response,
    Elicitation,
    Error,
}

/// Classify a raw model reply into typed content.
///
/// Total over input shape: any text classifies, falling back to a
/// thought when no marker leads. The only failures are a tagged action
/// whose `NAME(params)` call cannot be parsed, or a name outside the
/// registered tool set.
pub fn classify(raw: &str) -> Result<ActivityContent, ClassificationError> {
    let trimmed = raw.trim();

    for (keyword, marker) in MARKERS {
        if let Some(rest) = trimmed.strip_prefix(keyword) {
            let body = rest.trim();
            return Ok(match marker {
                Marker::Thinking => ActivityContent::Thought { body: body.into() },
                Marker::Action => parse_action(body)?,
                Marker::Response => ActivityContent::Response { body: body.into() },
                Marker::Elicitation => ActivityContent::Elicitation { body: body.into() },
                Marker::Error => ActivityContent::Error { body: body.into() },
            });
        }
    }

    // No marker matched — treat the whole reply as a thought.
    Ok(ActivityContent::Thought {
        body: trimmed.into(),
    })
}

/// Parse an action call of the form `NAME(param-list)`.
///
/// The parameter string is opaque here; the controller parses it per
/// tool before execution. An empty parameter list yields `None`.
fn parse_action(body: &str) -> Result<ActivityContent, ClassificationError> {
    let open = body
        .find('(')
        .ok_or_else(|| ClassificationError::MalformedAction(body.to_string()))?;
    let close = body
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| ClassificationError::MalformedAction(body.to_string()))?;

    let name = body[..open].trim();
    if name.is_empty() {
        return Err(ClassificationError::MalformedAction(body.to_string()));
    }
    let tool: ToolName = name.parse()?;

    let raw_params = body[open + 1..close].trim();
    let parameter = if raw_params.is_empty() {
        None
    } else {
        Some(raw_params.to_string())
    };

    Ok(ActivityContent::Action {
        tool,
        parameter,
        result: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thinking_marker() {
        let content = classify("THINKING: I should find coordinates first").unwrap();
        assert_eq!(
            content,
            ActivityContent::Thought {
                body: "I should find coordinates first".into()
            }
        );
    }

    #[test]
    fn unmarked_text_defaults_to_thought() {
        let content = classify("just some musing with no marker").unwrap();
        assert_eq!(
            content,
            ActivityContent::Thought {
                body: "just some musing with no marker".into()
            }
        );
    }

    #[test]
    fn response_marker() {
        let content = classify("RESPONSE: It's 18°C and partly cloudy in Paris.").unwrap();
        assert_eq!(
            content,
            ActivityContent::Response {
                body: "It's 18°C and partly cloudy in Paris.".into()
            }
        );
    }

    #[test]
    fn elicitation_marker() {
        let content = classify("ELICITATION: Which city did you mean?").unwrap();
        assert!(matches!(content, ActivityContent::Elicitation { .. }));
    }

    #[test]
    fn error_marker() {
        let content = classify("ERROR: I cannot answer that.").unwrap();
        assert!(matches!(content, ActivityContent::Error { .. }));
    }

    #[test]
    fn action_with_coordinates() {
        let content = classify("ACTION: getWeather(40.7,-74.0)").unwrap();
        assert_eq!(
            content,
            ActivityContent::Action {
                tool: ToolName::GetWeather,
                parameter: Some("40.7,-74.0".into()),
                result: None,
            }
        );
    }

    #[test]
    fn action_with_quoted_place() {
        let content = classify("ACTION: getCoordinates(\"Paris\")").unwrap();
        assert_eq!(
            content,
            ActivityContent::Action {
                tool: ToolName::GetCoordinates,
                parameter: Some("\"Paris\"".into()),
                result: None,
            }
        );
    }

    #[test]
    fn action_with_empty_params() {
        let content = classify("ACTION: getTime()").unwrap();
        assert_eq!(
            content,
            ActivityContent::Action {
                tool: ToolName::GetTime,
                parameter: None,
                result: None,
            }
        );
    }

    #[test]
    fn unknown_tool_fails_classification() {
        let err = classify("ACTION: bogusTool(1,2)").unwrap_err();
        assert!(matches!(err, ClassificationError::UnknownTool(name) if name == "bogusTool"));
    }

    #[test]
    fn action_without_call_syntax_fails() {
        let err = classify("ACTION: getWeather").unwrap_err();
        assert!(matches!(err, ClassificationError::MalformedAction(_)));
    }

    #[test]
    fn action_without_closing_paren_fails() {
        let err = classify("ACTION: getWeather(40.7,-74.0").unwrap_err();
        assert!(matches!(err, ClassificationError::MalformedAction(_)));
    }

    #[test]
    fn leading_whitespace_tolerated() {
        let content = classify("  RESPONSE: done  ").unwrap();
        assert_eq!(content, ActivityContent::Response { body: "done".into() });
    }
}
