//! Touch script replay
//!
//! A script is a JSON-lines file, one touch event per line. The action is
//! given either by name or as a packed platform action word:
//!
//! ```text
//! {"action": "down", "pointers": [{"id": 0, "x": 12, "y": 40}]}
//! {"action": "pointer_down", "pointer_index": 1, "pointers": [{"id": 0, "x": 12, "y": 40}, {"id": 1, "x": 90, "y": 10}]}
//! {"raw_action": 262, "pointers": [{"id": 0, "x": 12, "y": 40}, {"id": 1, "x": 90, "y": 10}]}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::sink::MessageSink;
use crate::touch::{ActionKind, ImageSize, MotionAction, Pointer, TouchEvent};
use crate::translator::{TouchError, TouchTranslator};

/// Errors for a single script line
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("malformed event JSON")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    UnknownAction(String),

    #[error("event needs either 'action' or 'raw_action'")]
    MissingAction,

    #[error("event has both 'action' and 'raw_action'")]
    AmbiguousAction,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read touch script")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: ScriptError,
    },

    #[error("line {line}: {source}")]
    Event {
        line: usize,
        #[source]
        source: TouchError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EventRecord {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    raw_action: Option<u32>,
    #[serde(default)]
    pointer_index: Option<usize>,
    #[serde(default)]
    pointers: Vec<Pointer>,
}

impl TryFrom<EventRecord> for TouchEvent {
    type Error = ScriptError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let action = match (record.action, record.raw_action) {
            (Some(_), Some(_)) => return Err(ScriptError::AmbiguousAction),
            (None, None) => return Err(ScriptError::MissingAction),
            (None, Some(raw)) => MotionAction::from_raw(raw),
            (Some(name), None) => {
                let kind: ActionKind = name.parse().map_err(ScriptError::UnknownAction)?;
                MotionAction {
                    kind,
                    pointer_index: record.pointer_index.unwrap_or(0),
                }
            }
        };
        Ok(TouchEvent::new(action, record.pointers))
    }
}

/// Parse one script line into an event
pub fn parse_event(line: &str) -> Result<TouchEvent, ScriptError> {
    let record: EventRecord = serde_json::from_str(line)?;
    TouchEvent::try_from(record)
}

/// Counters for a finished replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub messages: usize,
    pub failed_events: usize,
}

/// Replays a script through a translator into a sink
pub struct Replayer<'a> {
    translator: &'a TouchTranslator,
    image: ImageSize,
    /// Continue past events whose translation or delivery failed
    keep_going: bool,
}

impl<'a> Replayer<'a> {
    pub fn new(translator: &'a TouchTranslator, image: ImageSize) -> Self {
        Self {
            translator,
            image,
            keep_going: false,
        }
    }

    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Run every event in `reader` through the translator.
    ///
    /// Malformed lines always abort. Failed events abort unless
    /// `keep_going` is set, in which case they are logged and counted.
    pub async fn run<R, S>(&self, reader: R, sink: &mut S) -> Result<ReplaySummary, ReplayError>
    where
        R: AsyncBufRead + Unpin,
        S: MessageSink + ?Sized,
    {
        let mut summary = ReplaySummary::default();
        let mut lines = reader.lines();
        let mut line_no = 0;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let event = parse_event(trimmed).map_err(|source| ReplayError::Script {
                line: line_no,
                source,
            })?;
            summary.events += 1;
            debug!(line = line_no, action = %event.action.kind, pointers = event.pointer_count(), "Replaying event");

            match self.translator.dispatch(&event, self.image, sink) {
                Ok(sent) => summary.messages += sent,
                Err(e) if self.keep_going => {
                    warn!("⚠️  Line {}: {}", line_no, e);
                    if let TouchError::Send { delivered, .. } = &e {
                        summary.messages += delivered;
                    }
                    summary.failed_events += 1;
                }
                Err(source) => {
                    return Err(ReplayError::Event {
                        line: line_no,
                        source,
                    })
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ActionTag;
    use crate::sink::RecordingSink;
    use crate::translator::TouchCapability;

    const SCRIPT: &str = r#"
# two-finger tap
{"action": "down", "pointers": [{"id": 0, "x": 10, "y": 10}]}
{"action": "pointer_down", "pointer_index": 1, "pointers": [{"id": 0, "x": 10, "y": 10}, {"id": 1, "x": 20, "y": 20}]}
{"action": "move", "pointers": [{"id": 0, "x": 11, "y": 10}, {"id": 1, "x": 21, "y": 20}]}
{"raw_action": 262, "pointers": [{"id": 0, "x": 11, "y": 10}, {"id": 1, "x": 21, "y": 20}]}
{"action": "up", "pointers": [{"id": 0, "x": 11, "y": 10}]}
"#;

    fn image() -> ImageSize {
        ImageSize::new(320, 320).unwrap()
    }

    #[test]
    fn test_parse_named_action() {
        let event =
            parse_event(r#"{"action": "pointer_up", "pointer_index": 2, "pointers": []}"#).unwrap();
        assert_eq!(event.action, MotionAction::pointer_up(2));
    }

    #[test]
    fn test_parse_raw_action() {
        let event = parse_event(r#"{"raw_action": 261, "pointers": [{"id": 3, "x": 1.5, "y": 2}]}"#)
            .unwrap();
        assert_eq!(event.action, MotionAction::pointer_down(1));
        assert_eq!(event.pointers, vec![Pointer::new(3, 1.5, 2.0)]);
    }

    #[test]
    fn test_parse_rejects_bad_records() {
        assert!(matches!(
            parse_event(r#"{"pointers": []}"#),
            Err(ScriptError::MissingAction)
        ));
        assert!(matches!(
            parse_event(r#"{"action": "up", "raw_action": 1}"#),
            Err(ScriptError::AmbiguousAction)
        ));
        assert!(matches!(
            parse_event(r#"{"action": "tap"}"#),
            Err(ScriptError::UnknownAction(_))
        ));
        assert!(matches!(parse_event("not json"), Err(ScriptError::Json(_))));
    }

    #[tokio::test]
    async fn test_replay_two_finger_tap() {
        let translator = TouchTranslator::new(TouchCapability::Multi);
        let mut sink = RecordingSink::new();

        let summary = Replayer::new(&translator, image())
            .run(SCRIPT.as_bytes(), &mut sink)
            .await
            .unwrap();

        assert_eq!(
            summary,
            ReplaySummary {
                events: 5,
                messages: 6,
                failed_events: 0
            }
        );
        let tags: Vec<(ActionTag, u32)> = sink
            .messages()
            .iter()
            .map(|m| (m.tag, m.contact_id))
            .collect();
        assert_eq!(
            tags,
            vec![
                (ActionTag::Down, 1),
                (ActionTag::Down, 2),
                (ActionTag::Xy, 1),
                (ActionTag::Xy, 2),
                (ActionTag::Up, 2),
                (ActionTag::Up, 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_replay_reports_bad_line_number() {
        let translator = TouchTranslator::new(TouchCapability::Multi);
        let mut sink = RecordingSink::new();
        let script = "{\"action\": \"down\", \"pointers\": [{\"id\": 0, \"x\": 1, \"y\": 1}]}\n\n{\"action\": \"tap\"}\n";

        let err = Replayer::new(&translator, image())
            .run(script.as_bytes(), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, ReplayError::Script { line: 3, .. }));
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_replay_keep_going_counts_failures() {
        let translator = TouchTranslator::new(TouchCapability::Multi);
        let mut sink = RecordingSink::failing_after(3);

        let summary = Replayer::new(&translator, image())
            .keep_going(true)
            .run(SCRIPT.as_bytes(), &mut sink)
            .await
            .unwrap();

        assert_eq!(summary.events, 5);
        assert_eq!(summary.messages, 3);
        // move (partial), pointer_up and up all fail once the sink is gone
        assert_eq!(summary.failed_events, 3);
    }

    #[tokio::test]
    async fn test_replay_stops_on_failed_event() {
        let translator = TouchTranslator::new(TouchCapability::Multi);
        let mut sink = RecordingSink::new();
        let script = r#"{"action": "pointer_down", "pointer_index": 4, "pointers": []}"#;

        let err = Replayer::new(&translator, image())
            .run(script.as_bytes(), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReplayError::Event {
                line: 1,
                source: TouchError::PointerIndexOutOfRange { .. }
            }
        ));
    }
}
