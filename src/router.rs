//! Command routing — maps a [`ParseResult`] onto a concrete command.
//!
//! Pure key lookup over the parsed variables, no intent classification.
//! Anything without a recognized variable falls through to [`RoutedCommand::Chat`]
//! and the clean message goes to the LLM.

use crate::config::DirectiveConfig;
use crate::directives::ParseResult;
use crate::models::tasks::{Task, TaskPriority};

/// Variable names the router recognizes.
const VAR_ALERT: &str = "alert";
const VAR_TASK: &str = "task";
const VAR_NOTE: &str = "note";
const VAR_LINK: &str = "link";

/// The command a parsed message resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedCommand {
    /// Schedule an alert: `.alert 10:00 review details`.
    Alert {
        time: String,
        message: String,
        urgent: bool,
    },
    /// Create a task: `.task focus -urgent`.
    Task(Task),
    /// Save a note: `.note standup what was said`.
    Note { title: String, body: String },
    /// Resolve a link title: `.link https://example.com`.
    Link { url: String },
    /// No directive matched — plain conversation.
    Chat { message: String },
}

/// Routes parse results to commands. Holds the marker configuration so the
/// urgent-flag check matches whatever flag prefix is in use.
#[derive(Debug, Clone, Default)]
pub struct CommandRouter {
    config: DirectiveConfig,
}

impl CommandRouter {
    pub fn new(config: DirectiveConfig) -> Self {
        Self { config }
    }

    /// Parse a raw message and route it in one step.
    pub fn handle(&self, raw: &str) -> RoutedCommand {
        self.route(&self.config.parse(raw))
    }

    /// Pick the command for an already-parsed message.
    ///
    /// Precedence when several directive variables appear in one message:
    /// alert, then task, then note, then link. Unrecognized variables are
    /// ignored here; they stay available on the `ParseResult`.
    pub fn route(&self, parsed: &ParseResult) -> RoutedCommand {
        let urgent = self.has_flag(parsed, "urgent");

        if let Some(time) = parsed.variables.get(VAR_ALERT) {
            return RoutedCommand::Alert {
                time: time.clone(),
                message: parsed.clean_message.clone(),
                urgent,
            };
        }

        if let Some(title) = parsed.variables.get(VAR_TASK) {
            let mut task = Task::new(title).with_tags(parsed.flags.clone());
            if urgent {
                task = task.with_priority(TaskPriority::Urgent);
            }
            if !parsed.clean_message.is_empty() {
                task = task.with_description(&parsed.clean_message);
            }
            return RoutedCommand::Task(task);
        }

        if let Some(title) = parsed.variables.get(VAR_NOTE) {
            return RoutedCommand::Note {
                title: title.clone(),
                body: parsed.clean_message.clone(),
            };
        }

        if let Some(url) = parsed.variables.get(VAR_LINK) {
            return RoutedCommand::Link { url: url.clone() };
        }

        RoutedCommand::Chat {
            message: parsed.clean_message.clone(),
        }
    }

    fn has_flag(&self, parsed: &ParseResult, name: &str) -> bool {
        parsed
            .flags
            .iter()
            .any(|flag| flag.strip_prefix(self.config.flag_marker) == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tasks::TaskStatus;

    fn router() -> CommandRouter {
        CommandRouter::default()
    }

    #[test]
    fn alert_directive_routes_with_urgency() {
        let cmd = router().handle(".alert 10:00 review details -urgent");
        assert_eq!(
            cmd,
            RoutedCommand::Alert {
                time: "10:00".to_string(),
                message: "review details".to_string(),
                urgent: true,
            }
        );
    }

    #[test]
    fn task_directive_builds_a_task() {
        let cmd = router().handle(".task focus -urgent finish the draft");
        let RoutedCommand::Task(task) = cmd else {
            panic!("expected a task");
        };
        assert_eq!(task.title, "focus");
        assert_eq!(task.priority, TaskPriority::Urgent);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.tags, vec!["-urgent"]);
        assert_eq!(task.description.as_deref(), Some("finish the draft"));
    }

    #[test]
    fn note_directive_keeps_residual_body() {
        let cmd = router().handle("remember this .note standup");
        assert_eq!(
            cmd,
            RoutedCommand::Note {
                title: "standup".to_string(),
                body: "remember this".to_string(),
            }
        );
    }

    #[test]
    fn link_directive_routes_url() {
        let cmd = router().handle(".link https://example.com/post");
        assert_eq!(
            cmd,
            RoutedCommand::Link {
                url: "https://example.com/post".to_string(),
            }
        );
    }

    #[test]
    fn plain_message_falls_through_to_chat() {
        let cmd = router().handle("how do borrows work?");
        assert_eq!(
            cmd,
            RoutedCommand::Chat {
                message: "how do borrows work?".to_string(),
            }
        );
    }

    #[test]
    fn unmatched_trailing_directive_stays_chat() {
        // ".note" with nothing after it never becomes a variable, so the
        // message routes as chat with the marker token still in the text.
        let cmd = router().handle("plain message .note");
        assert_eq!(
            cmd,
            RoutedCommand::Chat {
                message: "plain message .note".to_string(),
            }
        );
    }

    #[test]
    fn alert_wins_over_task() {
        let cmd = router().handle(".alert 9:00 .task filing");
        assert!(matches!(cmd, RoutedCommand::Alert { .. }));
    }

    #[test]
    fn urgent_flag_respects_custom_marker() {
        let config = DirectiveConfig {
            var_marker: '.',
            flag_marker: '~',
        };
        let cmd = CommandRouter::new(config).handle(".alert 9:00 ~urgent");
        let RoutedCommand::Alert { urgent, .. } = cmd else {
            panic!("expected an alert");
        };
        assert!(urgent);
    }
}
