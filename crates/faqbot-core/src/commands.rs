//! Chat-facing FAQ commands.
//!
//! Each command mirrors one slash command of the bot: a name, its string
//! arguments, and a reply format. The dispatcher (whatever transport it
//! lives behind) parses an invocation into a [`FaqCommand`], checks
//! authorization via [`FaqCommand::requires_manage`], and runs it against
//! the store with [`FaqCommand::execute`].

use serde_json::Value;
use thiserror::Error;

use crate::persistence::StoreError;
use crate::store::{EntryField, FaqStore};

/// Failure to turn an invocation into a command. These are caller mistakes
/// (bad command name, missing or malformed arguments), not store failures.
#[derive(Error, Debug, PartialEq)]
pub enum InvokeError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid value for argument: {0}")]
    InvalidArgument(&'static str),
}

/// A parsed command invocation, ready to run against a store.
#[derive(Debug, Clone, PartialEq)]
pub enum FaqCommand {
    /// `faq` - look up an entry (or the listing) for display.
    Lookup { key: String },
    /// `faq_set` - create or update one field of an entry.
    Set {
        key: String,
        field: EntryField,
        text: String,
    },
    /// `faq_del` - delete an entry.
    Del { key: String },
    /// `faq_rename` - move an entry to a new key.
    Rename { from: String, to: String },
    /// `faq_raw` - show an entry with escape sequences intact, for editing.
    Raw { key: String },
    /// `faq_stop` - exit the process so a supervisor can restart it.
    Stop,
}

/// What a command execution hands back to the dispatcher: the reply text to
/// send, plus whether the process should shut down afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReply {
    pub text: String,
    pub shutdown: bool,
}

impl CommandReply {
    fn text(text: impl Into<String>) -> Self {
        CommandReply {
            text: text.into(),
            shutdown: false,
        }
    }
}

impl FaqCommand {
    /// Parse a named invocation with JSON arguments into a command.
    ///
    /// `args` is an object of string values keyed by argument name, matching
    /// the slash-command options of each command.
    pub fn from_invoke(name: &str, args: &Value) -> Result<Self, InvokeError> {
        let arg = |name: &'static str| -> Result<String, InvokeError> {
            args.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(InvokeError::MissingArgument(name))
        };

        match name {
            "faq" => Ok(FaqCommand::Lookup { key: arg("key")? }),
            "faq_set" => {
                let field = EntryField::from_str(&arg("type")?)
                    .ok_or(InvokeError::InvalidArgument("type"))?;
                Ok(FaqCommand::Set {
                    key: arg("key")?,
                    field,
                    text: arg("text")?,
                })
            }
            "faq_del" => Ok(FaqCommand::Del { key: arg("key")? }),
            "faq_rename" => Ok(FaqCommand::Rename {
                from: arg("from")?,
                to: arg("to")?,
            }),
            "faq_raw" => Ok(FaqCommand::Raw { key: arg("key")? }),
            "faq_stop" => Ok(FaqCommand::Stop),
            other => Err(InvokeError::UnknownCommand(other.to_string())),
        }
    }

    /// Whether the command mutates the store or the process and therefore
    /// needs manage-level authorization. Lookups are open to everyone.
    pub fn requires_manage(&self) -> bool {
        matches!(
            self,
            FaqCommand::Set { .. }
                | FaqCommand::Del { .. }
                | FaqCommand::Rename { .. }
                | FaqCommand::Stop
        )
    }

    /// Run the command against the store and format its reply.
    ///
    /// Rejected mutations (reserved keys, missing rename source) come back
    /// as a "failed" reply, not an error. `Err` here means the store could
    /// not be persisted and the mutation was rolled back.
    pub fn execute(&self, store: &mut FaqStore) -> Result<CommandReply, StoreError> {
        match self {
            FaqCommand::Lookup { key } => Ok(CommandReply::text(store.lookup(key))),
            FaqCommand::Set { key, field, text } => {
                let success = store.upsert(key, *field, text)?;
                Ok(CommandReply::text(format!(
                    "{key} -> {text} ({})\n{}",
                    field.as_str(),
                    outcome(success)
                )))
            }
            FaqCommand::Del { key } => {
                let success = store.delete(key)?;
                Ok(CommandReply::text(format!(
                    "delete {key}: {}",
                    outcome(success)
                )))
            }
            FaqCommand::Rename { from, to } => {
                let success = store.rename(from, to)?;
                Ok(CommandReply::text(format!(
                    "rename {from} -> {to}: {}",
                    outcome(success)
                )))
            }
            FaqCommand::Raw { key } => match store.raw_show(key) {
                Some((question, answer)) => Ok(CommandReply::text(format!(
                    "key: {key}\nquestion: {question}\nanswer: {answer}"
                ))),
                None => Ok(CommandReply::text(format!(
                    "unknown argument {key}. try help"
                ))),
            },
            FaqCommand::Stop => Ok(CommandReply {
                text: "Exiting bot...".to_string(),
                shutdown: true,
            }),
        }
    }
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failed"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> FaqStore {
        FaqStore::open(dir.path().join("faq.json")).unwrap()
    }

    #[test]
    fn parse_lookup() {
        let command = FaqCommand::from_invoke("faq", &json!({"key": "widgets"})).unwrap();
        assert_eq!(
            command,
            FaqCommand::Lookup {
                key: "widgets".to_string()
            }
        );
    }

    #[test]
    fn parse_set_with_field() {
        let command = FaqCommand::from_invoke(
            "faq_set",
            &json!({"key": "k", "type": "answer", "text": "hello"}),
        )
        .unwrap();
        assert_eq!(
            command,
            FaqCommand::Set {
                key: "k".to_string(),
                field: EntryField::Answer,
                text: "hello".to_string(),
            }
        );
    }

    #[test]
    fn parse_missing_argument() {
        let result = FaqCommand::from_invoke("faq_set", &json!({"key": "k"}));
        assert_eq!(result, Err(InvokeError::MissingArgument("type")));
    }

    #[test]
    fn parse_non_string_argument() {
        let result = FaqCommand::from_invoke("faq", &json!({"key": 42}));
        assert_eq!(result, Err(InvokeError::MissingArgument("key")));
    }

    #[test]
    fn parse_invalid_field() {
        let result = FaqCommand::from_invoke(
            "faq_set",
            &json!({"key": "k", "type": "color", "text": "x"}),
        );
        assert_eq!(result, Err(InvokeError::InvalidArgument("type")));
    }

    #[test]
    fn parse_unknown_command() {
        let result = FaqCommand::from_invoke("faq_export", &json!({}));
        assert_eq!(
            result,
            Err(InvokeError::UnknownCommand("faq_export".to_string()))
        );
    }

    #[test]
    fn only_mutating_commands_require_manage() {
        let lookup = FaqCommand::Lookup { key: "k".into() };
        let raw = FaqCommand::Raw { key: "k".into() };
        let set = FaqCommand::Set {
            key: "k".into(),
            field: EntryField::Question,
            text: "t".into(),
        };
        let del = FaqCommand::Del { key: "k".into() };
        let rename = FaqCommand::Rename {
            from: "a".into(),
            to: "b".into(),
        };

        assert!(!lookup.requires_manage());
        assert!(!raw.requires_manage());
        assert!(set.requires_manage());
        assert!(del.requires_manage());
        assert!(rename.requires_manage());
        assert!(FaqCommand::Stop.requires_manage());
    }

    #[test]
    fn set_reply_echoes_key_text_and_field() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let reply = FaqCommand::Set {
            key: "k".into(),
            field: EntryField::Answer,
            text: "hello".into(),
        }
        .execute(&mut store)
        .unwrap();

        assert_eq!(reply.text, "k -> hello (answer)\nsuccess");
        assert!(!reply.shutdown);
    }

    #[test]
    fn set_reserved_key_reports_failed() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let reply = FaqCommand::Set {
            key: "list".into(),
            field: EntryField::Question,
            text: "x".into(),
        }
        .execute(&mut store)
        .unwrap();

        assert_eq!(reply.text, "list -> x (question)\nfailed");
        assert!(store.is_empty());
    }

    #[test]
    fn del_reply() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.upsert("k", EntryField::Answer, "a").unwrap();

        let reply = FaqCommand::Del { key: "k".into() }.execute(&mut store).unwrap();
        assert_eq!(reply.text, "delete k: success");

        let reply = FaqCommand::Del { key: "list".into() }.execute(&mut store).unwrap();
        assert_eq!(reply.text, "delete list: failed");
    }

    #[test]
    fn rename_reply() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.upsert("old", EntryField::Answer, "a").unwrap();

        let reply = FaqCommand::Rename {
            from: "old".into(),
            to: "new".into(),
        }
        .execute(&mut store)
        .unwrap();
        assert_eq!(reply.text, "rename old -> new: success");

        let reply = FaqCommand::Rename {
            from: "ghost".into(),
            to: "new2".into(),
        }
        .execute(&mut store)
        .unwrap();
        assert_eq!(reply.text, "rename ghost -> new2: failed");
    }

    #[test]
    fn raw_reply_keeps_escape_sequences() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.upsert("k", EntryField::Answer, "line1\\nline2").unwrap();

        let reply = FaqCommand::Raw { key: "k".into() }.execute(&mut store).unwrap();
        assert_eq!(reply.text, "key: k\nquestion: ?\nanswer: line1\\nline2");
    }

    #[test]
    fn raw_unknown_key() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let reply = FaqCommand::Raw { key: "nope".into() }.execute(&mut store).unwrap();
        assert_eq!(reply.text, "unknown argument nope. try help");
    }

    #[test]
    fn stop_requests_shutdown() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);

        let reply = FaqCommand::Stop.execute(&mut store).unwrap();
        assert_eq!(reply.text, "Exiting bot...");
        assert!(reply.shutdown);
    }

    #[test]
    fn lookup_runs_against_store() {
        let dir = tempdir().unwrap();
        let mut store = open_store(&dir);
        store.upsert("k", EntryField::Question, "Q?").unwrap();

        let reply = FaqCommand::Lookup { key: "list".into() }.execute(&mut store).unwrap();
        assert_eq!(reply.text, "# 3 available faqs:\n```help, k, list```");
    }
}
