//! Work-done and partial-result progress.

use crate::keys;
use crate::record::wire_record;
use crate::union::Or2;

/// A progress token: `integer | string`.
pub type ProgressToken = Or2<i32, String>;

wire_record! {
    /// Mixin carrying a work-done progress token.
    pub struct WorkDoneProgressParams {
        work_done_token: Option<ProgressToken> = keys::WORK_DONE_TOKEN, omitempty;
    }
}

wire_record! {
    /// Mixin carrying a partial-result token.
    pub struct PartialResultParams {
        partial_result_token: Option<ProgressToken> = keys::PARTIAL_RESULT_TOKEN, omitempty;
    }
}

wire_record! {
    /// Intermediate progress report.
    pub struct WorkDoneProgressReport {
        /// Always `report`.
        kind: String = keys::KIND, required;
        cancellable: Option<bool> = keys::CANCELLABLE, omitempty;
        message: Option<String> = keys::MESSAGE, omitempty;
        /// Percentage in `0..=100`.
        percentage: Option<u32> = keys::PERCENTAGE, omitempty;
    }
}

wire_record! {
    /// Payload of a `$/progress` notification.
    pub struct ProgressParams {
        token: ProgressToken = keys::TOKEN, required;
        /// Progress value; its shape depends on the token's owner.
        value: serde_json::Value = keys::VALUE, required;
    }
}

impl WorkDoneProgressReport {
    /// Creates a report with only the `kind` marker set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kind: "report".to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_percentage(mut self, percentage: u32) -> Self {
        self.percentage = Some(percentage.min(100));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
