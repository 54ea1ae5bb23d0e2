//! Submission lifecycle of the contact form as the visitor experiences it:
//! `Idle -> Submitting -> Success | Error`, with `Error` dropping back to
//! `Idle` as soon as any field is edited.

use super::ContactRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub message: String,
    status: SubmitStatus,
}

impl ContactForm {
    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
        if matches!(self.status, SubmitStatus::Error(_)) {
            self.status = SubmitStatus::Idle;
        }
    }

    /// Start a submission; `None` while one is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactRequest> {
        if self.status == SubmitStatus::Submitting {
            return None;
        }
        self.status = SubmitStatus::Submitting;
        Some(ContactRequest {
            name: Some(self.name.clone()),
            phone: Some(self.phone.clone()),
            message: Some(self.message.clone()),
        })
    }

    /// Record the outcome. Success clears the fields; an error keeps them so
    /// nothing typed is lost.
    pub fn finish(&mut self, outcome: Result<(), String>) {
        if self.status != SubmitStatus::Submitting {
            return;
        }
        match outcome {
            Ok(()) => {
                self.name.clear();
                self.phone.clear();
                self.message.clear();
                self.status = SubmitStatus::Success;
            }
            Err(message) => self.status = SubmitStatus::Error(message),
        }
    }

    /// Hide the success notice once it has been shown.
    pub fn dismiss_success(&mut self) {
        if self.status == SubmitStatus::Success {
            self.status = SubmitStatus::Idle;
        }
    }
}
