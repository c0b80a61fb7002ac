//! Customer form component: event handling and reactions

use super::builder::{address_group, customer_form};
use super::messages::email_message;
use super::paths;
use super::save::{SaveRecord, SaveSink};
use crate::config::FormConfig;
use crate::debounce::Debouncer;
use crate::forms::{ArrayControl, FieldValue, Form, FormError, Validator};
use serde_json::json;
use std::collections::VecDeque;
use tokio::sync::{mpsc, watch};

/// Notification choice that makes `phone` required
const NOTIFY_BY_TEXT: &str = "text";

/// Input to the component
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The user changed a field
    Input { path: String, value: FieldValue },
    /// Focus left a field
    Blur { path: String },
    /// Fill the form with sample customer data
    PopulateTestData,
    /// Append an empty address group
    AddAddress,
    /// Snapshot the form to the save sink
    Save,
    /// Stop the event loop
    Shutdown,
}

impl FormEvent {
    pub fn input(path: &str, value: impl Into<FieldValue>) -> Self {
        FormEvent::Input {
            path: path.to_string(),
            value: value.into(),
        }
    }

    pub fn blur(path: &str) -> Self {
        FormEvent::Blur {
            path: path.to_string(),
        }
    }
}

/// The customer form plus its reactions
pub struct CustomerComponent {
    form: Form,
    /// Latest email message, published to subscribers
    email_message: watch::Sender<String>,
    email_debounce: Debouncer<FieldValue>,
    sink: Box<dyn SaveSink>,
    quit: bool,
}

impl CustomerComponent {
    /// Create the component with a freshly built form
    pub fn new(config: &FormConfig, sink: Box<dyn SaveSink>) -> Self {
        let (email_message, _) = watch::channel(String::new());
        Self {
            form: customer_form(config),
            email_message,
            email_debounce: Debouncer::new(config.debounce_window()),
            sink,
            quit: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Current email message (empty when there is nothing to report)
    pub fn email_message(&self) -> String {
        self.email_message.borrow().clone()
    }

    /// Receive every recomputation of the email message
    pub fn subscribe_email_message(&self) -> watch::Receiver<String> {
        self.email_message.subscribe()
    }

    /// The address array
    pub fn addresses(&self) -> Result<&ArrayControl, FormError> {
        self.form
            .get(paths::ADDRESSES)?
            .as_array()
            .ok_or_else(|| FormError::WrongKind {
                path: paths::ADDRESSES.to_string(),
                expected: "array",
            })
    }

    /// Check if the event loop should stop
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one event
    pub fn handle_event(&mut self, event: FormEvent) {
        let result = match event {
            FormEvent::Input { path, value } => self.input(&path, value),
            FormEvent::Blur { path } => self.form.blur(&path),
            FormEvent::PopulateTestData => {
                self.populate_test_data();
                Ok(())
            }
            FormEvent::AddAddress => self.add_address(),
            FormEvent::Save => {
                self.save();
                Ok(())
            }
            FormEvent::Shutdown => {
                self.email_debounce.cancel();
                self.quit = true;
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::warn!("Dropped form event: {e}");
        }
    }

    /// A user edit of one field
    pub fn input(&mut self, path: &str, value: FieldValue) -> Result<(), FormError> {
        let changes = self.form.input(path, value)?;
        self.dispatch(changes);
        Ok(())
    }

    /// Make `phone` required when notifications go by text, optional otherwise
    pub fn set_notification(&mut self, notify_via: &str) -> Result<Vec<String>, FormError> {
        if notify_via == NOTIFY_BY_TEXT {
            self.form
                .set_validators(paths::PHONE, vec![Validator::required()])?;
        } else {
            self.form.clear_validators(paths::PHONE)?;
        }
        tracing::debug!(notify_via, "Updated phone validators");
        self.form.update_value_and_validity(paths::PHONE)
    }

    /// Recompute the email message from the control's current state
    pub fn set_message(&mut self) {
        let message = match self.form.get(paths::EMAIL) {
            Ok(control) => email_message(control),
            Err(e) => {
                tracing::warn!("Cannot compute email message: {e}");
                String::new()
            }
        };
        tracing::debug!(message = %message, "Email message updated");
        self.email_message.send_replace(message);
    }

    /// Append an empty address group
    pub fn add_address(&mut self) -> Result<(), FormError> {
        let changes = self.form.push(paths::ADDRESSES, address_group())?;
        tracing::debug!(count = self.addresses()?.len(), "Added address");
        self.dispatch(changes);
        Ok(())
    }

    /// Fill the form with a sample customer
    pub fn populate_test_data(&mut self) {
        let changes = self.form.patch_value(&json!({
            (paths::FIRST_NAME): "Otto",
            (paths::LAST_NAME): "Normalo",
            (paths::EMAIL_GROUP): { "email": "ottonormalisto@mail.com" },
            (paths::PHONE): "",
            (paths::NOTIFICATION): "email",
            (paths::SEND_CATALOG): false,
        }));
        self.dispatch(changes);
    }

    /// Snapshot the form value to the save sink; the form is not checked first
    pub fn save(&mut self) {
        let record = SaveRecord::new(self.form.value(), self.form.valid());
        if !record.valid {
            tracing::warn!("Saving a form that does not pass validation");
        }
        tracing::debug!(form = ?self.form.root(), "Form state at save");
        self.sink.write(&record);
    }

    /// Run reactions for changed paths, including changes the reactions make
    fn dispatch(&mut self, changes: Vec<String>) {
        let mut queue: VecDeque<String> = changes.into();
        while let Some(path) = queue.pop_front() {
            match path.as_str() {
                paths::NOTIFICATION => {
                    let notify_via = self.field_text(paths::NOTIFICATION);
                    match self.set_notification(&notify_via) {
                        Ok(more) => queue.extend(more),
                        Err(e) => tracing::warn!("Notification reaction failed: {e}"),
                    }
                }
                paths::EMAIL => {
                    if let Some(value) = self
                        .form
                        .get(paths::EMAIL)
                        .ok()
                        .and_then(|c| c.field_value())
                    {
                        self.email_debounce.push(value.clone());
                    }
                }
                _ => {}
            }
        }
    }

    fn field_text(&self, path: &str) -> String {
        self.form
            .get(path)
            .ok()
            .and_then(|c| c.field_value())
            .map(|v| v.as_text().to_string())
            .unwrap_or_default()
    }

    /// Drive the component from a channel until shutdown or channel close
    pub async fn run(mut self, mut events: mpsc::Receiver<FormEvent>) -> Self {
        tracing::info!("Customer form running");
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                value = self.email_debounce.ready(), if self.email_debounce.is_pending() => {
                    tracing::debug!(?value, "Email settled");
                    self.set_message();
                }
            }

            if self.should_quit() {
                break;
            }
        }
        tracing::info!("Customer form stopped");
        self
    }
}
