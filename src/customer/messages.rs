//! Human-readable messages for email validation errors

use crate::forms::{Control, ValidationError};

/// Message shown for an email error, if one is defined
pub fn email_message_for(error: &ValidationError) -> Option<&'static str> {
    match error {
        ValidationError::Required => Some("Please enter your email address."),
        ValidationError::Email => Some("Please enter a valid email address."),
        _ => None,
    }
}

/// Message for the current state of the email control.
///
/// Empty unless the control has been touched or edited and holds errors.
/// Errors without a message are skipped.
pub fn email_message(control: &Control) -> String {
    if !(control.touched() || control.dirty()) {
        return String::new();
    }
    let Some(errors) = control.errors() else {
        return String::new();
    };
    errors
        .iter()
        .filter_map(email_message_for)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Form, Validator};

    fn email_form() -> Form {
        Form::new(
            [(
                "email",
                Control::field("", vec![Validator::required(), Validator::email()]),
            )],
            vec![],
        )
    }

    #[test]
    fn test_empty_while_untouched_and_pristine() {
        let form = email_form();
        assert!(form.get("email").unwrap().has_error("required"));
        assert_eq!(email_message(form.get("email").unwrap()), "");
    }

    #[test]
    fn test_required_message_after_blur() {
        let mut form = email_form();
        form.blur("email").unwrap();
        assert_eq!(
            email_message(form.get("email").unwrap()),
            "Please enter your email address."
        );
    }

    #[test]
    fn test_invalid_email_message_after_edit() {
        let mut form = email_form();
        form.input("email", "otto").unwrap();
        assert_eq!(
            email_message(form.get("email").unwrap()),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_empty_when_valid() {
        let mut form = email_form();
        form.input("email", "otto@mail.com").unwrap();
        assert_eq!(email_message(form.get("email").unwrap()), "");
    }

    #[test]
    fn test_unmapped_errors_contribute_nothing() {
        let mut form = Form::new(
            [(
                "email",
                Control::field("", vec![Validator::min_length(10), Validator::email()]),
            )],
            vec![],
        );
        form.input("email", "a@").unwrap();
        let control = form.get("email").unwrap();
        assert!(control.has_error("minlength"));
        assert!(control.has_error("email"));
        assert_eq!(email_message(control), "Please enter a valid email address.");
    }

    #[test]
    fn test_multiple_messages_join_with_single_space() {
        let both = Validator::new("both", |_| {
            let mut errors = crate::forms::ValidationErrors::single(ValidationError::Required);
            errors.insert(ValidationError::Email);
            Some(errors)
        });
        let mut form = Form::new([("email", Control::field("", vec![both]))], vec![]);
        form.blur("email").unwrap();
        assert_eq!(
            email_message(form.get("email").unwrap()),
            "Please enter your email address. Please enter a valid email address."
        );
    }
}
