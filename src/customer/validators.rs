//! Validators specific to the customer form

use crate::forms::{ValidationError, ValidationErrors, Validator};

/// Group validator: `email` and `confirmEmail` must hold the same value.
///
/// Stays quiet while either control is pristine, so no mismatch is reported
/// before the user has typed a confirmation.
pub fn email_matcher() -> Validator {
    Validator::new("match", |group| {
        let email = group.child("email")?;
        let confirm = group.child("confirmEmail")?;

        if email.pristine() || confirm.pristine() {
            return None;
        }
        if email.field_value() == confirm.field_value() {
            return None;
        }
        Some(ValidationErrors::single(ValidationError::Match))
    })
}

/// Accepts null or a finite number within `[min, max]`
pub fn rating_range(min: f64, max: f64) -> Validator {
    Validator::new("range", move |control| {
        let value = control.field_value()?;
        if value.is_null() {
            return None;
        }
        let in_range = value
            .as_number()
            .is_some_and(|n| n.is_finite() && n >= min && n <= max);
        (!in_range).then(|| ValidationErrors::single(ValidationError::Range))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{Control, FieldValue, Form};

    fn email_form() -> Form {
        Form::new(
            [(
                "emailGroup",
                Control::group(
                    [
                        ("email", Control::field("", vec![])),
                        ("confirmEmail", Control::field("", vec![])),
                    ],
                    vec![email_matcher()],
                ),
            )],
            vec![],
        )
    }

    fn matches(form: &Form) -> bool {
        !form.get("emailGroup").unwrap().has_error("match")
    }

    mod email_match {
        use super::*;

        #[test]
        fn test_pristine_pair_never_mismatches() {
            let mut form = email_form();
            form.set_value("emailGroup.email", "a@mail.com").unwrap();
            form.set_value("emailGroup.confirmEmail", "b@mail.com").unwrap();
            assert!(matches(&form));
        }

        #[test]
        fn test_one_pristine_side_never_mismatches() {
            let mut form = email_form();
            form.input("emailGroup.email", "a@mail.com").unwrap();
            form.set_value("emailGroup.confirmEmail", "b@mail.com").unwrap();
            assert!(matches(&form));
        }

        #[test]
        fn test_edited_pair_with_equal_values() {
            let mut form = email_form();
            form.input("emailGroup.email", "a@mail.com").unwrap();
            form.input("emailGroup.confirmEmail", "a@mail.com").unwrap();
            assert!(matches(&form));
            assert!(form.valid());
        }

        #[test]
        fn test_edited_pair_with_different_values() {
            let mut form = email_form();
            form.input("emailGroup.email", "a@mail.com").unwrap();
            form.input("emailGroup.confirmEmail", "a@mail.co").unwrap();
            assert!(!matches(&form));
            assert!(form.invalid());

            // Fixing the confirmation clears the group error
            form.input("emailGroup.confirmEmail", "a@mail.com").unwrap();
            assert!(matches(&form));
        }

        #[test]
        fn test_group_without_expected_children_passes() {
            let group = Control::group([("email", Control::field("x", vec![]))], vec![]);
            assert!(email_matcher().validate(&group).is_none());
        }
    }

    mod rating_bounds {
        use super::*;

        fn range_error(value: impl Into<FieldValue>) -> bool {
            rating_range(1.0, 5.0)
                .validate(&Control::field(value, vec![]))
                .is_some_and(|e| e.contains("range"))
        }

        #[test]
        fn test_null_is_accepted() {
            assert!(!range_error(FieldValue::Null));
        }

        #[test]
        fn test_bounds_are_inclusive() {
            assert!(!range_error(1));
            assert!(!range_error(5));
            assert!(!range_error(3.5));
        }

        #[test]
        fn test_out_of_range() {
            assert!(range_error(0));
            assert!(range_error(6));
            assert!(range_error(-1));
            assert!(range_error(5.01));
        }

        #[test]
        fn test_non_numbers_rejected() {
            assert!(range_error("abc"));
            assert!(range_error(""));
            assert!(range_error(f64::NAN));
            assert!(range_error(f64::INFINITY));
        }

        #[test]
        fn test_numeric_text_is_coerced() {
            assert!(!range_error("4"));
            assert!(range_error("9"));
        }

        #[test]
        fn test_property_over_integer_grid() {
            for v in -10..=10 {
                let expected_ok = (1..=5).contains(&v);
                assert_eq!(!range_error(v), expected_ok, "value {v}");
            }
        }
    }
}
