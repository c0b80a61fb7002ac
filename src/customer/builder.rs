//! Shape of the customer form

use super::paths;
use super::validators::{email_matcher, rating_range};
use crate::config::FormConfig;
use crate::forms::{Control, FieldValue, Form, Validator};

/// Address type preselected for new address groups
pub const DEFAULT_ADDRESS_TYPE: &str = "home";

/// A fresh address group with every line empty
pub fn address_group() -> Control {
    Control::group(
        [
            ("addressType", Control::field(DEFAULT_ADDRESS_TYPE, vec![])),
            ("street1", Control::field("", vec![])),
            ("street2", Control::field("", vec![])),
            ("city", Control::field("", vec![])),
            ("state", Control::field("", vec![])),
            ("zip", Control::field("", vec![])),
        ],
        vec![],
    )
}

/// Build the customer form with its default values and validators
pub fn customer_form(config: &FormConfig) -> Form {
    let (rating_min, rating_max) = config.rating_bounds();

    Form::new(
        [
            (
                paths::FIRST_NAME,
                Control::field("", vec![Validator::required(), Validator::min_length(3)]),
            ),
            (
                paths::LAST_NAME,
                Control::field("", vec![Validator::required(), Validator::max_length(50)]),
            ),
            (
                paths::EMAIL_GROUP,
                Control::group(
                    [
                        (
                            "email",
                            Control::field("", vec![Validator::required(), Validator::email()]),
                        ),
                        ("confirmEmail", Control::field("", vec![Validator::required()])),
                    ],
                    vec![email_matcher()],
                ),
            ),
            (paths::PHONE, Control::field("", vec![])),
            (paths::NOTIFICATION, Control::field("", vec![])),
            (
                paths::RATING,
                Control::field(FieldValue::Null, vec![rating_range(rating_min, rating_max)]),
            ),
            (paths::SEND_CATALOG, Control::field(true, vec![])),
            (
                paths::ADDRESSES,
                Control::array(vec![address_group()], vec![]),
            ),
        ],
        vec![],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_values() {
        let form = customer_form(&FormConfig::default());
        assert_eq!(
            form.value(),
            json!({
                "firstName": "",
                "lastName": "",
                "emailGroup": { "email": "", "confirmEmail": "" },
                "phone": "",
                "notification": "",
                "rating": null,
                "sendCatalog": true,
                "addressesFormArray": [{
                    "addressType": "home",
                    "street1": "",
                    "street2": "",
                    "city": "",
                    "state": "",
                    "zip": "",
                }],
            })
        );
    }

    #[test]
    fn test_new_form_is_invalid_and_pristine() {
        let form = customer_form(&FormConfig::default());
        assert!(form.invalid());
        assert!(form.root().pristine());
        assert!(form.get(paths::FIRST_NAME).unwrap().has_error("required"));
        assert!(form.get(paths::EMAIL).unwrap().has_error("required"));
        assert!(form.get(paths::CONFIRM_EMAIL).unwrap().has_error("required"));
        assert!(form.get(paths::PHONE).unwrap().valid());
        assert!(form.get(paths::RATING).unwrap().valid());
        assert!(form.get(paths::ADDRESSES).unwrap().valid());
    }

    #[test]
    fn test_validators_attached() {
        let form = customer_form(&FormConfig::default());
        let first = form.get(paths::FIRST_NAME).unwrap();
        assert!(first.has_validator("required") && first.has_validator("minlength"));
        let last = form.get(paths::LAST_NAME).unwrap();
        assert!(last.has_validator("required") && last.has_validator("maxlength"));
        assert!(form.get(paths::EMAIL_GROUP).unwrap().has_validator("match"));
        assert!(form.get(paths::PHONE).unwrap().validators().is_empty());
    }

    #[test]
    fn test_rating_bounds_follow_config() {
        let config = FormConfig {
            rating_min: Some(0.0),
            rating_max: Some(10.0),
            ..Default::default()
        };
        let mut form = customer_form(&config);
        form.input(paths::RATING, 8).unwrap();
        assert!(form.get(paths::RATING).unwrap().valid());

        let mut form = customer_form(&FormConfig::default());
        form.input(paths::RATING, 8).unwrap();
        assert!(form.get(paths::RATING).unwrap().has_error("range"));
    }

    #[test]
    fn test_address_group_shape() {
        assert_eq!(
            address_group().value(),
            json!({
                "addressType": "home",
                "street1": "",
                "street2": "",
                "city": "",
                "state": "",
                "zip": "",
            })
        );
    }
}
