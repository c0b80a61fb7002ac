//! Customer registration form: shape, validators, reactions and save

mod builder;
mod component;
mod messages;
mod save;
mod validators;

pub use builder::{address_group, customer_form, DEFAULT_ADDRESS_TYPE};
pub use component::{CustomerComponent, FormEvent};
pub use messages::{email_message, email_message_for};
pub use save::{LogSink, SaveRecord, SaveSink};
pub use validators::{email_matcher, rating_range};

#[cfg(test)]
pub use save::MockSaveSink;

/// Control paths of the customer form
pub mod paths {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL_GROUP: &str = "emailGroup";
    pub const EMAIL: &str = "emailGroup.email";
    pub const CONFIRM_EMAIL: &str = "emailGroup.confirmEmail";
    pub const PHONE: &str = "phone";
    pub const NOTIFICATION: &str = "notification";
    pub const RATING: &str = "rating";
    pub const SEND_CATALOG: &str = "sendCatalog";
    pub const ADDRESSES: &str = "addressesFormArray";
}
