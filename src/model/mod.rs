pub mod contact;
pub mod user;
pub mod user_contact;

pub use contact::{ContactId, ContactSummary, NewContact};
pub use user::{NewUser, UserId};

// Full rows are only read back by the store tests.
#[cfg(test)]
pub use contact::Contact;
#[cfg(test)]
pub use user::User;
#[cfg(test)]
pub use user_contact::UserContact;
