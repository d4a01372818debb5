pub mod enums;
pub mod expenses;
pub mod subscriptions;
pub mod users;
pub mod validation;
