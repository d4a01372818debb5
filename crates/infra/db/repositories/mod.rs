pub mod expenses;
pub mod subscriptions;
pub mod users;
