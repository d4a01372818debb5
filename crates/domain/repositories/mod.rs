pub mod expenses;
pub mod reminder_dispatcher;
pub mod subscriptions;
pub mod users;
