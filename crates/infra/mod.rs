pub mod db;
pub mod reminders;
