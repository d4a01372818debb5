pub mod log_dispatcher;
