// Server module entry
// Listener setup for the accept loop in main

pub mod listener;

pub use listener::bind_listener;
