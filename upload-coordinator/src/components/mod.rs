pub mod selector;
pub mod session;
pub mod viewer;
