pub mod binder;
pub mod dispatcher;
