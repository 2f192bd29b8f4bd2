pub mod dispatcher;
pub mod seen;
