mod prelude;

mod capabilities;
mod language_support;
mod server_management;
