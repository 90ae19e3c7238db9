mod common;
mod client_hello;
mod extensions;
mod record;
