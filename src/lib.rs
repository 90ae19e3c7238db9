#![forbid(unsafe_code)]
#![warn(clippy::all)]
// #![deny(missing_docs)]

//! Wire codec for TLS 1.3 plaintext records.
//!
//! Decodes and encodes the record envelope, the handshake envelope, alerts,
//! and ClientHello with its extensions. Every length field is checked against
//! the bytes it covers, on the way in and on the way out.
//!
//! ```
//! use tls13wire::message::{Alert, Plaintext};
//!
//! let record = Plaintext::decode(&[0x15, 0x03, 0x03, 0x00, 0x02, 0x01, 0x00]).unwrap();
//! assert_eq!(record.as_alert().unwrap(), &Alert::close_notify());
//! ```

#[macro_use]
extern crate log;

mod config;
pub use config::{Config, ConfigBuilder};

mod error;
pub use error::Error;

pub mod message;

mod util;
