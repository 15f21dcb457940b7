#![doc = include_str!("../README.md")]

#[cfg(feature = "client")]
pub mod client;
mod quote;
mod rand;
pub mod starfield;
mod thread_random;
mod time;

pub use crate::quote::*;
pub use crate::rand::*;
pub use crate::thread_random::*;
pub use crate::time::*;
