//! Chess board piece placement representations.
mod mailbox;

pub use mailbox::{Mailbox, MovedGrid};
