//! Event and message types exchanged across systems.
//!
//! Observer events ([`collision`], [`destroyed`], [`arrival`],
//! [`gamestate`]) fire immediately through `commands.trigger`; mailbox
//! messages ([`audio`], [`grade`]) buffer through `Messages<T>` and are
//! drained by the host once per rendered frame.

pub mod arrival;
pub mod audio;
pub mod collision;
pub mod destroyed;
pub mod gamestate;
pub mod grade;
