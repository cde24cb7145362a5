#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
mod common;
mod config;
mod fleet;
mod game;
mod moves;
mod placement;
mod ship;

#[cfg(feature = "std")]
mod cli;
#[cfg(feature = "std")]
mod controller;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
mod ranking;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
mod timer;
#[cfg(feature = "std")]
pub mod transport;

pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use moves::*;
pub use placement::*;
pub use ship::*;

#[cfg(feature = "std")]
pub use cli::*;
#[cfg(feature = "std")]
pub use controller::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::*;
#[cfg(feature = "std")]
pub use ranking::*;
#[cfg(feature = "std")]
pub use server::{serve, LocalServer, SESSION_IDLE_TIMEOUT};
#[cfg(feature = "std")]
pub use skeleton::*;
#[cfg(feature = "std")]
pub use stub::*;
#[cfg(feature = "std")]
pub use timer::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
