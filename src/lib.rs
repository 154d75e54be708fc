#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

//! Composable option modifiers for building DHCPv6 messages.
//!
//! A DHCPv6 message is assembled by folding a list of _modifiers_ over a
//! starting packet. Each modifier is a small transformation that adds or
//! updates exactly one option, using the merge discipline that option
//! requires:
//!
//! * identifiers, DNS servers, domain search lists, user classes and
//!   architecture types are replaced wholesale;
//! * the option request list and the IA_NA address binding accumulate
//!   into the single instance already present in the packet.
//!
//! The crate is organized in three layers:
//!
//! * [wire]: option codes, typed option representations and the
//!   encoder/decoder for the RFC 8415 wire format;
//! * [packet]: the packet shapes (client/server message, relay message)
//!   and the option map they carry;
//! * [modifier]: the modifier factories and the [apply](modifier::apply)
//!   fold.
//!
//! # Example
//!
//! ```rust
//! use dhcpv6_modifiers::modifier::{self, Modifier};
//! use dhcpv6_modifiers::packet::{Dhcpv6, Message, OptionSet};
//! use dhcpv6_modifiers::wire::{Duid, Dhcpv6MessageType, OptionCode};
//!
//! let duid = Duid::new_ll(1, &[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! let solicit = Dhcpv6::Message(Message::new(
//!     Dhcpv6MessageType::Solicit,
//!     0x12_3456,
//!     OptionSet::new(),
//! ));
//!
//! let client_id = modifier::with_client_id(duid);
//! let oro = modifier::with_requested_options(&[OptionCode::DnsServers]);
//! let modifiers: [&dyn Modifier; 3] = [&client_id, &oro, &modifier::with_netboot];
//! let solicit = modifier::apply(solicit, &modifiers);
//!
//! assert_eq!(solicit.options().len(), 2);
//! ```

#[cfg(not(any(feature = "std", feature = "alloc")))]
compile_error!("You must enable at least one of the following features: std, alloc");

#[cfg(all(feature = "log", feature = "defmt"))]
compile_error!("You must enable at most one of the following features: defmt, log");

extern crate alloc;

#[macro_use]
mod macros;

pub mod modifier;
pub mod packet;
pub mod wire;
