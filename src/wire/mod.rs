/*! Low-level DHCPv6 wire representation.

The `wire` module deals with the DHCPv6 wire format and the typed
representations of the options carried in it.

The wire representation is split in two layers, the same way throughout:

 * The `Packet` family of structures (e.g. [Dhcpv6Packet], [RelayPacket])
   are thin wrappers around byte buffers that provide checked accessors for
   the fixed header fields and an iterator over the raw options.
 * The `Repr` family of structures (e.g. [ReprIaNa], [ReprDnsServers]) and
   the [OptionRepr] enum are owned, high-level representations of single
   options. They can be parsed from a raw [Dhcpv6Option] and emitted through
   a [Dhcpv6OptionWriter].

Every fallible operation here returns [Result], whose error carries no
detail beyond "the buffer did not hold what was expected".
*/

mod field {
    pub type Field = ::core::ops::Range<usize>;
    pub type Rest = ::core::ops::RangeFrom<usize>;
}

pub mod dhcpv6;
mod dhcpv6_option;
pub mod iana;
pub mod ipv6;
pub mod rfc1035;

use core::fmt;

pub use self::dhcpv6::{
    parse_options, Dhcpv6Option, Dhcpv6OptionWriter, MessageType as Dhcpv6MessageType,
    OptionCode, Packet as Dhcpv6Packet, RelayPacket, CLIENT_PORT as DHCPV6_CLIENT_PORT,
    SERVER_PORT as DHCPV6_SERVER_PORT,
};

pub use self::dhcpv6_option::{
    Duid, DuidType, OptionRepr, ReprClientArchType, ReprDnsServers, ReprDomainSearchList,
    ReprIaAddr, ReprIaNa, ReprRequestedOptions, ReprStatusCode, ReprUserClass,
    StatusCode as Dhcpv6StatusCode, MAX_ARCH_TYPES, MAX_DNS_ADDRESSES, MAX_DUID_LEN,
    MAX_IA_ADDRESSES, MAX_REQUEST_OPTIONS, MAX_USER_CLASSES, MAX_USER_CLASS_LEN,
};

pub use self::iana::Arch;

pub use self::ipv6::Address as Ipv6Address;

pub use self::rfc1035::{Labels, MAX_DOMAIN_NAME_LEN, MAX_SEARCH_DOMAINS};

/// Parsing or emitting a packet failed.
///
/// Either the buffer was too short, a length field disagreed with the data
/// that follows it, or a bounded storage was full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Error;

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "wire::Error")
    }
}

pub type Result<T> = core::result::Result<T, Error>;
