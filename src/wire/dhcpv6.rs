// See https://datatracker.ietf.org/doc/html/rfc8415 for the DHCPv6 specification.

use byteorder::{ByteOrder, NetworkEndian};
use core::{fmt, iter};

use super::ipv6::{Address, ADDR_SIZE};
use super::{Error, Result};

pub const SERVER_PORT: u16 = 547;
pub const CLIENT_PORT: u16 = 546;

/// Size of the option-code and option-len fields that precede every option.
pub const OPTION_HEADER_LEN: usize = 4;

enum_with_unknown! {
    /// The possible message types of a DHCP packet.
    pub enum MessageType(u8) {
        Solicit = 1,
        Advertise = 2,
        Request = 3,
        Confirm = 4,
        Renew = 5,
        Rebind = 6,
        Reply = 7,
        Release = 8,
        Decline = 9,
        Reconfigure = 10,
        InformationRequest = 11,
        RelayForw = 12,
        RelayRepl = 13,
        LeaseQuery = 14,
        LeaseQueryReply = 15,
        LeaseQueryDone = 16,
        LeaseQueryData = 17,
    }
}

impl MessageType {
    /// Whether messages of this type use the relay agent/server layout
    /// (hop-count, link-address, peer-address) instead of the client/server one.
    pub fn is_relay(&self) -> bool {
        matches!(*self, Self::RelayForw | Self::RelayRepl)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Solicit => write!(f, "solicit"),
            Self::Advertise => write!(f, "advertise"),
            Self::Request => write!(f, "request"),
            Self::Confirm => write!(f, "confirm"),
            Self::Renew => write!(f, "renew"),
            Self::Rebind => write!(f, "rebind"),
            Self::Reply => write!(f, "reply"),
            Self::Release => write!(f, "release"),
            Self::Decline => write!(f, "decline"),
            Self::Reconfigure => write!(f, "reconfigure"),
            Self::InformationRequest => write!(f, "information-request"),
            Self::RelayForw => write!(f, "relay-forw"),
            Self::RelayRepl => write!(f, "relay-repl"),
            Self::LeaseQuery => write!(f, "lease-query"),
            Self::LeaseQueryReply => write!(f, "lease-query-reply"),
            Self::LeaseQueryDone => write!(f, "lease-query-done"),
            Self::LeaseQueryData => write!(f, "lease-query-data"),
            Self::Unknown(a) => write!(f, "unknown({a})"),
        }
    }
}

enum_with_unknown! {
    /// DHCPv6 option codes.
    ///
    /// See the "Option Codes" registry at
    /// <https://www.iana.org/assignments/dhcpv6-parameters> for the full list.
    pub enum OptionCode(u16) {
        /// DUID of the client (RFC 8415, section 21.2).
        ClientId = 1,
        /// DUID of the server (RFC 8415, section 21.3).
        ServerId = 2,
        /// Identity Association for Non-temporary Addresses.
        IaNa = 3,
        /// Identity Association for Temporary Addresses.
        IaTa = 4,
        /// IA Address, only valid inside IA_NA or IA_TA.
        IaAddr = 5,
        /// Option Request option: the codes the client wants back.
        Oro = 6,
        Preference = 7,
        /// Hundredths of a second since the client began the exchange.
        ElapsedTime = 8,
        RelayMsg = 9,
        Auth = 11,
        Unicast = 12,
        StatusCode = 13,
        RapidCommit = 14,
        /// One or more opaque user class entries (RFC 8415, section 21.15).
        UserClass = 15,
        VendorClass = 16,
        VendorOpts = 17,
        InterfaceId = 18,
        ReconfMsg = 19,
        ReconfAccept = 20,
        /// DNS recursive name servers (RFC 3646).
        DnsServers = 23,
        /// Domain search list (RFC 3646).
        DomainList = 24,
        IaPd = 25,
        IaPrefix = 26,
        InformationRefreshTime = 32,
        Fqdn = 39,
        /// Boot file URL (RFC 5970, section 3.1).
        BootfileUrl = 59,
        /// Boot file parameters (RFC 5970, section 3.2).
        BootfileParam = 60,
        /// Client system architecture type (RFC 5970, section 3.3).
        ClientArchType = 61,
        /// Client network interface identifier (RFC 5970, section 3.4).
        Nii = 62,
        SolMaxRt = 82,
        InfMaxRt = 83,
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::ClientId => write!(f, "client-id"),
            Self::ServerId => write!(f, "server-id"),
            Self::IaNa => write!(f, "ia-na"),
            Self::IaTa => write!(f, "ia-ta"),
            Self::IaAddr => write!(f, "ia-addr"),
            Self::Oro => write!(f, "oro"),
            Self::Preference => write!(f, "preference"),
            Self::ElapsedTime => write!(f, "elapsed-time"),
            Self::RelayMsg => write!(f, "relay-msg"),
            Self::Auth => write!(f, "auth"),
            Self::Unicast => write!(f, "unicast"),
            Self::StatusCode => write!(f, "status-code"),
            Self::RapidCommit => write!(f, "rapid-commit"),
            Self::UserClass => write!(f, "user-class"),
            Self::VendorClass => write!(f, "vendor-class"),
            Self::VendorOpts => write!(f, "vendor-opts"),
            Self::InterfaceId => write!(f, "interface-id"),
            Self::ReconfMsg => write!(f, "reconf-msg"),
            Self::ReconfAccept => write!(f, "reconf-accept"),
            Self::DnsServers => write!(f, "dns-servers"),
            Self::DomainList => write!(f, "domain-list"),
            Self::IaPd => write!(f, "ia-pd"),
            Self::IaPrefix => write!(f, "ia-prefix"),
            Self::InformationRefreshTime => write!(f, "information-refresh-time"),
            Self::Fqdn => write!(f, "fqdn"),
            Self::BootfileUrl => write!(f, "bootfile-url"),
            Self::BootfileParam => write!(f, "bootfile-param"),
            Self::ClientArchType => write!(f, "client-arch-type"),
            Self::Nii => write!(f, "nii"),
            Self::SolMaxRt => write!(f, "sol-max-rt"),
            Self::InfMaxRt => write!(f, "inf-max-rt"),
            Self::Unknown(a) => write!(f, "unknown({a})"),
        }
    }
}

// The format of DHCP options is:
//
//  0                   1                   2                   3
//  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |          option-code          |           option-len          |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
// |                          option-data                          |
// |                      (option-len octets)                      |
// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//
// Options are stored serially with no padding between them. Options
// scoped to an IA or an address are encapsulated in the option-data of
// their container.
//
/// A raw view of a single DHCP option.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dhcpv6Option<'a> {
    pub kind: u16,
    pub data: &'a [u8],
}

impl<'a> Dhcpv6Option<'a> {
    /// The option code of this option.
    pub fn code(&self) -> OptionCode {
        OptionCode::from(self.kind)
    }
}

/// A buffer for DHCP options.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dhcpv6OptionWriter<'a> {
    /// The underlying buffer, directly from the DHCP packet representation.
    buffer: &'a mut [u8],
    /// Number of octets emitted so far.
    written: usize,
}

impl<'a> Dhcpv6OptionWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, written: 0 }
    }

    /// Emit a  [`Dhcpv6Option`] into a [`Dhcpv6OptionWriter`].
    pub fn emit(&mut self, option: Dhcpv6Option<'_>) -> Result<()> {
        let data = self.reserve(option.kind, option.data.len())?;
        data.copy_from_slice(option.data);
        Ok(())
    }

    /// Write the header of an option with `len` octets of data, and return
    /// the data area for the caller to fill in.
    pub fn reserve(&mut self, kind: u16, len: usize) -> Result<&'a mut [u8]> {
        if len > u16::MAX as usize {
            return Err(Error);
        }

        let total_len = OPTION_HEADER_LEN + len;
        if self.buffer.len() < total_len {
            return Err(Error);
        }

        let (buf, rest) = core::mem::take(&mut self.buffer).split_at_mut(total_len);
        self.buffer = rest;
        self.written += total_len;

        NetworkEndian::write_u16(&mut buf[0..2], kind);
        NetworkEndian::write_u16(&mut buf[2..4], len as u16);
        Ok(&mut buf[OPTION_HEADER_LEN..])
    }

    /// Number of octets emitted so far.
    pub fn written(&self) -> usize {
        self.written
    }
}

/// Return an iterator over the options in `buf`.
///
/// The iterator yields a single `Err(Error)` and stops if the buffer ends in
/// the middle of an option.
#[inline]
pub fn parse_options(mut buf: &[u8]) -> impl Iterator<Item = Result<Dhcpv6Option<'_>>> + '_ {
    iter::from_fn(move || {
        if buf.is_empty() {
            return None;
        }
        if buf.len() < OPTION_HEADER_LEN {
            buf = &[];
            return Some(Err(Error));
        }

        let kind = NetworkEndian::read_u16(&buf[0..2]);
        let len = NetworkEndian::read_u16(&buf[2..4]) as usize;
        if buf.len() < OPTION_HEADER_LEN + len {
            buf = &[];
            return Some(Err(Error));
        }

        let opt = Dhcpv6Option {
            kind,
            data: &buf[OPTION_HEADER_LEN..OPTION_HEADER_LEN + len],
        };
        buf = &buf[OPTION_HEADER_LEN + len..];
        Some(Ok(opt))
    })
}

pub(crate) mod field {
    #![allow(non_snake_case)]
    #![allow(unused)]

    use crate::wire::field::*;

    // All DHCP messages sent between clients and servers share an identical
    // fixed-format header and a variable-format area for options.
    //
    //     0                   1                   2                   3
    //     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //    |    msg-type   |               transaction-id                  |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //    |                                                               |
    //    .                            options                            .
    //    .                 (variable number and length)                  .
    //    |                                                               |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //
    //                Figure 2: Client/Server Message Format
    pub const MTYPE: usize = 0;
    pub const XID: Field = 1..4;
    pub const OPTIONS: Rest = 4..;

    // Relay agents and servers use a different header:
    //
    //     0                   1                   2                   3
    //     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //    |    msg-type   |   hop-count   |                               |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
    //    |                                                               |
    //    |                         link-address                          |
    //    |                                                               |
    //    |                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //    |                               |                               |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
    //    |                                                               |
    //    |                         peer-address                          |
    //    |                                                               |
    //    |                               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //    |                               |                               |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
    //    .                                                               .
    //    .            options (variable number and length)   ....        .
    //    |                                                               |
    //    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
    //
    //                   Figure 3: Relay Agent/Server Message Format
    pub const HOP_COUNT: usize = 1;
    pub const LINK_ADDR: Field = 2..18;
    pub const PEER_ADDR: Field = 18..34;
    pub const RELAY_OPTIONS: Rest = 34..;
}

/// A read/write wrapper around a DHCPv6 client/server message buffer.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Packet<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> Packet<T> {
    /// Imbue a raw octet buffer with DHCP packet structure.
    pub const fn new_unchecked(buffer: T) -> Packet<T> {
        Packet { buffer }
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(buffer: T) -> Result<Packet<T>> {
        let packet = Self::new_unchecked(buffer);
        packet.check_len()?;
        Ok(packet)
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error)` if the buffer is too short.
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len < field::OPTIONS.start {
            Err(Error)
        } else {
            Ok(())
        }
    }

    /// Consume the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Returns the message type.
    pub fn message_type(&self) -> MessageType {
        MessageType::from(self.buffer.as_ref()[field::MTYPE])
    }

    /// Returns the transaction ID.
    ///
    /// The transaction ID (called `xid` in the specification) is a random number used to
    /// associate messages and responses between client and server. The number is chosen by
    /// the client.
    pub fn transaction_id(&self) -> u32 {
        let field = &self.buffer.as_ref()[field::XID];
        NetworkEndian::read_u24(field)
    }

    /// Return an iterator over the options.
    #[inline]
    pub fn options(&self) -> impl Iterator<Item = Result<Dhcpv6Option<'_>>> + '_ {
        parse_options(&self.buffer.as_ref()[field::OPTIONS])
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> Packet<T> {
    /// Sets the message type.
    pub fn set_message_type(&mut self, value: MessageType) {
        let field = &mut self.buffer.as_mut()[field::MTYPE];
        *field = value.into();
    }

    /// Sets the transaction ID.
    ///
    /// Only the low 24 bits are stored.
    pub fn set_transaction_id(&mut self, value: u32) {
        let value = value & 0xff_ffff;
        let field = &mut self.buffer.as_mut()[field::XID];
        NetworkEndian::write_u24(field, value)
    }

    /// Return a writer over the options area.
    #[inline]
    pub fn options_mut(&mut self) -> Dhcpv6OptionWriter<'_> {
        Dhcpv6OptionWriter::new(&mut self.buffer.as_mut()[field::OPTIONS])
    }
}

/// A read/write wrapper around a DHCPv6 relay agent/server message buffer.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayPacket<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> RelayPacket<T> {
    /// Imbue a raw octet buffer with DHCP relay packet structure.
    pub const fn new_unchecked(buffer: T) -> RelayPacket<T> {
        RelayPacket { buffer }
    }

    /// Shorthand for a combination of [new_unchecked] and [check_len].
    ///
    /// [new_unchecked]: #method.new_unchecked
    /// [check_len]: #method.check_len
    pub fn new_checked(buffer: T) -> Result<RelayPacket<T>> {
        let packet = Self::new_unchecked(buffer);
        packet.check_len()?;
        Ok(packet)
    }

    /// Ensure that no accessor method will panic if called.
    /// Returns `Err(Error)` if the buffer is too short.
    pub fn check_len(&self) -> Result<()> {
        if self.buffer.as_ref().len() < field::RELAY_OPTIONS.start {
            Err(Error)
        } else {
            Ok(())
        }
    }

    /// Consume the packet, returning the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    pub fn message_type(&self) -> MessageType {
        MessageType::from(self.buffer.as_ref()[field::MTYPE])
    }

    /// Number of relay agents that have already relayed this message.
    pub fn hop_count(&self) -> u8 {
        self.buffer.as_ref()[field::HOP_COUNT]
    }

    pub fn link_address(&self) -> Address {
        Address::from_bytes(&self.buffer.as_ref()[field::LINK_ADDR])
    }

    pub fn peer_address(&self) -> Address {
        Address::from_bytes(&self.buffer.as_ref()[field::PEER_ADDR])
    }

    /// Return an iterator over the options.
    #[inline]
    pub fn options(&self) -> impl Iterator<Item = Result<Dhcpv6Option<'_>>> + '_ {
        parse_options(&self.buffer.as_ref()[field::RELAY_OPTIONS])
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> RelayPacket<T> {
    pub fn set_message_type(&mut self, value: MessageType) {
        self.buffer.as_mut()[field::MTYPE] = value.into();
    }

    pub fn set_hop_count(&mut self, value: u8) {
        self.buffer.as_mut()[field::HOP_COUNT] = value;
    }

    pub fn set_link_address(&mut self, value: Address) {
        self.buffer.as_mut()[field::LINK_ADDR].copy_from_slice(value.as_bytes());
    }

    pub fn set_peer_address(&mut self, value: Address) {
        self.buffer.as_mut()[field::PEER_ADDR].copy_from_slice(value.as_bytes());
    }

    /// Return a writer over the options area.
    #[inline]
    pub fn options_mut(&mut self) -> Dhcpv6OptionWriter<'_> {
        Dhcpv6OptionWriter::new(&mut self.buffer.as_mut()[field::RELAY_OPTIONS])
    }
}

/// Length of the fixed header of a client/server message.
pub const HEADER_LEN: usize = field::OPTIONS.start;
/// Length of the fixed header of a relay agent/server message.
pub const RELAY_HEADER_LEN: usize = field::RELAY_OPTIONS.start;

const _: () = assert!(field::PEER_ADDR.end - field::PEER_ADDR.start == ADDR_SIZE);
