/*! DHCPv6 packets as collections of typed options.

A [Dhcpv6] packet is either a client/server [Message] or a [RelayMessage].
Both carry an [OptionSet]; the packet exposes the option accessors used by
the modifiers regardless of its shape, and [Dhcpv6::as_message_mut] narrows
to the client/server shape for the operations that only make sense there.
*/

mod option_set;

use core::fmt;

use crate::wire::dhcpv6::{HEADER_LEN, RELAY_HEADER_LEN};
use crate::wire::{
    Dhcpv6MessageType, Dhcpv6OptionWriter, Dhcpv6Packet, Error, Ipv6Address, OptionCode,
    OptionRepr, RelayPacket, Result,
};

pub use self::option_set::{OptionSet, OptionSlot};

/// A client/server message.
#[derive(Debug, PartialEq, Eq)]
pub struct Message<'a> {
    pub message_type: Dhcpv6MessageType,
    /// Only the low 24 bits are sent on the wire.
    pub transaction_id: u32,
    pub options: OptionSet<'a>,
}

impl<'a> Message<'a> {
    pub fn new(
        message_type: Dhcpv6MessageType,
        transaction_id: u32,
        options: OptionSet<'a>,
    ) -> Message<'a> {
        Message {
            message_type,
            transaction_id,
            options,
        }
    }
}

/// A relay agent/server message.
#[derive(Debug, PartialEq, Eq)]
pub struct RelayMessage<'a> {
    pub message_type: Dhcpv6MessageType,
    pub hop_count: u8,
    pub link_address: Ipv6Address,
    pub peer_address: Ipv6Address,
    pub options: OptionSet<'a>,
}

impl<'a> RelayMessage<'a> {
    /// A relay message with zero hops and unspecified link and peer
    /// addresses.
    pub fn new(message_type: Dhcpv6MessageType, options: OptionSet<'a>) -> RelayMessage<'a> {
        RelayMessage {
            message_type,
            hop_count: 0,
            link_address: Ipv6Address::UNSPECIFIED,
            peer_address: Ipv6Address::UNSPECIFIED,
            options,
        }
    }
}

/// A DHCPv6 packet of either shape.
#[derive(Debug, PartialEq, Eq)]
pub enum Dhcpv6<'a> {
    Message(Message<'a>),
    Relay(RelayMessage<'a>),
}

impl<'a> Dhcpv6<'a> {
    pub fn message_type(&self) -> Dhcpv6MessageType {
        match self {
            Dhcpv6::Message(msg) => msg.message_type,
            Dhcpv6::Relay(relay) => relay.message_type,
        }
    }

    pub fn options(&self) -> &OptionSet<'a> {
        match self {
            Dhcpv6::Message(msg) => &msg.options,
            Dhcpv6::Relay(relay) => &relay.options,
        }
    }

    pub fn options_mut(&mut self) -> &mut OptionSet<'a> {
        match self {
            Dhcpv6::Message(msg) => &mut msg.options,
            Dhcpv6::Relay(relay) => &mut relay.options,
        }
    }

    /// Return the first option stored under `code`, if any.
    pub fn get_one_option(&self, code: OptionCode) -> Option<&OptionRepr> {
        self.options().get_one(code)
    }

    /// Append an option, keeping any instance already stored under its code.
    pub fn add_option(&mut self, option: OptionRepr) -> Result<()> {
        self.options_mut().add(option)
    }

    /// Replace the options stored under the code of `option` with `option`.
    pub fn update_option(&mut self, option: OptionRepr) -> Result<()> {
        self.options_mut().update(option)
    }

    pub fn as_message(&self) -> Option<&Message<'a>> {
        match self {
            Dhcpv6::Message(msg) => Some(msg),
            Dhcpv6::Relay(_) => None,
        }
    }

    /// Narrow to the client/server shape.
    pub fn as_message_mut(&mut self) -> Option<&mut Message<'a>> {
        match self {
            Dhcpv6::Message(msg) => Some(msg),
            Dhcpv6::Relay(_) => None,
        }
    }

    /// Return the length of the packet once emitted.
    pub fn buffer_len(&self) -> usize {
        let header_len = match self {
            Dhcpv6::Message(_) => HEADER_LEN,
            Dhcpv6::Relay(_) => RELAY_HEADER_LEN,
        };
        let options: usize = self.options().iter().map(|o| o.buffer_len()).sum();
        header_len + options
    }

    /// Emit the packet into `buffer`, with its options in code order.
    ///
    /// Returns the number of octets written, or `Err(Error)` if the buffer
    /// is shorter than [Dhcpv6::buffer_len], an option cannot be encoded,
    /// or the message type calls for the other packet shape.
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        let is_relay = matches!(self, Dhcpv6::Relay(_));
        if self.message_type().is_relay() != is_relay {
            net_debug!("DHCPv6 {} cannot be emitted in this packet shape", self.message_type());
            return Err(Error);
        }
        let len = self.buffer_len();
        let buffer = buffer.get_mut(..len).ok_or(Error)?;
        match self {
            Dhcpv6::Message(msg) => {
                let mut packet = Dhcpv6Packet::new_unchecked(buffer);
                packet.set_message_type(msg.message_type);
                packet.set_transaction_id(msg.transaction_id);
                emit_options(&msg.options, &mut packet.options_mut())?;
            }
            Dhcpv6::Relay(relay) => {
                let mut packet = RelayPacket::new_unchecked(buffer);
                packet.set_message_type(relay.message_type);
                packet.set_hop_count(relay.hop_count);
                packet.set_link_address(relay.link_address);
                packet.set_peer_address(relay.peer_address);
                emit_options(&relay.options, &mut packet.options_mut())?;
            }
        }
        Ok(len)
    }

    /// Parse a packet from `data`, storing its options into `options`.
    ///
    /// Options with no typed representation are kept as
    /// [OptionRepr::Other]. A truncated header or option, or a malformed
    /// known option, is an error.
    pub fn parse(data: &[u8], mut options: OptionSet<'a>) -> Result<Dhcpv6<'a>> {
        let message_type = Dhcpv6MessageType::from(*data.first().ok_or(Error)?);
        if message_type.is_relay() {
            let packet = RelayPacket::new_checked(data)?;
            for option in packet.options() {
                options.add(OptionRepr::parse(option?)?)?;
            }
            Ok(Dhcpv6::Relay(RelayMessage {
                message_type,
                hop_count: packet.hop_count(),
                link_address: packet.link_address(),
                peer_address: packet.peer_address(),
                options,
            }))
        } else {
            let packet = Dhcpv6Packet::new_checked(data)?;
            for option in packet.options() {
                options.add(OptionRepr::parse(option?)?)?;
            }
            Ok(Dhcpv6::Message(Message {
                message_type,
                transaction_id: packet.transaction_id(),
                options,
            }))
        }
    }
}

fn emit_options(options: &OptionSet<'_>, writer: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
    for option in options.iter() {
        option.emit(writer)?;
    }
    Ok(())
}

impl<'a> fmt::Display for Dhcpv6<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dhcpv6::Message(msg) => write!(
                f,
                "DHCPv6 {} xid={:#08x}",
                msg.message_type, msg.transaction_id
            )?,
            Dhcpv6::Relay(relay) => write!(
                f,
                "DHCPv6 {} hop-count={} link={} peer={}",
                relay.message_type, relay.hop_count, relay.link_address, relay.peer_address
            )?,
        }
        for option in self.options().iter() {
            write!(f, " {option}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::{Duid, ReprRequestedOptions};

    static SOLICIT_BYTES: &[u8] = &[
        0x01, 0x10, 0x08, 0x74, // solicit, xid 0x100874
        0x00, 0x01, 0x00, 0x0a, // client-id, 10 octets
        0x00, 0x03, 0x00, 0x01, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, //
        0x00, 0x06, 0x00, 0x04, 0x00, 0x17, 0x00, 0x18, // oro 23, 24
        0x00, 0x08, 0x00, 0x02, 0x00, 0x00, // elapsed-time 0
    ];

    fn solicit_repr() -> Dhcpv6<'static> {
        let mut oro = ReprRequestedOptions::new();
        oro.add_requested_option(OptionCode::DnsServers);
        oro.add_requested_option(OptionCode::DomainList);
        let options: OptionSet = [
            OptionRepr::ClientId(Duid::new_ll(1, &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55])),
            OptionRepr::ElapsedTime(0),
            OptionRepr::RequestedOptions(oro),
        ]
        .into_iter()
        .collect();
        Dhcpv6::Message(Message::new(Dhcpv6MessageType::Solicit, 0x10_0874, options))
    }

    #[test]
    fn test_emit_code_order() {
        let repr = solicit_repr();
        assert_eq!(repr.buffer_len(), SOLICIT_BYTES.len());
        let mut bytes = vec![0xa5; repr.buffer_len()];
        assert_eq!(repr.emit(&mut bytes), Ok(SOLICIT_BYTES.len()));
        assert_eq!(&bytes[..], SOLICIT_BYTES);
    }

    #[test]
    fn test_emit_short_buffer() {
        let repr = solicit_repr();
        let mut bytes = vec![0; repr.buffer_len() - 1];
        assert_eq!(repr.emit(&mut bytes), Err(Error));
    }

    #[test]
    fn test_parse() {
        let repr = Dhcpv6::parse(SOLICIT_BYTES, OptionSet::new()).unwrap();
        assert_eq!(repr, solicit_repr());
        assert_eq!(repr.as_message().unwrap().transaction_id, 0x10_0874);
    }

    #[test]
    fn test_parse_truncated() {
        assert_eq!(Dhcpv6::parse(&[], OptionSet::new()), Err(Error));
        assert_eq!(Dhcpv6::parse(&SOLICIT_BYTES[..3], OptionSet::new()), Err(Error));
        assert_eq!(
            Dhcpv6::parse(&SOLICIT_BYTES[..SOLICIT_BYTES.len() - 1], OptionSet::new()),
            Err(Error)
        );
    }

    #[test]
    fn test_parse_unknown_option() {
        let bytes = [
            0x03, 0x00, 0x00, 0x01, // request, xid 1
            0x00, 0x07, 0x00, 0x01, 0xff, // preference 255
        ];
        let repr = Dhcpv6::parse(&bytes, OptionSet::new()).unwrap();
        assert_eq!(
            repr.get_one_option(OptionCode::Preference),
            Some(&OptionRepr::Other {
                kind: 7,
                data: vec![0xff]
            })
        );
    }

    #[test]
    fn test_relay() {
        let mut options = OptionSet::new();
        options
            .add(OptionRepr::Other {
                kind: OptionCode::InterfaceId.into(),
                data: vec![b'e', b't', b'h', b'0'],
            })
            .unwrap();
        let mut relay = RelayMessage::new(Dhcpv6MessageType::RelayForw, options);
        relay.hop_count = 1;
        relay.peer_address = Ipv6Address::new(0xfe80, 0, 0, 0, 0, 0, 0, 1);
        let mut repr = Dhcpv6::Relay(relay);
        assert!(repr.as_message_mut().is_none());
        assert_eq!(repr.buffer_len(), 34 + 8);

        let mut bytes = vec![0; repr.buffer_len()];
        repr.emit(&mut bytes).unwrap();
        assert_eq!(&bytes[0..2], &[12, 1]);
        assert_eq!(Dhcpv6::parse(&bytes, OptionSet::new()).unwrap(), repr);
    }

    #[test]
    fn test_emit_relay_shape_client_type() {
        let repr = Dhcpv6::Relay(RelayMessage::new(Dhcpv6MessageType::Solicit, OptionSet::new()));
        assert_eq!(repr.buffer_len(), 34);
        let mut bytes = vec![0; 4];
        assert_eq!(repr.emit(&mut bytes), Err(Error));
        let mut bytes = vec![0; 64];
        assert_eq!(repr.emit(&mut bytes), Err(Error));
    }

    #[test]
    fn test_emit_message_shape_relay_type() {
        let mut options = OptionSet::new();
        options.add(OptionRepr::ElapsedTime(7)).unwrap();
        let repr = Dhcpv6::Message(Message::new(Dhcpv6MessageType::RelayForw, 1, options));
        assert_eq!(repr.buffer_len(), 4 + 6);
        let mut bytes = vec![0; 64];
        assert_eq!(repr.emit(&mut bytes), Err(Error));
    }

    #[test]
    fn test_update_option() {
        let mut repr = solicit_repr();
        repr.update_option(OptionRepr::ElapsedTime(100)).unwrap();
        repr.add_option(OptionRepr::ElapsedTime(200)).unwrap();
        assert_eq!(
            repr.get_one_option(OptionCode::ElapsedTime),
            Some(&OptionRepr::ElapsedTime(100))
        );
        assert_eq!(repr.options().len(), 4);
    }

    #[test]
    fn test_display() {
        let repr = solicit_repr();
        let text = format!("{repr}");
        assert!(text.starts_with("DHCPv6 solicit xid=0x100874 client-id=00:03:00:01"));
        assert!(text.ends_with("elapsed-time=0/100s"));
    }
}
