use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;

/// Size of an IPv6 address in octets.
pub const ADDR_SIZE: usize = 16;

/// A sixteen-octet IPv6 address.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Address(pub [u8; ADDR_SIZE]);

impl Address {
    /// The [unspecified address].
    ///
    /// [unspecified address]: https://tools.ietf.org/html/rfc4291#section-2.5.2
    pub const UNSPECIFIED: Address = Address([0x00; ADDR_SIZE]);

    /// The link-local [all DHCP relay agents and servers] multicast address.
    ///
    /// [all DHCP relay agents and servers]: https://tools.ietf.org/html/rfc8415#section-7.1
    pub const ALL_DHCP_RELAY_AGENTS_AND_SERVERS: Address = Address([
        0xff, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
        0x02,
    ]);

    /// Construct an IPv6 address from parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(a0: u16, a1: u16, a2: u16, a3: u16, a4: u16, a5: u16, a6: u16, a7: u16) -> Address {
        let mut addr = [0u8; ADDR_SIZE];
        NetworkEndian::write_u16_into(&[a0, a1, a2, a3, a4, a5, a6, a7], &mut addr);
        Address(addr)
    }

    /// Construct an IPv6 address from a sequence of octets, in big-endian.
    ///
    /// # Panics
    /// The function panics if `data` is not sixteen octets long.
    pub fn from_bytes(data: &[u8]) -> Address {
        let mut bytes = [0; ADDR_SIZE];
        bytes.copy_from_slice(data);
        Address(bytes)
    }

    /// Construct the IPv4-mapped IPv6 address (`::ffff:a.b.c.d`) of an IPv4 address.
    pub fn from_ipv4_mapped(octets: [u8; 4]) -> Address {
        let mut bytes = [0; ADDR_SIZE];
        bytes[10] = 0xff;
        bytes[11] = 0xff;
        bytes[12..].copy_from_slice(&octets);
        Address(bytes)
    }

    /// Return an IPv6 address as a sequence of octets, in big-endian.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Query whether the IPv6 address is the unspecified address.
    pub fn is_unspecified(&self) -> bool {
        self.0 == [0x00; ADDR_SIZE]
    }

    /// Query whether the IPv6 address is an IPv4-mapped address.
    pub fn is_ipv4_mapped(&self) -> bool {
        self.0[..10] == [0; 10] && self.0[10..12] == [0xff, 0xff]
    }

    fn segments(&self) -> [u16; 8] {
        let mut words = [0u16; 8];
        NetworkEndian::read_u16_into(&self.0, &mut words);
        words
    }
}

#[cfg(feature = "std")]
impl From<::std::net::Ipv6Addr> for Address {
    fn from(x: ::std::net::Ipv6Addr) -> Address {
        Address(x.octets())
    }
}

#[cfg(feature = "std")]
impl From<Address> for ::std::net::Ipv6Addr {
    fn from(Address(x): Address) -> ::std::net::Ipv6Addr {
        x.into()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_ipv4_mapped() {
            return write!(
                f,
                "::ffff:{}.{}.{}.{}",
                self.0[12], self.0[13], self.0[14], self.0[15]
            );
        }

        // The longest run of zero words is collapsed to "::", the leftmost
        // one on ties. A lone zero word is printed as-is.
        let words = self.segments();
        let (mut best_start, mut best_len) = (0, 0);
        let mut i = 0;
        while i < words.len() {
            if words[i] == 0 {
                let start = i;
                while i < words.len() && words[i] == 0 {
                    i += 1;
                }
                if i - start > best_len {
                    best_start = start;
                    best_len = i - start;
                }
            } else {
                i += 1;
            }
        }

        if best_len < 2 {
            for (idx, word) in words.iter().enumerate() {
                if idx > 0 {
                    write!(f, ":")?;
                }
                write!(f, "{word:x}")?;
            }
            return Ok(());
        }

        for (idx, word) in words[..best_start].iter().enumerate() {
            if idx > 0 {
                write!(f, ":")?;
            }
            write!(f, "{word:x}")?;
        }
        write!(f, "::")?;
        for (idx, word) in words[best_start + best_len..].iter().enumerate() {
            if idx > 0 {
                write!(f, ":")?;
            }
            write!(f, "{word:x}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Address {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:02x}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            "fe80::1",
            format!("{}", Address::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))
        );
        assert_eq!(
            "2001:db8:0:1:1:1:1:1",
            format!("{}", Address::new(0x2001, 0xdb8, 0, 1, 1, 1, 1, 1))
        );
        assert_eq!(
            "2001:db8::1:0:0:1",
            format!("{}", Address::new(0x2001, 0xdb8, 0, 0, 1, 0, 0, 1))
        );
        assert_eq!("::", format!("{}", Address::UNSPECIFIED));
        assert_eq!("ff02::1:2", format!("{}", Address::ALL_DHCP_RELAY_AGENTS_AND_SERVERS));
    }

    #[test]
    fn test_ipv4_mapped() {
        let addr = Address::from_ipv4_mapped([8, 8, 8, 8]);
        assert!(addr.is_ipv4_mapped());
        assert!(!addr.is_unspecified());
        assert_eq!("::ffff:8.8.8.8", format!("{addr}"));
    }

    #[test]
    #[cfg(feature = "std")]
    fn test_std_conversion() {
        let std_addr: ::std::net::Ipv6Addr = "2001:db8::53".parse().unwrap();
        let addr = Address::from(std_addr);
        assert_eq!(addr, Address::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x53));
        assert_eq!(::std::net::Ipv6Addr::from(addr), std_addr);
    }
}
