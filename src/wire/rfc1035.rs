// See https://datatracker.ietf.org/doc/html/rfc1035#section-3.1 for the
// domain name encoding, and RFC 8415 section 10 for its use in DHCPv6.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;
use heapless::Vec;

use super::{Error, Result};

/// Maximum number of domain names in a [Labels] list.
pub const MAX_SEARCH_DOMAINS: usize = 8;
/// Maximum length of a single domain name, in its dotted text form.
pub const MAX_DOMAIN_NAME_LEN: usize = 255;
/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Upper bound on compression pointers followed while decoding one name.
const MAX_POINTER_HOPS: usize = 16;

/// A list of domain names, as carried in the Domain Search List option.
///
/// Names are kept in their dotted text form (`"example.com"`). They are
/// emitted uncompressed, since RFC 8415 forbids compression in DHCP, but
/// compression pointers are followed when parsing.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Labels {
    pub names: Vec<heapless::String<MAX_DOMAIN_NAME_LEN>, MAX_SEARCH_DOMAINS>,
}

impl Labels {
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Append a domain name.
    ///
    /// Returns `Err(Error)` if the list is full or the name is too long to
    /// store.
    pub fn push(&mut self, name: &str) -> Result<()> {
        let mut owned = heapless::String::new();
        owned.push_str(name).map_err(|_| Error)?;
        self.names.push(owned).map_err(|_| Error)
    }

    /// Return the length of the uncompressed encoding of all names.
    pub fn buffer_len(&self) -> usize {
        self.names.iter().map(|name| name_len(name)).sum()
    }

    /// Emit the names as a sequence of uncompressed RFC 1035 names.
    ///
    /// Returns `Err(Error)` if `buffer` is too short or a label is empty or
    /// longer than 63 octets.
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        let mut offset = 0;
        for name in self.names.iter() {
            for label in split_labels(name) {
                if label.is_empty() || label.len() > MAX_LABEL_LEN {
                    return Err(Error);
                }
                let end = offset + 1 + label.len();
                if buffer.len() < end {
                    return Err(Error);
                }
                buffer[offset] = label.len() as u8;
                buffer[offset + 1..end].copy_from_slice(label.as_bytes());
                offset = end;
            }
            if buffer.len() <= offset {
                return Err(Error);
            }
            buffer[offset] = 0;
            offset += 1;
        }
        Ok(offset)
    }

    /// Parse a sequence of RFC 1035 names from `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut labels = Labels::new();
        let mut offset = 0;
        while offset < data.len() {
            let mut name = heapless::String::<MAX_DOMAIN_NAME_LEN>::new();
            offset = parse_name(data, offset, &mut name)?;
            if labels.names.push(name).is_err() {
                net_debug!("rfc1035: dropping domain names past {}", MAX_SEARCH_DOMAINS);
                break;
            }
        }
        Ok(labels)
    }
}

impl<'s> FromIterator<&'s str> for Labels {
    /// Collect names into a list, dropping those past the capacity.
    fn from_iter<I: IntoIterator<Item = &'s str>>(iter: I) -> Self {
        let mut labels = Labels::new();
        for name in iter {
            if labels.push(name).is_err() {
                net_debug!("rfc1035: dropping domain name {:?}", name);
            }
        }
        labels
    }
}

impl fmt::Display for Labels {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, name) in self.names.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

fn split_labels(name: &str) -> impl Iterator<Item = &str> {
    // A trailing dot marks a fully qualified name; it carries no label.
    let name = name.strip_suffix('.').unwrap_or(name);
    name.split('.').filter(move |_| !name.is_empty())
}

fn name_len(name: &str) -> usize {
    split_labels(name).map(|label| 1 + label.len()).sum::<usize>() + 1
}

/// Decode one name starting at `offset`, appending its labels to `name`.
/// Returns the offset right after the name in the uncompressed stream.
fn parse_name(
    data: &[u8],
    mut offset: usize,
    name: &mut heapless::String<MAX_DOMAIN_NAME_LEN>,
) -> Result<usize> {
    let mut resume_at = None;
    let mut hops = 0;

    loop {
        let len = *data.get(offset).ok_or(Error)? as usize;
        match len & 0xc0 {
            0x00 if len == 0 => {
                offset += 1;
                break;
            }
            0x00 => {
                let label = data.get(offset + 1..offset + 1 + len).ok_or(Error)?;
                let label = String::from_utf8_lossy(label);
                if let Cow::Owned(_) = label {
                    net_debug!("rfc1035: replacing non UTF-8 octets in label {:?}", &*label);
                }
                if !name.is_empty() {
                    name.push('.').map_err(|_| Error)?;
                }
                name.push_str(&label).map_err(|_| Error)?;
                offset += 1 + len;
            }
            0xc0 => {
                let low = *data.get(offset + 1).ok_or(Error)? as usize;
                if resume_at.is_none() {
                    resume_at = Some(offset + 2);
                }
                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(Error);
                }
                offset = ((len & 0x3f) << 8) | low;
            }
            _ => return Err(Error),
        }
    }

    Ok(resume_at.unwrap_or(offset))
}

#[cfg(test)]
mod test {
    use super::*;

    static SEARCH_LIST_BYTES: &[u8] = &[
        0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, //
        0x03, b'l', b'a', b'b', 0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'o',
        b'r', b'g', 0x00,
    ];

    #[test]
    fn test_emit() {
        let labels: Labels = ["example.com", "lab.example.org."].into_iter().collect();
        assert_eq!(labels.buffer_len(), SEARCH_LIST_BYTES.len());

        let mut bytes = [0u8; 64];
        let len = labels.emit(&mut bytes).unwrap();
        assert_eq!(&bytes[..len], SEARCH_LIST_BYTES);
    }

    #[test]
    fn test_parse() {
        let labels = Labels::parse(SEARCH_LIST_BYTES).unwrap();
        assert_eq!(labels.names.len(), 2);
        assert_eq!(labels.names[0], "example.com");
        assert_eq!(labels.names[1], "lab.example.org");
        assert_eq!(format!("{labels}"), "example.com,lab.example.org");
    }

    #[test]
    fn test_parse_pointer() {
        // "example.com", then "lab" followed by a pointer to offset 0
        let bytes = [
            0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00, 0x03,
            b'l', b'a', b'b', 0xc0, 0x00,
        ];
        let labels = Labels::parse(&bytes).unwrap();
        assert_eq!(labels.names[1], "lab.example.com");
    }

    #[test]
    fn test_parse_pointer_loop() {
        let bytes = [0xc0, 0x00];
        assert_eq!(Labels::parse(&bytes), Err(Error));
    }

    #[test]
    fn test_parse_truncated() {
        let bytes = [0x07, b'e', b'x'];
        assert_eq!(Labels::parse(&bytes), Err(Error));
        let bytes = [0x03, b'c', b'o', b'm'];
        assert_eq!(Labels::parse(&bytes), Err(Error));
    }

    #[test]
    fn test_parse_non_utf8_label() {
        let bytes = [0x03, b'a', 0xff, b'b', 0x03, b'c', b'o', b'm', 0x00];
        let labels = Labels::parse(&bytes).unwrap();
        assert_eq!(labels.names[0], "a\u{fffd}b.com");
    }

    #[test]
    fn test_emit_rejects_long_label() {
        let long = "a".repeat(64);
        let labels: Labels = [long.as_str()].into_iter().collect();
        let mut bytes = [0u8; 128];
        assert_eq!(labels.emit(&mut bytes), Err(Error));
    }

    #[test]
    fn test_root_name() {
        let labels: Labels = [""].into_iter().collect();
        assert_eq!(labels.buffer_len(), 1);
        let mut bytes = [0xffu8; 1];
        assert_eq!(labels.emit(&mut bytes), Ok(1));
        assert_eq!(bytes, [0]);
        assert_eq!(Labels::parse(&bytes).unwrap().names[0], "");
    }
}
