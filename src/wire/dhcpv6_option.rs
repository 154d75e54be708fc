use alloc::string::String;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use heapless::Vec;

use super::dhcpv6::{parse_options, Dhcpv6Option, Dhcpv6OptionWriter, OptionCode, OPTION_HEADER_LEN};
use super::iana::Arch;
use super::ipv6::{Address, ADDR_SIZE};
use super::rfc1035::Labels;
use super::{Error, Result};

pub const MAX_REQUEST_OPTIONS: usize = 16;
pub const MAX_IA_ADDRESSES: usize = 16;
pub const MAX_DNS_ADDRESSES: usize = 16;
pub const MAX_ARCH_TYPES: usize = 8;
pub const MAX_USER_CLASSES: usize = 8;
pub const MAX_USER_CLASS_LEN: usize = 128;
/// A DUID is at most 128 octets, plus the 2-octet DUID type.
pub const MAX_DUID_LEN: usize = 130;

/// Append `item`, dropping it with a diagnostic when `list` is full.
fn push_or_drop<T, const N: usize>(list: &mut Vec<T, N>, item: T, what: &str) {
    if list.push(item).is_err() {
        net_debug!("DHCPv6 {} holds at most {} entries, dropping one", what, N);
    }
}

/// Copy as much of `data` as fits into a bounded byte vector.
fn copy_truncated<const N: usize>(data: &[u8], what: &str) -> Vec<u8, N> {
    let len = data.len().min(N);
    if len < data.len() {
        net_debug!("DHCPv6 {} truncated from {} to {} octets", what, data.len(), N);
    }
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&data[..len]).ok();
    bytes
}

fn read_u32(data: &[u8]) -> u32 {
    NetworkEndian::read_u32(&data[..4])
}

enum_with_unknown! {
    /// DUID types (RFC 8415, section 11.1).
    pub enum DuidType(u16) {
        /// Link-layer address plus time.
        Llt = 1,
        /// Vendor-assigned unique ID based on enterprise number.
        En = 2,
        /// Link-layer address.
        Ll = 3,
        /// Universally unique identifier (RFC 6355).
        Uuid = 4,
    }
}

/// A DHCP Unique Identifier, kept in its encoded form.
///
/// The constructors build the well-known DUID layouts; [Duid::from_bytes]
/// accepts anything, including an empty identifier.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Duid {
    bytes: Vec<u8, MAX_DUID_LEN>,
}

impl Duid {
    /// Build a DUID-LLT from a hardware type, a time in seconds since
    /// midnight (UTC), January 1, 2000, and a link-layer address.
    pub fn new_llt(hardware_type: u16, time: u32, link_layer_addr: &[u8]) -> Self {
        let mut header = [0u8; 8];
        NetworkEndian::write_u16(&mut header[0..2], DuidType::Llt.into());
        NetworkEndian::write_u16(&mut header[2..4], hardware_type);
        NetworkEndian::write_u32(&mut header[4..8], time);
        Self::with_header(&header, link_layer_addr)
    }

    /// Build a DUID-EN from an IANA private enterprise number and an
    /// opaque identifier.
    pub fn new_en(enterprise_number: u32, identifier: &[u8]) -> Self {
        let mut header = [0u8; 6];
        NetworkEndian::write_u16(&mut header[0..2], DuidType::En.into());
        NetworkEndian::write_u32(&mut header[2..6], enterprise_number);
        Self::with_header(&header, identifier)
    }

    /// Build a DUID-LL from a hardware type and a link-layer address.
    pub fn new_ll(hardware_type: u16, link_layer_addr: &[u8]) -> Self {
        let mut header = [0u8; 4];
        NetworkEndian::write_u16(&mut header[0..2], DuidType::Ll.into());
        NetworkEndian::write_u16(&mut header[2..4], hardware_type);
        Self::with_header(&header, link_layer_addr)
    }

    /// Build a DUID-UUID.
    pub fn new_uuid(uuid: [u8; 16]) -> Self {
        let mut header = [0u8; 2];
        NetworkEndian::write_u16(&mut header, DuidType::Uuid.into());
        Self::with_header(&header, &uuid)
    }

    /// Wrap already encoded DUID octets. Octets past [MAX_DUID_LEN] are
    /// dropped.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            bytes: copy_truncated(data, "DUID"),
        }
    }

    fn with_header(header: &[u8], body: &[u8]) -> Self {
        let mut bytes: Vec<u8, MAX_DUID_LEN> = Vec::new();
        bytes.extend_from_slice(header).ok();
        let room = MAX_DUID_LEN - bytes.len();
        if body.len() > room {
            net_debug!("DHCPv6 DUID body truncated from {} to {} octets", body.len(), room);
        }
        bytes.extend_from_slice(&body[..body.len().min(room)]).ok();
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The DUID type, or `None` if the identifier is shorter than a type field.
    pub fn duid_type(&self) -> Option<DuidType> {
        if self.bytes.len() < 2 {
            None
        } else {
            Some(DuidType::from(NetworkEndian::read_u16(&self.bytes[0..2])))
        }
    }
}

impl fmt::Display for Duid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, byte) in self.bytes.iter().enumerate() {
            if idx > 0 {
                write!(f, ":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// The Option Request option: the codes the client asks the server to send.
///
/// Codes are kept in insertion order and are not deduplicated.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprRequestedOptions {
    pub codes: Vec<OptionCode, MAX_REQUEST_OPTIONS>,
}

impl ReprRequestedOptions {
    pub const fn new() -> Self {
        Self { codes: Vec::new() }
    }

    /// Append a requested option code, even if it is already present.
    pub fn add_requested_option(&mut self, code: OptionCode) {
        push_or_drop(&mut self.codes, code, "option request list");
    }

    pub fn data_len(&self) -> usize {
        self.codes.len() * 2
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() % 2 != 0 {
            return Err(Error);
        }
        let mut oro = Self::new();
        for chunk in data.chunks(2) {
            oro.add_requested_option(OptionCode::from(NetworkEndian::read_u16(chunk)));
        }
        Ok(oro)
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::Oro.into(), self.data_len())?;
        for (chunk, code) in data.chunks_mut(2).zip(self.codes.iter()) {
            NetworkEndian::write_u16(chunk, (*code).into());
        }
        Ok(())
    }
}

impl fmt::Display for ReprRequestedOptions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "oro=")?;
        for (idx, code) in self.codes.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{code}")?;
        }
        Ok(())
    }
}

//     0                   1                   2                   3
//     0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |          OPTION_IAADDR        |          option-len           |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |                                                               |
//    |                         IPv6-address                          |
//    |                                                               |
//    |                                                               |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |                      preferred-lifetime                       |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    |                        valid-lifetime                         |
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//    .                                                               .
//    .                        IAaddr-options                         .
//    .                                                               .
//    +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReprIaAddr {
    /// The address thats represented here
    pub addr: Address,
    pub preferred_lifetime: u32,
    pub valid_lifetime: u32,
}

impl ReprIaAddr {
    const FIXED_LEN: usize = ADDR_SIZE + 4 + 4;

    /// An address binding with zero lifetimes, as a client sends it.
    pub const fn new(addr: Address) -> Self {
        Self {
            addr,
            preferred_lifetime: 0,
            valid_lifetime: 0,
        }
    }

    pub fn data_len(&self) -> usize {
        Self::FIXED_LEN
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::FIXED_LEN {
            return Err(Error);
        }
        let addr = Address::from_bytes(&data[0..16]);
        let preferred_lifetime = read_u32(&data[16..20]);
        let valid_lifetime = read_u32(&data[20..24]);

        for option in parse_options(&data[Self::FIXED_LEN..]) {
            let option = option?;
            net_trace!("DHCPv6 ignoring IAaddr option {}", option.code());
        }

        Ok(Self {
            addr,
            preferred_lifetime,
            valid_lifetime,
        })
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::IaAddr.into(), self.data_len())?;
        data[0..16].copy_from_slice(self.addr.as_bytes());
        NetworkEndian::write_u32(&mut data[16..20], self.preferred_lifetime);
        NetworkEndian::write_u32(&mut data[20..24], self.valid_lifetime);
        Ok(())
    }
}

impl fmt::Display for ReprIaAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}(preferred-lifetime={} valid-lifetime={})",
            self.addr, self.preferred_lifetime, self.valid_lifetime
        )
    }
}

enum_with_unknown! {
    pub enum StatusCode(u16) {
        Success = 0,
        UnspecFail = 1,
        NoAddrsAvail = 2,
        NoBinding = 3,
        NotOnLink = 4,
        UseMulticast = 5,
        NoPrefixAvail = 6
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Success => write!(f, "success"),
            Self::UnspecFail => write!(f, "unspec-fail"),
            Self::NoAddrsAvail => write!(f, "no-addrs-avail"),
            Self::NoBinding => write!(f, "no-binding"),
            Self::NotOnLink => write!(f, "not-on-link"),
            Self::UseMulticast => write!(f, "use-multicast"),
            Self::NoPrefixAvail => write!(f, "no-prefix-avail"),
            Self::Unknown(a) => write!(f, "unknown({a})"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ReprStatusCode {
    pub status_code: StatusCode,
    pub status_message: String,
}

impl ReprStatusCode {
    pub fn data_len(&self) -> usize {
        2 + self.status_message.len()
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error);
        }
        Ok(Self {
            status_code: StatusCode::from(NetworkEndian::read_u16(&data[0..2])),
            status_message: String::from_utf8_lossy(&data[2..]).into_owned(),
        })
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::StatusCode.into(), self.data_len())?;
        NetworkEndian::write_u16(&mut data[0..2], self.status_code.into());
        data[2..].copy_from_slice(self.status_message.as_bytes());
        Ok(())
    }
}

/// The Identity Association for Non-temporary Addresses option.
///
/// Addresses accumulate: [ReprIaNa::add_address] appends to the bindings
/// already present.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprIaNa {
    /// The unique identifier for this IA_NA
    pub iaid: u32,
    /// Time interval
    pub t1: u32,
    /// Time interval
    pub t2: u32,
    /// Addresses attached to this option
    pub addresses: Vec<ReprIaAddr, MAX_IA_ADDRESSES>,
    /// Represents a status code applied to this IA
    pub status_code: Option<ReprStatusCode>,
}

impl ReprIaNa {
    const FIXED_LEN: usize = 12;

    /// An empty binding: IAID, T1 and T2 all zero, no addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an address binding.
    pub fn add_address(&mut self, addr: ReprIaAddr) {
        push_or_drop(&mut self.addresses, addr, "IA_NA address list");
    }

    pub fn data_len(&self) -> usize {
        let mut len = 0;
        len += 4; // IAID
        len += 4; // T1
        len += 4; // T2
        for addr in self.addresses.iter() {
            len += OPTION_HEADER_LEN + addr.data_len();
        }
        if let Some(status_code) = self.status_code.as_ref() {
            len += OPTION_HEADER_LEN + status_code.data_len()
        }
        len
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < Self::FIXED_LEN {
            return Err(Error);
        }
        let mut ia_na = Self {
            iaid: read_u32(&data[0..4]),
            t1: read_u32(&data[4..8]),
            t2: read_u32(&data[8..12]),
            ..Self::default()
        };

        for option in parse_options(&data[Self::FIXED_LEN..]) {
            let option = option?;
            match option.code() {
                OptionCode::IaAddr => ia_na.add_address(ReprIaAddr::parse(option.data)?),
                OptionCode::StatusCode => {
                    ia_na.status_code = Some(ReprStatusCode::parse(option.data)?)
                }
                other => net_trace!("DHCPv6 ignoring IA_NA option {}", other),
            }
        }

        Ok(ia_na)
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::IaNa.into(), self.data_len())?;
        let (fixed, rest) = data.split_at_mut(Self::FIXED_LEN);
        NetworkEndian::write_u32(&mut fixed[0..4], self.iaid);
        NetworkEndian::write_u32(&mut fixed[4..8], self.t1);
        NetworkEndian::write_u32(&mut fixed[8..12], self.t2);

        let mut ia_options = Dhcpv6OptionWriter::new(rest);
        for addr in self.addresses.iter() {
            addr.emit(&mut ia_options)?;
        }
        if let Some(status_code) = self.status_code.as_ref() {
            status_code.emit(&mut ia_options)?;
        }
        Ok(())
    }
}

impl fmt::Display for ReprIaNa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ia-na iaid={} t1={} t2={}", self.iaid, self.t1, self.t2)?;
        for addr in self.addresses.iter() {
            write!(f, " addr={addr}")?;
        }
        if let Some(s) = self.status_code.as_ref() {
            write!(f, " status={}(msg='{}')", s.status_code, s.status_message)?;
        }
        Ok(())
    }
}

/// The DNS Recursive Name Server option.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprDnsServers {
    /// IPv6 addresses of DNS servers
    pub addresses: Vec<Address, MAX_DNS_ADDRESSES>,
}

impl ReprDnsServers {
    /// Build the option from a copy of `addresses`.
    pub fn new(addresses: &[Address]) -> Self {
        let mut dns = Self::default();
        for addr in addresses {
            push_or_drop(&mut dns.addresses, *addr, "DNS server list");
        }
        dns
    }

    pub fn data_len(&self) -> usize {
        self.addresses.len() * ADDR_SIZE
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() % ADDR_SIZE != 0 {
            return Err(Error);
        }
        let mut dns = Self::default();
        for chunk in data.chunks(ADDR_SIZE) {
            push_or_drop(&mut dns.addresses, Address::from_bytes(chunk), "DNS server list");
        }
        Ok(dns)
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::DnsServers.into(), self.data_len())?;
        for (chunk, addr) in data.chunks_mut(ADDR_SIZE).zip(self.addresses.iter()) {
            chunk.copy_from_slice(addr.as_bytes());
        }
        Ok(())
    }
}

impl fmt::Display for ReprDnsServers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "dns-servers")?;
        for addr in self.addresses.iter() {
            write!(f, " addr={addr}")?;
        }
        Ok(())
    }
}

/// The Domain Search List option.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprDomainSearchList {
    pub labels: Labels,
}

impl ReprDomainSearchList {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    pub fn data_len(&self) -> usize {
        self.labels.buffer_len()
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        Ok(Self {
            labels: Labels::parse(data)?,
        })
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::DomainList.into(), self.data_len())?;
        self.labels.emit(data)?;
        Ok(())
    }
}

/// The User Class option: one or more opaque user class entries.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprUserClass {
    pub user_classes: Vec<Vec<u8, MAX_USER_CLASS_LEN>, MAX_USER_CLASSES>,
}

impl ReprUserClass {
    /// A user class option holding exactly one entry.
    pub fn new(user_class: &[u8]) -> Self {
        let mut option = Self::default();
        option.add_user_class(user_class);
        option
    }

    /// Append a user class entry.
    pub fn add_user_class(&mut self, user_class: &[u8]) {
        let entry = copy_truncated(user_class, "user class");
        push_or_drop(&mut self.user_classes, entry, "user class list");
    }

    pub fn data_len(&self) -> usize {
        self.user_classes.iter().map(|uc| 2 + uc.len()).sum()
    }

    pub fn parse(mut data: &[u8]) -> Result<Self> {
        let mut option = Self::default();
        while !data.is_empty() {
            if data.len() < 2 {
                return Err(Error);
            }
            let len = NetworkEndian::read_u16(&data[0..2]) as usize;
            let entry = data.get(2..2 + len).ok_or(Error)?;
            option.add_user_class(entry);
            data = &data[2 + len..];
        }
        Ok(option)
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let mut data = dhcp_options.reserve(OptionCode::UserClass.into(), self.data_len())?;
        for uc in self.user_classes.iter() {
            let (entry, rest) = core::mem::take(&mut data).split_at_mut(2 + uc.len());
            NetworkEndian::write_u16(&mut entry[0..2], uc.len() as u16);
            entry[2..].copy_from_slice(uc);
            data = rest;
        }
        Ok(())
    }
}

impl fmt::Display for ReprUserClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "user-class=")?;
        for (idx, uc) in self.user_classes.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{:X?}", &uc[..])?;
        }
        Ok(())
    }
}

/// The Client System Architecture Type option.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ReprClientArchType {
    pub arch_types: Vec<Arch, MAX_ARCH_TYPES>,
}

impl ReprClientArchType {
    /// An architecture type option holding exactly one entry.
    pub fn new(arch: Arch) -> Self {
        let mut option = Self::default();
        option.add_arch_type(arch);
        option
    }

    pub fn add_arch_type(&mut self, arch: Arch) {
        push_or_drop(&mut self.arch_types, arch, "architecture type list");
    }

    pub fn data_len(&self) -> usize {
        self.arch_types.len() * 2
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() % 2 != 0 {
            return Err(Error);
        }
        let mut option = Self::default();
        for chunk in data.chunks(2) {
            option.add_arch_type(Arch::from(NetworkEndian::read_u16(chunk)));
        }
        Ok(option)
    }

    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        let data = dhcp_options.reserve(OptionCode::ClientArchType.into(), self.data_len())?;
        for (chunk, arch) in data.chunks_mut(2).zip(self.arch_types.iter()) {
            NetworkEndian::write_u16(chunk, (*arch).into());
        }
        Ok(())
    }
}

/// A typed DHCPv6 option.
///
/// Options this crate has no representation for are kept verbatim in
/// [OptionRepr::Other].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OptionRepr {
    ClientId(Duid),
    ServerId(Duid),
    IaNa(ReprIaNa),
    RequestedOptions(ReprRequestedOptions),
    /// Elapsed time in hundredths of a second.
    ElapsedTime(u16),
    UserClass(ReprUserClass),
    DnsServers(ReprDnsServers),
    DomainSearchList(ReprDomainSearchList),
    ClientArchType(ReprClientArchType),
    Other { kind: u16, data: alloc::vec::Vec<u8> },
}

impl OptionRepr {
    /// The option code this option is stored and emitted under.
    pub fn code(&self) -> OptionCode {
        match self {
            Self::ClientId(_) => OptionCode::ClientId,
            Self::ServerId(_) => OptionCode::ServerId,
            Self::IaNa(_) => OptionCode::IaNa,
            Self::RequestedOptions(_) => OptionCode::Oro,
            Self::ElapsedTime(_) => OptionCode::ElapsedTime,
            Self::UserClass(_) => OptionCode::UserClass,
            Self::DnsServers(_) => OptionCode::DnsServers,
            Self::DomainSearchList(_) => OptionCode::DomainList,
            Self::ClientArchType(_) => OptionCode::ClientArchType,
            Self::Other { kind, .. } => OptionCode::from(*kind),
        }
    }

    /// Length of the option data, without the option header.
    pub fn data_len(&self) -> usize {
        match self {
            Self::ClientId(duid) | Self::ServerId(duid) => duid.len(),
            Self::IaNa(ia_na) => ia_na.data_len(),
            Self::RequestedOptions(oro) => oro.data_len(),
            Self::ElapsedTime(_) => 2,
            Self::UserClass(uc) => uc.data_len(),
            Self::DnsServers(dns) => dns.data_len(),
            Self::DomainSearchList(dsl) => dsl.data_len(),
            Self::ClientArchType(arch) => arch.data_len(),
            Self::Other { data, .. } => data.len(),
        }
    }

    /// Length of the option once emitted, header included.
    pub fn buffer_len(&self) -> usize {
        OPTION_HEADER_LEN + self.data_len()
    }

    /// Parse a raw option into its typed representation.
    pub fn parse(option: Dhcpv6Option<'_>) -> Result<Self> {
        let data = option.data;
        let repr = match option.code() {
            OptionCode::ClientId | OptionCode::ServerId if data.len() > MAX_DUID_LEN => {
                return Err(Error)
            }
            OptionCode::ClientId => Self::ClientId(Duid::from_bytes(data)),
            OptionCode::ServerId => Self::ServerId(Duid::from_bytes(data)),
            OptionCode::IaNa => Self::IaNa(ReprIaNa::parse(data)?),
            OptionCode::Oro => Self::RequestedOptions(ReprRequestedOptions::parse(data)?),
            OptionCode::ElapsedTime if data.len() == 2 => {
                Self::ElapsedTime(NetworkEndian::read_u16(data))
            }
            OptionCode::ElapsedTime => return Err(Error),
            OptionCode::UserClass => Self::UserClass(ReprUserClass::parse(data)?),
            OptionCode::DnsServers => Self::DnsServers(ReprDnsServers::parse(data)?),
            OptionCode::DomainList => Self::DomainSearchList(ReprDomainSearchList::parse(data)?),
            OptionCode::ClientArchType => Self::ClientArchType(ReprClientArchType::parse(data)?),
            _ => Self::Other {
                kind: option.kind,
                data: data.to_vec(),
            },
        };
        Ok(repr)
    }

    /// Emit this option, header included.
    pub fn emit(&self, dhcp_options: &mut Dhcpv6OptionWriter<'_>) -> Result<()> {
        match self {
            Self::ClientId(duid) | Self::ServerId(duid) => dhcp_options.emit(Dhcpv6Option {
                kind: self.code().into(),
                data: duid.as_bytes(),
            }),
            Self::IaNa(ia_na) => ia_na.emit(dhcp_options),
            Self::RequestedOptions(oro) => oro.emit(dhcp_options),
            Self::ElapsedTime(elapsed) => dhcp_options.emit(Dhcpv6Option {
                kind: OptionCode::ElapsedTime.into(),
                data: &elapsed.to_be_bytes(),
            }),
            Self::UserClass(uc) => uc.emit(dhcp_options),
            Self::DnsServers(dns) => dns.emit(dhcp_options),
            Self::DomainSearchList(dsl) => dsl.emit(dhcp_options),
            Self::ClientArchType(arch) => arch.emit(dhcp_options),
            Self::Other { kind, data } => dhcp_options.emit(Dhcpv6Option { kind: *kind, data }),
        }
    }
}

impl fmt::Display for OptionRepr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ClientId(duid) => write!(f, "client-id={duid}"),
            Self::ServerId(duid) => write!(f, "server-id={duid}"),
            Self::IaNa(ia_na) => write!(f, "{ia_na}"),
            Self::RequestedOptions(oro) => write!(f, "{oro}"),
            Self::ElapsedTime(elapsed) => write!(f, "elapsed-time={elapsed}/100s"),
            Self::UserClass(uc) => write!(f, "{uc}"),
            Self::DnsServers(dns) => write!(f, "{dns}"),
            Self::DomainSearchList(dsl) => write!(f, "domain-list={}", dsl.labels),
            Self::ClientArchType(arch) => {
                write!(f, "client-arch-type=")?;
                for (idx, arch) in arch.arch_types.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{arch}")?;
                }
                Ok(())
            }
            Self::Other { kind, data } => {
                write!(f, "{}({} octets)", OptionCode::from(*kind), data.len())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn emit_one(repr: &OptionRepr) -> std::vec::Vec<u8> {
        let mut bytes = vec![0u8; repr.buffer_len()];
        let mut writer = Dhcpv6OptionWriter::new(&mut bytes);
        repr.emit(&mut writer).unwrap();
        assert_eq!(writer.written(), repr.buffer_len());
        bytes
    }

    #[test]
    fn test_duid_layouts() {
        let mac = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];

        let ll = Duid::new_ll(1, &mac);
        assert_eq!(
            ll.as_bytes(),
            &[0x00, 0x03, 0x00, 0x01, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55]
        );
        assert_eq!(ll.duid_type(), Some(DuidType::Ll));

        let llt = Duid::new_llt(1, 0x0102_0304, &mac);
        assert_eq!(&llt.as_bytes()[..8], &[0x00, 0x01, 0x00, 0x01, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(llt.len(), 14);

        let en = Duid::new_en(32473, b"host");
        assert_eq!(&en.as_bytes()[..6], &[0x00, 0x02, 0x00, 0x00, 0x7e, 0xd9]);
        assert_eq!(en.duid_type(), Some(DuidType::En));

        let uuid = Duid::new_uuid([0xab; 16]);
        assert_eq!(uuid.len(), 18);
        assert_eq!(uuid.duid_type(), Some(DuidType::Uuid));

        assert_eq!(Duid::default().duid_type(), None);
        assert_eq!(format!("{}", Duid::from_bytes(&[0x00, 0x03, 0xff])), "00:03:ff");
    }

    #[test]
    fn test_duid_truncated() {
        let long = [0x5a; 200];
        assert_eq!(Duid::from_bytes(&long).len(), MAX_DUID_LEN);
        assert_eq!(Duid::new_ll(1, &long).len(), MAX_DUID_LEN);
    }

    #[test]
    fn test_oro_no_dedupe() {
        let mut oro = ReprRequestedOptions::new();
        oro.add_requested_option(OptionCode::DnsServers);
        oro.add_requested_option(OptionCode::DnsServers);
        assert_eq!(&oro.codes[..], &[OptionCode::DnsServers, OptionCode::DnsServers]);
    }

    #[test]
    fn test_oro_overflow_drops() {
        let mut oro = ReprRequestedOptions::new();
        for code in 0..(MAX_REQUEST_OPTIONS as u16 + 4) {
            oro.add_requested_option(OptionCode::from(100 + code));
        }
        assert_eq!(oro.codes.len(), MAX_REQUEST_OPTIONS);
        assert_eq!(oro.codes[MAX_REQUEST_OPTIONS - 1], OptionCode::from(115));
    }

    #[test]
    fn test_oro_wire() {
        let mut oro = ReprRequestedOptions::new();
        oro.add_requested_option(OptionCode::BootfileUrl);
        oro.add_requested_option(OptionCode::BootfileParam);
        let repr = OptionRepr::RequestedOptions(oro);
        let bytes = emit_one(&repr);
        assert_eq!(bytes, [0x00, 0x06, 0x00, 0x04, 0x00, 0x3b, 0x00, 0x3c]);

        assert_eq!(ReprRequestedOptions::parse(&[0x00, 0x17, 0x00]), Err(Error));
    }

    #[test]
    fn test_ia_na_accumulates() {
        let x = ReprIaAddr::new(Address::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
        let y = ReprIaAddr::new(Address::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 2));
        let mut ia_na = ReprIaNa::new();
        ia_na.add_address(x);
        ia_na.add_address(y);
        assert_eq!(ia_na.iaid, 0);
        assert_eq!(&ia_na.addresses[..], &[x, y]);
        assert_eq!(ia_na.data_len(), 12 + 2 * (4 + 24));
    }

    #[test]
    fn test_ia_na_wire() {
        let mut ia_na = ReprIaNa {
            iaid: 0x0a0b_0c0d,
            t1: 3600,
            t2: 5400,
            ..ReprIaNa::default()
        };
        ia_na.add_address(ReprIaAddr {
            addr: Address::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x100),
            preferred_lifetime: 7200,
            valid_lifetime: 7500,
        });
        ia_na.status_code = Some(ReprStatusCode {
            status_code: StatusCode::Success,
            status_message: String::from("ok"),
        });

        let repr = OptionRepr::IaNa(ia_na);
        let bytes = emit_one(&repr);
        assert_eq!(&bytes[0..4], &[0x00, 0x03, 0x00, 48]);
        assert_eq!(&bytes[4..8], &[0x0a, 0x0b, 0x0c, 0x0d]);
        assert_eq!(&bytes[16..20], &[0x00, 0x05, 0x00, 24]);
        assert_eq!(&bytes[44..48], &[0x00, 0x0d, 0x00, 4]);

        let option = parse_options(&bytes).next().unwrap().unwrap();
        assert_eq!(OptionRepr::parse(option).unwrap(), repr);
    }

    #[test]
    fn test_ia_na_short() {
        assert_eq!(ReprIaNa::parse(&[0u8; 11]), Err(Error));
        assert_eq!(ReprIaAddr::parse(&[0u8; 23]), Err(Error));
    }

    #[test]
    fn test_dns_copy() {
        let servers = [
            Address::from_ipv4_mapped([1, 1, 1, 1]),
            Address::from_ipv4_mapped([8, 8, 8, 8]),
        ];
        let dns = ReprDnsServers::new(&servers);
        assert_eq!(&dns.addresses[..], &servers[..]);
        assert_eq!(dns.data_len(), 32);
        assert_eq!(ReprDnsServers::parse(&[0u8; 17]), Err(Error));
    }

    #[test]
    fn test_user_class_wire() {
        let uc = ReprUserClass::new(b"ipxe");
        assert_eq!(uc.user_classes.len(), 1);
        let bytes = emit_one(&OptionRepr::UserClass(uc.clone()));
        assert_eq!(
            bytes,
            [0x00, 0x0f, 0x00, 0x06, 0x00, 0x04, b'i', b'p', b'x', b'e']
        );
        assert_eq!(ReprUserClass::parse(&bytes[4..]).unwrap(), uc);
        assert_eq!(ReprUserClass::parse(&[0x00, 0x05, b'a']), Err(Error));
    }

    #[test]
    fn test_arch_type_wire() {
        let arch = ReprClientArchType::new(Arch::EfiX86_64);
        let bytes = emit_one(&OptionRepr::ClientArchType(arch.clone()));
        assert_eq!(bytes, [0x00, 0x3d, 0x00, 0x02, 0x00, 0x07]);
        assert_eq!(ReprClientArchType::parse(&bytes[4..]).unwrap(), arch);
    }

    #[test]
    fn test_domain_search_list_wire() {
        let dsl = ReprDomainSearchList::new(["example.com"].into_iter().collect());
        let repr = OptionRepr::DomainSearchList(dsl);
        let bytes = emit_one(&repr);
        assert_eq!(&bytes[0..4], &[0x00, 0x18, 0x00, 13]);
        let option = parse_options(&bytes).next().unwrap().unwrap();
        assert_eq!(OptionRepr::parse(option).unwrap(), repr);
    }

    #[test]
    fn test_parse_unknown_kept() {
        let option = Dhcpv6Option {
            kind: OptionCode::Preference.into(),
            data: &[0xff],
        };
        let repr = OptionRepr::parse(option).unwrap();
        assert_eq!(
            repr,
            OptionRepr::Other {
                kind: 7,
                data: vec![0xff]
            }
        );
        assert_eq!(repr.code(), OptionCode::Preference);
    }

    #[test]
    fn test_parse_elapsed_time() {
        let option = Dhcpv6Option {
            kind: OptionCode::ElapsedTime.into(),
            data: &[0x01, 0x00],
        };
        assert_eq!(OptionRepr::parse(option), Ok(OptionRepr::ElapsedTime(256)));
        let option = Dhcpv6Option {
            kind: OptionCode::ElapsedTime.into(),
            data: &[0x01],
        };
        assert_eq!(OptionRepr::parse(option), Err(Error));
    }

    #[test]
    fn test_emit_short_buffer() {
        let repr = OptionRepr::DnsServers(ReprDnsServers::new(&[Address::UNSPECIFIED]));
        let mut bytes = [0u8; 19];
        let mut writer = Dhcpv6OptionWriter::new(&mut bytes);
        assert_eq!(repr.emit(&mut writer), Err(Error));
    }
}
