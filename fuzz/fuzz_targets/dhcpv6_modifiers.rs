#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use dhcpv6_modifiers::modifier::{self, Modifier};
use dhcpv6_modifiers::packet::{Dhcpv6, Message, OptionSet};
use dhcpv6_modifiers::wire::{
    Arch, Dhcpv6MessageType, Duid, Ipv6Address, OptionCode, ReprIaAddr,
};

#[derive(Debug, Arbitrary)]
enum Step {
    ClientId(Vec<u8>),
    ServerId(Vec<u8>),
    Netboot,
    UserClass(Vec<u8>),
    ArchType(u16),
    Iana(Vec<[u8; 16]>),
    Dns(Vec<[u8; 16]>),
    DomainSearchList(Vec<String>),
    RequestedOptions(Vec<u16>),
}

fn modify(packet: Dhcpv6<'static>, step: &Step) -> Dhcpv6<'static> {
    match step {
        Step::ClientId(duid) => modifier::with_client_id(Duid::from_bytes(duid)).modify(packet),
        Step::ServerId(duid) => modifier::with_server_id(Duid::from_bytes(duid)).modify(packet),
        Step::Netboot => modifier::with_netboot(packet),
        Step::UserClass(uc) => modifier::with_user_class(uc).modify(packet),
        Step::ArchType(arch) => modifier::with_arch_type(Arch::from(*arch)).modify(packet),
        Step::Iana(addrs) => {
            let addrs: Vec<ReprIaAddr> =
                addrs.iter().map(|a| ReprIaAddr::new(Ipv6Address(*a))).collect();
            modifier::with_iana(&addrs).modify(packet)
        }
        Step::Dns(addrs) => {
            let addrs: Vec<Ipv6Address> = addrs.iter().map(|a| Ipv6Address(*a)).collect();
            modifier::with_dns(&addrs).modify(packet)
        }
        Step::DomainSearchList(names) => {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            modifier::with_domain_search_list(&names).modify(packet)
        }
        Step::RequestedOptions(codes) => {
            let codes: Vec<OptionCode> = codes.iter().map(|c| OptionCode::from(*c)).collect();
            modifier::with_requested_options(&codes).modify(packet)
        }
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut packet = Dhcpv6::Message(Message::new(
        Dhcpv6MessageType::Solicit,
        0,
        OptionSet::new(),
    ));
    for step in steps.iter() {
        packet = modify(packet, step);
    }
    // Modifiers never fail; encoding may still reject names or lengths.
    let mut buffer = vec![0; packet.buffer_len()];
    let _ = packet.emit(&mut buffer);
});
