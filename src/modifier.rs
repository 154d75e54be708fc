/*! Composable packet modifiers.

A modifier is a transformation `Dhcpv6 -> Dhcpv6` that adds or updates a
single option. The factories in this module build modifiers closed over
their parameters; [apply] folds a list of them over a packet, left to right,
so later modifiers see what earlier ones did to the same option code.

Options follow one of two merge disciplines:

 * replaced: client and server identifiers, user class, architecture type,
   DNS servers and the domain search list. The modifier stores a freshly
   built option and discards whatever was stored under that code.
 * accumulated: the option request list and the IA_NA binding. The modifier
   works on a copy of the existing option (or an empty one), appends to it,
   and stores the result back under the same code.

Modifiers never fail. A packet of the wrong shape, an option of the wrong
type stored under the modified code, or a full bounded list all degrade to
a debug log and leave the packet as it was (or drop the excess elements).
*/

use heapless::Vec;

use crate::packet::{Dhcpv6, OptionSet};
use crate::wire::{
    Arch, Duid, Ipv6Address, Labels, OptionCode, OptionRepr, ReprClientArchType,
    ReprDnsServers, ReprDomainSearchList, ReprIaAddr, ReprIaNa, ReprRequestedOptions,
    ReprUserClass, MAX_IA_ADDRESSES, MAX_REQUEST_OPTIONS,
};

/// A transformation applied to a packet.
pub trait Modifier<'a> {
    fn modify(&self, packet: Dhcpv6<'a>) -> Dhcpv6<'a>;
}

// Any closure with the right signature is a modifier.
impl<'a, F> Modifier<'a> for F
where
    F: Fn(Dhcpv6<'a>) -> Dhcpv6<'a>,
{
    fn modify(&self, packet: Dhcpv6<'a>) -> Dhcpv6<'a> {
        (self)(packet)
    }
}

/// Apply `modifiers` to `packet` in order, and return the result.
pub fn apply<'a>(packet: Dhcpv6<'a>, modifiers: &[&dyn Modifier<'a>]) -> Dhcpv6<'a> {
    modifiers
        .iter()
        .fold(packet, |packet, modifier| modifier.modify(packet))
}

/// Replace the client identifier.
pub fn with_client_id<'a>(duid: Duid) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    move |mut packet| {
        store(packet.options_mut(), OptionRepr::ClientId(duid.clone()));
        packet
    }
}

/// Replace the server identifier.
pub fn with_server_id<'a>(duid: Duid) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    move |mut packet| {
        store(packet.options_mut(), OptionRepr::ServerId(duid.clone()));
        packet
    }
}

/// Request the bootfile URL and bootfile parameters options.
///
/// Only client/server messages are modified; a relay message is returned
/// unchanged.
pub fn with_netboot(mut packet: Dhcpv6<'_>) -> Dhcpv6<'_> {
    let message_type = packet.message_type();
    match packet.as_message_mut() {
        Some(msg) => {
            if let Some(mut oro) = fetch_requested_options(&msg.options) {
                oro.add_requested_option(OptionCode::BootfileUrl);
                oro.add_requested_option(OptionCode::BootfileParam);
                store(&mut msg.options, OptionRepr::RequestedOptions(oro));
            }
        }
        None => net_debug!("with_netboot: {} is not a client/server message", message_type),
    }
    packet
}

/// Replace the user class option with one holding only `user_class`.
pub fn with_user_class<'a>(user_class: &[u8]) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    let option = ReprUserClass::new(user_class);
    move |mut packet| {
        store(packet.options_mut(), OptionRepr::UserClass(option.clone()));
        packet
    }
}

/// Replace the client architecture type option with one holding only `arch`.
pub fn with_arch_type<'a>(arch: Arch) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    move |mut packet| {
        store(
            packet.options_mut(),
            OptionRepr::ClientArchType(ReprClientArchType::new(arch)),
        );
        packet
    }
}

/// Append address bindings to the IA_NA option, creating an empty one
/// (IAID, T1 and T2 all zero) if the packet has none.
pub fn with_iana<'a>(addrs: &[ReprIaAddr]) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    let addrs: Vec<ReprIaAddr, MAX_IA_ADDRESSES> = copy_bounded(addrs, "IA_NA address list");
    move |mut packet| {
        let options = packet.options_mut();
        if let Some(mut ia_na) = fetch_ia_na(options) {
            for addr in addrs.iter() {
                ia_na.add_address(*addr);
            }
            store(options, OptionRepr::IaNa(ia_na));
        }
        packet
    }
}

/// Replace the DNS recursive name servers with a copy of `servers`.
pub fn with_dns<'a>(servers: &[Ipv6Address]) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    let option = ReprDnsServers::new(servers);
    move |mut packet| {
        store(packet.options_mut(), OptionRepr::DnsServers(option.clone()));
        packet
    }
}

/// Replace the domain search list.
pub fn with_domain_search_list<'a>(names: &[&str]) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    let labels: Labels = names.iter().copied().collect();
    let option = ReprDomainSearchList::new(labels);
    move |mut packet| {
        store(packet.options_mut(), OptionRepr::DomainSearchList(option.clone()));
        packet
    }
}

/// Append `codes`, in order, to the option request list, creating it if
/// the packet has none. Codes already requested are appended again.
pub fn with_requested_options<'a>(codes: &[OptionCode]) -> impl Fn(Dhcpv6<'a>) -> Dhcpv6<'a> {
    let codes: Vec<OptionCode, MAX_REQUEST_OPTIONS> = copy_bounded(codes, "option request list");
    move |mut packet| {
        let options = packet.options_mut();
        if let Some(mut oro) = fetch_requested_options(options) {
            for code in codes.iter() {
                oro.add_requested_option(*code);
            }
            store(options, OptionRepr::RequestedOptions(oro));
        }
        packet
    }
}

/// Replace-by-code write back. Only a borrowed option storage can refuse it.
fn store(options: &mut OptionSet<'_>, option: OptionRepr) {
    let code = option.code();
    if options.update(option).is_err() {
        net_debug!("modifier: no room to store {}", code);
    }
}

/// A working copy of the option request list, or an empty one if absent.
/// `None` if the option stored under its code is of another type.
fn fetch_requested_options(options: &OptionSet<'_>) -> Option<ReprRequestedOptions> {
    match options.get_one(OptionCode::Oro) {
        None => Some(ReprRequestedOptions::new()),
        Some(OptionRepr::RequestedOptions(oro)) => Some(oro.clone()),
        Some(_) => {
            net_debug!("modifier: unexpected option type stored under {}", OptionCode::Oro);
            None
        }
    }
}

/// A working copy of the IA_NA binding, or an empty one if absent.
/// `None` if the option stored under its code is of another type.
fn fetch_ia_na(options: &OptionSet<'_>) -> Option<ReprIaNa> {
    match options.get_one(OptionCode::IaNa) {
        None => Some(ReprIaNa::new()),
        Some(OptionRepr::IaNa(ia_na)) => Some(ia_na.clone()),
        Some(_) => {
            net_debug!("modifier: unexpected option type stored under {}", OptionCode::IaNa);
            None
        }
    }
}

fn copy_bounded<T: Clone, const N: usize>(items: &[T], what: &str) -> Vec<T, N> {
    if items.len() > N {
        net_debug!("modifier: {} holds at most {} entries, dropping {}", what, N, items.len() - N);
    }
    items.iter().take(N).cloned().collect()
}
