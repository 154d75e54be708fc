//! Build a DHCPv6 Solicit from command-line modifiers, then print it and
//! its wire encoding.
//!
//! ```sh
//! cargo run --example build_message -- --mac 02:00:00:00:00:01 \
//!     --netboot --arch 7 --dns 2001:db8::53 --search example.com
//! ```

use std::env;
use std::io::{self, Write};
use std::net::IpAddr;
use std::process;

use env_logger::Builder;
use getopts::{Matches, Options};
use log::{Level, LevelFilter};

use dhcpv6_modifiers::modifier::{self, Modifier};
use dhcpv6_modifiers::packet::{Dhcpv6, Message, OptionSet};
use dhcpv6_modifiers::wire::{
    Arch, Dhcpv6MessageType, Duid, Ipv6Address, OptionCode, ReprIaAddr, DHCPV6_SERVER_PORT,
};

fn setup_logging(filter: &str) {
    Builder::new()
        .format(|buf, record| {
            if record.target().starts_with("dhcpv6_modifiers::") {
                writeln!(
                    buf,
                    "\x1b[0m({}): {}\x1b[0m",
                    record.target().replace("dhcpv6_modifiers::", ""),
                    record.args()
                )
            } else if record.level() == Level::Trace {
                let message = format!("{}", record.args());
                writeln!(buf, "\x1b[37m{}\x1b[0m", message.replace('\n', "\n             "))
            } else {
                writeln!(buf, "\x1b[32m({}): {}\x1b[0m", record.target(), record.args())
            }
        })
        .filter(None, LevelFilter::Trace)
        .parse_filters(filter)
        .parse_env("RUST_LOG")
        .init();
}

fn create_options() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "print this help menu");
    opts.optopt("", "xid", "transaction id (default: 0x123456)", "XID");
    opts.optopt("", "mac", "MAC address used for the DUID-LL client identifier", "MAC");
    opts.optflag("", "netboot", "request bootfile URL and parameters");
    opts.optopt("", "arch", "client architecture type (IANA number)", "ARCH");
    opts.optopt("", "user-class", "user class", "CLASS");
    opts.optmulti("", "iana", "address to request in the IA_NA", "ADDRESS");
    opts.optmulti("", "dns", "DNS recursive name server (IPv6 or IPv4)", "ADDRESS");
    opts.optmulti("", "search", "domain search list entry", "DOMAIN");
    opts.optmulti("", "request", "option code to request", "CODE");
    opts
}

fn parse_options(opts: &Options) -> Matches {
    let matches = match opts.parse(env::args().skip(1)) {
        Ok(matches) => matches,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1)
        }
    };
    if matches.opt_present("h") || !matches.free.is_empty() {
        let brief = format!("Usage: {} [OPTION]...", env::args().next().unwrap());
        print!("{}", opts.usage(&brief));
        process::exit(if matches.free.is_empty() { 0 } else { 1 })
    }
    matches
}

fn exit_with(what: &str, value: &str) -> ! {
    eprintln!("invalid {what}: {value}");
    process::exit(1)
}

fn parse_mac(text: &str) -> [u8; 6] {
    let mut mac = [0u8; 6];
    let mut parts = text.split(':');
    for octet in mac.iter_mut() {
        *octet = parts
            .next()
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or_else(|| exit_with("MAC address", text));
    }
    if parts.next().is_some() {
        exit_with("MAC address", text)
    }
    mac
}

fn parse_address(text: &str) -> Ipv6Address {
    match text.parse::<IpAddr>() {
        Ok(IpAddr::V6(addr)) => Ipv6Address::from(addr),
        Ok(IpAddr::V4(addr)) => Ipv6Address::from_ipv4_mapped(addr.octets()),
        Err(_) => exit_with("address", text),
    }
}

fn parse_u32(text: &str) -> u32 {
    let parsed = match text.strip_prefix("0x") {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.unwrap_or_else(|_| exit_with("number", text))
}

fn main() {
    setup_logging("");

    let opts = create_options();
    let matches = parse_options(&opts);

    let xid = matches.opt_str("xid").map_or(0x12_3456, |xid| parse_u32(&xid));
    let packet = Dhcpv6::Message(Message::new(
        Dhcpv6MessageType::Solicit,
        xid,
        OptionSet::new(),
    ));

    let mac = matches.opt_str("mac").map_or([0x02, 0, 0, 0, 0, 1], |mac| parse_mac(&mac));
    let client_id = modifier::with_client_id(Duid::new_ll(1, &mac));

    let requested: Vec<OptionCode> = matches
        .opt_strs("request")
        .iter()
        .map(|code| OptionCode::from(parse_u32(code) as u16))
        .collect();
    let oro = modifier::with_requested_options(&requested);

    let arch = matches
        .opt_str("arch")
        .map(|arch| modifier::with_arch_type(Arch::from(parse_u32(&arch) as u16)));
    let user_class = matches
        .opt_str("user-class")
        .map(|class| modifier::with_user_class(class.as_bytes()));

    let addrs: Vec<ReprIaAddr> = matches
        .opt_strs("iana")
        .iter()
        .map(|addr| ReprIaAddr::new(parse_address(addr)))
        .collect();
    let iana = modifier::with_iana(&addrs);

    let servers: Vec<Ipv6Address> =
        matches.opt_strs("dns").iter().map(|addr| parse_address(addr)).collect();
    let dns = modifier::with_dns(&servers);

    let names = matches.opt_strs("search");
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let search = modifier::with_domain_search_list(&names);

    let mut modifiers: Vec<&dyn Modifier> = vec![&client_id];
    if !requested.is_empty() {
        modifiers.push(&oro);
    }
    if matches.opt_present("netboot") {
        modifiers.push(&modifier::with_netboot);
    }
    if let Some(arch) = arch.as_ref() {
        modifiers.push(arch);
    }
    if let Some(user_class) = user_class.as_ref() {
        modifiers.push(user_class);
    }
    if !addrs.is_empty() {
        modifiers.push(&iana);
    }
    if !servers.is_empty() {
        modifiers.push(&dns);
    }
    if !names.is_empty() {
        modifiers.push(&search);
    }

    let packet = modifier::apply(packet, &modifiers);
    println!("{packet}");

    let mut bytes = vec![0; packet.buffer_len()];
    match packet.emit(&mut bytes) {
        Ok(len) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for chunk in bytes[..len].chunks(16) {
                let line: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
                writeln!(out, "{}", line.join(" ")).ok();
            }
        }
        Err(err) => {
            eprintln!("cannot encode message: {err}");
            process::exit(1)
        }
    }

    log::info!(
        "{} octets, to be sent to [{}]:{}",
        packet.buffer_len(),
        Ipv6Address::ALL_DHCP_RELAY_AGENTS_AND_SERVERS,
        DHCPV6_SERVER_PORT
    );
}
