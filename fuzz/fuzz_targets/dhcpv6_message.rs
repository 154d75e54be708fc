#![no_main]
use dhcpv6_modifiers::packet::{Dhcpv6, OptionSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(packet) = Dhcpv6::parse(data, OptionSet::new()) {
        let mut buffer = vec![0; packet.buffer_len()];
        // Names holding dots inside a label have no uncompressed encoding.
        if packet.emit(&mut buffer).is_ok() {
            Dhcpv6::parse(&buffer, OptionSet::new()).unwrap();
        }
    }
});
