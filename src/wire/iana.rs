// See https://www.iana.org/assignments/dhcpv6-parameters/dhcpv6-parameters.xhtml#processor-architecture
// for the client system architecture type registry.

use core::fmt;

enum_with_unknown! {
    /// Client system architecture types, as carried in the Client System
    /// Architecture Type option (RFC 5970, section 3.3).
    pub enum Arch(u16) {
        IntelX86Pc = 0x00,
        NecPc98 = 0x01,
        EfiItanium = 0x02,
        DecAlpha = 0x03,
        ArcX86 = 0x04,
        IntelLeanClient = 0x05,
        EfiIa32 = 0x06,
        EfiX86_64 = 0x07,
        EfiXscale = 0x08,
        EfiBc = 0x09,
        EfiArm32 = 0x0a,
        EfiArm64 = 0x0b,
        PpcOpenFirmware = 0x0c,
        PpcEpapr = 0x0d,
        PpcOpalV3 = 0x0e,
        EfiX86Http = 0x0f,
        EfiX86_64Http = 0x10,
        EfiBcHttp = 0x11,
        EfiArm32Http = 0x12,
        EfiArm64Http = 0x13,
        IntelX86PcHttp = 0x14,
        UbootArm32 = 0x15,
        UbootArm64 = 0x16,
        UbootArm32Http = 0x17,
        UbootArm64Http = 0x18,
        EfiRiscv32 = 0x19,
        EfiRiscv32Http = 0x1a,
        EfiRiscv64 = 0x1b,
        EfiRiscv64Http = 0x1c,
        EfiRiscv128 = 0x1d,
        EfiRiscv128Http = 0x1e,
        S390Basic = 0x1f,
        S390Extended = 0x20,
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::IntelX86Pc => write!(f, "Intel x86PC"),
            Self::NecPc98 => write!(f, "NEC/PC98"),
            Self::EfiItanium => write!(f, "EFI Itanium"),
            Self::DecAlpha => write!(f, "DEC Alpha"),
            Self::ArcX86 => write!(f, "Arc x86"),
            Self::IntelLeanClient => write!(f, "Intel Lean Client"),
            Self::EfiIa32 => write!(f, "EFI IA32"),
            Self::EfiX86_64 => write!(f, "EFI x86-64"),
            Self::EfiXscale => write!(f, "EFI Xscale"),
            Self::EfiBc => write!(f, "EFI BC"),
            Self::EfiArm32 => write!(f, "ARM 32-bit UEFI"),
            Self::EfiArm64 => write!(f, "ARM 64-bit UEFI"),
            Self::PpcOpenFirmware => write!(f, "PowerPC Open Firmware"),
            Self::PpcEpapr => write!(f, "PowerPC ePAPR"),
            Self::PpcOpalV3 => write!(f, "POWER OPAL v3"),
            Self::EfiX86Http => write!(f, "x86 UEFI HTTP"),
            Self::EfiX86_64Http => write!(f, "x64 UEFI HTTP"),
            Self::EfiBcHttp => write!(f, "EBC HTTP"),
            Self::EfiArm32Http => write!(f, "ARM 32-bit UEFI HTTP"),
            Self::EfiArm64Http => write!(f, "ARM 64-bit UEFI HTTP"),
            Self::IntelX86PcHttp => write!(f, "PC/AT BIOS HTTP"),
            Self::UbootArm32 => write!(f, "ARM 32-bit U-Boot"),
            Self::UbootArm64 => write!(f, "ARM 64-bit U-Boot"),
            Self::UbootArm32Http => write!(f, "ARM 32-bit U-Boot HTTP"),
            Self::UbootArm64Http => write!(f, "ARM 64-bit U-Boot HTTP"),
            Self::EfiRiscv32 => write!(f, "RISC-V 32-bit UEFI"),
            Self::EfiRiscv32Http => write!(f, "RISC-V 32-bit UEFI HTTP"),
            Self::EfiRiscv64 => write!(f, "RISC-V 64-bit UEFI"),
            Self::EfiRiscv64Http => write!(f, "RISC-V 64-bit UEFI HTTP"),
            Self::EfiRiscv128 => write!(f, "RISC-V 128-bit UEFI"),
            Self::EfiRiscv128Http => write!(f, "RISC-V 128-bit UEFI HTTP"),
            Self::S390Basic => write!(f, "s390 Basic"),
            Self::S390Extended => write!(f, "s390 Extended"),
            Self::Unknown(a) => write!(f, "unknown({a:#06x})"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_arch_conversion() {
        assert_eq!(Arch::from(0x07), Arch::EfiX86_64);
        assert_eq!(u16::from(Arch::EfiArm64), 0x0b);
        assert_eq!(Arch::from(0xbeef), Arch::Unknown(0xbeef));
        assert_eq!(format!("{}", Arch::from(0xbeef)), "unknown(0xbeef)");
        assert_eq!(format!("{}", Arch::EfiX86_64Http), "x64 UEFI HTTP");
    }
}
