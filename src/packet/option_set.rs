use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use managed::ManagedMap;

use crate::wire::{Error, OptionCode, OptionRepr, Result};

/// Opaque slot with space for storing the options of one option code.
///
/// This is public so you can use it to allocate fixed space for an
/// [OptionSet] with [OptionSet::with_storage].
pub type OptionSlot = Option<(u16, Vec<OptionRepr>)>;

/// The options of a DHCPv6 message, keyed by option code.
///
/// Each code maps to the instances stored under it, in insertion order.
/// Iteration visits codes in ascending order, which is also the order in
/// which options are emitted on the wire.
///
/// The lifetime `'a` is used when the map lives in caller-provided slots.
pub struct OptionSet<'a> {
    options: ManagedMap<'a, u16, Vec<OptionRepr>>,
}

impl<'a> OptionSet<'a> {
    /// Create an empty option set backed by an owned map.
    pub fn new() -> OptionSet<'a> {
        OptionSet {
            options: ManagedMap::Owned(BTreeMap::new()),
        }
    }

    /// Create an option set using the provided storage.
    ///
    /// A borrowed slice holds at most one distinct option code per slot.
    pub fn with_storage<OptionsT>(options: OptionsT) -> OptionSet<'a>
    where
        OptionsT: Into<ManagedMap<'a, u16, Vec<OptionRepr>>>,
    {
        OptionSet {
            options: options.into(),
        }
    }

    /// Return the first option stored under `code`, if any.
    pub fn get_one(&self, code: OptionCode) -> Option<&OptionRepr> {
        self.get(code).first()
    }

    /// Return every option stored under `code`.
    pub fn get(&self, code: OptionCode) -> &[OptionRepr] {
        match self.options.get(&u16::from(code)) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Append an option, keeping any instances already stored under its code.
    ///
    /// Returns `Err(Error)` if the storage is borrowed and has no free slot
    /// for a new code.
    pub fn add(&mut self, option: OptionRepr) -> Result<()> {
        let key = u16::from(option.code());
        if let Some(list) = self.options.get_mut(&key) {
            net_trace!("options: adding another {}", option.code());
            list.push(option);
            return Ok(());
        }

        net_trace!("options: adding {}", option.code());
        let mut list = Vec::with_capacity(1);
        list.push(option);
        match self.options.insert(key, list) {
            Ok(_) => Ok(()),
            Err(_) => {
                net_debug!("options: no free slot for code {}", key);
                Err(Error)
            }
        }
    }

    /// Replace every option stored under the code of `option` with
    /// `option`, or insert it if the code is absent.
    ///
    /// Returns `Err(Error)` if the storage is borrowed and has no free slot
    /// for a new code.
    pub fn update(&mut self, option: OptionRepr) -> Result<()> {
        let key = u16::from(option.code());
        if let Some(list) = self.options.get_mut(&key) {
            net_trace!("options: replacing {} instance(s) of {}", list.len(), option.code());
            list.clear();
            list.push(option);
            return Ok(());
        }
        self.add(option)
    }

    /// Remove every option stored under `code`, and return them.
    pub fn remove(&mut self, code: OptionCode) -> Vec<OptionRepr> {
        net_trace!("options: removing {}", code);
        self.options.remove(&u16::from(code)).unwrap_or_default()
    }

    /// Remove every option.
    pub fn clear(&mut self) {
        self.options.clear()
    }

    /// Get an iterator over the options, in code order and then in
    /// insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionRepr> + '_ {
        self.options.iter().flat_map(|(_, list)| list.iter())
    }

    /// Number of option instances in the set.
    pub fn len(&self) -> usize {
        self.options.iter().map(|(_, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> Default for OptionSet<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, 'b> PartialEq<OptionSet<'b>> for OptionSet<'a> {
    fn eq(&self, other: &OptionSet<'b>) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<'a> Eq for OptionSet<'a> {}

impl<'a> fmt::Debug for OptionSet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> fmt::Display for OptionSet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, option) in self.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<OptionRepr> for OptionSet<'a> {
    /// Collect options into an owned set, appending each one.
    fn from_iter<I: IntoIterator<Item = OptionRepr>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for option in iter {
            // An owned map always has room.
            set.add(option).ok();
        }
        set
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::wire::{Duid, ReprRequestedOptions};

    fn client_id(byte: u8) -> OptionRepr {
        OptionRepr::ClientId(Duid::from_bytes(&[0x00, 0x03, 0x00, 0x01, byte]))
    }

    #[test]
    fn test_add_keeps_instances() {
        let mut set = OptionSet::new();
        set.add(client_id(1)).unwrap();
        set.add(client_id(2)).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(OptionCode::ClientId), &[client_id(1), client_id(2)]);
        assert_eq!(set.get_one(OptionCode::ClientId), Some(&client_id(1)));
    }

    #[test]
    fn test_update_replaces_all() {
        let mut set = OptionSet::new();
        set.add(client_id(1)).unwrap();
        set.add(client_id(2)).unwrap();
        set.update(client_id(3)).unwrap();
        assert_eq!(set.get(OptionCode::ClientId), &[client_id(3)]);
    }

    #[test]
    fn test_update_inserts_when_absent() {
        let mut set = OptionSet::new();
        set.update(OptionRepr::ElapsedTime(0)).unwrap();
        assert_eq!(set.get_one(OptionCode::ElapsedTime), Some(&OptionRepr::ElapsedTime(0)));
        assert_eq!(set.get_one(OptionCode::ClientId), None);
    }

    #[test]
    fn test_iter_code_order() {
        let set: OptionSet = [
            OptionRepr::RequestedOptions(ReprRequestedOptions::new()),
            OptionRepr::ElapsedTime(5),
            client_id(1),
        ]
        .into_iter()
        .collect();
        let codes: std::vec::Vec<OptionCode> = set.iter().map(|o| o.code()).collect();
        assert_eq!(codes, [OptionCode::ClientId, OptionCode::Oro, OptionCode::ElapsedTime]);
    }

    #[test]
    fn test_remove() {
        let mut set = OptionSet::new();
        set.add(client_id(1)).unwrap();
        assert_eq!(set.remove(OptionCode::ClientId), vec![client_id(1)]);
        assert!(set.remove(OptionCode::ClientId).is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn test_borrowed_storage_full() {
        let mut slots: [OptionSlot; 2] = Default::default();
        let mut set = OptionSet::with_storage(&mut slots[..]);
        set.add(client_id(1)).unwrap();
        set.add(OptionRepr::ElapsedTime(0)).unwrap();
        // same code still fits in its slot
        set.add(client_id(2)).unwrap();
        assert_eq!(set.add(OptionRepr::ElapsedTime(1)), Ok(()));
        assert_eq!(
            set.update(OptionRepr::RequestedOptions(ReprRequestedOptions::new())),
            Err(Error)
        );
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_eq_across_storage() {
        let mut slots: [OptionSlot; 4] = Default::default();
        let mut borrowed = OptionSet::with_storage(&mut slots[..]);
        let mut owned = OptionSet::new();
        for set in [&mut borrowed, &mut owned] {
            set.update(OptionRepr::ElapsedTime(7)).unwrap();
            set.update(client_id(9)).unwrap();
        }
        assert_eq!(borrowed, owned);
    }
}
