// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Probe entries: the rows of information shown about a target.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use probe_hud_imaging::ItemId;

use crate::units::{UnitTag, format_plain};

bitflags::bitflags! {
    /// Which features a [`ProbeEntry`] carries.
    ///
    /// Layout and rendering branch on these; an entry with no features is
    /// valid and occupies no space.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EntryFeatures: u8 {
        /// The entry has a label.
        const LABEL     = 0b0000_0001;
        /// The entry has a progress bar.
        const BAR       = 0b0000_0010;
        /// The entry has at least one inventory slot.
        const INVENTORY = 0b0000_0100;
    }
}

/// A stack of items in one inventory slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemStack {
    /// Item handle forwarded to the icon renderer.
    pub item: ItemId,
    /// Number of items in the stack.
    pub count: u32,
}

impl ItemStack {
    /// Create a stack.
    pub const fn new(item: ItemId, count: u32) -> Self {
        Self { item, count }
    }

    /// Create a stack of a single item.
    pub const fn single(item: ItemId) -> Self {
        Self::new(item, 1)
    }
}

/// One inventory slot; `None` is an empty slot.
pub type Slot = Option<ItemStack>;

/// A bounded numeric progress indicator.
///
/// `minimum <= maximum` always holds; [`Bar::new`] swaps inverted bounds.
/// `current` is not clamped here. Renderers clamp the fill on display, so an
/// overfull or underfull bar is representable.
#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    minimum: f64,
    current: f64,
    maximum: f64,
    unit: Option<UnitTag>,
}

impl Bar {
    /// Create a bar with no unit.
    pub fn new(minimum: f64, current: f64, maximum: f64) -> Self {
        let (minimum, maximum) = if minimum <= maximum {
            (minimum, maximum)
        } else {
            (maximum, minimum)
        };
        Self {
            minimum,
            current,
            maximum,
            unit: None,
        }
    }

    /// Returns this bar with a display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: UnitTag) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Lower bound.
    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    /// Current value.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Upper bound.
    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    /// Display unit, if any.
    pub fn unit(&self) -> Option<&UnitTag> {
        self.unit.as_ref()
    }

    /// Returns `true` if the bar has a display unit.
    pub fn has_unit(&self) -> bool {
        self.unit.is_some()
    }

    /// `maximum - minimum`; zero for a degenerate bar.
    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }

    /// The current value formatted in the bar's unit.
    pub fn formatted_current(&self) -> String {
        match &self.unit {
            Some(unit) => unit.format(self.current),
            None => format_plain(self.current),
        }
    }
}

/// One row of displayable information about a target.
///
/// Any subset of label, bar and inventory may be present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProbeEntry {
    /// Text shown on the row. Style codes are passed through to the text backend.
    pub label: Option<String>,
    /// Progress bar.
    pub bar: Option<Bar>,
    /// Inventory slots in display order.
    pub inventory: Vec<Slot>,
    /// Caption drawn inside the bar instead of the formatted value.
    ///
    /// Set on the identity entry when it absorbs a plain bar together with its
    /// label; see [`normalize`](crate::normalize).
    pub bar_label: Option<String>,
}

impl ProbeEntry {
    /// Create an empty entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this entry with a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns this entry with a bar.
    #[must_use]
    pub fn with_bar(mut self, bar: Bar) -> Self {
        self.bar = Some(bar);
        self
    }

    /// Returns this entry with the given inventory slots.
    #[must_use]
    pub fn with_inventory(mut self, slots: impl IntoIterator<Item = Slot>) -> Self {
        self.inventory = slots.into_iter().collect();
        self
    }

    /// Returns this entry with a single-item inventory.
    #[must_use]
    pub fn with_item(mut self, stack: ItemStack) -> Self {
        self.inventory = vec![Some(stack)];
        self
    }

    /// Returns this entry with an explicit bar caption.
    #[must_use]
    pub fn with_bar_label(mut self, caption: impl Into<String>) -> Self {
        self.bar_label = Some(caption.into());
        self
    }

    /// Returns `true` if the entry has a label.
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Returns `true` if the entry has a bar.
    pub fn has_bar(&self) -> bool {
        self.bar.is_some()
    }

    /// Returns `true` if the entry has at least one inventory slot.
    pub fn has_inventory(&self) -> bool {
        !self.inventory.is_empty()
    }

    /// The set of features present on this entry.
    pub fn features(&self) -> EntryFeatures {
        let mut features = EntryFeatures::empty();
        features.set(EntryFeatures::LABEL, self.has_label());
        features.set(EntryFeatures::BAR, self.has_bar());
        features.set(EntryFeatures::INVENTORY, self.has_inventory());
        features
    }

    /// Returns `true` if the single inventory slot is drawn as an icon at the
    /// start of the row rather than as a slot grid.
    pub fn has_attached_icon(&self) -> bool {
        self.inventory.len() == 1 && (self.has_label() || self.has_bar())
    }

    /// Text drawn inside the bar, and whether it consumes the label.
    ///
    /// The caption is the explicit [`bar_label`](Self::bar_label) when set;
    /// otherwise the label of a unitless bar (which then is not drawn as a
    /// separate run); otherwise the bar's formatted current value.
    pub fn bar_caption(&self) -> Option<(String, bool)> {
        let bar = self.bar.as_ref()?;
        if let Some(caption) = &self.bar_label {
            return Some((caption.clone(), false));
        }
        match &self.label {
            Some(label) if !bar.has_unit() => Some((label.clone(), true)),
            _ => Some((bar.formatted_current(), false)),
        }
    }
}

/// The targeted object itself: its representative item and display name.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    /// Item shown as the target's icon.
    pub item: ItemStack,
    /// Display name of the target.
    pub name: String,
}

impl Identity {
    /// Create an identity.
    pub fn new(item: ItemStack, name: impl Into<String>) -> Self {
        Self {
            item,
            name: name.into(),
        }
    }

    /// The identity entry: the target's icon and name on one row.
    pub fn into_entry(self) -> ProbeEntry {
        ProbeEntry::new().with_item(self.item).with_label(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{PERCENT, TICKS};

    const COAL: ItemId = ItemId(263);

    #[test]
    fn bar_bounds_are_normalized() {
        let bar = Bar::new(20.0, 5.0, 0.0);
        assert_eq!(bar.minimum(), 0.0);
        assert_eq!(bar.maximum(), 20.0);
        assert_eq!(bar.current(), 5.0);
        assert_eq!(bar.range(), 20.0);
    }

    #[test]
    fn features_reflect_populated_fields() {
        assert_eq!(ProbeEntry::new().features(), EntryFeatures::empty());

        let entry = ProbeEntry::new()
            .with_label("Fuel")
            .with_bar(Bar::new(0.0, 1.0, 2.0));
        assert_eq!(entry.features(), EntryFeatures::LABEL | EntryFeatures::BAR);

        let empty_inventory = ProbeEntry::new().with_inventory([]);
        assert!(!empty_inventory.has_inventory());

        let slots = ProbeEntry::new().with_inventory([None, Some(ItemStack::single(COAL))]);
        assert_eq!(slots.features(), EntryFeatures::INVENTORY);
    }

    #[test]
    fn attached_icon_needs_exactly_one_slot_and_text() {
        let icon = ProbeEntry::new()
            .with_item(ItemStack::single(COAL))
            .with_label("Coal");
        assert!(icon.has_attached_icon());

        let lone = ProbeEntry::new().with_item(ItemStack::single(COAL));
        assert!(!lone.has_attached_icon());

        let pair = ProbeEntry::new()
            .with_label("Coal")
            .with_inventory([Some(ItemStack::single(COAL)), None]);
        assert!(!pair.has_attached_icon());
    }

    #[test]
    fn caption_prefers_explicit_bar_label() {
        let entry = ProbeEntry::new()
            .with_label("Furnace")
            .with_bar(Bar::new(0.0, 10.0, 20.0))
            .with_bar_label("Fuel");
        assert_eq!(entry.bar_caption(), Some((String::from("Fuel"), false)));
    }

    #[test]
    fn unitless_bar_consumes_its_label() {
        let entry = ProbeEntry::new()
            .with_label("Fuel")
            .with_bar(Bar::new(0.0, 10.0, 20.0));
        assert_eq!(entry.bar_caption(), Some((String::from("Fuel"), true)));
    }

    #[test]
    fn unit_bar_captions_with_formatted_value() {
        let entry = ProbeEntry::new()
            .with_label("Progress")
            .with_bar(Bar::new(0.0, 55.0, 100.0).with_unit(PERCENT));
        assert_eq!(entry.bar_caption(), Some((String::from("55%"), false)));

        let bare = ProbeEntry::new().with_bar(Bar::new(0.0, 7.0, 10.0));
        assert_eq!(bare.bar_caption(), Some((String::from("7"), false)));

        let ticks = ProbeEntry::new().with_bar(Bar::new(0.0, 40.0, 200.0).with_unit(TICKS));
        assert_eq!(ticks.bar_caption(), Some((String::from("40t"), false)));

        assert_eq!(ProbeEntry::new().with_label("x").bar_caption(), None);
    }

    #[test]
    fn identity_entry_has_icon_and_name() {
        let entry = Identity::new(ItemStack::single(COAL), "Coal Block").into_entry();
        assert_eq!(entry.label.as_deref(), Some("Coal Block"));
        assert_eq!(entry.inventory, [Some(ItemStack::single(COAL))]);
        assert!(entry.has_attached_icon());
    }
}
