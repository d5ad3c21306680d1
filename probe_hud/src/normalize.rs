// Copyright 2026 the Probe HUD Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Entry normalization: merging the target's identity into its entry list.

use alloc::vec::Vec;

use crate::entry::{Identity, ProbeEntry};

/// Normalize a raw entry list for display.
///
/// The identity entry (target icon and name) is always first. If the first
/// raw entry is a bar with no inventory, and either has no label or has a
/// unitless bar, its bar is folded into the identity entry:
///
/// - a label on a unitless bar becomes the identity's
///   [`bar_label`](ProbeEntry::bar_label);
/// - whatever else the entry carried (a label next to a unit bar, inventory)
///   stays behind on a replacement entry, which is omitted when empty.
///
/// An unlabelled bar qualifies with or without a unit, so a lone energy or
/// fluid bar is shown next to the name. Only a labelled bar with a unit keeps
/// its own row.
///
/// All other entries follow unchanged and in order.
///
/// Running this again on its own output never absorbs a second bar: the old
/// identity entry carries an inventory and so does not qualify.
pub fn normalize(raw: &[ProbeEntry], identity: Identity) -> Vec<ProbeEntry> {
    let mut out = Vec::with_capacity(raw.len() + 1);
    let mut ident = identity.into_entry();

    let mut rest = raw.iter();
    if let Some(first) = rest.next() {
        match absorb_into(&mut ident, first) {
            Absorbed::No => {
                out.push(ident);
                out.push(first.clone());
            }
            Absorbed::Yes(replacement) => {
                out.push(ident);
                out.extend(replacement);
            }
        }
    } else {
        out.push(ident);
    }
    out.extend(rest.cloned());
    out
}

enum Absorbed {
    No,
    Yes(Option<ProbeEntry>),
}

fn qualifies(ident: &ProbeEntry, entry: &ProbeEntry) -> bool {
    let Some(bar) = &entry.bar else {
        return false;
    };
    !ident.has_bar() && !entry.has_inventory() && (!entry.has_label() || !bar.has_unit())
}

fn absorb_into(ident: &mut ProbeEntry, entry: &ProbeEntry) -> Absorbed {
    if !qualifies(ident, entry) {
        return Absorbed::No;
    }
    let Some(bar) = entry.bar.clone() else {
        return Absorbed::No;
    };

    let mut replacement = ProbeEntry::new();
    match &entry.label {
        Some(label) if !bar.has_unit() => ident.bar_label = Some(label.clone()),
        label => replacement.label = label.clone(),
    }
    replacement.inventory = entry.inventory.clone();
    ident.bar = Some(bar);

    let replacement = (replacement.has_label() || replacement.has_inventory()).then_some(replacement);
    Absorbed::Yes(replacement)
}
