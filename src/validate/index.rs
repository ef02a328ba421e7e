//! Identity Index: one traversal of the project graph producing dense
//! per-category arenas, ID lookup maps, and the duplicate-ID catalogue.
//!
//! The traversal order fixed here is load-bearing: it is the order the
//! compiler assigns integer indices in, so it must be deterministic.
//! Both trees are walked depth-first with parents before children and
//! children in declared order; within an event group, the group's own
//! events come before its child groups. The flat collections keep their
//! authored order.

use std::collections::HashMap;

use crate::parse::types::{Event, EventGroup, MixBus, MixPreset, Project, Sound, SoundGroup, WaveBank};

/// An entity category. IDs are unique per category, not globally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    MixBus,
    EventGroup,
    Event,
    Sound,
    SoundGroup,
    WaveBank,
    MixPreset,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::MixBus => "mix bus",
            Category::EventGroup => "event group",
            Category::Event => "event",
            Category::Sound => "sound",
            Category::SoundGroup => "sound group",
            Category::WaveBank => "wave bank",
            Category::MixPreset => "mix preset",
        };
        write!(f, "{}", name)
    }
}

/// Dense per-category tables over a project graph, plus ID lookup maps.
///
/// The two trees are flattened into arenas with child-index lists, which is
/// also the shape the binary artifact uses. Building never fails: duplicate
/// IDs are catalogued and the first occurrence stays in the lookup maps so
/// reference resolution can still run meaningfully.
#[derive(Debug, Default)]
pub struct ProjectIndex<'p> {
    /// Mix buses in depth-first order; the master bus is index 0.
    pub mix_buses: Vec<&'p MixBus>,
    /// Dense child indices per bus, parallel to `mix_buses`.
    pub bus_children: Vec<Vec<usize>>,
    /// Event groups in depth-first order; the root group is index 0.
    pub event_groups: Vec<&'p EventGroup>,
    /// Dense child-group indices per group, parallel to `event_groups`.
    pub group_children: Vec<Vec<usize>>,
    /// Dense event indices owned by each group, parallel to `event_groups`.
    pub group_events: Vec<Vec<usize>>,
    pub events: Vec<&'p Event>,
    pub sounds: Vec<&'p Sound>,
    pub sound_groups: Vec<&'p SoundGroup>,
    pub wave_banks: Vec<&'p WaveBank>,
    pub mix_presets: Vec<&'p MixPreset>,
    /// IDs that appeared more than once, in traversal order, one entry per
    /// extra occurrence.
    pub duplicates: Vec<(Category, String)>,
    bus_ids: HashMap<&'p str, usize>,
    group_ids: HashMap<&'p str, usize>,
    event_ids: HashMap<&'p str, usize>,
    sound_ids: HashMap<&'p str, usize>,
    sound_group_ids: HashMap<&'p str, usize>,
    wave_bank_ids: HashMap<&'p str, usize>,
    preset_ids: HashMap<&'p str, usize>,
}

impl<'p> ProjectIndex<'p> {
    pub fn build(project: &'p Project) -> Self {
        let mut index = ProjectIndex::default();

        index.add_bus(&project.master_bus);
        index.add_event_group(&project.event_root);

        for sound in &project.sounds {
            let idx = index.sounds.len();
            index.sounds.push(sound);
            if index.sound_ids.contains_key(sound.id.as_str()) {
                index.duplicates.push((Category::Sound, sound.id.clone()));
            } else {
                index.sound_ids.insert(&sound.id, idx);
            }
        }

        for group in &project.sound_groups {
            let idx = index.sound_groups.len();
            index.sound_groups.push(group);
            if index.sound_group_ids.contains_key(group.id.as_str()) {
                index.duplicates.push((Category::SoundGroup, group.id.clone()));
            } else {
                index.sound_group_ids.insert(&group.id, idx);
            }
        }

        for bank in &project.wave_banks {
            let idx = index.wave_banks.len();
            index.wave_banks.push(bank);
            if index.wave_bank_ids.contains_key(bank.id.as_str()) {
                index.duplicates.push((Category::WaveBank, bank.id.clone()));
            } else {
                index.wave_bank_ids.insert(&bank.id, idx);
            }
        }

        for preset in &project.mix_presets {
            let idx = index.mix_presets.len();
            index.mix_presets.push(preset);
            if index.preset_ids.contains_key(preset.id.as_str()) {
                index.duplicates.push((Category::MixPreset, preset.id.clone()));
            } else {
                index.preset_ids.insert(&preset.id, idx);
            }
        }

        index
    }

    fn add_bus(&mut self, bus: &'p MixBus) -> usize {
        let idx = self.mix_buses.len();
        self.mix_buses.push(bus);
        self.bus_children.push(Vec::new());
        if self.bus_ids.contains_key(bus.id.as_str()) {
            self.duplicates.push((Category::MixBus, bus.id.clone()));
        } else {
            self.bus_ids.insert(&bus.id, idx);
        }

        let children: Vec<usize> = bus.children.iter().map(|c| self.add_bus(c)).collect();
        self.bus_children[idx] = children;
        idx
    }

    fn add_event_group(&mut self, group: &'p EventGroup) -> usize {
        let idx = self.event_groups.len();
        self.event_groups.push(group);
        self.group_children.push(Vec::new());
        self.group_events.push(Vec::new());
        if self.group_ids.contains_key(group.id.as_str()) {
            self.duplicates.push((Category::EventGroup, group.id.clone()));
        } else {
            self.group_ids.insert(&group.id, idx);
        }

        let events: Vec<usize> = group.events.iter().map(|e| self.add_event(e)).collect();
        self.group_events[idx] = events;

        let children: Vec<usize> = group
            .children
            .iter()
            .map(|c| self.add_event_group(c))
            .collect();
        self.group_children[idx] = children;
        idx
    }

    fn add_event(&mut self, event: &'p Event) -> usize {
        let idx = self.events.len();
        self.events.push(event);
        if self.event_ids.contains_key(event.id.as_str()) {
            self.duplicates.push((Category::Event, event.id.clone()));
        } else {
            self.event_ids.insert(&event.id, idx);
        }
        idx
    }

    pub fn bus_index(&self, id: &str) -> Option<usize> {
        self.bus_ids.get(id).copied()
    }

    pub fn event_group_index(&self, id: &str) -> Option<usize> {
        self.group_ids.get(id).copied()
    }

    pub fn event_index(&self, id: &str) -> Option<usize> {
        self.event_ids.get(id).copied()
    }

    pub fn sound_index(&self, id: &str) -> Option<usize> {
        self.sound_ids.get(id).copied()
    }

    pub fn sound_group_index(&self, id: &str) -> Option<usize> {
        self.sound_group_ids.get(id).copied()
    }

    pub fn wave_bank_index(&self, id: &str) -> Option<usize> {
        self.wave_bank_ids.get(id).copied()
    }

    pub fn preset_index(&self, id: &str) -> Option<usize> {
        self.preset_ids.get(id).copied()
    }
}
