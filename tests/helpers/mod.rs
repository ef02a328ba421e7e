#![allow(dead_code)]

use bankc::parse::types::*;

// =============================================================================
// Project builders
// =============================================================================

/// Bare project: the given trees, everything else empty.
pub fn project(master: MixBus, root: EventGroup) -> Project {
    Project {
        name: "test".into(),
        comment: String::new(),
        master_bus: master,
        event_root: root,
        wave_banks: vec![],
        sounds: vec![],
        sound_groups: vec![],
        mix_presets: vec![],
    }
}

/// Smallest fully valid project: one bus, one event group, one event backed
/// by sound "s1" in wave bank "bank1", one default mix preset.
pub fn minimal_project() -> Project {
    let mut p = project(
        bus("master", vec![]),
        group(
            "root",
            vec![],
            vec![event("explosion", "master", vec![sound_source("s1")])],
        ),
    );
    p.wave_banks = vec![wave_bank("bank1", vec!["explosion.wav"])];
    p.sounds = vec![sound("s1", vec![("bank1", "explosion.wav")])];
    p.mix_presets = vec![preset("main", true, vec!["master"])];
    p
}

// =============================================================================
// Entity builders
// =============================================================================

pub fn bus(id: &str, children: Vec<MixBus>) -> MixBus {
    MixBus {
        id: id.into(),
        comment: String::new(),
        children,
    }
}

pub fn group(id: &str, children: Vec<EventGroup>, events: Vec<Event>) -> EventGroup {
    EventGroup {
        id: id.into(),
        comment: String::new(),
        children,
        events,
    }
}

pub fn event(id: &str, bus: &str, sources: Vec<AudioSource>) -> Event {
    Event {
        id: id.into(),
        comment: String::new(),
        bus: bus.into(),
        gain: 1.0,
        pitch: 1.0,
        sources,
    }
}

pub fn sound_source(id: &str) -> AudioSource {
    AudioSource::Sound { id: id.into() }
}

pub fn group_source(id: &str) -> AudioSource {
    AudioSource::SoundGroup { id: id.into() }
}

pub fn sound(id: &str, waves: Vec<(&str, &str)>) -> Sound {
    Sound {
        id: id.into(),
        comment: String::new(),
        gain: 1.0,
        pitch: 1.0,
        waves: waves
            .into_iter()
            .map(|(bank, path)| WaveReference {
                wave_bank: bank.into(),
                path: path.into(),
            })
            .collect(),
    }
}

pub fn sound_group(id: &str, sounds: Vec<&str>) -> SoundGroup {
    SoundGroup {
        id: id.into(),
        comment: String::new(),
        sounds: sounds.into_iter().map(String::from).collect(),
    }
}

pub fn wave_bank(id: &str, paths: Vec<&str>) -> WaveBank {
    wave_bank_with(id, paths.into_iter().map(|p| (p, false)).collect())
}

pub fn wave_bank_with(id: &str, entries: Vec<(&str, bool)>) -> WaveBank {
    WaveBank {
        id: id.into(),
        comment: String::new(),
        entries: entries
            .into_iter()
            .map(|(path, stream)| AudioEntry {
                path: path.into(),
                stream,
            })
            .collect(),
    }
}

/// Preset with one unit-gain parameter set per listed bus ID.
pub fn preset(id: &str, is_default: bool, buses: Vec<&str>) -> MixPreset {
    MixPreset {
        id: id.into(),
        comment: String::new(),
        is_default,
        parameters: buses
            .into_iter()
            .map(|bus| BusParameters {
                bus: bus.into(),
                left_gain: 1.0,
                right_gain: 1.0,
                pitch: 1.0,
            })
            .collect(),
    }
}
