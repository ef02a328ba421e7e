//! Reference resolution rules (V002–V007).
//!
//! Every ID-based cross-entity reference is looked up against the identity
//! index. All failures are collected; resolution never stops at the first
//! dangling reference.

use crate::error::Violation;
use crate::parse::types::AudioSource;

use super::index::ProjectIndex;

/// Resolve every cross-entity reference. Returns all violations found, in
/// traversal order.
pub fn resolve_references(index: &ProjectIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    v002_v003_event_references(index, &mut violations);
    v004_sound_group_references(index, &mut violations);
    v005_v006_wave_references(index, &mut violations);
    v007_preset_references(index, &mut violations);

    violations
}

fn v002_v003_event_references(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for event in &index.events {
        if index.bus_index(&event.bus).is_none() {
            violations.push(Violation::new(
                "V002",
                format!(
                    "Event '{}' references unknown mix bus '{}'",
                    event.id, event.bus
                ),
                Some(event.id.clone()),
            ));
        }

        for source in &event.sources {
            match source {
                AudioSource::Sound { id } => {
                    if index.sound_index(id).is_none() {
                        violations.push(Violation::new(
                            "V003",
                            format!("Event '{}' references unknown sound '{}'", event.id, id),
                            Some(event.id.clone()),
                        ));
                    }
                }
                AudioSource::SoundGroup { id } => {
                    if index.sound_group_index(id).is_none() {
                        violations.push(Violation::new(
                            "V003",
                            format!(
                                "Event '{}' references unknown sound group '{}'",
                                event.id, id
                            ),
                            Some(event.id.clone()),
                        ));
                    }
                }
            }
        }
    }
}

fn v004_sound_group_references(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for group in &index.sound_groups {
        for sound_id in &group.sounds {
            if index.sound_index(sound_id).is_none() {
                violations.push(Violation::new(
                    "V004",
                    format!(
                        "Sound group '{}' references unknown sound '{}'",
                        group.id, sound_id
                    ),
                    Some(group.id.clone()),
                ));
            }
        }
    }
}

fn v005_v006_wave_references(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for sound in &index.sounds {
        for wave in &sound.waves {
            let Some(bank_idx) = index.wave_bank_index(&wave.wave_bank) else {
                violations.push(Violation::new(
                    "V005",
                    format!(
                        "Sound '{}' references unknown wave bank '{}'",
                        sound.id, wave.wave_bank
                    ),
                    Some(sound.id.clone()),
                ));
                continue;
            };

            let bank = index.wave_banks[bank_idx];
            match bank.entries.iter().find(|e| e.path == wave.path) {
                None => {
                    violations.push(Violation::new(
                        "V005",
                        format!(
                            "Sound '{}' references audio data '{}' not present in wave bank '{}'",
                            sound.id, wave.path, wave.wave_bank
                        ),
                        Some(sound.id.clone()),
                    ));
                }
                Some(entry) if entry.stream => {
                    violations.push(Violation::new(
                        "V006",
                        format!(
                            "Sound '{}' references audio data '{}' with the stream flag set",
                            sound.id, wave.path
                        ),
                        Some(sound.id.clone()),
                    ));
                }
                Some(_) => {}
            }
        }
    }
}

fn v007_preset_references(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for preset in &index.mix_presets {
        for params in &preset.parameters {
            if index.bus_index(&params.bus).is_none() {
                violations.push(Violation::new(
                    "V007",
                    format!(
                        "Mix preset '{}' references unknown mix bus '{}'",
                        preset.id, params.bus
                    ),
                    Some(preset.id.clone()),
                ));
            }
        }
    }
}
