//! Compile pass: validated project graph → binary engine artifact.
//!
//! Dense per-category indices were already assigned by the identity index;
//! this pass rewrites every ID-based reference as an integer index into the
//! target table and emits the chunked layout described in [`crate::artifact`].
//! Compilation is pure and deterministic: the same validated graph always
//! produces byte-identical output. The only failure mode is the final
//! artifact write.

mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::artifact::{
    EVENT_CHUNK, EVENT_GROUP_CHUNK, FLAG_NAMES_STRIPPED, FORMAT_VERSION, MAGIC, MIX_BUS_CHUNK,
    MIX_PRESET_CHUNK, SOUND_CHUNK, SOUND_GROUP_CHUNK, SOURCE_SOUND, SOURCE_SOUND_GROUP,
    WAVE_BANK_CHUNK,
};
use log::debug;

use crate::error::ArtifactError;
use crate::parse::types::AudioSource;
use crate::validate::ValidatedProject;
use crate::validate::index::ProjectIndex;

use writer::BinaryWriter;

/// Default artifact file extension.
pub const ARTIFACT_EXTENSION: &str = "abf";

/// Options controlling artifact emission.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Write every name/path string as zero-length. Names exist for
    /// debugging and viewers only; indices and counts are unaffected.
    pub strip_names: bool,
}

/// Serialize a validated project into artifact bytes.
pub fn compile(validated: &ValidatedProject<'_>, options: &CompileOptions) -> Vec<u8> {
    let index = validated.index();

    let mut out = BinaryWriter::new();
    out.raw(&MAGIC);
    out.u32(FORMAT_VERSION);

    let mut flags = 0;
    if options.strip_names {
        flags |= FLAG_NAMES_STRIPPED;
    }
    out.u32(flags);
    out.index(index.mix_buses.len());
    out.index(index.event_groups.len());
    out.index(index.events.len());
    out.index(index.sounds.len());
    out.index(index.sound_groups.len());
    out.index(index.wave_banks.len());
    out.index(index.mix_presets.len());
    out.index(default_preset_index(index));

    let chunks = [
        (MIX_BUS_CHUNK, mix_bus_chunk(index, options).finish()),
        (EVENT_GROUP_CHUNK, event_group_chunk(index, options).finish()),
        (EVENT_CHUNK, event_chunk(index, options).finish()),
        (SOUND_CHUNK, sound_chunk(index, options).finish()),
        (SOUND_GROUP_CHUNK, sound_group_chunk(index, options).finish()),
        (WAVE_BANK_CHUNK, wave_bank_chunk(index, options).finish()),
        (MIX_PRESET_CHUNK, mix_preset_chunk(index, options).finish()),
    ];
    for (fourcc, payload) in &chunks {
        debug!(
            "chunk {}: {} bytes",
            String::from_utf8_lossy(fourcc),
            payload.len()
        );
        out.chunk(*fourcc, payload);
    }

    let bytes = out.finish();
    debug!("artifact size: {} bytes", bytes.len());
    bytes
}

/// Compile and write the artifact, appending the `.abf` extension when the
/// target path has none. Returns the path actually written.
pub fn write_artifact(
    validated: &ValidatedProject<'_>,
    path: &Path,
    options: &CompileOptions,
) -> Result<PathBuf, ArtifactError> {
    let bytes = compile(validated, options);
    let path = match path.extension() {
        Some(ext) if ext == ARTIFACT_EXTENSION => path.to_path_buf(),
        // A dotted file stem is not an extension to preserve; always end
        // up with `.abf` without clobbering the rest of the name.
        _ => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".");
            with_ext.push(ARTIFACT_EXTENSION);
            PathBuf::from(with_ext)
        }
    };
    fs::write(&path, &bytes).map_err(|source| ArtifactError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn default_preset_index(index: &ProjectIndex<'_>) -> usize {
    index
        .mix_presets
        .iter()
        .position(|p| p.is_default)
        .expect("validated project has exactly one default mix preset")
}

fn name(w: &mut BinaryWriter, value: &str, options: &CompileOptions) {
    w.str(if options.strip_names { "" } else { value });
}

fn mix_bus_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for (i, bus) in index.mix_buses.iter().enumerate() {
        name(&mut w, &bus.id, options);
        let children = &index.bus_children[i];
        w.index(children.len());
        for &child in children {
            w.index(child);
        }
    }
    w
}

fn event_group_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for (i, group) in index.event_groups.iter().enumerate() {
        name(&mut w, &group.id, options);
        let children = &index.group_children[i];
        w.index(children.len());
        for &child in children {
            w.index(child);
        }
        let events = &index.group_events[i];
        w.index(events.len());
        for &event in events {
            w.index(event);
        }
    }
    w
}

fn event_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for event in &index.events {
        name(&mut w, &event.id, options);
        let bus = index
            .bus_index(&event.bus)
            .expect("validated event references an indexed mix bus");
        w.index(bus);
        w.f32(event.gain);
        w.f32(event.pitch);
        w.index(event.sources.len());
        for source in &event.sources {
            match source {
                AudioSource::Sound { id } => {
                    w.u32(SOURCE_SOUND);
                    let sound = index
                        .sound_index(id)
                        .expect("validated event references an indexed sound");
                    w.index(sound);
                }
                AudioSource::SoundGroup { id } => {
                    w.u32(SOURCE_SOUND_GROUP);
                    let group = index
                        .sound_group_index(id)
                        .expect("validated event references an indexed sound group");
                    w.index(group);
                }
            }
        }
    }
    w
}

fn sound_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for sound in &index.sounds {
        name(&mut w, &sound.id, options);
        w.f32(sound.gain);
        w.f32(sound.pitch);
        w.index(sound.waves.len());
        for wave in &sound.waves {
            let bank_idx = index
                .wave_bank_index(&wave.wave_bank)
                .expect("validated sound references an indexed wave bank");
            let entry_idx = index.wave_banks[bank_idx]
                .entries
                .iter()
                .position(|e| e.path == wave.path)
                .expect("validated sound references an entry present in its wave bank");
            w.index(bank_idx);
            w.index(entry_idx);
        }
    }
    w
}

fn sound_group_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for group in &index.sound_groups {
        name(&mut w, &group.id, options);
        w.index(group.sounds.len());
        for sound_id in &group.sounds {
            let sound = index
                .sound_index(sound_id)
                .expect("validated sound group references an indexed sound");
            w.index(sound);
        }
    }
    w
}

fn wave_bank_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for bank in &index.wave_banks {
        name(&mut w, &bank.id, options);
        w.index(bank.entries.len());
        for entry in &bank.entries {
            name(&mut w, &entry.path, options);
            w.flag(entry.stream);
        }
    }
    w
}

fn mix_preset_chunk(index: &ProjectIndex<'_>, options: &CompileOptions) -> BinaryWriter {
    let mut w = BinaryWriter::new();
    for preset in &index.mix_presets {
        name(&mut w, &preset.id, options);
        w.flag(preset.is_default);
        w.index(preset.parameters.len());
        for params in &preset.parameters {
            let bus = index
                .bus_index(&params.bus)
                .expect("validated preset references an indexed mix bus");
            w.index(bus);
            w.f32(params.left_gain);
            w.f32(params.right_gain);
            w.f32(params.pitch);
        }
    }
    w
}
