//! Serde model of the authored project document.
//!
//! These types mirror the document format edited by authors. Every entity
//! carries a free-text `comment` with no semantic effect, and all entities
//! except the project root carry an `id` that must be unique within its
//! category. The loader only constructs this graph; the validator and
//! compiler consume it read-only.

use serde::{Deserialize, Serialize};

fn default_unit() -> f32 {
    1.0
}

/// The project root: one mix-bus tree, one event-group tree, and the flat
/// wave bank / sound / sound group / mix preset collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    pub master_bus: MixBus,
    pub event_root: EventGroup,
    #[serde(default)]
    pub wave_banks: Vec<WaveBank>,
    #[serde(default)]
    pub sounds: Vec<Sound>,
    #[serde(default)]
    pub sound_groups: Vec<SoundGroup>,
    #[serde(default)]
    pub mix_presets: Vec<MixPreset>,
}

/// A node in the mix routing tree, rooted at the project's master bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixBus {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub children: Vec<MixBus>,
}

/// A node in the event tree. A group owns its events and its child groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub children: Vec<EventGroup>,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A triggerable event: routed to one mix bus, backed by sounds and/or
/// sound groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    pub bus: String,
    #[serde(default = "default_unit")]
    pub gain: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
    #[serde(default)]
    pub sources: Vec<AudioSource>,
}

/// An event's audio-data source, referencing a sound or a sound group by ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioSource {
    #[serde(rename = "sound")]
    Sound { id: String },
    #[serde(rename = "soundGroup")]
    SoundGroup { id: String },
}

impl AudioSource {
    pub fn id(&self) -> &str {
        match self {
            AudioSource::Sound { id } => id,
            AudioSource::SoundGroup { id } => id,
        }
    }
}

/// A sound definition referencing the wave data that backs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sound {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default = "default_unit")]
    pub gain: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
    #[serde(default)]
    pub waves: Vec<WaveReference>,
}

/// A reference to one audio entry inside a wave bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveReference {
    pub wave_bank: String,
    pub path: String,
}

/// A named container of raw audio data references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveBank {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub entries: Vec<AudioEntry>,
}

/// One piece of audio data inside a wave bank, addressed by relative path.
/// Entries with the `stream` flag are streamed from disk at runtime and
/// may not back a sound definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioEntry {
    pub path: String,
    #[serde(default)]
    pub stream: bool,
}

/// A named set of sounds, referenced by ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundGroup {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub sounds: Vec<String>,
}

/// A named snapshot of per-bus mix parameters. Exactly one preset per
/// project carries the default flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixPreset {
    pub id: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, rename = "default")]
    pub is_default: bool,
    #[serde(default)]
    pub parameters: Vec<BusParameters>,
}

/// One preset's parameter set for a single mix bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusParameters {
    pub bus: String,
    #[serde(default = "default_unit")]
    pub left_gain: f32,
    #[serde(default = "default_unit")]
    pub right_gain: f32,
    #[serde(default = "default_unit")]
    pub pitch: f32,
}
