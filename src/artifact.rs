//! The engine artifact format: layout constants and the read-side contract.
//!
//! Version 1 layout, in file order:
//!
//! 1. 8-byte magic, u32 format version.
//! 2. Header: u32 flags, seven u32 table counts (mix buses, event groups,
//!    events, sounds, sound groups, wave banks, mix presets), u32 default
//!    mix preset index.
//! 3. Seven chunks in fixed order, each framed as u32 fourcc + u32 payload
//!    byte length + payload: `mxbs`, `evtg`, `evts`, `snds`, `sgrp`,
//!    `wbks`, `mxpr`.
//!
//! All multi-byte values are big-endian; strings are u32 length + UTF-8
//! bytes. Any downstream inspector must agree on this layout field for
//! field — [`Artifact::parse`] is that contract, exercised by the
//! round-trip tests against the compiler.

use crate::error::FormatError;

pub const MAGIC: [u8; 8] = *b"\x89ABF\r\n\x1a\n";
pub const FORMAT_VERSION: u32 = 1;

/// Header flag: every name/path string was written as zero-length.
pub const FLAG_NAMES_STRIPPED: u32 = 1 << 0;

pub const MIX_BUS_CHUNK: [u8; 4] = *b"mxbs";
pub const EVENT_GROUP_CHUNK: [u8; 4] = *b"evtg";
pub const EVENT_CHUNK: [u8; 4] = *b"evts";
pub const SOUND_CHUNK: [u8; 4] = *b"snds";
pub const SOUND_GROUP_CHUNK: [u8; 4] = *b"sgrp";
pub const WAVE_BANK_CHUNK: [u8; 4] = *b"wbks";
pub const MIX_PRESET_CHUNK: [u8; 4] = *b"mxpr";

/// Audio source kind tags in the event table.
pub const SOURCE_SOUND: u32 = 0;
pub const SOURCE_SOUND_GROUP: u32 = 1;

/// A parsed artifact: the index-based tables the runtime consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub version: u32,
    pub flags: u32,
    pub default_preset: u32,
    pub mix_buses: Vec<MixBusEntry>,
    pub event_groups: Vec<EventGroupEntry>,
    pub events: Vec<EventEntry>,
    pub sounds: Vec<SoundEntry>,
    pub sound_groups: Vec<SoundGroupEntry>,
    pub wave_banks: Vec<WaveBankEntry>,
    pub mix_presets: Vec<MixPresetEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixBusEntry {
    pub name: String,
    pub children: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventGroupEntry {
    pub name: String,
    pub children: Vec<u32>,
    pub events: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    pub name: String,
    pub bus: u32,
    pub gain: f32,
    pub pitch: f32,
    /// (kind, index) pairs; kind is [`SOURCE_SOUND`] or [`SOURCE_SOUND_GROUP`].
    pub sources: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundEntry {
    pub name: String,
    pub gain: f32,
    pub pitch: f32,
    /// (wave bank index, entry index) pairs.
    pub waves: Vec<(u32, u32)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundGroupEntry {
    pub name: String,
    pub sounds: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveBankEntry {
    pub name: String,
    pub entries: Vec<WaveEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveEntry {
    pub path: String,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MixPresetEntry {
    pub name: String,
    pub is_default: bool,
    pub parameters: Vec<PresetParamEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetParamEntry {
    pub bus: u32,
    pub left_gain: f32,
    pub right_gain: f32,
    pub pitch: f32,
}

impl Artifact {
    /// Decode artifact bytes back into tables, verifying magic, version,
    /// chunk order, and chunk framing.
    pub fn parse(data: &[u8]) -> Result<Artifact, FormatError> {
        let mut r = Reader::new(data);

        if r.take(MAGIC.len())? != MAGIC {
            return Err(FormatError::BadMagic);
        }
        let version = r.u32()?;
        if version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(version));
        }

        let flags = r.u32()?;
        let bus_count = r.u32()?;
        let group_count = r.u32()?;
        let event_count = r.u32()?;
        let sound_count = r.u32()?;
        let sound_group_count = r.u32()?;
        let wave_bank_count = r.u32()?;
        let preset_count = r.u32()?;
        let default_preset = r.u32()?;

        let mix_buses = parse_chunk(&mut r, MIX_BUS_CHUNK, bus_count, parse_bus)?;
        let event_groups = parse_chunk(&mut r, EVENT_GROUP_CHUNK, group_count, parse_group)?;
        let events = parse_chunk(&mut r, EVENT_CHUNK, event_count, parse_event)?;
        let sounds = parse_chunk(&mut r, SOUND_CHUNK, sound_count, parse_sound)?;
        let sound_groups = parse_chunk(&mut r, SOUND_GROUP_CHUNK, sound_group_count, parse_sound_group)?;
        let wave_banks = parse_chunk(&mut r, WAVE_BANK_CHUNK, wave_bank_count, parse_wave_bank)?;
        let mix_presets = parse_chunk(&mut r, MIX_PRESET_CHUNK, preset_count, parse_preset)?;

        if !r.at_end() {
            return Err(FormatError::TrailingBytes);
        }

        Ok(Artifact {
            version,
            flags,
            default_preset,
            mix_buses,
            event_groups,
            events,
            sounds,
            sound_groups,
            wave_banks,
            mix_presets,
        })
    }
}

fn fourcc_str(bytes: [u8; 4]) -> String {
    bytes
        .iter()
        .map(|&b| {
            if b.is_ascii_graphic() {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

fn parse_chunk<T>(
    r: &mut Reader<'_>,
    fourcc: [u8; 4],
    count: u32,
    entry: fn(&mut Reader<'_>) -> Result<T, FormatError>,
) -> Result<Vec<T>, FormatError> {
    let found = r.take(4)?;
    if found != fourcc {
        let mut found_cc = [0u8; 4];
        found_cc.copy_from_slice(found);
        return Err(FormatError::ChunkMismatch {
            expected: fourcc_str(fourcc),
            found: fourcc_str(found_cc),
        });
    }
    let payload_len = r.u32()? as usize;
    let start = r.pos();

    let count = r.entries(count, 4)?;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        entries.push(entry(r)?);
    }

    if r.pos() - start != payload_len {
        return Err(FormatError::ChunkLength(fourcc_str(fourcc)));
    }
    Ok(entries)
}

fn parse_bus(r: &mut Reader<'_>) -> Result<MixBusEntry, FormatError> {
    Ok(MixBusEntry {
        name: r.string()?,
        children: r.u32_list()?,
    })
}

fn parse_group(r: &mut Reader<'_>) -> Result<EventGroupEntry, FormatError> {
    Ok(EventGroupEntry {
        name: r.string()?,
        children: r.u32_list()?,
        events: r.u32_list()?,
    })
}

fn parse_event(r: &mut Reader<'_>) -> Result<EventEntry, FormatError> {
    let name = r.string()?;
    let bus = r.u32()?;
    let gain = r.f32()?;
    let pitch = r.f32()?;
    let source_count = r.u32()?;
    let source_count = r.entries(source_count, 8)?;
    let mut sources = Vec::with_capacity(source_count);
    for _ in 0..source_count {
        sources.push((r.u32()?, r.u32()?));
    }
    Ok(EventEntry {
        name,
        bus,
        gain,
        pitch,
        sources,
    })
}

fn parse_sound(r: &mut Reader<'_>) -> Result<SoundEntry, FormatError> {
    let name = r.string()?;
    let gain = r.f32()?;
    let pitch = r.f32()?;
    let wave_count = r.u32()?;
    let wave_count = r.entries(wave_count, 8)?;
    let mut waves = Vec::with_capacity(wave_count);
    for _ in 0..wave_count {
        waves.push((r.u32()?, r.u32()?));
    }
    Ok(SoundEntry {
        name,
        gain,
        pitch,
        waves,
    })
}

fn parse_sound_group(r: &mut Reader<'_>) -> Result<SoundGroupEntry, FormatError> {
    Ok(SoundGroupEntry {
        name: r.string()?,
        sounds: r.u32_list()?,
    })
}

fn parse_wave_bank(r: &mut Reader<'_>) -> Result<WaveBankEntry, FormatError> {
    let name = r.string()?;
    let entry_count = r.u32()?;
    let entry_count = r.entries(entry_count, 8)?;
    let mut entries = Vec::with_capacity(entry_count);
    for _ in 0..entry_count {
        entries.push(WaveEntry {
            path: r.string()?,
            stream: r.u32()? != 0,
        });
    }
    Ok(WaveBankEntry { name, entries })
}

fn parse_preset(r: &mut Reader<'_>) -> Result<MixPresetEntry, FormatError> {
    let name = r.string()?;
    let is_default = r.u32()? != 0;
    let param_count = r.u32()?;
    let param_count = r.entries(param_count, 16)?;
    let mut parameters = Vec::with_capacity(param_count);
    for _ in 0..param_count {
        parameters.push(PresetParamEntry {
            bus: r.u32()?,
            left_gain: r.f32()?,
            right_gain: r.f32()?,
            pitch: r.f32()?,
        });
    }
    Ok(MixPresetEntry {
        name,
        is_default,
        parameters,
    })
}

/// Bounds-checked cursor over artifact bytes.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check an entry count against the bytes actually left before
    /// reserving capacity for it. `min_size` is the smallest possible
    /// encoding of one entry; a count that cannot fit is truncation.
    fn entries(&self, count: u32, min_size: usize) -> Result<usize, FormatError> {
        let count = count as usize;
        if count > self.remaining() / min_size {
            return Err(FormatError::Truncated);
        }
        Ok(count)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        let end = self.pos.checked_add(len).ok_or(FormatError::Truncated)?;
        if end > self.data.len() {
            return Err(FormatError::Truncated);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn f32(&mut self) -> Result<f32, FormatError> {
        let bytes = self.take(4)?;
        Ok(f32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn string(&mut self) -> Result<String, FormatError> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::BadString)
    }

    fn u32_list(&mut self) -> Result<Vec<u32>, FormatError> {
        let count = self.u32()?;
        let count = self.entries(count, 4)?;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.u32()?);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_past_end_is_truncated() {
        let mut r = Reader::new(&[1, 2, 3]);
        assert_eq!(r.take(2).unwrap(), &[1, 2]);
        assert_eq!(r.take(2), Err(FormatError::Truncated));
    }

    #[test]
    fn string_round_trips_utf8() {
        let mut data = vec![0, 0, 0, 5];
        data.extend_from_slice("hello".as_bytes());
        let mut r = Reader::new(&data);
        assert_eq!(r.string().unwrap(), "hello");
        assert!(r.at_end());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let data = vec![0, 0, 0, 2, 0xFF, 0xFE];
        let mut r = Reader::new(&data);
        assert_eq!(r.string(), Err(FormatError::BadString));
    }

    #[test]
    fn entry_count_is_bounded_by_remaining_input() {
        let r = Reader::new(&[0; 16]);
        assert_eq!(r.entries(4, 4), Ok(4));
        assert_eq!(r.entries(5, 4), Err(FormatError::Truncated));
        assert_eq!(r.entries(u32::MAX, 8), Err(FormatError::Truncated));
    }

    #[test]
    fn fourcc_display_escapes_non_graphic() {
        assert_eq!(fourcc_str(*b"mxbs"), "mxbs");
        assert_eq!(fourcc_str([0x00, b'a', 0xFF, b'b']), "?a?b");
    }
}
