// Copyright © 2018 Mozilla Foundation
//
// This program is made available under an ISC-style license.  See the
// accompanying file LICENSE for details.

use std::mem;

/// A fixed-width value that can be moved across the property API as raw
/// bytes in native byte order.
pub trait PropertyData: Sized {
    const SIZE: usize;

    /// `bytes` is exactly `SIZE` long.
    fn decode(bytes: &[u8]) -> Self;

    fn encode(&self, out: &mut Vec<u8>);
}

macro_rules! impl_scalar_property_data {
    ($($t:ty),*) => {
        $(
            impl PropertyData for $t {
                const SIZE: usize = mem::size_of::<$t>();

                fn decode(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; mem::size_of::<$t>()];
                    raw.copy_from_slice(bytes);
                    <$t>::from_ne_bytes(raw)
                }

                fn encode(&self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_ne_bytes());
                }
            }
        )*
    };
}

impl_scalar_property_data!(u32, f32, f64);

/// AudioValueRange.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl PropertyData for ValueRange {
    const SIZE: usize = 2 * mem::size_of::<f64>();

    fn decode(bytes: &[u8]) -> Self {
        let (min, max) = bytes.split_at(f64::SIZE);
        Self {
            minimum: f64::decode(min),
            maximum: f64::decode(max),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.minimum.encode(out);
        self.maximum.encode(out);
    }
}

/// The pair of 1-based channel numbers a device prefers for stereo output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StereoChannels {
    pub left: u32,
    pub right: u32,
}

impl PropertyData for StereoChannels {
    const SIZE: usize = 2 * mem::size_of::<u32>();

    fn decode(bytes: &[u8]) -> Self {
        let (left, right) = bytes.split_at(u32::SIZE);
        Self {
            left: u32::decode(left),
            right: u32::decode(right),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        self.left.encode(out);
        self.right.encode(out);
    }
}

pub fn encode_value<T: PropertyData>(value: &T) -> Vec<u8> {
    let mut out = Vec::with_capacity(T::SIZE);
    value.encode(&mut out);
    out
}

pub fn encode_values<T: PropertyData>(values: &[T]) -> Vec<u8> {
    let mut out = Vec::with_capacity(T::SIZE * values.len());
    for value in values {
        value.encode(&mut out);
    }
    out
}

// Trailing bytes that do not fill a whole element are ignored.
pub fn decode_values<T: PropertyData>(bytes: &[u8]) -> Vec<T> {
    bytes.chunks_exact(T::SIZE).map(T::decode).collect()
}

// AudioBufferList is a variable-size struct: a UInt32 buffer count followed,
// at pointer alignment, by that many AudioBuffer { UInt32 mNumberChannels,
// UInt32 mDataByteSize, void* mData } entries.
fn buffer_list_header_size() -> usize {
    mem::align_of::<usize>().max(mem::size_of::<u32>())
}

fn audio_buffer_stride() -> usize {
    let unpadded = 2 * mem::size_of::<u32>() + mem::size_of::<usize>();
    let align = mem::align_of::<usize>();
    (unpadded + align - 1) / align * align
}

/// Channel count of every buffer in a raw AudioBufferList.
pub fn buffer_list_channels(bytes: &[u8]) -> Vec<u32> {
    if bytes.len() < u32::SIZE {
        return Vec::new();
    }
    let count = u32::decode(&bytes[..u32::SIZE]) as usize;
    let header = buffer_list_header_size();
    let stride = audio_buffer_stride();

    // The header's count is untrusted; never walk past the payload.
    let count = count.min(bytes.len().saturating_sub(header) / stride);
    let mut channels = Vec::with_capacity(count);
    for i in 0..count {
        let offset = header + i * stride;
        match bytes.get(offset..offset + u32::SIZE) {
            Some(field) => channels.push(u32::decode(field)),
            None => break,
        }
    }
    channels
}

/// Builds a raw AudioBufferList with one buffer per entry of `channels`.
pub fn encode_buffer_list(channels: &[u32]) -> Vec<u8> {
    let header = buffer_list_header_size();
    let stride = audio_buffer_stride();
    let mut out = vec![0u8; header + channels.len() * stride];
    out[..u32::SIZE].copy_from_slice(&(channels.len() as u32).to_ne_bytes());
    for (i, count) in channels.iter().enumerate() {
        let offset = header + i * stride;
        out[offset..offset + u32::SIZE].copy_from_slice(&count.to_ne_bytes());
    }
    out
}

#[test]
fn test_value_range_layout() {
    let range = ValueRange {
        minimum: 44_100.0,
        maximum: 96_000.0,
    };
    let bytes = encode_value(&range);
    assert_eq!(bytes.len(), 16);
    assert_eq!(ValueRange::decode(&bytes), range);
}

#[test]
fn test_decode_values_drops_partial_element() {
    let mut bytes = encode_values(&[1u32, 2, 3]);
    bytes.push(0xff);
    assert_eq!(decode_values::<u32>(&bytes), vec![1, 2, 3]);
}

#[test]
fn test_buffer_list_channels() {
    let bytes = encode_buffer_list(&[2, 0, 6]);
    assert_eq!(buffer_list_channels(&bytes), vec![2, 0, 6]);
    assert!(buffer_list_channels(&[]).is_empty());
    assert!(buffer_list_channels(&encode_buffer_list(&[])).is_empty());
}

#[test]
fn test_truncated_buffer_list() {
    let mut bytes = encode_buffer_list(&[2, 2]);
    bytes.truncate(buffer_list_header_size() + 4);
    assert_eq!(buffer_list_channels(&bytes), vec![2]);
}

#[test]
fn test_buffer_list_count_exceeding_payload() {
    assert!(buffer_list_channels(&[0xff; 8]).is_empty());

    let mut bytes = encode_buffer_list(&[2, 4]);
    bytes[..u32::SIZE].copy_from_slice(&u32::max_value().to_ne_bytes());
    assert_eq!(buffer_list_channels(&bytes), vec![2, 4]);
}
