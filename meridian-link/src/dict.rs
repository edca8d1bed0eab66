//! Key-value dictionary payloads
//!
//! `Data` frames carry a flat dictionary of u32 keys mapped to typed
//! values. The watch treats received dictionaries as opaque: what the keys
//! mean is agreed between the watch and phone applications, not here.
//!
//! Wire format (inside a frame payload):
//! ```text
//! ┌───────┬──────────────────────────────────────┐
//! │ COUNT │ COUNT x ( KEY │ TAG │ LEN │ VALUE )  │
//! │ 1B    │         4B LE │ 1B  │ 1B  │ LEN B    │
//! └───────┴──────────────────────────────────────┘
//! ```

use heapless::{String, Vec};

/// Maximum number of entries in a dictionary
pub const MAX_DICT_ENTRIES: usize = 8;

/// Maximum byte/text value length
pub const MAX_VALUE_LEN: usize = 32;

// Value type tags
const TAG_UINT: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_BYTES: u8 = 0x03;
const TAG_TEXT: u8 = 0x04;

/// Errors that can occur while building or decoding a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DictError {
    /// Dictionary already holds the maximum number of entries
    TooManyEntries,
    /// Byte/text value exceeds the maximum length
    ValueTooLong,
    /// Input ended in the middle of an entry
    Truncated,
    /// Unrecognized value type tag
    UnknownTag,
    /// Declared value length does not match its tag
    BadLength,
    /// Text value is not valid UTF-8
    BadUtf8,
    /// Encoded form does not fit the output buffer
    Overflow,
}

/// A typed dictionary value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    Uint(u32),
    Int(i32),
    Bytes(Vec<u8, MAX_VALUE_LEN>),
    Text(String<MAX_VALUE_LEN>),
}

impl Value {
    /// Build a byte value, rejecting oversized input
    pub fn bytes(data: &[u8]) -> Result<Self, DictError> {
        let mut v = Vec::new();
        v.extend_from_slice(data).map_err(|_| DictError::ValueTooLong)?;
        Ok(Value::Bytes(v))
    }

    /// Build a text value, rejecting oversized input
    pub fn text(text: &str) -> Result<Self, DictError> {
        let s = String::try_from(text).map_err(|_| DictError::ValueTooLong)?;
        Ok(Value::Text(s))
    }

    fn tag(&self) -> u8 {
        match self {
            Value::Uint(_) => TAG_UINT,
            Value::Int(_) => TAG_INT,
            Value::Bytes(_) => TAG_BYTES,
            Value::Text(_) => TAG_TEXT,
        }
    }

    fn value_len(&self) -> usize {
        match self {
            Value::Uint(_) | Value::Int(_) => 4,
            Value::Bytes(b) => b.len(),
            Value::Text(s) => s.len(),
        }
    }
}

/// A single key-value entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Entry {
    pub key: u32,
    pub value: Value,
}

/// An ordered key-value dictionary with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dictionary {
    entries: Vec<Entry, MAX_DICT_ENTRIES>,
}

impl Dictionary {
    /// Create an empty dictionary
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Insert a value, replacing any existing entry with the same key
    pub fn insert(&mut self, key: u32, value: Value) -> Result<(), DictError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return Ok(());
        }
        self.entries
            .push(Entry { key, value })
            .map_err(|_| DictError::TooManyEntries)
    }

    /// Look up a value by key
    pub fn get(&self, key: u32) -> Option<&Value> {
        self.entries.iter().find(|e| e.key == key).map(|e| &e.value)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the dictionary holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Size of the encoded form in bytes
    pub fn encoded_len(&self) -> usize {
        1 + self
            .entries
            .iter()
            .map(|e| 4 + 1 + 1 + e.value.value_len())
            .sum::<usize>()
    }

    /// Encode into the given buffer
    pub fn encode<const N: usize>(&self, out: &mut Vec<u8, N>) -> Result<(), DictError> {
        let mut push = |bytes: &[u8]| -> Result<(), DictError> {
            out.extend_from_slice(bytes).map_err(|_| DictError::Overflow)
        };

        push(&[self.entries.len() as u8])?;
        for entry in &self.entries {
            push(&entry.key.to_le_bytes())?;
            push(&[entry.value.tag(), entry.value.value_len() as u8])?;
            match &entry.value {
                Value::Uint(v) => push(&v.to_le_bytes())?,
                Value::Int(v) => push(&v.to_le_bytes())?,
                Value::Bytes(b) => push(b)?,
                Value::Text(s) => push(s.as_bytes())?,
            }
        }
        Ok(())
    }

    /// Decode a dictionary from its wire form
    ///
    /// The input must contain exactly one encoded dictionary; trailing
    /// bytes are an error.
    pub fn decode(bytes: &[u8]) -> Result<Self, DictError> {
        let (&count, mut rest) = bytes.split_first().ok_or(DictError::Truncated)?;
        if count as usize > MAX_DICT_ENTRIES {
            return Err(DictError::TooManyEntries);
        }

        let mut dict = Dictionary::new();
        for _ in 0..count {
            if rest.len() < 6 {
                return Err(DictError::Truncated);
            }
            let key = u32::from_le_bytes([rest[0], rest[1], rest[2], rest[3]]);
            let tag = rest[4];
            let len = rest[5] as usize;
            rest = &rest[6..];

            if rest.len() < len {
                return Err(DictError::Truncated);
            }
            let (data, remaining) = rest.split_at(len);
            rest = remaining;

            let value = match tag {
                TAG_UINT => {
                    if len != 4 {
                        return Err(DictError::BadLength);
                    }
                    Value::Uint(u32::from_le_bytes([data[0], data[1], data[2], data[3]]))
                }
                TAG_INT => {
                    if len != 4 {
                        return Err(DictError::BadLength);
                    }
                    Value::Int(i32::from_le_bytes([data[0], data[1], data[2], data[3]]))
                }
                TAG_BYTES => Value::bytes(data)?,
                TAG_TEXT => {
                    let text = core::str::from_utf8(data).map_err(|_| DictError::BadUtf8)?;
                    Value::text(text)?
                }
                _ => return Err(DictError::UnknownTag),
            };

            dict.insert(key, value)?;
        }

        if !rest.is_empty() {
            return Err(DictError::BadLength);
        }
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert(0, Value::Uint(1)).unwrap();
        dict.insert(1, Value::Int(-7)).unwrap();
        dict.insert(2, Value::text("overcast").unwrap()).unwrap();
        dict.insert(3, Value::bytes(&[0xDE, 0xAD]).unwrap()).unwrap();
        dict
    }

    #[test]
    fn test_roundtrip() {
        let dict = sample();
        let mut buf = Vec::<u8, 128>::new();
        dict.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), dict.encoded_len());

        let decoded = Dictionary::decode(&buf).unwrap();
        assert_eq!(decoded, dict);
    }

    #[test]
    fn test_empty_dictionary() {
        let dict = Dictionary::new();
        let mut buf = Vec::<u8, 8>::new();
        dict.encode(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), &[0]);

        let decoded = Dictionary::decode(&buf).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut dict = Dictionary::new();
        dict.insert(5, Value::Uint(1)).unwrap();
        dict.insert(5, Value::Uint(2)).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(5), Some(&Value::Uint(2)));
    }

    #[test]
    fn test_capacity_limit() {
        let mut dict = Dictionary::new();
        for key in 0..MAX_DICT_ENTRIES as u32 {
            dict.insert(key, Value::Uint(key)).unwrap();
        }
        assert_eq!(
            dict.insert(99, Value::Uint(0)),
            Err(DictError::TooManyEntries)
        );
    }

    #[test]
    fn test_decode_truncated() {
        let dict = sample();
        let mut buf = Vec::<u8, 128>::new();
        dict.encode(&mut buf).unwrap();

        for cut in 1..buf.len() {
            assert!(
                Dictionary::decode(&buf[..cut]).is_err(),
                "cut at {} should fail",
                cut
            );
        }
    }

    #[test]
    fn test_decode_empty_input() {
        assert_eq!(Dictionary::decode(&[]), Err(DictError::Truncated));
    }

    #[test]
    fn test_decode_unknown_tag() {
        // count=1, key=0, tag=0x7F, len=0
        let bytes = [1, 0, 0, 0, 0, 0x7F, 0];
        assert_eq!(Dictionary::decode(&bytes), Err(DictError::UnknownTag));
    }

    #[test]
    fn test_decode_bad_uint_length() {
        // count=1, key=0, tag=UINT, len=2, two bytes
        let bytes = [1, 0, 0, 0, 0, TAG_UINT, 2, 0xAA, 0xBB];
        assert_eq!(Dictionary::decode(&bytes), Err(DictError::BadLength));
    }

    #[test]
    fn test_decode_trailing_bytes() {
        let mut buf = Vec::<u8, 16>::new();
        Dictionary::new().encode(&mut buf).unwrap();
        buf.push(0xFF).unwrap();
        assert_eq!(Dictionary::decode(&buf), Err(DictError::BadLength));
    }

    #[test]
    fn test_decode_bad_utf8() {
        // count=1, key=0, tag=TEXT, len=1, invalid UTF-8 byte
        let bytes = [1, 0, 0, 0, 0, TAG_TEXT, 1, 0xFF];
        assert_eq!(Dictionary::decode(&bytes), Err(DictError::BadUtf8));
    }

    #[test]
    fn test_value_too_long() {
        let data = [0u8; MAX_VALUE_LEN + 1];
        assert_eq!(Value::bytes(&data), Err(DictError::ValueTooLong));
    }
}
