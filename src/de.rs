//! XDR Deserializer (RFC 4506)
//!
//! Every read is bounds-checked against the borrowed input. Running out of
//! bytes is [`Error::UnexpectedEof`]; a length prefix that promises more data
//! than remains is [`Error::MalformedLength`], detected before any payload is
//! consumed.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::de::{
    self, Deserialize, DeserializeOwned, EnumAccess, MapAccess, SeqAccess, VariantAccess, Visitor,
};

/// Deserialize a value from XDR bytes. Trailing bytes are ignored.
pub fn from_bytes<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_bytes_with_config(input, Config::default())
}

/// Deserialize a value from XDR bytes, applying the limits in `config`.
pub fn from_bytes_with_config<T: DeserializeOwned>(input: &[u8], config: Config) -> Result<T> {
    let mut de = Deserializer::with_config(input, config);
    T::deserialize(&mut de)
}

/// Deserialize a value from XDR bytes, also returning remaining unconsumed bytes.
pub fn from_bytes_partial<'de, T: Deserialize<'de>>(input: &'de [u8]) -> Result<(T, &'de [u8])> {
    let mut de = Deserializer::new(input);
    let value = T::deserialize(&mut de)?;
    Ok((value, de.remaining()))
}

/// The XDR deserializer. Reads from a byte slice, maintaining a cursor position.
pub struct Deserializer<'de> {
    input: &'de [u8],
    pos: usize,
    config: Config,
}

impl<'de> Deserializer<'de> {
    pub fn new(input: &'de [u8]) -> Self {
        Self::with_config(input, Config::default())
    }

    pub fn with_config(input: &'de [u8], config: Config) -> Self {
        Deserializer {
            input,
            pos: 0,
            config,
        }
    }

    /// Returns the unconsumed portion of the input buffer.
    pub fn remaining(&self) -> &'de [u8] {
        &self.input[self.pos..]
    }

    fn remaining_len(&self) -> usize {
        self.input.len() - self.pos
    }

    /// Consume exactly `n` bytes, returning a slice. Fails with UnexpectedEof.
    fn take(&mut self, n: usize) -> Result<&'de [u8]> {
        if n > self.remaining_len() {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read a big-endian u32 (XDR basic block)
    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    /// Read a length or count prefix and check it against the configured
    /// maximum and against the bytes that are left. `min_item` is the least
    /// number of wire bytes each counted item occupies.
    fn read_length(&mut self, min_item: usize) -> Result<usize> {
        let len = self.read_u32()?;
        if len > self.config.max_length {
            return Err(Error::LengthOverflow {
                max: self.config.max_length as usize,
                got: len as usize,
            });
        }
        let remaining = self.remaining_len();
        if (len as usize).saturating_mul(min_item) > remaining {
            return Err(Error::MalformedLength { len, remaining });
        }
        Ok(len as usize)
    }

    /// Read `n` bytes of data plus their 0–3 padding bytes.
    /// Returns a slice into the original input (zero-copy).
    fn read_padded_bytes(&mut self, n: usize) -> Result<&'de [u8]> {
        let data = self.take(n)?;
        let remainder = n % 4;
        if remainder != 0 {
            let padding = self.take(4 - remainder)?;
            if self.config.strict_padding && padding.iter().any(|&b| b != 0) {
                return Err(Error::InvalidPadding);
            }
        }
        Ok(data)
    }

    /// Read a variable-length opaque or string:
    /// 4-byte length n, then n bytes + padding.
    fn read_variable_opaque(&mut self) -> Result<&'de [u8]> {
        let n = self.read_length(1)?;
        self.read_padded_bytes(n)
    }
}

/// Narrow a 4-byte XDR integer into an 8- or 16-bit Rust integer.
fn narrow<W, N>(wide: W) -> Result<N>
where
    W: Copy + Into<i64>,
    N: TryFrom<W>,
{
    N::try_from(wide).map_err(|_| Error::IntegerOutOfRange {
        value: wide.into(),
        ty: std::any::type_name::<N>(),
    })
}

// ── Main Deserializer impl ─────────────────────────────────────────────────

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::Unsupported(
            "deserialize_any (XDR is not self-describing)",
        ))
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.read_u32()? {
            0 => visitor.visit_bool(false),
            1 => visitor.visit_bool(true),
            v => Err(Error::InvalidBool(v)),
        }
    }

    fn deserialize_i8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i8(narrow(self.read_i32()?)?)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i16(narrow(self.read_i32()?)?)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i32(self.read_i32()?)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_i64(self.read_i64()?)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u8(narrow(self.read_u32()?)?)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u16(narrow(self.read_u32()?)?)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u32(self.read_u32()?)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_u64(self.read_u64()?)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f32(f32::from_be_bytes(self.take_array()?))
    }

    fn deserialize_f64<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_f64(f64::from_be_bytes(self.take_array()?))
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let c = char::from_u32(self.read_u32()?).ok_or(Error::InvalidString)?;
        visitor.visit_char(c)
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let bytes = self.read_variable_opaque()?;
        let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidString)?;
        visitor.visit_borrowed_str(s)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_str(self, visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_borrowed_bytes(self.read_variable_opaque()?)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_byte_buf(self.read_variable_opaque()?.to_vec())
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.read_u32()? {
            0 => visitor.visit_none(),
            1 => visitor.visit_some(self),
            v => Err(Error::InvalidOption(v)),
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    /// Variable-length array. The serializer refuses zero-width elements, so
    /// every counted element needs at least one 4-byte unit.
    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let count = self.read_length(4)?;
        visitor.visit_seq(SeqDeserializer::new(self, count))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        // Fixed-length: no count prefix
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self, len))
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let count = self.read_length(8)?;
        visitor.visit_map(MapDeserializer::new(self, count))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        // XDR structure: fields in declaration order, no count prefix
        visitor.visit_seq(SeqDeserializer::new(self, fields.len()))
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let index = self.read_u32()?;
        if index as usize >= variants.len() {
            return Err(Error::unmapped(
                index,
                format_args!("{} variant index below {}", name, variants.len()),
            ));
        }
        visitor.visit_enum(EnumDeserializer::new(self, index))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        // Identifiers are discriminants in XDR context — read as u32
        visitor.visit_u32(self.read_u32()?)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        Err(Error::Unsupported(
            "deserialize_ignored_any (XDR is not self-describing)",
        ))
    }
}

// ── SeqDeserializer: fixed count ───────────────────────────────────────────

struct SeqDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'a, 'de> SeqDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        SeqDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T: de::DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── MapDeserializer ────────────────────────────────────────────────────────

struct MapDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    remaining: usize,
}

impl<'a, 'de> MapDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, count: usize) -> Self {
        MapDeserializer {
            de,
            remaining: count,
        }
    }
}

impl<'de> MapAccess<'de> for MapDeserializer<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K: de::DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(&mut *self.de).map(Some)
    }

    fn next_value_seed<V: de::DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        seed.deserialize(&mut *self.de)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

// ── EnumDeserializer ───────────────────────────────────────────────────────

/// Variant access for a derived enum whose discriminant has already been
/// read and range-checked by `deserialize_enum`.
struct EnumDeserializer<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    index: u32,
}

impl<'a, 'de> EnumDeserializer<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>, index: u32) -> Self {
        EnumDeserializer { de, index }
    }
}

impl<'de, 'a> EnumAccess<'de> for EnumDeserializer<'a, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: de::DeserializeSeed<'de>>(
        self,
        seed: V,
    ) -> Result<(V::Value, Self::Variant)> {
        let val = seed.deserialize(de::value::U32Deserializer::<Error>::new(self.index))?;
        Ok((val, self))
    }
}

impl<'de> VariantAccess<'de> for EnumDeserializer<'_, 'de> {
    type Error = Error;

    /// Void arm: no data follows the discriminant
    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T: de::DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, len))
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_seq(SeqDeserializer::new(self.de, fields.len()))
    }
}
