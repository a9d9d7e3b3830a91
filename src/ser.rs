//! XDR Serializer (RFC 4506)
//!
//! The [`Serializer`] is generic over any `W: std::io::Write`, enabling both
//! in-memory serialization (`to_bytes`) and streaming serialization (`to_writer`).
//!
//! ## Wire format summary
//! - All values are big-endian (network byte order)
//! - All items are padded to a multiple of 4 bytes
//! - Integers: 4 bytes (signed or unsigned), Hyper: 8 bytes
//! - Strings/Bytes: 4-byte length prefix + data + 0–3 zero-padding bytes
//! - Sequences: 4-byte count prefix + elements
//! - Structs/Tuples: fields encoded consecutively, no length prefix
//! - Options: 4-byte bool discriminant (0=None, 1=Some) + optional value
//! - Enums: 4-byte discriminant (variant index as u32) + encoded arm

use crate::error::{Error, Result};
use serde::ser::{self, Serialize};
use std::io::Write;

/// Serialize `value` into a freshly allocated `Vec<u8>` of XDR bytes.
pub fn to_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut ser = Serializer::new(Vec::new());
    value.serialize(&mut ser)?;
    Ok(ser.into_writer())
}

/// Serialize `value` as XDR bytes, writing directly into `writer`.
///
/// Useful for appending a procedure's results after a reply header that was
/// already written into the same buffer.
pub fn to_writer<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> Result<()> {
    let mut ser = Serializer::new(&mut writer);
    value.serialize(&mut ser)
}

/// The XDR serializer. Generic over any `W: Write`.
///
/// ```rust
/// use xdr_rpc::ser::Serializer;
/// use serde::Serialize;
///
/// let mut buf = Vec::new();
/// let mut ser = Serializer::new(&mut buf);
/// 42u32.serialize(&mut ser).unwrap();
/// assert_eq!(buf, [0, 0, 0, 42]);
/// ```
pub struct Serializer<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> Serializer<W> {
    pub fn new(writer: W) -> Self {
        Serializer { writer, written: 0 }
    }

    /// Consume the serializer and return the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer
            .write_all(bytes)
            .map_err(|e| Error::Io(e.to_string()))?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    fn write_u32(&mut self, v: u32) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    /// Length and count prefixes must fit the 4-byte XDR unsigned int.
    fn write_length(&mut self, len: usize) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| Error::LengthOverflow {
            max: u32::MAX as usize,
            got: len,
        })?;
        self.write_u32(len)
    }

    /// XDR variable-length opaque: 4-byte length, data, zero padding to a
    /// 4-byte boundary.
    fn write_opaque_variable(&mut self, bytes: &[u8]) -> Result<()> {
        const PAD: [u8; 3] = [0; 3];
        self.write_length(bytes.len())?;
        self.write_all(bytes)?;
        self.write_all(&PAD[..crate::padding(bytes.len())])
    }

    /// Serialize one counted item of an array or map. The decoder bounds a
    /// count by the bytes left, so an item must take at least one 4-byte unit.
    fn write_counted<T: Serialize + ?Sized>(&mut self, item: &T) -> Result<()> {
        let before = self.written;
        item.serialize(&mut *self)?;
        if self.written == before {
            return Err(Error::Unsupported("zero-width array or map element"));
        }
        Ok(())
    }
}

impl<W: Write> ser::Serializer for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_u32(v as u32)
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        ser::Serializer::serialize_i32(self, v as i32)
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        ser::Serializer::serialize_i32(self, v as i32)
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }
    /// hyper
    fn serialize_i64(self, v: i64) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.write_u32(v as u32)
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.write_u32(v as u32)
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.write_u32(v)
    }
    /// unsigned hyper
    fn serialize_u64(self, v: u64) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }
    fn serialize_f64(self, v: f64) -> Result<()> {
        self.write_all(&v.to_be_bytes())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.write_u32(v as u32)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_opaque_variable(v.as_bytes())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_opaque_variable(v)
    }

    /// Optional data is a bool-switched union: FALSE is void.
    fn serialize_none(self) -> Result<()> {
        self.write_u32(0)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        self.write_u32(1)?;
        value.serialize(self)
    }

    /// void
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        self.write_u32(variant_index)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.write_u32(variant_index)?;
        value.serialize(self)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.write_length(len.ok_or(Error::LengthRequired)?)?;
        Ok(self)
    }

    /// Fixed-length arrays carry no count.
    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.write_u32(variant_index)?;
        Ok(self)
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        self.write_length(len.ok_or(Error::LengthRequired)?)?;
        Ok(self)
    }

    /// Struct fields go out in declaration order, back to back.
    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.write_u32(variant_index)?;
        Ok(self)
    }
}

macro_rules! forward_serialize_element {
    ($t:ty, $method:ident) => {
        impl<W: Write> $t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn $method<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

macro_rules! forward_serialize_field {
    ($t:ty) => {
        impl<W: Write> $t for &mut Serializer<W> {
            type Ok = ();
            type Error = Error;
            fn serialize_field<T: Serialize + ?Sized>(
                &mut self,
                _key: &'static str,
                value: &T,
            ) -> Result<()> {
                value.serialize(&mut **self)
            }
            fn end(self) -> Result<()> {
                Ok(())
            }
        }
    };
}

forward_serialize_element!(ser::SerializeTuple, serialize_element);
forward_serialize_element!(ser::SerializeTupleStruct, serialize_field);
forward_serialize_element!(ser::SerializeTupleVariant, serialize_field);
forward_serialize_field!(ser::SerializeStruct);
forward_serialize_field!(ser::SerializeStructVariant);

impl<W: Write> ser::SerializeSeq for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.write_counted(value)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<W: Write> ser::SerializeMap for &mut Serializer<W> {
    type Ok = ();
    type Error = Error;
    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        self.write_counted(key)
    }
    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.write_counted(value)
    }
    fn end(self) -> Result<()> {
        Ok(())
    }
}
