//! Member-key extraction for values that fail to serialize
//!
//! Runs a value through a serializer that records only top-level member
//! names (struct fields, map keys, sequence indices) and never looks at the
//! member values, so it still works when a nested value cannot be serialized.

use serde::ser::{self, Serialize};

type KeyResult<T> = Result<T, serde_json::Error>;

/// Top-level member names of `value`. Scalars have none.
pub(crate) fn member_keys<T: Serialize + ?Sized>(value: &T) -> Vec<String> {
    value.serialize(KeyCollector).unwrap_or_default()
}

struct KeyCollector;

/// Collected names for one compound value
#[derive(Default)]
struct Keys {
    names: Vec<String>,
}

impl Keys {
    fn push_index(&mut self) {
        let index = self.names.len();
        self.names.push(index.to_string());
    }
}

fn key_name<T: Serialize + ?Sized>(key: &T) -> String {
    match serde_json::to_value(key) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(other) => other.to_string(),
        Err(_) => "<key>".to_string(),
    }
}

impl ser::Serializer for KeyCollector {
    type Ok = Vec<String>;
    type Error = serde_json::Error;
    type SerializeSeq = Keys;
    type SerializeTuple = Keys;
    type SerializeTupleStruct = Keys;
    type SerializeTupleVariant = Keys;
    type SerializeMap = Keys;
    type SerializeStruct = Keys;
    type SerializeStructVariant = Keys;

    fn serialize_bool(self, _v: bool) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_i8(self, _v: i8) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_i16(self, _v: i16) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_i32(self, _v: i32) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_i64(self, _v: i64) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_u8(self, _v: u8) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_u16(self, _v: u16) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_u32(self, _v: u32) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_u64(self, _v: u64) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_f32(self, _v: f32) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_f64(self, _v: f64) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_char(self, _v: char) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_str(self, _v: &str) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_bytes(self, v: &[u8]) -> KeyResult<Self::Ok> {
        Ok((0..v.len()).map(|index| index.to_string()).collect())
    }

    fn serialize_none(self) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> KeyResult<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> KeyResult<Self::Ok> {
        Ok(Vec::new())
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> KeyResult<Self::Ok> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> KeyResult<Self::Ok> {
        // externally tagged: { "Variant": value }
        Ok(vec![variant.to_string()])
    }

    fn serialize_seq(self, _len: Option<usize>) -> KeyResult<Self::SerializeSeq> {
        Ok(Keys::default())
    }

    fn serialize_tuple(self, _len: usize) -> KeyResult<Self::SerializeTuple> {
        Ok(Keys::default())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> KeyResult<Self::SerializeTupleStruct> {
        Ok(Keys::default())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> KeyResult<Self::SerializeTupleVariant> {
        Ok(Keys::default())
    }

    fn serialize_map(self, _len: Option<usize>) -> KeyResult<Self::SerializeMap> {
        Ok(Keys::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> KeyResult<Self::SerializeStruct> {
        Ok(Keys::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> KeyResult<Self::SerializeStructVariant> {
        Ok(Keys::default())
    }
}

impl ser::SerializeSeq for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> KeyResult<()> {
        self.push_index();
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeTuple for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, _value: &T) -> KeyResult<()> {
        self.push_index();
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeTupleStruct for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> KeyResult<()> {
        self.push_index();
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeTupleVariant for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, _value: &T) -> KeyResult<()> {
        self.push_index();
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeMap for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> KeyResult<()> {
        self.names.push(key_name(key));
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> KeyResult<()> {
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeStruct for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        _value: &T,
    ) -> KeyResult<()> {
        self.names.push(key.to_string());
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}

impl ser::SerializeStructVariant for Keys {
    type Ok = Vec<String>;
    type Error = serde_json::Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        key: &'static str,
        _value: &T,
    ) -> KeyResult<()> {
        self.names.push(key.to_string());
        Ok(())
    }

    fn end(self) -> KeyResult<Self::Ok> {
        Ok(self.names)
    }
}
