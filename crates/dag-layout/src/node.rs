use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Identifier of a node, unique within one layout call
pub type NodeId = i64;

/// A node as declared by the caller
///
/// Nodes without parents (or whose parents are all invalid) are roots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DagNode {
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Declared parents, possibly malformed
    #[serde(
        default,
        deserialize_with = "deserialize_parents",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parents: Vec<ParentRef>,
}

impl DagNode {
    /// Create a root node
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            title: None,
            parents: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = NodeId>) -> Self {
        self.parents = parents.into_iter().map(ParentRef::Id).collect();
        self
    }

    /// Set the raw parent list, including malformed entries
    pub fn with_parent_refs(mut self, parents: impl IntoIterator<Item = ParentRef>) -> Self {
        self.parents = parents.into_iter().collect();
        self
    }

    /// Label to display for this node, the title or the id
    pub fn label(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// One entry of a node's declared parent list
///
/// Input coming from loosely typed sources can hold anything in there, so
/// entries that are not node ids are kept around until normalization drops
/// them.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRef {
    Id(NodeId),
    Null,
    /// Anything else, with a printable rendition of the value
    Invalid(String),
}

impl ParentRef {
    pub fn id(&self) -> Option<NodeId> {
        match self {
            ParentRef::Id(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<NodeId> for ParentRef {
    fn from(id: NodeId) -> Self {
        ParentRef::Id(id)
    }
}

impl From<Option<NodeId>> for ParentRef {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(ParentRef::Null, ParentRef::Id)
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Id(id) => write!(f, "{id}"),
            ParentRef::Null => write!(f, "null"),
            ParentRef::Invalid(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParentRef::Id(id) => serializer.serialize_i64(*id),
            ParentRef::Null => serializer.serialize_none(),
            ParentRef::Invalid(value) => serializer.serialize_str(value),
        }
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ParentRefVisitor)
    }
}

struct ParentRefVisitor;

impl<'de> Visitor<'de> for ParentRefVisitor {
    type Value = ParentRef;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a parent node id")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<ParentRef, E> {
        Ok(ParentRef::Invalid(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ParentRef, E> {
        Ok(ParentRef::Id(v))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<ParentRef, E> {
        Ok(NodeId::try_from(v).map_or_else(|_| ParentRef::Invalid(v.to_string()), ParentRef::Id))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ParentRef, E> {
        Ok(NodeId::try_from(v).map_or_else(|_| ParentRef::Invalid(v.to_string()), ParentRef::Id))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<ParentRef, E> {
        Ok(NodeId::try_from(v).map_or_else(|_| ParentRef::Invalid(v.to_string()), ParentRef::Id))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ParentRef, E> {
        // Integral floats are ids, `2.0` and `2` name the same node
        if v.fract() == 0.0 && v >= NodeId::MIN as f64 && v < NodeId::MAX as f64 {
            Ok(ParentRef::Id(v as NodeId))
        } else {
            Ok(ParentRef::Invalid(v.to_string()))
        }
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<ParentRef, E> {
        Ok(ParentRef::Invalid(format!("{v:?}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ParentRef, E> {
        Ok(ParentRef::Invalid(format!("{v:?}")))
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<ParentRef, E> {
        Ok(ParentRef::Invalid("<bytes>".to_string()))
    }

    fn visit_none<E: de::Error>(self) -> Result<ParentRef, E> {
        Ok(ParentRef::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<ParentRef, E> {
        Ok(ParentRef::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<ParentRef, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ParentRef, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(ParentRef::Invalid("<sequence>".to_string()))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ParentRef, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(ParentRef::Invalid("<map>".to_string()))
    }
}

/// Accept anything for the parent list, a value that isn't a sequence means
/// no parents at all
fn deserialize_parents<'de, D>(deserializer: D) -> Result<Vec<ParentRef>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ParentsVisitor)
}

struct ParentsVisitor;

impl ParentsVisitor {
    fn not_a_list<E>(what: &str) -> Result<Vec<ParentRef>, E> {
        tracing::debug!("parents is {what}, not a list, treating it as empty");
        Ok(Vec::new())
    }
}

impl<'de> Visitor<'de> for ParentsVisitor {
    type Value = Vec<ParentRef>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a list of parent node ids")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut parents = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(parent) = seq.next_element::<ParentRef>()? {
            parents.push(parent);
        }
        Ok(parents)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Self::not_a_list("a boolean")
    }

    fn visit_i64<E: de::Error>(self, _v: i64) -> Result<Self::Value, E> {
        Self::not_a_list("a number")
    }

    fn visit_i128<E: de::Error>(self, _v: i128) -> Result<Self::Value, E> {
        Self::not_a_list("a number")
    }

    fn visit_u64<E: de::Error>(self, _v: u64) -> Result<Self::Value, E> {
        Self::not_a_list("a number")
    }

    fn visit_u128<E: de::Error>(self, _v: u128) -> Result<Self::Value, E> {
        Self::not_a_list("a number")
    }

    fn visit_f64<E: de::Error>(self, _v: f64) -> Result<Self::Value, E> {
        Self::not_a_list("a number")
    }

    fn visit_char<E: de::Error>(self, _v: char) -> Result<Self::Value, E> {
        Self::not_a_list("a character")
    }

    fn visit_str<E: de::Error>(self, _v: &str) -> Result<Self::Value, E> {
        Self::not_a_list("a string")
    }

    fn visit_bytes<E: de::Error>(self, _v: &[u8]) -> Result<Self::Value, E> {
        Self::not_a_list("bytes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Self::not_a_list("a map")
    }
}
