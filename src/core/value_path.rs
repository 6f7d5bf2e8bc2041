use crate::core::value::Value;
use indexmap::IndexMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Most `None` padding a single index write may add to a list.
pub const MAX_INDEX_GAP: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location inside a document, written as `settings.colors[2]`.
///
/// The textual form has no escaping: keys containing `.`, `[` or `]`, empty
/// keys and all-digit keys do not survive a `to_string`/`parse` round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    /// Permissive tokenizer: splits on `.`, `[` and `]`, drops empty pieces
    /// and reads every all-digit piece as an array index. Never fails.
    pub fn parse(input: &str) -> Self {
        let segments = input
            .trim()
            .split(['.', '[', ']'])
            .filter(|piece| !piece.is_empty())
            .map(parse_segment)
            .collect();
        Self { segments }
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn parent(&self) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();
        Self { segments }
    }

    /// Label shown next to a form field: everything after the last `.` of
    /// the textual path, so array elements read as `colors[2]`.
    pub fn leaf_label(&self) -> String {
        let text = self.to_string();
        match text.rsplit_once('.') {
            Some((_, tail)) => tail.to_string(),
            None => text,
        }
    }
}

fn parse_segment(piece: &str) -> PathSegment {
    if piece.bytes().all(|byte| byte.is_ascii_digit())
        && let Ok(index) = piece.parse::<usize>()
    {
        return PathSegment::Index(index);
    }
    PathSegment::Key(piece.to_string())
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if idx > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for ValuePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for ValuePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl Value {
    pub fn get_path(&self, path: &ValuePath) -> Option<&Value> {
        let mut current = self;
        for segment in path.segments() {
            current = match (current, segment) {
                (Value::Object(map), PathSegment::Key(key)) => map.get(key)?,
                (Value::List(list), PathSegment::Index(index)) => list.get(*index)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Write `value` at `path`, creating missing containers on the way.
    ///
    /// A container whose kind disagrees with the segment addressing it is
    /// replaced by an empty container of the right kind, and index writes
    /// past the end of a list pad it with `None`. An index more than
    /// [`MAX_INDEX_GAP`] past the end appends instead. This never fails.
    pub fn set_path(&mut self, path: &ValuePath, value: Value) {
        let mut current = self;
        for segment in path.segments() {
            current = slot_mut(current, segment);
        }
        *current = value;
    }
}

fn slot_mut<'a>(container: &'a mut Value, segment: &PathSegment) -> &'a mut Value {
    match segment {
        PathSegment::Key(key) => object_mut(container)
            .entry(key.clone())
            .or_insert(Value::None),
        PathSegment::Index(index) => {
            let list = list_mut(container);
            let mut slot = *index;
            if slot.saturating_sub(list.len()) > MAX_INDEX_GAP {
                warn!(index = slot, len = list.len(), "index too far past the end, appending");
                slot = list.len();
            }
            if list.len() <= slot {
                list.resize_with(slot + 1, || Value::None);
            }
            &mut list[slot]
        }
    }
}

fn object_mut(container: &mut Value) -> &mut IndexMap<String, Value> {
    if !matches!(container, Value::Object(_)) {
        *container = Value::Object(IndexMap::new());
    }
    match container {
        Value::Object(map) => map,
        _ => unreachable!("container was just replaced with an object"),
    }
}

fn list_mut(container: &mut Value) -> &mut Vec<Value> {
    if !matches!(container, Value::List(_)) {
        *container = Value::List(Vec::new());
    }
    match container {
        Value::List(list) => list,
        _ => unreachable!("container was just replaced with a list"),
    }
}
