use super::NodeId;
use std::fmt;

/// A dynamically typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    /// Present, but explicitly nothing
    None,
    Node(NodeId),
    Nodes(Vec<NodeId>),
    Parms(ParmList),
    /// Opaque caller-owned handle
    Handle(u64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_parms(&self) -> Option<&ParmList> {
        match self {
            Value::Parms(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

impl From<Vec<NodeId>> for Value {
    fn from(ids: Vec<NodeId>) -> Self {
        Value::Nodes(ids)
    }
}

impl From<ParmList> for Value {
    fn from(parms: ParmList) -> Self {
        Value::Parms(parms)
    }
}

/// Strings print verbatim; everything else prints an opaque identity marker.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::None => f.write_str("<none>"),
            Value::Node(id) => write!(f, "<node {}>", id),
            Value::Nodes(ids) => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(f, "<nodes {}>", ids.join(","))
            }
            Value::Parms(p) => write!(f, "<parms {}>", p.len()),
            Value::Handle(h) => write!(f, "<handle {:#x}>", h),
        }
    }
}

/// One function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parm {
    pub ty: String,
    pub name: Option<String>,
    pub value: Option<String>, // Default value, if any
}

impl Parm {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: Some(name.into()), value: None }
    }

    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self { ty: ty.into(), name: None, value: None }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Ordered parameter list, as stored in a node's `parms` attribute
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParmList(pub Vec<Parm>);

impl ParmList {
    pub fn new(parms: Vec<Parm>) -> Self {
        Self(parms)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parm> {
        self.0.iter()
    }

    /// Prototype summary: the parameter types separated by commas
    pub fn protostr(&self) -> String {
        let types: Vec<&str> = self.0.iter().map(|p| p.ty.as_str()).collect();
        types.join(",")
    }
}

impl FromIterator<Parm> for ParmList {
    fn from_iter<I: IntoIterator<Item = Parm>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
