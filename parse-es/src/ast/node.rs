use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use crate::loc::SourceSpan;
use ahash::HashMap;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;
use serde::Serializer;
use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Formatter;

/// Out-of-band data attached to a node, keyed by type. Source spans live here when locations are requested.
#[derive(Default)]
pub struct NodeAssocData {
  // Make Node movable across threads by bounding values to Send + Sync too.
  map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl NodeAssocData {
  pub fn get<T: Any>(&self) -> Option<&T> {
    let t = TypeId::of::<T>();
    self.map.get(&t).and_then(|v| v.downcast_ref())
  }

  pub fn set<T: Any + Send + Sync>(&mut self, v: T) {
    let t = TypeId::of::<T>();
    self.map.insert(t, Box::from(v));
  }
}

#[derive(Drive, DriveMut)]
pub struct Node<S: Drive + DriveMut> {
  // A location is a byte range; nodes created by rewriting keep the location of the node they replace.
  #[drive(skip)]
  pub loc: Loc,
  pub stx: Box<S>,
  #[drive(skip)]
  pub assoc: NodeAssocData,
}

impl<S: Drive + DriveMut> Node<S> {
  pub fn new(loc: Loc, stx: S) -> Node<S> {
    Node {
      loc,
      stx: Box::new(stx),
      assoc: NodeAssocData::default(),
    }
  }

  pub fn into_stx<T: From<S> + Drive + DriveMut>(self) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(T::from(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Maps the syntax, keeping the location and associated data.
  pub fn map_stx<T: Drive + DriveMut, F: FnOnce(S) -> T>(self, f: F) -> Node<T> {
    Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)),
      assoc: self.assoc,
    }
  }

  /// Like `map_stx`, but the mapping can fail.
  pub fn try_map_stx<T: Drive + DriveMut, E, F: FnOnce(S) -> Result<T, E>>(
    self,
    f: F,
  ) -> Result<Node<T>, E> {
    Ok(Node {
      loc: self.loc,
      stx: Box::new(f(*self.stx)?),
      assoc: self.assoc,
    })
  }

  /// Maps the syntax, copying the location and span but no other associated data.
  pub fn derive_stx<T: Drive + DriveMut, F: FnOnce(&S) -> T>(&self, f: F) -> Node<T> {
    let mut node = Node::new(self.loc, f(&self.stx));
    if let Some(span) = self.span() {
      node.assoc.set(*span);
    };
    node
  }

  /// Wraps the node inside another node with the same loc, with syntax derived from the provided callback.
  pub fn wrap<T: Drive + DriveMut, F: FnOnce(Node<S>) -> T>(self, f: F) -> Node<T> {
    let loc = self.loc;
    let span = self.span().copied();
    let stx = f(self);
    let mut node = Node::new(loc, stx);
    if let Some(span) = span {
      node.assoc.set(span);
    };
    node
  }

  /// Wraps the node in the enum variant that holds it, e.g. `Node<IfStmt>` into `Node<Stmt>`.
  pub fn into_wrapped<T: From<Node<S>> + Drive + DriveMut>(self) -> Node<T> {
    self.wrap(T::from)
  }

  /// The resolved source span, if the parse was asked to record locations.
  pub fn span(&self) -> Option<&SourceSpan> {
    self.assoc.get::<SourceSpan>()
  }

  /// Create an error at this node's location.
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, None)
  }
}

impl<S: Debug + Drive + DriveMut> Debug for Node<S> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.stx.fmt(f)
  }
}

// Structural equality: locations and associated data are ignored.
impl<S: PartialEq + Drive + DriveMut> PartialEq for Node<S> {
  fn eq(&self, other: &Self) -> bool {
    self.stx == other.stx
  }
}

impl<S: Serialize + Drive + DriveMut> Serialize for Node<S> {
  fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
    self.stx.serialize(serializer)
  }
}
