use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::AssignExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::token::TT;

/// Converts a literal expression subtree into a pattern (assignment target).
/// `{ a: [b] }` could be an object literal or object pattern. This function is useful for when a pattern was misinterpreted as a literal expression, without needing to rewind and reparse.
pub fn lit_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::Id(n) => Ok(n.map_stx(|id| IdPat { name: id.name }).wrap(Pat::Id)),
    Expr::Member(n) => Ok(n.wrap(Pat::Member)),
    Expr::ComputedMember(n) => Ok(n.wrap(Pat::ComputedMember)),
    Expr::LitArr(n) => n
      .try_map_stx(|LitArrExpr { elements }| {
        let mut pat_elements = Vec::<Option<ArrPatElem>>::new();
        let mut rest = None;
        let count = elements.len();
        for (i, element) in elements.into_iter().enumerate() {
          match element {
            LitArrElem::Single(elem) => pat_elements.push(Some(lit_to_pat_with_default(elem)?)),
            // Only the last element may be a rest element, and it can't have a default.
            LitArrElem::Rest(expr) if i + 1 == count => rest = Some(lit_to_pat(expr)?),
            LitArrElem::Rest(expr) => {
              return Err(expr.error(SyntaxErrorType::InvalidAssignmentTarget));
            }
            LitArrElem::Empty => pat_elements.push(None),
          };
        }
        Ok(ArrPat {
          elements: pat_elements,
          rest,
        })
      })
      .map(|n| n.wrap(Pat::Arr)),
    Expr::LitObj(n) => n
      .try_map_stx(|LitObjExpr { members }| {
        let properties = members
          .into_iter()
          .map(obj_member_to_pat_prop)
          .collect::<SyntaxResult<Vec<_>>>()?;
        Ok(ObjPat { properties })
      })
      .map(|n| n.wrap(Pat::Obj)),
    _ => Err(loc.error(SyntaxErrorType::InvalidAssignmentTarget, None)),
  }
}

/// Like `lit_to_pat`, but a top-level `target = value` becomes a target with a default.
pub fn lit_to_pat_with_default(node: Node<Expr>) -> SyntaxResult<ArrPatElem> {
  match *node.stx {
    Expr::Assign(n) if n.stx.operator == OperatorName::Assignment => {
      let AssignExpr { target, value, .. } = *n.stx;
      Ok(ArrPatElem {
        target,
        default_value: Some(value),
      })
    }
    stx => Ok(ArrPatElem {
      target: lit_to_pat(Node {
        loc: node.loc,
        stx: Box::new(stx),
        assoc: node.assoc,
      })?,
      default_value: None,
    }),
  }
}

pub fn obj_member_to_pat_prop(member: Node<ObjMember>) -> SyntaxResult<Node<ObjPatProp>> {
  let loc = member.loc;
  member.try_map_stx(|ObjMember { typ }| match typ {
    ObjMemberType::Valued {
      key,
      val: ClassOrObjVal::Prop(value),
    } => {
      let ArrPatElem {
        target,
        default_value,
      } = lit_to_pat_with_default(value)?;
      Ok(ObjPatProp {
        key,
        target,
        shorthand: false,
        default_value,
      })
    }
    // Methods and accessors.
    ObjMemberType::Valued { .. } => Err(loc.error(SyntaxErrorType::InvalidAssignmentTarget, None)),
    ObjMemberType::Shorthand { id } => Ok(ObjPatProp {
      key: ClassOrObjKey::Direct(id.derive_stx(|id| ClassOrObjMemberDirectKey {
        key: id.name.clone(),
        tt: TT::Identifier,
      })),
      target: id.map_stx(|id| IdPat { name: id.name }).wrap(Pat::Id),
      shorthand: true,
      default_value: None,
    }),
  })
}

/// Finds the first member access inside a pattern. Binding positions (parameters, declarations) only allow identifiers and nested patterns.
pub fn binding_violation(pat: &Node<Pat>) -> Option<Loc> {
  match pat.stx.as_ref() {
    Pat::Id(_) => None,
    Pat::Member(_) | Pat::ComputedMember(_) => Some(pat.loc),
    Pat::Arr(arr) => arr
      .stx
      .elements
      .iter()
      .flatten()
      .find_map(|e| binding_violation(&e.target))
      .or_else(|| arr.stx.rest.as_ref().and_then(binding_violation)),
    Pat::Obj(obj) => obj
      .stx
      .properties
      .iter()
      .find_map(|p| binding_violation(&p.stx.target)),
  }
}
