use bitflags::bitflags;

bitflags! {
  /// Declaration modifiers, shared by the syntax tree and the semantic model.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  #[cfg_attr(feature = "serde", derive(serde::Serialize))]
  pub struct Modifiers: u16 {
    const PUBLIC = 1 << 0;
    const PRIVATE = 1 << 1;
    const PROTECTED = 1 << 2;
    const STATIC = 1 << 3;
    const FINAL = 1 << 4;
    const ABSTRACT = 1 << 5;
    const SYNCHRONIZED = 1 << 6;
    const NATIVE = 1 << 7;
    const TRANSIENT = 1 << 8;
    const VOLATILE = 1 << 9;
    const STRICTFP = 1 << 10;
  }
}

impl Modifiers {
  pub fn from_keyword(kw: &str) -> Option<Modifiers> {
    Some(match kw {
      "public" => Modifiers::PUBLIC,
      "private" => Modifiers::PRIVATE,
      "protected" => Modifiers::PROTECTED,
      "static" => Modifiers::STATIC,
      "final" => Modifiers::FINAL,
      "abstract" => Modifiers::ABSTRACT,
      "synchronized" => Modifiers::SYNCHRONIZED,
      "native" => Modifiers::NATIVE,
      "transient" => Modifiers::TRANSIENT,
      "volatile" => Modifiers::VOLATILE,
      "strictfp" => Modifiers::STRICTFP,
      _ => return None,
    })
  }

  pub fn is_static(self) -> bool {
    self.contains(Modifiers::STATIC)
  }

  pub fn is_final(self) -> bool {
    self.contains(Modifiers::FINAL)
  }

  pub fn is_abstract(self) -> bool {
    self.contains(Modifiers::ABSTRACT)
  }

  pub fn is_private(self) -> bool {
    self.contains(Modifiers::PRIVATE)
  }
}
