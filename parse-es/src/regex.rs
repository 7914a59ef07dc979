//! Validation of regular expression literal bodies against the ES2017 pattern grammar.
//!
//! Without the `u` flag, the web-compatibility extensions apply: unmatched `]`, `{` and `}` are literal characters, unknown escapes are identity escapes, backreferences past the last group are legacy octal escapes, and lookaheads can be quantified. Patterns are matched over UTF-16 code units without `u` and over code points with it, so ranges like `[💩-💫]` are only valid with `u`.

const SYNTAX_CHARS: &str = "^$\\.*+?()[]{}|";

struct Pattern {
  units: Vec<u32>,
  next: usize,
  unicode: bool,
  groups: u32,
  max_backreference: u32,
}

type Accept<T = ()> = Result<T, ()>;

fn is_syntax_char(c: u32) -> bool {
  char::from_u32(c).is_some_and(|c| SYNTAX_CHARS.contains(c))
}

fn hex_value(c: u32) -> Option<u32> {
  char::from_u32(c).and_then(|c| c.to_digit(16))
}

fn is_decimal_digit(c: u32) -> bool {
  (u32::from(b'0')..=u32::from(b'9')).contains(&c)
}

fn is_ascii_letter(c: u32) -> bool {
  char::from_u32(c).is_some_and(|c| c.is_ascii_alphabetic())
}

fn is_lead_surrogate(c: u32) -> bool {
  (0xD800..=0xDBFF).contains(&c)
}

fn is_trail_surrogate(c: u32) -> bool {
  (0xDC00..=0xDFFF).contains(&c)
}

// A class atom is either a single character or a whole set (`\d`, `\w`, ...).
enum ClassAtom {
  Char(u32),
  Set,
}

impl Pattern {
  fn peek(&self) -> Option<u32> {
    self.units.get(self.next).copied()
  }

  fn peek_at(&self, n: usize) -> Option<u32> {
    self.units.get(self.next + n).copied()
  }

  fn is(&self, c: char) -> bool {
    self.peek() == Some(c as u32)
  }

  fn eat(&mut self, c: char) -> bool {
    if self.is(c) {
      self.next += 1;
      true
    } else {
      false
    }
  }

  fn bump(&mut self) -> Accept<u32> {
    let c = self.peek().ok_or(())?;
    self.next += 1;
    Ok(c)
  }

  fn decimal(&mut self) -> Option<u32> {
    let start = self.next;
    let mut value: u32 = 0;
    while let Some(c) = self.peek().filter(|&c| is_decimal_digit(c)) {
      value = value.saturating_mul(10).saturating_add(c - u32::from(b'0'));
      self.next += 1;
    }
    (self.next > start).then_some(value)
  }

  fn disjunction(&mut self) -> Accept {
    self.alternative()?;
    while self.eat('|') {
      self.alternative()?;
    }
    Ok(())
  }

  fn alternative(&mut self) -> Accept {
    while self.peek().is_some() && !self.is('|') && !self.is(')') {
      self.term()?;
    }
    Ok(())
  }

  fn term(&mut self) -> Accept {
    if self.eat('^') || self.eat('$') {
      return Ok(());
    };
    if self.is('\\') && matches!(self.peek_at(1), Some(c) if c == 'b' as u32 || c == 'B' as u32) {
      self.next += 2;
      return Ok(());
    };
    if self.is('(') && self.peek_at(1) == Some('?' as u32) {
      let lookahead = matches!(self.peek_at(2), Some(c) if c == '=' as u32 || c == '!' as u32);
      if lookahead {
        self.next += 3;
        self.group_rest()?;
        // Lookaheads are only quantifiable without `u`.
        if !self.unicode {
          self.quantifier()?;
        };
        return Ok(());
      };
    };
    self.atom()?;
    self.quantifier()
  }

  fn group_rest(&mut self) -> Accept {
    self.disjunction()?;
    if self.eat(')') {
      Ok(())
    } else {
      Err(())
    }
  }

  /// Parses `{n}`, `{n,}` or `{n,m}` after the `{`, restoring the position if it isn't one.
  fn braced_quantifier(&mut self) -> Option<Accept> {
    let start = self.next;
    self.next += 1;
    let parsed = (|| {
      let min = self.decimal()?;
      let max = if self.eat(',') {
        self.decimal()
      } else {
        Some(min)
      };
      if !self.eat('}') {
        return None;
      };
      Some(match max {
        Some(max) if max < min => Err(()),
        _ => Ok(()),
      })
    })();
    if parsed.is_none() {
      self.next = start;
    };
    parsed
  }

  fn quantifier(&mut self) -> Accept {
    if self.eat('*') || self.eat('+') || self.eat('?') {
      self.eat('?');
      return Ok(());
    };
    if self.is('{') {
      match self.braced_quantifier() {
        Some(res) => {
          res?;
          self.eat('?');
        }
        None if self.unicode => return Err(()),
        None => {}
      };
    };
    Ok(())
  }

  fn atom(&mut self) -> Accept {
    let c = self.peek().ok_or(())?;
    match char::from_u32(c) {
      Some('.') => {
        self.next += 1;
        Ok(())
      }
      Some('(') => {
        self.next += 1;
        if self.eat('?') {
          if !self.eat(':') {
            return Err(());
          };
        } else {
          self.groups += 1;
        };
        self.group_rest()
      }
      Some('[') => {
        self.next += 1;
        self.class()
      }
      Some('\\') => {
        self.next += 1;
        self.atom_escape()
      }
      Some('{') if !self.unicode => match self.braced_quantifier() {
        // A quantifier with nothing to quantify.
        Some(_) => Err(()),
        None => {
          self.next += 1;
          Ok(())
        }
      },
      Some(']' | '}') if !self.unicode => {
        self.next += 1;
        Ok(())
      }
      _ if is_syntax_char(c) => Err(()),
      _ => {
        self.next += 1;
        Ok(())
      }
    }
  }

  fn atom_escape(&mut self) -> Accept {
    let c = self.peek().ok_or(())?;
    if is_decimal_digit(c) && c != '0' as u32 {
      let value = self.decimal().ok_or(())?;
      self.max_backreference = self.max_backreference.max(value);
      return Ok(());
    };
    self.character_escape(false).map(|_| ())
  }

  /// Parses an escape after `\`, returning the character it denotes, or `None` for a set like `\d`.
  fn character_escape(&mut self, in_class: bool) -> Accept<Option<u32>> {
    let c = self.bump()?;
    let Some(ch) = char::from_u32(c) else {
      return if self.unicode { Err(()) } else { Ok(Some(c)) };
    };
    Ok(Some(match ch {
      'd' | 'D' | 's' | 'S' | 'w' | 'W' => return Ok(None),
      'f' => 0x0C,
      'n' => 0x0A,
      'r' => 0x0D,
      't' => 0x09,
      'v' => 0x0B,
      'b' if in_class => 0x08,
      '-' if in_class && self.unicode => '-' as u32,
      'c' => match self.peek() {
        Some(l) if is_ascii_letter(l) => {
          self.next += 1;
          l % 32
        }
        Some(l) if in_class && !self.unicode && (is_decimal_digit(l) || l == '_' as u32) => {
          self.next += 1;
          l % 32
        }
        _ if self.unicode => return Err(()),
        _ => {
          // `\c` without a control letter is a literal backslash, and `c` is read again.
          self.next -= 1;
          '\\' as u32
        }
      },
      '0' => {
        if self.peek().is_some_and(is_decimal_digit) {
          if self.unicode {
            return Err(());
          };
          self.legacy_octal(0)
        } else {
          0
        }
      }
      '1'..='7' if in_class && !self.unicode => self.legacy_octal(c - u32::from(b'0')),
      '1'..='9' if in_class => return if self.unicode { Err(()) } else { Ok(Some(c)) },
      'x' => match (self.peek().and_then(hex_value), self.peek_at(1).and_then(hex_value)) {
        (Some(a), Some(b)) => {
          self.next += 2;
          a * 16 + b
        }
        _ if self.unicode => return Err(()),
        _ => 'x' as u32,
      },
      'u' => match self.unicode_escape() {
        Some(v) => v,
        None if self.unicode => return Err(()),
        None => 'u' as u32,
      },
      _ if self.unicode => {
        if is_syntax_char(c) || ch == '/' {
          c
        } else {
          return Err(());
        }
      }
      _ => c,
    }))
  }

  // Up to three octal digits in total, with a value no greater than 0o377.
  fn legacy_octal(&mut self, first: u32) -> u32 {
    let mut value = first;
    for _ in 0..2 {
      match self.peek().and_then(|c| char::from_u32(c)?.to_digit(8)) {
        Some(d) if value * 8 + d <= 0o377 => {
          value = value * 8 + d;
          self.next += 1;
        }
        _ => break,
      };
    }
    value
  }

  fn hex4(&mut self) -> Option<u32> {
    let mut value = 0;
    for i in 0..4 {
      value = value * 16 + self.peek_at(i).and_then(hex_value)?;
    }
    self.next += 4;
    Some(value)
  }

  // After `\u`. With `u`, accepts `{...}` and joins an escaped surrogate pair.
  fn unicode_escape(&mut self) -> Option<u32> {
    if self.unicode && self.is('{') {
      let start = self.next;
      self.next += 1;
      let mut value: u32 = 0;
      let mut digits = 0;
      while let Some(d) = self.peek().and_then(hex_value) {
        value = value.saturating_mul(16).saturating_add(d);
        digits += 1;
        self.next += 1;
      }
      if digits == 0 || value > 0x10FFFF || !self.eat('}') {
        self.next = start;
        return None;
      };
      return Some(value);
    };
    let lead = self.hex4()?;
    if self.unicode
      && is_lead_surrogate(lead)
      && self.is('\\')
      && self.peek_at(1) == Some('u' as u32)
    {
      let start = self.next;
      self.next += 2;
      match self.hex4() {
        Some(trail) if is_trail_surrogate(trail) => {
          return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
        }
        _ => self.next = start,
      };
    };
    Some(lead)
  }

  fn class_atom(&mut self) -> Accept<ClassAtom> {
    let c = self.bump()?;
    if c != '\\' as u32 {
      return Ok(ClassAtom::Char(c));
    };
    Ok(match self.character_escape(true)? {
      Some(c) => ClassAtom::Char(c),
      None => ClassAtom::Set,
    })
  }

  fn class(&mut self) -> Accept {
    self.eat('^');
    loop {
      if self.eat(']') {
        return Ok(());
      };
      let from = self.class_atom()?;
      if !self.is('-') || self.peek_at(1) == Some(']' as u32) {
        continue;
      };
      self.next += 1;
      let to = self.class_atom()?;
      match (from, to) {
        (ClassAtom::Char(from), ClassAtom::Char(to)) => {
          if from > to {
            return Err(());
          };
        }
        // A set can't bound a range, but without `u` the hyphen is then literal.
        _ if self.unicode => return Err(()),
        _ => {}
      };
    }
  }
}

/// Whether `pattern`, the text between the slashes of a regular expression literal, is valid.
pub fn is_valid_pattern(pattern: &str, unicode: bool) -> bool {
  let units = if unicode {
    pattern.chars().map(u32::from).collect()
  } else {
    pattern.encode_utf16().map(u32::from).collect()
  };
  let mut p = Pattern {
    units,
    next: 0,
    unicode,
    groups: 0,
    max_backreference: 0,
  };
  if p.disjunction().is_err() || p.peek().is_some() {
    return false;
  };
  // Without `u`, a backreference past the last group reads as an octal or identity escape.
  !unicode || p.max_backreference <= p.groups
}
