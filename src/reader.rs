// ABOUTME: Hand-written recursive-descent reader turning source text into value trees

use crate::value::Value;

const SYMBOL_PUNCT: &str = "_+-*\\/=<>!&";

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SYMBOL_PUNCT.contains(c)
}

/// Parses `src` as a sequence of top-level expressions and returns them
/// wrapped in an `SExpr` accumulator, matching the single entry point
/// `read_expr(dst, src, i, end_char)` with `end_char` = end of input.
pub fn read(src: &str) -> Value {
    let mut reader = Reader::new(src);
    let mut dst = Vec::new();
    reader.read_expr(&mut dst, None);
    Value::SExpr(dst)
}

struct Reader {
    chars: Vec<char>,
    pos: usize,
}

impl Reader {
    fn new(src: &str) -> Self {
        Reader {
            chars: src.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Appends every top-level expression found before the first
    /// occurrence of `end_char` (or before end of input, if `end_char` is
    /// `None`) into `dst`.
    fn read_expr(&mut self, dst: &mut Vec<Value>, end_char: Option<char>) {
        loop {
            match self.peek() {
                None => {
                    if let Some(end) = end_char {
                        dst.push(Value::err(format!("Missing {end} at end of input")));
                    }
                    return;
                }
                Some(c) if Some(c) == end_char => {
                    self.advance();
                    return;
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('(') => {
                    self.advance();
                    let mut inner = Vec::new();
                    self.read_expr(&mut inner, Some(')'));
                    dst.push(Value::SExpr(inner));
                }
                Some('{') => {
                    self.advance();
                    let mut inner = Vec::new();
                    self.read_expr(&mut inner, Some('}'));
                    dst.push(Value::QExpr(inner));
                }
                Some('"') => {
                    self.advance();
                    dst.push(self.read_str());
                }
                Some(c) if is_symbol_char(c) => {
                    dst.push(self.read_sym());
                }
                Some(c) => {
                    self.advance();
                    dst.push(Value::err(format!("Unknown Character {c}")));
                    return;
                }
            }
        }
    }

    fn read_sym(&mut self) -> Value {
        let mut buf = String::new();
        while let Some(c) = self.peek() {
            if !is_symbol_char(c) {
                break;
            }
            buf.push(c);
            self.advance();
        }
        classify_symbol_run(&buf)
    }

    fn read_str(&mut self) -> Value {
        let mut buf = String::new();
        loop {
            match self.advance() {
                None => return Value::err("Unexpected end of input at string literal"),
                Some('"') => return Value::Str(buf),
                Some('\\') => match self.advance() {
                    Some('a') => buf.push('\x07'),
                    Some('b') => buf.push('\x08'),
                    Some('f') => buf.push('\x0c'),
                    Some('n') => buf.push('\n'),
                    Some('r') => buf.push('\r'),
                    Some('t') => buf.push('\t'),
                    Some('v') => buf.push('\x0b'),
                    Some('\\') => buf.push('\\'),
                    Some('\'') => buf.push('\''),
                    Some('"') => buf.push('"'),
                    Some(other) => return Value::err(format!("Invalid escape character {other}")),
                    None => return Value::err("Unexpected end of input at string literal"),
                },
                Some(c) => buf.push(c),
            }
        }
    }
}

/// A symbol-class run is a number iff the first character is `-` or a
/// digit (a lone `-` is a symbol), and every character after the first is
/// a digit.
fn classify_symbol_run(buf: &str) -> Value {
    let mut chars = buf.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Value::sym(buf),
    };

    let rest_is_all_digits = first == '-' || first.is_ascii_digit();
    if !rest_is_all_digits {
        return Value::sym(buf);
    }
    if first == '-' && buf.len() == 1 {
        return Value::sym(buf);
    }

    if chars.clone().all(|c| c.is_ascii_digit()) {
        match buf.parse::<i64>() {
            Ok(n) => Value::Num(n),
            Err(_) => Value::err(format!("Invalid Number {buf}")),
        }
    } else {
        Value::sym(buf)
    }
}
