//! printf-style substitution for message templates.

use std::fmt;

/// Substitutes `args` into `template`.
///
/// Supported directives:
/// - `%s` next argument, via `Display`
/// - `%d` leading integer of the next argument, or `0`
/// - `%N$s` / `%N$d` the N-th argument (1-based), without advancing
/// - `%%` a literal percent sign
///
/// A directive whose argument is missing renders as nothing. Unrecognized
/// `%` sequences are copied through.
pub(crate) fn render<A: fmt::Display>(template: &str, args: &[A]) -> String {
    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
    let mut out = String::with_capacity(template.len() + rendered.iter().map(String::len).sum::<usize>());
    let mut next = 0usize;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let Some((directive, consumed)) = parse_directive(after) else {
            out.push('%');
            rest = after;
            continue;
        };
        rest = &after[consumed..];

        let (index, kind) = match directive {
            Directive::Percent => {
                out.push('%');
                continue;
            }
            Directive::Next(kind) => {
                next += 1;
                (next - 1, kind)
            }
            Directive::Positional(n, kind) => (n - 1, kind),
        };

        if let Some(arg) = rendered.get(index) {
            match kind {
                Kind::Str => out.push_str(arg),
                Kind::Int => out.push_str(&leading_integer(arg).to_string()),
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Str,
    Int,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Percent,
    Next(Kind),
    Positional(usize, Kind),
}

/// Parses the text after a `%`, returning the directive and bytes consumed.
fn parse_directive(s: &str) -> Option<(Directive, usize)> {
    let kind = |c: u8| match c {
        b's' => Some(Kind::Str),
        b'd' => Some(Kind::Int),
        _ => None,
    };

    let bytes = s.as_bytes();
    match *bytes.first()? {
        b'%' => return Some((Directive::Percent, 1)),
        c if !c.is_ascii_digit() => return kind(c).map(|k| (Directive::Next(k), 1)),
        _ => {}
    }

    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(digits) != Some(&b'$') {
        return None;
    }
    let n: usize = s[..digits].parse().ok().filter(|n| *n > 0)?;
    let k = kind(*bytes.get(digits + 1)?)?;
    Some((Directive::Positional(n, k), digits + 2))
}

/// Integer prefix of `s` after leading whitespace, saturating; `0` if none.
fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        -value
    } else {
        value
    }
}
