//! Bracketed domain literals: `[192.0.2.1]`, `[IPv6:2001:db8::1]`.

use std::net::{Ipv4Addr, Ipv6Addr};

use super::error::{ErrorKind, Ipv4Reason, Ipv6Reason, LiteralReason, ValidationError};
use super::types::Domain;

const IPV6_TAG: &str = "IPv6:";

/// `text` starts with `[`. Offsets are relative to `text`.
pub(crate) fn scan_literal(text: &str) -> Result<Domain<'static>, ValidationError> {
    if text.len() < 2 || !text.ends_with(']') {
        return Err(malformed(LiteralReason::Unbracketed, text.len()));
    }
    let inner = &text[1..text.len() - 1];

    let tagged = inner
        .get(..IPV6_TAG.len())
        .is_some_and(|tag| tag.eq_ignore_ascii_case(IPV6_TAG));
    if tagged {
        let base = 1 + IPV6_TAG.len();
        return parse_ipv6(&inner[IPV6_TAG.len()..])
            .map(Domain::Ipv6Literal)
            .map_err(|(reason, offset)| malformed(LiteralReason::Ipv6(reason), base + offset));
    }

    let (v4_reason, v4_offset) = match parse_ipv4(inner) {
        Ok(addr) => return Ok(Domain::Ipv4Literal(addr)),
        Err(err) => err,
    };
    if inner.contains(':') {
        match parse_ipv6(inner) {
            Ok(addr) => return Ok(Domain::Ipv6Literal(addr)),
            // on garde l'erreur de la tentative qui est allée le plus loin
            Err((reason, offset)) if offset > v4_offset => {
                return Err(malformed(LiteralReason::Ipv6(reason), 1 + offset));
            }
            Err(_) => {}
        }
    }
    Err(malformed(LiteralReason::Ipv4(v4_reason), 1 + v4_offset))
}

fn malformed(reason: LiteralReason, offset: usize) -> ValidationError {
    ValidationError::new(ErrorKind::DomainLiteralMalformed(reason), offset)
}

/// Dotted quad, decimal octets 0-255, no leading zeros.
pub(crate) fn parse_ipv4(text: &str) -> Result<Ipv4Addr, (Ipv4Reason, usize)> {
    let bytes = text.as_bytes();
    let mut octets = [0u8; 4];
    let mut index = 0;
    let mut value: u16 = 0;
    let mut digits = 0;
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                if digits == 1 && bytes[start] == b'0' {
                    return Err((Ipv4Reason::LeadingZero, start));
                }
                value = value * 10 + u16::from(b - b'0');
                digits += 1;
                if value > 255 {
                    return Err((Ipv4Reason::OctetOutOfRange, start));
                }
            }
            b'.' => {
                if digits == 0 {
                    return Err((Ipv4Reason::EmptyOctet, i));
                }
                if index == 3 {
                    return Err((Ipv4Reason::OctetCount, i));
                }
                octets[index] = value as u8;
                index += 1;
                value = 0;
                digits = 0;
                start = i + 1;
            }
            _ => return Err((Ipv4Reason::InvalidChar, i)),
        }
    }

    if digits == 0 {
        return Err((Ipv4Reason::EmptyOctet, bytes.len()));
    }
    if index != 3 {
        return Err((Ipv4Reason::OctetCount, bytes.len()));
    }
    octets[3] = value as u8;
    Ok(Ipv4Addr::from(octets))
}

struct Groups {
    head: [u16; 8],
    head_len: usize,
    tail: [u16; 8],
    tail_len: usize,
    compressed: bool,
}

impl Groups {
    fn push(&mut self, value: u16) -> bool {
        if self.head_len + self.tail_len == 8 {
            return false;
        }
        if self.compressed {
            self.tail[self.tail_len] = value;
            self.tail_len += 1;
        } else {
            self.head[self.head_len] = value;
            self.head_len += 1;
        }
        true
    }

    fn finish(self) -> Option<Ipv6Addr> {
        let count = self.head_len + self.tail_len;
        if (self.compressed && count > 7) || (!self.compressed && count != 8) {
            return None;
        }
        let mut segments = [0u16; 8];
        segments[..self.head_len].copy_from_slice(&self.head[..self.head_len]);
        segments[8 - self.tail_len..].copy_from_slice(&self.tail[..self.tail_len]);
        Some(Ipv6Addr::from(segments))
    }
}

/// Hextets separated by ':', at most one "::", optional dotted-quad tail.
pub(crate) fn parse_ipv6(text: &str) -> Result<Ipv6Addr, (Ipv6Reason, usize)> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    if len == 0 {
        return Err((Ipv6Reason::GroupCount, 0));
    }

    let mut groups = Groups {
        head: [0; 8],
        head_len: 0,
        tail: [0; 8],
        tail_len: 0,
        compressed: false,
    };
    let mut i = 0;
    if bytes.starts_with(b"::") {
        groups.compressed = true;
        i = 2;
    } else if bytes[0] == b':' {
        return Err((Ipv6Reason::EmptyGroup, 0));
    }

    while i < len {
        let start = i;
        let end = bytes[start..]
            .iter()
            .position(|&b| b == b':')
            .map_or(len, |p| start + p);
        let piece = &text[start..end];

        if piece.contains('.') {
            if end != len {
                return Err((Ipv6Reason::Ipv4Tail, start));
            }
            let v4 = parse_ipv4(piece).map_err(|(_, offset)| (Ipv6Reason::Ipv4Tail, start + offset))?;
            let [a, b, c, d] = v4.octets();
            if !groups.push(u16::from_be_bytes([a, b])) || !groups.push(u16::from_be_bytes([c, d])) {
                return Err((Ipv6Reason::GroupCount, start));
            }
            break;
        }

        if piece.is_empty() {
            return Err((Ipv6Reason::EmptyGroup, start));
        }
        let mut value: u16 = 0;
        for (k, b) in piece.bytes().enumerate() {
            if k == 4 {
                return Err((Ipv6Reason::GroupTooLong, start + 4));
            }
            let digit = char::from(b)
                .to_digit(16)
                .ok_or((Ipv6Reason::InvalidChar, start + k))?;
            value = (value << 4) | digit as u16;
        }
        if !groups.push(value) {
            return Err((Ipv6Reason::GroupCount, start));
        }

        if end == len {
            break;
        }
        i = end + 1;
        if i < len && bytes[i] == b':' {
            if groups.compressed {
                return Err((Ipv6Reason::MultipleCompressions, end));
            }
            groups.compressed = true;
            i += 1;
        } else if i == len {
            return Err((Ipv6Reason::EmptyGroup, i));
        }
    }

    groups.finish().ok_or((Ipv6Reason::GroupCount, len))
}
